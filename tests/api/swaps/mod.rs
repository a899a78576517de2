mod create_offers;
mod find_partners;
mod list;
mod new_request;
mod respond;

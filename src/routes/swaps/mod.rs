mod cancel_request;
mod create_offers;
mod expire_requests;
mod find_partners;
mod list_requests;
mod new_request;
mod respond_to_offer;

pub use cancel_request::*;
pub use create_offers::*;
pub use expire_requests::*;
pub use find_partners::*;
pub use list_requests::*;
pub use new_request::*;
pub use respond_to_offer::*;

mod assignment;
mod data_stores;
mod eligibility;
mod equivalence;
mod error;
mod fairness;
mod matching;
mod org;
mod preference;
mod swap;
mod worker;

pub use assignment::*;
pub use data_stores::*;
pub use eligibility::*;
pub use equivalence::*;
pub use error::*;
pub use fairness::*;
pub use matching::*;
pub use org::*;
pub use preference::*;
pub use swap::*;
pub use worker::*;

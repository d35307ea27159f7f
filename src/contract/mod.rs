pub mod execute;
pub mod instantiate;
pub mod play;
pub mod query;
pub mod settle;


pub use crate::contract::execute::execute;
pub use crate::contract::instantiate::instantiate;
pub use crate::contract::query::query;

pub mod auth;
pub mod beacon;
pub mod contract;
pub mod error;
pub mod events;
pub mod msg;
pub mod pending;
pub mod risk;
pub mod state;

pub use crate::error::ContractError;

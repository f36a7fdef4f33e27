//! List view state for the send-log dashboard

mod filter;
mod query;
mod state;
mod worker;

pub use filter::*;
pub use query::*;
pub use state::*;
pub use worker::*;

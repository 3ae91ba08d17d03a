//! State structures for the Harvest Staking program.
//!
//! This module defines all account structures used to store program state.

pub mod platform;
pub mod pool_config;
pub mod pool_state;
pub mod user_position;

pub use platform::*;
pub use pool_config::*;
pub use pool_state::*;
pub use user_position::*;

//! Instruction handlers for the Harvest Staking program.
//!
//! This module contains all instruction implementations.

pub mod claim_reward;
pub mod compound_reward;
pub mod create_pool;
pub mod initialize;
pub mod pending_reward;
pub mod stake;
pub mod start_reward;
pub mod unstake;
pub mod update_platform;

pub use claim_reward::*;
pub use compound_reward::*;
pub use create_pool::*;
pub use initialize::*;
pub use pending_reward::*;
pub use stake::*;
pub use start_reward::*;
pub use unstake::*;
pub use update_platform::*;

//! Lifecycle events emitted for external observers.
//!
//! Events are informational; program correctness never depends on them.

use anchor_lang::prelude::*;

/// Emitted when the platform record is initialized.
#[event]
pub struct PlatformInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub deploy_fee: u64,
    pub performance_fee: u64,
}

/// Emitted when a new pool is created and funded.
#[event]
pub struct PoolCreated {
    pub pool_config: Pubkey,
    pub owner: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub initial_funding: u64,
    pub reward_per_slot: u64,
}

/// Emitted when the pool owner opens the reward window.
#[event]
pub struct RewardWindowSet {
    pub pool_config: Pubkey,
    pub start_slot: u64,
    pub end_slot: u64,
}

/// Emitted when a user stakes into a pool. `amount` is net of the stake fee.
#[event]
pub struct Deposited {
    pub pool_config: Pubkey,
    pub staker: Pubkey,
    pub amount: u64,
}

/// Emitted when a user withdraws principal from a pool.
#[event]
pub struct Withdrawn {
    pub pool_config: Pubkey,
    pub staker: Pubkey,
    pub amount: u64,
}

/// Emitted when settled reward is paid out to a claimer.
#[event]
pub struct RewardClaimed {
    pub pool_config: Pubkey,
    pub claimer: Pubkey,
    pub amount: u64,
}

/// Emitted when reward is converted to stake via the swap venue.
/// `reward_amount` left the reward vault; `staked_amount` entered the
/// stake vault after the swap.
#[event]
pub struct Compounded {
    pub pool_config: Pubkey,
    pub compounder: Pubkey,
    pub reward_amount: u64,
    pub staked_amount: u64,
}

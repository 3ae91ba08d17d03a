use anchor_lang::prelude::*;

use crate::constants::MAX_POOL_ID_LEN;

/// Immutable per-pool configuration. Created once by CreatePool; the pool's
/// vaults are PDA token accounts with this account as authority, so only
/// instruction handlers can move tokens out of them.
#[account]
pub struct PoolConfig {
    /// Pool creator; collects stake fees and the owner share of unstake fees.
    pub owner: Pubkey,
    /// Creator-chosen identifier, unique per creator (PDA seed).
    pub pool_id: String,
    /// Fee on every stake, in basis points of the staked amount.
    pub stake_fee: u16,
    /// Fee on every unstake, in basis points of the unstaked amount.
    pub unstake_fee: u16,
    /// Reward units emitted per slot, shared across all stakers.
    pub reward_per_slot: u64,
    /// Number of slots the reward schedule runs once started.
    pub duration: u64,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub stake_mint_decimals: u8,
    pub reward_mint_decimals: u8,
    /// PDA token account holding staked principal.
    pub stake_vault: Pubkey,
    /// PDA token account holding the reward reserve.
    pub reward_vault: Pubkey,
    /// The pool's mutable accrual state account.
    pub pool_state: Pubkey,
    pub bump: u8,
}

impl PoolConfig {
    pub const LEN: usize = 8
        + 32
        + (4 + MAX_POOL_ID_LEN)
        + (2 * 2)
        + 8
        + 8
        + (32 * 2)
        + (1 * 2)
        + (32 * 3)
        + 1;
}

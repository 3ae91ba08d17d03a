//! PendingReward instruction handler (read-only).
//!
//! Reports what a claim would pay right now by simulating accrual on a copy
//! of the pool state. Mutates nothing; repeated calls in the same slot
//! return the same value.

use anchor_lang::prelude::*;

use crate::accrual;
use crate::constants::*;
use crate::error::StakingError;
use crate::state::{PoolConfig, PoolState, UserPosition};

/// Accounts required for the pending-reward view.
#[derive(Accounts)]
pub struct PendingReward<'info> {
    /// CHECK: Only used to locate the user position; no signature needed
    /// for a read-only view.
    pub user: UncheckedAccount<'info>,

    /// The pool configuration.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.as_bytes(), pool_config.owner.as_ref()],
        bump = pool_config.bump
    )]
    pub pool_config: Account<'info, PoolConfig>,

    /// The pool's accrual state.
    #[account(
        constraint = pool_state.key() == pool_config.pool_state @ StakingError::StateMismatch
    )]
    pub pool_state: Account<'info, PoolState>,

    /// User's position in this pool.
    #[account(
        seeds = [USER_POSITION_SEED, pool_config.key().as_ref(), user.key().as_ref()],
        bump = user_position.bump,
        constraint = user_position.pool_config == pool_config.key() @ StakingError::PositionMismatch
    )]
    pub user_position: Account<'info, UserPosition>,
}

/// Return the reward the user would receive if they claimed now.
pub fn handler(ctx: Context<PendingReward>) -> Result<u64> {
    let clock = Clock::get()?;

    let simulated = accrual::simulated_acc_per_share(
        &ctx.accounts.pool_state,
        ctx.accounts.pool_config.reward_per_slot,
        clock.slot,
    )?;
    let pending = accrual::pending_total(&ctx.accounts.user_position, simulated)?;

    msg!("Pending reward: {}", pending);

    Ok(pending)
}

//! StartReward instruction handler.
//!
//! Opens the pool's reward window. One-shot: a window can neither be
//! restarted nor extended.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardWindowSet;
use crate::state::{PoolConfig, PoolState};

/// Accounts required for starting a pool's reward schedule.
#[derive(Accounts)]
pub struct StartReward<'info> {
    /// The pool owner; the only signer allowed to start the window.
    pub owner: Signer<'info>,

    /// The pool configuration.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.as_bytes(), pool_config.owner.as_ref()],
        bump = pool_config.bump,
        has_one = owner @ StakingError::Unauthorized
    )]
    pub pool_config: Account<'info, PoolConfig>,

    /// The pool's accrual state.
    #[account(
        mut,
        constraint = pool_state.key() == pool_config.pool_state @ StakingError::StateMismatch
    )]
    pub pool_state: Account<'info, PoolState>,
}

/// Start the reward window at the current slot.
pub fn handler(ctx: Context<StartReward>) -> Result<()> {
    let pool_state = &mut ctx.accounts.pool_state;

    require!(!pool_state.is_started(), StakingError::PoolAlreadyStarted);

    let clock = Clock::get()?;
    pool_state.start_slot = clock.slot;
    pool_state.end_slot = clock
        .slot
        .checked_add(ctx.accounts.pool_config.duration)
        .ok_or(StakingError::MathOverflow)?;
    pool_state.last_accrual_slot = pool_state.start_slot;

    emit!(RewardWindowSet {
        pool_config: ctx.accounts.pool_config.key(),
        start_slot: pool_state.start_slot,
        end_slot: pool_state.end_slot,
    });

    msg!(
        "Reward window set: slots {} - {}",
        pool_state.start_slot,
        pool_state.end_slot
    );

    Ok(())
}

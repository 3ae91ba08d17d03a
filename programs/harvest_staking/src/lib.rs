//! # Harvest Staking Program
//!
//! A multi-pool token staking program. Users deposit a stake token into an
//! isolated pool and accrue a reward token over time, proportional to their
//! share of the pool and a fixed per-slot emission rate.
//!
//! ## Features
//! - Many independent pools, each with its own mint pair, fee schedule, and
//!   emission schedule
//! - Fixed-point reward-per-share accrual (no floating point, lazily
//!   computed at the top of every operation)
//! - Stake/unstake fees in basis points, split between pool owner and the
//!   platform treasury
//! - Reward emission capped at the pool's funded reserve
//! - Compounding via an external swap venue, all-or-nothing
//! - Safe math with overflow protection

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod accrual;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod swap;

#[cfg(test)]
mod tests;

use instructions::*;

#[program]
pub mod harvest_staking {
    use super::*;

    /// Initializes the global platform record: treasury address and the
    /// default fee schedule read by every pool operation.
    ///
    /// # Arguments
    /// * `deploy_fee` - Lamports charged to a pool creator at `create_pool`
    /// * `performance_fee` - Lamports charged on the claim/compound paths
    /// * `unstake_fee_treasury_bps` - Treasury share of every unstake fee
    ///
    /// # Errors
    /// Returns an error if the treasury share exceeds 10000 basis points.
    pub fn initialize(
        ctx: Context<Initialize>,
        deploy_fee: u64,
        performance_fee: u64,
        unstake_fee_treasury_bps: u16,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, deploy_fee, performance_fee, unstake_fee_treasury_bps)
    }

    /// Admin function to update the platform fee schedule.
    ///
    /// # Errors
    /// Returns an error if the caller is not the platform admin or the
    /// treasury share exceeds 10000 basis points.
    pub fn update_fees(
        ctx: Context<UpdatePlatform>,
        deploy_fee: u64,
        performance_fee: u64,
        unstake_fee_treasury_bps: u16,
    ) -> Result<()> {
        instructions::update_platform::update_fees_handler(
            ctx,
            deploy_fee,
            performance_fee,
            unstake_fee_treasury_bps,
        )
    }

    /// Admin function to change the platform treasury address.
    pub fn set_treasury(ctx: Context<UpdatePlatform>, new_treasury: Pubkey) -> Result<()> {
        instructions::update_platform::set_treasury_handler(ctx, new_treasury)
    }

    /// Creates an isolated staking pool, funds its reward reserve, and
    /// charges the platform deployment fee.
    ///
    /// # Arguments
    /// * `pool_id` - Creator-chosen identifier, unique per creator
    /// * `stake_fee` / `unstake_fee` - Basis-point fees (0-10000)
    /// * `initial_funding` - Reward tokens deposited into the reward vault
    /// * `reward_per_slot` - Reward units emitted per slot
    /// * `duration` - Reward window length in slots
    ///
    /// # Errors
    /// Returns an error if:
    /// - A fee is out of range
    /// - Funding, rate, or duration is zero
    /// - The creator cannot cover the funding plus the deployment fee
    pub fn create_pool(
        ctx: Context<CreatePool>,
        pool_id: String,
        stake_fee: u16,
        unstake_fee: u16,
        initial_funding: u64,
        reward_per_slot: u64,
        duration: u64,
    ) -> Result<()> {
        instructions::create_pool::handler(
            ctx,
            pool_id,
            stake_fee,
            unstake_fee,
            initial_funding,
            reward_per_slot,
            duration,
        )
    }

    /// Opens the pool's reward window at the current slot. Owner-only and
    /// one-shot: a window cannot be restarted or extended.
    ///
    /// # Errors
    /// Returns an error if the caller is not the pool owner or the window
    /// was already started.
    pub fn start_reward(ctx: Context<StartReward>) -> Result<()> {
        instructions::start_reward::handler(ctx)
    }

    /// Stakes tokens into a pool. The stake fee goes to the pool owner;
    /// the net amount is credited to the user's position. Reward earned so
    /// far is settled into the position, not auto-claimed.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - The current slot is outside the reward window
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Unstakes tokens from a pool. The unstake fee is split between the
    /// pool owner and the platform treasury; the remainder returns to the
    /// staker.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Amount exceeds the staked balance
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, amount)
    }

    /// Pays out all settled reward to the claimer. A no-op when nothing is
    /// pending.
    ///
    /// # Errors
    /// Returns an error if the reward vault cannot cover the payout.
    pub fn claim_reward(ctx: Context<ClaimReward>) -> Result<()> {
        instructions::claim_reward::handler(ctx)
    }

    /// Converts settled reward into additional stake via the external swap
    /// venue (or a direct vault transfer when the mints match). No stake
    /// fee is charged on compounded amounts. All-or-nothing: a venue
    /// failure rolls the whole operation back.
    ///
    /// # Errors
    /// Returns an error if the swap venue fails or returns nothing.
    pub fn compound_reward<'info>(
        ctx: Context<'_, '_, '_, 'info, CompoundReward<'info>>,
    ) -> Result<()> {
        instructions::compound_reward::handler(ctx)
    }

    /// Read-only: the reward a user would receive if they claimed now.
    /// Simulates accrual without mutating state; idempotent within a slot.
    pub fn pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
        instructions::pending_reward::handler(ctx)
    }
}

//! Fixed-point reward accrual and fee math.
//!
//! All functions here are pure: they operate on plain state values with no
//! account plumbing, so every instruction handler shares one arithmetic path
//! and the whole module is unit-testable off-chain. Integer fixed-point
//! (scaled by `PRECISION`) is used throughout; truncation per accrual call is
//! bounded by one reward unit and the fractional residue stays in the
//! accumulator until a later accrual recovers it.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, PRECISION};
use crate::error::StakingError;
use crate::state::{PoolState, UserPosition};

/// Number of slots in `[from_slot, to_slot]` that fall inside the reward
/// window ending at `end_slot`.
pub fn reward_multiplier(from_slot: u64, to_slot: u64, end_slot: u64) -> u64 {
    if to_slot <= end_slot {
        to_slot.saturating_sub(from_slot)
    } else if from_slot >= end_slot {
        0
    } else {
        end_slot - from_slot
    }
}

/// Bring the pool's reward-per-share accumulator up to `current_slot`.
///
/// Must run at the top of every state-changing operation, before any balance
/// mutation, so all operations observe a consistent accumulator.
///
/// Emission is capped at the pool's unscheduled funding: once the funded
/// reserve is exhausted further accrual yields zero instead of underflowing
/// the vault.
pub fn accrue(state: &mut PoolState, reward_per_slot: u64, current_slot: u64) -> Result<()> {
    if !state.is_started() || current_slot <= state.last_accrual_slot {
        return Ok(());
    }

    if state.total_staked == 0 {
        // Nobody to distribute to; slots with no stakers emit nothing.
        state.last_accrual_slot = current_slot;
        return Ok(());
    }

    let (reward, acc_delta) = accrual_delta(state, reward_per_slot, current_slot)?;

    state.acc_reward_per_share = state
        .acc_reward_per_share
        .checked_add(acc_delta)
        .ok_or(StakingError::MathOverflow)?;
    state.total_accrued = state
        .total_accrued
        .checked_add(reward)
        .ok_or(StakingError::MathOverflow)?;
    state.last_accrual_slot = current_slot;

    Ok(())
}

/// The accumulator value `accrue` would produce at `current_slot`, without
/// mutating anything. Used by the read-only PendingReward path.
pub fn simulated_acc_per_share(
    state: &PoolState,
    reward_per_slot: u64,
    current_slot: u64,
) -> Result<u128> {
    if !state.is_started() || current_slot <= state.last_accrual_slot || state.total_staked == 0 {
        return Ok(state.acc_reward_per_share);
    }

    let (_, acc_delta) = accrual_delta(state, reward_per_slot, current_slot)?;
    state
        .acc_reward_per_share
        .checked_add(acc_delta)
        .ok_or_else(|| error!(StakingError::MathOverflow))
}

/// Capped reward and scaled per-share delta for the elapsed interval.
/// Caller has already ruled out `total_staked == 0`.
fn accrual_delta(
    state: &PoolState,
    reward_per_slot: u64,
    current_slot: u64,
) -> Result<(u64, u128)> {
    let elapsed = reward_multiplier(state.last_accrual_slot, current_slot, state.end_slot);

    let scheduled = (elapsed as u128)
        .checked_mul(reward_per_slot as u128)
        .ok_or(StakingError::MathOverflow)?;
    // Cap cumulative emission at the funded reserve.
    let reward = scheduled.min(state.unaccrued_funding() as u128) as u64;

    let acc_delta = (reward as u128)
        .checked_mul(PRECISION)
        .ok_or(StakingError::MathOverflow)?
        / (state.total_staked as u128);

    Ok((reward, acc_delta))
}

/// Reward earned by a position since its last checkpoint, clamped at zero
/// to absorb fixed-point truncation.
pub fn earned(position: &UserPosition, acc_reward_per_share: u128) -> Result<u64> {
    let theoretical = (position.staked_amount as u128)
        .checked_mul(acc_reward_per_share)
        .ok_or(StakingError::MathOverflow)?
        / PRECISION;
    let pending = theoretical.saturating_sub(position.reward_debt as u128);
    u64::try_from(pending).map_err(|_| error!(StakingError::MathOverflow))
}

/// Move newly earned reward into the position's settled balance and reset
/// the checkpoint. Earned reward is locked in, not paid out; payment happens
/// only on the claim/compound paths.
pub fn settle(position: &mut UserPosition, acc_reward_per_share: u128) -> Result<()> {
    let fresh = earned(position, acc_reward_per_share)?;
    position.pending_rewards = position
        .pending_rewards
        .checked_add(fresh)
        .ok_or(StakingError::MathOverflow)?;
    checkpoint(position, acc_reward_per_share)
}

/// Recompute the reward-debt checkpoint for the position's current balance.
/// Must run after every mutation of `staked_amount`.
pub fn checkpoint(position: &mut UserPosition, acc_reward_per_share: u128) -> Result<()> {
    let debt = (position.staked_amount as u128)
        .checked_mul(acc_reward_per_share)
        .ok_or(StakingError::MathOverflow)?
        / PRECISION;
    position.reward_debt = u64::try_from(debt).map_err(|_| error!(StakingError::MathOverflow))?;
    Ok(())
}

/// Settled plus newly earned reward, as PendingReward reports it.
pub fn pending_total(position: &UserPosition, acc_reward_per_share: u128) -> Result<u64> {
    let fresh = earned(position, acc_reward_per_share)?;
    position
        .pending_rewards
        .checked_add(fresh)
        .ok_or_else(|| error!(StakingError::MathOverflow))
}

/// Apply a completed compound to the ledger: `reward_amount` of settled
/// reward leaves the reward reserve and `staked_amount` enters the user's
/// stake. Runs only after the token movement has been verified; a failed
/// swap must leave the ledger untouched.
pub fn compound_into_stake(
    state: &mut PoolState,
    position: &mut UserPosition,
    reward_amount: u64,
    staked_amount: u64,
) -> Result<()> {
    state.reward_amount = state
        .reward_amount
        .checked_sub(reward_amount)
        .ok_or(StakingError::MathOverflow)?;
    state.paid_rewards = state
        .paid_rewards
        .checked_add(reward_amount)
        .ok_or(StakingError::MathOverflow)?;

    position.pending_rewards = position
        .pending_rewards
        .checked_sub(reward_amount)
        .ok_or(StakingError::MathOverflow)?;
    position.total_claimed = position
        .total_claimed
        .checked_add(reward_amount)
        .ok_or(StakingError::MathOverflow)?;

    position.staked_amount = position
        .staked_amount
        .checked_add(staked_amount)
        .ok_or(StakingError::MathOverflow)?;
    state.total_staked = state
        .total_staked
        .checked_add(staked_amount)
        .ok_or(StakingError::MathOverflow)?;

    checkpoint(position, state.acc_reward_per_share)
}

/// Integer-truncated basis-point fee: `amount * fee_bps / 10000`.
pub fn fee_amount(amount: u64, fee_bps: u16) -> Result<u64> {
    let fee = (amount as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(StakingError::MathOverflow)?
        / (BPS_DENOMINATOR as u128);
    // fee_bps <= 10000, so fee <= amount and the cast is lossless.
    Ok(fee as u64)
}

/// Split an unstake fee into (pool owner, treasury) shares. The treasury
/// takes `treasury_share_bps` of the fee; the owner keeps the remainder.
pub fn split_unstake_fee(fee: u64, treasury_share_bps: u16) -> Result<(u64, u64)> {
    let treasury_cut = fee_amount(fee, treasury_share_bps)?;
    Ok((fee - treasury_cut, treasury_cut))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(start: u64, end: u64, last: u64, staked: u64, funded: u64) -> PoolState {
        PoolState {
            start_slot: start,
            end_slot: end,
            last_accrual_slot: last,
            acc_reward_per_share: 0,
            total_staked: staked,
            reward_amount: funded,
            total_funded: funded,
            total_accrued: 0,
            paid_rewards: 0,
            bump: 255,
        }
    }

    #[test]
    fn multiplier_clamps_to_window() {
        assert_eq!(reward_multiplier(100, 150, 200), 50);
        assert_eq!(reward_multiplier(100, 250, 200), 100);
        assert_eq!(reward_multiplier(200, 250, 200), 0);
        assert_eq!(reward_multiplier(300, 250, 200), 0);
    }

    #[test]
    fn accrue_is_noop_before_start() {
        let mut s = state(0, 0, 0, 1_000, 1_000_000);
        accrue(&mut s, 100, 500).unwrap();
        assert_eq!(s.acc_reward_per_share, 0);
        assert_eq!(s.last_accrual_slot, 0);
    }

    #[test]
    fn accrue_advances_clock_with_no_stakers() {
        let mut s = state(100, 1_100, 100, 0, 1_000_000);
        accrue(&mut s, 100, 150).unwrap();
        assert_eq!(s.acc_reward_per_share, 0);
        assert_eq!(s.total_accrued, 0);
        assert_eq!(s.last_accrual_slot, 150);
    }

    #[test]
    fn accrue_caps_at_funded_reserve() {
        // 10 slots * 100/slot scheduled, but only 250 funded.
        let mut s = state(100, 1_100, 100, 1_000, 250);
        accrue(&mut s, 100, 110).unwrap();
        assert_eq!(s.total_accrued, 250);
        assert_eq!(s.acc_reward_per_share, 250 * PRECISION / 1_000);

        // Reserve exhausted: further accrual yields zero, not an underflow.
        let acc = s.acc_reward_per_share;
        accrue(&mut s, 100, 200).unwrap();
        assert_eq!(s.acc_reward_per_share, acc);
        assert_eq!(s.total_accrued, 250);
    }

    #[test]
    fn fee_truncates_toward_zero() {
        assert_eq!(fee_amount(10_000, 200).unwrap(), 200);
        assert_eq!(fee_amount(99, 100).unwrap(), 0); // 0.99 truncates
        assert_eq!(fee_amount(u64::MAX, 10_000).unwrap(), u64::MAX);
    }

    #[test]
    fn unstake_fee_split_conserves_fee() {
        let (owner, treasury) = split_unstake_fee(1_000, 2_500).unwrap();
        assert_eq!(treasury, 250);
        assert_eq!(owner, 750);

        let (owner, treasury) = split_unstake_fee(777, 0).unwrap();
        assert_eq!((owner, treasury), (777, 0));
    }

    #[test]
    fn earned_clamps_negative_rounding_to_zero() {
        let p = UserPosition {
            owner: Pubkey::default(),
            pool_config: Pubkey::default(),
            staked_amount: 3,
            reward_debt: 10,
            pending_rewards: 0,
            total_claimed: 0,
            bump: 255,
        };
        // theoretical (0) < debt: must clamp, never underflow
        assert_eq!(earned(&p, 0).unwrap(), 0);
    }
}

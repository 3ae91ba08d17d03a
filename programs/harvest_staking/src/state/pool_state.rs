use anchor_lang::prelude::*;

/// Mutable accrual state for one pool.
///
/// Invariants maintained by the instruction handlers:
/// - `acc_reward_per_share` is monotonically non-decreasing
/// - `last_accrual_slot <= current slot`
/// - `total_accrued <= total_funded` (emission never exceeds funding)
/// - reward is emitted only inside `[start_slot, end_slot]`
#[account]
pub struct PoolState {
    /// Slot at which emission begins; 0 until StartReward.
    pub start_slot: u64,
    /// Slot at which emission stops; 0 until StartReward.
    pub end_slot: u64,
    /// Last slot at which `acc_reward_per_share` was brought up to date.
    pub last_accrual_slot: u64,
    /// Reward units per staked unit, scaled by `PRECISION`.
    pub acc_reward_per_share: u128,
    /// Sum of all user positions' staked amounts.
    pub total_staked: u64,
    /// Reward funding still held by the reward vault for emission.
    pub reward_amount: u64,
    /// Cumulative reward funding ever deposited into the pool.
    pub total_funded: u64,
    /// Cumulative reward scheduled by accrual; capped at `total_funded`.
    pub total_accrued: u64,
    /// Cumulative reward actually paid out of the reward vault.
    pub paid_rewards: u64,
    pub bump: u8,
}

impl PoolState {
    pub const LEN: usize = 8 + (8 * 3) + 16 + (8 * 5) + 1;

    /// Reward funding not yet scheduled for emission.
    pub fn unaccrued_funding(&self) -> u64 {
        self.total_funded.saturating_sub(self.total_accrued)
    }

    pub fn is_started(&self) -> bool {
        self.start_slot > 0
    }
}

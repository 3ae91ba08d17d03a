use anchor_lang::prelude::*;

/// Per-(pool, user) stake balance and reward checkpoint.
///
/// Created lazily on first stake and kept alive when the balance returns to
/// zero, so the reward-debt history survives repeated stake/unstake cycles.
#[account]
pub struct UserPosition {
    pub owner: Pubkey,
    pub pool_config: Pubkey,
    /// Principal currently staked in the pool.
    pub staked_amount: u64,
    /// `staked_amount * acc_reward_per_share / PRECISION` at the last
    /// checkpoint; subtracted from the theoretical total to yield only the
    /// unclaimed portion.
    pub reward_debt: u64,
    /// Reward settled by past stake/unstake interactions but not yet paid
    /// out. Paid by ClaimReward or reinvested by CompoundReward.
    pub pending_rewards: u64,
    /// Cumulative reward ever paid to this position.
    pub total_claimed: u64,
    pub bump: u8,
}

impl UserPosition {
    pub const LEN: usize = 8 + 32 + 32 + (8 * 4) + 1;
}

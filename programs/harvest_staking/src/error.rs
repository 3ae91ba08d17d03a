//! Error types for the Harvest Staking program.
//!
//! This module defines all custom error codes that can be returned by the program.
//! Each error names the specific invariant that was violated.

use anchor_lang::prelude::*;

/// Custom error codes for the Harvest Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors ==========

    /// Cannot stake, unstake, or fund with zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// Stake fee exceeds 10000 basis points.
    #[msg("Stake fee exceeds the maximum of 10000 basis points")]
    InvalidStakeFee,

    /// Unstake fee exceeds 10000 basis points.
    #[msg("Unstake fee exceeds the maximum of 10000 basis points")]
    InvalidUnstakeFee,

    /// Reward emission rate must be positive.
    #[msg("Reward per slot must be greater than zero")]
    ZeroRewardRate,

    /// Reward schedule duration must be positive.
    #[msg("Pool duration must be greater than zero")]
    ZeroDuration,

    /// Pool must be funded with a positive reward amount.
    #[msg("Initial reward funding must be greater than zero")]
    ZeroFunding,

    /// Pool id exceeds the maximum byte length.
    #[msg("Pool id exceeds 32 bytes")]
    PoolIdTooLong,

    /// Treasury share of the unstake fee exceeds 10000 basis points.
    #[msg("Unstake fee treasury share exceeds 10000 basis points")]
    InvalidTreasuryShare,

    // ========== Lifecycle/State Errors ==========

    /// StartReward was already called; the reward window is one-shot.
    #[msg("Reward window already started - a pool cannot be restarted")]
    PoolAlreadyStarted,

    /// The current slot is outside the pool's reward window.
    #[msg("Pool is not active - current slot is outside the reward window")]
    PoolNotActive,

    /// Unstake amount exceeds the user's staked balance.
    #[msg("Unstake amount exceeds staked balance")]
    InsufficientStake,

    // ========== Funds/Vault Errors ==========

    /// Creator balance cannot cover the deployment fee.
    #[msg("Insufficient balance to cover the pool deployment fee")]
    InsufficientFunding,

    /// User balance cannot cover the platform performance fee.
    #[msg("Insufficient balance to cover the platform performance fee")]
    InsufficientPerformanceFee,

    /// The reward vault cannot cover the pending payout.
    #[msg("Reward vault balance is less than the pending reward")]
    InsufficientRewardVault,

    // ========== Math Errors ==========

    /// Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Authorization Errors ==========

    /// Caller is not authorized for this operation.
    #[msg("Unauthorized: signer does not match the required authority")]
    Unauthorized,

    // ========== Account Validation Errors ==========

    /// The provided mint does not match the pool's configuration.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// The provided vault does not match the pool's configuration.
    #[msg("Vault address does not match the pool configuration")]
    VaultMismatch,

    /// The provided treasury does not match the platform record.
    #[msg("Treasury address does not match the platform record")]
    TreasuryMismatch,

    /// The provided pool state does not belong to this pool config.
    #[msg("Pool state account does not belong to this pool")]
    StateMismatch,

    /// The user position does not belong to this pool.
    #[msg("User position does not belong to this pool")]
    PositionMismatch,

    // ========== External Collaborator Errors ==========

    /// The external swap venue failed or returned nothing.
    #[msg("Swap venue call failed - compound rolled back")]
    SwapFailed,
}

//! Program constants for the Harvest Staking program.
//!
//! This module defines all constant values used throughout the staking program,
//! including PDA seeds, fee limits, and precision values.

use anchor_lang::prelude::*;

/// Seed for deriving the platform PDA (global fee configuration singleton)
pub const PLATFORM_SEED: &[u8] = b"platform";

/// Seed for deriving pool config PDAs
pub const POOL_CONFIG_SEED: &[u8] = b"pool_config";

/// Seed for deriving pool state PDAs
pub const POOL_STATE_SEED: &[u8] = b"pool_state";

/// Seed for deriving a pool's stake-token vault PDA
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";

/// Seed for deriving a pool's reward-token vault PDA
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Seed for deriving user position PDAs
pub const USER_POSITION_SEED: &[u8] = b"user_position";

/// Basis points denominator (100% = 10000 basis points)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum stake/unstake fee (100% = 10000 basis points)
pub const MAX_FEE_BPS: u16 = 10_000;

/// Maximum byte length of a creator-chosen pool id
pub const MAX_POOL_ID_LEN: usize = 32;

/// Precision multiplier for the reward-per-share accumulator.
/// Residual reward below this precision stays in the accumulator and is
/// recovered on later accruals.
pub const PRECISION: u128 = 1_000_000_000_000; // 10^12

/// Instruction tag of a Raydium-style swap_base_in, consumed by the swap adapter
pub const SWAP_BASE_IN_TAG: u8 = 9;

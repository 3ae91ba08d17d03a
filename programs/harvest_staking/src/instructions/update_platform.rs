//! Platform admin handlers.
//!
//! Fee schedule and treasury updates. Only the platform admin may call
//! these; the record itself is never deleted.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::Platform;

/// Accounts required for platform updates.
#[derive(Accounts)]
pub struct UpdatePlatform<'info> {
    /// The platform admin.
    pub admin: Signer<'info>,

    /// The platform record to modify.
    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,
}

/// Update the platform fee schedule. Existing pools pick up the new values
/// on their next operation; per-pool stake/unstake fees are unaffected.
pub fn update_fees_handler(
    ctx: Context<UpdatePlatform>,
    deploy_fee: u64,
    performance_fee: u64,
    unstake_fee_treasury_bps: u16,
) -> Result<()> {
    require!(
        unstake_fee_treasury_bps <= MAX_FEE_BPS,
        StakingError::InvalidTreasuryShare
    );

    let platform = &mut ctx.accounts.platform;
    msg!(
        "Fees updated: deploy {} -> {}, performance {} -> {}, treasury share {}bp -> {}bp",
        platform.deploy_fee,
        deploy_fee,
        platform.performance_fee,
        performance_fee,
        platform.unstake_fee_treasury_bps,
        unstake_fee_treasury_bps
    );

    platform.deploy_fee = deploy_fee;
    platform.performance_fee = performance_fee;
    platform.unstake_fee_treasury_bps = unstake_fee_treasury_bps;

    Ok(())
}

/// Point the platform at a new treasury address.
pub fn set_treasury_handler(ctx: Context<UpdatePlatform>, new_treasury: Pubkey) -> Result<()> {
    require!(new_treasury != Pubkey::default(), StakingError::TreasuryMismatch);

    let platform = &mut ctx.accounts.platform;
    msg!("Treasury changed: {} -> {}", platform.treasury, new_treasury);
    platform.treasury = new_treasury;

    Ok(())
}

//! Initialize instruction handler.
//!
//! Creates the global platform record: treasury address and default fee
//! schedule. The PDA seed makes it a singleton; every pool operation that
//! charges a platform fee reads this account.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PlatformInitialized;
use crate::state::Platform;

/// Accounts required for platform initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin authority that will control the platform record.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The platform singleton to be created.
    #[account(
        init,
        payer = admin,
        space = Platform::LEN,
        seeds = [PLATFORM_SEED],
        bump
    )]
    pub platform: Account<'info, Platform>,

    /// Destination for deployment, performance, and treasury fee shares.
    /// CHECK: Only the address is recorded; no data is read or written.
    pub treasury: UncheckedAccount<'info>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,
}

/// Initialize the platform record.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `deploy_fee` - Lamports charged to a creator at CreatePool
/// * `performance_fee` - Lamports charged on the claim/compound paths
/// * `unstake_fee_treasury_bps` - Treasury share of every unstake fee
pub fn handler(
    ctx: Context<Initialize>,
    deploy_fee: u64,
    performance_fee: u64,
    unstake_fee_treasury_bps: u16,
) -> Result<()> {
    require!(
        unstake_fee_treasury_bps <= MAX_FEE_BPS,
        StakingError::InvalidTreasuryShare
    );

    let platform = &mut ctx.accounts.platform;
    platform.admin = ctx.accounts.admin.key();
    platform.treasury = ctx.accounts.treasury.key();
    platform.deploy_fee = deploy_fee;
    platform.performance_fee = performance_fee;
    platform.unstake_fee_treasury_bps = unstake_fee_treasury_bps;
    platform.bump = ctx.bumps.platform;

    emit!(PlatformInitialized {
        admin: platform.admin,
        treasury: platform.treasury,
        deploy_fee,
        performance_fee,
    });

    msg!("Platform initialized");
    msg!("Treasury: {}", platform.treasury);
    msg!("Deploy fee: {} lamports", deploy_fee);
    msg!("Performance fee: {} lamports", performance_fee);

    Ok(())
}

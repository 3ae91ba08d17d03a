//! ClaimReward instruction handler.
//!
//! Pays out all settled reward to the claimer. Claiming with nothing
//! pending is a no-op, not an error.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::accrual;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardClaimed;
use crate::state::{Platform, PoolConfig, PoolState, UserPosition};

/// Accounts required for claiming rewards.
#[derive(Accounts)]
pub struct ClaimReward<'info> {
    /// The user claiming rewards.
    #[account(mut)]
    pub claimer: Signer<'info>,

    /// The platform record supplying the performance fee.
    #[account(
        seeds = [PLATFORM_SEED],
        bump = platform.bump
    )]
    pub platform: Box<Account<'info, Platform>>,

    /// The platform treasury receiving the performance fee.
    /// CHECK: Address is validated against the platform record.
    #[account(
        mut,
        constraint = treasury.key() == platform.treasury @ StakingError::TreasuryMismatch
    )]
    pub treasury: UncheckedAccount<'info>,

    /// The pool configuration.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.as_bytes(), pool_config.owner.as_ref()],
        bump = pool_config.bump
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    /// The pool's accrual state.
    #[account(
        mut,
        constraint = pool_state.key() == pool_config.pool_state @ StakingError::StateMismatch
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// User's position in this pool.
    #[account(
        mut,
        seeds = [USER_POSITION_SEED, pool_config.key().as_ref(), claimer.key().as_ref()],
        bump = user_position.bump,
        constraint = user_position.owner == claimer.key() @ StakingError::Unauthorized,
        constraint = user_position.pool_config == pool_config.key() @ StakingError::PositionMismatch
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// User's reward-token account receiving the payout.
    #[account(
        mut,
        constraint = claimer_reward_account.mint == pool_config.reward_mint @ StakingError::MintMismatch,
        constraint = claimer_reward_account.owner == claimer.key() @ StakingError::Unauthorized
    )]
    pub claimer_reward_account: Box<Account<'info, TokenAccount>>,

    /// Pool's reward vault being debited.
    #[account(
        mut,
        constraint = reward_vault.key() == pool_config.reward_vault @ StakingError::VaultMismatch
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// System program (performance fee transfer).
    pub system_program: Program<'info, System>,
}

/// Claim all settled reward.
pub fn handler(ctx: Context<ClaimReward>) -> Result<()> {
    let platform = &ctx.accounts.platform;

    // Performance fee in lamports, charged on the claim path.
    if platform.performance_fee > 0 {
        require!(
            ctx.accounts.claimer.lamports() > platform.performance_fee,
            StakingError::InsufficientPerformanceFee
        );
        let cpi_accounts = system_program::Transfer {
            from: ctx.accounts.claimer.to_account_info(),
            to: ctx.accounts.treasury.to_account_info(),
        };
        let cpi_program = ctx.accounts.system_program.to_account_info();
        system_program::transfer(
            CpiContext::new(cpi_program, cpi_accounts),
            platform.performance_fee,
        )?;
    }

    let pool_config = &ctx.accounts.pool_config;
    let pool_state = &mut ctx.accounts.pool_state;
    let user_position = &mut ctx.accounts.user_position;
    let clock = Clock::get()?;

    accrual::accrue(pool_state, pool_config.reward_per_slot, clock.slot)?;
    accrual::settle(user_position, pool_state.acc_reward_per_share)?;

    let payout = user_position.pending_rewards;
    if payout == 0 {
        msg!("Nothing to claim");
        return Ok(());
    }

    // Never pay out more than the ledger or the vault holds.
    require!(
        pool_state.reward_amount >= payout && ctx.accounts.reward_vault.amount >= payout,
        StakingError::InsufficientRewardVault
    );

    let owner_key = pool_config.owner;
    let pool_id = pool_config.pool_id.clone();
    let seeds = &[
        POOL_CONFIG_SEED,
        pool_id.as_bytes(),
        owner_key.as_ref(),
        &[pool_config.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_vault.to_account_info(),
        to: ctx.accounts.claimer_reward_account.to_account_info(),
        authority: ctx.accounts.pool_config.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(
        CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
        payout,
    )?;

    let pool_state = &mut ctx.accounts.pool_state;
    let user_position = &mut ctx.accounts.user_position;

    pool_state.reward_amount = pool_state
        .reward_amount
        .checked_sub(payout)
        .ok_or(StakingError::MathOverflow)?;
    pool_state.paid_rewards = pool_state
        .paid_rewards
        .checked_add(payout)
        .ok_or(StakingError::MathOverflow)?;

    user_position.pending_rewards = 0;
    user_position.total_claimed = user_position
        .total_claimed
        .checked_add(payout)
        .ok_or(StakingError::MathOverflow)?;

    emit!(RewardClaimed {
        pool_config: ctx.accounts.pool_config.key(),
        claimer: ctx.accounts.claimer.key(),
        amount: payout,
    });

    msg!("Claimed {} reward tokens", payout);
    msg!("Total claimed by user: {}", user_position.total_claimed);

    Ok(())
}

//! Unstake instruction handler.
//!
//! Withdraws principal from a pool. The unstake fee is split between the
//! pool owner and the platform treasury according to the platform's
//! configured share; the remainder returns to the staker.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::accrual;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::Withdrawn;
use crate::state::{Platform, PoolConfig, PoolState, UserPosition};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The user withdrawing tokens.
    #[account(mut)]
    pub staker: Signer<'info>,

    /// The platform record supplying the unstake fee split.
    #[account(
        seeds = [PLATFORM_SEED],
        bump = platform.bump
    )]
    pub platform: Box<Account<'info, Platform>>,

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
        seeds = [USER_POSITION_SEED, pool_config.key().as_ref(), staker.key().as_ref()],
        bump = user_position.bump,
        constraint = user_position.owner == staker.key() @ StakingError::Unauthorized,
        constraint = user_position.pool_config == pool_config.key() @ StakingError::PositionMismatch
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// User's stake-token account receiving the net amount.
    #[account(
        mut,
        constraint = staker_stake_account.mint == pool_config.stake_mint @ StakingError::MintMismatch,
        constraint = staker_stake_account.owner == staker.key() @ StakingError::Unauthorized
    )]
    pub staker_stake_account: Box<Account<'info, TokenAccount>>,

    /// Pool's stake vault being debited.
    #[account(
        mut,
        constraint = stake_vault.key() == pool_config.stake_vault @ StakingError::VaultMismatch
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    /// Pool owner's stake-token account receiving its fee share.
    #[account(
        mut,
        constraint = owner_fee_account.mint == pool_config.stake_mint @ StakingError::MintMismatch,
        constraint = owner_fee_account.owner == pool_config.owner @ StakingError::Unauthorized
    )]
    pub owner_fee_account: Box<Account<'info, TokenAccount>>,

    /// Treasury's stake-token account receiving its fee share.
    #[account(
        mut,
        constraint = treasury_fee_account.mint == pool_config.stake_mint @ StakingError::MintMismatch,
        constraint = treasury_fee_account.owner == platform.treasury @ StakingError::TreasuryMismatch
    )]
    pub treasury_fee_account: Box<Account<'info, TokenAccount>>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Unstake tokens from the pool.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
/// * `amount` - Principal to withdraw, fee-inclusive
pub fn handler(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);

    let pool_config = &ctx.accounts.pool_config;
    let platform = &ctx.accounts.platform;
    let pool_state = &mut ctx.accounts.pool_state;
    let user_position = &mut ctx.accounts.user_position;
    let clock = Clock::get()?;

    require!(
        amount <= user_position.staked_amount,
        StakingError::InsufficientStake
    );

    accrual::accrue(pool_state, pool_config.reward_per_slot, clock.slot)?;

    // Lock in reward earned so far before the balance changes.
    accrual::settle(user_position, pool_state.acc_reward_per_share)?;

    let fee = accrual::fee_amount(amount, pool_config.unstake_fee)?;
    let (owner_cut, treasury_cut) =
        accrual::split_unstake_fee(fee, platform.unstake_fee_treasury_bps)?;
    let net_amount = amount - fee;

    // The vault authority is the pool config PDA.
    let owner_key = pool_config.owner;
    let pool_id = pool_config.pool_id.clone();
    let seeds = &[
        POOL_CONFIG_SEED,
        pool_id.as_bytes(),
        owner_key.as_ref(),
        &[pool_config.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    if owner_cut > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.stake_vault.to_account_info(),
            to: ctx.accounts.owner_fee_account.to_account_info(),
            authority: ctx.accounts.pool_config.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
            owner_cut,
        )?;
    }

    if treasury_cut > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.stake_vault.to_account_info(),
            to: ctx.accounts.treasury_fee_account.to_account_info(),
            authority: ctx.accounts.pool_config.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
            treasury_cut,
        )?;
    }

    let cpi_accounts = Transfer {
        from: ctx.accounts.stake_vault.to_account_info(),
        to: ctx.accounts.staker_stake_account.to_account_info(),
        authority: ctx.accounts.pool_config.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(
        CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
        net_amount,
    )?;

    let user_position = &mut ctx.accounts.user_position;
    let pool_state = &mut ctx.accounts.pool_state;

    user_position.staked_amount = user_position
        .staked_amount
        .checked_sub(amount)
        .ok_or(StakingError::MathOverflow)?;
    pool_state.total_staked = pool_state
        .total_staked
        .checked_sub(amount)
        .ok_or(StakingError::MathOverflow)?;

    // Balance may now be zero; the checkpoint zeroes the debt with it while
    // pending_rewards keeps the earned-but-unpaid history.
    accrual::checkpoint(user_position, pool_state.acc_reward_per_share)?;

    emit!(Withdrawn {
        pool_config: ctx.accounts.pool_config.key(),
        staker: ctx.accounts.staker.key(),
        amount,
    });

    msg!("Unstaked {} (fee {} = owner {} + treasury {})", amount, fee, owner_cut, treasury_cut);
    msg!("Remaining staked: {}", user_position.staked_amount);

    Ok(())
}

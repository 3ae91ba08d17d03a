//! Stake instruction handler.
//!
//! Deposits stake tokens into a pool. The stake fee goes to the pool owner;
//! the net amount enters the stake vault and the user's position. Reward
//! earned so far is settled into the position, never auto-claimed.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::accrual;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::Deposited;
use crate::state::{PoolConfig, PoolState, UserPosition};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The user staking tokens.
    #[account(mut)]
    pub staker: Signer<'info>,

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

    /// User's position in this pool (created on first stake).
    #[account(
        init_if_needed,
        payer = staker,
        space = UserPosition::LEN,
        seeds = [USER_POSITION_SEED, pool_config.key().as_ref(), staker.key().as_ref()],
        bump
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// User's stake-token account being debited.
    #[account(
        mut,
        constraint = staker_stake_account.mint == pool_config.stake_mint @ StakingError::MintMismatch,
        constraint = staker_stake_account.owner == staker.key() @ StakingError::Unauthorized
    )]
    pub staker_stake_account: Box<Account<'info, TokenAccount>>,

    /// Pool's stake vault receiving the net amount.
    #[account(
        mut,
        constraint = stake_vault.key() == pool_config.stake_vault @ StakingError::VaultMismatch
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    /// Pool owner's stake-token account receiving the stake fee.
    #[account(
        mut,
        constraint = owner_fee_account.mint == pool_config.stake_mint @ StakingError::MintMismatch,
        constraint = owner_fee_account.owner == pool_config.owner @ StakingError::Unauthorized
    )]
    pub owner_fee_account: Box<Account<'info, TokenAccount>>,

    /// System program (position creation).
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Stake tokens into the pool.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Gross amount of stake tokens to deposit
pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);

    let pool_config = &ctx.accounts.pool_config;
    let pool_state = &mut ctx.accounts.pool_state;
    let clock = Clock::get()?;

    // Staking is gated to the open reward window.
    require!(
        pool_state.is_started()
            && clock.slot >= pool_state.start_slot
            && clock.slot <= pool_state.end_slot,
        StakingError::PoolNotActive
    );

    accrual::accrue(pool_state, pool_config.reward_per_slot, clock.slot)?;

    let user_position = &mut ctx.accounts.user_position;
    if user_position.owner == Pubkey::default() {
        // Freshly created by init_if_needed.
        user_position.owner = ctx.accounts.staker.key();
        user_position.pool_config = pool_config.key();
        user_position.bump = ctx.bumps.user_position;
    }

    // Lock in reward earned so far; it stays pending until claim/compound.
    accrual::settle(user_position, pool_state.acc_reward_per_share)?;

    let fee = accrual::fee_amount(amount, pool_config.stake_fee)?;
    let net_amount = amount - fee;

    // Stake fee straight to the pool owner.
    if fee > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.staker_stake_account.to_account_info(),
            to: ctx.accounts.owner_fee_account.to_account_info(),
            authority: ctx.accounts.staker.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(CpiContext::new(cpi_program, cpi_accounts), fee)?;
    }

    // Net principal into the pool vault.
    let cpi_accounts = Transfer {
        from: ctx.accounts.staker_stake_account.to_account_info(),
        to: ctx.accounts.stake_vault.to_account_info(),
        authority: ctx.accounts.staker.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), net_amount)?;

    user_position.staked_amount = user_position
        .staked_amount
        .checked_add(net_amount)
        .ok_or(StakingError::MathOverflow)?;
    pool_state.total_staked = pool_state
        .total_staked
        .checked_add(net_amount)
        .ok_or(StakingError::MathOverflow)?;

    accrual::checkpoint(user_position, pool_state.acc_reward_per_share)?;

    emit!(Deposited {
        pool_config: pool_config.key(),
        staker: ctx.accounts.staker.key(),
        amount: net_amount,
    });

    msg!("Staked {} (fee {})", net_amount, fee);
    msg!("User staked balance: {}", user_position.staked_amount);

    Ok(())
}

//! CompoundReward instruction handler.
//!
//! Converts settled reward into additional stake. When the stake and reward
//! mints differ the conversion goes through the external swap venue; the
//! compounded amount is whatever actually arrived in the stake vault. No
//! stake fee is charged - no token leaves the system.
//!
//! Atomicity: every ledger write in this handler lives in the same
//! transaction as the venue CPI, so a venue failure aborts and rolls back
//! the whole operation.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::accrual;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::{Compounded, Deposited};
use crate::state::{Platform, PoolConfig, PoolState, UserPosition};
use crate::swap;

/// Accounts required for compounding.
///
/// The swap venue's own accounts (AMM state, open orders, order-book sides,
/// vaults, ...) are forwarded as remaining accounts in the order the venue
/// expects; the engine never hardcodes a venue layout.
#[derive(Accounts)]
pub struct CompoundReward<'info> {
    /// The user compounding rewards.
    #[account(mut)]
    pub user: Signer<'info>,

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
        seeds = [USER_POSITION_SEED, pool_config.key().as_ref(), user.key().as_ref()],
        bump = user_position.bump,
        constraint = user_position.owner == user.key() @ StakingError::Unauthorized,
        constraint = user_position.pool_config == pool_config.key() @ StakingError::PositionMismatch
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// Pool's stake vault receiving the swapped tokens.
    #[account(
        mut,
        constraint = stake_vault.key() == pool_config.stake_vault @ StakingError::VaultMismatch
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    /// Pool's reward vault providing the swap input.
    #[account(
        mut,
        constraint = reward_vault.key() == pool_config.reward_vault @ StakingError::VaultMismatch
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// The external swap venue program.
    /// CHECK: Treated as a black box; only invoked when the mints differ.
    pub venue_program: UncheckedAccount<'info>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// System program (performance fee transfer).
    pub system_program: Program<'info, System>,
}

/// Compound settled reward into additional stake.
pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, CompoundReward<'info>>) -> Result<()> {
    let platform = &ctx.accounts.platform;

    // Performance fee in lamports, charged on the compound path.
    if platform.performance_fee > 0 {
        require!(
            ctx.accounts.user.lamports() > platform.performance_fee,
            StakingError::InsufficientPerformanceFee
        );
        let cpi_accounts = system_program::Transfer {
            from: ctx.accounts.user.to_account_info(),
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

    let pending = user_position.pending_rewards;
    if pending == 0 {
        msg!("Nothing to compound");
        return Ok(());
    }

    require!(
        pool_state.reward_amount >= pending && ctx.accounts.reward_vault.amount >= pending,
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

    let compounded = if pool_config.stake_mint == pool_config.reward_mint {
        // Same asset: move reward directly into the stake vault.
        let cpi_accounts = Transfer {
            from: ctx.accounts.reward_vault.to_account_info(),
            to: ctx.accounts.stake_vault.to_account_info(),
            authority: ctx.accounts.pool_config.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
            pending,
        )?;
        pending
    } else {
        let stake_balance_before = ctx.accounts.stake_vault.amount;
        let reward_balance_before = ctx.accounts.reward_vault.amount;

        swap::swap_exact_in(
            &ctx.accounts.venue_program.to_account_info(),
            ctx.remaining_accounts,
            &ctx.accounts.reward_vault.to_account_info(),
            &ctx.accounts.stake_vault.to_account_info(),
            &ctx.accounts.pool_config.to_account_info(),
            &ctx.accounts.token_program.to_account_info(),
            signer_seeds,
            pending,
            1,
        )?;

        // The venue gives no exchange-rate guarantee; both vaults are
        // re-read and the deltas verified. The reward vault must be down by
        // exactly `pending` or the ledger no longer tracks the vault; the
        // compounded amount is the measured stake-vault delta.
        ctx.accounts.stake_vault.reload()?;
        ctx.accounts.reward_vault.reload()?;
        swap::verify_swap_deltas(
            reward_balance_before,
            ctx.accounts.reward_vault.amount,
            stake_balance_before,
            ctx.accounts.stake_vault.amount,
            pending,
        )?
    };

    let pool_state = &mut ctx.accounts.pool_state;
    let user_position = &mut ctx.accounts.user_position;

    accrual::compound_into_stake(pool_state, user_position, pending, compounded)?;

    emit!(Compounded {
        pool_config: ctx.accounts.pool_config.key(),
        compounder: ctx.accounts.user.key(),
        reward_amount: pending,
        staked_amount: compounded,
    });
    emit!(Deposited {
        pool_config: ctx.accounts.pool_config.key(),
        staker: ctx.accounts.user.key(),
        amount: compounded,
    });

    msg!("Compounded {} reward into {} stake", pending, compounded);

    Ok(())
}

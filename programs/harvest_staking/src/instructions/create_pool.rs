//! CreatePool instruction handler.
//!
//! Creates an isolated staking pool: immutable config, zeroed accrual state,
//! and two PDA vaults with the config account as authority. The creator
//! funds the reward reserve and pays the platform's deployment fee.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolCreated;
use crate::state::{Platform, PoolConfig, PoolState};

/// Accounts required for pool creation.
///
/// The stake and reward vaults are PDA token accounts owned by the pool
/// config PDA, so tokens can only leave them through instruction handlers.
#[derive(Accounts)]
#[instruction(pool_id: String)]
pub struct CreatePool<'info> {
    /// The pool creator; becomes the pool owner and pays all fees.
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The platform record supplying the deployment fee.
    #[account(
        seeds = [PLATFORM_SEED],
        bump = platform.bump
    )]
    pub platform: Account<'info, Platform>,

    /// The platform treasury receiving the deployment fee.
    /// CHECK: Address is validated against the platform record.
    #[account(
        mut,
        constraint = treasury.key() == platform.treasury @ StakingError::TreasuryMismatch
    )]
    pub treasury: UncheckedAccount<'info>,

    /// The pool configuration, unique per (pool_id, creator).
    #[account(
        init,
        payer = creator,
        space = PoolConfig::LEN,
        seeds = [POOL_CONFIG_SEED, pool_id.as_bytes(), creator.key().as_ref()],
        bump
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    /// The pool's mutable accrual state.
    #[account(
        init,
        payer = creator,
        space = PoolState::LEN,
        seeds = [POOL_STATE_SEED, pool_config.key().as_ref()],
        bump
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// The mint users will stake. May equal the reward mint.
    pub stake_mint: Box<Account<'info, Mint>>,

    /// The mint the pool emits as reward.
    pub reward_mint: Box<Account<'info, Mint>>,

    /// Vault holding staked principal; authority is the pool config PDA.
    #[account(
        init,
        payer = creator,
        seeds = [STAKE_VAULT_SEED, pool_config.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool_config
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    /// Vault holding the reward reserve; authority is the pool config PDA.
    #[account(
        init,
        payer = creator,
        seeds = [REWARD_VAULT_SEED, pool_config.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool_config
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// Creator's reward-token account providing the initial funding.
    #[account(
        mut,
        constraint = creator_reward_account.mint == reward_mint.key() @ StakingError::MintMismatch,
        constraint = creator_reward_account.owner == creator.key() @ StakingError::Unauthorized
    )]
    pub creator_reward_account: Box<Account<'info, TokenAccount>>,

    /// System program for account creation and the deploy fee transfer.
    pub system_program: Program<'info, System>,

    /// Token program for vault creation and the funding transfer.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Create and fund a new staking pool.
///
/// # Arguments
/// * `ctx` - CreatePool accounts context
/// * `pool_id` - Creator-chosen identifier, unique per creator
/// * `stake_fee` - Fee on stakes, basis points
/// * `unstake_fee` - Fee on unstakes, basis points
/// * `initial_funding` - Reward tokens deposited into the reward vault
/// * `reward_per_slot` - Emission rate shared across all stakers
/// * `duration` - Reward window length in slots
pub fn handler(
    ctx: Context<CreatePool>,
    pool_id: String,
    stake_fee: u16,
    unstake_fee: u16,
    initial_funding: u64,
    reward_per_slot: u64,
    duration: u64,
) -> Result<()> {
    require!(pool_id.len() <= MAX_POOL_ID_LEN, StakingError::PoolIdTooLong);
    require!(stake_fee <= MAX_FEE_BPS, StakingError::InvalidStakeFee);
    require!(unstake_fee <= MAX_FEE_BPS, StakingError::InvalidUnstakeFee);
    require!(initial_funding > 0, StakingError::ZeroFunding);
    require!(reward_per_slot > 0, StakingError::ZeroRewardRate);
    require!(duration > 0, StakingError::ZeroDuration);

    let platform = &ctx.accounts.platform;

    // Both debits are checked before either transfer runs.
    require!(
        ctx.accounts.creator_reward_account.amount >= initial_funding,
        StakingError::InsufficientFunding
    );
    require!(
        ctx.accounts.creator.lamports() > platform.deploy_fee,
        StakingError::InsufficientFunding
    );

    // Fund the reward reserve.
    let cpi_accounts = Transfer {
        from: ctx.accounts.creator_reward_account.to_account_info(),
        to: ctx.accounts.reward_vault.to_account_info(),
        authority: ctx.accounts.creator.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), initial_funding)?;

    // Deployment fee to the platform treasury.
    if platform.deploy_fee > 0 {
        let cpi_accounts = system_program::Transfer {
            from: ctx.accounts.creator.to_account_info(),
            to: ctx.accounts.treasury.to_account_info(),
        };
        let cpi_program = ctx.accounts.system_program.to_account_info();
        system_program::transfer(CpiContext::new(cpi_program, cpi_accounts), platform.deploy_fee)?;
    }

    let pool_config = &mut ctx.accounts.pool_config;
    pool_config.owner = ctx.accounts.creator.key();
    pool_config.pool_id = pool_id;
    pool_config.stake_fee = stake_fee;
    pool_config.unstake_fee = unstake_fee;
    pool_config.reward_per_slot = reward_per_slot;
    pool_config.duration = duration;
    pool_config.stake_mint = ctx.accounts.stake_mint.key();
    pool_config.reward_mint = ctx.accounts.reward_mint.key();
    pool_config.stake_mint_decimals = ctx.accounts.stake_mint.decimals;
    pool_config.reward_mint_decimals = ctx.accounts.reward_mint.decimals;
    pool_config.stake_vault = ctx.accounts.stake_vault.key();
    pool_config.reward_vault = ctx.accounts.reward_vault.key();
    pool_config.pool_state = ctx.accounts.pool_state.key();
    pool_config.bump = ctx.bumps.pool_config;

    let pool_state = &mut ctx.accounts.pool_state;
    pool_state.start_slot = 0;
    pool_state.end_slot = 0;
    pool_state.last_accrual_slot = 0;
    pool_state.acc_reward_per_share = 0;
    pool_state.total_staked = 0;
    pool_state.reward_amount = initial_funding;
    pool_state.total_funded = initial_funding;
    pool_state.total_accrued = 0;
    pool_state.paid_rewards = 0;
    pool_state.bump = ctx.bumps.pool_state;

    emit!(PoolCreated {
        pool_config: pool_config.key(),
        owner: pool_config.owner,
        stake_mint: pool_config.stake_mint,
        reward_mint: pool_config.reward_mint,
        initial_funding,
        reward_per_slot,
    });

    msg!("Pool '{}' created by {}", pool_config.pool_id, pool_config.owner);
    msg!("Reward reserve funded with {}", initial_funding);

    Ok(())
}

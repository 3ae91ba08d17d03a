//! Thin adapter over an external swap venue (Raydium-style AMM + order book).
//!
//! The engine treats the venue as a black box with a single capability:
//! swap an exact input amount of one mint for the other. Venue-specific
//! account layouts never enter the core; the caller forwards the venue's
//! accounts in the order the venue expects and this module only prepends the
//! token program and appends source/destination/authority, matching the
//! swap_base_in convention.
//!
//! A failed CPI aborts the whole transaction, so any ledger writes made
//! before the swap are rolled back by the runtime; callers still surface the
//! failure as `SwapFailed` for observability.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

use crate::constants::SWAP_BASE_IN_TAG;
use crate::error::StakingError;

/// Swap `amount_in` from `source` into `destination` via the venue program.
///
/// `venue_accounts` are the venue's own accounts (AMM state, open orders,
/// order-book sides, vaults, ...) exactly as the venue documents them.
/// `authority` must be able to sign for `source` via `signer_seeds`.
pub fn swap_exact_in<'info>(
    venue_program: &AccountInfo<'info>,
    venue_accounts: &[AccountInfo<'info>],
    source: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    token_program: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount_in: u64,
    minimum_amount_out: u64,
) -> Result<()> {
    require!(amount_in > 0, StakingError::ZeroAmount);

    // swap_base_in wire format: tag, amount_in, minimum_amount_out
    let mut data = Vec::with_capacity(17);
    data.push(SWAP_BASE_IN_TAG);
    data.extend_from_slice(&amount_in.to_le_bytes());
    data.extend_from_slice(&minimum_amount_out.to_le_bytes());

    // Writability and signer-ness of the venue's own accounts are forwarded
    // as given; some venues carry their own signer in the layout.
    let mut metas = Vec::with_capacity(venue_accounts.len() + 4);
    metas.push(AccountMeta::new_readonly(token_program.key(), false));
    for account in venue_accounts {
        metas.push(if account.is_writable {
            AccountMeta::new(account.key(), account.is_signer)
        } else {
            AccountMeta::new_readonly(account.key(), account.is_signer)
        });
    }
    metas.push(AccountMeta::new(source.key(), false));
    metas.push(AccountMeta::new(destination.key(), false));
    metas.push(AccountMeta::new_readonly(authority.key(), true));

    let ix = Instruction {
        program_id: venue_program.key(),
        accounts: metas,
        data,
    };

    let mut infos = Vec::with_capacity(venue_accounts.len() + 5);
    infos.push(token_program.clone());
    infos.extend_from_slice(venue_accounts);
    infos.push(source.clone());
    infos.push(destination.clone());
    infos.push(authority.clone());
    infos.push(venue_program.clone());

    invoke_signed(&ix, &infos, signer_seeds).map_err(|e| {
        msg!("Swap venue CPI failed: {:?}", e);
        error!(StakingError::SwapFailed)
    })
}

/// Verify the vault deltas of a completed swap and return the amount
/// received. The source must have been debited by exactly `amount_in` and
/// the destination must have gained something; anything else means the venue
/// moved funds the ledger does not account for.
pub fn verify_swap_deltas(
    source_before: u64,
    source_after: u64,
    destination_before: u64,
    destination_after: u64,
    amount_in: u64,
) -> Result<u64> {
    let debited = source_before
        .checked_sub(source_after)
        .ok_or(StakingError::SwapFailed)?;
    require!(debited == amount_in, StakingError::SwapFailed);

    let received = destination_after
        .checked_sub(destination_before)
        .ok_or(StakingError::SwapFailed)?;
    require!(received > 0, StakingError::SwapFailed);
    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_check_accepts_exact_debit() {
        assert_eq!(verify_swap_deltas(1_000, 600, 50, 250, 400).unwrap(), 200);
    }

    #[test]
    fn delta_check_rejects_wrong_debit() {
        // Venue took more than the swap input.
        assert!(verify_swap_deltas(1_000, 500, 50, 250, 400).is_err());
        // Venue took less than the swap input.
        assert!(verify_swap_deltas(1_000, 700, 50, 250, 400).is_err());
        // Venue credited the source instead.
        assert!(verify_swap_deltas(1_000, 1_100, 50, 250, 400).is_err());
    }

    #[test]
    fn delta_check_rejects_empty_receipt() {
        assert!(verify_swap_deltas(1_000, 600, 50, 50, 400).is_err());
        // Destination drained.
        assert!(verify_swap_deltas(1_000, 600, 300, 200, 400).is_err());
    }
}


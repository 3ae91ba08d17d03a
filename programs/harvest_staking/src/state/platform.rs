use anchor_lang::prelude::*;

/// Global fee-configuration singleton. Exactly one exists per deployment;
/// every pool operation reads it for fee defaults and the treasury address.
#[account]
pub struct Platform {
    /// Admin allowed to update fees and the treasury address.
    pub admin: Pubkey,
    /// Receives deployment fees, performance fees, and the treasury share
    /// of unstake fees.
    pub treasury: Pubkey,
    /// Flat lamport fee charged to a creator at CreatePool.
    pub deploy_fee: u64,
    /// Flat lamport fee charged on the claim/compound paths.
    pub performance_fee: u64,
    /// Share of every unstake fee routed to the treasury, in basis points.
    /// The remainder goes to the pool owner. 0 = entire fee to the owner.
    pub unstake_fee_treasury_bps: u16,
    pub bump: u8,
}

impl Platform {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 2 + 1;
}

use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::BetRecord;

// =============================================================================
// LEDGER ACCOUNT
// =============================================================================
// Singleton holding the bet id counter and deployment configuration.
// Also signs every gateway CPI, acting as the program's own identity for
// decrypt-permission grants.
//

/// Central state account for the wagering ledger.
/// PDA derived with seeds: ["ledger"]
#[account]
#[derive(Debug, Default)]
pub struct Ledger {
    /// The house: deployer, always a viewer of every bet.
    pub house: Pubkey,

    /// Encrypted-value gateway program this ledger is bound to.
    pub gateway_program: Pubkey,

    /// Number of bets ever settled. Bet ids are exactly [1, bet_count].
    pub bet_count: u64,

    /// Distinct players with at least one bet, kept current at settlement.
    pub unique_players: u64,

    /// Running BLAKE3 hash-chain over every settled bet, in id order.
    /// Lets an off-chain replayer check it holds the identical log.
    pub settlement_digest: [u8; 32],

    /// PDA bump seed, used when the ledger signs gateway CPIs.
    pub bump: u8,
}

impl Ledger {
    /// Size of the Ledger account in bytes.
    pub const SIZE: usize = 8 + // discriminator
        32 +  // house
        32 +  // gateway_program
        8 +   // bet_count
        8 +   // unique_players
        32 +  // settlement_digest
        1; // bump

    /// Id the next settled bet will receive.
    pub fn next_bet_id(&self) -> Result<u64> {
        self.bet_count
            .checked_add(1)
            .ok_or_else(|| error!(ErrorCode::BetCounterOverflow))
    }

    /// Commit a newly settled bet: advance `bet_count` to its id and fold
    /// it into the settlement digest. `bet.id` must be `next_bet_id()`.
    pub fn record_settlement(&mut self, bet: &BetRecord) {
        self.bet_count = bet.id;
        self.settlement_digest = chain_digest(&self.settlement_digest, bet);
    }
}

/// H(prev || id || player || created_at || wager || guess || outcome || payout)
pub fn chain_digest(prev: &[u8; 32], bet: &BetRecord) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(prev);
    hasher.update(&bet.id.to_le_bytes());
    hasher.update(bet.player.as_ref());
    hasher.update(&bet.created_at.to_le_bytes());
    for handle in bet.encrypted_fields().handles() {
        hasher.update(&handle.to_bytes());
    }
    *hasher.finalize().as_bytes()
}

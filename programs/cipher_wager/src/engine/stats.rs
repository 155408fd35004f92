use anchor_lang::prelude::*;

use crate::state::Ledger;

/// Plaintext-only aggregates over the bet store.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerStats {
    pub total_bets: u64,
    pub settled_bets: u64,
    pub unique_players: u64,
    /// Always `None`: wagers are encrypted and cannot be summed without
    /// decryption.
    pub total_volume: Option<u64>,
}

impl LedgerStats {
    /// Read the aggregates the ledger keeps current at settlement.
    ///
    /// Bets are settled in the same step that allocates their id, so every
    /// allocated id counts as settled.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            total_bets: ledger.bet_count,
            settled_bets: ledger.bet_count,
            unique_players: ledger.unique_players,
            total_volume: None,
        }
    }
}

use anchor_lang::prelude::*;

use crate::constants::{MAX_BATCH_SIZE, MIN_BATCH_SIZE};
use crate::engine::{derive_settlement, grant_settlement, record_bet, WagerInput};
use crate::errors::ErrorCode;
use crate::gateway::{EncryptedGateway, ExternalInput};
use crate::state::{BetRecord, Ledger};

// =============================================================================
// BATCH COORDINATOR
// =============================================================================
// Settles up to MAX_BATCH_SIZE bets from one submitter in a single call.
// Shape is validated first, then every entry's ciphertexts are derived
// and granted, and only then are ids allocated. A failure anywhere leaves
// the ledger exactly as it was.
//

/// Parallel input arrays, one position per bet.
pub struct BatchRequest<'a> {
    pub wagers: &'a [[u8; 32]],
    pub wager_proofs: &'a [Vec<u8>],
    pub guesses: &'a [[u8; 32]],
    pub guess_proofs: &'a [Vec<u8>],
}

impl<'a> BatchRequest<'a> {
    /// Check array lengths agree and fall within [MIN_BATCH_SIZE, MAX_BATCH_SIZE].
    pub fn validate(&self) -> Result<usize> {
        let len = self.wagers.len();
        require!(
            self.wager_proofs.len() == len
                && self.guesses.len() == len
                && self.guess_proofs.len() == len,
            ErrorCode::BatchLengthMismatch
        );
        require!(len >= MIN_BATCH_SIZE, ErrorCode::EmptyBatch);
        require!(len <= MAX_BATCH_SIZE, ErrorCode::BatchTooLarge);
        Ok(len)
    }

    /// Entries in submission order. Call `validate` first.
    pub fn entries(&self) -> impl Iterator<Item = WagerInput> + '_ {
        (0..self.wagers.len()).map(move |i| WagerInput {
            wager: ExternalInput::new(self.wagers[i], self.wager_proofs[i].clone()),
            guess: ExternalInput::new(self.guesses[i], self.guess_proofs[i].clone()),
        })
    }
}

/// Settle every entry of `request`, returning records in input order.
pub fn settle_batch<G: EncryptedGateway>(
    ledger: &mut Ledger,
    gateway: &mut G,
    request: &BatchRequest,
    player: Pubkey,
    created_at: i64,
) -> Result<Vec<BetRecord>> {
    let len = request.validate()?;
    ledger
        .bet_count
        .checked_add(len as u64)
        .ok_or(ErrorCode::BetCounterOverflow)?;

    let mut derived = Vec::with_capacity(len);
    for input in request.entries() {
        derived.push(derive_settlement(gateway, &input)?);
    }
    for fields in &derived {
        grant_settlement(gateway, fields, &ledger.house, &player)?;
    }

    let mut records = Vec::with_capacity(len);
    for fields in derived {
        records.push(record_bet(ledger, fields, player, created_at)?);
    }

    msg!(
        "Batch of {} settled for {}: bets {}..={}",
        len,
        player,
        records[0].id,
        records[len - 1].id
    );
    Ok(records)
}

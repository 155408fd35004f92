use anchor_lang::prelude::*;

use crate::constants::OUTCOME_BOUND;
use crate::gateway::{EncryptedGateway, ExternalInput};
use crate::state::{BetRecord, EncryptedFields, Ledger};

// =============================================================================
// SETTLEMENT ENGINE
// =============================================================================
// A bet is created and settled in one step:
// 1. Import wager and guess through the gateway (proofs checked there)
// 2. Draw an encrypted outcome in {0, 1}
// 3. won    = (guess == outcome)            -> Ebool
// 4. double = wager + wager
// 5. payout = double * cast(won)            -> 2*wager or 0
// 6. Grant decrypt on all four fields to self, house and player
// 7. Allocate the next bet id
// 8. Seed the viewer set with player and house
//
// No step branches on a decrypted value. Every gateway call happens before
// the ledger is mutated.
//

/// One wager/guess pair as submitted by the client.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct WagerInput {
    pub wager: ExternalInput,
    pub guess: ExternalInput,
}

/// Steps 1-5: derive all four encrypted fields. Allocates nothing.
pub fn derive_settlement<G: EncryptedGateway>(
    gateway: &mut G,
    input: &WagerInput,
) -> Result<EncryptedFields> {
    let wager = gateway.decode_u64(&input.wager)?;
    let guess = gateway.decode_u8(&input.guess)?;

    let outcome = gateway.draw_uniform_u8(OUTCOME_BOUND)?;
    let won = gateway.eq_u8(guess, outcome)?;

    let doubled = gateway.add_u64(wager, wager)?;
    let win_multiplier = gateway.cast_to_u64(won)?;
    let payout = gateway.mul_u64(doubled, win_multiplier)?;

    Ok(EncryptedFields {
        wager,
        guess,
        outcome,
        payout,
    })
}

/// Grant `identity` decrypt permission on every field of a bet.
pub fn grant_fields<G: EncryptedGateway>(
    gateway: &mut G,
    fields: &EncryptedFields,
    identity: &Pubkey,
) -> Result<()> {
    for handle in fields.handles() {
        gateway.grant(handle, identity)?;
    }
    Ok(())
}

/// Step 6: issue every decrypt grant a freshly settled bet needs.
///
/// Touches only the gateway, so a failure here leaves the ledger as it was.
pub fn grant_settlement<G: EncryptedGateway>(
    gateway: &mut G,
    fields: &EncryptedFields,
    house: &Pubkey,
    player: &Pubkey,
) -> Result<()> {
    for handle in fields.handles() {
        gateway.grant_self(handle)?;
    }
    grant_fields(gateway, fields, house)?;
    if player != house {
        grant_fields(gateway, fields, player)?;
    }
    Ok(())
}

/// Steps 7 and 8: allocate the id and build the settled record.
///
/// The record is built before the ledger is touched; once `bet_count`
/// moves nothing else can fail. The returned record still needs to be
/// written to its account.
pub fn record_bet(
    ledger: &mut Ledger,
    fields: EncryptedFields,
    player: Pubkey,
    created_at: i64,
) -> Result<BetRecord> {
    let bet_id = ledger.next_bet_id()?;
    let record = BetRecord::settled(bet_id, player, ledger.house, fields, created_at)?;
    ledger.record_settlement(&record);

    msg!("Bet {} settled for {}", bet_id, player);
    Ok(record)
}

/// Settle a single bet end to end.
pub fn settle_bet<G: EncryptedGateway>(
    ledger: &mut Ledger,
    gateway: &mut G,
    input: &WagerInput,
    player: Pubkey,
    created_at: i64,
) -> Result<BetRecord> {
    let fields = derive_settlement(gateway, input)?;
    grant_settlement(gateway, &fields, &ledger.house, &player)?;
    record_bet(ledger, fields, player, created_at)
}

use anchor_lang::prelude::*;

use crate::engine::{self, WagerInput};
use crate::gateway::{CpiGateway, ExternalInput};
use crate::{BetCreated, BetSettled, PlaceBet};

/// Create and settle a single bet.
///
/// # Arguments
/// * `ctx` - The validated accounts context
/// * `wager` / `wager_proof` - Encrypted stake and its proof
/// * `guess` / `guess_proof` - Encrypted guess and its proof
///
/// # Returns
/// The id of the new bet
pub fn handler(
    ctx: Context<PlaceBet>,
    wager: [u8; 32],
    wager_proof: Vec<u8>,
    guess: [u8; 32],
    guess_proof: Vec<u8>,
) -> Result<u64> {
    let player = ctx.accounts.player.key();
    let created_at = Clock::get()?.unix_timestamp;

    let mut gateway = CpiGateway::new(
        ctx.accounts.gateway_program.to_account_info(),
        ctx.accounts.gateway_state.to_account_info(),
        ctx.accounts.ledger.to_account_info(),
        ctx.accounts.ledger.bump,
    );

    let input = WagerInput {
        wager: ExternalInput::new(wager, wager_proof),
        guess: ExternalInput::new(guess, guess_proof),
    };

    let ledger = &mut ctx.accounts.ledger;
    let mut record = engine::settle_bet(ledger, &mut gateway, &input, player, created_at)?;
    let settlement_digest = ledger.settlement_digest;

    ctx.accounts.player_profile.record_bets(
        ledger,
        player,
        ctx.bumps.player_profile,
        1,
        created_at,
    )?;

    // The bet PDA was derived from bet_count + 1 before settlement
    record.bump = ctx.bumps.bet;
    let bet_id = record.id;
    ctx.accounts.bet.set_inner(record);

    emit!(BetCreated { bet_id, player });
    emit!(BetSettled {
        bet_id,
        player,
        settlement_digest,
    });

    Ok(bet_id)
}

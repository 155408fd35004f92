use anchor_lang::prelude::*;

use crate::{Initialize, LedgerInitialized};

// =============================================================================
// INITIALIZE INSTRUCTION HANDLER
// =============================================================================
// Sets up the Ledger singleton. The account validation is defined in lib.rs.
//

/// Initialize the wagering ledger.
///
/// The signer becomes the house. The gateway program is fixed for the life
/// of the ledger.
pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;

    // Used later when the Ledger PDA signs gateway CPIs
    ledger.bump = ctx.bumps.ledger;

    ledger.house = ctx.accounts.house.key();
    ledger.gateway_program = ctx.accounts.gateway_program.key();

    ledger.bet_count = 0;
    ledger.settlement_digest = [0u8; 32];

    msg!("Cipher Wager ledger initialized!");
    msg!("House: {}", ledger.house);
    msg!("Gateway program: {}", ledger.gateway_program);

    emit!(LedgerInitialized {
        house: ledger.house,
        gateway_program: ledger.gateway_program,
    });

    Ok(())
}

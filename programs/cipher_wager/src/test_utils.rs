//! Shared fixtures for unit tests.

use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use crate::engine::WagerInput;
use crate::gateway::mock::MockGateway;
use crate::state::Ledger;

/// Anchor error number, for comparing against `u32::from(ErrorCode::X)`.
pub fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => panic!("expected an anchor error, got {:?}", e),
    }
}

/// A ledger with no bets, plus its house identity.
pub fn fresh_ledger() -> (Ledger, Pubkey) {
    let house = Pubkey::new_unique();
    let ledger = Ledger {
        house,
        gateway_program: Pubkey::new_unique(),
        ..Ledger::default()
    };
    (ledger, house)
}

/// Gateway whose "self" identity is a fixed ledger PDA stand-in.
pub fn mock_gateway(draws: &[u8]) -> MockGateway {
    MockGateway::new(ledger_identity()).with_draws(draws)
}

pub fn ledger_identity() -> Pubkey {
    Pubkey::find_program_address(&[crate::constants::LEDGER_SEED], &crate::ID).0
}

pub fn wager_input(wager: u64, guess: u8) -> WagerInput {
    WagerInput {
        wager: MockGateway::encrypt(wager),
        guess: MockGateway::encrypt(guess as u64),
    }
}

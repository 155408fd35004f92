// =============================================================================
// INSTRUCTIONS MODULE
// =============================================================================
// Instruction handlers for the Cipher Wager program.
//
// Account structs live in lib.rs for Anchor's IDL generation. Only handlers
// are defined here; the bet logic itself is in `engine`.
//

pub mod grant_auditor;
pub mod initialize;
pub mod place_bet;
pub mod place_bet_batch;
pub mod views;

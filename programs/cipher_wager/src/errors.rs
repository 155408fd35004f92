use anchor_lang::prelude::*;

// =============================================================================
// ERROR CODES
// =============================================================================
// Every failure aborts the whole call. The runtime discards all account
// writes and gateway CPIs made before the error.
//

#[error_code]
pub enum ErrorCode {
    // =========================================================================
    // INPUT SHAPE ERRORS
    // =========================================================================
    /// Batch must contain at least one bet
    #[msg("Batch is empty")]
    EmptyBatch,

    /// Batch exceeds MAX_BATCH_SIZE
    #[msg("Batch too large (max 5 bets)")]
    BatchTooLarge,

    /// wagers, wager_proofs, guesses and guess_proofs differ in length
    #[msg("Batch input arrays have mismatched lengths")]
    BatchLengthMismatch,

    /// Number of bet accounts passed does not match the batch size
    #[msg("Bet account count does not match batch size")]
    BetAccountCountMismatch,

    // =========================================================================
    // PROOF & GATEWAY ERRORS
    // =========================================================================
    /// Gateway rejected the proof attached to an encrypted input
    #[msg("Invalid proof for encrypted input")]
    InvalidProof,

    /// Gateway program does not match the one bound at initialization
    #[msg("Invalid gateway program")]
    InvalidGatewayProgram,

    /// Gateway CPI returned no handle
    #[msg("Gateway returned no data")]
    GatewayReturnMissing,

    /// Gateway CPI returned data that is not a 32-byte handle
    #[msg("Gateway returned a malformed handle")]
    GatewayReturnMalformed,

    // =========================================================================
    // NONEXISTENCE ERRORS
    // =========================================================================
    /// No settled bet exists for this id
    #[msg("Bet does not exist")]
    BetNotFound,

    /// Account passed is not the PDA for the requested bet id
    #[msg("Account is not the bet record for this id")]
    InvalidBetAccount,

    // =========================================================================
    // AUTHORIZATION ERRORS
    // =========================================================================
    /// Identity is not an authorized viewer of this bet
    #[msg("Not authorized to view this bet")]
    NotAuthorized,

    /// Viewer set for this bet is at capacity
    #[msg("Viewer limit reached for this bet")]
    ViewerLimitReached,

    // =========================================================================
    // ARITHMETIC ERRORS
    // =========================================================================
    /// Bet counter overflowed u64
    #[msg("Bet counter overflow")]
    BetCounterOverflow,
}

use anchor_lang::prelude::*;

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Constants module: batch/viewer limits, PDA seeds, gateway discriminators
pub mod constants;

/// Bet lifecycle logic: settlement, batching, viewer authorization, stats
pub mod engine;

/// Error codes returned by our program
pub mod errors;

/// Encrypted handle types and the gateway capability interface
pub mod gateway;

/// Instruction handlers: initialize, place_bet, grant_auditor, views
pub mod instructions;

/// Account state structures: Ledger, BetRecord, PlayerProfile, ViewerSet
pub mod state;

#[cfg(test)]
mod test_utils;

// Re-export errors for easier access
pub use errors::ErrorCode;

use constants::*;
use engine::LedgerStats;
use state::*;

// =============================================================================
// PROGRAM ID
// =============================================================================

declare_id!("F5roRRQFxFnzri2ek1W2CTkovj1z8ugy9fwYzyhmViP5");

// Cipher Wager - a confidential even/odd wagering ledger
//
// - Stakes and guesses arrive encrypted, with validity proofs
// - Outcome is an encrypted uniform draw; payout is derived homomorphically
// - Nothing is ever decrypted on-chain
// - Each bet carries an append-only list of identities allowed to decrypt it
//

#[program]
pub mod cipher_wager {
    use super::*;
    use crate::instructions;

    // =========================================================================
    // LEDGER INITIALIZATION
    // =========================================================================

    /// Create the Ledger. The signer becomes the house and is a viewer of
    /// every bet. Binds the ledger to one encrypted-value gateway program.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    // =========================================================================
    // SETTLEMENT
    // =========================================================================

    /// Create and settle one bet.
    ///
    /// # Arguments
    /// * `wager` - Client-encrypted stake (u64)
    /// * `wager_proof` - Gateway proof for `wager`
    /// * `guess` - Client-encrypted guess (u8, 0 = even, 1 = odd)
    /// * `guess_proof` - Gateway proof for `guess`
    ///
    /// # Returns
    /// The new bet id
    pub fn place_bet(
        ctx: Context<PlaceBet>,
        wager: [u8; 32],
        wager_proof: Vec<u8>,
        guess: [u8; 32],
        guess_proof: Vec<u8>,
    ) -> Result<u64> {
        instructions::place_bet::handler(ctx, wager, wager_proof, guess, guess_proof)
    }

    /// Create and settle 1 to 5 bets in one call.
    /// New bet PDAs are passed as remaining accounts, in input order.
    ///
    /// # Returns
    /// The new bet ids, in input order
    pub fn place_bet_batch<'info>(
        ctx: Context<'_, '_, '_, 'info, PlaceBetBatch<'info>>,
        wagers: Vec<[u8; 32]>,
        wager_proofs: Vec<Vec<u8>>,
        guesses: Vec<[u8; 32]>,
        guess_proofs: Vec<Vec<u8>>,
    ) -> Result<Vec<u64>> {
        instructions::place_bet_batch::handler(ctx, wagers, wager_proofs, guesses, guess_proofs)
    }

    // =========================================================================
    // VIEWER AUTHORIZATION
    // =========================================================================

    /// Let an existing viewer of `bet_id` add `auditor` as a viewer.
    pub fn grant_auditor(ctx: Context<GrantAuditor>, bet_id: u64, auditor: Pubkey) -> Result<()> {
        instructions::grant_auditor::handler(ctx, bet_id, auditor)
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Plaintext metadata of a bet. No authorization required.
    pub fn get_bet_summary(ctx: Context<ReadBet>, bet_id: u64) -> Result<BetSummary> {
        instructions::views::bet_summary(ctx, bet_id)
    }

    /// Player who placed a bet.
    pub fn get_bet_owner(ctx: Context<ReadBet>, bet_id: u64) -> Result<Pubkey> {
        instructions::views::bet_owner(ctx, bet_id)
    }

    pub fn is_viewer(ctx: Context<ReadBet>, bet_id: u64, identity: Pubkey) -> Result<bool> {
        instructions::views::is_viewer(ctx, bet_id, identity)
    }

    /// Encrypted handles of a bet. The requester must sign and be a viewer.
    pub fn get_encrypted_fields(
        ctx: Context<ReadEncryptedFields>,
        bet_id: u64,
    ) -> Result<EncryptedFields> {
        instructions::views::encrypted_fields(ctx, bet_id)
    }

    /// Aggregate statistics, read from counters kept at settlement.
    pub fn get_stats(ctx: Context<ReadStats>) -> Result<LedgerStats> {
        instructions::views::stats(ctx)
    }

    pub fn get_bet_count(ctx: Context<ReadStats>) -> Result<u64> {
        instructions::views::bet_count(ctx)
    }
}

// =============================================================================
// INITIALIZE ACCOUNTS
// =============================================================================

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The deployer. Pays rent and becomes the house.
    #[account(mut)]
    pub house: Signer<'info>,

    /// The Ledger singleton.
    /// PDA derived from seeds: ["ledger"]
    #[account(
        init,
        payer = house,
        space = Ledger::SIZE,
        seeds = [LEDGER_SEED],
        bump,
    )]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: Any executable program; stored as Ledger.gateway_program
    #[account(executable)]
    pub gateway_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

// =============================================================================
// PLACE BET ACCOUNTS
// =============================================================================

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    /// The bettor. Pays rent for the bet record.
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    /// Per-player profile, created on the player's first bet.
    #[account(
        init_if_needed,
        payer = player,
        space = PlayerProfile::SIZE,
        seeds = [PLAYER_SEED, player.key().as_ref()],
        bump,
    )]
    pub player_profile: Box<Account<'info, PlayerProfile>>,

    /// The new bet record.
    /// Seeds: ["bet", (bet_count + 1).to_le_bytes()]
    /// At u64::MAX the seed saturates and settlement reports the overflow.
    #[account(
        init,
        payer = player,
        space = BetRecord::SIZE,
        seeds = [BET_SEED, &ledger.bet_count.saturating_add(1).to_le_bytes()],
        bump,
    )]
    pub bet: Box<Account<'info, BetRecord>>,

    /// CHECK: Must match the gateway bound at initialization
    #[account(address = ledger.gateway_program @ ErrorCode::InvalidGatewayProgram)]
    pub gateway_program: UncheckedAccount<'info>,

    /// CHECK: Gateway ciphertext storage, validated by the gateway program
    #[account(mut)]
    pub gateway_state: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct PlaceBetBatch<'info> {
    /// The bettor. Pays rent for every bet record in the batch.
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    /// Per-player profile, created on the player's first bet.
    #[account(
        init_if_needed,
        payer = player,
        space = PlayerProfile::SIZE,
        seeds = [PLAYER_SEED, player.key().as_ref()],
        bump,
    )]
    pub player_profile: Box<Account<'info, PlayerProfile>>,

    /// CHECK: Must match the gateway bound at initialization
    #[account(address = ledger.gateway_program @ ErrorCode::InvalidGatewayProgram)]
    pub gateway_program: UncheckedAccount<'info>,

    /// CHECK: Gateway ciphertext storage, validated by the gateway program
    #[account(mut)]
    pub gateway_state: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

// =============================================================================
// GRANT AUDITOR ACCOUNTS
// =============================================================================

#[derive(Accounts)]
pub struct GrantAuditor<'info> {
    /// Existing viewer delegating access.
    pub requester: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    /// CHECK: Loaded and validated by BetRecord::fetch
    #[account(mut)]
    pub bet: UncheckedAccount<'info>,

    /// CHECK: Must match the gateway bound at initialization
    #[account(address = ledger.gateway_program @ ErrorCode::InvalidGatewayProgram)]
    pub gateway_program: UncheckedAccount<'info>,

    /// CHECK: Gateway ciphertext storage, validated by the gateway program
    #[account(mut)]
    pub gateway_state: UncheckedAccount<'info>,
}

// =============================================================================
// VIEW ACCOUNTS
// =============================================================================

#[derive(Accounts)]
pub struct ReadBet<'info> {
    #[account(seeds = [LEDGER_SEED], bump = ledger.bump)]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: Loaded and validated by BetRecord::fetch
    pub bet: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadEncryptedFields<'info> {
    /// Must be a viewer of the bet.
    pub requester: Signer<'info>,

    #[account(seeds = [LEDGER_SEED], bump = ledger.bump)]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: Loaded and validated by BetRecord::fetch
    pub bet: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadStats<'info> {
    #[account(seeds = [LEDGER_SEED], bump = ledger.bump)]
    pub ledger: Account<'info, Ledger>,
}

// =============================================================================
// EVENTS
// =============================================================================

#[event]
pub struct LedgerInitialized {
    pub house: Pubkey,
    pub gateway_program: Pubkey,
}

/// First of the two per-bet notifications.
#[event]
pub struct BetCreated {
    pub bet_id: u64,
    pub player: Pubkey,
}

/// Second per-bet notification, emitted right after BetCreated since
/// settlement is immediate. Carries the ledger digest after this bet.
#[event]
pub struct BetSettled {
    pub bet_id: u64,
    pub player: Pubkey,
    pub settlement_digest: [u8; 32],
}

/// Emitted once per batch, after every per-bet pair.
#[event]
pub struct BatchSettled {
    pub player: Pubkey,
    pub first_bet_id: u64,
    pub count: u8,
}

#[event]
pub struct AuditorGranted {
    pub bet_id: u64,
    pub auditor: Pubkey,
    pub granted_by: Pubkey,
}

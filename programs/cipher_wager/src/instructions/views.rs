use anchor_lang::prelude::*;

use crate::engine::{self, LedgerStats};
use crate::state::{BetRecord, BetSummary, EncryptedFields};
use crate::{ReadBet, ReadEncryptedFields, ReadStats};

// =============================================================================
// VIEW HANDLERS
// =============================================================================
// Read-only queries. Results are returned through Solana return data, so
// clients can simulate these instead of decoding accounts themselves.
//

fn load_bet(ledger_bet_count: u64, bet: &AccountInfo, bet_id: u64) -> Result<BetRecord> {
    BetRecord::fetch(bet, bet_id, ledger_bet_count, &crate::ID)
}

/// Plaintext metadata. Anyone may call this.
pub fn bet_summary(ctx: Context<ReadBet>, bet_id: u64) -> Result<BetSummary> {
    let bet = load_bet(ctx.accounts.ledger.bet_count, &ctx.accounts.bet, bet_id)?;
    msg!("Bet {}: player={}, created_at={}", bet_id, bet.player, bet.created_at);
    Ok(bet.summary())
}

pub fn bet_owner(ctx: Context<ReadBet>, bet_id: u64) -> Result<Pubkey> {
    let bet = load_bet(ctx.accounts.ledger.bet_count, &ctx.accounts.bet, bet_id)?;
    Ok(bet.player)
}

/// Membership test. Fails with `BetNotFound` for an unknown id rather than
/// answering false.
pub fn is_viewer(ctx: Context<ReadBet>, bet_id: u64, identity: Pubkey) -> Result<bool> {
    let bet = load_bet(ctx.accounts.ledger.bet_count, &ctx.accounts.bet, bet_id)?;
    let viewer = bet.is_viewer(&identity);
    msg!("Bet {}: {} viewer={}", bet_id, identity, viewer);
    Ok(viewer)
}

/// Encrypted handles, for the signer to decrypt off-chain.
pub fn encrypted_fields(ctx: Context<ReadEncryptedFields>, bet_id: u64) -> Result<EncryptedFields> {
    let bet = load_bet(ctx.accounts.ledger.bet_count, &ctx.accounts.bet, bet_id)?;
    let fields = engine::read_encrypted_fields(&bet, &ctx.accounts.requester.key())?;
    msg!("Bet {}: encrypted fields read by {}", bet_id, ctx.accounts.requester.key());
    Ok(fields)
}

/// Aggregate statistics, read from the ledger's running counters.
pub fn stats(ctx: Context<ReadStats>) -> Result<LedgerStats> {
    let stats = LedgerStats::from_ledger(&ctx.accounts.ledger);
    msg!(
        "Stats: total={}, settled={}, players={}",
        stats.total_bets,
        stats.settled_bets,
        stats.unique_players
    );
    Ok(stats)
}

pub fn bet_count(ctx: Context<ReadStats>) -> Result<u64> {
    msg!("Bet count: {}", ctx.accounts.ledger.bet_count);
    Ok(ctx.accounts.ledger.bet_count)
}

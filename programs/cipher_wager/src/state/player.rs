use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::Ledger;

/// Per-player bookkeeping, created on a player's first bet.
/// PDA derived with seeds: ["player", player]
#[account]
#[derive(Debug, Default)]
pub struct PlayerProfile {
    /// Owner of this profile. Default until the first bet lands.
    pub player: Pubkey,

    /// Bets this player has placed.
    pub bet_count: u64,

    /// Unix timestamp of the player's first bet.
    pub first_bet_at: i64,

    /// PDA bump seed.
    pub bump: u8,
}

impl PlayerProfile {
    /// Size of the PlayerProfile account in bytes.
    pub const SIZE: usize = 8 + // discriminator
        32 +  // player
        8 +   // bet_count
        8 +   // first_bet_at
        1; // bump

    pub fn is_new(&self) -> bool {
        self.player == Pubkey::default()
    }

    /// Count `bets` freshly settled bets for `player`.
    ///
    /// The first call on a new profile claims it for `player` and bumps
    /// `ledger.unique_players`.
    pub fn record_bets(
        &mut self,
        ledger: &mut Ledger,
        player: Pubkey,
        bump: u8,
        bets: u64,
        created_at: i64,
    ) -> Result<()> {
        let bet_count = self
            .bet_count
            .checked_add(bets)
            .ok_or(ErrorCode::BetCounterOverflow)?;

        if self.is_new() {
            ledger.unique_players = ledger
                .unique_players
                .checked_add(1)
                .ok_or(ErrorCode::BetCounterOverflow)?;
            self.player = player;
            self.first_bet_at = created_at;
            self.bump = bump;
            msg!("New player {} ({} total)", player, ledger.unique_players);
        }

        self.bet_count = bet_count;
        Ok(())
    }
}

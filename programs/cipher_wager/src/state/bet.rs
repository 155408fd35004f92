use anchor_lang::prelude::*;

use crate::constants::BET_SEED;
use crate::errors::ErrorCode;
use crate::gateway::{Euint64, Euint8, Handle};
use crate::state::ViewerSet;

// =============================================================================
// BET RECORD
// =============================================================================
// One account per bet, created already settled. Encrypted fields are
// write-once; only the viewer set grows afterwards.
//

/// Lifecycle state. `None` is what an unallocated id looks like.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum BetState {
    #[default]
    None,
    Settled,
}

/// The four encrypted fields of a bet, as opaque gateway handles.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct EncryptedFields {
    pub wager: Euint64,
    pub guess: Euint8,
    pub outcome: Euint8,
    pub payout: Euint64,
}

impl EncryptedFields {
    /// Handles in storage order: wager, guess, outcome, payout
    pub fn handles(&self) -> [Handle; 4] {
        [
            self.wager.handle(),
            self.guess.handle(),
            self.outcome.handle(),
            self.payout.handle(),
        ]
    }
}

/// Plaintext metadata, readable without authorization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetSummary {
    pub player: Pubkey,
    pub created_at: i64,
    pub state: BetState,
}

/// PDA derived with seeds: ["bet", bet_id.to_le_bytes()]
#[account]
#[derive(Debug, Default)]
pub struct BetRecord {
    /// Sequential id, starting at 1.
    pub id: u64,

    /// Submitter of the bet.
    pub player: Pubkey,

    // =========================================================================
    // ENCRYPTED FIELDS (never decrypted on-chain)
    // =========================================================================
    /// Encrypted stake.
    pub wager: Euint64,

    /// Encrypted even/odd guess, 0 or 1.
    pub guess: Euint8,

    /// Encrypted uniform draw, 0 or 1.
    pub outcome: Euint8,

    /// Encrypted payout: 2 * wager if guess == outcome, else 0.
    pub payout: Euint64,

    /// Unix timestamp at settlement.
    pub created_at: i64,

    pub state: BetState,

    /// Identities allowed to read the encrypted fields.
    pub viewers: ViewerSet,

    /// PDA bump seed.
    pub bump: u8,
}

impl BetRecord {
    /// Size of the BetRecord account in bytes.
    pub const SIZE: usize = 8 + // discriminator
        8 +   // id
        32 +  // player
        4 * Handle::SIZE + // wager, guess, outcome, payout
        8 +   // created_at
        1 +   // state
        ViewerSet::SIZE + // viewers
        1; // bump

    /// Build a freshly settled record, with player and house as viewers.
    pub fn settled(
        id: u64,
        player: Pubkey,
        house: Pubkey,
        fields: EncryptedFields,
        created_at: i64,
    ) -> Result<Self> {
        let mut viewers = ViewerSet::default();
        viewers.insert(player)?;
        viewers.insert(house)?;

        Ok(Self {
            id,
            player,
            wager: fields.wager,
            guess: fields.guess,
            outcome: fields.outcome,
            payout: fields.payout,
            created_at,
            state: BetState::Settled,
            viewers,
            bump: 0,
        })
    }

    pub fn encrypted_fields(&self) -> EncryptedFields {
        EncryptedFields {
            wager: self.wager,
            guess: self.guess,
            outcome: self.outcome,
            payout: self.payout,
        }
    }

    pub fn summary(&self) -> BetSummary {
        BetSummary {
            player: self.player,
            created_at: self.created_at,
            state: self.state,
        }
    }

    pub fn is_viewer(&self, identity: &Pubkey) -> bool {
        self.viewers.contains(identity)
    }

    pub fn address(bet_id: u64, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[BET_SEED, &bet_id.to_le_bytes()], program_id)
    }

    /// Load a settled bet from its account.
    ///
    /// Fails with `BetNotFound` when the id was never allocated or the
    /// account holds no settled record, and with `InvalidBetAccount` when
    /// the account is not the PDA for `bet_id`.
    pub fn fetch(
        account: &AccountInfo,
        bet_id: u64,
        bet_count: u64,
        program_id: &Pubkey,
    ) -> Result<Self> {
        ensure_allocated(bet_id, bet_count)?;

        let (expected, _) = Self::address(bet_id, program_id);
        require_keys_eq!(account.key(), expected, ErrorCode::InvalidBetAccount);

        if account.owner != program_id || account.data_is_empty() {
            msg!("Bet {} has no record account", bet_id);
            return err!(ErrorCode::BetNotFound);
        }

        let data = account.try_borrow_data()?;
        Self::from_account_data(bet_id, &data)
    }

    /// Decode account bytes, treating anything but a settled record for
    /// `bet_id` as nonexistent.
    pub fn from_account_data(bet_id: u64, data: &[u8]) -> Result<Self> {
        let record = Self::try_deserialize(&mut &data[..])
            .map_err(|_| error!(ErrorCode::BetNotFound))?;
        require!(
            record.state == BetState::Settled && record.id == bet_id,
            ErrorCode::BetNotFound
        );
        Ok(record)
    }

    /// Write this record back into an already allocated account.
    pub fn store(&self, account: &AccountInfo) -> Result<()> {
        let mut data = account.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }
}

/// Bet ids live in [1, bet_count].
pub fn ensure_allocated(bet_id: u64, bet_count: u64) -> Result<()> {
    if bet_id == 0 || bet_id > bet_count {
        msg!("Bet {} does not exist (bet_count={})", bet_id, bet_count);
        return err!(ErrorCode::BetNotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::error_code;

    fn settled_bet(id: u64) -> BetRecord {
        BetRecord::settled(
            id,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            EncryptedFields::default(),
            1_700_000_000,
        )
        .unwrap()
    }

    fn account_bytes(record: &BetRecord) -> Vec<u8> {
        let mut data = vec![0u8; BetRecord::SIZE];
        let mut writer: &mut [u8] = &mut data[..];
        record.try_serialize(&mut writer).unwrap();
        data
    }

    #[test]
    fn test_default_state_is_none() {
        let record = BetRecord::default();
        assert_eq!(record.state, BetState::None);
        assert!(record.viewers.is_empty());
    }

    #[test]
    fn test_settled_seeds_player_and_house() {
        let player = Pubkey::new_unique();
        let house = Pubkey::new_unique();
        let record =
            BetRecord::settled(1, player, house, EncryptedFields::default(), 42).unwrap();

        assert_eq!(record.state, BetState::Settled);
        assert_eq!(record.created_at, 42);
        assert_eq!(record.viewers.len(), 2);
        assert!(record.is_viewer(&player));
        assert!(record.is_viewer(&house));
        assert!(!record.is_viewer(&Pubkey::new_unique()));
    }

    #[test]
    fn test_settled_by_house_has_single_viewer() {
        let house = Pubkey::new_unique();
        let record =
            BetRecord::settled(1, house, house, EncryptedFields::default(), 42).unwrap();
        assert_eq!(record.viewers.len(), 1);
        assert!(record.is_viewer(&house));
    }

    #[test]
    fn test_summary_exposes_plaintext_metadata_only() {
        let record = settled_bet(3);
        let summary = record.summary();
        assert_eq!(summary.player, record.player);
        assert_eq!(summary.created_at, 1_700_000_000);
        assert_eq!(summary.state, BetState::Settled);
    }

    #[test]
    fn test_full_viewer_set_fits_account_size() {
        let mut record = settled_bet(1);
        while record.viewers.len() < crate::constants::MAX_VIEWERS {
            record.viewers.insert(Pubkey::new_unique()).unwrap();
        }
        let data = account_bytes(&record);
        assert_eq!(data.len(), BetRecord::SIZE);
    }

    #[test]
    fn test_from_account_data_reads_settled_record() {
        let record = settled_bet(5);
        let data = account_bytes(&record);
        let loaded = BetRecord::from_account_data(5, &data).unwrap();
        assert_eq!(loaded.player, record.player);
        assert_eq!(loaded.viewers, record.viewers);
    }

    #[test]
    fn test_from_account_data_rejects_zeroed_account() {
        let data = vec![0u8; BetRecord::SIZE];
        let err = BetRecord::from_account_data(1, &data).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::BetNotFound));
    }

    #[test]
    fn test_from_account_data_rejects_unsettled_record() {
        let record = BetRecord {
            id: 1,
            ..BetRecord::default()
        };
        let data = account_bytes(&record);
        let err = BetRecord::from_account_data(1, &data).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::BetNotFound));
    }

    #[test]
    fn test_from_account_data_rejects_id_mismatch() {
        let data = account_bytes(&settled_bet(2));
        let err = BetRecord::from_account_data(3, &data).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::BetNotFound));
    }

    #[test]
    fn test_ensure_allocated_bounds() {
        assert!(ensure_allocated(1, 1).is_ok());
        assert!(ensure_allocated(4, 4).is_ok());

        let below = ensure_allocated(0, 4).unwrap_err();
        assert_eq!(error_code(below), u32::from(ErrorCode::BetNotFound));

        let above = ensure_allocated(5, 4).unwrap_err();
        assert_eq!(error_code(above), u32::from(ErrorCode::BetNotFound));

        let empty = ensure_allocated(1, 0).unwrap_err();
        assert_eq!(error_code(empty), u32::from(ErrorCode::BetNotFound));
    }

    #[test]
    fn test_bet_addresses_are_distinct_per_id() {
        let (first, _) = BetRecord::address(1, &crate::ID);
        let (second, _) = BetRecord::address(2, &crate::ID);
        assert_ne!(first, second);
    }

    /// Owned backing storage for an `AccountInfo`.
    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl TestAccount {
        /// The PDA for `bet_id`, owned by this program and holding `record`.
        fn bet(bet_id: u64, record: &BetRecord) -> Self {
            Self {
                key: BetRecord::address(bet_id, &crate::ID).0,
                owner: crate::ID,
                lamports: 1_000_000,
                data: account_bytes(record),
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    #[test]
    fn test_fetch_loads_settled_record() {
        let record = settled_bet(2);
        let mut account = TestAccount::bet(2, &record);

        let loaded = BetRecord::fetch(&account.info(), 2, 3, &crate::ID).unwrap();

        assert_eq!(loaded.id, 2);
        assert_eq!(loaded.player, record.player);
    }

    #[test]
    fn test_fetch_rejects_wrong_pda() {
        let mut account = TestAccount::bet(2, &settled_bet(2));
        account.key = BetRecord::address(1, &crate::ID).0;

        let err = BetRecord::fetch(&account.info(), 2, 3, &crate::ID).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::InvalidBetAccount));
    }

    #[test]
    fn test_fetch_rejects_foreign_owner() {
        let mut account = TestAccount::bet(2, &settled_bet(2));
        account.owner = Pubkey::new_unique();

        let err = BetRecord::fetch(&account.info(), 2, 3, &crate::ID).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::BetNotFound));
    }

    #[test]
    fn test_fetch_rejects_empty_account() {
        let mut account = TestAccount::bet(2, &settled_bet(2));
        account.data.clear();

        let err = BetRecord::fetch(&account.info(), 2, 3, &crate::ID).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::BetNotFound));
    }

    #[test]
    fn test_fetch_rejects_unallocated_id() {
        let mut account = TestAccount::bet(4, &settled_bet(4));

        let err = BetRecord::fetch(&account.info(), 4, 3, &crate::ID).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::BetNotFound));
    }

    #[test]
    fn test_store_then_fetch_keeps_new_viewer() {
        let mut record = settled_bet(1);
        let mut account = TestAccount::bet(1, &record);
        let auditor = Pubkey::new_unique();
        record.viewers.insert(auditor).unwrap();

        let info = account.info();
        record.store(&info).unwrap();
        let loaded = BetRecord::fetch(&info, 1, 1, &crate::ID).unwrap();

        assert!(loaded.is_viewer(&auditor));
    }
}

use anchor_lang::prelude::*;

use crate::constants::MAX_VIEWERS;
use crate::errors::ErrorCode;

// =============================================================================
// VIEWER SET
// =============================================================================
// Per-bet allow-list of identities that may read the encrypted fields.
// Append-only: there is no removal path.
//

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct ViewerSet {
    members: Vec<Pubkey>,
}

impl ViewerSet {
    /// Serialized size: 4-byte length prefix + MAX_VIEWERS pubkeys
    pub const SIZE: usize = 4 + 32 * MAX_VIEWERS;

    pub fn contains(&self, identity: &Pubkey) -> bool {
        self.members.contains(identity)
    }

    /// Add `identity`. Returns false if it was already a member.
    pub fn insert(&mut self, identity: Pubkey) -> Result<bool> {
        if self.contains(&identity) {
            return Ok(false);
        }
        require!(
            self.members.len() < MAX_VIEWERS,
            ErrorCode::ViewerLimitReached
        );
        self.members.push(identity);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

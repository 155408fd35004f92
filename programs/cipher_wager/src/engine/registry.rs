use anchor_lang::prelude::*;

use crate::engine::grant_fields;
use crate::errors::ErrorCode;
use crate::gateway::EncryptedGateway;
use crate::state::{BetRecord, EncryptedFields};

// =============================================================================
// VIEWER AUTHORIZATION
// =============================================================================
// A bet's viewer set and the gateway's decrypt grants move together: every
// identity added here is granted on all four encrypted fields in the same
// call.
//

/// Fail with `NotAuthorized` unless `identity` may view `bet`.
pub fn ensure_viewer(bet: &BetRecord, identity: &Pubkey) -> Result<()> {
    if !bet.is_viewer(identity) {
        msg!("{} is not a viewer of bet {}", identity, bet.id);
        return err!(ErrorCode::NotAuthorized);
    }
    Ok(())
}

/// Let an existing viewer delegate access to `auditor`.
///
/// Returns false (and issues no grants) if `auditor` was already a viewer.
pub fn grant_auditor<G: EncryptedGateway>(
    bet: &mut BetRecord,
    gateway: &mut G,
    auditor: Pubkey,
    requester: &Pubkey,
) -> Result<bool> {
    ensure_viewer(bet, requester)?;

    if !bet.viewers.insert(auditor)? {
        msg!("{} already views bet {}", auditor, bet.id);
        return Ok(false);
    }
    grant_fields(gateway, &bet.encrypted_fields(), &auditor)?;

    msg!(
        "Auditor {} granted on bet {} by {}",
        auditor,
        bet.id,
        requester
    );
    Ok(true)
}

/// Encrypted handles of `bet`, for off-chain decryption by a viewer.
pub fn read_encrypted_fields(bet: &BetRecord, requester: &Pubkey) -> Result<EncryptedFields> {
    ensure_viewer(bet, requester)?;
    Ok(bet.encrypted_fields())
}

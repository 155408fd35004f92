use anchor_lang::prelude::*;

use crate::engine;
use crate::gateway::CpiGateway;
use crate::state::BetRecord;
use crate::{AuditorGranted, GrantAuditor};

/// Handler for grant_auditor instruction.
/// An existing viewer of `bet_id` adds `auditor` to its viewer set and the
/// gateway grants `auditor` decrypt permission on every encrypted field.
/// Granting an identity that is already a viewer changes nothing.
pub fn handler(ctx: Context<GrantAuditor>, bet_id: u64, auditor: Pubkey) -> Result<()> {
    let ledger = &ctx.accounts.ledger;
    let bet_account = ctx.accounts.bet.to_account_info();
    let mut bet = BetRecord::fetch(&bet_account, bet_id, ledger.bet_count, ctx.program_id)?;

    let requester = ctx.accounts.requester.key();
    let mut gateway = CpiGateway::new(
        ctx.accounts.gateway_program.to_account_info(),
        ctx.accounts.gateway_state.to_account_info(),
        ledger.to_account_info(),
        ledger.bump,
    );

    if !engine::grant_auditor(&mut bet, &mut gateway, auditor, &requester)? {
        return Ok(());
    }
    bet.store(&bet_account)?;

    emit!(AuditorGranted {
        bet_id,
        auditor,
        granted_by: requester,
    });

    Ok(())
}

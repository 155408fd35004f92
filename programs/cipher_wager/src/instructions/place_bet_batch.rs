use anchor_lang::prelude::*;
use anchor_lang::system_program::{allocate, assign, transfer, Allocate, Assign, Transfer};

use crate::constants::BET_SEED;
use crate::engine::{self, BatchRequest};
use crate::errors::ErrorCode;
use crate::gateway::CpiGateway;
use crate::state::{chain_digest, BetRecord};
use crate::{BatchSettled, BetCreated, BetSettled, PlaceBetBatch};

// =============================================================================
// PLACE BET BATCH INSTRUCTION HANDLER
// =============================================================================
// Bet PDAs are not known to the Accounts struct since their count varies.
// The caller passes them as remaining accounts, one per entry, in order:
//   remaining_accounts[i] = PDA(["bet", (bet_count + 1 + i).to_le_bytes()])
//
// Settlement runs first over every entry, then each record account is
// created and written. Any failure aborts the whole transaction.
//

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, PlaceBetBatch<'info>>,
    wagers: Vec<[u8; 32]>,
    wager_proofs: Vec<Vec<u8>>,
    guesses: Vec<[u8; 32]>,
    guess_proofs: Vec<Vec<u8>>,
) -> Result<Vec<u64>> {
    let request = BatchRequest {
        wagers: &wagers,
        wager_proofs: &wager_proofs,
        guesses: &guesses,
        guess_proofs: &guess_proofs,
    };
    let len = request.validate()?;

    // Reject wrong PDAs before spending any gateway calls
    let bet_accounts = ctx.remaining_accounts;
    let first_bet_id = ctx.accounts.ledger.next_bet_id()?;
    let bumps = bet_account_bumps(bet_accounts, len, first_bet_id, ctx.program_id)?;

    let player = ctx.accounts.player.key();
    let created_at = Clock::get()?.unix_timestamp;

    let mut gateway = CpiGateway::new(
        ctx.accounts.gateway_program.to_account_info(),
        ctx.accounts.gateway_state.to_account_info(),
        ctx.accounts.ledger.to_account_info(),
        ctx.accounts.ledger.bump,
    );

    let mut digest = ctx.accounts.ledger.settlement_digest;
    let ledger = &mut ctx.accounts.ledger;
    let records = engine::settle_batch(ledger, &mut gateway, &request, player, created_at)?;

    ctx.accounts.player_profile.record_bets(
        ledger,
        player,
        ctx.bumps.player_profile,
        len as u64,
        created_at,
    )?;

    let payer = ctx.accounts.player.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let mut bet_ids = Vec::with_capacity(len);

    for ((mut record, account), bump) in records.into_iter().zip(bet_accounts).zip(bumps) {
        create_bet_account(&payer, account, &system_program, record.id, bump, ctx.program_id)?;
        record.bump = bump;
        record.store(account)?;

        digest = chain_digest(&digest, &record);
        emit!(BetCreated {
            bet_id: record.id,
            player,
        });
        emit!(BetSettled {
            bet_id: record.id,
            player,
            settlement_digest: digest,
        });
        bet_ids.push(record.id);
    }

    emit!(BatchSettled {
        player,
        first_bet_id,
        count: len as u8,
    });

    Ok(bet_ids)
}

/// Check that `accounts` are exactly the next `len` bet PDAs, starting at
/// `first_bet_id`, and return their bumps in order.
pub fn bet_account_bumps(
    accounts: &[AccountInfo],
    len: usize,
    first_bet_id: u64,
    program_id: &Pubkey,
) -> Result<Vec<u8>> {
    require!(accounts.len() == len, ErrorCode::BetAccountCountMismatch);

    let mut bumps = Vec::with_capacity(len);
    for (offset, account) in accounts.iter().enumerate() {
        let bet_id = first_bet_id
            .checked_add(offset as u64)
            .ok_or(ErrorCode::BetCounterOverflow)?;
        let (expected, bump) = BetRecord::address(bet_id, program_id);
        require_keys_eq!(account.key(), expected, ErrorCode::InvalidBetAccount);
        bumps.push(bump);
    }
    Ok(bumps)
}

/// Lamports still needed to make an account holding `current` rent exempt.
fn rent_shortfall(minimum: u64, current: u64) -> u64 {
    minimum.max(1).saturating_sub(current)
}

/// Allocate a program-owned bet record PDA, paid for by `payer`.
///
/// An address that already holds lamports is topped up, allocated and
/// assigned in place, so pre-funding a future bet id cannot block it.
fn create_bet_account<'info>(
    payer: &AccountInfo<'info>,
    bet_account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    bet_id: u64,
    bump: u8,
    program_id: &Pubkey,
) -> Result<()> {
    let id_bytes = bet_id.to_le_bytes();
    let bet_seeds = &[BET_SEED, id_bytes.as_ref(), &[bump]];
    let signer_seeds = &[&bet_seeds[..]];

    let minimum = Rent::get()?.minimum_balance(BetRecord::SIZE);
    let shortfall = rent_shortfall(minimum, bet_account.lamports());

    if shortfall > 0 {
        transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: payer.clone(),
                    to: bet_account.clone(),
                },
            ),
            shortfall,
        )?;
    }

    allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: bet_account.clone(),
            },
            signer_seeds,
        ),
        BetRecord::SIZE as u64,
    )?;

    assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: bet_account.clone(),
            },
            signer_seeds,
        ),
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl TestAccount {
        fn at(key: Pubkey) -> Self {
            Self {
                key,
                owner: Pubkey::default(),
                lamports: 0,
                data: vec![],
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

    fn bet_pdas(first_bet_id: u64, count: u64) -> Vec<TestAccount> {
        (first_bet_id..first_bet_id + count)
            .map(|bet_id| TestAccount::at(BetRecord::address(bet_id, &crate::ID).0))
            .collect()
    }

    #[test]
    fn test_bet_account_bumps_accepts_next_pdas() {
        let mut accounts = bet_pdas(4, 3);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(TestAccount::info).collect();

        let bumps = bet_account_bumps(&infos, 3, 4, &crate::ID).unwrap();

        let expected: Vec<u8> = (4..7)
            .map(|bet_id| BetRecord::address(bet_id, &crate::ID).1)
            .collect();
        assert_eq!(bumps, expected);
    }

    #[test]
    fn test_bet_account_count_must_match_batch() {
        let mut accounts = bet_pdas(1, 2);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(TestAccount::info).collect();

        let err = bet_account_bumps(&infos, 3, 1, &crate::ID).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::BetAccountCountMismatch));
    }

    #[test]
    fn test_out_of_order_bet_accounts_rejected() {
        let mut accounts = bet_pdas(1, 2);
        accounts.swap(0, 1);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(TestAccount::info).collect();

        let err = bet_account_bumps(&infos, 2, 1, &crate::ID).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::InvalidBetAccount));
    }

    #[test]
    fn test_bet_accounts_for_already_used_ids_rejected() {
        let mut accounts = bet_pdas(1, 2);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(TestAccount::info).collect();

        let err = bet_account_bumps(&infos, 2, 3, &crate::ID).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::InvalidBetAccount));
    }

    #[test]
    fn test_rent_shortfall_covers_prefunded_accounts() {
        assert_eq!(rent_shortfall(2_000, 0), 2_000);
        assert_eq!(rent_shortfall(2_000, 500), 1_500);
        assert_eq!(rent_shortfall(2_000, 2_000), 0);
        assert_eq!(rent_shortfall(2_000, 9_999), 0);
        assert_eq!(rent_shortfall(0, 0), 1);
    }
}

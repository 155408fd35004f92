use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke_signed};

use super::{Ebool, EncryptedGateway, Euint64, Euint8, ExternalInput, Handle};
use crate::constants::*;
use crate::errors::ErrorCode;

/// EncryptedGateway backed by CPI into the on-chain FHE coprocessor program.
///
/// The Ledger PDA signs every call, so handles created here are owned by
/// this program's execution context. Result handles come back through
/// Solana return data.
pub struct CpiGateway<'info> {
    program: AccountInfo<'info>,
    state: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    authority_bump: u8,
}

impl<'info> CpiGateway<'info> {
    /// # Arguments
    /// * `program` - The gateway program (must match Ledger.gateway_program)
    /// * `state` - Gateway-owned storage account, validated by the gateway
    /// * `authority` - The Ledger PDA
    /// * `authority_bump` - Ledger PDA bump used to sign
    pub fn new(
        program: AccountInfo<'info>,
        state: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        authority_bump: u8,
    ) -> Self {
        Self {
            program,
            state,
            authority,
            authority_bump,
        }
    }

    fn invoke(&self, discriminator: [u8; 8], args: &[u8]) -> Result<()> {
        // Layout: [8-byte discriminator][borsh-encoded args]
        let mut data = Vec::with_capacity(8 + args.len());
        data.extend_from_slice(&discriminator);
        data.extend_from_slice(args);

        let ix = Instruction {
            program_id: self.program.key(),
            accounts: vec![
                AccountMeta::new_readonly(self.authority.key(), true), // Ledger PDA signs
                AccountMeta::new(self.state.key(), false),
            ],
            data,
        };

        let ledger_seeds = &[LEDGER_SEED, &[self.authority_bump]];
        let signer_seeds = &[&ledger_seeds[..]];

        invoke_signed(
            &ix,
            &[
                self.authority.clone(),
                self.state.clone(),
                self.program.clone(),
            ],
            signer_seeds,
        )?;
        Ok(())
    }

    fn invoke_for_handle(&self, discriminator: [u8; 8], args: &[u8]) -> Result<Handle> {
        self.invoke(discriminator, args)?;

        let (returned_by, data) = get_return_data().ok_or(ErrorCode::GatewayReturnMissing)?;
        require_keys_eq!(
            returned_by,
            self.program.key(),
            ErrorCode::GatewayReturnMissing
        );
        let bytes: [u8; 32] = data
            .as_slice()
            .try_into()
            .map_err(|_| error!(ErrorCode::GatewayReturnMalformed))?;
        Ok(Handle::from_bytes(bytes))
    }

    fn decode(&self, discriminator: [u8; 8], input: &ExternalInput) -> Result<Handle> {
        // Borsh Vec<u8>: u32 LE length prefix, then bytes
        let mut args = Vec::with_capacity(32 + 4 + input.proof.len());
        args.extend_from_slice(&input.handle);
        args.extend_from_slice(&(input.proof.len() as u32).to_le_bytes());
        args.extend_from_slice(&input.proof);
        self.invoke_for_handle(discriminator, &args)
    }

    fn binary(&self, discriminator: [u8; 8], a: Handle, b: Handle) -> Result<Handle> {
        let mut args = [0u8; 64];
        args[..32].copy_from_slice(&a.to_bytes());
        args[32..].copy_from_slice(&b.to_bytes());
        self.invoke_for_handle(discriminator, &args)
    }

    fn allow(&self, handle: Handle, identity: &Pubkey) -> Result<()> {
        let mut args = [0u8; 64];
        args[..32].copy_from_slice(&handle.to_bytes());
        args[32..].copy_from_slice(identity.as_ref());
        self.invoke(IX_ALLOW, &args)
    }
}

impl<'info> EncryptedGateway for CpiGateway<'info> {
    fn decode_u64(&mut self, input: &ExternalInput) -> Result<Euint64> {
        self.decode(IX_DECODE_EUINT64, input).map(Euint64::wrap)
    }

    fn decode_u8(&mut self, input: &ExternalInput) -> Result<Euint8> {
        self.decode(IX_DECODE_EUINT8, input).map(Euint8::wrap)
    }

    fn add_u64(&mut self, a: Euint64, b: Euint64) -> Result<Euint64> {
        self.binary(IX_E_ADD, a.handle(), b.handle())
            .map(Euint64::wrap)
    }

    fn mul_u64(&mut self, a: Euint64, b: Euint64) -> Result<Euint64> {
        self.binary(IX_E_MUL, a.handle(), b.handle())
            .map(Euint64::wrap)
    }

    fn eq_u8(&mut self, a: Euint8, b: Euint8) -> Result<Ebool> {
        self.binary(IX_E_EQ, a.handle(), b.handle()).map(Ebool::wrap)
    }

    fn cast_to_u64(&mut self, value: Ebool) -> Result<Euint64> {
        self.invoke_for_handle(IX_E_CAST_BOOL_TO_U64, &value.handle().to_bytes())
            .map(Euint64::wrap)
    }

    fn draw_uniform_u8(&mut self, bound: u8) -> Result<Euint8> {
        self.invoke_for_handle(IX_E_RAND_BOUNDED, &[bound])
            .map(Euint8::wrap)
    }

    fn grant(&mut self, handle: Handle, identity: &Pubkey) -> Result<()> {
        self.allow(handle, identity)
    }

    fn grant_self(&mut self, handle: Handle) -> Result<()> {
        let authority = self.authority.key();
        self.allow(handle, &authority)
    }
}

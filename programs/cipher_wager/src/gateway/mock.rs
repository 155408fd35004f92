//! In-memory gateway for unit tests.
//!
//! Ciphertexts are plaintext u64 values behind random-looking handles. A
//! client input is valid when its proof is the BLAKE3 hash of its handle.
//! `decrypt` stands in for the off-chain decryption a granted viewer would
//! perform and is only reachable from tests.

use std::collections::{HashMap, HashSet, VecDeque};

use anchor_lang::prelude::*;

use super::{Ebool, EncryptedGateway, Euint64, Euint8, ExternalInput, Handle};
use crate::errors::ErrorCode;

pub struct MockGateway {
    self_identity: Pubkey,
    next_handle: u64,
    values: HashMap<Handle, u64>,
    grants: HashSet<(Handle, Pubkey)>,
    draws: VecDeque<u8>,
    grant_limit: Option<usize>,
    grant_calls: usize,
    pub decode_calls: usize,
}

impl MockGateway {
    pub fn new(self_identity: Pubkey) -> Self {
        Self {
            self_identity,
            next_handle: 0,
            values: HashMap::new(),
            grants: HashSet::new(),
            draws: VecDeque::new(),
            grant_limit: None,
            grant_calls: 0,
            decode_calls: 0,
        }
    }

    /// Script the next outcome draws. Once exhausted, draws fall back to
    /// a hash of the handle counter.
    pub fn with_draws(mut self, draws: &[u8]) -> Self {
        self.draws.extend(draws.iter().copied());
        self
    }

    /// Fail every grant after the first `limit`, as a gateway CPI would
    /// when it runs out of compute or storage.
    pub fn with_grant_limit(mut self, limit: usize) -> Self {
        self.grant_limit = Some(limit);
        self
    }

    /// Client-side encryption of `value` with a valid proof.
    pub fn encrypt(value: u64) -> ExternalInput {
        let mut handle = [0u8; 32];
        handle[..8].copy_from_slice(&value.to_le_bytes());
        handle[31] = 0xc1;
        let proof = blake3::hash(&handle).as_bytes().to_vec();
        ExternalInput::new(handle, proof)
    }

    /// Client-side encryption of `value` whose proof does not match.
    pub fn encrypt_with_bad_proof(value: u64) -> ExternalInput {
        let mut input = Self::encrypt(value);
        input.proof[0] ^= 0xff;
        input
    }

    pub fn decrypt(&self, handle: Handle) -> u64 {
        *self
            .values
            .get(&handle)
            .unwrap_or_else(|| panic!("unknown handle {:?}", handle))
    }

    pub fn is_granted(&self, handle: Handle, identity: &Pubkey) -> bool {
        self.grants.contains(&(handle, *identity))
    }

    pub fn is_granted_to_self(&self, handle: Handle) -> bool {
        self.is_granted(handle, &self.self_identity)
    }

    pub fn grant_count(&self) -> usize {
        self.grants.len()
    }

    fn store(&mut self, value: u64) -> Handle {
        self.next_handle += 1;
        let digest = blake3::hash(&self.next_handle.to_le_bytes());
        let handle = Handle::from_bytes(*digest.as_bytes());
        self.values.insert(handle, value);
        handle
    }

    fn import(&mut self, input: &ExternalInput) -> Result<u64> {
        self.decode_calls += 1;
        let expected = blake3::hash(&input.handle);
        require!(
            input.proof.as_slice() == expected.as_bytes(),
            ErrorCode::InvalidProof
        );
        let mut plaintext = [0u8; 8];
        plaintext.copy_from_slice(&input.handle[..8]);
        Ok(u64::from_le_bytes(plaintext))
    }
}

impl EncryptedGateway for MockGateway {
    fn decode_u64(&mut self, input: &ExternalInput) -> Result<Euint64> {
        let value = self.import(input)?;
        Ok(Euint64::wrap(self.store(value)))
    }

    fn decode_u8(&mut self, input: &ExternalInput) -> Result<Euint8> {
        let value = self.import(input)?;
        require!(value <= u8::MAX as u64, ErrorCode::InvalidProof);
        Ok(Euint8::wrap(self.store(value)))
    }

    fn add_u64(&mut self, a: Euint64, b: Euint64) -> Result<Euint64> {
        let sum = self.decrypt(a.handle()).wrapping_add(self.decrypt(b.handle()));
        Ok(Euint64::wrap(self.store(sum)))
    }

    fn mul_u64(&mut self, a: Euint64, b: Euint64) -> Result<Euint64> {
        let product = self.decrypt(a.handle()).wrapping_mul(self.decrypt(b.handle()));
        Ok(Euint64::wrap(self.store(product)))
    }

    fn eq_u8(&mut self, a: Euint8, b: Euint8) -> Result<Ebool> {
        let equal = self.decrypt(a.handle()) == self.decrypt(b.handle());
        Ok(Ebool::wrap(self.store(equal as u64)))
    }

    fn cast_to_u64(&mut self, value: Ebool) -> Result<Euint64> {
        let bit = self.decrypt(value.handle());
        Ok(Euint64::wrap(self.store(bit)))
    }

    fn draw_uniform_u8(&mut self, bound: u8) -> Result<Euint8> {
        let bound = bound.max(1);
        let raw = match self.draws.pop_front() {
            Some(draw) => draw,
            None => blake3::hash(&self.next_handle.to_be_bytes()).as_bytes()[0],
        };
        Ok(Euint8::wrap(self.store((raw % bound) as u64)))
    }

    fn grant(&mut self, handle: Handle, identity: &Pubkey) -> Result<()> {
        if self.grant_limit.is_some_and(|limit| self.grant_calls >= limit) {
            return Err(ProgramError::InvalidAccountData.into());
        }
        self.grant_calls += 1;
        self.grants.insert((handle, *identity));
        Ok(())
    }

    fn grant_self(&mut self, handle: Handle) -> Result<()> {
        let identity = self.self_identity;
        self.grant(handle, &identity)
    }
}

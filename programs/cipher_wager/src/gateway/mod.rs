use anchor_lang::prelude::*;

// =============================================================================
// ENCRYPTED-VALUE GATEWAY
// =============================================================================
// The ledger never sees plaintext. Encrypted fields are opaque handles into
// the gateway's ciphertext storage, and all arithmetic, comparison,
// randomness and decrypt-permission grants go through EncryptedGateway.
//
// Handle types implement no operators. Combining two ciphertexts is always
// a gateway call.
//

mod cpi;
#[cfg(test)]
pub mod mock;

pub use cpi::*;

/// Opaque reference to a ciphertext held by the gateway.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Handle([u8; 32]);

impl Handle {
    pub const SIZE: usize = 32;

    pub(crate) fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

/// Encrypted 64-bit unsigned integer (wager, payout)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Euint64(Handle);

/// Encrypted 8-bit unsigned integer (guess, outcome)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Euint8(Handle);

/// Encrypted boolean (comparison results)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Ebool(Handle);

macro_rules! typed_handle {
    ($($ty:ident),*) => {$(
        impl $ty {
            pub(crate) fn wrap(handle: Handle) -> Self {
                Self(handle)
            }

            pub fn handle(&self) -> Handle {
                self.0
            }
        }
    )*};
}

typed_handle!(Euint64, Euint8, Ebool);

/// Client-side ciphertext plus the proof binding it to the submitter.
/// Validity is established by the gateway, never by this program.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExternalInput {
    pub handle: [u8; 32],
    pub proof: Vec<u8>,
}

impl ExternalInput {
    pub fn new(handle: [u8; 32], proof: Vec<u8>) -> Self {
        Self { handle, proof }
    }
}

/// Capability interface over the homomorphic encryption primitive.
///
/// Every method either returns a fresh handle or fails the whole call.
/// Implementations must never expose plaintext to the caller.
pub trait EncryptedGateway {
    /// Verify `input.proof` and import the ciphertext as an internal u64 handle.
    fn decode_u64(&mut self, input: &ExternalInput) -> Result<Euint64>;

    /// Verify `input.proof` and import the ciphertext as an internal u8 handle.
    fn decode_u8(&mut self, input: &ExternalInput) -> Result<Euint8>;

    fn add_u64(&mut self, a: Euint64, b: Euint64) -> Result<Euint64>;

    fn mul_u64(&mut self, a: Euint64, b: Euint64) -> Result<Euint64>;

    fn eq_u8(&mut self, a: Euint8, b: Euint8) -> Result<Ebool>;

    /// true -> 1, false -> 0
    fn cast_to_u64(&mut self, value: Ebool) -> Result<Euint64>;

    /// Uniform encrypted draw in [0, bound).
    fn draw_uniform_u8(&mut self, bound: u8) -> Result<Euint8>;

    /// Let `identity` request decryption of `handle`.
    fn grant(&mut self, handle: Handle, identity: &Pubkey) -> Result<()>;

    /// Let this program keep operating on `handle` in later calls.
    fn grant_self(&mut self, handle: Handle) -> Result<()>;
}

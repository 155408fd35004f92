// =============================================================================
// BET DOMAIN
// =============================================================================
// A bet is an even/odd guess against an encrypted coin. Guess and outcome
// are both encrypted 8-bit values restricted to {0, 1}. A win pays 2x.
//

/// Exclusive upper bound for the encrypted outcome draw (yields 0 or 1)
pub const OUTCOME_BOUND: u8 = 2;

// =============================================================================
// BATCH CONFIGURATION
// =============================================================================

/// Smallest batch accepted by place_bet_batch
pub const MIN_BATCH_SIZE: usize = 1;

/// Largest batch accepted by place_bet_batch.
/// Caps the compute and account budget a single call can consume.
pub const MAX_BATCH_SIZE: usize = 5;

// =============================================================================
// VIEWER REGISTRY
// =============================================================================

/// Maximum identities a single bet can authorize (player + house + auditors).
/// Bounds the BetRecord account size.
pub const MAX_VIEWERS: usize = 16;

// =============================================================================
// PDA SEEDS
// =============================================================================

/// Seed for the singleton ledger account
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Seed prefix for bet records: ["bet", bet_id.to_le_bytes()]
pub const BET_SEED: &[u8] = b"bet";

/// Seed prefix for player profiles: ["player", player]
pub const PLAYER_SEED: &[u8] = b"player";

// =============================================================================
// GATEWAY INSTRUCTION DISCRIMINATORS
// =============================================================================
// The encrypted-value gateway is an Anchor program. Discriminators are
// sha256("global:<ix_name>")[0..8], pre-computed to avoid hashing at runtime.
//

/// decode_euint64(handle: [u8; 32], proof: Vec<u8>) -> [u8; 32]
pub const IX_DECODE_EUINT64: [u8; 8] = [0x4e, 0x48, 0x6e, 0x23, 0xe2, 0xec, 0xbe, 0xb8];

/// decode_euint8(handle: [u8; 32], proof: Vec<u8>) -> [u8; 32]
pub const IX_DECODE_EUINT8: [u8; 8] = [0x78, 0x7d, 0xe6, 0x41, 0xa8, 0xe8, 0x07, 0x8f];

/// e_add(a: [u8; 32], b: [u8; 32]) -> [u8; 32]
pub const IX_E_ADD: [u8; 8] = [0x14, 0x53, 0x12, 0xa7, 0x78, 0x21, 0xd1, 0xee];

/// e_mul(a: [u8; 32], b: [u8; 32]) -> [u8; 32]
pub const IX_E_MUL: [u8; 8] = [0xe5, 0x99, 0xf5, 0x11, 0x5f, 0x94, 0x3d, 0xf7];

/// e_eq(a: [u8; 32], b: [u8; 32]) -> [u8; 32]
pub const IX_E_EQ: [u8; 8] = [0xe2, 0x93, 0x6c, 0xb4, 0x8e, 0x47, 0xa1, 0x56];

/// e_cast_bool_to_u64(value: [u8; 32]) -> [u8; 32]
pub const IX_E_CAST_BOOL_TO_U64: [u8; 8] = [0xc8, 0x38, 0xa9, 0x12, 0x49, 0xfc, 0x4b, 0x51];

/// e_rand_bounded(bound: u8) -> [u8; 32]
pub const IX_E_RAND_BOUNDED: [u8; 8] = [0x9b, 0x2c, 0xf3, 0x74, 0xb9, 0xdc, 0x79, 0x00];

/// allow(handle: [u8; 32], identity: Pubkey)
pub const IX_ALLOW: [u8; 8] = [0x3c, 0x67, 0x8c, 0x41, 0x6e, 0x6d, 0x93, 0xa4];

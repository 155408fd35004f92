// =============================================================================
// ENGINE MODULE
// =============================================================================
// Host-independent bet lifecycle logic. Instruction handlers own the
// accounts; everything here works on plain structs and an EncryptedGateway,
// so it runs the same under the Solana runtime and in unit tests.
//

mod batch;
mod registry;
mod settlement;
mod stats;

pub use batch::*;
pub use registry::*;
pub use settlement::*;
pub use stats::*;

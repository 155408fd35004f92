// =============================================================================
// STATE MODULE
// =============================================================================
// Account structures for the confidential wagering ledger.
//

// Usage: `use crate::state::{Ledger, BetRecord, PlayerProfile, ViewerSet};`

mod bet;
mod ledger;
mod player;
mod viewers;

pub use bet::*;
pub use ledger::*;
pub use player::*;
pub use viewers::*;

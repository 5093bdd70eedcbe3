pub mod router;

pub use router::{LedgerState, ledger_router};

//! Error type shared by the wallet, party and transaction repositories.

use super::port_error;

port_error! {
    /// Persistence errors raised by ledger repository adapters.
    pub enum LedgerPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "ledger repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ledger repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        UniqueViolation { message: String } => "ledger record already exists: {message}",
    }
}

//! The synchronous API: connections and the handles that live on them.

mod blob;
mod connection;
mod service;
mod statement;
mod transaction;

pub use blob::{Blob, BlobMode, SeekMode};
pub use connection::Connection;
pub use service::Service;
pub use statement::{Statement, StatementState};
pub use transaction::{Transaction, TransactionState};

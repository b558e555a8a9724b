//! Do not use this crate directly.
//!
//! This is the implementation crate for `gdsconnect`, a client for the wire protocol
//! of Firebird and InterBase servers.
//!

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::non_ascii_literal)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

#[macro_use]
mod fb_error;

mod conn;
pub mod isc;
mod protocol;
pub mod sync;
mod types_impl;
pub mod url;

pub use crate::conn::{
    Arc4, ConnectParams, ConnectParamsBuilder, ConnectionConfiguration, Connector,
    ConnectorRegistry, IntoConnectParams, IntoConnectParamsBuilder, StreamCipher, WireStream,
};

pub use crate::fb_error::{FbError, FbResult};

pub use crate::protocol::parts::{
    AffectedRows, Argument, ArgumentValue, BufferKind, Clumplet, ClumpletReader, ExecutionResult,
    FbValue, ParameterBuffer, Row, ServerError, ServerVersion, Severity, SqlType, StatementType,
    StatusArg, XSqlDa, XSqlVar, CHARSET_OCTETS,
};
pub use crate::protocol::util::{self, vax_integer, InfoReader};
pub use crate::protocol::{Charset, OpCode};

/// Non-standard types that are used within the [`FbValue`](crate::FbValue)s
/// of a [`Row`](crate::Row).
///
/// Dates and times keep the server's representation; conversions into the types
/// of the `time` crate are provided.
pub mod types {
    pub use crate::types_impl::{
        blob_id::BlobId,
        date_time::{FbDate, FbTime, FbTimestamp},
    };
}

/// Default value for the number of rows that are fetched with a single fetch roundtrip.
///
/// The value used at runtime can be changed with
/// [`Connection::set_fetch_size()`](crate::sync::Connection::set_fetch_size).
pub const DEFAULT_FETCH_SIZE: u32 = ConnectionConfiguration::DEFAULT_FETCH_SIZE;

/// Number of bytes that are requested with a single blob segment read.
///
/// The value used at runtime can be changed with
/// [`Connection::set_blob_read_length()`](crate::sync::Connection::set_blob_read_length).
pub const DEFAULT_BLOB_READ_LENGTH: u16 = ConnectionConfiguration::DEFAULT_BLOB_READ_LENGTH;

/// Maximum size of the segments that are written to a blob.
///
/// The value used at runtime can be changed with
/// [`Connection::set_blob_write_length()`](crate::sync::Connection::set_blob_write_length).
pub const DEFAULT_BLOB_WRITE_LENGTH: u16 = ConnectionConfiguration::DEFAULT_BLOB_WRITE_LENGTH;

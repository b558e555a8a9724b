use crate::protocol::parts::ServerError;
use thiserror::Error;

/// A list specifying categories of [`FbError`](crate::FbError).
///
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FbError {
    /// Erroneous Connection Parameters, e.g. from a malformed connection URL.
    #[error("Erroneous Connection Parameters")]
    ConnParams {
        /// The causing Error.
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Database server responded with a non-empty status vector;
    /// the contained `ServerError` describes the concrete reason.
    #[error("Database server responded with an error")]
    DbError {
        /// The causing Error.
        #[from]
        source: ServerError,
    },

    /// The server rejected the connect attempt, or the negotiated
    /// parameters (protocol version, server version string) are unusable.
    #[error("Negotiation with the server failed: {}", _0)]
    Negotiation(String),

    /// An argument does not fit into a parameter buffer whose kind cannot be upgraded
    /// to the wide encoding.
    #[error("Argument with tag {tag} ({len} bytes) overflows a {kind} parameter buffer")]
    BufferOverflow {
        /// The kind of the buffer.
        kind: &'static str,
        /// The tag of the rejected argument.
        tag: u8,
        /// The encoded length of the rejected argument's value.
        len: usize,
    },

    /// Text could not be converted with the connection's character set.
    #[error("Text conversion with charset {} failed", _0)]
    Charset(&'static str),

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    Impl(&'static str),

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    ImplDetailed(String),

    /// Error occured in thread synchronization.
    #[error("Error occured in thread synchronization")]
    Poison,

    /// Error occured in communication with the database.
    #[error(transparent)]
    Io {
        /// The causing Error.
        #[from]
        source: std::io::Error,
    },

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    Usage(&'static str),

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    UsageDetailed(String),

    /// Connection is dead; a transport failure invalidated the database handle.
    #[error("Connection is broken")]
    ConnectionBroken {
        /// The transport failure that broke the connection, if it happened just now.
        source: Option<Box<FbError>>,
    },
}

/// Abbreviation of `Result<T, FbError>`.
pub type FbResult<T> = std::result::Result<T, FbError>;

impl FbError {
    /// Returns the contained `ServerError`, if any.
    ///
    /// This method helps in case you need programmatic access to e.g. the error code.
    ///
    /// ```rust,no_run
    /// # use gdsconnect_impl::{FbError, FbResult, isc};
    /// # let fb_result: FbResult<()> = Err(FbError::Usage("test"));
    /// if let Err(fb_error) = fb_result {
    ///     if let Some(server_error) = fb_error.server_error() {
    ///         if server_error.gds_code() == isc::error::UNIQUE_KEY_VIOLATION {
    ///             println!("duplicate key");
    ///         }
    ///     }
    /// }
    /// ```
    #[must_use]
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            Self::DbError {
                source: server_error,
            } => Some(server_error),
            _ => None,
        }
    }

    /// Reveal the inner error
    #[must_use]
    pub fn inner(&self) -> Option<&dyn std::error::Error> {
        match self {
            Self::ConnParams { source } => Some(&**source),
            Self::DbError { source } => Some(source),
            Self::Io { source } => Some(source),
            Self::ConnectionBroken {
                source: Some(source),
            } => Some(&**source),
            _ => None,
        }
    }

    /// True if the error was caused by a transport failure and
    /// the connection is no longer usable.
    #[must_use]
    pub fn is_connection_broken(&self) -> bool {
        matches!(self, Self::ConnectionBroken { .. })
    }

    pub(crate) fn conn_params(error: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self::ConnParams { source: error }
    }

    /// Returns a decently formed and hopefully helpful error description.
    #[must_use]
    pub fn display_with_inner(&self) -> String {
        if let Some(e) = self.inner() {
            format!("{}, caused by {:?}", &self, e)
        } else {
            format!("{}", &self)
        }
    }
}

impl<G> From<std::sync::PoisonError<G>> for FbError {
    fn from(_error: std::sync::PoisonError<G>) -> Self {
        Self::Poison
    }
}

/// Creates an `FbError::UsageDetailed` from format arguments.
#[macro_export]
macro_rules! usage_err {
    ($($arg:tt)*) => {
        $crate::FbError::UsageDetailed(format!($($arg)*))
    };
}

/// Creates an `FbError::ImplDetailed` from format arguments.
#[macro_export]
macro_rules! impl_err {
    ($($arg:tt)*) => {
        $crate::FbError::ImplDetailed(format!($($arg)*))
    };
}

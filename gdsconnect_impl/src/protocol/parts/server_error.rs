use crate::isc::{arg, error};
use crate::protocol::xdr::XdrRead;
use crate::FbResult;
use std::error::Error;

/// Severity of a server message
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Severity {
    /// A warning that accompanies an otherwise successful response.
    Warning,
    /// The request could not be executed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// One entry of a status vector.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum StatusArg {
    /// An ISC error or warning code.
    Gds(i32),
    /// A message text that was already formatted by the server.
    Interpreted(String),
    /// A string parameter of the preceding code.
    Text(String),
    /// A numeric parameter of the preceding code.
    Number(i32),
    /// The SQLSTATE of the preceding code.
    SqlState(String),
    /// An operating system error code, with the `isc_arg_*` kind that announced it.
    Os {
        /// The `isc_arg_*` tag.
        kind: i32,
        /// The error code.
        code: i32,
    },
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::Gds(code) => match gds_message(code) {
                Some(text) => write!(f, "{text}"),
                None => write!(f, "GDS error {code}"),
            },
            Self::Interpreted(ref s) | Self::Text(ref s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::SqlState(ref s) => write!(f, "SQLSTATE {s}"),
            Self::Os { kind, code } => write!(f, "OS error {code} (kind {kind})"),
        }
    }
}

/// Describes an error or a warning that is reported from the database,
/// as a chain of status vector entries.
///
/// The first entry is the primary one; the following entries are reachable with
/// [`std::error::Error::source`] or [`ServerError::iter`].
#[derive(Clone, PartialEq, Eq)]
pub struct ServerError {
    severity: Severity,
    arg: StatusArg,
    next: Option<Box<ServerError>>,
}

impl ServerError {
    fn from_links(links: Vec<(Severity, StatusArg)>) -> Option<Self> {
        links.into_iter().rev().fold(None, |next, (severity, arg)| {
            Some(Self {
                severity,
                arg,
                next: next.map(Box::new),
            })
        })
    }

    /// Returns the Severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the entry of this chain link.
    #[must_use]
    pub fn arg(&self) -> &StatusArg {
        &self.arg
    }

    /// Returns the next chain link.
    #[must_use]
    pub fn next(&self) -> Option<&ServerError> {
        self.next.as_deref()
    }

    /// Iterates over the chain, starting with `self`.
    pub fn iter(&self) -> impl Iterator<Item = &ServerError> {
        std::iter::successors(Some(self), |e| e.next())
    }

    /// Returns the first ISC code of the chain, or 0 if there is none.
    #[must_use]
    pub fn gds_code(&self) -> i32 {
        self.iter()
            .find_map(|e| match e.arg {
                StatusArg::Gds(code) => Some(code),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// True if any link of the chain carries the given ISC code.
    #[must_use]
    pub fn has_gds_code(&self, code: i32) -> bool {
        self.iter().any(|e| e.arg == StatusArg::Gds(code))
    }

    /// Returns the SQL state of the chain, if the server sent one.
    #[must_use]
    pub fn sql_state(&self) -> Option<&str> {
        self.iter().find_map(|e| match e.arg {
            StatusArg::SqlState(ref s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Returns the message texts of the chain, joined with "; ".
    #[must_use]
    pub fn text(&self) -> String {
        self.iter()
            .filter(|e| !matches!(e.arg, StatusArg::SqlState(_)))
            .map(|e| e.arg.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.next.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            fmt,
            r#"{}[gds code: {}, sql state: {}]: "{}""#,
            self.severity,
            self.gds_code(),
            self.sql_state().unwrap_or("-----"),
            self.text()
        )
    }
}

impl std::fmt::Debug for ServerError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self}")
    }
}

/// The decoded status vector of a response: an optional error
/// and the warnings that came along.
#[derive(Debug, Default)]
pub(crate) struct StatusVector {
    pub error: Option<ServerError>,
    pub warnings: Vec<ServerError>,
}

impl StatusVector {
    pub(crate) fn parse(rdr: &mut dyn std::io::Read) -> FbResult<Self> {
        let mut links: Vec<(Severity, StatusArg)> = Vec::new();
        let mut severity = Severity::Error;
        loop {
            match rdr.get_i32()? {
                arg::END => break,
                arg::GDS => {
                    let code = rdr.get_i32()?;
                    if code != 0 {
                        severity = Severity::Error;
                        links.push((severity, StatusArg::Gds(code)));
                    }
                }
                arg::WARNING => {
                    let code = rdr.get_i32()?;
                    if code != 0 {
                        severity = Severity::Warning;
                        links.push((severity, StatusArg::Gds(code)));
                    }
                }
                arg::INTERPRETED => {
                    let text = String::from_utf8_lossy(&rdr.get_buffer()?).into_owned();
                    links.push((severity, StatusArg::Interpreted(text)));
                }
                arg::STRING | arg::CSTRING => {
                    let text = String::from_utf8_lossy(&rdr.get_buffer()?).into_owned();
                    links.push((severity, StatusArg::Text(text)));
                }
                arg::SQL_STATE => {
                    let text = String::from_utf8_lossy(&rdr.get_buffer()?).into_owned();
                    links.push((severity, StatusArg::SqlState(text)));
                }
                arg::NUMBER => {
                    let n = rdr.get_i32()?;
                    links.push((severity, StatusArg::Number(n)));
                }
                kind => {
                    let code = rdr.get_i32()?;
                    if code != 0 {
                        links.push((severity, StatusArg::Os { kind, code }));
                    }
                }
            }
        }
        Ok(Self::from_links(links))
    }

    // Everything before the first warning code forms the error;
    // each warning code starts a new warning chain.
    fn from_links(links: Vec<(Severity, StatusArg)>) -> Self {
        let mut error_links = Vec::new();
        let mut warning_chains: Vec<Vec<(Severity, StatusArg)>> = Vec::new();
        for link in links {
            match link {
                (Severity::Warning, StatusArg::Gds(_)) => warning_chains.push(vec![link]),
                (Severity::Warning, _) => match warning_chains.last_mut() {
                    Some(chain) => chain.push(link),
                    None => error_links.push(link),
                },
                (Severity::Error, _) => error_links.push(link),
            }
        }
        Self {
            error: ServerError::from_links(error_links),
            warnings: warning_chains
                .into_iter()
                .filter_map(ServerError::from_links)
                .collect(),
        }
    }
}

fn gds_message(code: i32) -> Option<&'static str> {
    Some(match code {
        error::ARITH_EXCEPT => "arithmetic exception, numeric overflow, or string truncation",
        error::BAD_DB_FORMAT => "file is not a valid database",
        error::BAD_DB_HANDLE => "invalid database handle (no active connection)",
        error::BAD_SEGSTR_HANDLE => "invalid BLOB handle",
        error::BAD_TRANS_HANDLE => "invalid transaction handle (expecting explicit transaction start)",
        error::DEADLOCK => "deadlock",
        error::INTEG_FAIL => "action cancelled by trigger to preserve data integrity",
        error::LOCK_CONFLICT => "lock conflict on no wait transaction",
        error::NO_CUR_REC => "no current record for fetch operation",
        error::OPEN_TRANS => "cannot disconnect database with open transactions",
        error::SEGMENT => "segment buffer length shorter than expected",
        error::SEGSTR_EOF => "attempted retrieval of more segments than exist",
        error::STREAM_EOF => "attempt to fetch past the last record in a record stream",
        error::UNAVAILABLE => "unavailable database",
        error::WISH_LIST => "feature is not supported",
        error::CONNECT_REJECT => "connection rejected by remote interface",
        error::TRA_STATE => "transaction is not in a valid state for this operation",
        error::BAD_STMT_HANDLE => "invalid statement handle",
        error::DSQL_CURSOR_ERR => "attempt to reopen an open cursor",
        error::DSQL_SQLDA_ERR => "SQLDA error",
        error::CONN_LOST => "connection lost to database",
        error::UNIQUE_KEY_VIOLATION => "violation of PRIMARY or UNIQUE KEY constraint",
        error::NETWORK_ERROR => "unable to complete network request to host",
        error::NET_READ_ERR => "error reading data from the connection",
        error::NET_WRITE_ERR => "error writing data to the connection",
        error::BAD_PROTOCOL => "unsupported on-disk structure or protocol",
        error::CANCELLED => "operation was cancelled",
        _ => return None,
    })
}

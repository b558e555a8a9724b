pub(crate) mod blr;
mod clumplet;
mod execution_result;
mod fb_value;
mod parameter_buffer;
mod row;
mod server_error;
mod server_version;
pub(crate) mod sql_info;
mod xsqlvar;

pub(crate) use self::{
    row::emit_message,
    server_error::StatusVector,
    sql_info::DescribeInfo,
};
pub use self::{
    clumplet::{Clumplet, ClumpletReader},
    execution_result::ExecutionResult,
    fb_value::FbValue,
    parameter_buffer::{Argument, ArgumentValue, BufferKind, ParameterBuffer},
    row::Row,
    server_error::{ServerError, Severity, StatusArg},
    server_version::ServerVersion,
    sql_info::{AffectedRows, StatementType},
    xsqlvar::{SqlType, XSqlDa, XSqlVar, CHARSET_OCTETS},
};

mod charset;
mod op_code;
pub mod parts;
mod reply;
mod request;
pub mod util;
pub(crate) mod xdr;

pub(crate) use self::{
    reply::{GenericResponse, Reply},
    request::Request,
};

pub use self::{charset::Charset, op_code::OpCode};

// The database connection, the parameters for creating one, and the transport.

mod am_conn_core;
mod connection_configuration;
mod connection_core;
mod connector_registry;
mod params;
mod tcp_client;
mod wire_stream;

pub(crate) use {
    am_conn_core::AmConnCore,
    connection_core::{ConnectionCore, OpenMode},
};
pub use {
    connection_configuration::ConnectionConfiguration,
    connector_registry::{Connector, ConnectorRegistry},
    params::{
        connect_params::ConnectParams, connect_params_builder::ConnectParamsBuilder,
        into_connect_params::IntoConnectParams,
        into_connect_params_builder::IntoConnectParamsBuilder,
    },
    wire_stream::{Arc4, StreamCipher, WireStream},
};

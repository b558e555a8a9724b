use crate::conn::{tcp_client::PlainTcpConnector, WireStream};
use crate::{ConnectParams, ConnectionConfiguration, FbResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Opens the transport of a connection.
///
/// Implementations are registered by name in a [`ConnectorRegistry`], and chosen with the
/// connector name of the [`ConnectParams`].
pub trait Connector: Send + Sync + std::fmt::Debug {
    /// Opens a transport to the server that `params` describes.
    ///
    /// # Errors
    ///
    /// `FbError::Io` if the server cannot be reached.
    fn connect(
        &self,
        params: &ConnectParams,
        config: &ConnectionConfiguration,
    ) -> FbResult<WireStream>;
}

/// Maps connector names to connectors.
///
/// The default registry knows the plain TCP connector as `tcp`.
#[derive(Clone, Debug)]
pub struct ConnectorRegistry {
    connectors: BTreeMap<String, Arc<dyn Connector>>,
}

impl Default for ConnectorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(crate::ConnectParams::DEFAULT_CONNECTOR, Arc::new(PlainTcpConnector));
        registry
    }
}

impl ConnectorRegistry {
    /// A registry without any connector.
    pub fn empty() -> Self {
        Self {
            connectors: BTreeMap::new(),
        }
    }

    /// Registers a connector under a name, replacing a previous one of the same name.
    pub fn register<S: Into<String>>(&mut self, name: S, connector: Arc<dyn Connector>) {
        self.connectors.insert(name.into(), connector);
    }

    /// Builder-method for registering a connector.
    #[must_use]
    pub fn with<S: Into<String>>(mut self, name: S, connector: Arc<dyn Connector>) -> Self {
        self.register(name, connector);
        self
    }

    /// Returns the names of the registered connectors.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.connectors.keys().map(String::as_str)
    }

    /// Finds the connector for a name.
    ///
    /// # Errors
    ///
    /// `FbError::UsageDetailed` if no connector is registered under that name.
    pub fn get(&self, name: &str) -> FbResult<&Arc<dyn Connector>> {
        self.connectors
            .get(name)
            .ok_or_else(|| usage_err!("no connector registered under the name '{name}'"))
    }

    pub(crate) fn connect(
        &self,
        params: &ConnectParams,
        config: &ConnectionConfiguration,
    ) -> FbResult<WireStream> {
        trace!("Connecting to {} with connector {}", params.addr(), params.connector());
        self.get(params.connector())?.connect(params, config)
    }
}

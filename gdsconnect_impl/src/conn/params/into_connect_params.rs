use crate::{ConnectParams, ConnectParamsBuilder, FbResult, IntoConnectParamsBuilder};
use url::Url;

/// A trait implemented by types that can be converted into a `ConnectParams`.
pub trait IntoConnectParams {
    /// Converts the value of `self` into a `ConnectParams`.
    ///
    /// # Errors
    ///
    /// `FbError::ConnParams` if a URL cannot be parsed,
    /// `FbError::Usage` if wrong information was provided.
    fn into_connect_params(self) -> FbResult<ConnectParams>;
}

impl IntoConnectParams for ConnectParams {
    fn into_connect_params(self) -> FbResult<ConnectParams> {
        Ok(self)
    }
}

impl IntoConnectParams for &ConnectParams {
    fn into_connect_params(self) -> FbResult<ConnectParams> {
        Ok(self.clone())
    }
}

impl IntoConnectParams for ConnectParamsBuilder {
    fn into_connect_params(self) -> FbResult<ConnectParams> {
        self.build()
    }
}

impl IntoConnectParams for &ConnectParamsBuilder {
    fn into_connect_params(self) -> FbResult<ConnectParams> {
        self.build()
    }
}

impl IntoConnectParams for &str {
    fn into_connect_params(self) -> FbResult<ConnectParams> {
        self.into_connect_params_builder()?.build()
    }
}

impl IntoConnectParams for String {
    fn into_connect_params(self) -> FbResult<ConnectParams> {
        self.as_str().into_connect_params()
    }
}

impl IntoConnectParams for Url {
    fn into_connect_params(self) -> FbResult<ConnectParams> {
        self.into_connect_params_builder()?.build()
    }
}

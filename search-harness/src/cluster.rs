//! Clusters the harness can run endpoint tests against.

use search_client::{ApiError, HttpTransport, SearchClient, SearchClientBuilder, Transport};
use url::Url;

use crate::config::HarnessConfig;

/// Customizes the client builder for one endpoint test.
pub type ConfigureClient<'a> = &'a dyn Fn(SearchClientBuilder) -> SearchClientBuilder;

/// A running cluster that hands out clients bound to a known port.
///
/// Bootstrapping and tearing the cluster down happen elsewhere; the harness
/// only needs a client and the port for diagnostics.
pub trait IntegrationCluster {
    /// Transport the clients use.
    type Transport: Transport + 'static;

    /// Port the cluster listens on.
    fn port(&self) -> u16;

    /// Builds a client, letting the test adjust the connection settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the client cannot be constructed.
    fn client(
        &self,
        configure: ConfigureClient<'_>,
    ) -> Result<SearchClient<Self::Transport>, ApiError>;
}

/// A cluster reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCluster {
    base_url: Url,
}

impl HttpCluster {
    /// Targets the cluster at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Targets `http://localhost:{port}`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL cannot be formed.
    pub fn local(port: u16) -> Result<Self, ApiError> {
        Ok(Self::new(Url::parse(&format!("http://localhost:{port}"))?))
    }

    /// Targets the local cluster on the configured port.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL cannot be formed.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, ApiError> {
        Self::local(config.cluster_port)
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl IntegrationCluster for HttpCluster {
    type Transport = HttpTransport;

    fn port(&self) -> u16 {
        self.base_url.port_or_known_default().unwrap_or_default()
    }

    fn client(&self, configure: ConfigureClient<'_>) -> Result<SearchClient, ApiError> {
        configure(SearchClient::builder(self.base_url.clone())).build()
    }
}

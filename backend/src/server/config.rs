//! HTTP server configuration object.

use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_allowed_origin: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration listening on `bind_addr` that accepts
    /// cross-origin requests from any origin.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            cors_allowed_origin: None,
        }
    }

    /// Restrict cross-origin requests to a single origin.
    #[must_use]
    pub fn with_cors_allowed_origin(mut self, origin: Option<impl Into<String>>) -> Self {
        self.cors_allowed_origin = origin.map(Into::into);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the allowed CORS origin, if restricted.
    #[must_use]
    pub fn cors_allowed_origin(&self) -> Option<&str> {
        self.cors_allowed_origin.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_config_allows_any_origin() {
        let config = ServerConfig::new("127.0.0.1:3001".parse().expect("valid addr"));
        assert_eq!(config.cors_allowed_origin(), None);
        assert_eq!(config.bind_addr().port(), 3001);
    }

    #[rstest]
    fn origin_can_be_restricted() {
        let config = ServerConfig::new("127.0.0.1:3001".parse().expect("valid addr"))
            .with_cors_allowed_origin(Some("http://localhost:3000"));
        assert_eq!(config.cors_allowed_origin(), Some("http://localhost:3000"));
    }
}

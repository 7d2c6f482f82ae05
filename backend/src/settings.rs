//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DRINKLOG_*` environment variables or a
//! configuration file, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "drinklog.sqlite3";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_POOL_MAX_SIZE: u32 = 4;

/// Configuration values for the HTTP server and its database.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DRINKLOG")]
pub struct ServerSettings {
    /// SQLite database file path.
    pub database_url: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Interface address to bind.
    pub bind_host: Option<IpAddr>,
    /// Single origin allowed by CORS; any origin when unset.
    pub cors_allowed_origin: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply the sample records on startup.
    #[ortho_config(default = false)]
    pub seed_sample_data: bool,
}

impl ServerSettings {
    /// Return the configured database location, falling back to the default.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Return the socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.bind_host.unwrap_or(DEFAULT_BIND_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Return the configured CORS origin, ignoring blank values.
    pub fn cors_allowed_origin(&self) -> Option<&str> {
        self.cors_allowed_origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    /// Return the connection pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "DRINKLOG_DATABASE_URL",
        "DRINKLOG_PORT",
        "DRINKLOG_BIND_HOST",
        "DRINKLOG_CORS_ALLOWED_ORIGIN",
        "DRINKLOG_POOL_MAX_SIZE",
        "DRINKLOG_SEED_SAMPLE_DATA",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("drinklog")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_addr(), "0.0.0.0:3001".parse().expect("valid addr"));
        assert_eq!(settings.cors_allowed_origin(), None);
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert!(!settings.seed_sample_data);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DRINKLOG_DATABASE_URL", Some("/var/lib/drinklog/records.db".to_owned())),
            ("DRINKLOG_PORT", Some("8080".to_owned())),
            ("DRINKLOG_BIND_HOST", Some("127.0.0.1".to_owned())),
            (
                "DRINKLOG_CORS_ALLOWED_ORIGIN",
                Some("http://localhost:3000".to_owned()),
            ),
            ("DRINKLOG_POOL_MAX_SIZE", Some("8".to_owned())),
            ("DRINKLOG_SEED_SAMPLE_DATA", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.database_url(), "/var/lib/drinklog/records.db");
        assert_eq!(settings.bind_addr(), "127.0.0.1:8080".parse().expect("valid addr"));
        assert_eq!(settings.cors_allowed_origin(), Some("http://localhost:3000"));
        assert_eq!(settings.pool_max_size(), 8);
        assert!(settings.seed_sample_data);
    }

    #[rstest]
    fn blank_cors_origin_allows_any() {
        let settings = ServerSettings {
            database_url: None,
            port: None,
            bind_host: None,
            cors_allowed_origin: Some("  ".to_owned()),
            pool_max_size: None,
            seed_sample_data: false,
        };
        assert_eq!(settings.cors_allowed_origin(), None);
    }
}

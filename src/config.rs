//! Server configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags:
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! log_filter = "timestore=debug,info"
//! ```

use crate::error::{Error, Result};

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Address to listen on.
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the per-user file at
    /// [`Config::default_path`] is read if present, else defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/timestore/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("timestore").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_listen_on_8080() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_overrides() {
        let config: Config = toml::from_str(
            r#"
host = "127.0.0.1"
port = 9090
log_filter = "timestore=debug"
"#,
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090".parse().unwrap());
        assert_eq!(config.log_filter, "timestore=debug");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<Config>("prot = 80").is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 3000").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, default_host());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(Error::ConfigRead { .. })));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"eighty\"").unwrap();

        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }
}

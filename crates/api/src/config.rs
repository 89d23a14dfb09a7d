//! Runtime configuration, read once from the environment at startup.

use core::fmt::Display;
use core::str::FromStr;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;

use catalog_products::{CatalogSettings, RequiredFields, UpdatePolicy};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3173";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// The single origin allowed to make credentialed cross-origin calls.
    pub cors_origin: HeaderValue,
    pub catalog: CatalogSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            catalog: CatalogSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Read `PORT`, `BIND_ADDR`, `CORS_ORIGIN`, `PRODUCT_REQUIRED_FIELDS` and
    /// `PRODUCT_UPDATE_POLICY`. Invalid values are logged and replaced by the
    /// default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr),
            port: parse_or(&lookup, "PORT", defaults.port),
            cors_origin: parse_or(&lookup, "CORS_ORIGIN", defaults.cors_origin),
            catalog: CatalogSettings {
                required_fields: parse_or::<RequiredFields>(
                    &lookup,
                    "PRODUCT_REQUIRED_FIELDS",
                    defaults.catalog.required_fields,
                ),
                update_policy: parse_or::<UpdatePolicy>(
                    &lookup,
                    "PRODUCT_UPDATE_POLICY",
                    defaults.catalog.update_policy,
                ),
            },
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Load a `.env` file (current directory or its ancestors) into the process
/// environment. Variables already set are not overridden.
///
/// Must run before [`ApiConfig::from_env`] and before logging is initialized,
/// so `RUST_LOG` can come from the file too. Returns the path that was loaded.
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                key,
                value = %raw,
                error = %e,
                "invalid configuration value; using default"
            );
            default
        }
    }
}

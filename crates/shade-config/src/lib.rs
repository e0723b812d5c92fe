//! Configuration for the shade gateway adapter.
//!
//! TOML file + environment layering, validation, and translation to
//! `shade_core::GatewayConfig`. The room catalog file is loaded here too,
//! so the binary only ever sees validated, immutable values.

mod network;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

use shade_core::{DEFAULT_USER_AGENT, GatewayConfig, RoomCatalog, Segment, TlsVerification};

pub use ipnet::IpNet;
pub use network::{network_contains, parse_network};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to load room catalog {path}: {reason}")]
    Catalog { path: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub catalog: CatalogSection,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSection {
    /// Listen address for the HTTP server.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Directory served under `/Frontend`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// File that submitted reports are appended to.
    #[serde(default = "default_reports_file")]
    pub reports_file: PathBuf,

    /// Client networks allowed to reach the control routes. Empty allows all.
    #[serde(default)]
    pub allowed_networks: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
            reports_file: default_reports_file(),
            allowed_networks: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GatewaySection {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Gateway host shared by every segment.
    #[serde(default, deserialize_with = "lenient_string")]
    pub host: Option<String>,

    /// Port per building segment, keyed by segment tag (`A = 9001`).
    #[serde(default)]
    pub ports: BTreeMap<String, u16>,

    /// Username base; the segment tag is appended.
    #[serde(default, deserialize_with = "lenient_string")]
    pub username_base: Option<String>,

    /// Shared password. Prefer setting it through the environment.
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,

    /// Static `md5` protocol value.
    #[serde(default, deserialize_with = "lenient_string")]
    pub md5: Option<String>,

    /// Accept the gateways' self-signed certificates.
    #[serde(default = "default_insecure")]
    pub insecure_skip_verify: bool,

    /// Custom CA certificate. Takes precedence over `insecure_skip_verify`.
    pub ca_cert: Option<PathBuf>,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: None,
            ports: BTreeMap::new(),
            username_base: None,
            password: None,
            md5: None,
            insecure_skip_verify: default_insecure(),
            ca_cert: None,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogSection {
    /// Room catalog JSON file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".into()
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("Frontend")
}
fn default_reports_file() -> PathBuf {
    PathBuf::from("reports/reports.txt")
}
fn default_scheme() -> String {
    "https".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    10
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}
fn default_catalog_path() -> PathBuf {
    PathBuf::from("rooms.json")
}

/// Environment values are parsed as TOML-ish scalars, so a numeric
/// password arrives as an integer. Accept any scalar as a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path.
///
/// An explicit path wins; otherwise the platform config directory is used
/// when it holds a `shade.toml`, falling back to `./shade.toml`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    ProjectDirs::from("net", "shade", "shade")
        .map(|dirs| dirs.config_dir().join("shade.toml"))
        .filter(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from("shade.toml"))
}

// ── Config loading ──────────────────────────────────────────────────

/// Plain variable names read from the deployment environment.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("SERVER_IP", "gateway.host"),
    ("SERVER_PORT_A", "gateway.ports.A"),
    ("SERVER_PORT_B", "gateway.ports.B"),
    ("SERVER_PORT_C", "gateway.ports.C"),
    ("CURTAINS_USERNAME", "gateway.username_base"),
    ("CURTAINS_PASSWORD", "gateway.password"),
    ("MD5_VALUE", "gateway.md5"),
    ("REPORTS_FILE", "server.reports_file"),
];

fn legacy_env() -> Env {
    Env::raw().filter_map(|key| {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, path)| (*path).into())
    })
}

/// Layered figment: defaults → TOML file → legacy variables → `SHADE_*`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(legacy_env())
        .merge(Env::prefixed("SHADE_").split("__"))
}

/// Load the full Config from file + environment.
///
/// A missing file is not an error; the environment alone can configure
/// everything.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading configuration");
    let config: Config = figment(path).extract()?;
    Ok(config)
}

/// Render a config as pretty TOML.
pub fn render_config(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

// ── Translation to runtime types ────────────────────────────────────

/// Validated listener settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub static_dir: PathBuf,
    pub reports_file: PathBuf,
    pub allowed_networks: Vec<IpNet>,
}

impl Config {
    /// A starting point for a new deployment.
    pub fn example() -> Self {
        let mut cfg = Self::default();
        cfg.gateway.host = Some("192.0.2.10".into());
        cfg.gateway.ports = Segment::iter()
            .zip(9001u16..)
            .map(|(segment, port)| (segment.to_string(), port))
            .collect();
        cfg.gateway.username_base = Some("curtains".into());
        cfg.server.allowed_networks = vec!["10.0.0.0/8".into()];
        cfg
    }

    /// Build the immutable `GatewayConfig`.
    pub fn gateway_config(&self) -> Result<GatewayConfig, ConfigError> {
        let gw = &self.gateway;

        let host = required(gw.host.as_deref(), "gateway.host")?;
        let username_base = required(gw.username_base.as_deref(), "gateway.username_base")?;
        let password = required(gw.password.as_deref(), "gateway.password")?;
        let md5 = required(gw.md5.as_deref(), "gateway.md5")?;

        if gw.scheme != "https" && gw.scheme != "http" {
            return Err(invalid(
                "gateway.scheme",
                format!("expected 'https' or 'http', got '{}'", gw.scheme),
            ));
        }
        if gw.timeout_secs == 0 {
            return Err(invalid("gateway.timeout_secs", "must be greater than zero"));
        }

        let mut ports = BTreeMap::new();
        for (key, port) in &gw.ports {
            let segment = Segment::from_str(key).map_err(|_| {
                invalid("gateway.ports", format!("unknown building segment '{key}'"))
            })?;
            if *port == 0 {
                return Err(invalid(
                    "gateway.ports",
                    format!("port for segment {segment} must be non-zero"),
                ));
            }
            ports.insert(segment, *port);
        }
        if let Some(missing) = Segment::iter().find(|s| !ports.contains_key(s)) {
            return Err(invalid(
                "gateway.ports",
                format!("no port configured for segment {missing}"),
            ));
        }

        let tls = if let Some(ref ca_path) = gw.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else if gw.insecure_skip_verify {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(GatewayConfig {
            scheme: gw.scheme.clone(),
            host: host.to_owned(),
            ports,
            username_base: username_base.to_owned(),
            password: SecretString::from(password.to_owned()),
            md5: SecretString::from(md5.to_owned()),
            tls,
            timeout: Duration::from_secs(gw.timeout_secs),
            user_agent: gw.user_agent.clone(),
        })
    }

    /// Build validated listener settings.
    pub fn server_settings(&self) -> Result<ServerSettings, ConfigError> {
        let srv = &self.server;
        let bind = srv
            .bind
            .parse()
            .map_err(|_| invalid("server.bind", format!("not a socket address: {}", srv.bind)))?;
        let allowed_networks = srv
            .allowed_networks
            .iter()
            .map(|raw| {
                parse_network(raw).map_err(|e| invalid("server.allowed_networks", e))
            })
            .collect::<Result<Vec<IpNet>, _>>()?;

        Ok(ServerSettings {
            bind,
            static_dir: srv.static_dir.clone(),
            reports_file: srv.reports_file.clone(),
            allowed_networks,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(invalid(field, "is required")),
    }
}

// ── Room catalog ────────────────────────────────────────────────────

/// Read and parse the room catalog JSON file.
pub fn load_catalog(path: &Path) -> Result<RoomCatalog, ConfigError> {
    let catalog_err = |reason: String| ConfigError::Catalog {
        path: path.display().to_string(),
        reason,
    };
    let json = std::fs::read_to_string(path).map_err(|e| catalog_err(e.to_string()))?;
    let catalog = RoomCatalog::from_json(&json).map_err(|e| catalog_err(e.to_string()))?;
    debug!(rooms = catalog.len(), path = %path.display(), "room catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::result_large_err)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const FULL: &str = r#"
        [server]
        bind = "127.0.0.1:9090"
        allowed_networks = ["10.0.0.0/8", "192.168.1.7"]

        [gateway]
        host = "gw.example.net"
        username_base = "curtains"
        password = "from-file"
        md5 = "feedface"
        timeout_secs = 3

        [gateway.ports]
        A = 9001
        b = 9002
        C = 9003

        [catalog]
        path = "data/rooms.json"
    "#;

    #[test]
    fn file_values_are_loaded() {
        Jail::expect_with(|jail| {
            jail.create_file("shade.toml", FULL)?;
            let cfg = load_config(Path::new("shade.toml")).map_err(|e| e.to_string())?;

            let gw = cfg.gateway_config().map_err(|e| e.to_string())?;
            assert_eq!(gw.host, "gw.example.net");
            assert_eq!(gw.ports.get(&Segment::B), Some(&9002));
            assert_eq!(gw.password.expose_secret(), "from-file");
            assert_eq!(gw.timeout, Duration::from_secs(3));
            assert_eq!(gw.tls, TlsVerification::DangerAcceptInvalid);
            assert_eq!(gw.user_agent, "XXter/1.0");

            let srv = cfg.server_settings().map_err(|e| e.to_string())?;
            assert_eq!(srv.bind.port(), 9090);
            assert_eq!(srv.allowed_networks.len(), 2);
            assert_eq!(cfg.catalog.path, PathBuf::from("data/rooms.json"));
            Ok(())
        });
    }

    #[test]
    fn legacy_environment_configures_everything() {
        Jail::expect_with(|jail| {
            jail.set_env("SERVER_IP", "10.9.8.7");
            jail.set_env("SERVER_PORT_A", "7001");
            jail.set_env("SERVER_PORT_B", "7002");
            jail.set_env("SERVER_PORT_C", "7003");
            jail.set_env("CURTAINS_USERNAME", "blinds");
            jail.set_env("CURTAINS_PASSWORD", "1234");
            jail.set_env("MD5_VALUE", "cafe");
            jail.set_env("REPORTS_FILE", "/tmp/shade/reports.txt");

            let cfg = load_config(Path::new("missing.toml")).map_err(|e| e.to_string())?;
            let gw = cfg.gateway_config().map_err(|e| e.to_string())?;
            assert_eq!(gw.host, "10.9.8.7");
            assert_eq!(gw.ports.get(&Segment::C), Some(&7003));
            assert_eq!(gw.username_base, "blinds");
            // Numeric secrets survive env parsing.
            assert_eq!(gw.password.expose_secret(), "1234");
            assert_eq!(
                cfg.server.reports_file,
                PathBuf::from("/tmp/shade/reports.txt")
            );
            Ok(())
        });
    }

    #[test]
    fn prefixed_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("shade.toml", FULL)?;
            jail.set_env("SHADE_GATEWAY__HOST", "override.example.net");
            jail.set_env("SHADE_GATEWAY__INSECURE_SKIP_VERIFY", "false");

            let cfg = load_config(Path::new("shade.toml")).map_err(|e| e.to_string())?;
            let gw = cfg.gateway_config().map_err(|e| e.to_string())?;
            assert_eq!(gw.host, "override.example.net");
            assert_eq!(gw.tls, TlsVerification::SystemDefaults);
            Ok(())
        });
    }

    #[test]
    fn ca_cert_takes_precedence_over_insecure() {
        let mut cfg = Config::example();
        cfg.gateway.password = Some("pw".into());
        cfg.gateway.md5 = Some("m".into());
        cfg.gateway.ca_cert = Some(PathBuf::from("/etc/shade/ca.pem"));
        let gw = cfg.gateway_config().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            gw.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/shade/ca.pem"))
        );
    }

    #[test]
    fn missing_required_field_is_reported() {
        let cfg = Config::example();
        let err = cfg.gateway_config().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "gateway.password")
        );
    }

    #[test]
    fn every_segment_needs_a_port() {
        let mut cfg = Config::example();
        cfg.gateway.password = Some("pw".into());
        cfg.gateway.md5 = Some("m".into());
        cfg.gateway.ports.remove("B");
        let err = cfg.gateway_config().unwrap_err();
        assert!(err.to_string().contains("segment B"), "{err}");
    }

    #[test]
    fn unknown_segment_port_is_rejected() {
        let mut cfg = Config::example();
        cfg.gateway.password = Some("pw".into());
        cfg.gateway.md5 = Some("m".into());
        cfg.gateway.ports.insert("Q".into(), 9999);
        let err = cfg.gateway_config().unwrap_err();
        assert!(err.to_string().contains("'Q'"), "{err}");
    }

    #[test]
    fn bad_network_is_rejected() {
        let mut cfg = Config::default();
        cfg.server.allowed_networks = vec!["10.0.0.0/33".into()];
        assert!(cfg.server_settings().is_err());
        cfg.server.allowed_networks = vec!["not-an-ip".into()];
        assert!(cfg.server_settings().is_err());
    }

    #[test]
    fn example_renders_as_toml() {
        let rendered = render_config(&Config::example()).unwrap_or_else(|e| panic!("{e}"));
        assert!(rendered.contains("[gateway.ports]"));
        assert!(rendered.contains("A = 9001"));
    }

    #[test]
    fn catalog_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("rooms.json");
        std::fs::write(&path, r#"{"1a1": [{"name": "", "start": "G1", "stop": "G2"}]}"#)
            .unwrap_or_else(|e| panic!("{e}"));

        let catalog = load_catalog(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(catalog.directions("1A1").unwrap_or_default(), vec![""]);

        let missing = load_catalog(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Catalog { .. }));
    }
}

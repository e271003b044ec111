use crate::cli::CheckArgs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level raidcheck configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidcheckConfig {
    pub connection: ConnectionConfig,
    pub tool: ToolConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Remote host to probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub port: u16,
    /// SSH username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Private key file; takes precedence over the password when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_path: Option<PathBuf>,
    /// Connection and I/O timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 22,
            user: None,
            password: None,
            key_path: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Path of the storcli binary on the remote host.
    pub storcli_path: PathBuf,
    /// Controller selector passed to storcli ("/call" = all controllers).
    pub controller_selector: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            storcli_path: PathBuf::from("/opt/MegaRAID/storcli/storcli64"),
            controller_selector: "/call".to_string(),
        }
    }
}

const SYSTEM_CONFIG: &str = "/etc/raidcheck/config.toml";
const PASSWORD_ENV: &str = "RAIDCHECK_PASSWORD";

/// Load the system config file if it exists.
fn load_system() -> Option<toml::Value> {
    let path = Path::new(SYSTEM_CONFIG);
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Load the user config file (~/.config/raidcheck/config.toml) if it exists.
fn load_user() -> Option<toml::Value> {
    let dir = dirs::config_dir()?;
    let path = dir.join("raidcheck").join("config.toml");
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Recursively merge two TOML values. Tables are merged key-by-key;
/// all other types in `overlay` replace `base`.
fn merge_values(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_values(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load config from a specific path, ignoring system/user files.
fn load_from_path(path: &Path) -> RaidcheckConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            eprintln!(
                "warning: failed to parse config at {}: {}",
                path.display(),
                e
            );
            RaidcheckConfig::default()
        }),
        Err(e) => {
            eprintln!(
                "warning: failed to read config at {}: {}",
                path.display(),
                e
            );
            RaidcheckConfig::default()
        }
    }
}

/// Load the merged config: system defaults, then user overrides.
/// If `override_path` is provided, use only that file instead.
pub fn load(override_path: Option<&PathBuf>) -> RaidcheckConfig {
    if let Some(path) = override_path {
        return load_from_path(path);
    }

    let system = load_system();
    let user = load_user();

    let merged = match (system, user) {
        (Some(s), Some(u)) => Some(merge_values(s, u)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    };

    match merged {
        Some(value) => value.try_into().unwrap_or_else(|e| {
            eprintln!("warning: failed to deserialize config: {}", e);
            RaidcheckConfig::default()
        }),
        None => RaidcheckConfig::default(),
    }
}

impl RaidcheckConfig {
    /// A password in the environment overrides the config files.
    /// Command-line flags are applied afterwards and win.
    pub fn apply_env(&mut self) {
        if let Ok(password) = std::env::var(PASSWORD_ENV)
            && !password.is_empty()
        {
            self.connection.password = Some(password);
        }
    }

    /// Overlay command-line flags onto the merged file config.
    pub fn apply_cli(&mut self, args: &CheckArgs) {
        if let Some(ref host) = args.host {
            self.connection.host = Some(host.clone());
        }
        if let Some(port) = args.port {
            self.connection.port = port;
        }
        if let Some(ref user) = args.user {
            self.connection.user = Some(user.clone());
        }
        if let Some(ref password) = args.password {
            self.connection.password = Some(password.clone());
        }
        if let Some(ref key) = args.key {
            self.connection.key_path = Some(key.clone());
        }
        if let Some(ref storcli) = args.storcli {
            self.tool.storcli_path = storcli.clone();
        }
        if let Some(timeout) = args.timeout {
            self.connection.timeout_secs = timeout;
        }
    }
}

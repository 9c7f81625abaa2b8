use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use common::config::Validate;
use common::games::tictactoe::SearchSettings;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tictactoe_server.yaml");

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub static_files_path: PathBuf,
    pub search: SearchSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:5000".to_string(),
            static_files_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("static"),
            search: SearchSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen_address
            .parse()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_address, e))
    }
}

impl ServerConfig {
    /// Anchors a relative `static_files_path` at `base_dir`, normally the
    /// directory holding the config file.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if self.static_files_path.is_relative() {
            self.static_files_path = base_dir.join(&self.static_files_path);
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        Ok(())
    }
}

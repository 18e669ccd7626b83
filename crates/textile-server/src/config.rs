use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Runtime configuration. Precedence, lowest to highest: built-in
/// defaults, YAML config file, environment variables. A `${VAR}`
/// substitution pass runs once over string values at load time.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub upload_dir: PathBuf,
    pub file_url_prefix: String,
    pub database_path: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8080".into(),
            upload_dir: PathBuf::from("uploads"),
            file_url_prefix: "http://localhost:8080/files".into(),
            database_path: PathBuf::from("textile_admin.db"),
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    log: LogSection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    address: Option<String>,
    upload_dir: Option<String>,
    file_url_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LogSection {
    level: Option<String>,
}

impl Config {
    /// Load `configs/config.{APP_ENV}.yaml` (default env: `dev`). A
    /// missing or unreadable file is a warning, not a failure.
    pub fn load() -> Self {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".into());
        Self::load_from(Path::new(&format!("configs/config.{env}.yaml")))
    }

    pub fn load_from(path: &Path) -> Self {
        let mut cfg = Config::default();
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_yaml::from_str::<FileConfig>(&raw) {
                Ok(file) => cfg.apply_file(file),
                Err(e) => eprintln!("warning: could not parse {}: {e}", path.display()),
            },
            Err(e) => eprintln!(
                "warning: could not read {}: {e}, using defaults",
                path.display()
            ),
        }
        cfg.apply_env();
        cfg.expand_env_refs();
        cfg
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(address) = file.server.address {
            self.server_address = address;
        }
        if let Some(dir) = file.server.upload_dir {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = file.server.file_url_prefix {
            self.file_url_prefix = prefix;
        }
        if let Some(path) = file.database.path {
            self.database_path = PathBuf::from(path);
        }
        if let Some(level) = file.log.level {
            self.log_level = level;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("SERVER_ADDRESS") {
            self.server_address = val;
        }
        if let Ok(val) = std::env::var("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("FILE_URL_PREFIX") {
            self.file_url_prefix = val;
        }
        if let Ok(val) = std::env::var("DATABASE_PATH") {
            self.database_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("LOG_LEVEL") {
            self.log_level = val;
        }
    }

    fn expand_env_refs(&mut self) {
        self.server_address = expand_env_refs(&self.server_address);
        self.upload_dir = PathBuf::from(expand_env_refs(&self.upload_dir.to_string_lossy()));
        self.file_url_prefix = expand_env_refs(&self.file_url_prefix);
        self.database_path = PathBuf::from(expand_env_refs(&self.database_path.to_string_lossy()));
    }
}

/// Replace every `${VAR}` with the variable's value (empty when unset).
fn expand_env_refs(input: &str) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let name = &result[start + 2..end];
        let value = std::env::var(name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[end + 1..]);
    }
    result
}

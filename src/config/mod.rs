//! Configuration management module.
//!
//! Handles loading and saving the client configuration: the survey
//! server base URL and the persisted fingerprint identifier that lets
//! the server recognize a returning respondent.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/survey-tui";
const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Oversees management of the configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub server_url: String,
    pub fingerprint: Option<String>,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Config {
    /// Return a new instance with defaults.
    ///
    pub fn new() -> Config {
        Config {
            server_url: default_server_url(),
            fingerprint: None,
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the
    /// custom path if provided. A missing file keeps the defaults; the
    /// file is created on the first save.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        // Specify config file path
        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.server_url = data.server_url;
            self.fingerprint = data.fingerprint;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            server_url: self.server_url.clone(),
            fingerprint: self.fingerprint.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Persist a freshly generated fingerprint identifier.
    ///
    pub fn store_fingerprint(&mut self, fingerprint: String) -> Result<(), AppError> {
        self.fingerprint = Some(fingerprint);
        if self.file_path.is_none() {
            let dir_path = Config::default_path()?;
            if !dir_path.exists() {
                fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: dir_path.clone(),
                    source: e,
                })?;
            }
            self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        }
        self.save()
    }

    /// Returns the path buffer for the default path to the configuration
    /// file or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

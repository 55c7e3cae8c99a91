use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::variant::sanitize_name;
use crate::SparcedError;

/// Environment variable overriding [ModelsConfig::models_directory]
pub const MODELS_DIR_ENV: &str = "SPARCED_MODELS_DIR";

/// Where compiled models live and which one to use by default.
///
/// A model named `NAME` is expected under
/// `<models_directory>/NAME/<library_prefix>NAME/`.
///
/// [Default] gives the built-in values and does not read the environment.
/// Use [ModelsConfig::from_env] or [ModelsConfig::from_file] to honor
/// [MODELS_DIR_ENV], or apply it explicitly with
/// [ModelsConfig::with_env_override].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelsConfig {
    pub models_directory: PathBuf,
    pub default_model: String,
    pub library_prefix: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        ModelsConfig {
            models_directory: PathBuf::from("models"),
            default_model: "SPARCED_standard".to_string(),
            library_prefix: "amici_".to_string(),
        }
    }
}

impl ModelsConfig {
    /// The default configuration with [MODELS_DIR_ENV] applied
    pub fn from_env() -> Self {
        ModelsConfig::default().with_env_override()
    }

    /// Read a JSON configuration file. Missing keys keep their defaults.
    ///
    /// The default model name is stored sanitized, and [MODELS_DIR_ENV] is applied.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SparcedError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let mut config: ModelsConfig = serde_json::from_str(&contents)?;
        config.default_model = sanitize_name(&config.default_model)?;
        check_prefix(&config.library_prefix)?;
        Ok(config.with_env_override())
    }

    /// Apply [MODELS_DIR_ENV] when it is set and not empty
    pub fn with_env_override(mut self) -> Self {
        if let Ok(dir) = env::var(MODELS_DIR_ENV) {
            if !dir.is_empty() {
                tracing::debug!("Using models directory {} from {}", dir, MODELS_DIR_ENV);
                self.models_directory = PathBuf::from(dir);
            }
        }
        self
    }

    /// Directory holding the compiled artifacts of model `name`
    pub fn model_directory(&self, name: &str) -> Result<PathBuf, SparcedError> {
        let name = sanitize_name(name)?;
        check_prefix(&self.library_prefix)?;
        Ok(self
            .models_directory
            .join(&name)
            .join(format!("{}{}", self.library_prefix, name)))
    }
}

/// The prefix names a folder inside the model directory, so it may not
/// contain path separators or parent references.
fn check_prefix(prefix: &str) -> Result<(), SparcedError> {
    if prefix.contains(['/', '\\']) || prefix.contains("..") {
        return Err(SparcedError::InvalidConfig(format!(
            "library prefix '{prefix}' must not contain path separators"
        )));
    }
    Ok(())
}

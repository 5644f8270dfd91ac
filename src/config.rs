//! Display configuration loaded from `config.toml`.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MIN_COLUMN_WIDTH: usize = 3;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    display: DisplayConfig,
}

/// Widths used when printing and exporting a sheet.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub column_width: usize,
    /// Width of bars written into evaluated exports.
    pub bar_width: usize,
    pub row_header_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            column_width: 10,
            bar_width: 10,
            row_header_width: 4,
        }
    }
}

/// Load the display config from `config_file`, or from the user config dir.
///
/// Never fails: problems are returned as warnings and defaults are used.
pub fn load_config(config_file: Option<&PathBuf>) -> (DisplayConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (DisplayConfig::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (DisplayConfig::default(), warnings);
    }

    let mut config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            DisplayConfig::default()
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
                Ok(parsed) => parsed.display,
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    DisplayConfig::default()
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                DisplayConfig::default()
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            DisplayConfig::default()
        }
    };

    if config.column_width < MIN_COLUMN_WIDTH {
        warnings.push(format!(
            "column_width {} is too narrow; using {}",
            config.column_width, MIN_COLUMN_WIDTH
        ));
        config.column_width = MIN_COLUMN_WIDTH;
    }
    (config, warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tally")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

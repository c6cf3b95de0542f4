use std::fs;
use std::path::{Path, PathBuf};

use adpreview_engine::{
    PreviewSettings, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_MAX_ARCHIVE_BYTES,
};
use preview_logging::{preview_info, preview_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "adpreview.ron";

/// Settings read from `adpreview.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    pub max_archive_bytes: u64,
    pub output_dir: PathBuf,
    pub page_title: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            output_dir: PathBuf::from("preview-output"),
            page_title: "Ad Preview".to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn preview_settings(&self) -> PreviewSettings {
        PreviewSettings {
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            max_archive_bytes: self.max_archive_bytes,
        }
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
    }
}

/// Loads the config file, falling back to defaults when it is absent or invalid.
///
/// A missing file is only worth a warning when the user named it explicitly.
pub fn load_config(path: &Path, explicit: bool) -> PreviewConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if explicit {
                preview_warn!("Config file {:?} not found, using defaults", path);
            }
            return PreviewConfig::default();
        }
        Err(err) => {
            preview_warn!("Failed to read config from {:?}: {}", path, err);
            return PreviewConfig::default();
        }
    };

    match ron::from_str::<PreviewConfig>(&content) {
        Ok(config) => {
            preview_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            preview_warn!("Failed to parse config from {:?}: {}", path, err);
            PreviewConfig::default()
        }
    }
}

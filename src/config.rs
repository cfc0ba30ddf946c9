//! Startup configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file given
//! with `--config <path>`, then `PANORAMA_DIR` / `PANORAMA_LANG`, then the
//! `--dir`, `--lang` and `--frames` flags.

use crate::error::ViewerError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_DIR: &str = "kw_pano_images";
pub const DEFAULT_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub image_dir: PathBuf,
    pub lang: String,
    pub transition_frames: u32,
    pub drag_sensitivity: f32,
    pub wheel_sensitivity: f32,
    pub key_yaw_step: f32,
    /// Set when the directory came from a flag, variable or file rather than
    /// the default; the host only offers a folder picker otherwise.
    #[serde(skip)]
    pub image_dir_explicit: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            lang: DEFAULT_LANG.to_string(),
            transition_frames: crate::transition::DEFAULT_TOTAL_FRAMES,
            drag_sensitivity: 0.1,
            wheel_sensitivity: 0.1,
            key_yaw_step: crate::input::DEFAULT_KEY_YAW_STEP,
            image_dir_explicit: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ViewerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ViewerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg: Self = serde_json::from_str(&text).map_err(|source| ViewerError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.image_dir_explicit = text.contains("\"image_dir\"");
        Ok(cfg)
    }

    /// Resolves the configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self, ViewerError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::resolve(&args, |key| std::env::var(key).ok())
    }

    pub fn resolve(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ViewerError> {
        let flag = |name: &str| {
            args.iter()
                .position(|a| a == name)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let mut cfg = match flag("--config") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(dir) = flag("--dir").or_else(|| env("PANORAMA_DIR")) {
            cfg.image_dir = PathBuf::from(dir);
            cfg.image_dir_explicit = true;
        }
        if let Some(lang) = flag("--lang").or_else(|| env("PANORAMA_LANG")) {
            cfg.lang = lang;
        }
        if let Some(frames) = flag("--frames") {
            match frames.parse() {
                Ok(n) => cfg.transition_frames = n,
                Err(_) => log::warn!("ignoring invalid --frames value '{frames}'"),
            }
        }
        Ok(cfg)
    }
}

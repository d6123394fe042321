// config.rs — Courtside data layout and configuration.
//
// CourtConfig determines where the system stores its state: session
// records, event feeds, goal records, progress histories, and the
// notification log. The `for_root()` constructor generates the standard
// layout under a `.courtside/` directory; `load()` additionally merges
// overrides from an optional `courtside.toml` next to it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GoalError;
use crate::status::StatusBands;

/// Configuration for the Courtside stores and engine.
#[derive(Debug, Clone)]
pub struct CourtConfig {
    /// Root directory the `.courtside/` layout hangs off.
    pub root: PathBuf,

    /// Directory for session records (one JSON file per session).
    pub sessions_dir: PathBuf,

    /// Directory for event feeds (one JSONL file per session).
    pub events_dir: PathBuf,

    /// Directory for goal records (one JSON file per goal).
    pub goals_dir: PathBuf,

    /// Directory for progress histories (one JSONL file per goal).
    pub progress_dir: PathBuf,

    /// Path to the append-only notification log.
    pub notifications_log: PathBuf,

    /// Status band thresholds used by classification.
    pub bands: StatusBands,
}

/// Shape of the optional `courtside.toml` file. All fields optional so a
/// deployment can override just one threshold.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    bands: BandOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct BandOverrides {
    on_track_ratio: Option<f64>,
    at_risk_ratio: Option<f64>,
    exact_tolerance: Option<f64>,
}

impl CourtConfig {
    /// Create a config with the standard `.courtside/` layout for a root
    /// directory, using default status bands.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let data_dir = root.join(".courtside");
        Self {
            sessions_dir: data_dir.join("sessions"),
            events_dir: data_dir.join("events"),
            goals_dir: data_dir.join("goals"),
            progress_dir: data_dir.join("progress"),
            notifications_log: data_dir.join("notifications.jsonl"),
            bands: StatusBands::default(),
            root,
        }
    }

    /// Like `for_root`, but merges band overrides from `courtside.toml`
    /// in the root directory when the file exists. A malformed file is an
    /// error rather than a silent fallback to defaults.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, GoalError> {
        let mut config = Self::for_root(&root);
        let config_path = root.as_ref().join("courtside.toml");

        if config_path.exists() {
            let raw = fs::read_to_string(&config_path).map_err(|source| GoalError::IoError {
                path: config_path.display().to_string(),
                source,
            })?;
            let file: ConfigFile =
                toml::from_str(&raw).map_err(|e| GoalError::InvalidConfig {
                    path: config_path.display().to_string(),
                    reason: e.to_string(),
                })?;

            if let Some(v) = file.bands.on_track_ratio {
                config.bands.on_track_ratio = v;
            }
            if let Some(v) = file.bands.at_risk_ratio {
                config.bands.at_risk_ratio = v;
            }
            if let Some(v) = file.bands.exact_tolerance {
                config.bands.exact_tolerance = v;
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{DEFAULT_AT_RISK_RATIO, DEFAULT_ON_TRACK_RATIO};
    use tempfile::tempdir;

    #[test]
    fn for_root_lays_out_courtside_dir() {
        let config = CourtConfig::for_root("/srv/team");
        assert_eq!(
            config.sessions_dir,
            PathBuf::from("/srv/team/.courtside/sessions")
        );
        assert_eq!(
            config.notifications_log,
            PathBuf::from("/srv/team/.courtside/notifications.jsonl")
        );
        assert_eq!(config.bands.on_track_ratio, DEFAULT_ON_TRACK_RATIO);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = CourtConfig::load(dir.path()).unwrap();
        assert_eq!(config.bands.at_risk_ratio, DEFAULT_AT_RISK_RATIO);
    }

    #[test]
    fn load_merges_partial_band_overrides() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("courtside.toml"),
            "[bands]\non_track_ratio = 0.9\n",
        )
        .unwrap();

        let config = CourtConfig::load(dir.path()).unwrap();
        assert_eq!(config.bands.on_track_ratio, 0.9);
        // Untouched fields keep their defaults.
        assert_eq!(config.bands.at_risk_ratio, DEFAULT_AT_RISK_RATIO);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("courtside.toml"), "bands = \"not a table\"").unwrap();

        assert!(matches!(
            CourtConfig::load(dir.path()),
            Err(GoalError::InvalidConfig { .. })
        ));
    }
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use quickopen_core::{CoordinatorTiming, QuickOpenSettings};
use quickopen_logging::{qo_error, qo_info, qo_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

pub(crate) const SETTINGS_FILENAME: &str = "settings.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct PersistedSettings {
    relative_search: bool,
    excludes: Vec<String>,
    exclude_paths: Vec<String>,
    max_load: u32,
    min_interval_ms: u64,
    settle_delay_ms: u64,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::from_parts(&QuickOpenSettings::default(), CoordinatorTiming::default())
    }
}

impl PersistedSettings {
    fn from_parts(settings: &QuickOpenSettings, timing: CoordinatorTiming) -> Self {
        Self {
            relative_search: settings.relative_search,
            excludes: settings.excludes.clone(),
            exclude_paths: settings.exclude_paths.clone(),
            max_load: settings.max_load,
            min_interval_ms: duration_millis(timing.min_interval),
            settle_delay_ms: duration_millis(timing.settle_delay),
        }
    }

    fn into_stored(self) -> StoredSettings {
        StoredSettings {
            settings: QuickOpenSettings {
                relative_search: self.relative_search,
                excludes: self.excludes,
                exclude_paths: self.exclude_paths,
                max_load: self.max_load,
            },
            timing: CoordinatorTiming {
                min_interval: Duration::from_millis(self.min_interval_ms),
                settle_delay: Duration::from_millis(self.settle_delay_ms),
            },
        }
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct StoredSettings {
    pub(crate) settings: QuickOpenSettings,
    pub(crate) timing: CoordinatorTiming,
}

/// `settings.ron` under the platform config directory.
pub(crate) fn default_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "quickopen", "quickopen")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
}

/// Loads settings, falling back to defaults when the file is missing or broken.
///
/// A missing file is created with the defaults so users have something to edit.
pub(crate) fn load_settings(path: &Path) -> StoredSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let stored = StoredSettings::default();
            if let Err(err) = save_settings(path, &stored) {
                qo_warn!("Failed to write default settings to {:?}: {:#}", path, err);
            }
            return stored;
        }
        Err(err) => {
            qo_warn!("Failed to read settings from {:?}: {}", path, err);
            return StoredSettings::default();
        }
    };

    match ron::from_str::<PersistedSettings>(&content) {
        Ok(persisted) => {
            qo_info!("Loaded settings from {:?}", path);
            persisted.into_stored()
        }
        Err(err) => {
            qo_error!("Failed to parse settings from {:?}: {}", path, err);
            StoredSettings::default()
        }
    }
}

/// Atomically writes settings by writing a temp file next to `path` then renaming.
pub(crate) fn save_settings(path: &Path, stored: &StoredSettings) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let persisted = PersistedSettings::from_parts(&stored.settings, stored.timing);
    let content = ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::new())
        .context("serializing settings")?;

    let mut tmp = NamedTempFile::new_in(dir).context("creating temp file")?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

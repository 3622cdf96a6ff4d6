use crate::pet::PetType;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub grant_every_ticks: u64,
    pub autosave_secs: u64,
    pub pet_name: String,
    pub pet_type: PetType,
    pub enable_color: bool,
    /// Parental time limit, applied to every session.
    pub time_limit_enabled: bool,
    pub time_limit_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            grant_every_ticks: 20,
            autosave_secs: 10,
            pet_name: "Mochi".to_string(),
            pet_type: PetType::Kitten,
            enable_color: true,
            time_limit_enabled: false,
            time_limit_minutes: 60,
        }
    }
}

impl Settings {
    /// Tick interval, floored so a bad settings file cannot spin the loop.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.max(50)
    }
}

pub struct Paths {
    pub save_path: PathBuf,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

impl Paths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            save_path: dir.join("save.json"),
            settings_path: dir.join("settings.json"),
            log_path: dir.join("termipet.log"),
        }
    }
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "termipet", "Termipet")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("could not create data directory {}", dir.display()))?;
    Ok(Paths::in_dir(&dir))
}

pub fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "unreadable settings, using defaults");
            Settings::default()
        }
    }
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename over an existing file fails on Windows
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
        .with_context(|| format!("renaming {} to {}", from.display(), to.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::in_dir(dir.path());
        assert_eq!(load_settings(&paths.settings_path), Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::in_dir(dir.path());
        fs::write(&paths.settings_path, "{ not json").unwrap();
        assert_eq!(load_settings(&paths.settings_path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::in_dir(dir.path());
        fs::write(&paths.settings_path, r#"{"pet_type":"Dragon","tick_interval_ms":5}"#).unwrap();
        let s = load_settings(&paths.settings_path);
        assert_eq!(s.pet_type, PetType::Dragon);
        assert_eq!(s.tick_interval_ms(), 50);
        assert_eq!(s.pet_name, "Mochi");
    }

    #[test]
    fn test_time_limit_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::in_dir(dir.path());
        assert!(!load_settings(&paths.settings_path).time_limit_enabled);

        fs::write(
            &paths.settings_path,
            r#"{"time_limit_enabled":true,"time_limit_minutes":15}"#,
        )
        .unwrap();
        let s = load_settings(&paths.settings_path);
        assert!(s.time_limit_enabled);
        assert_eq!(s.time_limit_minutes, 15);
        assert_eq!(s.pet_name, "Mochi");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::in_dir(dir.path());
        let s = Settings {
            pet_name: "Pip".into(),
            enable_color: false,
            ..Settings::default()
        };
        save_settings_atomic(&paths.settings_path, &s).unwrap();
        save_settings_atomic(&paths.settings_path, &s).unwrap();
        assert_eq!(load_settings(&paths.settings_path), s);
        assert!(!paths.settings_path.with_extension("json.tmp").exists());
    }
}

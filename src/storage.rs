//! JSON save files, written to a temp file and renamed into place.

use crate::config::atomic_rename;
use crate::config::Settings;
use crate::error::PetError;
use crate::model::{GameState, SaveFile};
use crate::pet::Pet;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::{fs, path::Path};

/// Loads the saved game, or builds a fresh one from `settings` when there
/// is no usable save. The second value is when the save was last written.
pub fn load_or_init_save(
    path: &Path,
    settings: &Settings,
) -> Result<(GameState, Option<DateTime<Utc>>)> {
    if let Ok(s) = fs::read_to_string(path) {
        match serde_json::from_str::<SaveFile>(&s) {
            Ok(save) => return Ok((save.state, Some(save.last_seen_utc))),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "unreadable save, starting a new game")
            }
        }
    }
    Ok((new_game(settings)?, None))
}

pub fn new_game(settings: &Settings) -> Result<GameState, PetError> {
    let pet = Pet::new(&settings.pet_name, settings.pet_type)?;
    Ok(GameState::new(pet))
}

pub fn save_atomic(path: &Path, save: &SaveFile) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(save)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

//! Durable key/value storage and profile persistence.
//!
//! The profile is stored as a single JSON record under [`PROFILE_KEY`],
//! always in metric form. It is written when the user finalizes the profile
//! and read once at startup.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AinaError, Result};
use crate::profile::UserProfile;
use crate::units::{self, UnitSystem, WeightPolicy};

/// Key under which the profile record is stored.
pub const PROFILE_KEY: &str = "aina_profile";

/// A string key/value store.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AinaError::invalid_param("key", key, "must be [A-Za-z0-9_-]+"));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Persist a profile in its canonical metric form.
///
/// Values are stored unrounded, so [`load_profile`] with the same units and
/// `policy` reproduces every field. Under [`WeightPolicy::Keep`] the weight
/// number is stored as entered.
pub fn save_profile<S: Storage + ?Sized>(
    storage: &mut S,
    profile: &UserProfile,
    policy: WeightPolicy,
) -> Result<()> {
    let metric = profile.canonical_with(policy);
    let json = serde_json::to_string(&metric)?;
    storage.set(PROFILE_KEY, &json)?;
    log::info!("Saved profile ({} {})", metric.gender, profile.unit_system);
    Ok(())
}

/// Load the stored profile, expressed in `display_units`.
///
/// Returns the default profile when nothing is stored. A record that cannot
/// be parsed is logged, removed, and replaced by the default profile.
pub fn load_profile<S: Storage + ?Sized>(
    storage: &mut S,
    display_units: UnitSystem,
    policy: WeightPolicy,
) -> Result<UserProfile> {
    let profile = match storage.get(PROFILE_KEY)? {
        None => UserProfile::default(),
        Some(json) => match serde_json::from_str::<UserProfile>(&json) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("Discarding corrupt stored profile: {}", e);
                storage.remove(PROFILE_KEY)?;
                UserProfile::default()
            }
        },
    };
    Ok(units::express_profile(&profile, display_units, policy))
}

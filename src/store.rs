use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{error, info};
use thiserror::Error;

/// User id (decimal string) -> premium flag. Absence means "not premium".
pub type PremiumRegistry = BTreeMap<String, bool>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("premium file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("premium file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat-file premium registry.
///
/// Every read goes to disk and every mutation rewrites the whole file. There is
/// no locking: two mutations racing on the file resolve as last writer wins.
#[derive(Debug, Clone)]
pub struct PremiumStore {
    path: PathBuf,
}

impl PremiumStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PremiumStore { path: path.into() }
    }

    #[cfg(test)]
    fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing or unreadable file is an empty registry.
    pub fn load(&self) -> PremiumRegistry {
        match read_registry(&self.path) {
            Ok(registry) => registry,
            Err(e) => {
                error!("Error loading premium data from {}: {e}", self.path.display());
                PremiumRegistry::new()
            }
        }
    }

    /// Overwrites the file with `registry`. Write errors are logged and swallowed.
    pub fn save(&self, registry: &PremiumRegistry) {
        if let Err(e) = write_registry(&self.path, registry) {
            error!("Error saving premium data to {}: {e}", self.path.display());
        }
    }

    pub fn is_premium(&self, user_id: &str) -> bool {
        self.load().get(user_id).copied().unwrap_or_default()
    }

    pub fn grant(&self, user_id: &str) {
        let mut registry = self.load();
        registry.insert(user_id.to_string(), true);
        self.save(&registry);
        info!("user {user_id} granted premium");
    }

    pub fn revoke(&self, user_id: &str) {
        let mut registry = self.load();
        registry.remove(user_id);
        self.save(&registry);
        info!("user {user_id} revoked premium");
    }
}

fn read_registry(path: &Path) -> Result<PremiumRegistry, StoreError> {
    if !path.exists() {
        return Ok(PremiumRegistry::new());
    }

    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_registry(path: &Path, registry: &PremiumRegistry) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(registry)?;
    fs::write(path, json)?;
    Ok(())
}

//! Save and restore of the aquarium on disk.

use aquarium_core::{Error, Result};
use aquarium_world::{staging_path, Aquarium, AquariumRecord};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the aquarium, replacing the previous save only once the new one is complete
    pub async fn save(&self, aquarium: &Aquarium) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = aquarium.to_json()?;
        let tmp = staging_path(&self.path);
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &self.path).await?;

        info!(
            path = ?self.path,
            fish = aquarium.len(),
            cleanliness = aquarium.cleanliness(),
            "Aquarium saved"
        );
        Ok(())
    }

    /// Load the saved aquarium. `Ok(None)` when there is no save yet.
    pub async fn load(&self, rng: ChaCha8Rng) -> Result<Option<Aquarium>> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        let record = AquariumRecord::from_json(&json)?;
        let aquarium = Aquarium::from_record(record, rng)?;

        info!(
            path = ?self.path,
            fish = aquarium.len(),
            cleanliness = aquarium.cleanliness(),
            "Aquarium loaded"
        );
        Ok(Some(aquarium))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquarium_core::Status;
    use rand::SeedableRng;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("aquarium-sim-store-{}", std::process::id()))
            .join(name)
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = SaveStore::new(temp_path("roundtrip.json"));

        let mut aquarium = Aquarium::seeded(7);
        aquarium.add_default_fish().set_name("Penny");
        aquarium.add_fish_with(2, 15, Status::Dead, 3).unwrap();
        aquarium.tick();

        store.save(&aquarium).await.unwrap();
        let loaded = store
            .load(ChaCha8Rng::seed_from_u64(1))
            .await
            .unwrap()
            .expect("save should exist");

        assert_eq!(loaded.to_record(), aquarium.to_record());
        assert!(!staging_path(store.path()).exists());
        let _ = fs::remove_file(store.path()).await;
    }

    #[tokio::test]
    async fn test_load_without_save() {
        let store = SaveStore::new(temp_path("never-written.json"));
        let loaded = store.load(ChaCha8Rng::seed_from_u64(1)).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_load_corrupted_save() {
        let path = temp_path("corrupted.json");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, r#"{ "cleanliness": 99, "fishList": [] }"#)
            .await
            .unwrap();

        let store = SaveStore::new(&path);
        let result = store.load(ChaCha8Rng::seed_from_u64(1)).await;
        assert!(matches!(result, Err(Error::InvalidAquariumCleanliness(99))));
        let _ = fs::remove_file(&path).await;
    }
}

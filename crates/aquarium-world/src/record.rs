//! Persisted form of an aquarium.
//!
//! Only the lifecycle state is stored. Position, direction and speed are
//! regenerated when a record is turned back into an aquarium.

use crate::aquarium::Aquarium;
use crate::fish::Fish;
use aquarium_core::Result;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// 0 = dead, 1 = alive
    pub status: i32,
    pub hunger_level: i32,
    pub growth_timer: i32,
    pub size: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AquariumRecord {
    #[serde(alias = "cleanness")]
    pub cleanliness: i32,
    #[serde(default)]
    pub fish_list: Vec<FishRecord>,
}

impl From<&Fish> for FishRecord {
    fn from(fish: &Fish) -> Self {
        Self {
            name: fish.name().map(str::to_string),
            status: fish.status().code(),
            hunger_level: fish.hunger(),
            growth_timer: fish.growth_timer(),
            size: fish.size(),
        }
    }
}

impl From<&Aquarium> for AquariumRecord {
    fn from(aquarium: &Aquarium) -> Self {
        Self {
            cleanliness: aquarium.cleanliness(),
            fish_list: aquarium.fish().iter().map(FishRecord::from).collect(),
        }
    }
}

impl AquariumRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Aquarium {
    pub fn to_record(&self) -> AquariumRecord {
        AquariumRecord::from(self)
    }

    /// Rebuild an aquarium from its record.
    ///
    /// Every fish goes through the validating constructor, so a corrupt record
    /// fails with the same errors as direct construction.
    pub fn from_record(record: AquariumRecord, rng: ChaCha8Rng) -> Result<Self> {
        let mut aquarium = Aquarium::from_parts(record.cleanliness, rng)?;

        for fish in record.fish_list {
            let fish = Fish::from_status_code(
                fish.size,
                fish.hunger_level,
                fish.status,
                fish.growth_timer,
                fish.name,
                aquarium.rng_mut(),
            )?;
            aquarium.add_fish(fish);
        }

        Ok(aquarium)
    }

    pub fn to_json(&self) -> Result<String> {
        self.to_record().to_json()
    }

    pub fn from_json(json: &str, rng: ChaCha8Rng) -> Result<Self> {
        Self::from_record(AquariumRecord::from_json(json)?, rng)
    }
}

/// Sibling file a save is written to before it is renamed over `path`
pub fn staging_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

/// Blocking save for callers without a runtime. The simulator saves through
/// its async store, which uses the same staging file.
pub fn save_to_path(aquarium: &Aquarium, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = staging_path(path);
    fs::write(&tmp, aquarium.to_json()?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Blocking counterpart of [`save_to_path`]
pub fn load_from_path(path: &Path, rng: ChaCha8Rng) -> Result<Aquarium> {
    let json = fs::read_to_string(path)?;
    Aquarium::from_json(&json, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquarium_core::{Error, Status};
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("aquarium-world-{}", std::process::id()))
            .join(name)
    }

    fn penny_tank() -> Aquarium {
        let mut aquarium = Aquarium::from_parts(17, rng(1)).unwrap();
        aquarium.add_fish_with(3, 4, Status::Alive, 12).unwrap();
        aquarium.last_fish_mut().unwrap().set_name("Penny");
        aquarium.add_fish_with(5, 15, Status::Dead, 0).unwrap();
        aquarium
    }

    #[test]
    fn test_record_fields() {
        let record = penny_tank().to_record();
        assert_eq!(record.cleanliness, 17);
        assert_eq!(
            record.fish_list,
            vec![
                FishRecord {
                    name: Some("Penny".to_string()),
                    status: 1,
                    hunger_level: 4,
                    growth_timer: 12,
                    size: 3,
                },
                FishRecord {
                    name: None,
                    status: 0,
                    hunger_level: 15,
                    growth_timer: 0,
                    size: 5,
                },
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = penny_tank().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["cleanliness"], 17);
        assert_eq!(value["fishList"][0]["name"], "Penny");
        assert_eq!(value["fishList"][0]["hungerLevel"], 4);
        assert_eq!(value["fishList"][0]["growthTimer"], 12);
        assert!(value["fishList"][1]["name"].is_null());
        assert_eq!(value["fishList"][1]["status"], 0);
    }

    #[test]
    fn test_round_trip() {
        let tank = penny_tank();
        let json = tank.to_json().unwrap();
        let decoded = Aquarium::from_json(&json, rng(99)).unwrap();

        assert_eq!(decoded.cleanliness(), tank.cleanliness());
        assert_eq!(decoded.len(), 2);
        for (a, b) in tank.fish().iter().zip(decoded.fish()) {
            assert_eq!(a.status(), b.status());
            assert_eq!(a.hunger(), b.hunger());
            assert_eq!(a.growth_timer(), b.growth_timer());
            assert_eq!(a.size(), b.size());
            assert_eq!(a.name(), b.name());

            let pos = b.position();
            assert!((0.0..=1.0).contains(&pos.x));
            assert!((0.0..=1.0).contains(&pos.y));
        }
    }

    #[test]
    fn test_legacy_cleanness_key() {
        let json = r#"{ "cleanness": 30, "fishList": [] }"#;
        let aquarium = Aquarium::from_json(json, rng(2)).unwrap();
        assert_eq!(aquarium.cleanliness(), 30);
        assert!(aquarium.is_empty());
    }

    #[test]
    fn test_missing_name_decodes_as_unnamed() {
        let json = r#"{
            "cleanliness": 20,
            "fishList": [{ "status": 1, "hungerLevel": 2, "growthTimer": 50, "size": 1 }]
        }"#;
        let aquarium = Aquarium::from_json(json, rng(2)).unwrap();
        assert!(aquarium.last_fish().unwrap().name().is_none());
    }

    #[test]
    fn test_decoded_extreme_fish_survive_ticks() {
        let json = r#"{
            "cleanliness": 20,
            "fishList": [
                { "status": 1, "hungerLevel": 2147483647, "growthTimer": 50, "size": 1 },
                { "status": 1, "hungerLevel": 0, "growthTimer": 1, "size": 2147483647 }
            ]
        }"#;
        let mut aquarium = Aquarium::from_json(json, rng(2)).unwrap();

        let report = aquarium.tick();
        assert_eq!(report.starved, 1);
        assert_eq!(report.grown, 1);
        assert_eq!(aquarium.fish()[0].hunger(), i32::MAX);
        assert_eq!(aquarium.fish()[1].size(), i32::MAX);

        aquarium.tick();
        assert_eq!(aquarium.fish()[1].hunger(), 2);
    }

    #[test]
    fn test_decode_rejects_bad_cleanliness() {
        let json = r#"{ "cleanliness": 45, "fishList": [] }"#;
        assert!(matches!(
            Aquarium::from_json(json, rng(2)),
            Err(Error::InvalidAquariumCleanliness(45))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_fish() {
        let json = r#"{
            "cleanliness": 20,
            "fishList": [{ "name": null, "status": 4, "hungerLevel": 2, "growthTimer": 50, "size": 1 }]
        }"#;
        assert!(matches!(
            Aquarium::from_json(json, rng(2)),
            Err(Error::InvalidFishParameters(_))
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(
            Aquarium::from_json("{ \"cleanliness\": ", rng(2)),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save_and_load/aquarium.json");
        let tank = penny_tank();

        save_to_path(&tank, &path).unwrap();
        let loaded = load_from_path(&path, rng(3)).unwrap();
        assert_eq!(loaded.to_record(), tank.to_record());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("missing/aquarium.json");
        assert!(matches!(load_from_path(&path, rng(3)), Err(Error::Io(_))));
    }
}

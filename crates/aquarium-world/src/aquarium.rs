//! The aquarium: a tank with a cleanliness level and an ordered list of fish.

use crate::fish::{Fish, TickOutcome};
use aquarium_core::{Error, Result, Status, MAX_CLEANLINESS, MIN_CLEANLINESS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Aquarium {
    cleanliness: i32,
    fish: Vec<Fish>,
    rng: ChaCha8Rng,
}

/// Summary of one aquarium tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub cleanliness: i32,
    pub grown: usize,
    pub starved: usize,
}

/// Point-in-time statistics over the tank
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TankStats {
    pub cleanliness: i32,
    pub total_fish: usize,
    pub alive: usize,
    pub dead: usize,
    pub avg_hunger: f64,
    pub avg_size: f64,
    pub max_size: i32,
}

impl Aquarium {
    /// A clean, empty tank with an entropy-seeded random source
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// A clean, empty tank with a deterministic random source
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            cleanliness: MAX_CLEANLINESS,
            fish: Vec::new(),
            rng,
        }
    }

    pub fn with_cleanliness(cleanliness: i32) -> Result<Self> {
        Self::from_parts(cleanliness, ChaCha8Rng::from_entropy())
    }

    /// An empty tank with the given cleanliness and random source
    pub fn from_parts(cleanliness: i32, rng: ChaCha8Rng) -> Result<Self> {
        if !(MIN_CLEANLINESS..=MAX_CLEANLINESS).contains(&cleanliness) {
            return Err(Error::InvalidAquariumCleanliness(cleanliness));
        }

        Ok(Self {
            cleanliness,
            fish: Vec::new(),
            rng,
        })
    }

    pub fn cleanliness(&self) -> i32 {
        self.cleanliness
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn fish_mut(&mut self, index: usize) -> Option<&mut Fish> {
        self.fish.get_mut(index)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    pub fn has_any_alive(&self) -> bool {
        self.fish.iter().any(|fish| fish.is_alive())
    }

    pub fn has_any_dead(&self) -> bool {
        self.fish.iter().any(|fish| fish.status() == Status::Dead)
    }

    pub fn alive_count(&self) -> usize {
        self.fish.iter().filter(|fish| fish.is_alive()).count()
    }

    pub fn dead_count(&self) -> usize {
        self.fish.len() - self.alive_count()
    }

    /// The most recently added fish, if any
    pub fn last_fish(&self) -> Option<&Fish> {
        self.fish.last()
    }

    pub fn last_fish_mut(&mut self) -> Option<&mut Fish> {
        self.fish.last_mut()
    }

    pub fn add_fish(&mut self, fish: Fish) {
        self.fish.push(fish);
    }

    /// Add a new default fish (size 1, hunger 2, alive, full growth timer, unnamed)
    pub fn add_default_fish(&mut self) -> &mut Fish {
        let fish = Fish::hatchling(&mut self.rng);
        self.fish.push(fish);
        let last = self.fish.len() - 1;
        &mut self.fish[last]
    }

    /// Construct an unnamed fish with explicit parameters and add it
    pub fn add_fish_with(
        &mut self,
        size: i32,
        hunger: i32,
        status: Status,
        growth_timer: i32,
    ) -> Result<()> {
        let fish = Fish::new(size, hunger, status, growth_timer, None, &mut self.rng)?;
        self.fish.push(fish);
        Ok(())
    }

    /// Advance the tank by one lifecycle tick: the water gets dirtier and every
    /// fish gets hungrier.
    pub fn tick(&mut self) -> TickReport {
        self.cleanliness = (self.cleanliness - 1).max(MIN_CLEANLINESS);

        let mut report = TickReport {
            cleanliness: self.cleanliness,
            ..Default::default()
        };

        for (index, fish) in self.fish.iter_mut().enumerate() {
            match fish.tick() {
                TickOutcome::Starved => {
                    report.starved += 1;
                    debug!(
                        event = "fish_starved",
                        index = index,
                        name = fish.name().unwrap_or("none"),
                        size = fish.size(),
                        "Fish starved"
                    );
                }
                TickOutcome::Grew => {
                    report.grown += 1;
                    debug!(
                        event = "fish_grew",
                        index = index,
                        name = fish.name().unwrap_or("none"),
                        size = fish.size(),
                        "Fish grew"
                    );
                }
                TickOutcome::Aged | TickOutcome::Unchanged => {}
            }
        }

        report
    }

    pub fn feed_all(&mut self) {
        for fish in &mut self.fish {
            fish.feed();
        }
    }

    /// Refill the tank with clean water and discard dead fish.
    ///
    /// Returns the number of fish removed. Survivors keep their relative order.
    pub fn clean(&mut self) -> usize {
        self.cleanliness = MAX_CLEANLINESS;

        let before = self.fish.len();
        self.fish = std::mem::take(&mut self.fish)
            .into_iter()
            .filter(|fish| fish.is_alive())
            .collect();
        let removed = before - self.fish.len();

        if removed > 0 {
            debug!(event = "dead_fish_removed", removed = removed, "Cleaned tank");
        }
        removed
    }

    /// Advance every fish by one motion step
    pub fn update_coordinates(&mut self) {
        for fish in &mut self.fish {
            fish.update_coordinate(&mut self.rng);
        }
    }

    pub fn stats(&self) -> TankStats {
        let total_fish = self.fish.len();
        let alive = self.alive_count();

        let (avg_hunger, avg_size) = if total_fish > 0 {
            let hunger: i64 = self.fish.iter().map(|f| f.hunger() as i64).sum();
            let size: i64 = self.fish.iter().map(|f| f.size() as i64).sum();
            (
                hunger as f64 / total_fish as f64,
                size as f64 / total_fish as f64,
            )
        } else {
            (0.0, 0.0)
        };

        TankStats {
            cleanliness: self.cleanliness,
            total_fish,
            alive,
            dead: total_fish - alive,
            avg_hunger,
            avg_size,
            max_size: self.fish.iter().map(|f| f.size()).max().unwrap_or(0),
        }
    }
}

impl Default for Aquarium {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Aquarium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Aquarium numFish={} cleanliness={}",
            self.fish.len(),
            self.cleanliness
        )?;
        for fish in &self.fish {
            write!(f, "\n{}", fish)?;
        }
        Ok(())
    }
}

//! Drives the aquarium in real time: lifecycle ticks, motion updates and autosaves.

use crate::store::SaveStore;
use anyhow::Result;
use aquarium_core::DriverConfig;
use aquarium_world::{Aquarium, TickReport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::future::Future;
use tokio::time::{interval, interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

pub struct Driver {
    config: DriverConfig,
    store: SaveStore,
    aquarium: Aquarium,
    ticks: u64,
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl Driver {
    /// Restore the saved aquarium, or start a fresh one if there is none or it is unreadable
    pub async fn load(config: DriverConfig) -> Self {
        let store = SaveStore::new(&config.save_path);

        let mut aquarium = match store.load(make_rng(config.seed)).await {
            Ok(Some(aquarium)) => aquarium,
            Ok(None) => {
                info!(path = ?store.path(), "No save found, starting a new aquarium");
                Aquarium::with_rng(make_rng(config.seed))
            }
            Err(e) => {
                warn!(path = ?store.path(), "Corrupted save ({}), starting a new aquarium", e);
                Aquarium::with_rng(make_rng(config.seed))
            }
        };

        if aquarium.is_empty() && config.initial_fish > 0 {
            for _ in 0..config.initial_fish {
                aquarium.add_default_fish();
            }
            info!(count = config.initial_fish, "Stocked empty aquarium");
        }

        Self {
            config,
            store,
            aquarium,
            ticks: 0,
        }
    }

    pub fn aquarium(&self) -> &Aquarium {
        &self.aquarium
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one lifecycle tick
    pub fn step(&mut self) -> TickReport {
        let report = self.aquarium.tick();
        self.ticks += 1;

        if report.starved > 0 {
            info!(
                event = "starvation",
                tick = self.ticks,
                starved = report.starved,
                "Fish starved this tick"
            );
        }

        if self.config.metrics_every_ticks > 0 && self.ticks % self.config.metrics_every_ticks == 0 {
            self.emit_tank_metrics();
        }

        report
    }

    fn emit_tank_metrics(&self) {
        let stats = self.aquarium.stats();

        info!(
            event = "tank_metrics",
            tick = self.ticks,
            cleanliness = stats.cleanliness,
            total_fish = stats.total_fish,
            alive = stats.alive,
            dead = stats.dead,
            avg_hunger = format!("{:.2}", stats.avg_hunger),
            avg_size = format!("{:.2}", stats.avg_size),
            max_size = stats.max_size,
            "Tank metrics snapshot"
        );

        crate::record_gauge!("fish_alive", stats.alive, tick => self.ticks);
        crate::record_gauge!("cleanliness", stats.cleanliness, tick => self.ticks);
    }

    /// Run until `shutdown` resolves or `max_ticks` lifecycle ticks have passed,
    /// then save and hand back the aquarium.
    pub async fn run<F>(mut self, shutdown: F) -> Result<Aquarium>
    where
        F: Future<Output = ()>,
    {
        let tick_period = Duration::from_millis(self.config.tick_interval_ms.max(1));
        let motion_period = Duration::from_millis(self.config.motion_interval_ms.max(1));
        let autosave_period = Duration::from_secs(self.config.autosave_interval_secs.max(1));

        let mut lifecycle = interval_at(Instant::now() + tick_period, tick_period);
        let mut motion = interval(motion_period);
        motion.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut autosave = interval_at(Instant::now() + autosave_period, autosave_period);

        tokio::pin!(shutdown);

        info!(
            fish = self.aquarium.len(),
            cleanliness = self.aquarium.cleanliness(),
            tick_interval_ms = self.config.tick_interval_ms,
            motion_interval_ms = self.config.motion_interval_ms,
            "Starting aquarium"
        );

        loop {
            tokio::select! {
                _ = lifecycle.tick() => {
                    self.step();
                    if let Some(max_ticks) = self.config.max_ticks {
                        if self.ticks >= max_ticks {
                            info!("Reached {} ticks", max_ticks);
                            break;
                        }
                    }
                }
                _ = motion.tick() => {
                    self.aquarium.update_coordinates();
                }
                _ = autosave.tick() => {
                    if let Err(e) = self.store.save(&self.aquarium).await {
                        error!("Autosave failed: {}", e);
                    }
                }
                _ = &mut shutdown => {
                    info!("Stopping aquarium");
                    break;
                }
            }
        }

        self.store.save(&self.aquarium).await?;
        self.emit_tank_metrics();
        info!(ticks = self.ticks(), "Aquarium stopped");

        Ok(self.aquarium)
    }
}

//! Aquarium simulation engine.
//!
//! This module implements the fish lifecycle, the tank that owns them, and the
//! record the tank is saved as.

pub mod fish;
pub mod aquarium;
pub mod record;

pub use fish::{Fish, TickOutcome};
pub use aquarium::{Aquarium, TankStats, TickReport};
pub use record::{load_from_path, save_to_path, staging_path, AquariumRecord, FishRecord};

#[cfg(test)]
mod proptests {
    use super::*;
    use aquarium_core::{
        Status, FISH_MAX_SIZE, FISH_MIN_HUNGER, FISH_MIN_SIZE, MAX_CLEANLINESS, MIN_CLEANLINESS,
    };
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Debug, Clone)]
    enum Op {
        Tick,
        Feed,
        Clean,
        AddDefault,
        Swim,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Tick),
            2 => Just(Op::Feed),
            1 => Just(Op::Clean),
            1 => Just(Op::AddDefault),
            2 => Just(Op::Swim),
        ]
    }

    proptest! {
        #[test]
        fn tank_invariants_hold(
            seed in any::<u64>(),
            cleanliness in MIN_CLEANLINESS..=MAX_CLEANLINESS,
            stock in proptest::collection::vec(
                (FISH_MIN_SIZE..=i32::MAX, FISH_MIN_HUNGER..=i32::MAX, any::<bool>(), 0..=i32::MAX),
                0..5,
            ),
            ops in proptest::collection::vec(op(), 0..300),
        ) {
            let mut aquarium =
                Aquarium::from_parts(cleanliness, ChaCha8Rng::seed_from_u64(seed)).unwrap();
            aquarium.add_default_fish();
            for (size, hunger, alive, timer) in stock {
                let status = if alive { Status::Alive } else { Status::Dead };
                aquarium.add_fish_with(size, hunger, status, timer).unwrap();
            }

            for op in ops {
                let before: Vec<(Status, i32)> =
                    aquarium.fish().iter().map(|f| (f.status(), f.size())).collect();

                match op {
                    Op::Tick => { aquarium.tick(); }
                    Op::Feed => aquarium.feed_all(),
                    Op::Clean => {
                        aquarium.clean();
                        prop_assert!(!aquarium.has_any_dead());
                        prop_assert_eq!(aquarium.cleanliness(), MAX_CLEANLINESS);
                        continue;
                    }
                    Op::AddDefault => { aquarium.add_default_fish(); }
                    Op::Swim => aquarium.update_coordinates(),
                }

                prop_assert!((MIN_CLEANLINESS..=MAX_CLEANLINESS).contains(&aquarium.cleanliness()));

                for (fish, (status, size)) in aquarium.fish().iter().zip(before) {
                    prop_assert!(fish.hunger() >= FISH_MIN_HUNGER);
                    prop_assert!(fish.growth_timer() >= 0);
                    prop_assert!(fish.size() >= FISH_MIN_SIZE);
                    prop_assert!(fish.size() >= size);
                    if size < FISH_MAX_SIZE {
                        prop_assert!(fish.size() <= FISH_MAX_SIZE);
                    }
                    if status == Status::Dead {
                        prop_assert_eq!(fish.status(), Status::Dead);
                        prop_assert_eq!(fish.size(), size);
                    }
                    let pos = fish.position();
                    prop_assert!((0.0..=1.0).contains(&pos.x));
                    prop_assert!((0.0..=1.0).contains(&pos.y));
                }
            }
        }
    }
}

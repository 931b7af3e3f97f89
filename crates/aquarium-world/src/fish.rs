//! Fish state, lifecycle and motion.

use aquarium_core::{
    Direction, Error, HungerLevel, Position, Result, Status, FISH_FOOD_AMOUNT,
    FISH_INITIAL_HUNGER, FISH_MAX_SIZE, FISH_MIN_HUNGER, FISH_MIN_SIZE, GROWTH_TIMER_END,
    GROWTH_TIMER_START, HUNGER_TO_STARVE, MAX_SPEED, MIN_SPEED, SINK_FLOOR, SPAWN_MAX_Y,
};
use rand::Rng;
use std::fmt;

/// What a single lifecycle tick did to a fish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Fish was already dead
    Unchanged,
    /// Hunger and growth timer advanced
    Aged,
    /// Growth timer ran out and the fish grew
    Grew,
    /// Hunger reached the starve threshold
    Starved,
}

/// A fish in the aquarium
#[derive(Debug, Clone)]
pub struct Fish {
    name: Option<String>,
    status: Status,
    hunger: i32,
    size: i32,
    growth_timer: i32,
    position: Position,
    direction: Direction,
    speed: f64,
}

impl Fish {
    /// Create a fish, validating its lifecycle fields.
    ///
    /// Position, direction and speed are drawn from `rng`.
    pub fn new<R: Rng>(
        size: i32,
        hunger: i32,
        status: Status,
        growth_timer: i32,
        name: Option<String>,
        rng: &mut R,
    ) -> Result<Self> {
        if size < FISH_MIN_SIZE {
            return Err(Error::InvalidFishParameters(format!(
                "size must be at least {}, got {}",
                FISH_MIN_SIZE, size
            )));
        }
        if hunger < FISH_MIN_HUNGER {
            return Err(Error::InvalidFishParameters(format!(
                "hunger must be at least {}, got {}",
                FISH_MIN_HUNGER, hunger
            )));
        }
        if growth_timer < GROWTH_TIMER_END {
            return Err(Error::InvalidFishParameters(format!(
                "growth timer must be at least {}, got {}",
                GROWTH_TIMER_END, growth_timer
            )));
        }

        let (position, direction, speed) = random_motion(rng);

        Ok(Self {
            name,
            status,
            hunger,
            size,
            growth_timer,
            position,
            direction,
            speed,
        })
    }

    /// Create a fish from a raw status code (0 = dead, 1 = alive)
    pub fn from_status_code<R: Rng>(
        size: i32,
        hunger: i32,
        status: i32,
        growth_timer: i32,
        name: Option<String>,
        rng: &mut R,
    ) -> Result<Self> {
        let status = Status::try_from(status)?;
        Self::new(size, hunger, status, growth_timer, name, rng)
    }

    /// A newly bought fish: smallest size, slightly hungry, unnamed
    pub fn hatchling<R: Rng>(rng: &mut R) -> Self {
        let (position, direction, speed) = random_motion(rng);

        Self {
            name: None,
            status: Status::Alive,
            hunger: FISH_INITIAL_HUNGER,
            size: FISH_MIN_SIZE,
            growth_timer: GROWTH_TIMER_START,
            position,
            direction,
            speed,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn growth_timer(&self) -> i32 {
        self.growth_timer
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Advance one lifecycle tick.
    ///
    /// Starvation is evaluated before growth, so a fish that starves on the
    /// same tick its growth timer runs out does not grow.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_alive() {
            return TickOutcome::Unchanged;
        }

        self.hunger = self.hunger.saturating_add(1);
        self.growth_timer = (self.growth_timer - 1).max(GROWTH_TIMER_END);

        if self.starve_check() {
            return TickOutcome::Starved;
        }
        if self.grow_check() {
            return TickOutcome::Grew;
        }
        TickOutcome::Aged
    }

    fn starve_check(&mut self) -> bool {
        if self.hunger >= HUNGER_TO_STARVE {
            self.die();
            true
        } else {
            false
        }
    }

    fn grow_check(&mut self) -> bool {
        if self.is_alive() && self.growth_timer == GROWTH_TIMER_END {
            // Never shrinks a fish restored above the cap.
            if self.size < FISH_MAX_SIZE {
                self.size += 1;
            }
            self.growth_timer = GROWTH_TIMER_START;
            true
        } else {
            false
        }
    }

    /// Reduce hunger by one portion of food. Dead fish don't eat.
    pub fn feed(&mut self) {
        if self.is_alive() {
            self.hunger = (self.hunger - FISH_FOOD_AMOUNT).max(FISH_MIN_HUNGER);
        }
    }

    pub fn die(&mut self) {
        self.status = Status::Dead;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn clear_name(&mut self) {
        self.name = None;
    }

    pub fn describe_hunger(&self) -> HungerLevel {
        HungerLevel::from_hunger(self.hunger)
    }

    pub fn set_position_x(&mut self, x: f64) -> Result<()> {
        self.position.x = Position::check(x)?;
        Ok(())
    }

    pub fn set_position_y(&mut self, y: f64) -> Result<()> {
        self.position.y = Position::check(y)?;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advance the fish's position by one motion step.
    ///
    /// Dead fish sink at twice their speed down to `SINK_FLOOR`. Live fish swim
    /// horizontally and turn around with a fresh speed when they hit a wall.
    pub fn update_coordinate<R: Rng>(&mut self, rng: &mut R) {
        if !self.is_alive() {
            self.position.y = (self.position.y + self.speed * 2.0).min(SINK_FLOOR);
            return;
        }

        self.position.x += self.direction.sign() * self.speed;

        if self.position.x > 1.0 {
            self.position.x = 1.0;
            self.direction = Direction::Left;
            self.speed = random_speed(rng);
        }
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.direction = Direction::Right;
            self.speed = random_speed(rng);
        }
    }
}

/// Spawn position, heading and speed for a new fish
fn random_motion<R: Rng>(rng: &mut R) -> (Position, Direction, f64) {
    let position = Position::new(rng.gen::<f64>(), rng.gen::<f64>() * SPAWN_MAX_Y);
    let direction = if rng.gen_bool(0.5) {
        Direction::Left
    } else {
        Direction::Right
    };
    (position, direction, random_speed(rng))
}

fn random_speed<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(MIN_SPEED..=MAX_SPEED)
}

impl fmt::Display for Fish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fish name={} hunger={} size={} state={}",
            self.name.as_deref().unwrap_or("none"),
            self.hunger,
            self.size,
            self.status
        )
    }
}

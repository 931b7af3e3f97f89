//! Core type definitions for the aquarium.

use crate::config::{FISH_MIN_HUNGER, HUNGER_TO_STARVE};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Life status of a fish. `Alive -> Dead` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Dead,
    Alive,
}

impl Status {
    /// Persisted status code (0 = dead, 1 = alive)
    pub fn code(&self) -> i32 {
        match self {
            Status::Dead => 0,
            Status::Alive => 1,
        }
    }

    pub fn is_alive(&self) -> bool {
        *self == Status::Alive
    }
}

impl TryFrom<i32> for Status {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Status::Dead),
            1 => Ok(Status::Alive),
            other => Err(Error::InvalidFishParameters(format!(
                "status must be 0 (dead) or 1 (alive), got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Dead => write!(f, "dead"),
            Status::Alive => write!(f, "alive"),
        }
    }
}

/// Horizontal swim direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    /// Direction code (0 = right, 1 = left)
    pub fn code(&self) -> i32 {
        match self {
            Direction::Right => 0,
            Direction::Left => 1,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    /// Signed unit step along the x axis
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Right),
            1 => Ok(Direction::Left),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Direction::Right),
            "left" => Ok(Direction::Left),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

/// Hunger band of a fish, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HungerLevel {
    Stuffed,
    NotHungry,
    Hungry,
    Starving,
}

impl HungerLevel {
    /// Upper bound (inclusive) of the "Not Hungry" band
    pub const NOT_HUNGRY_MAX: i32 = HUNGER_TO_STARVE / 3;
    /// Lower bound (inclusive) of the "Starving" band
    pub const STARVING_MIN: i32 = HUNGER_TO_STARVE - 1;

    /// Classify a hunger value. Bands are checked in order; "Hungry" is the fallback.
    pub fn from_hunger(hunger: i32) -> Self {
        if hunger == FISH_MIN_HUNGER {
            HungerLevel::Stuffed
        } else if hunger <= Self::NOT_HUNGRY_MAX {
            HungerLevel::NotHungry
        } else if hunger >= Self::STARVING_MIN {
            HungerLevel::Starving
        } else {
            HungerLevel::Hungry
        }
    }
}

impl fmt::Display for HungerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HungerLevel::Stuffed => "Stuffed",
            HungerLevel::NotHungry => "Not Hungry",
            HungerLevel::Hungry => "Hungry",
            HungerLevel::Starving => "Starving",
        };
        write!(f, "{}", label)
    }
}

/// Position in normalized tank coordinates, both axes in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    /// Validate a single coordinate
    pub fn check(value: f64) -> crate::Result<f64> {
        if Self::in_bounds(value) {
            Ok(value)
        } else {
            Err(Error::OutOfBounds(value))
        }
    }
}

//! Configuration constants for the rock-paper-scissors arena
use bevy::math::Vec2;
use thiserror::Error;

use crate::contest::ScanStrategy;

// ============================================================================
// ARENA SETTINGS
// ============================================================================

/// Arena width in world units (also the window width in pixels)
pub const ARENA_WIDTH: f32 = 1440.0;

/// Arena height in world units (also the window height in pixels)
pub const ARENA_HEIGHT: f32 = 804.0;

/// Edge length of the square sprite drawn for every agent
pub const AGENT_FOOTPRINT: f32 = 20.0;

// ============================================================================
// SPAWN SETTINGS
// ============================================================================

/// Number of agents seeded per kind (population is three times this)
pub const GROUP_SIZE: usize = 200;

/// Cluster centre for the rock group
pub const ROCK_ANCHOR: Vec2 = Vec2::new(1000.0, 600.0);

/// Cluster centre for the paper group
pub const PAPER_ANCHOR: Vec2 = Vec2::new(100.0, 600.0);

/// Cluster centre for the scissors group
pub const SCISSORS_ANCHOR: Vec2 = Vec2::new(600.0, 100.0);

/// Agents spawn at an integer offset within ±SPAWN_JITTER of their anchor on each axis
pub const SPAWN_JITTER: i32 = 50;

/// Each velocity component is drawn uniformly from (-MAX_SPEED, MAX_SPEED)
pub const MAX_SPEED: f32 = 1.0;

// ============================================================================
// CONTEST SETTINGS
// ============================================================================

/// Two agents are in contact when their distance is strictly below this
pub const CONTACT_RADIUS: f32 = 20.0;

// ============================================================================
// DRIVER SETTINGS
// ============================================================================

/// Fixed simulation rate of the windowed driver
pub const TICK_RATE_HZ: f64 = 60.0;

/// Environment variable holding an optional u64 seed for the driver
pub const SEED_ENV_VAR: &str = "RPS_SEED";

/// Errors raised when an arena configuration cannot produce a population.
#[derive(Debug, Error, PartialEq)]
pub enum ArenaError {
    /// A scalar setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// An anchor's spawn box reaches outside the reflection band.
    #[error("anchor {index} at ({x}, {y}) leaves the arena once jitter is applied")]
    AnchorOutOfBounds { index: usize, x: f32, y: f32 },
}

/// Everything needed to seed a population and drive contests.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    pub group_size: usize,
    pub arena_width: f32,
    pub arena_height: f32,
    pub footprint: f32,
    /// Cluster centres in kind order: rock, paper, scissors.
    pub anchors: [Vec2; 3],
    pub spawn_jitter: i32,
    pub max_speed: f32,
    pub contact_radius: f32,
    pub scan: ScanStrategy,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            group_size: GROUP_SIZE,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            footprint: AGENT_FOOTPRINT,
            anchors: [ROCK_ANCHOR, PAPER_ANCHOR, SCISSORS_ANCHOR],
            spawn_jitter: SPAWN_JITTER,
            max_speed: MAX_SPEED,
            contact_radius: CONTACT_RADIUS,
            scan: ScanStrategy::Grid,
        }
    }
}

impl ArenaConfig {
    /// Checks every construction input, failing on the first bad value.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.group_size == 0 {
            return Err(ArenaError::InvalidConfig("group_size must be positive"));
        }
        if !self.arena_width.is_finite() || !self.arena_height.is_finite() {
            return Err(ArenaError::InvalidConfig("arena dimensions must be finite"));
        }
        if !(self.footprint.is_finite() && self.footprint > 0.0) {
            return Err(ArenaError::InvalidConfig("footprint must be positive"));
        }
        let arena = self.arena();
        if arena.high_x() <= arena.low_threshold() || arena.high_y() <= arena.low_threshold() {
            return Err(ArenaError::InvalidConfig(
                "arena is too small for the agent footprint",
            ));
        }
        if self.spawn_jitter < 0 {
            return Err(ArenaError::InvalidConfig("spawn_jitter must be non-negative"));
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(ArenaError::InvalidConfig("max_speed must be positive"));
        }
        if !(self.contact_radius.is_finite() && self.contact_radius > 0.0) {
            return Err(ArenaError::InvalidConfig("contact_radius must be positive"));
        }

        let jitter = self.spawn_jitter as f32;
        for (index, anchor) in self.anchors.iter().enumerate() {
            let fits = anchor.is_finite()
                && anchor.x - jitter >= arena.low_threshold()
                && anchor.x + jitter <= arena.high_x()
                && anchor.y - jitter >= arena.low_threshold()
                && anchor.y + jitter <= arena.high_y();
            if !fits {
                return Err(ArenaError::AnchorOutOfBounds {
                    index,
                    x: anchor.x,
                    y: anchor.y,
                });
            }
        }
        Ok(())
    }

    /// Boundary geometry derived from the arena size and footprint.
    pub fn arena(&self) -> crate::agent::Arena {
        crate::agent::Arena::new(self.arena_width, self.arena_height, self.footprint)
    }

    /// Number of agents a population built from this config holds.
    pub fn population_size(&self) -> usize {
        self.group_size * 3
    }
}

use crate::config::{ArenaConfig, ArenaError};
use crate::kind::{Census, Kind};
use bevy::log::info;
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single mobile agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub kind: Kind,
    /// Top-left corner of the agent's sprite in arena coordinates (y grows downward).
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Agent {
    pub fn new(kind: Kind, position: Vec2, velocity: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity,
        }
    }
}

/// Reflection thresholds of a bounded arena.
///
/// Positions are sprite anchors (top-left corner), so the two edges are not
/// symmetric: an agent bounces at `footprint / 2` on the near edge and at
/// `extent - 3 * footprint / 2` on the far edge. For the reference 20 unit
/// sprite that is 10 and `extent - 30`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub footprint: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, footprint: f32) -> Self {
        Self {
            width,
            height,
            footprint,
        }
    }

    pub fn low_threshold(&self) -> f32 {
        self.footprint * 0.5
    }

    pub fn high_margin(&self) -> f32 {
        self.footprint * 1.5
    }

    pub fn high_x(&self) -> f32 {
        self.width - self.high_margin()
    }

    pub fn high_y(&self) -> f32 {
        self.height - self.high_margin()
    }

    /// Whether `position` lies inside the reflection band on both axes.
    pub fn contains(&self, position: Vec2) -> bool {
        let low = self.low_threshold();
        (low..=self.high_x()).contains(&position.x) && (low..=self.high_y()).contains(&position.y)
    }

    /// Flip the velocity component of every axis whose threshold was reached.
    /// Position is never clamped.
    fn reflect(&self, agent: &mut Agent) {
        let low = self.low_threshold();
        if agent.position.x <= low || agent.position.x >= self.high_x() {
            agent.velocity.x = -agent.velocity.x;
        }
        if agent.position.y <= low || agent.position.y >= self.high_y() {
            agent.velocity.y = -agent.velocity.y;
        }
    }
}

/// Fixed-size, index-stable collection of agents.
///
/// Agents are never added or removed after creation; only their kind changes
/// through contests. Index order is the pair enumeration order used by the
/// contest resolver.
#[derive(Debug, Clone)]
pub struct Population {
    agents: Vec<Agent>,
    arena: Arena,
}

impl Population {
    /// Seed `3 * group_size` agents around the three anchors.
    ///
    /// A `seed` makes the layout reproducible; `None` draws from entropy.
    pub fn initialize(config: &ArenaConfig, seed: Option<u64>) -> Result<Self, ArenaError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::seeded(config, &mut rng)
    }

    /// Like [`Population::initialize`] but drawing from a caller-owned generator.
    pub fn seeded(config: &ArenaConfig, rng: &mut impl Rng) -> Result<Self, ArenaError> {
        config.validate()?;

        let jitter = config.spawn_jitter;
        let speed = config.max_speed;
        let mut agents = Vec::with_capacity(config.population_size());

        for (kind, anchor) in Kind::ALL.into_iter().zip(config.anchors) {
            for _ in 0..config.group_size {
                let offset = Vec2::new(
                    rng.gen_range(-jitter..=jitter) as f32,
                    rng.gen_range(-jitter..=jitter) as f32,
                );
                let velocity = Vec2::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed));
                agents.push(Agent::new(kind, anchor + offset, velocity));
            }
        }

        info!(
            "Seeded {} agents ({} per kind) in a {}x{} arena",
            agents.len(),
            config.group_size,
            config.arena_width,
            config.arena_height
        );

        Ok(Self {
            agents,
            arena: config.arena(),
        })
    }

    /// Build a population from explicit agents. Used for hand-made scenarios.
    pub fn from_agents(agents: Vec<Agent>, arena: Arena) -> Self {
        Self { agents, arena }
    }

    /// Move every agent by its velocity, then reflect off the arena edges.
    pub fn advance(&mut self) {
        let arena = self.arena;
        for agent in self.agents.iter_mut() {
            agent.position += agent.velocity;
            arena.reflect(agent);
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub(crate) fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Read-only `(kind, position)` view for renderers.
    pub fn snapshot(&self) -> impl Iterator<Item = (Kind, Vec2)> + '_ {
        self.agents.iter().map(|agent| (agent.kind, agent.position))
    }

    pub fn census(&self) -> Census {
        Census::from_kinds(self.agents.iter().map(|agent| agent.kind))
    }
}

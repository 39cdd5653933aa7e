use crate::agent::Population;
use crate::config::{ArenaConfig, ArenaError, TICK_RATE_HZ};
use crate::contest::ContestResolver;
use crate::kind::{Census, Kind};
use bevy::prelude::*;

/// Owns the population and the resolver; one call to [`Simulation::tick`] is one frame.
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    config: ArenaConfig,
    population: Population,
    resolver: ContestResolver,
    tick: u64,
    survivor: Option<Kind>,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Number of completed ticks, starting at 1.
    pub tick: u64,
    /// Kind overwrites made by the resolve pass.
    pub conversions: usize,
}

impl Simulation {
    pub fn new(config: &ArenaConfig, seed: Option<u64>) -> Result<Self, ArenaError> {
        let population = Population::initialize(config, seed)?;
        Ok(Self::from_population(config.clone(), population))
    }

    /// Wrap an already built population, e.g. a hand-made scenario.
    pub fn from_population(config: ArenaConfig, population: Population) -> Self {
        let resolver = ContestResolver::new(config.contact_radius, config.scan);
        let survivor = population.census().sole_survivor();
        Self {
            config,
            population,
            resolver,
            tick: 0,
            survivor,
        }
    }

    /// Motion first, then contests. Always in that order, exactly once.
    pub fn tick(&mut self) -> TickReport {
        self.population.advance();
        let conversions = self.resolver.resolve(&mut self.population);
        self.tick += 1;

        if conversions > 0 {
            debug!("tick {}: {} conversions", self.tick, conversions);
            if self.survivor.is_none() {
                self.survivor = self.population.census().sole_survivor();
                if let Some(kind) = self.survivor {
                    info!("{} took over the arena after {} ticks", kind, self.tick);
                }
            }
        }

        TickReport {
            tick: self.tick,
            conversions,
        }
    }

    /// Throw the current population away and seed a fresh one from the same config.
    pub fn restart(&mut self, seed: Option<u64>) -> Result<(), ArenaError> {
        *self = Self::new(&self.config, seed)?;
        Ok(())
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> impl Iterator<Item = (Kind, Vec2)> + '_ {
        self.population.snapshot()
    }

    pub fn census(&self) -> Census {
        self.population.census()
    }

    /// Set once the population has become a single kind.
    pub fn survivor(&self) -> Option<Kind> {
        self.survivor
    }
}

/// Resource to control simulation state
#[derive(Resource, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}

impl SimulationState {
    pub fn toggled(self) -> Self {
        match self {
            SimulationState::Running => SimulationState::Paused,
            SimulationState::Paused => SimulationState::Running,
        }
    }
}

/// System that advances the simulation by one tick
pub fn tick_simulation(mut simulation: ResMut<Simulation>) {
    simulation.tick();
}

pub fn simulation_running(state: Res<SimulationState>) -> bool {
    *state == SimulationState::Running
}

/// Runs [`tick_simulation`] on the fixed timestep while the state is `Running`.
///
/// The app must insert a [`Simulation`] resource before it starts.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationState>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_systems(FixedUpdate, tick_simulation.run_if(simulation_running));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, Arena};

    #[test]
    fn tick_moves_before_resolving() {
        // Apart now, in contact only after this tick's motion.
        let agents = vec![
            Agent::new(Kind::Rock, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0)),
            Agent::new(Kind::Scissors, Vec2::new(121.0, 100.0), Vec2::new(-1.0, 0.0)),
        ];
        let population = Population::from_agents(agents, Arena::new(1440.0, 804.0, 20.0));
        let mut simulation = Simulation::from_population(ArenaConfig::default(), population);

        let report = simulation.tick();
        assert_eq!(report, TickReport { tick: 1, conversions: 1 });
        let kinds: Vec<Kind> = simulation.snapshot().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![Kind::Rock, Kind::Rock]);
        assert_eq!(simulation.survivor(), Some(Kind::Rock));
    }

    #[test]
    fn ticks_count_up_and_population_is_stable() {
        let mut simulation = Simulation::new(&ArenaConfig::default(), Some(11)).unwrap();
        for expected in 1..=30 {
            assert_eq!(simulation.tick().tick, expected);
            assert_eq!(simulation.population().len(), 600);
            assert_eq!(simulation.census().total(), 600);
        }
        assert_eq!(simulation.ticks(), 30);
    }

    #[test]
    fn restart_resets_tick_and_reseeds() {
        let mut simulation = Simulation::new(&ArenaConfig::default(), Some(5)).unwrap();
        for _ in 0..10 {
            simulation.tick();
        }
        simulation.restart(Some(5)).unwrap();
        let fresh = Simulation::new(&ArenaConfig::default(), Some(5)).unwrap();
        assert_eq!(simulation.ticks(), 0);
        assert_eq!(simulation.population().agents(), fresh.population().agents());
    }

    #[test]
    fn single_kind_population_reports_survivor_before_any_tick() {
        let agents = vec![
            Agent::new(Kind::Paper, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0)),
            Agent::new(Kind::Paper, Vec2::new(400.0, 300.0), Vec2::new(0.0, 1.0)),
        ];
        let population = Population::from_agents(agents, Arena::new(1440.0, 804.0, 20.0));
        let mut simulation = Simulation::from_population(ArenaConfig::default(), population);

        assert_eq!(simulation.survivor(), Some(Kind::Paper));
        assert_eq!(simulation.tick().conversions, 0);
        assert_eq!(simulation.survivor(), Some(Kind::Paper));

        let mixed = Simulation::new(&ArenaConfig::default(), Some(2)).unwrap();
        assert_eq!(mixed.survivor(), None);
    }

    #[test]
    fn state_toggles() {
        assert_eq!(SimulationState::default().toggled(), SimulationState::Paused);
        assert_eq!(SimulationState::Paused.toggled(), SimulationState::Running);
    }
}

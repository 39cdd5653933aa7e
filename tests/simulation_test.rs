use bevy::prelude::*;
use rps_arena::{
    Agent, Arena, ArenaConfig, Kind, Population, ScanStrategy, Simulation, SimulationPlugin,
    SimulationState, simulation_running, tick_simulation,
};

/// 600 agents stay 600 agents, and every tick's census sums to 600
#[test]
fn reference_population_keeps_its_size() {
    let config = ArenaConfig::default();
    let mut simulation = Simulation::new(&config, Some(0xFACA_DE)).unwrap();

    for _ in 0..500 {
        simulation.tick();
        let census = simulation.census();
        assert_eq!(simulation.population().len(), 600);
        assert_eq!(census.rock + census.paper + census.scissors, 600);
    }
}

/// Positions stay inside the reflection band, give or take one tick of overshoot
#[test]
fn agents_stay_inside_the_arena() {
    let config = ArenaConfig::default();
    let mut simulation = Simulation::new(&config, Some(99)).unwrap();
    let arena = *simulation.population().arena();
    let slack = config.max_speed + 1e-3;

    for _ in 0..3000 {
        simulation.tick();
        for (_, position) in simulation.snapshot() {
            assert!(position.x >= arena.low_threshold() - slack, "x = {}", position.x);
            assert!(position.x <= arena.high_x() + slack, "x = {}", position.x);
            assert!(position.y >= arena.low_threshold() - slack, "y = {}", position.y);
            assert!(position.y <= arena.high_y() + slack, "y = {}", position.y);
        }
    }
}

/// Only kinds change between ticks; velocities keep their magnitude
#[test]
fn resolve_changes_kinds_only() {
    let config = ArenaConfig {
        scan: ScanStrategy::BruteForce,
        ..ArenaConfig::default()
    };
    let mut simulation = Simulation::new(&config, Some(1234)).unwrap();
    let speeds: Vec<Vec2> = simulation
        .population()
        .agents()
        .iter()
        .map(|agent| agent.velocity.abs())
        .collect();

    for _ in 0..200 {
        simulation.tick();
    }

    for (agent, speed) in simulation.population().agents().iter().zip(&speeds) {
        assert_eq!(agent.velocity.abs(), *speed);
    }
}

/// Three mutually touching agents, one of each kind, scanned in index order
#[test]
fn three_way_scenario_has_a_fixed_outcome() {
    let agents = vec![
        Agent::new(Kind::Rock, Vec2::new(300.0, 300.0), Vec2::ZERO),
        Agent::new(Kind::Paper, Vec2::new(305.0, 300.0), Vec2::ZERO),
        Agent::new(Kind::Scissors, Vec2::new(302.5, 304.33), Vec2::ZERO),
    ];
    let population = Population::from_agents(agents.clone(), Arena::new(1440.0, 804.0, 20.0));
    let mut simulation = Simulation::from_population(ArenaConfig::default(), population);

    let report = simulation.tick();
    let after: Vec<Kind> = simulation.snapshot().map(|(kind, _)| kind).collect();
    let changed = agents
        .iter()
        .zip(&after)
        .filter(|(before, now)| before.kind != **now)
        .count();

    assert_eq!(after, vec![Kind::Scissors, Kind::Scissors, Kind::Scissors]);
    assert_eq!(changed, 2);
    assert_eq!(report.conversions, 3);
}

/// Same seed, same trajectory, whichever scan strategy runs it
#[test]
fn seeded_runs_are_reproducible() {
    let grid = ArenaConfig::default();
    let brute = ArenaConfig {
        scan: ScanStrategy::BruteForce,
        ..ArenaConfig::default()
    };
    let mut a = Simulation::new(&grid, Some(77)).unwrap();
    let mut b = Simulation::new(&grid, Some(77)).unwrap();
    let mut c = Simulation::new(&brute, Some(77)).unwrap();

    for _ in 0..300 {
        let report = a.tick();
        assert_eq!(report, b.tick());
        assert_eq!(report, c.tick());
    }
    assert_eq!(a.population().agents(), b.population().agents());
    assert_eq!(a.population().agents(), c.population().agents());
}

/// Headless app: the tick system drives the simulation once per update
#[test]
fn tick_system_runs_in_headless_app() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Simulation::new(&ArenaConfig::default(), Some(3)).unwrap());
    app.add_systems(Update, tick_simulation);

    for _ in 0..5 {
        app.update();
    }

    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.ticks(), 5);
    assert_eq!(simulation.census().total(), 600);
}

/// Pausing stops ticks; resuming picks up where it left off
#[test]
fn paused_state_stops_ticking() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<SimulationState>();
    app.insert_resource(Simulation::new(&ArenaConfig::default(), Some(3)).unwrap());
    app.add_systems(Update, tick_simulation.run_if(simulation_running));

    app.update();
    app.update();
    *app.world_mut().resource_mut::<SimulationState>() = SimulationState::Paused;
    app.update();
    app.update();
    assert_eq!(app.world().resource::<Simulation>().ticks(), 2);

    *app.world_mut().resource_mut::<SimulationState>() = SimulationState::Running;
    app.update();
    assert_eq!(app.world().resource::<Simulation>().ticks(), 3);
}

/// The plugin ticks on the fixed schedule and honours the pause state
#[test]
fn plugin_ticks_on_fixed_update_until_paused() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Simulation::new(&ArenaConfig::default(), Some(8)).unwrap());
    app.add_plugins(SimulationPlugin);

    assert_eq!(*app.world().resource::<SimulationState>(), SimulationState::Running);
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    assert_eq!(timestep, std::time::Duration::from_secs_f64(1.0 / 60.0));

    app.world_mut().run_schedule(FixedUpdate);
    app.world_mut().run_schedule(FixedUpdate);
    assert_eq!(app.world().resource::<Simulation>().ticks(), 2);

    *app.world_mut().resource_mut::<SimulationState>() = SimulationState::Paused;
    app.world_mut().run_schedule(FixedUpdate);
    assert_eq!(app.world().resource::<Simulation>().ticks(), 2);

    *app.world_mut().resource_mut::<SimulationState>() = SimulationState::Running;
    app.world_mut().run_schedule(FixedUpdate);
    assert_eq!(app.world().resource::<Simulation>().ticks(), 3);
}

/// Bad construction input fails before any agent exists
#[test]
fn degenerate_arena_is_rejected() {
    let config = ArenaConfig {
        arena_height: 30.0,
        ..ArenaConfig::default()
    };
    assert!(Simulation::new(&config, Some(1)).is_err());
}

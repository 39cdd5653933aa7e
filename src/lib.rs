//! Rock-paper-scissors arena: agents of three kinds drift around a bounded
//! arena and convert each other on contact under a cyclic dominance rule.
//!
//! The library holds the simulation core. Windowing, sprites and the status
//! panel live in the binary.

pub mod agent;
pub mod config;
pub mod contest;
pub mod kind;
pub mod simulation;

pub use agent::{Agent, Arena, Population};
pub use config::{ArenaConfig, ArenaError};
pub use contest::{ContestResolver, ScanStrategy, SpatialHashGrid};
pub use kind::{Census, Kind, Side};
pub use simulation::{Simulation, SimulationPlugin, SimulationState, TickReport, simulation_running, tick_simulation};

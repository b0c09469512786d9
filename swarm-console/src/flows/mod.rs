//! Modal workflow flows.
//!
//! Each flow owns one [`crate::session::WorkflowSession`] (via a driver)
//! and whatever configuration state its modal needs. Flows never block;
//! the UI ticks them with `poll` every frame.

mod deployment;
mod evolution;
mod export;
mod pathfinder;

pub use deployment::{DeploymentFlow, LAUNCH_SEQUENCE, PHASE_STEP_MS};
pub use evolution::{EvolutionFlow, TRANSFORM_IMPACT, TRANSFORM_SEQUENCE};
pub use export::{export_cooldown, ExportFlow, SovereignPackage};
pub use pathfinder::PathfinderFlow;

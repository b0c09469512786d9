// Application state
pub mod app;

// Hive-mind architect chat
pub mod architect;

// Artifact download/bundle writer
pub mod bundle;

// Module artifact catalog
pub mod catalog;

// Persisted export cooldown
pub mod cooldown;

// Seeded dashboard content
pub mod data;

// Run-history persistence
pub mod database;

// Operator directive responses
mod directives;

// Modal workflow flows
pub mod flows;

// Simulated service gateway
pub mod gateway;

// Workflow session state machine
pub mod session;

// TUI rendering
pub mod ui;

//! Funnel DNS Infrastructure Layer
//!
//! Event-loop integration for resolver engines (readiness sources and the
//! tokio pump) plus the in-process scripted engine used by integration
//! tests and demos.
pub mod engine;

#[cfg(unix)]
pub use engine::FdReadiness;
pub use engine::{pump, NotifyReadiness, ReadinessSource, ScriptedEngine};

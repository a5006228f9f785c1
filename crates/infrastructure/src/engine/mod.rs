pub mod pump;
pub mod readiness;
pub mod scripted;

pub use pump::pump;
#[cfg(unix)]
pub use readiness::FdReadiness;
pub use readiness::{NotifyReadiness, ReadinessSource};
pub use scripted::ScriptedEngine;

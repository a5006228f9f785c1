use funnel_dns_domain::{EngineConfig, Question, RawAnswer};
use thiserror::Error;

/// Opaque handle to one in-flight engine resolution, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionHandle(pub u64);

/// File-descriptor-like readiness signal. `None` for engines that signal
/// readiness in-process instead of through the OS.
pub type RawDescriptor = i32;

/// Completion handler passed to [`ResolverEngine::issue`]. Invoked exactly
/// once per issued resolution, from within `process_ready`.
pub type Completion = Box<dyn FnOnce(RawAnswer) + Send>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to construct engine context: {0}")]
    Construct(String),

    #[error("Failed to issue resolution: {0}")]
    Issue(String),
}

/// The validating resolver engine boundary.
///
/// The engine owns wire protocol, DNSSEC validation and answer caching; this
/// library only drives its async surface. An implementation is expected to
/// queue completed resolutions until `process_ready` is called by the event
/// loop watching [`readiness_descriptor`](Self::readiness_descriptor).
/// Dropping an engine tears its context down, cancelling anything still in
/// flight on its side.
pub trait ResolverEngine: Send + Sync + Sized + 'static {
    /// Build a fresh engine context from configuration (trust anchors,
    /// resolv.conf/hosts overrides).
    fn construct(config: &EngineConfig) -> Result<Self, EngineError>;

    /// Start an asynchronous resolution. The handler is invoked once with
    /// the raw answer when `process_ready` finds the resolution finished.
    fn issue(&self, question: &Question, done: Completion)
        -> Result<ResolutionHandle, EngineError>;

    /// Cancel a previously issued resolution. The completion handler is
    /// dropped unharmed.
    fn cancel_resolution(&self, handle: ResolutionHandle);

    /// Descriptor for the external event loop to watch, if the engine has
    /// one.
    fn readiness_descriptor(&self) -> Option<RawDescriptor>;

    /// Drain finished resolutions, invoking their completion handlers.
    fn process_ready(&self);
}

//! Funnel DNS Application Layer
//!
//! Ports consumed by the coalescer (the resolver engine boundary) and the
//! coalescer service itself.
pub mod ports;
pub mod services;

pub use ports::{Completion, EngineError, RawDescriptor, ResolutionHandle, ResolverEngine};
pub use services::{Coalescer, LookupCallback, Token};

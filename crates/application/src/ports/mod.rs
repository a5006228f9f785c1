pub mod resolver_engine;

pub use resolver_engine::{Completion, EngineError, RawDescriptor, ResolutionHandle, ResolverEngine};

pub mod coalescer;

pub use coalescer::{Coalescer, LookupCallback, Token};

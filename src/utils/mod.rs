//! Cross-cutting utilities: logging setup, lightweight event tracing, and
//! fast unchecked `ndarray` accessors for hot loops.

pub mod logger;
pub mod ndarray_unsafe;
pub mod tracer;

pub use tracer::{Event, EventGuard, Tracer};

//! Buffer Capacities
//!
//! Bounded logs keep memory per sensor fixed no matter how long a
//! simulation runs.

/// Diagnostics retained per sensor before the oldest are dropped.
///
/// A sensor emits at most a handful of diagnostics per `sample()` call, so
/// 64 entries cover many calls between drains.
pub const DIAGNOSTIC_CAPACITY: usize = 64;

//! Grade aggregation and ranking.
//!
//! Collects observations per entity, reduces each entity to a mean rounded
//! to one decimal digit, and orders entities by that mean.

pub mod aggregate;
pub mod types;
pub mod utility;

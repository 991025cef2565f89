//! Native client crate for the flight pathfinder.
//!
//! Looks routes up against the pathfinding service (or a CSV fixture) and keeps the same result
//! board the browser UI renders.

pub mod fixture;
pub mod lookup;
pub mod session;

pub use fixture::{FixtureError, FixtureRouteLookup};
pub use lookup::{HttpRouteLookup, RouteLookup};
pub use session::RouteSession;

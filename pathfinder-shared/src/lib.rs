//! Shared crate for the flight pathfinder client.
//!
//! Everything here is platform neutral so the wasm frontend and the native client agree on how a
//! route request is built, how the service's answer is read and what ends up on screen.

pub mod airports;
pub mod board;
pub mod config;
pub mod error;
pub mod routes;

pub use airports::{interpret_airports, AirportList};
pub use board::{BoardDisplay, QueryTicket, ResultSlot, RouteBoard, Settled};
pub use config::ServiceConfig;
pub use error::{AirportError, RouteError};
pub use routes::{
    format_path, interpret_route_response, CandidateRoute, RouteMetrics, RouteOutcome,
    RouteQuery, RouteResponse, MAX_ROUTES,
};

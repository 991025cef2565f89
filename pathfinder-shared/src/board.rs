//! Result board: what the three result slots show, and which response is allowed to fill them.
//!
//! Every submission takes a [`QueryTicket`]. Only the ticket issued last may settle the board, so
//! a slow response to an older query can never overwrite a newer one.

use log::{debug, info, warn};

use crate::error::RouteError;
use crate::routes::{RouteMetrics, RouteOutcome, RouteQuery, MAX_ROUTES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    seq: u64,
    query: RouteQuery,
}

impl QueryTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &RouteQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum BoardDisplay {
    #[default]
    Empty,
    Routes {
        query: RouteQuery,
        outcome: RouteOutcome,
    },
    Failed(RouteError),
}

/// One rendered result block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSlot {
    pub heading: String,
    pub metrics: Option<RouteMetrics>,
}

impl ResultSlot {
    fn message(text: String) -> Self {
        ResultSlot {
            heading: text,
            metrics: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.heading.is_empty() && self.metrics.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteBoard {
    issued: u64,
    in_flight: bool,
    display: BoardDisplay,
}

impl RouteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new submission. Anything issued before it becomes stale.
    pub fn begin(&mut self, query: RouteQuery) -> QueryTicket {
        self.issued += 1;
        self.in_flight = true;
        info!(
            "Route query #{} from {:?} to {:?}",
            self.issued, query.source, query.dest
        );

        QueryTicket {
            seq: self.issued,
            query,
        }
    }

    /// Applies a finished query if it is still the latest one. A failure replaces all slots at
    /// once, so an error never sits next to routes from an earlier query.
    pub fn settle(
        &mut self,
        ticket: QueryTicket,
        result: Result<RouteOutcome, RouteError>,
    ) -> Settled {
        if ticket.seq != self.issued {
            debug!(
                "Dropping stale response for query #{} (latest is #{})",
                ticket.seq, self.issued
            );
            return Settled::Stale;
        }

        self.in_flight = false;
        self.display = match result {
            Ok(outcome) => {
                info!("Query #{} found {} route(s)", ticket.seq, outcome.len());
                BoardDisplay::Routes {
                    query: ticket.query,
                    outcome,
                }
            }
            Err(e) => {
                warn!("Query #{} failed: {}", ticket.seq, e.detail());
                BoardDisplay::Failed(e)
            }
        };

        Settled::Applied
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn display(&self) -> &BoardDisplay {
        &self.display
    }

    pub fn slots(&self) -> [ResultSlot; MAX_ROUTES] {
        let mut slots: [ResultSlot; MAX_ROUTES] = Default::default();

        match &self.display {
            BoardDisplay::Empty => {}
            BoardDisplay::Failed(e) => slots[0] = ResultSlot::message(e.to_string()),
            BoardDisplay::Routes {
                query,
                outcome: RouteOutcome::NoRoute,
            } => {
                slots[0] = ResultSlot::message(format!(
                    "No route found from {} to {}.",
                    query.source, query.dest
                ))
            }
            BoardDisplay::Routes { outcome, .. } => {
                for (slot, route) in slots.iter_mut().zip(outcome.routes()) {
                    *slot = ResultSlot {
                        heading: route.formatted_path(),
                        metrics: Some(route.metrics),
                    };
                }
            }
        }

        slots
    }
}

#[cfg(test)]
mod board_tests {
    use super::*;
    use crate::error::FETCH_FAILED_MESSAGE;
    use crate::routes::interpret_route_response;

    const THREE_ROUTES: &str = r#"{
        "paths": [["JFK","LAX"], ["JFK","ORD","LAX"], ["JFK","DEN","LAX"]],
        "distances": [3983.0, 4051.5, 4110.0],
        "times": [4.4256, 4.5017, 4.5667]
    }"#;

    fn three_routes() -> RouteOutcome {
        interpret_route_response(200, THREE_ROUTES).unwrap()
    }

    #[test]
    fn test_new_board_is_blank() {
        let board = RouteBoard::new();
        assert!(!board.is_loading());
        assert!(board.slots().iter().all(ResultSlot::is_blank));
    }

    #[test]
    fn test_slots_follow_response_order() {
        let mut board = RouteBoard::new();
        let ticket = board.begin(RouteQuery::new("JFK", "LAX"));
        assert!(board.is_loading());
        assert_eq!(board.settle(ticket, Ok(three_routes())), Settled::Applied);
        assert!(!board.is_loading());

        let slots = board.slots();
        assert_eq!(slots[0].heading, "JFK to LAX");
        assert_eq!(slots[1].heading, "JFK to ORD to LAX");
        assert_eq!(slots[2].heading, "JFK to DEN to LAX");

        let metrics = slots[1].metrics.unwrap();
        assert_eq!(metrics.distance_line(), "Total distance traveled: 4051.50 kms.");
        assert_eq!(metrics.time_line(), "Total time during travel: 4.50 hours.");
        let metrics = slots[2].metrics.unwrap();
        assert_eq!(metrics.distance_line(), "Total distance traveled: 4110.00 kms.");
        assert_eq!(metrics.time_line(), "Total time during travel: 4.57 hours.");
    }

    #[test]
    fn test_failure_clears_every_slot() {
        let mut board = RouteBoard::new();
        let ticket = board.begin(RouteQuery::new("JFK", "LAX"));
        board.settle(ticket, Ok(three_routes()));

        let ticket = board.begin(RouteQuery::new("JFK", "SFO"));
        board.settle(
            ticket,
            Err(RouteError::Unreachable("connection refused".to_string())),
        );

        let slots = board.slots();
        assert_eq!(slots[0].heading, FETCH_FAILED_MESSAGE);
        assert!(slots[0].metrics.is_none());
        assert!(slots[1].is_blank());
        assert!(slots[2].is_blank());
    }

    #[test]
    fn test_partial_routes_leave_trailing_slots_blank() {
        let outcome = interpret_route_response(
            200,
            r#"{ "paths": [["AER","DME"], null, null], "distances": [1360.0], "times": [1.51] }"#,
        )
        .unwrap();

        let mut board = RouteBoard::new();
        let ticket = board.begin(RouteQuery::new("AER", "DME"));
        board.settle(ticket, Ok(outcome));

        let slots = board.slots();
        assert_eq!(slots[0].heading, "AER to DME");
        assert!(slots[1].is_blank());
        assert!(slots[2].is_blank());
    }

    #[test]
    fn test_no_route_message() {
        let mut board = RouteBoard::new();
        let ticket = board.begin(RouteQuery::new("GKA", "ZZV"));
        board.settle(ticket, Ok(RouteOutcome::NoRoute));

        let slots = board.slots();
        assert_eq!(slots[0].heading, "No route found from GKA to ZZV.");
        assert!(slots[1].is_blank());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut board = RouteBoard::new();
        let first = board.begin(RouteQuery::new("JFK", "LAX"));
        let second = board.begin(RouteQuery::new("GKA", "ZZV"));

        assert_eq!(board.settle(second, Ok(RouteOutcome::NoRoute)), Settled::Applied);
        assert_eq!(board.settle(first, Ok(three_routes())), Settled::Stale);

        assert_eq!(board.slots()[0].heading, "No route found from GKA to ZZV.");
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut board = RouteBoard::new();
        let first = board.begin(RouteQuery::new("JFK", "LAX"));
        let _second = board.begin(RouteQuery::new("JFK", "SFO"));

        assert_eq!(board.settle(first, Ok(three_routes())), Settled::Stale);
        assert!(board.is_loading());
        assert_eq!(board.display(), &BoardDisplay::Empty);
    }

    #[test]
    fn test_resubmission_renders_the_same() {
        let mut board = RouteBoard::new();
        let ticket = board.begin(RouteQuery::new("JFK", "LAX"));
        board.settle(ticket, Ok(three_routes()));
        let first = board.slots();

        let ticket = board.begin(RouteQuery::new("JFK", "LAX"));
        board.settle(ticket, Ok(three_routes()));
        assert_eq!(board.slots(), first);
    }
}

//! A route-finding session: the airport list plus the result board, fed by a [`RouteLookup`].

use log::{info, warn};
use pathfinder_shared::{AirportList, ResultSlot, RouteBoard, RouteQuery, Settled, MAX_ROUTES};
use tokio::sync::Mutex;

use crate::lookup::RouteLookup;

/// Safe to share between tasks. Locks are only taken around board updates, never across the
/// network call, so several submissions can be in flight at once and the last one issued wins.
pub struct RouteSession<L> {
    lookup: L,
    board: Mutex<RouteBoard>,
    airports: Mutex<AirportList>,
}

impl<L: RouteLookup> RouteSession<L> {
    pub fn new(lookup: L) -> Self {
        RouteSession {
            lookup,
            board: Mutex::new(RouteBoard::new()),
            airports: Mutex::new(AirportList::default()),
        }
    }

    /// Reloads the airport list. A failed load is logged and the previous list is kept.
    pub async fn refresh_airports(&self) -> usize {
        match self.lookup.load_airports().await {
            Ok(list) => {
                let count = list.len();
                *self.airports.lock().await = list;
                info!("Airport list refreshed, {} airports", count);
                count
            }
            Err(e) => {
                warn!("Error fetching airports: {:?}", e);
                self.airports.lock().await.len()
            }
        }
    }

    pub async fn submit(&self, query: RouteQuery) -> Settled {
        let ticket = self.board.lock().await.begin(query);
        let result = self.lookup.find_routes(ticket.query()).await;
        self.board.lock().await.settle(ticket, result)
    }

    pub async fn slots(&self) -> [ResultSlot; MAX_ROUTES] {
        self.board.lock().await.slots()
    }

    pub async fn is_loading(&self) -> bool {
        self.board.lock().await.is_loading()
    }

    pub async fn airports(&self) -> AirportList {
        self.airports.lock().await.clone()
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }
}

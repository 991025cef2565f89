//! Canned routes loaded from a CSV file, answering the way the real service would.
//!
//! Rows are `source,dest,path,distance,time` with the stops in `path` separated by spaces. Rows for
//! the same pair are ranked in file order.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use log::{debug, info};
use pathfinder_shared::{
    AirportError, AirportList, RouteError, RouteOutcome, RouteQuery, RouteResponse, MAX_ROUTES,
};
use thiserror::Error;

use crate::lookup::RouteLookup;

const BAD_IATA_DESCRIPTION: &str = "Either the source or the destination airport IATAs given are invalid. Please check them and try again";
const UNKNOWN_SOURCE_DESCRIPTION: &str =
    "Unfortunately, our data source does not support any route or airport for the source IATA.";
const UNKNOWN_DEST_DESCRIPTION: &str =
    "Unfortunately, our data source does not support any route or airport for destination IATA.";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Error reading route fixture.")]
    Csv(#[from] csv::Error),
    #[error("Route fixture row {row} is malformed: {reason}")]
    BadRow { row: usize, reason: String },
}

#[derive(Debug, Clone)]
struct FixtureRoute {
    stops: Vec<String>,
    distance: f64,
    time: f64,
}

pub struct FixtureRouteLookup {
    routes: HashMap<(String, String), Vec<FixtureRoute>>,
    airports: BTreeSet<String>,
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, row: usize) -> Result<&'r str, FixtureError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| FixtureError::BadRow {
            row,
            reason: format!("missing column {}", idx),
        })
}

fn number(record: &csv::StringRecord, idx: usize, row: usize) -> Result<f64, FixtureError> {
    field(record, idx, row)?
        .parse::<f64>()
        .map_err(|e| FixtureError::BadRow {
            row,
            reason: e.to_string(),
        })
}

impl FixtureRouteLookup {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let mut rdr = csv::Reader::from_path(path)?;
        let mut routes: HashMap<(String, String), Vec<FixtureRoute>> = HashMap::new();
        let mut airports = BTreeSet::new();

        for (idx, row) in rdr.records().enumerate() {
            let record = row?;
            // Header is line 1
            let row_num = idx + 2;

            let source = field(&record, 0, row_num)?.to_uppercase();
            let dest = field(&record, 1, row_num)?.to_uppercase();
            let stops: Vec<String> = field(&record, 2, row_num)?
                .split_whitespace()
                .map(str::to_uppercase)
                .collect();
            if stops.is_empty() {
                return Err(FixtureError::BadRow {
                    row: row_num,
                    reason: "route has no stops".to_string(),
                });
            }

            airports.insert(source.clone());
            airports.insert(dest.clone());
            airports.extend(stops.iter().cloned());

            routes.entry((source, dest)).or_default().push(FixtureRoute {
                stops,
                distance: number(&record, 3, row_num)?,
                time: number(&record, 4, row_num)?,
            });
        }

        info!(
            "Loaded route fixture with {} airport pairs and {} airports",
            routes.len(),
            airports.len()
        );

        Ok(FixtureRouteLookup { routes, airports })
    }

    fn reject(query: &RouteQuery, description: &str) -> RouteError {
        debug!("Fixture rejects {:?}: {}", query, description);
        RouteError::Rejected {
            status: 400,
            description: description.to_string(),
        }
    }

    /// Builds the body the service would have sent, padded with `null` paths up to three.
    fn response_for(&self, source: &str, dest: &str) -> RouteResponse {
        let found = self
            .routes
            .get(&(source.to_string(), dest.to_string()))
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut response = RouteResponse::default();
        for route in found.iter().take(MAX_ROUTES) {
            response.paths.push(Some(route.stops.clone()));
            response.distances.push(route.distance);
            response.times.push(route.time);
        }
        response.paths.resize(MAX_ROUTES, None);

        response
    }
}

fn is_iata(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[async_trait::async_trait]
impl RouteLookup for FixtureRouteLookup {
    async fn find_routes(&self, query: &RouteQuery) -> Result<RouteOutcome, RouteError> {
        let source = query.source.to_uppercase();
        let dest = query.dest.to_uppercase();

        if !is_iata(&source) || !is_iata(&dest) {
            return Err(Self::reject(query, BAD_IATA_DESCRIPTION));
        }
        if !self.airports.contains(&source) {
            return Err(Self::reject(query, UNKNOWN_SOURCE_DESCRIPTION));
        }
        if !self.airports.contains(&dest) {
            return Err(Self::reject(query, UNKNOWN_DEST_DESCRIPTION));
        }

        self.response_for(&source, &dest).into_outcome()
    }

    async fn load_airports(&self) -> Result<AirportList, AirportError> {
        Ok(self.airports.iter().cloned().collect())
    }
}

#[cfg(test)]
mod fixture_tests {
    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test/MockRoutes.csv");

    #[tokio::test]
    async fn test_fixture_returns_ranked_routes() {
        let lookup = FixtureRouteLookup::from_path(FIXTURE).unwrap();
        let outcome = lookup
            .find_routes(&RouteQuery::new("JFK", "LAX"))
            .await
            .unwrap();

        let RouteOutcome::ThreeRoutes(routes) = outcome else {
            panic!("expected three routes");
        };
        assert_eq!(routes[0].formatted_path(), "JFK to LAX");
        assert_eq!(routes[1].formatted_path(), "JFK to ORD to LAX");
        assert_eq!(routes[2].metrics.distance_km, 4110.0);
    }

    #[tokio::test]
    async fn test_fixture_upper_cases_like_the_service() {
        let lookup = FixtureRouteLookup::from_path(FIXTURE).unwrap();
        let outcome = lookup
            .find_routes(&RouteQuery::new("aer", "asf"))
            .await
            .unwrap();

        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.routes()[0].formatted_path(), "AER to EVN to MRV to ASF");
    }

    #[tokio::test]
    async fn test_fixture_partial_and_missing_routes() {
        let lookup = FixtureRouteLookup::from_path(FIXTURE).unwrap();

        let outcome = lookup
            .find_routes(&RouteQuery::new("BGM", "GSP"))
            .await
            .unwrap();
        assert!(matches!(outcome, RouteOutcome::PartialRoutes(ref r) if r.len() == 2));

        let outcome = lookup
            .find_routes(&RouteQuery::new("LAX", "JFK"))
            .await
            .unwrap();
        assert_eq!(outcome, RouteOutcome::NoRoute);
    }

    #[tokio::test]
    async fn test_fixture_rejections() {
        let lookup = FixtureRouteLookup::from_path(FIXTURE).unwrap();

        let err = lookup
            .find_routes(&RouteQuery::new("JFKX", "LAX"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), BAD_IATA_DESCRIPTION);

        let err = lookup
            .find_routes(&RouteQuery::new("ZZZ", "LAX"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_SOURCE_DESCRIPTION);

        let err = lookup
            .find_routes(&RouteQuery::new("JFK", "ZZZ"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_DEST_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_fixture_airports_sorted_unique() {
        let lookup = FixtureRouteLookup::from_path(FIXTURE).unwrap();
        let airports = lookup.load_airports().await.unwrap();

        assert_eq!(airports.len(), 13);
        assert_eq!(airports.codes().first().map(String::as_str), Some("AER"));
        assert!(airports.contains("mrv"));
    }

    #[test]
    fn test_fixture_missing_file() {
        let err = FixtureRouteLookup::from_path("test/does_not_exist.csv")
            .err()
            .unwrap();
        assert!(matches!(err, FixtureError::Csv(_)));
    }
}

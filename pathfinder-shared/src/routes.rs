//! Route queries against the pathfinding service and the routes it hands back.
//!
//! The service answers `GET /route/source=<SRC>&dest=<DEST>` with up to three candidate routes.
//! Routes it could not find show up as `null` entries in `paths`, and only found routes get an
//! entry in `distances` and `times`.

use std::fmt::{self, Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::error::RouteError;

/// Most candidate routes the service ever returns, and the number of result slots we render.
pub const MAX_ROUTES: usize = 3;

const STOP_SEPARATOR: &str = " to ";

/// Origin and destination exactly as the user typed them. Nothing is trimmed, upper-cased or
/// checked against the airport list, the service does its own validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RouteQuery {
    pub source: String,
    pub dest: String,
}

impl RouteQuery {
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        RouteQuery {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Path of the route endpoint, relative to the service base, with both values encoded.
    pub fn route_path(&self) -> String {
        format!(
            "route/source={}&dest={}",
            encode_component(&self.source),
            encode_component(&self.dest)
        )
    }

    pub fn route_url(&self, base: &Url) -> Result<Url, RouteError> {
        let url = base
            .join(&self.route_path())
            .map_err(|e| RouteError::InvalidAddress(e.to_string()))?;
        debug!("Route request url {}", url);
        Ok(url)
    }
}

/// Percent encodes everything but `[A-Za-z0-9-._*]`. Form encoding turns spaces into `+`, which
/// means nothing special inside a path, so those are swapped for `%20`. A literal `+` has already
/// been encoded as `%2B` at that point.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Body of a successful route response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteResponse {
    pub paths: Vec<Option<Vec<String>>>,
    #[serde(default)]
    pub distances: Vec<f64>,
    #[serde(default)]
    pub times: Vec<f64>,
}

/// Body the service sends with a 4xx/5xx when it refuses a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRejection {
    pub status: u16,
    pub description: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub dest: Option<String>,
}

/// Total distance and travel time of one route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub hours: f64,
}

impl RouteMetrics {
    pub fn distance_line(&self) -> String {
        format!("Total distance traveled: {:.2} kms.", self.distance_km)
    }

    pub fn time_line(&self) -> String {
        format!("Total time during travel: {:.2} hours.", self.hours)
    }
}

/// One itinerary from the service, stops in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRoute {
    pub stops: Vec<String>,
    pub metrics: RouteMetrics,
}

impl CandidateRoute {
    /// Stops joined as `"A to B to C"`.
    pub fn formatted_path(&self) -> String {
        format_path(&self.stops)
    }
}

impl Display for CandidateRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2} kms, {:.2} hours)",
            self.formatted_path(),
            self.metrics.distance_km,
            self.metrics.hours
        )
    }
}

pub fn format_path<S: AsRef<str>>(stops: &[S]) -> String {
    stops
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(STOP_SEPARATOR)
}

/// What a route query came back with. Holding the routes by count means nothing downstream ever
/// has to index past the routes that actually exist.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    NoRoute,
    /// One or two routes.
    PartialRoutes(Vec<CandidateRoute>),
    ThreeRoutes([CandidateRoute; MAX_ROUTES]),
}

impl RouteOutcome {
    /// Keeps the first [`MAX_ROUTES`] candidates.
    pub fn from_candidates(mut candidates: Vec<CandidateRoute>) -> Self {
        candidates.truncate(MAX_ROUTES);
        if candidates.is_empty() {
            return RouteOutcome::NoRoute;
        }

        match <[CandidateRoute; MAX_ROUTES]>::try_from(candidates) {
            Ok(three) => RouteOutcome::ThreeRoutes(three),
            Err(partial) => RouteOutcome::PartialRoutes(partial),
        }
    }

    pub fn routes(&self) -> &[CandidateRoute] {
        match self {
            RouteOutcome::NoRoute => &[],
            RouteOutcome::PartialRoutes(routes) => routes,
            RouteOutcome::ThreeRoutes(routes) => routes,
        }
    }

    pub fn len(&self) -> usize {
        self.routes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes().is_empty()
    }
}

impl RouteResponse {
    /// Checks the response shape and pairs each found path with its metrics.
    ///
    /// Only the first [`MAX_ROUTES`] entries of `paths` are looked at. The k-th non-null path
    /// takes `distances[k]` and `times[k]`.
    pub fn into_outcome(self) -> Result<RouteOutcome, RouteError> {
        let RouteResponse {
            paths,
            distances,
            times,
        } = self;

        let candidates = paths
            .into_iter()
            .take(MAX_ROUTES)
            .flatten()
            .enumerate()
            .map(|(idx, stops)| {
                if stops.is_empty() {
                    return Err(RouteError::UnexpectedResponse(format!(
                        "route {} has no stops",
                        idx
                    )));
                }

                let distance_km = *distances.get(idx).ok_or_else(|| {
                    RouteError::UnexpectedResponse(format!("no distance for route {}", idx))
                })?;
                let hours = *times.get(idx).ok_or_else(|| {
                    RouteError::UnexpectedResponse(format!("no time for route {}", idx))
                })?;

                Ok(CandidateRoute {
                    stops,
                    metrics: RouteMetrics { distance_km, hours },
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteOutcome::from_candidates(candidates))
    }
}

/// Turns whatever the route endpoint sent back into an outcome. Both the browser and the native
/// client funnel their responses through here.
pub fn interpret_route_response(status: u16, body: &str) -> Result<RouteOutcome, RouteError> {
    if !(200..300).contains(&status) {
        return match serde_json::from_str::<ServiceRejection>(body) {
            Ok(rejection) => Err(RouteError::Rejected {
                status,
                description: rejection.description,
            }),
            Err(_) => Err(RouteError::BadStatus(status)),
        };
    }

    let response: RouteResponse = serde_json::from_str(body)
        .map_err(|e| RouteError::UnexpectedResponse(e.to_string()))?;

    response.into_outcome()
}

//! Browser transport. Fetches with `web-sys` and hands (status, body) to the shared interpreters.

use pathfinder_shared::{
    interpret_airports, interpret_route_response, AirportError, AirportList, RouteError,
    RouteOutcome, RouteQuery, ServiceConfig,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

async fn get(url: &str, mode: RequestMode) -> Result<(u16, Option<String>), JsValue> {
    let mut opts = RequestInit::new();
    opts.method("GET");
    opts.mode(mode);

    let request = Request::new_with_str_and_init(url, &opts)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let body = JsFuture::from(resp.text()?).await?.as_string();

    Ok((status, body))
}

pub async fn fetch_routes(
    config: &ServiceConfig,
    query: &RouteQuery,
) -> Result<RouteOutcome, RouteError> {
    let url = query.route_url(&config.route_base)?;

    let (status, body) = get(url.as_str(), RequestMode::Cors)
        .await
        .map_err(|e| RouteError::Unreachable(format!("{:?}", e)))?;
    let body = body.ok_or_else(|| RouteError::UnexpectedResponse("body is not text".to_string()))?;

    interpret_route_response(status, &body)
}

/// Same-origin fetch of the airport list.
pub async fn fetch_airports(config: &ServiceConfig) -> Result<AirportList, AirportError> {
    let (status, body) = get(&config.airports_path, RequestMode::SameOrigin)
        .await
        .map_err(|e| AirportError::Unreachable(format!("{:?}", e)))?;

    interpret_airports(status, body.as_deref())
}

//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::assistant::Reply;
use crate::error::TransitError;
use crate::transport::Transport;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<T: Transport + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat::<T>))
        .route("/rail/stations", get(rail_stations::<T>))
        .route("/rail/departures", get(rail_departures::<T>))
        .route("/rail/plan", get(rail_plan::<T>))
        .route("/bus/routes", get(bus_routes::<T>))
        .route("/bus/departures", get(bus_departures::<T>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Answer a free-text message.
async fn chat<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<Reply>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "text must not be empty".to_string(),
        });
    }

    let reply = state.assistant.respond(&req.text).await?;
    Ok(Json(reply))
}

/// All known rail station names.
async fn rail_stations<T: Transport + 'static>(
    State(state): State<AppState<T>>,
) -> Json<StationListResponse> {
    let stations = state
        .assistant
        .rail()
        .stations()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(StationListResponse { stations })
}

/// All route titles of the configured agency.
async fn bus_routes<T: Transport + 'static>(
    State(state): State<AppState<T>>,
) -> Json<RouteListResponse> {
    let directory = state.assistant.bus().routes();
    let routes = directory.titles().into_iter().map(str::to_string).collect();

    Json(RouteListResponse {
        agency: directory.agency().to_string(),
        routes,
    })
}

async fn rail_departures<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Query(req): Query<RailDeparturesRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let line = req.line.as_deref().filter(|l| !l.trim().is_empty());
    let departures = state
        .assistant
        .rail()
        .query_rail_departure(&req.origin, line)
        .await?;

    Ok(Json(DeparturesResponse { departures }))
}

async fn rail_plan<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Query(req): Query<RailPlanRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let departures = state
        .assistant
        .rail()
        .plan_first_leg(&req.origin, &req.destination)
        .await?;

    Ok(Json(DeparturesResponse { departures }))
}

async fn bus_departures<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Query(req): Query<BusDeparturesRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let direction = req.direction.as_deref().filter(|d| !d.trim().is_empty());
    let departures = state
        .assistant
        .bus()
        .query_bus_departure(&req.route, &req.stop, direction)
        .await?;

    Ok(Json(DeparturesResponse { departures }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// An upstream provider failed or sent something unreadable.
    Upstream { message: String },
}

impl From<TransitError> for AppError {
    fn from(e: TransitError) -> Self {
        match e {
            TransitError::Lookup(_) => AppError::NotFound {
                message: e.to_string(),
            },
            TransitError::Transport(_) | TransitError::Malformed(_) => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::assistant::Assistant;
    use crate::bart::{BartClient, BartConfig, RailService};
    use crate::fixtures;
    use crate::intent::{WitClient, WitConfig};
    use crate::nextbus::{BusService, NextBusClient, NextBusConfig};
    use crate::transport::MockTransport;

    async fn app() -> Router {
        let bart = MockTransport::new()
            .respond(&[("cmd", "stns")], fixtures::BART_STATIONS)
            .respond(&[("cmd", "etd"), ("orig", "FRMT")], fixtures::BART_ETD_FRMT)
            .respond(&[("cmd", "etd"), ("orig", "DBRK")], fixtures::BART_ETD_DBRK)
            .respond(&[("cmd", "arrive")], fixtures::BART_TRIP_DBRK_FRMT);
        let nextbus = MockTransport::new()
            .respond(&[("command", "routeList")], fixtures::NEXTBUS_ROUTES)
            .respond(&[("command", "routeConfig")], fixtures::NEXTBUS_ROUTE_57)
            .respond(&[("s", "1002650")], fixtures::NEXTBUS_PREDICTIONS_1002650)
            .respond(&[("s", "1002660")], fixtures::NEXTBUS_PREDICTIONS_1002660)
            .fail(&[("s", "9902310")], 503);
        let wit = MockTransport::new().respond(&[], fixtures::WIT_BART_QUERY);

        let rail = RailService::build(BartClient::new(BartConfig::new("k"), bart))
            .await
            .unwrap();
        let bus = BusService::build(NextBusClient::new(NextBusConfig::default(), nextbus))
            .await
            .unwrap();
        let classifier = WitClient::new(WitConfig::new("t"), wit);

        create_router(AppState::new(Assistant::new(classifier, rail, bus)))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .await
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_chat(body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().await.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn chat_returns_reply_and_intent() {
        let (status, body) = post_chat(json!({ "text": "bart from berkeley to fremont" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intent"]["type"], "rail_query");
        assert_eq!(body["departures"], json!({ "WARM SPRINGS": [11, 26] }));
        assert!(body["text"].as_str().unwrap().contains("WARM SPRINGS"));
    }

    #[tokio::test]
    async fn empty_chat_is_bad_request() {
        let (status, body) = post_chat(json!({ "text": "  " })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "text must not be empty");
    }

    #[tokio::test]
    async fn rail_departures_with_line() {
        let (status, body) = get_json("/rail/departures?origin=Fremont&line=Daly%20City").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "departures": { "DALY CITY": ["Leaving", 15, 30] } })
        );
    }

    #[tokio::test]
    async fn rail_departures_unknown_station_is_not_found() {
        let (status, body) = get_json("/rail/departures?origin=Atlantis").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no such station: ATLANTIS");
    }

    #[tokio::test]
    async fn rail_plan() {
        let (status, body) = get_json("/rail/plan?origin=Downtown%20Berkeley&destination=Fremont").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["departures"], json!({ "WARM SPRINGS": [11, 26] }));
    }

    #[tokio::test]
    async fn rail_stations_sorted() {
        let (status, body) = get_json("/rail/stations").await;

        assert_eq!(status, StatusCode::OK);
        let stations = body["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 9);
        assert_eq!(stations[0], "12TH ST. OAKLAND CITY CENTER");
    }

    #[tokio::test]
    async fn bus_routes_sorted() {
        let (status, body) = get_json("/bus/routes").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "agency": "actransit", "routes": ["51B", "57", "NL"] })
        );
    }

    #[tokio::test]
    async fn bus_departures() {
        let (status, body) =
            get_json("/bus/departures?route=57&stop=40th%20St%20%26%20Telegraph%20Av&direction=To%20Foothill%20Square")
                .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "departures": { "To Foothill Square": [4, 19] } })
        );
    }

    #[tokio::test]
    async fn bus_upstream_failure_is_bad_gateway() {
        let (status, _) = get_json("/bus/departures?route=57&stop=Foothill%20Square").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}

//! Router tests for the declination endpoint, using an in-memory ephemeris

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use deklination::config::DEFAULT_ROUTE;
use deklination::ephemeris::{Ephemeris, EphemerisError, EquatorialPosition};
use deklination::models::CelestialBody;
use deklination::{router, AppState};

/// Deterministic ephemeris that counts how often it is consulted
#[derive(Default)]
struct CountingEphemeris {
    julian_day_calls: AtomicUsize,
    position_calls: AtomicUsize,
    fail_on: Option<CelestialBody>,
}

impl CountingEphemeris {
    fn failing_on(body: CelestialBody) -> Self {
        Self {
            fail_on: Some(body),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.julian_day_calls.load(Ordering::SeqCst) + self.position_calls.load(Ordering::SeqCst)
    }
}

impl Ephemeris for CountingEphemeris {
    fn julian_day(&self, year: i32, month: i32, day: i32, hour: f64) -> f64 {
        self.julian_day_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(hour, 0.0);
        2415020.5 + ((year - 1900) * 372 + (month - 1) * 31 + (day - 1)) as f64
    }

    fn equatorial_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<EquatorialPosition, EphemerisError> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(body) {
            return Err(EphemerisError::Calculation {
                body: body.key(),
                message: "SwissEph file 'seas_18.se1' not found in PATH".to_string(),
            });
        }
        let declination = match body {
            CelestialBody::Sun => -21.4567891234,
            CelestialBody::Jupiter => 0.0,
            _ => ((julian_day + body.swe_id() as f64 * 37.0) % 50.0) - 25.0,
        };
        Ok(EquatorialPosition {
            right_ascension: 0.0,
            declination,
            distance: 1.0,
        })
    }
}

fn app(ephemeris: Arc<CountingEphemeris>) -> Router {
    router(AppState::new(ephemeris), DEFAULT_ROUTE)
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["vary"],
        "Origin, Access-Control-Request-Headers, Access-Control-Request-Method"
    );
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert!(headers.contains_key("access-control-allow-headers"));
    assert_eq!(headers["access-control-max-age"], "86400");
}

#[tokio::test]
async fn test_valid_date_returns_all_bodies() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let response = send(
        app(ephemeris.clone()),
        get("/api/declinations?date=2026-01-13"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);

    let json = json_body(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["meta"]["date"], "2026-01-13");
    assert_eq!(json["meta"]["ut"], "00:00");
    assert!(json["meta"]["tjd"].is_f64());
    assert!(!json["meta"]["note"].as_str().unwrap().is_empty());

    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["body"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Sonne", "Mond", "Merkur", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptun",
            "Pluto", "Chiron"
        ]
    );

    assert_eq!(ephemeris.julian_day_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ephemeris.position_calls.load(Ordering::SeqCst), 11);
}

#[tokio::test]
async fn test_entry_formatting() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let response = send(app(ephemeris), get("/api/declinations?date=2026-01-13")).await;
    let json = json_body(response).await;

    let sun = &json["data"][0];
    assert_eq!(sun["declination_deg"], -21.456789);
    assert_eq!(sun["declination_text"], "-21.46°");
    assert_eq!(sun["hemisphere"], "Südlich (-)");

    let jupiter = &json["data"][5];
    assert_eq!(jupiter["declination_text"], "0.00°");
    assert_eq!(jupiter["hemisphere"], "Äquator (0)");

    for entry in json["data"].as_array().unwrap() {
        let deg = entry["declination_deg"].as_f64().unwrap();
        assert!(deg.is_finite());

        let expected_text = format!("{:.2}°", (deg * 100.0 + 0.5).floor() / 100.0);
        assert_eq!(entry["declination_text"], expected_text.as_str());

        let expected_hemisphere = if deg > 0.0 {
            "Nördlich (+)"
        } else if deg < 0.0 {
            "Südlich (-)"
        } else {
            "Äquator (0)"
        };
        assert_eq!(entry["hemisphere"], expected_hemisphere);
    }
}

#[tokio::test]
async fn test_invalid_dates_are_rejected_without_computation() {
    let ephemeris = Arc::new(CountingEphemeris::default());

    for uri in [
        "/api/declinations",
        "/api/declinations?",
        "/api/declinations?date=",
        "/api/declinations?day=2026-01-13",
        "/api/declinations?date=2026-13-01",
        "/api/declinations?date=2026-00-01",
        "/api/declinations?date=2026-01-32",
        "/api/declinations?date=2026-01-00",
        "/api/declinations?date=1899-12-31",
        "/api/declinations?date=2051-01-01",
        "/api/declinations?date=2026-1-13",
        "/api/declinations?date=13.01.2026",
        "/api/declinations?date=2026-01-13T00:00",
        "/api/declinations?date=%202026-01-13",
    ] {
        let response = send(app(ephemeris.clone()), get(uri)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_cors(&response);

        let json = json_body(response).await;
        assert_eq!(json["ok"], false, "{uri}");
        assert!(!json["error"].as_str().unwrap().is_empty(), "{uri}");
    }

    assert_eq!(ephemeris.calls(), 0);
}

#[tokio::test]
async fn test_validation_message() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let response = send(app(ephemeris), get("/api/declinations")).await;
    let json = json_body(response).await;
    assert_eq!(
        json["error"],
        "Bitte \"date=YYYY-MM-DD\" angeben (1900–2050). Beispiel: ?date=2026-01-13"
    );
}

#[tokio::test]
async fn test_month_length_is_not_cross_checked() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let response = send(app(ephemeris), get("/api/declinations?date=2026-04-31")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_year_bounds_are_inclusive() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    for date in ["1900-01-01", "2050-12-31"] {
        let uri = format!("/api/declinations?date={date}");
        let response = send(app(ephemeris.clone()), get(&uri)).await;
        assert_eq!(response.status(), StatusCode::OK, "{date}");
    }
}

#[tokio::test]
async fn test_first_date_parameter_wins() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let response = send(
        app(ephemeris),
        get("/api/declinations?date=2026-01-13&date=bogus"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["meta"]["date"], "2026-01-13");
}

#[tokio::test]
async fn test_preflight() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/declinations?date=not-a-date")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "X-Custom, Content-Type")
        .body(Body::empty())
        .unwrap();

    let response = send(app(ephemeris.clone()), request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors(&response);
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "X-Custom, Content-Type"
    );

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert!(body.is_empty());
    assert_eq!(ephemeris.calls(), 0);
}

#[tokio::test]
async fn test_default_allow_headers() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let response = send(app(ephemeris), get("/api/declinations?date=2026-01-13")).await;
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "Content-Type, Accept, X-Requested-With, Authorization"
    );
}

#[tokio::test]
async fn test_post_behaves_like_get() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let request = Request::builder()
        .method("POST")
        .uri("/api/declinations?date=2026-01-13")
        .body(Body::empty())
        .unwrap();

    let response = send(app(ephemeris), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let json = json_body(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn test_ephemeris_failure_is_500_without_partial_data() {
    let ephemeris = Arc::new(CountingEphemeris::failing_on(CelestialBody::Chiron));
    let response = send(
        app(ephemeris.clone()),
        get("/api/declinations?date=2026-01-13"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);

    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert!(json["error"].as_str().unwrap().contains("seas_18.se1"));
    assert!(json.get("data").is_none());
    assert_eq!(ephemeris.position_calls.load(Ordering::SeqCst), 11);
}

#[tokio::test]
async fn test_failure_aborts_remaining_bodies() {
    let ephemeris = Arc::new(CountingEphemeris::failing_on(CelestialBody::Moon));
    let response = send(
        app(ephemeris.clone()),
        get("/api/declinations?date=2026-01-13"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ephemeris.position_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let first = json_body(
        send(
            app(ephemeris.clone()),
            get("/api/declinations?date=1987-07-04"),
        )
        .await,
    )
    .await;
    let second = json_body(
        send(
            app(ephemeris.clone()),
            get("/api/declinations?date=1987-07-04"),
        )
        .await,
    )
    .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_health_and_unknown_routes_carry_cors() {
    let ephemeris = Arc::new(CountingEphemeris::default());

    let response = send(app(ephemeris.clone()), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");

    let response = send(app(ephemeris), get("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
}

#[tokio::test]
async fn test_custom_route() {
    let ephemeris = Arc::new(CountingEphemeris::default());
    let app = router(AppState::new(ephemeris), "/deklination");

    let response = send(app.clone(), get("/deklination?date=2026-01-13")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(app, get("/api/declinations?date=2026-01-13")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

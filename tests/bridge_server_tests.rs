use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use weather_agent::{
    agent::{Agent, NotifyDecision},
    bridge::{AppState, WeatherService, router},
    tool::{BridgeWeatherClient, WeatherToolRequest},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

mod common;
use common::{bridge_config_for, bridge_tool_config};

async fn mount_austin(upstream: &MockServer, weathercode: u32) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "Austin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "30.27", "lon": "-97.74", "display_name": "Austin, Texas"}
        ])))
        .mount(upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "30.27"))
        .and(query_param("longitude", "-97.74"))
        .and(query_param("current_weather", "true"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": 30.27,
            "longitude": -97.74,
            "current_weather": {
                "temperature": 22.0,
                "windspeed": 10.0,
                "winddirection": 180,
                "weathercode": weathercode
            }
        })))
        .mount(upstream)
        .await;
}

fn test_server(upstream: &MockServer) -> TestServer {
    let weather = WeatherService::new(&bridge_config_for(&upstream.uri())).unwrap();
    TestServer::new(router(AppState {
        weather: Arc::new(weather),
    }))
    .unwrap()
}

#[tokio::test]
async fn test_run_tool_returns_weather_payload() {
    let upstream = MockServer::start().await;
    mount_austin(&upstream, 3).await;
    let server = test_server(&upstream);

    let response = server
        .post("/run-tool")
        .json(&WeatherToolRequest::for_city("Austin"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "location": {"name": "Austin", "lat": 30.27, "lon": -97.74},
            "current": {"temp_c": 22.0, "wind_kph": 10.0, "condition": {"text": "Overcast"}}
        })
    );
}

#[rstest]
#[case::empty(json!([]))]
#[case::string(json!("get-weather"))]
#[case::object(json!({"name": "get-weather"}))]
#[case::null(Value::Null)]
#[tokio::test]
async fn test_run_tool_requires_tools(#[case] tools: Value) {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream);

    let response = server
        .post("/run-tool")
        .json(&json!({
            "messages": [{"role": "user", "content": "Get the weather information for Austin"}],
            "tools": tools
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Tools parameter must be a non-empty array"})
    );
}

#[tokio::test]
async fn test_run_tool_without_tools_field() {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream);

    let response = server
        .post("/run-tool")
        .json(&json!({"messages": [{"role": "user", "content": "Weather for Austin"}]}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_city_is_server_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server
        .post("/run-tool")
        .json(&WeatherToolRequest::for_city("Atlantis"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("City not found"));
}

#[tokio::test]
async fn test_forecast_outage_is_server_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"lat": "30.27", "lon": "-97.74"}])),
        )
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server
        .post("/run-tool")
        .json(&WeatherToolRequest::for_city("Austin"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream);

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("ok");
}

/// Agent -> bridge client -> bridge service -> upstream providers
#[tokio::test]
async fn test_agent_end_to_end_through_bridge() {
    let upstream = MockServer::start().await;
    mount_austin(&upstream, 0).await;

    let weather = WeatherService::new(&bridge_config_for(&upstream.uri())).unwrap();
    let app = router(AppState {
        weather: Arc::new(weather),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client =
        BridgeWeatherClient::new(&bridge_tool_config(format!("http://{}/run-tool", addr))).unwrap();
    let report = Agent::new("WeatherAgent1", "Austin", Box::new(client))
        .run()
        .await;

    assert!(report.succeeded());
    assert_eq!(
        report.decision,
        Some(NotifyDecision::Skipped {
            condition: "Clear sky".to_string()
        })
    );
    assert_eq!(
        report.notification.as_deref(),
        Some("Current weather in Austin:\nTemperature: 22°C\nCondition: Clear sky\nWind Speed: 10 km/h")
    );
}

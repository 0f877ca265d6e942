use chrono::{TimeZone, Utc};
use fallertrack_api::{
    home::{delete_home, get_home, save_home},
    sos::{get_sos_locations, send_alert},
    summary::summarize,
    tracking::{get_current_location, get_fall_notification},
    ApiError, FallertrackClient,
};
use mockito::Matcher;
use serde_json::json;
use ui_common::{ActivitySummary, Coordinate, HomeUpdate, SummaryRequest};

#[tokio::test]
async fn home_location_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let get = server
        .mock("GET", "/api/home")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"latitude":-6.2,"longitude":106.8,"radius":600,"nama":"Panti Werdha","time":"2024-11-20T08:30:00Z"}"#,
        )
        .create_async()
        .await;
    let post = server
        .mock("POST", "/api/home")
        .match_body(Matcher::Json(json!({
            "latitude": -6.21,
            "longitude": 106.81,
            "radius": 350.0
        })))
        .with_status(201)
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();

    let home = get_home(&client).await.unwrap();
    assert_eq!(home.name, "Panti Werdha");
    assert_eq!(home.radius, 600.0);
    assert_eq!(home.last_update_display(), "2024-11-20 08:30:00 UTC");

    let update = HomeUpdate::new(Coordinate::new(-6.21, 106.81), 350.0);
    save_home(&client, &update).await.unwrap();

    get.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/home")
        .with_status(500)
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();
    let res = delete_home(&client).await;

    assert!(matches!(res, Err(ApiError::Request(s)) if s.as_u16() == 500));
    mock.assert_async().await;
}

#[tokio::test]
async fn live_location_and_bad_json() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/current-distance")
        .with_status(200)
        .with_body(r#"{"latitude":-5.363431,"longitude":105.306811,"distance":12.5}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/fall-notification")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();

    let live = get_current_location(&client).await.unwrap();
    assert_eq!(live, Coordinate::new(-5.363431, 105.306811));

    let res = get_fall_notification(&client).await;
    assert!(matches!(res, Err(ApiError::JsonDecodeError(_))));
}

#[tokio::test]
async fn partial_fall_notification_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/fall-notification")
        .with_status(200)
        .with_body(
            r#"{
                "latitude": -5.36,
                "longitude": 105.3,
                "elderlyInfo": {"name": "Siti"},
                "fallDetectionStatus": {
                    "status": true,
                    "message": "Fall detected",
                    "timestamp": {"_seconds": 1732091400, "_nanoseconds": 0}
                }
            }"#,
        )
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();
    let notification = get_fall_notification(&client).await.unwrap();

    assert!(notification.is_active());
    assert_eq!(notification.elderly_info.name, "Siti");
    assert_eq!(
        notification.detected_at(),
        Utc.timestamp_opt(1732091400, 0).single()
    );
}

#[tokio::test]
async fn sos_locations_send_search_radius() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/sos-location")
        .match_body(Matcher::Json(json!({ "radius": 5000 })))
        .with_status(200)
        .with_body(
            r#"{"results":[{"place_id":"ChIJ1","name":"RS Urip Sumoharjo","vicinity":"Jl. Urip Sumoharjo","geometry":{"location":{"lat":-5.38,"lng":105.27}}}]}"#,
        )
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();
    let locations = get_sos_locations(&client, 5000).await.unwrap();

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].place_id, "ChIJ1");
    assert_eq!(locations[0].position(), Coordinate::new(-5.38, 105.27));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_results_means_no_locations() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/sos-location")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();
    assert!(get_sos_locations(&client, 1000).await.unwrap().is_empty());
}

#[tokio::test]
async fn alert_accepts_empty_ack() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/alert")
        .match_body(Matcher::Json(json!({ "sos": true })))
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();
    send_alert(&client, true).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn summary_request_uses_date_window() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/summarize")
        .match_body(Matcher::Json(json!({
            "limit": 10,
            "startDate": "2024-11-19",
            "endDate": "2024-11-20"
        })))
        .with_status(200)
        .with_body(json!({
            "text": "```json\n{\"location\":\"Stayed home\",\"fallDetection\":\"No falls\",\"distance\":{\"max\":\"120 m\"}}\n```"
        }).to_string())
        .create_async()
        .await;

    let client = FallertrackClient::new(&server.url()).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 11, 20, 9, 0, 0).unwrap();
    let text = summarize(&client, &SummaryRequest::last_day(now, 10))
        .await
        .unwrap();

    let summary = ActivitySummary::parse(&text).unwrap();
    assert_eq!(summary.location.lines, vec!["Stayed home"]);
    assert_eq!(summary.fall_detection.lines, vec!["No falls"]);
    assert_eq!(summary.distance.lines, vec!["max: 120 m"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_backend_is_a_connection_error() {
    let client = FallertrackClient::new("http://127.0.0.1:1").unwrap();
    let res = get_home(&client).await;
    assert!(matches!(res, Err(ApiError::Connection(_))));
}

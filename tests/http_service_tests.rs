use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use timetabler::core::config::ResponseShape;
use timetabler::service::{HttpTimetableService, ServiceError, TimetableService};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

async fn mount_timetables(server: &MockServer, requested: &[&str], response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/get-module-timetables"))
        .and(body_json(json!(requested)))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_fetch_catalog_returns_display_strings_in_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-module-names"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "ACCT0001 - Accounting Placement Bootcamp (L1)",
            "COMP2181 - Programming Paradigms (L2)",
        ])))
        .mount(&mock_server)
        .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let catalog = service.fetch_catalog().await.unwrap();

    assert_eq!(
        catalog,
        vec![
            "ACCT0001 - Accounting Placement Bootcamp (L1)",
            "COMP2181 - Programming Paradigms (L2)",
        ]
    );
}

#[tokio::test]
async fn test_base_url_with_path_and_trailing_slash() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-module-names"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/api/", mock_server.uri());
    let service = HttpTimetableService::new(&base, ResponseShape::Keyed);

    assert!(service.fetch_catalog().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_catalog_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-module-names"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .mount(&mock_server)
        .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let err = service.fetch_catalog().await.unwrap_err();

    assert_eq!(
        err,
        ServiceError::Api {
            status: 500,
            message: "database offline".to_string()
        }
    );
}

#[tokio::test]
async fn test_fetch_catalog_malformed_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-module-names"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let err = assert_err!(service.fetch_catalog().await);

    assert!(matches!(err, ServiceError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Port 1 is reserved and nothing listens there.
    let service = HttpTimetableService::new("http://127.0.0.1:1", ResponseShape::Keyed);
    let err = service.fetch_catalog().await.unwrap_err();

    assert!(matches!(err, ServiceError::Network(_)));
}

// ============================================================================
// Timetables
// ============================================================================

#[tokio::test]
async fn test_fetch_timetables_keyed_response() {
    let mock_server = MockServer::start().await;
    mount_timetables(
        &mock_server,
        &["ACCT0001", "MATH1061"],
        ResponseTemplate::new(200).set_body_json(json!({
            "ACCT0001": {"Monday": []},
            "MATH1061": {"Tuesday": []},
        })),
    )
    .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let timetable = service
        .fetch_timetables(&codes(&["ACCT0001", "MATH1061"]))
        .await
        .unwrap();

    assert_eq!(timetable.len(), 2);
    assert_eq!(timetable["ACCT0001"].as_value(), &json!({"Monday": []}));
    assert_eq!(timetable["MATH1061"].as_value(), &json!({"Tuesday": []}));
}

#[tokio::test]
async fn test_fetch_timetables_positional_response() {
    let mock_server = MockServer::start().await;
    mount_timetables(
        &mock_server,
        &["MATH1061", "ACCT0001"],
        ResponseTemplate::new(200).set_body_json(json!([{"n": 1}, {"n": 2}])),
    )
    .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Positional);
    let timetable = service
        .fetch_timetables(&codes(&["MATH1061", "ACCT0001"]))
        .await
        .unwrap();

    assert_eq!(timetable["MATH1061"].as_value(), &json!({"n": 1}));
    assert_eq!(timetable["ACCT0001"].as_value(), &json!({"n": 2}));
}

#[tokio::test]
async fn test_fetch_timetables_drops_unrequested_keys() {
    let mock_server = MockServer::start().await;
    mount_timetables(
        &mock_server,
        &["ACCT0001"],
        ResponseTemplate::new(200).set_body_json(json!({
            "ACCT0001": [],
            "ZZZZ9999": [],
        })),
    )
    .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let timetable = service.fetch_timetables(&codes(&["ACCT0001"])).await.unwrap();

    assert_eq!(timetable.len(), 1);
    assert!(timetable.contains_key("ACCT0001"));
}

#[tokio::test]
async fn test_fetch_timetables_missing_code_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_timetables(
        &mock_server,
        &["ACCT0001", "MATH1061"],
        ResponseTemplate::new(200).set_body_json(json!({"ACCT0001": []})),
    )
    .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let err = service
        .fetch_timetables(&codes(&["ACCT0001", "MATH1061"]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Parse("response missing timetable for MATH1061".to_string())
    );
}

#[tokio::test]
async fn test_fetch_timetables_wrong_shape_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_timetables(
        &mock_server,
        &["ACCT0001"],
        ResponseTemplate::new(200).set_body_json(json!([[]])),
    )
    .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let err = service
        .fetch_timetables(&codes(&["ACCT0001"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_timetables_server_error() {
    let mock_server = MockServer::start().await;
    mount_timetables(
        &mock_server,
        &["ACCT0001"],
        ResponseTemplate::new(502).set_body_string("bad gateway"),
    )
    .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);
    let err = service
        .fetch_timetables(&codes(&["ACCT0001"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Api { status: 502, .. }));
}

// ============================================================================
// Credential check
// ============================================================================

#[tokio::test]
async fn test_validate_credentials() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/validate/abcd12/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/validate/abcd12/wrong"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&mock_server)
        .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);

    assert!(assert_ok!(service.validate_credentials("abcd12", "secret").await));
    assert!(!assert_ok!(service.validate_credentials("abcd12", "wrong").await));
}

#[tokio::test]
async fn test_validate_credentials_encodes_path_segments() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/validate/abcd12/pa%2Fss"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = HttpTimetableService::new(&mock_server.uri(), ResponseShape::Keyed);

    assert!(service.validate_credentials("abcd12", "pa/ss").await.unwrap());
}

use serde_json::json;
use spel_core::config::EvaluatorConfig;
use spel_core::{AnalysisSession, ClientError, EvaluationClient, EvaluationResponse, InputKind};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submittable_session() -> AnalysisSession {
    let mut session = AnalysisSession::new().edit("get('city').equals(get('country'))");
    session.set_value("city", "London").unwrap();
    session.set_input_kind("country", InputKind::Null).unwrap();
    session
}

#[tokio::test]
async fn test_evaluate_posts_expression_and_bindings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/evaluate"))
        .and(body_json(json!({
            "expression": "get('city').equals(get('country'))",
            "keys": { "city": "London", "country": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "false" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = EvaluationClient::new(&format!("{}/api/evaluate", server.uri()));
    let request = submittable_session().evaluation_request().unwrap();
    let response = client.evaluate(&request).await.unwrap();

    assert_eq!(
        response,
        EvaluationResponse {
            result: "false".to_string(),
            error: None,
        }
    );
}

#[tokio::test]
async fn test_evaluation_error_is_returned_as_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "",
            "error": "Method call: Method fooBar() cannot be found"
        })))
        .mount(&server)
        .await;

    let config = EvaluatorConfig {
        url: format!("{}/api/evaluate", server.uri()),
        timeout_seconds: 5,
    };
    let client = EvaluationClient::from_config(&config).unwrap();
    let request = submittable_session().evaluation_request().unwrap();
    let response = client.evaluate(&request).await.unwrap();

    assert!(response.is_error());
}

#[tokio::test]
async fn test_server_failure_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = EvaluationClient::new(&server.uri());
    let request = submittable_session().evaluation_request().unwrap();
    let err = client.evaluate(&request).await.unwrap_err();

    assert!(matches!(err, ClientError::ServerError { status: 500 }));
}

#[tokio::test]
async fn test_unreachable_service() {
    // Nothing listens on the discard port.
    let client = EvaluationClient::new("http://127.0.0.1:9/api/evaluate");
    let request = submittable_session().evaluation_request().unwrap();
    let err = client.evaluate(&request).await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    let shown = EvaluationResponse::connection_failure(&err);
    assert!(shown
        .error
        .unwrap()
        .starts_with("Failed to connect to the server"));
}

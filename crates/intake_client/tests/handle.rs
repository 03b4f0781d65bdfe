use std::time::Duration;

use intake_client::{ClientEvent, ClientHandle, DocumentUpload, FinalizeRequest, ServiceSettings};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ServiceSettings {
    ServiceSettings {
        base_url: Url::parse(&server.uri()).expect("server url"),
        ..ServiceSettings::default()
    }
}

async fn wait_for_event(handle: &ClientHandle) -> ClientEvent {
    for _ in 0..250 {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("no client event within the deadline");
}

#[tokio::test]
async fn parse_completion_echoes_the_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse-document"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parsed_result": { "a": 1 },
        })))
        .mount(&server)
        .await;

    let handle = ClientHandle::new(settings_for(&server));
    handle.submit_parse(
        7,
        DocumentUpload {
            file_name: "data.csv".to_string(),
            media_type: "text/csv".to_string(),
            bytes: b"col_a\n1\n".to_vec(),
        },
        "form_941",
    );

    let event = wait_for_event(&handle).await;
    let ClientEvent::ParseFinished { request_id, result } = event else {
        panic!("unexpected event {event:?}");
    };
    assert_eq!(request_id, 7);
    let response = result.expect("parse ok");
    assert_eq!(response.parsed_result.get("a"), Some(&json!(1)));
}

#[tokio::test]
async fn finalize_completion_echoes_the_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/finalize-parsed-fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let handle = ClientHandle::new(settings_for(&server));
    handle.submit_finalize(
        9,
        FinalizeRequest {
            document_name: "report.pdf".to_string(),
            document_type: "form_941".to_string(),
            parsed_fields: [("employer".to_string(), "acme".to_string())].into(),
        },
    );

    let event = wait_for_event(&handle).await;
    let ClientEvent::FinalizeFinished { request_id, result } = event else {
        panic!("unexpected event {event:?}");
    };
    assert_eq!(request_id, 9);
    assert_eq!(result, Ok(()));
}

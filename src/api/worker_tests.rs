use std::sync::mpsc::channel;
use std::time::Duration;

use super::*;

#[test]
fn test_error_response_preserves_request_id() {
    let request = ApiRequest::Suggest {
        query: "RELI".to_string(),
        request_id: 7,
    };
    match error_response(&request, "boom") {
        ApiResponse::Suggest { request_id, result } => {
            assert_eq!(request_id, 7);
            assert!(result.is_err());
        }
        other => panic!("unexpected response: {:?}", other),
    }

    let request = ApiRequest::Quote {
        query: "AAPL".to_string(),
        request_id: 3,
    };
    match error_response(&request, "boom") {
        ApiResponse::Quote { request_id, result } => {
            assert_eq!(request_id, 3);
            assert!(result.is_err());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn test_worker_reports_network_error_for_unreachable_host() {
    let (request_tx, request_rx) = channel();
    let (response_tx, response_rx) = channel();

    // Port 9 (discard) is not listening; the request fails fast with a
    // connection error rather than hanging
    spawn_worker("http://127.0.0.1:9".to_string(), request_rx, response_tx);

    request_tx
        .send(ApiRequest::Suggest {
            query: "XYZ".to_string(),
            request_id: 1,
        })
        .unwrap();

    let response = response_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("worker should respond");
    match response {
        ApiResponse::Suggest { request_id, result } => {
            assert_eq!(request_id, 1);
            assert!(result.is_err());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn test_worker_shuts_down_when_request_channel_closes() {
    let (request_tx, request_rx) = channel();
    let (response_tx, response_rx) = channel();

    spawn_worker("http://127.0.0.1:9".to_string(), request_rx, response_tx);
    drop(request_tx);

    // Worker exits its loop and drops the response sender
    assert!(
        response_rx.recv_timeout(Duration::from_secs(10)).is_err(),
        "no responses expected after channel close"
    );
}

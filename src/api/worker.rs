//! API worker thread
//!
//! Handles Yahoo Finance requests in a background thread so the UI never
//! blocks on the network. Receives requests via channel, performs the HTTP
//! calls on a current-thread tokio runtime, and sends tagged responses back
//! to the main thread.
//!
//! In-flight requests are never cancelled; supersession is handled on the
//! receiving side by comparing each response's request id against the
//! latest issued one.

use std::sync::mpsc::{Receiver, Sender};

use super::client::YahooClient;
use super::types::{ApiRequest, ApiResponse};
use crate::error::TiqError;

/// Suggestion result cap, matching the popup's visible row limit.
pub const SUGGEST_COUNT: u32 = 10;

/// Spawn the API worker thread.
///
/// The worker processes requests sequentially until the request channel is
/// closed. Send failures on the response channel mean the main thread is
/// gone, so they are ignored.
pub fn spawn_worker(
    base_url: String,
    request_rx: Receiver<ApiRequest>,
    response_tx: Sender<ApiResponse>,
) {
    let client_result = YahooClient::new(base_url);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                #[cfg(debug_assertions)]
                log::error!("Failed to create API worker runtime: {}", e);
                drain_with_error(&request_rx, &response_tx, &e.to_string());
                return;
            }
        };

        rt.block_on(worker_loop(client_result, request_rx, response_tx));
    });
}

/// Answer every request with a network error when the worker cannot start.
fn drain_with_error(
    request_rx: &Receiver<ApiRequest>,
    response_tx: &Sender<ApiResponse>,
    message: &str,
) {
    while let Ok(request) = request_rx.recv() {
        let _ = response_tx.send(error_response(&request, message));
    }
}

fn error_response(request: &ApiRequest, message: &str) -> ApiResponse {
    match request {
        ApiRequest::Suggest { request_id, .. } => ApiResponse::Suggest {
            request_id: *request_id,
            result: Err(TiqError::Network(message.to_string())),
        },
        ApiRequest::Quote { request_id, .. } => ApiResponse::Quote {
            request_id: *request_id,
            result: Err(TiqError::Network(message.to_string())),
        },
    }
}

/// Main worker loop; blocking `recv()` is fine in a dedicated thread.
async fn worker_loop(
    client_result: Result<YahooClient, TiqError>,
    request_rx: Receiver<ApiRequest>,
    response_tx: Sender<ApiResponse>,
) {
    let client = match client_result {
        Ok(client) => client,
        Err(e) => {
            drain_with_error(&request_rx, &response_tx, &e.to_string());
            return;
        }
    };

    while let Ok(request) = request_rx.recv() {
        let response = match request {
            ApiRequest::Suggest { query, request_id } => {
                #[cfg(debug_assertions)]
                log::debug!("suggest request {} for {:?}", request_id, query);

                let result = client.search(&query, SUGGEST_COUNT).await;
                ApiResponse::Suggest { request_id, result }
            }
            ApiRequest::Quote { query, request_id } => {
                #[cfg(debug_assertions)]
                log::debug!("quote request {} for {:?}", request_id, query);

                let result = client.quote_for(&query).await;
                ApiResponse::Quote { request_id, result }
            }
        };

        if response_tx.send(response).is_err() {
            break;
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;

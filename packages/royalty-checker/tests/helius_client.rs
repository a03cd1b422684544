//! HeliusClient against a mock indexer served on a local port.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use royalty_checker::{check_royalty_payments, Config, Error, HeliusClient, IndexerApi};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct Reply(StatusCode, Value);

#[derive(Default)]
struct Recorded {
    /// (path, api-key, body)
    requests: Mutex<Vec<(String, Option<String>, Value)>>,
}

struct MockState {
    transactions: Reply,
    metadata: Reply,
    recorded: Arc<Recorded>,
}

async fn transactions(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.recorded.requests.lock().unwrap().push((
        "/v0/transactions".into(),
        query.get("api-key").cloned(),
        body,
    ));
    let Reply(status, value) = state.transactions.clone();
    (status, Json(value))
}

async fn metadata(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.recorded.requests.lock().unwrap().push((
        "/v0/tokens/metadata".into(),
        query.get("api-key").cloned(),
        body,
    ));
    let Reply(status, value) = state.metadata.clone();
    (status, Json(value))
}

/// Start the mock indexer; returns its base URL and the request log.
async fn spawn_indexer(
    transactions_reply: Reply,
    metadata_reply: Reply,
) -> (String, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let state = Arc::new(MockState {
        transactions: transactions_reply,
        metadata: metadata_reply,
        recorded: Arc::clone(&recorded),
    });
    let app = Router::new()
        .route("/v0/transactions", post(transactions))
        .route("/v0/tokens/metadata", post(metadata))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), recorded)
}

fn sale_txn() -> Value {
    json!([{
        "signature": "sig123",
        "type": "NFT_SALE",
        "nativeTransfers": [
            { "fromUserAccount": "Buyer", "toUserAccount": "Seller", "amount": 700 },
            { "fromUserAccount": "Buyer", "toUserAccount": "C1", "amount": 300 }
        ],
        "events": { "nft": { "amount": 1000, "nfts": [{ "mint": "mintABC" }] } }
    }])
}

fn sale_metadata() -> Value {
    json!([{
        "account": "mintABC",
        "onChainData": { "data": {
            "sellerFeeBasisPoints": 500,
            "creators": [{ "address": "C1", "share": 60 }, { "address": "C2", "share": 40 }]
        } }
    }])
}

fn ok(value: Value) -> Reply {
    Reply(StatusCode::OK, value)
}

// --- Single lookups ---

#[tokio::test]
async fn test_parse_transaction_sends_singleton_batch() {
    let (url, recorded) = spawn_indexer(ok(sale_txn()), ok(sale_metadata())).await;
    let client = HeliusClient::new(&url).unwrap();

    let txn = client.parse_transaction("sig123", "key-1").await.unwrap();

    assert_eq!(txn.signature, "sig123");
    assert_eq!(txn.native_transfers.len(), 2);
    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "/v0/transactions");
    assert_eq!(requests[0].1.as_deref(), Some("key-1"));
    assert_eq!(requests[0].2, json!({ "transactions": ["sig123"] }));
}

#[tokio::test]
async fn test_token_metadata_sends_mint_accounts() {
    let (url, recorded) = spawn_indexer(ok(sale_txn()), ok(sale_metadata())).await;
    let client = HeliusClient::new(&url).unwrap();

    let meta = client.token_metadata("mintABC", "key-1").await.unwrap();

    assert_eq!(meta.on_chain_data.data.seller_fee_basis_points, 500);
    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests[0].0, "/v0/tokens/metadata");
    assert_eq!(requests[0].2, json!({ "mintAccounts": ["mintABC"] }));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let (url, recorded) = spawn_indexer(ok(sale_txn()), ok(sale_metadata())).await;
    let client = HeliusClient::new(&format!("{url}/")).unwrap();

    client.parse_transaction("sig123", "k").await.unwrap();
    assert_eq!(recorded.requests.lock().unwrap()[0].0, "/v0/transactions");
}

#[tokio::test]
async fn test_first_record_wins() {
    let (url, _) = spawn_indexer(
        ok(json!([{ "signature": "first" }, { "signature": "second" }])),
        ok(sale_metadata()),
    )
    .await;
    let client = HeliusClient::new(&url).unwrap();

    let txn = client.parse_transaction("first", "k").await.unwrap();
    assert_eq!(txn.signature, "first");
}

#[tokio::test]
async fn test_empty_array_is_unexpected_response() {
    let (url, _) = spawn_indexer(ok(json!([])), ok(sale_metadata())).await;
    let client = HeliusClient::new(&url).unwrap();

    let err = client.parse_transaction("sig123", "k").await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_http_error_status_is_api_error() {
    let (url, _) = spawn_indexer(
        Reply(StatusCode::UNAUTHORIZED, json!({ "error": "invalid api key" })),
        ok(sale_metadata()),
    )
    .await;
    let client = HeliusClient::new(&url).unwrap();

    let err = client.parse_transaction("sig123", "bad").await.unwrap_err();
    assert!(matches!(err, Error::Api(_)));
    assert!(err.to_string().contains("401"), "got {err}");
}

#[tokio::test]
async fn test_non_array_body_is_api_error() {
    let (url, _) = spawn_indexer(ok(json!({ "signature": "sig123" })), ok(sale_metadata())).await;
    let client = HeliusClient::new(&url).unwrap();

    let err = client.parse_transaction("sig123", "k").await.unwrap_err();
    assert!(matches!(err, Error::Api(_)), "got {err:?}");
}

// --- Full check ---

#[tokio::test]
async fn test_full_check_over_http() {
    let (url, recorded) = spawn_indexer(ok(sale_txn()), ok(sale_metadata())).await;
    let config = Config {
        api_base_url: url,
        api_key: Some("key-1".into()),
    };
    let client = HeliusClient::from_config(&config).unwrap();
    let mut out = Vec::new();

    let report = check_royalty_payments(&config, &client, "sig123", &mut out)
        .await
        .unwrap();

    assert_eq!(report.expected_royalty, 500.0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "NFT mintABC was purchased. Checking royalties.\n\
         Expecting royalty payment of 500 for the NFT sale.\n\
         300/180 of royalty paid for C1.\n"
    );
    assert_eq!(recorded.requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_full_check_without_key_never_hits_network() {
    let (url, recorded) = spawn_indexer(ok(sale_txn()), ok(sale_metadata())).await;
    let config = Config {
        api_base_url: url,
        api_key: None,
    };
    let client = HeliusClient::from_config(&config).unwrap();
    let mut out = Vec::new();

    let err = check_royalty_payments(&config, &client, "sig123", &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(recorded.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_metadata_failure_aborts_after_purchase_line() {
    let (url, _) = spawn_indexer(
        ok(sale_txn()),
        Reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })),
    )
    .await;
    let config = Config {
        api_base_url: url,
        api_key: Some("k".into()),
    };
    let client = HeliusClient::from_config(&config).unwrap();
    let mut out = Vec::new();

    let err = check_royalty_payments(&config, &client, "sig123", &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api(_)));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "NFT mintABC was purchased. Checking royalties.\n"
    );
}

use serde_json::{json, Value};
use shipment_ledger::core::{Organization, RecordStore, Shipment};
use shipment_ledger::{serve, AppState, InMemoryStore, ServiceError};
use std::sync::Arc;
use tokio::net::TcpListener;

struct TestServer {
    base_url: String,
    state: Arc<AppState>,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::in_memory());
        tokio::spawn(serve(listener, Arc::clone(&state)));

        Self {
            base_url: format!("http://{}", addr),
            state,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client.post(self.url(path)).json(&body).send().await.unwrap()
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }
}

fn shipment_body(reference_id: &str, nodes: Value) -> Value {
    json!({
        "type": "SHIPMENT",
        "referenceId": reference_id,
        "organizations": ["ACME"],
        "transportPacks": { "nodes": nodes }
    })
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

#[tokio::test]
async fn test_total_weight_of_single_pound_shipment_in_kilograms() {
    let server = TestServer::start().await;

    let response = server
        .post(
            "/shipment",
            shipment_body("S1", json!([{"totalWeight": {"weight": 10, "unit": "POUNDS"}}])),
        )
        .await;
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().is_empty());

    let response = server.get("/totalWeight?unit=KILOGRAMS").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_close(body["weight"].as_f64().unwrap(), 4.54);
    assert_eq!(body["unit"], "KILOGRAMS");
}

#[tokio::test]
async fn test_total_weight_defaults_to_kilograms() {
    let server = TestServer::start().await;

    server
        .post(
            "/shipment",
            shipment_body("S1", json!([{"totalWeight": {"weight": "35.274", "unit": "OUNCES"}}])),
        )
        .await;

    let body: Value = server.get("/totalWeight").await.json().await.unwrap();
    assert_close(body["weight"].as_f64().unwrap(), 1.0);
    assert_eq!(body["unit"], "KILOGRAMS");
}

#[tokio::test]
async fn test_total_weight_rejects_unknown_unit() {
    let server = TestServer::start().await;

    for query in ["?unit=GRAMS", "?unit=kilograms", "?unit="] {
        let response = server.get(&format!("/totalWeight{}", query)).await;
        assert_eq!(response.status(), 400, "query {}", query);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "unit is invalid or not supported");
    }
}

#[tokio::test]
async fn test_empty_and_zero_sum_totals_are_both_zero() {
    let server = TestServer::start().await;

    let body: Value = server.get("/totalWeight").await.json().await.unwrap();
    assert_eq!(body["weight"].as_f64().unwrap(), 0.0);

    server
        .post(
            "/shipment",
            shipment_body(
                "S1",
                json!([
                    {"totalWeight": {"weight": 1, "unit": "KILOGRAMS"}},
                    {"totalWeight": {"weight": -1, "unit": "KILOGRAMS"}}
                ]),
            ),
        )
        .await;

    let body: Value = server.get("/totalWeight").await.json().await.unwrap();
    assert_eq!(body["weight"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_shipment_is_replaced_not_merged() {
    let server = TestServer::start().await;

    server
        .post(
            "/shipment",
            shipment_body(
                "S1",
                json!([
                    {"totalWeight": {"weight": 4, "unit": "KILOGRAMS"}},
                    {"totalWeight": {"weight": 6, "unit": "KILOGRAMS"}}
                ]),
            ),
        )
        .await;
    server
        .post(
            "/shipment",
            shipment_body("S1", json!([{"totalWeight": {"weight": 2, "unit": "POUNDS"}}])),
        )
        .await;

    let body: Value = server.get("/shipments/S1").await.json().await.unwrap();
    assert_eq!(body["type"], "SHIPMENT");
    assert_eq!(body["referenceId"], "S1");
    assert_eq!(body["organizations"], json!(["ACME"]));
    assert_eq!(
        body["transportPacks"]["nodes"],
        json!([{"totalWeight": {"weight": 2.0, "unit": "POUNDS"}}])
    );

    let body: Value = server
        .get("/totalWeight?unit=POUNDS")
        .await
        .json()
        .await
        .unwrap();
    assert_close(body["weight"].as_f64().unwrap(), 2.0);
}

#[tokio::test]
async fn test_shipment_write_with_wrong_type_leaves_store_unchanged() {
    let server = TestServer::start().await;

    let mut body = shipment_body("S1", json!([{"totalWeight": {"weight": 1, "unit": "POUNDS"}}]));
    body["type"] = json!("ORGANIZATION");
    let response = server.post("/shipment", body.clone()).await;
    assert_eq!(response.status(), 400);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "the request content must be of 'SHIPMENT' type");

    body.as_object_mut().unwrap().remove("type");
    let response = server.post("/shipment", body).await;
    assert_eq!(response.status(), 400);

    assert!(server.state.shipments.get("S1").unwrap().is_none());
    assert_eq!(server.get("/shipments/S1").await.status(), 404);
}

#[tokio::test]
async fn test_organization_round_trip() {
    let server = TestServer::start().await;

    let response = server
        .post(
            "/organization",
            json!({"type": "ORGANIZATION", "id": "O1", "code": "ACME"}),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = server.get("/organizations/O1").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"type": "ORGANIZATION", "id": "O1", "code": "ACME"}));
}

#[tokio::test]
async fn test_organization_write_with_wrong_type_leaves_store_unchanged() {
    let server = TestServer::start().await;

    let response = server
        .post(
            "/organization",
            json!({"type": "SHIPMENT", "id": "O1", "code": "ACME"}),
        )
        .await;
    assert_eq!(response.status(), 400);
    let error: Value = response.json().await.unwrap();
    assert_eq!(
        error["error"],
        "the request content must be of 'ORGANIZATION' type"
    );

    let response = server
        .post("/organization", json!({"id": "O1", "code": "ACME"}))
        .await;
    assert_eq!(response.status(), 400);

    assert!(server.state.organizations.get("O1").unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_organization_is_not_found() {
    let server = TestServer::start().await;

    let response = server.get("/organizations/never-written").await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "organization was not found");

    let response = server.get("/shipments/never-written").await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "shipment was not found");
}

#[tokio::test]
async fn test_malformed_bodies_are_rejected() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/shipment"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = server
        .post(
            "/shipment",
            shipment_body("S1", json!([{"totalWeight": {"weight": 1, "unit": "STONES"}}])),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("malformed request body"));

    // a rejected request does not take the service down
    let response = server.get("/totalWeight").await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_shipment_organizations_are_not_checked() {
    let server = TestServer::start().await;

    let response = server
        .post(
            "/shipment",
            json!({
                "type": "SHIPMENT",
                "referenceId": "S9",
                "organizations": ["UNKNOWN-ORG"],
                "transportPacks": {"nodes": []}
            }),
        )
        .await;
    assert_eq!(response.status(), 200);
    assert!(server.state.shipments.get("S9").unwrap().is_some());
}

struct UnavailableShipments;

impl RecordStore<Shipment> for UnavailableShipments {
    fn upsert(&self, _key: String, _record: Shipment) -> shipment_ledger::Result<()> {
        Err(ServiceError::StoreUnavailable { store: "shipment" })
    }

    fn get(&self, _key: &str) -> shipment_ledger::Result<Option<Shipment>> {
        Err(ServiceError::StoreUnavailable { store: "shipment" })
    }

    fn fold<A, F>(&self, _init: A, _f: F) -> shipment_ledger::Result<A>
    where
        F: FnMut(A, &Shipment) -> A,
    {
        Err(ServiceError::StoreUnavailable { store: "shipment" })
    }
}

#[tokio::test]
async fn test_store_failure_surfaces_as_server_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(
        UnavailableShipments,
        InMemoryStore::<Organization>::new("organization"),
    ));
    tokio::spawn(serve(listener, state));

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/totalWeight", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    // the organization side keeps working
    let response = client
        .post(format!("http://{}/organization", addr))
        .json(&json!({"type": "ORGANIZATION", "id": "O1", "code": "ACME"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

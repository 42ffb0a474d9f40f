//! Client behaviour against an in-process stub backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use ecodeli::client::Navigator;
use ecodeli::constants::{keys, messages};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ecodeli::models::{
    AffiliationStatus, ApiConfig, AvailabilitySlot, BookingStatus, ContractPlan, DeliveryType,
    DocumentFilters, DocumentStatus, ListingFilters, ListingKind, NewBooking, NewContract,
    NewListing, NewMerchantListing, RegisterRequest, Role, Weekday,
};
use ecodeli::state::{Dashboard, Loadable};
use ecodeli::storage::{MemoryStorage, SessionStore};
use ecodeli::{ApiClient, ErrorKind};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    body: String,
}

/// Canned responses keyed by `METHOD /path`; anything else is a bare 404.
#[derive(Clone, Default)]
struct Stub {
    routes: Arc<HashMap<String, (StatusCode, String)>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Stub {
    fn new(routes: &[(&str, u16, Value)]) -> Self {
        let routes = routes
            .iter()
            .map(|(route, status, body)| {
                let body = if body.is_null() {
                    String::new()
                } else {
                    body.to_string()
                };
                (
                    route.to_string(),
                    (StatusCode::from_u16(*status).unwrap(), body),
                )
            })
            .collect();
        Self {
            routes: Arc::new(routes),
            seen: Arc::default(),
        }
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn handle(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    stub.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let key = format!("{} {}", method, uri.path());
    match stub.routes.get(&key) {
        Some((status, body)) if body.is_empty() => (*status).into_response(),
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn(stub: Stub) -> SocketAddr {
    let app = Router::new().fallback(handle).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[derive(Default)]
struct RecordingNavigator {
    calls: AtomicUsize,
    last: Mutex<Option<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(path.to_string());
    }
}

struct Harness {
    client: ApiClient,
    store: Arc<MemoryStorage>,
    navigator: Arc<RecordingNavigator>,
    stub: Stub,
}

async fn harness(store: MemoryStorage, routes: &[(&str, u16, Value)]) -> Harness {
    let stub = Stub::new(routes);
    let addr = spawn(stub.clone()).await;
    let store = Arc::new(store);
    let navigator = Arc::new(RecordingNavigator::default());

    let config = ApiConfig {
        base_url: format!("http://{addr}/api"),
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config, store.clone(), navigator.clone()).unwrap();

    Harness {
        client,
        store,
        navigator,
        stub,
    }
}

fn user_json(id: i64, role: &str) -> Value {
    json!({
        "id": id,
        "nom": "Martin",
        "prenom": "Léa",
        "email": "lea@example.com",
        "role": role
    })
}

fn listing_json(id: i64) -> Value {
    json!({ "id": id, "titre": "Carton de livres", "type": "LIVRAISON_COLIS", "statut": "ACTIVE" })
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let h = harness(
        MemoryStorage::with_token("abc123"),
        &[("GET /api/annonces", 200, json!([listing_json(1)]))],
    )
    .await;

    let listings = h.client.listings().list().await.unwrap();
    assert_eq!(listings.len(), 1);

    let seen = h.stub.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/api/annonces");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer abc123"));
}

#[tokio::test]
async fn no_token_means_no_header() {
    let h = harness(
        MemoryStorage::new(),
        &[("GET /api/annonces", 200, json!([]))],
    )
    .await;

    h.client.listings().list().await.unwrap();
    assert!(h.stub.seen()[0].authorization.is_none());
}

#[tokio::test]
async fn unauthorized_clears_session_and_navigates_once() {
    let store = MemoryStorage::with_token("expired");
    store
        .set(keys::USER, &user_json(7, "LIVREUR").to_string())
        .await
        .unwrap();
    store.set("theme", "dark").await.unwrap();

    let h = harness(
        store,
        &[("GET /api/annonces", 401, json!({ "message": "Token expired" }))],
    )
    .await;

    let err = h.client.listings().list().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.status, 401);
    assert_eq!(err.message, messages::UNAUTHORIZED);

    assert!(h.store.get(keys::AUTH_TOKEN).await.unwrap().is_none());
    assert!(h.store.get(keys::USER).await.unwrap().is_none());
    assert_eq!(h.store.get("theme").await.unwrap().as_deref(), Some("dark"));

    assert_eq!(h.navigator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.navigator.last.lock().unwrap().as_deref(), Some("/login"));

    // The next call goes out without credentials.
    let _ = h.client.listings().list().await;
    assert!(h.stub.seen()[1].authorization.is_none());
}

#[tokio::test]
async fn fixed_messages_per_status() {
    let h = harness(
        MemoryStorage::with_token("abc123"),
        &[
            ("GET /api/utilisateurs/1", 403, json!({ "message": "nope" })),
            ("GET /api/utilisateurs/2", 404, json!({ "message": "absent" })),
            ("GET /api/utilisateurs/3", 500, json!({ "message": "NullPointerException" })),
        ],
    )
    .await;
    let users = h.client.users();

    let err = users.get(1).await.unwrap_err();
    assert_eq!((err.status, err.kind), (403, ErrorKind::Forbidden));
    assert_eq!(err.message, messages::FORBIDDEN);

    let err = users.get(2).await.unwrap_err();
    assert_eq!((err.status, err.kind), (404, ErrorKind::NotFound));
    assert_eq!(err.message, messages::NOT_FOUND);

    let err = users.get(3).await.unwrap_err();
    assert_eq!((err.status, err.kind), (500, ErrorKind::Server));
    assert_eq!(err.message, messages::SERVER_ERROR);

    // None of these end the session.
    assert_eq!(h.navigator.calls.load(Ordering::SeqCst), 0);
    assert!(h.store.token().await.unwrap().is_some());
}

#[tokio::test]
async fn validation_failure_keeps_details() {
    let h = harness(
        MemoryStorage::with_token("abc123"),
        &[(
            "POST /api/annonces",
            422,
            json!({ "message": "bad data", "errors": ["titre: obligatoire"] }),
        )],
    )
    .await;

    let new = NewListing {
        title: "x".to_string(),
        ..NewListing::default()
    };
    let err = h.client.listings().create(&new, 7).await.unwrap_err();
    assert_eq!(err.status, 422);
    assert_eq!(err.kind, ErrorKind::ValidationFailed);
    assert_eq!(err.message, messages::VALIDATION_ERROR);
    assert_eq!(err.details, Some(json!(["titre: obligatoire"])));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig {
        base_url: format!("http://{addr}/api"),
        ..ApiConfig::default()
    };
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(
        &config,
        Arc::new(MemoryStorage::with_token("abc123")),
        navigator.clone(),
    )
    .unwrap();

    let err = client.listings().list().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status, 0);
    assert_eq!(err.message, messages::NETWORK_ERROR);
    assert_eq!(navigator.calls.load(Ordering::SeqCst), 0);
}

/// Serve one raw response per connection that promises more body bytes than it sends.
async fn spawn_truncated(status_line: &'static str) -> SocketAddr {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{{\"message\":\"gone\"}}"
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    addr
}

fn client_for(addr: SocketAddr, store: Arc<MemoryStorage>, navigator: Arc<RecordingNavigator>) -> ApiClient {
    let config = ApiConfig {
        base_url: format!("http://{addr}/api"),
        ..ApiConfig::default()
    };
    ApiClient::new(&config, store, navigator).unwrap()
}

#[tokio::test]
async fn truncated_unauthorized_body_still_ends_the_session() {
    let addr = spawn_truncated("401 Unauthorized").await;
    let store = Arc::new(MemoryStorage::with_token("abc123"));
    let navigator = Arc::new(RecordingNavigator::default());
    let client = client_for(addr, store.clone(), navigator.clone());

    let err = client.listings().list().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.status, 401);
    assert_eq!(err.message, messages::UNAUTHORIZED);
    assert!(store.token().await.unwrap().is_none());
    assert_eq!(navigator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn truncated_error_body_keeps_its_status() {
    let addr = spawn_truncated("403 Forbidden").await;
    let store = Arc::new(MemoryStorage::with_token("abc123"));
    let navigator = Arc::new(RecordingNavigator::default());
    let client = client_for(addr, store.clone(), navigator.clone());

    let err = client.users().get(1).await.unwrap_err();
    assert_eq!((err.status, err.kind), (403, ErrorKind::Forbidden));
    assert_eq!(err.message, messages::FORBIDDEN);
    assert!(store.token().await.unwrap().is_some());
    assert_eq!(navigator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn login_persists_the_session() {
    let h = harness(
        MemoryStorage::new(),
        &[
            (
                "POST /api/auth/login",
                200,
                json!({ "token": "fresh-token", "user": user_json(7, "LIVREUR") }),
            ),
            ("GET /api/annonces", 200, json!([])),
        ],
    )
    .await;

    let auth = h
        .client
        .auth()
        .login(" lea@example.com ", "secret1")
        .await
        .unwrap();
    assert_eq!(auth.user.role, Role::Courier);

    let sent: Value = serde_json::from_str(&h.stub.seen()[0].body).unwrap();
    assert_eq!(sent, json!({ "email": "lea@example.com", "password": "secret1" }));

    let current = h.client.auth().current_user().await.unwrap().unwrap();
    assert_eq!(current.id, 7);

    h.client.listings().list().await.unwrap();
    assert_eq!(
        h.stub.seen()[1].authorization.as_deref(),
        Some("Bearer fresh-token")
    );

    h.client.auth().logout().await.unwrap();
    assert!(h.store.token().await.unwrap().is_none());
}

#[tokio::test]
async fn admin_login_rejects_other_roles() {
    let h = harness(
        MemoryStorage::new(),
        &[(
            "POST /api/auth/login",
            200,
            json!({ "token": "t", "user": user_json(7, "CLIENT") }),
        )],
    )
    .await;

    let err = h
        .client
        .auth()
        .login_admin("lea@example.com", "secret1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(err.message, messages::ADMIN_ONLY);
    assert!(h.store.token().await.unwrap().is_none());
}

#[tokio::test]
async fn check_email_is_false_on_failure() {
    let h = harness(
        MemoryStorage::new(),
        &[("GET /api/auth/check-email", 200, json!({ "available": true }))],
    )
    .await;
    assert!(h.client.auth().check_email("new@example.com").await);
    assert_eq!(
        h.stub.seen()[0].query.as_deref(),
        Some("email=new%40example.com")
    );

    let h = harness(MemoryStorage::new(), &[]).await;
    assert!(!h.client.auth().check_email("new@example.com").await);
}

#[tokio::test]
async fn search_sends_filters_as_query() {
    let h = harness(
        MemoryStorage::new(),
        &[("GET /api/annonces/search", 200, json!([listing_json(4)]))],
    )
    .await;

    let filters = ListingFilters {
        city: Some("Lyon".to_string()),
        kind: Some(ListingKind::Shopping),
    };
    let found = h.client.listings().search(&filters).await.unwrap();
    assert_eq!(found[0].id, 4);
    assert_eq!(
        h.stub.seen()[0].query.as_deref(),
        Some("ville=Lyon&type=COURSES")
    );
}

#[tokio::test]
async fn suspend_sends_status_and_accepts_empty_body() {
    let h = harness(
        MemoryStorage::with_token("admin"),
        &[("PUT /api/utilisateurs/9", 200, Value::Null)],
    )
    .await;

    h.client.users().suspend(9).await.unwrap();

    let seen = h.stub.seen();
    assert_eq!(seen[0].method, "PUT");
    let sent: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(sent, json!({ "statut": "SUSPENDU" }));
}

#[tokio::test]
async fn delivery_lifecycle_paths() {
    let h = harness(
        MemoryStorage::with_token("courier"),
        &[
            (
                "POST /api/livraisons/partielle-depot",
                200,
                json!({ "id": 40, "typeLivraison": "PARTIELLE_DEPOT", "statut": "ASSIGNEE" }),
            ),
            (
                "PUT /api/livraisons/40/terminer",
                200,
                json!({ "id": 40, "statut": "STOCKEE" }),
            ),
        ],
    )
    .await;
    let deliveries = h.client.deliveries();

    let created = deliveries
        .create_partial_drop(12, 7, 2, Some(18.5))
        .await
        .unwrap();
    assert_eq!(created.id, 40);

    deliveries.complete(40, " A1B2C3 ").await.unwrap();

    let seen = h.stub.seen();
    assert_eq!(
        seen[0].query.as_deref(),
        Some("annonceId=12&livreurId=7&entrepotId=2&prixConvenu=18.5")
    );
    assert_eq!(seen[1].query.as_deref(), Some("codeValidation=A1B2C3"));
}

#[tokio::test]
async fn missing_drop_segment_is_none() {
    let h = harness(MemoryStorage::with_token("courier"), &[]).await;

    let segment = h.client.deliveries().drop_segment(12).await.unwrap();
    assert!(segment.is_none());
    assert_eq!(
        h.stub.seen()[0].path,
        "/api/livraisons/annonce/12/segment-depot"
    );
}

#[tokio::test]
async fn dashboard_keeps_partial_results() {
    let h = harness(
        MemoryStorage::with_token("admin"),
        &[
            ("GET /api/utilisateurs/count", 200, json!(42)),
            (
                "GET /api/annonces",
                200,
                json!([listing_json(1), listing_json(2)]),
            ),
            ("GET /api/annonces-commercants", 500, json!({})),
        ],
    )
    .await;

    let mut dashboard = Dashboard::new();
    dashboard.load(&h.client).await;

    let stats = dashboard.stats();
    assert_eq!(stats.total_users, Some(42));
    assert_eq!(stats.listings, Some(2));
    assert_eq!(stats.merchant_listings, None);
    assert!(!stats.is_complete());
    assert!(!dashboard.is_loading());
    assert_eq!(
        dashboard.errors(),
        vec![("merchant listings", messages::SERVER_ERROR)]
    );
}

#[tokio::test]
async fn mutation_refreshes_the_list_only_on_success() {
    let h = harness(
        MemoryStorage::with_token("admin"),
        &[
            ("PUT /api/utilisateurs/9", 200, Value::Null),
            ("PUT /api/utilisateurs/10", 403, json!({})),
            (
                "GET /api/utilisateurs",
                200,
                json!([user_json(9, "CLIENT"), user_json(10, "LIVREUR")]),
            ),
        ],
    )
    .await;
    let users = h.client.users();

    let mut page = Loadable::new();
    page.mutate_then_refresh(users.suspend(9), users.list(None))
        .await
        .unwrap();
    assert_eq!(page.data().map(Vec::len), Some(2));
    assert!(page.error().is_none());

    let err = page
        .mutate_then_refresh(users.suspend(10), users.list(None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(page.error(), Some(messages::FORBIDDEN));
    assert_eq!(page.data().map(Vec::len), Some(2));

    let calls: Vec<_> = h
        .stub
        .seen()
        .into_iter()
        .map(|s| format!("{} {}", s.method, s.path))
        .collect();
    assert_eq!(
        calls,
        vec![
            "PUT /api/utilisateurs/9",
            "GET /api/utilisateurs",
            "PUT /api/utilisateurs/10",
        ]
    );
}

fn contract_json(id: i64) -> Value {
    json!({
        "id": id,
        "numeroContrat": "CTR 2025/04",
        "statutContrat": "ACTIF",
        "typeContrat": "PREMIUM",
        "assuranceIncluse": true
    })
}

#[tokio::test]
async fn contract_endpoints() {
    let h = harness(
        MemoryStorage::with_token("merchant"),
        &[
            ("GET /api/contrats/commercant/5", 200, contract_json(3)),
            ("GET /api/contrats/commercant/5/exists", 200, json!(true)),
            ("GET /api/contrats/numero/CTR%202025%2F04", 200, contract_json(3)),
            ("POST /api/contrats/commercant/5", 200, contract_json(4)),
            ("PUT /api/contrats/4", 200, contract_json(4)),
            ("DELETE /api/contrats/4", 204, Value::Null),
        ],
    )
    .await;
    let contracts = h.client.contracts();

    let held = contracts.by_merchant(5).await.unwrap();
    assert_eq!(held.plan, Some(ContractPlan::Premium));
    assert!(contracts.exists_for_merchant(5).await.unwrap());
    assert_eq!(contracts.by_number(" CTR 2025/04 ").await.unwrap().id, 3);

    let terms = NewContract {
        plan: Some(ContractPlan::Premium),
        monthly_fee: Some(49.0),
        insurance: true,
        ..NewContract::default()
    };
    assert_eq!(contracts.create(5, &terms).await.unwrap().id, 4);
    contracts.update(4, &terms).await.unwrap();
    contracts.delete(4).await.unwrap();

    let seen = h.stub.seen();
    assert_eq!(seen.len(), 6);
    let created: Value = serde_json::from_str(&seen[3].body).unwrap();
    assert_eq!(created["typeContrat"], "PREMIUM");
    assert_eq!(created["abonnementMensuel"], 49.0);
    assert_eq!(created["assuranceIncluse"], true);
    assert!(created.get("dateDebut").is_none());
    assert_eq!(seen[4].method, "PUT");
    assert_eq!(seen[5].method, "DELETE");
}

#[tokio::test]
async fn merchant_listing_endpoints() {
    let h = harness(
        MemoryStorage::with_token("merchant"),
        &[
            (
                "POST /api/annonces-commercants/8/prendre-en-charge",
                200,
                json!({ "id": 8, "statut": "EN_COURS" }),
            ),
            (
                "POST /api/annonces-commercants",
                201,
                json!({ "id": 9, "titre": "Courses du samedi" }),
            ),
            ("GET /api/annonces-commercants/count/commercant/5", 200, json!(3)),
        ],
    )
    .await;
    let merchant = h.client.merchant_listings();

    merchant.take_charge(8, 7).await.unwrap();

    let new = NewMerchantListing {
        title: "Courses du samedi".to_string(),
        shopping_list: "pain, lait".to_string(),
        proposed_price: 12.0,
        reserved_for_affiliates: true,
        ..NewMerchantListing::default()
    };
    let created = merchant.create(&new, 5).await.unwrap();
    assert_eq!(created.id, 9);
    assert_eq!(merchant.count_by_merchant(5).await.unwrap(), 3);

    let seen = h.stub.seen();
    assert_eq!(seen[0].query.as_deref(), Some("livreurId=7"));
    assert_eq!(seen[1].query.as_deref(), Some("commercantId=5"));
    let sent: Value = serde_json::from_str(&seen[1].body).unwrap();
    assert_eq!(sent["titre"], "Courses du samedi");
    assert_eq!(sent["listeCourses"], "pain, lait");
    assert_eq!(sent["reserveAuxAffilies"], true);
}

#[tokio::test]
async fn warehouses_are_listed() {
    let h = harness(
        MemoryStorage::new(),
        &[(
            "GET /api/entrepots",
            200,
            json!([
                { "id": 1, "nom": "Entrepôt Nord", "ville": "Lille" },
                { "id": 2, "nom": "Entrepôt Sud", "ville": "Marseille" }
            ]),
        )],
    )
    .await;

    let warehouses = h.client.warehouses().list().await.unwrap();
    assert_eq!(warehouses.len(), 2);
    assert_eq!(warehouses[1].name, "Entrepôt Sud");
    assert_eq!(warehouses[0].city.as_deref(), Some("Lille"));
}

#[tokio::test]
async fn register_and_verify_token() {
    let h = harness(
        MemoryStorage::with_token("fresh-token"),
        &[
            ("POST /api/inscriptions", 201, user_json(11, "COMMERCANT")),
            (
                "POST /api/auth/verify-token",
                200,
                json!({ "valid": true, "user": user_json(11, "COMMERCANT") }),
            ),
        ],
    )
    .await;

    let request = RegisterRequest {
        role: Role::Merchant,
        last_name: "Martin".to_string(),
        first_name: "Léa".to_string(),
        email: "lea@example.com".to_string(),
        password: "secret1".to_string(),
        phone: "0612345678".to_string(),
        vehicle: None,
        license_verified: None,
        siret: Some("12345678901234".to_string()),
        service_type: None,
        hourly_rate: None,
    };
    let user = h.client.auth().register(&request).await.unwrap();
    assert_eq!((user.id, user.role), (11, Role::Merchant));

    let check = h.client.auth().verify_token().await.unwrap();
    assert!(check.valid);
    assert_eq!(check.user.map(|u| u.id), Some(11));

    let seen = h.stub.seen();
    let sent: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(sent["role"], "COMMERCANT");
    assert_eq!(sent["nom"], "Martin");
    assert_eq!(sent["siret"], "12345678901234");
    assert!(sent.get("vehicule").is_none());
    assert_eq!(
        seen[1].authorization.as_deref(),
        Some("Bearer fresh-token")
    );
}

fn document_json(id: i64, status: &str) -> Value {
    json!({ "id": id, "nom": format!("doc-{id}.pdf"), "type": "KBIS", "statut": status, "utilisateurId": 5 })
}

#[tokio::test]
async fn document_review() {
    let h = harness(
        MemoryStorage::with_token("admin"),
        &[
            (
                "GET /api/documents",
                200,
                json!([document_json(1, "EN_ATTENTE"), document_json(2, "VALIDE")]),
            ),
            ("GET /api/documents/user/5", 200, json!([document_json(1, "EN_ATTENTE")])),
            (
                "POST /api/documents/1/valider",
                200,
                json!({ "message": "Document validé avec succès" }),
            ),
            ("POST /api/documents/2/refuser", 200, json!({ "message": "Document refusé" })),
        ],
    )
    .await;
    let documents = h.client.documents();

    let pending = DocumentFilters {
        status: Some(DocumentStatus::Pending),
        ..DocumentFilters::default()
    };
    let found = documents.list(&pending).await.unwrap();
    assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(documents.by_user(5).await.unwrap().len(), 1);

    documents.approve(1, None).await.unwrap();
    documents.reject(2, " Illisible ").await.unwrap();

    let seen = h.stub.seen();
    assert_eq!(seen[2].path, "/api/documents/1/valider");
    assert!(seen[2].body.is_empty());
    let sent: Value = serde_json::from_str(&seen[3].body).unwrap();
    assert_eq!(sent, json!({ "commentaire": "Illisible" }));
}

#[tokio::test]
async fn courier_affiliation() {
    let h = harness(
        MemoryStorage::with_token("courier"),
        &[
            ("POST /api/livreurs/7/demander-affiliation", 200, Value::Null),
            (
                "GET /api/livreurs/7/statut-affiliation",
                200,
                json!({ "statut": "DEMANDE_AFFILIATION", "dateDemandeAffiliation": "2025-04-01T10:00:00" }),
            ),
            ("PUT /api/livreurs/7/valider-affiliation", 200, json!({})),
        ],
    )
    .await;
    let affiliations = h.client.affiliations();

    affiliations.request(7, Some("Disponible le week-end")).await.unwrap();
    let state = affiliations.status(7).await.unwrap();
    assert_eq!(state.status, AffiliationStatus::Requested);
    assert!(state.decided_at.is_none());
    affiliations.decide(7, false, Some("Dossier incomplet")).await.unwrap();

    let seen = h.stub.seen();
    assert_eq!(seen[0].body, "\"Disponible le week-end\"");
    assert_eq!(
        seen[2].query.as_deref(),
        Some("valider=false&commentaire=Dossier+incomplet")
    );
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn service_bookings() {
    let booking = json!({ "id": 21, "titre": "Tonte", "typePrestation": "JARDINAGE", "statut": "RESERVEE" });
    let h = harness(
        MemoryStorage::with_token("client"),
        &[
            ("POST /api/prestations/reserver", 200, booking.clone()),
            ("GET /api/prestations/prestataire/9", 200, json!([booking])),
            (
                "POST /api/prestations/prestataire/9/verifier-disponibilite",
                200,
                json!({ "disponible": true, "message": "Créneau disponible" }),
            ),
            ("POST /api/prestations/prestataire/9/disponibilites", 200, json!({})),
            ("PUT /api/prestations/21/annuler", 200, json!({})),
            ("PUT /api/prestations/22/terminer", 200, json!({})),
            ("GET /api/prestations/prestataire/9/revenus", 200, json!({ "revenus": 120.5 })),
        ],
    )
    .await;
    let bookings = h.client.bookings();

    let new = NewBooking {
        provider_id: 9,
        client_id: 4,
        starts_at: at(14, 9),
        ends_at: at(14, 11),
        service_type: "JARDINAGE".to_string(),
        title: "Tonte".to_string(),
        description: "Jardin de 200 m²".to_string(),
        price: 40.0,
        address: "3 rue des Lilas".to_string(),
        city: "Lyon".to_string(),
        postcode: "69003".to_string(),
    };
    let created = bookings.book(&new).await.unwrap();
    assert_eq!(created.status, Some(BookingStatus::Booked));
    assert_eq!(bookings.by_provider(9).await.unwrap().len(), 1);

    let check = bookings
        .check_availability(9, at(14, 9), at(14, 11))
        .await
        .unwrap();
    assert!(check.available);

    let slot = AvailabilitySlot {
        id: None,
        day: Weekday::Saturday,
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        active: true,
    };
    bookings.set_availability(9, &[slot]).await.unwrap();
    bookings.cancel(21, 4).await.unwrap();
    bookings.complete(22).await.unwrap();
    assert_eq!(bookings.monthly_revenue(9, 2025, 6).await.unwrap(), 120.5);

    let seen = h.stub.seen();
    let sent: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(sent["prestataireId"], 9);
    assert_eq!(sent["clientId"], 4);
    assert_eq!(sent["dateDebut"], "2025-06-14T09:00:00");
    assert_eq!(sent["typePrestation"], "JARDINAGE");
    let window: Value = serde_json::from_str(&seen[2].body).unwrap();
    assert_eq!(window, json!({ "dateDebut": "2025-06-14T09:00:00", "dateFin": "2025-06-14T11:00:00" }));
    let slots: Value = serde_json::from_str(&seen[3].body).unwrap();
    assert_eq!(slots[0]["jourSemaine"], "SATURDAY");
    assert_eq!(seen[4].query.as_deref(), Some("utilisateurId=4"));
    assert_eq!(seen[6].query.as_deref(), Some("annee=2025&mois=6"));
}

#[tokio::test]
async fn inverted_booking_window_is_not_sent() {
    let h = harness(MemoryStorage::with_token("client"), &[]).await;
    let bookings = h.client.bookings();

    assert!(bookings.monthly_revenue(9, 2025, 13).await.is_err());
    let slot = AvailabilitySlot {
        id: None,
        day: Weekday::Monday,
        start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        active: true,
    };
    assert!(bookings.set_availability(9, &[slot]).await.is_err());
    assert!(h.stub.seen().is_empty());
}

#[tokio::test]
async fn segments_info_and_partial_without_warehouse() {
    let h = harness(
        MemoryStorage::with_token("courier"),
        &[(
            "GET /api/livraisons/annonce/12/segments-info",
            200,
            json!({
                "hasSegmentDepot": true,
                "hasSegmentRetrait": false,
                "hasLivraisonComplete": false,
                "entrepotId": 2,
                "entrepotNom": "Entrepôt Nord",
                "canCreateComplete": false,
                "canCreatePartielleDepot": false,
                "canCreatePartielleRetrait": true
            }),
        )],
    )
    .await;
    let deliveries = h.client.deliveries();

    let info = deliveries.segments_info(12).await.unwrap();
    assert!(info.allows(DeliveryType::PartialPickup));
    assert_eq!(info.warehouse(), Some((2, "Entrepôt Nord")));

    let request = ecodeli::models::DeliveryRequest {
        kind: DeliveryType::PartialPickup,
        listing_id: 12,
        courier_id: 7,
        warehouse_id: None,
        agreed_price: None,
    };
    let err = deliveries.create(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unexpected);
    assert_eq!(h.stub.seen().len(), 1);
}

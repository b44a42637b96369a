//! Fake Claims Service
//!
//! A real HTTP server on a loopback port speaking the claims API, so the
//! reqwest adapter can be exercised end to end. Responses are raw JSON,
//! which lets tests send the loose shapes the real service produces.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use domain_claims::Claim;

/// Endpoints of the claims API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    ListClaims,
    GetClaim,
    Decide,
    Submit,
}

/// A request as the fake service saw it
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw, still percent-encoded path
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
    /// Text fields of a multipart body
    pub fields: BTreeMap<String, String>,
    pub file_name: Option<String>,
}

#[derive(Default)]
struct FakeState {
    accounts: HashMap<String, (String, Value)>,
    tokens: HashSet<String>,
    claims: Vec<Value>,
    settle_as: Option<String>,
    failures: HashMap<Endpoint, (StatusCode, Value)>,
    requests: Vec<RecordedRequest>,
    next_claim: u32,
}

type Shared = Arc<Mutex<FakeState>>;

fn lock(state: &Shared) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Claims service double bound to `127.0.0.1:<random port>`
///
/// The server task is aborted when the value is dropped.
pub struct FakeClaimsServer {
    addr: SocketAddr,
    state: Shared,
    handle: JoinHandle<()>,
}

impl FakeClaimsServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            next_claim: 2001,
            ..FakeState::default()
        }));

        let app = Router::new()
            .route("/api/login", post(login))
            .route("/api/claims", get(list_claims))
            .route("/api/claims/:id", get(get_claim))
            .route("/api/claims/:id/decision", post(decide_claim))
            .route("/api/submit", post(submit_claim))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake claims service");
        let addr = listener.local_addr().expect("Fake claims service has no address");
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Fake claims service stopped");
            }
        });

        Self { addr, state, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Registers an account; a successful login answers with `response`.
    ///
    /// The response's `access_token` becomes an accepted bearer token, or
    /// the `session` sentinel when the response has none.
    pub fn with_login(&self, email: &str, password: &str, response: Value) -> &Self {
        lock(&self.state)
            .accounts
            .insert(email.to_string(), (password.to_string(), response));
        self
    }

    pub fn accept_token(&self, token: &str) -> &Self {
        lock(&self.state).tokens.insert(token.to_string());
        self
    }

    /// Forgets every accepted token, as if the server restarted
    pub fn revoke_tokens(&self) -> &Self {
        lock(&self.state).tokens.clear();
        self
    }

    pub fn set_claims(&self, claims: Vec<Value>) -> &Self {
        lock(&self.state).claims = claims;
        self
    }

    pub fn add_claim(&self, claim: &Claim) -> &Self {
        let value = serde_json::to_value(claim).expect("Claim serializes to JSON");
        lock(&self.state).claims.push(value);
        self
    }

    /// Stores `status` for every later decision regardless of what was asked
    pub fn settle_decisions_as(&self, status: &str) -> &Self {
        lock(&self.state).settle_as = Some(status.to_string());
        self
    }

    /// Fails the next call to `endpoint` with `status` and `body`
    pub fn fail(&self, endpoint: Endpoint, status: u16, body: Value) -> &Self {
        let status = StatusCode::from_u16(status).expect("Valid HTTP status");
        lock(&self.state).failures.insert(endpoint, (status, body));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    pub fn claims(&self) -> Vec<Value> {
        lock(&self.state).claims.clone()
    }
}

impl Drop for FakeClaimsServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Records the request, then applies a queued failure and the bearer check
fn admit(
    state: &Shared,
    endpoint: Endpoint,
    request: RecordedRequest,
    needs_token: bool,
) -> Result<(), Response> {
    let mut state = lock(state);
    let authorization = request.authorization.clone();
    state.requests.push(request);

    if let Some((status, body)) = state.failures.remove(&endpoint) {
        return Err(reply(status, body));
    }

    if needs_token {
        let token = authorization
            .as_deref()
            .and_then(|h| h.strip_prefix("Bearer "))
            .unwrap_or_default();
        if !state.tokens.contains(token) {
            return Err(reply(
                StatusCode::UNAUTHORIZED,
                json!({"message": "Token is invalid or expired"}),
            ));
        }
    }
    Ok(())
}

fn recorded(method: Method, uri: &Uri, headers: &HeaderMap, body: Option<Value>) -> RecordedRequest {
    RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: bearer(headers),
        body,
        ..RecordedRequest::default()
    }
}

fn claim_index(claims: &[Value], id: &str) -> Option<usize> {
    claims.iter().position(|c| c["id"].as_str() == Some(id))
}

fn not_found() -> Response {
    reply(StatusCode::NOT_FOUND, json!({"error": "Claim not found"}))
}

async fn login(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let request = recorded(method, &uri, &headers, Some(body.clone()));
    if let Err(response) = admit(&state, Endpoint::Login, request, false) {
        return response;
    }

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let mut state = lock(&state);
    let response = match state.accounts.get(email) {
        Some((expected, response)) if expected == password => response.clone(),
        _ => {
            return reply(
                StatusCode::UNAUTHORIZED,
                json!({"message": "Invalid email or password"}),
            )
        }
    };

    let token = response["access_token"].as_str().unwrap_or("session").to_string();
    state.tokens.insert(token);
    reply(StatusCode::OK, response)
}

async fn list_claims(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request = recorded(method, &uri, &headers, None);
    if let Err(response) = admit(&state, Endpoint::ListClaims, request, true) {
        return response;
    }
    let claims = lock(&state).claims.clone();
    reply(StatusCode::OK, Value::Array(claims))
}

async fn get_claim(
    State(state): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request = recorded(method, &uri, &headers, None);
    if let Err(response) = admit(&state, Endpoint::GetClaim, request, true) {
        return response;
    }

    let state = lock(&state);
    match claim_index(&state.claims, &id) {
        Some(i) => reply(StatusCode::OK, state.claims[i].clone()),
        None => not_found(),
    }
}

fn status_for(decision: &str) -> Option<&'static str> {
    match decision {
        "approve" => Some("Approved"),
        "reject" => Some("Rejected"),
        "manual_review" => Some("Manual Review"),
        _ => None,
    }
}

/// Stores the settled status but answers with the requested one, so a
/// client that trusts this body instead of re-fetching shows the wrong thing.
async fn decide_claim(
    State(state): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let request = recorded(method, &uri, &headers, Some(body.clone()));
    if let Err(response) = admit(&state, Endpoint::Decide, request, true) {
        return response;
    }

    let Some(requested) = body["decision"].as_str().and_then(status_for) else {
        return reply(StatusCode::BAD_REQUEST, json!({"error": "Unknown decision"}));
    };

    let mut state = lock(&state);
    let Some(i) = claim_index(&state.claims, &id) else {
        return not_found();
    };

    let settled = state.settle_as.clone().unwrap_or_else(|| requested.to_string());
    let mut answer = state.claims[i].clone();
    state.claims[i]["status"] = Value::String(settled);
    answer["status"] = Value::String(requested.to_string());
    reply(StatusCode::OK, answer)
}

async fn submit_claim(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut request = recorded(method, &uri, &headers, None);
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return reply(StatusCode::BAD_REQUEST, json!({"error": e.to_string()})),
        };
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name() {
            request.file_name = Some(file_name.to_string());
            let _ = field.bytes().await;
            continue;
        }
        let text = field.text().await.unwrap_or_default();
        request.fields.insert(name, text);
    }

    let has_file = request.file_name.is_some();
    let amount = request.fields.get("amount").cloned().unwrap_or_default();
    let procedure = request.fields.get("description").cloned().unwrap_or_default();
    if let Err(response) = admit(&state, Endpoint::Submit, request, true) {
        return response;
    }
    if !has_file {
        return reply(StatusCode::BAD_REQUEST, json!({"error": "No file uploaded"}));
    }

    let mut state = lock(&state);
    let claim_id = format!("C-{}", state.next_claim);
    state.next_claim += 1;
    state.claims.push(json!({
        "id": claim_id,
        "procedure": procedure,
        "amount": amount.parse::<f64>().ok(),
        "status": "Processing",
        "risk_score": 35,
        "ai_prediction": "Processing"
    }));

    reply(
        StatusCode::OK,
        json!({
            "claim_id": claim_id,
            "status": "Processing",
            "risk_score": 35,
            "message": "Claim received"
        }),
    )
}

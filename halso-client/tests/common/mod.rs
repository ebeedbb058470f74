//! In-memory backend for the integration tests
//!
//! Serves every collection under both `/api` (dashboard) and the bare root
//! (portal). Request bodies are accepted in either key casing and stored in
//! camelCase, the way the real backend answers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path as FsPath;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use halso_client::{
    AdminClient, AdminPrincipal, ClientConfig, MemberPortal, MemberPrincipal, OneshotHttpClient,
    SessionStore,
};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

pub const ADMIN_PASSWORD: &str = "secret123";
pub const MEMBER_PASSWORD: &str = "secret123";

const COLLECTIONS: [&str; 7] = [
    "members",
    "facilities",
    "blog",
    "subscriptions/plans",
    "classes",
    "member-subscriptions",
    "User",
];

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Data {
    collections: HashMap<String, Vec<Value>>,
    failing: Vec<String>,
    requests: Vec<Recorded>,
    bodies: Vec<Value>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    data: Arc<Mutex<Data>>,
}

impl FakeBackend {
    pub fn seeded() -> Self {
        init_tracing();
        let backend = Self::default();
        {
            let mut data = backend.lock();
            let mut put = |name: &str, items: Value| {
                let items = match items {
                    Value::Array(items) => items,
                    _ => Vec::new(),
                };
                data.collections.insert(name.to_string(), items);
            };
            put(
                "members",
                json!([
                    {"id": "m1", "name": "Anna Berg", "email": "anna@example.se", "phone": "070-1234567",
                     "membershipStatus": "Active", "joinDate": "2024-01-15"},
                    {"id": "m2", "name": "Erik Lund", "email": "erik@example.se",
                     "membershipStatus": "Inactive", "joinDate": "2024-02-01"},
                    {"id": "m3", "name": "Johanna Ek", "email": "johanna@example.se",
                     "membershipStatus": "Active", "joinDate": "2024-03-10"}
                ]),
            );
            put(
                "subscriptions/plans",
                json!([
                    {"id": "p1", "name": "Gold", "price": 499, "duration": 30,
                     "features": ["Sauna", "Group classes"], "isActive": true},
                    {"id": "p2", "name": "Legacy", "price": 299.5, "duration": 30,
                     "features": [], "isActive": false}
                ]),
            );
            put(
                "member-subscriptions",
                json!([
                    {"id": "s1", "memberId": "m1", "planId": "p1", "status": "Active",
                     "paymentStatus": "Paid", "startDate": "2024-01-15"}
                ]),
            );
            put(
                "facilities",
                json!([
                    {"id": "f1", "name": "Centrum", "address": "Storgatan 1", "city": "Umeå",
                     "status": "Active", "memberCount": 120}
                ]),
            );
            put(
                "blog",
                json!([
                    {"id": "b1", "title": "Summer opening hours", "content": "Open 6-22 all summer.",
                     "status": "Draft", "tags": ["news"]}
                ]),
            );
            put(
                "classes",
                json!([
                    {"id": "1", "name": "Yoga", "instructor": "Sara", "dayOfWeek": 1,
                     "startTime": "09:00", "endTime": "10:00", "capacity": 20, "enrolled": 12},
                    {"id": "2", "name": "Spin", "instructor": "Olle", "dayOfWeek": 1,
                     "startTime": "08:00", "endTime": "08:45", "capacity": 15, "enrolled": 15},
                    {"id": "3", "name": "Pilates", "dayOfWeek": 3,
                     "startTime": "18:00", "endTime": "19:00", "capacity": 12, "enrolled": 3}
                ]),
            );
            put(
                "User",
                json!([
                    {"id": 1, "username": "admin", "email": "admin@halsoprofilen.se",
                     "role": "Admin", "isActive": true}
                ]),
            );
            put(
                "registrations",
                json!([
                    {"id": "r1", "classId": "1", "memberId": "m1", "memberName": "Anna Berg"},
                    {"id": "r2", "classId": "3", "memberId": "m3", "memberName": "Johanna Ek"}
                ]),
            );
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Data> {
        self.data.lock().unwrap()
    }

    pub fn router(&self) -> Router {
        let mut router = Router::new();
        for prefix in ["", "/api"] {
            router = router.merge(routes(prefix));
        }
        router
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }

    pub fn admin_client(&self, session_dir: &FsPath) -> AdminClient<OneshotHttpClient> {
        let config = ClientConfig::admin("http://fake").with_session_dir(session_dir);
        let http = OneshotHttpClient::new(self.router(), &config);
        AdminClient::new(http, SessionStore::<AdminPrincipal>::in_dir(session_dir))
    }

    pub fn member_portal(&self, session_dir: &FsPath) -> MemberPortal<OneshotHttpClient> {
        let config = ClientConfig::member("http://fake").with_session_dir(session_dir);
        let http = OneshotHttpClient::new(self.router(), &config);
        MemberPortal::new(http, SessionStore::<MemberPrincipal>::in_dir(session_dir))
    }

    /// Make `METHOD collection` answer 500 from now on
    pub fn fail(&self, method: &str, collection: &str) {
        self.lock().failing.push(format!("{method} {collection}"));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().requests.clone()
    }

    /// Last request body exactly as the client sent it
    pub fn last_body(&self) -> Option<Value> {
        self.lock().bodies.last().cloned()
    }

    pub fn collection(&self, name: &str) -> Vec<Value> {
        self.lock().collections.get(name).cloned().unwrap_or_default()
    }

    fn failing(&self, method: &str, collection: &str) -> Option<Response> {
        let key = format!("{method} {collection}");
        self.lock().failing.contains(&key).then(|| {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong on our side")
        })
    }

    fn receive(&self, body: Value) -> Value {
        self.lock().bodies.push(body.clone());
        camelize(body)
    }

    fn list(&self, collection: &str) -> Response {
        if let Some(failure) = self.failing("GET", collection) {
            return failure;
        }
        Json(Value::Array(self.collection(collection))).into_response()
    }

    fn get_one(&self, collection: &str, id: &str) -> Response {
        match self.collection(collection).into_iter().find(|item| id_matches(item, id)) {
            Some(item) => Json(item).into_response(),
            None => error(StatusCode::NOT_FOUND, &format!("{collection} {id} not found")),
        }
    }

    fn create(&self, collection: &str, body: Value) -> Response {
        if let Some(failure) = self.failing("POST", collection) {
            return failure;
        }
        let Value::Object(mut object) = self.receive(body) else {
            return error(StatusCode::BAD_REQUEST, "Expected a JSON object");
        };
        let mut data = self.lock();
        data.next_id += 1;
        object.insert("id".into(), Value::String(format!("new-{}", data.next_id)));
        let created = Value::Object(object);
        data.collections
            .entry(collection.to_string())
            .or_default()
            .push(created.clone());
        (StatusCode::CREATED, Json(created)).into_response()
    }

    fn update(&self, collection: &str, id: &str, body: Value) -> Response {
        if let Some(failure) = self.failing("PUT", collection) {
            return failure;
        }
        let Value::Object(patch) = self.receive(body) else {
            return error(StatusCode::BAD_REQUEST, "Expected a JSON object");
        };
        let mut data = self.lock();
        let items = data.collections.entry(collection.to_string()).or_default();
        let Some(Value::Object(existing)) = items.iter_mut().find(|item| id_matches(item, id)) else {
            return error(StatusCode::NOT_FOUND, &format!("{collection} {id} not found"));
        };
        for (key, value) in patch {
            if key != "id" {
                existing.insert(key, value);
            }
        }
        Json(Value::Object(existing.clone())).into_response()
    }

    fn delete(&self, collection: &str, id: &str) -> Response {
        if let Some(failure) = self.failing("DELETE", collection) {
            return failure;
        }
        let mut data = self.lock();
        let items = data.collections.entry(collection.to_string()).or_default();
        match items.iter().position(|item| id_matches(item, id)) {
            Some(index) => {
                items.remove(index);
                StatusCode::NO_CONTENT.into_response()
            }
            None => error(StatusCode::NOT_FOUND, &format!("{collection} {id} not found")),
        }
    }

    fn admin_login(&self, body: Value) -> Response {
        let body = self.receive(body);
        if body["username"] == "admin" && body["password"] == ADMIN_PASSWORD {
            Json(json!({
                "user": {"id": 1, "username": "admin", "email": "admin@halsoprofilen.se", "role": "Admin"},
                "token": "admin-token"
            }))
            .into_response()
        } else {
            error(StatusCode::UNAUTHORIZED, "Invalid username or password")
        }
    }

    fn admin_register(&self, body: Value) -> Response {
        let body = self.receive(body);
        Json(json!({
            "user": {"id": 2, "username": body["username"], "email": body["email"], "role": "Staff"},
            "token": "staff-token"
        }))
        .into_response()
    }

    fn member_login(&self, body: Value) -> Response {
        let body = self.receive(body);
        let member = self
            .collection("members")
            .into_iter()
            .find(|m| m["email"] == body["email"]);
        match member {
            Some(m) if body["password"] == MEMBER_PASSWORD => Json(json!({
                "member": {"id": m["id"], "name": m["name"], "email": m["email"], "phone": m["phone"]},
                "token": "member-token"
            }))
            .into_response(),
            _ => error(StatusCode::UNAUTHORIZED, "Invalid email or password"),
        }
    }

    fn member_register(&self, body: Value) -> Response {
        let body = self.receive(body);
        let taken = self
            .collection("members")
            .iter()
            .any(|m| m["email"] == body["email"]);
        if taken {
            return error(StatusCode::CONFLICT, "Email is already registered");
        }

        let mut data = self.lock();
        data.next_id += 1;
        let member = json!({
            "id": format!("new-{}", data.next_id),
            "name": body["name"],
            "email": body["email"],
            "phone": body.get("phone").cloned().unwrap_or(Value::Null),
            "membershipStatus": "Pending",
            "joinDate": "2024-06-01"
        });
        data.collections
            .entry("members".to_string())
            .or_default()
            .push(member.clone());
        (
            StatusCode::CREATED,
            Json(json!({"member": member, "token": "new-member-token"})),
        )
            .into_response()
    }

    fn stats(&self) -> Response {
        let members = self.collection("members");
        let active = |items: &[Value], field: &str| {
            items.iter().filter(|item| item[field] == "Active").count()
        };
        Json(json!({
            "totalMembers": members.len(),
            "activeMembers": active(&members, "membershipStatus"),
            "totalFacilities": self.collection("facilities").len(),
            "totalClasses": self.collection("classes").len(),
            "activeSubscriptions": active(&self.collection("member-subscriptions"), "status"),
            "recentMembers": members.iter().rev().take(2).cloned().collect::<Vec<_>>(),
        }))
        .into_response()
    }

    fn registrations(&self, class_id: &str) -> Response {
        let items: Vec<Value> = self
            .collection("registrations")
            .into_iter()
            .filter(|r| r["classId"] == class_id)
            .collect();
        Json(Value::Array(items)).into_response()
    }
}

fn routes(prefix: &str) -> Router<FakeBackend> {
    let mut router = Router::new()
        .route(
            &format!("{prefix}/auth/login"),
            post(|State(b): State<FakeBackend>, Json(body): Json<Value>| async move { b.admin_login(body) }),
        )
        .route(
            &format!("{prefix}/auth/register"),
            post(|State(b): State<FakeBackend>, Json(body): Json<Value>| async move { b.admin_register(body) }),
        )
        .route(
            &format!("{prefix}/members/login"),
            post(|State(b): State<FakeBackend>, Json(body): Json<Value>| async move { b.member_login(body) }),
        )
        .route(
            &format!("{prefix}/members/register"),
            post(|State(b): State<FakeBackend>, Json(body): Json<Value>| async move { b.member_register(body) }),
        )
        .route(
            &format!("{prefix}/dashboard/stats"),
            get(|State(b): State<FakeBackend>| async move { b.stats() }),
        )
        .route(
            &format!("{prefix}/classes/{{id}}/registrations"),
            get(|State(b): State<FakeBackend>, Path(id): Path<String>| async move { b.registrations(&id) }),
        );

    for collection in COLLECTIONS {
        router = router
            .route(
                &format!("{prefix}/{collection}"),
                get(move |State(b): State<FakeBackend>| async move { b.list(collection) }).post(
                    move |State(b): State<FakeBackend>, Json(body): Json<Value>| async move {
                        b.create(collection, body)
                    },
                ),
            )
            .route(
                &format!("{prefix}/{collection}/{{id}}"),
                get(move |State(b): State<FakeBackend>, Path(id): Path<String>| async move {
                    b.get_one(collection, &id)
                })
                .put(
                    move |State(b): State<FakeBackend>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                        b.update(collection, &id, body)
                    },
                )
                .delete(move |State(b): State<FakeBackend>, Path(id): Path<String>| async move {
                    b.delete(collection, &id)
                }),
            );
    }
    router
}

async fn record(State(b): State<FakeBackend>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    b.lock().requests.push(Recorded {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        authorization,
    });
    next.run(request).await
}

/// `RUST_LOG=debug cargo test` shows client logs for failing tests
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn id_matches(item: &Value, id: &str) -> bool {
    match &item["id"] {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}

/// Lower-case the first letter of every object key
fn camelize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let mut chars = key.chars();
                    let key = match chars.next() {
                        Some(first) => first.to_lowercase().chain(chars).collect(),
                        None => key,
                    };
                    (key, camelize(value))
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camelize).collect()),
        other => other,
    }
}

//! Fake shop admin REST API served by actix-web on an ephemeral port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use shop_backoffice::api::credentials::{CredentialProvider, StaticToken};
use shop_backoffice::api::http::HttpAdminApi;

pub const TOKEN: &str = "secret-token";
pub const PASSWORD: &str = "correct horse";

/// A request as the fake server received it.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
pub struct AdminState {
    users: Mutex<Vec<Value>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeAdmin {
    pub base_url: String,
    state: web::Data<AdminState>,
    handle: ServerHandle,
}

fn member(id: usize) -> Value {
    json!({
        "UserID": id,
        "LoginID": format!("user{id:02}"),
        "Name": format!("Member {id}"),
        "Status": if id % 3 == 0 { "Inactive" } else { "Active" },
        "Points": id * 100
    })
}

impl FakeAdmin {
    /// Starts the server with `members` rows in the users table.
    pub async fn start(members: usize) -> Self {
        let state = web::Data::new(AdminState {
            users: Mutex::new((1..=members).map(member).collect()),
            requests: Mutex::default(),
        });

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .app_data(web::PayloadConfig::new(4 * 1024 * 1024))
                .default_service(web::to(handle))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake admin api");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/api/admin"),
            state,
            handle,
        }
    }

    /// Client carrying `token` as bearer credentials.
    pub fn client(&self, token: Option<&str>) -> HttpAdminApi {
        self.client_with(Arc::new(StaticToken::new(token.map(str::to_string))))
    }

    pub fn client_with(&self, credentials: Arc<dyn CredentialProvider>) -> HttpAdminApi {
        HttpAdminApi::new(&self.base_url, credentials, Duration::from_secs(5))
            .expect("build http client")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request received")
    }

    pub fn users(&self) -> Vec<Value> {
        self.state
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn list_users(state: &AdminState, query: &[(String, String)]) -> HttpResponse {
    let param = |key: &str| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };
    let page: usize = param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = param("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let status = param("status");
    let search = param("query").map(str::to_lowercase);

    let users = state.users.lock().unwrap_or_else(PoisonError::into_inner);
    let matching: Vec<&Value> = users
        .iter()
        .filter(|user| status.is_none_or(|s| user["Status"] == s))
        .filter(|user| {
            search.as_deref().is_none_or(|q| {
                user["LoginID"]
                    .as_str()
                    .is_some_and(|login| login.contains(q))
            })
        })
        .collect();
    let total = matching.len();
    let items: Vec<&Value> = matching
        .into_iter()
        .skip((page.max(1) - 1) * limit)
        .take(limit)
        .collect();

    HttpResponse::Ok().json(json!({
        "users": items,
        "totalItems": total,
        "totalPages": total.div_ceil(limit.max(1)),
    }))
}

fn set_user_status(state: &AdminState, id: &str, body: &[u8]) -> HttpResponse {
    let status = json_body(body)["status"].clone();
    let mut users = state.users.lock().unwrap_or_else(PoisonError::into_inner);
    match users
        .iter_mut()
        .find(|user| user["UserID"].to_string() == id)
    {
        Some(user) => {
            user["Status"] = status;
            HttpResponse::Ok().json(user.clone())
        }
        None => HttpResponse::NotFound().json(json!({ "message": "no such user" })),
    }
}

fn delete_user(state: &AdminState, id: &str) -> HttpResponse {
    let mut users = state.users.lock().unwrap_or_else(PoisonError::into_inner);
    users.retain(|user| user["UserID"].to_string() != id);
    HttpResponse::NoContent().finish()
}

async fn handle(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AdminState>,
) -> HttpResponse {
    let query: Vec<(String, String)> =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();
    let header_text = |name: header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let authorization = header_text(header::AUTHORIZATION);
    let path = req
        .path()
        .trim_start_matches("/api/admin/")
        .to_string();

    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(Recorded {
            method: req.method().to_string(),
            path: path.clone(),
            query: query.clone(),
            authorization: authorization.clone(),
            content_type: header_text(header::CONTENT_TYPE),
            body: body.to_vec(),
        });

    let authorized = authorization.as_deref() == Some(format!("Bearer {TOKEN}").as_str());
    let segments: Vec<&str> = path.split('/').collect();

    match (req.method().as_str(), segments.as_slice()) {
        ("POST", ["auth", "login"]) => {
            let credentials = json_body(&body);
            if credentials["username"] == "admin" && credentials["password"] == PASSWORD {
                HttpResponse::Ok().json(json!({ "token": TOKEN }))
            } else {
                HttpResponse::Unauthorized().json(json!({ "message": "wrong credentials" }))
            }
        }
        _ if !authorized => {
            HttpResponse::Unauthorized().json(json!({ "message": "invalid token" }))
        }
        ("GET", ["auth", "verify"]) => HttpResponse::Ok().json(json!({ "valid": true })),
        ("GET", ["users"]) | ("GET", ["users", "search"]) => list_users(&state, &query),
        ("PUT", ["users", id, "status"]) => set_user_status(&state, id, &body),
        ("DELETE", ["users", id]) => delete_user(&state, id),
        ("GET", ["notices"]) => HttpResponse::Ok().json(json!([
            { "NoticeID": 2, "Title": "Holiday hours", "PostDate": "2024-09-14T00:00:00.000Z" },
            { "NoticeID": 1, "Title": "Welcome" }
        ])),
        ("GET", ["points", "count"]) => HttpResponse::Ok().json(json!({ "count": 42 })),
        ("POST", ["coupons"]) => {
            HttpResponse::Conflict().json(json!({ "message": "duplicate coupon name" }))
        }
        ("POST", ["products"]) => HttpResponse::Created().json(json!({ "ProductID": 99 })),
        ("POST", ["upload", _]) => {
            HttpResponse::Ok().json(json!({ "fileUrl": "https://cdn.example/logo.png" }))
        }
        ("GET", ["broken"]) => HttpResponse::InternalServerError().body("database unavailable"),
        _ => HttpResponse::NotFound().json(json!({ "message": "no such route" })),
    }
}

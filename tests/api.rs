//! HTTP 수준 통합 테스트.
//!
//! 서버를 띄우지 않고 `tower::ServiceExt::oneshot`으로 라우터를 직접 호출합니다.
//! DB는 테스트마다 새 인메모리 SQLite를 씁니다.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use brewlog::{db, middleware::auth::create_access_token, routes};
use http_body_util::BodyExt; // for .collect()
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

const SECRET: &str = "integration-secret";

#[derive(Clone)]
struct TestApp {
    app: Router,
}

#[derive(Clone)]
struct Caller {
    id: &'static str,
    token: String,
}

impl TestApp {
    async fn new() -> Self {
        let pool = db::init_pool("sqlite::memory:", 1).await.unwrap();
        let state = routes::AppState {
            pool,
            jwt_secret: SECRET.to_string(),
            token_ttl_minutes: 60,
        };
        Self {
            app: routes::router(state),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        caller: Option<&Caller>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_raw(method, uri, caller, body.map(|body| body.to_string()))
            .await
    }

    /// 본문을 문자열 그대로 보냅니다. 깨진 JSON을 보낼 때 씁니다.
    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        caller: Option<&Caller>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(caller) = caller {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", caller.token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        // 에러 응답도 항상 JSON이어야 하므로 여기서 파싱이 실패하면 테스트가 실패합니다.
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_pale_ale(&self, caller: &Caller) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/brews",
                Some(caller),
                Some(json!({ "brew": { "name": "Pale Ale", "style": "IPA" } })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["brew"]["id"].as_str().unwrap().to_string()
    }

    async fn brew(&self, caller: &Caller, id: &str) -> Value {
        let (status, body) = self
            .send(Method::GET, &format!("/brews/{id}"), Some(caller), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        body["brew"].clone()
    }

    async fn add_comment(&self, caller: &Caller, brew_id: &str, text: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                &format!("/comments/{brew_id}"),
                Some(caller),
                Some(json!({ "comment": { "text": text } })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["comment"].clone()
    }
}

fn caller(id: &'static str) -> Caller {
    let token = create_access_token(id, &format!("{id}@example.com"), SECRET, 60).unwrap();
    Caller { id, token }
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn brew_routes_require_a_valid_token() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/brews", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "missing_token");

    let forged = Caller {
        id: "u",
        token: create_access_token("u", "u@example.com", "wrong-secret", 60).unwrap(),
    };
    let (status, body) = app.send(Method::GET, "/brews", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_token");
}

#[tokio::test]
async fn created_brew_belongs_to_caller_and_round_trips() {
    let app = TestApp::new().await;
    let u = caller("user-u");

    let (status, body) = app
        .send(
            Method::POST,
            "/brews",
            Some(&u),
            Some(json!({ "brew": { "name": "Pale Ale", "style": "IPA", "owner": "intruder" } })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["brew"]["owner"], u.id);

    let id = body["brew"]["id"].as_str().unwrap();
    let brew = app.brew(&u, id).await;
    assert_eq!(brew["owner"], u.id);
    assert_eq!(brew["name"], "Pale Ale");
    assert_eq!(brew["comments"], json!([]));

    let (status, body) = app.send(Method::GET, "/brews", Some(&u), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["brews"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let app = TestApp::new().await;
    let u = caller("user-u");

    let (status, body) = app
        .send(
            Method::POST,
            "/brews",
            Some(&u),
            Some(json!({ "brew": { "name": "   ", "style": "IPA" } })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, body) = app
        .send(Method::POST, "/brews", Some(&u), Some(json!({ "brew": { "name": "No style" } })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn malformed_json_gets_a_json_error_body() {
    let app = TestApp::new().await;
    let u = caller("user-u");

    let (status, body) = app
        .send_raw(Method::POST, "/brews", Some(&u), Some("{not json".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, body) = app
        .send_raw(Method::POST, "/auth/login", None, Some("[".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn get_unknown_brew_is_404() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let (status, _) = app.send(Method::GET, "/brews/nope", Some(&u), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_update_merges_and_ignores_blank_and_owner_fields() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let id = app.create_pale_ale(&u).await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/brews/{id}"),
            Some(&u),
            Some(json!({
                "brew": {
                    "name": "",
                    "owner": "intruder",
                    "tastingNotes": "bright and bitter",
                    "boil": [{ "hop": "cascade", "minutes": 60 }]
                }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let brew = app.brew(&u, &id).await;
    assert_eq!(brew["name"], "Pale Ale");
    assert_eq!(brew["style"], "IPA");
    assert_eq!(brew["owner"], u.id);
    assert_eq!(brew["tastingNotes"], "bright and bitter");
    assert_eq!(brew["boil"], json!([{ "hop": "cascade", "minutes": 60 }]));
    assert_eq!(brew["version"], 1);
}

#[tokio::test]
async fn non_owner_cannot_update_or_delete_brew() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let v = caller("user-v");
    let id = app.create_pale_ale(&u).await;
    let before = app.brew(&u, &id).await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/brews/{id}"),
            Some(&v),
            Some(json!({ "brew": { "name": "Stolen" } })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let (status, _) = app.send(Method::DELETE, &format!("/brews/{id}"), Some(&v), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.brew(&u, &id).await, before);
}

#[tokio::test]
async fn update_checks_existence_and_ownership_before_fields() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let v = caller("user-v");
    let id = app.create_pale_ale(&u).await;
    let blank_name = json!({ "brew": { "name": "   " } });

    let (status, _) = app
        .send(Method::PATCH, "/brews/missing", Some(&u), Some(blank_name.clone()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::PATCH, &format!("/brews/{id}"), Some(&v), Some(blank_name.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::PATCH, &format!("/brews/{id}"), Some(&u), Some(blank_name))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(app.brew(&u, &id).await["name"], "Pale Ale");

    let comment = app.add_comment(&u, &id, "mine").await;
    let comment_uri = format!("/comments/{}", comment["id"].as_str().unwrap());
    let blank_text = json!({ "brewId": id, "comment": { "text": "  " } });

    let (status, _) = app
        .send(Method::PATCH, &comment_uri, Some(&v), Some(blank_text.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::PATCH, &comment_uri, Some(&u), Some(blank_text))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deleting_unknown_brew_is_404_and_changes_nothing() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    app.create_pale_ale(&u).await;

    let (status, _) = app.send(Method::DELETE, "/brews/missing", Some(&u), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send(Method::GET, "/brews", Some(&u), None).await;
    assert_eq!(body["brews"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn owner_can_delete_brew() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let id = app.create_pale_ale(&u).await;

    let (status, _) = app.send(Method::DELETE, &format!("/brews/{id}"), Some(&u), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(Method::GET, &format!("/brews/{id}"), Some(&u), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comment_is_appended_with_caller_snapshot() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let v = caller("user-v");
    let brew_id = app.create_pale_ale(&u).await;
    app.add_comment(&u, &brew_id, "first").await;

    let comment = app.add_comment(&v, &brew_id, "nice").await;
    assert_eq!(comment["text"], "nice");
    assert_eq!(comment["owner"]["id"], v.id);
    assert_eq!(comment["owner"]["email"], "user-v@example.com");

    let brew = app.brew(&u, &brew_id).await;
    let comments = brew["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments.last().unwrap(), &comment);
}

#[tokio::test]
async fn commenting_requires_token_existing_brew_and_text() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let brew_id = app.create_pale_ale(&u).await;
    let body = json!({ "comment": { "text": "hi" } });

    let (status, _) = app
        .send(Method::POST, &format!("/comments/{brew_id}"), None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::POST, "/comments/missing", Some(&u), Some(body))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/comments/{brew_id}"),
            Some(&u),
            Some(json!({ "comment": { "text": "" } })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn concurrent_comment_writes_conflict_instead_of_losing_updates() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let brew_id = app.create_pale_ale(&u).await;
    let uri = format!("/comments/{brew_id}");

    let mut created = 0;
    let mut conflicts = 0;
    // 스케줄링에 따라 한 번에 충돌이 안 날 수도 있으므로 몇 차례 반복합니다.
    for _ in 0..20 {
        let mut writers = tokio::task::JoinSet::new();
        for n in 0..4 {
            let (app, u, uri) = (app.clone(), u.clone(), uri.clone());
            writers.spawn(async move {
                let body = json!({ "comment": { "text": format!("writer {n}") } });
                app.send(Method::POST, &uri, Some(&u), Some(body)).await
            });
        }

        while let Some(joined) = writers.join_next().await {
            let (status, body) = joined.unwrap();
            match status {
                StatusCode::CREATED => created += 1,
                StatusCode::CONFLICT => {
                    assert_eq!(body["error"]["code"], "conflict");
                    conflicts += 1;
                }
                other => panic!("unexpected status {other}"),
            }
        }

        // 성공 응답을 받은 댓글은 모두 남아 있어야 합니다.
        let stored = app.brew(&u, &brew_id).await["comments"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(stored, created);
        if conflicts > 0 {
            break;
        }
    }
    assert!(conflicts > 0, "expected at least one stale save to be rejected");
}

#[tokio::test]
async fn comments_are_readable_without_token() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let first = app.create_pale_ale(&u).await;
    let second = app.create_pale_ale(&u).await;
    app.add_comment(&u, &first, "one").await;
    let two = app.add_comment(&u, &second, "two").await;

    let (status, body) = app.send(Method::GET, "/comments", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let texts: Vec<&str> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["one", "two"]);

    let two_id = two["id"].as_str().unwrap();
    let (status, body) = app
        .send(Method::GET, &format!("/comments/{two_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"], two);

    // 브루 ID는 댓글 ID가 아닙니다.
    let (status, _) = app
        .send(Method::GET, &format!("/comments/{second}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_comment_owner_can_edit_and_blank_text_is_ignored() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let v = caller("user-v");
    let brew_id = app.create_pale_ale(&u).await;
    let comment = app.add_comment(&v, &brew_id, "nice").await;
    let comment_id = comment["id"].as_str().unwrap();
    let uri = format!("/comments/{comment_id}");

    // 브루 소유자라도 댓글 작성자가 아니면 거절
    let (status, _) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&u),
            Some(json!({ "brewId": brew_id, "comment": { "text": "hijack" } })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&v),
            Some(json!({ "brewId": brew_id, "comment": { "text": "" } })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.brew(&u, &brew_id).await["comments"][0]["text"], "nice");

    let (status, _) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&v),
            Some(json!({ "brewId": brew_id, "comment": { "text": "very nice" } })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let brew = app.brew(&u, &brew_id).await;
    let stored = &brew["comments"][0];
    assert_eq!(stored["text"], "very nice");
    assert_eq!(stored["owner"]["id"], v.id);
    assert_eq!(stored["createdAt"], comment["createdAt"]);
}

#[tokio::test]
async fn comment_mutations_404_on_unknown_parent_or_comment() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let brew_id = app.create_pale_ale(&u).await;
    let comment = app.add_comment(&u, &brew_id, "hello").await;
    let comment_uri = format!("/comments/{}", comment["id"].as_str().unwrap());

    let (status, _) = app
        .send(
            Method::PATCH,
            &comment_uri,
            Some(&u),
            Some(json!({ "brewId": "missing", "comment": { "text": "x" } })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::DELETE,
            "/comments/missing",
            Some(&u),
            Some(json!({ "brewId": brew_id })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::DELETE, &comment_uri, Some(&u), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, body) = app
        .send(
            Method::PATCH,
            &comment_uri,
            Some(&u),
            Some(json!({ "comment": { "text": "no parent" } })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(app.brew(&u, &brew_id).await["comments"][0]["text"], "hello");
}

#[tokio::test]
async fn comment_delete_is_owner_only() {
    let app = TestApp::new().await;
    let u = caller("user-u");
    let v = caller("user-v");
    let brew_id = app.create_pale_ale(&u).await;
    let comment = app.add_comment(&v, &brew_id, "bye").await;
    let uri = format!("/comments/{}", comment["id"].as_str().unwrap());
    let body = json!({ "brewId": brew_id });

    let (status, _) = app.send(Method::DELETE, &uri, Some(&u), Some(body.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.brew(&u, &brew_id).await["comments"].as_array().unwrap().len(), 1);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&v), Some(body)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.brew(&u, &brew_id).await["comments"], json!([]));
}

#[tokio::test]
async fn register_login_and_me() {
    let app = TestApp::new().await;
    let credentials = json!({ "email": "Brewer@Example.com", "password": "hunter2hunter2" });

    let (status, body) = app
        .send(Method::POST, "/auth/register", None, Some(credentials.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "brewer@example.com");
    assert!(body["user"].get("password_hash").is_none());
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(Method::POST, "/auth/register", None, Some(credentials.clone()))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "brewer@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::POST, "/auth/login", None, Some(credentials))
        .await;
    assert_eq!(status, StatusCode::OK);
    let me = Caller {
        id: "unused",
        token: body["token"].as_str().unwrap().to_string(),
    };

    let (status, body) = app.send(Method::GET, "/auth/me", Some(&me), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);

    // 발급받은 토큰으로 만든 브루의 소유자는 등록된 사용자입니다.
    let (status, body) = app
        .send(
            Method::POST,
            "/brews",
            Some(&me),
            Some(json!({ "brew": { "name": "Porter", "style": "Robust" } })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["brew"]["owner"], user_id);
}

#[tokio::test]
async fn register_validates_input() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": "no-at-sign", "password": "longenough" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": "a@b.c", "password": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

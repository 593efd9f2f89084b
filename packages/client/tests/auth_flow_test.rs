//! End-to-end tests for the session controller against an in-process stub of
//! the game API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Json, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use arcterm_client::api::ApiClient;
use arcterm_client::command::{Command, Tab};
use arcterm_client::controller::Controller;
use arcterm_client::state::{AuthState, SessionState};
use arcterm_client::store::TokenStore;
use arcterm_client::transport::{HttpTransport, Transport};
use arcterm_shared::api::envelope::TelegramLoginRequest;

/// Programmable stub: records every request (path + body) and answers from a
/// per-path reply table. Unknown paths answer `{"ok": true}`.
#[derive(Clone, Default)]
struct Stub {
    log: Arc<Mutex<Vec<(String, Value)>>>,
    replies: Arc<Mutex<HashMap<String, Value>>>,
    unauthorized: Arc<Mutex<bool>>,
}

impl Stub {
    fn reply(&self, path: &str, value: Value) {
        self.replies
            .lock()
            .unwrap()
            .insert(path.to_string(), value);
    }

    fn paths(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn body_of(&self, path: &str) -> Option<Value> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
    }

    fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }

    fn set_unauthorized(&self, value: bool) {
        *self.unauthorized.lock().unwrap() = value;
    }
}

async fn stub_handler(State(stub): State<Stub>, uri: Uri, Json(body): Json<Value>) -> Response {
    let path = uri.path().trim_start_matches("/api/").to_string();
    stub.log.lock().unwrap().push((path.clone(), body));
    if *stub.unauthorized.lock().unwrap() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let replies = stub.replies.lock().unwrap();
    match replies.get(&path) {
        Some(value) => Json(value.clone()).into_response(),
        None => Json(json!({"ok": true})).into_response(),
    }
}

async fn start_stub(stub: Stub) -> SocketAddr {
    let app = Router::new().fallback(stub_handler).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn api_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(Box::new(HttpTransport::new(format!("http://{}/api", addr))))
}

fn fresh_controller(addr: SocketAddr, dir: &tempfile::TempDir) -> Controller {
    Controller::new(
        api_for(addr),
        TokenStore::new(dir.path()),
        SessionState::new(None, Some(1), None),
    )
}

fn authed_controller(addr: SocketAddr, dir: &tempfile::TempDir, token: &str) -> Controller {
    let store = TokenStore::new(dir.path());
    store.save(token).unwrap();
    let mut state = SessionState::new(None, Some(1), None);
    state.token = Some(token.to_string());
    state.auth = AuthState::Authenticated {
        nickname: "Nick".to_string(),
    };
    Controller::new(api_for(addr), store, state)
}

fn storage_reply() -> Value {
    json!({
        "ok": true,
        "storage": {
            "items": [{"id": "scrap", "name": "Лом", "qty": 3, "rarity": "common", "value": 10}],
            "used": 3, "limit": 40, "total_value": 30,
            "page": 1, "total_pages": 1,
            "sort": "rarity", "sort_label": "редкость",
            "can_upgrade": false, "points": 0, "raidcoins": 0
        }
    })
}

fn sell_reply(items: Value) -> Value {
    json!({
        "ok": true,
        "sell": {
            "items": items,
            "page": 1, "total_pages": 1,
            "sort": "rarity", "sort_label": "редкость",
            "raidcoins": 5
        }
    })
}

#[tokio::test]
async fn test_login_persists_credential_and_triggers_state_fetch() {
    // given:
    let stub = Stub::default();
    stub.reply(
        "auth/login",
        json!({"ok": true, "message": "Вход выполнен.", "token": "T1",
               "user": {"email": "a@b.com", "nickname": "Nick"}}),
    );
    stub.reply("state", json!({"rating": {"points": 3}, "display_name": "Nick"}));
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = fresh_controller(addr, &dir);

    // when:
    let output = controller
        .dispatch(Command::Login {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await;

    // then: banner, persisted credential, and the automatic full-state fetch
    assert!(output.contains("Авторизован: Nick"));
    assert_eq!(
        TokenStore::new(dir.path()).load().unwrap().as_deref(),
        Some("T1")
    );
    assert_eq!(stub.paths(), ["auth/login", "state"]);
    let state_body = stub.body_of("state").unwrap();
    assert_eq!(state_body["auth_token"], json!("T1"));
    // the login request itself carries credentials only
    let login_body = stub.body_of("auth/login").unwrap();
    assert!(login_body.get("auth_token").is_none());
}

#[tokio::test]
async fn test_restart_restores_the_most_recent_credential() {
    // given: a token persisted by a previous run
    let stub = Stub::default();
    stub.reply("state", json!({"rating": {"points": 1}, "display_name": "Nick"}));
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    TokenStore::new(dir.path()).save("T9").unwrap();
    let mut controller = fresh_controller(addr, &dir);
    controller.state.token = None; // nothing in memory before startup

    // when:
    let output = controller.startup().await;

    // then:
    assert!(output.contains("Авторизован: Nick"));
    assert_eq!(stub.body_of("state").unwrap()["auth_token"], json!("T9"));
    assert!(controller.state.is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_on_startup_purges_credential() {
    // given: the server rejects the stored credential
    let stub = Stub::default();
    stub.set_unauthorized(true);
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    TokenStore::new(dir.path()).save("stale").unwrap();
    let mut controller = fresh_controller(addr, &dir);

    // when:
    let output = controller.startup().await;

    // then: both copies of the credential are gone, login prompt shown
    assert!(output.contains("login"));
    assert!(!controller.state.is_authenticated());
    assert!(controller.state.token.is_none());
    assert!(TokenStore::new(dir.path()).load().unwrap().is_none());
}

#[tokio::test]
async fn test_silent_telegram_exchange_on_startup() {
    // given: no persisted credential, an init proof on the command line
    let stub = Stub::default();
    stub.reply(
        "auth/telegram/init",
        json!({"ok": true, "token": "T2", "user": {"nickname": "ТГИгрок"}}),
    );
    stub.reply("state", json!({"rating": {"points": 0}}));
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new(
        api_for(addr),
        TokenStore::new(dir.path()),
        SessionState::new(Some("proof".to_string()), Some(1), None),
    );

    // when:
    let output = controller.startup().await;

    // then: the proof travelled in the envelope, the token stuck
    assert!(output.contains("Авторизован: ТГИгрок"));
    assert_eq!(
        stub.body_of("auth/telegram/init").unwrap()["init_data"],
        json!("proof")
    );
    assert_eq!(
        TokenStore::new(dir.path()).load().unwrap().as_deref(),
        Some("T2")
    );
}

#[tokio::test]
async fn test_prev_at_page_one_issues_no_request() {
    // given: the storage tab freshly opened at page 1
    let stub = Stub::default();
    stub.reply("storage", storage_reply());
    stub.reply("sell", sell_reply(json!([])));
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = authed_controller(addr, &dir, "T1");
    controller.dispatch(Command::Tab(Tab::Storage)).await;
    stub.clear_log();

    // when:
    let output = controller.dispatch(Command::Prev).await;

    // then: a strict no-op
    assert!(output.is_empty());
    assert!(stub.paths().is_empty());
}

#[tokio::test]
async fn test_validation_notice_leaves_rendered_list_intact() {
    // given: a sell list with one item, selected
    let stub = Stub::default();
    stub.reply(
        "sell",
        sell_reply(json!([{"id": "scrap", "name": "Лом", "qty": 3,
                           "unit_price": 7, "total_price": 21}])),
    );
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = authed_controller(addr, &dir, "T1");
    controller.dispatch(Command::Tab(Tab::Sell)).await;
    controller.dispatch(Command::Pick("scrap".to_string())).await;

    // when: the confirmation is rejected with a message-only reply
    stub.reply(
        "sell/confirm",
        json!({"ok": false, "message": "Недостаточно предметов."}),
    );
    let output = controller
        .dispatch(Command::Confirm("5".to_string()))
        .await;

    // then: the notice verbatim, the old list still rendered
    assert!(output.starts_with("Недостаточно предметов."));
    assert!(output.contains("Лом"));
    let confirm_body = stub.body_of("sell/confirm").unwrap();
    assert_eq!(confirm_body["qty_raw"], json!("5"));
    assert_eq!(confirm_body["item_id"], json!("scrap"));
}

#[tokio::test]
async fn test_expiry_mid_session_disables_game_controls() {
    // given: an authenticated session that the server stops honoring
    let stub = Stub::default();
    stub.reply("rating", json!({"ok": true, "rating": {"rows": []}}));
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = authed_controller(addr, &dir, "T1");
    controller.dispatch(Command::Tab(Tab::Rating)).await;
    stub.set_unauthorized(true);

    // when:
    let expired = controller.dispatch(Command::Tab(Tab::Rating)).await;
    let refused = controller
        .dispatch(Command::Action("loot".to_string()))
        .await;

    // then: uniform handling regardless of the endpoint that produced it
    assert!(expired.contains("Сессия истекла"));
    assert!(refused.contains("Сначала войдите"));
    assert!(TokenStore::new(dir.path()).load().unwrap().is_none());
}

#[tokio::test]
async fn test_admin_update_sends_only_the_changed_field() {
    // given:
    let stub = Stub::default();
    stub.reply(
        "admin/update",
        json!({"ok": true, "message": "Настройки обновлены.",
               "settings": {"warehouse_goal": 5000}}),
    );
    let addr = start_stub(stub.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = authed_controller(addr, &dir, "T1");

    // when:
    let output = controller
        .dispatch(Command::AdminSet {
            field: "warehouse_goal".to_string(),
            value: "5000".to_string(),
        })
        .await;

    // then:
    assert!(output.contains("Настройки обновлены."));
    assert!(output.contains("warehouse_goal = 5000"));
    let body = stub.body_of("admin/update").unwrap();
    assert_eq!(body["warehouse_goal"], json!(5000));
    assert!(body.get("event_base").is_none());
}

#[tokio::test]
async fn test_telegram_login_widget_exchange() {
    // given: the login-widget variant used outside the Mini-App shell
    let stub = Stub::default();
    stub.reply(
        "auth/telegram",
        json!({"ok": true, "message": "Вход через Telegram выполнен.",
               "token": "T3", "user": {"nickname": "Игрок"}}),
    );
    let addr = start_stub(stub.clone()).await;
    let api = api_for(addr);

    // when:
    let reply = api
        .auth_telegram(&TelegramLoginRequest {
            login_data: json!({"id": 7, "hash": "abc"}),
        })
        .await
        .unwrap();

    // then:
    assert!(reply.ok);
    assert_eq!(reply.token.as_deref(), Some("T3"));
    assert_eq!(
        stub.body_of("auth/telegram").unwrap()["login_data"]["id"],
        json!(7)
    );
}

#[tokio::test]
async fn test_transport_error_never_crashes_the_controller() {
    // given: a base URL nothing listens on
    let dir = tempfile::tempdir().unwrap();
    let api = ApiClient::new(Box::new(HttpTransport::new("http://127.0.0.1:1/api")));
    let store = TokenStore::new(dir.path());
    let mut state = SessionState::new(None, Some(1), None);
    state.token = Some("T1".to_string());
    state.auth = AuthState::Authenticated {
        nickname: "Nick".to_string(),
    };
    let mut controller = Controller::new(api, store, state);

    // when:
    let output = controller.dispatch(Command::Tab(Tab::Season)).await;

    // then: a notice, and the session is still considered authenticated
    assert!(output.contains("Сбой сети"));
    assert!(controller.state.is_authenticated());
}

#[tokio::test]
async fn test_raw_transport_maps_401_uniformly() {
    // given:
    let stub = Stub::default();
    stub.set_unauthorized(true);
    let addr = start_stub(stub.clone()).await;
    let transport = HttpTransport::new(format!("http://{}/api", addr));

    // when:
    let result = transport.post("warehouse", json!({"init_data": ""})).await;

    // then:
    assert!(matches!(
        result,
        Err(arcterm_client::error::ClientError::Unauthorized)
    ));
}

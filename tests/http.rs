use once_cell::sync::Lazy;
use reqwest::{redirect::Policy, Client};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Behavior {
    id: u64,
    user_id: String,
    action: String,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    total_actions: u64,
    actions_over_time: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reset {
    total_actions: u64,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("behavior_analytics_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_behavior_analytics"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_behaviors(client: &Client, base_url: &str) -> Vec<Behavior> {
    client
        .get(format!("{base_url}/api/behaviors"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_behavior_goes_first() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_behaviors(&client, &server.base_url).await;

    let created: Behavior = client
        .post(format!("{}/api/behaviors", server.base_url))
        .json(&serde_json::json!({
            "userId": "user_99",
            "action": "click",
            "page": "Home",
            "duration": 42,
            "device": "desktop",
            "browser": "Chrome",
            "timestamp": "2001-01-01T00:00:00.000Z",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(created.user_id, "user_99");
    assert_eq!(created.action, "click");
    assert!(!created.timestamp.starts_with("2001"));

    let after = fetch_behaviors(&client, &server.base_url).await;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0].id, created.id);
    assert!(before.iter().all(|b| b.id != created.id));

    let stats: Stats = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats.total_actions, after.len() as u64);
    assert_eq!(stats.actions_over_time.len(), 7);
}

#[tokio::test]
async fn http_reset_restores_fifty_records() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let reset: Reset = client
        .post(format!("{}/api/reset", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reset.total_actions, 50);

    let behaviors = fetch_behaviors(&client, &server.base_url).await;
    assert_eq!(behaviors.len(), 50);
}

#[tokio::test]
async fn http_rejects_malformed_json() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/behaviors", server.base_url))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_views_render() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder().redirect(Policy::none()).build().unwrap();

    let root = client.get(&server.base_url).send().await.unwrap();
    assert!(root.status().is_redirection());
    assert_eq!(root.headers()["location"], "/dashboard");

    for path in ["/dashboard", "/tracker", "/analytics"] {
        let page = client
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(page.status().is_success(), "{path} failed");
        let body = page.text().await.unwrap();
        assert!(body.contains("Behavior Analytics"));
    }

    let added = client
        .post(format!("{}/tracker/add", server.base_url))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("userId=user_7&action=search&page=Products&duration=15&device=mobile&browser=Safari")
        .send()
        .await
        .unwrap();
    assert!(added.status().is_redirection());
    assert_eq!(added.headers()["location"], "/tracker");

    let behaviors = fetch_behaviors(&client, &server.base_url).await;
    assert_eq!(behaviors[0].user_id, "user_7");
}

#[tokio::test]
async fn http_accepts_null_and_string_typed_fields() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/behaviors", server.base_url))
        .json(&serde_json::json!({
            "userId": null,
            "action": "scroll",
            "duration": "42",
            "browser": null,
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let created: Behavior = response.json().await.unwrap();
    assert_eq!(created.user_id, "");
    assert_eq!(created.action, "scroll");
}

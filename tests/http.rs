use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    liters: f64,
    goal: f64,
    percent: f64,
    achieved: bool,
    intake_message: String,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct DailyPoint {
    date: String,
    label: String,
    liters: f64,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    days: Vec<DailyPoint>,
}

#[derive(Debug, Deserialize)]
struct GoalResponse {
    goal: f64,
}

#[derive(Debug, Deserialize)]
struct TipResponse {
    tip: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
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
    path.push(format!("hydration_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_hydration_tracker"))
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

async fn post_json(client: &Client, url: String, body: serde_json::Value) -> reqwest::Response {
    client.post(url).json(&body).send().await.unwrap()
}

async fn fetch_today(client: &Client, base_url: &str) -> TodayResponse {
    client
        .get(format!("{base_url}/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_intake_updates_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post_json(
        &client,
        format!("{}/api/intake", server.base_url),
        serde_json::json!({ "liters": 1.25 }),
    )
    .await;
    assert!(response.status().is_success());
    let updated: TodayResponse = response.json().await.unwrap();
    assert_eq!(updated.liters, 1.25);

    let today = fetch_today(&client, &server.base_url).await;
    assert_eq!(today.liters, 1.25);
    assert_eq!(today.intake_message, "Today's water intake: 1.25 liters");
    assert!(!today.date.is_empty());

    // Later writes overwrite, and text input is accepted.
    let response = post_json(
        &client,
        format!("{}/api/intake", server.base_url),
        serde_json::json!({ "liters": "0.75" }),
    )
    .await;
    assert!(response.status().is_success());
    assert_eq!(fetch_today(&client, &server.base_url).await.liters, 0.75);
}

#[tokio::test]
async fn http_invalid_intake_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_today(&client, &server.base_url).await;

    for liters in [serde_json::json!(0), serde_json::json!(-1.5), serde_json::json!("abc")] {
        let response = post_json(
            &client,
            format!("{}/api/intake", server.base_url),
            serde_json::json!({ "liters": liters }),
        )
        .await;
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json().await.unwrap();
        assert_eq!(body.error, "Please enter a valid amount.");
    }

    let after = fetch_today(&client, &server.base_url).await;
    assert_eq!(after.liters, before.liters);
}

#[tokio::test]
async fn http_goal_is_clamped() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let goal_url = format!("{}/api/goal", server.base_url);

    for (requested, stored) in [(0.1, 0.3), (15.0, 10.0), (1.5, 1.5)] {
        let response = post_json(
            &client,
            goal_url.clone(),
            serde_json::json!({ "goal": requested }),
        )
        .await;
        assert!(response.status().is_success());
        let saved: GoalResponse = response.json().await.unwrap();
        assert_eq!(saved.goal, stored);
    }

    let current: GoalResponse = client
        .get(&goal_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.goal, 1.5);

    let response = post_json(&client, goal_url.clone(), serde_json::json!({ "goal": "0" })).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "Please enter a valid goal.");
}

#[tokio::test]
async fn http_progress_tracks_goal() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    post_json(
        &client,
        format!("{}/api/goal", server.base_url),
        serde_json::json!({ "goal": 2.0 }),
    )
    .await;

    let half: TodayResponse = post_json(
        &client,
        format!("{}/api/intake", server.base_url),
        serde_json::json!({ "liters": 1.0 }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(half.goal, 2.0);
    assert_eq!(half.percent, 50.0);
    assert!(!half.achieved);
    assert_eq!(half.summary, "You have consumed 1.00 L of 2.00 L (50%).");

    let full: TodayResponse = post_json(
        &client,
        format!("{}/api/intake", server.base_url),
        serde_json::json!({ "liters": 2.0 }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(full.percent, 100.0);
    assert!(full.achieved);
}

#[tokio::test]
async fn http_history_covers_last_seven_days() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    post_json(
        &client,
        format!("{}/api/intake", server.base_url),
        serde_json::json!({ "liters": 1.75 }),
    )
    .await;
    let today = fetch_today(&client, &server.base_url).await;

    let history: HistoryResponse = client
        .get(format!("{}/api/history", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(history.days.len(), 7);
    assert!(history.days.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert!(history.days.iter().all(|day| day.date.ends_with(&day.label)));
    let last = history.days.last().unwrap();
    assert_eq!(last.date, today.date);
    assert_eq!(last.liters, 1.75);
}

#[tokio::test]
async fn http_index_and_tip_render() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    let html = page.text().await.unwrap();
    assert!(html.contains("Hydration Tracker"));
    assert!(!html.contains("{{"));

    let tip: TipResponse = client
        .get(format!("{}/api/tip", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!tip.tip.is_empty());
}

#[tokio::test]
async fn http_form_routes_redirect_with_notice() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let cases = [
        ("/intake", "liters=1.5", "/?notice=intake"),
        ("/intake", "liters=-1", "/?notice=invalid-intake"),
        ("/intake", "liters=abc", "/?notice=invalid-intake"),
        ("/goal", "goal=2.5", "/?notice=goal"),
        ("/goal", "goal=0", "/?notice=invalid-goal"),
    ];
    for (path, body, expected) in cases {
        let response = client
            .post(format!("{}{path}", server.base_url))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER, "{path} {body}");
        let location = response.headers()["location"].to_str().unwrap().to_string();
        assert_eq!(location, expected, "{path} {body}");
    }

    let today = fetch_today(&client, &server.base_url).await;
    assert_eq!(today.liters, 1.5);
    assert_eq!(today.goal, 2.5);
}

#[tokio::test]
async fn http_index_shows_notice() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let cases = [
        ("intake", "Water intake updated!"),
        ("goal", "Goal saved!"),
        ("invalid-intake", "Please enter a valid amount."),
        ("invalid-goal", "Please enter a valid goal."),
    ];
    for (notice, message) in cases {
        let html = client
            .get(format!("{}/?notice={notice}", server.base_url))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains(&format!(r#"id="successMessage">{message}</div>"#)));
    }

    let html = client
        .get(format!("{}/?notice=unknown", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"id="successMessage"></div>"#));
}

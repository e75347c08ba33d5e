use super::*;

#[test]
fn test_command_exists() {
    #[cfg(unix)]
    {
        assert!(WebDriverManager::command_exists("ls"));
        assert!(!WebDriverManager::command_exists("nonexistent_command_12345"));
    }

    #[cfg(windows)]
    {
        assert!(WebDriverManager::command_exists("cmd"));
        assert!(!WebDriverManager::command_exists("nonexistent_command_12345"));
    }
}

#[test]
fn test_find_free_port() {
    let port = WebDriverManager::find_free_port(&BrowserType::Chrome).unwrap();
    assert!(port > 0);
}

#[test]
fn test_is_port_in_use() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    assert!(WebDriverManager::is_port_in_use(port));

    drop(listener);
    assert!(!WebDriverManager::is_port_in_use(port));
}

#[tokio::test]
async fn test_driver_not_ready_on_closed_port() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    assert!(!WebDriverManager::is_driver_ready(&format!("http://127.0.0.1:{}", port)).await);
}

#[test]
fn test_shutdown_without_driver() {
    let manager = WebDriverManager::new();
    manager.shutdown();
    assert!(manager.lock().is_none());
}

#[cfg(unix)]
#[test]
fn test_shutdown_kills_spawned_driver() {
    use std::os::unix::process::CommandExt;

    let mut cmd = Command::new("sleep");
    cmd.arg("30").process_group(0);
    let child = cmd.spawn().unwrap();
    let pid = child.id();

    let manager = WebDriverManager::new();
    *manager.lock() = Some(SpawnedDriver {
        browser_type: BrowserType::Chrome,
        child,
        url: "http://localhost:1".to_string(),
    });
    manager.shutdown();

    assert!(manager.lock().is_none());
    let alive = Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .unwrap();
    assert!(!alive.success());
}

#[tokio::test]
async fn test_ensure_driver_uses_driver_on_standard_port() {
    use axum::{Json, Router, routing::get};

    // Only meaningful when nothing real listens on geckodriver's port
    if WebDriverManager::is_port_in_use(4444) {
        return;
    }
    let listener = tokio::net::TcpListener::bind("127.0.0.1:4444").await.unwrap();
    let app = Router::new().route(
        "/status",
        get(|| async { Json(serde_json::json!({ "value": { "ready": true } })) }),
    );
    tokio::spawn(async move { axum::serve(listener, app).await });

    let manager = WebDriverManager::new();
    let url = manager.ensure_driver(&BrowserType::Firefox).await.unwrap();
    assert_eq!(url, "http://localhost:4444");
    assert!(manager.lock().is_none());
}

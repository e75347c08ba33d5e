use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::webdriver::BrowserType;

/// Polls of `/status` before a freshly spawned driver is given up on
const READY_ATTEMPTS: u32 = 30;
const READY_INTERVAL: Duration = Duration::from_millis(100);

/// Finds or starts the WebDriver (geckodriver, chromedriver) for a run.
///
/// A scrape run uses one browser, so at most one driver is owned here. It is
/// killed on [`WebDriverManager::shutdown`] or when the manager is dropped.
#[derive(Default)]
pub struct WebDriverManager {
    driver: Mutex<Option<SpawnedDriver>>,
}

/// A driver process this run started. Dropping it kills the process.
struct SpawnedDriver {
    browser_type: BrowserType,
    child: Child,
    url: String,
}

impl Drop for SpawnedDriver {
    fn drop(&mut self) {
        debug!("Stopping {} at {}", self.browser_type.driver_name(), self.url);

        // The driver runs in its own process group; take its browsers down too
        #[cfg(unix)]
        for signal in ["-TERM", "-KILL"] {
            let group = format!("-{}", self.child.id());
            if let Err(e) = Command::new("kill").args([signal, group.as_str()]).output() {
                debug!("kill {} {} failed: {}", signal, group, e);
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl WebDriverManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of a ready WebDriver for `browser_type`.
    ///
    /// Reuses the driver this run already started, then one listening on the
    /// browser's standard port, and only then spawns a new one.
    pub async fn ensure_driver(&self, browser_type: &BrowserType) -> Result<String> {
        let owned_url = self
            .lock()
            .as_ref()
            .filter(|driver| driver.browser_type == *browser_type)
            .map(|driver| driver.url.clone());

        if let Some(url) = owned_url
            && Self::is_driver_ready(&url).await
        {
            return Ok(url);
        }

        let standard_url = format!("http://localhost:{}", Self::standard_port(browser_type));
        if Self::is_driver_ready(&standard_url).await {
            debug!("Using running WebDriver at {}", standard_url);
            return Ok(standard_url);
        }

        info!("No WebDriver running, starting {}", browser_type.driver_name());
        self.spawn(browser_type).await
    }

    fn standard_port(browser_type: &BrowserType) -> u16 {
        match browser_type {
            BrowserType::Firefox => 4444,
            BrowserType::Chrome => 9515,
        }
    }

    async fn spawn(&self, browser_type: &BrowserType) -> Result<String> {
        let command = browser_type.driver_name();
        if !Self::command_exists(command) {
            anyhow::bail!(
                "{} not found in PATH. Install it (macOS: brew install {}) or see \
                 https://www.selenium.dev/documentation/webdriver/getting_started/install_drivers/",
                command,
                command
            );
        }

        let port = Self::find_free_port(browser_type)?;
        let port_arg = match browser_type {
            BrowserType::Firefox => vec!["--port".to_string(), port.to_string()],
            BrowserType::Chrome => vec![format!("--port={}", port)],
        };

        let mut cmd = Command::new(command);
        cmd.args(&port_arg).stdout(Stdio::null()).stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd
            .spawn()
            .with_context(|| format!("Failed to start {}", command))?;
        let url = format!("http://localhost:{}", port);

        // Replacing a previous driver drops, and so kills, it
        *self.lock() = Some(SpawnedDriver {
            browser_type: *browser_type,
            child,
            url: url.clone(),
        });

        for _ in 0..READY_ATTEMPTS {
            if Self::is_driver_ready(&url).await {
                info!("{} ready on port {}", command, port);
                return Ok(url);
            }
            sleep(READY_INTERVAL).await;
        }

        self.shutdown();
        anyhow::bail!("{} failed to start within timeout", command)
    }

    /// Check if a command exists in PATH
    pub fn command_exists(command: &str) -> bool {
        #[cfg(unix)]
        let finder = "which";
        #[cfg(windows)]
        let finder = "where";

        Command::new(finder)
            .arg(command)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// A free port near the browser's standard one, or any port the OS hands out
    pub fn find_free_port(browser_type: &BrowserType) -> Result<u16> {
        let first = Self::standard_port(browser_type);
        if let Some(port) = (first..first + 3).find(|port| !Self::is_port_in_use(*port)) {
            return Ok(port);
        }

        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        Ok(listener.local_addr()?.port())
    }

    pub fn is_port_in_use(port: u16) -> bool {
        std::net::TcpListener::bind(("127.0.0.1", port)).is_err()
    }

    /// A working driver answers `/status` with `value.ready == true`
    pub async fn is_driver_ready(url: &str) -> bool {
        let response = match reqwest::Client::new()
            .get(format!("{}/status", url))
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            _ => return false,
        };

        response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.pointer("/value/ready").and_then(|r| r.as_bool()))
            .unwrap_or(false)
    }

    fn lock(&self) -> MutexGuard<'_, Option<SpawnedDriver>> {
        // A poisoned slot still holds a child that must be killed
        self.driver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Kill the driver this run started, if any
    pub fn shutdown(&self) {
        self.lock().take();
    }
}

lazy_static::lazy_static! {
    pub static ref GLOBAL_WEBDRIVER_MANAGER: WebDriverManager = WebDriverManager::new();
}

#[cfg(test)]
#[path = "webdriver_manager_test.rs"]
mod webdriver_manager_test;

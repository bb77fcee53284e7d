//! Runs the real binary on a free port with the in-memory store and walks
//! through signup and login over HTTP.

use anyhow::{bail, Context, Result};
use reqwest::{header::LOCATION, redirect::Policy, StatusCode};
use std::{
    net::TcpListener,
    process::{Child, Command, Stdio},
    time::Duration,
};
use tokio::time::sleep;

struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn pick_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind a local port")?;
    Ok(listener
        .local_addr()
        .context("Failed to read local port")?
        .port())
}

fn spawn_usersignup(port: u16) -> Result<ChildGuard> {
    let child = Command::new(env!("CARGO_BIN_EXE_usersignup"))
        .env_remove("USERSIGNUP_DSN")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .args(["--host", "127.0.0.1", "--port", &port.to_string()])
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .context("Failed to spawn usersignup binary")?;
    Ok(ChildGuard(child))
}

async fn wait_for_ready(client: &reqwest::Client, base: &str) -> Result<()> {
    for _ in 0..40 {
        match client.get(format!("{base}/health")).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => sleep(Duration::from_millis(250)).await,
        }
    }
    bail!("usersignup did not become ready at {base}");
}

fn signup_form<'a>(user_name: &'a str, password: &'a str) -> [(&'static str, &'a str); 6] {
    [
        ("userName", user_name),
        ("firstName", "Ada"),
        ("lastName", "Lovelace"),
        ("password", password),
        ("emailAddress", "ada@example.com"),
        ("dateOfBirth", "12/10/1815"),
    ]
}

#[tokio::test]
async fn signup_then_login_over_http() -> Result<()> {
    let port = pick_port()?;
    let _server = spawn_usersignup(port)?;
    let base = format!("http://127.0.0.1:{port}");

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .timeout(Duration::from_secs(5))
        .build()?;

    wait_for_ready(&client, &base).await?;

    let health: serde_json::Value = client
        .get(format!("{base}/health"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(health["name"], "usersignup");

    let response = client.get(format!("{base}/signup")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(format!("{base}/signup"))
        .form(&signup_form("ada1815", "engine"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/login")
    );

    let response = client
        .post(format!("{base}/signup"))
        .form(&signup_form("ada1815", "engine"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response
        .text()
        .await?
        .contains("User Name exists. Try another user name"));

    // Stored as ROT13 and compared as typed.
    let response = client
        .post(format!("{base}/login"))
        .form(&[("userName", "ada1815"), ("password", "engine")])
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(format!("{base}/login"))
        .form(&[("userName", "ada1815"), ("password", "ratvar")])
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await?.contains("Welcome, ada1815."));

    Ok(())
}

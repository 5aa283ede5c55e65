//! Test server fixture: boots the messaging server on a local port.

#![allow(dead_code)]

use std::time::Duration;

use tsunagu_server::{ServerConfig, run_server};

pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Start a server on the given port with the given registered users and
    /// wait until the health endpoint answers.
    pub async fn start(port: u16, seed_users: &[&str]) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            seed_users: seed_users.iter().map(|s| s.to_string()).collect(),
        };
        tokio::spawn(async move {
            if let Err(e) = run_server(config).await {
                panic!("test server failed: {e}");
            }
        });

        let server = Self { port };
        server.wait_until_healthy().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self, user_id: Option<&str>) -> String {
        match user_id {
            Some(id) => format!("ws://127.0.0.1:{}/ws?user_id={}", self.port, id),
            None => format!("ws://127.0.0.1:{}/ws", self.port),
        }
    }

    async fn wait_until_healthy(&self) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if let Ok(response) = client
                .get(format!("{}/api/health", self.base_url()))
                .send()
                .await
                && response.status().is_success()
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("test server did not become healthy on port {}", self.port);
    }
}

//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::net::TcpListener;

use ben10_mock_server::config::MockConfig;
use ben10_mock_server::http::MockServer;
use ben10_mock_server::lifecycle::Shutdown;

/// A mock server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server with the default configuration.
pub async fn start_server() -> TestServer {
    start_server_with(MockConfig::default()).await
}

/// Start a server with a custom configuration. The listener settings are ignored.
pub async fn start_server_with(config: MockConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = MockServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// HTTP client that never reuses connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

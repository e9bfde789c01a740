#![allow(dead_code)]

use mono::MonoClient;
use mockito::ServerGuard;

pub const API_KEY: &str = "test_sk_123";

/// Local mock of the Mono API and a client pointed at it
pub async fn mock_api() -> (ServerGuard, MonoClient) {
    let server = mockito::Server::new_async().await;
    let client = MonoClient::new(API_KEY).with_base_url(server.url());
    (server, client)
}

/// Base URL on which nothing is listening
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

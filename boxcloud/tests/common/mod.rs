use boxcloud::{Client, Config};
use wiremock::MockServer;

pub const TOKEN: &str = "T9cE5asGnuyYCCqIZFoWjFHvNbvVqHjl";

/// Start a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, Client) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let server = MockServer::start().await;
    let config = Config::new(TOKEN).with_base_url(&server.uri()).unwrap();

    (server, Client::new(config).unwrap())
}

#[allow(dead_code)]
pub fn error_body(status: u16, code: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "error",
        "status": status,
        "code": code,
        "message": "Not Found",
        "request_id": "abcdef123456",
    })
}

mod common;

use boxcloud::{Client, Config, Error, ErrorKind, Method, StatusCode};
use common::{setup, TOKEN};
use serde::{ser::Error as _, Serialize, Serializer};
use wiremock::{
    matchers::{any, bearer_token, body_json, header, method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn credential_on_every_method() {
    let (server, client) = setup().await;

    Mock::given(bearer_token(TOKEN))
        .and(path("/resource"))
        .respond_with(ResponseTemplate::new(204))
        .expect(4)
        .mount(&server)
        .await;

    for m in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let req = client.new_request(m, "/resource", None::<&()>).unwrap();
        assert_eq!(client.send(req).await.unwrap(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn json_body_is_sent() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "hello": "world" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let req = client
        .new_request(
            Method::POST,
            "/echo",
            Some(&serde_json::json!({ "hello": "world" })),
        )
        .unwrap();
    let res: serde_json::Value = client.send_json(req).await.unwrap();

    assert_eq!(res, serde_json::json!({ "ok": true }));
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("cannot serialize"))
    }
}

#[tokio::test]
async fn unserializable_body_never_hits_the_network() {
    let (server, client) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .new_request(Method::POST, "/users", Some(&Unserializable))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Construction);
}

#[tokio::test]
async fn malformed_response_is_a_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn non_envelope_error_keeps_the_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();

    assert!(matches!(err, Error::UnexpectedStatus(_)));
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.kind(), ErrorKind::Api);
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Nothing listens on the discard port.
    let config = Config::new(TOKEN)
        .with_base_url("http://127.0.0.1:9/")
        .unwrap();
    let client = Client::new(config).unwrap();

    let err = client.me().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

//! Shared helpers for tests that talk to a stand-in Mars Rover Photos API

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockBuilder, ResponseTemplate};

/// Path the client requests for the curiosity rover
pub const CURIOSITY_PHOTOS_PATH: &str = "/mars-photos/api/v1/rovers/curiosity/photos";

/// Builds a photos listing with one entry per `img_src`
pub fn photos_body(srcs: &[&str]) -> serde_json::Value {
    let photos: Vec<serde_json::Value> = srcs
        .iter()
        .enumerate()
        .map(|(id, src)| {
            serde_json::json!({
                "id": id,
                "sol": 1000,
                "camera": { "name": "NAVCAM" },
                "img_src": src,
                "earth_date": "2016-04-02"
            })
        })
        .collect();
    serde_json::json!({ "photos": photos })
}

/// A 200 response carrying a photos listing
pub fn photos_response(srcs: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(photos_body(srcs))
}

/// Matches a GET for the curiosity photos endpoint
pub fn curiosity_photos() -> MockBuilder {
    Mock::given(method("GET")).and(path(CURIOSITY_PHOTOS_PATH))
}

/// A base URL nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("listener has an address");
    drop(listener);
    format!("http://{}", addr)
}

/// Serves a single 200 whose body is shorter than its Content-Length
///
/// wiremock always sends well-formed bodies, so this one case uses a raw socket.
pub async fn serve_cut_short_body(body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len() + 64
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(body.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

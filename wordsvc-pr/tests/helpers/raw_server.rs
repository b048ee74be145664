//! Raw TCP responder for malformed HTTP replies
//!
//! Answers every connection with a fixed byte string and closes it, which
//! lets tests produce responses a well-behaved server never sends.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start the responder; returns an `api.php` URL pointing at it
pub async fn start_raw_server(reply: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind raw server");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            // Consume the request head before replying
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let _ = stream.write_all(reply.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    format!("http://{}/w/api.php", addr)
}

/// Non-success head announcing more body bytes than are sent
pub const TRUNCATED_503: &str = "HTTP/1.1 503 Service Unavailable\r\n\
    Content-Type: text/plain\r\n\
    Content-Length: 1000\r\n\
    Connection: close\r\n\
    \r\n\
    partial";

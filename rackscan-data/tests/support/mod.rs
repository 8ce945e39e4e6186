//! Loopback HTTP server for exercising the HTTP sources.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A canned response served to exactly one connection.
pub struct CannedServer {
    /// Base URL of the server, without a trailing slash.
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    /// Serve `body` with `status` to the first connection.
    pub fn respond(status: &str, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        Self::spawn(move |mut stream| {
            let request = read_request(&mut stream);
            stream
                .write_all(response.as_bytes())
                .unwrap_or_else(|err| panic!("failed to write response: {err}"));
            request
        })
    }

    /// Accept one connection and hold it open without answering.
    pub fn stall(for_duration: Duration) -> Self {
        Self::spawn(move |mut stream| {
            let request = read_request(&mut stream);
            thread::sleep(for_duration);
            request
        })
    }

    fn spawn<F>(serve: F) -> Self
    where
        F: FnOnce(TcpStream) -> String + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind loopback listener: {err}"));
        let port = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("failed to read listener address: {err}"))
            .port();
        let handle = thread::spawn(move || {
            let (stream, _) = listener
                .accept()
                .unwrap_or_else(|err| panic!("failed to accept connection: {err}"));
            serve(stream)
        });
        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            handle,
        }
    }

    /// Wait for the connection to finish and return the raw request head.
    pub fn request(self) -> String {
        self.handle
            .join()
            .unwrap_or_else(|_| panic!("server thread panicked"))
    }
}

/// A URL on which nothing is listening.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("failed to bind loopback listener: {err}"));
    let port = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("failed to read listener address: {err}"))
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buffer = [0_u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream
            .read(&mut buffer)
            .unwrap_or_else(|err| panic!("failed to read request: {err}"));
        if read == 0 {
            break;
        }
        head.extend_from_slice(buffer.get(..read).unwrap_or_default());
    }
    String::from_utf8_lossy(&head).into_owned()
}

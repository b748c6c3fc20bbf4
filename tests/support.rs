use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

/// One canned response, matched by request-path prefix.
#[derive(Clone)]
pub struct Route {
    pub path_prefix: &'static str,
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Duration,
    pub hits: Arc<AtomicUsize>,
}

impl Route {
    #[must_use]
    pub fn new(path_prefix: &'static str, status: u16, body: &str) -> Self {
        Self {
            path_prefix,
            status,
            content_type: "application/json",
            body: body.to_owned(),
            delay: Duration::ZERO,
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hold the response back for `delay` after the request arrives.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP stub server with a fixed route table.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_stub_server(routes: Vec<Route>) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let routes = routes.clone();
                    thread::spawn(move || handle_client(stream, &routes));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream, routes: &[Route]) {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];
    let header_end = loop {
        let read = match stream.read(&mut buffer) {
            Ok(0) => return,
            Ok(read) => read,
            Err(_) => return,
        };
        data.extend_from_slice(buffer.get(..read).unwrap_or(&[]));
        if let Some(pos) = find_subsequence(&data, b"\r\n\r\n") {
            break pos.saturating_add(4);
        }
        if data.len() > 64 * 1024 {
            return;
        }
    };

    let head = String::from_utf8_lossy(data.get(..header_end).unwrap_or(&[])).into_owned();
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    // Drain the request body so the client never sees a reset mid-write.
    let content_length = head
        .lines()
        .find(|line| line.to_ascii_lowercase().starts_with("content-length:"))
        .and_then(|line| line.split(':').nth(1))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let mut body_read = data.len().saturating_sub(header_end);
    while body_read < content_length {
        let read = match stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(_) => break,
        };
        body_read = body_read.saturating_add(read);
    }

    let response = match routes
        .iter()
        .find(|route| path.starts_with(route.path_prefix))
    {
        Some(route) => {
            route.hits.fetch_add(1, Ordering::SeqCst);
            if !route.delay.is_zero() {
                thread::sleep(route.delay);
            }
            format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                route.status,
                reason(route.status),
                route.content_type,
                route.body.len(),
                route.body
            )
        }
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            .to_owned(),
    };

    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        410 => "Gone",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Run the `didsmoke` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_didsmoke<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = didsmoke_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run didsmoke failed: {}", err))
}

fn didsmoke_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_didsmoke").map_or_else(
        || Err("CARGO_BIN_EXE_didsmoke missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

//! HTTP registry server.
//!
//! Serves the product registry as a small JSON API. The tiny_http acceptor
//! runs on its own thread and feeds requests through a channel into a single
//! async handler loop, so storage access is sequential and needs no locking.

mod routes;

use std::io::{self, Read};
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use tiny_http::{Request, Server};
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::store::ProductStore;

/// Largest request body the registry will read. Product payloads are tiny;
/// anything past this is cut off and fails JSON parsing.
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// A request paired with its body, read off the socket by the acceptor
/// thread so the handler loop never blocks on client I/O.
struct Incoming {
    request: Request,
    body: String,
}

/// Handle for stopping a running registry server.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// Signal the server to shut down.
    pub fn shutdown(&self) {
        self.notify.notify_one();
    }
}

/// Running registry server instance.
pub struct RegistryServer {
    local_addr: SocketAddr,
    handle: tokio::task::JoinHandle<Result<()>>,
    shutdown: ShutdownHandle,
}

impl RegistryServer {
    /// Address the server actually bound to. Useful when the listen address
    /// requested port 0.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Port the server actually bound to.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Get a handle to stop the server from another task.
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Stop the server.
    pub fn stop(&self) {
        self.shutdown.shutdown();
    }

    /// Wait for the server to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler task panicked.
    pub async fn wait(self) -> Result<()> {
        self.handle
            .await
            .map_err(|e| Error::Io(io::Error::other(format!("registry task panicked: {e}"))))?
    }
}

/// Start the registry server on `listen_addr`.
///
/// Requests are accepted on a dedicated thread and handled one at a time on
/// the async runtime; the returned [`RegistryServer`] keeps running until
/// [`stop`](RegistryServer::stop) is called.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound.
pub fn start<S>(store: S, listen_addr: &str) -> Result<RegistryServer>
where
    S: ProductStore + 'static,
{
    let server = Server::http(listen_addr)
        .map_err(|e| io::Error::other(format!("bind {listen_addr}: {e}")))?;
    let local_addr = match server.server_addr().to_ip() {
        Some(addr) => addr,
        None => return Err(io::Error::other("registry bound to a non-IP address").into()),
    };
    let server = Arc::new(server);

    let (tx, mut rx) = mpsc::channel::<Incoming>(16);
    let acceptor = server.clone();
    thread::spawn(move || {
        while let Ok(mut request) = acceptor.recv() {
            let mut body = String::new();
            let _ = request
                .as_reader()
                .take(MAX_BODY_BYTES)
                .read_to_string(&mut body);
            if tx.blocking_send(Incoming { request, body }).is_err() {
                break;
            }
        }
    });

    let shutdown_notify = Arc::new(Notify::new());
    let shutdown = ShutdownHandle {
        notify: shutdown_notify.clone(),
    };

    info!(addr = %local_addr, "registry listening");

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_notify.notified() => break,
                maybe_incoming = rx.recv() => {
                    let Some(Incoming { request, body }) = maybe_incoming else {
                        break;
                    };

                    let reply = routes::handle(&store, request.method(), request.url(), &body).await;
                    if reply.status >= 500 {
                        warn!(
                            method = %request.method(),
                            path = request.url(),
                            status = reply.status,
                            "request failed"
                        );
                    } else {
                        debug!(
                            method = %request.method(),
                            path = request.url(),
                            status = reply.status,
                            "handled request"
                        );
                    }

                    let response = reply.into_response();
                    let _ = tokio::task::spawn_blocking(move || {
                        let _ = request.respond(response);
                    })
                    .await;
                }
            }
        }

        server.unblock();
        Ok(())
    });

    Ok(RegistryServer {
        local_addr,
        handle,
        shutdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn start_binds_an_ephemeral_port_and_stops() {
        let server = start(MemoryStore::new(), "127.0.0.1:0").unwrap();

        assert_ne!(server.port(), 0);

        server.stop();
        server.wait().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_handle_stops_the_server() {
        let server = start(MemoryStore::new(), "127.0.0.1:0").unwrap();
        let handle = server.shutdown_handle();

        handle.shutdown();
        server.wait().await.unwrap();
    }

    #[test]
    fn start_rejects_unbindable_address() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();

        let result = start(MemoryStore::new(), "256.0.0.1:0");

        assert!(result.is_err());
    }
}

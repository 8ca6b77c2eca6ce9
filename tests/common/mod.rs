#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;

use heyonotes::server::serve;
use heyonotes::Database;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

/// API server on an ephemeral port with an in-memory store.
///
/// Runs on its own thread and runtime so tests can use the blocking client.
/// Stops when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn start() -> Self {
        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("failed to build runtime");
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("failed to bind");
                addr_tx
                    .send(listener.local_addr().expect("no local addr"))
                    .expect("test gone");
                let db = Database::open_memory().expect("failed to open store");
                serve(listener, db, async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("server failed");
            });
        });

        let addr = addr_rx.recv().expect("server did not start");
        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("bad url")
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

//! A real server bound to an ephemeral port, for tests that need sockets.

use std::io;
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use backend::middleware::{log_completion, request_trace};
use backend::routes;
use backend::state::app_state::AppState;
use backend::ws::hub::GameSessionRegistry;
use tokio::task::JoinHandle;

pub struct TestServer {
    handle: ServerHandle,
    addr: SocketAddr,
    task: JoinHandle<io::Result<()>>,
}

impl TestServer {
    /// Serve the production routes for `state` on `127.0.0.1:0` with one worker.
    pub fn start(state: AppState) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let data = web::Data::new(state);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(from_fn(log_completion))
                .wrap(from_fn(request_trace))
                .app_data(data.clone())
                .configure(routes::configure)
        })
        .workers(1)
        .listen(listener)?
        .run();

        Ok(Self {
            handle: server.handle(),
            addr,
            task: tokio::spawn(server),
        })
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/api/ws", self.addr)
    }

    /// Graceful stop; waits for the server task to finish.
    pub async fn stop(self) {
        self.handle.stop(true).await;
        let _ = self.task.await;
    }
}

/// Poll until `code`'s broadcast group has exactly `expected` members.
pub async fn wait_for_subscribers(
    registry: &GameSessionRegistry,
    code: &str,
    expected: usize,
    within: Duration,
) -> Result<(), String> {
    let settled = tokio::time::timeout(within, async {
        while registry.subscriber_count(code) != expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;

    settled.map_err(|_| {
        format!(
            "{code}: wanted {expected} subscribers, have {}",
            registry.subscriber_count(code)
        )
    })
}

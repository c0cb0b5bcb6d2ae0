use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;

use wisp_config::config::Config;
use wisp_lb::RoundRobin;

pub mod tcp_listener;

pub struct TcpProxy {
    pub listener: TcpListener,
    pub config: Config,
    pub selector: Arc<RoundRobin>,

    pub running: watch::Receiver<bool>,
}

/// Flips the accept loop's running flag from true to false.
///
/// Triggering only stops acceptance of new connections; sessions already
/// relaying keep running to their natural end.
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        // a second trigger is a no-op, the flag never flips back
        let _ = self.tx.send(false);
    }
}

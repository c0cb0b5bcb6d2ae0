use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::net::TcpListener;
use tokio::sync::watch;

use wisp_config::config::Config;
use wisp_lb::RoundRobin;

use crate::{ShutdownHandle, TcpProxy};

impl TcpProxy {
    /// Bind the configured listen address. Failure here is fatal for the
    /// caller; there is no retry.
    pub async fn bind(
        config: Config,
        selector: Arc<RoundRobin>,
    ) -> io::Result<(Self, ShutdownHandle)> {
        let address = format!("{}:{}", config.listen.address, config.listen.port);
        let listener = TcpListener::bind(address.as_str()).await?;

        info!("Proxy server listening on {}", address);

        let (tx, rx) = watch::channel(true);

        Ok((
            Self {
                listener,
                config,
                selector,
                running: rx,
            },
            ShutdownHandle { tx },
        ))
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the running flag clears.
    ///
    /// Every accepted connection gets its own relay task; the loop never
    /// waits on one. Returning drops the listening socket, which is the only
    /// resource this loop owns. In-flight relays drain on their own.
    pub async fn run(mut self) -> io::Result<()> {
        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!("Accepted connection from {}", peer);

                        let target = self.selector.next();
                        info!("Forwarding {} to {}", peer, target);

                        let buffer_size = self.config.buffer_size;
                        tokio::spawn(async move {
                            match wisp_relay::run(stream, &target, buffer_size).await {
                                Ok((to_target, to_client)) => debug!(
                                    "Session {} <-> {} closed ({} bytes out, {} bytes back)",
                                    peer, target, to_target, to_client
                                ),
                                Err(err) => debug!("Session {} ended: {}", peer, err),
                            }
                        });
                    }
                    Err(err) => {
                        if !*self.running.borrow() {
                            break;
                        }
                        error!("Failed to accept client connection: {}", err);
                    }
                },
                _ = self.running.changed() => {
                    info!("Shutting down server...");
                    break;
                }
            }
        }

        Ok(())
    }
}

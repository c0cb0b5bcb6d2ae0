use std::io;

use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use wisp_lb::Endpoint;

#[derive(Debug)]
pub enum RelayError {
    Connect(io::Error),
    Client(io::Error),
    Target(io::Error),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::Connect(err) => write!(f, "connect to target failed: {}", err),
            RelayError::Client(err) => write!(f, "client side failed: {}", err),
            RelayError::Target(err) => write!(f, "target side failed: {}", err),
        }
    }
}

impl std::error::Error for RelayError {}

/// Moves bytes between one accepted client connection and one freshly opened
/// target connection until the session ends, then releases both.
///
/// The session starts with whatever the client sends first: a client that
/// closes without sending anything never causes an outbound connect. Once the
/// duplex loop is running, EOF or an error on either side ends the whole
/// session; the other direction is not drained further.
///
/// Returns the byte counts moved (client to target, target to client). Both
/// streams close when they drop here, on every exit path.
pub async fn run(
    mut client: TcpStream,
    target: &Endpoint,
    buffer_size: usize,
) -> Result<(u64, u64), RelayError> {
    let mut client_buf = vec![0u8; buffer_size];

    let first = match client.read(&mut client_buf).await {
        Ok(0) => return Ok((0, 0)),
        Ok(n) => n,
        Err(err) => return Err(RelayError::Client(err)),
    };

    let mut backend = TcpStream::connect((target.host.as_str(), target.port))
        .await
        .map_err(RelayError::Connect)?;

    // the first chunk is already buffered; it is forwarded, not re-read
    backend
        .write_all(&client_buf[..first])
        .await
        .map_err(RelayError::Target)?;

    let mut to_target = first as u64;
    let mut to_client = 0u64;

    let (mut client_read, mut client_write) = client.split();
    let (mut target_read, mut target_write) = backend.split();
    let mut target_buf = vec![0u8; buffer_size];

    loop {
        tokio::select! {
            read = client_read.read(&mut client_buf) => match read {
                Ok(0) => break,
                Ok(n) => {
                    target_write
                        .write_all(&client_buf[..n])
                        .await
                        .map_err(RelayError::Target)?;
                    to_target += n as u64;
                }
                Err(err) => {
                    // not distinguished from a clean close at this layer
                    debug!("Client read ended the session: {}", err);
                    break;
                }
            },
            read = target_read.read(&mut target_buf) => match read {
                Ok(0) => break,
                Ok(n) => {
                    client_write
                        .write_all(&target_buf[..n])
                        .await
                        .map_err(RelayError::Client)?;
                    to_client += n as u64;
                }
                Err(err) => {
                    debug!("Target read ended the session: {}", err);
                    break;
                }
            },
        }
    }

    Ok((to_target, to_client))
}

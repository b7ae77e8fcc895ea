use bytes::Bytes;
use delver_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Receive buffer size. Plain DNS over UDP without EDNS(0) never needs
/// more.
const MAX_UDP_RESPONSE_SIZE: usize = 1024;

/// Stateless one-shot UDP exchange. Every call binds its own ephemeral
/// socket and drops it on return, so racing attempts never share a
/// socket.
pub struct UdpExchange;

impl UdpExchange {
    pub async fn send(
        message_bytes: &[u8],
        server_addr: SocketAddr,
        timeout: Duration,
    ) -> Result<Bytes, DomainError> {
        let bind_addr: SocketAddr = SocketAddr::from(([0, 0, 0, 0], 0));
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::Io(format!("Failed to bind UDP socket: {}", e)))?;

        let bytes_sent =
            tokio::time::timeout(timeout, socket.send_to(message_bytes, server_addr))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| {
                    DomainError::Io(format!("Failed to send UDP query to {}: {}", server_addr, e))
                })?;

        debug!(server = %server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| {
                    DomainError::Io(format!(
                        "Failed to receive UDP response from {}: {}",
                        server_addr, e
                    ))
                })?;

        if from_addr.ip() != server_addr.ip() {
            warn!(
                expected = %server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server_addr, bytes_received, "UDP response received");

        Ok(Bytes::from(recv_buf))
    }
}

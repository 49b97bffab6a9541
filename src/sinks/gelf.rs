//! GELF sink for Graylog
//!
//! Ships records to a Graylog input over UDP or TCP. The rendered record
//! becomes the GELF `short_message` (first line) and `full_message`
//! (remaining lines, if any).
//!
//! UDP payloads are compressed and split into GELF chunks when they exceed
//! the chunk size. TCP payloads are sent uncompressed and NUL-terminated.

use crate::core::{LoggerError, Result, Sink};
use chrono::Utc;
use flate2::write::{GzEncoder, ZlibEncoder};
use rand::Rng;
use serde_json::json;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Default UDP datagram size, header included
pub const DEFAULT_CHUNK_SIZE: usize = 1420;

const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
const CHUNK_HEADER_LEN: usize = 12;
const MAX_CHUNKS: usize = 128;

/// Syslog "informational"; the sink does not see the record's level
const GELF_LEVEL_INFO: u8 = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Udp,
    Tcp,
}

/// Compression applied to UDP payloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    #[default]
    Gzip,
    Zlib,
    None,
}

enum Connection {
    Udp(UdpSocket),
    Tcp(TcpStream),
}

/// Graylog sink that connects lazily on `probe`
///
/// # Example
///
/// ```no_run
/// use level_dispatch::prelude::*;
/// use level_dispatch::sinks::GelfSink;
///
/// let logger = Logger::builder()
///     .sink(GelfSink::tcp("graylog.internal:12201"))
///     .sink(StderrSink::new())
///     .build();
/// let _ = logger.error("shipped to graylog, or stderr if it is down");
/// ```
pub struct GelfSink {
    addr: String,
    protocol: Protocol,
    compression: Compression,
    chunk_size: usize,
    host: String,
    connect_timeout: Duration,
    connection: Option<Connection>,
}

impl GelfSink {
    /// UDP sink for `addr` (e.g. "127.0.0.1:12201")
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            protocol: Protocol::Udp,
            compression: Compression::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            host: std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()),
            connect_timeout: Duration::from_secs(5),
            connection: None,
        }
    }

    pub fn udp(addr: impl Into<String>) -> Self {
        Self::new(addr)
    }

    pub fn tcp(addr: impl Into<String>) -> Self {
        Self::new(addr).with_protocol(Protocol::Tcp)
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self.connection = None;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Maximum UDP datagram size; values below the chunk header are raised
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(CHUNK_HEADER_LEN + 1);
        self
    }

    /// Value of the GELF `host` field
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// TCP connect and write timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn resolve(&self) -> Result<SocketAddr> {
        self.addr
            .to_socket_addrs()
            .map_err(|e| LoggerError::connection(&self.addr, e.to_string()))?
            .next()
            .ok_or_else(|| LoggerError::connection(&self.addr, "address did not resolve"))
    }

    fn connect(&self) -> Result<Connection> {
        let target = self.resolve()?;
        let failed = |e: io::Error| LoggerError::connection(&self.addr, e.to_string());

        match self.protocol {
            Protocol::Udp => {
                let local = if target.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
                let socket = UdpSocket::bind(local).map_err(failed)?;
                socket.connect(target).map_err(failed)?;
                Ok(Connection::Udp(socket))
            }
            Protocol::Tcp => {
                let stream =
                    TcpStream::connect_timeout(&target, self.connect_timeout).map_err(failed)?;
                stream
                    .set_write_timeout(Some(self.connect_timeout))
                    .map_err(failed)?;
                stream.set_nodelay(true).map_err(failed)?;
                Ok(Connection::Tcp(stream))
            }
        }
    }

    /// Wrap a rendered record in a GELF 1.1 message
    fn envelope(&self, data: &[u8]) -> Vec<u8> {
        let text = String::from_utf8_lossy(data);
        let text = text.trim_end_matches('\n');
        let (short, full) = match text.split_once('\n') {
            Some((short, rest)) => (short, Some(rest)),
            None => (text, None),
        };

        let mut message = json!({
            "version": "1.1",
            "host": self.host,
            "short_message": short,
            "timestamp": Utc::now().timestamp_millis() as f64 / 1000.0,
            "level": GELF_LEVEL_INFO,
        });
        if let Some(full) = full {
            message["full_message"] = json!(full);
        }

        serde_json::to_vec(&message).unwrap_or_default()
    }

    fn compress(&self, payload: &[u8]) -> io::Result<Vec<u8>> {
        match self.compression {
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(payload)?;
                encoder.finish()
            }
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(payload)?;
                encoder.finish()
            }
            Compression::None => Ok(payload.to_vec()),
        }
    }

    fn send(&mut self, payload: &[u8]) -> io::Result<()> {
        if let Some(Connection::Tcp(stream)) = self.connection.as_mut() {
            stream.write_all(payload)?;
            stream.write_all(&[0])?;
            return stream.flush();
        }

        let compressed = self.compress(payload)?;
        let message_id = rand::thread_rng().gen::<u64>().to_be_bytes();
        let datagrams = chunk(&compressed, self.chunk_size, message_id)?;

        match self.connection.as_ref() {
            Some(Connection::Udp(socket)) => {
                for datagram in datagrams {
                    socket.send(&datagram)?;
                }
                Ok(())
            }
            _ => Err(io::Error::new(io::ErrorKind::NotConnected, "gelf sink not connected")),
        }
    }
}

impl Sink for GelfSink {
    fn probe(&mut self) -> Result<bool> {
        if self.connection.is_none() {
            self.connection = Some(self.connect()?);
        }
        Ok(true)
    }

    fn write(&mut self, data: &[u8]) {
        let payload = self.envelope(data);
        if self.send(&payload).is_err() {
            // Reconnect on the next probe
            self.connection = None;
        }
    }

    fn name(&self) -> &str {
        "gelf"
    }
}

/// Split a UDP payload into GELF chunks of at most `chunk_size` bytes.
///
/// Payloads that fit are returned unchunked.
fn chunk(payload: &[u8], chunk_size: usize, message_id: [u8; 8]) -> io::Result<Vec<Vec<u8>>> {
    if payload.len() <= chunk_size {
        return Ok(vec![payload.to_vec()]);
    }

    let body = chunk_size - CHUNK_HEADER_LEN;
    let count = payload.len().div_ceil(body);
    if count > MAX_CHUNKS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("gelf message needs {} chunks, limit is {}", count, MAX_CHUNKS),
        ));
    }

    Ok(payload
        .chunks(body)
        .enumerate()
        .map(|(seq, part)| {
            let mut datagram = Vec::with_capacity(CHUNK_HEADER_LEN + part.len());
            datagram.extend_from_slice(&CHUNK_MAGIC);
            datagram.extend_from_slice(&message_id);
            datagram.push(seq as u8);
            datagram.push(count as u8);
            datagram.extend_from_slice(part);
            datagram
        })
        .collect())
}

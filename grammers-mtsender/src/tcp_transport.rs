use grammers_crypto::RingBuffer;
use grammers_mtproto::transport::Transport;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use std::io;
use std::net::SocketAddr;

// TODO look into reusing send and recv buffers to avoid allocations
pub struct TcpTransport<T: Transport> {
    stream: TcpStream,
    transport: T,
    recv_buffer: Vec<u8>,
}

impl<T: Transport> TcpTransport<T> {
    pub async fn connect(addr: SocketAddr, transport: T) -> io::Result<Self> {
        Ok(Self {
            stream: TcpStream::connect(addr).await?,
            transport,
            recv_buffer: Vec::new(),
        })
    }

    pub fn with_transport(stream: TcpStream, transport: T) -> Self {
        Self {
            stream,
            transport,
            recv_buffer: Vec::new(),
        }
    }

    pub async fn send(&mut self, data: &[u8]) -> io::Result<()> {
        let mut buffer = RingBuffer::with_capacity(data.len(), 0);
        buffer.extend(data.iter().copied());
        self.transport.pack(&mut buffer);
        self.stream.write_all(buffer.as_ref()).await
    }

    pub async fn recv(&mut self) -> io::Result<Vec<u8>> {
        loop {
            match self.transport.unpack(&self.recv_buffer) {
                Ok(offset) => {
                    let data = self.recv_buffer[offset.data_start..offset.data_end].to_vec();
                    self.recv_buffer.drain(..offset.next_offset);
                    break Ok(data);
                }
                Err(grammers_mtproto::transport::Error::MissingBytes) => {
                    let mut chunk = [0u8; 4096];
                    let n = self.stream.read(&mut chunk).await?;
                    if n == 0 {
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "connection closed by the server",
                        ));
                    }
                    self.recv_buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
            }
        }
    }
}

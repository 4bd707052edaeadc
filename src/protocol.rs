//! TCP protocol for scan-client ↔ scan-server communication.
//!
//! Length-delimited bincode frames. The request/response shapes here are
//! transport plumbing; the scan pipeline itself lives in the library.

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use crate::scan::ScanResult;

/// Client → Server
#[derive(Serialize, Deserialize, Debug)]
pub enum ClientMessage {
    /// Select the garment category and start a fresh scan.
    SetGarment { garment: String },
    /// One captured frame, JPEG-encoded.
    Frame { timestamp_us: u64, jpeg_data: Vec<u8> },
    /// Discard the current scan and return to scanning.
    Reset,
}

/// Server → Client
#[derive(Serialize, Deserialize, Debug)]
pub enum ServerMessage {
    /// Scan in progress: frames accumulated so far out of the window capacity.
    Progress { frames: usize, capacity: usize },
    /// The frame contained no usable subject; the window did not advance.
    NoSubject,
    /// Scan settled; the session stays locked on this result until Reset.
    Locked { result: ScanResult },
    /// Acknowledgement for SetGarment / Reset.
    Ack,
}

// --- TCP codec helpers ---

pub type MessageStream = Framed<TcpStream, LengthDelimitedCodec>;

/// JPEGフレームを含むため大きめのフレーム上限
const MAX_FRAME_LENGTH: usize = 16 * 1024 * 1024;

/// Create a framed message stream with length-delimited framing.
pub fn message_stream(stream: TcpStream) -> MessageStream {
    let codec = LengthDelimitedCodec::builder()
        .max_frame_length(MAX_FRAME_LENGTH)
        .new_codec();
    Framed::new(stream, codec)
}

/// Send a serializable message (bincode + length prefix).
pub async fn send_message<T: Serialize>(stream: &mut MessageStream, msg: &T) -> anyhow::Result<()> {
    let data = bincode::serialize(msg)?;
    stream.send(Bytes::from(data)).await?;
    Ok(())
}

/// Receive and deserialize a message.
pub async fn recv_message<T: DeserializeOwned>(stream: &mut MessageStream) -> anyhow::Result<T> {
    match stream.next().await {
        Some(Ok(bytes)) => Ok(bincode::deserialize(&bytes)?),
        Some(Err(e)) => Err(e.into()),
        None => Err(anyhow::anyhow!("connection closed")),
    }
}

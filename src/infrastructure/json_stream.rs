// Chunked NDJSON streaming utilities
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::infrastructure::api_model::StreamMessage;

/// Render a message channel as a chunked NDJSON response, one JSON document
/// per line, flushed as each message arrives.
pub fn stream_from_receiver(rx: mpsc::Receiver<StreamMessage>) -> Result<Response<Body>, StatusCode> {
    let byte_stream = ReceiverStream::new(rx).map(serialize_chunk);
    let body = Body::from_stream(byte_stream);

    // NOTE: The stream stays uncompressed; compressing individual chunks
    // would defeat line-by-line progressive parsing on the client.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn serialize_chunk(msg: StreamMessage) -> Result<Bytes, std::io::Error> {
    let payload = serde_json::to_vec(&msg)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut chunk = BytesMut::with_capacity(payload.len() + 1);
    chunk.put_slice(&payload);
    chunk.put_u8(b'\n');
    Ok(chunk.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api_model::CompletionDto;

    #[test]
    fn chunks_are_newline_terminated_json() {
        let msg = StreamMessage::Complete(CompletionDto {
            messages: 1,
            duration_ms: 5,
        });
        let chunk = serialize_chunk(msg).unwrap();
        assert_eq!(chunk.last(), Some(&b'\n'));
        let parsed: serde_json::Value = serde_json::from_slice(&chunk[..chunk.len() - 1]).unwrap();
        assert_eq!(parsed["type"], "complete");
    }
}

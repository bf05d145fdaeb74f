use crate::domain::ports::ByteSource;
use crate::utils::error::Result;

/// Splits the receiver's byte stream into line records. Owns the carry-over
/// buffer, so a partial line left behind by one drain is completed by a
/// later one instead of being emitted early.
pub struct SentenceReader<B: ByteSource> {
    source: B,
    pending: Vec<u8>,
}

impl<B: ByteSource> SentenceReader<B> {
    pub fn new(source: B) -> Self {
        Self {
            source,
            pending: Vec::new(),
        }
    }

    /// Non-blocking: picks up whatever the source already has buffered and
    /// returns the complete lines in it. Zero available bytes is a normal
    /// empty batch, not an error; only a failed read surfaces as `Err`.
    pub fn drain(&mut self) -> Result<Vec<String>> {
        let available = self.source.bytes_available()?;
        if available > 0 {
            let mut chunk = vec![0u8; available];
            let read = self.source.read_available(&mut chunk)?;
            self.pending.extend_from_slice(&chunk[..read]);
        }

        let mut records = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            match std::str::from_utf8(&line) {
                Ok(text) if !text.trim().is_empty() => records.push(text.trim().to_string()),
                Ok(_) => {}
                Err(e) => {
                    // 壞掉的那一行丟掉就好,後面的行不受影響
                    tracing::warn!("Dropping undecodable line ({} bytes): {}", line.len(), e);
                }
            }
        }

        Ok(records)
    }
}

//! Byte-to-text decoding for subprocess output.
//!
//! Lookup commands return whole buffers, so [`decode_utf8`] is enough there.
//! The dependency check streams stderr in arbitrary chunks; [`StreamDecoder`]
//! holds back an incomplete trailing sequence until the next chunk arrives.

/// Decode a complete buffer, replacing invalid sequences with U+FFFD.
pub fn decode_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Incremental UTF-8 decoder for chunked streams.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk.
    ///
    /// Bytes of a multi-byte character cut off at the end of `chunk` are
    /// carried over and prefixed to the next call.
    pub fn push(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut out = String::new();
        let mut rest: &[u8] = &self.pending;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        self.pending = rest.to_vec();
        out
    }

    /// Flush held bytes, decoding them lossily.
    pub fn finish(&mut self) -> String {
        let tail = decode_utf8(&self.pending);
        self.pending.clear();
        tail
    }
}

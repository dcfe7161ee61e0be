//! Streaming parser for WhatsApp TXT exports.
//!
//! Reads the export line by line and yields each message as soon as the
//! next header seals it, so memory stays bounded by the largest message.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::Message;
use crate::error::{ChatprepError, Result};
use crate::parsers::{ParseReport, Reassembler};

use super::{MessageIterator, StreamingConfig};

/// Streaming parser for WhatsApp TXT exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatsAppStreamingParser {
    config: StreamingConfig,
}

impl WhatsAppStreamingParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StreamingConfig) -> Self {
        Self { config }
    }

    /// Opens `path` and returns an iterator over its messages.
    ///
    /// # Errors
    ///
    /// Returns [`ChatprepError::Io`] if the file cannot be opened.
    pub fn stream(&self, path: &Path) -> Result<Box<dyn MessageIterator>> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let iterator = WhatsAppMessageIterator::new(reader, Some(file_size), self.config);

        Ok(Box::new(iterator))
    }

    /// Streams messages from an already open reader.
    pub fn stream_reader<R: BufRead + Send>(&self, reader: R) -> WhatsAppMessageIterator<R> {
        WhatsAppMessageIterator::new(reader, None, self.config)
    }

    pub fn recommended_buffer_size(&self) -> usize {
        self.config.buffer_size
    }
}

/// Iterator over WhatsApp messages.
///
/// The first error (I/O, malformed timestamp, oversized message) is yielded
/// once and ends the stream.
pub struct WhatsAppMessageIterator<R: BufRead> {
    reader: R,
    total_bytes: Option<u64>,
    bytes_read: u64,
    config: StreamingConfig,
    line_buffer: String,
    fold: Reassembler,
    deferred_error: Option<ChatprepError>,
    finished: bool,
}

impl<R: BufRead> WhatsAppMessageIterator<R> {
    fn new(reader: R, total_bytes: Option<u64>, config: StreamingConfig) -> Self {
        Self {
            reader,
            total_bytes,
            bytes_read: 0,
            config,
            line_buffer: String::with_capacity(4096),
            fold: Reassembler::new(),
            deferred_error: None,
            finished: false,
        }
    }

    fn fail(&mut self, err: ChatprepError) -> Option<Result<Message>> {
        self.finished = true;
        Some(Err(err))
    }

    fn check_pending_size(&self) -> Option<ChatprepError> {
        let pending = self.fold.pending_len();
        (pending > self.config.max_message_size)
            .then(|| ChatprepError::buffer_overflow(self.config.max_message_size, pending))
    }
}

impl<R: BufRead + Send + 'static> MessageIterator for WhatsAppMessageIterator<R> {
    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    fn report(&self) -> ParseReport {
        self.fold.report()
    }
}

impl<R: BufRead + Send> Iterator for WhatsAppMessageIterator<R> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.deferred_error.take() {
            return self.fail(err);
        }
        if self.finished {
            return None;
        }

        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => {
                    self.finished = true;
                    let report = self.fold.report();
                    debug!(
                        headers = report.header_lines,
                        orphans = report.orphan_lines,
                        bytes = self.bytes_read,
                        "stream finished"
                    );
                    return self.fold.take_pending().map(Ok);
                }
                Ok(bytes) => {
                    self.bytes_read += bytes as u64;
                    let sealed = match self.fold.push_line(&self.line_buffer) {
                        Ok(sealed) => sealed,
                        Err(err) => return self.fail(err),
                    };

                    let overflow = self.check_pending_size();
                    match (sealed, overflow) {
                        (Some(msg), overflow) => {
                            self.deferred_error = overflow;
                            return Some(Ok(msg));
                        }
                        (None, Some(err)) => return self.fail(err),
                        (None, None) => {}
                    }
                }
                Err(err) => return self.fail(err.into()),
            }
        }
    }
}

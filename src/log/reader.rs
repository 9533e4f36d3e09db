use std::io::{ErrorKind, Read, Seek, SeekFrom};

use tracing::{debug, warn};

use crate::error::{LogDumpError, Result};
use crate::log::{LogBlock, Record};

/// Sequential reader of fixed-size records from a log stream
pub struct RecordReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read + Seek> RecordReader<R> {
    /// Wrap a stream positioned at the start of the log file
    pub fn new(mut inner: R) -> Result<Self> {
        let position = inner.stream_position().map_err(LogDumpError::Stream)?;
        Ok(RecordReader { inner, position })
    }

    /// Current absolute position in the stream
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read exactly `T::SIZE` bytes and decode them
    pub fn read_record<T: Record>(&mut self) -> Result<T> {
        let mut buffer = vec![0u8; T::SIZE];
        let actual = self.fill(&mut buffer)?;
        if actual < T::SIZE {
            return Err(LogDumpError::ShortRead {
                record: T::NAME,
                expected: T::SIZE,
                actual,
            });
        }
        T::parse(&buffer)
    }

    /// Read a record, zero-filling whatever the stream could not supply.
    /// Returns the record and the number of bytes actually read.
    pub fn read_record_lenient<T: Record>(&mut self) -> Result<(T, usize)> {
        let mut buffer = vec![0u8; T::SIZE];
        let actual = self.fill(&mut buffer)?;
        let record = T::parse(&buffer)?;
        Ok((record, actual))
    }

    /// Advance the stream by `count` bytes, returning the new position
    pub fn skip(&mut self, count: u64) -> Result<u64> {
        let offset = i64::try_from(count)
            .map_err(|_| LogDumpError::Stream(ErrorKind::InvalidInput.into()))?;
        self.position = self
            .inner
            .seek(SeekFrom::Current(offset))
            .map_err(LogDumpError::Stream)?;
        Ok(self.position)
    }

    /// Iterate over the log blocks from the current position to the end
    pub fn blocks(&mut self) -> LogBlocks<'_, R> {
        LogBlocks {
            reader: self,
            index: 0,
            trailing_bytes: 0,
            finished: false,
        }
    }

    /// Read until `buffer` is full or the stream ends
    fn fill(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buffer.len() {
            match self.inner.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.position += filled as u64;
                    return Err(LogDumpError::Stream(e));
                }
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }
}

/// A log block together with where it was found
#[derive(Debug, Clone)]
pub struct PositionedBlock {
    /// Zero-based block index from the first log block
    pub index: u64,
    /// Absolute byte offset in the file
    pub offset: u64,
    pub block: LogBlock,
}

/// Iterator over consecutive log blocks.
///
/// Ends silently at end of stream, including when fewer than a block's
/// worth of bytes remain. A stream error is yielded once, then iteration ends.
pub struct LogBlocks<'a, R> {
    reader: &'a mut RecordReader<R>,
    index: u64,
    trailing_bytes: usize,
    finished: bool,
}

impl<R> LogBlocks<'_, R> {
    /// Bytes left over after the last complete block (0 on a clean end)
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    /// Number of complete blocks yielded so far
    pub fn count_read(&self) -> u64 {
        self.index
    }
}

impl<R: Read + Seek> Iterator for LogBlocks<'_, R> {
    type Item = Result<PositionedBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let offset = self.reader.position();
        match self.reader.read_record::<LogBlock>() {
            Ok(block) => {
                let positioned = PositionedBlock {
                    index: self.index,
                    offset,
                    block,
                };
                self.index += 1;
                Some(Ok(positioned))
            }
            Err(LogDumpError::ShortRead { actual, .. }) => {
                self.finished = true;
                self.trailing_bytes = actual;
                if actual > 0 {
                    debug!(offset, bytes = actual, "ignoring partial log block at end of file");
                } else {
                    debug!(offset, blocks = self.index, "end of log blocks");
                }
                None
            }
            Err(e) => {
                self.finished = true;
                warn!(offset, error = %e, "log block scan aborted");
                Some(Err(e))
            }
        }
    }
}

pub mod error;
pub mod log;
pub mod report;

use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{LogDumpError, Result};
use crate::log::{Checkpoint, FileHeader, Record, RecordReader, RESERVED_SIZE};

/// Configuration for a dump run.
#[derive(Debug, Clone, Default)]
pub struct DumpConfig {
    /// Fail on a truncated header or checkpoint instead of rendering it zero-filled.
    pub strict: bool,
}

/// A header or checkpoint that was shorter than its layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedRecord {
    pub record: &'static str,
    pub expected: usize,
    pub actual: usize,
}

/// Totals gathered while dumping a log file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Number of complete log blocks decoded
    pub blocks: u64,
    /// Blocks flagged as the first of a flush write segment
    pub first_in_segment_blocks: u64,
    /// Header/checkpoints rendered from a short read (lenient mode only)
    pub truncated_records: Vec<TruncatedRecord>,
    /// Bytes after the last complete block
    pub trailing_bytes: usize,
    /// Stream position when decoding stopped
    pub end_offset: u64,
}

/// Open `path` and dump it to `out`.
///
/// Nothing is written to `out` if the file cannot be opened.
pub fn dump_file<W: Write>(path: &Path, out: &mut W, config: &DumpConfig) -> Result<DumpSummary> {
    let file = File::open(path).map_err(|source| LogDumpError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "opened redo log");
    dump(BufReader::new(file), out, config)
}

/// Decode and render a whole log stream: header, both checkpoints, then
/// every complete log block until end of stream.
///
/// Decoding starts at the stream's current position. When a leading record
/// comes back short the stream is exhausted and the block scan is skipped.
pub fn dump<R: Read + Seek, W: Write>(
    source: R,
    out: &mut W,
    config: &DumpConfig,
) -> Result<DumpSummary> {
    let mut reader = RecordReader::new(source)?;
    let mut summary = DumpSummary::default();

    let header: FileHeader = read_leading_record(&mut reader, config, &mut summary)?;
    emit(out, &report::render_file_header(&header))?;

    let first: Checkpoint = read_leading_record(&mut reader, config, &mut summary)?;
    emit(out, &report::render_checkpoint("first checkpoint", &first))?;

    let second: Checkpoint = read_leading_record(&mut reader, config, &mut summary)?;
    emit(out, &report::render_checkpoint("second checkpoint", &second))?;

    if !summary.truncated_records.is_empty() {
        debug!(offset = reader.position(), "stream ended before the log block area");
        emit(out, "\nNo log blocks: file ends before the log block area\n")?;
        summary.end_offset = reader.position();
        emit(out, &report::render_summary(&summary))?;
        return Ok(summary);
    }

    let start = reader.skip(RESERVED_SIZE)?;
    debug!(offset = start, "scanning log blocks");
    emit(out, &format!("\nLog blocks start at offset {}\n", start))?;

    let mut blocks = reader.blocks();
    for positioned in blocks.by_ref() {
        let positioned = positioned?;
        if positioned.block.is_first_in_segment() {
            summary.first_in_segment_blocks += 1;
        }
        emit(out, &report::render_log_block(&positioned))?;
    }
    summary.blocks = blocks.count_read();
    summary.trailing_bytes = blocks.trailing_bytes();
    summary.end_offset = reader.position();

    emit(out, &report::render_summary(&summary))?;
    Ok(summary)
}

/// Read the header or a checkpoint, tolerating a short read unless strict.
fn read_leading_record<T: Record, R: Read + Seek>(
    reader: &mut RecordReader<R>,
    config: &DumpConfig,
    summary: &mut DumpSummary,
) -> Result<T> {
    let offset = reader.position();
    if config.strict {
        let record = reader.read_record::<T>()?;
        debug!(record = T::NAME, offset, "decoded record");
        return Ok(record);
    }

    let (record, actual) = reader.read_record_lenient::<T>()?;
    if actual < T::SIZE {
        warn!(
            record = T::NAME,
            offset,
            expected = T::SIZE,
            actual,
            "truncated record, rendering zero-filled fields"
        );
        summary.truncated_records.push(TruncatedRecord {
            record: T::NAME,
            expected: T::SIZE,
            actual,
        });
    } else {
        debug!(record = T::NAME, offset, "decoded record");
    }
    Ok(record)
}

fn emit<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).map_err(LogDumpError::Output)
}

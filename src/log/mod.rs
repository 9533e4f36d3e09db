//! On-disk layout of a redo log file.
//!
//! ```text
//! 0    .. 512   file header
//! 512  .. 1024  checkpoint 1
//! 1024 .. 1536  checkpoint 2
//! 1536 .. 2048  reserved
//! 2048 ..       log blocks, 512 bytes each
//! ```
//!
//! All multi-byte integers are big-endian.

pub mod block;
pub mod checkpoint;
pub mod header;
pub mod reader;

pub use block::LogBlock;
pub use checkpoint::Checkpoint;
pub use header::FileHeader;
pub use reader::{LogBlocks, PositionedBlock, RecordReader};

use crate::error::Result;

/// Size of every record kind in the file
pub const RECORD_SIZE: usize = 512;

/// Reserved span between checkpoint 2 and the first log block
pub const RESERVED_SIZE: u64 = 512;
/// Offset of the first log block
pub const LOG_BLOCKS_OFFSET: u64 = 2048;

/// A fixed-size record decoded field by field from its byte layout
pub trait Record: Sized {
    /// Encoded size in bytes
    const SIZE: usize;
    /// Human-readable name used in errors and logs
    const NAME: &'static str;

    /// Decode a record from the first `SIZE` bytes of `data`
    fn parse(data: &[u8]) -> Result<Self>;

    /// Encode the record with zero-filled padding
    fn encode(&self) -> Vec<u8>;
}

use byteorder::{BigEndian, ByteOrder};
use std::ops::Range;

use crate::error::{LogDumpError, Result};
use crate::log::{Record, RECORD_SIZE};

pub const HEADER_NUMBER: Range<usize> = 0..4;
pub const BLOCK_SIZE: Range<usize> = 4..6;
pub const FIRST_GROUP_OFFSET: Range<usize> = 6..8;
pub const CHECKPOINT_NUMBER: Range<usize> = 8..12;
pub const HEADER_SIZE: Range<usize> = 12..14;
pub const DATA: Range<usize> = 14..508;
pub const CHECKSUM: Range<usize> = 508..512;

/// Payload bytes carried by each block
pub const DATA_SIZE: usize = DATA.end - DATA.start;

/// Set in the header number of the first block of a flush write segment
pub const FIRST_IN_SEGMENT_MASK: u32 = 0x8000_0000;

/// A 512-byte log block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBlock {
    /// Block header number, high bit is the first-in-segment flag
    pub header_number: u32,
    /// Number of bytes written to this block
    pub block_size: u16,
    /// Offset of the first log record group starting in this block
    pub first_group_offset: u16,
    /// Checkpoint number active when the block was written
    pub checkpoint_number: u32,
    /// Header size
    pub header_size: u16,
    /// Raw log record bytes
    pub data: [u8; DATA_SIZE],
    /// Checksum of the block contents
    pub checksum: u32,
}

impl Default for LogBlock {
    fn default() -> Self {
        LogBlock {
            header_number: 0,
            block_size: 0,
            first_group_offset: 0,
            checkpoint_number: 0,
            header_size: 0,
            data: [0u8; DATA_SIZE],
            checksum: 0,
        }
    }
}

impl LogBlock {
    /// Returns true if this block starts a flush write segment
    pub fn is_first_in_segment(&self) -> bool {
        self.header_number & FIRST_IN_SEGMENT_MASK == FIRST_IN_SEGMENT_MASK
    }

    /// Header number with the first-in-segment flag cleared
    pub fn block_number(&self) -> u32 {
        self.header_number & !FIRST_IN_SEGMENT_MASK
    }
}

impl Record for LogBlock {
    const SIZE: usize = RECORD_SIZE;
    const NAME: &'static str = "log block";

    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(LogDumpError::UnexpectedEof);
        }

        let mut payload = [0u8; DATA_SIZE];
        payload.copy_from_slice(&data[DATA]);

        Ok(LogBlock {
            header_number: BigEndian::read_u32(&data[HEADER_NUMBER]),
            block_size: BigEndian::read_u16(&data[BLOCK_SIZE]),
            first_group_offset: BigEndian::read_u16(&data[FIRST_GROUP_OFFSET]),
            checkpoint_number: BigEndian::read_u32(&data[CHECKPOINT_NUMBER]),
            header_size: BigEndian::read_u16(&data[HEADER_SIZE]),
            data: payload,
            checksum: BigEndian::read_u32(&data[CHECKSUM]),
        })
    }

    fn encode(&self) -> Vec<u8> {
        let mut data = vec![0u8; Self::SIZE];
        BigEndian::write_u32(&mut data[HEADER_NUMBER], self.header_number);
        BigEndian::write_u16(&mut data[BLOCK_SIZE], self.block_size);
        BigEndian::write_u16(&mut data[FIRST_GROUP_OFFSET], self.first_group_offset);
        BigEndian::write_u32(&mut data[CHECKPOINT_NUMBER], self.checkpoint_number);
        BigEndian::write_u16(&mut data[HEADER_SIZE], self.header_size);
        data[DATA].copy_from_slice(&self.data);
        BigEndian::write_u32(&mut data[CHECKSUM], self.checksum);
        data
    }
}

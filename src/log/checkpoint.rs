use byteorder::{BigEndian, ByteOrder};
use std::ops::Range;

use crate::error::{LogDumpError, Result};
use crate::log::{Record, RECORD_SIZE};

pub const NUMBER: Range<usize> = 0x00..0x08;
pub const LSN: Range<usize> = 0x08..0x10;
pub const OFFSET: Range<usize> = 0x10..0x14;
pub const BUFFER_SIZE: Range<usize> = 0x14..0x18;
pub const ARCHIVED_LSN: Range<usize> = 0x18..0x20;
// 0x20..0x120 is reserved
pub const CHECKSUM_1: Range<usize> = 0x120..0x124;
pub const CHECKSUM_2: Range<usize> = 0x124..0x128;
pub const FSP_FREE_LIMIT: Range<usize> = 0x128..0x12C;
pub const MAGIC: Range<usize> = 0x12C..0x130;

/// Log buffer size the engine records in every checkpoint
pub const DEFAULT_BUFFER_SIZE: u32 = 2 * 1024 * 1024;
/// Archived LSN written when log archiving is disabled
pub const ARCHIVING_DISABLED: u64 = u64::MAX;
/// Magic value marking the fsp free limit field as present
pub const FSP_MAGIC: u32 = 0x55E7_718B;

/// One of the two checkpoint records following the file header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkpoint {
    /// Checkpoint number
    pub number: u64,
    /// Log sequence number of the checkpoint
    pub lsn: u64,
    /// Byte offset of the checkpoint LSN within the log group
    pub offset: u32,
    /// Log buffer size
    pub buffer_size: u32,
    /// Archived LSN, all ones when archiving is disabled
    pub archived_lsn: u64,
    /// Checksum over bytes 0x00..0x120
    pub checksum_1: u32,
    /// Checksum over bytes 0x08..0x124
    pub checksum_2: u32,
    /// Free limit of tablespace 0 in megabytes
    pub fsp_free_limit: u32,
    /// Tells whether `fsp_free_limit` was written
    pub magic: u32,
}

impl Checkpoint {
    /// Returns true unless the archived LSN holds the "disabled" sentinel
    pub fn archiving_enabled(&self) -> bool {
        self.archived_lsn != ARCHIVING_DISABLED
    }

    pub fn has_fsp_free_limit(&self) -> bool {
        self.magic == FSP_MAGIC
    }
}

impl Record for Checkpoint {
    const SIZE: usize = RECORD_SIZE;
    const NAME: &'static str = "checkpoint";

    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(LogDumpError::UnexpectedEof);
        }

        Ok(Checkpoint {
            number: BigEndian::read_u64(&data[NUMBER]),
            lsn: BigEndian::read_u64(&data[LSN]),
            offset: BigEndian::read_u32(&data[OFFSET]),
            buffer_size: BigEndian::read_u32(&data[BUFFER_SIZE]),
            archived_lsn: BigEndian::read_u64(&data[ARCHIVED_LSN]),
            checksum_1: BigEndian::read_u32(&data[CHECKSUM_1]),
            checksum_2: BigEndian::read_u32(&data[CHECKSUM_2]),
            fsp_free_limit: BigEndian::read_u32(&data[FSP_FREE_LIMIT]),
            magic: BigEndian::read_u32(&data[MAGIC]),
        })
    }

    fn encode(&self) -> Vec<u8> {
        let mut data = vec![0u8; Self::SIZE];
        BigEndian::write_u64(&mut data[NUMBER], self.number);
        BigEndian::write_u64(&mut data[LSN], self.lsn);
        BigEndian::write_u32(&mut data[OFFSET], self.offset);
        BigEndian::write_u32(&mut data[BUFFER_SIZE], self.buffer_size);
        BigEndian::write_u64(&mut data[ARCHIVED_LSN], self.archived_lsn);
        BigEndian::write_u32(&mut data[CHECKSUM_1], self.checksum_1);
        BigEndian::write_u32(&mut data[CHECKSUM_2], self.checksum_2);
        BigEndian::write_u32(&mut data[FSP_FREE_LIMIT], self.fsp_free_limit);
        BigEndian::write_u32(&mut data[MAGIC], self.magic);
        data
    }
}

use byteorder::{BigEndian, ByteOrder};
use std::ops::Range;

use crate::error::{LogDumpError, Result};
use crate::log::{Record, RECORD_SIZE};

pub const GROUP_NUMBER: Range<usize> = 0..4;
pub const FIRST_LSN: Range<usize> = 4..12;
pub const ARCHIVED_LOG_FILE_NUMBER: Range<usize> = 12..16;
/// Backup tool label and file creation time
pub const CREATOR: Range<usize> = 16..48;

/// Redo log file header (first 512 bytes of the file)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// Log group this file belongs to
    pub group_number: u32,
    /// First log sequence number stored in this file
    pub first_lsn: u64,
    /// Archived log file number (0 when archiving is off)
    pub archived_log_file_number: u32,
    /// Creator label and creation time, kept verbatim
    pub creator: [u8; 32],
}

impl Record for FileHeader {
    const SIZE: usize = RECORD_SIZE;
    const NAME: &'static str = "file header";

    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(LogDumpError::UnexpectedEof);
        }

        let mut creator = [0u8; 32];
        creator.copy_from_slice(&data[CREATOR]);

        Ok(FileHeader {
            group_number: BigEndian::read_u32(&data[GROUP_NUMBER]),
            first_lsn: BigEndian::read_u64(&data[FIRST_LSN]),
            archived_log_file_number: BigEndian::read_u32(&data[ARCHIVED_LOG_FILE_NUMBER]),
            creator,
        })
    }

    fn encode(&self) -> Vec<u8> {
        let mut data = vec![0u8; Self::SIZE];
        BigEndian::write_u32(&mut data[GROUP_NUMBER], self.group_number);
        BigEndian::write_u64(&mut data[FIRST_LSN], self.first_lsn);
        BigEndian::write_u32(
            &mut data[ARCHIVED_LOG_FILE_NUMBER],
            self.archived_log_file_number,
        );
        data[CREATOR].copy_from_slice(&self.creator);
        data
    }
}

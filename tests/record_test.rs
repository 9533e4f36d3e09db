use redo_dump::error::LogDumpError;
use redo_dump::log::block::{self, DATA_SIZE};
use redo_dump::log::checkpoint::{self, DEFAULT_BUFFER_SIZE, FSP_MAGIC};
use redo_dump::log::{Checkpoint, FileHeader, LogBlock, Record, RECORD_SIZE};

fn sample_block(header_number: u32) -> LogBlock {
    let mut data = [0u8; DATA_SIZE];
    for (i, byte) in data.iter_mut().enumerate() {
        *byte = (i % 251) as u8;
    }
    LogBlock {
        header_number,
        block_size: 512,
        first_group_offset: 12,
        checkpoint_number: 7,
        header_size: 12,
        data,
        checksum: 0xDEAD_BEEF,
    }
}

#[test]
fn test_record_sizes() {
    assert_eq!(RECORD_SIZE, 512);
    assert_eq!(FileHeader::SIZE, 512);
    assert_eq!(Checkpoint::SIZE, 512);
    assert_eq!(LogBlock::SIZE, 512);

    assert_eq!(FileHeader::default().encode().len(), 512);
    assert_eq!(Checkpoint::default().encode().len(), 512);
    assert_eq!(LogBlock::default().encode().len(), 512);

    // Last fields end where the padding begins
    assert_eq!(block::CHECKSUM.end, 512);
    assert_eq!(block::DATA.start, block::HEADER_SIZE.end);
    assert_eq!(block::CHECKSUM.start, block::DATA.end);
}

#[test]
fn test_header_round_trip() {
    let mut creator = [0u8; 32];
    creator[..8].copy_from_slice(b"ibbackup");
    let header = FileHeader {
        group_number: 3,
        first_lsn: 0x0102_0304_0506_0708,
        archived_log_file_number: 9,
        creator,
    };

    let bytes = header.encode();
    assert_eq!(&bytes[0..4], &[0, 0, 0, 3]);
    assert_eq!(&bytes[4..12], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert!(bytes[48..].iter().all(|&b| b == 0));

    let parsed = FileHeader::parse(&bytes).unwrap();
    assert_eq!(parsed, header);
    assert_eq!(parsed.encode(), bytes);
}

#[test]
fn test_checkpoint_fields_at_documented_offsets() {
    let mut bytes = vec![0u8; 512];
    bytes[0x07] = 0x01;
    bytes[0x0E] = 0x20;
    bytes[0x12F] = 0x2B;
    // Noise in the reserved span must not leak into neighbouring fields
    for b in &mut bytes[0x20..0x120] {
        *b = 0xAA;
    }

    let cp = Checkpoint::parse(&bytes).unwrap();
    assert_eq!(cp.number, 0x1);
    assert_eq!(cp.lsn, 0x2000);
    assert_eq!(cp.magic, 0x0000_002B);
    assert_eq!(cp.offset, 0);
    assert_eq!(cp.buffer_size, 0);
    assert_eq!(cp.archived_lsn, 0);
    assert_eq!(cp.checksum_1, 0);
    assert_eq!(cp.checksum_2, 0);
    assert_eq!(cp.fsp_free_limit, 0);
    assert!(!cp.has_fsp_free_limit());
}

#[test]
fn test_checkpoint_round_trip() {
    let cp = Checkpoint {
        number: 42,
        lsn: 0x0000_0001_0000_2000,
        offset: 0x800,
        buffer_size: DEFAULT_BUFFER_SIZE,
        archived_lsn: checkpoint::ARCHIVING_DISABLED,
        checksum_1: 0x1111_2222,
        checksum_2: 0x3333_4444,
        fsp_free_limit: 5,
        magic: FSP_MAGIC,
    };

    let bytes = cp.encode();
    assert_eq!(&bytes[checkpoint::MAGIC], &[0x55, 0xE7, 0x71, 0x8B]);
    assert!(bytes[0x20..0x120].iter().all(|&b| b == 0));
    assert!(bytes[0x130..].iter().all(|&b| b == 0));

    let parsed = Checkpoint::parse(&bytes).unwrap();
    assert_eq!(parsed, cp);
    assert!(!parsed.archiving_enabled());
    assert!(parsed.has_fsp_free_limit());
    assert_eq!(parsed.encode(), bytes);
}

#[test]
fn test_log_block_round_trip() {
    let blk = sample_block(0x8000_0010);
    let bytes = blk.encode();
    assert_eq!(&bytes[508..512], &[0xDE, 0xAD, 0xBE, 0xEF]);

    let parsed = LogBlock::parse(&bytes).unwrap();
    assert_eq!(parsed, blk);
    assert_eq!(parsed.encode(), bytes);
}

#[test]
fn test_first_block_flag() {
    let first = sample_block(0x8000_0001);
    assert!(first.is_first_in_segment());
    assert_eq!(first.block_number(), 1);

    let other = sample_block(0x0000_0001);
    assert!(!other.is_first_in_segment());
    assert_eq!(other.block_number(), 1);
}

#[test]
fn test_parse_short_slice() {
    let bytes = [0u8; 100];
    assert!(matches!(
        FileHeader::parse(&bytes),
        Err(LogDumpError::UnexpectedEof)
    ));
    assert!(matches!(
        Checkpoint::parse(&bytes),
        Err(LogDumpError::UnexpectedEof)
    ));
    assert!(matches!(
        LogBlock::parse(&bytes[..0]),
        Err(LogDumpError::UnexpectedEof)
    ));
}

//! Text rendering of decoded records.
//!
//! Every function here is pure: it formats a record into a `String` and
//! leaves writing to the caller.

use colored::Colorize;
use std::fmt::Write;

use crate::log::{Checkpoint, FileHeader, PositionedBlock};
use crate::DumpSummary;

const RULE_WIDTH: usize = 80;
const HEX_ROW: usize = 16;

/// Heavy rule separating report sections
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn thin_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn render_file_header(header: &FileHeader) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{}", "Parsed header data:".bold());
    let _ = writeln!(out, "Group Number            : {}", header.group_number);
    let _ = writeln!(out, "First LSN               : {:#X}", header.first_lsn);
    let _ = writeln!(
        out,
        "Archived Log File Number: {}",
        header.archived_log_file_number
    );
    out
}

/// Render a checkpoint under the given title (e.g. "first checkpoint")
pub fn render_checkpoint(title: &str, checkpoint: &Checkpoint) -> String {
    let archived = if checkpoint.archiving_enabled() {
        ""
    } else {
        " (archiving disabled)"
    };
    let fsp_free_limit = if checkpoint.has_fsp_free_limit() {
        format!("{} MB", checkpoint.fsp_free_limit)
    } else {
        format!("{} MB (not recorded)", checkpoint.fsp_free_limit)
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{}", format!("Parsed {} data:", title).bold());
    let _ = writeln!(out, "Number        : {:#X}", checkpoint.number);
    let _ = writeln!(out, "LSN           : {:#X}", checkpoint.lsn);
    let _ = writeln!(out, "Offset        : {:#X}", checkpoint.offset);
    let _ = writeln!(out, "Buffer Size   : {}", checkpoint.buffer_size);
    let _ = writeln!(
        out,
        "Archived LSN  : {:#X}{}",
        checkpoint.archived_lsn, archived
    );
    let _ = writeln!(out, "Checksum 1    : {:#X}", checkpoint.checksum_1);
    let _ = writeln!(out, "Checksum 2    : {:#X}", checkpoint.checksum_2);
    let _ = writeln!(out, "FSP Free Limit: {}", fsp_free_limit);
    let _ = writeln!(out, "Magic         : {:#X}", checkpoint.magic);
    out
}

/// Render one log block, including a hex dump of its payload
pub fn render_log_block(positioned: &PositionedBlock) -> String {
    let block = &positioned.block;
    let mut out = String::new();
    let _ = writeln!(out, "{}", thin_rule());
    let _ = writeln!(
        out,
        "{}",
        format!(
            "Log block #{} at offset {}",
            positioned.index, positioned.offset
        )
        .bold()
    );
    let _ = writeln!(out, "Header number     : {:#X}", block.header_number);
    let _ = writeln!(out, "Block number      : {}", block.block_number());
    let _ = writeln!(out, "Is first block    : {}", block.is_first_in_segment());
    let _ = writeln!(out, "Size              : {}", block.block_size);
    let _ = writeln!(out, "Offset            : {}", block.first_group_offset);
    let _ = writeln!(out, "Current checkpoint: {:#X}", block.checkpoint_number);
    let _ = writeln!(out, "Hdr-size          : {}", block.header_size);
    let _ = writeln!(out, "Checksum          : {:#X}", block.checksum);
    let _ = writeln!(out, "Data:");
    out.push_str(&hex_dump(&block.data));
    out
}

/// Uppercase hex dump, one row per 16 bytes, prefixed by the row offset
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(HEX_ROW).enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
        let _ = writeln!(out, "  {:04X}  {}", row * HEX_ROW, bytes.join(" "));
    }
    out
}

pub fn render_summary(summary: &DumpSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(
        out,
        "{}: {} log block(s) decoded, {} first-of-segment",
        "Summary".bold(),
        summary.blocks,
        summary.first_in_segment_blocks
    );
    for truncated in &summary.truncated_records {
        let _ = writeln!(
            out,
            "  - {} truncated: {} of {} bytes read",
            truncated.record,
            truncated.actual,
            truncated.expected
        );
    }
    if summary.trailing_bytes > 0 {
        let _ = writeln!(
            out,
            "  - {} trailing byte(s) after the last complete block ignored",
            summary.trailing_bytes
        );
    }
    let _ = writeln!(out, "End offset: {}", summary.end_offset);
    let _ = writeln!(out, "{}", rule());
    out
}

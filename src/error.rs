use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogDumpError {
    #[error("Failed to open log file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Short read on {record}: expected {expected} bytes, got {actual}")]
    ShortRead {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read log stream")]
    Stream(#[source] std::io::Error),

    #[error("Failed to write report")]
    Output(#[source] std::io::Error),

    #[error("Unexpected end of data while parsing")]
    UnexpectedEof,
}

pub type Result<T> = std::result::Result<T, LogDumpError>;

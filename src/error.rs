use std::error::Error as StdError;
use std::io;

use thiserror::Error;

use crate::timestamp::TimestampError;

/// Everything that can abort a parse or encode call. Line numbers start at 1.
#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: expected a subtitle number, found '{content}'")]
    InvalidIndex { line: usize, content: String },

    #[error("line {line}: invalid subtitle timing '{content}'")]
    InvalidTiming { line: usize, content: String },

    #[error("line {line}: {source}")]
    MalformedTimestamp {
        line: usize,
        #[source]
        source: TimestampError,
    },

    #[error("line {line}: input ended in the middle of a subtitle")]
    Truncated { line: usize },

    #[error("failed to read line {line}")]
    SourceRead {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to write subtitle")]
    SinkWrite(#[source] io::Error),

    /// Raised by the record consumer; the inner error is kept as it was returned.
    #[error("subtitle consumer failed: {0}")]
    Consumer(#[source] Box<dyn StdError + Send + Sync>),
}

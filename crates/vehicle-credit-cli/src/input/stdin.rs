use serde::de::DeserializeOwned;
use std::io::{self, Read};

use super::{parse_document, Syntax};

/// Read a piped JSON or YAML request straight into `T`.
/// Returns None when stdin is a TTY or the pipe is empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let syntax = Syntax::sniff(trimmed);
    tracing::debug!(?syntax, bytes = trimmed.len(), "read request from stdin");
    parse_document(trimmed, syntax, "stdin").map(Some)
}

//! JSON I/O handling for CLI
//!
//! - Input: one JSON request object on stdin
//! - Output: one JSON document on stdout
//! - UTF-8 only

use std::io::{Read, Write};

use serde::Serialize;

use super::errors::{CliError, CliResult};
use crate::executor::ResolveRequest;

/// Read a resolution request
pub fn read_request<R: Read>(mut input: R) -> CliResult<ResolveRequest> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let request = serde_json::from_str(&content)?;
    Ok(request)
}

/// Write a JSON document followed by a newline
pub fn write_json<W: Write, T: Serialize>(mut output: W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut output, value)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::errors::CliErrorCode;

    #[test]
    fn test_read_multiline_request() {
        let input = "{\n  \"maxNestingLevel\": 1\n}\n";
        let request = read_request(input.as_bytes()).unwrap();
        assert_eq!(request.max_nesting_level, Some(1));
    }

    #[test]
    fn test_empty_input() {
        let err = read_request("  \n".as_bytes()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::IoError);
    }

    #[test]
    fn test_write_json() {
        let mut output = Vec::new();
        write_json(&mut output, &serde_json::json!({"ok": true})).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "{\"ok\":true}\n");
    }
}

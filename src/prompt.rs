//! Line-at-a-time hashing for interactive use.

use std::io::{BufRead, Write};

use log::debug;

use crate::error::Error;
use crate::sha256::Sha256;

const PROMPT: &str = "input:            ";
const DIGEST_LABEL: &str = "digest:           ";

/// Removes one trailing line terminator (`\n` or `\r\n`).
fn strip_newline(line: &[u8]) -> &[u8] {
    match line {
        [rest @ .., b'\r', b'\n'] | [rest @ .., b'\n'] => rest,
        _ => line,
    }
}

/// Prompts for a line on `output`, hashes it and prints the digest, until `input` runs dry.
///
/// Returns the number of lines hashed.
pub fn digest_lines<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<usize, Error> {
    let mut hasher = Sha256::new();
    let mut line = Vec::new();
    let mut count = 0;
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let text = strip_newline(&line);
        hasher.update(text)?;
        let digest = hasher.finalize_reset()?;
        debug!("hashed line of {} bytes", text.len());

        writeln!(output, "{}{}", DIGEST_LABEL, digest)?;
        writeln!(output)?;
        writeln!(output)?;
        count += 1;
    }
    Ok(count)
}

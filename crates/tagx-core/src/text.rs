//! Line reader shared by the stop-word loader, the extractor and the listing parser.

use std::io::{self, BufRead};

use crate::error::{Result, TagError};

/// Call `f` with every line of `reader`, terminator removed. The first error,
/// from the reader or from `f`, stops the walk.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. A trailing line without a
/// terminator is still delivered; an empty source delivers nothing. Bytes are
/// decoded as UTF-8 lossily, one line at a time, so memory is bounded by the
/// longest line.
pub(crate) fn for_each_line<R, F>(mut reader: R, label: &str, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str) -> io::Result<()>,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| TagError::read(label, e))?;
        if n == 0 {
            return Ok(());
        }
        let mut chunk: &[u8] = &buf;
        if let Some(rest) = chunk.strip_suffix(b"\n") {
            chunk = rest;
        }
        if let Some(rest) = chunk.strip_suffix(b"\r") {
            chunk = rest;
        }
        let decoded = String::from_utf8_lossy(chunk);
        for line in decoded.split('\r') {
            f(line).map_err(|e| TagError::read(label, e))?;
        }
    }
}

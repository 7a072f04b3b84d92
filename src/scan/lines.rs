use memchr::memchr;

/// Returns the offset just past the newline that ends the line starting at `start`
///
/// With `eof` set, an unterminated final line ends at the end of the buffer.
pub(crate) fn line_end(buf: &[u8], start: usize, eof: bool) -> Option<usize> {
    let rest = buf.get(start..)?;
    match memchr(b'\n', rest) {
        Some(i) => Some(start + i + 1),
        None if eof && !rest.is_empty() => Some(buf.len()),
        None => None,
    }
}

/// Skips `n` lines starting at `start`, returning the offset of the line that follows them
pub(crate) fn skip_lines(buf: &[u8], start: usize, n: usize, eof: bool) -> Option<usize> {
    (0..n).try_fold(start, |pos, _| line_end(buf, pos, eof))
}

/// Finds the first `sentinel` at or after `from` that opens a line
///
/// Offset 0 counts as a line start, so callers that do not know what precedes the buffer
/// should hand in one byte of lookbehind and scan from 1.
pub(crate) fn next_line_start(buf: &[u8], from: usize, sentinel: u8) -> Option<usize> {
    if from == 0 && buf.first() == Some(&sentinel) {
        return Some(0);
    }
    let mut search = from.saturating_sub(1).min(buf.len());
    while let Some(i) = memchr(b'\n', &buf[search..]) {
        let candidate = search + i + 1;
        if buf.get(candidate) == Some(&sentinel) {
            return Some(candidate);
        }
        search = candidate;
    }
    None
}

//! Splitting raw timebook content into logical lines.

/// Splits raw file content into lines.
///
/// Lines end at `\n` and every `\r` is dropped, so LF and CRLF files split the
/// same way. Empty lines between terminators are kept as empty strings; a
/// trailing fragment after the last `\n` is only emitted when non-empty.
pub fn split_lines(content: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for &byte in content {
        match byte {
            b'\n' => lines.push(decode(&std::mem::take(&mut current))),
            b'\r' => {}
            _ => current.push(byte),
        }
    }

    if !current.is_empty() {
        lines.push(decode(&current));
    }

    lines
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

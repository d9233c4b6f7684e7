//! Fixed-width hex + ASCII rendering of raw bytes.

use std::fmt::Write;

/// Render `bytes` as lines of `width` bytes: uppercase hex pairs separated
/// by spaces and padded to `width * 3` columns, a tab, then the printable
/// ASCII rendering (`.` for anything else).  A `width` of 0 is treated as 1.
pub fn hexdump(bytes: &[u8], width: usize) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(bytes.len() / width * (width * 4 + 2) + 64);

    for chunk in bytes.chunks(width) {
        let hex = chunk
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if (32..127).contains(&b) { b as char } else { '.' })
            .collect();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{hex:<pad$}\t{ascii}", pad = width * 3);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_and_partial_lines() {
        let out = hexdump(b"Hi!\x00\x7fAB", 4);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["48 69 21 00 \tHi!.", "7F 41 42    \t.AB"]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(hexdump(&[], 16), "");
    }

    #[test]
    fn zero_width_does_not_loop() {
        assert_eq!(hexdump(b"ab", 0).lines().count(), 2);
    }
}

//! Reassembly of soft-wrapped SMS records.
//!
//! On export an SMS body's embedded newlines become a newline plus one
//! leading space. This adapter undoes that on import: a physical line
//! starting with a space continues the previous logical record, with the
//! space stripped and a newline restored in between.

use std::io::{self, BufRead};

/// Iterator over logical records of an SMS import file.
///
/// Yields one item per logical record; a record may span several physical
/// lines. Call import does not use this: every physical line is one record.
pub struct LogicalLines<B> {
    lines: io::Lines<B>,
    buffer: String,
    done: bool,
}

impl<B: BufRead> LogicalLines<B> {
    pub fn new(reader: B) -> Self {
        Self {
            lines: reader.lines(),
            buffer: String::new(),
            done: false,
        }
    }
}

impl<B: BufRead> Iterator for LogicalLines<B> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    if let Some(rest) = line.strip_prefix(' ') {
                        // Continuation, even when nothing precedes it: the
                        // resulting record fails field parsing downstream,
                        // which is where it gets reported.
                        self.buffer.push('\n');
                        self.buffer.push_str(rest);
                        continue;
                    }
                    let completed = std::mem::replace(&mut self.buffer, line);
                    if completed.is_empty() {
                        continue;
                    }
                    return Some(Ok(completed));
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    if self.buffer.is_empty() {
                        return None;
                    }
                    return Some(Ok(std::mem::take(&mut self.buffer)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str) -> Vec<String> {
        LogicalLines::new(Cursor::new(input.to_string()))
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_plain_lines_pass_through() {
        assert_eq!(collect("a\nb\nc\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_continuation_joins_with_newline() {
        let records = collect(
            "555;IN;2020-01-01T00:00:00Z;2020-01-01T00:01:00Z;hello\n world\n",
        );
        assert_eq!(
            records,
            vec!["555;IN;2020-01-01T00:00:00Z;2020-01-01T00:01:00Z;hello\nworld"]
        );
    }

    #[test]
    fn test_multiple_continuations() {
        assert_eq!(collect("first\n a\n b\nsecond\n"), vec!["first\na\nb", "second"]);
    }

    #[test]
    fn test_final_record_emitted_without_trailing_newline() {
        assert_eq!(collect("a\n b"), vec!["a\nb"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_leading_continuation_becomes_a_record() {
        // No preceding record to attach to; the fragment comes out as its
        // own (invalid) record rather than being silently dropped.
        assert_eq!(collect(" orphan\nreal\n"), vec!["\norphan", "real"]);
    }
}

//! Operator input: prompted lines and `--script` entries.

use std::io::{self, BufRead, Write};

use ad_core::{Priority, VertexId};
use ad_dispatch::Request;
use anyhow::{Context, Result, bail};

/// Print `prompt` and read one trimmed line.  `None` at end of input.
pub fn prompt<R: BufRead>(input: &mut R, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// A location index in `0..count`, or `None` for anything else.
pub fn parse_index(text: &str, count: usize) -> Option<VertexId> {
    let index: usize = text.trim().parse().ok()?;
    (index < count).then(|| VertexId(index as u32))
}

/// `Y`/`y` (or anything starting with it) continues the session.
pub fn wants_more(answer: &str) -> bool {
    answer.trim_start().starts_with(['y', 'Y'])
}

/// Parse one `index:priority` script entry.  The priority part is optional
/// and read leniently; the index is range-checked later by the dispatcher.
pub fn parse_script_entry(entry: &str) -> Result<Request> {
    let (index, priority) = match entry.split_once(':') {
        Some((i, p)) => (i, Priority::parse_lenient(p)),
        None => (entry, Priority::Normal),
    };
    let index = index.trim();
    if index.is_empty() {
        bail!("script entry {entry:?} has no location index");
    }
    let index: u32 = index
        .parse()
        .with_context(|| format!("script entry {entry:?}: {index:?} is not a location index"))?;
    Ok(Request::new(VertexId(index), priority))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn index_bounds() {
        assert_eq!(parse_index("0", 8), Some(VertexId(0)));
        assert_eq!(parse_index(" 7 ", 8), Some(VertexId(7)));
        assert_eq!(parse_index("8", 8), None);
        assert_eq!(parse_index("-1", 8), None);
        assert_eq!(parse_index("two", 8), None);
    }

    #[test]
    fn continue_answers() {
        assert!(wants_more("Y"));
        assert!(wants_more("yes"));
        assert!(!wants_more("N"));
        assert!(!wants_more(""));
    }

    #[test]
    fn script_entries() {
        let r = parse_script_entry("3:critical").unwrap();
        assert_eq!(r, Request::new(VertexId(3), Priority::Critical));
        let r = parse_script_entry("5").unwrap();
        assert_eq!(r.priority, Priority::Normal);
        let r = parse_script_entry("2:urgent").unwrap();
        assert_eq!(r.priority, Priority::Normal);
        assert!(parse_script_entry("x:high").is_err());
        assert!(parse_script_entry(":high").is_err());
    }

    #[test]
    fn prompt_reads_lines_until_eof() {
        let mut input = Cursor::new("  4 \nhigh\n");
        assert_eq!(prompt(&mut input, "").unwrap().as_deref(), Some("4"));
        assert_eq!(prompt(&mut input, "").unwrap().as_deref(), Some("high"));
        assert_eq!(prompt(&mut input, "").unwrap(), None);
    }
}

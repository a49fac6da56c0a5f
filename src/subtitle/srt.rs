use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;
use super::block::Block;
use super::ParsedSubtitles;

// @module: SubRip (SRT) parsing

// @const: Blank-line separator between SRT blocks
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)*").unwrap()
});

// @const: SRT timestamp, HH:MM:SS,mmm
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// Normalize line endings and drop a leading byte order mark
pub(crate) fn normalize_line_endings(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Option<u64> {
    let caps = TIMESTAMP_REGEX.captures(timestamp)?;
    let field = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u64>().ok());

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    Some((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
}

/// Parse both sides of an SRT range line; trailing coordinates after the end time are ignored
fn parse_range_line(line: &str) -> Option<(u64, u64)> {
    let (start, end) = line.split_once("-->")?;
    let start_ms = parse_timestamp(start.trim())?;
    let end_ms = parse_timestamp(end.split_whitespace().next()?)?;
    Some((start_ms, end_ms))
}

/// Parse SRT content into blocks, counting malformed ones
pub fn parse(content: &str) -> ParsedSubtitles {
    let normalized = normalize_line_endings(content);
    let mut parsed = ParsedSubtitles::default();

    for (raw_index, raw_block) in BLOCK_SEPARATOR_REGEX.split(&normalized).enumerate() {
        if raw_block.trim().is_empty() {
            continue;
        }

        let lines: Vec<&str> = raw_block.lines().collect();

        let Some(range_pos) = lines.iter().position(|line| line.contains("-->")) else {
            debug!("Skipping SRT block {}: no time range line", raw_index + 1);
            parsed.skipped += 1;
            continue;
        };

        let Some((start_ms, end_ms)) = parse_range_line(lines[range_pos]) else {
            debug!("Skipping SRT block {}: invalid time range '{}'", raw_index + 1, lines[range_pos].trim());
            parsed.skipped += 1;
            continue;
        };

        let source_index = range_pos
            .checked_sub(1)
            .map(|pos| lines[pos].trim())
            .filter(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()))
            .and_then(|label| label.parse::<u32>().ok());

        let text_lines: Vec<String> = lines[range_pos + 1..]
            .iter()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.trim().is_empty())
            .collect();

        if text_lines.is_empty() {
            debug!("Skipping SRT block {}: empty text", raw_index + 1);
            parsed.skipped += 1;
            continue;
        }

        let order = parsed.blocks.len();
        parsed.blocks.push(
            Block::new(order, start_ms, end_ms, text_lines).with_source_index(source_index)
        );
    }

    parsed
}

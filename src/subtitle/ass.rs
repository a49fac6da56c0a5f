use std::collections::HashMap;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;
use super::block::Block;
use super::srt::normalize_line_endings;
use super::tags::PositionTag;
use super::{ParseOptions, ParsedSubtitles};

// @module: Advanced SubStation Alpha (ASS/SSA) parsing

// @const: Inline override block, e.g. {\an8\fs20}
static OVERRIDE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^}]*\}").unwrap()
});

static ALIGNMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\an([1-9])").unwrap()
});

static FONT_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\fn([^\\}]+)").unwrap()
});

// Requires a digit right after \fs so \fscx and \fscy never match
static FONT_SIZE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\fs(\d+(?:\.\d+)?)").unwrap()
});

// \c&HBBGGRR& or \1c&HBBGGRR&
static PRIMARY_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\1?c&?[Hh]([0-9A-Fa-f]{1,8})&?").unwrap()
});

// @const: ASS timestamp, H:MM:SS.cc
static ASS_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{1,2})$").unwrap()
});

const DEFAULT_STYLE_FORMAT: [&str; 23] = [
    "Name", "Fontname", "Fontsize", "PrimaryColour", "SecondaryColour", "OutlineColour",
    "BackColour", "Bold", "Italic", "Underline", "StrikeOut", "ScaleX", "ScaleY", "Spacing",
    "Angle", "BorderStyle", "Outline", "Shadow", "Alignment", "MarginL", "MarginR", "MarginV",
    "Encoding",
];

const DEFAULT_EVENT_FORMAT: [&str; 10] = [
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

const WHITE: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Styles,
    Events,
    Other,
}

/// Ordered field list declared by a `Format:` line
#[derive(Debug, Clone)]
struct FieldFormat {
    fields: Vec<String>,
}

impl FieldFormat {
    fn from_names(names: &[&str]) -> Self {
        Self { fields: names.iter().map(|name| name.to_lowercase()).collect() }
    }

    fn from_line(value: &str) -> Self {
        Self { fields: value.split(',').map(|field| field.trim().to_lowercase()).collect() }
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.fields.iter().position(|field| *field == name)
    }

    /// Split a line into at most `len()` values; the final field keeps any remaining commas
    fn split<'a>(&self, value: &'a str) -> Vec<&'a str> {
        value.splitn(self.len().max(1), ',').collect()
    }

    fn get<'a>(&self, values: &[&'a str], name: &str) -> Option<&'a str> {
        self.index_of(name).and_then(|idx| values.get(idx).copied())
    }
}

// @struct: Style attributes carried into the output
#[derive(Debug, Clone, Default)]
struct AssStyle {
    primary_colour: Option<String>,
}

// @struct: Attributes collected from inline override blocks
#[derive(Debug, Clone, Default, PartialEq)]
struct Overrides {
    alignment: Option<PositionTag>,
    font_name: Option<String>,
    font_size: Option<String>,
    color: Option<String>,
}

/// Convert an ASS color (`&HAABBGGRR&`, `&HBBGGRR`, or decimal) to `#rrggbb`
pub fn ass_color_to_hex(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('&');
    let value = match trimmed.strip_prefix('H').or_else(|| trimmed.strip_prefix('h')) {
        Some(hex) => u32::from_str_radix(hex.trim_end_matches('&'), 16).ok()?,
        None => trimmed.parse::<i64>().ok()? as u32,
    };

    let blue = (value >> 16) & 0xff;
    let green = (value >> 8) & 0xff;
    let red = value & 0xff;
    Some(format!("#{:02x}{:02x}{:02x}", red, green, blue))
}

/// Parse an ASS timestamp (H:MM:SS.cc) to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Option<u64> {
    let caps = ASS_TIMESTAMP_REGEX.captures(timestamp.trim())?;
    let field = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u64>().ok());

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let fraction = caps.get(4)?.as_str();
    let centis = match fraction.len() {
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse::<u64>().ok()?,
    };

    // The hour field is unbounded, so overflow means a malformed timestamp
    hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)?
        .checked_mul(1000)?
        .checked_add(centis * 10)
}

/// Escape a value for use inside a double-quoted attribute
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Collect overrides from every `{...}` block; later values win
fn scan_overrides(text: &str) -> Overrides {
    let mut overrides = Overrides::default();

    for block in OVERRIDE_BLOCK_REGEX.find_iter(text) {
        let block = block.as_str();

        for caps in ALIGNMENT_REGEX.captures_iter(block) {
            if let Some(tag) = caps[1].parse::<u8>().ok().and_then(PositionTag::new) {
                overrides.alignment = Some(tag);
            }
        }
        for caps in FONT_NAME_REGEX.captures_iter(block) {
            let name = caps[1].trim();
            if !name.is_empty() {
                overrides.font_name = Some(name.to_string());
            }
        }
        for caps in FONT_SIZE_REGEX.captures_iter(block) {
            overrides.font_size = Some(caps[1].to_string());
        }
        for caps in PRIMARY_COLOR_REGEX.captures_iter(block) {
            if let Some(color) = ass_color_to_hex(&format!("&H{}&", &caps[1])) {
                overrides.color = Some(color);
            }
        }
    }

    overrides
}

/// Strip override markup and turn ASS line breaks into text lines
fn visible_lines(text: &str) -> Vec<String> {
    OVERRIDE_BLOCK_REGEX
        .replace_all(text, "")
        .replace("\\N", "\n")
        .replace("\\n", "\n")
        .replace("\\h", " ")
        .split('\n')
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Build the `<font ...>` opening tag, or None when no attribute is set
fn font_open_tag(face: Option<&str>, size: Option<&str>, color: Option<&str>) -> Option<String> {
    let attributes: Vec<String> = [("face", face), ("size", size), ("color", color)]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}=\"{}\"", name, escape_attribute(v))))
        .collect();

    if attributes.is_empty() {
        None
    } else {
        Some(format!("<font {}>", attributes.join(" ")))
    }
}

fn section_for_header(header: &str) -> Section {
    let name = header.to_lowercase();
    if name.contains("styles") {
        Section::Styles
    } else if name == "events" {
        Section::Events
    } else {
        Section::Other
    }
}

/// Split `Key: value` lines, returning the key and the untrimmed remainder
fn split_key(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.strip_prefix(' ').unwrap_or(value)))
}

/// Parse ASS/SSA content into blocks, counting events that had to be skipped
pub fn parse(content: &str, options: ParseOptions) -> ParsedSubtitles {
    let normalized = normalize_line_endings(content);
    let mut parsed = ParsedSubtitles::default();

    let mut section = Section::Other;
    let mut style_format = FieldFormat::from_names(&DEFAULT_STYLE_FORMAT);
    let mut event_format = FieldFormat::from_names(&DEFAULT_EVENT_FORMAT);
    let mut styles: HashMap<String, AssStyle> = HashMap::new();
    let mut event_count = 0usize;

    for line in normalized.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = section_for_header(&trimmed[1..trimmed.len() - 1]);
            continue;
        }

        let Some((key, value)) = split_key(trimmed) else {
            continue;
        };

        match (section, key.to_lowercase().as_str()) {
            (Section::Styles, "format") => style_format = FieldFormat::from_line(value),
            (Section::Events, "format") => event_format = FieldFormat::from_line(value),
            (Section::Styles, "style") => {
                let values = style_format.split(value);
                let Some(name) = style_format.get(&values, "Name") else {
                    continue;
                };
                let primary_colour = style_format
                    .get(&values, "PrimaryColour")
                    .map(str::trim)
                    .filter(|colour| !colour.is_empty())
                    .map(str::to_string);
                styles.insert(name.trim().to_lowercase(), AssStyle { primary_colour });
            }
            (Section::Events, "dialogue") => {
                event_count += 1;
                let values = event_format.split(value);

                let (Some(start), Some(end), Some(text)) = (
                    event_format.get(&values, "Start"),
                    event_format.get(&values, "End"),
                    event_format.get(&values, "Text"),
                ) else {
                    debug!("Skipping ASS event {}: missing fields", event_count);
                    parsed.skipped += 1;
                    continue;
                };

                let (Some(start_ms), Some(end_ms)) = (parse_timestamp(start), parse_timestamp(end)) else {
                    debug!("Skipping ASS event {}: invalid timestamps '{}' / '{}'", event_count, start.trim(), end.trim());
                    parsed.skipped += 1;
                    continue;
                };

                let style_name = event_format
                    .get(&values, "Style")
                    .map(|name| name.trim().trim_start_matches('*').to_lowercase())
                    .unwrap_or_default();
                let style = styles.get(&style_name).cloned().unwrap_or_default();

                match build_text_lines(text, &style, options) {
                    Some(text_lines) => {
                        let order = parsed.blocks.len();
                        parsed.blocks.push(Block::new(order, start_ms, end_ms, text_lines));
                    }
                    None => {
                        debug!("Skipping ASS event {}: empty text", event_count);
                        parsed.skipped += 1;
                    }
                }
            }
            _ => {}
        }
    }

    parsed
}

/// Turn a dialogue text field into output lines: overrides folded into a
/// font span and an optional leading position tag
fn build_text_lines(text: &str, style: &AssStyle, options: ParseOptions) -> Option<Vec<String>> {
    let overrides = scan_overrides(text);
    let mut lines = visible_lines(text);
    if lines.is_empty() {
        return None;
    }

    // Inline colors are always honored; style white only with keep_white
    let color = match overrides.color {
        Some(color) => Some(color),
        None => style
            .primary_colour
            .as_deref()
            .and_then(ass_color_to_hex)
            .filter(|color| options.keep_white || color != WHITE),
    };

    if let Some(open_tag) = font_open_tag(
        overrides.font_name.as_deref(),
        overrides.font_size.as_deref(),
        color.as_deref(),
    ) {
        lines[0].insert_str(0, &open_tag);
        if let Some(last) = lines.last_mut() {
            last.push_str("</font>");
        }
    }

    if let Some(tag) = overrides.alignment {
        lines[0].insert_str(0, &tag.marker());
    }

    Some(lines)
}

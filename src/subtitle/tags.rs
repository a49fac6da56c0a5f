use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;

// @module: Screen-position tags and the fixed assignment palette

// @const: Leading position marker, e.g. {\an8}
static LEADING_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{\\an([1-9])\}").unwrap()
});

// @const: Position marker anywhere in a line
static ANY_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\\an[1-9]\}").unwrap()
});

/// Screen position expressed as a numpad alignment digit (1..=9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionTag(u8);

impl PositionTag {
    /// Bottom center, the default subtitle position
    pub const BOTTOM_CENTER: PositionTag = PositionTag(2);
    /// Top center
    pub const TOP_CENTER: PositionTag = PositionTag(8);
    /// Middle center
    pub const MIDDLE_CENTER: PositionTag = PositionTag(5);
    /// Middle left
    pub const MIDDLE_LEFT: PositionTag = PositionTag(4);
    /// Middle right
    pub const MIDDLE_RIGHT: PositionTag = PositionTag(6);

    /// Create a tag from an alignment digit, rejecting anything outside 1..=9
    pub fn new(alignment: u8) -> Option<Self> {
        (1..=9).contains(&alignment).then_some(PositionTag(alignment))
    }

    pub fn alignment(self) -> u8 {
        self.0
    }

    /// The default tag (first palette entry)
    pub fn default_tag() -> Self {
        PALETTE[0]
    }

    pub fn is_default(self) -> bool {
        self == Self::default_tag()
    }

    /// Render the inline marker, e.g. `{\an2}`
    pub fn marker(self) -> String {
        format!("{{\\an{}}}", self.0)
    }
}

impl fmt::Display for PositionTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{\\an{}}}", self.0)
    }
}

/// Assignment palette in priority order; the last entry doubles as the overflow fallback
pub const PALETTE: [PositionTag; 5] = [
    PositionTag::BOTTOM_CENTER,
    PositionTag::TOP_CENTER,
    PositionTag::MIDDLE_CENTER,
    PositionTag::MIDDLE_LEFT,
    PositionTag::MIDDLE_RIGHT,
];

/// Read the position tag at the very start of a line, if any
pub fn leading_tag(line: &str) -> Option<PositionTag> {
    LEADING_TAG_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .and_then(PositionTag::new)
}

/// Remove the leading position marker of a line, leaving the rest untouched
pub fn strip_leading_tag(line: &str) -> &str {
    match LEADING_TAG_REGEX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Remove every position marker in a line
pub fn strip_all_tags(line: &str) -> String {
    ANY_TAG_REGEX.replace_all(line, "").into_owned()
}

/// Put `tag` at the start of `line`, replacing a leading marker if there is one
pub fn apply_tag(line: &str, tag: PositionTag) -> String {
    format!("{}{}", tag.marker(), strip_leading_tag(line))
}

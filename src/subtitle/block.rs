use super::tags::{self, PositionTag};

// @module: Subtitle block model

// @struct: Single timed caption block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    // @field: Position in the source before any sort
    pub original_order: usize,

    // @field: Numeric label from the source, if it had one
    pub source_index: Option<u32>,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Caption text, one entry per visual line
    pub text_lines: Vec<String>,

    // @field: Position tag found at the start of the first line
    pub existing_tag: Option<PositionTag>,

    // @field: Tag chosen by the resolver
    pub assigned_tag: Option<PositionTag>,

    // @field: Resolver kept the existing tag verbatim
    pub keep_existing: bool,
}

impl Block {
    /// Creates a block and records a leading position tag from its first line
    pub fn new(original_order: usize, start_ms: u64, end_ms: u64, text_lines: Vec<String>) -> Self {
        let existing_tag = text_lines.first().and_then(|line| tags::leading_tag(line));
        Block {
            original_order,
            source_index: None,
            start_ms,
            end_ms,
            text_lines,
            existing_tag,
            assigned_tag: None,
            keep_existing: false,
        }
    }

    /// Builder-style setter for the source label
    pub fn with_source_index(mut self, source_index: Option<u32>) -> Self {
        self.source_index = source_index;
        self
    }

    /// Two blocks overlap when each starts before the other ends
    pub fn overlaps(&self, other: &Block) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }

    /// Caption text with lines joined by newlines
    pub fn text(&self) -> String {
        self.text_lines.join("\n")
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// SRT range line for this block
    pub fn format_range(&self) -> String {
        format!("{} --> {}", Self::format_timestamp(self.start_ms), Self::format_timestamp(self.end_ms))
    }
}

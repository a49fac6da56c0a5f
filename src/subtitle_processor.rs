use std::fmt;
use log::{warn, debug};
use crate::app_config::PositioningConfig;
use crate::errors::SubtitleError;
use crate::subtitle::{self, resolver, serializer, ResolveSummary, SubtitleFormat};

// @module: Per-document pipeline: parse, resolve, serialize

/// Result of positioning one subtitle document
#[derive(Debug, Clone)]
pub struct ProcessedSubtitles {
    /// Rendered SRT output
    pub content: String,

    /// Detected input format
    pub format: SubtitleFormat,

    /// Number of blocks written
    pub block_count: usize,

    /// Number of malformed or empty blocks that were dropped
    pub skipped: usize,

    /// Counters from the resolver
    pub summary: ResolveSummary,
}

impl fmt::Display for ProcessedSubtitles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} blocks from {} input ({} skipped, {} overlapping at most)",
            self.block_count, self.format, self.skipped, self.summary.max_concurrent
        )
    }
}

/// Runs the parse → resolve → serialize pipeline with one set of options
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleProcessor {
    positioning: PositioningConfig,
}

impl SubtitleProcessor {
    pub fn new(positioning: PositioningConfig) -> Self {
        Self { positioning }
    }

    /// Position every block of `content`. `filename` is only used to pick the input format.
    pub fn process(&self, content: &str, filename: &str) -> Result<ProcessedSubtitles, SubtitleError> {
        let format = SubtitleFormat::detect(filename, content);
        let mut parsed = subtitle::parse(content, format, self.positioning.parse_options());

        if parsed.skipped > 0 {
            warn!("{}: skipped {} malformed or empty block(s)", filename, parsed.skipped);
        }

        if parsed.blocks.is_empty() {
            return Err(SubtitleError::NoValidBlocks { skipped: parsed.skipped });
        }

        let summary = resolver::resolve(&mut parsed.blocks, self.positioning.resolve_options());
        debug!(
            "{}: {} kept, {} assigned, {} over palette, max {} on screen",
            filename, summary.kept_existing, summary.assigned, summary.overflowed, summary.max_concurrent
        );
        if summary.overflowed > 0 {
            warn!("{}: {} block(s) overlap more than the palette allows", filename, summary.overflowed);
        }

        Ok(ProcessedSubtitles {
            content: serializer::render_srt(&parsed.blocks),
            format,
            block_count: parsed.blocks.len(),
            skipped: parsed.skipped,
            summary,
        })
    }
}

/*!
 * Subtitle parsing, overlap resolution and serialization.
 *
 * The pipeline for one document is:
 * - `format`: detect SRT vs ASS input
 * - `srt` / `ass`: parse into [`Block`]s, counting malformed entries
 * - `resolver`: sweep overlapping blocks and assign position tags
 * - `serializer`: render blocks back to SRT in canonical order
 */

pub mod ass;
pub mod block;
pub mod format;
pub mod resolver;
pub mod serializer;
pub mod srt;
pub mod tags;

pub use block::Block;
pub use format::SubtitleFormat;
pub use resolver::{ResolveOptions, ResolveSummary};
pub use tags::{PositionTag, PALETTE};

/// Options that affect parsing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParseOptions {
    /// Keep a pure white color inherited from a style instead of dropping it
    pub keep_white: bool,
}

/// Blocks produced by a parser plus the number of entries it had to skip
#[derive(Debug, Clone, Default)]
pub struct ParsedSubtitles {
    pub blocks: Vec<Block>,
    pub skipped: usize,
}

/// Parse `content` in the given format
pub fn parse(content: &str, format: SubtitleFormat, options: ParseOptions) -> ParsedSubtitles {
    match format {
        SubtitleFormat::Srt => srt::parse(content),
        SubtitleFormat::Ass => ass::parse(content, options),
    }
}

use std::fmt;
use std::path::Path;

// @module: Input format detection

/// Subtitle input format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtitleFormat {
    /// SubRip (.srt)
    #[default]
    Srt,
    /// Advanced SubStation Alpha / SubStation Alpha (.ass, .ssa)
    Ass,
}

impl SubtitleFormat {
    /// Extensions accepted as subtitle input
    pub const INPUT_EXTENSIONS: [&'static str; 3] = ["srt", "ass", "ssa"];

    /// Detect the format from the file extension, falling back to content sniffing
    pub fn detect(filename: &str, content: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            Some("ass") | Some("ssa") => SubtitleFormat::Ass,
            Some("srt") => SubtitleFormat::Srt,
            _ => Self::sniff(content),
        }
    }

    /// An ASS script declares a [Script Info] section and Dialogue events
    pub fn sniff(content: &str) -> Self {
        let has_script_info = content.to_lowercase().contains("[script info]");
        let has_dialogue = content
            .lines()
            .any(|line| line.trim_start().starts_with("Dialogue:"));

        if has_script_info && has_dialogue {
            SubtitleFormat::Ass
        } else {
            SubtitleFormat::Srt
        }
    }

    // @returns: Lowercase identifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

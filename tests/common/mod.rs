/*!
 * Common test utilities for the subpos test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use subpos::Block;

/// Route log output through the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).filter_level(log::LevelFilter::Debug).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Reads a file written by the code under test
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// SRT document with two overlapping cues and one on its own
pub const OVERLAPPING_SRT: &str = "1
00:00:01,000 --> 00:00:05,000
Narrator speaking

2
00:00:03,000 --> 00:00:06,000
Sign on the wall

3
00:00:10,000 --> 00:00:12,000
Later line
";

/// ASS script with a white default style, an inline color and an alignment override
pub const SAMPLE_ASS: &str = "[Script Info]
Title: Sample
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1
Style: Sign,Arial,18,&H0000FFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,8,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:05.00,Default,,0,0,0,,Hello, world\\Nsecond line
Dialogue: 0,0:00:02.5,0:00:04.00,Sign,,0,0,0,,{\\an8}EXIT
Dialogue: 0,0:00:06.00,0:00:07.00,Default,,0,0,0,,{\\1c&H0000FF&}Blue
Dialogue: 0,bad,0:00:07.00,Default,,0,0,0,,Broken
Comment: 0,0:00:08.00,0:00:09.00,Default,,0,0,0,,Not shown
";

/// Builds a single-line block
pub fn block(order: usize, start_ms: u64, end_ms: u64, text: &str) -> Block {
    Block::new(order, start_ms, end_ms, vec![text.to_string()])
}

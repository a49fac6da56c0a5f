/*!
 * # subpos - screen positions for overlapping subtitles
 *
 * A Rust library and CLI that reads SRT or ASS subtitles and gives every
 * caption an `{\anN}` position tag so that captions shown at the same time
 * do not collide.
 *
 * ## Features
 *
 * - SRT parsing with tolerant block splitting and skip counting
 * - ASS/SSA conversion: styles, inline overrides, colors, font spans
 * - Greedy sweep over overlapping captions with a fixed five-tag palette
 * - Options to keep, clean, or omit existing and default tags
 * - Concurrent batch processing of files and directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle`: the core pipeline:
 *   - `subtitle::srt` / `subtitle::ass`: format parsers
 *   - `subtitle::resolver`: overlap resolution
 *   - `subtitle::serializer`: SRT output
 *   - `subtitle::tags`: position tags and palette
 * - `subtitle_processor`: per-document pipeline facade
 * - `app_config`: Configuration management
 * - `app_controller`: batch runs over files and directories
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::{Config, PositioningConfig};
pub use app_controller::{BatchReport, Controller};
pub use errors::{AppError, SubtitleError};
pub use subtitle::{Block, PositionTag, ResolveOptions, SubtitleFormat, PALETTE};
pub use subtitle_processor::{ProcessedSubtitles, SubtitleProcessor};

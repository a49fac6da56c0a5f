/*!
 * Error types for the subpos application.
 *
 * Malformed subtitle blocks are never errors: parsers count and skip them.
 * The only data failure a caller sees is a document with no usable block.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Nothing left to write after skipping malformed blocks
    #[error("No valid subtitle blocks found ({skipped} skipped)")]
    NoValidBlocks {
        /// Number of malformed or empty blocks that were skipped
        skipped: usize,
    },

    /// Writing the result would replace the input file
    #[error("Output path is the same as the input: {0}")]
    OutputIsInput(PathBuf),
}

/// Application-level errors outside subtitle processing
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

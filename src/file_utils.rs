use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::subtitle::SubtitleFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Output path for a positioned subtitle
    // @params: input_file, output_dir (defaults to the input's directory), suffix
    pub fn generate_output_path<P: AsRef<Path>>(
        input_file: P,
        output_dir: Option<&Path>,
        suffix: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();

        let directory = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input_file.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        let stem = input_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());

        directory.join(format!("{}{}.srt", stem, suffix))
    }

    /// Whether a file name looks like something this tool already wrote
    pub fn is_generated_output<P: AsRef<Path>>(path: P, suffix: &str) -> bool {
        if suffix.is_empty() {
            return false;
        }
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .is_some_and(|name| name.ends_with(&format!("{}.srt", suffix.to_lowercase())))
    }

    /// Find subtitle inputs (.srt, .ass, .ssa) in a directory, recursively and in sorted order
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || Self::is_generated_output(path, suffix) {
                continue;
            }

            let matches_extension = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| SubtitleFormat::INPUT_EXTENSIONS.contains(&ext.as_str()));

            if matches_extension {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }
}

/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use subpos::file_utils::FileManager;
use crate::common;

/// Test that generate_output_path inserts the suffix next to the input
#[test]
fn test_generate_output_path_withDefaultDir_shouldUseInputDir() {
    let output = FileManager::generate_output_path(Path::new("/tmp/input/episode.ass"), None, ".pos");
    assert_eq!(output, Path::new("/tmp/input/episode.pos.srt"));
}

/// Test that generate_output_path honors an output directory
#[test]
fn test_generate_output_path_withOutputDir_shouldUseIt() {
    let output = FileManager::generate_output_path(
        Path::new("/tmp/input/movie.srt"),
        Some(Path::new("/tmp/output")),
        "",
    );
    assert_eq!(output, Path::new("/tmp/output/movie.srt"));
}

/// Test that previously generated outputs are recognized
#[test]
fn test_is_generated_output_withSuffix_shouldMatchOnlyOutputs() {
    assert!(FileManager::is_generated_output("movie.pos.srt", ".pos"));
    assert!(FileManager::is_generated_output("MOVIE.POS.SRT", ".pos"));
    assert!(!FileManager::is_generated_output("movie.srt", ".pos"));
    assert!(!FileManager::is_generated_output("movie.srt", ""));
}

/// Test recursive discovery of subtitle inputs
#[test]
fn test_find_subtitle_files_withNestedDirs_shouldFindInputsOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    common::create_test_file(temp_dir.path(), "a.srt", common::OVERLAPPING_SRT)?;
    common::create_test_file(temp_dir.path(), "a.pos.srt", common::OVERLAPPING_SRT)?;
    common::create_test_file(temp_dir.path(), "notes.txt", "hello")?;
    common::create_test_file(&nested, "b.ASS", common::SAMPLE_ASS)?;
    common::create_test_file(&nested, "c.ssa", common::SAMPLE_ASS)?;

    let files = FileManager::find_subtitle_files(temp_dir.path(), ".pos")?;
    let names: Vec<String> = files.iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.srt", "b.ASS", "c.ssa"]);
    Ok(())
}

/// Test existence checks and directory creation
#[test]
fn test_ensure_dir_withMissingParents_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let deep = temp_dir.path().join("a").join("b");
    let file = common::create_test_file(temp_dir.path(), "x.srt", "")?;

    assert!(!FileManager::dir_exists(&deep));
    FileManager::ensure_dir(&deep)?;
    assert!(FileManager::dir_exists(&deep));

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(!FileManager::file_exists(&deep));
    Ok(())
}

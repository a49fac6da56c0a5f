/*!
 * End-to-end tests: subtitle file in, positioned SRT file out
 */

use anyhow::Result;
use subpos::app_config::Config;
use subpos::app_controller::{Controller, FileOutcome};
use subpos::file_utils::FileManager;
use subpos::subtitle::srt;
use subpos::SubtitleFormat;
use crate::common;

/// Test that an SRT file is written next to its input with the default suffix
#[test]
fn test_process_file_withSrtInput_shouldWritePositionedOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::OVERLAPPING_SRT)?;
    let controller = Controller::with_config(Config::default())?;

    let outcome = tokio_test::block_on(controller.process_file(&input))?;

    let expected_output = temp_dir.path().join("movie.pos.srt");
    match outcome {
        FileOutcome::Written { output, processed } => {
            assert_eq!(output, expected_output);
            assert_eq!(processed.block_count, 3);
        }
        other => panic!("expected a written file, got {:?}", other),
    }

    let written = common::read_file(&expected_output)?;
    assert!(written.contains("{\\an2}Narrator speaking"));
    assert!(written.contains("{\\an8}Sign on the wall"));
    assert!(written.ends_with("Later line\n"));

    // The input is left untouched
    assert_eq!(common::read_file(&input)?, common::OVERLAPPING_SRT);
    Ok(())
}

/// Test that an ASS file becomes a valid SRT file in the output directory
#[test]
fn test_process_file_withAssInput_shouldConvertToSrt() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "episode.ass", common::SAMPLE_ASS)?;
    let out_dir = temp_dir.path().join("out");

    let mut config = Config::default();
    config.output.output_dir = Some(out_dir.clone());
    config.output.suffix = String::new();
    let controller = Controller::with_config(config)?;

    tokio_test::block_on(controller.process_file(&input))?;

    let written = common::read_file(out_dir.join("episode.srt"))?;
    let reparsed = srt::parse(&written);
    assert_eq!(reparsed.skipped, 0);
    assert_eq!(reparsed.blocks.len(), 3);
    assert_eq!(reparsed.blocks[1].start_ms, 2500);
    assert_eq!(reparsed.blocks[1].source_index, Some(2));
    Ok(())
}

/// Test that an existing output is kept unless overwrite is forced
#[test]
fn test_process_file_withExistingOutput_shouldRespectForceOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::OVERLAPPING_SRT)?;
    let existing = common::create_test_file(temp_dir.path(), "movie.pos.srt", "old")?;

    let controller = Controller::with_config(Config::default())?;
    let outcome = tokio_test::block_on(controller.process_file(&input))?;
    assert!(matches!(outcome, FileOutcome::AlreadyExists(ref path) if *path == existing));
    assert_eq!(common::read_file(&existing)?, "old");

    let mut config = Config::default();
    config.output.force_overwrite = true;
    let controller = Controller::with_config(config)?;
    tokio_test::block_on(controller.process_file(&input))?;
    assert!(common::read_file(&existing)?.starts_with("1\n00:00:01,000"));
    Ok(())
}

/// Test that an output path equal to the input is refused
#[test]
fn test_process_file_withOutputEqualToInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::OVERLAPPING_SRT)?;

    let mut config = Config::default();
    config.output.output_dir = Some(temp_dir.path().to_path_buf());
    config.output.suffix = String::new();
    config.output.force_overwrite = true;
    let controller = Controller::with_config(config)?;

    let result = tokio_test::block_on(controller.process_file(&input));
    assert!(result.is_err());
    assert_eq!(common::read_file(&input)?, common::OVERLAPPING_SRT);
    Ok(())
}

/// Test that render_file returns content without touching the disk
#[test]
fn test_render_file_withSrtInput_shouldNotWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::OVERLAPPING_SRT)?;
    let controller = Controller::with_config(Config::default())?;

    let processed = tokio_test::block_on(controller.render_file(&input))?;

    assert!(processed.content.starts_with("1\n00:00:01,000 --> 00:00:05,000\n{\\an2}"));
    assert!(!FileManager::file_exists(temp_dir.path().join("movie.pos.srt")));
    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_with_config_withZeroJobs_shouldFail() {
    let mut config = Config::default();
    config.jobs = 0;
    assert!(Controller::with_config(config).is_err());
}

/// Test that an explicit input with an unknown extension is detected from its content
#[test]
fn test_process_file_withUnknownExtension_shouldSniffFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "episode.txt", common::SAMPLE_ASS)?;
    let controller = Controller::with_config(Config::default())?;

    match tokio_test::block_on(controller.process_file(&input))? {
        FileOutcome::Written { processed, .. } => {
            assert_eq!(processed.format, SubtitleFormat::Ass);
            assert_eq!(processed.block_count, 3);
        }
        other => panic!("expected a written file, got {:?}", other),
    }
    assert!(FileManager::file_exists(temp_dir.path().join("episode.pos.srt")));
    Ok(())
}

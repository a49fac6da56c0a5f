use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn, info};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{ProcessedSubtitles, SubtitleProcessor};

// @module: Application controller for batch subtitle positioning

/// What happened to a single input file
#[derive(Debug)]
pub enum FileOutcome {
    /// Output written to `output`
    Written {
        output: PathBuf,
        processed: ProcessedSubtitles,
    },
    /// Output already existed and overwrite was not requested
    AlreadyExists(PathBuf),
}

/// Collected results of a run over one or more inputs
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Inputs whose output was written, with the output path
    pub written: Vec<(PathBuf, PathBuf)>,
    /// Inputs left alone because their output already exists
    pub skipped: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} processed, {} skipped, {} errors",
            self.written.len(), self.skipped.len(), self.failures.len()
        )
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Core pipeline configured from `config`
    processor: SubtitleProcessor,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let processor = SubtitleProcessor::new(config.positioning);
        Ok(Self { config, processor })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Expand input paths into the list of subtitle files to process
    pub fn collect_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in inputs {
            if FileManager::dir_exists(input) {
                let mut found = FileManager::find_subtitle_files(input, &self.config.output.suffix)?;
                if found.is_empty() {
                    warn!("No subtitle files found in directory: {:?}", input);
                }
                files.append(&mut found);
            } else if FileManager::file_exists(input) {
                files.push(input.clone());
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", input));
            }
        }

        Ok(files)
    }

    /// Output path for one input according to the output settings
    pub fn output_path_for(&self, input_file: &Path) -> PathBuf {
        FileManager::generate_output_path(
            input_file,
            self.config.output.output_dir.as_deref(),
            &self.config.output.suffix,
        )
    }

    /// Read and position a file without writing anything
    pub async fn render_file(&self, input_file: &Path) -> Result<ProcessedSubtitles> {
        let content = tokio::fs::read_to_string(input_file)
            .await
            .with_context(|| format!("Failed to read file: {:?}", input_file))?;

        let filename = input_file.to_string_lossy();
        let processed = self.processor
            .process(&content, &filename)
            .with_context(|| format!("Failed to process {}", input_file.display()))?;

        Ok(processed)
    }

    /// Position one file and write the result next to it (or into the output directory)
    pub async fn process_file(&self, input_file: &Path) -> Result<FileOutcome> {
        let output_path = self.output_path_for(input_file);
        if output_path == input_file {
            return Err(SubtitleError::OutputIsInput(output_path).into());
        }

        if FileManager::file_exists(&output_path) && !self.config.output.force_overwrite {
            warn!("Skipping {}, output already exists (use -f to force overwrite)", input_file.display());
            return Ok(FileOutcome::AlreadyExists(output_path));
        }

        let processed = self.render_file(input_file).await?;

        if let Some(parent) = output_path.parent() {
            FileManager::ensure_dir(parent)?;
        }
        tokio::fs::write(&output_path, &processed.content)
            .await
            .with_context(|| format!("Failed to write to file: {:?}", output_path))?;

        info!("Success: {} ({})", output_path.display(), processed);
        Ok(FileOutcome::Written { output: output_path, processed })
    }

    /// Process every input concurrently. One failing file never stops the others.
    pub async fn run(&self, inputs: &[PathBuf]) -> Result<BatchReport> {
        let start_time = std::time::Instant::now();
        let files = self.collect_inputs(inputs)?;

        if files.is_empty() {
            return Err(anyhow!("No subtitle files to process"));
        }

        let progress_bar = if files.len() > 1 {
            let pb = ProgressBar::new(files.len() as u64);
            let template_result = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(template_result.progress_chars("█▓▒░"));
            pb.set_message("Positioning");
            Some(pb)
        } else {
            None
        };

        let results = stream::iter(files)
            .map(|path| {
                let progress_bar = progress_bar.clone();
                async move {
                    let outcome = self.process_file(&path).await;
                    if let Some(pb) = &progress_bar {
                        pb.inc(1);
                    }
                    (path, outcome)
                }
            })
            .buffer_unordered(self.config.jobs.max(1))
            .collect::<Vec<_>>()
            .await;

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        let mut report = BatchReport::default();
        for (path, outcome) in results {
            match outcome {
                Ok(FileOutcome::Written { output, .. }) => report.written.push((path, output)),
                Ok(FileOutcome::AlreadyExists(_)) => report.skipped.push(path),
                Err(e) => {
                    error!("Error processing file {}: {:#}", path.display(), e);
                    report.failures.push((path, format!("{:#}", e)));
                }
            }
        }
        report.written.sort();
        report.skipped.sort();
        report.failures.sort();

        if report.total() > 1 || report.has_failures() {
            info!(
                "Completed in {}: {}",
                Self::format_duration(start_time.elapsed()),
                report.summary()
            );
        }

        Ok(report)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

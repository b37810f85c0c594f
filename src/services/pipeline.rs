use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use graymap::{
    EdgeOptions, EdgeStats, Encoding, FlatImagePolicy, Header, Image, OverflowPolicy, ReadOptions,
    ScaleOutcome,
};

use crate::error::AppError;
use crate::models::AppConfig;
use crate::services::preview::write_preview;

/// Which stages run and how they treat edge cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Stretch intensities before edge detection
    pub scale: bool,
    /// Run the edge detector
    pub detect_edges: bool,
    pub flat_image: FlatImagePolicy,
    pub overflow: OverflowPolicy,
    pub strict_body: bool,
    /// Output encoding override; `None` keeps the input's
    pub output_encoding: Option<Encoding>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            scale: false,
            detect_edges: true,
            flat_image: FlatImagePolicy::default(),
            overflow: OverflowPolicy::default(),
            strict_body: false,
            output_encoding: None,
        }
    }
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            scale: config.scale,
            detect_edges: true,
            flat_image: config.flat_image.into(),
            overflow: config.overflow.into(),
            strict_body: config.strict_body,
            output_encoding: config.output_encoding.map(Encoding::from),
        }
    }
}

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Header as read from the input
    pub input: Header,
    /// Header as written to the output
    pub output: Header,
    pub scale: Option<ScaleOutcome>,
    pub edges: Option<EdgeStats>,
}

/// Pipeline that orchestrates read → scale → detect → write
pub struct EdgePipeline {
    settings: PipelineSettings,
}

impl EdgePipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Read and validate an image file
    pub fn load(&self, path: &Path) -> Result<Image, AppError> {
        let file = File::open(path).map_err(|source| AppError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let options = ReadOptions::new().strict_body(self.settings.strict_body);
        let image = Image::read(&mut BufReader::new(file), &options).map_err(|source| {
            AppError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let header = image.header();
        tracing::info!(
            path = %path.display(),
            encoding = %header.encoding,
            width = header.width,
            height = header.height,
            max_intensity = header.max_intensity,
            "Read image"
        );
        if image.surplus() > 0 {
            tracing::warn!(
                path = %path.display(),
                surplus = image.surplus(),
                "Ignoring data after the declared pixel count"
            );
        }

        Ok(image)
    }

    /// Apply the enabled filter stages in place
    pub fn process(
        &self,
        image: &mut Image,
        path: &Path,
    ) -> Result<(Option<ScaleOutcome>, Option<EdgeStats>), AppError> {
        let to_process_error = |source| AppError::Process {
            path: path.to_path_buf(),
            source,
        };

        let scale = if self.settings.scale {
            let started = Instant::now();
            let outcome = image
                .scale(self.settings.flat_image)
                .map_err(to_process_error)?;
            match outcome {
                ScaleOutcome::Scaled { min, max } => {
                    tracing::info!(min, max, "Scaled intensities to 0..=255");
                }
                ScaleOutcome::Flat { value } => {
                    tracing::warn!(
                        value,
                        policy = ?self.settings.flat_image,
                        "Image is flat, range cannot be stretched"
                    );
                }
            }
            tracing::debug!(elapsed = ?started.elapsed(), "Scale stage done");
            Some(outcome)
        } else {
            None
        };

        let edges = if self.settings.detect_edges {
            let started = Instant::now();
            let options = EdgeOptions::new().overflow(self.settings.overflow);
            let stats = image.detect_edges(&options).map_err(to_process_error)?;
            tracing::info!(
                interior = stats.interior,
                peak = stats.peak,
                "Detected edges"
            );
            if stats.overflowed > 0 {
                tracing::warn!(
                    overflowed = stats.overflowed,
                    peak = stats.peak,
                    policy = ?self.settings.overflow,
                    "Gradient magnitudes exceeded 255"
                );
            }
            tracing::debug!(elapsed = ?started.elapsed(), "Edge stage done");
            Some(stats)
        } else {
            None
        };

        Ok((scale, edges))
    }

    /// Write an image, returning the header that was written
    pub fn save(&self, image: &Image, path: &Path) -> Result<Header, AppError> {
        let encoding = self
            .settings
            .output_encoding
            .unwrap_or(image.header().encoding);

        let file = File::create(path).map_err(|source| AppError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        if let Err(source) = image.write_as(&mut writer, encoding) {
            // Drop the writer first so nothing is flushed after removal
            drop(writer);
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!(path = %path.display(), %e, "Failed to remove partial output");
            }
            return Err(AppError::Write {
                path: path.to_path_buf(),
                source,
            });
        }

        let header = Header {
            encoding,
            ..*image.header()
        };
        tracing::info!(path = %path.display(), encoding = %encoding, "Wrote image");
        Ok(header)
    }

    /// Run every stage from `input` to `output`
    pub fn run(&self, input: &Path, output: &Path) -> Result<RunReport, AppError> {
        self.run_with_preview(input, output, None)
    }

    /// Like [`run`](Self::run), also writing the result as a PNG to `preview`
    pub fn run_with_preview(
        &self,
        input: &Path,
        output: &Path,
        preview: Option<&Path>,
    ) -> Result<RunReport, AppError> {
        let mut image = self.load(input)?;
        let input_header = *image.header();
        let (scale, edges) = self.process(&mut image, input)?;
        let output_header = self.save(&image, output)?;
        if let Some(path) = preview {
            write_preview(image.grid(), path)?;
        }

        Ok(RunReport {
            input: input_header,
            output: output_header,
            scale,
            edges,
        })
    }
}

// THEORY:
// The `median_pipeline` module drives the median filter exercise from a photo on disk to
// a set of filtered images ready to display or save.
//
// Stages:
// 1.  Load the photo as grayscale and resize it to a fixed width, keeping its aspect.
// 2.  Pad by reflection so neighbourhood filters have data at the edges.
// 3.  Run the library median blur at each configured size on the padded image, and the
//     hand-written filter at its size, then crop every result back to the resized size.
// 4.  Separately, run the library blur once on the unpadded image. That result is the
//     baseline the hand-written filter is shown next to.
//
// The padding is fixed by configuration and does not grow with the kernel, so only the
// outermost `border` pixels are guaranteed to come from mirrored data.

use crate::core_modules::blur::library_median_blur;
use crate::core_modules::border::{crop, pad_reflect_101};
use crate::core_modules::median::{median_filter_with_rank, MedianRank};
use crate::core_modules::resize::resize_to_width;
use crate::core_modules::utils::image_helper::{load_grayscale, save_gray};
use crate::error::Result;
use image::GrayImage;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for the median filter exercise.
#[derive(Debug, Clone)]
pub struct MedianDemoConfig {
    pub input_path: PathBuf,
    /// Width of the working copy. Height follows the source aspect ratio.
    pub target_width: u32,
    /// Pixels of reflected border added on every side before filtering.
    pub border: u32,
    /// Library median sizes run on the padded image.
    pub library_sizes: Vec<u32>,
    /// Library median size run on the unpadded image.
    pub unpadded_library_size: u32,
    /// Hand-written median size run on the padded image.
    pub custom_size: u32,
    pub custom_rank: MedianRank,
    /// When set, `run` writes every result into this directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for MedianDemoConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("./img/in.jpg"),
            target_width: 800,
            border: 1,
            library_sizes: vec![5, 11, 21],
            unpadded_library_size: 3,
            custom_size: 3,
            custom_rank: MedianRank::Upper,
            output_dir: None,
        }
    }
}

/// Everything one run of the exercise produced.
#[derive(Debug, Clone)]
pub struct MedianDemoReport {
    pub resized: GrayImage,
    pub unpadded_library_size: u32,
    /// Library blur of the unpadded image.
    pub library_unpadded: GrayImage,
    /// Library blur per kernel size, cropped back to `resized` dimensions.
    pub library: BTreeMap<u32, GrayImage>,
    pub custom_size: u32,
    /// Hand-written filter, cropped back to `resized` dimensions.
    pub custom: GrayImage,
}

impl MedianDemoReport {
    /// Writes `out<size>.png` per library blur, `out<size>.png` for the unpadded
    /// baseline, and `myout<size>.png` for the hand-written filter.
    pub fn write_outputs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        let mut write = |name: String, image: &GrayImage| -> Result<()> {
            let path = dir.join(name);
            save_gray(&path, image)?;
            info!(path = %path.display(), "wrote output");
            written.push(path);
            Ok(())
        };

        for (size, image) in &self.library {
            write(format!("out{size}.png"), image)?;
        }
        if !self.library.contains_key(&self.unpadded_library_size) {
            write(format!("out{}.png", self.unpadded_library_size), &self.library_unpadded)?;
        }
        write(format!("myout{}.png", self.custom_size), &self.custom)?;
        Ok(written)
    }
}

pub struct MedianDemo {
    config: MedianDemoConfig,
}

impl MedianDemo {
    pub fn new(config: MedianDemoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MedianDemoConfig {
        &self.config
    }

    /// Loads the configured input, runs the exercise, and writes outputs if configured.
    pub fn run(&self) -> Result<MedianDemoReport> {
        let source = load_grayscale(&self.config.input_path)?;
        info!(
            path = %self.config.input_path.display(),
            width = source.width(),
            height = source.height(),
            "loaded input"
        );
        let report = self.run_on(&source)?;
        if let Some(dir) = &self.config.output_dir {
            report.write_outputs(dir)?;
        }
        Ok(report)
    }

    /// Runs the exercise on an already loaded grayscale image.
    pub fn run_on(&self, source: &GrayImage) -> Result<MedianDemoReport> {
        let cfg = &self.config;

        // Stage 1: Working copy
        let resized = resize_to_width(source, cfg.target_width)?;
        let (width, height) = resized.dimensions();
        debug!(width, height, "resized input");

        // Stage 2: Border extension
        let b = cfg.border;
        let extended = pad_reflect_101(&resized, b, b, b, b);

        // Stage 3: Library and hand-written filters on the padded copy
        let mut library = BTreeMap::new();
        for &size in &cfg.library_sizes {
            debug!(size, "library median blur");
            let blurred = library_median_blur(&extended, size)?;
            library.insert(size, crop(&blurred, b, b, width, height)?);
        }

        debug!(size = cfg.custom_size, rank = ?cfg.custom_rank, "hand-written median filter");
        let custom_extended = median_filter_with_rank(&extended, cfg.custom_size, cfg.custom_rank)?;
        let custom = crop(&custom_extended, b, b, width, height)?;

        // Stage 4: Baseline on the unpadded copy
        let library_unpadded = library_median_blur(&resized, cfg.unpadded_library_size)?;

        Ok(MedianDemoReport {
            resized,
            unpadded_library_size: cfg.unpadded_library_size,
            library_unpadded,
            library,
            custom_size: cfg.custom_size,
            custom,
        })
    }
}

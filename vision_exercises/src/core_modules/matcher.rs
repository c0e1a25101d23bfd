// THEORY:
// The matcher searches for a template that may appear at any of a fixed set of
// orientations. It does not estimate orientation; it simply tries each one:
// rotate the template, score every placement, keep the best.
//
// Every angle reports exactly one detection and draws exactly one box, however weak its
// best score is. There is no threshold and no suppression of overlapping boxes. Looking
// at which boxes land on the right tile is the point of the exercise.

use crate::core_modules::annotate::{draw_box, to_rgb};
use crate::core_modules::correlation::{best_match, match_template, MatchMethod};
use crate::core_modules::rotation::rotate_about_center;
use crate::error::{Error, Result};
use image::{GrayImage, Rgb, RgbImage};
use tracing::debug;

/// Best placement found for one template orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub angle_degrees: f32,
    /// Top-left corner of the matched window in the searched image.
    pub location: (u32, u32),
    pub width: u32,
    pub height: u32,
    pub score: f32,
}

/// Search parameters.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub rotations: u32,
    pub method: MatchMethod,
    pub box_color: Rgb<u8>,
    pub box_thickness: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            rotations: 15,
            method: MatchMethod::CorrelationCoefficientNormed,
            box_color: Rgb([255, 0, 0]),
            box_thickness: 2,
        }
    }
}

pub struct RotationMatcher {
    config: MatcherConfig,
}

impl RotationMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// The orientations tried, in degrees: `0, step, 2 * step, ...` below 360.
    pub fn angles(&self) -> Vec<f32> {
        let step = 360.0 / self.config.rotations as f32;
        (0..self.config.rotations).map(|i| step * i as f32).collect()
    }

    /// Best placement of `template` at every orientation.
    pub fn detect(&self, image: &GrayImage, template: &GrayImage) -> Result<Vec<Detection>> {
        if self.config.rotations == 0 {
            return Err(Error::InvalidParameter {
                name: "rotations".into(),
                reason: "must be positive".into(),
            });
        }
        self.angles()
            .into_iter()
            .map(|angle| -> Result<Detection> {
                let rotated = rotate_about_center(template, angle);
                let scores = match_template(image, &rotated, self.config.method)?;
                let (location, score) = best_match(&scores);
                debug!(angle, x = location.0, y = location.1, score, "best placement");
                Ok(Detection {
                    angle_degrees: angle,
                    location,
                    width: rotated.width(),
                    height: rotated.height(),
                    score,
                })
            })
            .collect()
    }

    /// Colour copy of `image` with one box per detection.
    pub fn annotate(&self, image: &GrayImage, detections: &[Detection]) -> RgbImage {
        let mut out = to_rgb(image);
        for d in detections {
            draw_box(
                &mut out,
                d.location.0,
                d.location.1,
                d.width,
                d.height,
                self.config.box_color,
                self.config.box_thickness,
            );
        }
        out
    }

    /// Detects at every orientation and draws the result.
    pub fn analyze(&self, image: &GrayImage, template: &GrayImage) -> Result<(RgbImage, Vec<Detection>)> {
        let detections = self.detect(image, template)?;
        let annotated = self.annotate(image, &detections);
        Ok((annotated, detections))
    }
}

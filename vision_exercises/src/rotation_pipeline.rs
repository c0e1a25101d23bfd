// THEORY:
// The `rotation_pipeline` module drives the rotation matching exercise: from a template on
// disk, build a scene that contains the template at every search angle, then search that
// scene for the template at every angle and draw what was found.
//
// Scene synthesis and search share the same angle step, so every search angle has
// exactly one tile in the scene that it should land on.

use crate::core_modules::correlation::MatchMethod;
use crate::core_modules::matcher::{Detection, MatcherConfig, RotationMatcher};
use crate::core_modules::tiling::{synthesize_rotated_tiles, SynthesisConfig};
use crate::core_modules::utils::image_helper::{load_grayscale, save_gray, save_rgb};
use crate::error::Result;
use image::{GrayImage, Rgb, RgbImage};
use std::path::PathBuf;
use tracing::{debug, info};

/// Configuration for the rotation matching exercise.
#[derive(Debug, Clone)]
pub struct RotationMatchConfig {
    pub template_path: PathBuf,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Number of evenly spaced angles, used both for the scene and the search.
    pub rotations: u32,
    pub columns: u32,
    pub rows: u32,
    pub method: MatchMethod,
    pub box_color: Rgb<u8>,
    pub box_thickness: u32,
    /// Where the synthesized scene is written.
    pub scene_output: PathBuf,
    /// Where the annotated result is written.
    pub result_output: PathBuf,
    pub write_outputs: bool,
}

impl Default for RotationMatchConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("../img/kadai8/template.png"),
            canvas_width: 800,
            canvas_height: 450,
            rotations: 15,
            columns: 5,
            rows: 3,
            method: MatchMethod::CorrelationCoefficientNormed,
            box_color: Rgb([255, 0, 0]),
            box_thickness: 2,
            scene_output: PathBuf::from("../img/kadai8/in.png"),
            result_output: PathBuf::from("../img/kadai8/out.png"),
            write_outputs: true,
        }
    }
}

impl RotationMatchConfig {
    pub fn synthesis(&self) -> SynthesisConfig {
        SynthesisConfig {
            rotations: self.rotations,
            columns: self.columns,
            rows: self.rows,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
        }
    }

    pub fn matcher(&self) -> MatcherConfig {
        MatcherConfig {
            rotations: self.rotations,
            method: self.method,
            box_color: self.box_color,
            box_thickness: self.box_thickness,
        }
    }
}

/// Everything one run of the exercise produced.
#[derive(Debug, Clone)]
pub struct RotationMatchReport {
    pub template: GrayImage,
    pub synthesized: GrayImage,
    pub annotated: RgbImage,
    pub detections: Vec<Detection>,
}

pub struct RotationDemo {
    config: RotationMatchConfig,
}

impl RotationDemo {
    pub fn new(config: RotationMatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RotationMatchConfig {
        &self.config
    }

    /// Loads the configured template, runs the exercise, and writes outputs if configured.
    pub fn run(&self) -> Result<RotationMatchReport> {
        let template = load_grayscale(&self.config.template_path)?;
        info!(
            path = %self.config.template_path.display(),
            width = template.width(),
            height = template.height(),
            "loaded template"
        );
        let report = self.run_on(template)?;
        if self.config.write_outputs {
            save_gray(&self.config.scene_output, &report.synthesized)?;
            info!(path = %self.config.scene_output.display(), "wrote synthesized scene");
            save_rgb(&self.config.result_output, &report.annotated)?;
            info!(path = %self.config.result_output.display(), "wrote annotated result");
        }
        Ok(report)
    }

    /// Runs the exercise on an already loaded template.
    pub fn run_on(&self, template: GrayImage) -> Result<RotationMatchReport> {
        // Stage 1: Scene synthesis
        let synthesized = synthesize_rotated_tiles(&template, &self.config.synthesis())?;
        debug!(
            width = synthesized.width(),
            height = synthesized.height(),
            "synthesized scene"
        );

        // Stage 2: Search at every angle
        let matcher = RotationMatcher::new(self.config.matcher());
        let (annotated, detections) = matcher.analyze(&synthesized, &template)?;
        info!(detections = detections.len(), "matched template at every angle");

        Ok(RotationMatchReport {
            template,
            synthesized,
            annotated,
            detections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_exercise() {
        let cfg = RotationMatchConfig::default();
        assert_eq!((cfg.canvas_width, cfg.canvas_height), (800, 450));
        assert_eq!((cfg.rotations, cfg.columns, cfg.rows), (15, 5, 3));
        assert_eq!(cfg.box_color, Rgb([255, 0, 0]));
        assert_eq!(cfg.box_thickness, 2);
        assert_eq!(cfg.template_path, PathBuf::from("../img/kadai8/template.png"));
        assert!(cfg.write_outputs);
    }

    #[test]
    fn derived_configs_share_the_angle_count() {
        let cfg = RotationMatchConfig {
            rotations: 6,
            columns: 3,
            rows: 2,
            ..RotationMatchConfig::default()
        };
        assert_eq!(cfg.synthesis().rotations, 6);
        assert_eq!(cfg.matcher().rotations, 6);
        assert!((cfg.synthesis().angle_step() - 60.0).abs() < 1e-5);
    }
}

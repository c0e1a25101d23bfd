use image::{GrayImage, Luma, Rgb};
use std::path::PathBuf;
use vision_exercises::core_modules::tiling::TILE_ROW_ORDER;
use vision_exercises::core_modules::utils::image_helper::{load_grayscale, save_gray};
use vision_exercises::{
    Error, MedianDemo, MedianDemoConfig, RotationDemo, RotationMatchConfig,
};

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vision_exercises_it_{}_{name}", std::process::id()))
}

fn marker_template() -> GrayImage {
    GrayImage::from_fn(24, 24, |x, y| {
        if (8..16).contains(&x) && (10..12).contains(&y) {
            Luma([220])
        } else if (13..15).contains(&x) && (13..17).contains(&y) {
            Luma([150])
        } else {
            Luma([40])
        }
    })
}

fn small_rotation_config(dir: &PathBuf) -> RotationMatchConfig {
    RotationMatchConfig {
        template_path: dir.join("template.png"),
        canvas_width: 200,
        canvas_height: 100,
        scene_output: dir.join("in.png"),
        result_output: dir.join("out.png"),
        ..RotationMatchConfig::default()
    }
}

#[test]
fn every_angle_lands_on_its_own_tile() {
    let dir = scratch_dir("tiles");
    let report = RotationDemo::new(small_rotation_config(&dir))
        .run_on(marker_template())
        .unwrap();

    // 120 x 72 tiles centred on 200 x 100: 40 px left, 14 px top.
    assert_eq!(report.synthesized.dimensions(), (200, 100));
    assert_eq!(report.detections.len(), 15);

    for (i, detection) in report.detections.iter().enumerate() {
        let block = i / 5;
        let col = (i % 5) as u32;
        let row = TILE_ROW_ORDER.iter().position(|&b| b == block).unwrap() as u32;
        assert_eq!(
            detection.location,
            (40 + col * 24, 14 + row * 24),
            "angle {}",
            detection.angle_degrees
        );
        assert!(detection.score > 0.99, "angle {} scored {}", detection.angle_degrees, detection.score);
    }

    assert_eq!(*report.annotated.get_pixel(40, 14), Rgb([255, 0, 0]));
    assert_eq!(*report.annotated.get_pixel(0, 0), Rgb([0, 0, 0]));
}

#[test]
fn rotation_run_reads_template_and_writes_both_outputs() {
    let dir = scratch_dir("rotation_io");
    save_gray(dir.join("template.png"), &marker_template()).unwrap();

    let cfg = small_rotation_config(&dir);
    let report = RotationDemo::new(cfg.clone()).run().unwrap();

    assert_eq!(load_grayscale(&cfg.scene_output).unwrap(), report.synthesized);
    let annotated = image::open(&cfg.result_output).unwrap().to_rgb8();
    assert_eq!(annotated, report.annotated);
}

#[test]
fn missing_input_is_a_load_failure() {
    let cfg = MedianDemoConfig {
        input_path: scratch_dir("missing").join("in.jpg"),
        ..MedianDemoConfig::default()
    };
    let err = MedianDemo::new(cfg).run().unwrap_err();
    assert!(matches!(err, Error::ImageLoad { .. }));
    assert!(err.is_load_failure());
}

#[test]
fn median_run_writes_every_result() {
    let dir = scratch_dir("median_io");
    let source = GrayImage::from_fn(64, 48, |x, y| Luma([((x * 7 + y * 3) % 200) as u8]));
    save_gray(dir.join("in.png"), &source).unwrap();

    let cfg = MedianDemoConfig {
        input_path: dir.join("in.png"),
        target_width: 32,
        output_dir: Some(dir.join("out")),
        ..MedianDemoConfig::default()
    };
    let report = MedianDemo::new(cfg).run().unwrap();
    assert_eq!(report.resized.dimensions(), (32, 24));

    for name in ["out3.png", "out5.png", "out11.png", "out21.png", "myout3.png"] {
        let written = load_grayscale(dir.join("out").join(name)).unwrap();
        assert_eq!(written.dimensions(), (32, 24), "{name}");
    }
    assert_eq!(load_grayscale(dir.join("out").join("myout3.png")).unwrap(), report.custom);
}

// THEORY:
// Detections are shown by drawing boxes onto a colour copy of the grayscale scene.
// `imageproc` draws one-pixel outlines; a thicker box is a stack of outlines, each one
// pixel further inside the previous.

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Colour copy of a grayscale image, ready for coloured annotations.
pub fn to_rgb(gray: &GrayImage) -> RgbImage {
    DynamicImage::ImageLuma8(gray.clone()).to_rgb8()
}

/// Draws a `width x height` outline with its top-left corner at `(x, y)`.
pub fn draw_box(
    canvas: &mut RgbImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: Rgb<u8>,
    thickness: u32,
) {
    for inset in 0..thickness {
        let Some(w) = width.checked_sub(2 * inset).filter(|w| *w > 0) else {
            break;
        };
        let Some(h) = height.checked_sub(2 * inset).filter(|h| *h > 0) else {
            break;
        };
        let rect = Rect::at((x + inset) as i32, (y + inset) as i32).of_size(w, h);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

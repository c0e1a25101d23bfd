// THEORY:
// Neighbourhood filters need pixels that do not exist past the image edge. Rather than
// teaching every filter about edges, the median exercise extends the image up front and
// crops the result back afterwards. This module owns both halves of that round trip.
//
// - `pad_reflect_101` mirrors interior pixels without repeating the edge pixel
//   (`gfedcb|abcdefgh|gfedcba`). It is the padding fed to both median filters.
// - `pad_constant` fills the new band with one value. The rotation exercise uses it to
//   centre the tiled template on a black canvas.
// - `crop` cuts a rectangle back out and refuses rectangles that leave the image.

use crate::error::{Error, Result};
use image::{GrayImage, Luma};

/// Maps a possibly out-of-range coordinate back into `0..len` by reflect-101.
fn reflect_101(coord: i64, len: u32) -> u32 {
    let n = i64::from(len);
    if n == 1 {
        return 0;
    }
    let period = 2 * n - 2;
    let mut c = coord % period;
    if c < 0 {
        c += period;
    }
    if c >= n {
        c = period - c;
    }
    c as u32
}

/// Extends `image` on each side, mirroring interior pixels about the edge pixel.
///
/// An empty image is returned unchanged in content, as there is nothing to mirror.
pub fn pad_reflect_101(image: &GrayImage, top: u32, bottom: u32, left: u32, right: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return GrayImage::new(width + left + right, height + top + bottom);
    }
    GrayImage::from_fn(width + left + right, height + top + bottom, |x, y| {
        let sx = reflect_101(i64::from(x) - i64::from(left), width);
        let sy = reflect_101(i64::from(y) - i64::from(top), height);
        *image.get_pixel(sx, sy)
    })
}

/// Extends `image` on each side with a constant intensity.
pub fn pad_constant(
    image: &GrayImage,
    top: u32,
    bottom: u32,
    left: u32,
    right: u32,
    value: u8,
) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::from_pixel(width + left + right, height + top + bottom, Luma([value]));
    image::imageops::replace(&mut out, image, i64::from(left), i64::from(top));
    out
}

/// Copies the `width x height` rectangle whose top-left corner is `(x, y)`.
pub fn crop(image: &GrayImage, x: u32, y: u32, width: u32, height: u32) -> Result<GrayImage> {
    let (image_width, image_height) = image.dimensions();
    let fits_x = x.checked_add(width).is_some_and(|r| r <= image_width);
    let fits_y = y.checked_add(height).is_some_and(|b| b <= image_height);
    if !fits_x || !fits_y {
        return Err(Error::RegionOutOfBounds {
            x,
            y,
            width,
            height,
            image_width,
            image_height,
        });
    }
    Ok(image::imageops::crop_imm(image, x, y, width, height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[u8]) -> GrayImage {
        GrayImage::from_raw(values.len() as u32, 1, values.to_vec()).unwrap()
    }

    #[test]
    fn reflect_101_skips_the_edge_pixel() {
        let img = row(&[1, 2, 3, 4]);
        let padded = pad_reflect_101(&img, 0, 0, 2, 2);
        assert_eq!(padded.as_raw(), &vec![3, 2, 1, 2, 3, 4, 3, 2]);
    }

    #[test]
    fn reflect_101_single_pixel_border_in_both_axes() {
        let img = GrayImage::from_fn(3, 3, |x, y| Luma([(y * 3 + x) as u8]));
        let padded = pad_reflect_101(&img, 1, 1, 1, 1);
        assert_eq!(padded.dimensions(), (5, 5));
        // Corner mirrors diagonally to (1, 1) of the source.
        assert_eq!(padded.get_pixel(0, 0)[0], 4);
        assert_eq!(padded.get_pixel(4, 0)[0], 4);
        // Top edge mirrors row 1.
        assert_eq!(padded.get_pixel(2, 0)[0], 4);
        assert_eq!(padded.get_pixel(1, 0)[0], 3);
        // Interior is the source.
        assert_eq!(padded.get_pixel(1, 1)[0], 0);
        assert_eq!(padded.get_pixel(3, 3)[0], 8);
    }

    #[test]
    fn reflect_101_wraps_wide_borders() {
        assert_eq!(reflect_101(-5, 3), 1);
        assert_eq!(reflect_101(7, 3), 1);
        assert_eq!(reflect_101(-3, 1), 0);
    }

    #[test]
    fn constant_padding_surrounds_the_source() {
        let img = GrayImage::from_pixel(2, 1, Luma([9]));
        let padded = pad_constant(&img, 1, 2, 3, 0, 0);
        assert_eq!(padded.dimensions(), (5, 4));
        assert_eq!(padded.get_pixel(3, 1)[0], 9);
        assert_eq!(padded.get_pixel(4, 1)[0], 9);
        assert_eq!(padded.get_pixel(2, 1)[0], 0);
        assert_eq!(padded.get_pixel(3, 0)[0], 0);
        assert_eq!(padded.get_pixel(3, 2)[0], 0);
    }

    #[test]
    fn crop_undoes_padding() {
        let img = GrayImage::from_fn(6, 4, |x, y| Luma([(x + 10 * y) as u8]));
        let padded = pad_reflect_101(&img, 1, 1, 1, 1);
        let back = crop(&padded, 1, 1, 6, 4).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn crop_rejects_regions_past_the_edge() {
        let img = GrayImage::new(4, 4);
        assert!(matches!(crop(&img, 1, 1, 4, 2), Err(Error::RegionOutOfBounds { .. })));
        assert!(matches!(crop(&img, 0, 3, 1, 2), Err(Error::RegionOutOfBounds { .. })));
        assert!(crop(&img, 0, 0, 4, 4).is_ok());
    }
}

// THEORY:
// The `median` module holds the one piece of hand-written filtering in this crate.
// Every other stage leans on `image`/`imageproc`; this one walks the pixels itself so
// its output can be compared side by side with the library median blur.
//
// Key architectural principles:
// 1.  **Interior only**: A pixel is filtered only when its whole k x k neighbourhood
//     lies inside the image. The band of `k / 2` pixels along each edge is never
//     computed and stays zero. Callers pad first (see `border::pad_reflect_101`)
//     and crop afterwards, so the band never reaches the final picture.
// 2.  **Single scratch buffer**: The neighbourhood is gathered into one `Vec<u8>` of
//     length k^2 that is reused for every pixel, sorted, and indexed.
// 3.  **Rank selection**: The classic exercise picks element `k^2 / 2 + 1` of the
//     sorted window, one above the statistical median. That choice is kept as the
//     default (`MedianRank::Upper`) so results line up with the reference output;
//     `MedianRank::Middle` gives the textbook median.

use crate::error::{Error, Result};
use image::GrayImage;

/// Which element of the sorted neighbourhood becomes the output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MedianRank {
    /// Index `len / 2 + 1`.
    #[default]
    Upper,
    /// Index `len / 2`, the statistical median for odd windows.
    Middle,
}

impl MedianRank {
    fn index(self, len: usize) -> usize {
        match self {
            MedianRank::Upper => len / 2 + 1,
            MedianRank::Middle => len / 2,
        }
    }
}

/// Median filter using the default `MedianRank::Upper` selection.
pub fn median_filter(input: &GrayImage, filter_size: u32) -> Result<GrayImage> {
    median_filter_with_rank(input, filter_size, MedianRank::default())
}

/// Replaces every interior pixel with the `rank` element of its sorted
/// `filter_size x filter_size` neighbourhood.
///
/// A `filter_size` of 0 or 1 returns a copy of `input`. Even sizes are rejected.
pub fn median_filter_with_rank(
    input: &GrayImage,
    filter_size: u32,
    rank: MedianRank,
) -> Result<GrayImage> {
    if filter_size <= 1 {
        return Ok(input.clone());
    }
    if filter_size % 2 == 0 {
        return Err(Error::EvenKernel { size: filter_size });
    }

    let (width, height) = input.dimensions();
    let affect_area = filter_size / 2;
    let mut out = GrayImage::new(width, height);

    if width < filter_size || height < filter_size {
        return Ok(out);
    }

    let mut neighbourhood = vec![0u8; (filter_size * filter_size) as usize];
    let pick = rank.index(neighbourhood.len());

    for y in affect_area..height - affect_area {
        for x in affect_area..width - affect_area {
            let mut count = 0;
            for py in y - affect_area..=y + affect_area {
                for px in x - affect_area..=x + affect_area {
                    neighbourhood[count] = input.get_pixel(px, py)[0];
                    count += 1;
                }
            }
            neighbourhood.sort_unstable();
            out.get_pixel_mut(x, y)[0] = neighbourhood[pick];
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([(x * 37 + y * 11) as u8 % 251]))
    }

    fn reference(input: &GrayImage, x: u32, y: u32, size: u32, rank: MedianRank) -> u8 {
        let r = size / 2;
        let mut values = Vec::new();
        for py in y - r..=y + r {
            for px in x - r..=x + r {
                values.push(input.get_pixel(px, py)[0]);
            }
        }
        values.sort();
        values[rank.index(values.len())]
    }

    #[test]
    fn size_one_or_less_is_identity() {
        let img = gradient(7, 4);
        assert_eq!(median_filter(&img, 1).unwrap(), img);
        assert_eq!(median_filter(&img, 0).unwrap(), img);
    }

    #[test]
    fn even_size_is_rejected() {
        let img = gradient(5, 5);
        for size in [2, 4, 10] {
            match median_filter(&img, size) {
                Err(Error::EvenKernel { size: s }) => assert_eq!(s, size),
                other => panic!("expected EvenKernel, got {other:?}"),
            }
        }
    }

    #[test]
    fn interior_matches_brute_force_on_gradient() {
        let img = GrayImage::from_fn(5, 5, |x, y| Luma([(x * 10 + y * 3) as u8]));
        for rank in [MedianRank::Upper, MedianRank::Middle] {
            let out = median_filter_with_rank(&img, 3, rank).unwrap();
            for y in 1..4 {
                for x in 1..4 {
                    assert_eq!(out.get_pixel(x, y)[0], reference(&img, x, y, 3, rank));
                }
            }
        }
    }

    #[test]
    fn interior_matches_brute_force_on_larger_kernel() {
        let img = gradient(12, 9);
        let out = median_filter_with_rank(&img, 5, MedianRank::Middle).unwrap();
        for y in 2..7 {
            for x in 2..10 {
                assert_eq!(out.get_pixel(x, y)[0], reference(&img, x, y, 5, MedianRank::Middle));
            }
        }
    }

    #[test]
    fn border_band_is_left_zero() {
        let img = GrayImage::from_pixel(6, 6, Luma([90]));
        let out = median_filter(&img, 3).unwrap();
        for i in 0..6 {
            assert_eq!(out.get_pixel(i, 0)[0], 0);
            assert_eq!(out.get_pixel(0, i)[0], 0);
            assert_eq!(out.get_pixel(i, 5)[0], 0);
            assert_eq!(out.get_pixel(5, i)[0], 0);
        }
        assert_eq!(out.get_pixel(2, 3)[0], 90);
    }

    #[test]
    fn isolated_bright_pixel_is_suppressed() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([40]));
        img.put_pixel(4, 4, Luma([255]));
        let out = median_filter(&img, 3).unwrap();
        for y in 1..8 {
            for x in 1..8 {
                assert_eq!(out.get_pixel(x, y)[0], 40, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn upper_rank_sits_one_above_the_median() {
        // 3x3 window holding 0..=8: middle is 4, upper is 5.
        let img = GrayImage::from_fn(3, 3, |x, y| Luma([(y * 3 + x) as u8]));
        let upper = median_filter_with_rank(&img, 3, MedianRank::Upper).unwrap();
        let middle = median_filter_with_rank(&img, 3, MedianRank::Middle).unwrap();
        assert_eq!(upper.get_pixel(1, 1)[0], 5);
        assert_eq!(middle.get_pixel(1, 1)[0], 4);
    }

    #[test]
    fn image_smaller_than_kernel_yields_blank_output() {
        let img = GrayImage::from_pixel(2, 4, Luma([200]));
        let out = median_filter(&img, 3).unwrap();
        assert_eq!(out.dimensions(), (2, 4));
        assert!(out.pixels().all(|p| p[0] == 0));
    }
}

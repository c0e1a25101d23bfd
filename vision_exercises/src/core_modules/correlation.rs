// THEORY:
// Template matching slides a template over an image and scores every placement. The
// rotation exercise scores with the normalized correlation coefficient: both the window
// and the template have their mean removed and are divided by their spread, so the score
// lands in [-1, 1] and does not care about overall brightness or contrast.
//
// `imageproc` already ships plain normalized cross-correlation, which is exposed as the
// alternative method. The coefficient variant is computed here: window sums and sums of
// squares come from summed-area tables, so only the cross term needs the full
// template-sized inner loop.
//
// Windows with no variance (for instance the black padding around the tiled scene)
// score 0.

use crate::error::{Error, Result};
use image::{GrayImage, ImageBuffer, Luma};
use imageproc::template_matching::{find_extremes, MatchTemplateMethod};

/// One score per template placement, `(W - w + 1) x (H - h + 1)`.
pub type ScoreMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// How a placement is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMethod {
    /// Mean-subtracted, variance-normalized correlation.
    #[default]
    CorrelationCoefficientNormed,
    /// Raw correlation divided by the product of the L2 norms.
    CrossCorrelationNormed,
}

/// Scores every placement of `template` inside `image`.
pub fn match_template(image: &GrayImage, template: &GrayImage, method: MatchMethod) -> Result<ScoreMap> {
    let (image_width, image_height) = image.dimensions();
    let (template_width, template_height) = template.dimensions();

    if template_width == 0 || template_height == 0 {
        return Err(Error::EmptyImage);
    }
    if template_width > image_width || template_height > image_height {
        return Err(Error::TemplateTooLarge {
            template_width,
            template_height,
            image_width,
            image_height,
        });
    }

    Ok(match method {
        MatchMethod::CorrelationCoefficientNormed => correlation_coefficient_normed(image, template),
        MatchMethod::CrossCorrelationNormed => imageproc::template_matching::match_template(
            image,
            template,
            MatchTemplateMethod::CrossCorrelationNormalized,
        ),
    })
}

/// Location and value of the highest score. Ties resolve to the first in row-major order.
pub fn best_match(scores: &ScoreMap) -> ((u32, u32), f32) {
    let extremes = find_extremes(scores);
    (extremes.max_value_location, extremes.max_value)
}

/// Summed-area table with a zero first row and column: `(w + 1) x (h + 1)` entries.
struct SummedArea {
    stride: usize,
    sums: Vec<u64>,
    squares: Vec<u64>,
}

impl SummedArea {
    fn new(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        let stride = width as usize + 1;
        let mut sums = vec![0u64; stride * (height as usize + 1)];
        let mut squares = vec![0u64; sums.len()];
        for y in 0..height as usize {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for x in 0..width as usize {
                let v = u64::from(image.get_pixel(x as u32, y as u32)[0]);
                row_sum += v;
                row_sq += v * v;
                let at = (y + 1) * stride + x + 1;
                sums[at] = sums[at - stride] + row_sum;
                squares[at] = squares[at - stride] + row_sq;
            }
        }
        Self { stride, sums, squares }
    }

    fn window(table: &[u64], stride: usize, x: usize, y: usize, w: usize, h: usize) -> u64 {
        let top_left = y * stride + x;
        let top_right = top_left + w;
        let bottom_left = (y + h) * stride + x;
        let bottom_right = bottom_left + w;
        table[bottom_right] + table[top_left] - table[top_right] - table[bottom_left]
    }

    fn sum(&self, x: usize, y: usize, w: usize, h: usize) -> u64 {
        Self::window(&self.sums, self.stride, x, y, w, h)
    }

    fn sum_squares(&self, x: usize, y: usize, w: usize, h: usize) -> u64 {
        Self::window(&self.squares, self.stride, x, y, w, h)
    }
}

fn correlation_coefficient_normed(image: &GrayImage, template: &GrayImage) -> ScoreMap {
    let (image_width, image_height) = image.dimensions();
    let (tw, th) = (template.width() as usize, template.height() as usize);
    let n = (tw * th) as f64;

    let t_raw = template.as_raw();
    let t_mean = t_raw.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let centred: Vec<f64> = t_raw.iter().map(|&v| f64::from(v) - t_mean).collect();
    let t_var_sum: f64 = centred.iter().map(|d| d * d).sum();

    let table = SummedArea::new(image);
    let i_raw = image.as_raw();
    let i_stride = image_width as usize;

    let out_w = image_width - template.width() + 1;
    let out_h = image_height - template.height() + 1;

    ImageBuffer::from_fn(out_w, out_h, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let sum = table.sum(x, y, tw, th) as f64;
        let sum_sq = table.sum_squares(x, y, tw, th) as f64;
        let i_var_sum = (sum_sq - sum * sum / n).max(0.0);
        let denom = (i_var_sum * t_var_sum).sqrt();
        if denom <= f64::EPSILON {
            return Luma([0.0]);
        }

        // The template is centred, so the window mean drops out of the cross term.
        let mut cross = 0.0f64;
        for j in 0..th {
            let row = &i_raw[(y + j) * i_stride + x..(y + j) * i_stride + x + tw];
            let t_row = &centred[j * tw..(j + 1) * tw];
            cross += row.iter().zip(t_row).map(|(&iv, &tv)| f64::from(iv) * tv).sum::<f64>();
        }
        Luma([(cross / denom).clamp(-1.0, 1.0) as f32])
    })
}

// THEORY:
// Both halves of the rotation exercise spin the template about its own centre: once to
// build the synthetic scene, and once per search angle while matching. The geometry is
// the familiar 2x3 rotation matrix (positive angles turn counter-clockwise on screen).
//
// Resampling walks the destination pixels, maps each one back through the inverted
// matrix and blends the four nearest source pixels. Neighbours that fall outside the
// source count as black, so edge pixels blend towards black instead of vanishing and a
// 0 degree rotation returns the input unchanged.
//
// The output keeps the template's size, so corners that swing outside are cut off and
// corners that swing in from nowhere are black. The rotated copies are tiled edge to
// edge and matched with a template-sized window, so that is the size both callers want.

use image::{GrayImage, Luma};

/// Row-major 2x3 affine matrix `[a, b, c, d, e, f]` mapping `(x, y)` to
/// `(a x + b y + c, d x + e y + f)`.
pub type Affine = [f32; 6];

/// The matrix that rotates by `degrees` about `center` and scales by `scale`.
pub fn rotation_matrix(center: (f32, f32), degrees: f32, scale: f32) -> Affine {
    let (cx, cy) = center;
    let radians = degrees.to_radians();
    let alpha = scale * radians.cos();
    let beta = scale * radians.sin();
    [
        alpha,
        beta,
        (1.0 - alpha) * cx - beta * cy,
        -beta,
        alpha,
        beta * cx + (1.0 - alpha) * cy,
    ]
}

/// Applies `matrix` to the point `(x, y)`.
pub fn transform_point(matrix: &Affine, x: f32, y: f32) -> (f32, f32) {
    (
        matrix[0] * x + matrix[1] * y + matrix[2],
        matrix[3] * x + matrix[4] * y + matrix[5],
    )
}

/// Inverse of an affine matrix, or `None` when it is singular.
pub fn invert(matrix: &Affine) -> Option<Affine> {
    let [a, b, c, d, e, f] = *matrix;
    let det = a * e - b * d;
    if det.abs() <= f32::EPSILON || !det.is_finite() {
        return None;
    }
    let ia = e / det;
    let ib = -b / det;
    let id = -d / det;
    let ie = a / det;
    Some([ia, ib, -(ia * c + ib * f), id, ie, -(id * c + ie * f)])
}

/// Bilinear sample at `(x, y)`; neighbours outside the image contribute black.
fn sample_bilinear(image: &GrayImage, x: f32, y: f32) -> f32 {
    let (width, height) = image.dimensions();
    let left = x.floor();
    let top = y.floor();
    let fx = x - left;
    let fy = y - top;

    let value = |px: f32, py: f32| -> f32 {
        if px < 0.0 || py < 0.0 || px >= width as f32 || py >= height as f32 {
            0.0
        } else {
            f32::from(image.get_pixel(px as u32, py as u32)[0])
        }
    };

    let top_row = value(left, top) * (1.0 - fx) + value(left + 1.0, top) * fx;
    let bottom_row = value(left, top + 1.0) * (1.0 - fx) + value(left + 1.0, top + 1.0) * fx;
    top_row * (1.0 - fy) + bottom_row * fy
}

/// Warps `image` by the forward mapping `matrix` into a `width x height` frame.
pub fn warp_affine(image: &GrayImage, matrix: &Affine, width: u32, height: u32) -> GrayImage {
    let Some(inverse) = invert(matrix) else {
        return GrayImage::new(width, height);
    };
    GrayImage::from_fn(width, height, |x, y| {
        let (sx, sy) = transform_point(&inverse, x as f32, y as f32);
        if sx <= -1.0 || sy <= -1.0 || sx >= image.width() as f32 || sy >= image.height() as f32 {
            return Luma([0]);
        }
        Luma([sample_bilinear(image, sx, sy).round().clamp(0.0, 255.0) as u8])
    })
}

/// Rotates `image` by `degrees` about `(width / 2, height / 2)`.
///
/// The output has the same dimensions as the input; uncovered pixels are black.
pub fn rotate_about_center(image: &GrayImage, degrees: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let center = (width as f32 / 2.0, height as f32 / 2.0);
    warp_affine(image, &rotation_matrix(center, degrees, 1.0), width, height)
}

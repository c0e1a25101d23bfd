// THEORY:
// The rotation exercise needs a scene where the answer is known in advance. It builds one
// from the template itself: rotate it through a full turn in equal steps, lay the copies
// out as a grid, and centre the grid on a black canvas.
//
// The rows are not stacked in rotation order. The first row holds copies 0-4, the second
// copies 10-14, the third copies 5-9 (see `TILE_ROW_ORDER`). The reference images were
// produced that way and the layout is kept so they can be regenerated exactly.
//
// Canvas padding halves the spare space with integer division on each side. When the
// spare space is odd the result comes out one pixel short of the canvas in that axis.

use crate::core_modules::border::pad_constant;
use crate::core_modules::rotation::rotate_about_center;
use crate::error::{Error, Result};
use image::GrayImage;
use tracing::debug;

/// Grid row -> block of consecutive rotations drawn on that row.
pub const TILE_ROW_ORDER: [usize; 3] = [0, 2, 1];

/// Layout of the synthetic scene.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    pub rotations: u32,
    pub columns: u32,
    pub rows: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            rotations: 15,
            columns: 5,
            rows: 3,
            canvas_width: 800,
            canvas_height: 450,
        }
    }
}

impl SynthesisConfig {
    /// Degrees between consecutive copies.
    pub fn angle_step(&self) -> f32 {
        360.0 / self.rotations as f32
    }

    fn validate(&self) -> Result<()> {
        if self.rotations == 0 {
            return Err(Error::InvalidParameter {
                name: "rotations".into(),
                reason: "must be positive".into(),
            });
        }
        if self.columns * self.rows != self.rotations {
            return Err(Error::InvalidParameter {
                name: "columns x rows".into(),
                reason: format!(
                    "{} x {} grid cannot hold {} rotations",
                    self.columns, self.rows, self.rotations
                ),
            });
        }
        Ok(())
    }
}

/// Maps a grid row to the block of rotations it shows.
///
/// Three-row grids use `TILE_ROW_ORDER`; any other row count stacks blocks in order.
pub fn block_for_row(row: u32, rows: u32) -> u32 {
    if rows as usize == TILE_ROW_ORDER.len() {
        TILE_ROW_ORDER[row as usize] as u32
    } else {
        row
    }
}

/// Builds the rotated-tile scene from `template`.
pub fn synthesize_rotated_tiles(template: &GrayImage, config: &SynthesisConfig) -> Result<GrayImage> {
    config.validate()?;
    let (tw, th) = template.dimensions();
    if tw == 0 || th == 0 {
        return Err(Error::EmptyImage);
    }

    let step = config.angle_step();
    let rotated: Vec<GrayImage> = (0..config.rotations)
        .map(|i| rotate_about_center(template, step * i as f32))
        .collect();

    let tiled_width = tw * config.columns;
    let tiled_height = th * config.rows;
    if tiled_width > config.canvas_width || tiled_height > config.canvas_height {
        return Err(Error::CanvasTooSmall {
            tiled_width,
            tiled_height,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
        });
    }

    let mut tiled = GrayImage::new(tiled_width, tiled_height);
    for row in 0..config.rows {
        let block = block_for_row(row, config.rows);
        for col in 0..config.columns {
            let tile = &rotated[(block * config.columns + col) as usize];
            image::imageops::replace(&mut tiled, tile, i64::from(col * tw), i64::from(row * th));
        }
    }

    let pad_width = (config.canvas_width - tiled_width) / 2;
    let pad_height = (config.canvas_height - tiled_height) / 2;
    debug!(tiled_width, tiled_height, pad_width, pad_height, "centring rotated tiles on canvas");
    Ok(pad_constant(&tiled, pad_height, pad_height, pad_width, pad_width, 0))
}

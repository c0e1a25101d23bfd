// Result windows for the exercise binaries.
//
// With the `highgui` feature each frame goes to a named OpenCV window and `wait` blocks
// on `wait_key(0)`. Without it there is no GUI: frames are only listed in the log and
// `wait` blocks until Enter is pressed on stdin.

use image::{GrayImage, RgbImage};
use tracing::info;

/// An image to put in a window.
#[derive(Clone, Copy)]
pub enum Frame<'a> {
    Gray(&'a GrayImage),
    Rgb(&'a RgbImage),
}

impl Frame<'_> {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Frame::Gray(img) => img.dimensions(),
            Frame::Rgb(img) => img.dimensions(),
        }
    }
}

/// The set of windows opened by one run.
#[derive(Default)]
pub struct Windows {
    names: Vec<String>,
}

impl Windows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the windows shown so far, in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Shows `frame` in the window called `name`.
    pub fn show(&mut self, name: &str, frame: Frame<'_>) -> anyhow::Result<()> {
        let (width, height) = frame.dimensions();
        info!(window = name, width, height, "showing image");
        backend::show(name, frame)?;
        self.names.push(name.to_string());
        Ok(())
    }

    /// Blocks until a key is pressed.
    pub fn wait(&self) -> anyhow::Result<()> {
        if self.names.is_empty() {
            return Ok(());
        }
        backend::wait()
    }
}

#[cfg(feature = "highgui")]
mod backend {
    use super::Frame;
    use opencv::{
        core::{self, Mat},
        highgui,
        prelude::*,
    };

    fn to_mat(frame: Frame<'_>) -> opencv::Result<Mat> {
        match frame {
            Frame::Gray(img) => {
                Mat::from_slice_rows_cols(img.as_raw(), img.height() as usize, img.width() as usize)?.try_clone()
            }
            Frame::Rgb(img) => {
                // OpenCV windows expect BGR channel order.
                let bgr: Vec<core::Vec3b> = img
                    .pixels()
                    .map(|p| core::Vec3b::from([p[2], p[1], p[0]]))
                    .collect();
                Mat::from_slice_rows_cols(&bgr, img.height() as usize, img.width() as usize)?.try_clone()
            }
        }
    }

    pub fn show(name: &str, frame: Frame<'_>) -> anyhow::Result<()> {
        let mat = to_mat(frame)?;
        highgui::imshow(name, &mat)?;
        Ok(())
    }

    pub fn wait() -> anyhow::Result<()> {
        highgui::wait_key(0)?;
        Ok(())
    }
}

#[cfg(not(feature = "highgui"))]
mod backend {
    use super::Frame;
    use std::io::BufRead;
    use tracing::warn;

    pub fn show(name: &str, _frame: Frame<'_>) -> anyhow::Result<()> {
        warn!(window = name, "built without the `highgui` feature; window not opened");
        Ok(())
    }

    pub fn wait() -> anyhow::Result<()> {
        println!("Press Enter to exit.");
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

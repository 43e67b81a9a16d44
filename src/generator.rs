//! QR generation and image persistence.
//!
//! The session only talks to the [`QrGenerator`] and [`ImageStore`] traits.
//! [`QrCodeGenerator`] encodes with the `qrcode` crate and rasterizes through
//! [`crate::helper`]; [`FileStore`] writes files with the `image` encoders.

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::helper::matrix_to_image;
use image::{Rgb, RgbImage};
use qrcode::{Color, QrCode};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// A square grid of modules, `true` meaning dark.
///
/// The grid already includes the quiet-zone border and any scaling that was
/// requested when it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    side: usize,
    modules: Vec<bool>,
}

impl Matrix {
    /// Builds a matrix from row-major modules.
    ///
    /// # Panics
    ///
    /// Panics if `modules.len()` is not `side * side`.
    pub fn new(side: usize, modules: Vec<bool>) -> Self {
        assert_eq!(modules.len(), side * side, "Matrix must be square");
        Self { side, modules }
    }

    /// Width and height in modules.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether the module at column `x`, row `y` is dark. Out of range is light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.side && y < self.side && self.modules[y * self.side + x]
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics, and an empty matrix has no rows anyway.
        self.modules.chunks(self.side.max(1))
    }
}

/// Produces QR matrices and images for a piece of text.
pub trait QrGenerator {
    /// Encodes `text` and returns its modules, each scaled to `scale` x `scale`
    /// cells and surrounded by `border` light modules.
    fn build_matrix(&self, text: &str, scale: u32, border: u32) -> Result<Matrix>;

    /// Encodes `text` into an image with dark modules in `fill` and light ones in `back`.
    fn render_image(&self, text: &str, fill: Rgb<u8>, back: Rgb<u8>) -> Result<RgbImage>;
}

/// [`QrGenerator`] backed by the `qrcode` crate at medium error correction.
#[derive(Debug, Clone, Default)]
pub struct QrCodeGenerator {
    config: RenderConfig,
}

impl QrCodeGenerator {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl QrGenerator for QrCodeGenerator {
    fn build_matrix(&self, text: &str, scale: u32, border: u32) -> Result<Matrix> {
        let code = QrCode::new(text.as_bytes())?;
        let width = code.width();
        let colors = code.to_colors();
        let scale = scale.max(1) as usize;
        let border = border as usize;
        let side = (width + 2 * border) * scale;
        debug!(version = ?code.version(), width, side, "encoded QR code");

        let mut modules = vec![false; side * side];
        for y in 0..side {
            let qr_y = y / scale;
            if qr_y < border || qr_y >= width + border {
                continue;
            }
            for x in 0..side {
                let qr_x = x / scale;
                if qr_x < border || qr_x >= width + border {
                    continue;
                }
                modules[y * side + x] =
                    colors[(qr_y - border) * width + (qr_x - border)] == Color::Dark;
            }
        }
        Ok(Matrix::new(side, modules))
    }

    fn render_image(&self, text: &str, fill: Rgb<u8>, back: Rgb<u8>) -> Result<RgbImage> {
        let matrix = self.build_matrix(text, self.config.box_size, self.config.image_border)?;
        Ok(matrix_to_image(&matrix, fill, back))
    }
}

/// Image formats that can be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" => Ok(ImageFormat::Jpg),
            _ => Err(Error::InvalidFormat(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpg => image::ImageFormat::Jpeg,
        }
    }
}

/// Persists rendered images.
pub trait ImageStore {
    fn save(&self, image: &RgbImage, path: &Path, format: ImageFormat) -> Result<()>;
}

/// [`ImageStore`] that writes straight to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl ImageStore for FileStore {
    fn save(&self, image: &RgbImage, path: &Path, format: ImageFormat) -> Result<()> {
        image
            .save_with_format(path, format.into())
            .map_err(|source| Error::Save {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), %format, "saved QR code image");
        Ok(())
    }
}

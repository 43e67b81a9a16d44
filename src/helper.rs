use crate::generator::Matrix;

use image::{ImageBuffer, Rgb, RgbImage};

/*---- Utilities ----*/

/// Glyph printed for each dark module in the terminal preview.
pub const DARK_GLYPH: &str = "██";

/// Glyph printed for each light module in the terminal preview.
pub const LIGHT_GLYPH: &str = "  ";

/// Renders a matrix as block glyphs, one line per matrix row.
///
/// Every module takes two columns so the preview looks square in most terminals.
/// Lines are separated with `\n`, and the result ends with one.
///
/// # Example
///
/// ```rust
/// use qrscribe::generator::Matrix;
/// use qrscribe::helper::render_ascii;
///
/// let matrix = Matrix::new(2, vec![true, false, false, true]);
/// assert_eq!(render_ascii(&matrix), "██  \n  ██\n");
/// ```
pub fn render_ascii(matrix: &Matrix) -> String {
    let mut result = String::with_capacity(matrix.side() * (matrix.side() * 6 + 1));
    for row in matrix.rows() {
        for &dark in row {
            result += if dark { DARK_GLYPH } else { LIGHT_GLYPH };
        }
        result += "\n";
    }
    result
}

/// Converts a matrix to an image, one pixel per module.
///
/// Scaling and the quiet zone are expected to be baked into the matrix
/// already, see [`crate::generator::QrGenerator::build_matrix`].
///
/// # Arguments
///
/// * `matrix` - The modules to draw.
/// * `fill` - Color of dark modules.
/// * `back` - Color of light modules.
pub fn matrix_to_image(matrix: &Matrix, fill: Rgb<u8>, back: Rgb<u8>) -> RgbImage {
    let size = matrix.side() as u32;
    let mut img = ImageBuffer::new(size, size);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if matrix.get(x as usize, y as usize) {
            fill
        } else {
            back
        };
    }

    img
}

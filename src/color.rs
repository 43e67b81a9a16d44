use crate::error::{Error, Result};
use image::Rgb;

/// Parses any CSS color: a name (`"orange"`, `"lightblue"`), hex (`"#ffa500"`, `"#fa0"`),
/// or a functional form such as `"rgb(255, 165, 0)"` or `"hsl(39, 100%, 50%)"`.
///
/// Alpha is dropped; saved images are opaque.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] when the input is not a CSS color.
///
/// # Example
///
/// ```rust
/// use qrscribe::color::parse_color;
///
/// assert_eq!(parse_color("Orange").unwrap().0, [255, 165, 0]);
/// assert_eq!(parse_color("#fff").unwrap().0, [255, 255, 255]);
/// assert_eq!(parse_color("rgb(255,0,0)").unwrap().0, [255, 0, 0]);
/// ```
pub fn parse_color(input: &str) -> Result<Rgb<u8>> {
    let color = csscolorparser::parse(input.trim())
        .map_err(|_| Error::InvalidColor(input.to_string()))?;
    let [r, g, b, _] = color.to_rgba8();
    Ok(Rgb([r, g, b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("black").unwrap(), Rgb([0, 0, 0]));
        assert_eq!(parse_color("WHITE").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color("  navy ").unwrap(), Rgb([0, 0, 128]));
    }

    #[test]
    fn test_full_css_name_table() {
        assert_eq!(parse_color("lightblue").unwrap(), Rgb([173, 216, 230]));
        assert_eq!(parse_color("darkorange").unwrap(), Rgb([255, 140, 0]));
        assert_eq!(parse_color("lightgreen").unwrap(), Rgb([144, 238, 144]));
        assert_eq!(parse_color("orangered").unwrap(), Rgb([255, 69, 0]));
        assert_eq!(parse_color("salmon").unwrap(), Rgb([250, 128, 114]));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#1e90ff").unwrap(), Rgb([30, 144, 255]));
        assert_eq!(parse_color("#F00").unwrap(), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_functional_colors() {
        assert_eq!(parse_color("rgb(255,0,0)").unwrap(), Rgb([255, 0, 0]));
        assert_eq!(parse_color("rgb(0, 128, 0)").unwrap(), Rgb([0, 128, 0]));
        assert_eq!(parse_color("hsl(240, 100%, 50%)").unwrap(), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_invalid_colors() {
        assert!(matches!(parse_color("blurple"), Err(Error::InvalidColor(c)) if c == "blurple"));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("").is_err());
    }
}

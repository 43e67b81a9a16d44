/// Rendering constants for the terminal preview and saved images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Pixels per module in the terminal preview.
    pub preview_scale: u32,
    /// Quiet-zone width, in modules, around the terminal preview.
    pub preview_border: u32,
    /// Pixels per module in saved images.
    pub box_size: u32,
    /// Quiet-zone width, in modules, around saved images.
    pub image_border: u32,
    /// Color used for dark modules when the user leaves the prompt blank.
    pub default_fill: &'static str,
    /// Color used for light modules when the user leaves the prompt blank.
    pub default_back: &'static str,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            preview_scale: 1,
            preview_border: 2,
            box_size: 10,
            image_border: 5,
            default_fill: "black",
            default_back: "white",
        }
    }
}

//! Errors that end an interactive run.
//!
//! Declining to overwrite a file and cancelling the editor are not errors;
//! those are reported through [`crate::session::Outcome`].

use std::path::PathBuf;

/// Error type for everything that can go wrong between editing and saving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text was blank after trimming.
    #[error("Text cannot be empty.")]
    EmptyInput,

    /// The requested image format is neither `png` nor `jpg`.
    #[error("Invalid file format '{0}'. Choose 'png' or 'jpg'.")]
    InvalidFormat(String),

    /// A color name or hex code could not be understood.
    #[error("Unknown color '{0}'. Use a color name like 'navy' or a hex code like '#1e90ff'.")]
    InvalidColor(String),

    /// The text does not fit in any QR code version.
    #[error("Could not encode text as a QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// Writing the image file failed.
    #[error("Failed to save '{}': {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Terminal or prompt I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(Error::EmptyInput.to_string(), "Text cannot be empty.");
        assert_eq!(
            Error::InvalidFormat("bmp".into()).to_string(),
            "Invalid file format 'bmp'. Choose 'png' or 'jpg'."
        );
        assert!(Error::InvalidColor("blurple".into()).to_string().contains("'blurple'"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "tty gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("tty gone"));
    }
}

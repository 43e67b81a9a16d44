//! # qrscribe
//!
//! An interactive terminal tool that turns multiline text into a QR code.
//!
//! `qrscribe` collects text with a small line editor, then offers to print the QR code as block
//! glyphs in the terminal and to save it as a PNG or JPG image in the colors of your choice.
//!
//! ## Features
//!
//! - Multiline editing with cursor movement and backspace across line boundaries.
//! - Terminal preview of the QR code using `██` blocks.
//! - PNG and JPG output with named or hex colors for the code and background.
//! - Overwrite confirmation before replacing an existing file.
//! - Raw terminal mode is only held while editing and is always restored.
//!
//! ## Usage
//!
//! Run the binary and follow the prompts. Press `Ctrl+G` to finish editing or `Ctrl+C` to cancel.
//!
//! ```text
//! $ qrscribe
//! ```
//!
//! ## Example
//!
//! Script a full run without a terminal:
//!
//! ```rust
//! use qrscribe::editor::{keys_for, Key};
//! use qrscribe::generator::{FileStore, QrCodeGenerator};
//! use qrscribe::session::{Outcome, ScriptedKeys, Session};
//! use std::io::Cursor;
//!
//! let mut source = ScriptedKeys::new(keys_for("Hello, World!").chain([Key::Finish]));
//! let answers = Cursor::new("y\nn\n");
//! let mut session = Session::new(QrCodeGenerator::default(), FileStore, answers, Vec::new());
//! assert_eq!(session.run(&mut source).unwrap(), Outcome::Done { saved: None });
//! ```
//!
//! ## Modules
//!
//! - [`editor`]: The key-driven line editor.
//! - [`terminal`]: Raw-mode terminal driver for the editor.
//! - [`session`]: The prompt flow from editing to saving.
//! - [`generator`]: QR encoding and image persistence.
//! - [`helper`]: Terminal and raster rendering of QR matrices.
//! - [`color`]: Color name and hex parsing.
//! - [`config`]: Rendering constants.
//! - [`error`]: The crate error type.

pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod generator;
pub mod helper;
pub mod session;
pub mod terminal;

pub use error::{Error, Result};

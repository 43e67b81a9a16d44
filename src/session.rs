//! One interactive run: edit text, optionally preview it, optionally save it.
//!
//! The session walks through these steps and stops at the first error or
//! refusal:
//!
//! 1. Read text from a [`TextSource`]. Blank text is [`Error::EmptyInput`].
//! 2. Ask whether to print a block-glyph preview.
//! 3. Ask whether to save an image. If so, ask for the format, the two colors
//!    and the base file name, confirm overwriting an existing file, then save.
//!
//! Prompts are read from any [`BufRead`] and everything is written to any
//! [`Write`], so a run can be scripted end to end.

use crate::color::parse_color;
use crate::config::RenderConfig;
use crate::editor::{run_keys, EditOutcome, Key};
use crate::error::{Error, Result};
use crate::generator::{ImageFormat, ImageStore, QrGenerator};
use crate::helper::render_ascii;
use crossterm::style::Stylize;
use image::Rgb;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

/// Where the session gets its text from.
pub trait TextSource {
    fn read_text(&mut self) -> Result<EditOutcome>;
}

/// A [`TextSource`] that replays a fixed list of keys through the line editor.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: Vec<Key>,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl TextSource for ScriptedKeys {
    fn read_text(&mut self) -> Result<EditOutcome> {
        Ok(run_keys(self.keys.drain(..)))
    }
}

/// Everything needed to render and save one image.
#[derive(Debug, Clone, PartialEq)]
pub struct QrRequest {
    pub text: String,
    pub fill: Rgb<u8>,
    pub back: Rgb<u8>,
    pub format: ImageFormat,
    pub path: PathBuf,
}

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user cancelled while editing.
    Cancelled,
    /// The user declined to overwrite an existing file.
    OverwriteDeclined { path: PathBuf },
    /// The run completed. `saved` is the image path, if one was written.
    Done { saved: Option<PathBuf> },
}

/// Drives one run against a generator, an image store and a prompt stream.
pub struct Session<G, S, R, W> {
    generator: G,
    store: S,
    input: R,
    out: W,
    config: RenderConfig,
}

impl<G, S, R, W> Session<G, S, R, W>
where
    G: QrGenerator,
    S: ImageStore,
    R: BufRead,
    W: Write,
{
    pub fn new(generator: G, store: S, input: R, out: W) -> Self {
        Self {
            generator,
            store,
            input,
            out,
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Gives back the output sink, e.g. to inspect what a scripted run printed.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the whole interaction once.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`], [`Error::InvalidFormat`] and [`Error::InvalidColor`]
    /// for rejected input, [`Error::Encode`] when the text does not fit in a QR
    /// code, [`Error::Save`] and [`Error::Io`] for I/O failures. No file is
    /// written when an error is returned.
    pub fn run(&mut self, source: &mut dyn TextSource) -> Result<Outcome> {
        writeln!(self.out, "{}", "Welcome to the Advanced QR Code Generator!".cyan().bold())?;
        writeln!(self.out, "{}", "Press Ctrl+G to finish your input.".yellow())?;
        self.out.flush()?;

        let text = match source.read_text()? {
            EditOutcome::Text(text) => text.trim().to_string(),
            EditOutcome::Cancelled => {
                self.cancelled()?;
                return Ok(Outcome::Cancelled);
            }
        };
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }
        debug!(chars = text.chars().count(), "text accepted");

        if self.confirm("Do you want to display the QR Code in the terminal? (y/n): ")? {
            self.preview(&text)?;
        }

        if !self.confirm("\nDo you want to save the QR Code as an image file? (y/n): ")? {
            return Ok(Outcome::Done { saved: None });
        }

        let request = self.ask_request(text)?;
        if request.path.exists() {
            let question = format!("{} already exists. Overwrite? (y/n): ", request.path.display());
            if !self.confirm(&question)? {
                self.cancelled()?;
                return Ok(Outcome::OverwriteDeclined { path: request.path });
            }
        }

        self.persist(&request)?;
        Ok(Outcome::Done {
            saved: Some(request.path),
        })
    }

    fn preview(&mut self, text: &str) -> Result<()> {
        let matrix =
            self.generator
                .build_matrix(text, self.config.preview_scale, self.config.preview_border)?;
        writeln!(self.out, "{}", "\nQR Code Display:".cyan().bold())?;
        write!(self.out, "{}", render_ascii(&matrix))?;
        self.out.flush()?;
        Ok(())
    }

    fn ask_request(&mut self, text: String) -> Result<QrRequest> {
        let format: ImageFormat = self.ask("Choose file format (png/jpg): ")?.parse()?;

        let fill = self.ask_color("Enter QR Code color", self.config.default_fill)?;
        let back = self.ask_color("Enter background color", self.config.default_back)?;

        let base = self.ask("Enter output file name (without extension): ")?;
        let path = PathBuf::from(format!("{}.{}", base, format.extension()));
        debug!(path = %path.display(), %format, "save requested");

        Ok(QrRequest {
            text,
            fill,
            back,
            format,
            path,
        })
    }

    fn ask_color(&mut self, label: &str, default: &str) -> Result<Rgb<u8>> {
        let answer = self.ask(&format!("{} (default: {}): ", label, default))?;
        parse_color(if answer.is_empty() { default } else { answer.as_str() })
    }

    fn persist(&mut self, request: &QrRequest) -> Result<()> {
        let image = self.generator.render_image(&request.text, request.fill, request.back)?;
        self.store.save(&image, &request.path, request.format)?;
        let message = format!("QR Code saved as '{}'", request.path.display());
        writeln!(self.out, "{}", message.green())?;
        Ok(())
    }

    fn cancelled(&mut self) -> Result<()> {
        writeln!(self.out, "{}", "Operation cancelled.".red())?;
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    /// Prints `question` and returns the trimmed answer. End of input reads as blank.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.out, "{}", question.yellow())?;
        self.out.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

//! Multiline line editor driven by key events.
//!
//! The editor is a pure state machine: it never touches the terminal. Feed it
//! [`Key`]s with [`LineEditor::handle_key`] and read the finished text from
//! [`LineEditor::result`]. The [`crate::terminal`] module drives it from real
//! keystrokes.
//!
//! # Example
//!
//! ```rust
//! use qrscribe::editor::{Key, LineEditor, Step};
//!
//! let mut editor = LineEditor::new();
//! for c in "hi".chars() {
//!     editor.handle_key(Key::Char(c));
//! }
//! editor.handle_key(Key::Enter);
//! editor.handle_key(Key::Char('!'));
//! assert_eq!(editor.handle_key(Key::Finish), Step::Finished);
//! assert_eq!(editor.result().as_deref(), Some("hi\n!"));
//! ```

use tracing::debug;

/// A key the editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    Backspace,
    Enter,
    Left,
    Right,
    /// Ends editing and keeps the text.
    Finish,
    /// Ends editing and discards the text.
    Cancel,
}

/// What the caller should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Finished,
    Cancelled,
}

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The joined, trimmed text.
    Text(String),
    Cancelled,
}

/// Editing state: completed lines, the line being edited and the cursor.
#[derive(Debug, Clone)]
pub struct LineEditor {
    lines: Vec<String>,
    current: Vec<char>,
    column: usize,
    row: usize,
    state: Step,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEditor {
    /// Creates an empty editor with the cursor at row 1, column 0.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            column: 0,
            row: 1,
            state: Step::Continue,
        }
    }

    /// Applies one key to the editor.
    ///
    /// Keys arriving after the editor has finished or been cancelled are ignored
    /// and the terminal step is returned again.
    pub fn handle_key(&mut self, key: Key) -> Step {
        if self.state != Step::Continue {
            return self.state;
        }
        match key {
            Key::Char(c) if !c.is_control() => {
                self.current.insert(self.column, c);
                self.column += 1;
            }
            Key::Char(_) => {}
            Key::Backspace => self.backspace(),
            Key::Enter => {
                let line = self.take_current();
                self.lines.push(line);
                self.row += 1;
            }
            Key::Left => self.column = self.column.saturating_sub(1),
            Key::Right => {
                if self.column < self.current.len() {
                    self.column += 1;
                }
            }
            Key::Finish => {
                let line = self.take_current();
                self.lines.push(line);
                self.state = Step::Finished;
            }
            Key::Cancel => self.state = Step::Cancelled,
        }
        debug!(?key, row = self.row, column = self.column, "editor key");
        self.state
    }

    fn backspace(&mut self) {
        if self.column > 0 {
            self.column -= 1;
            self.current.remove(self.column);
        } else if let Some(previous) = self.lines.pop() {
            // The reclaimed line keeps whatever was typed after the cursor.
            let mut merged: Vec<char> = previous.chars().collect();
            self.column = merged.len();
            merged.append(&mut self.current);
            self.current = merged;
            self.row -= 1;
        }
    }

    fn take_current(&mut self) -> String {
        self.column = 0;
        std::mem::take(&mut self.current).into_iter().collect()
    }

    /// The finished text, or `None` while editing is still active or was cancelled.
    pub fn result(&self) -> Option<String> {
        match self.state {
            Step::Finished => Some(self.lines.join("\n").trim().to_string()),
            _ => None,
        }
    }

    /// Completed lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line under the cursor.
    pub fn current_line(&self) -> String {
        self.current.iter().collect()
    }

    /// Cursor column, in characters.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Cursor row, starting at 1.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn is_finished(&self) -> bool {
        self.state == Step::Finished
    }
}

/// Runs a fresh editor over `keys` until it finishes or is cancelled.
///
/// Running out of keys before either happens counts as a cancel.
pub fn run_keys<I>(keys: I) -> EditOutcome
where
    I: IntoIterator<Item = Key>,
{
    let mut editor = LineEditor::new();
    for key in keys {
        match editor.handle_key(key) {
            Step::Continue => {}
            Step::Finished => break,
            Step::Cancelled => return EditOutcome::Cancelled,
        }
    }
    editor.result().map_or(EditOutcome::Cancelled, EditOutcome::Text)
}

/// Turns a string into character keys, mapping `'\n'` to [`Key::Enter`].
pub fn keys_for(text: &str) -> impl Iterator<Item = Key> + '_ {
    text.chars().map(|c| if c == '\n' { Key::Enter } else { Key::Char(c) })
}

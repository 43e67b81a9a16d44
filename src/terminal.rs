//! Terminal driver for the line editor.
//!
//! Raw mode is held only while the editor is running and is restored on every
//! exit path, including panics.

use crate::editor::{EditOutcome, Key, LineEditor, Step};
use crate::error::Result;
use crate::session::TextSource;
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::queue;
use std::io::{self, Stdout, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Prompt shown above the editing area.
pub const EDITOR_PROMPT: &str = "Enter the text for the QR Code (press Ctrl+G when done):";

/// Tracks whether raw mode is active, for the panic hook.
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that puts the terminal in raw mode and restores it on drop.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    /// Enter raw mode and return a guard that will restore it on drop.
    ///
    /// # Errors
    /// Returns an error if enabling raw mode fails, e.g. when stdin is not a TTY.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        Ok(Self { active: true })
    }

    /// Leave raw mode now. The guard's drop becomes a no-op.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            disable_raw_mode()?;
        }
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            // Nothing useful to do with an error here.
            let _ = disable_raw_mode();
        }
    }
}

/// Install a panic hook that leaves raw mode before the panic message prints.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = disable_raw_mode();
        }
        original_hook(panic_info);
    }));
}

/// Maps a terminal key event to an editor key.
///
/// Ctrl+G finishes and Ctrl+C cancels. Other Ctrl and Alt chords, key releases
/// and keys the editor has no use for map to `None`.
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    match event.code {
        KeyCode::Char('g' | 'G') if ctrl => Some(Key::Finish),
        KeyCode::Char('c' | 'C') if ctrl => Some(Key::Cancel),
        KeyCode::Char(_) if ctrl || alt => None,
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

/// Reads keystrokes from the terminal and echoes the edited text to `out`.
pub struct TerminalInput<W: Write> {
    out: W,
}

impl TerminalInput<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalInput<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn edit(&mut self) -> Result<EditOutcome> {
        let mut editor = LineEditor::new();
        loop {
            let key = match event::read()? {
                Event::Key(key_event) => translate_key(key_event),
                _ => None,
            };
            let Some(key) = key else { continue };

            let previous_row = editor.row();
            let step = editor.handle_key(key);
            redraw(&mut self.out, &editor, previous_row)?;

            match step {
                Step::Continue => {}
                Step::Finished | Step::Cancelled => {
                    queue!(self.out, Print("\r\n"))?;
                    self.out.flush()?;
                    return Ok(editor.result().map_or(EditOutcome::Cancelled, EditOutcome::Text));
                }
            }
        }
    }
}

impl<W: Write> TextSource for TerminalInput<W> {
    fn read_text(&mut self) -> Result<EditOutcome> {
        writeln!(self.out, "{}", EDITOR_PROMPT.yellow())?;
        self.out.flush()?;

        let mut guard = RawModeGuard::enter()?;
        let outcome = self.edit();
        guard.exit()?;
        debug!(?outcome, "editing ended");
        outcome
    }
}

/// Redraws the line under the cursor after a key moved the editor from `previous_row`.
///
/// Moving down a row starts a fresh terminal line; merging back into the row
/// above clears the abandoned line first.
pub fn redraw<W: Write>(out: &mut W, editor: &LineEditor, previous_row: usize) -> io::Result<()> {
    if editor.row() > previous_row {
        queue!(out, Print("\r\n"))?;
    } else if editor.row() < previous_row {
        queue!(out, Clear(ClearType::CurrentLine), MoveUp(1))?;
    }
    let column = u16::try_from(cursor_cells(editor)).unwrap_or(u16::MAX);
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::UntilNewLine),
        Print(editor.current_line()),
        MoveToColumn(column)
    )?;
    out.flush()
}

/// Terminal cells taken by the text left of the cursor. Wide glyphs count twice.
fn cursor_cells(editor: &LineEditor) -> usize {
    let before: String = editor.current_line().chars().take(editor.column()).collect();
    before.width()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_translate_printable_and_editing_keys() {
        assert_eq!(translate_key(press(KeyCode::Char('a'))), Some(Key::Char('a')));
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Key::Char('A'))
        );
        assert_eq!(translate_key(press(KeyCode::Backspace)), Some(Key::Backspace));
        assert_eq!(translate_key(press(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(translate_key(press(KeyCode::Left)), Some(Key::Left));
        assert_eq!(translate_key(press(KeyCode::Right)), Some(Key::Right));
    }

    #[test]
    fn test_translate_control_chords() {
        assert_eq!(translate_key(ctrl('g')), Some(Key::Finish));
        assert_eq!(translate_key(ctrl('c')), Some(Key::Cancel));
        assert_eq!(translate_key(ctrl('x')), None);
    }

    #[test]
    fn test_translate_ignores_alt_chords() {
        let alt = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT);
        assert_eq!(translate_key(alt('b')), None);
        assert_eq!(translate_key(alt('f')), None);
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT | KeyModifiers::SHIFT)),
            None
        );
    }

    #[test]
    fn test_translate_ignores_other_keys() {
        assert_eq!(translate_key(press(KeyCode::Up)), None);
        assert_eq!(translate_key(press(KeyCode::Tab)), None);
        assert_eq!(translate_key(press(KeyCode::F(1))), None);
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate_key(release), None);
    }

    #[test]
    fn test_redraw_prints_current_line() {
        let mut editor = LineEditor::new();
        editor.handle_key(Key::Char('h'));
        editor.handle_key(Key::Char('i'));
        let mut out = Vec::new();
        redraw(&mut out, &editor, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hi"));
        assert!(!text.contains("\r\n"));
    }

    #[test]
    fn test_redraw_places_cursor_after_wide_glyphs() {
        let mut editor = LineEditor::new();
        for c in "你好a".chars() {
            editor.handle_key(Key::Char(c));
        }
        editor.handle_key(Key::Left);
        // Two wide glyphs take four cells; crossterm columns are 1-based on the wire.
        assert_eq!(cursor_cells(&editor), 4);
        let mut out = Vec::new();
        redraw(&mut out, &editor, 1).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("\x1b[5G"));
    }

    #[test]
    fn test_cursor_cells_for_ascii() {
        let mut editor = LineEditor::new();
        for c in "abc".chars() {
            editor.handle_key(Key::Char(c));
        }
        assert_eq!(cursor_cells(&editor), 3);
    }

    #[test]
    fn test_redraw_starts_new_line_on_enter() {
        let mut editor = LineEditor::new();
        editor.handle_key(Key::Char('a'));
        editor.handle_key(Key::Enter);
        let mut out = Vec::new();
        redraw(&mut out, &editor, 1).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("\r\n"));
    }

    #[test]
    fn test_raw_mode_guard_enter_and_exit() {
        // Raw mode needs a real TTY; CI usually has none.
        match RawModeGuard::enter() {
            Ok(mut guard) => {
                assert!(RAW_MODE_ACTIVE.load(Ordering::SeqCst));
                guard.exit().expect("Should exit raw mode");
                assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));
                drop(guard);
                assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));
            }
            Err(e) => {
                eprintln!("Skipping test (no TTY): {}", e);
            }
        }
    }

    #[test]
    fn test_panic_hook_installation() {
        install_panic_hook();
        install_panic_hook();
    }
}

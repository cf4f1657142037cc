use std::{
    io::{self, IsTerminal as _, Stderr, Write},
    sync::Mutex,
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clowder_core::clipboard::Clipboard;
use color_eyre::eyre::{self, WrapErr as _, eyre};

/// Sets the terminal's clipboard with an OSC 52 escape sequence.
pub(crate) struct TerminalClipboard<W> {
    out: Mutex<W>,
    interactive: bool,
}

impl TerminalClipboard<Stderr> {
    /// Writes the sequence to stderr so stdout stays clean for `--json`.
    pub(crate) fn stderr() -> Self {
        let out = io::stderr();
        let interactive = out.is_terminal();
        Self::new(out, interactive)
    }
}

impl<W> TerminalClipboard<W> {
    pub(crate) fn new(out: W, interactive: bool) -> Self {
        Self {
            out: Mutex::new(out),
            interactive,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> eyre::Result<W> {
        self.out
            .into_inner()
            .map_err(|_| eyre!("clipboard writer poisoned"))
    }
}

impl<W: Write> Clipboard for TerminalClipboard<W> {
    fn write_text(&self, text: &str) -> eyre::Result<()> {
        if !self.interactive {
            return Err(eyre!("output is not a terminal"));
        }

        let mut out = self
            .out
            .lock()
            .map_err(|_| eyre!("clipboard writer poisoned"))?;
        write!(out, "\x1b]52;c;{}\x07", STANDARD.encode(text))
            .wrap_err("failed to write clipboard sequence")?;
        out.flush().wrap_err("failed to flush clipboard sequence")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_osc52_sequence() {
        let clipboard = TerminalClipboard::new(Vec::new(), true);

        clipboard.write_text("0xabc").unwrap();

        let written = clipboard.into_inner().unwrap();
        assert_eq!(written, b"\x1b]52;c;MHhhYmM=\x07");
    }

    #[test]
    fn test_non_terminal_fails_without_writing() {
        let clipboard = TerminalClipboard::new(Vec::new(), false);

        assert!(clipboard.write_text("0xabc").is_err());
        assert!(clipboard.into_inner().unwrap().is_empty());
    }
}

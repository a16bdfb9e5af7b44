//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{MessageTheme, OutputMode, UserInterface};

/// Terminal UI writing status to stdout and errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: MessageTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI.
    pub fn new(mode: OutputMode, colored: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: MessageTheme::for_colors(colored),
            mode,
        }
    }

    /// The theme used for output.
    pub fn theme(&self) -> &MessageTheme {
        &self.theme
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term()
    }

    fn is_colored(&self) -> bool {
        self.theme.is_colored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, false);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(!ui.is_colored());
    }
}

//! Colour palettes for issuer messages and CLI status lines.

use console::Style;

use crate::message::{color_segments, strip_tags, Message, MessageType};

/// Three colour slots for one [`MessageType`], addressed by `<c1>`..`<c3>`.
pub type Palette = [Style; 3];

/// Commando's visual theme.
#[derive(Debug, Clone)]
pub struct MessageTheme {
    /// Palette for info messages (blue, green, bright green).
    pub info: Palette,
    /// Palette for error messages (red, yellow, red).
    pub error: Palette,
    /// Palette for usage lines (yellow, green, white).
    pub syntax: Palette,
    /// Palette for help listings (cyan, green, yellow).
    pub help: Palette,
    /// Style for CLI success lines.
    pub success: Style,
    /// Style for CLI warnings.
    pub warning: Style,
    /// Style for CLI errors.
    pub failure: Style,
    colored: bool,
}

impl Default for MessageTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageTheme {
    /// Create the coloured theme.
    pub fn new() -> Self {
        Self {
            info: [
                Style::new().blue(),
                Style::new().green(),
                Style::new().green().bright(),
            ],
            error: [
                Style::new().red(),
                Style::new().yellow(),
                Style::new().red(),
            ],
            syntax: [
                Style::new().yellow(),
                Style::new().green(),
                Style::new().white(),
            ],
            help: [
                Style::new().cyan(),
                Style::new().green(),
                Style::new().yellow(),
            ],
            success: Style::new().green(),
            warning: Style::new().color256(208),
            failure: Style::new().red().bold(),
            colored: true,
        }
    }

    /// Create a theme without colours (for non-TTY or --no-color).
    pub fn plain() -> Self {
        let none = || [Style::new(), Style::new(), Style::new()];
        Self {
            info: none(),
            error: none(),
            syntax: none(),
            help: none(),
            success: Style::new(),
            warning: Style::new(),
            failure: Style::new(),
            colored: false,
        }
    }

    /// Pick the coloured or plain theme.
    pub fn for_colors(colored: bool) -> Self {
        if colored {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Whether this theme emits colour.
    pub fn is_colored(&self) -> bool {
        self.colored
    }

    /// The palette for a message type.
    pub fn palette(&self, kind: MessageType) -> &Palette {
        match kind {
            MessageType::Info => &self.info,
            MessageType::Error => &self.error,
            MessageType::Syntax => &self.syntax,
            MessageType::Help => &self.help,
        }
    }

    /// Render a message, mapping colour tags onto its palette.
    pub fn format(&self, message: &Message) -> String {
        if !self.colored {
            return strip_tags(&message.text);
        }
        let palette = self.palette(message.kind);
        color_segments(&message.text)
            .into_iter()
            .map(|(slot, text)| {
                let style = &palette[usize::from(slot.clamp(1, 3)) - 1];
                style.apply_to(text).to_string()
            })
            .collect()
    }

    /// Format a success line (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning line (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error line (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.failure.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

//! Terminal rendering for human-readable output.
//!
//! Everything except errors goes to stdout and is dropped in quiet mode;
//! `--json` turns quiet mode on so stdout carries only the JSON document.

pub mod json;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Styling and verbosity shared by every command.
pub struct OutputContext {
    pub styles: Styles,
    /// Drop everything but errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a TTY, and never with `--no-color` or `NO_COLOR`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let use_colors =
            !no_color && Term::stdout().is_term() && std::env::var("NO_COLOR").is_err();
        let styles = if use_colors {
            Styles::colored()
        } else {
            Styles::default()
        };
        Self { styles, quiet }
    }

    fn line(&self, glyph: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", glyph.style(style));
        }
    }

    /// `→ msg`
    pub fn step(&self, msg: &str) {
        self.line("→", self.styles.info, msg);
    }

    /// `✓ msg`
    pub fn success(&self, msg: &str) {
        self.line("✓", self.styles.success, msg);
    }

    /// `✗ msg` on stderr, printed even in quiet mode.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Bold summary line, no glyph.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Key column dimmed, value plain.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

//! Terminal palette.

use owo_colors::Style;

/// Styles applied to each kind of output line. All plain by default.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub error: Style,
    /// Step arrows.
    pub info: Style,
    /// Config keys in `config show`.
    pub dim: Style,
    pub header: Style,
}

impl Styles {
    /// The colored palette used on a TTY.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
        }
    }
}

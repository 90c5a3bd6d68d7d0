//! `ProgressReporter` backed by the terminal output context.

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Forwards service progress to [`OutputContext`], so `--quiet` and `--json`
/// silence everything but errors.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn header(&self, message: &str) {
        self.ctx.header(message);
    }

    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn error(&self, message: &str) {
        self.ctx.error(message);
    }
}

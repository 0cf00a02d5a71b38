use console::style;

use crate::ai::ModelHandle;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Report which model stories will be generated with
    pub fn model(&self, model: &ModelHandle) {
        if model.fallback_used() {
            self.warning(&format!(
                "Primary model not found. Falling back to {}",
                style(model.name()).cyan()
            ));
        } else {
            self.success(&format!("Using model: {}", style(model.name()).cyan()));
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

//! Console output for srcmerge
//!
//! The completion line is printed plain so scripts can match it; everything
//! else is styled and only shown in verbose mode.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print the single completion line of a successful run
    pub fn completion(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Print a verbose step with emoji and styling
    pub fn verbose_step(&self, emoji: &str, message: &str) {
        if self.verbose {
            println!("{} {}", style(emoji).cyan(), style(message).dim());
        }
    }

    /// Print a verbose summary with styling
    pub fn verbose_summary(&self, icon: &str, message: &str, count: usize) {
        if self.verbose {
            println!(
                "{} {} {}",
                style(icon).cyan(),
                style(message).dim(),
                style(format!("({})", count)).yellow().bold()
            );
        }
    }

    /// Print a verbose breakdown item
    pub fn verbose_breakdown(&self, label: &str, count: usize) {
        if self.verbose {
            println!(
                "  {} {} {}",
                style("•").cyan(),
                style(count.to_string()).yellow().bold(),
                style(label).dim()
            );
        }
    }
}


//! Terminal output formatting for the npconvert CLI.
//!
//! Status lines use Cargo's layout: a right-aligned coloured verb, then the
//! message. Everything here writes to stderr. Converted documents printed
//! with `--stdout` or `check --dump` are the only thing written to stdout.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::diagnostics::{Diagnostic, Diagnostics, Severity};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "  Converting plugins/Citizens/saves.yml"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Format a string as cyan (for paths).
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    /// Print one conversion diagnostic, plus its help line if any.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        let color = match diagnostic.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        let label = self.paint_bold(color, &diagnostic.severity.to_string());

        let mut line = format!("{}[{}]: ", label, diagnostic.code);
        if let Some(entry) = &diagnostic.entry {
            line.push_str(&format!("npc '{}': ", entry));
        }
        line.push_str(&diagnostic.message);

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
        if let Some(help) = &diagnostic.help {
            let _ = writeln!(stderr, "  {} {}", self.dim("help:"), help);
        }
    }

    /// Print every diagnostic in a collection.
    pub fn diagnostics(&self, diagnostics: &Diagnostics) {
        for d in diagnostics.iter() {
            self.diagnostic(d);
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn paint_bold(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{BOLD}{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "NPC", "NPCs")` → "1 NPC".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "NPC", "NPCs"), "1 NPC");
    }

    #[test]
    fn test_plural_zero() {
        assert_eq!(plural(0, "NPC", "NPCs"), "0 NPCs");
    }

    #[test]
    fn test_plural_many() {
        assert_eq!(plural(5, "file", "files"), "5 files");
    }

    #[test]
    fn test_display_path_absolute() {
        let p = Path::new("/nonexistent/path/to/saves.yml");
        assert_eq!(display_path(p), "/nonexistent/path/to/saves.yml");
    }

    #[test]
    fn test_display_path_inside_cwd() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(display_path(&cwd.join("saves.yml")), "saves.yml");
        assert_eq!(display_path(&cwd), ".");
    }

    #[test]
    fn test_plain_printer_has_no_escapes() {
        let printer = Printer::plain();

        assert_eq!(printer.dim("help:"), "help:");
        assert_eq!(printer.cyan("saves.yml"), "saves.yml");
    }
}

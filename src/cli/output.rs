//! Colored output helpers for CLI
//!
//! Every message has a colored form and a plain `[TAG]` form for
//! `--no-color` and non-terminal use.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Pick the colored or the plain rendering.
    fn render(&self, colored: impl FnOnce() -> String, plain: impl FnOnce() -> String) -> String {
        if self.colored {
            colored()
        } else {
            plain()
        }
    }

    /// Print the usergate banner
    pub fn banner(&self) {
        let title = format!("usergate v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "\n  {}",
            self.render(
                || format!("{}", title.bright_cyan().bold()),
                || title.clone()
            )
        );
        println!(
            "  {}\n",
            self.render(
                || format!("{}", "user management API".dimmed()),
                || "user management API".to_string()
            )
        );
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        println!(
            "  {}",
            self.render(
                || format!("{} {}", "✓".green().bold(), message.green()),
                || format!("[OK] {}", message)
            )
        );
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!(
            "  {}",
            self.render(
                || format!("{} {}", "•".blue(), message),
                || format!("[INFO] {}", message)
            )
        );
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        println!(
            "  {}",
            self.render(
                || format!("{} {}", "⚠".yellow().bold(), message.yellow()),
                || format!("[WARN] {}", message)
            )
        );
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!(
            "  {}",
            self.render(
                || format!("{} {}", "✗".red().bold(), message.red()),
                || format!("[ERROR] {}", message)
            )
        );
    }

    /// Print a file creation message
    pub fn created(&self, path: &str) {
        println!(
            "  {}",
            self.render(
                || format!("{} {}", "✓".green().bold(), path.bright_white()),
                || format!("[CREATED] {}", path)
            )
        );
    }

    /// Print a file skipped message
    pub fn skipped(&self, path: &str, reason: &str) {
        println!(
            "  {}",
            self.render(
                || format!("{} {} {}", "○".yellow(), path.dimmed(), format!("({})", reason).yellow()),
                || format!("[SKIPPED] {} ({})", path, reason)
            )
        );
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        println!(
            "\n  {}",
            self.render(
                || format!("{}", title.bright_white().bold().underline()),
                || format!("=== {} ===", title)
            )
        );
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        println!(
            "    {}",
            self.render(
                || format!("{}: {}", key.dimmed(), value.bright_white()),
                || format!("{}: {}", key, value)
            )
        );
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        println!(
            "\n  {}",
            self.render(
                || format!("{}", message.dimmed().italic()),
                || format!("[TIP] {}", message)
            )
        );
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        println!(
            "     {}",
            self.render(
                || format!("{}", format!("$ {}", cmd).bright_cyan()),
                || format!("$ {}", cmd)
            )
        );
    }

    /// Print a raw multi-line block, indented
    pub fn block(&self, text: &str) {
        for line in text.lines() {
            println!("    {}", line);
        }
    }
}

use console::style;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a command banner, e.g. `=== Changelog Index ===`.
pub fn header(msg: &str) {
    println!("{}\n", style(format!("=== {msg} ===")).bold());
}

/// Print an indented list item under the previous line.
pub fn item(msg: &str) {
    println!("  {msg}");
}

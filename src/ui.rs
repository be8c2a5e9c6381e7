//! Terminal output shared by all commands.

use console::style;

pub fn header(title: &str) -> String {
    let bar = "─".repeat(title.chars().count() + 4);
    format!("┌{bar}┐\n│  {title}  │\n└{bar}┘")
}

pub fn print_header(title: &str) {
    eprintln!("\n{}\n", style(header(title)).cyan().bold());
}

pub fn show_warning_on_windows() {
    if cfg!(windows) {
        eprintln!(
            "  {} Windows is not fully supported. Use WSL for the best experience.",
            style("!").yellow().bold(),
        );
    }
}

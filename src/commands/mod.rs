mod config_cmd;
mod product;
mod salad;

use clap::ValueEnum;
use std::io::{self, Write};

pub use config_cmd::ConfigCommand;
pub use product::ProductCommand;
pub use salad::SaladCommand;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks a yes/no question on stdout; anything but `y` means no.
fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Shortens `name` to at most `width` characters for table output.
fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() > width {
        let kept: String = name.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Kale", 10), "Kale");
        assert_eq!(truncate("Mediterranean summer", 10), "Mediter...");
        assert_eq!(truncate("Салат олів'є з куркою", 8), "Салат...");
    }
}

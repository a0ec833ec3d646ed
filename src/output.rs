//! # Summary Output
//!
//! Styling for the lines the `verify` command prints. Colors and status
//! emojis go together: both are on with `--color always`, both off with
//! `--color never`, and `auto` follows the terminal.

use std::env;
use std::fmt::Display;

use clap::ValueEnum;
use console::{style, StyledObject};

/// Value of the global `--color` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal that supports it
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorChoice {
    /// Whether output should be styled.
    ///
    /// In `auto` mode `NO_COLOR` turns styling off; `console` then checks
    /// `CLICOLOR`, `CLICOLOR_FORCE`, `TERM=dumb` and whether stdout is a tty.
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => env::var_os("NO_COLOR").is_none() && console::colors_enabled(),
        }
    }
}

/// Styling for verify summaries.
#[derive(Debug, Clone, Copy)]
pub struct SummaryStyle {
    color: bool,
}

impl SummaryStyle {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            color: choice.enabled(),
        }
    }

    /// The status marker: `emoji` when colored, `plain` otherwise.
    pub fn marker<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.color {
            emoji
        } else {
            plain
        }
    }

    /// An indented `key: value` line, with a dim key and a bold value.
    pub fn field(&self, key: &str, value: impl Display) -> String {
        if !self.color {
            return format!("  {}: {}", key, value);
        }
        format!(
            "  {} {}",
            self.paint(format!("{}:", key)).dim(),
            self.paint(value).bold()
        )
    }

    /// A red headline for a failed check.
    pub fn failure(&self, message: impl Display) -> String {
        if !self.color {
            return message.to_string();
        }
        self.paint(message).red().bold().to_string()
    }

    // `console` drops styles when stdout is not a tty; `--color always` keeps them.
    fn paint<D>(&self, value: D) -> StyledObject<D> {
        style(value).force_styling(true)
    }
}

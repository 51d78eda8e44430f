use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI escapes for each kind of output element; empty strings when disabled.
#[derive(Clone, Copy)]
pub struct Colors {
    pub section: &'static str,
    pub origin: &'static str,
    pub error: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                section: "\x1b[36m", // Cyan
                origin: "\x1b[2m",   // Dim
                error: "\x1b[31m",   // Red
                enabled: true,
            }
        } else {
            Self {
                section: "",
                origin: "",
                error: "",
                enabled: false,
            }
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Decide whether stream output should be colored.
///
/// Priority: `--no-color` > `--color` > `NO_COLOR` env > TTY detection
pub fn should_use_colors(force_color: bool, no_color: bool, stream_is_terminal: bool) -> bool {
    decide_colors(
        force_color,
        no_color,
        std::env::var_os("NO_COLOR").is_some(),
        stream_is_terminal,
    )
}

fn decide_colors(
    force_color: bool,
    no_color: bool,
    no_color_env: bool,
    stream_is_terminal: bool,
) -> bool {
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if no_color_env {
        return false;
    }
    stream_is_terminal
}

pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

pub fn stderr_is_terminal() -> bool {
    io::stderr().is_terminal()
}

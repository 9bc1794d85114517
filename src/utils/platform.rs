use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

use crate::color::ColorTier;

#[derive(Debug, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub os_name: String,
    pub arch: String,
    pub terminal: String,
    pub shell: String,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub color_tier: ColorTier,
    pub render_threads: usize,
}

impl PlatformInfo {
    pub fn detect() -> Result<Self> {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));

        Ok(Self {
            os_name: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            terminal: Self::detect_terminal(),
            shell: Self::detect_shell(),
            terminal_width: width,
            terminal_height: height,
            color_tier: detect_color_tier(),
            render_threads: rayon::current_num_threads(),
        })
    }

    fn detect_terminal() -> String {
        if let Ok(term) = env::var("TERM_PROGRAM") {
            return term;
        }
        if let Ok(term) = env::var("TERM") {
            return term;
        }
        "Unknown".to_string()
    }

    fn detect_shell() -> String {
        if let Ok(shell) = env::var("SHELL") {
            shell.rsplit('/').next().unwrap_or("unknown").to_string()
        } else {
            "unknown".to_string()
        }
    }
}

/// Best color tier the current terminal advertises.
pub fn detect_color_tier() -> ColorTier {
    tier_from_env(env::var("COLORTERM").ok().as_deref(), env::var("TERM").ok().as_deref())
}

fn tier_from_env(colorterm: Option<&str>, term: Option<&str>) -> ColorTier {
    if colorterm.is_some_and(|v| v.contains("truecolor") || v.contains("24bit")) {
        return ColorTier::TrueColor;
    }
    match term {
        Some(t) if t.contains("direct") => ColorTier::TrueColor,
        Some(t) if t.contains("256color") => ColorTier::Extended,
        _ => ColorTier::Console,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_env() {
        assert_eq!(tier_from_env(Some("truecolor"), Some("xterm")), ColorTier::TrueColor);
        assert_eq!(tier_from_env(Some("24bit"), None), ColorTier::TrueColor);
        assert_eq!(tier_from_env(None, Some("xterm-direct")), ColorTier::TrueColor);
        assert_eq!(tier_from_env(None, Some("xterm-256color")), ColorTier::Extended);
        assert_eq!(tier_from_env(Some(""), Some("screen-256color")), ColorTier::Extended);
        assert_eq!(tier_from_env(None, Some("vt100")), ColorTier::Console);
        assert_eq!(tier_from_env(None, None), ColorTier::Console);
    }
}

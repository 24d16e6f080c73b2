//! ANSI colors, styles, and the level color table

use crate::core::error::{Result, ShaperError};
use crate::core::log_level::LogLevel;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

pub(crate) const CSI: &str = "\x1b[";
pub(crate) const RESET: &str = "\x1b[0m";

/// The eight named ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Index into the SGR color range (add 30 for foreground, 40 for
    /// background)
    pub(crate) fn ansi_index(&self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
        }
    }
}

impl FromStr for Color {
    type Err = ShaperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            _ => Err(ShaperError::InvalidColor(s.to_string())),
        }
    }
}

/// A `(background, foreground, bold)` style triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub bg: Option<Color>,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub fn new(bg: Option<Color>, fg: Option<Color>, bold: bool) -> Self {
        Self { bg, fg, bold }
    }

    /// SGR parameters for this style, in `bg;fg;bold` order
    pub(crate) fn sgr_params(&self) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(bg) = self.bg {
            params.push((bg.ansi_index() + 40).to_string());
        }
        if let Some(fg) = self.fg {
            params.push((fg.ansi_index() + 30).to_string());
        }
        if self.bold {
            params.push("1".to_string());
        }
        params
    }

    /// Wrap `text` in this style's escape sequence. Empty styles return
    /// the text unchanged.
    pub(crate) fn paint(&self, text: &str) -> String {
        let params = self.sgr_params();
        if params.is_empty() {
            return text.to_string();
        }
        format!("{}{}m{}{}", CSI, params.join(";"), text, RESET)
    }
}

/// Bold-only style used for record keys
pub(crate) fn bold(text: &str) -> String {
    format!("{}1m{}{}", CSI, text, RESET)
}

/// Severity-to-style mapping shared by all render calls on a renderer.
///
/// Cloning shares the underlying table, so reconfiguration through one
/// handle is visible to every renderer holding it. Updates synchronize
/// with in-flight renders through the lock.
#[derive(Debug, Clone)]
pub struct ColorTable {
    styles: Arc<RwLock<HashMap<LogLevel, Style>>>,
}

impl Default for ColorTable {
    /// The default table: TRACE unstyled, DEBUG blue, INFO green,
    /// WARNING yellow, ERROR bold red, CRITICAL bold white on red.
    fn default() -> Self {
        let mut styles = HashMap::new();
        styles.insert(LogLevel::Trace, Style::new(None, None, false));
        styles.insert(LogLevel::Debug, Style::new(None, Some(Color::Blue), false));
        styles.insert(LogLevel::Info, Style::new(None, Some(Color::Green), false));
        styles.insert(
            LogLevel::Warning,
            Style::new(None, Some(Color::Yellow), false),
        );
        styles.insert(LogLevel::Error, Style::new(None, Some(Color::Red), true));
        styles.insert(
            LogLevel::Critical,
            Style::new(Some(Color::Red), Some(Color::White), true),
        );
        Self {
            styles: Arc::new(RwLock::new(styles)),
        }
    }
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table: every level renders unstyled until configured
    pub fn unstyled() -> Self {
        Self {
            styles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Replace a level's style, validating the level and color names.
    ///
    /// `level` must parse to a known severity and each color name must be
    /// one of the eight named colors; violations surface as distinct
    /// configuration errors.
    pub fn set_color(
        &self,
        level: &str,
        bg: Option<&str>,
        fg: Option<&str>,
        bold: bool,
    ) -> Result<()> {
        let level: LogLevel = level.parse()?;
        let bg = bg.map(Color::from_str).transpose()?;
        let fg = fg.map(Color::from_str).transpose()?;
        self.styles.write().insert(level, Style::new(bg, fg, bold));
        Ok(())
    }

    /// Replace a level's style with an already-validated triple
    pub fn set_style(&self, level: LogLevel, style: Style) {
        self.styles.write().insert(level, style);
    }

    /// The style for `level`, if one is defined
    pub fn style_for(&self, level: LogLevel) -> Option<Style> {
        self.styles.read().get(&level).copied()
    }
}

//! Core types module - shared data structures and constants
//!
//! This module defines the plain data used by every layer of the effect engine:
//! the symbolic colour palette, the terminal cell, effect presets and the run
//! options. Nothing here touches the terminal, so the types are usable from the
//! simulations, the renderer and the runner alike.
//!
//! # Frame Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FRAME_MS` | 50 | Frame interval when an effect does not choose one |
//! | `MIN_FRAME_MS` | 10 | Lower clamp for any configured interval |
//! | `MAX_FRAME_MS` | 1000 | Upper clamp for any configured interval |
//!
//! # Fallback Size
//!
//! When the terminal cannot report its size (e.g. output is not a tty) the
//! engine falls back to `FALLBACK_WIDTH` x `FALLBACK_HEIGHT` (80x24).
//!
//! # Examples
//!
//! ```
//! use term_fx_types::{Cell, Color, FireScheme, RunOptions};
//!
//! // Colours parse case-insensitively from their terminal names.
//! assert_eq!(Color::from_str("darkRed"), Some(Color::DarkRed));
//!
//! // A blank cell sits on the black background.
//! assert_eq!(Cell::default(), Cell::blank(Color::Black));
//!
//! // Presets parse the same way.
//! assert_eq!(FireScheme::from_str("blue"), Some(FireScheme::Blue));
//!
//! // Options are built fluently.
//! let opts = RunOptions::default().with_seed(42).with_duration_ms(100);
//! assert_eq!(opts.seed, Some(42));
//! ```

/// Frame interval used when an effect has no preference (50ms = 20 FPS)
pub const DEFAULT_FRAME_MS: u32 = 50;

/// Shortest accepted frame interval
pub const MIN_FRAME_MS: u32 = 10;

/// Longest accepted frame interval
pub const MAX_FRAME_MS: u32 = 1000;

/// Terminal width assumed when the size query fails
pub const FALLBACK_WIDTH: u16 = 80;

/// Terminal height assumed when the size query fails
pub const FALLBACK_HEIGHT: u16 = 24;

/// Symbolic terminal colour palette.
///
/// These are the sixteen standard console colour names. Backends map them to
/// whatever the host terminal supports; no truecolor is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl Color {
    /// All palette entries in console order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkCyan,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    /// Parse a colour from its name (case-insensitive, `grey` accepted)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_fx_types::Color;
    ///
    /// assert_eq!(Color::from_str("cyan"), Some(Color::Cyan));
    /// assert_eq!(Color::from_str("DarkGrey"), Some(Color::DarkGray));
    /// assert_eq!(Color::from_str("chartreuse"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "black" => Some(Color::Black),
            "darkblue" => Some(Color::DarkBlue),
            "darkgreen" => Some(Color::DarkGreen),
            "darkcyan" => Some(Color::DarkCyan),
            "darkred" => Some(Color::DarkRed),
            "darkmagenta" => Some(Color::DarkMagenta),
            "darkyellow" => Some(Color::DarkYellow),
            "gray" | "grey" => Some(Color::Gray),
            "darkgray" | "darkgrey" => Some(Color::DarkGray),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "cyan" => Some(Color::Cyan),
            "red" => Some(Color::Red),
            "magenta" => Some(Color::Magenta),
            "yellow" => Some(Color::Yellow),
            "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::DarkBlue => "darkblue",
            Color::DarkGreen => "darkgreen",
            Color::DarkCyan => "darkcyan",
            Color::DarkRed => "darkred",
            Color::DarkMagenta => "darkmagenta",
            Color::DarkYellow => "darkyellow",
            Color::Gray => "gray",
            Color::DarkGray => "darkgray",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Red => "red",
            Color::Magenta => "magenta",
            Color::Yellow => "yellow",
            Color::White => "white",
        }
    }
}

/// A single terminal cell: one character with foreground and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }

    /// A space on the given background.
    pub const fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::Gray,
            bg,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Color::Black)
    }
}

/// Colour presets for the fire effect
///
/// Each scheme carries its own palette (hottest first), frame interval and
/// spawn intensity:
///
/// | Scheme | Palette | Interval | Intensity |
/// |--------|---------|----------|-----------|
/// | Red    | White → Yellow → Red → DarkRed → Black | 50ms | 1.0 |
/// | Blue   | White → Cyan → Blue → DarkBlue → Black | 40ms | 1.2 |
/// | Green  | White → Yellow → Green → DarkGreen → Black | 45ms | 0.8 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FireScheme {
    #[default]
    Red,
    Blue,
    Green,
}

impl FireScheme {
    /// Parse a scheme from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_fx_types::FireScheme;
    ///
    /// assert_eq!(FireScheme::from_str("GREEN"), Some(FireScheme::Green));
    /// assert_eq!(FireScheme::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(FireScheme::Red),
            "blue" => Some(FireScheme::Blue),
            "green" => Some(FireScheme::Green),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FireScheme::Red => "red",
            FireScheme::Blue => "blue",
            FireScheme::Green => "green",
        }
    }

    /// Palette from hottest to coldest.
    pub fn palette(&self) -> [Color; 5] {
        match self {
            FireScheme::Red => [
                Color::White,
                Color::Yellow,
                Color::Red,
                Color::DarkRed,
                Color::Black,
            ],
            FireScheme::Blue => [
                Color::White,
                Color::Cyan,
                Color::Blue,
                Color::DarkBlue,
                Color::Black,
            ],
            FireScheme::Green => [
                Color::White,
                Color::Yellow,
                Color::Green,
                Color::DarkGreen,
                Color::Black,
            ],
        }
    }

    pub fn frame_interval_ms(&self) -> u32 {
        match self {
            FireScheme::Red => 50,
            FireScheme::Blue => 40,
            FireScheme::Green => 45,
        }
    }

    pub fn intensity(&self) -> f64 {
        match self {
            FireScheme::Red => 1.0,
            FireScheme::Blue => 1.2,
            FireScheme::Green => 0.8,
        }
    }
}

/// Options recognised by the effect runner.
///
/// Every field is optional: a missing interval falls back to the effect's own
/// default, a missing duration means "until a key is pressed", and a missing
/// seed is drawn from system entropy once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub frame_interval_ms: Option<u32>,
    pub duration_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl RunOptions {
    pub fn with_frame_interval_ms(mut self, ms: u32) -> Self {
        self.frame_interval_ms = Some(ms);
        self
    }

    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve the interval to use, given the effect's preference.
    ///
    /// The result is clamped to `MIN_FRAME_MS..=MAX_FRAME_MS`.
    pub fn effective_interval_ms(&self, effect_default_ms: u32) -> u32 {
        self.frame_interval_ms
            .unwrap_or(effect_default_ms)
            .clamp(MIN_FRAME_MS, MAX_FRAME_MS)
    }
}

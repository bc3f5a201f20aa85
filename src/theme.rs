//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants. Dark is the default; the feed is meant to
/// look like the black-backed original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// Role names in the same order as the styles array in
/// `StyleMap::from_palette`.
const ROLE_NAMES: [&str; 12] = [
    "card_border",
    "card_border_active",
    "author",
    "description",
    "song",
    "screen",
    "progress",
    "progress_label",
    "sidebar_counter",
    "status_bar",
    "empty_state",
    "position",
];

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Player card --
    pub card_border: Style,
    pub card_border_active: Style,
    pub author: Style,
    pub description: Style,
    pub song: Style,
    pub screen: Style,
    pub progress: Style,
    pub progress_label: Style,

    // -- Sidebar --
    pub sidebar_counter: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub empty_state: Style,
    pub position: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            card_border: Style::default().fg(Color::DarkGray),
            card_border_active: Style::default().fg(Color::Magenta),
            author: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            description: Style::default().fg(Color::Gray),
            song: Style::default().fg(Color::Cyan),
            screen: Style::default().fg(Color::White).bg(Color::Black),
            progress: Style::default().fg(Color::Magenta),
            progress_label: Style::default().fg(Color::DarkGray),
            sidebar_counter: Style::default().fg(Color::White),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            empty_state: Style::default().fg(Color::DarkGray),
            position: Style::default().fg(Color::DarkGray),
        }
    }

    fn light() -> Self {
        Self {
            card_border: Style::default().fg(Color::Gray),
            card_border_active: Style::default().fg(Color::Magenta),
            author: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            description: Style::default().fg(Color::DarkGray),
            song: Style::default().fg(Color::Blue),
            screen: Style::default().fg(Color::Black).bg(Color::White),
            progress: Style::default().fg(Color::Magenta),
            progress_label: Style::default().fg(Color::Gray),
            sidebar_counter: Style::default().fg(Color::Black),
            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            empty_state: Style::default().fg(Color::Gray),
            position: Style::default().fg(Color::Gray),
        }
    }
}

// ============================================================================
// Style Map: role-name lookup
// ============================================================================

/// Resolves semantic role names to concrete styles.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 12] = [
            p.card_border,
            p.card_border_active,
            p.author,
            p.description,
            p.song,
            p.screen,
            p.progress,
            p.progress_label,
            p.sidebar_counter,
            p.status_bar,
            p.empty_state,
            p.position,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Build the map for a named variant, defaulting to Dark for unknown
    /// names (with a warning, since it is probably a config typo).
    pub fn for_theme_name(name: &str) -> Self {
        let variant = ThemeVariant::from_str_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = %name, "Unknown theme name, using dark");
            ThemeVariant::Dark
        });
        Self::from_palette(&variant.palette())
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for
    /// unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

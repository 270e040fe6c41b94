//! Palette for reply-pro
//! A dark greyscale base with a single blue accent for actions

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // ─────────────────────────────────────────────────────────────────────
    // Greyscale, brightest to darkest
    // ─────────────────────────────────────────────────────────────────────

    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Headers, selected items
    pub const GREY_50: Color = Color::Rgb(252, 252, 252);

    /// Primary text
    pub const GREY_100: Color = Color::Rgb(240, 240, 240);

    /// Muted text
    pub const GREY_300: Color = Color::Rgb(190, 190, 190);

    pub const GREY_400: Color = Color::Rgb(155, 155, 155);

    /// Borders, separators
    pub const GREY_500: Color = Color::Rgb(120, 120, 120);

    pub const GREY_600: Color = Color::Rgb(70, 70, 70);

    /// Toast and banner backgrounds
    pub const GREY_700: Color = Color::Rgb(45, 45, 45);

    /// Main background
    pub const GREY_900: Color = Color::Rgb(16, 16, 16);

    pub const BG: Color = Self::GREY_900;

    // ─────────────────────────────────────────────────────────────────────
    // Accents
    // ─────────────────────────────────────────────────────────────────────

    pub const ACCENT: Color = Color::Rgb(96, 150, 255);

    /// Estimates and confirmations
    pub const GREEN: Color = Color::Rgb(130, 220, 130);

    pub const RED: Color = Color::Rgb(230, 120, 120);

    /// Attachment file-type badges
    pub const INDIGO: Color = Color::Rgb(150, 140, 255);

    // ─────────────────────────────────────────────────────────────────────
    // Glyphs
    // ─────────────────────────────────────────────────────────────────────

    pub const LOGO: &'static str = "Ki's Smart AI Reply Pro";
    pub const TAGLINE: &'static str = "AI Powered Agency Assistant";

    pub const SPINNER_BRAILLE: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    pub const CHECK_MARK: char = '✓';
    pub const CURSOR: char = '▏';
    pub const BULLET: char = '●';
    pub const DOT_SEPARATOR: char = '·';

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    pub fn bg() -> Style {
        Style::default().bg(Self::BG)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::GREY_100)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::GREY_500)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::GREY_50)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default()
            .fg(Self::GREY_400)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::GREY_600)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Keybinding highlight
    pub fn key() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    /// Enabled primary action
    pub fn button() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_disabled() -> Style {
        Style::default().fg(Self::GREY_400).bg(Self::GREY_700)
    }
}

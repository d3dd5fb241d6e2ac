//! Midnight theme: near-black background with a cyan to purple gradient

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x0a, 0x0a, 0x0f),
        bg1: Color::Rgb(0x12, 0x12, 0x1a),
        bg2: Color::Rgb(0x16, 0x16, 0x1f),
        fg0: Color::Rgb(0xff, 0xff, 0xff),
        fg1: Color::Rgb(0xd1, 0xd5, 0xdb),
        muted: Color::Rgb(0x6b, 0x72, 0x80),
        accent: Color::Rgb(0x00, 0xd4, 0xff),
        secondary: Color::Rgb(0x00, 0x77, 0xb6),
        highlight: Color::Rgb(0x8b, 0x5c, 0xf6),
        selection: Color::Rgb(0x1f, 0x29, 0x37),
        error: Color::Rgb(0xef, 0x44, 0x44),
        success: Color::Rgb(0x22, 0xc5, 0x5e),
        warning: Color::Rgb(0xf5, 0x9e, 0x0b),
        info: Color::Rgb(0x38, 0xbd, 0xf8),
    }
}

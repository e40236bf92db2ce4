use ratatui::style::{Color, Modifier, Style};

/// Colours for one theme mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub card: Color,
    pub error: Color,
    pub success: Color,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(0xff, 0xff, 0xff),
    foreground: Color::Rgb(0x00, 0x00, 0x00),
    muted: Color::Rgb(0x60, 0x60, 0x60),
    accent: Color::Rgb(0x80, 0x00, 0x80),
    highlight: Color::Rgb(0x6a, 0x61, 0xa1),
    card: Color::Rgb(0xf2, 0xf2, 0xf2),
    error: Color::Rgb(0xc6, 0x28, 0x28),
    success: Color::Rgb(0x2e, 0x7d, 0x32),
};

const DARK: Palette = Palette {
    background: Color::Rgb(0x1e, 0x1b, 0x29),
    foreground: Color::Rgb(0xe0, 0xe0, 0xe0),
    muted: Color::Rgb(0x80, 0x80, 0x80),
    accent: Color::Rgb(0x66, 0x00, 0x81),
    highlight: Color::Rgb(0x4c, 0x4a, 0x7e),
    card: Color::Rgb(0x2a, 0x26, 0x38),
    error: Color::Rgb(0xef, 0x53, 0x50),
    success: Color::Rgb(0x66, 0xbb, 0x6a),
};

impl Palette {
    pub fn for_mode(dark: bool) -> Palette {
        if dark {
            DARK
        } else {
            LIGHT
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

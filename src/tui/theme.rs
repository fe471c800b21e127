use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(16, 18, 22);
pub const SURFACE: Color = Color::Rgb(24, 27, 33);
pub const BORDER: Color = Color::Rgb(52, 58, 70);
pub const BORDER_FOCUS: Color = Color::Rgb(196, 160, 68);
pub const TEXT: Color = Color::Rgb(226, 222, 210);
pub const TEXT_DIM: Color = Color::Rgb(120, 124, 132);
pub const GOLD: Color = Color::Rgb(196, 160, 68);
pub const GREEN: Color = Color::Rgb(92, 160, 110);
pub const AMBER: Color = Color::Rgb(220, 142, 60);
pub const RED: Color = Color::Rgb(200, 86, 70);

pub const TODAY: Color = Color::Rgb(59, 130, 246);
pub const DST: Color = Color::Rgb(255, 107, 107);

/// Fill colours of the year chart, bottom segment first.
pub const SEGMENTS: [Color; 6] = [
    Color::Rgb(224, 224, 224),
    Color::Rgb(136, 132, 216),
    Color::Rgb(130, 202, 157),
    Color::Rgb(255, 198, 88),
    Color::Rgb(255, 115, 0),
    Color::Rgb(141, 209, 225),
];

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { BORDER_FOCUS } else { BORDER })
}

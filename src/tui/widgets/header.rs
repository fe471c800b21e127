use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::hijri::ScheduleDate;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    date: &ScheduleDate,
    mosque: Option<&str>,
    device: Option<&str>,
) {
    let title_line = Line::from(vec![
        Span::styled("  أذان  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("adhan", theme::gold()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(date.gregorian.as_str(), theme::bold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(date.hijri.as_str(), theme::amber()),
    ]);

    let place_line = Line::from(vec![
        Span::styled(mosque.unwrap_or("No mosque selected"), theme::dim()),
        Span::styled("  →  ", theme::dim()),
        Span::styled(device.unwrap_or("no device"), theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, date_line, place_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

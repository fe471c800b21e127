use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::schedule::board::PrayerRow;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, next: Option<&PrayerRow>) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(row) = next else {
        let done = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  All prayers have passed today", theme::dim())),
        ]);
        frame.render_widget(done, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    let name = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::gold().add_modifier(Modifier::BOLD))
        .lines(vec![row.label.to_uppercase().into()])
        .build();
    frame.render_widget(name, chunks[0]);

    let countdown = row.state.countdown.as_deref().unwrap_or_default();
    let detail = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("  at  ", theme::dim()),
            Span::styled(row.time.as_str(), theme::bold()),
        ]),
        Line::from(vec![
            Span::styled("  in  ", theme::dim()),
            Span::styled(countdown, theme::amber().add_modifier(Modifier::BOLD)),
        ]),
    ]);
    frame.render_widget(detail, chunks[1]);
}

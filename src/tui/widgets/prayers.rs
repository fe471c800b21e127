use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::schedule::board::PrayerRow;
use crate::tui::theme;
use crate::utils::format::{format_time_12h, pad_display};

pub fn render(frame: &mut Frame, area: Rect, rows: &[PrayerRow], clock_24h: bool) {
    let block = Block::default()
        .title(Span::styled(" Prayer Times ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    if rows.is_empty() {
        let empty = List::new(vec![
            ListItem::new(""),
            ListItem::new(Span::styled(
                "  No prayer times available",
                theme::dim(),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let time = if clock_24h {
                row.time.clone()
            } else {
                format_time_12h(Some(&row.time))
            };

            let (icon, status, status_style) = if row.state.is_next {
                ("▶", "next", theme::amber())
            } else if row.state.passed {
                ("●", "passed", theme::dim())
            } else {
                ("○", "upcoming", theme::dim())
            };

            let name_style = if row.state.is_next {
                theme::gold().add_modifier(Modifier::BOLD)
            } else if row.state.passed {
                theme::dim()
            } else {
                theme::bold()
            };

            let file = if row.has_file {
                Span::styled(" ♪", theme::green())
            } else {
                Span::styled(" ⚠", theme::amber())
            };
            let scheduled = if row.scheduled {
                Span::styled(" ⏰", theme::green())
            } else {
                Span::styled(" ✗", theme::red())
            };

            let line = Line::from(vec![
                Span::styled(format!("  {}", pad_display(&row.label, 20)), name_style),
                Span::styled(format!("{:<10}", time), theme::dim()),
                Span::styled(icon, status_style),
                Span::styled(format!(" {:<9}", status), theme::dim()),
                file,
                scheduled,
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

const DASHBOARD_HINTS: [(&str, &str); 7] = [
    ("[y]", " year  "),
    ("[r]", " reload  "),
    ("[↑↓]", " jobs  "),
    ("[x]", " remove job  "),
    ("[l]", " log  "),
    ("[?]", " help  "),
    ("[Esc]", " quit"),
];

const YEAR_HINTS: [(&str, &str); 4] = [
    ("[←→]", " year  "),
    ("[y]", " dashboard  "),
    ("[?]", " help  "),
    ("[Esc]", " quit"),
];

pub fn render(frame: &mut Frame, area: Rect, year_view: bool, status: Option<&str>) {
    let hints: &[(&str, &str)] = if year_view { &YEAR_HINTS } else { &DASHBOARD_HINTS };

    let mut spans = Vec::new();
    if let Some(msg) = status {
        spans.push(Span::styled(format!("{}   ", msg), theme::amber()));
    }
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme::gold()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

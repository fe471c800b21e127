use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{ScheduledJob, display_label};
use crate::tui::theme;
use crate::utils::format::{format_last_run, format_time_12h};

pub fn render(frame: &mut Frame, area: Rect, jobs: &[ScheduledJob], focused_idx: usize, focused: bool) {
    let block = Block::default()
        .title(Span::styled(" Scheduled Jobs ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let items: Vec<ListItem> = if jobs.is_empty() {
        vec![ListItem::new(Span::styled("  No scheduled jobs", theme::dim()))]
    } else {
        jobs.iter()
            .enumerate()
            .map(|(i, job)| {
                let name_style = if focused && i == focused_idx {
                    theme::gold().add_modifier(Modifier::BOLD)
                } else {
                    theme::bold()
                };
                ListItem::new(vec![
                    Line::from(Span::styled(format!("  {}", display_label(&job.prayer)), name_style)),
                    Line::from(vec![
                        Span::styled("    planned ", theme::dim()),
                        Span::styled(format_time_12h(job.planned_time().as_deref()), theme::amber()),
                        Span::styled("  last run ", theme::dim()),
                        Span::styled(format_last_run(job.last_run.as_deref()), theme::dim()),
                    ]),
                ])
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}

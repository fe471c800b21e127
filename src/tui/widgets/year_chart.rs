use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Widget},
    Frame,
};

use crate::schedule::year::{percent_to_hour_label, Segments, YearChart, AXIS_TICKS};
use crate::tui::theme;

const AXIS_WIDTH: u16 = 4;

/// Index of the stacked segment covering `percent`, counting from the bottom.
/// Negative segments occupy no height.
pub fn segment_at(segments: &Segments, percent: f64) -> usize {
    let mut top = 0.0;
    for (i, len) in segments.as_array().iter().enumerate() {
        top += len.max(0.0);
        if percent < top {
            return i;
        }
    }
    5
}

/// Rows drawn in column `x` when `len` rows share `width` columns.
pub fn column_rows(len: usize, width: usize, x: usize) -> Range<usize> {
    if len == 0 || width == 0 {
        return 0..0;
    }
    let start = x * len / width;
    let end = ((x + 1) * len / width).max(start + 1).min(len);
    start..end
}

pub struct YearChartWidget<'a> {
    pub chart: &'a YearChart,
}

impl Widget for YearChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = &self.chart.rows;
        if area.width <= AXIS_WIDTH || area.height == 0 || rows.is_empty() {
            return;
        }
        let plot_x = area.x + AXIS_WIDTH;
        let plot_w = (area.width - AXIS_WIDTH) as usize;
        let plot_h = area.height as usize;

        for tick in AXIS_TICKS {
            let y_from_bottom = ((tick / 100.0) * (plot_h - 1) as f64).round() as u16;
            let y = area.y + area.height - 1 - y_from_bottom;
            buf.set_string(area.x, y, percent_to_hour_label(tick), theme::dim());
        }

        for x in 0..plot_w {
            let days = column_rows(rows.len(), plot_w, x);
            let Some(row) = rows.get(days.start) else {
                continue;
            };
            let covered = &rows[days];
            let marker = if covered.iter().any(|r| Some(r.day_of_year) == self.chart.today) {
                Some(('│', theme::TODAY))
            } else if covered.iter().any(|r| self.chart.dst_days.contains(&r.day_of_year)) {
                Some(('┊', theme::DST))
            } else {
                None
            };

            let empty = row.segments.total() <= 0.0;
            for y in 0..plot_h {
                let percent = ((plot_h - 1 - y) as f64 + 0.5) / plot_h as f64 * 100.0;
                let color = if empty {
                    theme::SURFACE
                } else {
                    theme::SEGMENTS[segment_at(&row.segments, percent)]
                };
                let pos = (plot_x + x as u16, area.y + y as u16);
                if let Some(cell) = buf.cell_mut(pos) {
                    match marker {
                        Some((symbol, fg)) => {
                            cell.set_char(symbol).set_style(Style::default().fg(fg).bg(color));
                        }
                        None => {
                            cell.set_char(' ').set_style(Style::default().bg(color));
                        }
                    }
                }
            }
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, chart: Option<&YearChart>) {
    let title = match chart {
        Some(c) => format!(" Prayer Times Throughout {} ", c.year),
        None => " Prayer Times Throughout the Year ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match chart.filter(|c| !c.rows.is_empty()) {
        Some(chart) => frame.render_widget(YearChartWidget { chart }, inner),
        None => frame.render_widget(
            Span::styled("  No data available for the chart", theme::dim()),
            inner,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearDayRecord;
    use crate::schedule::year::transform;

    fn chart(today: Option<u32>, dst_days: Vec<u32>) -> YearChart {
        let days: Vec<YearDayRecord> = (1..=4)
            .map(|n| YearDayRecord {
                day_of_year: n,
                date: format!("2025-01-0{}", n),
                fajr: "06:00".into(),
                dhuhr: "12:00".into(),
                asr: "15:00".into(),
                maghrib: "18:00".into(),
                isha: "20:00".into(),
                is_dst: false,
                gregorian: String::new(),
                hijri: String::new(),
            })
            .collect();
        YearChart { year: 2025, rows: transform(&days), today, dst_days }
    }

    #[test]
    fn segment_lookup_from_bottom() {
        let c = chart(None, vec![]);
        let seg = &c.rows[0].segments;
        assert_eq!(segment_at(seg, 0.0), 0);
        assert_eq!(segment_at(seg, 30.0), 1);
        assert_eq!(segment_at(seg, 99.9), 5);
        assert_eq!(segment_at(seg, 100.0), 5);
    }

    #[test]
    fn columns_cover_every_row() {
        let covered: Vec<usize> = (0..3).flat_map(|x| column_rows(7, 3, x)).collect();
        assert_eq!(covered, (0..7).collect::<Vec<_>>());
        assert_eq!(column_rows(2, 5, 4), 1..2);
        assert_eq!(column_rows(0, 5, 0), 0..0);
    }

    #[test]
    fn draws_axis_and_markers() {
        let c = chart(Some(2), vec![4]);
        let area = Rect::new(0, 0, 8, 5);
        let mut buf = Buffer::empty(area);
        YearChartWidget { chart: &c }.render(area, &mut buf);

        assert_eq!(buf[(0, 4)].symbol(), "0");
        assert_eq!(buf[(0, 0)].symbol(), "2");
        // four plot columns, one per day
        assert_eq!(buf[(5, 2)].symbol(), "│");
        assert_eq!(buf[(7, 2)].symbol(), "┊");
        assert_eq!(buf[(4, 4)].bg, theme::SEGMENTS[0]);
        assert_eq!(buf[(4, 0)].bg, theme::SEGMENTS[5]);
    }

    #[test]
    fn unparsable_day_draws_an_empty_column() {
        let mut c = chart(None, vec![]);
        c.rows[1].segments = Segments::default();
        let area = Rect::new(0, 0, 8, 5);
        let mut buf = Buffer::empty(area);
        YearChartWidget { chart: &c }.render(area, &mut buf);
        for y in 0..5 {
            assert_eq!(buf[(5, y)].bg, theme::SURFACE);
        }
        assert_eq!(buf[(6, 4)].bg, theme::SEGMENTS[0]);
    }

    #[test]
    fn tiny_area_draws_nothing() {
        let c = chart(None, vec![]);
        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);
        YearChartWidget { chart: &c }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}

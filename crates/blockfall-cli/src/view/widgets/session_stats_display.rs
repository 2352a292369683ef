use std::iter;

use blockfall_engine::GameStats;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

pub struct SessionStatsDisplay<'a> {
    stats: &'a GameStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(stats: &'a GameStats) -> Self {
        Self { stats, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameStats) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameStats) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|stats| stats.score().to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|stats| {
        let dur = stats.play_time();
        format!(
            "{:0}:{:0>2}.{:0>2}",
            dur.as_secs() / 60,
            dur.as_secs() % 60,
            dur.subsec_millis() / 10
        )
    }),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|stats| stats.level().to_string()),
    Row::LabelValue("LINES:", &|stats| stats.lines().to_string()),
    Row::LabelValue("TOTAL:", &|stats| stats.total_cleared_lines().to_string()),
    Row::Empty,
    Row::LabelValue("PIECES:", &|stats| stats.completed_pieces().to_string()),
    Row::LabelValue("SINGLES:", &|stats| {
        stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|stats| {
        stats.line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|stats| {
        stats.line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("QUADS:", &|stats| stats.line_cleared_counter()[4].to_string()),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.stats), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.stats), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

use super::style;

/// One-line key reference for the current screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpDisplay {
    Idle,
    Running,
    Paused,
    GameOver,
}

impl HelpDisplay {
    pub fn text(self) -> &'static str {
        match self {
            HelpDisplay::Idle | HelpDisplay::GameOver => "Enter (Play) | Q (Exit)",
            HelpDisplay::Running => {
                "← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | Esc (Give Up) | Q (Exit)"
            }
            HelpDisplay::Paused => "P (Resume) | Esc (Give Up) | Q (Exit)",
        }
    }
}

impl Widget for HelpDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(self.text(), style::HELP)
            .centered()
            .render(area, buf);
    }
}

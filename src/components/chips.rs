use crate::state::app_state::PresetChip;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::Widget;

/// One-line row of preset chips: `F1 Spooky & cozy  F2 Unwind ...`.
pub struct ChipBar<'a> {
    pub chips: &'a [PresetChip],
}

impl Widget for ChipBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &chip_line(self.chips), area.width);
    }
}

pub fn chip_line(chips: &[PresetChip]) -> Line<'static> {
    let mut spans = Vec::with_capacity(chips.len() * 3);
    for (i, chip) in chips.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!(" F{} ", i + 1),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", chip.label),
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_state::PRESET_CHIPS;

    #[test]
    fn chips_are_numbered_from_f1() {
        let line = chip_line(&PRESET_CHIPS);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with(" F1  Spooky & cozy"));
        assert!(text.contains(" F4  Deep RPG"));
    }
}

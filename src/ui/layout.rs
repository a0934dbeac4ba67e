use tui::layout::{Constraint, Layout, Rect, Size};

pub const HEADER_HEIGHT: u16 = 3;
pub const PROMPT_HEIGHT: u16 = 5;
pub const RAW_EXPLANATIONS_HEIGHT: u16 = 7;
pub const LOGS_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: [Rect; 2],
    pub prompt: Rect,
    pub chips: Rect,
    pub status: Rect,
    pub curator: Rect,
    pub results: Rect,
    /// `Rect::ZERO` when there is no explanation blob to show.
    pub raw_explanations: Rect,
    /// `Rect::ZERO` unless the log pane is toggled on.
    pub logs: Rect,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutFlags {
    pub full_screen: bool,
    pub show_raw: bool,
    pub show_logs: bool,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, LayoutFlags::default())
    }

    pub fn update(&mut self, area: Rect, flags: LayoutFlags) {
        *self = Self::from_rect(area, flags);
    }

    fn from_rect(area: Rect, flags: LayoutFlags) -> Self {
        let header_height = if flags.full_screen { 0 } else { HEADER_HEIGHT };
        let raw_height = if flags.show_raw { RAW_EXPLANATIONS_HEIGHT } else { 0 };
        let logs_height = if flags.show_logs { LOGS_HEIGHT } else { 0 };

        let [header, prompt, chips, status, curator, results, raw, logs] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(PROMPT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(raw_height),
            Constraint::Length(logs_height),
        ])
        .areas(area);

        LayoutAreas {
            header: if flags.full_screen {
                [Rect::ZERO, Rect::ZERO]
            } else {
                Self::split_header(header)
            },
            prompt,
            chips,
            status,
            curator,
            results,
            raw_explanations: if flags.show_raw { raw } else { Rect::ZERO },
            logs: if flags.show_logs { logs } else { Rect::ZERO },
        }
    }

    fn split_header(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_panes_collapse_when_off() {
        let areas = LayoutAreas::new(Size::new(100, 40));
        assert_eq!(areas.raw_explanations, Rect::ZERO);
        assert_eq!(areas.logs, Rect::ZERO);
        assert_eq!(areas.header[0].height, HEADER_HEIGHT);
        assert!(areas.results.height > 0);
    }

    #[test]
    fn full_screen_drops_the_header() {
        let mut areas = LayoutAreas::new(Size::new(100, 40));
        areas.update(
            Rect::new(0, 0, 100, 40),
            LayoutFlags { full_screen: true, show_raw: true, show_logs: true },
        );
        assert_eq!(areas.header, [Rect::ZERO, Rect::ZERO]);
        assert_eq!(areas.prompt.y, 0);
        assert_eq!(areas.raw_explanations.height, RAW_EXPLANATIONS_HEIGHT);
        assert_eq!(areas.logs.height, LOGS_HEIGHT);
    }
}

use crate::curation::render::{Card, HIDDEN_GEM_LABEL, RenderedView};
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget, Wrap};

const IDLE_HINT: &str = "Your recommendations will show up here.";

/// Scrollable list of result cards, or the "no matches" placeholder.
pub struct ResultsPanel<'a> {
    pub view: &'a RenderedView,
    pub scroll_offset: u16,
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if let Some(placeholder) = self.view.placeholder {
            Paragraph::new(placeholder)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        if self.view.is_empty() {
            Paragraph::new(IDLE_HINT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let mut lines = Vec::new();
        for (i, card) in self.view.cards.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.extend(card_lines(card));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0))
            .render(area, buf);
    }
}

/// The lines for one card. Optional parts are simply left out.
pub fn card_lines(card: &Card) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            card.heading(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("◆ {HIDDEN_GEM_LABEL}"), Style::default().fg(Color::Magenta)),
    ])];

    if let Some(genres) = &card.genres {
        lines.push(Line::from(Span::styled(genres.clone(), Style::default().fg(Color::Cyan))));
    }
    if let Some(details) = &card.details {
        lines.push(Line::from(Span::styled(
            details.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !card.description.is_empty() {
        lines.push(Line::from(Span::styled(
            card.description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(quote) = &card.quote {
        lines.push(Line::from(Span::styled(
            format!("“{quote}”"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(explanation) = &card.explanation {
        lines.push(Line::from(vec![
            Span::styled("→ ", Style::default().fg(Color::Green)),
            Span::styled(explanation.clone(), Style::default().fg(Color::Green)),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn bare_card_is_just_a_heading() {
        let card = Card {
            title: "Untitled Game".into(),
            decoration: None,
            genres: None,
            details: None,
            description: String::new(),
            quote: None,
            explanation: None,
        };
        let lines = card_lines(&card);
        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "Untitled Game  ◆ hidden gem");
    }

    #[test]
    fn full_card_shows_every_block_in_order() {
        let card = Card {
            title: "Dredge".into(),
            decoration: Some("👻"),
            genres: Some("Horror • Adventure".into()),
            details: Some("Genre: Horror | Platform: PC | Rating: 8".into()),
            description: "Fishing, but wrong.".into(),
            quote: Some("Don't stay out after dark.".into()),
            explanation: Some("Great pick for horror fans.".into()),
        };
        let lines: Vec<String> = card_lines(&card).iter().map(text).collect();
        assert_eq!(
            lines,
            vec![
                "Dredge 👻  ◆ hidden gem",
                "Horror • Adventure",
                "Genre: Horror | Platform: PC | Rating: 8",
                "Fishing, but wrong.",
                "“Don't stay out after dark.”",
                "→ Great pick for horror fans.",
            ]
        );
    }

    #[test]
    fn placeholder_renders_instead_of_cards() {
        let view = RenderedView {
            placeholder: Some("nothing here"),
            ..Default::default()
        };
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ResultsPanel { view: &view, scroll_offset: 0 }.render(area, &mut buf);
        let row: String = (0..20u16).map(|x| buf[(x, 0u16)].symbol().to_string()).collect();
        assert!(row.contains("nothing here"));
    }
}

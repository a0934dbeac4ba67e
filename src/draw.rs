use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::cards::ResultsPanel;
use crate::components::chips::ChipBar;
use crate::state::app_state::{BackendState, PRESET_CHIPS, Status};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::{LayoutAreas, LayoutFlags};

const KEY_LEGEND: &str = "Enter=find  Alt+Enter=newline  F1-F4=presets  ↑/↓=scroll  Ctrl+L=logs  Esc=quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(
            f.area(),
            LayoutFlags {
                full_screen: app.settings.full_screen,
                show_raw: app.state.results.view.raw_explanations.is_some(),
                show_logs: app.state.show_logs,
            },
        );

        if !app.settings.full_screen {
            draw_header(f, layout.header, app);
        }
        draw_prompt(f, layout.prompt, app);
        f.render_widget(ChipBar { chips: &PRESET_CHIPS }, layout.chips);
        draw_status(f, layout.status, &app.state.status);
        draw_curator(f, layout.curator, app);
        draw_results(f, layout.results, app);
        draw_raw_explanations(f, layout.raw_explanations, app);
        draw_logs(f, layout.logs);

        draw_loading_spinner(f, layout.prompt, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, header: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" Game2Match ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("· {} · {}", app.settings.variant.label(), app.settings.api_url),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
            .border_type(border_type),
    )
    .style(style);
    f.render_widget(title, header[0]);

    let backend_color = match app.state.backend {
        BackendState::Online { .. } => Color::Green,
        BackendState::Offline => Color::Red,
        BackendState::Unknown => Color::DarkGray,
    };
    let backend = Paragraph::new(format!("{} ", app.state.backend.label()))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(Style::default().fg(backend_color));
    f.render_widget(backend, header[1]);
}

fn draw_prompt(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::Yellow).title(" What are you in the mood for? ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let text = format!("{}_", app.state.prompt.input);
    let line_count = text.lines().count().max(1) as u16;
    let scroll = line_count.saturating_sub(inner.height);
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );
}

fn draw_status(f: &mut Frame, area: Rect, status: &Status) {
    let style = if status.is_error() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(Paragraph::new(status.message()).style(style), area);
}

fn draw_curator(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.state.results.view;
    let mut lines = Vec::new();
    if !view.curator_line.is_empty() {
        lines.push(Line::from(Span::styled(
            view.curator_line.as_str(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(read_as) = view.read_as.as_deref() {
        lines.push(Line::from(Span::styled(read_as, Style::default().fg(Color::DarkGray))));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_results(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Hidden gems ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let [content, legend] = tui::layout::Layout::vertical([
        tui::layout::Constraint::Fill(1),
        tui::layout::Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        ResultsPanel {
            view: &app.state.results.view,
            scroll_offset: app.state.results.scroll_offset,
        },
        content,
    );
    f.render_widget(
        Paragraph::new(KEY_LEGEND).style(Style::default().fg(Color::DarkGray)),
        legend,
    );
}

fn draw_raw_explanations(f: &mut Frame, area: Rect, app: &App) {
    let Some(raw) = app.state.results.view.raw_explanations.as_deref() else {
        return;
    };
    if area.height == 0 {
        return;
    }
    let block = default_border(Color::DarkGray).title(" Why these games ");
    f.render_widget(
        Paragraph::new(raw)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    f.render_widget(
        TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Logs "))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, prompt_area: Rect, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    if prompt_area.width < 4 {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = Rect::new(prompt_area.x + prompt_area.width - 3, prompt_area.y, 1, 1);
    f.render_widget(spinner, area);
}

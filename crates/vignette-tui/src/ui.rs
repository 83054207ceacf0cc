//! Rendering: scenario panel, decision sidebar, outcome dialog, status bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use vignette_core::Phase;

use crate::app::App;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[0]);

    draw_scenario(frame, app, panels[0]);
    draw_transcript(frame, app, panels[1]);
    draw_status(frame, app, chunks[1]);

    if app.session.dialog_visible() {
        draw_outcome_dialog(frame, app);
    }
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
}

/// Letter label for an option, as shown next to its text.
fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

fn draw_scenario(frame: &mut Frame, app: &App, area: Rect) {
    let scenario = match app.session.current_scenario() {
        Ok(scenario) => scenario,
        Err(e) => {
            let msg = Paragraph::new(Span::styled(
                e.to_string(),
                Style::default().fg(Color::Red),
            ))
            .block(panel_block(" Scenario "));
            frame.render_widget(msg, area);
            return;
        }
    };

    let mut lines: Vec<Line> = scenario
        .question
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().bold())))
        .collect();
    lines.push(Line::from(""));

    for (i, choice) in scenario.options.iter().enumerate() {
        let (marker, style) = if i == app.highlight {
            (
                "> ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}) {}", option_letter(i), choice.text),
            style,
        )));
    }

    if scenario.is_terminal() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Each option here ends the story; the scene stays open to explore.",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel_block(" Scenario "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let entries = app.session.transcript().entries();
    let mut lines: Vec<Line> = Vec::new();
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "No decisions yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (n, entry) in entries.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", n + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(entry.choice.clone(), Style::default().fg(Color::White)),
        ]));
        if let Some(response) = &entry.response {
            lines.push(Line::from(Span::styled(
                format!("   \"{response}\""),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    // pin the tail when the list outgrows the panel
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let paragraph = Paragraph::new(lines)
        .block(panel_block(" Decisions "))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_outcome_dialog(frame: &mut Frame, app: &App) {
    let Some(choice) = app.session.selected_choice() else {
        return;
    };
    let requires_input = choice.requires_free_text;

    let area = centered_rect(60, if requires_input { 50 } else { 35 }, frame.area());
    let block = Block::default()
        .title(" Outcome ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let constraints = if requires_input {
        vec![
            Constraint::Min(1),    // Outcome text
            Constraint::Length(3), // Input field
            Constraint::Length(1), // Hint
        ]
    } else {
        vec![Constraint::Min(1), Constraint::Length(1)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let outcome: Vec<Line> = choice
        .outcome
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    frame.render_widget(
        Paragraph::new(outcome).wrap(Wrap { trim: false }),
        chunks[0],
    );

    if requires_input {
        let input = Paragraph::new(format!("> {}", app.field.text())).block(
            Block::default()
                .title(" Your action ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(input, chunks[1]);

        let cursor_x = chunks[1].x + 1 + 2 + app.field.cursor() as u16;
        let cursor_y = chunks[1].y + 1;
        if cursor_x < chunks[1].x + chunks[1].width.saturating_sub(1) {
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }

    let hint = if requires_input {
        "Enter:submit  Esc:continue"
    } else {
        "Enter:continue"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
        chunks[chunks.len() - 1],
    );
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.error {
        Some(err) => format!("error: {err}"),
        None => match app.session.phase() {
            Phase::Browsing => "↑↓:choose  Enter:select  1-9:pick  q:quit".to_string(),
            Phase::ReviewingOutcome => {
                if app
                    .session
                    .selected_choice()
                    .is_some_and(|c| c.requires_free_text)
                {
                    "type your action  Enter:submit  Esc:continue  Ctrl+C:quit".to_string()
                } else {
                    "Enter:continue  Ctrl+C:quit".to_string()
                }
            }
        },
    };
    let style = if app.error.is_some() {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Create a centered rectangle as a percentage of the given area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_chapters(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    frame.render_widget(Paragraph::new(super::notice_line(app.notice())), chunks[3]);
    render_controls(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.title(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Select chapters to take ({} items)",
                app.session().sample_size()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_chapters(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .title(" Chapters ")
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    if app.chapters().is_empty() {
        let widget = Paragraph::new("No chapters available")
            .fg(Color::DarkGray)
            .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = app
        .chapters()
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let is_current = index == app.chapter_cursor();
            let checkbox = if app.is_chosen(id) { "[x]" } else { "[ ]" };
            let style = if is_current {
                Style::default().fg(Color::Cyan).bold()
            } else if app.is_chosen(id) {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if is_current { ">" } else { " " };

            Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled(format!("{} {}", checkbox, app.chapter_label(id)), style),
            ])
        })
        .collect();

    // Keep the cursor on screen: two border rows.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (app.chapter_cursor() + 1).saturating_sub(visible);

    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = match app.load_error() {
        Some(err) => Line::from(Span::styled(err, Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            format!(
                "{} of {} chapters selected · {} questions in bank",
                app.chosen_chapters().len(),
                app.chapters().len(),
                app.questions().len()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(status), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "j/k navigate  ·  space toggle  ·  a select all  ·  c clear all  ·  enter start exam  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::WrongAnswer;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let percentage = session.percentage();

    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(
        frame,
        chunks[0],
        session.score(),
        session.total_questions(),
        percentage,
    );

    if session.is_perfect() {
        render_perfect(frame, chunks[1]);
    } else {
        render_review(frame, chunks[1], session.wrong_answers(), app.result_scroll());
    }
    render_controls(frame, chunks[2]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    score: usize,
    total: usize,
    percentage: f64,
) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "EXAM RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Final score: {} / {} ({:.2}%)", score, total, percentage),
            Style::default().fg(get_grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_perfect(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("Perfect score! You got everything right!")
        .alignment(Alignment::Center)
        .fg(Color::Green)
        .bold()
        .block(Block::default().padding(Padding::vertical(1)));
    frame.render_widget(widget, area);
}

/// Each missed question takes four lines; `scroll` counts entries.
fn render_review(frame: &mut Frame, area: Rect, wrong_answers: &[WrongAnswer], scroll: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(wrong_answers.len() * 4);

    for (index, item) in wrong_answers.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("{}. {}", index + 1, item.question),
            Style::default().fg(Color::White).bold(),
        )));
        lines.push(Line::from(Span::styled(
            format!("   Your answer: {}", item.selected),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(Span::styled(
            format!("   Correct answer: {}", item.correct),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(""));
    }

    let offset = u16::try_from(scroll * 4).unwrap_or(u16::MAX);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Review of incorrect answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((offset, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r take another quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

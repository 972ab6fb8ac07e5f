use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], chunks[1], app);
    render_question_text(frame, chunks[2], &question.question);
    render_options(
        frame,
        chunks[3],
        app.current_options(),
        app.option_cursor(),
        app.picked_option(),
    );
    frame.render_widget(Paragraph::new(super::notice_line(app.notice())), chunks[4]);
    render_controls(frame, chunks[5]);
}

fn render_progress(frame: &mut Frame, gauge_area: Rect, caption_area: Rect, app: &App) {
    let session = app.session();

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(session.progress().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, gauge_area);

    let caption = format!(
        "Question {} of {}",
        session.current_index() + 1,
        session.total_questions()
    );
    let widget = Paragraph::new(caption)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, caption_area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold()
        .block(Block::default().padding(Padding::vertical(1)));
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    cursor: usize,
    picked: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_current = index == cursor;
        let is_picked = picked == Some(index);
        let style = if is_picked {
            Style::default().fg(Color::Green).bold()
        } else if is_current {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_current { ">" } else { " " };
        let radio = if is_picked { "(•)" } else { "( )" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, radio), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Choose your answer ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(n) if n < 26 => char::from(b'A' + n).to_string(),
        _ => (index + 1).to_string(),
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "j/k navigate  ·  space or 1-9 choose  ·  enter next question  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

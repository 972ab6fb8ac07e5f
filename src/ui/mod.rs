mod home;
mod quiz;
mod results;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Notice, NoticeLevel};
use crate::models::Screen;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen() {
        Screen::Home => home::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Results => results::render(frame, area, app),
    }
}

fn notice_line(notice: Option<&Notice>) -> Line<'_> {
    match notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Warning => Color::Yellow,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(
                notice.message.as_str(),
                Style::default().fg(color).bold(),
            ))
        }
        None => Line::from(""),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::data::QuestionBank;
    use crate::models::Question;

    fn app() -> App {
        let questions = (0..4)
            .map(|i| {
                Question::new(
                    if i % 2 == 0 { "1" } else { "2" },
                    format!("Which fuel burns in turbine {}?", i),
                    ["Gas", "Coal"],
                    "Gas",
                )
            })
            .collect();
        let bank = QuestionBank {
            questions,
            ..QuestionBank::default()
        };
        App::new(bank, 60, StdRng::seed_from_u64(11))
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_home_screen_lists_chapters() {
        let mut app = app();
        app.toggle_chapter();
        let screen = draw(&app);

        assert!(screen.contains("CHAPTER QUIZ"));
        assert!(screen.contains("[x] Chapter 1"));
        assert!(screen.contains("[ ] Chapter 2"));
    }

    #[test]
    fn test_home_screen_shows_warning() {
        let mut app = app();
        app.start_quiz();
        assert!(draw(&app).contains("Please select at least one chapter."));
    }

    #[test]
    fn test_quiz_screen_shows_question_and_options() {
        let mut app = app();
        app.select_all_chapters();
        app.start_quiz();
        let question = app.current_question().unwrap().question.clone();
        let screen = draw(&app);

        assert!(screen.contains("Question 1 of 4"));
        assert!(screen.contains(&question));
        assert!(screen.contains("Gas"));
        assert!(screen.contains("Coal"));
    }

    #[test]
    fn test_results_screen_reviews_wrong_answers() {
        let mut app = app();
        app.select_all_chapters();
        app.start_quiz();
        while app.screen() == Screen::Quiz {
            let index = app.current_options().iter().position(|o| o == "Coal").unwrap();
            app.pick_option(index);
            app.submit_answer();
        }
        let screen = draw(&app);

        assert!(screen.contains("0 / 4 (0.00%)"));
        assert!(screen.contains("Your answer: Coal"));
        assert!(screen.contains("Correct answer: Gas"));
    }

    #[test]
    fn test_results_screen_perfect_score() {
        let mut app = app();
        app.select_all_chapters();
        app.start_quiz();
        while app.screen() == Screen::Quiz {
            let index = app.current_options().iter().position(|o| o == "Gas").unwrap();
            app.pick_option(index);
            app.submit_answer();
        }
        let screen = draw(&app);

        assert!(screen.contains("4 / 4 (100.00%)"));
        assert!(screen.contains("Perfect score!"));
    }
}

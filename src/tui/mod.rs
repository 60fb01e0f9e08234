//! Ratatui-based terminal UI.
//!
//! One screen: a two-column passenger form, a submit button and an output
//! region. If the model artifact cannot be loaded the screen shows only the
//! error.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use tracing::{debug, warn};

use crate::app::handler::handle_submit;
use crate::error::AppError;
use crate::models::{Predictor, PredictorLoader};
use crate::report::{result_detail, result_headline};

pub mod form;

use form::{Field, Form, FormAction, Phase, Shown};

const TITLE: &str = "🚢 Titanic Survival Prediction System";
const INTRO: &str = "Enter the passenger details below to predict their survival probability.";

/// Start the TUI.
pub fn run(loader: &PredictorLoader) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(loader);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Screen contents: the form, or the load error that replaces it.
enum Screen {
    Form {
        predictor: Arc<Predictor>,
        form: Form,
    },
    Halted(AppError),
}

struct App {
    screen: Screen,
}

impl App {
    fn new(loader: &PredictorLoader) -> Self {
        let screen = match loader.get() {
            Ok(predictor) => Screen::Form {
                predictor,
                form: Form::new(),
            },
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), "model unavailable; halting form");
                Screen::Halted(err)
            }
        };
        Self { screen }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the session should end.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match &mut self.screen {
            Screen::Halted(_) => matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter),
            Screen::Form { predictor, form } => match form.handle_key(code) {
                FormAction::Quit => true,
                FormAction::None => false,
                FormAction::Submit(input) => {
                    let shown = match handle_submit(&**predictor, &input) {
                        Ok(result) => Shown::Prediction(result),
                        Err(err) => {
                            warn!(error = %err, "prediction failed");
                            Shown::Failure(err.to_string())
                        }
                    };
                    debug!("submission handled");
                    form.show(shown);
                    false
                }
            },
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        match &self.screen {
            Screen::Halted(err) => draw_halted(frame, err),
            Screen::Form { predictor, form } => draw_form_screen(frame, predictor, form),
        }
    }
}

fn draw_halted(frame: &mut ratatui::Frame<'_>, err: &AppError) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(size);

    let p = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("q to quit", Style::default().fg(Color::Gray))),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().title("Error").borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
    frame.render_widget(p, chunks[0]);
}

fn draw_form_screen(frame: &mut ratatui::Frame<'_>, predictor: &Predictor, form: &Form) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(size);

    draw_header(frame, chunks[0]);
    draw_inputs(frame, chunks[1], form);
    draw_button(frame, chunks[2], form);
    draw_output(frame, chunks[3], form);
    draw_footer(frame, chunks[4], predictor);
}

fn draw_header(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(INTRO, Style::default().fg(Color::Gray))),
    ];
    let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_inputs(frame: &mut ratatui::Frame<'_>, area: Rect, form: &Form) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_column(frame, cols[0], form, &Field::LEFT);
    draw_column(frame, cols[1], form, &Field::RIGHT);
}

fn draw_column(frame: &mut ratatui::Frame<'_>, area: Rect, form: &Form, fields: &[Field]) {
    let items: Vec<ListItem> = fields
        .iter()
        .map(|field| ListItem::new(format!("{}: {}", field.label(), form.display_value(*field))))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("» ");

    let mut state = ListState::default();
    state.select(fields.iter().position(|f| *f == form.focus()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_button(frame: &mut ratatui::Frame<'_>, area: Rect, form: &Form) {
    let focused = form.focus() == Field::Submit;
    let style = if focused {
        Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    let p = Paragraph::new(Field::Submit.label())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_output(frame: &mut ratatui::Frame<'_>, area: Rect, form: &Form) {
    let block = Block::default().title("Result").borders(Borders::ALL);

    let text = match form.phase() {
        Phase::AwaitingInput => {
            let mut lines = vec![Line::from(Span::styled(
                "Fill in the passenger details and press Predict Survival Status.",
                Style::default().fg(Color::Gray),
            ))];
            if let Some(notice) = form.notice() {
                lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::Yellow))));
            }
            Text::from(lines)
        }
        Phase::ResultShown(Shown::Prediction(result)) => {
            let headline_style = if result.survived {
                Style::default().fg(Color::Rgb(21, 87, 36)).bg(Color::Rgb(212, 237, 218))
            } else {
                Style::default().fg(Color::Rgb(114, 28, 36)).bg(Color::Rgb(248, 215, 218))
            };
            Text::from(vec![
                Line::from(Span::styled(
                    format!(" {} ", result_headline(result)),
                    headline_style.add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(result_detail(result)),
            ])
        }
        Phase::ResultShown(Shown::Failure(message)) => Text::from(vec![
            Line::from(Span::styled(
                "Prediction failed",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
        ]),
    };

    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(p, area);
}

fn draw_footer(frame: &mut ratatui::Frame<'_>, area: Rect, predictor: &Predictor) {
    let help = "Tab/↑↓ move  ←/→ change  0-9 type  Enter predict  q quit";
    let line = Line::from(vec![
        Span::styled(help, Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled(format!("Model: {}", predictor.name()), Style::default().fg(Color::Yellow)),
    ]);
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

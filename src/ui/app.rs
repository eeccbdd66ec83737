//! Main TUI application state and logic

use crate::catalog::CodeExample;
use crate::player::{TickOutcome, TracePlayer};
use crate::ui::panes::{
    render_explain_pane, render_output_pane, render_source_pane, render_status_bar,
    render_variables_pane, ExplainRenderData, SourceRenderData, SourceScrollState,
    StatusRenderData, VariablesRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Slowest and fastest auto-play intervals reachable with `+`/`-`
pub const MIN_TICK_MS: u64 = 50;
pub const MAX_TICK_MS: u64 = 5000;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Variables,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> variables -> output)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Variables => FocusedPane::Source,
            FocusedPane::Output => FocusedPane::Variables,
        }
    }
}

/// Interval after a `+` (faster) or `-` (slower) press, clamped
pub fn adjusted_speed(current_ms: u64, faster: bool) -> u64 {
    let next = if faster {
        current_ms / 2
    } else {
        current_ms.saturating_mul(2)
    };
    next.clamp(MIN_TICK_MS, MAX_TICK_MS)
}

/// The main application state
pub struct App {
    /// The example being played
    pub example: CodeExample,

    /// Playback over the example's resolved trace
    pub player: TracePlayer,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub variables_scroll: usize,
    /// Lines scrolled up from the newest output
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(example: CodeExample, player: TracePlayer) -> Self {
        App {
            status_message: format!("{} ({})", example.title, example.difficulty),
            example,
            player,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::new(),
            variables_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            match self.player.tick(Instant::now()) {
                TickOutcome::Advanced => {
                    self.status_message = "Playing...".to_string();
                    self.output_scroll = 0;
                }
                TickOutcome::Finished => {
                    self.status_message = "Playback complete".to_string();
                }
                TickOutcome::Idle => {}
            }

            // Poll with a timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        // Leaving the loop must not leave a pending tick behind
        self.player.set_playing(false, Instant::now());
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Main area above a one-line status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let view = self.player.current_view();

        render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                code: &self.example.code,
                current_line: view.step.line_number,
                is_playing: self.player.is_playing(),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_explain_pane(
            frame,
            left_rows[1],
            ExplainRenderData {
                step: view.step,
                line: self.example.line(view.step.line_number),
            },
        );

        render_variables_pane(
            frame,
            right_rows[0],
            VariablesRenderData {
                variables: view.variables(),
                highlighted: view.step.highlighted_variable.as_deref(),
            },
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        render_output_pane(
            frame,
            right_rows[1],
            view.outputs,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: view.index,
                total_steps: view.total,
                tick_interval_ms: self.player.tick_interval_ms(),
                is_playing: self.player.is_playing(),
            },
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.player.set_playing(false, now);
                self.status_message = if self.player.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Already at the first step".to_string()
                };
            }
            KeyCode::Right => {
                self.player.set_playing(false, now);
                self.status_message = if self.player.step_forward() {
                    self.output_scroll = 0;
                    "Stepped forward".to_string()
                } else {
                    "Already at the last step".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Char(' ') => {
                // 200ms debounce against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = now;
                    self.player.toggle_playing(now);
                    self.status_message = if self.player.is_playing() {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Char(c @ ('+' | '=' | '-' | '_')) => {
                let faster = matches!(c, '+' | '=');
                let ms = adjusted_speed(self.player.tick_interval_ms(), faster);
                // adjusted_speed never returns 0
                if self.player.set_speed(ms, now).is_ok() {
                    debug!(interval_ms = ms, "speed key");
                    self.status_message = format!("Speed: {}ms per step", ms);
                }
            }
            KeyCode::Enter => {
                let stepped = self.player.jump_to_end();
                self.output_scroll = 0;
                self.status_message = if stepped > 0 {
                    "Jumped to end".to_string()
                } else {
                    "Already at the last step".to_string()
                };
            }
            KeyCode::Backspace | KeyCode::Char('r') | KeyCode::Char('R') => {
                self.player.reset();
                self.output_scroll = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }
}

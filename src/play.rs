//! Interactive terminal front end.
//!
//! Arrow keys slide the blank, `s` solves the current grid and replays the
//! solution one move per tick, `h` shows the moves typed since the last
//! time, `n` deals a new scramble and `q` quits. Keys other than quit are
//! ignored while a solution is replaying.

use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::{debug, warn};

use fifteen::{Move, MoveSequence, Puzzle};

const BLANK_COLOR: Color = Color::Rgb {
    r: 255,
    g: 0,
    b: 255,
};
const TILE_COLOR: Color = Color::Rgb {
    r: 153,
    g: 102,
    b: 255,
};
const HELP: &str = "arrows: move  s: solve  h: history  n: new  q: quit";

/// Raw-mode alternate screen, restored on drop.
struct TerminalSession {
    stdout: Stdout,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Continue,
    NewPuzzle,
    Quit,
}

/// Game state independent of the terminal.
struct Game {
    puzzle: Puzzle,
    history: MoveSequence,
    pending: VecDeque<Move>,
    status: String,
}

impl Game {
    fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            history: MoveSequence::new(),
            pending: VecDeque::new(),
            status: String::new(),
        }
    }

    fn is_replaying(&self) -> bool {
        !self.pending.is_empty()
    }

    fn handle_key(&mut self, code: KeyCode) -> Action {
        if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
            return Action::Quit;
        }
        if self.is_replaying() {
            return Action::Continue;
        }

        match code {
            KeyCode::Up => self.slide(Move::Up),
            KeyCode::Down => self.slide(Move::Down),
            KeyCode::Left => self.slide(Move::Left),
            KeyCode::Right => self.slide(Move::Right),
            KeyCode::Char('s') => self.start_solve(),
            KeyCode::Char('h') => self.show_history(),
            KeyCode::Char('n') => return Action::NewPuzzle,
            _ => {}
        }
        Action::Continue
    }

    fn slide(&mut self, movement: Move) {
        match self.puzzle.apply_move(movement) {
            Ok(()) => self.history.push(movement),
            Err(err) => debug!(%err, "ignored move"),
        }
    }

    fn start_solve(&mut self) {
        match fifteen::solve(&self.puzzle) {
            Ok(moves) if moves.is_empty() => self.status = "Already solved".to_string(),
            Ok(moves) => {
                self.status = format!("Solving in {} moves", moves.len());
                self.pending = moves.into_iter().collect();
            }
            Err(err) => {
                warn!(%err, "solver failed");
                self.status = format!("Cannot solve: {err}");
            }
        }
    }

    /// Shows the typed moves as `X > U > L ...` and starts a fresh history.
    fn show_history(&mut self) {
        let mut text = String::from("X");
        for movement in &self.history {
            text.push_str(" > ");
            text.push(movement.symbol().to_ascii_uppercase());
        }
        self.status = text;
        self.history = MoveSequence::new();
    }

    /// Plays the next replayed move, if any.
    fn tick(&mut self) {
        let Some(movement) = self.pending.pop_front() else {
            return;
        };
        if let Err(err) = self.puzzle.apply_move(movement) {
            warn!(%err, "invalid move in replay");
            self.pending.clear();
        }
        if self.pending.is_empty() {
            self.status = "Solved".to_string();
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let height = self.puzzle.height();
        let width = self.puzzle.width();
        let cell = (height * width - 1).to_string().len() + 2;

        queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print("Fifteen puzzle"))?;
        for row in 0..height {
            queue!(out, MoveTo(0, row as u16 + 2))?;
            for col in 0..width {
                let label = self.puzzle.get(row, col);
                let (color, text) = if label == 0 {
                    (BLANK_COLOR, " ".repeat(cell))
                } else {
                    (TILE_COLOR, format!("{:^cell$}", label))
                };
                queue!(
                    out,
                    SetBackgroundColor(color),
                    SetForegroundColor(Color::White),
                    Print(text),
                    ResetColor,
                    Print(" ")
                )?;
            }
        }

        let footer = height as u16 + 3;
        queue!(
            out,
            MoveTo(0, footer),
            Print(&self.status),
            MoveTo(0, footer + 2),
            Print(HELP)
        )?;
        out.flush()
    }
}

/// Runs the interactive session until the user quits.
///
/// `new_puzzle` deals the first grid and every rescramble; `tick` is the
/// delay between replayed solver moves.
pub fn run(mut new_puzzle: impl FnMut() -> Puzzle, tick: Duration) -> io::Result<()> {
    let mut session = TerminalSession::new()?;
    let mut game = Game::new(new_puzzle());
    let mut last_tick = Instant::now();

    loop {
        game.draw(&mut session.stdout)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match game.handle_key(code) {
                    Action::Continue => {}
                    Action::NewPuzzle => game = Game::new(new_puzzle()),
                    Action::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick {
            game.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

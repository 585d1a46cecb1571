use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{bail, Context};
use colored::Colorize;
use engine::{Board, BoardEvent, Coord, Phase};

use crate::{
    config::Config,
    render::{draw, Highlights},
};

const HELP: &str = "\
commands:
  start X Y          empty hole (X, Y) to begin
  move X1 Y1 X2 Y2   jump from (X1, Y1) to (X2, Y2), also `m`
  undo               take back the last jump, also `u`
  reset              refill the board
  review             replay the finished game from the start
  step               replay the next jump, also `next` or `n`
  moves              list possible jumps
  show               draw the board
  help               this text
  quit               leave, also `exit`
Y is the row counted from the top, X the hole within that row counted from
the left, both starting at 0.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start(Coord),
    Move { src: Coord, dst: Coord },
    Undo,
    Reset,
    Review,
    Step,
    Moves,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|word| !word.is_empty());
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let numbers = words
            .map(|word| {
                word.parse::<u8>()
                    .with_context(|| format!("{word:?} is not a hole coordinate"))
            })
            .collect::<anyhow::Result<Vec<u8>>>()?;

        let command = match (name.to_ascii_lowercase().as_str(), numbers.as_slice()) {
            ("start", &[x, y]) => Command::Start(Coord::new(x, y)),
            ("move" | "m", &[x1, y1, x2, y2]) => Command::Move {
                src: Coord::new(x1, y1),
                dst: Coord::new(x2, y2),
            },
            ("undo" | "u", []) => Command::Undo,
            ("reset", []) => Command::Reset,
            ("review", []) => Command::Review,
            ("step" | "next" | "n", []) => Command::Step,
            ("moves", []) => Command::Moves,
            ("show", []) => Command::Show,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            ("start", _) => bail!("usage: start X Y"),
            ("move" | "m", _) => bail!("usage: move X1 Y1 X2 Y2"),
            (
                "undo" | "u" | "reset" | "review" | "step" | "next" | "n" | "moves" | "show"
                | "help" | "?" | "quit" | "exit" | "q",
                _,
            ) => bail!("`{name}` takes no arguments"),
            _ => bail!("unknown command {name:?}, try `help`"),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One game in the terminal: forwards commands to the board and draws what
/// the board reports back.
pub struct Session<W> {
    board: Board,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(board: Board, out: W) -> Self {
        Session { board, out }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn greet(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "triangular peg solitaire, type `help` for commands")?;
        self.report(true)
    }

    pub fn complain(&mut self, err: &anyhow::Error) -> anyhow::Result<()> {
        writeln!(self.out, "{} {err:#}", "error:".red().bold())?;
        Ok(())
    }

    pub fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        log::debug!("handling {command:?}");

        let result = match command {
            Command::Start(coord) => self.board.designate_start(coord),
            Command::Move { src, dst } => self.board.apply(src, dst),
            Command::Undo => {
                self.board.undo();
                Ok(())
            }
            Command::Reset => {
                self.board.reset();
                Ok(())
            }
            Command::Review => self.board.enter_review(),
            Command::Step => self.board.step(),
            Command::Moves => {
                self.list_moves()?;
                return Ok(Flow::Continue);
            }
            Command::Show => Ok(()),
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(()) => self.report(command == Command::Show)?,
            Err(err) => {
                log::warn!("rejected {command:?}: {err}");
                self.complain(&err.into())?;
            }
        }
        Ok(Flow::Continue)
    }

    fn list_moves(&mut self) -> anyhow::Result<()> {
        let jumps = self.board.legal_jumps();
        if jumps.is_empty() {
            writeln!(self.out, "no jumps possible")?;
        }
        for jump in jumps {
            writeln!(self.out, "  {jump}")?;
        }
        Ok(())
    }

    /// Drain the board's events, redraw if anything changed and print status
    /// lines for the rest.
    fn report(&mut self, force_draw: bool) -> anyhow::Result<()> {
        let events = self.board.take_events();
        let mut highlights = Highlights::new(self.board.rows());
        highlights.record(&events);

        if force_draw || !highlights.is_empty() {
            write!(self.out, "{}", draw(&self.board, &highlights))?;
        }

        for event in &events {
            match event {
                BoardEvent::HoleChanged { .. } => {}
                BoardEvent::Won => writeln!(
                    self.out,
                    "{} type `review` to replay your game",
                    "one peg left, you win!".green().bold()
                )?,
                BoardEvent::ReviewReady => {
                    writeln!(self.out, "review: `step` replays the next jump")?
                }
                BoardEvent::ReviewComplete => writeln!(self.out, "review complete")?,
            }
        }

        match self.board.phase() {
            Phase::Fresh => writeln!(self.out, "choose the starting hole with `start X Y`")?,
            Phase::Playing if self.board.is_stuck() => writeln!(
                self.out,
                "{} {} pegs left, `undo` or `reset`",
                "no jumps possible.".yellow(),
                self.board.nr_pegs()
            )?,
            _ => {}
        }
        Ok(())
    }
}

/// Read commands line by line until the input ends or the player quits.
pub fn run(config: &Config, mut input: impl BufRead, out: impl Write) -> anyhow::Result<()> {
    let mut board = Board::new(config.rows).context("cannot set up the board")?;
    if let Some(start) = config.start {
        board
            .designate_start(start)
            .context("invalid starting hole")?;
    }

    let mut session = Session::new(board, out);
    session.greet()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line).context("cannot read command")? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                session.complain(&err)?;
                continue;
            }
        };
        if session.handle(command)? == Flow::Quit {
            break;
        }
    }

    log::info!("session ended in phase {:?}", session.board().phase());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn c(x: u8, y: u8) -> Coord {
        Coord::new(x, y)
    }

    fn play(config: &Config, script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        run(config, Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    const WINNING_SCRIPT: &str = "\
start 0 0
m 0 2 0 0
m 2 2 0 2
m 0 0 2 2
m 0 3 0 1
m 3 3 1 1
m 1 4 1 2
m 2 4 2 2
m 0 1 2 3
m 1 1 3 3
m 4 4 2 2
m 2 2 2 4
m 3 4 1 4
m 0 4 2 4
";

    #[test]
    fn test_parse_commands() {
        assert_eq!("start 1 2".parse::<Command>().unwrap(), Command::Start(c(1, 2)));
        assert_eq!(
            "move 0,2 0,0".parse::<Command>().unwrap(),
            Command::Move {
                src: c(0, 2),
                dst: c(0, 0)
            }
        );
        assert_eq!(" U ".parse::<Command>().unwrap(), Command::Undo);
        assert_eq!("n".parse::<Command>().unwrap(), Command::Step);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("start 1".parse::<Command>().is_err());
        assert!("move 1 2 3".parse::<Command>().is_err());
        assert!("undo 3".parse::<Command>().is_err());
        assert!("start -1 2".parse::<Command>().is_err());
        assert!("fly 1 2".parse::<Command>().is_err());
    }

    #[test]
    fn test_winning_session() {
        let script = format!("{WINNING_SCRIPT}review\n{}", "step\n".repeat(14));
        let out = play(&Config::default(), &script);

        assert!(out.contains("you win!"));
        assert_eq!(out.matches("you win!").count(), 1);
        assert!(out.contains("review: `step` replays the next jump"));
        assert!(out.ends_with("review complete\n"));
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let out = play(
            &Config::default(),
            "m 0 2 0 0\nstart 0 9\nstart 0 0\nm 1 1 0 0\nfly\nm 0 2 0 0\n",
        );

        assert!(out.contains("error: cannot jump from (0, 2) to (0, 0)"));
        assert!(out.contains("error: (0, 9) is not a hole on a board with 5 rows"));
        assert!(out.contains("error: cannot jump from (1, 1) to (0, 0)"));
        assert!(out.contains("unknown command \"fly\""));
        assert!(out.ends_with("  4 # # # # #\n"));
    }

    #[test]
    fn test_start_from_config_and_quit() {
        let config = Config {
            rows: 3,
            start: Some(c(0, 0)),
            no_color: true,
        };
        let out = play(&config, "moves\nquit\nm 0 2 0 0\n");

        assert!(out.contains("  (0, 2) -> (0, 0)\n  (2, 2) -> (0, 0)\n"));
        // nothing after quit is executed
        assert!(!out.contains("  0   #"));
    }

    #[test]
    fn test_stuck_and_undo_to_fresh() {
        let config = Config {
            rows: 3,
            start: Some(c(0, 0)),
            no_color: true,
        };
        let out = play(&config, "m 0 2 0 0\nm 2 2 0 2\nm 0 0 2 2\nundo\nundo\nundo\nundo\n");

        assert!(out.contains("no jumps possible. 2 pegs left"));
        assert!(out.ends_with("choose the starting hole with `start X Y`\n"));
    }

    #[test]
    fn test_bad_config() {
        let config = Config {
            rows: 3,
            start: Some(c(3, 1)),
            no_color: true,
        };
        let err = run(&config, Cursor::new(""), Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid starting hole"));
    }
}

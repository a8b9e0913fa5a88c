//! UCI front end.
//!
//! Commands are handled one line at a time on the caller's thread. `go`
//! hands the search controller to a worker thread and returns at once; the
//! worker streams `info` lines from the progress callback and finishes with
//! `bestmove`. Output goes through a channel so the caller decides where it
//! is written.

use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::{EvalKind, IterativeDeepening, SearchConfig, SearchHandle, TranspositionTable};
use crate::book::OpeningBook;
use crate::error::UciError;
use crate::game_repr::{Board, Color, Move};
use crate::notation::parse_coord;

const ENGINE_NAME: &str = "chess_core";
const ENGINE_AUTHOR: &str = "the chess_core developers";

const DEFAULT_HASH_MB: usize = 16;
const MAX_HASH_MB: usize = 1024;
const MAX_DEPTH: u32 = 64;
/// Moves left in the game assumed when the host gives a clock without
/// `movestogo`.
const MOVES_TO_GO: u64 = 30;

/// Limits of one `go` command. Times are in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub movetime: Option<u64>,
    pub infinite: bool,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
}

impl GoParams {
    /// Parse the arguments after `go`. Keywords this engine does not act on
    /// (`ponder`, `nodes`, `mate`, `searchmoves`) are skipped.
    pub fn parse(args: &[&str]) -> Result<Self, UciError> {
        let mut params = GoParams::default();
        let mut tokens = args.iter().copied();

        while let Some(key) = tokens.next() {
            let mut number = || -> Result<u64, UciError> {
                tokens
                    .next()
                    .and_then(|v| v.parse::<u64>().ok())
                    .ok_or_else(|| UciError::Syntax(format!("go {} needs a number", key)))
            };
            match key {
                "depth" => params.depth = Some(number()? as u32),
                "movetime" => params.movetime = Some(number()?),
                "wtime" => params.wtime = Some(number()?),
                "btime" => params.btime = Some(number()?),
                "winc" => params.winc = Some(number()?),
                "binc" => params.binc = Some(number()?),
                "movestogo" => params.movestogo = Some(number()?),
                "infinite" => params.infinite = true,
                other => log::debug!("ignoring go argument '{}'", other),
            }
        }
        Ok(params)
    }

    /// Time to spend on this move: `movetime` when given, otherwise a share
    /// of the mover's clock plus half the increment, never more than half of
    /// what is left.
    pub fn time_budget(&self, side: Color) -> Option<Duration> {
        if let Some(ms) = self.movetime {
            return Some(Duration::from_millis(ms.max(1)));
        }
        let (time, inc) = match side {
            Color::White => (self.wtime?, self.winc.unwrap_or(0)),
            Color::Black => (self.btime?, self.binc.unwrap_or(0)),
        };
        let moves = self.movestogo.unwrap_or(MOVES_TO_GO).max(1);
        let budget = (time / moves + inc / 2).min(time / 2).max(1);
        Some(Duration::from_millis(budget))
    }
}

pub struct UciEngine {
    board: Board,
    /// Moves since the initial position, when the position came from
    /// `startpos`. Used for book lookups.
    history: Option<Vec<Move>>,
    config: SearchConfig,
    hash_mb: usize,
    own_book: bool,
    book: OpeningBook,
    rng: StdRng,
    /// Parked here between searches; owned by the worker during one.
    controller: Option<IterativeDeepening>,
    worker: Option<JoinHandle<IterativeDeepening>>,
    handle: SearchHandle,
    out: Sender<String>,
}

impl UciEngine {
    pub fn new(out: Sender<String>) -> Self {
        let config = SearchConfig {
            tt_entries: TranspositionTable::entries_for_mb(DEFAULT_HASH_MB),
            ..SearchConfig::default()
        };
        let controller = IterativeDeepening::new(config.clone());
        let handle = controller.handle();
        Self {
            board: Board::new(),
            history: Some(Vec::new()),
            config,
            hash_mb: DEFAULT_HASH_MB,
            own_book: false,
            book: OpeningBook::default(),
            rng: StdRng::from_entropy(),
            controller: Some(controller),
            worker: None,
            handle,
            out,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Settings the next `go` starts from.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_searching(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    fn send(&self, line: impl Into<String>) {
        // A closed channel means nobody is listening any more
        let _ = self.out.send(line.into());
    }

    /// Handle one protocol line. Returns true on `quit`.
    pub fn handle_command(&mut self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = tokens.split_first() else {
            return false;
        };

        let outcome = match cmd {
            "uci" => {
                self.identify();
                Ok(())
            }
            "isready" => {
                self.send("readyok");
                Ok(())
            }
            "ucinewgame" => {
                self.new_game();
                Ok(())
            }
            "setoption" => self.set_option(args),
            "position" => self.set_position(args),
            "go" => self.go(args),
            "stop" => {
                self.handle.stop();
                self.wait();
                Ok(())
            }
            "quit" => {
                self.handle.cancel();
                self.wait();
                return true;
            }
            "d" => {
                self.send(self.board.to_string());
                Ok(())
            }
            "perft" => self.perft(args),
            "debug" | "register" | "ponderhit" => Ok(()),
            _ => {
                log::warn!("unknown command: {}", line.trim());
                Ok(())
            }
        };

        if let Err(err) = outcome {
            log::warn!("{}: {}", cmd, err);
            self.send(format!("info string {} error: {}", cmd, err));
        }
        false
    }

    fn identify(&self) {
        self.send(format!("id name {}", ENGINE_NAME));
        self.send(format!("id author {}", ENGINE_AUTHOR));
        self.send(format!(
            "option name Hash type spin default {} min 1 max {}",
            DEFAULT_HASH_MB, MAX_HASH_MB
        ));
        self.send("option name Clear Hash type button");
        self.send(format!(
            "option name Depth type spin default {} min 1 max {}",
            SearchConfig::default().max_depth,
            MAX_DEPTH
        ));
        self.send("option name Quiescence type check default true");
        self.send(format!(
            "option name Evaluation type combo default {} var {} var {} var {}",
            EvalKind::default().name(),
            EvalKind::Material.name(),
            EvalKind::Positional.name(),
            EvalKind::Mobility.name()
        ));
        self.send("option name OwnBook type check default false");
        self.send("uciok");
    }

    /// Block until the running search, if any, has printed its best move.
    pub fn wait(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        match worker.join() {
            Ok(controller) => self.controller = Some(controller),
            Err(_) => {
                log::error!("search thread panicked; starting a fresh controller");
                let controller = IterativeDeepening::new(self.config.clone());
                self.handle = controller.handle();
                self.controller = Some(controller);
            }
        }
    }

    fn new_game(&mut self) {
        self.handle.stop();
        self.wait();
        self.board = Board::new();
        self.history = Some(Vec::new());
        if let Some(controller) = self.controller.as_mut() {
            controller.clear();
        }
    }

    /// `setoption name <name> [value <value>]`; names may contain spaces.
    fn set_option(&mut self, args: &[&str]) -> Result<(), UciError> {
        let mut name = Vec::new();
        let mut value = Vec::new();
        let mut target = None;
        for &token in args {
            match token {
                "name" => target = Some(&mut name),
                "value" => target = Some(&mut value),
                _ => match target.as_mut() {
                    Some(words) => words.push(token),
                    None => return Err(UciError::Syntax(format!("setoption {}", args.join(" ")))),
                },
            }
        }
        let name = name.join(" ");
        let value = value.join(" ");
        let bad_value = || UciError::OptionValue {
            name: name.clone(),
            value: value.clone(),
        };

        match name.to_ascii_lowercase().as_str() {
            "hash" => {
                let mb = value
                    .parse::<usize>()
                    .ok()
                    .filter(|mb| (1..=MAX_HASH_MB).contains(mb))
                    .ok_or_else(bad_value)?;
                self.hash_mb = mb;
                self.config.tt_entries = TranspositionTable::entries_for_mb(mb);
            }
            "clear hash" => {
                self.handle.stop();
                self.wait();
                if let Some(controller) = self.controller.as_mut() {
                    controller.clear();
                }
            }
            "depth" => {
                self.config.max_depth = value
                    .parse::<u32>()
                    .ok()
                    .filter(|d| (1..=MAX_DEPTH).contains(d))
                    .ok_or_else(bad_value)?;
            }
            "quiescence" => self.config.quiescence = parse_check(&value).ok_or_else(bad_value)?,
            "evaluation" => self.config.eval = EvalKind::from_name(&value).ok_or_else(bad_value)?,
            "ownbook" => self.own_book = parse_check(&value).ok_or_else(bad_value)?,
            _ => return Err(UciError::UnknownOption(name.clone())),
        }
        log::debug!("option {} = {} (hash {} MB)", name, value, self.hash_mb);
        Ok(())
    }

    /// `position startpos|fen <fen> [moves <m1> <m2> ...]`. Nothing changes
    /// unless the whole command is valid.
    fn set_position(&mut self, args: &[&str]) -> Result<(), UciError> {
        let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
        let (setup, moves) = args.split_at(moves_at);

        let (mut board, mut history) = match setup.split_first() {
            Some((&"startpos", [])) => (Board::new(), Some(Vec::new())),
            Some((&"fen", fen)) if !fen.is_empty() => (Board::from_fen(&fen.join(" "))?, None),
            _ => return Err(UciError::Syntax(format!("position {}", args.join(" ")))),
        };

        for text in moves.iter().skip(1) {
            let mv = parse_coord(&board, text)?;
            board.make_move(mv);
            if let Some(history) = history.as_mut() {
                history.push(mv);
            }
        }

        self.board = board;
        self.history = history;
        Ok(())
    }

    fn go(&mut self, args: &[&str]) -> Result<(), UciError> {
        let params = GoParams::parse(args)?;
        self.handle.stop();
        self.wait();

        if self.own_book {
            if let Some(history) = &self.history {
                if let Some(mv) = self.book.choose(history, &mut self.rng) {
                    self.send(format!("info string book move {}", mv));
                    self.send(format!("bestmove {}", mv));
                    return Ok(());
                }
            }
        }

        let mut config = self.config.clone();
        if let Some(depth) = params.depth {
            config.max_depth = depth.clamp(1, MAX_DEPTH);
        }
        if params.infinite {
            config.max_depth = MAX_DEPTH;
            config.time_limit = None;
        } else if let Some(budget) = params.time_budget(self.board.side_to_move()) {
            config.time_limit = Some(budget);
            if params.depth.is_none() {
                config.max_depth = MAX_DEPTH;
            }
        }

        let Some(mut controller) = self.controller.take() else {
            return Err(UciError::Syntax("go while a search is running".to_string()));
        };
        controller.set_config(config);
        self.handle.arm();

        let board = self.board.clone();
        let out = self.out.clone();
        self.worker = Some(thread::spawn(move || {
            let result = controller.search(&board, |progress| {
                let _ = out.send(progress.to_string());
            });

            let line = result.map(|r| r.principal_variation).unwrap_or_default();
            let best = line.first().copied().or_else(|| board.legal_moves().first().copied());
            let reply = match (best, line.get(1)) {
                (Some(best), Some(ponder)) => format!("bestmove {} ponder {}", best, ponder),
                (Some(best), None) => format!("bestmove {}", best),
                (None, _) => "bestmove 0000".to_string(),
            };
            let _ = out.send(reply);
            controller
        }));
        Ok(())
    }

    fn perft(&mut self, args: &[&str]) -> Result<(), UciError> {
        let depth = args
            .first()
            .and_then(|d| d.parse::<u32>().ok())
            .ok_or_else(|| UciError::Syntax(format!("perft {}", args.join(" "))))?;
        self.wait();

        let mut divide = self.board.perft_divide(depth);
        divide.sort_by_key(|(mv, _)| mv.to_coord());
        for (mv, count) in &divide {
            self.send(format!("{}: {}", mv, count));
        }
        let total: u64 = if depth == 0 { 1 } else { divide.iter().map(|(_, n)| n).sum() };
        self.send("");
        self.send(format!("Nodes searched: {}", total));
        Ok(())
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        self.handle.cancel();
        self.wait();
    }
}

fn parse_check(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" => Some(true),
        "false" | "off" => Some(false),
        _ => None,
    }
}

/// Feed `input` to a fresh engine line by line until `quit` or end of input.
pub fn run(input: impl BufRead, out: Sender<String>) -> io::Result<()> {
    let mut engine = UciEngine::new(out);
    for line in input.lines() {
        let line = line?;
        log::trace!("<< {}", line);
        if engine.handle_command(&line) {
            break;
        }
    }
    Ok(())
}

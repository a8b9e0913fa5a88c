use thiserror::Error;

/// Reasons a FEN string is rejected. The board being decoded is discarded,
/// so a failed parse never leaves a half-built position behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 or 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("piece placement must have 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {squares} squares instead of 8")]
    RankLength { rank: usize, squares: usize },
    #[error("unexpected character '{0}' in piece placement")]
    BadPiece(char),
    #[error("consecutive empty-square digits in rank {0}")]
    SplitEmptyRun(usize),
    #[error("pawn on a back rank at {0}")]
    PawnOnBackRank(String),
    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: &'static str, count: u32 },
    #[error("side to move must be 'w' or 'b', found '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en passant field '{0}'")]
    EnPassant(String),
    #[error("invalid half-move clock '{0}'")]
    HalfmoveClock(String),
    #[error("invalid full-move number '{0}'")]
    FullmoveNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("malformed move token '{0}'")]
    BadToken(String),
    #[error("'{0}' does not match any legal move")]
    NoMatch(String),
    #[error("'{token}' is ambiguous between {candidates} legal moves")]
    Ambiguous { token: String, candidates: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("malformed coordinate move '{0}'")]
    BadCoordinate(String),
    #[error("'{0}' is not a legal move in this position")]
    Illegal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PgnError {
    #[error("malformed tag pair: {0}")]
    BadTag(String),
    #[error("unexpected token '{0}' in movetext")]
    BadToken(String),
    #[error("unterminated {0} in movetext")]
    Unterminated(&'static str),
    #[error("ply {ply}: {source}")]
    Move {
        ply: usize,
        #[source]
        source: SanError,
    },
    #[error("bad FEN tag: {0}")]
    Fen(#[from] FenError),
}

/// Umbrella error for callers that do not care which codec failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    San(#[from] SanError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Pgn(#[from] PgnError),
}

/// Protocol-level failures. Reported to the host as `info string` lines;
/// the engine state is left as it was before the command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("malformed command: {0}")]
    Syntax(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for option '{name}'")]
    OptionValue { name: String, value: String },
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Move(#[from] MoveError),
}

pub type Result<T, E = ChessError> = std::result::Result<T, E>;

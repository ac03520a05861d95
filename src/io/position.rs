//! Position file reader

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::board::{Board, Cell, Player, BOARD_SIZE};
use crate::engine::{validate_depth, AgentParams, CompetitionParams};
use crate::error::{ReversiError, Result};
use crate::search::SearchMode;

fn parse_int(line: Option<&str>, field: &'static str) -> Result<i64> {
    let line = line.ok_or(ReversiError::MissingField(field))?;
    line.trim()
        .parse::<i64>()
        .map_err(|source| ReversiError::ParseInt { field, source })
}

fn parse_row(line: &str, row: usize) -> Result<[Cell; BOARD_SIZE]> {
    let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    if symbols.len() != BOARD_SIZE {
        return Err(ReversiError::BadRow {
            row,
            len: symbols.len(),
        });
    }

    let mut cells = [Cell::Empty; BOARD_SIZE];
    for (col, &symbol) in symbols.iter().enumerate() {
        cells[col] = Cell::from_symbol(symbol).ok_or(ReversiError::UnknownSymbol { symbol, row })?;
    }
    Ok(cells)
}

fn parse_player(line: Option<&str>) -> Result<Player> {
    let line = line.ok_or(ReversiError::MissingField("player"))?.trim();
    let mut symbols = line.chars();
    match (symbols.next(), symbols.next()) {
        (Some(symbol), None) => Player::from_symbol(symbol),
        _ => None,
    }
    .ok_or_else(|| ReversiError::UnknownPlayer(line.to_string()))
}

fn parse_time(line: Option<&str>) -> Result<Duration> {
    let line = line.ok_or(ReversiError::MissingField("time remaining"))?.trim();
    line.parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| ReversiError::InvalidTime(line.to_string()))
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ReversiError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse eight rows of `X`/`O`/`*` into a board. Blank lines are skipped.
pub fn parse_board<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Board> {
    let rows: Vec<&str> = lines.filter(|line| !line.trim().is_empty()).collect();
    if rows.len() != BOARD_SIZE {
        return Err(ReversiError::BoardShape { rows: rows.len() });
    }

    let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (row, line) in rows.iter().enumerate() {
        cells[row] = parse_row(line, row)?;
    }
    Ok(Board::from_cells(cells))
}

/// Parse the contents of a position file into validated agent parameters.
///
/// Layout: task (1..=3), player symbol, cutoff depth, then eight board rows.
/// Whitespace inside a row is ignored; lines after the board are not read.
pub fn parse_position(text: &str) -> Result<AgentParams> {
    let mut lines = text.lines();

    let mode = SearchMode::from_task(parse_int(lines.next(), "task")?)?;

    let player = parse_player(lines.next())?;

    let cutoff_depth = validate_depth(parse_int(lines.next(), "cutoff depth")?)?;

    let board = parse_board(lines.take(BOARD_SIZE))?;

    debug!(%mode, %player, cutoff_depth, stones = board.stone_count(), "parsed position");

    AgentParams::new(mode, player, cutoff_depth, board)
}

/// Read and parse a position file.
pub fn read_position(path: impl AsRef<Path>) -> Result<AgentParams> {
    parse_position(&read_text(path.as_ref())?)
}

/// Parse a competition request.
///
/// Layout: task `4`, player symbol, remaining clock time in seconds (may be
/// fractional), then eight board rows.
pub fn parse_competition(text: &str) -> Result<CompetitionParams> {
    let mut lines = text.lines();

    let task = parse_int(lines.next(), "task")?;
    if task != 4 {
        return Err(ReversiError::InvalidTask(task));
    }
    let player = parse_player(lines.next())?;
    let time_remaining = parse_time(lines.next())?;
    let board = parse_board(lines.take(BOARD_SIZE))?;

    debug!(
        %player,
        time_remaining_ms = time_remaining.as_millis() as u64,
        stones = board.stone_count(),
        "parsed competition request"
    );

    Ok(CompetitionParams {
        player,
        time_remaining,
        board,
    })
}

/// Read and parse a competition request file.
pub fn read_competition(path: impl AsRef<Path>) -> Result<CompetitionParams> {
    parse_competition(&read_text(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    const OPENING: &str = "\
********
********
********
***XO***
***OX***
********
********
********
";

    fn input(task: &str, player: &str, depth: &str) -> String {
        format!("{task}\n{player}\n{depth}\n{OPENING}")
    }

    #[test]
    fn test_parse_opening() {
        let params = parse_position(&input("2", "X", "3")).unwrap();
        assert_eq!(params.mode, SearchMode::Minimax);
        assert_eq!(params.player, Player::X);
        assert_eq!(params.cutoff_depth, 3);
        assert_eq!(params.board, Board::initial());
    }

    #[test]
    fn test_whitespace_in_rows_is_ignored() {
        let text = "3\nO\n1\n".to_string() + &OPENING.replace('*', "* ");
        let params = parse_position(&text).unwrap();
        assert_eq!(params.board, Board::initial());
        assert_eq!(params.mode, SearchMode::AlphaBeta);
        assert_eq!(params.player, Player::O);
    }

    #[test]
    fn test_bad_header_fields() {
        assert!(matches!(
            parse_position(&input("4", "X", "2")),
            Err(ReversiError::InvalidTask(4))
        ));
        assert!(matches!(
            parse_position(&input("two", "X", "2")),
            Err(ReversiError::ParseInt { field: "task", .. })
        ));
        assert!(matches!(
            parse_position(&input("1", "Y", "2")),
            Err(ReversiError::UnknownPlayer(_))
        ));
        assert!(matches!(
            parse_position(&input("1", "XO", "2")),
            Err(ReversiError::UnknownPlayer(_))
        ));
        assert!(matches!(
            parse_position(&input("1", "X", "0")),
            Err(ReversiError::InvalidDepth(0))
        ));
        assert!(matches!(parse_position("1\nX\n"), Err(ReversiError::MissingField(_))));
    }

    #[test]
    fn test_bad_board() {
        let short = "2\nX\n2\n********\n********\n";
        assert!(matches!(
            parse_position(short),
            Err(ReversiError::BoardShape { rows: 2 })
        ));

        let wide = input("2", "X", "2").replacen("********", "*********", 1);
        assert!(matches!(
            parse_position(&wide),
            Err(ReversiError::BadRow { row: 0, len: 9 })
        ));

        let symbol = input("2", "X", "2").replacen("***XO***", "***XQ***", 1);
        assert!(matches!(
            parse_position(&symbol),
            Err(ReversiError::UnknownSymbol { symbol: 'Q', row: 3 })
        ));
    }

    #[test]
    fn test_parse_board_cells() {
        let board = parse_board("X*******\n*******O\n******\n".lines());
        assert!(board.is_err());

        let text = OPENING.replacen("********", "X******O", 1);
        let board = parse_board(text.lines()).unwrap();
        assert_eq!(board.get(Pos::new(0, 0)), Cell::X);
        assert_eq!(board.get(Pos::new(0, 7)), Cell::O);
        assert_eq!(board.stone_count(), 6);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_position("/nonexistent/input.txt").unwrap_err();
        assert!(matches!(err, ReversiError::Io { .. }));
        let err = read_competition("/nonexistent/input.txt").unwrap_err();
        assert!(matches!(err, ReversiError::Io { .. }));
    }

    #[test]
    fn test_parse_competition() {
        let params = parse_competition(&input("4", "O", "12.5")).unwrap();
        assert_eq!(params.player, Player::O);
        assert_eq!(params.time_remaining, Duration::from_millis(12_500));
        assert_eq!(params.board, Board::initial());

        let params = parse_competition(&input("4", "X", " 300 ")).unwrap();
        assert_eq!(params.time_remaining, Duration::from_secs(300));
    }

    #[test]
    fn test_competition_rejects_bad_fields() {
        assert!(matches!(
            parse_competition(&input("2", "X", "10")),
            Err(ReversiError::InvalidTask(2))
        ));
        assert!(matches!(
            parse_competition(&input("4", "Z", "10")),
            Err(ReversiError::UnknownPlayer(_))
        ));
        for time in ["-1", "soon", "inf", "NaN"] {
            let result = parse_competition(&input("4", "X", time));
            assert!(matches!(result, Err(ReversiError::InvalidTime(_))), "time {time:?}");
        }
        assert!(matches!(parse_competition("4\nX\n"), Err(ReversiError::MissingField(_))));
    }
}

//! File formats around the agent
//!
//! - Position file: task, player, cutoff depth and eight board rows
//! - Competition request: task 4, player, seconds left and eight board rows
//! - Output file: the resulting board followed by the node trace, or the
//!   bare move label for a competition request
//! - Game log: one line per self-play turn with its elapsed time

pub mod gamelog;
pub mod output;
pub mod position;

pub use gamelog::{GameRecord, TurnRecord};
pub use output::{render_move, render_output, write_move, write_output};
pub use position::{
    parse_board, parse_competition, parse_position, read_competition, read_position,
};

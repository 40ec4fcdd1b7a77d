//! Move-selection engine for the XFChess bot
//!
//! Legal move generation and game rules come from `shakmaty`; this crate adds
//! the parts the bot decides with: evaluation, move ordering and a
//! depth-limited alpha-beta search.

pub mod api;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod hash;
pub mod search;

pub use api::{apply_uci, move_to_uci, new_game, parse_uci_move, position_fen, position_from_fen};
pub use error::{ChessEngineError, ChessEngineResult};
pub use search::{SearchEngine, SearchStats};

//! Position evaluation
//!
//! Scores are from the engine's point of view (positive favours the engine's
//! side) and combine:
//! - Terminal states (checkmate, stalemate, insufficient material)
//! - Material balance
//! - Mobility of the side to move
//! - Castling rights
//! - Repetition of earlier positions
//! - Attacks on undefended pieces
//!
//! ## Module Organization
//!
//! - `material` - Material balance evaluation
//! - `threats` - Undefended-piece attack bonus
//! - `position` - Full position evaluation

mod material;
mod position;
mod threats;

pub use material::evaluate_material;
pub use position::evaluate_position;
pub use threats::undefended_attack_bonus;

//! Engine constants: piece weights and evaluation terms

use shakmaty::Role;

pub const PAWN_VALUE: f64 = 1.0;
pub const KNIGHT_VALUE: f64 = 3.0;
pub const BISHOP_VALUE: f64 = 3.0;
pub const ROOK_VALUE: f64 = 5.0;
pub const QUEEN_VALUE: f64 = 9.0;
pub const KING_VALUE: f64 = 0.0;

/// Score of a checkmated position. Dominates every other term.
pub const MATE_SCORE: f64 = 9999.0;

/// Bonus per legal move available to the side to move
pub const MOBILITY_WEIGHT: f64 = 0.1;

/// Bonus for keeping both castling rights
pub const CASTLING_BONUS: f64 = 0.3;

/// Penalty for a position already reached in this game
pub const REPETITION_PENALTY: f64 = 2.0;

/// Fraction of piece value awarded for attacking an undefended piece
pub const UNDEFENDED_ATTACK_WEIGHT: f64 = 0.3;

/// Default minimax depth in plies
pub const DEFAULT_SEARCH_DEPTH: u32 = 4;

/// Ordering priority for captures (added to the victim value)
pub const CAPTURE_PRIORITY: i32 = 100;

/// Ordering priority for non-capturing checks
pub const CHECK_PRIORITY: i32 = 50;

/// Material weight of a piece role
pub fn piece_value(role: Role) -> f64 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

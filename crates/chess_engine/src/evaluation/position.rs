//! Full position evaluation
//!
//! Evaluates positions using material, mobility, castling rights,
//! repetition and attacks on undefended pieces.

use super::material::evaluate_material;
use super::threats::undefended_attack_bonus;
use crate::constants::*;
use crate::hash::RepetitionCache;
use shakmaty::{CastlingSide, Chess, Color, Position};

/// Evaluate a position from `perspective`'s side
pub fn evaluate_position(pos: &Chess, perspective: Color, seen: &RepetitionCache) -> f64 {
    if pos.is_checkmate() {
        // The side to move is the one that got mated
        return if pos.turn() == perspective {
            -MATE_SCORE
        } else {
            MATE_SCORE
        };
    }
    if pos.is_stalemate() || pos.is_insufficient_material() {
        return 0.0;
    }

    let to_move_sign = if pos.turn() == perspective { 1.0 } else { -1.0 };

    let mut score = evaluate_material(pos.board(), perspective);

    let mobility = pos.legal_moves().len() as f64;
    score += to_move_sign * MOBILITY_WEIGHT * mobility;

    if has_both_castling_rights(pos, perspective) {
        score += CASTLING_BONUS;
    }
    if has_both_castling_rights(pos, !perspective) {
        score -= CASTLING_BONUS;
    }

    if seen.contains(pos) {
        score -= REPETITION_PENALTY;
    }

    score += to_move_sign * undefended_attack_bonus(pos);

    score
}

fn has_both_castling_rights(pos: &Chess, color: Color) -> bool {
    let castles = pos.castles();
    castles.has(color, CastlingSide::KingSide) && castles.has(color, CastlingSide::QueenSide)
}

//! Undefended attack bonus

use crate::constants::{piece_value, UNDEFENDED_ATTACK_WEIGHT};
use shakmaty::{Chess, Position};

/// Bonus for the side to move: every enemy piece it attacks that no enemy
/// piece defends is worth a fraction of its value.
pub fn undefended_attack_bonus(pos: &Chess) -> f64 {
    let board = pos.board();
    let us = pos.turn();
    let occupied = board.occupied();

    board
        .by_color(!us)
        .into_iter()
        .filter(|&sq| {
            let attacked = !board.attacks_to(sq, us, occupied).is_empty();
            let defended = !board.attacks_to(sq, !us, occupied).is_empty();
            attacked && !defended
        })
        .filter_map(|sq| board.role_at(sq))
        .map(|role| UNDEFENDED_ATTACK_WEIGHT * piece_value(role))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{new_game, position_from_fen};

    #[test]
    fn test_no_threats_at_start() {
        assert_eq!(undefended_attack_bonus(&new_game()), 0.0);
    }

    #[test]
    fn test_hanging_knight() {
        // Rook on d1 attacks the undefended knight on d5
        let pos = position_from_fen("4k3/8/8/3n4/8/8/8/3RK3 w - - 0 1").unwrap();
        let bonus = undefended_attack_bonus(&pos);
        assert!((bonus - 0.9).abs() < 1e-9, "got {bonus}");
    }

    #[test]
    fn test_defended_knight_earns_nothing() {
        // Pawn on e6 defends the knight
        let pos = position_from_fen("4k3/8/4p3/3n4/8/8/8/3RK3 w - - 0 1").unwrap();
        assert_eq!(undefended_attack_bonus(&pos), 0.0);
    }

    #[test]
    fn test_only_side_to_move_counts() {
        // Same hanging knight, but black to move: white attacks are ignored
        let pos = position_from_fen("4k3/8/8/3n4/8/8/8/3RK3 b - - 0 1").unwrap();
        assert_eq!(undefended_attack_bonus(&pos), 0.0);
    }
}

//! Whole-board invariants exercised over long random move sequences.
//!
//! - The cell index and the piece map agree after every mutation
//! - Safety probes leave the position exactly as they found it
//! - Layout text survives a parse/render cycle at every step

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use chess_core::{Arbiter, Board, CellNode, Color, MoveFilter, PieceKind, Position, RuleCatalog};

/// Play one random legal move for `color`, capturing whatever stands on the
/// destination. Returns false when the side has no move.
fn play_random(pos: &mut Position, rules: &RuleCatalog, color: Color, rng: &mut StdRng) -> bool {
    let moves = Arbiter::new(pos, rules).possible_destinations_for_side(color, MoveFilter::ALL);
    let Some((id, dests)) = moves.into_iter().choose(rng) else {
        return false;
    };
    let dest = dests[rng.gen_range(0..dests.len())];

    if let Some(victim) = pos.board.piece_at(dest).map(|p| p.id) {
        pos.board.remove_piece(victim);
    }
    let piece = *pos.board.piece(id);
    if piece.kind == PieceKind::Pawn && (dest.row - piece.row).abs() == 2 {
        pos.record_double_step(id);
    }
    pos.board.move_piece_to(id, dest);
    true
}

// =============================================================================
// Bijection
// =============================================================================

#[test]
fn test_index_agrees_with_pieces_through_random_games() {
    let rules = RuleCatalog::new();
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pos = Position::startpos();
        let mut color = Color::White;

        for _ in 0..120 {
            if pos.board.king_of(color).is_none()
                || !play_random(&mut pos, &rules, color, &mut rng)
            {
                break;
            }
            assert!(pos.board.is_consistent(), "seed {seed}: index out of sync");
            for idx in 0..64 {
                let cell = CellNode::from_index(idx);
                if let Some(p) = pos.board.piece_at(cell) {
                    assert_eq!(p.cell(), cell);
                }
            }
            color = color.other();
        }
    }
}

// =============================================================================
// Safety probes
// =============================================================================

#[test]
fn test_safety_probes_roll_back_mid_game() {
    let rules = RuleCatalog::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mut pos = Position::startpos();
    let mut color = Color::White;

    for ply in 0..40 {
        if !play_random(&mut pos, &rules, color, &mut rng) {
            break;
        }
        color = color.other();
        if ply % 5 != 0 {
            continue;
        }

        let before = pos.clone();
        let mut arb = Arbiter::new(&mut pos, &rules);
        for side in [Color::White, Color::Black] {
            let all = arb.possible_destinations_for_side(side, MoveFilter::ALL);
            let safe = arb.possible_destinations_for_side(side, MoveFilter::SAFE);
            // the safe set is always a subset of the full set
            for (id, dests) in &safe {
                assert!(dests.iter().all(|d| all[id].contains(d)));
            }
        }
        drop(arb);
        assert_eq!(pos, before, "probe at ply {ply} changed the position");
    }
}

#[test]
fn test_capture_sets_are_subsets_of_moves() {
    let rules = RuleCatalog::new();
    let mut rng = StdRng::seed_from_u64(7);
    let mut pos = Position::startpos();
    let mut color = Color::White;

    for _ in 0..30 {
        if !play_random(&mut pos, &rules, color, &mut rng) {
            break;
        }
        color = color.other();
        let mut arb = Arbiter::new(&mut pos, &rules);
        let all = arb.possible_destinations_for_side(color, MoveFilter::ALL);
        let captures = arb.possible_destinations_for_side(color, MoveFilter::CAPTURES);
        for (id, dests) in &captures {
            for d in dests {
                assert!(all[id].contains(d));
                let target = arb.board().piece_at(*d).expect("capture lands on a piece");
                assert_ne!(target.color, color);
            }
        }
    }
}

// =============================================================================
// Layout seeding
// =============================================================================

#[test]
fn test_layout_render_parses_back_while_counts_hold() {
    let rules = RuleCatalog::new();
    let mut rng = StdRng::seed_from_u64(3);
    let mut pos = Position::from_board(
        Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap(),
    );
    let mut color = Color::White;

    for _ in 0..20 {
        let before = pos.board.len();
        if !play_random(&mut pos, &rules, color, &mut rng) {
            break;
        }
        color = color.other();
        if pos.board.len() != before {
            // a capture breaks the default distribution; the parser must refuse it
            assert!(Board::from_layout(&pos.board.to_layout()).is_err());
            break;
        }
        let reparsed = Board::from_layout(&pos.board.to_layout()).unwrap();
        assert_eq!(reparsed.to_layout(), pos.board.to_layout());
    }
}


// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use super::{alphabet, board_layout, game_state, matrix};
use matrix::Position;
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, pos: Position) -> char {
    if pos == board_layout.star() {
        return '*';
    }
    match board_layout.premium_at(pos) {
        board_layout::Premium::TripleWord => '=',
        board_layout::Premium::DoubleWord => '-',
        board_layout::Premium::TripleLetter => '"',
        board_layout::Premium::DoubleLetter => '\'',
        board_layout::Premium::None => ' ',
    }
}

// tiles placed this turn are shown in lowercase, blanks as '?'.
#[inline(always)]
pub fn board_label(
    board_layout: &board_layout::BoardLayout,
    game_state: &game_state::GameState,
    pos: Position,
) -> char {
    match game_state.at(pos) {
        Some(alphabet::BLANK) => '?',
        Some(tile) if game_state.is_placed_this_turn(pos) => tile.to_ascii_lowercase(),
        Some(tile) => tile.to_ascii_uppercase(),
        None => empty_label(board_layout, pos),
    }
}

fn write_column_header(s: &mut String, size: i32) {
    s.push_str("   ");
    for c in 0..size {
        let _ = write!(s, "{:>3}", c);
    }
    s.push('\n');
}

fn write_border(s: &mut String, size: i32) {
    s.push_str("   +");
    for _ in 1..size {
        s.push_str("---");
    }
    s.push_str("--+\n");
}

pub fn format_board(
    board_layout: &board_layout::BoardLayout,
    game_state: &game_state::GameState,
) -> String {
    let size = game_state.dim.size;
    let mut s = String::new();
    write_column_header(&mut s, size);
    write_border(&mut s, size);
    for r in 0..size {
        let _ = write!(s, "{:>3}|", r);
        for c in 0..size {
            if c > 0 {
                s.push_str("  ");
            } else {
                s.push(' ');
            }
            s.push(board_label(board_layout, game_state, Position::new(r, c)));
        }
        let _ = writeln!(s, "|{}", r);
    }
    write_border(&mut s, size);
    write_column_header(&mut s, size);
    s
}

pub fn print_board(
    board_layout: &board_layout::BoardLayout,
    game_state: &game_state::GameState,
) {
    print!("{}", format_board(board_layout, game_state));
}

pub fn format_scores(game_state: &game_state::GameState) -> String {
    let mut s = String::new();
    for (i, player) in game_state.players.iter().enumerate() {
        let _ = writeln!(
            s,
            "{} {:<10} {:>4}{}",
            if i == game_state.turn { '>' } else { ' ' },
            player.name,
            player.score,
            if player.is_ai() { " (ai)" } else { "" },
        );
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag;

    fn small_state() -> (board_layout::BoardLayout, game_state::GameState) {
        let dim = matrix::Dim::new(5);
        let raw = board_layout::RawLayout {
            size: Some(5),
            squares: Some(vec![
                board_layout::RawSquare {
                    row: Some(0),
                    col: Some(0),
                    kind: Some("TW".into()),
                },
                board_layout::RawSquare {
                    row: Some(1),
                    col: Some(1),
                    kind: Some("DL".into()),
                },
            ]),
        };
        let layout = board_layout::BoardLayout::validate(dim, &raw).unwrap();
        let mut state = game_state::GameState::new(dim, bag::Bag(Vec::new()), 7);
        let mut player = game_state::GamePlayer::new("Ann", game_state::PlayerKind::Human);
        player.rack = vec!['H', 'I'];
        state.players.push(player);
        (layout, state)
    }

    #[test]
    fn labels() {
        let (layout, mut state) = small_state();
        assert_eq!(board_label(&layout, &state, Position::new(0, 0)), '=');
        assert_eq!(board_label(&layout, &state, Position::new(1, 1)), '\'');
        assert_eq!(board_label(&layout, &state, Position::new(2, 2)), '*');
        assert_eq!(board_label(&layout, &state, Position::new(3, 2)), ' ');
        assert!(state.place_tile('H', Position::new(2, 2)));
        assert_eq!(board_label(&layout, &state, Position::new(2, 2)), 'h');
        state.clear_placements();
        assert_eq!(board_label(&layout, &state, Position::new(2, 2)), 'H');
    }

    #[test]
    fn board_text() {
        let (layout, mut state) = small_state();
        assert!(state.place_tile('H', Position::new(2, 2)));
        assert!(state.place_tile('I', Position::new(2, 3)));
        state.clear_placements();
        let text = format_board(&layout, &state);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "     0  1  2  3  4");
        assert_eq!(lines[1], "   +--------------+");
        assert_eq!(lines[2], "  0| =            |0");
        assert_eq!(lines[4], "  2|       H  I   |2");
    }

    #[test]
    fn scores_mark_the_current_player() {
        let (_, mut state) = small_state();
        state
            .players
            .push(game_state::GamePlayer::new("AI 1", game_state::PlayerKind::Ai));
        state.players[1].score = 12;
        let text = format_scores(&state);
        assert_eq!(text, "> Ann           0\n  AI 1         12 (ai)\n");
    }
}

// Copyright (C) 2020-2024 Andy Kurnia.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[inline(always)]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub fn offset(&self, delta_row: i32, delta_col: i32) -> Self {
        Self {
            row: self.row + delta_row,
            col: self.col + delta_col,
        }
    }

    // up, down, left, right. may be off the board.
    #[inline(always)]
    pub fn neighbors(&self) -> [Position; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    // the i-th cell of a lane starting here.
    #[inline(always)]
    pub fn step(&self, horizontal: bool, i: i32) -> Self {
        if horizontal {
            self.offset(0, i)
        } else {
            self.offset(i, 0)
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dim {
    pub size: i32,
}

impl Dim {
    // boards always have a middle square.
    #[inline(always)]
    pub fn new(size: i32) -> Self {
        let size = size.max(1);
        Self {
            size: size + ((size & 1) ^ 1),
        }
    }

    #[inline(always)]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.size && pos.col >= 0 && pos.col < self.size
    }

    #[inline(always)]
    pub fn at(&self, pos: Position) -> usize {
        (pos.row as usize) * (self.size as usize) + (pos.col as usize)
    }

    #[inline(always)]
    pub fn num_cells(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    #[inline(always)]
    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_sizes_are_bumped_to_odd() {
        assert_eq!(Dim::new(15).size, 15);
        assert_eq!(Dim::new(14).size, 15);
        assert_eq!(Dim::new(8).size, 9);
        assert_eq!(Dim::new(14).center(), Position::new(7, 7));
    }

    #[test]
    fn bounds() {
        let dim = Dim::new(15);
        assert!(dim.contains(Position::new(0, 0)));
        assert!(dim.contains(Position::new(14, 14)));
        assert!(!dim.contains(Position::new(-1, 7)));
        assert!(!dim.contains(Position::new(7, 15)));
        assert_eq!(dim.positions().count(), 225);
    }
}

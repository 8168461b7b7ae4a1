use std::ops::{Index, IndexMut};

use crate::direction::Direction;

/// A `(row, col)` pair, row 0 at the top.
pub type Position = (usize, usize);

/// Square grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    data: Vec<T>,
    size: usize,
}

pub struct GridIter<'a, T> {
    grid: &'a Grid<T>,
    pos: usize,
}

impl<T> Grid<T> {
    pub fn new<F: FnMut(usize, usize) -> T>(size: usize, initializer: &mut F) -> Self {
        let mut data = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                data.push(initializer(row, col));
            }
        }

        Self { data, size }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn iter(&self) -> GridIter<T> {
        GridIter { grid: self, pos: 0 }
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(col + row * self.size)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        let index = self.index_of(row, col)?;

        Some(&self.data[index])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        let index = self.index_of(row, col)?;

        Some(&mut self.data[index])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), &'static str> {
        let index = self.index_of(row, col).ok_or("Cell out of range")?;

        self.data[index] = value;

        Ok(())
    }

    /// Position one step from `(row, col)` toward `direction`, or `None` past the edge.
    pub fn neighbor_position(&self, row: usize, col: usize, direction: Direction) -> Option<Position> {
        let (row, col) = match direction {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Right => (row, col + 1),
        };

        self.index_of(row, col).map(|_| (row, col))
    }

    pub fn get_neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<&T> {
        let (row, col) = self.neighbor_position(row, col, direction)?;

        self.get(row, col)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Clone> Grid<T> {
    pub fn fill(&mut self, value: T) {
        for cell in self.data.iter_mut() {
            *cell = value.clone();
        }
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): Position) -> &T {
        self.get(row, col).expect("Cell out of range")
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, (row, col): Position) -> &mut T {
        self.get_mut(row, col).expect("Cell out of range")
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (usize, usize, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = (usize, usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.grid.data.len() {
            None
        } else {
            let row = self.pos / self.grid.size;
            let col = self.pos % self.grid.size;
            let value = &self.grid.data[self.pos];

            self.pos += 1;

            Some((row, col, value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(size: usize) -> Grid<usize> {
        Grid::new(size, &mut |row, col| row * size + col)
    }

    #[test]
    fn iterates_row_major() {
        let grid = numbered(3);
        let cells: Vec<_> = grid.iter().map(|(row, col, &v)| (row, col, v)).collect();

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], (0, 0, 0));
        assert_eq!(cells[4], (1, 1, 4));
        assert_eq!(cells[8], (2, 2, 8));
    }

    #[test]
    fn out_of_range_is_none_not_a_wrap() {
        let grid = numbered(4);

        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(3, 3), Some(&15));
    }

    #[test]
    fn set_rejects_out_of_range() {
        let mut grid = numbered(2);

        assert!(grid.set(1, 1, 42).is_ok());
        assert_eq!(grid[(1, 1)], 42);
        assert!(grid.set(2, 0, 7).is_err());
    }

    #[test]
    fn neighbors_stop_at_the_edges() {
        let grid = numbered(4);

        assert_eq!(grid.get_neighbor(0, 0, Direction::Up), None);
        assert_eq!(grid.get_neighbor(0, 0, Direction::Left), None);
        assert_eq!(grid.get_neighbor(0, 0, Direction::Right), Some(&1));
        assert_eq!(grid.get_neighbor(0, 0, Direction::Down), Some(&4));
        assert_eq!(grid.get_neighbor(3, 3, Direction::Down), None);
        assert_eq!(grid.get_neighbor(3, 3, Direction::Right), None);
        assert_eq!(grid.neighbor_position(2, 1, Direction::Up), Some((1, 1)));
    }
}

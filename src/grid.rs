use core::fmt;

/// Integer grid coordinate. Orders lexicographically on `(x, y)`, which the
/// search relies on as its final deterministic tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Occupancy state of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Occupancy {
    #[default]
    Free,
    Obstacle,
}

/// [GridMap] is a 2D occupancy field with a scalar cell size used for
/// reporting scaled path lengths. Cells are stored row-major. The map is
/// treated as immutable for the duration of a search; [set](Self::set) exists
/// for building maps before searching.
#[derive(Clone, Debug)]
pub struct GridMap {
    width: u32,
    height: u32,
    cell_size: f64,
    cells: Vec<Occupancy>,
}

impl GridMap {
    /// Creates a fully free map of the given dimensions.
    pub fn new(width: u32, height: u32, cell_size: f64) -> GridMap {
        GridMap {
            width,
            height,
            cell_size,
            cells: vec![Occupancy::Free; width as usize * height as usize],
        }
    }

    /// Creates a map from row-major occupancy data. The data length must be
    /// `width * height`.
    pub fn from_rows(width: u32, height: u32, cell_size: f64, cells: Vec<Occupancy>) -> GridMap {
        assert_eq!(cells.len(), width as usize * height as usize);
        GridMap {
            width,
            height,
            cell_size,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    /// Occupancy of an in-bounds cell.
    ///
    /// Panics if `cell` is out of bounds; use
    /// [bordered_occupancy](Self::bordered_occupancy) for possibly-invalid
    /// coordinates.
    pub fn occupancy(&self, cell: Cell) -> Occupancy {
        self.cells[self.index(cell)]
    }

    /// Occupancy at wide signed coordinates, returning `default` for any
    /// position outside the map. Neighbor offsets are computed in `i64` so
    /// that offsets from cells on the border land here as out-of-bounds
    /// rather than wrapping around into valid indices.
    pub fn bordered_occupancy(&self, x: i64, y: i64, default: Occupancy) -> Occupancy {
        if (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y) {
            self.occupancy(Cell::new(x as u32, y as u32))
        } else {
            default
        }
    }

    /// Updates a cell while building a map.
    pub fn set(&mut self, cell: Cell, occupancy: Occupancy) {
        let ix = self.index(cell);
        self.cells[ix] = occupancy;
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                match self.occupancy(Cell::new(x, y)) {
                    Occupancy::Free => write!(f, ".")?,
                    Occupancy::Obstacle => write!(f, "#")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_queries() {
        let grid = GridMap::new(3, 2, 1.0);
        assert!(grid.in_bounds(Cell::new(2, 1)));
        assert!(!grid.in_bounds(Cell::new(3, 1)));
        assert!(!grid.in_bounds(Cell::new(2, 2)));
    }

    #[test]
    fn bordered_returns_default_outside() {
        let mut grid = GridMap::new(2, 2, 1.0);
        grid.set(Cell::new(1, 0), Occupancy::Obstacle);
        assert_eq!(
            grid.bordered_occupancy(-1, 0, Occupancy::Obstacle),
            Occupancy::Obstacle
        );
        assert_eq!(
            grid.bordered_occupancy(0, 2, Occupancy::Free),
            Occupancy::Free
        );
        assert_eq!(
            grid.bordered_occupancy(1, 0, Occupancy::Free),
            Occupancy::Obstacle
        );
        assert_eq!(
            grid.bordered_occupancy(0, 0, Occupancy::Obstacle),
            Occupancy::Free
        );
    }

    #[test]
    fn from_rows_layout() {
        let grid = GridMap::from_rows(
            2,
            2,
            0.5,
            vec![
                Occupancy::Free,
                Occupancy::Obstacle,
                Occupancy::Free,
                Occupancy::Free,
            ],
        );
        assert_eq!(grid.occupancy(Cell::new(1, 0)), Occupancy::Obstacle);
        assert_eq!(grid.occupancy(Cell::new(1, 1)), Occupancy::Free);
        assert_eq!(grid.cell_size(), 0.5);
    }

    #[test]
    fn display_draws_obstacles() {
        let mut grid = GridMap::new(2, 1, 1.0);
        grid.set(Cell::new(0, 0), Occupancy::Obstacle);
        assert_eq!(format!("{grid}"), "#.\n");
    }
}

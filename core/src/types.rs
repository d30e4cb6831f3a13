use ndarray::Array2;

/// Single coordinate axis used for board width, height, and in-grid positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional in-grid coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Signed axis for caller-supplied coordinates, which may fall off the board.
pub type SignedCoord = i16;

/// Caller-facing coordinates `(x, y)`, not yet checked against the board.
pub type Point = (SignedCoord, SignedCoord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Resolves a caller point to in-grid coordinates, `None` when off the board.
pub fn resolve_point((x, y): Point, (size_x, size_y): Coord2) -> Option<Coord2> {
    let x = Coord::try_from(x).ok()?;
    let y = Coord::try_from(y).ok()?;
    (x < size_x && y < size_y).then_some((x, y))
}

/// Next coordinate in row-major order (x first), wrapping the last cell back to the origin.
pub const fn next_row_major((x, y): Coord2, (size_x, size_y): Coord2) -> Coord2 {
    if x + 1 < size_x {
        (x + 1, y)
    } else if y + 1 < size_y {
        (0, y + 1)
    } else {
        (0, 0)
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_size(self), &DISPLACEMENTS)
    }

    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_size(self), &ORTHOGONAL)
    }
}

fn array_size<T>(array: &Array2<T>) -> Coord2 {
    let (x, y) = array.dim();
    (
        x.try_into().unwrap_or(Coord::MAX),
        y.try_into().unwrap_or(Coord::MAX),
    )
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// right, left, down, up
const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2, deltas: &'static [(isize, isize)]) -> Self {
        Self {
            center,
            bounds,
            deltas,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.deltas.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

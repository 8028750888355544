use crate::direction::Direction;

// Number of scanlines needed to cover a width×height grid along `dir`.
// Diagonals start on two edges and share one corner, hence the subtraction.
// An empty grid needs none.
pub fn scanline_count(dir: Direction, width: usize, height: usize) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let ax = dir.dx.unsigned_abs() as usize;
    let ay = dir.dy.unsigned_abs() as usize;
    ax * height + ay * width - ax * ay
}

// Starting `(row, col)` of scanline `line` along `dir`.
//
// Each direction class seeds its lines from the grid edge the sweep enters
// through: first one edge in full, then the remaining cells of the
// perpendicular edge, skipping the shared corner.
//
// An empty grid has no lines; it answers (0, 0) for any index.
pub fn scanline_origin(dir: Direction, line: usize, width: usize, height: usize) -> (usize, usize) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let (dx, dy) = (dir.dx, dir.dy);
    if dx > 0 && dy <= 0 {
        // left edge, then bottom edge
        if line < height {
            (line, 0)
        } else {
            (height - 1, line - height + 1)
        }
    } else if dx >= 0 && dy > 0 {
        // top edge, then left edge
        if line < width {
            (0, line)
        } else {
            (line - width + 1, 0)
        }
    } else if dx <= 0 && dy < 0 {
        // bottom edge, then right edge
        if line < width {
            (height - 1, line)
        } else {
            (line - width, width - 1)
        }
    } else {
        // dx < 0 && dy >= 0: right edge, then top edge
        if line < height {
            (line, width - 1)
        } else {
            (0, line - height)
        }
    }
}

// All scanlines of one direction, in line-index order
#[derive(Debug, Clone)]
pub struct Scanlines {
    dir: Direction,
    width: usize,
    height: usize,
    next: usize,
    count: usize,
}

impl Scanlines {
    pub fn new(dir: Direction, width: usize, height: usize) -> Self {
        Self {
            dir,
            width,
            height,
            next: 0,
            count: scanline_count(dir, width, height),
        }
    }
}

impl Iterator for Scanlines {
    type Item = Scanline;

    fn next(&mut self) -> Option<Scanline> {
        if self.next >= self.count {
            return None;
        }
        let (row, col) = scanline_origin(self.dir, self.next, self.width, self.height);
        self.next += 1;
        Some(Scanline {
            dir: self.dir,
            width: self.width as isize,
            height: self.height as isize,
            row: row as isize,
            col: col as isize,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Scanlines {}

// Cells of a single scanline as `(row, col)`, stepping until the grid is left
#[derive(Debug, Clone)]
pub struct Scanline {
    dir: Direction,
    width: isize,
    height: isize,
    row: isize,
    col: isize,
}

impl Iterator for Scanline {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<(usize, usize)> {
        if self.row < 0 || self.row >= self.height || self.col < 0 || self.col >= self.width {
            return None;
        }
        let cell = (self.row as usize, self.col as usize);
        self.row += self.dir.dy as isize;
        self.col += self.dir.dx as isize;
        Some(cell)
    }
}

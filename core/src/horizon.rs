// Monotonic horizon hull for one scanline sweep.
//
// Points are kept as the upper envelope of everything visited so far on the
// line. Looking back from a new sample, the envelope's elevation angle rises
// towards the tangent point and falls after it, so popping from the near end
// until the angle stops improving finds the horizon in amortized O(1).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn distance(self, other: Point3) -> f32 {
        // hypot keeps tall walls from overflowing the squared sum
        (other.x - self.x)
            .hypot(other.y - self.y)
            .hypot(other.z - self.z)
    }
}

// Sine of the elevation angle of `b` seen from `a`.
// Undefined for coincident points; the hull never compares those.
#[inline]
pub fn slope(a: Point3, b: Point3) -> f32 {
    (b.z - a.z) / a.distance(b)
}

pub struct HorizonHull {
    points: Vec<Point3>,
}

impl HorizonHull {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    // Preallocate for the longest scanline so sweeps never reallocate
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    // Start a new scanline, keeping the allocation
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // Top of the hull without pruning
    pub fn top(&self) -> Option<Point3> {
        self.points.last().copied()
    }

    // Drop every point that `sample` proves dominated and return the
    // horizon for it. An empty hull means `sample` is its own horizon.
    pub fn horizon(&mut self, sample: Point3) -> Point3 {
        while let &[.., second, top] = self.points.as_slice() {
            if slope(sample, top) > slope(sample, second) {
                break;
            }
            self.points.pop();
        }
        self.top().unwrap_or(sample)
    }

    pub fn push(&mut self, sample: Point3) {
        self.points.push(sample);
    }

    // horizon() followed by push(), the per-sample step of a sweep
    #[inline]
    pub fn advance(&mut self, sample: Point3) -> Point3 {
        let horizon = self.horizon(sample);
        self.push(sample);
        horizon
    }
}

impl Default for HorizonHull {
    fn default() -> Self {
        Self::new()
    }
}

// O(n²) reference: for every point, the earlier point with the steepest
// slope (the point itself for the first one). Used to check the hull.
pub fn brute_force_horizons(points: &[Point3]) -> Vec<Point3> {
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            points[..i]
                .iter()
                .copied()
                .max_by(|&a, &b| slope(p, a).total_cmp(&slope(p, b)))
                .unwrap_or(p)
        })
        .collect()
}

// Hull-based horizons for a whole line, same shape as `brute_force_horizons`
pub fn hull_horizons(points: &[Point3]) -> Vec<Point3> {
    let mut hull = HorizonHull::with_capacity(points.len());
    points.iter().map(|&p| hull.advance(p)).collect()
}

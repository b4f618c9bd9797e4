//! Planar integer geometry: points, orientation, and segment predicates.
//!
//! All predicates work on exact `i64` cross products, so there is no epsilon
//! and no rounding: a point is either on a segment or it is not.

/// A node position on the integer grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.distance2(other) as f64).sqrt()
    }

    /// Squared Euclidean distance, exact.
    #[inline]
    pub fn distance2(self, other: Point) -> i64 {
        let dx = other.x as i64 - self.x as i64;
        let dy = other.y as i64 - self.y as i64;
        dx * dx + dy * dy
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Orientation ───────────────────────────────────────────────────────────────

/// Turn direction of the ordered triple `(a, b, c)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// `+1`, `0` or `-1`, matching the sign of the cross product.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Clockwise        => -1,
            Orientation::Collinear        => 0,
            Orientation::CounterClockwise => 1,
        }
    }
}

/// Sign of the cross product `(b - a) × (c - a)`.
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let value = (b.x as i64 - a.x as i64) * (c.y as i64 - a.y as i64)
        - (b.y as i64 - a.y as i64) * (c.x as i64 - a.x as i64);
    match value.signum() {
        1  => Orientation::CounterClockwise,
        -1 => Orientation::Clockwise,
        _  => Orientation::Collinear,
    }
}

/// `true` iff `p` is collinear with `a`–`b` and inside their bounding box
/// (endpoints included).
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    orientation(a, b, p) == Orientation::Collinear
        && a.x.min(b.x) <= p.x
        && p.x <= a.x.max(b.x)
        && a.y.min(b.y) <= p.y
        && p.y <= a.y.max(b.y)
}

/// `true` iff segment `a`–`b` and segment `c`–`d` cross properly, or an
/// endpoint of one lies on the other.
///
/// Shared endpoints count as touching, so callers must skip segments that
/// share an endpoint with the one being tested.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    use Orientation::Collinear;

    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    let proper = [o1, o2, o3, o4].iter().all(|&o| o != Collinear);
    if proper && o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Collinear && point_on_segment(c, a, b))
        || (o2 == Collinear && point_on_segment(d, a, b))
        || (o3 == Collinear && point_on_segment(a, c, d))
        || (o4 == Collinear && point_on_segment(b, c, d))
}

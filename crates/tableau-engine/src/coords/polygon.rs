use super::{Rect, Vec2};

/// Ray-casting parity test.
///
/// Each edge `(i, j = i - 1)` toggles parity when `p.y` lies in the edge's
/// half-open Y span (either winding) and `p` lies left of the edge at that
/// height. Horizontal edges have an empty span and never toggle, so points on
/// a polygon's lowest-Y edge count as inside and points on its highest-Y edge
/// as outside. Degenerate and self-intersecting input is not special-cased.
pub fn point_in_polygon(polygon: &[Vec2], p: Vec2) -> bool {
    let Some(mut j) = polygon.len().checked_sub(1) else {
        return false;
    };

    let mut inside = false;
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[j];
        let spans = (a.y <= p.y && p.y < b.y) || (b.y <= p.y && p.y < a.y);
        if spans && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Hit-test shape: an ordered ring of world-space points.
///
/// The ring is implicitly closed. A shape is only used for containment tests
/// and does not have to match what the owning object draws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    bounds: Option<Rect>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        let bounds = Rect::bounding(&points);
        Self { points, bounds }
    }

    /// Axis-aligned rectangle as a four-point ring.
    pub fn rect(rect: Rect) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self::new(vec![
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Exact parity test, short-circuited by the bounding box.
    pub fn contains(&self, p: Vec2) -> bool {
        match self.bounds {
            Some(b) if b.contains(p) => point_in_polygon(&self.points, p),
            _ => false,
        }
    }
}

impl From<Vec<Vec2>> for Polygon {
    fn from(points: Vec<Vec2>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Vec2> for Polygon {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Planar geometry used to relate elevation samples to the river centerline.
//!
//! The detector only ever asks two questions of the centerline: how far a
//! point is from it, and where along it the point projects. Those queries
//! live behind [`CenterlineGeometry`] so a caller can hand in the geometry of
//! an external engine; [`Polyline`] and [`Centerline`] cover the common case.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Read-only queries the anchor locator needs from the river centerline.
pub trait CenterlineGeometry {
    /// Shortest planar distance from `point` to the geometry.
    fn distance_to(&self, point: Point2) -> f64;

    /// Arc length from the start of the geometry to the projection of `point`.
    fn locate(&self, point: Point2) -> f64;
}

/// Projection of a point onto a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    distance: f64,
    along: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point2>,
}

impl Polyline {
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// Nearest projection, first segment wins on ties.
    fn project(&self, point: Point2) -> Option<Projection> {
        match self.vertices.as_slice() {
            [] => None,
            [only] => Some(Projection {
                distance: only.distance(point),
                along: 0.0,
            }),
            vertices => {
                let mut best: Option<Projection> = None;
                let mut walked = 0.0;
                for pair in vertices.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let seg_len = a.distance(b);
                    let t = segment_parameter(a, b, point);
                    let foot = Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
                    let candidate = Projection {
                        distance: foot.distance(point),
                        along: walked + seg_len * t,
                    };
                    if best.map_or(true, |current| candidate.distance < current.distance) {
                        best = Some(candidate);
                    }
                    walked += seg_len;
                }
                best
            }
        }
    }
}

fn segment_parameter(a: Point2, b: Point2, p: Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return 0.0;
    }
    (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
}

impl CenterlineGeometry for Polyline {
    fn distance_to(&self, point: Point2) -> f64 {
        self.project(point)
            .map_or(f64::INFINITY, |projection| projection.distance)
    }

    fn locate(&self, point: Point2) -> f64 {
        self.project(point).map_or(0.0, |projection| projection.along)
    }
}

/// Multi-part river centerline built by folding every river feature together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Centerline {
    parts: Vec<Polyline>,
}

impl Centerline {
    /// Fold river features into a single geometry.
    ///
    /// Empty parts are dropped. Returns `None` when nothing remains, which the
    /// anchor locator treats as "no centerline available".
    pub fn combine<I>(features: I) -> Option<Self>
    where
        I: IntoIterator<Item = Polyline>,
    {
        features
            .into_iter()
            .filter(|part| !part.is_empty())
            .fold(None, |acc: Option<Centerline>, part| {
                let mut combined = acc.unwrap_or_default();
                combined.parts.push(part);
                Some(combined)
            })
    }

    pub fn parts(&self) -> &[Polyline] {
        &self.parts
    }

    pub fn length(&self) -> f64 {
        self.parts.iter().map(Polyline::length).sum()
    }

    fn project(&self, point: Point2) -> Option<Projection> {
        let mut best: Option<Projection> = None;
        let mut offset = 0.0;
        for part in &self.parts {
            if let Some(local) = part.project(point) {
                if best.map_or(true, |current| local.distance < current.distance) {
                    best = Some(Projection {
                        distance: local.distance,
                        along: offset + local.along,
                    });
                }
            }
            offset += part.length();
        }
        best
    }
}

impl CenterlineGeometry for Centerline {
    fn distance_to(&self, point: Point2) -> f64 {
        self.project(point)
            .map_or(f64::INFINITY, |projection| projection.distance)
    }

    fn locate(&self, point: Point2) -> f64 {
        self.project(point).map_or(0.0, |projection| projection.along)
    }
}

use crate::{Vec3, constants::DIST_EPS};

/// Position and travel direction at a distance along a [`PathSpline`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    pub position: Vec3,
    /// Unit tangent; zero on an empty or single-point path.
    pub tangent: Vec3,
}

/// An arc-length indexed polyline through a mover's waypoints.
///
/// `cumulative[i]` is the distance from the first point to `points[i]`; consecutive points
/// closer than `DIST_EPS` are merged so every segment has positive length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathSpline {
    points: Vec<Vec3>,
    cumulative: Vec<f32>,
}

impl PathSpline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut spline = Self::new();
        for p in points {
            spline.add_point(p);
        }
        spline
    }

    pub fn add_point(&mut self, point: Vec3) {
        match self.points.last() {
            None => {
                self.points.push(point);
                self.cumulative.push(0.0);
            }
            Some(last) => {
                let len = (point - last).norm();
                if len <= DIST_EPS {
                    return;
                }
                let total = self.length() + len;
                self.points.push(point);
                self.cumulative.push(total);
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.cumulative.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Sample the path `distance` units from its start, clamped to `[0, length]`.
    ///
    /// At an exact joint the tangent is the outgoing segment's direction; at the very end it is
    /// the last segment's.
    pub fn sample(&self, distance: f32) -> PathSample {
        match self.points.len() {
            0 => PathSample {
                position: Vec3::zeros(),
                tangent: Vec3::zeros(),
            },
            1 => PathSample {
                position: self.points[0],
                tangent: Vec3::zeros(),
            },
            n => {
                let d = distance.clamp(0.0, self.length());
                // First segment whose end lies strictly beyond `d`, or the last one.
                let seg = self.cumulative[1..]
                    .partition_point(|&c| c <= d)
                    .min(n - 2);
                let (a, b) = (self.points[seg], self.points[seg + 1]);
                let seg_len = self.cumulative[seg + 1] - self.cumulative[seg];
                let t = ((d - self.cumulative[seg]) / seg_len).clamp(0.0, 1.0);
                PathSample {
                    position: a + (b - a) * t,
                    tangent: (b - a) / seg_len,
                }
            }
        }
    }

    #[inline]
    pub fn location_at(&self, distance: f32) -> Vec3 {
        self.sample(distance).position
    }
}

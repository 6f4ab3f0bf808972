//! Delaunay triangulation of a planar point cloud (Bowyer–Watson).

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub(super) fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_squared(self, other: Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }
}

/// A triangle as indices into the triangulated points.
pub(super) type Triangle = [usize; 3];

/// Relative slack for the in-circumcircle test.
const CIRCLE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    center: Point,
    radius_squared: f64,
}

impl Circumcircle {
    fn of(a: Point, b: Point, c: Point) -> Option<Self> {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < f64::EPSILON {
            return None;
        }

        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        let center = Point::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );

        Some(Self {
            center,
            radius_squared: center.distance_squared(a),
        })
    }

    fn contains(&self, p: Point) -> bool {
        self.center.distance_squared(p) < self.radius_squared * (1.0 - CIRCLE_TOLERANCE)
    }
}

/// Triangulates `points`, which should be distinct and roughly unit-scaled.
///
/// Returns an empty list when the points are all collinear.
pub(super) fn triangulate(points: &[Point]) -> Vec<Triangle> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // Enclosing triangle well outside the unit square.
    let mut vertices = points.to_vec();
    vertices.extend([
        Point::new(-10.0, -10.0),
        Point::new(20.0, -10.0),
        Point::new(-10.0, 20.0),
    ]);

    let mut triangles: Vec<(Triangle, Circumcircle)> = Vec::new();
    let root = [n, n + 1, n + 2];
    if let Some(circle) = circle_of(&vertices, root) {
        triangles.push((root, circle));
    }

    for (index, &p) in points.iter().enumerate() {
        let (bad, good): (Vec<_>, Vec<_>) = triangles
            .into_iter()
            .partition(|(_, circle)| circle.contains(p));
        triangles = good;

        for edge in cavity_boundary(&bad) {
            let triangle = [edge[0], edge[1], index];
            if let Some(circle) = circle_of(&vertices, triangle) {
                triangles.push((triangle, circle));
            }
        }
    }

    triangles
        .into_iter()
        .map(|(triangle, _)| triangle)
        .filter(|triangle| triangle.iter().all(|&v| v < n))
        .collect()
}

fn circle_of(vertices: &[Point], [a, b, c]: Triangle) -> Option<Circumcircle> {
    Circumcircle::of(vertices[a], vertices[b], vertices[c])
}

/// Edges that belong to exactly one of the removed triangles.
fn cavity_boundary(bad: &[(Triangle, Circumcircle)]) -> Vec<[usize; 2]> {
    let edges: Vec<[usize; 2]> = bad
        .iter()
        .flat_map(|([a, b, c], _)| [[*a, *b], [*b, *c], [*c, *a]])
        .collect();

    edges
        .iter()
        .filter(|edge| {
            edges
                .iter()
                .filter(|other| same_edge(edge, other))
                .count()
                == 1
        })
        .copied()
        .collect()
}

fn same_edge(a: &[usize; 2], b: &[usize; 2]) -> bool {
    (a[0] == b[0] && a[1] == b[1]) || (a[0] == b[1] && a[1] == b[0])
}

/// Barycentric weights of `p` with respect to triangle `abc`.
///
/// Weights may be negative when `p` lies outside the triangle.
pub(super) fn barycentric(p: Point, [a, b, c]: [Point; 3]) -> Option<[f64; 3]> {
    let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if det.abs() < f64::EPSILON {
        return None;
    }

    let wa = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
    let wb = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
    Some([wa, wb, 1.0 - wa - wb])
}

/// Squared distance from `p` to the closest point of triangle `abc`'s boundary.
pub(super) fn distance_squared_to_triangle(p: Point, [a, b, c]: [Point; 3]) -> f64 {
    [(a, b), (b, c), (c, a)]
        .into_iter()
        .map(|(start, end)| distance_squared_to_segment(p, start, end))
        .fold(f64::INFINITY, f64::min)
}

fn distance_squared_to_segment(p: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_squared = dx * dx + dy * dy;
    if length_squared == 0.0 {
        return p.distance_squared(start);
    }

    let t = (((p.x - start.x) * dx + (p.y - start.y) * dy) / length_squared).clamp(0.0, 1.0);
    p.distance_squared(Point::new(start.x + t * dx, start.y + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn area(points: &[Point], [a, b, c]: Triangle) -> f64 {
        let (a, b, c) = (points[a], points[b], points[c]);
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs()
    }

    #[test]
    fn square_splits_into_two_triangles() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let triangles = triangulate(&points);

        assert_eq!(triangles.len(), 2);
        let total: f64 = triangles.iter().map(|t| area(&points, *t)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn grid_covers_its_hull() {
        let points: Vec<Point> = (0..5)
            .flat_map(|i| (0..4).map(move |j| Point::new(f64::from(i) / 4.0, f64::from(j) / 3.0)))
            .collect();
        let triangles = triangulate(&points);

        // 4 x 3 cells, two triangles each.
        assert_eq!(triangles.len(), 24);
        let total: f64 = triangles.iter().map(|t| area(&points, *t)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn collinear_points_have_no_triangles() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.5),
            Point::new(1.0, 1.0),
        ];
        assert!(triangulate(&points).is_empty());
    }

    #[test]
    fn barycentric_weights() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];

        let [wa, wb, wc] = barycentric(Point::new(0.25, 0.25), corners).unwrap();
        assert_relative_eq!(wa, 0.5);
        assert_relative_eq!(wb, 0.25);
        assert_relative_eq!(wc, 0.25);

        let outside = barycentric(Point::new(2.0, 0.0), corners).unwrap();
        assert!(outside[0] < 0.0);
    }

    #[test]
    fn distance_to_triangle() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        assert_relative_eq!(distance_squared_to_triangle(Point::new(0.5, -2.0), corners), 4.0);
        assert_relative_eq!(distance_squared_to_triangle(Point::new(-3.0, -4.0), corners), 25.0);
    }
}

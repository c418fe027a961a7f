//! Edge path geometry.
//!
//! An edge is anchored on the border of each endpoint node (never the
//! center, so arrowheads don't disappear under the box). With explicit
//! routing points the path is a polyline through them; without, short
//! edges draw straight and longer ones as a quadratic curve whose bow
//! grows with the endpoint distance.

use kurbo::{BezPath, ParamCurve, Point, QuadBez, Vec2};
use wv_core::Bounds;

/// Edges shorter than this draw straight; the curve would not be visible.
const MIN_CURVE_DISTANCE: f64 = 60.0;
/// Bow height as a fraction of endpoint distance.
const CURVATURE: f64 = 0.15;

/// A computed edge path plus the anchors the paint pass needs.
#[derive(Debug, Clone)]
pub struct EdgePath {
    pub path: BezPath,
    pub start: Point,
    pub end: Point,
    /// Unit direction of the final path segment, for arrowhead orientation.
    pub end_direction: Vec2,
    /// Label anchor — the visual middle of the path.
    pub midpoint: Point,
}

fn center(b: &Bounds) -> Point {
    let c = b.center();
    Point::new(c.x as f64, c.y as f64)
}

/// Walk from the center of `bounds` toward `toward` and stop at the
/// border. Falls back to the center for degenerate (zero-size) bounds.
pub fn anchor_on_border(bounds: &Bounds, toward: Point) -> Point {
    let c = center(bounds);
    let d = toward - c;
    if d.hypot() < 1e-6 {
        return c;
    }
    let half_w = bounds.width as f64 / 2.0;
    let half_h = bounds.height as f64 / 2.0;
    let tx = if d.x.abs() > 1e-6 {
        half_w / d.x.abs()
    } else {
        f64::INFINITY
    };
    let ty = if d.y.abs() > 1e-6 {
        half_h / d.y.abs()
    } else {
        f64::INFINITY
    };
    let t = tx.min(ty).min(1.0);
    c + d * t
}

/// Build the path between two node bounds.
pub fn build_edge_path(source: &Bounds, target: &Bounds, routing: &[wv_core::Point]) -> EdgePath {
    if !routing.is_empty() {
        return polyline_path(source, target, routing);
    }

    let start = anchor_on_border(source, center(target));
    let end = anchor_on_border(target, center(source));
    let d = end - start;
    let distance = d.hypot();

    if distance < MIN_CURVE_DISTANCE {
        let mut path = BezPath::new();
        path.move_to(start);
        path.line_to(end);
        return EdgePath {
            path,
            start,
            end,
            end_direction: unit(d),
            midpoint: start.midpoint(end),
        };
    }

    // Quadratic bow, perpendicular to the chord, proportional to distance.
    let mid = start.midpoint(end);
    let perp = Vec2::new(-d.y, d.x) * (1.0 / distance);
    let ctrl = mid + perp * (distance * CURVATURE);

    let quad = QuadBez::new(start, ctrl, end);
    let mut path = BezPath::new();
    path.move_to(start);
    path.quad_to(ctrl, end);

    EdgePath {
        path,
        start,
        end,
        // Quadratic derivative at t=1 points from control to end.
        end_direction: unit(end - ctrl),
        midpoint: quad.eval(0.5),
    }
}

fn polyline_path(source: &Bounds, target: &Bounds, routing: &[wv_core::Point]) -> EdgePath {
    let first = Point::new(routing[0].x as f64, routing[0].y as f64);
    let last = {
        let p = routing[routing.len() - 1];
        Point::new(p.x as f64, p.y as f64)
    };
    let start = anchor_on_border(source, first);
    let end = anchor_on_border(target, last);

    let mut points = Vec::with_capacity(routing.len() + 2);
    points.push(start);
    points.extend(
        routing
            .iter()
            .map(|p| Point::new(p.x as f64, p.y as f64)),
    );
    points.push(end);

    let mut path = BezPath::new();
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }

    let end_direction = unit(points[points.len() - 1] - points[points.len() - 2]);
    let midpoint = points[points.len() / 2];

    EdgePath {
        path,
        start,
        end,
        end_direction,
        midpoint,
    }
}

/// Filled triangle arrowhead with its tip at `tip`, pointing along `dir`.
pub fn arrowhead(tip: Point, dir: Vec2, size: f64) -> BezPath {
    let dir = unit(dir);
    let back = tip - dir * size;
    let perp = Vec2::new(-dir.y, dir.x) * (size * 0.45);

    let mut path = BezPath::new();
    path.move_to(tip);
    path.line_to(back + perp);
    path.line_to(back - perp);
    path.close_path();
    path
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len < 1e-9 {
        Vec2::new(1.0, 0.0)
    } else {
        v * (1.0 / len)
    }
}

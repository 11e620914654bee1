use std::ops::{Add, Sub};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rounds each axis independently to the nearest multiple of `grid`.
    pub fn snapped(self, grid: f32) -> Self {
        Self::new(snap(self.x, grid), snap(self.y, grid))
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

pub fn snap(value: f32, grid: f32) -> f32 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge midpoint, where the connection handle sits.
    pub fn mid_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    pub fn centered_on(center: Point, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// One end of a routed edge: either a node (anchored at its center) or a
/// free canvas point such as the live pointer while drawing a connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteEnd {
    Node(Rect),
    Free(Point),
}

impl RouteEnd {
    pub fn anchor(&self) -> Point {
        match self {
            RouteEnd::Node(rect) => rect.center(),
            RouteEnd::Free(point) => *point,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicCurve {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

impl CubicCurve {
    pub fn eval(&self, t: f32) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.c1.x + c * self.c2.x + d * self.end.x,
            a * self.start.y + b * self.c1.y + c * self.c2.y + d * self.end.y,
        )
    }

    /// Approximate distance from `point` to the curve, measured against a
    /// polyline of `samples` segments.
    pub fn distance_to(&self, point: Point, samples: usize) -> f32 {
        let samples = samples.max(1);
        let mut best = f32::MAX;
        let mut prev = self.start;
        for i in 1..=samples {
            let next = self.eval(i as f32 / samples as f32);
            best = best.min(segment_distance_sq(point, prev, next));
            prev = next;
        }
        best.sqrt()
    }

    pub fn to_path_data(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            fmt_num(self.start.x),
            fmt_num(self.start.y),
            fmt_num(self.c1.x),
            fmt_num(self.c1.y),
            fmt_num(self.c2.x),
            fmt_num(self.c2.y),
            fmt_num(self.end.x),
            fmt_num(self.end.y),
        )
    }
}

/// Routes a cubic curve between two ends.
///
/// When `|dy| > |dx|` the control points are pushed vertically by `tangent`
/// toward the other end, otherwise horizontally. There is no blending
/// between the two regimes.
pub fn route(from: RouteEnd, to: RouteEnd, tangent: f32) -> CubicCurve {
    let start = from.anchor();
    let end = to.anchor();
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dy.abs() > dx.abs() {
        let offset = tangent * dy.signum();
        CubicCurve {
            start,
            c1: Point::new(start.x, start.y + offset),
            c2: Point::new(end.x, end.y - offset),
            end,
        }
    } else {
        let offset = tangent * dx.signum();
        CubicCurve {
            start,
            c1: Point::new(start.x + offset, start.y),
            c2: Point::new(end.x - offset, end.y),
            end,
        }
    }
}

fn segment_distance_sq(point: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq < f32::EPSILON {
        return point.distance_sq(a);
    }
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    point.distance_sq(Point::new(a.x + t * ab.x, a.y + t * ab.y))
}

fn fmt_num(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

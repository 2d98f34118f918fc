//! Outline tracing for a circle chain
//!
//! The filled shape is the union of every circle and the convex hull of each
//! consecutive pair. A pair hull is its two discs plus the quad spanned by the
//! four outer tangent points, so the only curves that can lie on the boundary
//! are the circles themselves and the outer tangent segments.
//!
//! Every candidate curve is cut wherever it meets another one. A piece
//! survives when its midpoint is outside every disc and every pair quad.
//! Survivors are chained end to start into closed loops. Pieces are oriented
//! with the filled side on their right (clockwise with y up), so gaps enclosed
//! by a folded chain come out as counter-clockwise loops and a nonzero fill
//! leaves them empty.
//!
//! Runs in f64: near-parallel tangents at shallow concave joins leave slivers
//! a few ulps wide in f32.

use std::f64::consts::TAU;
use std::ops::{Add, Mul, Sub};

use crate::core::math::Vec2;

use super::ribbon::{Circle, PathCommand};

/// Midpoints closer than this to a region boundary count as outside
const INSIDE_EPS: f64 = 1e-9;
/// Pieces shorter than this are dropped; the join tolerance bridges them
const MIN_PIECE: f64 = 1e-4;
const JOIN_TOL: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
struct P {
    x: f64,
    y: f64,
}

impl P {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    fn cross(self, other: P) -> f64 {
        self.x * other.y - self.y * other.x
    }

    fn dot(self, other: P) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    fn distance(self, other: P) -> f64 {
        (other - self).length()
    }

    fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl From<Vec2> for P {
    fn from(v: Vec2) -> Self {
        Self::new(v.x as f64, v.y as f64)
    }
}

impl Add for P {
    type Output = P;
    fn add(self, o: P) -> P {
        P::new(self.x + o.x, self.y + o.y)
    }
}

impl Sub for P {
    type Output = P;
    fn sub(self, o: P) -> P {
        P::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f64> for P {
    type Output = P;
    fn mul(self, s: f64) -> P {
        P::new(self.x * s, self.y * s)
    }
}

#[derive(Clone, Copy, Debug)]
struct Disc {
    center: P,
    radius: f64,
}

impl Disc {
    fn point_at(&self, angle: f64) -> P {
        self.center + P::from_angle(angle) * self.radius
    }

    fn angle_of(&self, p: P) -> f64 {
        let d = p - self.center;
        d.y.atan2(d.x)
    }

    fn strictly_contains(&self, p: P) -> bool {
        self.center.distance(p) < self.radius - INSIDE_EPS
    }
}

impl From<&Circle> for Disc {
    fn from(c: &Circle) -> Self {
        Self { center: c.center.into(), radius: c.radius as f64 }
    }
}

/// Outer tangent segment, oriented so the pair hull is on its right
#[derive(Clone, Copy, Debug)]
struct Segment {
    start: P,
    end: P,
    /// The two discs it touches; it never crosses them
    discs: [usize; 2],
}

impl Segment {
    fn at(&self, t: f64) -> P {
        self.start + (self.end - self.start) * t
    }

    fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Convex quad between a pair's four tangent points
struct Quad([P; 4]);

impl Quad {
    fn strictly_contains(&self, p: P) -> bool {
        let v = &self.0;
        let mut area = 0.0;
        for i in 0..4 {
            area += v[i].cross(v[(i + 1) % 4]);
        }
        if area.abs() < 1e-12 {
            return false;
        }
        let sign = area.signum();
        for i in 0..4 {
            let (a, b) = (v[i], v[(i + 1) % 4]);
            let edge = b - a;
            let len = edge.length();
            if len < 1e-12 {
                continue;
            }
            if edge.cross(p - a) / len * sign <= INSIDE_EPS {
                return false;
            }
        }
        true
    }
}

/// Normal angles (left, right) of the two outer tangents from `a` to `b`
fn tangent_angles(a: &Disc, b: &Disc) -> (f64, f64) {
    let d = b.center - a.center;
    let alpha = d.y.atan2(d.x);
    let theta = ((a.radius - b.radius) / d.length()).clamp(-1.0, 1.0).acos();
    (alpha + theta, alpha - theta)
}

fn circle_circle(a: &Disc, b: &Disc) -> Option<[P; 2]> {
    let d = b.center - a.center;
    let dist = d.length();
    if dist < 1e-12 || dist >= a.radius + b.radius || dist <= (a.radius - b.radius).abs() {
        return None;
    }
    let along = (a.radius * a.radius - b.radius * b.radius + dist * dist) / (2.0 * dist);
    let h2 = a.radius * a.radius - along * along;
    if h2 <= 0.0 {
        return None;
    }
    let h = h2.sqrt();
    let u = d * (1.0 / dist);
    let mid = a.center + u * along;
    let perp = P::new(-u.y, u.x);
    Some([mid + perp * h, mid - perp * h])
}

/// Parameters in (0, 1) where the segment crosses the circle
fn segment_circle(s: &Segment, c: &Disc) -> Vec<f64> {
    let d = s.end - s.start;
    let f = s.start - c.center;
    let a = d.dot(d);
    let b = 2.0 * f.dot(d);
    let k = f.dot(f) - c.radius * c.radius;
    let disc = b * b - 4.0 * a * k;
    if a < 1e-12 || disc <= 0.0 {
        return Vec::new();
    }
    let q = disc.sqrt();
    [(-b - q) / (2.0 * a), (-b + q) / (2.0 * a)]
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .collect()
}

fn segment_segment(s: &Segment, o: &Segment) -> Option<(f64, f64)> {
    let d1 = s.end - s.start;
    let d2 = o.end - o.start;
    let denom = d1.cross(d2);
    if denom.abs() < 1e-12 {
        return None;
    }
    let w = o.start - s.start;
    let t = w.cross(d2) / denom;
    let u = w.cross(d1) / denom;
    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some((t, u))
    } else {
        None
    }
}

struct Piece {
    start: P,
    end: P,
    command: PathCommand,
    full_circle: bool,
}

/// Closed loops bounding the chain. `chain` must already be pruned.
pub(super) fn trace(chain: &[Circle]) -> Vec<PathCommand> {
    let discs: Vec<Disc> = chain.iter().map(Disc::from).collect();
    let n = discs.len();
    if n == 0 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(2 * (n - 1));
    let mut quads = Vec::with_capacity(n - 1);
    let mut disc_cuts: Vec<Vec<f64>> = vec![Vec::new(); n];

    for k in 0..n - 1 {
        let (a, b) = (&discs[k], &discs[k + 1]);
        let (left, right) = tangent_angles(a, b);
        let (al, bl) = (a.point_at(left), b.point_at(left));
        let (ar, br) = (a.point_at(right), b.point_at(right));
        segments.push(Segment { start: al, end: bl, discs: [k, k + 1] });
        segments.push(Segment { start: br, end: ar, discs: [k, k + 1] });
        quads.push(Quad([al, bl, br, ar]));
        for (i, p) in [(k, al), (k, ar), (k + 1, bl), (k + 1, br)] {
            disc_cuts[i].push(discs[i].angle_of(p));
        }
    }

    let mut segment_cuts: Vec<Vec<f64>> = vec![Vec::new(); segments.len()];

    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(points) = circle_circle(&discs[i], &discs[j]) {
                for p in points {
                    disc_cuts[i].push(discs[i].angle_of(p));
                    disc_cuts[j].push(discs[j].angle_of(p));
                }
            }
        }
    }

    for (si, s) in segments.iter().enumerate() {
        for (j, disc) in discs.iter().enumerate() {
            if s.discs.contains(&j) {
                continue;
            }
            for t in segment_circle(s, disc) {
                segment_cuts[si].push(t);
                disc_cuts[j].push(disc.angle_of(s.at(t)));
            }
        }
        for (sj, o) in segments.iter().enumerate().skip(si + 1) {
            if let Some((t, u)) = segment_segment(s, o) {
                segment_cuts[si].push(t);
                segment_cuts[sj].push(u);
            }
        }
    }

    let covered = |p: P| discs.iter().any(|d| d.strictly_contains(p)) || quads.iter().any(|q| q.strictly_contains(p));

    let mut pieces = Vec::new();

    for (disc, cuts) in discs.iter().zip(disc_cuts.iter_mut()) {
        if cuts.is_empty() {
            // Lone circle
            let p = disc.point_at(0.0);
            pieces.push(Piece {
                start: p,
                end: p,
                command: PathCommand::Arc {
                    center: disc.center.to_vec2(),
                    radius: disc.radius as f32,
                    start: 0.0,
                    end: -TAU as f32,
                    anticlockwise: true,
                },
                full_circle: true,
            });
            continue;
        }

        // Clockwise: walk cut angles in decreasing order
        cuts.sort_by(|a, b| b.total_cmp(a));
        cuts.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        for k in 0..cuts.len() {
            let from = cuts[k];
            let to = if k + 1 < cuts.len() { cuts[k + 1] } else { cuts[0] - TAU };
            if (from - to) * disc.radius < MIN_PIECE || covered(disc.point_at(0.5 * (from + to))) {
                continue;
            }
            pieces.push(Piece {
                start: disc.point_at(from),
                end: disc.point_at(to),
                command: PathCommand::Arc {
                    center: disc.center.to_vec2(),
                    radius: disc.radius as f32,
                    start: from as f32,
                    end: to as f32,
                    anticlockwise: true,
                },
                full_circle: cuts.len() == 1,
            });
        }
    }

    for (s, cuts) in segments.iter().zip(segment_cuts.iter_mut()) {
        cuts.push(0.0);
        cuts.push(1.0);
        cuts.sort_by(|a, b| a.total_cmp(b));
        let len = s.length();
        for w in cuts.windows(2) {
            let (t0, t1) = (w[0], w[1]);
            if (t1 - t0) * len < MIN_PIECE || covered(s.at(0.5 * (t0 + t1))) {
                continue;
            }
            pieces.push(Piece {
                start: s.at(t0),
                end: s.at(t1),
                command: PathCommand::LineTo(s.at(t1).to_vec2()),
                full_circle: false,
            });
        }
    }

    chain_loops(&pieces)
}

fn chain_loops(pieces: &[Piece]) -> Vec<PathCommand> {
    let mut used = vec![false; pieces.len()];
    let mut commands = Vec::new();

    for first in 0..pieces.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let start = pieces[first].start;
        commands.push(PathCommand::MoveTo(start.to_vec2()));
        commands.push(pieces[first].command);

        let mut end = pieces[first].end;
        let mut closed = pieces[first].full_circle;
        while !closed {
            let next = pieces
                .iter()
                .enumerate()
                .filter(|(i, _)| !used[*i])
                .map(|(i, p)| (i, p.start.distance(end)))
                .filter(|(_, d)| *d <= JOIN_TOL)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((i, _)) = next else {
                break;
            };
            used[i] = true;
            commands.push(pieces[i].command);
            end = pieces[i].end;
            closed = end.distance(start) <= JOIN_TOL;
        }
        commands.push(PathCommand::Close);
    }

    commands
}

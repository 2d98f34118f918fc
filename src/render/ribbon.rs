//! RibbonPath - Closed outline hugging a chain of circles
//!
//! The filled region is every circle plus the hull of each consecutive pair,
//! so the ribbon never cuts into a circle however tightly the chain folds.
//! Loops are traced clockwise (decreasing angles). A fold that encloses empty
//! space adds a counter-clockwise hole loop; fill with the nonzero rule.

use std::f32::consts::PI;

use crate::core::math::Vec2;

use super::outline;

const CONTAIN_EPS: f32 = 1e-4;
/// Smallest chord `flatten` will produce
const MIN_FLATTEN_STEP: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn point_at(&self, angle: f32) -> Vec2 {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    fn contains(&self, other: &Circle) -> bool {
        self.center.distance(other.center) + other.radius <= self.radius + CONTAIN_EPS
    }
}

/// Canvas-style path command. `anticlockwise` follows the canvas API:
/// true sweeps from `start` to `end` through decreasing angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc { center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RibbonPath {
    commands: Vec<PathCommand>,
}

/// Drop invalid circles and circles swallowed by a neighbour
fn prune(circles: &[Circle]) -> Vec<Circle> {
    let mut out: Vec<Circle> = Vec::with_capacity(circles.len());
    'next: for c in circles.iter() {
        if !(c.radius > 0.0 && c.radius.is_finite() && c.center.is_finite()) {
            continue;
        }
        while let Some(last) = out.last() {
            if last.contains(c) {
                continue 'next;
            }
            if c.contains(last) {
                out.pop();
            } else {
                break;
            }
        }
        out.push(*c);
    }
    out
}

impl RibbonPath {
    pub fn build(circles: &[Circle]) -> Self {
        let chain = prune(circles);
        Self { commands: outline::trace(&chain) }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of closed loops (outer outlines and holes)
    pub fn loop_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, PathCommand::MoveTo(_))).count()
    }

    /// One closed polyline per loop; arcs are split so no chord exceeds
    /// `max_step` (floored at 1e-3 world units).
    pub fn flatten_loops(&self, max_step: f32) -> Vec<Vec<Vec2>> {
        let max_step = if max_step.is_finite() && max_step > 0.0 { max_step.max(MIN_FLATTEN_STEP) } else { 0.05 };
        let mut loops = Vec::new();
        let mut points: Vec<Vec2> = Vec::new();
        let mut subpath_start: Option<Vec2> = None;

        for cmd in self.commands.iter() {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if !points.is_empty() {
                        loops.push(std::mem::take(&mut points));
                    }
                    points.push(p);
                    subpath_start = Some(p);
                }
                PathCommand::LineTo(p) => points.push(p),
                PathCommand::Arc { center, radius, start, end, anticlockwise } => {
                    let sweep = arc_sweep(start, end, anticlockwise);
                    let segments = ((sweep.abs() * radius / max_step).ceil() as usize).max(1);
                    for i in 0..=segments {
                        let a = start + sweep * (i as f32 / segments as f32);
                        points.push(center + Vec2::from_angle(a) * radius);
                    }
                }
                PathCommand::Close => {
                    if let Some(s) = subpath_start.take() {
                        if points.last() != Some(&s) {
                            points.push(s);
                        }
                    }
                    points.dedup_by(|a, b| a.distance(*b) < 1e-6);
                    loops.push(std::mem::take(&mut points));
                }
            }
        }

        if !points.is_empty() {
            points.dedup_by(|a, b| a.distance(*b) < 1e-6);
            loops.push(points);
        }
        loops
    }

    /// Every loop of `flatten_loops`, back to back. Each loop ends on its
    /// own first point.
    pub fn flatten(&self, max_step: f32) -> Vec<Vec2> {
        self.flatten_loops(max_step).into_iter().flatten().collect()
    }
}

/// Signed sweep of a canvas arc (negative = decreasing angle)
pub fn arc_sweep(start: f32, end: f32, anticlockwise: bool) -> f32 {
    let tau = 2.0 * PI;
    if anticlockwise {
        if start - end >= tau {
            -tau
        } else {
            -(start - end).rem_euclid(tau)
        }
    } else if end - start >= tau {
        tau
    } else {
        (end - start).rem_euclid(tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_sweep_follows_canvas_rules() {
        assert!((arc_sweep(0.0, 2.0 * PI, false) - 2.0 * PI).abs() < 1e-6);
        assert!((arc_sweep(0.5 * PI, -0.5 * PI, true) + PI).abs() < 1e-6);
        // Anticlockwise with end > start goes the long way round
        assert!((arc_sweep(-0.25 * PI, 0.25 * PI, true) + 1.75 * PI).abs() < 1e-5);
        assert!((arc_sweep(0.0, 0.5 * PI, false) - 0.5 * PI).abs() < 1e-6);
        assert!((arc_sweep(0.0, -2.0 * PI, true) + 2.0 * PI).abs() < 1e-6);
    }

    #[test]
    fn prune_keeps_larger_of_nested_neighbours() {
        let big = Circle::new(Vec2::ZERO, 2.0);
        let small = Circle::new(Vec2::new(0.5, 0.0), 0.5);
        assert_eq!(prune(&[big, small]), vec![big]);
        assert_eq!(prune(&[small, big]), vec![big]);
    }

    #[test]
    fn prune_drops_degenerate_circles() {
        let ok = Circle::new(Vec2::ZERO, 1.0);
        let zero = Circle::new(Vec2::new(3.0, 0.0), 0.0);
        let nan = Circle::new(Vec2::new(f32::NAN, 0.0), 1.0);
        assert_eq!(prune(&[ok, zero, nan]), vec![ok]);
    }

    #[test]
    fn flatten_step_has_a_floor() {
        let path = RibbonPath::build(&[Circle::new(Vec2::ZERO, 1.0)]);
        let fine = path.flatten(1e-9);
        let floor = path.flatten(MIN_FLATTEN_STEP);
        assert_eq!(fine.len(), floor.len());
        assert!(fine.len() <= (2.0 * PI / MIN_FLATTEN_STEP) as usize + 4);
        // Nonsense steps fall back to the default
        assert_eq!(path.flatten(f32::NAN), path.flatten(0.05));
        assert_eq!(path.flatten(-1.0), path.flatten(0.05));
    }

    #[test]
    fn flatten_loops_splits_at_each_subpath() {
        // Seven circles wound almost once round; the ends overlap
        let ring: Vec<Circle> = (0..7)
            .map(|i| {
                let a = i as f32 * 2.0 * PI / 6.5;
                Circle::new(Vec2::new(3.0 * a.cos(), 3.0 * a.sin()), 1.0)
            })
            .collect();
        let path = RibbonPath::build(&ring);
        let loops = path.flatten_loops(0.05);
        assert_eq!(loops.len(), path.loop_count());
        assert_eq!(loops.len(), 2);
        assert_eq!(loops.iter().map(Vec::len).sum::<usize>(), path.flatten(0.05).len());
    }
}

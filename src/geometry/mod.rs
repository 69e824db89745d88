// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-space line and rectangle math used by the bundling test.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn minus(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    fn plus_scaled(self, direction: Point, factor: f64) -> Point {
        Point::new(self.x + direction.x * factor, self.y + direction.y * factor)
    }

    fn distance_to(self, other: Point) -> f64 {
        let d = self.minus(other);
        d.x.hypot(d.y)
    }
}

fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance_to(self.to)
    }

    /// Extends the segment by `epsilon` on both ends along its own direction.
    ///
    /// Links that stop exactly on a border would otherwise only touch it. A
    /// zero-length line has no direction and is returned unchanged.
    pub fn elongate(&self, epsilon: f64) -> Line {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return *self;
        }
        let direction = self.to.minus(self.from);
        let factor = epsilon / length;
        Line {
            from: self.from.plus_scaled(direction, -factor),
            to: self.to.plus_scaled(direction, factor),
        }
    }

    /// Crossing point of two segments, `None` when they miss or run parallel.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let r = self.to.minus(self.from);
        let s = other.to.minus(other.from);
        let denom = cross(r, s);
        if denom.abs() <= f64::EPSILON * (r.x.abs() + r.y.abs()) * (s.x.abs() + s.y.abs()) {
            return None;
        }

        let qp = other.from.minus(self.from);
        let t = cross(qp, s) / denom;
        let u = cross(qp, r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            return Some(self.from.plus_scaled(r, t));
        }
        None
    }
}

/// Which border of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Borders in clockwise order, starting at the top.
    pub fn edges(&self) -> [(Edge, Line); 4] {
        let top_left = Point::new(self.x, self.y);
        let top_right = Point::new(self.right_x(), self.y);
        let bottom_right = Point::new(self.right_x(), self.bottom_y());
        let bottom_left = Point::new(self.x, self.bottom_y());
        [
            (Edge::Top, Line::new(top_left, top_right)),
            (Edge::Right, Line::new(top_right, bottom_right)),
            (Edge::Bottom, Line::new(bottom_right, bottom_left)),
            (Edge::Left, Line::new(bottom_left, top_left)),
        ]
    }

    /// Points where `line` crosses the border, nearest to `line.from` first.
    ///
    /// A proper crossing yields one point; a line through a corner is reported
    /// once, not once per edge.
    pub fn intersections(&self, line: &Line) -> SmallVec<[Point; 2]> {
        let same_point_tolerance = 1e-9 * self.diagonal().max(1.0);
        let mut points = SmallVec::<[Point; 2]>::new();
        for (_, edge) in self.edges() {
            let Some(point) = line.intersection(&edge) else {
                continue;
            };
            if points.iter().any(|seen| seen.distance_to(point) <= same_point_tolerance) {
                continue;
            }
            points.push(point);
        }
        points.sort_by(|a, b| line.from.distance_to(*a).total_cmp(&line.from.distance_to(*b)));
        points
    }
}

/// True iff every value lies within `epsilon` of the first one.
pub fn nearly_equal(values: &[f64], epsilon: f64) -> bool {
    let Some((first, rest)) = values.split_first() else {
        return true;
    };
    rest.iter().all(|value| (first - value).abs() <= epsilon)
}

#[cfg(test)]
mod tests {
    use super::{nearly_equal, Line, Point, Rect};

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn elongate_extends_both_ends_along_the_direction() {
        let elongated = line(0.0, 0.0, 10.0, 0.0).elongate(2.0);
        assert!((elongated.from.x + 2.0).abs() < 1e-12);
        assert!((elongated.to.x - 12.0).abs() < 1e-12);
        assert_eq!(elongated.from.y, 0.0);

        let diagonal = line(0.0, 0.0, 3.0, 4.0).elongate(5.0);
        assert!((diagonal.from.x + 3.0).abs() < 1e-12);
        assert!((diagonal.from.y + 4.0).abs() < 1e-12);
        assert!((diagonal.length() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn elongate_leaves_zero_length_lines_alone() {
        let point = line(1.0, 1.0, 1.0, 1.0);
        assert_eq!(point.elongate(3.0), point);
    }

    #[test]
    fn line_entering_a_box_crosses_exactly_one_edge() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        let points = rect.intersections(&line(0.0, 30.0, 50.0, 30.0));
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 10.0).abs() < 1e-9);
        assert!((points[0].y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn line_through_a_box_crosses_two_edges_and_a_miss_crosses_none() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let through = rect.intersections(&line(-5.0, 5.0, 15.0, 5.0));
        assert_eq!(through.len(), 2);
        assert!(through[0].x.abs() < 1e-9, "nearest crossing comes first");
        assert!((through[1].x - 10.0).abs() < 1e-9);
        assert!(rect.intersections(&line(20.0, 20.0, 30.0, 25.0)).is_empty());
        assert!(rect.intersections(&line(2.0, 2.0, 8.0, 8.0)).is_empty());
    }

    #[test]
    fn corner_crossing_is_reported_once() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let points = rect.intersections(&line(-5.0, -5.0, 5.0, 5.0));
        assert_eq!(points.len(), 1);
        assert!(points[0].x.abs() < 1e-9 && points[0].y.abs() < 1e-9);
    }

    #[test]
    fn line_along_an_edge_does_not_count_as_crossing_it() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let points = rect.intersections(&line(2.0, 0.0, 8.0, 0.0));
        assert!(points.is_empty());
    }

    #[test]
    fn nearly_equal_compares_against_the_first_value() {
        assert!(nearly_equal(&[10.0, 10.5, 9.5], 0.5));
        assert!(!nearly_equal(&[10.0, 10.5, 9.4], 0.5));
        assert!(nearly_equal(&[], 0.0));
        assert!(nearly_equal(&[3.0], 0.0));
    }

    #[test]
    fn rect_derived_measures() {
        let rect = Rect::new(1.0, 2.0, 30.0, 40.0);
        assert_eq!(rect.right_x(), 31.0);
        assert_eq!(rect.bottom_y(), 42.0);
        assert_eq!(rect.diagonal(), 50.0);
    }
}

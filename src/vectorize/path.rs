use imageproc::point::Point;
use std::fmt;

/// A single SVG-style drawing command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    MoveTo(Point<i32>),
    LineTo(Point<i32>),
    QuadTo { control: Point<i32>, to: Point<i32> },
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathCommand::QuadTo { control, to } => {
                write!(f, "Q {} {} {} {}", control.x, control.y, to.x, to.y)
            }
        }
    }
}

/// An ordered list of drawing commands starting with a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePath {
    commands: Vec<PathCommand>,
}

impl CurvePath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn has_curves(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, PathCommand::QuadTo { .. }))
    }

    /// Build a smooth path through simplified contour points.
    ///
    /// Two points give a straight line and three a single quadratic curve.
    /// Longer runs chain quadratics that use each interior point as control
    /// and end halfway to the next point (the final one ends on the last
    /// point), followed by a closing `L` to the last point. This is a cheap
    /// approximation, not a fitted spline.
    ///
    /// Returns `None` when fewer than two distinct points are given.
    pub fn from_points(points: &[Point<i32>]) -> Option<Self> {
        let first = *points.first()?;
        if points.iter().all(|&p| p == first) {
            return None;
        }

        let n = points.len();
        let mut commands = vec![PathCommand::MoveTo(first)];
        match n {
            2 => commands.push(PathCommand::LineTo(points[1])),
            3 => commands.push(PathCommand::QuadTo { control: points[1], to: points[2] }),
            _ => {
                for i in 1..n - 1 {
                    let control = points[i];
                    let to = if i + 1 < n - 1 {
                        midpoint(points[i], points[i + 1])
                    } else {
                        points[i + 1]
                    };
                    commands.push(PathCommand::QuadTo { control, to });
                }
                commands.push(PathCommand::LineTo(points[n - 1]));
            }
        }

        Some(Self { commands })
    }
}

/// Integer midpoint, rounding toward negative infinity
fn midpoint(a: Point<i32>, b: Point<i32>) -> Point<i32> {
    Point::new((a.x + b.x).div_euclid(2), (a.y + b.y).div_euclid(2))
}

impl fmt::Display for CurvePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

//! Device-space geometry: points, the plotting boundary, and pen settings.

use std::fmt;

/// A point in device units. `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Upper limits of the drawable area. A coordinate equal to the limit is
/// still drawable; anything beyond it is an overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub max_x: f64,
    pub max_y: f64,
}

impl Boundary {
    #[must_use]
    pub const fn new(max_x: f64, max_y: f64) -> Self {
        Self { max_x, max_y }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x <= self.max_x && point.y <= self.max_y
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(280.0, 300.0)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.max_x, self.max_y)
    }
}

/// Analog actuator values for the pen servo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenSettings {
    pub up: f64,
    pub down: f64,
    pub dock: f64,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            up: 70.0,
            down: 170.0,
            dock: 235.0,
        }
    }
}

/// Render a value in its default decimal form: always at least one
/// fractional digit, so `70` becomes `70.0`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let b = Boundary::default();
        assert!(b.contains(Point::new(280.0, 300.0)));
        assert!(!b.contains(Point::new(280.01, 10.0)));
        assert!(!b.contains(Point::new(10.0, 300.5)));
    }

    #[test]
    fn decimal_form_keeps_fraction() {
        assert_eq!(format_decimal(70.0), "70.0");
        assert_eq!(format_decimal(170.5), "170.5");
        assert_eq!(format_decimal(60.0), "60.0");
    }
}

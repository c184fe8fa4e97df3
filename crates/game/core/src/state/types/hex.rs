//! Axial hex coordinates, cube mirror, directions and line drawing.

use std::fmt;

/// Hex position in axial coordinates (`q` column, `r` row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub q: i32,
    pub r: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube axis (`q + r + s == 0`).
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    pub const fn cube(self) -> CubeCoord {
        CubeCoord {
            x: self.q,
            y: self.s(),
            z: self.r,
        }
    }

    pub fn neighbor(self, direction: HexDirection) -> Self {
        self.step(direction, 1)
    }

    pub fn step(self, direction: HexDirection, distance: i32) -> Self {
        let (dq, dr) = direction.offset();
        Self::new(self.q + dq * distance, self.r + dr * distance)
    }

    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        HexDirection::ALL.into_iter().map(move |dir| self.neighbor(dir))
    }

    /// Hex (Manhattan-on-cube) distance.
    pub fn distance(self, other: Position) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s() - other.s()).unsigned_abs();
        dq.max(dr).max(ds)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Cube coordinate kept alongside the axial position for invariant checking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeCoord {
    pub const fn is_valid(self) -> bool {
        self.x + self.y + self.z == 0
    }

    pub const fn to_axial(self) -> Position {
        Position::new(self.x, self.z)
    }

    /// Rounds a fractional cube coordinate to the nearest hex.
    fn round(x: f64, y: f64, z: f64) -> Self {
        let mut rx = x.round();
        let mut ry = y.round();
        let mut rz = z.round();

        let dx = (rx - x).abs();
        let dy = (ry - y).abs();
        let dz = (rz - z).abs();

        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        } else {
            rz = -rx - ry;
        }

        Self {
            x: rx as i32,
            y: ry as i32,
            z: rz as i32,
        }
    }
}

/// The six hex neighbor directions (pointy-top axial layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    /// Axial `(dq, dr)` offset of one step.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (0, -1),
            Self::West => (-1, 0),
            Self::SouthWest => (-1, 1),
            Self::SouthEast => (0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::NorthEast => Self::SouthWest,
            Self::NorthWest => Self::SouthEast,
            Self::West => Self::East,
            Self::SouthWest => Self::NorthEast,
            Self::SouthEast => Self::NorthWest,
        }
    }

    /// Direction of a single step between two adjacent hexes.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let delta = (to.q - from.q, to.r - from.r);
        Self::ALL.into_iter().find(|dir| dir.offset() == delta)
    }

    /// Direction of the first step on the hex line from `from` to `to`.
    ///
    /// Returns `None` when both positions coincide.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let line = hex_line(from, to);
        line.get(1).and_then(|next| Self::between(from, *next))
    }
}

/// Straight hex line from `a` to `b`, both ends included.
///
/// Cube coordinates are nudged by a tiny epsilon before rounding so that
/// lines running exactly along hex edges resolve the same way every time.
pub fn hex_line(a: Position, b: Position) -> Vec<Position> {
    let n = a.distance(b);
    if n == 0 {
        return vec![a];
    }

    let ac = a.cube();
    let bc = b.cube();
    let (ax, ay, az) = (
        ac.x as f64 + 1e-6,
        ac.y as f64 + 2e-6,
        ac.z as f64 - 3e-6,
    );
    let (bx, by, bz) = (
        bc.x as f64 + 1e-6,
        bc.y as f64 + 2e-6,
        bc.z as f64 - 3e-6,
    );

    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            CubeCoord::round(
                ax + (bx - ax) * t,
                ay + (by - ay) * t,
                az + (bz - az) * t,
            )
            .to_axial()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mirror_is_valid() {
        let pos = Position::new(3, -5);
        let cube = pos.cube();
        assert!(cube.is_valid());
        assert_eq!(cube.to_axial(), pos);
    }

    #[test]
    fn distance_matches_steps() {
        let origin = Position::ORIGIN;
        for dir in HexDirection::ALL {
            assert_eq!(origin.distance(origin.step(dir, 4)), 4);
        }
        assert_eq!(Position::new(0, 0).distance(Position::new(2, 1)), 3);
    }

    #[test]
    fn opposite_round_trips() {
        for dir in HexDirection::ALL {
            let pos = Position::new(2, 2);
            assert_eq!(pos.neighbor(dir).neighbor(dir.opposite()), pos);
        }
    }

    #[test]
    fn line_along_axis_is_straight() {
        let line = hex_line(Position::new(0, 0), Position::new(3, 0));
        assert_eq!(
            line,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0),
            ]
        );
    }

    #[test]
    fn line_steps_are_adjacent() {
        let line = hex_line(Position::new(0, 0), Position::new(4, -7));
        assert_eq!(line.len(), 8);
        for pair in line.windows(2) {
            assert_eq!(pair[0].distance(pair[1]), 1);
        }
    }

    #[test]
    fn toward_picks_first_step() {
        let from = Position::new(1, 1);
        assert_eq!(
            HexDirection::toward(from, Position::new(1, 4)),
            Some(HexDirection::SouthEast)
        );
        assert_eq!(HexDirection::toward(from, from), None);
    }
}

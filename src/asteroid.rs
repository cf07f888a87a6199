use std::{
    collections::HashSet,
    fmt::Display,
    ops::Sub,
    str::FromStr,
};

use tracing::debug;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// Puzzle answer encoding, `x * 100 + y`.
    pub fn encode(&self) -> usize {
        self.x * 100 + self.y
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Sub for &Position {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(
            self.x as isize - rhs.x as isize,
            self.y as isize - rhs.y as isize,
        )
    }
}

impl Sub for Position {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

/// Displacement between two cells, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    dx: isize,
    dy: isize,
}

impl Offset {
    pub fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }

    /// Lowest-terms direction of this offset, `None` for the zero offset.
    pub fn direction(&self) -> Option<Direction> {
        let divisor = gcd(self.dx, self.dy);
        if divisor == 0 {
            None
        } else {
            Some(Direction {
                dx: self.dx / divisor,
                dy: self.dy / divisor,
            })
        }
    }

    pub fn length_squared(&self) -> usize {
        self.dx.unsigned_abs().pow(2) + self.dy.unsigned_abs().pow(2)
    }
}

/// Reduced offset. Asteroids sharing a direction from an origin block each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    dx: isize,
    dy: isize,
}

impl Direction {
    pub fn dx(&self) -> isize {
        self.dx
    }

    pub fn dy(&self) -> isize {
        self.dy
    }

    /// Clockwise angle from up, in degrees within [0, 360).
    pub fn angle_degrees(&self) -> f64 {
        let degrees = (self.dx as f64).atan2(-self.dy as f64).to_degrees();
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestLocation {
    pub asteroid_count: usize,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct AsteroidMap {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl AsteroidMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn is_asteroid(&self, pos: &Position) -> bool {
        self.contains(pos) && self.cells[pos.y * self.width + pos.x]
    }

    /// Asteroid positions in row-major order.
    pub fn asteroid_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, is_asteroid)| **is_asteroid)
            .map(|(ind, _)| Position::new(ind % self.width, ind / self.width))
    }

    pub fn asteroid_count(&self) -> usize {
        self.cells.iter().filter(|is_asteroid| **is_asteroid).count()
    }

    /// Count of asteroids with a clear line of sight from `origin`.
    pub fn visible_count(&self, origin: &Position) -> usize {
        self.asteroid_positions()
            .filter_map(|pos| (&pos - origin).direction())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn visible_counts(&self) -> Vec<(Position, usize)> {
        self.asteroid_positions()
            .map(|pos| (pos, self.visible_count(&pos)))
            .collect()
    }

    /// Asteroid seeing the most others. Ties go to the first one in row-major order.
    pub fn best_location(&self) -> Result<BestLocation, Error> {
        let mut best: Option<BestLocation> = None;
        for (position, asteroid_count) in self.visible_counts() {
            if best.map_or(true, |b| asteroid_count > b.asteroid_count) {
                best = Some(BestLocation {
                    asteroid_count,
                    position,
                });
            }
        }

        let best = best.ok_or(Error::NoAsteroids)?;
        debug!(
            position = %best.position,
            count = best.asteroid_count,
            "found best monitoring location"
        );
        Ok(best)
    }
}

impl FromStr for AsteroidMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = AsteroidMapBuilder::new();
        for line in s.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

impl TryFrom<&[String]> for AsteroidMap {
    type Error = Error;

    fn try_from(value: &[String]) -> Result<Self, Self::Error> {
        let mut builder = AsteroidMapBuilder::new();
        for line in value {
            builder.add_row(line.as_str())?;
        }

        builder.build()
    }
}

pub(crate) struct AsteroidMapBuilder {
    cells: Vec<bool>,
    row_n: usize,
    col_n: Option<usize>,
    ended: bool,
}

impl AsteroidMapBuilder {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            row_n: 0,
            col_n: None,
            ended: false,
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let text = text.strip_suffix('\r').unwrap_or(text);
        if text.is_empty() {
            self.ended = true;
            return Ok(());
        }

        let this_col_n = text.chars().count();
        let expect_col_n = *self.col_n.get_or_insert(this_col_n);
        if self.ended {
            return Err(Error::InconsistentRow(expect_col_n, 0));
        }
        if expect_col_n != this_col_n {
            return Err(Error::InconsistentRow(expect_col_n, this_col_n));
        }

        for (c_ind, c) in text.chars().enumerate() {
            match c {
                '#' => self.cells.push(true),
                '.' => self.cells.push(false),
                _ => return Err(Error::InvalidCharInMap(self.row_n, c_ind, c)),
            }
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<AsteroidMap, Error> {
        let width = self.col_n.ok_or(Error::EmptyMap)?;
        let map = AsteroidMap {
            cells: self.cells,
            width,
            height: self.row_n,
        };
        debug!(
            width = map.width,
            height = map.height,
            asteroids = map.asteroid_count(),
            "parsed asteroid map"
        );

        Ok(map)
    }
}

fn gcd(n0: isize, n1: isize) -> isize {
    let mut large = n0.abs().max(n1.abs());
    let mut small = n0.abs().min(n1.abs());

    while small != 0 {
        let rem = large % small;
        large = small;
        small = rem;
    }

    large
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(rows: &[&str]) -> AsteroidMap {
        rows.join("\n").parse().unwrap()
    }

    #[test]
    fn parse_asteroid_positions() {
        let map = map(&[".#..#", ".....", "#####", "....#", "...##"]);
        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 5);
        assert_eq!(
            map.asteroid_positions().collect::<Vec<_>>(),
            [(1, 0), (4, 0), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2), (4, 3), (3, 4), (4, 4)]
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect::<Vec<_>>()
        );
        assert!(map.is_asteroid(&Position::new(4, 3)));
        assert!(!map.is_asteroid(&Position::new(0, 0)));
        assert!(!map.is_asteroid(&Position::new(5, 0)));
    }

    #[test]
    fn parse_tolerates_crlf_and_trailing_blank_line() {
        let map: AsteroidMap = "#.\r\n.#\r\n\r\n".parse().unwrap();
        assert_eq!(map.height(), 2);
        assert_eq!(map.asteroid_count(), 2);
    }

    #[test]
    fn parse_rejects_rows_after_blank_line() {
        assert_eq!(
            "#.\n\n.#".parse::<AsteroidMap>().unwrap_err(),
            Error::InconsistentRow(2, 0)
        );
    }

    #[test]
    fn parse_from_lines() {
        let lines = vec!["#.".to_string(), "##".to_string()];
        let map = AsteroidMap::try_from(lines.as_slice()).unwrap();
        assert_eq!(map.asteroid_count(), 3);
    }

    #[test]
    fn gcd_ignores_sign() {
        assert_eq!(gcd(12, -18), 6);
        assert_eq!(gcd(-7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn direction_keeps_sign() {
        let down_right = Offset::new(3, 3).direction().unwrap();
        let up_left = Offset::new(-2, -2).direction().unwrap();
        assert_eq!((down_right.dx(), down_right.dy()), (1, 1));
        assert_eq!((up_left.dx(), up_left.dy()), (-1, -1));
        assert_eq!(Offset::new(0, -4).direction(), Offset::new(0, -1).direction());
        assert_eq!(Offset::new(0, 0).direction(), None);
    }

    #[test]
    fn angle_is_clockwise_from_up() {
        let cases = [
            ((0, -1), 0.0),
            ((1, -1), 45.0),
            ((1, 0), 90.0),
            ((0, 1), 180.0),
            ((-1, 0), 270.0),
            ((-1, -1), 315.0),
        ];
        for ((dx, dy), expect) in cases {
            let angle = Offset::new(dx, dy).direction().unwrap().angle_degrees();
            assert!((angle - expect).abs() < 1e-9, "({}, {}) -> {}", dx, dy, angle);
        }
    }

    #[test]
    fn cross_neighbors_are_all_visible() {
        let map = map(&[".#.", "###", ".#."]);
        assert_eq!(map.visible_count(&Position::new(1, 1)), 4);
    }

    #[test]
    fn collinear_asteroids_count_once() {
        let map = map(&["#.#.#.#", ".......", "#......"]);
        assert_eq!(map.visible_count(&Position::new(0, 0)), 2);
        assert_eq!(map.visible_count(&Position::new(2, 0)), 3);
    }

    #[test]
    fn visible_count_ignores_translation() {
        let small = map(&["#.#", ".##", "#.#"]);
        let padded = map(&[".....", "..#.#", "...##", "..#.#", "....."]);
        for pos in small.asteroid_positions() {
            let moved = Position::new(pos.x() + 2, pos.y() + 1);
            assert_eq!(small.visible_count(&pos), padded.visible_count(&moved));
        }
    }

    #[test]
    fn single_asteroid_sees_nothing() {
        let best = map(&["...", ".#.", "..."]).best_location().unwrap();
        assert_eq!(
            best,
            BestLocation {
                asteroid_count: 0,
                position: Position::new(1, 1)
            }
        );
    }

    #[test]
    fn tie_goes_to_first_in_row_major_order() {
        let best = map(&["#.#"]).best_location().unwrap();
        assert_eq!(best.position, Position::new(0, 0));
        assert_eq!(best.asteroid_count, 1);
    }

    #[test]
    fn best_location_examples() {
        let cases: [(&[&str], (usize, usize), usize); 3] = [
            (&[".#..#", ".....", "#####", "....#", "...##"], (3, 4), 8),
            (
                &[
                    "#.#...#.#.",
                    ".###....#.",
                    ".#....#...",
                    "##.#.#.#.#",
                    "....#.#.#.",
                    ".##..###.#",
                    "..#...##..",
                    "..##....##",
                    "......#...",
                    ".####.###.",
                ],
                (1, 2),
                35,
            ),
            (
                &[
                    ".#..#..###",
                    "####.###.#",
                    "....###.#.",
                    "..###.##.#",
                    "##.##.#.#.",
                    "....###..#",
                    "..#.#..#.#",
                    "#..#.#.###",
                    ".##...##.#",
                    ".....#.#..",
                ],
                (6, 3),
                41,
            ),
        ];
        for (rows, (x, y), count) in cases {
            let best = map(rows).best_location().unwrap();
            assert_eq!(best.position, Position::new(x, y));
            assert_eq!(best.asteroid_count, count);
        }
    }

    #[test]
    fn encode_position() {
        assert_eq!(Position::new(8, 2).encode(), 802);
        assert_eq!(Position::new(11, 13).encode(), 1113);
    }
}

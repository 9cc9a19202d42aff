// Relative-to-absolute move mapping

use crate::types::{Coord, Position, RelativeMove};

/// Returns the FORWARD, STARBOARD and LARBOARD successors of `position`, in that order.
///
/// With heading `(dx, dy) = cell - prev`:
/// - moving along x: forward `(x+dx, y)`, starboard `(x, y+dx)`, larboard `(x, y-dx)`
/// - otherwise: forward `(x, y+dy)`, starboard `(x-dy, y)`, larboard `(x+dy, y)`
///
/// A position whose `prev` equals its cell has no heading and falls into the
/// second branch with `dy = 0`, so all three candidates are the cell itself.
///
/// Arithmetic is done in `i64`. A component that leaves the `i32` range is
/// pinned to `i32::MIN` or `i32::MAX`, neither of which lies on any grid.
pub fn candidates(position: &Position) -> [(RelativeMove, Position); 3] {
    let (dx, dy) = position.displacement();
    let cell = position.cell;
    let (x, y) = (i64::from(cell.x), i64::from(cell.y));
    let step = |x: i64, y: i64| Position::new(Coord::new(pin(x), pin(y)), cell);

    if dx != 0 {
        [
            (RelativeMove::Forward, step(x + dx, y)),
            (RelativeMove::Starboard, step(x, y + dx)),
            (RelativeMove::Larboard, step(x, y - dx)),
        ]
    } else {
        [
            (RelativeMove::Forward, step(x, y + dy)),
            (RelativeMove::Starboard, step(x - dy, y)),
            (RelativeMove::Larboard, step(x + dy, y)),
        ]
    }
}

fn pin(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn at(x: i32, y: i32, px: i32, py: i32) -> Position {
        Position::new(Coord::new(x, y), Coord::new(px, py))
    }

    #[test]
    fn test_heading_positive_x() {
        let [forward, starboard, larboard] = candidates(&at(2, 2, 1, 2));
        assert_eq!(forward, (RelativeMove::Forward, at(3, 2, 2, 2)));
        assert_eq!(starboard, (RelativeMove::Starboard, at(2, 3, 2, 2)));
        assert_eq!(larboard, (RelativeMove::Larboard, at(2, 1, 2, 2)));
    }

    #[test]
    fn test_heading_negative_x() {
        let [forward, starboard, larboard] = candidates(&at(2, 2, 3, 2));
        assert_eq!(forward.1.cell, Coord::new(1, 2));
        assert_eq!(starboard.1.cell, Coord::new(2, 1));
        assert_eq!(larboard.1.cell, Coord::new(2, 3));
    }

    #[test]
    fn test_heading_positive_y() {
        let [forward, starboard, larboard] = candidates(&at(2, 2, 2, 1));
        assert_eq!(forward.1.cell, Coord::new(2, 3));
        assert_eq!(starboard.1.cell, Coord::new(1, 2));
        assert_eq!(larboard.1.cell, Coord::new(3, 2));
    }

    #[test]
    fn test_heading_negative_y() {
        let [forward, starboard, larboard] = candidates(&at(2, 2, 2, 3));
        assert_eq!(forward.1.cell, Coord::new(2, 1));
        assert_eq!(starboard.1.cell, Coord::new(3, 2));
        assert_eq!(larboard.1.cell, Coord::new(1, 2));
    }

    #[test]
    fn test_only_forward_keeps_heading() {
        let headings = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        for (dx, dy) in headings {
            let origin = at(5, 5, 5 - dx, 5 - dy);
            let all = candidates(&origin);
            assert_eq!(all.len(), 3);

            let straight: Vec<_> = all
                .iter()
                .filter(|(_, p)| p.displacement() == (i64::from(dx), i64::from(dy)))
                .map(|(m, _)| *m)
                .collect();
            assert_eq!(straight, vec![RelativeMove::Forward], "heading ({}, {})", dx, dy);

            for (_, p) in &all {
                assert_eq!(p.prev, origin.cell);
            }
        }
    }

    #[test]
    fn test_no_heading_degenerates_to_same_cell() {
        let still = at(4, 4, 4, 4);
        for (_, p) in candidates(&still) {
            assert_eq!(p.cell, Coord::new(4, 4));
            assert_eq!(p.prev, Coord::new(4, 4));
        }
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let grid = Grid::new(i32::MAX, i32::MAX, []);

        // Heading +2^31 along x from the origin
        let [forward, starboard, larboard] = candidates(&at(0, 0, i32::MIN, 0));
        assert_eq!(forward.1.cell, Coord::new(i32::MAX, 0));
        assert_eq!(starboard.1.cell, Coord::new(0, i32::MAX));
        assert_eq!(larboard.1.cell, Coord::new(0, i32::MIN));
        for (_, p) in [forward, starboard, larboard] {
            assert!(!grid.is_valid(&p.cell), "{:?}", p.cell);
        }

        // Stepping forward off the far edge of the coordinate range
        let [forward, _, _] = candidates(&at(i32::MAX, 3, i32::MAX - 1, 3));
        assert_eq!(forward.1.cell, Coord::new(i32::MAX, 3));
        assert!(!grid.is_valid(&forward.1.cell));

        let [_, starboard, larboard] = candidates(&at(3, i32::MIN, 3, i32::MIN + 1));
        assert_eq!(starboard.1.cell, Coord::new(4, i32::MIN));
        assert_eq!(larboard.1.cell, Coord::new(2, i32::MIN));
    }
}

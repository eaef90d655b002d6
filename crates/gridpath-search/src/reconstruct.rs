use gridpath_core::Coord;

/// Walk a predecessor chain back from `end` and return the cells from the
/// chain's origin to `end`, both inclusive.
///
/// `predecessor` returns the cell a given cell was reached from, or `None`
/// for the origin. The walk gives up after `max_len` cells, so a corrupted
/// (cyclic) chain yields a truncated path instead of looping forever.
pub fn reconstruct<F>(end: Coord, max_len: usize, mut predecessor: F) -> Vec<Coord>
where
    F: FnMut(Coord) -> Option<Coord>,
{
    let mut path = Vec::new();
    let mut cur = Some(end);
    while let Some(c) = cur {
        if path.len() >= max_len {
            log::warn!("predecessor chain from {end} exceeds {max_len} cells, truncated");
            break;
        }
        path.push(c);
        cur = predecessor(c);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn walks_back_to_origin() {
        let came_from: HashMap<Coord, Coord> = [
            (Coord::new(2, 2), Coord::new(1, 1)),
            (Coord::new(1, 1), Coord::new(0, 0)),
        ]
        .into_iter()
        .collect();
        let path = reconstruct(Coord::new(2, 2), 9, |c| came_from.get(&c).copied());
        assert_eq!(path, vec![Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)]);
    }

    #[test]
    fn lone_cell() {
        assert_eq!(reconstruct(Coord::new(3, 4), 1, |_| None), vec![Coord::new(3, 4)]);
    }

    #[test]
    fn cycle_is_bounded() {
        let a = Coord::new(0, 0);
        let b = Coord::new(0, 1);
        let path = reconstruct(a, 5, |c| Some(if c == a { b } else { a }));
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&a));
    }
}

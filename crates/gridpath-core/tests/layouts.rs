use gridpath_core::{Coord, Grid, Layout, LayoutDecoder, LayoutEncoder, LayoutError, Role, SearchTag};

const MAZE: &str = "\
gridpath 1 6 8
S.......
.######.
.#....#.
.#.##.#.
...#E...
########
";

#[test]
fn text_and_binary_load_identical_grids() {
    let from_text = Layout::parse_text(MAZE).unwrap().into_grid().unwrap();

    let mut bytes = Vec::new();
    LayoutEncoder::new(&mut bytes).encode_grid(&from_text).unwrap();
    let from_binary = LayoutDecoder::new(bytes.as_slice()).decode_grid().unwrap();

    assert_eq!(from_text, from_binary);
    assert_eq!(from_text.bounds().to_string(), "6x8");
    assert_eq!(from_text.start(), Some(Coord::new(0, 0)));
    assert_eq!(from_text.end(), Some(Coord::new(4, 4)));
    assert_eq!(from_text.count(Role::Barrier), 21);
}

#[test]
fn edited_grid_survives_a_round_trip() {
    let mut grid = Grid::new(5, 7);
    grid.fill(Role::Barrier);
    for col in 0..7 {
        grid.set_role(Coord::new(2, col), Role::Empty);
    }
    assert!(grid.place_start(Coord::new(2, 0)));
    assert!(grid.place_end(Coord::new(2, 6)));
    // Moving a marker clears the old one.
    assert!(grid.place_end(Coord::new(2, 5)));
    assert_eq!(grid.role(Coord::new(2, 6)), Some(Role::Empty));
    grid.set_tag(Coord::new(2, 3), SearchTag::Path);

    let text = Layout::from_grid(&grid).to_text();
    let mut back = Layout::parse_text(&text).unwrap().into_grid().unwrap();
    assert_eq!(back.tag(Coord::new(2, 3)), Some(SearchTag::Unvisited));
    grid.reset_search();
    assert_eq!(back, grid);
    back.reset_search();
    assert_eq!(back, grid);
}

#[test]
fn column_major_import() {
    // Stored as columns: each text row below is one column of the real grid.
    let columns = Layout::parse_text("gridpath 1 3 2\nS.\n#.\n.E\n").unwrap();
    let grid = columns.transposed().into_grid().unwrap();
    assert_eq!((grid.rows(), grid.cols()), (2, 3));
    assert_eq!(grid.role(Coord::new(0, 1)), Some(Role::Barrier));
    assert_eq!(grid.end(), Some(Coord::new(1, 2)));
}

#[test]
fn rejects_two_ends() {
    let err = Layout::parse_text("gridpath 1 2 2\nSE\n.E\n").unwrap_err();
    assert!(matches!(err, LayoutError::MultipleMarkers(Role::End)));
    assert_eq!(err.to_string(), "layout: more than one End cell");
}

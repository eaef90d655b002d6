use gridpath_core::{Cell, Grid, Role, SearchTag};

/// An sRGB colour triple.
pub type Rgb = (u8, u8, u8);

const EMPTY: Rgb = (255, 255, 255);
const BARRIER: Rgb = (0, 0, 0);
const START: Rgb = (255, 165, 0);
const END: Rgb = (64, 224, 208);
const OPEN: Rgb = (0, 255, 0);
const CLOSED: Rgb = (255, 0, 0);
const PATH: Rgb = (128, 0, 128);

/// Display colour of a cell. Roles other than [`Role::Empty`] take
/// precedence over the search tag.
pub fn colour_of(cell: Cell) -> Rgb {
    match cell.role {
        Role::Barrier => BARRIER,
        Role::Start => START,
        Role::End => END,
        Role::Empty => match cell.tag {
            SearchTag::Unvisited => EMPTY,
            SearchTag::Open => OPEN,
            SearchTag::Closed => CLOSED,
            SearchTag::Path => PATH,
        },
    }
}

/// Plain-text picture of `grid`: role runes, with `*` on empty cells
/// tagged as path.
pub fn to_ascii(grid: &Grid) -> String {
    let cols = grid.cols().max(0) as usize;
    let mut out = String::with_capacity(grid.len() + grid.rows().max(0) as usize);
    for (i, cell) in grid.cells().iter().enumerate() {
        let ch = match (cell.role, cell.tag) {
            (Role::Empty, SearchTag::Path) => '*',
            (role, _) => role.rune(),
        };
        out.push(ch);
        if (i + 1) % cols == 0 {
            out.push('\n');
        }
    }
    out
}

//! The [`Cell`] type: a role plus a transient search tag.

/// A cell's fixed classification, set by whoever edits the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
}

impl Role {
    /// All roles, in code order.
    pub const ALL: [Role; 4] = [Role::Empty, Role::Barrier, Role::Start, Role::End];

    /// Integer code used by the binary layout format.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Barrier => 1,
            Self::Start => 2,
            Self::End => 3,
        }
    }

    /// Inverse of [`code`](Self::code).
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Barrier),
            2 => Some(Self::Start),
            3 => Some(Self::End),
            _ => None,
        }
    }

    /// Character used by the text layout format.
    #[inline]
    pub const fn rune(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Barrier => '#',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    /// Inverse of [`rune`](Self::rune).
    #[inline]
    pub const fn from_rune(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Barrier),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }

    /// Whether the neighbor relation may include a cell with this role.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Barrier)
    }
}

/// A cell's transient state during or after one search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchTag {
    #[default]
    Unvisited,
    Open,
    Closed,
    Path,
}

/// A grid cell. Role and search tag are independent axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub role: Role,
    pub tag: SearchTag,
}

impl Cell {
    /// An unvisited cell with the given role.
    #[inline]
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            tag: SearchTag::Unvisited,
        }
    }

    /// Set the role (builder).
    #[inline]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the search tag (builder).
    #[inline]
    pub const fn with_tag(mut self, tag: SearchTag) -> Self {
        self.tag = tag;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_and_runes_are_inverse() {
        for role in Role::ALL {
            assert_eq!(Role::from_code(role.code()), Some(role));
            assert_eq!(Role::from_rune(role.rune()), Some(role));
        }
        assert_eq!(Role::from_code(4), None);
        assert_eq!(Role::from_rune('x'), None);
    }

    #[test]
    fn only_barrier_is_impassable() {
        assert!(Role::Empty.is_passable());
        assert!(Role::Start.is_passable());
        assert!(Role::End.is_passable());
        assert!(!Role::Barrier.is_passable());
    }

    #[test]
    fn builders_touch_one_axis() {
        let c = Cell::new(Role::Start).with_tag(SearchTag::Open);
        assert_eq!(c.role, Role::Start);
        assert_eq!(c.tag, SearchTag::Open);
        assert_eq!(c.with_role(Role::Empty).tag, SearchTag::Open);
    }
}

//! Adaptive grid layout: maps an item count to rows and columns per layout kind.
//!
//! | kind        | 0            | 1–3 | 4   | 5–6 | 7–9 | ≥10 | cap |
//! |-------------|--------------|-----|-----|-----|-----|-----|-----|
//! | gallery     | 2×2 slots    | 1×n | 2×2 | 2×3 | 3×3 | 3×4 | 12  |
//! | team        | 1×3 slots    | 1×n | 2×2 | 2×3 | –   | –   | 6   |
//! | featureGrid | 1×3          | 1×n | 2×2 | 2×3 | 3×3 | –   | 9   |
//! | pricing     | 1×3 slots    | 1×n | 1×4 | –   | –   | –   | 4   |
//!
//! Agenda lists use one column up to four items and two columns beyond, capped at 8.

use super::constants::{
    MAX_AGENDA_ITEMS, MAX_FEATURES, MAX_GALLERY_IMAGES, MAX_PRICING_TIERS, MAX_TEAM_MEMBERS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    Gallery,
    Team,
    Agenda,
    FeatureGrid,
    Pricing,
}

impl GridKind {
    pub fn max_items(self) -> usize {
        match self {
            GridKind::Gallery => MAX_GALLERY_IMAGES,
            GridKind::Team => MAX_TEAM_MEMBERS,
            GridKind::Agenda => MAX_AGENDA_ITEMS,
            GridKind::FeatureGrid => MAX_FEATURES,
            GridKind::Pricing => MAX_PRICING_TIERS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDecision {
    pub rows: usize,
    pub columns: usize,
    pub max_items: usize,
}

impl GridDecision {
    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }
}

/// Picks the grid for `item_count` items. Always returns at least one cell.
pub fn decide(item_count: usize, kind: GridKind) -> GridDecision {
    let max_items = kind.max_items();
    let n = item_count.min(max_items);
    let (rows, columns) = match kind {
        GridKind::Gallery => match n {
            0 => (2, 2),
            1..=3 => (1, n),
            4 => (2, 2),
            5 | 6 => (2, 3),
            7..=9 => (3, 3),
            _ => (3, 4),
        },
        GridKind::Team => match n {
            0 => (1, 3),
            1..=3 => (1, n),
            4 => (2, 2),
            _ => (2, 3),
        },
        GridKind::FeatureGrid => match n {
            0 => (1, 3),
            1..=3 => (1, n),
            4 => (2, 2),
            5 | 6 => (2, 3),
            _ => (3, 3),
        },
        GridKind::Pricing => match n {
            0 => (1, 3),
            _ => (1, n),
        },
        GridKind::Agenda => {
            if n == 0 {
                (1, 1)
            } else {
                let columns = if n <= 4 { 1 } else { 2 };
                (n.div_ceil(columns), columns)
            }
        }
    };
    GridDecision {
        rows,
        columns,
        max_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gallery_breakpoints() {
        let shape = |n| {
            let d = decide(n, GridKind::Gallery);
            (d.rows, d.columns)
        };
        assert_eq!(shape(0), (2, 2));
        assert_eq!(shape(1), (1, 1));
        assert_eq!(shape(3), (1, 3));
        assert_eq!(shape(4), (2, 2));
        assert_eq!(shape(6), (2, 3));
        assert_eq!(shape(9), (3, 3));
        assert_eq!(shape(10), (3, 4));
        assert_eq!(shape(40), (3, 4));
        assert_eq!(decide(40, GridKind::Gallery).max_items, 12);
    }

    #[test]
    fn team_and_agenda_breakpoints() {
        assert_eq!(decide(0, GridKind::Team).capacity(), 3);
        assert_eq!(decide(2, GridKind::Team).columns, 2);
        assert_eq!(decide(4, GridKind::Team).columns, 2);
        assert_eq!(decide(9, GridKind::Team).capacity(), 6);

        let agenda = |n| {
            let d = decide(n, GridKind::Agenda);
            (d.rows, d.columns)
        };
        assert_eq!(agenda(0), (1, 1));
        assert_eq!(agenda(4), (4, 1));
        assert_eq!(agenda(5), (3, 2));
        assert_eq!(agenda(8), (4, 2));
        assert_eq!(agenda(20), (4, 2));
    }

    #[test]
    fn pricing_and_features() {
        assert_eq!(decide(0, GridKind::Pricing).capacity(), 3);
        assert_eq!(decide(2, GridKind::Pricing).columns, 2);
        assert_eq!(decide(7, GridKind::Pricing).columns, 4);
        assert_eq!(decide(8, GridKind::FeatureGrid).capacity(), 9);
    }

    #[test]
    fn caps_per_kind() {
        assert_eq!(GridKind::Gallery.max_items(), 12);
        assert_eq!(GridKind::Team.max_items(), 6);
        assert_eq!(GridKind::Agenda.max_items(), 8);
        assert_eq!(decide(15, GridKind::Gallery).capacity(), 12);
    }

    proptest! {
        #[test]
        fn every_item_fits(n in 0usize..64, k in 0usize..5) {
            let kind = [
                GridKind::Gallery,
                GridKind::Team,
                GridKind::Agenda,
                GridKind::FeatureGrid,
                GridKind::Pricing,
            ][k];
            let decision = decide(n, kind);
            prop_assert!(decision.rows >= 1 && decision.columns >= 1);
            prop_assert!(decision.capacity() >= n.min(decision.max_items));
        }

        #[test]
        fn gallery_grows_monotonically_and_clamps(n in 1usize..64) {
            let here = decide(n, GridKind::Gallery);
            let next = decide(n + 1, GridKind::Gallery);
            prop_assert!(next.capacity() >= here.capacity());
            if n >= 4 {
                prop_assert!(next.columns >= here.columns);
            }
            prop_assert!(here.columns <= 4 && here.rows <= 3);
        }
    }
}

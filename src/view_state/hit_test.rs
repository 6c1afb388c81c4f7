//! Pointer hit-testing against the rendered block layout.
//!
//! Resolution runs entirely off a [`BlockLayout`], the same value the
//! renderer draws from, so the row a pointer lands on is the row drawn there.

use super::layout::BlockLayout;

/// What a pointer on a region's header rows resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    /// Header rows are inert.
    Miss,
    /// Header rows hit the region at row 0, flagged as a header hit so the
    /// caller can move focus without selecting.
    RowZero,
}

/// Result of hit-testing a screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTestResult {
    /// Outside the block, between regions, or on padding.
    Miss,

    /// The pointer is over a row of a region.
    Hit {
        /// Region index, left to right.
        region: usize,
        /// Absolute option index within the region's list.
        row: usize,
        /// Whether the pointer is on the region's header rather than a row.
        on_header: bool,
    },
}

impl HitTestResult {
    /// Create a miss result.
    pub fn miss() -> Self {
        Self::Miss
    }

    /// Create a hit on an option row.
    pub fn hit(region: usize, row: usize) -> Self {
        Self::Hit {
            region,
            row,
            on_header: false,
        }
    }

    /// Create a hit on a region header.
    pub fn header(region: usize) -> Self {
        Self::Hit {
            region,
            row: 0,
            on_header: true,
        }
    }

    /// Check if this was a hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Region index if hit.
    pub fn region(&self) -> Option<usize> {
        match self {
            Self::Hit { region, .. } => Some(*region),
            Self::Miss => None,
        }
    }

    /// Option index if an option row was hit.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Hit {
                row,
                on_header: false,
                ..
            } => Some(*row),
            _ => None,
        }
    }
}

/// Map absolute pointer coordinates to a region row of `layout`.
pub fn map_pointer(x: u16, y: u16, layout: &BlockLayout) -> HitTestResult {
    let area = layout.area;
    if x < area.x || y < area.y || x >= area.right() || y >= area.bottom() {
        return HitTestResult::miss();
    }
    let (rel_x, rel_y) = (x - area.x, y - area.y);

    let Some((index, region)) = layout
        .regions
        .iter()
        .enumerate()
        .find(|(_, region)| region.band.contains(rel_x))
    else {
        return HitTestResult::miss();
    };

    if region.header_rows.contains(&rel_y) {
        return match region.header_hit {
            HeaderHit::Miss => HitTestResult::miss(),
            HeaderHit::RowZero => HitTestResult::header(index),
        };
    }
    if rel_y < region.first_row {
        return HitTestResult::miss();
    }

    let stride = region.row_stride.max(1);
    let delta = rel_y - region.first_row;
    if delta % stride != 0 {
        return HitTestResult::miss();
    }

    let displayed = usize::from(delta / stride);
    let visible = region.window.visible();
    if displayed >= visible.len() {
        return HitTestResult::miss();
    }
    HitTestResult::hit(index, visible.start + displayed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::layout::{column_bands, ColumnBand, OptionWindow, RegionLayout};
    use crate::view_state::window::WindowPolicy;
    use proptest::prelude::*;
    use ratatui::layout::Rect;

    fn region(band: ColumnBand, total: usize) -> RegionLayout {
        RegionLayout {
            band,
            header_rows: 0..1,
            header_hit: HeaderHit::Miss,
            first_row: 1,
            row_stride: 1,
            window: OptionWindow::all(total),
        }
    }

    fn block(x: u16, y: u16, width: u16, height: u16, regions: Vec<RegionLayout>) -> BlockLayout {
        BlockLayout {
            area: Rect::new(x, y, width, height),
            regions,
        }
    }

    mod constructors {
        use super::*;

        #[test]
        fn miss_has_no_region_or_row() {
            let result = HitTestResult::miss();
            assert!(!result.is_hit());
            assert_eq!(result.region(), None);
            assert_eq!(result.row(), None);
        }

        #[test]
        fn header_hit_has_region_but_no_row() {
            let result = HitTestResult::header(2);
            assert!(result.is_hit());
            assert_eq!(result.region(), Some(2));
            assert_eq!(result.row(), None);
        }

        #[test]
        fn row_hit_exposes_both() {
            let result = HitTestResult::hit(1, 7);
            assert_eq!(result.region(), Some(1));
            assert_eq!(result.row(), Some(7));
        }
    }

    mod bounds {
        use super::*;

        #[test]
        fn outside_block_misses() {
            let layout = block(10, 5, 8, 4, vec![region(ColumnBand { start: 0, width: 8 }, 3)]);
            assert_eq!(map_pointer(9, 6, &layout), HitTestResult::Miss);
            assert_eq!(map_pointer(18, 6, &layout), HitTestResult::Miss);
            assert_eq!(map_pointer(12, 4, &layout), HitTestResult::Miss);
            assert_eq!(map_pointer(12, 9, &layout), HitTestResult::Miss);
        }

        #[test]
        fn rows_map_from_block_origin() {
            let layout = block(10, 5, 8, 4, vec![region(ColumnBand { start: 0, width: 8 }, 3)]);
            assert_eq!(map_pointer(10, 6, &layout), HitTestResult::hit(0, 0));
            assert_eq!(map_pointer(17, 8, &layout), HitTestResult::hit(0, 2));
        }

        #[test]
        fn rows_past_the_list_miss() {
            let layout = block(0, 0, 8, 6, vec![region(ColumnBand { start: 0, width: 8 }, 2)]);
            assert_eq!(map_pointer(0, 3, &layout), HitTestResult::Miss);
        }
    }

    mod bands {
        use super::*;

        #[test]
        fn boundary_column_belongs_to_the_band_starting_there() {
            let bands = column_bands(&[5, 5], 0);
            let layout = block(
                0,
                0,
                10,
                4,
                bands.into_iter().map(|band| region(band, 3)).collect(),
            );
            assert_eq!(map_pointer(4, 1, &layout), HitTestResult::hit(0, 0));
            assert_eq!(map_pointer(5, 1, &layout), HitTestResult::hit(1, 0));
        }

        #[test]
        fn padding_between_bands_misses() {
            let bands = column_bands(&[5, 5], 2);
            let layout = block(
                0,
                0,
                12,
                4,
                bands.into_iter().map(|band| region(band, 3)).collect(),
            );
            assert_eq!(map_pointer(5, 1, &layout), HitTestResult::Miss);
            assert_eq!(map_pointer(6, 1, &layout), HitTestResult::Miss);
            assert_eq!(map_pointer(7, 1, &layout), HitTestResult::hit(1, 0));
        }
    }

    mod headers {
        use super::*;

        #[test]
        fn inert_header_misses() {
            let layout = block(0, 0, 8, 4, vec![region(ColumnBand { start: 0, width: 8 }, 3)]);
            assert_eq!(map_pointer(3, 0, &layout), HitTestResult::Miss);
        }

        #[test]
        fn focusing_header_hits_row_zero() {
            let mut r = region(ColumnBand { start: 0, width: 8 }, 3);
            r.header_rows = 0..2;
            r.first_row = 2;
            r.header_hit = HeaderHit::RowZero;
            let layout = block(0, 0, 8, 5, vec![r]);
            assert_eq!(map_pointer(3, 1, &layout), HitTestResult::header(0));
            assert_eq!(map_pointer(3, 2, &layout), HitTestResult::hit(0, 0));
        }

        #[test]
        fn rows_above_the_header_miss() {
            let mut r = region(ColumnBand { start: 0, width: 8 }, 3);
            r.header_rows = 2..3;
            r.first_row = 3;
            r.header_hit = HeaderHit::RowZero;
            let layout = block(0, 0, 8, 6, vec![r]);
            assert_eq!(map_pointer(3, 0, &layout), HitTestResult::Miss);
        }
    }

    mod stride {
        use super::*;

        #[test]
        fn rows_between_options_miss() {
            let mut r = region(ColumnBand { start: 0, width: 8 }, 2);
            r.row_stride = 3;
            let layout = block(0, 0, 8, 5, vec![r]);
            assert_eq!(map_pointer(0, 1, &layout), HitTestResult::hit(0, 0));
            assert_eq!(map_pointer(0, 2, &layout), HitTestResult::Miss);
            assert_eq!(map_pointer(0, 3, &layout), HitTestResult::Miss);
            assert_eq!(map_pointer(0, 4, &layout), HitTestResult::hit(0, 1));
        }
    }

    mod windows {
        use super::*;

        #[test]
        fn centered_window_offsets_rows() {
            let mut r = region(ColumnBand { start: 0, width: 6 }, 100);
            r.window = OptionWindow {
                policy: WindowPolicy::Centered,
                total: 100,
                size: 9,
                anchor: 50,
            };
            let layout = block(0, 0, 6, 10, vec![r]);
            assert_eq!(map_pointer(0, 1, &layout), HitTestResult::hit(0, 46));
            assert_eq!(map_pointer(0, 5, &layout), HitTestResult::hit(0, 50));
            assert_eq!(map_pointer(0, 9, &layout), HitTestResult::hit(0, 54));
        }

        #[test]
        fn clamped_window_offsets_rows() {
            let mut r = region(ColumnBand { start: 0, width: 6 }, 30);
            r.window = OptionWindow {
                policy: WindowPolicy::Clamped,
                total: 30,
                size: 7,
                anchor: 23,
            };
            let layout = block(0, 0, 6, 8, vec![r]);
            assert_eq!(map_pointer(0, 1, &layout), HitTestResult::hit(0, 23));
            assert_eq!(map_pointer(0, 7, &layout), HitTestResult::hit(0, 29));
        }
    }

    proptest! {
        #[test]
        fn every_column_hits_at_most_one_band(
            widths in proptest::collection::vec(1u16..12, 1..5),
            padding in 0u16..4,
            probe in 0u16..80,
        ) {
            let bands = column_bands(&widths, padding);
            let owners = bands.iter().filter(|b| b.contains(probe)).count();
            prop_assert!(owners <= 1);
            let total = bands.last().map_or(0, ColumnBand::end);
            if padding == 0 && probe < total {
                prop_assert_eq!(owners, 1);
            }
        }
    }
}

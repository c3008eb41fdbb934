//! Tile and page geometry.
//!
//! Everything here is derived from a [`UiScale`]; nothing depends on the
//! active colour scheme.  The view adapters in [`crate::ui`] only copy
//! these numbers onto widgets.

use crate::catalog::{IconSpec, GRID_COLS};
use crate::scale::UiScale;
use crate::traits::TileSurface;

const ICON_PX_BASE: i32 = 56;
const LABEL_PX_BASE: i32 = 20;
const SPACING_BASE: i32 = 10;
const ICON_BOX_BASE: i32 = 88;
const ICON_PAD_BASE: i32 = 14;

const MARGIN_BASE: i32 = 40;
const ROW_SPACING_BASE: i32 = 30;
const COL_SPACING_BASE: i32 = 55;

const NAV_PX_BASE: i32 = 48;
const SCHEME_PX_BASE: i32 = 18;

/// Pixel sizes for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    /// Glyph font size.
    pub icon_px: i32,
    /// Label font size.
    pub label_px: i32,
    /// Gap between the icon box and the label.
    pub spacing: i32,
    /// Inner padding around the glyph.
    pub pad: i32,
    /// Side of the square icon box.  Identical for every tile.
    pub box_px: i32,
    pub show_label: bool,
}

impl TileLayout {
    pub fn for_scale(ui: &UiScale) -> Self {
        let icon_px = ui.px(ICON_PX_BASE, 8);
        let pad = ui.px(ICON_PAD_BASE, 1);
        Self {
            icon_px,
            label_px: ui.px(LABEL_PX_BASE, 6),
            spacing: ui.px(SPACING_BASE, 1),
            pad,
            box_px: (icon_px + 2 * pad).max(ui.px(ICON_BOX_BASE, 1)),
            show_label: ui.show_labels,
        }
    }
}

/// Margins and spacing of one page grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub margin: i32,
    pub row_spacing: i32,
    pub col_spacing: i32,
    pub tile: TileLayout,
}

impl PageLayout {
    pub fn for_scale(ui: &UiScale) -> Self {
        Self {
            margin: ui.px(MARGIN_BASE, 2),
            row_spacing: ui.px(ROW_SPACING_BASE, 1),
            col_spacing: ui.px(COL_SPACING_BASE, 1),
            tile: TileLayout::for_scale(ui),
        }
    }
}

/// Font sizes of the chrome around the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    pub nav_px: i32,
    pub scheme_px: i32,
}

impl ChromeLayout {
    pub fn for_scale(ui: &UiScale) -> Self {
        Self {
            nav_px: ui.px(NAV_PX_BASE, 12),
            scheme_px: ui.px(SCHEME_PX_BASE, 8),
        }
    }
}

/// Grid cell `(col, row)` of the `index`-th tile on a page.
pub fn cell_of(index: usize) -> (usize, usize) {
    (index % GRID_COLS, index / GRID_COLS)
}

/// What a view needs to draw one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub glyph: String,
    pub label: String,
    pub brand: bool,
    pub color_class: String,
    pub col: usize,
    pub row: usize,
}

impl TileView {
    pub fn new(index: usize, spec: &IconSpec) -> Self {
        let (col, row) = cell_of(index);
        Self {
            glyph: spec.glyph.to_string(),
            label: spec.label.clone(),
            brand: spec.brand,
            color_class: spec.color_class.clone(),
            col,
            row,
        }
    }

    /// CSS classes of the glyph label.
    pub fn icon_classes(&self) -> &'static [&'static str] {
        if self.brand {
            &["tile-icon", "brand"]
        } else {
            &["tile-icon"]
        }
    }
}

/// Views for every tile of one page, in catalog order.
pub fn page_views(specs: &[IconSpec]) -> Vec<TileView> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| TileView::new(i, spec))
        .collect()
}

/// Push `layout` to every tile surface of a page.
pub fn apply_page<T: TileSurface>(layout: &PageLayout, tiles: &[T]) {
    for tile in tiles {
        tile.apply_layout(&layout.tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IconConfig;
    use std::cell::RefCell;

    #[test]
    fn full_scale_uses_base_sizes() {
        let page = PageLayout::for_scale(&UiScale::FULL);
        assert_eq!(page.margin, 40);
        assert_eq!(page.row_spacing, 30);
        assert_eq!(page.col_spacing, 55);
        assert_eq!(page.tile.icon_px, 56);
        assert_eq!(page.tile.label_px, 20);
        assert_eq!(page.tile.pad, 14);
        // 56 + 2·14 = 84 < 88
        assert_eq!(page.tile.box_px, 88);
        assert!(page.tile.show_label);
    }

    #[test]
    fn minimum_scale_respects_floors() {
        let ui = UiScale {
            s: 0.05,
            show_labels: false,
        };
        let tile = TileLayout::for_scale(&ui);
        assert_eq!(tile.icon_px, 8);
        assert_eq!(tile.label_px, 6);
        assert_eq!(tile.spacing, 1);
        assert_eq!(tile.pad, 1);
        assert_eq!(tile.box_px, 10);
        assert!(!tile.show_label);
        let page = PageLayout::for_scale(&ui);
        assert_eq!(page.margin, 2);
        assert_eq!(page.row_spacing, 2);
        assert_eq!(page.col_spacing, 3);
    }

    #[test]
    fn icon_box_always_fits_glyph() {
        for pct in 5..=100 {
            let ui = UiScale {
                s: pct as f64 / 100.0,
                show_labels: true,
            };
            let t = TileLayout::for_scale(&ui);
            assert!(t.box_px >= t.icon_px + 2 * t.pad);
        }
    }

    #[test]
    fn cells_fill_rows_of_five() {
        assert_eq!(cell_of(0), (0, 0));
        assert_eq!(cell_of(4), (4, 0));
        assert_eq!(cell_of(5), (0, 1));
        assert_eq!(cell_of(14), (4, 2));
    }

    #[test]
    fn views_follow_catalog_order() {
        let cfg = IconConfig::builtin();
        let views = page_views(&cfg.page2);
        assert_eq!(views.len(), 15);
        assert_eq!(views[0].label, "OpenCPN");
        assert_eq!((views[7].col, views[7].row), (2, 1));
        let video = views.iter().find(|v| v.label == "Video").unwrap();
        assert!(video.brand);
        assert_eq!(video.icon_classes(), &["tile-icon", "brand"]);
        assert_eq!(video.glyph, "\u{f167}");
    }

    #[derive(Default)]
    struct RecordingSurface {
        applied: RefCell<Vec<TileLayout>>,
    }

    impl TileSurface for RecordingSurface {
        fn apply_layout(&self, layout: &TileLayout) {
            self.applied.borrow_mut().push(*layout);
        }
    }

    #[test]
    fn apply_page_reaches_every_tile() {
        let tiles: Vec<RecordingSurface> = (0..3).map(|_| RecordingSurface::default()).collect();
        let ui = UiScale {
            s: 0.5,
            show_labels: false,
        };
        let layout = PageLayout::for_scale(&ui);
        apply_page(&layout, &tiles);
        for t in &tiles {
            assert_eq!(t.applied.borrow().as_slice(), &[layout.tile]);
        }
    }
}

//! Highlight resolution.
//!
//! A byte is highlighted when it is inside the explicit highlight range, when the store's
//! predicate says so, or when it is covered by the data preview. Neighbouring highlighted bytes
//! are merged into one band by widening each byte's rectangle over the gap to the next byte.

use crate::geometry::Geometry;
use crate::store::MemorySource;
use std::ops::Range;

pub struct Highlighter<'a, M: MemorySource + ?Sized> {
    mem: &'a M,
    mem_size: usize,
    range: Option<Range<usize>>,
    preview: Option<Range<usize>>,
}

impl<'a, M: MemorySource + ?Sized> Highlighter<'a, M> {
    /// `preview` is the span covered by the data preview, if the preview panel is shown
    pub const fn new(
        mem: &'a M,
        mem_size: usize,
        range: Option<Range<usize>>,
        preview: Option<Range<usize>>,
    ) -> Self {
        Self {
            mem,
            mem_size,
            range,
            preview,
        }
    }

    /// Highlighted by the explicit range or the store predicate
    fn is_user_highlighted(&self, addr: usize) -> bool {
        self.range.as_ref().is_some_and(|r| r.contains(&addr)) || self.mem.is_highlighted(addr)
    }

    pub fn is_highlighted(&self, addr: usize) -> bool {
        self.is_user_highlighted(addr) || self.preview.as_ref().is_some_and(|r| r.contains(&addr))
    }

    /// Width of the highlight rectangle for the byte at `addr` drawn in column `col`.
    ///
    /// The rectangle covers the trailing gap when the next byte is highlighted too (preview
    /// is not consulted for that) or when the byte ends its row.
    #[allow(clippy::cast_precision_loss)]
    pub fn rect_width(
        &self,
        addr: usize,
        col: usize,
        cols: usize,
        mid_cols_count: usize,
        geometry: &Geometry,
    ) -> f32 {
        let next_highlighted = addr + 1 < self.mem_size && self.is_user_highlighted(addr + 1);

        if !(next_highlighted || col + 1 == cols) {
            return geometry.glyph_width * 2.0;
        }

        let mut width = geometry.hex_cell_width;
        if mid_cols_count > 0 && col > 0 && col + 1 < cols && (col + 1) % mid_cols_count == 0 {
            width += geometry.spacing_between_mid_cols;
        }
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EditorSettings;
    use crate::store::{HookedSlice, MemoryHooks};
    use crate::{FontMetrics, StyleMetrics};
    use std::rc::Rc;

    fn geometry() -> Geometry {
        Geometry::calc(
            &EditorSettings::default(),
            0x100,
            0,
            FontMetrics {
                glyph_width: 8.0,
                line_height: 14.0,
            },
            StyleMetrics::default(),
        )
    }

    #[test]
    fn test_union_of_range_and_predicate() {
        // Arrange
        let hooks = MemoryHooks {
            highlight: Some(Rc::new(|_: &[u8], addr: usize| addr == 10)),
            ..MemoryHooks::default()
        };
        let mut data = vec![0u8; 32];
        let mem = HookedSlice::new(&mut data, &hooks);

        // Act
        let h = Highlighter::new(&mem, 32, Some(4..8), None);
        let highlighted: Vec<usize> = (0..32).filter(|&a| h.is_highlighted(a)).collect();

        // Assert
        assert_eq!(highlighted, vec![4, 5, 6, 7, 10]);
    }

    #[test]
    fn test_preview_span_is_highlighted() {
        let mem = vec![0u8; 16];

        let h = Highlighter::new(&mem, 16, None, Some(2..6));

        assert!(!h.is_highlighted(1));
        assert!(h.is_highlighted(2) && h.is_highlighted(5));
        assert!(!h.is_highlighted(6));
    }

    #[test]
    fn test_rect_width_merges_runs() {
        // Arrange
        let g = geometry();
        let mem = vec![0u8; 64];
        let h = Highlighter::new(&mem, 64, Some(4..10), Some(20..24));

        // Act + Assert
        // Inside a run: covers the trailing gap
        assert!((h.rect_width(4, 4, 16, 8, &g) - g.hex_cell_width).abs() < f32::EPSILON);
        // Crossing the mid-column boundary adds the group spacing
        let expected = g.hex_cell_width + g.spacing_between_mid_cols;
        assert!((h.rect_width(7, 7, 16, 8, &g) - expected).abs() < f32::EPSILON);
        // Last byte of the range: just the glyphs
        assert!((h.rect_width(9, 9, 16, 8, &g) - g.glyph_width * 2.0).abs() < f32::EPSILON);
        // Preview bytes do not merge with their neighbours
        assert!((h.rect_width(20, 4, 16, 8, &g) - g.glyph_width * 2.0).abs() < f32::EPSILON);
        // Last column always extends
        assert!((h.rect_width(31, 15, 16, 8, &g) - g.hex_cell_width).abs() < f32::EPSILON);
    }
}

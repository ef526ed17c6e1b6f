//! Pixel layout of the grid.
//!
//! A pure function of the settings, the size of the store and the current font/style metrics.
//! It is cheap, so the editor recomputes it every frame.

use crate::settings::EditorSettings;

/// Metrics of the monospace font the grid is drawn with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Advance of a single glyph, including one pixel of spacing
    pub glyph_width: f32,
    pub line_height: f32,
}

/// Host style values that add to the total width
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleMetrics {
    pub scrollbar_size: f32,
    pub window_padding_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub addr_digits_count: usize,
    pub line_height: f32,
    pub glyph_width: f32,
    pub hex_cell_width: f32,
    pub spacing_between_mid_cols: f32,
    pub pos_hex_start: f32,
    pub pos_hex_end: f32,
    pub pos_ascii_start: f32,
    pub pos_ascii_end: f32,
    pub window_width: f32,
}

/// Number of hex digits needed to print `addr` (at least 1)
pub const fn addr_digits_for(addr: usize) -> usize {
    let mut digits = 0;
    let mut n = addr;
    while n > 0 {
        digits += 1;
        n >>= 4;
    }
    if digits == 0 { 1 } else { digits }
}

#[allow(clippy::cast_precision_loss)]
impl Geometry {
    pub fn calc(
        settings: &EditorSettings,
        mem_size: usize,
        base_display_addr: usize,
        font: FontMetrics,
        style: StyleMetrics,
    ) -> Self {
        let cols = settings.cols.max(1) as f32;

        let addr_digits_count = if settings.addr_digits_count == 0 {
            addr_digits_for(base_display_addr.saturating_add(mem_size).saturating_sub(1))
        } else {
            settings.addr_digits_count
        };

        let glyph_width = font.glyph_width;
        // "FF " includes the trailing space so that clicks land anywhere in the cell
        let hex_cell_width = (glyph_width * 2.5).floor();
        let spacing_between_mid_cols = (hex_cell_width * 0.25).floor();

        let pos_hex_start = (addr_digits_count + 2) as f32 * glyph_width;
        let pos_hex_end = pos_hex_start + hex_cell_width * cols;

        let mut pos_ascii_start = pos_hex_end;
        let mut pos_ascii_end = pos_hex_end;
        if settings.show_ascii {
            pos_ascii_start = pos_hex_end + glyph_width;
            if settings.mid_cols_count > 0 {
                let groups = settings.cols.max(1).div_ceil(settings.mid_cols_count);
                pos_ascii_start += groups as f32 * spacing_between_mid_cols;
            }
            pos_ascii_end = pos_ascii_start + cols * glyph_width;
        }

        let window_width =
            pos_ascii_end + style.scrollbar_size + style.window_padding_x * 2.0 + glyph_width;

        Self {
            addr_digits_count,
            line_height: font.line_height,
            glyph_width,
            hex_cell_width,
            spacing_between_mid_cols,
            pos_hex_start,
            pos_hex_end,
            pos_ascii_start,
            pos_ascii_end,
            window_width,
        }
    }

    /// Horizontal offset of column `n` inside a row
    pub fn byte_pos_x(&self, n: usize, mid_cols_count: usize) -> f32 {
        let mut x = self.pos_hex_start + self.hex_cell_width * n as f32;
        if mid_cols_count > 0 {
            x += (n / mid_cols_count) as f32 * self.spacing_between_mid_cols;
        }
        x
    }

    /// Hex cell under a horizontal offset. Group gaps belong to no cell.
    pub fn hex_col_at(&self, x: f32, cols: usize, mid_cols_count: usize) -> Option<usize> {
        if x < self.pos_hex_start {
            return None;
        }
        (0..cols).find(|&n| {
            let start = self.byte_pos_x(n, mid_cols_count);
            x >= start && x < start + self.hex_cell_width
        })
    }

    /// Column under a horizontal offset inside the ASCII area
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn ascii_col_at(&self, x: f32, cols: usize) -> Option<usize> {
        if x < self.pos_ascii_start || x >= self.pos_ascii_end || self.glyph_width <= 0.0 {
            return None;
        }
        let col = ((x - self.pos_ascii_start) / self.glyph_width) as usize;
        (col < cols).then_some(col)
    }
}

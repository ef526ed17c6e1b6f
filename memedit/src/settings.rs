use crate::store::MemoryHooks;
use egui::Color32;
use std::rc::Rc;

/// User-configurable editor options. Persist across frames.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    /// Disable any editing
    pub read_only: bool,
    /// Number of bytes per row (clamped to at least 1)
    pub cols: usize,
    /// Display the options button and context menu
    pub show_options: bool,
    /// Display the data preview footer
    pub show_data_preview: bool,
    /// Display values in HexII representation: hide zero bytes, printable ASCII as ".X"
    pub show_hexii: bool,
    /// Display the ASCII column on the right side
    pub show_ascii: bool,
    /// Display zero bytes with the weak text color
    pub grey_out_zeroes: bool,
    /// Display "FF" instead of "ff"
    pub uppercase_hex: bool,
    /// Extra spacing every `mid_cols_count` columns. 0 disables it.
    pub mid_cols_count: usize,
    /// Fixed number of address digits. 0 computes it from the highest address.
    pub addr_digits_count: usize,
    /// Background of highlighted bytes
    pub highlight_color: Color32,
    /// Optional read / write / highlight handlers for slice-backed stores
    pub hooks: MemoryHooks,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            read_only: false,
            cols: 16,
            show_options: true,
            show_data_preview: false,
            show_hexii: false,
            show_ascii: true,
            grey_out_zeroes: true,
            uppercase_hex: true,
            mid_cols_count: 8,
            addr_digits_count: 0,
            highlight_color: Color32::from_rgba_unmultiplied(255, 255, 255, 50),
            hooks: MemoryHooks::default(),
        }
    }
}

impl EditorSettings {
    #[must_use]
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = cols.max(1);
        self
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub fn with_data_preview(mut self, show: bool) -> Self {
        self.show_data_preview = show;
        self
    }

    #[must_use]
    pub fn with_options(mut self, show: bool) -> Self {
        self.show_options = show;
        self
    }

    #[must_use]
    pub fn with_ascii(mut self, show: bool) -> Self {
        self.show_ascii = show;
        self
    }

    #[must_use]
    pub fn with_hexii(mut self, show: bool) -> Self {
        self.show_hexii = show;
        self
    }

    #[must_use]
    pub fn with_mid_cols(mut self, count: usize) -> Self {
        self.mid_cols_count = count;
        self
    }

    #[must_use]
    pub fn with_addr_digits(mut self, count: usize) -> Self {
        self.addr_digits_count = count;
        self
    }

    #[must_use]
    pub fn with_highlight_color(mut self, color: Color32) -> Self {
        self.highlight_color = color;
        self
    }

    #[must_use]
    pub fn with_read_fn(mut self, read: impl Fn(&[u8], usize) -> u8 + 'static) -> Self {
        self.hooks.read = Some(Rc::new(read));
        self
    }

    #[must_use]
    pub fn with_write_fn(mut self, write: impl Fn(&mut [u8], usize, u8) + 'static) -> Self {
        self.hooks.write = Some(Rc::new(write));
        self
    }

    #[must_use]
    pub fn with_highlight_fn(mut self, highlight: impl Fn(&[u8], usize) -> bool + 'static) -> Self {
        self.hooks.highlight = Some(Rc::new(highlight));
        self
    }

    /// Address format for the row labels and range label
    pub(crate) fn format_addr(&self, addr: usize, digits: usize) -> String {
        if self.uppercase_hex {
            format!("{addr:0digits$X}")
        } else {
            format!("{addr:0digits$x}")
        }
    }

    pub(crate) fn format_byte(&self, byte: u8) -> String {
        if self.uppercase_hex {
            format!("{byte:02X}")
        } else {
            format!("{byte:02x}")
        }
    }
}

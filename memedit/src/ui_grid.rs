use crate::editor::MemoryEditor;
use crate::events::EventState;
use crate::geometry::Geometry;
use crate::highlight::Highlighter;
use crate::state::{EditFrame, FieldReport};
use crate::store::MemorySource;
use std::ops::Range;

impl MemoryEditor {
    /// Draw the visible rows: address label, hex cells, ASCII column.
    ///
    /// Clicks are hit-tested against the geometry on a single background response, so the
    /// right-click options menu works anywhere on the grid.
    #[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
    pub(crate) fn draw_grid<M: MemorySource + ?Sized>(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        rows: Range<usize>,
        mem: &mut M,
        mem_size: usize,
        base_display_addr: usize,
        geometry: &Geometry,
        frame: &mut EditFrame,
        events: &EventState,
    ) {
        let cols = self.settings.cols;
        let grid_id = ui.id().with("memedit_cells");

        // Leave the scrollbar its own clicks
        let cells_rect = rect.with_max_x(rect.right() - ui.spacing().scroll.bar_width - 4.0);
        let background = ui.interact(cells_rect, grid_id, egui::Sense::click());
        if self.settings.show_options {
            background.context_menu(|ui| self.draw_options_menu(ui));
        }

        // Clicked cell, resolved against the geometry
        if background.clicked()
            && let Some(pos) = background.interact_pointer_pos()
            && let Some(row) = row_at(pos.y - rect.top(), &rows, geometry.line_height)
        {
            let x = pos.x - rect.left();

            if let Some(col) = geometry.hex_col_at(x, cols, self.settings.mid_cols_count) {
                let addr = row * cols + col;
                if addr < mem_size {
                    self.state.click_cell(frame, addr, self.settings.read_only);
                }
            } else if self.settings.show_ascii
                && let Some(col) = geometry.ascii_col_at(x, cols)
            {
                let addr = row * cols + col;
                if addr < mem_size {
                    self.state.click_ascii(addr);
                }
            }
        }

        let preview_span = self
            .state
            .preview_addr()
            .filter(|_| self.settings.show_data_preview)
            .map(|addr| addr..addr + self.state.preview_type.size());

        for (i, row) in rows.enumerate() {
            let origin = rect.left_top() + egui::vec2(0.0, i as f32 * geometry.line_height);
            self.draw_row(
                ui,
                origin,
                row,
                mem,
                mem_size,
                base_display_addr,
                geometry,
                preview_span.clone(),
                frame,
                events,
            );
        }

        if self.settings.show_ascii {
            let x = rect.left() + geometry.pos_ascii_start - geometry.glyph_width;
            ui.painter().vline(
                x,
                rect.y_range(),
                ui.visuals().widgets.noninteractive.bg_stroke,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row<M: MemorySource + ?Sized>(
        &mut self,
        ui: &egui::Ui,
        origin: egui::Pos2,
        row: usize,
        mem: &mut M,
        mem_size: usize,
        base_display_addr: usize,
        geometry: &Geometry,
        preview_span: Option<Range<usize>>,
        frame: &mut EditFrame,
        events: &EventState,
    ) {
        let cols = self.settings.cols;
        let mid_cols = self.settings.mid_cols_count;
        let font_id = egui::TextStyle::Monospace.resolve(ui.style());
        let text_color = ui.visuals().text_color();
        let weak_color = ui.visuals().weak_text_color();
        let painter = ui.painter();

        let row_start = row * cols;
        let label = format!(
            "{}: ",
            self.settings.format_addr(
                base_display_addr.saturating_add(row_start),
                geometry.addr_digits_count
            )
        );
        painter.text(origin, egui::Align2::LEFT_TOP, label, font_id.clone(), text_color);

        for (n, addr) in (row_start..(row_start + cols).min(mem_size)).enumerate() {
            let pos = origin + egui::vec2(geometry.byte_pos_x(n, mid_cols), 0.0);

            // Highlight band
            let highlighter = Highlighter::new(
                &*mem,
                mem_size,
                self.state.highlight.clone(),
                preview_span.clone(),
            );
            if highlighter.is_highlighted(addr) {
                let width = highlighter.rect_width(addr, n, cols, mid_cols, geometry);
                painter.rect_filled(
                    egui::Rect::from_min_size(pos, egui::vec2(width, geometry.line_height)),
                    0.0,
                    self.settings.highlight_color,
                );
            }

            if self.state.editing_addr() == Some(addr) {
                self.draw_edit_field(ui, pos, addr, mem, base_display_addr, geometry, frame, events);
                continue;
            }

            let byte = mem.read_byte(addr);
            let (text, color) = self.byte_text(byte, text_color, weak_color);
            painter.text(pos, egui::Align2::LEFT_TOP, text, font_id.clone(), color);
        }

        if self.settings.show_ascii {
            self.draw_ascii(ui, origin, row_start, mem, mem_size, geometry);
        }
    }

    /// Display text of a static cell
    fn byte_text(
        &self,
        byte: u8,
        text_color: egui::Color32,
        weak_color: egui::Color32,
    ) -> (String, egui::Color32) {
        let grey_out = self.settings.grey_out_zeroes;

        if self.settings.show_hexii {
            return match byte {
                32..128 => (format!(".{}", char::from(byte)), text_color),
                0xFF if grey_out => ("##".to_string(), weak_color),
                0x00 => (String::new(), text_color),
                _ => (self.settings.format_byte(byte), text_color),
            };
        }

        if byte == 0 && grey_out {
            return ("00".to_string(), weak_color);
        }
        (self.settings.format_byte(byte), text_color)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_edit_field<M: MemorySource + ?Sized>(
        &mut self,
        ui: &egui::Ui,
        pos: egui::Pos2,
        addr: usize,
        mem: &mut M,
        base_display_addr: usize,
        geometry: &Geometry,
        frame: &mut EditFrame,
        events: &EventState,
    ) {
        let cell_rect = egui::Rect::from_min_size(
            pos,
            egui::vec2(geometry.glyph_width * 2.0, geometry.line_height),
        );
        let field_id = ui.id().with("memedit_field");
        let response = ui.interact(cell_rect, field_id, egui::Sense::click());

        let took_focus = self.state.open_field(
            self.settings.format_byte(mem.read_byte(addr)),
            self.settings.format_addr(
                base_display_addr.saturating_add(addr),
                geometry.addr_digits_count,
            ),
        );

        if took_focus {
            response.request_focus();
        }

        // Keep arrows and tab for navigation instead of focus traversal
        ui.memory_mut(|m| {
            m.set_focus_lock_filter(
                field_id,
                egui::EventFilter {
                    tab: true,
                    horizontal_arrows: true,
                    vertical_arrows: true,
                    escape: false,
                },
            );
        });

        // Click outside of the field
        if !took_focus
            && events.pointer_pressed
            && events.pointer_pos.is_some_and(|p| !cell_rect.contains(p))
        {
            response.surrender_focus();
        }

        let focused = response.has_focus();
        if focused && !took_focus {
            self.state.type_into_field(events);
        }

        let report = FieldReport {
            submitted: focused && !took_focus && events.enter_pressed,
            active: focused || took_focus,
            complete: self.state.field.is_complete(),
        };

        self.paint_field(ui, cell_rect);
        self.state.close_field(frame, addr, report, mem);
    }

    fn paint_field(&self, ui: &egui::Ui, cell_rect: egui::Rect) {
        let visuals = ui.visuals();
        let painter = ui.painter();
        let font_id = egui::TextStyle::Monospace.resolve(ui.style());

        let field = &self.state.field;
        let fill = if field.cursor().is_none() {
            // Whole buffer selected
            visuals.selection.bg_fill
        } else {
            visuals.extreme_bg_color
        };
        painter.rect_filled(cell_rect, 0.0, fill);

        let text_rect = painter.text(
            cell_rect.left_top(),
            egui::Align2::LEFT_TOP,
            field.text(),
            font_id,
            visuals.strong_text_color(),
        );

        if field.cursor().is_some() {
            let x = if field.text().is_empty() {
                cell_rect.left()
            } else {
                text_rect.right()
            };
            painter.vline(x, cell_rect.y_range(), visuals.text_cursor.stroke);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_ascii<M: MemorySource + ?Sized>(
        &self,
        ui: &egui::Ui,
        origin: egui::Pos2,
        row_start: usize,
        mem: &M,
        mem_size: usize,
        geometry: &Geometry,
    ) {
        let visuals = ui.visuals();
        let painter = ui.painter();
        let font_id = egui::TextStyle::Monospace.resolve(ui.style());
        let cols = self.settings.cols;

        for (n, addr) in (row_start..(row_start + cols).min(mem_size)).enumerate() {
            let pos = origin
                + egui::vec2(geometry.pos_ascii_start + n as f32 * geometry.glyph_width, 0.0);

            if self.state.editing_addr() == Some(addr) {
                painter.rect_filled(
                    egui::Rect::from_min_size(
                        pos,
                        egui::vec2(geometry.glyph_width, geometry.line_height),
                    ),
                    0.0,
                    visuals.selection.bg_fill,
                );
            }

            let byte = mem.read_byte(addr);
            let (ch, color) = if (32..128).contains(&byte) {
                (char::from(byte), visuals.text_color())
            } else {
                ('.', visuals.weak_text_color())
            };
            painter.text(pos, egui::Align2::LEFT_TOP, ch, font_id.clone(), color);
        }
    }
}

/// Row under `y` (relative to the grid top). The band below the last full row is not drawn
/// and maps to nothing.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_at(y: f32, rows: &Range<usize>, line_height: f32) -> Option<usize> {
    if y < 0.0 {
        return None;
    }
    let row = rows.start + (y / line_height) as usize;
    rows.contains(&row).then_some(row)
}

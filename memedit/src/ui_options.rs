use crate::editor::MemoryEditor;
use crate::geometry::Geometry;

impl MemoryEditor {
    /// Options button, displayed range and the goto field
    pub(crate) fn draw_options_line(
        &mut self,
        ui: &mut egui::Ui,
        mem_size: usize,
        base_display_addr: usize,
        geometry: &Geometry,
    ) {
        ui.horizontal(|ui| {
            ui.menu_button("Options", |ui| self.draw_options_menu(ui));

            let digits = geometry.addr_digits_count;
            let last = base_display_addr.saturating_add(mem_size).saturating_sub(1);
            ui.monospace(format!(
                "Range {}..{}",
                self.settings.format_addr(base_display_addr, digits),
                self.settings.format_addr(last, digits),
            ));

            #[allow(clippy::cast_precision_loss)]
            let width = (digits + 1) as f32 * geometry.glyph_width + 8.0;
            let textedit = ui.add(
                egui::TextEdit::singleline(&mut self.state.addr_input)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(width)
                    .hint_text("goto"),
            );

            // Hex digits only
            if textedit.changed() {
                self.state.addr_input.retain(|c| c.is_ascii_hexdigit());
            }

            if textedit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.state.submit_goto_input(base_display_addr, mem_size);
            }
        });
    }

    /// Column count and display toggles. Shared by the options button and the context menu.
    pub(crate) fn draw_options_menu(&mut self, ui: &mut egui::Ui) {
        let settings = &mut self.settings;

        let cols = ui.add(
            egui::DragValue::new(&mut settings.cols)
                .range(4..=32)
                .clamp_existing_to_range(false)
                .speed(0.2)
                .suffix(" cols"),
        );
        if cols.changed() {
            self.state.contents_width_changed = true;
        }

        ui.checkbox(&mut settings.show_data_preview, "Show Data Preview");
        ui.checkbox(&mut settings.show_hexii, "Show HexII");
        if ui.checkbox(&mut settings.show_ascii, "Show Ascii").changed() {
            self.state.contents_width_changed = true;
        }
        ui.checkbox(&mut settings.grey_out_zeroes, "Grey out zeroes");
        ui.checkbox(&mut settings.uppercase_hex, "Uppercase Hex");
    }
}

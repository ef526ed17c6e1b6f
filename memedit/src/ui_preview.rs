use crate::editor::MemoryEditor;
use crate::preview::{self, DataFormat, DataType, Endianness};
use crate::store::MemorySource;

impl MemoryEditor {
    /// Type and endianness selectors, then the value of the preview address in every base
    pub(crate) fn draw_preview_line<M: MemorySource + ?Sized>(
        &mut self,
        ui: &mut egui::Ui,
        mem: &M,
        mem_size: usize,
    ) {
        ui.horizontal(|ui| {
            ui.label("Preview as:");

            let mut data_type = self.state.preview_type();
            egui::ComboBox::from_id_salt("memedit_preview_type")
                .selected_text(data_type.desc())
                .show_ui(ui, |ui| {
                    for ty in DataType::ALL {
                        ui.selectable_value(&mut data_type, ty, ty.desc());
                    }
                });
            self.state.set_preview_type(data_type);

            let mut endianness = self.state.preview_endianness();
            egui::ComboBox::from_id_salt("memedit_preview_endianness")
                .selected_text(endianness.desc())
                .width(50.0)
                .show_ui(ui, |ui| {
                    for e in [Endianness::Little, Endianness::Big] {
                        ui.selectable_value(&mut endianness, e, e.desc());
                    }
                });
            self.state.set_preview_endianness(endianness);
        });

        for format in DataFormat::ALL {
            let value = self.state.preview_addr().map_or_else(
                || "N/A".to_string(),
                |addr| {
                    preview::preview(
                        mem,
                        addr,
                        mem_size,
                        self.state.preview_type(),
                        format,
                        self.state.preview_endianness(),
                    )
                },
            );
            ui.monospace(format!("{} {value}", format.desc()));
        }
    }
}

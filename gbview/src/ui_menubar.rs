use crate::app::GbViewApp;
use crate::ui_popup::PopupType;
use eframe::egui;

impl GbViewApp {
    /// Displays the top menu bar with File, View, and About buttons
    pub(crate) fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menubar").show(ctx, |ui| {
            ui.add_space(3.0);

            egui::MenuBar::new().ui(ui, |ui| {
                ui.horizontal(|ui| {
                    // FILE MENU
                    ui.menu_button("File", |ui| {
                        if ui.button("Open ROM...").clicked()
                            && let Some(path) =
                                rfd::FileDialog::new().set_title("Open ROM").pick_file()
                        {
                            self.open_rom(&path);
                        }

                        if ui.button("Clear RAM").clicked() {
                            self.memory.clear_ram();
                        }

                        ui.separator();

                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });

                    // VIEW MENU
                    ui.menu_button("View", |ui| {
                        ui.checkbox(&mut self.show_rom, "ROM");
                        ui.checkbox(&mut self.show_ram, "RAM");
                        ui.checkbox(&mut self.show_bus, "Memory map");

                        ui.separator();
                        ui.label("Bytes per row:");
                        ui.add_space(3.0);

                        let mut cols = self.cols();
                        for n in [8, 16, 32] {
                            if ui.radio_value(&mut cols, Some(n), format!("{n} bytes")).clicked() {
                                self.set_cols(n);
                            }
                        }
                    });

                    // ABOUT BUTTON
                    if ui.button("About").clicked() {
                        self.popup.open(PopupType::About);
                    }
                });
            });

            ui.add_space(2.0);
        });
    }
}

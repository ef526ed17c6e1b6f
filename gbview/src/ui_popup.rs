use crate::app::GbViewApp;
use eframe::egui;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    Error,
    About,
}

impl PopupType {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::About => "About",
        }
    }
}

#[derive(Default)]
pub struct Popup {
    /// Is there a pop-up
    pub(crate) active: bool,
    /// Type of the pop-up. Used to determine the title and content of the window.
    pub(crate) ptype: Option<PopupType>,
}

impl Popup {
    pub const fn open(&mut self, ptype: PopupType) {
        self.active = true;
        self.ptype = Some(ptype);
    }

    /// Clear (aka remove) the pop-up
    pub const fn clear(&mut self) {
        self.active = false;
        self.ptype = None;
    }
}

impl GbViewApp {
    fn display_error(ui: &mut egui::Ui, msg: &str) -> bool {
        ui.label(msg);
        ui.add_space(10.0);

        ui.button(" OK ").clicked()
    }

    fn display_about(ui: &mut egui::Ui) -> bool {
        ui.vertical(|ui| {
            ui.add_space(5.0);

            ui.heading("gbview");
            ui.label("Memory inspector for the GB boot ROM and work RAM");

            ui.add_space(3.0);
            ui.separator();
            ui.add_space(3.0);

            ui.label(
                "Each buffer is shown in its own byte-grid editor. Click a byte or type \
                an address in the goto field to edit, use the arrow keys to move around. \
                The I/O register page is highlighted in the RAM and memory map views.",
            );

            ui.add_space(3.0);
            ui.separator();
            ui.add_space(3.0);

            ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
            ui.add_space(5.0);
        });

        ui.button(" OK ").clicked()
    }

    /// Show the pop-up as a modal on top of the app
    pub(crate) fn show_popup(&mut self, ctx: &egui::Context) {
        let Some(popup_type) = self.popup.ptype else {
            self.popup.clear();
            return;
        };

        let mut close_confirm = false;

        let modal = egui::Modal::new(egui::Id::new("gbview_popup")).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.heading(popup_type.title());
            ui.separator();

            match popup_type {
                PopupType::Error => {
                    let error = self.error.clone().unwrap_or_default();
                    close_confirm = Self::display_error(ui, &error);
                }
                PopupType::About => close_confirm = Self::display_about(ui),
            }
        });

        // Escape or a click on the backdrop
        if close_confirm || modal.should_close() {
            if popup_type == PopupType::Error {
                self.error = None;
            }
            self.popup.clear();
        }
    }
}

use crate::memory::{GbMemory, IO_REGISTERS};
use crate::ui_popup::Popup;
use eframe::egui;
use memedit::{EditorSettings, MemoryEditor};

pub mod colors {
    use eframe::egui::Color32;

    pub const IO_HIGHLIGHT: Color32 = Color32::from_rgba_premultiplied(35, 53, 38, 60);
}

/// Startup options, filled from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bytes per row in every editor
    pub cols: usize,
    /// Forbid edits in the ROM window
    pub read_only_rom: bool,
    /// Open the editors with the data preview shown
    pub preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: 16,
            read_only_rom: false,
            preview: false,
        }
    }
}

pub struct GbViewApp {
    /// ROM and RAM buffers
    pub memory: GbMemory,
    /// File name of the loaded ROM, if any
    pub rom_name: Option<String>,
    /// Editor over the ROM buffer
    pub rom_editor: MemoryEditor,
    /// Editor over the RAM buffer
    pub ram_editor: MemoryEditor,
    /// Editor over the whole bus (ROM overlaid on RAM)
    pub bus_editor: MemoryEditor,
    pub show_rom: bool,
    pub show_ram: bool,
    pub show_bus: bool,
    /// Pop up handler
    pub popup: Popup,
    /// Error to display in the pop-up
    pub error: Option<String>,
}

impl Default for GbViewApp {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl GbViewApp {
    pub fn new(config: &Config) -> Self {
        let settings = EditorSettings::default()
            .with_cols(config.cols)
            .with_data_preview(config.preview);

        let rom_settings = settings.clone().with_read_only(config.read_only_rom);

        let ram_settings = settings
            .clone()
            .with_highlight_color(colors::IO_HIGHLIGHT)
            .with_highlight_fn(|_, addr| IO_REGISTERS.contains(&addr));

        let bus_settings = settings.with_highlight_color(colors::IO_HIGHLIGHT);

        Self {
            memory: GbMemory::default(),
            rom_name: None,
            rom_editor: MemoryEditor::new(rom_settings),
            ram_editor: MemoryEditor::new(ram_settings),
            bus_editor: MemoryEditor::new(bus_settings),
            show_rom: true,
            show_ram: true,
            show_bus: false,
            popup: Popup::default(),
            error: None,
        }
    }

    /// Set the column count of every editor
    pub(crate) fn set_cols(&mut self, cols: usize) {
        for editor in [
            &mut self.rom_editor,
            &mut self.ram_editor,
            &mut self.bus_editor,
        ] {
            editor.settings.cols = cols.max(1);
        }
    }

    /// Column count shared by the editors, if they agree
    pub(crate) fn cols(&self) -> Option<usize> {
        let cols = self.rom_editor.settings.cols;
        (self.ram_editor.settings.cols == cols && self.bus_editor.settings.cols == cols)
            .then_some(cols)
    }

    /// Show the editor windows that are toggled on
    pub(crate) fn show_editors(&mut self, ctx: &egui::Context) {
        let rom_title = self
            .rom_name
            .as_deref()
            .map_or_else(|| "ROM".to_string(), |name| format!("ROM - {name}"));

        self.rom_editor.draw_window(
            ctx,
            &rom_title,
            &mut self.show_rom,
            &mut self.memory.rom,
            0x0000,
        );

        self.ram_editor
            .draw_window(ctx, "RAM", &mut self.show_ram, &mut self.memory.ram, 0x0000);

        egui::Window::new("Memory map")
            .open(&mut self.show_bus)
            .default_height(300.0)
            .show(ctx, |ui| {
                let mem_size = crate::memory::RAM_SIZE;
                self.bus_editor
                    .draw_source(ui, &mut self.memory, mem_size, 0x0000);
            });
    }

    /// Background of the main window
    pub(crate) fn show_central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("GB memory");
            ui.add_space(3.0);
            ui.label(format!(
                "ROM: {} ({} bytes)",
                self.rom_name.as_deref().unwrap_or("<empty>"),
                self.memory.rom.len()
            ));
            ui.label(format!("RAM: {} bytes", self.memory.ram.len()));
            ui.add_space(3.0);
            ui.label("Right-click a grid for its options, type hex digits to edit a byte.");
        });
    }
}

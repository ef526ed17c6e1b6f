use crate::events::collect_ui_events;
use crate::geometry::{FontMetrics, Geometry, StyleMetrics};
use crate::settings::EditorSettings;
use crate::state::EditorState;
use crate::store::{HookedSlice, MemorySource};
use crate::viewport::{StepScrollArea, total_rows};
use std::ops::Range;

/// What a frame of the editor produced
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutput {
    pub geometry: Geometry,
    /// Screen area of the byte grid, scrollbar included
    pub grid_rect: egui::Rect,
    /// Virtualized rows drawn this frame
    pub rows: Range<usize>,
    /// Width the hosting window needs to show the whole grid
    pub required_width: f32,
    /// Column count or ASCII toggle changed this frame
    pub width_changed: bool,
}

/// A memory editor instance. Keep one per displayed store, across frames.
#[derive(Debug, Default)]
pub struct MemoryEditor {
    pub settings: EditorSettings,
    pub state: EditorState,
    /// Width reported by the last frame drawn in a window
    window_width: Option<f32>,
}

impl MemoryEditor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Highlight `[min, max)` and scroll to `min` on the next frame
    pub fn goto_addr_and_highlight(&mut self, min: usize, max: usize) {
        self.state.goto_addr_and_highlight(min, max);
    }

    /// Draw the editor in its own window, sized after the grid
    pub fn draw_window(
        &mut self,
        ctx: &egui::Context,
        title: &str,
        open: &mut bool,
        data: &mut [u8],
        base_display_addr: usize,
    ) -> Option<DrawOutput> {
        let mut window = egui::Window::new(title)
            .open(open)
            .default_height(300.0)
            .resizable(true);

        if let Some(width) = self.window_width {
            window = window.default_width(width).max_width(width);
        }

        let output = window
            .show(ctx, |ui| self.draw_contents(ui, data, base_display_addr))
            .and_then(|response| response.inner);

        if let Some(output) = &output {
            self.window_width = Some(output.required_width);
        }

        output
    }

    /// Draw the editor over a byte slice, using the read / write / highlight hooks from the
    /// settings when they are set
    pub fn draw_contents(
        &mut self,
        ui: &mut egui::Ui,
        data: &mut [u8],
        base_display_addr: usize,
    ) -> DrawOutput {
        let hooks = self.settings.hooks.clone();
        let mem_size = data.len();
        let mut mem = HookedSlice::new(data, &hooks);
        self.draw_source(ui, &mut mem, mem_size, base_display_addr)
    }

    /// Draw the editor over any store of `mem_size` bytes
    pub fn draw_source<M: MemorySource + ?Sized>(
        &mut self,
        ui: &mut egui::Ui,
        mem: &mut M,
        mem_size: usize,
        base_display_addr: usize,
    ) -> DrawOutput {
        self.settings.cols = self.settings.cols.max(1);
        let cols = self.settings.cols;

        let geometry = Geometry::calc(
            &self.settings,
            mem_size,
            base_display_addr,
            font_metrics(ui),
            style_metrics(ui),
        );

        // Requests from the previous frame (API call or goto field)
        self.state.process_goto(mem_size, cols);
        self.state.invalidate(mem_size, self.settings.read_only);

        let events = collect_ui_events(ui);
        let mut frame = self.state.begin_frame(events.nav, cols, mem_size);

        let footer_height = self.footer_height(ui);
        let grid_size = egui::vec2(
            ui.available_width(),
            (ui.available_height() - footer_height).max(geometry.line_height),
        );

        let request = self.state.scroll_request.take();
        let mut top_row = self.state.top_row;

        let (grid_rect, rows) = ui
            .allocate_ui(grid_size, |ui| {
                StepScrollArea::new(ui.id().with("memedit_grid"))
                    .with_request(request)
                    .show_rows(
                        ui,
                        geometry.line_height,
                        total_rows(mem_size, cols),
                        &mut top_row,
                        |ui, rect, rows| {
                            self.state.sync_scroll(&frame, cols, &rows);
                            self.draw_grid(
                                ui,
                                rect,
                                rows.clone(),
                                mem,
                                mem_size,
                                base_display_addr,
                                &geometry,
                                &mut frame,
                                &events,
                            );
                            (rect, rows)
                        },
                    )
            })
            .inner;

        self.state.top_row = top_row;
        self.state.end_frame(&frame, mem_size);

        if self.settings.show_options {
            ui.separator();
            self.draw_options_line(ui, mem_size, base_display_addr, &geometry);
        }

        if self.settings.show_data_preview {
            ui.separator();
            self.draw_preview_line(ui, mem, mem_size);
        }

        DrawOutput {
            geometry,
            grid_rect,
            rows,
            required_width: geometry.window_width,
            width_changed: std::mem::take(&mut self.state.contents_width_changed),
        }
    }

    /// Height reserved below the grid for the options and preview panels
    fn footer_height(&self, ui: &egui::Ui) -> f32 {
        let spacing = ui.spacing();
        let separator = spacing.item_spacing.y * 2.0 + 1.0;
        let frame_height = spacing.interact_size.y + spacing.item_spacing.y;
        let text_height = ui.text_style_height(&egui::TextStyle::Monospace) + spacing.item_spacing.y;

        let mut height = 0.0;
        if self.settings.show_options {
            height += separator + frame_height;
        }
        if self.settings.show_data_preview {
            height += separator + frame_height + text_height * 3.0;
        }
        height
    }
}

/// Advance of one monospace glyph plus a pixel of spacing, and the row height
fn font_metrics(ui: &egui::Ui) -> FontMetrics {
    let font_id = egui::TextStyle::Monospace.resolve(ui.style());
    let galley = ui
        .painter()
        .layout_no_wrap("F".to_string(), font_id, egui::Color32::PLACEHOLDER);

    FontMetrics {
        glyph_width: galley.size().x + 1.0,
        line_height: ui.text_style_height(&egui::TextStyle::Monospace),
    }
}

fn style_metrics(ui: &egui::Ui) -> StyleMetrics {
    StyleMetrics {
        scrollbar_size: ui.spacing().scroll.bar_width,
        window_padding_x: ui.spacing().window_margin.sum().x / 2.0,
    }
}

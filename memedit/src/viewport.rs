//! Viewport virtualization.
//!
//! Only the rows inside the visible band are ever drawn, so the per-frame cost depends on the
//! viewport height and not on the size of the address space.

use crate::state::ScrollRequest;
use egui::Ui;
use std::ops::Range;

/// Total number of grid rows for `mem_size` bytes
pub const fn total_rows(mem_size: usize, cols: usize) -> usize {
    let cols = if cols == 0 { 1 } else { cols };
    mem_size.div_ceil(cols)
}

/// Number of whole rows that fit into `height` pixels
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn visible_row_count(height: f32, line_height: f32) -> usize {
    if line_height <= 0.0 || height <= 0.0 {
        return 0;
    }
    (height / line_height).floor() as usize
}

/// Largest top row that still keeps the last row inside the viewport
pub const fn max_top_row(total_rows: usize, visible_rows: usize) -> usize {
    total_rows.saturating_sub(visible_rows)
}

/// Rows to draw: `[top_row, top_row + visible_rows)`, clipped to the grid
pub fn display_range(top_row: usize, visible_rows: usize, total_rows: usize) -> Range<usize> {
    let start = top_row.min(total_rows);
    start..start.saturating_add(visible_rows).min(total_rows)
}

/// Apply a scroll request from the previous frame to the top row
pub fn apply_scroll(
    top_row: usize,
    request: ScrollRequest,
    total_rows: usize,
    visible_rows: usize,
) -> usize {
    let row = match request {
        ScrollRequest::Rows(delta) => top_row.saturating_add_signed(delta),
        ScrollRequest::Center(row) => row.saturating_sub(visible_rows / 2),
    };
    row.min(max_top_row(total_rows, visible_rows))
}

/// Scroll area that scrolls in discrete row steps and owns no scroll state of its own.
/// The top row lives in the editor state, so scroll requests made during one frame are
/// applied at the start of the next.
pub struct StepScrollArea {
    id: egui::Id,
    request: Option<ScrollRequest>,
}

impl StepScrollArea {
    pub const fn new(id: egui::Id) -> Self {
        Self { id, request: None }
    }

    pub const fn with_request(mut self, request: Option<ScrollRequest>) -> Self {
        self.request = request;
        self
    }

    /// Allocate the remaining space, move `top_row` (pending request, mouse wheel, scrollbar)
    /// and call `add_contents` with the rows that have to be drawn.
    pub fn show_rows<R>(
        self,
        ui: &mut Ui,
        line_height: f32,
        total_rows: usize,
        top_row: &mut usize,
        add_contents: impl FnOnce(&mut Ui, egui::Rect, Range<usize>) -> R,
    ) -> R {
        let mut size = ui.available_size();
        size.y = size.y.max(line_height);
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        let visible_rows = visible_row_count(rect.height(), line_height);

        if let Some(request) = self.request {
            *top_row = apply_scroll(*top_row, request, total_rows, visible_rows);
        }

        // One wheel notch is one row. Ignore small drifts.
        if ui.rect_contains_pointer(rect) {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta.abs() > 0.4 {
                let row_delta = if scroll_delta > 0.0 { -1 } else { 1 };
                *top_row = top_row.saturating_add_signed(row_delta);
            }
        }

        *top_row = (*top_row).min(max_top_row(total_rows, visible_rows));

        draw_custom_scrollbar(ui, rect, top_row, total_rows, visible_rows, self.id);

        let mut child_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect)
                .layout(egui::Layout::top_down(egui::Align::Min)),
        );
        child_ui.set_clip_rect(rect.intersect(ui.clip_rect()));

        let rows = display_range(*top_row, visible_rows, total_rows);
        add_contents(&mut child_ui, rect, rows)
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
fn draw_custom_scrollbar(
    ui: &Ui,
    rect: egui::Rect,
    top_row: &mut usize,
    total_rows: usize,
    visible_rows: usize,
    id: egui::Id,
) {
    if total_rows <= visible_rows {
        return;
    }

    let bar_width = ui.spacing().scroll.bar_width;
    let scrollbar_rect = egui::Rect::from_min_max(
        egui::pos2(rect.right() - bar_width - 2.0, rect.top() + 2.0),
        egui::pos2(rect.right() - 2.0, rect.bottom() - 2.0),
    );

    let max_top_row = max_top_row(total_rows, visible_rows);
    let handle_height =
        ((visible_rows as f32 / total_rows as f32) * scrollbar_rect.height()).max(20.0);
    let travel_range = (scrollbar_rect.height() - handle_height).max(1.0);

    let response = ui.interact(
        scrollbar_rect,
        id.with("bar"),
        egui::Sense::click_and_drag(),
    );
    if (response.clicked() || response.dragged())
        && let Some(pointer_pos) = ui.input(|i| i.pointer.hover_pos())
    {
        // Center the handle on the pointer
        let click_y = pointer_pos.y - scrollbar_rect.top() - handle_height / 2.0;
        let t = (click_y / travel_range).clamp(0.0, 1.0);
        *top_row = (t * max_top_row as f32).round() as usize;
    }

    let progress = *top_row as f32 / max_top_row.max(1) as f32;
    let handle_rect = egui::Rect::from_min_size(
        egui::pos2(
            scrollbar_rect.left(),
            scrollbar_rect.top() + progress * travel_range,
        ),
        egui::vec2(scrollbar_rect.width(), handle_height),
    );

    let handle_color = if response.dragged() {
        ui.visuals().widgets.active.bg_fill
    } else if response.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.inactive.bg_fill
    };

    ui.painter()
        .rect_filled(scrollbar_rect, 2.0, ui.visuals().extreme_bg_color);
    ui.painter().rect_filled(handle_rect, 2.0, handle_color);
}

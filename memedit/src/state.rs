//! Editing state machine.
//!
//! The editor is always in one of three states: nothing selected, an address selected for the
//! preview only, or an address being edited. A frame is processed as a small transaction:
//! [`EditorState::begin_frame`] reads navigation, the grid reports clicks and field activity,
//! and [`EditorState::end_frame`] applies the resulting transition.

use crate::error::{parse_goto_address, parse_hex_byte};
use crate::events::{EventState, NavKey};
use crate::field::HexField;
use crate::preview::{DataType, Endianness};
use crate::store::MemorySource;
use std::ops::Range;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// No address selected
    #[default]
    Idle,
    /// Address shown in the preview, not editable right now
    Selected(usize),
    /// Address with an active edit field (also shown in the preview)
    Editing(usize),
}

impl Cursor {
    pub const fn preview_addr(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Selected(addr) | Self::Editing(addr) => Some(addr),
        }
    }

    pub const fn editing_addr(self) -> Option<usize> {
        match self {
            Self::Editing(addr) => Some(addr),
            _ => None,
        }
    }
}

/// Scroll change requested during one frame, applied at the start of the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Move the top row by this many rows
    Rows(isize),
    /// Bring this row to the middle of the viewport
    Center(usize),
}

/// What the byte edit field reported this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldReport {
    /// Enter was pressed in the field
    pub submitted: bool,
    /// The field holds keyboard focus
    pub active: bool,
    /// The cursor moved past the second digit
    pub complete: bool,
}

/// Decisions collected while drawing one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditFrame {
    /// Editing address at the start of the frame
    backup: Option<usize>,
    /// Address to edit next frame
    next: Option<usize>,
    /// Move to the following byte after a commit
    advance: bool,
}

impl EditFrame {
    pub const fn next(&self) -> Option<usize> {
        self.next
    }
}

/// Internal editor state, mutated every frame
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub(crate) cursor: Cursor,
    /// The edit field grabs keyboard focus on the next draw
    pub(crate) take_focus: bool,
    pub(crate) field: HexField,
    /// Content of the "goto" field
    pub(crate) addr_input: String,
    pub(crate) goto_addr: Option<usize>,
    pub(crate) highlight: Option<Range<usize>>,
    pub(crate) preview_type: DataType,
    pub(crate) preview_endianness: Endianness,
    /// Column count or ASCII toggle changed the required width
    pub(crate) contents_width_changed: bool,
    pub(crate) top_row: usize,
    pub(crate) scroll_request: Option<ScrollRequest>,
}

impl EditorState {
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn preview_addr(&self) -> Option<usize> {
        self.cursor.preview_addr()
    }

    pub const fn editing_addr(&self) -> Option<usize> {
        self.cursor.editing_addr()
    }

    pub const fn take_focus(&self) -> bool {
        self.take_focus
    }

    pub fn highlight_range(&self) -> Option<Range<usize>> {
        self.highlight.clone()
    }

    pub const fn preview_type(&self) -> DataType {
        self.preview_type
    }

    pub const fn set_preview_type(&mut self, data_type: DataType) {
        self.preview_type = data_type;
    }

    pub const fn preview_endianness(&self) -> Endianness {
        self.preview_endianness
    }

    pub const fn set_preview_endianness(&mut self, endianness: Endianness) {
        self.preview_endianness = endianness;
    }

    pub const fn top_row(&self) -> usize {
        self.top_row
    }

    pub const fn scroll_request(&self) -> Option<ScrollRequest> {
        self.scroll_request
    }

    pub const fn field(&self) -> &HexField {
        &self.field
    }

    /// Select `addr` for the preview without editing it
    pub const fn select(&mut self, addr: usize) {
        self.cursor = Cursor::Selected(addr);
    }

    /// Start editing `addr` on the next frame
    pub const fn begin_editing(&mut self, addr: usize) {
        self.cursor = Cursor::Editing(addr);
        self.take_focus = true;
    }

    /// Highlight `[min, max)` and scroll to `min` on the next frame
    pub fn goto_addr_and_highlight(&mut self, min: usize, max: usize) {
        self.goto_addr = Some(min);
        self.highlight = Some(min..max);
    }

    /// Drop addresses that no longer fit the store. Read-only editors never edit.
    pub fn invalidate(&mut self, mem_size: usize, read_only: bool) {
        let before = self.cursor;
        self.cursor = match self.cursor {
            Cursor::Editing(addr) | Cursor::Selected(addr) if addr >= mem_size => Cursor::Idle,
            Cursor::Editing(addr) if read_only => Cursor::Selected(addr),
            other => other,
        };
        if read_only {
            self.take_focus = false;
        }
        if before != self.cursor {
            debug!("Cursor {before:?} reset to {:?} (size 0x{mem_size:X})", self.cursor);
        }
    }

    /// Consume a pending goto. Valid targets are scrolled to and put in edit mode.
    pub fn process_goto(&mut self, mem_size: usize, cols: usize) {
        let Some(addr) = self.goto_addr.take() else {
            return;
        };

        if addr < mem_size {
            debug!("Goto 0x{addr:X}");
            self.scroll_request = Some(ScrollRequest::Center(addr / cols.max(1)));
            self.begin_editing(addr);
        } else {
            debug!("Goto 0x{addr:X} ignored (size 0x{mem_size:X})");
        }
    }

    /// Parse the goto field. Invalid input is ignored.
    pub fn submit_goto_input(&mut self, base_display_addr: usize, mem_size: usize) {
        match parse_goto_address(&self.addr_input, base_display_addr, mem_size) {
            Ok(addr) => {
                self.goto_addr = Some(addr);
                self.highlight = None;
            }
            Err(err) => debug!("{err}"),
        }
    }

    /// Open a frame: arrow keys move the edit address, clamped to the store
    pub fn begin_frame(&mut self, nav: Option<NavKey>, cols: usize, mem_size: usize) -> EditFrame {
        let cols = cols.max(1);
        let backup = self.cursor.editing_addr();

        let next = match (backup, nav) {
            (Some(addr), Some(NavKey::Up)) if addr >= cols => Some(addr - cols),
            (Some(addr), Some(NavKey::Down)) if addr + cols < mem_size => Some(addr + cols),
            (Some(addr), Some(NavKey::Left)) if addr > 0 => Some(addr - 1),
            (Some(addr), Some(NavKey::Right)) if addr + 1 < mem_size => Some(addr + 1),
            _ => None,
        };

        if let Some(addr) = next {
            trace!("Navigate to 0x{addr:X}");
            self.take_focus = true;
        }

        EditFrame {
            backup,
            next,
            advance: false,
        }
    }

    /// Keep the edited byte in view when navigation crosses a row.
    ///
    /// `rows` is the virtualized row range of this frame. Scrolls only when the destination is
    /// within two rows of the edge it is moving towards.
    pub fn sync_scroll(&mut self, frame: &EditFrame, cols: usize, rows: &Range<usize>) {
        let cols = cols.max(1);
        let (Some(next), Some(backup)) = (frame.next, frame.backup) else {
            return;
        };

        let (next_row, backup_row) = (next / cols, backup / cols);
        if next_row == backup_row {
            return;
        }

        let visible_start = rows.start * cols;
        let visible_end = rows.end * cols;

        let scroll_desired = if next_row < backup_row {
            next < visible_start + cols * 2
        } else {
            next > visible_end.saturating_sub(cols * 2)
        };

        if scroll_desired {
            #[allow(clippy::cast_possible_wrap)]
            let offset = next_row as isize - backup_row as isize;
            trace!("Scroll by {offset} row(s)");
            self.scroll_request = Some(ScrollRequest::Rows(offset));
        }
    }

    /// A static byte cell was clicked
    pub const fn click_cell(&mut self, frame: &mut EditFrame, addr: usize, read_only: bool) {
        if read_only {
            return;
        }
        self.take_focus = true;
        frame.next = Some(addr);
    }

    /// A char of the ASCII column was clicked. Selects it immediately.
    pub const fn click_ascii(&mut self, addr: usize) {
        self.begin_editing(addr);
    }

    /// Prepare the edit field for `addr`. Returns `true` if it has to grab focus this frame.
    pub fn open_field(&mut self, initial: String, addr_text: String) -> bool {
        if !self.take_focus {
            return false;
        }
        self.field.reset(initial);
        self.addr_input = addr_text;
        true
    }

    /// Feed this frame's keys into the edit field
    pub(crate) fn type_into_field(&mut self, events: &EventState) {
        if events.backspace_pressed {
            self.field.backspace();
        }
        for &ch in &events.hex_chars {
            self.field.type_char(ch);
        }
    }

    /// Resolve the edit field of `addr` and write the byte when committed
    pub fn close_field<M: MemorySource + ?Sized>(
        &mut self,
        frame: &mut EditFrame,
        addr: usize,
        report: FieldReport,
        mem: &mut M,
    ) {
        let mut write = false;

        if report.submitted {
            write = true;
            frame.advance = true;
        } else if !self.take_focus && !report.active {
            // Focus lost without committing
            self.cursor = Cursor::Selected(addr);
            frame.next = None;
        }
        self.take_focus = false;

        if report.complete {
            write = true;
            frame.advance = true;
        }

        // Navigation wins over a pending commit
        if frame.next.is_some() {
            write = false;
            frame.advance = false;
        }

        if write {
            match parse_hex_byte(self.field.text()) {
                Ok(value) => {
                    debug!("Write 0x{value:02X} at 0x{addr:X}");
                    mem.write_byte(addr, value);
                }
                Err(err) => {
                    debug!("{err}");
                    frame.advance = false;
                }
            }
        }
    }

    /// Apply the transition decided during the frame
    pub fn end_frame(&mut self, frame: &EditFrame, mem_size: usize) {
        if frame.advance
            && let Cursor::Editing(addr) = self.cursor
        {
            if addr + 1 < mem_size {
                self.begin_editing(addr + 1);
            } else {
                self.cursor = Cursor::Idle;
            }
        } else if let Some(next) = frame.next {
            self.begin_editing(next);
        }
    }
}

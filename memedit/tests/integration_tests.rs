use egui::{
    Context, Event, FullOutput, Key, Modifiers, PointerButton, Pos2, RawInput, Rect, Shape, pos2,
    vec2,
};
use memedit::{Cursor, DataType, DrawOutput, EditorSettings, MemoryEditor, MemorySource};

fn raw_input(events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))),
        events,
        ..Default::default()
    }
}

fn key(key: Key) -> Event {
    Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: Modifiers::NONE,
    }
}

/// Press in one frame, release in the next
fn click(pos: Pos2) -> [Vec<Event>; 2] {
    let button = |pressed| Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    };
    [vec![Event::PointerMoved(pos), button(true)], vec![button(false)]]
}

/// Run one full egui pass with the editor in the central panel
#[allow(clippy::expect_used)]
fn run_frame_full(
    ctx: &Context,
    editor: &mut MemoryEditor,
    mem: &mut [u8],
    base: usize,
    events: Vec<Event>,
) -> (DrawOutput, FullOutput) {
    let mut output = None;
    let full = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            output = Some(editor.draw_contents(ui, mem, base));
        });
    });
    (output.expect("Editor should have been drawn"), full)
}

fn run_frame(
    ctx: &Context,
    editor: &mut MemoryEditor,
    mem: &mut [u8],
    base: usize,
    events: Vec<Event>,
) -> DrawOutput {
    run_frame_full(ctx, editor, mem, base, events).0
}

/// All text painted in a frame
fn painted_text(full: &FullOutput) -> Vec<String> {
    fn collect(shape: &Shape, out: &mut Vec<String>) {
        match shape {
            Shape::Text(text) => out.push(text.galley.text().to_owned()),
            Shape::Vec(shapes) => shapes.iter().for_each(|s| collect(s, out)),
            _ => {}
        }
    }

    let mut out = Vec::new();
    for clipped in &full.shapes {
        collect(&clipped.shape, &mut out);
    }
    out
}

#[test]
fn test_frame_is_idempotent() {
    // Arrange
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 0x10000];

    // Act
    let first = run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    let second = run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);

    // Assert
    assert_eq!(first.geometry, second.geometry);
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.rows.start, 0);
    assert!(!first.rows.is_empty());
    assert_eq!(editor.state.cursor(), Cursor::Idle);
}

#[test]
fn test_rows_are_virtualized() {
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 1 << 24];

    let output = run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);

    // 600px of screen can never show a million rows
    assert!(output.rows.len() < 100);
    assert_eq!(output.geometry.addr_digits_count, 6);
}

#[test]
fn test_goto_then_type_hex() {
    // Arrange
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 0x1000];

    // Act
    editor.goto_addr_and_highlight(0x800, 0x801);
    let output = run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![key(Key::F), key(Key::F)]);

    // Assert
    assert!(output.rows.contains(&(0x800 / 16)));
    assert_eq!(mem[0x800], 0xFF);
    assert_eq!(editor.state.cursor(), Cursor::Editing(0x801));
    assert!(mem.iter().enumerate().all(|(i, &b)| i == 0x800 || b == 0));
}

#[test]
fn test_arrow_navigation() {
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 0x100];

    editor.goto_addr_and_highlight(0x10, 0x11);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![key(Key::ArrowDown)]);
    assert_eq!(editor.state.cursor(), Cursor::Editing(0x20));

    run_frame(&ctx, &mut editor, &mut mem, 0, vec![key(Key::ArrowLeft)]);
    assert_eq!(editor.state.cursor(), Cursor::Editing(0x1F));

    // Nothing was written on the way
    assert!(mem.iter().all(|&b| b == 0));
}

#[test]
fn test_read_only_blocks_writes() {
    // Arrange
    let ctx = Context::default();
    let mut editor = MemoryEditor::new(EditorSettings::default().with_read_only(true));
    let mut mem = vec![0x11u8; 0x100];

    // Act
    editor.goto_addr_and_highlight(0x40, 0x48);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![key(Key::A), key(Key::B)]);

    // Assert
    assert!(mem.iter().all(|&b| b == 0x11));
    assert_eq!(editor.state.cursor(), Cursor::Selected(0x40));
    assert_eq!(editor.state.highlight_range(), Some(0x40..0x48));
}

#[test]
fn test_shrunk_store_resets_cursor() {
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 0x100];

    editor.goto_addr_and_highlight(0xF0, 0xF1);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    assert_eq!(editor.state.cursor(), Cursor::Editing(0xF0));

    mem.truncate(0x80);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    assert_eq!(editor.state.cursor(), Cursor::Idle);
}

#[test]
fn test_write_hook_receives_commit() {
    // Arrange: writes land XOR-ed so the hook is observable
    let ctx = Context::default();
    let settings = EditorSettings::default()
        .with_write_fn(|data: &mut [u8], addr: usize, value: u8| data[addr] = value ^ 0xFF);
    let mut editor = MemoryEditor::new(settings);
    let mut mem = vec![0u8; 0x40];

    // Act
    editor.goto_addr_and_highlight(0x3, 0x4);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![key(Key::Num0), key(Key::F)]);

    // Assert
    assert_eq!(mem[0x3], 0xF0);
}

/// Store reporting its own highlight and counting writes
struct CountingStore {
    data: Vec<u8>,
    writes: usize,
}

impl MemorySource for CountingStore {
    fn read_byte(&self, addr: usize) -> u8 {
        self.data[addr]
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        self.writes += 1;
        self.data[addr] = value;
    }

    fn is_highlighted(&self, addr: usize) -> bool {
        addr % 2 == 0
    }
}

#[test]
fn test_custom_source_with_base_address() {
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut store = CountingStore {
        data: vec![0u8; 0x100],
        writes: 0,
    };

    editor.goto_addr_and_highlight(0x7F, 0x80);
    for events in [vec![], vec![key(Key::Num1), key(Key::Num2)]] {
        let _ = ctx.run(raw_input(events), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let output = editor.draw_source(ui, &mut store, 0x100, 0xFF00);
                assert_eq!(output.geometry.addr_digits_count, 4);
            });
        });
    }

    assert_eq!(store.writes, 1);
    assert_eq!(store.data[0x7F], 0x12);
    assert_eq!(editor.state.cursor(), Cursor::Editing(0x80));
}

#[test]
fn test_click_selects_cell() {
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 0x10000];

    let output = run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    let g = output.geometry;
    let pos = output.grid_rect.left_top()
        + vec2(g.byte_pos_x(3, editor.settings.mid_cols_count) + 1.0, g.line_height * 2.5);
    for events in click(pos) {
        run_frame(&ctx, &mut editor, &mut mem, 0, events);
    }

    assert_eq!(editor.state.cursor(), Cursor::Editing(0x23));
}

#[test]
fn test_click_below_last_row_is_ignored() {
    // Arrange
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 0x10000];

    // Act: click into the partial band under the last drawn row
    let output = run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    let g = output.geometry;
    #[allow(clippy::cast_precision_loss)]
    let band_y = output.rows.len() as f32 * g.line_height + 0.5;
    let pos = output.grid_rect.left_top()
        + vec2(g.byte_pos_x(0, editor.settings.mid_cols_count) + 1.0, band_y);
    let mut last = output;
    for events in click(pos) {
        last = run_frame(&ctx, &mut editor, &mut mem, 0, events);
    }

    // Assert
    assert_eq!(editor.state.cursor(), Cursor::Idle);
    assert_eq!(last.rows, 0..last.rows.len());
}

#[test]
fn test_preview_panel_follows_selection() {
    // Arrange
    let ctx = Context::default();
    let mut editor = MemoryEditor::new(EditorSettings::default().with_data_preview(true));
    editor.state.set_preview_type(DataType::U8);
    let mut mem = vec![0u8; 0x100];

    // Act: nothing selected yet
    let (output, full) = run_frame_full(&ctx, &mut editor, &mut mem, 0, vec![]);
    let idle_text = painted_text(&full);

    // Write FF at 0x10, then select it again through the ASCII column
    editor.goto_addr_and_highlight(0x10, 0x11);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![]);
    run_frame(&ctx, &mut editor, &mut mem, 0, vec![key(Key::F), key(Key::F)]);

    let g = output.geometry;
    let pos = output.grid_rect.left_top()
        + vec2(g.pos_ascii_start + g.glyph_width * 0.5, g.line_height * 1.5);
    let [press, release] = click(pos);
    run_frame(&ctx, &mut editor, &mut mem, 0, press);
    let (_, full) = run_frame_full(&ctx, &mut editor, &mut mem, 0, release);
    let selected_text = painted_text(&full);

    // Assert
    for line in ["Dec N/A", "Hex N/A", "Bin N/A"] {
        assert!(idle_text.iter().any(|t| t == line), "missing {line:?}");
    }
    assert_eq!(mem[0x10], 0xFF);
    assert_eq!(editor.state.preview_addr(), Some(0x10));
    assert!(selected_text.iter().any(|t| t == "Dec 255"));
    assert!(selected_text.iter().any(|t| t == "Hex 0xff"));
}

#[test]
fn test_base_address_near_end_of_address_space() {
    let ctx = Context::default();
    let mut editor = MemoryEditor::default();
    let mut mem = vec![0u8; 0x100];

    let output = run_frame(&ctx, &mut editor, &mut mem, usize::MAX - 0x10, vec![]);

    assert_eq!(output.geometry.addr_digits_count, usize::BITS as usize / 4);
    assert!(!output.rows.is_empty());
}

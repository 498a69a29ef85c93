//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each grid cell is drawn `cell_w` columns wide. The middle column carries
//! the pipe glyph; the side columns carry the horizontal connectors so that
//! neighbouring pipes visibly join up.

use crate::core::pipes::connections;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellState, Direction, GameStatus, PipeKind, Position, MIN_LENGTH};

const BACKGROUND: Rgb = Rgb::new(26, 26, 46);
const GRID_DOT: Rgb = Rgb::new(61, 61, 92);
const PIPE: Rgb = Rgb::new(74, 144, 217);
const WATER: Rgb = Rgb::new(0, 191, 255);
const ENTRY: Rgb = Rgb::new(0, 255, 0);
const FLOOD: Rgb = Rgb::new(255, 68, 68);
const CURSOR_OK: Rgb = Rgb::new(70, 70, 110);
const CURSOR_BLOCKED: Rgb = Rgb::new(90, 40, 50);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const WARNING: Rgb = Rgb::new(255, 170, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame lands inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the pipe game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1: connector, glyph, connector.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, grid_w: u8, grid_h: u8, viewport: Viewport) -> BoardLayout {
        let frame_w = (grid_w as u16) * self.cell_w + 2;
        let frame_h = (grid_h as u16) * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Map a terminal column/row (mouse click) to a grid cell.
    pub fn cell_at(
        &self,
        grid_w: u8,
        grid_h: u8,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> Option<Position> {
        let layout = self.layout(grid_w, grid_h, viewport);
        let inner_x = col.checked_sub(layout.start_x + 1)?;
        let inner_y = row.checked_sub(layout.start_y + 1)?;
        let x = inner_x / self.cell_w;
        let y = inner_y / self.cell_h;
        if x >= grid_w as u16 || y >= grid_h as u16 {
            return None;
        }
        Some(Position::new(x as i8, y as i8))
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap.width, snap.height, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(GRID_DOT, BACKGROUND),
        );
        self.draw_border(fb, layout, border);

        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                let bg = match cursor {
                    Some(c) if c == Position::new(x, y) && snap.playable() => {
                        let open = snap
                            .cell(x, y)
                            .map_or(false, |cell| cell.state == CellState::Empty);
                        if open {
                            CURSOR_OK
                        } else {
                            CURSOR_BLOCKED
                        }
                    }
                    _ => BACKGROUND,
                };
                self.draw_cell(fb, snap, layout, x, y, bg);
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.status {
            GameStatus::Waiting => self.draw_countdown(fb, layout, snap.countdown_ms),
            GameStatus::Playing if snap.paused => {
                self.draw_overlay_text(fb, layout, "PAUSED", WARNING);
            }
            GameStatus::Playing => {}
            GameStatus::Won => {
                self.draw_overlay_text(fb, layout, "LEVEL COMPLETE", ENTRY);
                self.draw_overlay_score(fb, layout, snap.score);
            }
            GameStatus::Flooded => {
                self.draw_overlay_text(fb, layout, "FLOODED", FLOOD);
                self.draw_overlay_score(fb, layout, snap.score);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
        let BoardLayout {
            start_x: x,
            start_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        layout: BoardLayout,
        x: i8,
        y: i8,
        bg: Rgb,
    ) {
        let Some(cell) = snap.cell(x, y) else {
            return;
        };
        let px = layout.start_x + 1 + (x as u16) * self.cell_w;
        let py = layout.start_y + 1 + (y as u16) * self.cell_h;
        let mid_x = px + self.cell_w / 2;
        let mid_y = py + self.cell_h / 2;

        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(GRID_DOT, bg));

        match cell.state {
            CellState::Empty => {
                fb.put_char(mid_x, mid_y, '·', CellStyle::new(GRID_DOT, bg).dim());
            }
            CellState::Entry => {
                let style = CellStyle::new(ENTRY, bg).bold();
                fb.put_char(mid_x, mid_y, '▶', style);
                for cx in mid_x + 1..px + self.cell_w {
                    fb.put_char(cx, mid_y, '━', style);
                }
            }
            CellState::Flooded => {
                let style = CellStyle::new(FLOOD, bg).bold();
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '≈', style);
            }
            CellState::Pipe => {
                let Some(kind) = cell.pipe else {
                    return;
                };
                let head = snap.status == GameStatus::Playing && snap.head == Position::new(x, y);
                let mut style = if cell.filled {
                    CellStyle::new(WATER, bg).bold()
                } else {
                    CellStyle::new(PIPE, bg)
                };
                if head {
                    style = style.on(Rgb::new(20, 60, 90));
                }
                let sides = connections(kind);
                let horizontal = if cell.filled { '━' } else { '─' };
                let vertical = if cell.filled { '┃' } else { '│' };

                fb.put_char(mid_x, mid_y, pipe_glyph(kind, cell.filled), style);
                if sides.contains(&Direction::Left) {
                    for cx in px..mid_x {
                        fb.put_char(cx, mid_y, horizontal, style);
                    }
                }
                if sides.contains(&Direction::Right) {
                    for cx in mid_x + 1..px + self.cell_w {
                        fb.put_char(cx, mid_y, horizontal, style);
                    }
                }
                if sides.contains(&Direction::Top) {
                    for cy in py..mid_y {
                        fb.put_char(mid_x, cy, vertical, style);
                    }
                }
                if sides.contains(&Direction::Bottom) {
                    for cy in mid_y + 1..py + self.cell_h {
                        fb.put_char(mid_x, cy, vertical, style);
                    }
                }
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let muted = CellStyle::new(Rgb::new(136, 136, 136), PANEL_BG);

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "LENGTH", label);
        y += 1;
        let length_style = if snap.length >= MIN_LENGTH {
            CellStyle::new(ENTRY, PANEL_BG)
        } else {
            value
        };
        let x = fb.put_u32(panel_x, y, snap.length, length_style);
        let x = fb.put_str(x, y, "/", muted);
        fb.put_u32(x, y, MIN_LENGTH, muted);
        y += 2;

        fb.put_str(panel_x, y, "DISCARDS", label);
        y += 1;
        let discard_style = if snap.discards == 0 {
            CellStyle::new(FLOOD, PANEL_BG)
        } else {
            value
        };
        fb.put_u32(panel_x, y, snap.discards, discard_style);
        y += 2;

        match snap.status {
            GameStatus::Waiting => {
                fb.put_str(panel_x, y, "WATER IN", label);
                y += 1;
                let secs = snap.countdown_ms.div_ceil(1000);
                let x = fb.put_u32(panel_x, y, secs, CellStyle::new(WARNING, PANEL_BG).bold());
                fb.put_str(x, y, "s", muted);
            }
            _ => {
                fb.put_str(panel_x, y, "FLOW", label);
                y += 1;
                let x = fb.put_u32(panel_x, y, snap.flow_interval_ms, value);
                fb.put_str(x, y, "ms", muted);
            }
        }
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for (i, kind) in snap.queue.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let style = if i == 0 {
                CellStyle::new(PIPE, PANEL_BG).bold()
            } else {
                CellStyle::new(PIPE, PANEL_BG)
            };
            fb.put_char(panel_x, y, pipe_glyph(*kind, false), style);
            if panel_w >= 16 {
                fb.put_str(panel_x + 2, y, kind.as_str(), if i == 0 { value } else { muted });
            }
            y += 1;
        }

        if snap.status.is_terminal() && y + 1 < viewport.height {
            y += 1;
            fb.put_str(panel_x, y, "r: restart", muted);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: BoardLayout, text: &str, fg: Rgb) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, CellStyle::new(fg, PANEL_BG).bold());
    }

    fn draw_overlay_score(&self, fb: &mut FrameBuffer, layout: BoardLayout, score: u32) {
        let y = layout.start_y.saturating_add(layout.frame_h / 2 + 1);
        let w = 7 + digit_count(score);
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(w) / 2);
        let style = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
        let x = fb.put_str(x, y, "SCORE ", style);
        fb.put_u32(x, y, score, style.bold());
    }

    /// Seconds left, centered on the top border.
    fn draw_countdown(&self, fb: &mut FrameBuffer, layout: BoardLayout, countdown_ms: u32) {
        let secs = countdown_ms.div_ceil(1000);
        let w = 10 + digit_count(secs);
        if layout.frame_w < w + 2 {
            return;
        }
        let x = layout.start_x + (layout.frame_w - w) / 2;
        let style = CellStyle::new(WARNING, PANEL_BG).bold();
        let x = fb.put_str(x, layout.start_y, " WATER ", style);
        let x = fb.put_u32(x, layout.start_y, secs, style);
        fb.put_str(x, layout.start_y, "s ", style);
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Box-drawing glyph for a pipe; heavy lines once water is inside.
pub fn pipe_glyph(kind: PipeKind, filled: bool) -> char {
    match (kind, filled) {
        (PipeKind::Horizontal, false) => '─',
        (PipeKind::Horizontal, true) => '━',
        (PipeKind::Vertical, false) => '│',
        (PipeKind::Vertical, true) => '┃',
        (PipeKind::ElbowTl, false) => '┘',
        (PipeKind::ElbowTl, true) => '┛',
        (PipeKind::ElbowTr, false) => '└',
        (PipeKind::ElbowTr, true) => '┗',
        (PipeKind::ElbowBl, false) => '┐',
        (PipeKind::ElbowBl, true) => '┓',
        (PipeKind::ElbowBr, false) => '┌',
        (PipeKind::ElbowBr, true) => '┏',
        (PipeKind::Cross, false) => '┼',
        (PipeKind::Cross, true) => '╋',
        (PipeKind::TTop, false) => '┴',
        (PipeKind::TTop, true) => '┻',
        (PipeKind::TBottom, false) => '┬',
        (PipeKind::TBottom, true) => '┳',
        (PipeKind::TLeft, false) => '┤',
        (PipeKind::TLeft, true) => '┫',
        (PipeKind::TRight, false) => '├',
        (PipeKind::TRight, true) => '┣',
    }
}

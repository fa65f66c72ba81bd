//! Paint tools - the state machine turning pointer gestures into grid edits

use walkmap_core::{cell_at_pointer, MapDocument, TileState, ViewportRect, WalkGrid};

/// The active paint tool.
///
/// Brush carries its pressed flag inside the variant so "pressed while not
/// in Brush mode" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Click flips a cell between Walkable and Blocked
    Toggle,
    /// Drag-paints cells Walkable while the pointer is held down
    Brush { pressed: bool },
    /// Click sets a single cell to Blocked
    Erase,
    /// Sets the whole grid to the target state on entry
    FillAll(TileState),
}

/// Translates pointer gestures into [`MapDocument`] grid mutations.
///
/// Events with no documented handler for the current mode are no-ops, as is
/// any pointer position that maps outside the grid.
#[derive(Debug)]
pub struct PaintController {
    mode: PaintMode,
}

impl PaintController {
    /// Initial tool on entering editing is Toggle
    pub fn new() -> PaintController {
        PaintController {
            mode: PaintMode::Toggle,
        }
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    /// Switch tools unconditionally, abandoning any in-progress brush press
    /// without finalizing it. Entering FillAll applies the fill immediately
    /// as a single whole-grid replacement - no confirmation step.
    pub fn change_mode(&mut self, mode: PaintMode, document: &mut MapDocument) {
        self.mode = mode;
        if let PaintMode::FillAll(target) = mode {
            document.grid = WalkGrid::filled(target);
        }
    }

    /// A discrete click at pointer position `(px, py)`.
    ///
    /// Toggle flips the cell; Erase sets it to Blocked. Erase is
    /// intentionally single-cell-per-click and does not drag-paint the way
    /// Brush does; unifying the two is a product decision (see DESIGN.md).
    /// Other modes ignore clicks.
    pub fn click(&self, document: &mut MapDocument, viewport: &ViewportRect, px: f64, py: f64) {
        let Some(cell) = self.map(document, viewport, px, py) else {
            return;
        };
        match self.mode {
            PaintMode::Toggle => {
                let flipped = document.grid.get(cell).toggled();
                document.grid = document.grid.set(cell, flipped);
            }
            PaintMode::Erase => {
                document.grid = document.grid.set(cell, TileState::Blocked);
            }
            PaintMode::Brush { .. } | PaintMode::FillAll(_) => {}
        }
    }

    /// Pointer pressed: arms the brush when in Brush mode
    pub fn pointer_down(&mut self) {
        if self.mode == (PaintMode::Brush { pressed: false }) {
            self.mode = PaintMode::Brush { pressed: true };
        }
    }

    /// Pointer released: disarms the brush
    pub fn pointer_up(&mut self) {
        if self.mode == (PaintMode::Brush { pressed: true }) {
            self.mode = PaintMode::Brush { pressed: false };
        }
    }

    /// Pointer cancel/leave: also disarms the brush, so a stroke that ends
    /// outside the viewport cannot leave painting stuck on.
    pub fn pointer_cancel(&mut self) {
        self.pointer_up();
    }

    /// Pointer moved. While the brush is pressed, paints the cell under the
    /// pointer Walkable (a paint, not a toggle). Fires at pointer-event
    /// frequency, so this stays O(1) per call.
    pub fn pointer_move(
        &self,
        document: &mut MapDocument,
        viewport: &ViewportRect,
        px: f64,
        py: f64,
    ) {
        if self.mode != (PaintMode::Brush { pressed: true }) {
            return;
        }
        if let Some(cell) = self.map(document, viewport, px, py) {
            document.grid = document.grid.set(cell, TileState::Walkable);
        }
    }

    fn map(
        &self,
        document: &MapDocument,
        viewport: &ViewportRect,
        px: f64,
        py: f64,
    ) -> Option<walkmap_core::CellIndex> {
        cell_at_pointer(
            px,
            py,
            viewport,
            document.pan_offset_x,
            document.pan_offset_y,
            document.zoom_scale,
        )
    }
}

impl Default for PaintController {
    fn default() -> Self {
        PaintController::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkmap_core::CellIndex;

    fn setup() -> (PaintController, MapDocument, ViewportRect) {
        (
            PaintController::new(),
            MapDocument::new(),
            ViewportRect::new(0.0, 0.0, 800.0, 600.0),
        )
    }

    /// Pointer position at the center of (row, col) with the identity view
    fn center_of(row: usize, col: usize) -> (f64, f64) {
        (col as f64 * 16.0 + 8.0, row as f64 * 16.0 + 8.0)
    }

    #[test]
    fn test_initial_mode_is_toggle() {
        let (controller, _, _) = setup();
        assert_eq!(controller.mode(), PaintMode::Toggle);
    }

    #[test]
    fn test_toggle_click_flips_and_is_idempotent_over_two() {
        let (controller, mut doc, vp) = setup();
        let cell = CellIndex::new(2, 5).unwrap();
        let (px, py) = center_of(2, 5);

        controller.click(&mut doc, &vp, px, py);
        assert_eq!(doc.grid.get(cell), TileState::Walkable);

        controller.click(&mut doc, &vp, px, py);
        assert_eq!(doc.grid.get(cell), TileState::Blocked);
    }

    #[test]
    fn test_click_outside_grid_is_noop() {
        let (controller, mut doc, vp) = setup();
        controller.click(&mut doc, &vp, -5.0, -5.0);
        controller.click(&mut doc, &vp, 10_000.0, 10.0);
        assert_eq!(doc.grid, WalkGrid::default());
    }

    #[test]
    fn test_erase_click_sets_single_cell_blocked() {
        let (mut controller, mut doc, vp) = setup();
        doc.grid = WalkGrid::filled(TileState::Walkable);
        controller.change_mode(PaintMode::Erase, &mut doc);

        let (px, py) = center_of(3, 3);
        controller.click(&mut doc, &vp, px, py);

        let erased = CellIndex::new(3, 3).unwrap();
        assert_eq!(doc.grid.get(erased), TileState::Blocked);
        for cell in WalkGrid::indices() {
            if cell != erased {
                assert_eq!(doc.grid.get(cell), TileState::Walkable);
            }
        }
    }

    #[test]
    fn test_erase_does_not_drag_paint() {
        let (mut controller, mut doc, vp) = setup();
        doc.grid = WalkGrid::filled(TileState::Walkable);
        controller.change_mode(PaintMode::Erase, &mut doc);

        controller.pointer_down();
        let (px, py) = center_of(1, 1);
        controller.pointer_move(&mut doc, &vp, px, py);
        controller.pointer_up();

        assert_eq!(doc.grid, WalkGrid::filled(TileState::Walkable));
    }

    #[test]
    fn test_brush_drag_paints_visited_cells() {
        let (mut controller, mut doc, vp) = setup();
        controller.change_mode(PaintMode::Brush { pressed: false }, &mut doc);

        controller.pointer_down();
        for (row, col) in [(0, 0), (0, 1), (1, 1)] {
            let (px, py) = center_of(row, col);
            controller.pointer_move(&mut doc, &vp, px, py);
        }
        controller.pointer_up();

        for cell in WalkGrid::indices() {
            let visited = matches!((cell.row(), cell.col()), (0, 0) | (0, 1) | (1, 1));
            let expected = if visited {
                TileState::Walkable
            } else {
                TileState::Blocked
            };
            assert_eq!(doc.grid.get(cell), expected);
        }
    }

    #[test]
    fn test_brush_move_without_press_is_noop() {
        let (mut controller, mut doc, vp) = setup();
        controller.change_mode(PaintMode::Brush { pressed: false }, &mut doc);

        let (px, py) = center_of(0, 0);
        controller.pointer_move(&mut doc, &vp, px, py);
        assert_eq!(doc.grid, WalkGrid::default());
    }

    #[test]
    fn test_brush_paint_is_not_a_toggle() {
        let (mut controller, mut doc, vp) = setup();
        controller.change_mode(PaintMode::Brush { pressed: false }, &mut doc);
        controller.pointer_down();

        let cell = CellIndex::new(0, 0).unwrap();
        let (px, py) = center_of(0, 0);
        controller.pointer_move(&mut doc, &vp, px, py);
        controller.pointer_move(&mut doc, &vp, px, py);
        assert_eq!(doc.grid.get(cell), TileState::Walkable);
    }

    #[test]
    fn test_pointer_cancel_disarms_brush() {
        let (mut controller, mut doc, vp) = setup();
        controller.change_mode(PaintMode::Brush { pressed: false }, &mut doc);
        controller.pointer_down();
        assert_eq!(controller.mode(), PaintMode::Brush { pressed: true });

        controller.pointer_cancel();
        assert_eq!(controller.mode(), PaintMode::Brush { pressed: false });

        let (px, py) = center_of(0, 0);
        controller.pointer_move(&mut doc, &vp, px, py);
        assert_eq!(doc.grid, WalkGrid::default());
    }

    #[test]
    fn test_pointer_down_in_other_modes_is_noop() {
        let (mut controller, mut doc, _) = setup();
        controller.pointer_down();
        assert_eq!(controller.mode(), PaintMode::Toggle);

        controller.change_mode(PaintMode::Erase, &mut doc);
        controller.pointer_down();
        assert_eq!(controller.mode(), PaintMode::Erase);
    }

    #[test]
    fn test_change_mode_abandons_brush_press() {
        let (mut controller, mut doc, _) = setup();
        controller.change_mode(PaintMode::Brush { pressed: false }, &mut doc);
        controller.pointer_down();

        controller.change_mode(PaintMode::Toggle, &mut doc);
        assert_eq!(controller.mode(), PaintMode::Toggle);

        // Returning to Brush starts unpressed
        controller.change_mode(PaintMode::Brush { pressed: false }, &mut doc);
        assert_eq!(controller.mode(), PaintMode::Brush { pressed: false });
    }

    #[test]
    fn test_fill_all_applies_on_entry() {
        let (mut controller, mut doc, _) = setup();
        controller.change_mode(PaintMode::FillAll(TileState::Walkable), &mut doc);
        assert_eq!(doc.grid, WalkGrid::filled(TileState::Walkable));

        controller.change_mode(PaintMode::FillAll(TileState::Blocked), &mut doc);
        assert_eq!(doc.grid, WalkGrid::default());
    }
}

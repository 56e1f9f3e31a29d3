//! The grid orchestrator.
//!
//! [`GridView`] owns the row count and column list, holds at most one
//! attached controller of each kind, translates pointer input into
//! controller calls, and accumulates the dirty-cell region the renderer
//! drains through [`GridView::take_dirty_region`]. It never paints or
//! measures anything itself: geometry goes through the [`GridMetrics`]
//! seam and painting through each column's renderers.
//!
//! Controller change signals are bridged to dirty-region updates here.
//! Each watcher closure captures only the shared [`GridLink`] (plus its
//! own cache), never the controller it observes, so notifications cannot
//! re-enter a controller that is mid-mutation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use quadrille_core::logging::targets;
use quadrille_core::{ConnectionId, ListenerId, Signal};

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::model::{
    CellRange, Column, EditBehavior, EditListener, EditOutcome, EditorController, RangeSet,
    RowDisablerController, RowPredicate, SelectionController, SelectionMode, SortController,
    SortEvent, SortMode, Span,
};
use crate::view::events::{KeyboardModifiers, PointerEvent};
use crate::view::link::GridLink;
use crate::view::metrics::GridMetrics;
use crate::view::render::{CellState, PaintSurface};

struct SelectionBinding {
    controller: Rc<RefCell<SelectionController>>,
    connection: ConnectionId,
}

struct SortBinding {
    controller: Rc<RefCell<SortController>>,
    connection: ConnectionId,
}

struct DisablerBinding {
    controller: Rc<RefCell<RowDisablerController>>,
    connection: ConnectionId,
}

struct EditorBinding {
    controller: Rc<RefCell<EditorController>>,
    listener: ListenerId,
}

/// Marks the edited region dirty when an edit starts or ends.
///
/// Registered on the attached editor by the grid. Runs inside the editor's
/// notification fan-out, so it reads the edit scope through the shared
/// behavior cell rather than the controller.
struct EditRegionInvalidator {
    link: Rc<GridLink>,
    behavior: Rc<Cell<EditBehavior>>,
}

impl EditRegionInvalidator {
    fn invalidate(&self, row: usize, column: usize) {
        match self.behavior.get() {
            EditBehavior::None => {}
            EditBehavior::SingleCell => self.link.mark_cells_dirty(CellRange::single(row, column)),
            EditBehavior::WholeRow => self.link.mark_rows_dirty(row, row),
        }
    }
}

impl EditListener for EditRegionInvalidator {
    fn edit_started(&self, row: usize, column: usize) {
        self.invalidate(row, column);
    }

    fn edit_finished(&self, row: usize, column: usize, _outcome: EditOutcome) {
        self.invalidate(row, column);
    }
}

/// Coordinates selection, sort, editing, and row disabling for one grid.
pub struct GridView {
    link: Rc<GridLink>,
    selection: Option<SelectionBinding>,
    sort: Option<SortBinding>,
    editor: Option<EditorBinding>,
    disabler: Option<DisablerBinding>,
    metrics: Option<Box<dyn GridMetrics>>,
    highlighted_row: Option<usize>,
    /// Row remembered on a plain press, pending the release-time collapse
    /// heuristic.
    drag_candidate: Option<usize>,
    /// Single-slot deferred action: clear the highlighted row on the next
    /// layout pass. Repeated deferrals coalesce into one.
    pending_highlight_clear: bool,
    /// Nested navigation pushes currently suspending global capture.
    nav_depth: usize,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

impl GridView {
    pub fn new() -> Self {
        Self {
            link: Rc::new(GridLink::new()),
            selection: None,
            sort: None,
            editor: None,
            disabler: None,
            metrics: None,
            highlighted_row: None,
            drag_candidate: None,
            pending_highlight_clear: false,
            nav_depth: 0,
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn row_count(&self) -> usize {
        self.link.row_count()
    }

    /// Change the number of rows. Force-cancels any in-progress edit and
    /// marks the whole grid dirty. No-op if the count is unchanged.
    pub fn set_row_count(&mut self, count: usize) {
        if count == self.link.row_count() {
            return;
        }
        tracing::debug!(target: targets::GRID, count, "row count changed");
        self.link.force_cancel_edit();
        self.link.set_row_count(count);
        self.link.mark_all_dirty();
    }

    pub fn column_count(&self) -> usize {
        self.link.column_count()
    }

    pub fn columns(&self) -> Vec<Column> {
        self.link.with_columns(|columns| columns.to_vec())
    }

    /// Replace the column list. Force-cancels any in-progress edit and
    /// marks the whole grid dirty. No-op if the new list is structurally
    /// identical to the current one.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        if self.link.with_columns(|current| *current == columns) {
            return;
        }
        tracing::debug!(target: targets::GRID, count = columns.len(), "columns changed");
        self.link.force_cancel_edit();
        self.link.with_columns_mut(|current| *current = columns);
        self.link.mark_all_dirty();
    }

    /// Resize a fixed-width column, clamping to its `[min, max]` bounds.
    ///
    /// Invoked by drag-delta accumulation in the presentation layer, which
    /// cannot pre-validate its target; this is the one recoverable boundary.
    pub fn resize_column(&mut self, index: usize, width: f32) -> Result<()> {
        let count = self.link.column_count();
        if index >= count {
            return Err(Error::column_out_of_range(index, count));
        }
        self.link.with_columns_mut(|columns| {
            let column = &mut columns[index];
            if !column.is_resizable() {
                return Err(Error::column_not_resizable(column.key()));
            }
            column.set_fixed_width(width);
            Ok(())
        })?;
        self.link.mark_column_dirty(index);
        Ok(())
    }

    /// Supply the layout geometry provider. Pointer events arriving before
    /// this is set are ignored.
    pub fn set_metrics(&mut self, metrics: impl GridMetrics + 'static) {
        self.metrics = Some(Box::new(metrics));
    }

    // =========================================================================
    // Controller attachment
    // =========================================================================

    /// Attach (or with `None`, detach) the selection controller.
    /// Reassignment detaches the previous controller first.
    pub fn set_selection_controller(
        &mut self,
        controller: Option<Rc<RefCell<SelectionController>>>,
    ) {
        if let Some(previous) = self.selection.take() {
            let controller = previous.controller.borrow();
            controller.changed.disconnect(previous.connection);
            self.mark_selection_dirty(controller.selected_ranges());
            drop(controller);
            previous.controller.borrow_mut().detach();
        }
        let Some(controller) = controller else { return };

        controller.borrow_mut().attach(Rc::clone(&self.link));
        let link = Rc::clone(&self.link);
        let previous = RefCell::new(controller.borrow().selected_ranges().clone());
        let connection = controller.borrow().changed.connect(move |current: &RangeSet| {
            // Minimal repaint: only the rows whose membership flipped.
            let delta = previous.borrow().symmetric_difference(current);
            for span in delta.spans() {
                link.mark_rows_dirty(span.start, span.end);
            }
            *previous.borrow_mut() = current.clone();
        });
        self.mark_selection_dirty(controller.borrow().selected_ranges());
        self.selection = Some(SelectionBinding {
            controller,
            connection,
        });
    }

    /// Attach (or detach) the sort controller. Force-cancels any edit; the
    /// cached sorted-column set lives in the watcher closure, so replacing
    /// the controller starts it from the new controller's contents.
    pub fn set_sort_controller(&mut self, controller: Option<Rc<RefCell<SortController>>>) {
        self.link.force_cancel_edit();
        if let Some(previous) = self.sort.take() {
            previous.controller.borrow().changed.disconnect(previous.connection);
            previous.controller.borrow_mut().detach();
        }
        let Some(controller) = controller else { return };

        controller.borrow_mut().attach(Rc::clone(&self.link));
        let link = Rc::clone(&self.link);
        let cached = RefCell::new(controller.borrow().keys());
        let connection = controller.borrow().changed.connect(move |event: &SortEvent| {
            let mark = |key: &str| {
                if let Some(index) = link.column_index_of(key) {
                    link.mark_column_dirty(index);
                }
            };
            let mut cached = cached.borrow_mut();
            match event {
                SortEvent::Added { key, .. } => {
                    mark(key);
                    cached.push(key.clone());
                }
                SortEvent::Updated { key, direction, .. } => {
                    mark(key);
                    if direction.is_none() {
                        cached.retain(|cached_key| cached_key != key);
                    }
                }
                SortEvent::Removed { key } => {
                    mark(key);
                    cached.retain(|cached_key| cached_key != key);
                }
                SortEvent::Changed { entries } => {
                    // Every column leaving or entering the sorted set loses
                    // or gains its indicator.
                    for key in cached.iter() {
                        mark(key);
                    }
                    for (key, _) in entries {
                        if !cached.contains(key) {
                            mark(key);
                        }
                    }
                    *cached = entries.iter().map(|(key, _)| key.clone()).collect();
                }
            }
        });
        self.sort = Some(SortBinding {
            controller,
            connection,
        });
    }

    /// Attach (or detach) the editor controller. A previous controller
    /// mid-edit is force-canceled before detaching.
    pub fn set_editor_controller(&mut self, controller: Option<Rc<RefCell<EditorController>>>) {
        if let Some(previous) = self.editor.take() {
            self.link.force_cancel_edit();
            self.link.clear_editor();
            let controller = previous.controller.borrow();
            controller.remove_listener(previous.listener);
            drop(controller);
            previous.controller.borrow_mut().detach();
        }
        let Some(controller) = controller else { return };

        controller.borrow_mut().attach(Rc::clone(&self.link));
        self.link.set_editor(&controller);
        let listener = controller.borrow().add_listener(Rc::new(EditRegionInvalidator {
            link: Rc::clone(&self.link),
            behavior: controller.borrow().shared_behavior(),
        }));
        self.editor = Some(EditorBinding {
            controller,
            listener,
        });
    }

    /// Attach (or detach) the row-disabler controller. A predicate change
    /// on the attached controller force-cancels any edit and marks the
    /// whole grid dirty.
    pub fn set_row_disabler(&mut self, controller: Option<Rc<RefCell<RowDisablerController>>>) {
        if let Some(previous) = self.disabler.take() {
            previous.controller.borrow().changed.disconnect(previous.connection);
            previous.controller.borrow_mut().detach();
        }
        let Some(controller) = controller else { return };

        controller.borrow_mut().attach(Rc::clone(&self.link));
        let link = Rc::clone(&self.link);
        let connection = controller
            .borrow()
            .changed
            .connect(move |_previous: &Option<RowPredicate>| {
                // Which rows flipped is unknowable without evaluating both
                // predicates over every row; the true affected set is the
                // whole grid.
                link.force_cancel_edit();
                link.mark_all_dirty();
            });
        self.disabler = Some(DisablerBinding {
            controller,
            connection,
        });
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Route one pointer event. Events arriving before metrics are supplied
    /// are ignored.
    pub fn on_pointer_event(&mut self, event: PointerEvent) {
        if self.metrics.is_none() {
            tracing::trace!(target: targets::GRID, ?event, "pointer event before metrics; ignored");
            return;
        }
        match event {
            PointerEvent::Entered => {}
            PointerEvent::Exited | PointerEvent::Scroll { .. } => {
                self.pending_highlight_clear = true;
            }
            PointerEvent::Hover { position } => self.on_hover(position),
            PointerEvent::Down {
                position,
                modifiers,
            } => self.on_pointer_down(position, modifiers),
            PointerEvent::Up { .. } => self.on_pointer_up(),
        }
    }

    fn on_hover(&mut self, position: Point) {
        let row = self
            .row_under(position)
            .filter(|&row| !self.is_row_disabled(row));
        // A live hover supersedes any pending deferred clear.
        self.pending_highlight_clear = false;
        self.set_highlighted_row(row);
    }

    fn on_pointer_down(&mut self, position: Point, modifiers: KeyboardModifiers) {
        let Some(row) = self.row_under(position) else {
            return;
        };
        if self.is_row_disabled(row) {
            return;
        }
        let Some(binding) = &self.selection else { return };
        let mut selection = binding.controller.borrow_mut();
        match selection.mode() {
            SelectionMode::None => {}
            SelectionMode::Multi if modifiers.shift => {
                // Extend from the original anchor; Span::new keeps it an
                // endpoint regardless of direction.
                match selection.selected_ranges().first() {
                    Some(anchor) => selection.set_selected_range(Some(Span::new(anchor, row))),
                    None => selection.set_selected_ranges([Span::single(row)]),
                }
            }
            SelectionMode::Multi if modifiers.command => {
                if selection.is_row_selected(row) {
                    selection.remove_selected_range(Span::single(row));
                } else {
                    selection.add_selected_range(Span::single(row));
                }
            }
            SelectionMode::Single if modifiers.control => {
                if selection.is_row_selected(row) {
                    selection.set_selected_index(None);
                } else {
                    selection.set_selected_index(Some(row));
                }
            }
            mode => {
                if !selection.is_row_selected(row) {
                    match mode {
                        SelectionMode::Single => selection.set_selected_index(Some(row)),
                        SelectionMode::Multi => {
                            selection.set_selected_ranges([Span::single(row)])
                        }
                        SelectionMode::None => unreachable!(),
                    }
                }
                drop(selection);
                self.drag_candidate = Some(row);
            }
        }
    }

    fn on_pointer_up(&mut self) {
        let Some(candidate) = self.drag_candidate.take() else {
            return;
        };
        let Some(binding) = &self.selection else { return };
        let mut selection = binding.controller.borrow_mut();
        // Endpoint comparison stands in for a real drag-start signal: if
        // the selection still spans more than the pressed row, the drag did
        // not complete cleanly and the press is treated as a plain click.
        let ranges = selection.selected_ranges();
        if ranges.first() != ranges.last() && selection.mode() == SelectionMode::Multi {
            tracing::debug!(target: targets::GRID, row = candidate, "collapsing drag selection");
            selection.set_selected_ranges([Span::single(candidate)]);
        }
    }

    /// Attempt to start an edit at the cell under a double-tap.
    pub fn on_double_tap(&mut self, position: Point) {
        let Some(metrics) = &self.metrics else { return };
        let Some(binding) = &self.editor else { return };
        let Some((row, column)) = metrics.cell_at(position) else {
            return;
        };
        if row >= self.link.row_count() || column >= self.link.column_count() {
            return;
        }
        if self.is_row_disabled(row) {
            return;
        }
        let mut editor = binding.controller.borrow_mut();
        if editor.behavior() == EditBehavior::None || editor.is_editing() {
            return;
        }
        editor.start(row, column);
    }

    /// Global-capture window: while editing and not suspended by a
    /// navigation push, a pointer-down outside the edited region saves the
    /// edit. A denied save leaves the edit open.
    pub fn on_global_pointer_down(&mut self, position: Point) {
        if self.nav_depth > 0 {
            return;
        }
        let Some(binding) = &self.editor else { return };
        if !binding.controller.borrow().is_editing() {
            return;
        }
        let Some(metrics) = &self.metrics else { return };
        let inside = metrics.cell_at(position).is_some_and(|(row, column)| {
            binding
                .controller
                .borrow()
                .cells_being_edited()
                .contains(row, column)
        });
        if !inside {
            tracing::debug!(target: targets::GRID, "pointer-down outside edit region; saving");
            binding.controller.borrow_mut().save();
        }
    }

    /// A navigation push occurred; suspend global capture until the
    /// matching pop.
    pub fn notify_route_pushed(&mut self) {
        self.nav_depth += 1;
    }

    /// A navigation pop occurred; capture resumes once the last nested
    /// push has popped.
    pub fn notify_route_popped(&mut self) {
        self.nav_depth = self.nav_depth.saturating_sub(1);
    }

    /// Run deferred display-state updates. The embedding shell calls this
    /// once per layout pass; rapid exit/scroll churn coalesces into at most
    /// one highlight clear here.
    pub fn run_layout_callbacks(&mut self) {
        if std::mem::take(&mut self.pending_highlight_clear) {
            self.set_highlighted_row(None);
        }
    }

    // =========================================================================
    // Sort entry
    // =========================================================================

    /// Apply the header-click cycling policy to a column's sort direction.
    /// Ignored without an attached sort controller, in `SortMode::None`, or
    /// for an out-of-range column.
    pub fn on_header_pressed(&mut self, column: usize) {
        let Some(key) = self
            .link
            .with_columns(|columns| columns.get(column).map(|column| column.key().to_owned()))
        else {
            return;
        };
        let Some(binding) = &self.sort else { return };
        let mut sort = binding.controller.borrow_mut();
        if sort.mode() == SortMode::None {
            return;
        }
        let direction = sort.cycled(&key);
        sort.set(&key, Some(direction));
    }

    // =========================================================================
    // Render contract
    // =========================================================================

    /// The currently highlighted (hovered) row, if any.
    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlighted_row
    }

    /// Compute the display facts for one cell, fresh from controller state.
    pub fn cell_state(&self, row: usize, column: usize) -> CellState {
        CellState {
            selected: self
                .selection
                .as_ref()
                .is_some_and(|binding| binding.controller.borrow().is_row_selected(row)),
            highlighted: self.highlighted_row == Some(row),
            editing: self
                .editor
                .as_ref()
                .is_some_and(|binding| binding.controller.borrow().is_editing_cell(row, column)),
            disabled: self.is_row_disabled(row),
        }
    }

    /// Paint one cell through its column's renderer.
    ///
    /// # Panics
    ///
    /// Panics if metrics have not been supplied or the cell is out of
    /// range.
    pub fn paint_cell(&self, surface: &mut dyn PaintSurface, row: usize, column: usize) {
        let metrics = self
            .metrics
            .as_ref()
            .expect("painting requires grid metrics");
        let renderer = self
            .link
            .with_columns(|columns| Rc::clone(columns[column].cell_renderer()));
        let state = self.cell_state(row, column);
        renderer.paint(surface, row, column, metrics.cell_bounds(row, column), state);
    }

    /// Paint one column header, layering the sort indicator from the
    /// attached sort controller. Columns without a header renderer are
    /// skipped.
    ///
    /// # Panics
    ///
    /// Panics if metrics have not been supplied or the column is out of
    /// range.
    pub fn paint_header(&self, surface: &mut dyn PaintSurface, column: usize) {
        let metrics = self
            .metrics
            .as_ref()
            .expect("painting requires grid metrics");
        let (key, renderer) = self.link.with_columns(|columns| {
            let column = &columns[column];
            (column.key().to_owned(), column.header_renderer().cloned())
        });
        let Some(renderer) = renderer else { return };
        let direction = self
            .sort
            .as_ref()
            .and_then(|binding| binding.controller.borrow().get(&key));
        renderer.paint(surface, column, metrics.column_bounds(column), direction);
    }

    // =========================================================================
    // Dirty region
    // =========================================================================

    /// Fired with each newly dirtied range as it is recorded.
    pub fn cells_dirtied(&self) -> &Signal<CellRange> {
        &self.link.cells_dirtied
    }

    /// Fired whenever any cells become dirty; coarse repaint trigger.
    pub fn repaint_requested(&self) -> &Signal<()> {
        &self.link.repaint_requested
    }

    /// Drain the accumulated dirty region for the renderer.
    pub fn take_dirty_region(&mut self) -> Option<CellRange> {
        self.link.take_dirty()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn row_under(&self, position: Point) -> Option<usize> {
        let metrics = self.metrics.as_ref()?;
        metrics
            .row_at(position.y)
            .filter(|&row| row < self.link.row_count())
    }

    fn is_row_disabled(&self, row: usize) -> bool {
        self.disabler
            .as_ref()
            .is_some_and(|binding| binding.controller.borrow().is_row_disabled(row))
    }

    fn set_highlighted_row(&mut self, row: Option<usize>) {
        if self.highlighted_row == row {
            return;
        }
        let previous = std::mem::replace(&mut self.highlighted_row, row);
        tracing::trace!(target: targets::GRID, ?previous, current = ?row, "highlight moved");
        if let Some(previous) = previous {
            self.link.mark_rows_dirty(previous, previous);
        }
        if let Some(row) = row {
            self.link.mark_rows_dirty(row, row);
        }
    }

    fn mark_selection_dirty(&self, ranges: &RangeSet) {
        for span in ranges.spans() {
            self.link.mark_rows_dirty(span.start, span.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::{ColumnWidth, EditOutcome, EditState};
    use crate::view::render::CellRenderer;

    const ROW_HEIGHT: f32 = 20.0;
    const COLUMN_WIDTH: f32 = 50.0;

    /// Enable log output for a test run with `QUADRILLE_LOG=trace`.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_env("QUADRILLE_LOG"))
            .with_test_writer()
            .try_init();
    }

    /// Uniform row/column geometry for hit-testing in tests.
    struct UniformMetrics {
        rows: usize,
        columns: usize,
    }

    impl GridMetrics for UniformMetrics {
        fn row_at(&self, y: f32) -> Option<usize> {
            if y < 0.0 {
                return None;
            }
            let row = (y / ROW_HEIGHT) as usize;
            (row < self.rows).then_some(row)
        }

        fn cell_at(&self, position: Point) -> Option<(usize, usize)> {
            let row = self.row_at(position.y)?;
            if position.x < 0.0 {
                return None;
            }
            let column = (position.x / COLUMN_WIDTH) as usize;
            (column < self.columns).then_some((row, column))
        }

        fn row_bounds(&self, row: usize) -> Rect {
            Rect::new(
                0.0,
                row as f32 * ROW_HEIGHT,
                self.columns as f32 * COLUMN_WIDTH,
                ROW_HEIGHT,
            )
        }

        fn column_bounds(&self, column: usize) -> Rect {
            Rect::new(
                column as f32 * COLUMN_WIDTH,
                0.0,
                COLUMN_WIDTH,
                self.rows as f32 * ROW_HEIGHT,
            )
        }

        fn cell_bounds(&self, row: usize, column: usize) -> Rect {
            Rect::new(
                column as f32 * COLUMN_WIDTH,
                row as f32 * ROW_HEIGHT,
                COLUMN_WIDTH,
                ROW_HEIGHT,
            )
        }
    }

    struct NullCell;

    impl CellRenderer for NullCell {
        fn paint(
            &self,
            _surface: &mut dyn PaintSurface,
            _row: usize,
            _column: usize,
            _bounds: Rect,
            _state: CellState,
        ) {
        }
    }

    fn columns(count: usize) -> Vec<Column> {
        (0..count)
            .map(|index| Column::new(format!("c{index}"), Rc::new(NullCell)))
            .collect()
    }

    fn grid(rows: usize, column_count: usize) -> GridView {
        init_tracing();
        let mut grid = GridView::new();
        grid.set_row_count(rows);
        grid.set_columns(columns(column_count));
        grid.set_metrics(UniformMetrics {
            rows,
            columns: column_count,
        });
        grid.take_dirty_region();
        grid
    }

    fn row_point(row: usize) -> Point {
        Point::new(5.0, row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0)
    }

    fn cell_point(row: usize, column: usize) -> Point {
        Point::new(
            column as f32 * COLUMN_WIDTH + COLUMN_WIDTH / 2.0,
            row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0,
        )
    }

    fn press(grid: &mut GridView, row: usize, modifiers: KeyboardModifiers) {
        grid.on_pointer_event(PointerEvent::Down {
            position: row_point(row),
            modifiers,
        });
        grid.on_pointer_event(PointerEvent::Up {
            position: row_point(row),
        });
    }

    fn multi_selection(grid: &mut GridView) -> Rc<RefCell<SelectionController>> {
        let selection = Rc::new(RefCell::new(SelectionController::new(SelectionMode::Multi)));
        grid.set_selection_controller(Some(selection.clone()));
        selection
    }

    #[test]
    fn plain_shift_and_command_press_sequence() {
        let mut grid = grid(10, 3);
        let selection = multi_selection(&mut grid);

        press(&mut grid, 3, KeyboardModifiers::NONE);
        assert_eq!(selection.borrow().selected_rows(), vec![3]);

        press(&mut grid, 6, KeyboardModifiers::shift());
        assert_eq!(selection.borrow().selected_rows(), vec![3, 4, 5, 6]);

        press(&mut grid, 3, KeyboardModifiers::command());
        assert_eq!(selection.borrow().selected_rows(), vec![4, 5, 6]);
    }

    #[test]
    fn shift_press_below_anchor_keeps_anchor_as_endpoint() {
        let mut grid = grid(10, 3);
        let selection = multi_selection(&mut grid);

        press(&mut grid, 6, KeyboardModifiers::NONE);
        press(&mut grid, 2, KeyboardModifiers::shift());
        assert_eq!(selection.borrow().selected_rows(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn control_press_toggles_in_single_mode() {
        let mut grid = grid(10, 3);
        let selection = Rc::new(RefCell::new(SelectionController::new(SelectionMode::Single)));
        grid.set_selection_controller(Some(selection.clone()));

        press(&mut grid, 4, KeyboardModifiers::control());
        assert_eq!(selection.borrow().selected_index(), Some(4));

        press(&mut grid, 4, KeyboardModifiers::control());
        assert_eq!(selection.borrow().selected_index(), None);
    }

    #[test]
    fn press_is_ignored_in_selection_mode_none() {
        let mut grid = grid(10, 3);
        let selection = Rc::new(RefCell::new(SelectionController::new(SelectionMode::None)));
        grid.set_selection_controller(Some(selection.clone()));

        press(&mut grid, 4, KeyboardModifiers::NONE);
        assert!(!selection.borrow().has_selection());
    }

    #[test]
    fn press_on_disabled_row_is_ignored() {
        let mut grid = grid(10, 3);
        let selection = multi_selection(&mut grid);
        let disabler = Rc::new(RefCell::new(RowDisablerController::new()));
        grid.set_row_disabler(Some(disabler.clone()));
        disabler
            .borrow_mut()
            .set_filter(Some(Rc::new(|row| row == 4)));

        press(&mut grid, 4, KeyboardModifiers::NONE);
        assert!(!selection.borrow().has_selection());
    }

    #[test]
    fn pointer_up_collapses_a_stale_drag_range() {
        let mut grid = grid(10, 3);
        let selection = multi_selection(&mut grid);
        selection.borrow_mut().add_selected_range(Span::new(2, 5));

        // Plain press on an already-selected row arms the candidate without
        // touching the selection; the release sees a multi-row range and
        // collapses it.
        grid.on_pointer_event(PointerEvent::Down {
            position: row_point(2),
            modifiers: KeyboardModifiers::NONE,
        });
        assert_eq!(selection.borrow().selected_rows(), vec![2, 3, 4, 5]);
        grid.on_pointer_event(PointerEvent::Up {
            position: row_point(2),
        });
        assert_eq!(selection.borrow().selected_rows(), vec![2]);
    }

    #[test]
    fn pointer_up_after_single_row_press_leaves_selection_alone() {
        let mut grid = grid(10, 3);
        let selection = multi_selection(&mut grid);

        press(&mut grid, 3, KeyboardModifiers::NONE);
        assert_eq!(selection.borrow().selected_rows(), vec![3]);
    }

    #[test]
    fn selection_change_marks_only_flipped_rows_dirty() {
        let mut grid = grid(10, 3);
        let selection = multi_selection(&mut grid);
        grid.take_dirty_region();

        selection.borrow_mut().add_selected_range(Span::new(3, 4));
        let dirty = grid.take_dirty_region().expect("selection change dirties rows");
        assert!(dirty.contains(3, 0));
        assert!(dirty.contains(4, 2));
        assert!(!dirty.contains(5, 0));
    }

    #[test]
    fn hover_highlights_and_marks_both_rows_dirty() {
        let mut grid = grid(10, 3);

        grid.on_pointer_event(PointerEvent::Hover {
            position: row_point(2),
        });
        assert_eq!(grid.highlighted_row(), Some(2));
        let dirty = grid.take_dirty_region().unwrap();
        assert!(dirty.contains(2, 0));

        grid.on_pointer_event(PointerEvent::Hover {
            position: row_point(7),
        });
        assert_eq!(grid.highlighted_row(), Some(7));
        let dirty = grid.take_dirty_region().unwrap();
        assert!(dirty.contains(2, 0));
        assert!(dirty.contains(7, 0));
    }

    #[test]
    fn hover_over_disabled_row_clears_highlight() {
        let mut grid = grid(10, 3);
        let disabler = Rc::new(RefCell::new(RowDisablerController::new()));
        grid.set_row_disabler(Some(disabler.clone()));
        disabler
            .borrow_mut()
            .set_filter(Some(Rc::new(|row| row == 7)));

        grid.on_pointer_event(PointerEvent::Hover {
            position: row_point(2),
        });
        grid.on_pointer_event(PointerEvent::Hover {
            position: row_point(7),
        });
        assert_eq!(grid.highlighted_row(), None);
    }

    #[test]
    fn exit_clears_highlight_on_next_layout_pass_only() {
        let mut grid = grid(10, 3);
        grid.on_pointer_event(PointerEvent::Hover {
            position: row_point(2),
        });

        grid.on_pointer_event(PointerEvent::Exited);
        assert_eq!(grid.highlighted_row(), Some(2));

        grid.run_layout_callbacks();
        assert_eq!(grid.highlighted_row(), None);
    }

    #[test]
    fn hover_after_scroll_cancels_pending_clear() {
        let mut grid = grid(10, 3);
        grid.on_pointer_event(PointerEvent::Scroll {
            position: row_point(2),
        });
        grid.on_pointer_event(PointerEvent::Hover {
            position: row_point(2),
        });

        grid.run_layout_callbacks();
        assert_eq!(grid.highlighted_row(), Some(2));
    }

    fn attached_editor(grid: &mut GridView) -> Rc<RefCell<EditorController>> {
        let editor = Rc::new(RefCell::new(EditorController::new(EditBehavior::SingleCell)));
        grid.set_editor_controller(Some(editor.clone()));
        editor
    }

    #[test]
    fn double_tap_starts_an_edit() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);

        grid.on_double_tap(cell_point(4, 1));
        assert_eq!(editor.borrow().state(), EditState::Editing { row: 4, column: 1 });
    }

    #[test]
    fn double_tap_on_disabled_row_is_ignored() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        let disabler = Rc::new(RefCell::new(RowDisablerController::new()));
        grid.set_row_disabler(Some(disabler.clone()));
        disabler
            .borrow_mut()
            .set_filter(Some(Rc::new(|row| row == 4)));

        grid.on_double_tap(cell_point(4, 1));
        assert!(!editor.borrow().is_editing());
    }

    #[test]
    fn edit_start_marks_the_cell_dirty() {
        let mut grid = grid(10, 3);
        attached_editor(&mut grid);
        grid.take_dirty_region();

        grid.on_double_tap(cell_point(4, 1));
        let dirty = grid.take_dirty_region().unwrap();
        assert!(dirty.contains(4, 1));
        assert!(!dirty.contains(4, 0));
    }

    #[test]
    fn global_down_outside_edit_region_saves() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        grid.on_double_tap(cell_point(4, 1));

        grid.on_global_pointer_down(cell_point(8, 0));
        assert_eq!(editor.borrow().state(), EditState::Idle);
    }

    #[test]
    fn global_down_inside_edit_region_does_nothing() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        grid.on_double_tap(cell_point(4, 1));

        grid.on_global_pointer_down(cell_point(4, 1));
        assert!(editor.borrow().is_editing());
    }

    #[test]
    fn navigation_push_suspends_global_capture_until_last_pop() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        grid.on_double_tap(cell_point(4, 1));

        grid.notify_route_pushed();
        grid.notify_route_pushed();
        grid.on_global_pointer_down(cell_point(8, 0));
        assert!(editor.borrow().is_editing());

        grid.notify_route_popped();
        grid.on_global_pointer_down(cell_point(8, 0));
        assert!(editor.borrow().is_editing());

        grid.notify_route_popped();
        grid.on_global_pointer_down(cell_point(8, 0));
        assert_eq!(editor.borrow().state(), EditState::Idle);
    }

    #[test]
    fn disabling_the_edited_row_forces_cancellation() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        let disabler = Rc::new(RefCell::new(RowDisablerController::new()));
        grid.set_row_disabler(Some(disabler.clone()));

        struct OutcomeProbe(RefCell<Option<EditOutcome>>);
        impl EditListener for OutcomeProbe {
            fn edit_finished(&self, _row: usize, _column: usize, outcome: EditOutcome) {
                *self.0.borrow_mut() = Some(outcome);
            }
        }
        let probe = Rc::new(OutcomeProbe(RefCell::new(None)));
        editor.borrow().add_listener(probe.clone());

        grid.on_double_tap(cell_point(6, 0));
        disabler
            .borrow_mut()
            .set_filter(Some(Rc::new(|row| row == 6)));

        assert_eq!(editor.borrow().state(), EditState::Idle);
        assert_eq!(*probe.0.borrow(), Some(EditOutcome::Canceled));
    }

    #[test]
    fn changing_row_count_mid_edit_cancels() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        grid.on_double_tap(cell_point(4, 1));

        grid.set_row_count(5);
        assert_eq!(editor.borrow().state(), EditState::Idle);
    }

    #[test]
    fn structurally_identical_columns_do_not_cancel_an_edit() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        grid.on_double_tap(cell_point(4, 1));

        let same = grid.columns();
        grid.set_columns(same);
        assert!(editor.borrow().is_editing());
    }

    #[test]
    fn replacing_the_sort_controller_cancels_an_edit() {
        let mut grid = grid(10, 3);
        let editor = attached_editor(&mut grid);
        grid.on_double_tap(cell_point(4, 1));

        let sort = Rc::new(RefCell::new(SortController::new(SortMode::SingleColumn)));
        grid.set_sort_controller(Some(sort));
        assert_eq!(editor.borrow().state(), EditState::Idle);
    }

    #[test]
    fn header_press_cycles_sort_direction() {
        use crate::model::SortDirection;

        let mut grid = grid(10, 3);
        let sort = Rc::new(RefCell::new(SortController::new(SortMode::SingleColumn)));
        grid.set_sort_controller(Some(sort.clone()));

        grid.on_header_pressed(1);
        assert_eq!(sort.borrow().get("c1"), Some(SortDirection::Ascending));

        grid.on_header_pressed(1);
        assert_eq!(sort.borrow().get("c1"), Some(SortDirection::Descending));

        grid.on_header_pressed(1);
        assert_eq!(sort.borrow().get("c1"), Some(SortDirection::Ascending));
    }

    #[test]
    fn sort_change_marks_affected_columns_dirty() {
        let mut grid = grid(10, 3);
        let sort = Rc::new(RefCell::new(SortController::new(SortMode::SingleColumn)));
        grid.set_sort_controller(Some(sort.clone()));
        grid.take_dirty_region();

        grid.on_header_pressed(1);
        let dirty = grid.take_dirty_region().unwrap();
        assert!(dirty.contains(0, 1));
        assert!(!dirty.contains(0, 0));

        // Moving the sort to another column invalidates both the old and
        // the new indicator columns.
        grid.on_header_pressed(2);
        let dirty = grid.take_dirty_region().unwrap();
        assert!(dirty.contains(0, 1));
        assert!(dirty.contains(0, 2));
    }

    #[test]
    fn cell_state_reflects_all_four_controllers() {
        let mut grid = grid(10, 3);
        let selection = multi_selection(&mut grid);
        attached_editor(&mut grid);
        let disabler = Rc::new(RefCell::new(RowDisablerController::new()));
        grid.set_row_disabler(Some(disabler.clone()));

        selection.borrow_mut().add_selected_range(Span::single(2));
        disabler
            .borrow_mut()
            .set_filter(Some(Rc::new(|row| row == 5)));
        grid.on_pointer_event(PointerEvent::Hover {
            position: row_point(2),
        });
        grid.on_double_tap(cell_point(3, 1));

        let state = grid.cell_state(2, 0);
        assert!(state.selected);
        assert!(state.highlighted);
        assert!(!state.editing);
        assert!(!state.disabled);

        assert!(grid.cell_state(3, 1).editing);
        assert!(!grid.cell_state(3, 0).editing);
        assert!(grid.cell_state(5, 0).disabled);
    }

    #[test]
    fn resize_clamps_to_column_bounds() {
        let mut grid = grid(10, 1);
        let column = Column::new("c0", Rc::new(NullCell)).with_width(ColumnWidth::Fixed {
            width: 80.0,
            min_width: 40.0,
            max_width: 120.0,
        });
        grid.set_columns(vec![column]);

        grid.resize_column(0, 200.0).unwrap();
        assert_eq!(
            grid.columns()[0].width(),
            ColumnWidth::Fixed {
                width: 120.0,
                min_width: 40.0,
                max_width: 120.0,
            }
        );
    }

    #[test]
    fn resize_rejects_flex_and_out_of_range_columns() {
        let mut grid = grid(10, 1);

        assert!(matches!(
            grid.resize_column(0, 50.0),
            Err(Error::ColumnNotResizable { .. })
        ));
        assert!(matches!(
            grid.resize_column(5, 50.0),
            Err(Error::ColumnOutOfRange { index: 5, count: 1 })
        ));
    }

    #[test]
    fn reattaching_a_controller_elsewhere_requires_detach() {
        let mut grid_a = grid(10, 3);
        let mut grid_b = grid(10, 3);
        let selection = multi_selection(&mut grid_a);

        grid_a.set_selection_controller(None);
        grid_b.set_selection_controller(Some(selection.clone()));
        assert!(selection.borrow().is_attached());
    }

    #[test]
    #[should_panic(expected = "already attached")]
    fn double_attachment_is_a_contract_violation() {
        let mut grid_a = grid(10, 3);
        let mut grid_b = grid(10, 3);
        let selection = multi_selection(&mut grid_a);
        grid_b.set_selection_controller(Some(selection));
    }
}

//! Type-erased list screens and their table/grid rendering.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use serde::Serialize;

use ngodesk_core::listing::{CheckState, FacetSelection, SelectScope, SortState};
use ngodesk_core::{CoreResult, LoadState, Record, TabularListController, ViewMode};

use super::rows::RowView;
use super::styles;

const CARD_HEIGHT: u16 = 7;
const CARD_MIN_WIDTH: u16 = 34;

/// What the app needs from a screen's list, independent of record type.
pub trait ScreenList {
    fn noun(&self) -> &'static str;
    fn load_state(&self) -> &LoadState;
    fn begin_loading(&mut self);
    fn fail_loading(&mut self, error: String);
    fn record_count(&self) -> usize;

    fn query(&self) -> &str;
    fn set_query(&mut self, query: &str);

    fn facet_count(&self) -> usize;
    /// (label, current selection) per facet
    fn facet_summary(&self) -> Vec<(&'static str, String)>;
    fn cycle_facet_at(&mut self, index: usize) -> CoreResult<FacetSelection>;
    /// How many values the facet at `index` can be cycled through
    fn facet_option_count(&self, index: usize) -> usize;
    fn active_facet_count(&self) -> usize;
    fn clear_filters(&mut self);

    /// (key, label) per sortable column
    fn sort_options(&self) -> Vec<(&'static str, &'static str)>;
    fn sort_state(&self) -> SortState;
    fn toggle_sort(&mut self, key: &str) -> CoreResult<()>;

    fn filtered_count(&self) -> usize;
    fn page_number(&self) -> usize;
    fn total_pages(&self) -> usize;
    fn next_page(&mut self) -> bool;
    fn prev_page(&mut self) -> bool;
    fn go_to_page(&mut self, page: usize);
    fn page_ids(&self) -> Vec<String>;

    fn flip_selected(&mut self, id: &str) -> bool;
    fn select_all(&mut self, scope: SelectScope, checked: bool);
    fn check_state(&self, scope: SelectScope) -> CheckState;
    fn clear_selection(&mut self);
    fn selected_count(&self) -> usize;
    fn eligible_selected_ids(&self) -> Vec<String>;
    fn can_apply_bulk(&self) -> bool;

    fn view_mode(&self) -> ViewMode;
    fn toggle_view_mode(&mut self) -> ViewMode;

    fn render(&self, frame: &mut Frame, area: Rect, title: &str, cursor: usize, today: NaiveDate);

    /// Filtered records in display order, as pretty JSON.
    fn dump_json(&self) -> serde_json::Result<String>;
}

impl<T> ScreenList for TabularListController<T>
where
    T: Record + RowView + Serialize,
{
    fn noun(&self) -> &'static str {
        TabularListController::noun(self)
    }

    fn load_state(&self) -> &LoadState {
        TabularListController::load_state(self)
    }

    fn begin_loading(&mut self) {
        TabularListController::begin_loading(self)
    }

    fn fail_loading(&mut self, error: String) {
        TabularListController::fail_loading(self, error)
    }

    fn record_count(&self) -> usize {
        self.records().len()
    }

    fn query(&self) -> &str {
        TabularListController::query(self)
    }

    fn set_query(&mut self, query: &str) {
        TabularListController::set_query(self, query)
    }

    fn facet_count(&self) -> usize {
        self.facet_defs().len()
    }

    fn facet_summary(&self) -> Vec<(&'static str, String)> {
        self.facet_defs()
            .iter()
            .map(|def| {
                let current = self
                    .facet_selection(def.key)
                    .map(FacetSelection::label)
                    .unwrap_or_else(|_| "All".to_string());
                (def.label, current)
            })
            .collect()
    }

    fn cycle_facet_at(&mut self, index: usize) -> CoreResult<FacetSelection> {
        let key = match self.facet_defs().get(index) {
            Some(def) => def.key,
            None => return Ok(FacetSelection::All),
        };
        self.cycle_facet(key)
    }

    fn facet_option_count(&self, index: usize) -> usize {
        self.facet_defs()
            .get(index)
            .and_then(|def| self.facet_values(def.key).ok())
            .map_or(0, |values| values.len())
    }

    fn active_facet_count(&self) -> usize {
        TabularListController::active_facet_count(self)
    }

    fn clear_filters(&mut self) {
        TabularListController::clear_filters(self)
    }

    fn sort_options(&self) -> Vec<(&'static str, &'static str)> {
        self.sort_keys().iter().map(|k| (k.key, k.label)).collect()
    }

    fn sort_state(&self) -> SortState {
        TabularListController::sort_state(self)
    }

    fn toggle_sort(&mut self, key: &str) -> CoreResult<()> {
        TabularListController::toggle_sort(self, key)
    }

    fn filtered_count(&self) -> usize {
        TabularListController::filtered_count(self)
    }

    fn page_number(&self) -> usize {
        TabularListController::page_number(self)
    }

    fn total_pages(&self) -> usize {
        TabularListController::total_pages(self)
    }

    fn next_page(&mut self) -> bool {
        TabularListController::next_page(self)
    }

    fn prev_page(&mut self) -> bool {
        TabularListController::prev_page(self)
    }

    fn go_to_page(&mut self, page: usize) {
        TabularListController::go_to_page(self, page)
    }

    fn page_ids(&self) -> Vec<String> {
        self.scope_ids(SelectScope::Page)
    }

    fn flip_selected(&mut self, id: &str) -> bool {
        TabularListController::flip_selected(self, id)
    }

    fn select_all(&mut self, scope: SelectScope, checked: bool) {
        TabularListController::select_all(self, scope, checked)
    }

    fn check_state(&self, scope: SelectScope) -> CheckState {
        TabularListController::check_state(self, scope)
    }

    fn clear_selection(&mut self) {
        TabularListController::clear_selection(self)
    }

    fn selected_count(&self) -> usize {
        self.selected_records().len()
    }

    fn eligible_selected_ids(&self) -> Vec<String> {
        self.eligible_selected()
            .into_iter()
            .map(|r| r.id().to_string())
            .collect()
    }

    fn can_apply_bulk(&self) -> bool {
        TabularListController::can_apply_bulk(self)
    }

    fn view_mode(&self) -> ViewMode {
        TabularListController::view_mode(self)
    }

    fn toggle_view_mode(&mut self) -> ViewMode {
        TabularListController::toggle_view_mode(self)
    }

    fn render(&self, frame: &mut Frame, area: Rect, title: &str, cursor: usize, today: NaiveDate) {
        let block = Block::default()
            .title(format!(" {} ({}) ", title, self.filtered_count()))
            .title_style(styles::muted_style())
            .title_bottom(Line::from(format!(" {} ", self.status_line())).right_aligned())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true));

        if let Some(text) = self.placeholder() {
            let style = if self.load_state().error().is_some() {
                styles::error_style()
            } else {
                styles::muted_style()
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(format!("  {}", text), style)))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        match self.view_mode() {
            ViewMode::List => render_table(self, frame, area, block, cursor, today),
            ViewMode::Grid => render_grid(self, frame, area, block, cursor, today),
        }
    }

    fn dump_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.filtered())
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn header_checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::None => "[ ]",
        CheckState::Partial => "[-]",
        CheckState::All => "[x]",
    }
}

fn render_table<T>(
    list: &TabularListController<T>,
    frame: &mut Frame,
    area: Rect,
    block: Block,
    cursor: usize,
    today: NaiveDate,
) where
    T: Record + RowView + Serialize,
{
    let columns = T::columns();
    let sort = list.sort_state();

    let mut header_cells = vec![Cell::from(header_checkbox(list.check_state(SelectScope::Page)))];
    header_cells.extend(columns.iter().map(|c| {
        let indicator = c.sort_key.map(|k| sort.indicator(k)).unwrap_or("");
        Cell::from(format!("{}{}", c.title, indicator))
    }));
    let header = Row::new(header_cells).style(styles::title_style()).height(1);

    let page = list.current_page();
    let rows: Vec<Row> = page
        .items
        .iter()
        .map(|record| {
            let eligible = list.is_eligible(record);
            let mut cells = vec![Cell::from(checkbox(list.is_selected(record.id())))];
            cells.extend(record.cells(today));
            let style = if eligible {
                styles::list_item_style()
            } else {
                styles::muted_style()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(3)];
    widths.extend(columns.iter().map(|c| c.width));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(cursor.min(page.items.len().saturating_sub(1))));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_grid<T>(
    list: &TabularListController<T>,
    frame: &mut Frame,
    area: Rect,
    block: Block,
    cursor: usize,
    today: NaiveDate,
) where
    T: Record + RowView + Serialize,
{
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let page = list.current_page();
    let per_row = (inner.width / CARD_MIN_WIDTH).max(1) as usize;
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = cursor / per_row;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (slot, row_area) in row_areas.iter().enumerate() {
        let start = (first_row + slot) * per_row;
        if start >= page.items.len() {
            break;
        }
        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
            .split(*row_area);

        for (offset, card_area) in card_areas.iter().enumerate() {
            let index = start + offset;
            let Some(record) = page.items.get(index) else {
                break;
            };
            let focused = index == cursor;
            let title = format!(
                " {} {} ",
                checkbox(list.is_selected(record.id())),
                record.card_title()
            );
            let title_style = if focused {
                styles::selected_style()
            } else if list.is_eligible(record) {
                styles::list_item_style()
            } else {
                styles::muted_style()
            };
            let card = Block::default()
                .title(Span::styled(title, title_style))
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused));
            frame.render_widget(Paragraph::new(record.card_lines(today)).block(card), *card_area);
        }
    }
}

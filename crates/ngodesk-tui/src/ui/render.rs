use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use ngodesk_core::actions::BulkAction;
use ngodesk_core::{Module, Screen};

use crate::app::{bulk_action_for, App, AppState};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Length(2), // Filters and stats
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_filters(frame, app, chunks[2]);
    render_main_content(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingBulk(action) => render_bulk_overlay(frame, app, action),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut title = format!("  ngodesk · {}", app.config.organization());
    if app.is_demo() {
        title.push_str(" (demo)");
    }
    let help_hint = "[?] Help";
    let title_len = title.chars().count();

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title_len as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    let mut module: Option<Module> = None;
    for screen in Screen::ALL {
        if module.is_some() {
            let separator = if module == Some(screen.module()) { " " } else { " | " };
            spans.push(Span::styled(separator, styles::muted_style()));
        }
        if module != Some(screen.module()) {
            spans.push(Span::styled(
                format!("{}: ", screen.module().title()),
                styles::muted_style(),
            ));
            module = Some(screen.module());
        }
        let label = format!("[{}] {}", screen.index() + 1, screen.title());
        spans.push(Span::styled(label, styles::tab_style(screen == app.current_screen)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let list = app.current_list();

    let mut filter_spans = vec![Span::raw(" ")];
    if matches!(app.state, AppState::Searching) {
        filter_spans.push(Span::styled("Search: ", styles::search_style()));
        filter_spans.push(Span::styled(format!("{}▌", list.query()), styles::search_style()));
    } else if !list.query().is_empty() {
        filter_spans.push(Span::styled("Search: ", styles::muted_style()));
        filter_spans.push(Span::styled(list.query().to_string(), styles::search_style()));
    } else {
        filter_spans.push(Span::styled("[/] search", styles::muted_style()));
    }

    let focus = app.facet_focus();
    for (i, (label, value)) in list.facet_summary().into_iter().enumerate() {
        filter_spans.push(Span::styled("  ", styles::muted_style()));
        let label_style = if i == focus {
            styles::help_key_style()
        } else {
            styles::muted_style()
        };
        let value_style = if value == "All" {
            styles::muted_style()
        } else {
            styles::highlight_style()
        };
        filter_spans.push(Span::styled(format!("{}: ", label), label_style));
        filter_spans.push(Span::styled(value, value_style));
        if i == focus {
            filter_spans.push(Span::styled(
                format!(" ({} values)", list.facet_option_count(i)),
                styles::muted_style(),
            ));
        }
    }

    let sort = list.sort_state();
    if let Some(column) = sort.column {
        let label = list
            .sort_options()
            .into_iter()
            .find(|(key, _)| *key == column)
            .map(|(_, label)| label)
            .unwrap_or(column);
        filter_spans.push(Span::styled("  Sort: ", styles::muted_style()));
        filter_spans.push(Span::raw(format!("{}{}", label, sort.indicator(column))));
    }

    if list.active_facet_count() > 0 || !list.query().is_empty() {
        filter_spans.push(Span::styled(
            format!("  {} of {} · [c]lear", list.filtered_count(), list.record_count()),
            styles::muted_style(),
        ));
    }

    let stats = app.lists.stats_line(app.current_screen);
    let lines = vec![
        Line::from(filter_spans),
        Line::from(Span::styled(format!(" {}", stats), styles::muted_style())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let title = app.current_screen.to_string();
    app.current_list()
        .render(frame, area, &title, app.cursor(), app.today());
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let last_updated = app.cache_ages.last_updated();
    let mut shortcuts = String::from("[f]ilter [s]ort [v]iew [space] select");
    if let Some(action) = bulk_action_for(app.current_screen) {
        shortcuts.push_str(&format!(" [x] {}", action.label().to_lowercase()));
    }
    if app.current_screen == Screen::Compliance {
        shortcuts.push_str(" [p]review [d]ownload");
    }
    shortcuts.push_str(" | [u]pdate [q]uit");

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        format!(" Updated {} ", last_updated)
    };

    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(54, 30, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  ngodesk", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("1-9", "Jump to screen"),
        help_line("←/→", "Previous/next screen"),
        help_line("↑/↓ j/k", "Move through records"),
        help_line("[ ] PgUp/Dn", "Previous/next page"),
        help_line("Home/End", "First/last page"),
        Line::from(""),
        Line::from(Span::styled(" Filtering", styles::highlight_style())),
        help_line("/", "Search (Enter keeps, Esc clears)"),
        help_line("f / F", "Cycle facet value / next facet"),
        help_line("s / S", "Next sort column / flip direction"),
        help_line("c", "Clear search and facets"),
        help_line("v", "Toggle grid/list view"),
        Line::from(""),
        Line::from(Span::styled(" Selection", styles::highlight_style())),
        help_line("space", "Toggle record"),
        help_line("a / A", "Select page / all eligible"),
        help_line("x", "Run bulk action on selection"),
        help_line("p / d", "Preview / download document"),
        Line::from(""),
        Line::from(Span::styled(" Other", styles::highlight_style())),
        help_line("u", "Refresh data"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn confirm_prompt(confirm: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[Y]", styles::help_key_style()),
        Span::styled(format!(" to {}, ", confirm), styles::muted_style()),
        Span::styled("[N]", styles::help_key_style()),
        Span::styled(" to cancel", styles::muted_style()),
    ])
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        confirm_prompt("quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_bulk_overlay(frame: &mut Frame, app: &App, action: BulkAction) {
    let area = centered_rect_fixed(52, 9, frame.area());

    frame.render_widget(Clear, area);

    let count = app.bulk_target_count();
    let skipped = app.current_list().selected_count().saturating_sub(count);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   {} for {} {}?", action.label(), count, app.current_list().noun()),
            styles::highlight_style(),
        )),
    ];
    if skipped > 0 {
        lines.push(Line::from(Span::styled(
            format!("   {} selected record(s) are not eligible", skipped),
            styles::muted_style(),
        )));
    }
    if app.is_demo() {
        lines.push(Line::from(Span::styled(
            "   Demo mode: changes stay local",
            styles::muted_style(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(confirm_prompt("continue"));

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngodesk_core::{Config, Dataset, Payload};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_lists_and_overlays() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::with_config(Config::default(), dir.path().to_path_buf()).unwrap();
        for dataset in Dataset::ALL {
            app.lists.apply(Payload::demo(dataset));
        }
        app.go_to_screen(Screen::Compliance);

        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Certificate of Registration"));
        assert!(text.contains("Showing 1–8 of 12"));

        app.state = AppState::ShowingHelp;
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Select page / all eligible"));
    }

    #[test]
    fn test_failed_refresh_keeps_cached_rows_visible() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::with_config(Config::default(), dir.path().to_path_buf()).unwrap();
        app.lists.apply(Payload::demo(Dataset::ComplianceDocuments));
        app.go_to_screen(Screen::Compliance);
        app.lists.begin_loading(Dataset::ComplianceDocuments);
        app.lists.fail_loading(Dataset::ComplianceDocuments, "connection refused");

        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Certificate of Registration"));
        assert!(!text.contains("Failed to load compliance documents"));
        assert!(text.contains("Status: All (4 values)"));
    }

    #[test]
    fn test_render_grid_and_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::with_config(Config::default(), dir.path().to_path_buf()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("No grants found"));

        app.lists.apply(Payload::demo(Dataset::Grants));
        app.toggle_view_mode();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Funder"));
    }
}

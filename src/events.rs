use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Step through records while the overlay stays open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char('o') => export_detail(app),
            _ => {}
        }
        return;
    }

    // If search input is active, handle text input
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Traffic),
        KeyCode::Char('3') => app.set_view(View::Errors),
        KeyCode::Char('4') => app.set_view(View::Latency),
        KeyCode::Char('5') => app.set_view(View::Consumers),
        KeyCode::Char('6') => app.set_view(View::Logs),

        // Navigation (up/down for records, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Manual refresh
        KeyCode::Char('r') => app.refresh(),

        // Cycle the auto-refresh interval
        KeyCode::Char('i') => app.cycle_refresh_interval(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Record filters (Logs view)
        KeyCode::Char('/') => {
            if app.current_view == View::Logs {
                app.start_search();
            }
        }
        KeyCode::Char('m') => {
            if app.current_view == View::Logs {
                app.cycle_method();
            }
        }
        KeyCode::Char('x') => {
            if app.current_view == View::Logs {
                app.cycle_status();
            }
        }
        KeyCode::Char('c') => {
            if !app.filters.is_empty() {
                app.clear_filters();
                app.set_status_message("Filters cleared".to_string());
            }
        }

        // Save the selected record as an HTML page
        KeyCode::Char('o') => {
            if app.current_view == View::Logs {
                export_detail(app);
            }
        }

        _ => {}
    }
}

fn export_detail(app: &mut App) {
    match app.export_selected_detail() {
        Ok(path) => {
            app.set_status_message(format!("Saved to {}", path.display()));
        }
        Err(e) => {
            app.set_status_message(format!("Save failed: {}", e));
        }
    }
}

/// Handle key input while search is active. Every edit re-filters and is
/// persisted immediately.
fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm search
        KeyCode::Enter => {
            app.cancel_search();
        }

        // Exit input mode but keep the term
        KeyCode::Esc => {
            app.cancel_search();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_search();
        }

        // Backspace
        KeyCode::Backspace => {
            app.search_pop();
            if app.filters.search_term.is_empty() {
                app.cancel_search();
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.search_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Clicking a log row selects it (rows start after the filter
            // bar and the table header)
            if app.current_view == View::Logs && clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                if item_row < app.filtered_len() {
                    app.selected_entry_index = item_row;
                }
            }

            // Check for tab clicks (row 2, after header and status line)
            if clicked_row == 2 {
                let col = mouse.column;
                // Approximate tab positions based on the label widths
                if col < 12 {
                    app.set_view(View::Overview);
                } else if col < 23 {
                    app.set_view(View::Traffic);
                } else if col < 33 {
                    app.set_view(View::Errors);
                } else if col < 44 {
                    app.set_view(View::Latency);
                } else if col < 57 {
                    app.set_view(View::Consumers);
                } else if col < 64 {
                    app.set_view(View::Logs);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}

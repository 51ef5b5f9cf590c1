use std::time::Instant;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, Screen};
use crate::input::Edit;
use crate::tui::AppEvent;

/// Messages moved per PageUp/PageDown
const PAGE_STEP: usize = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick(Instant::now()),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work on every screen
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Chat => handle_chat_key(app, key),
        Screen::Settings => handle_settings_key(app, key),
    }
}

/// Map plain editing keys shared by both inputs
fn editing_key(key: KeyEvent) -> Option<Edit> {
    let edit = match key.code {
        KeyCode::Backspace => Edit::Backspace,
        KeyCode::Delete => Edit::Delete,
        KeyCode::Left => Edit::Left,
        KeyCode::Right => Edit::Right,
        KeyCode::Home => Edit::Home,
        KeyCode::End => Edit::End,
        KeyCode::Char(c) if is_text_input(key.modifiers) => Edit::Insert(c),
        _ => return None,
    };
    Some(edit)
}

/// Plain or shifted keys, plus CONTROL|ALT together, which is how AltGr
/// composed characters (e.g. `@` on a German layout) arrive on Windows.
fn is_text_input(modifiers: KeyModifiers) -> bool {
    let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
    !modifiers.intersects(ctrl_alt) || modifiers.contains(ctrl_alt)
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Enter if alt => app.edit_draft(Edit::Insert('\n')),
        KeyCode::Char('j') if ctrl => app.edit_draft(Edit::Insert('\n')),
        KeyCode::Enter => app.send_draft(),
        KeyCode::Char('x') if ctrl => app.delete_all(),
        KeyCode::Char('o') if ctrl => app.open_camera(),
        KeyCode::Char('s') if ctrl => app.navigate_to_settings(),
        KeyCode::PageUp => app.scroll_history_up(PAGE_STEP),
        KeyCode::PageDown => app.scroll_history_down(PAGE_STEP),
        _ => {
            if let Some(edit) = editing_key(key) {
                app.edit_draft(edit);
            }
        }
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => app.navigate_back(),
        KeyCode::Enter => app.save_settings(),
        KeyCode::Char('u') if ctrl => app.clear_api_key(),
        _ => {
            if let Some(edit) = editing_key(key) {
                app.edit_api_key(edit);
            }
        }
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen != Screen::Chat {
        return;
    }

    let in_history = app
        .history_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_history {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_history_up(1),
        MouseEventKind::ScrollDown => app.scroll_history_down(1),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_enter_sends() {
        let mut app = App::new(&Config::default());
        type_text(&mut app, "hello");
        assert_eq!(app.chat.draft_text(), "hello");

        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.chat.messages().len(), 1);
        assert_eq!(app.chat.messages()[0].text(), "hello");
        assert_eq!(app.chat.draft_text(), "");
    }

    #[test]
    fn test_enter_with_empty_draft_does_nothing() {
        let mut app = App::new(&Config::default());
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.chat.messages().is_empty());
    }

    #[test]
    fn test_newline_keys() {
        let mut app = App::new(&Config::default());
        type_text(&mut app, "a");
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)));
        type_text(&mut app, "b");
        handle_event(&mut app, ctrl('j'));
        type_text(&mut app, "c");
        assert_eq!(app.chat.draft_text(), "a\nb\nc");
        assert!(app.chat.messages().is_empty());
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut app = App::new(&Config::default());
        type_text(&mut app, "one");
        handle_event(&mut app, key(KeyCode::Enter));

        handle_event(&mut app, ctrl('x'));
        assert!(app.chat.messages().is_empty());

        handle_event(&mut app, ctrl('o'));
        assert!(app.chat.pending_notice().is_some());

        handle_event(&mut app, ctrl('s'));
        assert_eq!(app.screen, Screen::Settings);

        handle_event(&mut app, ctrl('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut app = App::new(&Config::default());
        handle_event(&mut app, ctrl('z'));
        assert_eq!(app.chat.draft_text(), "");
    }

    #[test]
    fn test_altgr_characters_are_inserted() {
        let mut app = App::new(&Config::default());
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Char('@'), altgr)));
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Char('{'), altgr)));
        assert_eq!(app.chat.draft_text(), "@{");

        handle_event(&mut app, ctrl('s'));
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Char('\\'), altgr)));
        assert_eq!(app.settings.api_key_draft(), "\\");
    }

    #[test]
    fn test_alt_alone_is_not_text() {
        let mut app = App::new(&Config::default());
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT)));
        assert_eq!(app.chat.draft_text(), "");
    }

    #[test]
    fn test_settings_keys() {
        let mut app = App::new(&Config::default());
        handle_event(&mut app, ctrl('s'));
        type_text(&mut app, "sk-abc");
        assert_eq!(app.settings.api_key_draft(), "sk-abc");

        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.settings.api_key_draft(), "sk-ab");

        handle_event(&mut app, ctrl('u'));
        assert_eq!(app.settings.api_key_draft(), "");

        handle_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Chat);

        handle_event(&mut app, ctrl('s'));
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Chat);
    }

    #[test]
    fn test_mouse_scroll_only_inside_history() {
        let mut app = App::new(&Config::default());
        for text in ["a", "b", "c"] {
            type_text(&mut app, text);
            handle_event(&mut app, key(KeyCode::Enter));
        }
        app.history_area = Some(Rect::new(0, 1, 40, 10));

        let scroll_at = |row| {
            AppEvent::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollUp,
                column: 5,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };

        handle_event(&mut app, scroll_at(20));
        assert_eq!(app.history_anchor, None);

        handle_event(&mut app, scroll_at(3));
        assert_eq!(app.history_anchor, Some(1));
    }
}

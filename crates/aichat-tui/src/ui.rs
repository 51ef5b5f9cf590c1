use aichat_core::{format_date_only, format_time_only, Author, Message};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use crate::app::{App, Screen};
use crate::input::{first_visible_line, horizontal_offset, visible_slice};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠤", "⠇", "⠏"];

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Chat => render_chat_screen(app, frame, body_area),
        Screen::Settings => render_settings_screen(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.toast.is_some() {
        render_toast(app, frame, body_area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = match app.screen {
        Screen::Chat => " チャット ",
        Screen::Settings => " 設定 ",
    };

    let mut spans = vec![
        Span::styled(title, Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ];

    if app.screen == Screen::Chat {
        let delete_style = if app.chat.can_clear_history() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[^X 削除]", delete_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled("[^S 設定]", Style::default().fg(Color::White)));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints: &[(&str, &str)] = match app.screen {
        Screen::Chat => &[
            (" Enter ", " 送信 "),
            (" Alt+Enter ", " 改行 "),
            (" ^O ", " カメラ "),
            (" PgUp/PgDn ", " スクロール "),
            (" ^Q ", " 終了 "),
        ],
        Screen::Settings => &[
            (" Enter ", " 完了 "),
            (" ^U ", " クリア "),
            (" Esc ", " 戻る "),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(k, label)| [Span::styled(*k, key_style), Span::styled(*label, label_style)])
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chat_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let draft_lines = app.chat.draft_text().split('\n').count() as u16;
    let input_height = draft_lines.clamp(1, app.input_max_lines) + 2; // +2 for borders

    let [history_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(input_height),
    ])
    .areas(area);

    app.history_area = Some(history_area);

    render_history(app, frame, history_area);
    render_input(app, frame, input_area);
}

fn render_history(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(anchor) = app.anchor_index() else {
        let hint = Paragraph::new(Span::styled(
            "メッセージはまだありません",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(hint, inner);
        return;
    };

    let lines = history_lines(&app.chat.messages()[..=anchor], inner.width, inner.height);
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

/// Lay messages out bottom-up, newest first, until `height` rows are filled.
/// Returns exactly the rows to draw, top to bottom, padded at the top so the
/// newest message sits against the input.
fn history_lines(messages: &[Message], width: u16, height: u16) -> Vec<Line<'static>> {
    let height = height as usize;
    let mut cards: Vec<Vec<Line<'static>>> = Vec::new();
    let mut used = 0;

    for msg in messages.iter().rev() {
        if used >= height {
            break;
        }
        let card = message_card(msg, width);
        used += card.len() + 1; // blank separator row
        cards.push(card);
    }

    let mut rows: Vec<Line<'static>> = Vec::with_capacity(used);
    for card in cards.into_iter().rev() {
        rows.extend(card);
        rows.push(Line::default());
    }
    // Drop the separator under the newest card
    rows.pop();

    if rows.len() > height {
        rows.drain(..rows.len() - height);
        return rows;
    }
    let mut padded = vec![Line::default(); height - rows.len()];
    padded.extend(rows);
    padded
}

/// Render one message as a card. AI cards sit on the left with a badge and
/// the stamp column to their right; user cards sit on the right with the
/// stamp column to their left. The column holds the date above the time and
/// is aligned with the bottom of the card.
fn message_card(msg: &Message, width: u16) -> Vec<Line<'static>> {
    let date = format_date_only(msg.created_at());
    let time = format_time_only(msg.created_at());
    let stamp_width = date.width().max(time.width());

    let badge = match msg.author() {
        Author::Ai => format!("{} ", Author::Ai.label()),
        Author::User => String::new(),
    };
    let text_width = (width as usize * 3 / 4)
        .saturating_sub(badge.len() + stamp_width + 1)
        .max(4);

    let rows = wrap_text(msg.text(), text_width);
    let card_width = rows.iter().map(|r| r.width()).max().unwrap_or(0);
    let height = rows.len().max(2);

    let stamp_style = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(height);

    for i in 0..height {
        let stamp = if i == height - 2 {
            date.as_str()
        } else if i == height - 1 {
            time.as_str()
        } else {
            ""
        };
        // Rows past the end of the text leave the card area blank
        let body = rows.get(i).map(|row| pad_to_width(row, card_width));

        let line = match msg.author() {
            Author::Ai => {
                let body_style = Style::default().fg(Color::Black).bg(Color::Yellow);
                let lead = if i == 0 {
                    Span::styled(badge.clone(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                } else {
                    Span::raw(" ".repeat(badge.len()))
                };
                let body = match body {
                    Some(text) => Span::styled(text, body_style),
                    None => Span::raw(" ".repeat(card_width)),
                };
                Line::from(vec![
                    lead,
                    body,
                    Span::raw(" "),
                    Span::styled(stamp.to_string(), stamp_style),
                ])
            }
            Author::User => {
                let body_style = Style::default().fg(Color::Black).bg(Color::Cyan);
                let body = match body {
                    Some(text) => Span::styled(text, body_style),
                    None => Span::raw(" ".repeat(card_width)),
                };
                // Stamps are right-aligned inside their column
                let stamp = format!("{}{}", " ".repeat(stamp_width - stamp.width()), stamp);
                Line::from(vec![
                    Span::styled(stamp, stamp_style),
                    Span::raw(" "),
                    body,
                ])
                .alignment(Alignment::Right)
            }
        };
        lines.push(line);
    }
    lines
}

fn pad_to_width(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

/// Wrap text to `width` display columns. Breaks at the last space when there
/// is one on the row, otherwise mid-word (CJK text has no spaces).
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for source_line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;

        for c in source_line.chars() {
            let w = c.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                if c == ' ' {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                    continue;
                }
                match row.rfind(' ') {
                    Some(space) if space > 0 => {
                        let rest = row.split_off(space + 1);
                        rows.push(row.trim_end().to_string());
                        row = rest;
                    }
                    _ => rows.push(std::mem::take(&mut row)),
                }
                row_width = row.chars().map(|c| c.width().unwrap_or(0)).sum();
            }
            row.push(c);
            row_width += w;
        }
        rows.push(row);
    }
    rows
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let send_control = if app.chat.is_busy() {
        let frame_idx = app.animation_frame % SPINNER.len();
        Span::styled(format!(" {} ", SPINNER[frame_idx]), Style::default().fg(Color::Yellow))
    } else if app.chat.is_send_enabled() {
        Span::styled(" 送信 ⏎ ", Style::default().fg(Color::Cyan).bold())
    } else {
        Span::styled(" 送信 ⏎ ", Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" メッセージ ")
        .title(Line::from(send_control).alignment(Alignment::Right));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = app.chat.draft_text();
    if draft.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "メッセージを入力してください",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(placeholder, inner);
        frame.set_cursor_position((inner.x, inner.y));
        return;
    }

    let (cursor_line, cursor_col) = app.draft_cursor.line_col(draft);
    let visible = inner.height as usize;
    let first = first_visible_line(cursor_line, visible);
    let offset = horizontal_offset(cursor_col, inner.width as usize);

    let lines: Vec<Line> = draft
        .split('\n')
        .skip(first)
        .take(visible)
        .map(|l| Line::from(visible_slice(l, offset, inner.width as usize)))
        .collect();

    let input = Paragraph::new(lines).style(Style::default().fg(Color::Cyan));
    frame.render_widget(input, inner);

    frame.set_cursor_position((
        inner.x + (cursor_col - offset) as u16,
        inner.y + (cursor_line - first) as u16,
    ));
}

fn render_settings_screen(app: &App, frame: &mut Frame, area: Rect) {
    let [label_area, input_area, status_area, _] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new("APIキー：").bold(), label_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Line::from(" ^U クリア ").alignment(Alignment::Right));
    let inner = block.inner(input_area);
    frame.render_widget(block, input_area);

    let key = app.settings.api_key_draft();
    if key.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "APIキーを入力してください",
                Style::default().fg(Color::DarkGray),
            )),
            inner,
        );
        frame.set_cursor_position((inner.x, inner.y));
    } else {
        let masked = mask_key(key);
        let cursor_col: usize = masked
            .chars()
            .take(app.api_key_cursor.pos())
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let offset = horizontal_offset(cursor_col, inner.width as usize);
        let visible = visible_slice(&masked, offset, inner.width as usize);

        frame.render_widget(Paragraph::new(visible).style(Style::default().fg(Color::Cyan)), inner);
        frame.set_cursor_position((inner.x + (cursor_col - offset) as u16, inner.y));
    }

    let status = Paragraph::new(format!(
        "{} 文字（保存されません）",
        key.chars().count()
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

/// Mask all but the last four characters, one `*` per hidden character.
/// Keys of four characters or fewer are masked entirely.
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    let hidden = if count <= 4 { count } else { count - 4 };
    key.chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { c })
        .collect()
}

fn render_toast(app: &App, frame: &mut Frame, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };

    let text_width = toast.text.chars().map(|c| c.width().unwrap_or(0)).sum::<usize>() as u16;
    let width = (text_width + 4).min(area.width);
    let height = 3.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    // Float just above the input box
    let y = area.y + area.height.saturating_sub(height + 6);
    let popup_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup_area);
    let popup = Paragraph::new(toast.text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(popup, popup_area);
}

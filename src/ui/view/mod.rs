//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件。列表内容完全来自 ViewController 的渲染指令

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::form::FormField;
use super::state::{App, AppMode, ConfirmAction};
use crate::controller::{ListBody, PostRow, RenderInstruction, UiMode};
use components::{controls_line, field_line, render_dialog_framework};
use layouts::centered_rect;

/// 空列表占位文本
pub const EMPTY_PLACEHOLDER: &str = "No entries yet.";

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let instruction = app.controller.render();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(6), // 表单
            Constraint::Min(5),    // 留言列表
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_form(frame, app, instruction.mode, chunks[1]);
    render_posts(frame, app, &instruction, chunks[2]);
    render_help(frame, app, chunks[3]);

    if let AppMode::Confirm(action) = &app.mode {
        render_confirm_dialog(frame, app, action);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(format!("📖 {}", app.controller.display().title))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_form(frame: &mut Frame, app: &App, mode: UiMode, area: Rect) {
    let focused = app.mode == AppMode::Composing;
    let title = match mode {
        UiMode::Creating => "New entry".to_string(),
        UiMode::Editing { position } => format!("Editing entry {}", position + 1),
    };

    let mut lines: Vec<Line> = [FormField::Author, FormField::Message, FormField::ImageLink]
        .into_iter()
        .map(|field| {
            field_line(
                field.label(),
                app.form.value(field),
                focused && app.form.active == field,
                field != FormField::ImageLink,
            )
        })
        .collect();
    lines.push(controls_line(mode.controls()));

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(form, area);
}

fn post_item(row: &PostRow, editing: bool) -> ListItem<'static> {
    let mut header = vec![
        Span::styled(
            row.author.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(row.timestamp.clone(), Style::default().fg(Color::DarkGray)),
    ];
    if editing {
        header.push(Span::styled("  ✎ editing", Style::default().fg(Color::Cyan)));
    }

    let mut lines = vec![Line::from(header)];
    lines.extend(row.message.lines().map(|line| Line::from(format!("  {line}"))));
    if let Some(link) = &row.image_link {
        lines.push(Line::from(Span::styled(
            format!("  🖼 {link}"),
            Style::default().fg(Color::Blue),
        )));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}

fn render_posts(frame: &mut Frame, app: &App, instruction: &RenderInstruction, area: Rect) {
    let block = Block::default().title("Entries").borders(Borders::ALL);

    let rows = match &instruction.body {
        ListBody::Empty => {
            let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }
        ListBody::Rows(rows) => rows,
    };

    let editing = match instruction.mode {
        UiMode::Editing { position } => Some(position),
        UiMode::Creating => None,
    };
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| post_item(row, editing == Some(row.index)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if app.mode != AppMode::Composing {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Composing => "[Enter] next field / submit  [Ctrl+S] submit  [↑/↓] field  [Tab] list  [Esc] cancel",
        AppMode::Browsing => "[j/k] navigate  [e] edit  [d] delete  [Tab] form  [Esc] cancel edit  [q] quit",
        AppMode::Confirm(_) => "[y] confirm  [n] cancel",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_confirm_dialog(frame: &mut Frame, app: &App, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "⚠️ Confirm", Color::Red);

    let message = match action {
        ConfirmAction::Delete(position) => {
            let author = app
                .controller
                .store()
                .get(*position)
                .map(|post| post.author.as_str())
                .unwrap_or("?");
            format!("Really delete the entry by {}?", author)
        }
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] confirm  [n] cancel", message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(dialog, inner);
}

//! 通用 UI 组件
//!
//! 对话框、表单行、按钮提示等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear},
};

use crate::controller::Controls;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 表单中的一行 `标签: 值`
pub fn field_line(label: &str, value: &str, is_focused: bool, required: bool) -> Line<'static> {
    let (display, value_style) = if value.is_empty() {
        let placeholder = if required { "<required>" } else { "<optional>" };
        (placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (value.replace('\n', " ↵ "), Style::default())
    };

    let label_style = if is_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let cursor = if is_focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:>10}: "), label_style),
        Span::styled(display, value_style),
        Span::styled(cursor, Style::default().fg(Color::Yellow)),
    ])
}

/// [组件] 按当前模式显示可用的按钮
pub fn controls_line(controls: Controls) -> Line<'static> {
    let button = |key: &str, label: &str, color: Color| {
        vec![
            Span::styled(
                format!("[{key}] {label}"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
        ]
    };

    let mut spans = Vec::new();
    if controls.submit {
        spans.extend(button("Ctrl+S", "Submit", Color::Green));
    }
    if controls.update {
        spans.extend(button("Ctrl+S", "Update", Color::Cyan));
    }
    if controls.cancel {
        spans.extend(button("Esc", "Cancel", Color::Red));
    }
    Line::from(spans)
}

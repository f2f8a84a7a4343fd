//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 焦点切换
    FocusForm,
    FocusList,
    NextField,
    PrevField,

    // 列表操作
    StartEdit,
    StartDelete,

    // 表单/通用交互
    Advance,     // Enter：跳到下一个字段，最后一个字段时提交
    Submit,      // Ctrl+Enter / Ctrl+S / 确认框中的 y
    Cancel,      // Esc / n
    Input(char), // 输入字符
    NewLine,     // Alt+Enter：内容字段换行
    DeleteChar,  // Backspace
}

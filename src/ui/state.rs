//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use super::form::PostForm;
use crate::controller::ViewController;

/// 应用状态
pub struct App {
    pub controller: ViewController,
    pub form: PostForm,
    pub mode: AppMode,
    pub selected_index: usize,
    pub message: Option<String>,
}

/// 应用模式（焦点所在位置）
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Composing,
    Browsing,
    Confirm(ConfirmAction),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Delete(usize), // 待删除留言的位置
}

impl App {
    /// 创建新的应用实例
    pub fn new(controller: ViewController) -> Self {
        Self {
            controller,
            form: PostForm::default(),
            mode: AppMode::Composing,
            selected_index: 0,
            message: None,
        }
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        let len = self.controller.store().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }
}

//! 业务逻辑处理 (Update/Dispatch)
//!
//! 将 Action 交给 ViewController，并执行其返回的 Effect

use super::actions::Action;
use super::form::FormField;
use super::state::{App, AppMode, ConfirmAction};
use crate::controller::{Effect, UiMode};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::FocusForm => self.mode = AppMode::Composing,
            Action::FocusList => {
                self.clamp_selection();
                self.mode = AppMode::Browsing;
            }
            Action::NextField => self.form.focus_next(),
            Action::PrevField => self.form.focus_prev(),

            Action::StartEdit => self.start_edit(),
            Action::StartDelete => self.start_delete(),

            Action::Advance => {
                if self.form.active == FormField::ImageLink {
                    self.submit();
                } else {
                    self.form.focus_next();
                }
            }

            Action::Submit => match self.mode {
                AppMode::Composing => self.submit(),
                AppMode::Confirm(_) => self.execute_confirm(true),
                AppMode::Browsing => {}
            },

            Action::Cancel => self.cancel(),

            Action::Input(c) => {
                if self.mode == AppMode::Composing {
                    self.form.push_char(c);
                }
            }

            Action::NewLine => {
                if self.mode == AppMode::Composing {
                    self.form.push_newline();
                }
            }

            Action::DeleteChar => {
                if self.mode == AppMode::Composing {
                    self.form.backspace();
                }
            }
        }
        false
    }

    /// 执行控制器返回的副作用
    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Prompt(text) => self.message = Some(text),
                Effect::ResetForm => self.form.reset(),
                Effect::FillForm(values) => self.form.fill(values),
                Effect::Rerender => self.clamp_selection(),
            }
        }
    }

    // ============ 导航相关 ============

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.controller.store().len() {
            self.selected_index += 1;
        }
    }

    // ============ 提交相关 ============

    /// 提交表单（新建或更新）
    pub fn submit(&mut self) {
        let was_editing = self.controller.store().is_editing();
        let values = self.form.values.clone();
        let effects =
            self.controller
                .on_submit(&values.author, &values.message, &values.image_link);

        if effects.contains(&Effect::ResetForm) {
            if was_editing {
                self.message = Some("Entry updated".to_string());
            } else {
                self.selected_index = 0;
                self.message = Some("Entry posted".to_string());
            }
        }
        self.apply(effects);
    }

    // ============ 编辑相关 ============

    pub fn start_edit(&mut self) {
        if self.controller.store().is_empty() {
            return;
        }
        let effects = self.controller.on_edit_requested(self.selected_index);
        if !effects.is_empty() {
            self.mode = AppMode::Composing;
            self.message = Some(format!("Editing entry {}", self.selected_index + 1));
        }
        self.apply(effects);
    }

    // ============ 删除相关 ============

    pub fn start_delete(&mut self) {
        if !self.controller.store().is_empty() {
            self.mode = AppMode::Confirm(ConfirmAction::Delete(self.selected_index));
        }
    }

    /// 执行确认操作
    pub fn execute_confirm(&mut self, confirmed: bool) {
        let AppMode::Confirm(ConfirmAction::Delete(position)) = self.mode else {
            return;
        };

        let effects = self.controller.on_delete_requested(position, confirmed);
        if effects.contains(&Effect::ResetForm) {
            self.message = Some("Entry deleted, edit abandoned".to_string());
        } else if !effects.is_empty() {
            self.message = Some("Entry deleted".to_string());
        }
        self.apply(effects);
        self.mode = AppMode::Browsing;
    }

    // ============ 通用操作 ============

    /// 取消当前操作：确认框 -> 拒绝；编辑中 -> 取消编辑；否则切换焦点
    pub fn cancel(&mut self) {
        match self.mode {
            AppMode::Confirm(_) => self.execute_confirm(false),
            _ if matches!(self.controller.mode(), UiMode::Editing { .. }) => {
                let effects = self.controller.on_cancel_requested();
                self.apply(effects);
                self.message = Some("Edit cancelled".to_string());
            }
            AppMode::Composing => {
                self.clamp_selection();
                self.mode = AppMode::Browsing;
            }
            AppMode::Browsing => self.message = None,
        }
    }
}

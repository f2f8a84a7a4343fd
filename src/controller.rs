//! ViewController：界面事件 -> PostStore 操作，PostStore 状态 -> 渲染指令
//!
//! 控制器本身不持有界面状态。每个事件返回一组 [`Effect`]，
//! 由界面层负责执行（重置表单、填充表单、提示用户、重绘）。

use log::{debug, error, info};

use crate::config::DisplayConfig;
use crate::models::{Post, PostStore, StoreError};

/// 用户提示：姓名和内容必填
pub const REQUIRED_PROMPT: &str = "name and message are both required";

/// 界面需要执行的副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Prompt(String),
    ResetForm,
    FillForm(FormValues),
    Rerender,
}

/// 表单字段值
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormValues {
    pub author: String,
    pub message: String,
    pub image_link: String,
}

impl From<&Post> for FormValues {
    fn from(post: &Post) -> Self {
        Self {
            author: post.author.clone(),
            message: post.message.clone(),
            image_link: post.image_link.clone().unwrap_or_default(),
        }
    }
}

/// 界面模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Creating,
    Editing { position: usize },
}

/// 各按钮是否可见
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub submit: bool,
    pub update: bool,
    pub cancel: bool,
}

impl UiMode {
    pub fn controls(self) -> Controls {
        match self {
            UiMode::Creating => Controls {
                submit: true,
                update: false,
                cancel: false,
            },
            UiMode::Editing { .. } => Controls {
                submit: false,
                update: true,
                cancel: true,
            },
        }
    }
}

/// 一行留言的视图模型
#[derive(Debug, Clone, PartialEq)]
pub struct PostRow {
    pub index: usize,
    pub author: String,
    pub message: String,
    pub timestamp: String,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListBody {
    Empty,
    Rows(Vec<PostRow>),
}

/// 渲染指令
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction {
    pub mode: UiMode,
    pub body: ListBody,
}

pub struct ViewController {
    store: PostStore,
    display: DisplayConfig,
}

impl ViewController {
    pub fn new(store: PostStore, display: DisplayConfig) -> Self {
        Self { store, display }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn mode(&self) -> UiMode {
        match self.store.editing_position() {
            Some(position) => UiMode::Editing { position },
            None => UiMode::Creating,
        }
    }

    /// 提交表单：编辑中则提交修改，否则新建
    pub fn on_submit(&mut self, author: &str, message: &str, image_link: &str) -> Vec<Effect> {
        let result = if self.store.is_editing() {
            self.store
                .commit_edit(author, message, image_link)
                .map(|post| ("updated", post.id))
        } else {
            self.store
                .create(author, message, image_link)
                .map(|post| ("created", post.id))
        };

        match result {
            Ok((verb, id)) => {
                info!("post {} {}", id, verb);
                vec![Effect::ResetForm, Effect::Rerender]
            }
            Err(StoreError::Validation) => {
                debug!("submit rejected: empty name or message");
                vec![Effect::Prompt(REQUIRED_PROMPT.to_string())]
            }
            Err(err) => {
                error!("submit failed: {}", err);
                Vec::new()
            }
        }
    }

    pub fn on_edit_requested(&mut self, position: usize) -> Vec<Effect> {
        match self.store.begin_edit(position) {
            Ok(post) => {
                info!("editing post {} at position {}", post.id, position);
                vec![Effect::FillForm(FormValues::from(post)), Effect::Rerender]
            }
            Err(err) => {
                error!("edit request failed: {}", err);
                Vec::new()
            }
        }
    }

    pub fn on_cancel_requested(&mut self) -> Vec<Effect> {
        if self.store.is_editing() {
            info!("edit cancelled");
        }
        self.store.cancel_edit();
        vec![Effect::ResetForm, Effect::Rerender]
    }

    /// 删除留言。`confirmed` 为用户在确认框中的选择
    pub fn on_delete_requested(&mut self, position: usize, confirmed: bool) -> Vec<Effect> {
        if !confirmed {
            debug!("delete of position {} declined", position);
            return Vec::new();
        }

        let was_editing = self.store.is_editing();
        match self.store.delete(position) {
            Ok(post) => {
                info!("post {} deleted", post.id);
                if was_editing && !self.store.is_editing() {
                    info!("edit abandoned: post under edit was deleted");
                    vec![Effect::ResetForm, Effect::Rerender]
                } else {
                    vec![Effect::Rerender]
                }
            }
            Err(err) => {
                error!("delete failed: {}", err);
                Vec::new()
            }
        }
    }

    /// 生成渲染指令（最新在前）
    pub fn render(&self) -> RenderInstruction {
        let body = if self.store.is_empty() {
            ListBody::Empty
        } else {
            ListBody::Rows(
                self.store
                    .list()
                    .iter()
                    .enumerate()
                    .map(|(index, post)| PostRow {
                        index,
                        author: post.author.clone(),
                        message: post.message.clone(),
                        timestamp: post.timestamp(
                            &self.display.timestamp_format,
                            &self.display.edited_marker,
                        ),
                        image_link: post.image_link.clone(),
                    })
                    .collect(),
            )
        };

        RenderInstruction {
            mode: self.mode(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewController {
        ViewController::new(PostStore::new(), DisplayConfig::default())
    }

    fn rows(controller: &ViewController) -> Vec<PostRow> {
        match controller.render().body {
            ListBody::Rows(rows) => rows,
            ListBody::Empty => Vec::new(),
        }
    }

    #[test]
    fn test_empty_render() {
        let controller = controller();
        let instruction = controller.render();
        assert_eq!(instruction.body, ListBody::Empty);
        assert_eq!(instruction.mode, UiMode::Creating);
        assert!(instruction.mode.controls().submit);
        assert!(!instruction.mode.controls().update);
    }

    #[test]
    fn test_submit_creates_post() {
        let mut controller = controller();
        let effects = controller.on_submit("Ann", "Hi", " ");
        assert_eq!(effects, vec![Effect::ResetForm, Effect::Rerender]);

        let rows = rows(&controller);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].author, "Ann");
        assert_eq!(rows[0].image_link, None);
        assert!(!rows[0].timestamp.contains("(edited)"));
    }

    #[test]
    fn test_submit_validation_prompts() {
        let mut controller = controller();
        let effects = controller.on_submit("", "Hi", "");
        assert_eq!(effects, vec![Effect::Prompt(REQUIRED_PROMPT.to_string())]);
        assert_eq!(controller.render().body, ListBody::Empty);
    }

    #[test]
    fn test_edit_flow() {
        let mut controller = controller();
        controller.on_submit("Ann", "Hi", "cat.png");
        controller.on_submit("Bo", "Yo", "");

        let effects = controller.on_edit_requested(1);
        assert_eq!(
            effects,
            vec![
                Effect::FillForm(FormValues {
                    author: "Ann".to_string(),
                    message: "Hi".to_string(),
                    image_link: "cat.png".to_string(),
                }),
                Effect::Rerender,
            ]
        );
        let mode = controller.mode();
        assert_eq!(mode, UiMode::Editing { position: 1 });
        assert!(mode.controls().update && mode.controls().cancel);
        assert!(!mode.controls().submit);

        // 编辑模式下提交 = 更新
        let effects = controller.on_submit("Ann", "Edited", "");
        assert_eq!(effects, vec![Effect::ResetForm, Effect::Rerender]);
        assert_eq!(controller.mode(), UiMode::Creating);

        let rows = rows(&controller);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].author, "Bo");
        assert_eq!(rows[1].message, "Edited");
        assert!(rows[1].timestamp.ends_with(" (edited)"));
    }

    #[test]
    fn test_invalid_update_stays_in_editing() {
        let mut controller = controller();
        controller.on_submit("Ann", "Hi", "");
        controller.on_edit_requested(0);

        let effects = controller.on_submit("Ann", "", "");
        assert_eq!(effects, vec![Effect::Prompt(REQUIRED_PROMPT.to_string())]);
        assert_eq!(controller.mode(), UiMode::Editing { position: 0 });
    }

    #[test]
    fn test_cancel_returns_to_creating() {
        let mut controller = controller();
        controller.on_submit("Ann", "Hi", "");
        controller.on_edit_requested(0);

        let effects = controller.on_cancel_requested();
        assert_eq!(effects, vec![Effect::ResetForm, Effect::Rerender]);
        assert_eq!(controller.mode(), UiMode::Creating);
    }

    #[test]
    fn test_declined_delete_is_noop() {
        let mut controller = controller();
        controller.on_submit("Ann", "Hi", "");
        let before = controller.render();

        assert!(controller.on_delete_requested(0, false).is_empty());
        assert_eq!(controller.render(), before);
    }

    #[test]
    fn test_delete_edited_post_abandons_edit() {
        let mut controller = controller();
        controller.on_submit("Ann", "Hi", "");
        controller.on_submit("Bo", "Yo", "");
        controller.on_edit_requested(0);

        let effects = controller.on_delete_requested(0, true);
        assert_eq!(effects, vec![Effect::ResetForm, Effect::Rerender]);
        assert_eq!(controller.mode(), UiMode::Creating);
        assert_eq!(rows(&controller).len(), 1);
    }

    #[test]
    fn test_delete_other_post_keeps_edit() {
        let mut controller = controller();
        controller.on_submit("Ann", "Hi", "");
        controller.on_submit("Bo", "Yo", "");
        controller.on_edit_requested(1);

        let effects = controller.on_delete_requested(0, true);
        assert_eq!(effects, vec![Effect::Rerender]);
        assert_eq!(controller.mode(), UiMode::Editing { position: 0 });
    }

    #[test]
    fn test_out_of_bounds_requests_change_nothing() {
        let mut controller = controller();
        controller.on_submit("Ann", "Hi", "");

        assert!(controller.on_edit_requested(3).is_empty());
        assert!(controller.on_delete_requested(3, true).is_empty());
        assert_eq!(controller.mode(), UiMode::Creating);
        assert_eq!(rows(&controller).len(), 1);
    }

    #[test]
    fn test_row_timestamp_uses_display_config() {
        let display = DisplayConfig {
            timestamp_format: "posted".to_string(),
            edited_marker: "!".to_string(),
            ..DisplayConfig::default()
        };
        let mut controller = ViewController::new(PostStore::new(), display);
        controller.on_submit("Ann", "Hi", "");
        assert_eq!(rows(&controller)[0].timestamp, "posted");

        controller.on_edit_requested(0);
        controller.on_submit("Ann", "Hi again", "");
        assert_eq!(rows(&controller)[0].timestamp, "posted!");
    }

    #[test]
    fn test_render_survives_invalid_timestamp_format() {
        let display = DisplayConfig {
            timestamp_format: "%Q".to_string(),
            ..DisplayConfig::default()
        };
        let mut controller = ViewController::new(PostStore::new(), display);
        controller.on_submit("Ann", "Hi", "");

        let rows = rows(&controller);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].timestamp.is_empty());
    }
}

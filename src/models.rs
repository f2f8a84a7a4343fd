use std::fmt::Write;

use chrono::{DateTime, Local};
use thiserror::Error;
use uuid::Uuid;

/// 留言簿操作错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("name and message are both required")]
    Validation,

    #[error("position {position} is out of bounds ({len} posts)")]
    Index { position: usize, len: usize },

    #[error("no post is currently being edited")]
    NoActiveEdit,
}

/// 留言
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub author: String,
    pub message: String,
    pub image_link: Option<String>, // None 表示没有图片
    pub posted_at: DateTime<Local>,
    pub edited: bool,
}

impl Post {
    fn new(draft: PostDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: draft.author,
            message: draft.message,
            image_link: draft.image_link,
            posted_at: Local::now(),
            edited: false,
        }
    }

    /// 原地覆盖内容，保留 id
    fn apply(&mut self, draft: PostDraft) {
        self.author = draft.author;
        self.message = draft.message;
        self.image_link = draft.image_link;
        self.posted_at = Local::now();
        self.edited = true;
    }

    /// 按给定格式生成时间戳文本，编辑过的留言附加标记。
    /// 格式无效时回退到 RFC 3339
    pub fn timestamp(&self, format: &str, edited_marker: &str) -> String {
        let mut text = String::new();
        if write!(text, "{}", self.posted_at.format(format)).is_err() {
            text = self.posted_at.to_rfc3339();
        }
        if self.edited {
            text.push_str(edited_marker);
        }
        text
    }
}

/// 已校验的输入（去除首尾空白）
#[derive(Debug, Clone, PartialEq)]
struct PostDraft {
    author: String,
    message: String,
    image_link: Option<String>,
}

impl PostDraft {
    fn parse(author: &str, message: &str, image_link: &str) -> Result<Self, StoreError> {
        let author = author.trim();
        let message = message.trim();
        if author.is_empty() || message.is_empty() {
            return Err(StoreError::Validation);
        }

        let image_link = image_link.trim();
        Ok(Self {
            author: author.to_string(),
            message: message.to_string(),
            image_link: (!image_link.is_empty()).then(|| image_link.to_string()),
        })
    }
}

/// 留言列表（最新在前）及编辑游标
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    edit_cursor: Option<usize>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新建留言并插入到最前面
    pub fn create(
        &mut self,
        author: &str,
        message: &str,
        image_link: &str,
    ) -> Result<&Post, StoreError> {
        let draft = PostDraft::parse(author, message, image_link)?;
        self.posts.insert(0, Post::new(draft));

        // 所有位置后移一位，游标跟随原来的留言
        if let Some(cursor) = self.edit_cursor.as_mut() {
            *cursor += 1;
        }

        Ok(&self.posts[0])
    }

    /// 开始编辑，替换已有的编辑会话
    pub fn begin_edit(&mut self, position: usize) -> Result<&Post, StoreError> {
        self.check_bounds(position)?;
        self.edit_cursor = Some(position);
        Ok(&self.posts[position])
    }

    /// 提交编辑。校验失败时编辑会话保持打开
    pub fn commit_edit(
        &mut self,
        author: &str,
        message: &str,
        image_link: &str,
    ) -> Result<&Post, StoreError> {
        let position = self.edit_cursor.ok_or(StoreError::NoActiveEdit)?;
        let draft = PostDraft::parse(author, message, image_link)?;

        self.edit_cursor = None;
        self.posts[position].apply(draft);
        Ok(&self.posts[position])
    }

    pub fn cancel_edit(&mut self) {
        self.edit_cursor = None;
    }

    /// 删除留言，后面的位置整体前移
    pub fn delete(&mut self, position: usize) -> Result<Post, StoreError> {
        self.check_bounds(position)?;
        let removed = self.posts.remove(position);

        self.edit_cursor = match self.edit_cursor {
            Some(cursor) if cursor == position => None,
            Some(cursor) if cursor > position => Some(cursor - 1),
            other => other,
        };

        Ok(removed)
    }

    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, position: usize) -> Option<&Post> {
        self.posts.get(position)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_cursor.is_some()
    }

    pub fn editing_position(&self) -> Option<usize> {
        self.edit_cursor
    }

    fn check_bounds(&self, position: usize) -> Result<(), StoreError> {
        if position < self.posts.len() {
            Ok(())
        } else {
            Err(StoreError::Index {
                position,
                len: self.posts.len(),
            })
        }
    }
}

//! 留言表单缓冲区
//!
//! 三个输入框：姓名、内容、图片链接

use crate::controller::FormValues;

/// 输入字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Author,
    Message,
    ImageLink,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Author => "Name",
            FormField::Message => "Message",
            FormField::ImageLink => "Image link",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Author => FormField::Message,
            FormField::Message => FormField::ImageLink,
            FormField::ImageLink => FormField::Author,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Author => FormField::ImageLink,
            FormField::Message => FormField::Author,
            FormField::ImageLink => FormField::Message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostForm {
    pub values: FormValues,
    pub active: FormField,
}

impl PostForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Author => &self.values.author,
            FormField::Message => &self.values.message,
            FormField::ImageLink => &self.values.image_link,
        }
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.active {
            FormField::Author => &mut self.values.author,
            FormField::Message => &mut self.values.message,
            FormField::ImageLink => &mut self.values.image_link,
        }
    }

    /// 向当前字段追加字符，忽略控制字符
    pub fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.active_value_mut().push(ch);
        }
    }

    /// 仅内容字段支持多行
    pub fn push_newline(&mut self) {
        if self.active == FormField::Message {
            self.values.message.push('\n');
        }
    }

    pub fn backspace(&mut self) {
        self.active_value_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub fn focus_prev(&mut self) {
        self.active = self.active.prev();
    }

    /// 清空所有字段，焦点回到姓名
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 用已有留言填充表单（编辑时）
    pub fn fill(&mut self, values: FormValues) {
        self.values = values;
        self.active = FormField::Author;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_goes_to_active_field() {
        let mut form = PostForm::default();
        "Ann".chars().for_each(|c| form.push_char(c));
        form.focus_next();
        "Hi!".chars().for_each(|c| form.push_char(c));
        form.push_char('\u{7}');
        form.backspace();

        assert_eq!(form.value(FormField::Author), "Ann");
        assert_eq!(form.value(FormField::Message), "Hi");
        assert_eq!(form.value(FormField::ImageLink), "");
    }

    #[test]
    fn test_newline_only_in_message() {
        let mut form = PostForm::default();
        form.push_char('A');
        form.push_newline();
        form.focus_next();
        form.push_char('a');
        form.push_newline();
        form.push_char('b');
        form.focus_next();
        form.push_newline();

        assert_eq!(form.value(FormField::Author), "A");
        assert_eq!(form.value(FormField::Message), "a\nb");
        assert_eq!(form.value(FormField::ImageLink), "");
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = PostForm::default();
        form.focus_prev();
        assert_eq!(form.active, FormField::ImageLink);
        form.focus_next();
        assert_eq!(form.active, FormField::Author);
    }

    #[test]
    fn test_fill_and_reset() {
        let mut form = PostForm::default();
        form.active = FormField::ImageLink;
        form.fill(FormValues {
            author: "Bo".to_string(),
            message: "Yo".to_string(),
            image_link: String::new(),
        });
        assert_eq!(form.active, FormField::Author);
        assert_eq!(form.value(FormField::Message), "Yo");

        form.reset();
        assert_eq!(form, PostForm::default());
    }
}

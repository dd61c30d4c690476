//! Conversation view state and the rendering seam the controller drives.

use crate::types::{ChatMessage, Role};
use std::cell::RefCell;

/// Everything the session controller is allowed to do to the display.
pub trait ChatRenderer {
    /// Appends one message and scrolls it into view.
    fn add_message(&self, role: Role, content: &str);

    fn append_messages(&self, messages: &[ChatMessage]) {
        for message in messages {
            self.add_message(message.role, &message.content);
        }
    }

    /// Replaces the quick-reply set. `None` or an empty slice clears it.
    fn render_options(&self, options: Option<&[String]>);

    /// Empties both the message list and the option set.
    fn clear_messages(&self);

    fn open(&self);
    fn hide(&self);

    fn input_value(&self) -> String;
    fn clear_input(&self);
    fn focus_input(&self);
    fn set_placeholder(&self, placeholder: &str);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Surface {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversationView {
    pub messages: Vec<ChatMessage>,
    pub options: Vec<String>,
    pub surface: Surface,
    pub input: String,
    pub placeholder: String,
    /// Index of the message the list should be scrolled to.
    pub scroll_anchor: Option<usize>,
    /// Bumped on every focus request so the shell can react to repeats.
    pub focus_requests: u64,
}

impl ConversationView {
    pub fn add_message(&mut self, role: Role, content: &str) {
        self.messages.push(ChatMessage::new(role, content));
        self.scroll_anchor = Some(self.messages.len() - 1);
    }

    pub fn render_options(&mut self, options: Option<&[String]>) {
        self.options = options.map(<[String]>::to_vec).unwrap_or_default();
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.options.clear();
        self.scroll_anchor = None;
    }

    pub fn open(&mut self) {
        self.surface = Surface::Open;
    }

    pub fn hide(&mut self) {
        self.surface = Surface::Closed;
    }

    pub fn is_open(&self) -> bool {
        self.surface == Surface::Open
    }

    /// The launcher is shown exactly when the surface is not.
    pub fn launcher_visible(&self) -> bool {
        !self.is_open()
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn request_focus(&mut self) {
        self.focus_requests = self.focus_requests.wrapping_add(1);
    }
}

impl ChatRenderer for RefCell<ConversationView> {
    fn add_message(&self, role: Role, content: &str) {
        self.borrow_mut().add_message(role, content);
    }

    fn render_options(&self, options: Option<&[String]>) {
        self.borrow_mut().render_options(options);
    }

    fn clear_messages(&self) {
        self.borrow_mut().clear_messages();
    }

    fn open(&self) {
        self.borrow_mut().open();
    }

    fn hide(&self) {
        self.borrow_mut().hide();
    }

    fn input_value(&self) -> String {
        self.borrow().input.clone()
    }

    fn clear_input(&self) {
        self.borrow_mut().input.clear();
    }

    fn focus_input(&self) {
        self.borrow_mut().request_focus();
    }

    fn set_placeholder(&self, placeholder: &str) {
        self.borrow_mut().placeholder = placeholder.to_string();
    }
}

//! The guided conversation behind one session: ask for a name, then walk a
//! two-level menu of topics.

use super::content::{PRIMARY_OPTIONS, secondary_options, snippet};
use crate::types::{ChatMessage, SessionPayload, escape_html};

const GREETING: &str = "Hi! I’m the Female Foundry assistant. What’s your name?";
const EMPTY_PROMPT: &str = "Say something or tap one of the options.";
const PICK_PRIMARY: &str = "Pick one of the quick options so I can guide you.";
const PICK_SECONDARY: &str =
    "Choose one of the follow-up options so I can share the right highlights.";
const MISSING_SNIPPET: &str = "I don’t have that snippet yet—try another option.";
const ANYTHING_ELSE: &str = "Anything else you'd like to explore?";

const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];
const RESET_COMMANDS: [&str; 2] = ["reset", "start over"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    AskName,
    MenuPrimary,
    MenuSecondary,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::AskName => "ask_name",
            Stage::MenuPrimary => "menu_primary",
            Stage::MenuSecondary => "menu_secondary",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Conversation {
    session_id: String,
    stage: Stage,
    visitor_name: Option<String>,
    primary_choice: Option<&'static str>,
    history: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            stage: Stage::AskName,
            visitor_name: None,
            primary_choice: None,
            history: vec![ChatMessage::bot(format_bot_message(GREETING))],
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn visitor_name(&self) -> Option<&str> {
        self.visitor_name.as_deref()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// The latest bot line with no options, as sent for a new or reset session.
    pub fn initial_response(&self) -> SessionPayload {
        SessionPayload {
            session_id: self.session_id.clone(),
            messages: self.history.last().cloned().into_iter().collect(),
            options: Vec::new(),
            stage: Some(self.stage.as_str().to_string()),
        }
    }

    /// Starts over under the same identifier.
    pub fn reset(&mut self) -> SessionPayload {
        *self = Self::new(std::mem::take(&mut self.session_id));
        self.initial_response()
    }

    pub fn handle_message(&mut self, message: &str) -> SessionPayload {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            let options = self.current_options();
            return self.respond(&[EMPTY_PROMPT], options);
        }

        let lowered = trimmed.to_lowercase();
        if RESET_COMMANDS.contains(&lowered.as_str()) {
            return self.reset();
        }

        self.history.push(ChatMessage::user(trimmed));

        match self.stage {
            Stage::AskName => {
                let name = title_case(trimmed);
                let greeting =
                    format!("Nice to meet you, {name}! Choose what you’d like to explore:");
                self.visitor_name = Some(name);
                self.stage = Stage::MenuPrimary;
                self.respond(&[greeting.as_str()], PRIMARY_OPTIONS)
            }
            Stage::MenuPrimary => match match_option(trimmed, PRIMARY_OPTIONS) {
                Some(choice) => {
                    self.primary_choice = Some(choice);
                    self.stage = Stage::MenuSecondary;
                    let prompt = format!("Great! Let’s drill into {choice}. Pick a specific topic:");
                    self.respond(&[prompt.as_str()], secondary_options(choice))
                }
                None => self.respond(&[PICK_PRIMARY], PRIMARY_OPTIONS),
            },
            Stage::MenuSecondary => {
                let options = self.current_options();
                let Some(topic) = match_option(trimmed, options) else {
                    return self.respond(&[PICK_SECONDARY], options);
                };
                self.stage = Stage::MenuPrimary;
                self.primary_choice = None;
                match snippet(topic) {
                    Some(info) => self.respond(&[info, ANYTHING_ELSE], PRIMARY_OPTIONS),
                    None => self.respond(&[MISSING_SNIPPET], PRIMARY_OPTIONS),
                }
            }
        }
    }

    fn current_options(&self) -> &'static [&'static str] {
        match (self.stage, self.primary_choice) {
            (Stage::MenuPrimary, _) => PRIMARY_OPTIONS,
            (Stage::MenuSecondary, Some(primary)) => secondary_options(primary),
            _ => &[],
        }
    }

    fn respond(&mut self, lines: &[&str], options: &[&str]) -> SessionPayload {
        let messages: Vec<ChatMessage> = lines
            .iter()
            .map(|line| ChatMessage::bot(format_bot_message(line)))
            .collect();
        self.history.extend(messages.iter().cloned());
        SessionPayload {
            session_id: self.session_id.clone(),
            messages,
            options: options.iter().map(|option| option.to_string()).collect(),
            stage: Some(self.stage.as_str().to_string()),
        }
    }
}

/// Renders plain text as safe bot markup.
///
/// Several lines, or any line starting with a bullet marker, become a
/// `bot-list` with markers stripped; a single line is escaped as is.
pub fn format_bot_message(text: &str) -> String {
    let lines: Vec<&str> = text
        .split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let Some(first) = lines.first() else {
        return String::new();
    };

    let bullet_mode =
        lines.len() > 1 || lines.iter().any(|line| line.starts_with(BULLET_MARKERS));
    if !bullet_mode {
        return escape_html(first);
    }

    let items: String = lines
        .iter()
        .map(|&line| {
            let item = match line.strip_prefix(BULLET_MARKERS) {
                Some(rest) => rest.trim(),
                None => line,
            };
            format!("<li>{}</li>", escape_html(item))
        })
        .collect();
    format!("<ul class='bot-list'>{items}</ul>")
}

/// Every character that ends a line, including the form feed and the Unicode
/// line and paragraph separators. `\r\n` leaves an empty piece that is dropped.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Case-insensitive exact match against the offered labels.
fn match_option(text: &str, options: &[&'static str]) -> Option<&'static str> {
    let lowered = text.trim().to_lowercase();
    options
        .iter()
        .copied()
        .find(|option| option.to_lowercase() == lowered)
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

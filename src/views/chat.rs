use crate::api::HttpChatApi;
use crate::config::ClientConfig;
use crate::controller::SessionController;
use crate::types::{ChatMessage, Role};
use crate::view::{ChatRenderer, ConversationView};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;

const MESSAGES_ID: &str = "chat-messages";
const INPUT_ID: &str = "chat-input";

const SCROLL_TO_NEWEST_JS: &str = r#"
const list = document.getElementById("chat-messages");
if (list) { list.scrollTop = list.scrollHeight; }
"#;

const FOCUS_INPUT_JS: &str = r#"
const input = document.getElementById("chat-input");
if (input) { input.focus(); }
"#;

type WidgetController = SessionController<HttpChatApi, Signal<ConversationView>>;

// Signals are Copy handles, so a write through `&self` goes via a local copy.
impl ChatRenderer for Signal<ConversationView> {
    fn add_message(&self, role: Role, content: &str) {
        let mut view = *self;
        view.with_mut(|state| state.add_message(role, content));
    }

    fn render_options(&self, options: Option<&[String]>) {
        let mut view = *self;
        view.with_mut(|state| state.render_options(options));
    }

    fn clear_messages(&self) {
        let mut view = *self;
        view.with_mut(|state| state.clear_messages());
    }

    fn open(&self) {
        let mut view = *self;
        view.with_mut(|state| state.open());
    }

    fn hide(&self) {
        let mut view = *self;
        view.with_mut(|state| state.hide());
    }

    fn input_value(&self) -> String {
        self.peek().input.clone()
    }

    fn clear_input(&self) {
        let mut view = *self;
        view.with_mut(|state| state.input.clear());
    }

    fn focus_input(&self) {
        let mut view = *self;
        view.with_mut(|state| state.request_focus());
    }

    fn set_placeholder(&self, placeholder: &str) {
        let mut view = *self;
        view.with_mut(|state| state.placeholder = placeholder.to_string());
    }
}

#[component]
pub fn ChatWidget() -> Element {
    let view = use_signal(ConversationView::default);
    let controller = use_hook(|| {
        let api = HttpChatApi::from_config(&ClientConfig::from_env());
        Rc::new(WidgetController::new(api, view))
    });

    use_hook({
        let controller = controller.clone();
        move || {
            spawn(async move {
                controller.create_session().await;
            });
        }
    });

    use_view_effects(view);

    let submit = {
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            spawn(async move {
                controller.submit_input().await;
            });
        }
    };
    let submit_on_enter = submit.clone();

    let reset = {
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            spawn(async move {
                controller.reset_session().await;
            });
        }
    };

    let select = {
        let controller = controller.clone();
        move |label: String| {
            let controller = controller.clone();
            spawn(async move {
                controller.select_option(&label).await;
            });
        }
    };

    let snapshot = view();
    let popup_class = if snapshot.is_open() {
        "chat-popup"
    } else {
        "chat-popup hidden"
    };
    let launcher_class = if snapshot.launcher_visible() {
        "chat-toggle visible"
    } else {
        "chat-toggle"
    };

    rsx! {
        button {
            class: launcher_class,
            r#type: "button",
            onclick: move |_| {
                view.open();
                view.focus_input();
            },
            "Chat"
        }
        div { class: popup_class,
            div { class: "chat-header",
                span { class: "chat-title", "Female Foundry" }
                div { class: "chat-actions",
                    button {
                        class: "chat-icon-btn", r#type: "button", title: "Start over",
                        onclick: move |_| reset(),
                        "↺"
                    }
                    button {
                        class: "chat-icon-btn", r#type: "button", title: "Close",
                        onclick: move |_| view.hide(),
                        "×"
                    }
                }
            }
            MessageList { messages: snapshot.messages.clone() }
            OptionPills {
                options: snapshot.options.clone(),
                on_select: move |label: String| select(label),
            }
            div { class: "chat-footer",
                textarea {
                    id: INPUT_ID,
                    rows: "1",
                    placeholder: "{snapshot.placeholder}",
                    value: "{snapshot.input}",
                    oninput: move |ev| {
                        let mut view = view;
                        view.with_mut(|state| state.set_input(ev.value()));
                    },
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            submit_on_enter();
                        }
                    },
                }
                button {
                    class: "chat-send", r#type: "button",
                    onclick: move |_| submit(),
                    "Send"
                }
            }
        }
    }
}

/// Scrolls to the newest message and focuses the input when the controller
/// asks for it.
fn use_view_effects(view: Signal<ConversationView>) {
    let scroll_anchor = use_memo(move || view.read().scroll_anchor);
    use_effect(move || {
        if scroll_anchor().is_some() {
            let _ = document::eval(SCROLL_TO_NEWEST_JS);
        }
    });

    let focus_requests = use_memo(move || view.read().focus_requests);
    use_effect(move || {
        if focus_requests() > 0 {
            let _ = document::eval(FOCUS_INPUT_JS);
        }
    });
}

#[component]
fn MessageList(messages: Vec<ChatMessage>) -> Element {
    rsx! {
        div { id: MESSAGES_ID, class: "chat-messages",
            for (i, msg) in messages.iter().enumerate() {
                div { key: "{i}", class: format_args!("chat-message {}", msg.role.as_str()),
                    div { class: "bubble", dangerous_inner_html: msg.to_html() }
                }
            }
        }
    }
}

#[component]
fn OptionPills(options: Vec<String>, on_select: EventHandler<String>) -> Element {
    rsx! {
        div { class: "chat-options",
            for option in options {
                OptionPill { key: "{option}", label: option.clone(), on_select }
            }
        }
    }
}

#[component]
fn OptionPill(label: String, on_select: EventHandler<String>) -> Element {
    let text = label.clone();
    rsx! {
        button {
            class: "option-pill",
            r#type: "button",
            onclick: move |_| on_select.call(label.clone()),
            "{text}"
        }
    }
}

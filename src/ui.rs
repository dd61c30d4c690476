use crate::views::ChatWidget;
use dioxus::prelude::*;

const WIDGET_CSS: Asset = asset!("/assets/widget.css");

#[component]
pub fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: WIDGET_CSS }
        div { class: "chat-shell",
            ChatWidget {}
        }
    }
}

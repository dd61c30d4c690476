fn main() {
    foundry_chat::config::load_dotenv();
    dioxus::launch(foundry_chat::ui::App);
}

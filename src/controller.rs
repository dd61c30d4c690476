//! Session controller: owns the session identifier and the in-flight flag,
//! and turns backend responses into view updates.

use crate::api::ChatApi;
use crate::types::{Role, SessionPayload};
use crate::view::ChatRenderer;
use std::cell::{Cell, RefCell};
use tracing::{debug, error, info};

pub const SESSION_START_FAILED: &str =
    "Unable to start the session. Refresh the page to try again.";
pub const SEND_FAILED: &str = "Something went wrong. Try again in a moment.";
pub const INPUT_PLACEHOLDER: &str = "Ask about programs, stats, etc.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// No session, a send already in flight, or blank input. Nothing happened.
    Skipped,
    Delivered,
    /// The echo stays and a fallback bot message was appended.
    Failed,
}

/// Clears the in-flight flag on drop so it is released however the send ends.
struct InFlightGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// One chat session for the lifetime of the page.
///
/// All state is single-threaded and no borrow is held across an `.await`, so
/// reset and create may run while a send is suspended.
pub struct SessionController<A, R> {
    api: A,
    view: R,
    session_id: RefCell<Option<String>>,
    in_flight: Cell<bool>,
}

impl<A: ChatApi, R: ChatRenderer> SessionController<A, R> {
    pub fn new(api: A, view: R) -> Self {
        Self {
            api,
            view,
            session_id: RefCell::new(None),
            in_flight: Cell::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &R {
        &self.view
    }

    pub fn session_id(&self) -> Option<String> {
        self.session_id.borrow().clone()
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.get()
    }

    pub async fn create_session(&self) {
        match self.api.create_session().await {
            Ok(payload) => {
                info!(session_id = %payload.session_id, "chat session started");
                *self.session_id.borrow_mut() = Some(payload.session_id.clone());
                self.replace_conversation(&payload);
                self.view.open();
                self.view.set_placeholder(INPUT_PLACEHOLDER);
                self.view.focus_input();
            }
            Err(err) => {
                error!(error = %err, "failed to create chat session");
                self.view.add_message(Role::Bot, SESSION_START_FAILED);
            }
        }
    }

    pub async fn reset_session(&self) {
        let Some(session_id) = self.session_id() else {
            debug!("reset requested before a session exists");
            return;
        };

        match self.api.reset_session(&session_id).await {
            Ok(payload) => {
                info!(%session_id, "chat session reset");
                self.replace_conversation(&payload);
                self.view.focus_input();
            }
            Err(err) => error!(error = %err, %session_id, "failed to reset chat session"),
        }
    }

    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let Some(session_id) = self.session_id() else {
            return SendOutcome::Skipped;
        };
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("send ignored while another is in flight");
            return SendOutcome::Skipped;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::Skipped;
        }

        self.view.add_message(Role::User, trimmed);
        self.view.render_options(None);
        self.view.clear_input();
        self.view.focus_input();

        match self.api.send_message(&session_id, trimmed).await {
            Ok(reply) => {
                self.view.append_messages(&reply.messages);
                self.view.render_options(Some(reply.options.as_slice()));
                SendOutcome::Delivered
            }
            Err(err) => {
                error!(error = %err, %session_id, "chat request failed");
                self.view.add_message(Role::Bot, SEND_FAILED);
                SendOutcome::Failed
            }
        }
    }

    /// A quick-reply pill behaves exactly like typing its label.
    pub async fn select_option(&self, label: &str) -> SendOutcome {
        self.send_message(label).await
    }

    /// Sends whatever is in the input field (send button, Enter).
    pub async fn submit_input(&self) -> SendOutcome {
        let value = self.view.input_value();
        self.send_message(&value).await
    }

    fn replace_conversation(&self, payload: &SessionPayload) {
        self.view.clear_messages();
        self.view.append_messages(&payload.messages);
        self.view.render_options(Some(payload.options.as_slice()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult};
    use crate::types::{ChatMessage, ChatReply};
    use crate::view::{ConversationView, Surface};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Create,
        Reset(String),
        Send(String, String),
    }

    /// Replays queued responses and records every call. An empty queue answers
    /// with a 500.
    #[derive(Default)]
    struct ScriptedApi {
        calls: Mutex<Vec<Call>>,
        sessions: Mutex<VecDeque<ApiResult<SessionPayload>>>,
        replies: Mutex<VecDeque<ApiResult<ChatReply>>>,
        send_gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    impl ScriptedApi {
        fn with_session(self, payload: SessionPayload) -> Self {
            self.sessions.lock().unwrap().push_back(Ok(payload));
            self
        }

        fn with_reply(self, reply: ChatReply) -> Self {
            self.replies.lock().unwrap().push_back(Ok(reply));
            self
        }

        /// Holds the next send open until the sender fires.
        fn gated(self, gate: oneshot::Receiver<()>) -> Self {
            *self.send_gate.lock().unwrap() = Some(gate);
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        }
    }

    #[async_trait]
    impl ChatApi for ScriptedApi {
        async fn create_session(&self) -> ApiResult<SessionPayload> {
            self.calls.lock().unwrap().push(Call::Create);
            let next = self.sessions.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(server_error()))
        }

        async fn reset_session(&self, session_id: &str) -> ApiResult<SessionPayload> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Reset(session_id.to_string()));
            let next = self.sessions.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(server_error()))
        }

        async fn send_message(&self, session_id: &str, message: &str) -> ApiResult<ChatReply> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Send(session_id.to_string(), message.to_string()));
            let gate = self.send_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            let next = self.replies.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(server_error()))
        }
    }

    type Controller = SessionController<ScriptedApi, RefCell<ConversationView>>;

    fn controller(api: ScriptedApi) -> Controller {
        SessionController::new(api, RefCell::new(ConversationView::default()))
    }

    fn session(id: &str, messages: Vec<ChatMessage>, options: &[&str]) -> SessionPayload {
        SessionPayload {
            session_id: id.to_string(),
            messages,
            options: options.iter().map(|s| s.to_string()).collect(),
            stage: None,
        }
    }

    fn reply(messages: Vec<ChatMessage>, options: &[&str]) -> ChatReply {
        ChatReply {
            messages,
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn create_session_renders_server_state() {
        let api = ScriptedApi::default().with_session(session(
            "abc",
            vec![ChatMessage::bot("hi")],
            &["A", "B"],
        ));
        let controller = controller(api);

        controller.create_session().await;

        assert_eq!(controller.session_id().as_deref(), Some("abc"));
        let view = controller.view().borrow();
        assert_eq!(view.messages, vec![ChatMessage::bot("hi")]);
        assert_eq!(view.options, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(view.surface, Surface::Open);
        assert_eq!(view.placeholder, INPUT_PLACEHOLDER);
        assert_eq!(view.focus_requests, 1);
    }

    #[tokio::test]
    async fn create_session_replaces_previous_messages() {
        let api = ScriptedApi::default().with_session(session(
            "abc",
            vec![ChatMessage::bot("hi")],
            &[],
        ));
        let controller = controller(api);
        controller.view().add_message(Role::Bot, "stale");

        controller.create_session().await;

        assert_eq!(
            controller.view().borrow().messages,
            vec![ChatMessage::bot("hi")]
        );
    }

    #[tokio::test]
    async fn failed_create_shows_fallback_and_leaves_session_unset() {
        let controller = controller(ScriptedApi::default());

        controller.create_session().await;

        assert_eq!(controller.session_id(), None);
        let view = controller.view().borrow();
        assert_eq!(view.messages, vec![ChatMessage::bot(SESSION_START_FAILED)]);
        assert_eq!(view.surface, Surface::Closed);
        drop(view);

        // No retry: only the single create went out.
        assert_eq!(controller.api().calls(), vec![Call::Create]);
        assert_eq!(controller.send_message("hello").await, SendOutcome::Skipped);
        assert_eq!(controller.api().calls(), vec![Call::Create]);
    }

    #[tokio::test]
    async fn reset_without_session_makes_no_call() {
        let controller = controller(ScriptedApi::default());
        controller.view().add_message(Role::Bot, "kept");
        let before = controller.view().borrow().clone();

        controller.reset_session().await;

        assert!(controller.api().calls().is_empty());
        assert_eq!(*controller.view().borrow(), before);
    }

    #[tokio::test]
    async fn reset_replaces_conversation_and_keeps_identifier() {
        let api = ScriptedApi::default()
            .with_session(session("abc", vec![ChatMessage::bot("hi")], &[]))
            .with_session(session("abc", vec![ChatMessage::bot("fresh")], &["X"]));
        let controller = controller(api);
        controller.create_session().await;
        controller.view().add_message(Role::User, "old");

        controller.reset_session().await;

        assert_eq!(
            controller.api().calls(),
            vec![Call::Create, Call::Reset("abc".to_string())]
        );
        assert_eq!(controller.session_id().as_deref(), Some("abc"));
        let view = controller.view().borrow();
        assert_eq!(view.messages, vec![ChatMessage::bot("fresh")]);
        assert_eq!(view.options, vec!["X".to_string()]);
    }

    #[tokio::test]
    async fn failed_reset_keeps_prior_view() {
        let api = ScriptedApi::default().with_session(session(
            "abc",
            vec![ChatMessage::bot("hi")],
            &["A"],
        ));
        let controller = controller(api);
        controller.create_session().await;
        let before = controller.view().borrow().clone();

        controller.reset_session().await;

        let after = controller.view().borrow();
        assert_eq!(after.messages, before.messages);
        assert_eq!(after.options, before.options);
    }

    #[tokio::test]
    async fn send_is_skipped_without_session_or_text() {
        let controller = controller(
            ScriptedApi::default().with_session(session("abc", vec![], &[])),
        );

        assert_eq!(controller.send_message("hello").await, SendOutcome::Skipped);

        controller.create_session().await;
        assert_eq!(controller.send_message("").await, SendOutcome::Skipped);
        assert_eq!(controller.send_message("  \n\t ").await, SendOutcome::Skipped);

        assert_eq!(controller.api().calls(), vec![Call::Create]);
        assert!(controller.view().borrow().messages.is_empty());
        assert!(!controller.is_sending());
    }

    #[tokio::test]
    async fn send_echoes_first_and_blocks_overlapping_sends() {
        let (release, gate) = oneshot::channel();
        let api = ScriptedApi::default()
            .with_session(session("abc", vec![ChatMessage::bot("hi")], &["A", "B"]))
            .with_reply(reply(vec![ChatMessage::bot("answer")], &["Next"]))
            .gated(gate);
        let controller = controller(api);
        controller.create_session().await;
        controller.view().borrow_mut().set_input("  hello  ");

        let send = controller.submit_input();
        let observe = async {
            {
                let view = controller.view().borrow();
                assert_eq!(view.messages.last(), Some(&ChatMessage::user("hello")));
                assert!(view.options.is_empty());
                assert!(view.input.is_empty());
            }
            assert!(controller.is_sending());
            assert_eq!(controller.send_message("again").await, SendOutcome::Skipped);
            release.send(()).unwrap();
        };
        let (outcome, ()) = futures::join!(send, observe);

        assert_eq!(outcome, SendOutcome::Delivered);
        assert!(!controller.is_sending());
        assert_eq!(
            controller.api().calls(),
            vec![
                Call::Create,
                Call::Send("abc".to_string(), "hello".to_string()),
            ]
        );
        let view = controller.view().borrow();
        assert_eq!(
            view.messages,
            vec![
                ChatMessage::bot("hi"),
                ChatMessage::user("hello"),
                ChatMessage::bot("answer"),
            ]
        );
        assert_eq!(view.options, vec!["Next".to_string()]);
    }

    #[tokio::test]
    async fn reset_and_create_run_while_a_send_is_suspended() {
        let (release, gate) = oneshot::channel();
        let api = ScriptedApi::default()
            .with_session(session("abc", vec![ChatMessage::bot("hi")], &["A"]))
            .with_session(session("abc", vec![ChatMessage::bot("fresh")], &[]))
            .with_session(session("xyz", vec![ChatMessage::bot("again")], &["B"]))
            .with_reply(reply(vec![ChatMessage::bot("late")], &["Next"]))
            .gated(gate);
        let controller = controller(api);
        controller.create_session().await;

        let send = controller.send_message("hello");
        let observe = async {
            assert!(controller.is_sending());

            controller.reset_session().await;
            assert_eq!(
                controller.view().borrow().messages,
                vec![ChatMessage::bot("fresh")]
            );

            controller.create_session().await;
            assert_eq!(controller.session_id().as_deref(), Some("xyz"));
            assert_eq!(
                controller.api().calls(),
                vec![
                    Call::Create,
                    Call::Send("abc".to_string(), "hello".to_string()),
                    Call::Reset("abc".to_string()),
                    Call::Create,
                ]
            );
            assert!(controller.is_sending());
            release.send(()).unwrap();
        };
        let (outcome, ()) = futures::join!(send, observe);

        // The late reply lands on whatever conversation is showing by then.
        assert_eq!(outcome, SendOutcome::Delivered);
        assert!(!controller.is_sending());
        let view = controller.view().borrow();
        assert_eq!(
            view.messages,
            vec![ChatMessage::bot("again"), ChatMessage::bot("late")]
        );
        assert_eq!(view.options, vec!["Next".to_string()]);
    }

    #[tokio::test]
    async fn failed_send_appends_one_fallback_and_releases_flag() {
        let api = ScriptedApi::default()
            .with_session(session("abc", vec![], &["A"]))
            .with_reply(reply(vec![ChatMessage::bot("ok")], &[]));
        let controller = controller(api);
        controller.create_session().await;

        assert_eq!(controller.send_message("first").await, SendOutcome::Delivered);
        assert_eq!(controller.send_message("second").await, SendOutcome::Failed);

        assert!(!controller.is_sending());
        let view = controller.view().borrow();
        assert_eq!(
            view.messages,
            vec![
                ChatMessage::user("first"),
                ChatMessage::bot("ok"),
                ChatMessage::user("second"),
                ChatMessage::bot(SEND_FAILED),
            ]
        );
        assert!(view.options.is_empty());
        drop(view);

        // The flag was released, so a later send goes out again.
        assert_eq!(controller.send_message("third").await, SendOutcome::Failed);
        assert_eq!(controller.api().calls().len(), 4);
    }

    #[tokio::test]
    async fn selecting_an_option_sends_its_label() {
        let api = ScriptedApi::default()
            .with_session(session("abc", vec![ChatMessage::bot("hi")], &["A", "B"]))
            .with_reply(reply(vec![ChatMessage::bot("picked A")], &[]));
        let controller = controller(api);
        controller.create_session().await;

        let label = controller.view().borrow().options[0].clone();
        let outcome = controller.select_option(&label).await;

        assert_eq!(outcome, SendOutcome::Delivered);
        assert_eq!(
            controller.api().calls().last(),
            Some(&Call::Send("abc".to_string(), "A".to_string()))
        );
        assert_eq!(
            controller.view().borrow().messages,
            vec![
                ChatMessage::bot("hi"),
                ChatMessage::user("A"),
                ChatMessage::bot("picked A"),
            ]
        );
    }
}

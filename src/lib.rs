//! Chat widget for the Female Foundry assistant.
//!
//! A [`controller::SessionController`] owns one backend session and drives a
//! [`view::ChatRenderer`]. The Dioxus shell lives behind the `ui` feature and
//! the guided-conversation backend behind `server`.

pub mod api;
pub mod config;
pub mod controller;
pub mod types;
pub mod view;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;

//! Intake - terminal client for a sequential intake form
//!
//! A four-question form: answers auto-save to the backend as the user
//! types, navigation checkpoints the page it leaves, and a final submit
//! completes the session. The library target exists so integration
//! tests can drive the controller and backend client directly.

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod form;
pub mod logging;
pub mod session;
pub mod ui;

//! ytcontrols: global keyboard playback controls for YouTube.
//!
//! The extension core behind a set of global shortcuts: a background tab
//! coordinator, a per-tab video controller and a page player bridge, glued
//! together by a small typed message protocol. The browser platform is
//! abstracted behind traits; an in-memory simulated browser exercises the
//! whole stack in tests and the bundled binaries.

pub mod app;
pub mod dom;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

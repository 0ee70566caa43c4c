// ytcontrols shared type definitions
// Each submodule defines types used across the extension core.

pub mod command;
pub mod errors;
pub mod message;
pub mod notification;
pub mod tab;
pub mod video;

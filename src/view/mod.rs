//! Text rendering of the session: chat area, sidebar and scroll state.
//!
//! Rendering is pure formatting over store and pipeline state.

pub mod chat_view;
pub mod sidebar;
pub mod viewport;

pub use chat_view::{render_chat, render_header, render_message};
pub use sidebar::{preview, render_sidebar, truncate_preview};
pub use viewport::Viewport;

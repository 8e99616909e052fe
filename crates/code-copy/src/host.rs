//! Seams between the copy controls and whatever renders the page.
//!
//! The browser implementations live in `web` (hydrate feature); tests use an
//! in-memory host. Everything here is single-threaded: futures are local and
//! nothing needs to be `Send`.

use anyhow::Result;
use futures::future::LocalBoxFuture;
use std::time::Duration;

use crate::config::CopyConfig;

/// Attribute set on a block once it carries a control.
pub const ENHANCED_ATTR: &str = "data-copy-control";

pub trait Clipboard {
    /// Resolves to an error when the host rejects the write (permission
    /// denied, insecure context, API missing).
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<()>>;
}

/// Event-loop hooks: run a local future, and run a callback later.
pub trait Scheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// The document being enhanced.
pub trait Page {
    type Block: Block;

    /// All blocks matching `selector`, in document order.
    fn query_blocks(&self, selector: &str) -> Vec<Self::Block>;
}

pub trait Block: 'static {
    type Button: ControlButton;

    /// Plain text of the payload element, read fresh on every call.
    /// `None` when the block has no element matching `selector`.
    fn payload_text(&self, selector: &str) -> Option<String>;

    fn is_enhanced(&self) -> bool;

    /// Give the block a positioning context for the overlay.
    fn prepare_overlay(&self) -> Result<()>;

    /// Create the control's button in the top-right corner of the block.
    fn append_button(&self, config: &CopyConfig) -> Result<Self::Button>;

    /// Record that the block carries a control. Called only once its button
    /// exists, so a failed attempt is retried by the next pass.
    fn mark_enhanced(&self);
}

pub trait ControlButton: 'static {
    /// Replace the button content with `icon` followed by `text`.
    fn render_label(&self, icon: &str, text: &str);

    fn on_activate(&self, handler: Box<dyn Fn()>);
}

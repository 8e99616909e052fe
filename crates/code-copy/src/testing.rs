//! In-memory host for tests: fake page, blocks and buttons, a scripted
//! clipboard, and a virtual clock driving a `LocalPool`.

use anyhow::Result;
use futures::FutureExt;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::{self, LocalBoxFuture};
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::config::CopyConfig;
use crate::host::{Block, Clipboard, ControlButton, Page, Scheduler};

// ── Page / blocks / buttons ───────────────────────────────────────────────────

#[derive(Default)]
pub struct FakePage {
    blocks: Vec<FakeBlock>,
}

impl FakePage {
    pub fn new(blocks: Vec<FakeBlock>) -> Self {
        Self { blocks }
    }

    pub fn with_payloads(payloads: &[&str]) -> Self {
        Self::new(payloads.iter().map(|p| FakeBlock::with_payload(p)).collect())
    }

    pub fn blocks(&self) -> &[FakeBlock] {
        &self.blocks
    }
}

impl Page for FakePage {
    type Block = FakeBlock;

    fn query_blocks(&self, _selector: &str) -> Vec<FakeBlock> {
        self.blocks.clone()
    }
}

#[derive(Default)]
struct BlockInner {
    payload: RefCell<Option<String>>,
    enhanced: Cell<bool>,
    positioned: Cell<bool>,
    refuse_buttons: Cell<bool>,
    buttons: RefCell<Vec<FakeButton>>,
}

#[derive(Clone, Default)]
pub struct FakeBlock(Rc<BlockInner>);

impl FakeBlock {
    pub fn with_payload(text: &str) -> Self {
        let block = Self::default();
        block.set_payload(text);
        block
    }

    pub fn without_payload() -> Self {
        Self::default()
    }

    /// A block whose button creation always fails.
    pub fn refusing_buttons(text: &str) -> Self {
        let block = Self::with_payload(text);
        block.0.refuse_buttons.set(true);
        block
    }

    pub fn allow_buttons(&self) {
        self.0.refuse_buttons.set(false);
    }

    pub fn set_payload(&self, text: &str) {
        *self.0.payload.borrow_mut() = Some(text.to_string());
    }

    pub fn is_positioned(&self) -> bool {
        self.0.positioned.get()
    }

    pub fn buttons(&self) -> Vec<FakeButton> {
        self.0.buttons.borrow().clone()
    }
}

impl Block for FakeBlock {
    type Button = FakeButton;

    fn payload_text(&self, _selector: &str) -> Option<String> {
        self.0.payload.borrow().clone()
    }

    fn is_enhanced(&self) -> bool {
        self.0.enhanced.get()
    }

    fn prepare_overlay(&self) -> Result<()> {
        self.0.positioned.set(true);
        Ok(())
    }

    fn mark_enhanced(&self) {
        self.0.enhanced.set(true);
    }

    fn append_button(&self, config: &CopyConfig) -> Result<FakeButton> {
        if self.0.refuse_buttons.get() {
            anyhow::bail!("createElement refused");
        }
        let button = FakeButton::default();
        *button.0.class.borrow_mut() = config.button_class.clone();
        self.0.buttons.borrow_mut().push(button.clone());
        Ok(button)
    }
}

#[derive(Default)]
struct ButtonInner {
    class: RefCell<String>,
    icon: RefCell<String>,
    text: RefCell<String>,
    history: RefCell<Vec<String>>,
    handler: RefCell<Option<Rc<dyn Fn()>>>,
}

#[derive(Clone, Default)]
pub struct FakeButton(Rc<ButtonInner>);

impl FakeButton {
    pub fn click(&self) {
        let handler = self.0.handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    pub fn class(&self) -> String {
        self.0.class.borrow().clone()
    }

    pub fn label_icon(&self) -> String {
        self.0.icon.borrow().clone()
    }

    pub fn label_text(&self) -> String {
        self.0.text.borrow().clone()
    }

    /// Every label text rendered, in order.
    pub fn history(&self) -> Vec<String> {
        self.0.history.borrow().clone()
    }
}

impl ControlButton for FakeButton {
    fn render_label(&self, icon: &str, text: &str) {
        *self.0.icon.borrow_mut() = icon.to_string();
        *self.0.text.borrow_mut() = text.to_string();
        self.0.history.borrow_mut().push(text.to_string());
    }

    fn on_activate(&self, handler: Box<dyn Fn()>) {
        *self.0.handler.borrow_mut() = Some(Rc::from(handler));
    }
}

// ── Clipboard ─────────────────────────────────────────────────────────────────

/// Accepts every write unless a rejection has been queued.
#[derive(Default)]
pub struct ScriptedClipboard {
    writes: RefCell<Vec<String>>,
    rejections: RefCell<VecDeque<String>>,
}

impl ScriptedClipboard {
    pub fn reject_next(&self, reason: &str) {
        self.rejections.borrow_mut().push_back(reason.to_string());
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl Clipboard for ScriptedClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<()>> {
        self.writes.borrow_mut().push(text.to_string());
        let result = match self.rejections.borrow_mut().pop_front() {
            Some(reason) => Err(anyhow::anyhow!("clipboard write rejected: {}", reason)),
            None => Ok(()),
        };
        future::ready(result).boxed_local()
    }
}

// ── Virtual clock ─────────────────────────────────────────────────────────────

struct PendingTimer {
    due_ms: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

pub struct VirtualClock {
    spawner: LocalSpawner,
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
}

impl VirtualClock {
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Remove and return the earliest timer due at or before `limit_ms`.
    fn pop_due(&self, limit_ms: u64) -> Option<PendingTimer> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= limit_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;
        Some(timers.remove(index))
    }
}

impl Scheduler for VirtualClock {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("local pool is alive");
    }

    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(PendingTimer {
            due_ms: self.now_ms.get() + delay.as_millis() as u64,
            seq,
            task,
        });
    }
}

pub struct Sandbox {
    pool: LocalPool,
    pub clock: Rc<VirtualClock>,
    pub clipboard: Rc<ScriptedClipboard>,
}

impl Sandbox {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let clock = Rc::new(VirtualClock {
            spawner: pool.spawner(),
            now_ms: Cell::new(0),
            next_seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
        });
        Self {
            pool,
            clock,
            clipboard: Rc::new(ScriptedClipboard::default()),
        }
    }

    /// Run spawned work until nothing can make progress.
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn run<F: Future>(&mut self, fut: F) -> F::Output {
        self.pool.run_until(fut)
    }

    /// Move the clock forward, firing due timers in order.
    pub fn advance(&mut self, ms: u64) {
        let target = self.clock.now_ms() + ms;
        self.settle();
        while let Some(timer) = self.clock.pop_due(target) {
            self.clock.now_ms.set(timer.due_ms);
            (timer.task)();
            self.settle();
        }
        self.clock.now_ms.set(target);
    }
}

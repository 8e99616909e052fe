//! A single copy control bound to its code block.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::CopyConfig;
use crate::host::{Block, Clipboard, ControlButton, Scheduler};
use crate::state::{ControlMachine, ControlState, ResetTicket};

/// What one activation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Copied,
    /// Write rejected; state left untouched.
    Failed,
    /// Block has no payload element; nothing written.
    NoPayload,
}

pub struct CopyControl<B: Block> {
    block: B,
    button: B::Button,
    machine: RefCell<ControlMachine>,
    config: Rc<CopyConfig>,
    clipboard: Rc<dyn Clipboard>,
    scheduler: Rc<dyn Scheduler>,
}

impl<B: Block> CopyControl<B> {
    /// Wrap an already-appended button and render the idle label on it.
    pub fn new(
        block: B,
        button: B::Button,
        config: Rc<CopyConfig>,
        clipboard: Rc<dyn Clipboard>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        let control = Rc::new(Self {
            block,
            button,
            machine: RefCell::new(ControlMachine::new(config.reset_policy)),
            config,
            clipboard,
            scheduler,
        });
        control.render();
        control
    }

    pub fn state(&self) -> ControlState {
        self.machine.borrow().state()
    }

    pub fn block(&self) -> &B {
        &self.block
    }

    pub fn button(&self) -> &B::Button {
        &self.button
    }

    /// Route button activations into `activate`, spawned on the scheduler.
    /// The handler holds the control weakly; whoever owns the control keeps
    /// the button live.
    pub fn bind(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.button.on_activate(Box::new(move || {
            if let Some(control) = weak.upgrade() {
                control.scheduler.spawn(control.activate().map(drop).boxed_local());
            }
        }));
    }

    /// Copy the block's current text. On success shows the copied label and
    /// schedules the reset back to idle.
    pub fn activate(self: &Rc<Self>) -> LocalBoxFuture<'static, Activation> {
        let control = Rc::clone(self);
        async move {
            let Some(text) = control.block.payload_text(&control.config.payload_selector) else {
                return Activation::NoPayload;
            };

            match control.clipboard.write_text(&text).await {
                Ok(()) => {
                    let ticket = control.machine.borrow_mut().copy_succeeded();
                    control.render();
                    control.schedule_reset(ticket);
                    Activation::Copied
                }
                Err(_) => Activation::Failed,
            }
        }
        .boxed_local()
    }

    fn schedule_reset(self: &Rc<Self>, ticket: ResetTicket) {
        // Weak: a control that is gone by the time the timer fires is left alone.
        let weak = Rc::downgrade(self);
        self.scheduler.defer(
            self.config.reset_delay(),
            Box::new(move || {
                if let Some(control) = weak.upgrade() {
                    control.reset_elapsed(ticket);
                }
            }),
        );
    }

    fn reset_elapsed(&self, ticket: ResetTicket) {
        let changed = self.machine.borrow_mut().reset_elapsed(ticket);
        if changed {
            self.render();
        }
    }

    fn render(&self) {
        let label = self.config.label(self.state());
        self.button.render_label(&label.icon, &label.text);
    }
}

//! Page-ready entry point: find every code block and give it a copy control.

use std::rc::Rc;

use crate::config::CopyConfig;
use crate::control::CopyControl;
use crate::host::{Block, Clipboard, Page, Scheduler};

/// Result of one `initialize` pass.
pub struct Enhancement<B: Block> {
    /// Controls attached by this pass, in document order.
    pub controls: Vec<Rc<CopyControl<B>>>,
    /// Blocks that already had a control from an earlier pass.
    pub already_enhanced: usize,
    /// Blocks whose control could not be created, with the reason.
    pub failed: Vec<anyhow::Error>,
}

impl<B: Block> Enhancement<B> {
    pub fn attached(&self) -> usize {
        self.controls.len()
    }
}

/// Attach one copy control to every block on `page` that does not have one
/// yet. Must run after the document has finished parsing.
pub fn initialize<P: Page>(
    page: &P,
    config: Rc<CopyConfig>,
    clipboard: Rc<dyn Clipboard>,
    scheduler: Rc<dyn Scheduler>,
) -> Enhancement<P::Block> {
    let mut enhancement = Enhancement {
        controls: Vec::new(),
        already_enhanced: 0,
        failed: Vec::new(),
    };

    for block in page.query_blocks(&config.block_selector) {
        if block.is_enhanced() {
            enhancement.already_enhanced += 1;
            continue;
        }

        let button = match block.prepare_overlay().and_then(|_| block.append_button(&config)) {
            Ok(button) => button,
            Err(e) => {
                enhancement.failed.push(e);
                continue;
            }
        };
        block.mark_enhanced();

        let control = CopyControl::new(block, button, Rc::clone(&config), Rc::clone(&clipboard), Rc::clone(&scheduler));
        control.bind();
        enhancement.controls.push(control);
    }

    enhancement
}

//! Live comparison blocks.
//!
//! A `MountedComparison` owns the listeners that route mouse events from the
//! block root into its `ComparisonBlock`. Dropping it removes the listeners.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use slide_compare_core::{ComparisonBlock, PointerKind, Ratio};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent};

use crate::dom::DomBuilder;
use crate::events::{bounding_box, pointer_input};

pub struct MountedComparison {
    block: Rc<RefCell<ComparisonBlock<HtmlElement>>>,
    _listeners: Vec<EventListener>,
}

impl MountedComparison {
    /// Start listening for `mousedown`/`mousemove` on the root and `click` on
    /// the reset button.
    pub fn attach(block: ComparisonBlock<HtmlElement>, builder: DomBuilder) -> Self {
        let root = block.root().clone();
        let reset_button = block.reset_button().clone();
        let block = Rc::new(RefCell::new(block));

        let pointer_listener = |event_type: &'static str, kind: PointerKind| {
            let block = Rc::clone(&block);
            let mut builder = builder.clone();
            EventListener::new(&root, event_type, move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let input = pointer_input(event, kind);
                let mut block = block.borrow_mut();
                let bounds = bounding_box(block.root());
                block.handle_pointer(&mut builder, input, bounds);
            })
        };

        let mut listeners = vec![
            pointer_listener("mousedown", PointerKind::Down),
            pointer_listener("mousemove", PointerKind::Move),
        ];

        let reset_block = Rc::clone(&block);
        let mut reset_builder = builder.clone();
        listeners.push(EventListener::new(&reset_button, "click", move |_| {
            reset_block.borrow_mut().reset(&mut reset_builder);
        }));

        Self {
            block,
            _listeners: listeners,
        }
    }

    /// Last ratio a drag produced, `None` after a reset.
    pub fn ratio(&self) -> Option<Ratio> {
        self.block.borrow().slider().ratio()
    }

    pub fn root(&self) -> HtmlElement {
        self.block.borrow().root().clone()
    }

    /// Stop listening and take the reset button out of the DOM.
    ///
    /// The reset button lives beside the block rather than inside it, so the
    /// host removing the block does not remove the button.
    pub fn detach(self) {
        let block = self.block.borrow();
        if block.reset_mounted() {
            block.reset_button().remove();
        }
    }
}

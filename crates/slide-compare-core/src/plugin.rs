//! Code block processor registration.
//!
//! The host owns block detection and lifecycle; `SlideCompare` only asks to be
//! called for its language tag and renders whatever it is handed.

use std::rc::Rc;

use crate::options::SlideCompareOptions;
use crate::parse::parse_block;
use crate::platform::{ElementBuilder, LinkResolver};
use crate::render::{RenderedBlock, render};

/// Element type of an invocation's builder.
pub type InvocationElement<I> = <<I as BlockInvocation>::Builder as ElementBuilder>::Element;

/// One call of a code block processor: everything needed to render one block.
pub trait BlockInvocation {
    type Resolver: LinkResolver;
    type Builder: ElementBuilder;

    /// Path of the document the block lives in, if the host has one open.
    fn active_path(&self) -> Option<String>;

    /// Link resolver, element builder and the mount point for this block.
    fn parts(&mut self) -> (&Self::Resolver, &mut Self::Builder, InvocationElement<Self>);

    /// Hand the rendered block back to the host.
    ///
    /// The host keeps it for as long as the block is on screen and routes
    /// pointer events to it. Dropping it ends interactivity.
    fn finish(self, block: RenderedBlock<InvocationElement<Self>>);
}

/// Host registry of code block processors keyed by language tag.
pub trait CodeBlockRegistry {
    type Invocation: BlockInvocation;

    fn register_code_block_processor(
        &mut self,
        language: &str,
        processor: Box<dyn Fn(&str, Self::Invocation)>,
    );
}

/// The comparison block processor.
#[derive(Debug, Clone, Default)]
pub struct SlideCompare {
    options: SlideCompareOptions,
}

impl SlideCompare {
    pub fn new(options: SlideCompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SlideCompareOptions {
        &self.options
    }

    /// Load hook: register the processor under the configured language tag.
    pub fn onload<R: CodeBlockRegistry>(self: Rc<Self>, registry: &mut R) {
        let language = self.options.language.clone();
        tracing::debug!(%language, "registering comparison block processor");
        registry.register_code_block_processor(
            &language,
            Box::new(move |source: &str, invocation: R::Invocation| {
                self.render_block(source, invocation)
            }),
        );
    }

    /// Parse `source` and render it into the invocation's mount point.
    pub fn render_block<I: BlockInvocation>(&self, source: &str, mut invocation: I) {
        let active_path = invocation.active_path();
        let rendered = {
            let (resolver, builder, mount) = invocation.parts();
            let result = parse_block(
                source,
                active_path.as_deref(),
                resolver,
                &self.options.image_formats,
            );
            render(builder, &mount, result, &self.options)
        };
        match rendered {
            Ok(block) => invocation.finish(block),
            Err(err) => tracing::error!(%err, "failed to render comparison block"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::html::{HtmlTree, NodeId};
    use crate::slider::{BoundingBox, PRIMARY_BUTTON, PointerInput};
    use crate::test_support::TestResolver;

    /// Host double: a document with a fixed set of files, rendering into one tree.
    struct TestHost {
        resolver: TestResolver,
        tree: RefCell<HtmlTree>,
        active_path: Option<String>,
        blocks: RefCell<Vec<RenderedBlock<NodeId>>>,
    }

    struct TestInvocation {
        host: Rc<TestHost>,
        tree: HtmlTree,
        mount: NodeId,
    }

    impl BlockInvocation for TestInvocation {
        type Resolver = TestResolver;
        type Builder = HtmlTree;

        fn active_path(&self) -> Option<String> {
            self.host.active_path.clone()
        }

        fn parts(&mut self) -> (&TestResolver, &mut HtmlTree, NodeId) {
            (&self.host.resolver, &mut self.tree, self.mount)
        }

        fn finish(self, block: RenderedBlock<NodeId>) {
            *self.host.tree.borrow_mut() = self.tree;
            self.host.blocks.borrow_mut().push(block);
        }
    }

    #[derive(Default)]
    struct TestRegistry {
        processors: HashMap<String, Box<dyn Fn(&str, TestInvocation)>>,
    }

    impl CodeBlockRegistry for TestRegistry {
        type Invocation = TestInvocation;

        fn register_code_block_processor(
            &mut self,
            language: &str,
            processor: Box<dyn Fn(&str, TestInvocation)>,
        ) {
            self.processors.insert(language.to_string(), processor);
        }
    }

    fn host(active_path: Option<&str>) -> Rc<TestHost> {
        Rc::new(TestHost {
            resolver: TestResolver::new(["a.png", "b.jpg"]),
            tree: RefCell::new(HtmlTree::new()),
            active_path: active_path.map(String::from),
            blocks: RefCell::new(Vec::new()),
        })
    }

    fn run(registry: &TestRegistry, language: &str, source: &str, host: &Rc<TestHost>) {
        let (tree, mount) = HtmlTree::with_mount_point();
        let invocation = TestInvocation {
            host: Rc::clone(host),
            tree,
            mount,
        };
        let processor = registry.processors.get(language).expect("processor registered");
        processor(source, invocation);
    }

    #[test]
    fn test_onload_registers_language() {
        let mut registry = TestRegistry::default();
        Rc::new(SlideCompare::default()).onload(&mut registry);
        assert_eq!(registry.processors.len(), 1);
        assert!(registry.processors.contains_key("compare-images"));
    }

    #[test]
    fn test_custom_language() {
        let mut registry = TestRegistry::default();
        let options = SlideCompareOptions {
            language: "before-after".into(),
            ..Default::default()
        };
        Rc::new(SlideCompare::new(options)).onload(&mut registry);
        assert!(registry.processors.contains_key("before-after"));
    }

    #[test]
    fn test_processor_renders_and_hands_back_block() {
        let mut registry = TestRegistry::default();
        Rc::new(SlideCompare::default()).onload(&mut registry);
        let host = host(Some("index.md"));
        run(&registry, "compare-images", "images: ![[a.png]] ![[b.jpg]]", &host);

        let mut blocks = host.blocks.borrow_mut();
        assert_eq!(blocks.len(), 1);
        let block = blocks[0].as_comparison_mut().expect("comparison block");
        let mut tree = host.tree.borrow_mut();
        assert_eq!(tree.find_by_class("slide-compare").len(), 1);
        assert_eq!(tree.find_by_class("sc-return-slider-button").len(), 1);

        let bounds = BoundingBox::new(0.0, 100.0);
        block.handle_pointer(&mut *tree, PointerInput::down(10.0, PRIMARY_BUTTON), bounds);
        assert_eq!(
            tree.style_property(*block.root(), crate::render::RATIO_PROPERTY),
            Some("10%")
        );
    }

    #[test]
    fn test_missing_active_document_renders_error() {
        let mut registry = TestRegistry::default();
        Rc::new(SlideCompare::default()).onload(&mut registry);
        let host = host(None);
        run(&registry, "compare-images", "images: ![[a.png]] ![[b.jpg]]", &host);

        let blocks = host.blocks.borrow();
        match &blocks[0] {
            RenderedBlock::Error(block) => {
                assert_eq!(block.reason, crate::error::BlockError::NoActiveDocument)
            }
            RenderedBlock::Comparison(_) => panic!("expected error block"),
        }
    }

    #[test]
    fn test_blocks_are_independent() {
        let mut registry = TestRegistry::default();
        Rc::new(SlideCompare::default()).onload(&mut registry);
        let host = host(Some("index.md"));
        run(&registry, "compare-images", "images: ![[a.png]] ![[b.jpg]]", &host);
        run(&registry, "compare-images", "images: ![[b.jpg]] ![[a.png]]", &host);

        let mut blocks = host.blocks.borrow_mut();
        let mut scratch = HtmlTree::with_mount_point().0;
        let bounds = BoundingBox::new(0.0, 100.0);
        if let Some(first) = blocks[0].as_comparison_mut() {
            first.handle_pointer(&mut scratch, PointerInput::down(90.0, PRIMARY_BUTTON), bounds);
        }
        let second = blocks[1].as_comparison_mut().expect("comparison block");
        assert!(second.slider().is_unset());
    }
}

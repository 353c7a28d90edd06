//! Bindings to the note app's plugin API and the core traits over them.

use slide_compare_browser::{DomBuilder, MountedComparison};
use slide_compare_core::{
    BlockInvocation, CodeBlockRegistry, ImageFile, LinkResolver, RenderedBlock,
};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen(module = "obsidian")]
extern "C" {
    pub type Component;

    #[wasm_bindgen(method)]
    pub fn register(this: &Component, cb: &js_sys::Function);

    #[wasm_bindgen(extends = Component)]
    pub type MarkdownRenderChild;

    #[wasm_bindgen(constructor)]
    pub fn new(container_el: &HtmlElement) -> MarkdownRenderChild;

    #[wasm_bindgen(js_name = setTooltip)]
    pub fn set_tooltip(el: &HtmlElement, tooltip: &str);
}

#[wasm_bindgen]
extern "C" {
    pub type Plugin;

    #[wasm_bindgen(method, getter)]
    pub fn app(this: &Plugin) -> App;

    #[wasm_bindgen(method, js_name = registerMarkdownCodeBlockProcessor)]
    pub fn register_markdown_code_block_processor(
        this: &Plugin,
        language: &str,
        handler: &js_sys::Function,
    );

    #[derive(Clone)]
    pub type App;

    #[wasm_bindgen(method, getter)]
    pub fn workspace(this: &App) -> Workspace;

    #[wasm_bindgen(method, getter, js_name = metadataCache)]
    pub fn metadata_cache(this: &App) -> MetadataCache;

    #[wasm_bindgen(method, getter)]
    pub fn vault(this: &App) -> Vault;

    pub type Workspace;

    #[wasm_bindgen(method, js_name = getActiveFile)]
    pub fn get_active_file(this: &Workspace) -> Option<TFile>;

    pub type MetadataCache;

    #[wasm_bindgen(method, js_name = getFirstLinkpathDest)]
    pub fn get_first_linkpath_dest(
        this: &MetadataCache,
        linkpath: &str,
        source_path: &str,
    ) -> Option<TFile>;

    #[derive(Clone)]
    pub type Vault;

    #[wasm_bindgen(method, js_name = getResourcePath)]
    pub fn get_resource_path(this: &Vault, file: &TFile) -> String;

    pub type TFile;

    #[wasm_bindgen(method, getter)]
    pub fn path(this: &TFile) -> String;

    #[wasm_bindgen(method, getter)]
    pub fn extension(this: &TFile) -> String;

    pub type MarkdownPostProcessorContext;

    #[wasm_bindgen(method, js_name = addChild)]
    pub fn add_child(this: &MarkdownPostProcessorContext, child: &MarkdownRenderChild);
}

/// A vault file found through the metadata cache.
pub struct PluginFile {
    file: TFile,
    extension: String,
    vault: Vault,
}

impl ImageFile for PluginFile {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn resource_url(&self) -> String {
        self.vault.get_resource_path(&self.file)
    }
}

/// Resolves embed links the way the host resolves `![[...]]` itself.
pub struct PluginResolver {
    metadata_cache: MetadataCache,
    vault: Vault,
}

impl PluginResolver {
    pub fn new(app: &App) -> Self {
        Self {
            metadata_cache: app.metadata_cache(),
            vault: app.vault(),
        }
    }
}

impl LinkResolver for PluginResolver {
    type File = PluginFile;

    fn resolve_link(&self, link: &str, context_path: &str) -> Option<PluginFile> {
        let file = self
            .metadata_cache
            .get_first_linkpath_dest(link, context_path)?;
        Some(PluginFile {
            extension: file.extension(),
            file,
            vault: self.vault.clone(),
        })
    }
}

/// One call of the registered code block handler.
pub struct PluginInvocation {
    active_path: Option<String>,
    resolver: PluginResolver,
    builder: DomBuilder,
    mount: HtmlElement,
    ctx: MarkdownPostProcessorContext,
}

impl PluginInvocation {
    /// `None` if `el` is not attached to a document.
    pub fn new(app: &App, el: HtmlElement, ctx: MarkdownPostProcessorContext) -> Option<Self> {
        let document = el.owner_document()?;
        let builder =
            DomBuilder::new(document).with_tooltip(|el, label| set_tooltip(el, label));
        Some(Self {
            active_path: app.workspace().get_active_file().map(|file| file.path()),
            resolver: PluginResolver::new(app),
            builder,
            mount: el,
            ctx,
        })
    }
}

impl BlockInvocation for PluginInvocation {
    type Resolver = PluginResolver;
    type Builder = DomBuilder;

    fn active_path(&self) -> Option<String> {
        self.active_path.clone()
    }

    fn parts(&mut self) -> (&PluginResolver, &mut DomBuilder, HtmlElement) {
        (&self.resolver, &mut self.builder, self.mount.clone())
    }

    fn finish(self, block: RenderedBlock<HtmlElement>) {
        let RenderedBlock::Comparison(block) = block else {
            return;
        };
        let mounted = MountedComparison::attach(block, self.builder);
        // The host unloads the child when the block leaves the preview.
        let child = MarkdownRenderChild::new(&self.mount);
        let unload = Closure::once_into_js(move || mounted.detach());
        child.register(unload.unchecked_ref());
        self.ctx.add_child(&child);
    }
}

/// Code block processor registration on a host plugin.
pub struct PluginRegistry {
    plugin: Plugin,
}

impl PluginRegistry {
    pub fn new(plugin: Plugin) -> Self {
        Self { plugin }
    }
}

impl CodeBlockRegistry for PluginRegistry {
    type Invocation = PluginInvocation;

    fn register_code_block_processor(
        &mut self,
        language: &str,
        processor: Box<dyn Fn(&str, PluginInvocation)>,
    ) {
        let app = self.plugin.app();
        let handler = Closure::<dyn Fn(String, HtmlElement, MarkdownPostProcessorContext)>::new(
            move |source: String, el: HtmlElement, ctx: MarkdownPostProcessorContext| {
                match PluginInvocation::new(&app, el, ctx) {
                    Some(invocation) => processor(&source, invocation),
                    None => tracing::warn!("code block element has no owner document"),
                }
            },
        );
        self.plugin
            .register_markdown_code_block_processor(language, handler.as_ref().unchecked_ref());
        // Lives as long as the plugin; the host drops the registration on unload.
        handler.forget();
    }
}

//! Comparison block rendering.
//!
//! Turns a parse result into an element tree through an `ElementBuilder`:
//!
//! ```text
//! mount
//! └─ div.slide-compare            (--sc-ratio set while dragging)
//!    ├─ div.sc-right-container    (bottom of the stack)
//!    │  └─ img.sc-right-image
//!    ├─ div.sc-left-container     (clipped by --sc-ratio)
//!    │  └─ img.sc-left-image
//!    ├─ div.sc-slider-container
//!    │  └─ div.sc-ratio-slider
//!    └─ div.sc-caption            (only with a caption)
//! div.sc-return-slider-button     (sibling of mount, outside the image layers)
//! ```
//!
//! Errors render as a single `pre.sc-error-block` inside `div.slide-compare`.

use crate::error::BlockError;
use crate::options::SlideCompareOptions;
use crate::platform::{ElementBuilder, ImageFile, PlatformError};
use crate::slider::{BoundingBox, PointerInput, Ratio, SliderState};
use crate::types::{ComparedImage, ComparisonRequest};

/// Custom property the stylesheet reads to clip the left image and place the handle.
pub const RATIO_PROPERTY: &str = "--sc-ratio";

pub const ROOT_CLASS: &str = "slide-compare";
pub const RIGHT_CONTAINER_CLASS: &str = "sc-image-container sc-right-container";
pub const LEFT_CONTAINER_CLASS: &str = "sc-image-container sc-left-container";
pub const RIGHT_IMAGE_CLASS: &str = "sc-compared-image sc-right-image";
pub const LEFT_IMAGE_CLASS: &str = "sc-compared-image sc-left-image";
pub const SLIDER_CONTAINER_CLASS: &str = "sc-slider-container";
pub const SLIDER_CLASS: &str = "sc-ratio-slider";
pub const CAPTION_CLASS: &str = "sc-caption";
pub const RESET_BUTTON_CLASS: &str = "sc-return-slider-button edit-block-button";
pub const ERROR_CLASS: &str = "sc-error-block";

/// Lucide `undo-2`.
pub const RETURN_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="svg-icon lucide lucide-undo-2"><path d="M9 14 4 9l5-5"/><path d="M4 9h10.5a5.5 5.5 0 0 1 5.5 5.5a5.5 5.5 0 0 1-5.5 5.5H11"/></svg>"#;

/// Text of the error panel for a rejected block.
pub fn error_message(reason: &BlockError) -> String {
    format!(
        "Slide Compare has encountered an error:\n- {}\n\nPlease review this block and try again.",
        reason
    )
}

/// What `render` put into the mount point.
#[derive(Debug)]
pub enum RenderedBlock<E> {
    Comparison(ComparisonBlock<E>),
    Error(ErrorBlock<E>),
}

impl<E> RenderedBlock<E> {
    pub fn root(&self) -> &E {
        match self {
            Self::Comparison(block) => &block.root,
            Self::Error(block) => &block.root,
        }
    }

    pub fn as_comparison_mut(&mut self) -> Option<&mut ComparisonBlock<E>> {
        match self {
            Self::Comparison(block) => Some(block),
            Self::Error(_) => None,
        }
    }
}

/// Non-interactive error panel.
#[derive(Debug)]
pub struct ErrorBlock<E> {
    pub root: E,
    pub reason: BlockError,
}

/// A rendered comparison and its slider state.
///
/// Pointer and reset events go through here so the state and the
/// `--sc-ratio` property on the root never disagree.
#[derive(Debug)]
pub struct ComparisonBlock<E> {
    root: E,
    reset_button: E,
    reset_mounted: bool,
    slider: SliderState,
}

impl<E> ComparisonBlock<E> {
    /// The `div.slide-compare` element that receives pointer events.
    pub fn root(&self) -> &E {
        &self.root
    }

    pub fn reset_button(&self) -> &E {
        &self.reset_button
    }

    /// Whether the reset button found a parent to mount into.
    pub fn reset_mounted(&self) -> bool {
        self.reset_mounted
    }

    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    /// Apply a pointer event, updating the clip boundary immediately.
    pub fn handle_pointer<B>(
        &mut self,
        builder: &mut B,
        input: PointerInput,
        bounds: BoundingBox,
    ) -> Option<Ratio>
    where
        B: ElementBuilder<Element = E>,
    {
        let ratio = self.slider.handle_pointer(input, bounds)?;
        builder.set_style_property(&self.root, RATIO_PROPERTY, &ratio.to_css_percent());
        Some(ratio)
    }

    /// Return the slider to the stylesheet default.
    pub fn reset<B>(&mut self, builder: &mut B)
    where
        B: ElementBuilder<Element = E>,
    {
        if self.slider.reset() {
            tracing::debug!("slider reset");
        }
        builder.remove_style_property(&self.root, RATIO_PROPERTY);
    }
}

/// Render a parse result into `mount`.
///
/// A valid request becomes a comparison, a parse error becomes the error
/// panel. The only failure is the platform refusing to create an element.
pub fn render<B, F>(
    builder: &mut B,
    mount: &B::Element,
    result: Result<ComparisonRequest<'_, F>, BlockError>,
    options: &SlideCompareOptions,
) -> Result<RenderedBlock<B::Element>, PlatformError>
where
    B: ElementBuilder,
    F: ImageFile,
{
    Ok(match result {
        Ok(request) => {
            RenderedBlock::Comparison(render_comparison(builder, mount, &request, options)?)
        }
        Err(reason) => RenderedBlock::Error(render_error(builder, mount, reason)?),
    })
}

fn render_comparison<B, F>(
    builder: &mut B,
    mount: &B::Element,
    request: &ComparisonRequest<'_, F>,
    options: &SlideCompareOptions,
) -> Result<ComparisonBlock<B::Element>, PlatformError>
where
    B: ElementBuilder,
    F: ImageFile,
{
    let root = builder.create_element("div", ROOT_CLASS)?;

    // Right goes in first so it sits below the left layer.
    let right_container = builder.create_element("div", RIGHT_CONTAINER_CLASS)?;
    builder.append_child(&root, &right_container);
    let left_container = builder.create_element("div", LEFT_CONTAINER_CLASS)?;
    builder.append_child(&root, &left_container);

    image(builder, &left_container, LEFT_IMAGE_CLASS, request.left())?;
    image(builder, &right_container, RIGHT_IMAGE_CLASS, request.right())?;

    let slider_container = builder.create_element("div", SLIDER_CONTAINER_CLASS)?;
    builder.append_child(&root, &slider_container);
    let slider = builder.create_element("div", SLIDER_CLASS)?;
    builder.append_child(&slider_container, &slider);

    if options.show_caption && !request.caption.trim().is_empty() {
        let caption = builder.create_element("div", CAPTION_CLASS)?;
        builder.set_text(&caption, request.caption);
        builder.append_child(&root, &caption);
    }

    builder.append_child(mount, &root);

    let reset_button = builder.create_element("div", RESET_BUTTON_CLASS)?;
    builder.set_inner_html(&reset_button, RETURN_ICON);
    builder.set_tooltip(&reset_button, &options.reset_tooltip);
    let reset_mounted = builder.append_sibling(mount, &reset_button);
    if !reset_mounted {
        tracing::debug!("mount point has no parent, reset button not mounted");
    }

    tracing::debug!(
        left = request.left().link.target,
        right = request.right().link.target,
        "rendered comparison block"
    );

    Ok(ComparisonBlock {
        root,
        reset_button,
        reset_mounted,
        slider: SliderState::new(),
    })
}

fn image<B, F>(
    builder: &mut B,
    container: &B::Element,
    class: &str,
    image: &ComparedImage<'_, F>,
) -> Result<(), PlatformError>
where
    B: ElementBuilder,
    F: ImageFile,
{
    let img = builder.create_element("img", class)?;
    builder.set_attribute(&img, "src", &image.file.resource_url());
    builder.set_attribute(&img, "alt", image.alt_text());
    builder.append_child(container, &img);
    Ok(())
}

fn render_error<B>(
    builder: &mut B,
    mount: &B::Element,
    reason: BlockError,
) -> Result<ErrorBlock<B::Element>, PlatformError>
where
    B: ElementBuilder,
{
    tracing::debug!(reason = reason.tag(), "rendering comparison error block");
    let root = builder.create_element("div", ROOT_CLASS)?;
    let pre = builder.create_element("pre", ERROR_CLASS)?;
    builder.set_text(&pre, &error_message(&reason));
    builder.append_child(&root, &pre);
    builder.append_child(mount, &root);
    Ok(ErrorBlock { root, reason })
}

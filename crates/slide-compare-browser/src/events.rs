//! Browser event extraction for the slider.

use slide_compare_core::{BoundingBox, PointerInput, PointerKind};
use web_sys::{Element, MouseEvent};

/// Read the horizontal position and held buttons off a mouse event.
pub fn pointer_input(event: &MouseEvent, kind: PointerKind) -> PointerInput {
    PointerInput {
        kind,
        x: event.client_x() as f64,
        buttons: event.buttons(),
    }
}

/// Horizontal extent of `element` in viewport coordinates, same space as `clientX`.
pub fn bounding_box(element: &Element) -> BoundingBox {
    let rect = element.get_bounding_client_rect();
    BoundingBox::new(rect.left(), rect.right())
}

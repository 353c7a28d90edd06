//! Slider interaction model.
//!
//! Maps pointer positions inside a block's bounding box to a reveal ratio.
//! The state is owned by one rendered block; there is nothing shared between
//! blocks and no timing involved, every event is applied as it arrives.

/// `MouseEvent.buttons` bitmask value for the primary button alone.
pub const PRIMARY_BUTTON: u16 = 1;

/// Fraction of the block width at which the right image shows through.
///
/// Always within `[0, 1]` and never NaN.
#[derive(Clone, Debug, Copy, PartialEq, PartialOrd)]
pub struct Ratio(f64);

impl Ratio {
    pub const START: Ratio = Ratio(0.0);
    pub const MIDPOINT: Ratio = Ratio(0.5);
    pub const END: Ratio = Ratio(1.0);

    /// Clamp `value` into `[0, 1]`. Returns `None` for NaN.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else {
            Some(Self(value.clamp(0.0, 1.0)))
        }
    }

    /// Ratio for a pointer at `x` within `bounds`.
    ///
    /// Positions outside the box clamp to the nearest edge. Returns `None` for
    /// degenerate boxes or non-finite coordinates.
    pub fn from_position(x: f64, bounds: BoundingBox) -> Option<Self> {
        let width = bounds.width();
        if !x.is_finite() || !bounds.left.is_finite() || !width.is_finite() || width <= 0.0 {
            return None;
        }
        Self::new((x - bounds.left) / width)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Value for the `--sc-ratio` custom property, e.g. `25%`.
    pub fn to_css_percent(self) -> String {
        format!("{}%", self.0 * 100.0)
    }
}

/// Horizontal extent of the block, in the same coordinate space as pointer events.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
}

impl BoundingBox {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
}

/// The parts of a mouse event the slider cares about.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    /// Viewport x coordinate (`clientX`).
    pub x: f64,
    /// Buttons held during the event (`MouseEvent.buttons`).
    pub buttons: u16,
}

impl PointerInput {
    pub fn down(x: f64, buttons: u16) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            buttons,
        }
    }

    pub fn moved(x: f64, buttons: u16) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            buttons,
        }
    }

    /// True when the primary button and nothing else is held.
    pub fn is_dragging(&self) -> bool {
        self.buttons == PRIMARY_BUTTON
    }
}

/// Reveal state of one comparison block.
///
/// `None` means the host default (styled as the midpoint) is in effect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SliderState {
    ratio: Option<Ratio>,
}

impl SliderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The override set by dragging, if any.
    pub fn ratio(&self) -> Option<Ratio> {
        self.ratio
    }

    /// The ratio the block is showing, falling back to the midpoint.
    pub fn effective_ratio(&self) -> Ratio {
        self.ratio.unwrap_or(Ratio::MIDPOINT)
    }

    pub fn is_unset(&self) -> bool {
        self.ratio.is_none()
    }

    /// Apply a pointer down or move event.
    ///
    /// Down and move are treated the same: with the primary button held the
    /// ratio jumps to the pointer. Without it the event is ignored. Returns the
    /// new ratio when the state changed.
    pub fn handle_pointer(&mut self, input: PointerInput, bounds: BoundingBox) -> Option<Ratio> {
        if !input.is_dragging() {
            return None;
        }
        let ratio = Ratio::from_position(input.x, bounds)?;
        tracing::trace!(kind = ?input.kind, ratio = ratio.get(), "slider moved");
        self.ratio = Some(ratio);
        Some(ratio)
    }

    /// Clear the override. Returns `true` if there was one.
    pub fn reset(&mut self) -> bool {
        self.ratio.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: BoundingBox = BoundingBox {
        left: 100.0,
        right: 300.0,
    };

    #[test]
    fn test_ratio_clamps() {
        assert_eq!(Ratio::new(-0.5), Some(Ratio::START));
        assert_eq!(Ratio::new(1.5), Some(Ratio::END));
        assert_eq!(Ratio::new(0.25).map(Ratio::get), Some(0.25));
        assert_eq!(Ratio::new(f64::NAN), None);
    }

    #[test]
    fn test_ratio_from_position() {
        assert_eq!(Ratio::from_position(100.0, BOX), Some(Ratio::START));
        assert_eq!(Ratio::from_position(200.0, BOX), Some(Ratio::MIDPOINT));
        assert_eq!(Ratio::from_position(300.0, BOX), Some(Ratio::END));
        assert_eq!(Ratio::from_position(150.0, BOX).map(Ratio::get), Some(0.25));
    }

    #[test]
    fn test_ratio_outside_box() {
        assert_eq!(Ratio::from_position(-40.0, BOX), Some(Ratio::START));
        assert_eq!(Ratio::from_position(99.0, BOX), Some(Ratio::START));
        assert_eq!(Ratio::from_position(301.0, BOX), Some(Ratio::END));
        assert_eq!(Ratio::from_position(5000.0, BOX), Some(Ratio::END));
    }

    #[test]
    fn test_ratio_degenerate_box() {
        let zero = BoundingBox::new(50.0, 50.0);
        assert_eq!(Ratio::from_position(50.0, zero), None);
        let inverted = BoundingBox::new(60.0, 50.0);
        assert_eq!(Ratio::from_position(55.0, inverted), None);
        assert_eq!(Ratio::from_position(f64::INFINITY, BOX), None);
    }

    #[test]
    fn test_css_percent() {
        assert_eq!(Ratio::START.to_css_percent(), "0%");
        assert_eq!(Ratio::MIDPOINT.to_css_percent(), "50%");
        assert_eq!(Ratio::END.to_css_percent(), "100%");
        assert_eq!(Ratio(0.25).to_css_percent(), "25%");
    }

    #[test]
    fn test_down_sets_ratio() {
        let mut state = SliderState::new();
        assert!(state.is_unset());
        let ratio = state.handle_pointer(PointerInput::down(150.0, PRIMARY_BUTTON), BOX);
        assert_eq!(ratio.map(Ratio::get), Some(0.25));
        assert_eq!(state.ratio().map(Ratio::get), Some(0.25));
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut state = SliderState::new();
        state.handle_pointer(PointerInput::down(150.0, PRIMARY_BUTTON), BOX);
        state.handle_pointer(PointerInput::moved(250.0, PRIMARY_BUTTON), BOX);
        assert_eq!(state.ratio().map(Ratio::get), Some(0.75));
        state.handle_pointer(PointerInput::moved(0.0, PRIMARY_BUTTON), BOX);
        assert_eq!(state.ratio(), Some(Ratio::START));
        state.handle_pointer(PointerInput::moved(900.0, PRIMARY_BUTTON), BOX);
        assert_eq!(state.ratio(), Some(Ratio::END));
    }

    #[test]
    fn test_hover_ignored() {
        let mut state = SliderState::new();
        assert_eq!(state.handle_pointer(PointerInput::moved(150.0, 0), BOX), None);
        assert!(state.is_unset());

        state.handle_pointer(PointerInput::down(150.0, PRIMARY_BUTTON), BOX);
        assert_eq!(state.handle_pointer(PointerInput::moved(280.0, 0), BOX), None);
        assert_eq!(state.ratio().map(Ratio::get), Some(0.25));
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut state = SliderState::new();
        // secondary only, then primary + secondary
        assert_eq!(state.handle_pointer(PointerInput::down(150.0, 2), BOX), None);
        assert_eq!(state.handle_pointer(PointerInput::moved(150.0, 3), BOX), None);
        assert!(state.is_unset());
    }

    #[test]
    fn test_degenerate_box_keeps_ratio() {
        let mut state = SliderState::new();
        state.handle_pointer(PointerInput::down(150.0, PRIMARY_BUTTON), BOX);
        let collapsed = BoundingBox::new(0.0, 0.0);
        assert_eq!(
            state.handle_pointer(PointerInput::moved(10.0, PRIMARY_BUTTON), collapsed),
            None
        );
        assert_eq!(state.ratio().map(Ratio::get), Some(0.25));
    }

    #[test]
    fn test_reset() {
        let mut state = SliderState::new();
        state.handle_pointer(PointerInput::down(280.0, PRIMARY_BUTTON), BOX);
        assert!(state.reset());
        assert!(state.is_unset());
        assert_eq!(state.effective_ratio(), Ratio::MIDPOINT);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut once = SliderState::new();
        once.handle_pointer(PointerInput::down(120.0, PRIMARY_BUTTON), BOX);
        once.reset();

        let mut twice = SliderState::new();
        twice.handle_pointer(PointerInput::down(120.0, PRIMARY_BUTTON), BOX);
        twice.reset();
        assert!(!twice.reset());

        assert_eq!(once, twice);
        assert!(!SliderState::new().reset());
    }
}

//! Tooltip text and collision merging.
//!
//! Each handle carries a tooltip with its formatted value. When the two
//! tooltips of a double slider collide, a combined tooltip reading
//! `"low - high"` (or a single value when both handles agree) replaces them.

use crate::{
    config::TooltipVisibility,
    host::{Host, Part, TooltipSlot, VisualFlag},
    value::{SliderValue, format_value},
};

/// Text of the combined tooltip.
///
/// ```
/// use rangeable::tooltip::combined_label;
/// use rangeable::value::SliderValue;
///
/// assert_eq!(combined_label(SliderValue::Double([10.0, 12.0]), 0), "10 - 12");
/// assert_eq!(combined_label(SliderValue::Double([15.0, 15.0]), 0), "15");
/// ```
pub fn combined_label(value: SliderValue, accuracy: usize) -> String {
    let low = format_value(value.low(), accuracy);
    let high = format_value(value.high(), accuracy);
    if low == high {
        low
    } else {
        format!("{low} - {high}")
    }
}

/// Writes tooltip text and keeps the combined tooltip in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipPresenter {
    visibility: TooltipVisibility,
    combined: bool,
}

impl TooltipPresenter {
    /// Creates a presenter for the given policy.
    pub fn new(visibility: TooltipVisibility) -> Self {
        Self {
            visibility,
            combined: false,
        }
    }

    /// The visibility policy.
    pub fn visibility(&self) -> TooltipVisibility {
        self.visibility
    }

    /// Returns `true` while the combined tooltip is shown.
    pub fn is_combined(&self) -> bool {
        self.combined
    }

    /// Applies the initial visibility after the structure is mounted.
    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.combined = false;
        if self.visibility.is_enabled() {
            host.set_flag(
                VisualFlag::TooltipsVisible,
                self.visibility == TooltipVisibility::Always,
            );
            host.set_flag(VisualFlag::CombinedTooltip, false);
        }
    }

    /// Shows or hides on-interaction tooltips.
    pub fn set_interacting<H: Host + ?Sized>(&self, host: &mut H, interacting: bool) {
        if self.visibility == TooltipVisibility::OnInteraction {
            host.set_flag(VisualFlag::TooltipsVisible, interacting);
        }
    }

    /// Writes handle `index`'s value and, for double sliders, merges or
    /// splits the tooltips depending on whether they now overlap.
    pub fn present<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        value: SliderValue,
        index: usize,
        accuracy: usize,
    ) {
        if !self.visibility.is_enabled() {
            return;
        }
        let Some(handle_value) = value.get(index) else {
            return;
        };
        host.set_tooltip_text(
            TooltipSlot::Handle(index),
            &format_value(handle_value, accuracy),
        );

        if !matches!(value, SliderValue::Double(_)) {
            return;
        }
        let first = host.measure(Part::Tooltip(TooltipSlot::Handle(0)));
        let second = host.measure(Part::Tooltip(TooltipSlot::Handle(1)));
        self.combined = first.intersects(&second);
        host.set_flag(VisualFlag::CombinedTooltip, self.combined);
        if self.combined {
            host.set_tooltip_text(TooltipSlot::Combined, &combined_label(value, accuracy));
        }
    }
}

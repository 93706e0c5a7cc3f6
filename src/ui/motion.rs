use adw::prelude::*;
use gtk4 as gtk;

use crate::motion::{self, Frame, Spring};

/// Starts a spring entrance on `widget`. The caller keeps the returned
/// animation alive until the widget is torn down. Unmapped widgets skip
/// straight to their resting state.
pub fn enter(widget: &impl IsA<gtk::Widget>, spring: Spring, offset: i32) -> adw::Animation {
    let widget = widget.clone().upcast::<gtk::Widget>();
    place(&widget, motion::frame(0.0, offset));

    let target = adw::CallbackAnimationTarget::new({
        let widget = widget.clone();
        move |t| place(&widget, motion::frame(t, offset))
    });
    let params = adw::SpringParams::new(spring.damping_ratio, spring.mass, spring.stiffness);
    let animation = adw::SpringAnimation::new(&widget, 0.0, 1.0, &params, target);
    animation.play();
    animation.upcast()
}

// Positive offsets open space above the widget, negative ones below it.
fn place(widget: &gtk::Widget, frame: Frame) {
    widget.set_opacity(frame.opacity);
    widget.set_margin_top(frame.offset.max(0));
    widget.set_margin_bottom((-frame.offset).max(0));
}

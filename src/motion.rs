//! Entrance motion for sidebar rows, transcript bubbles and the welcome
//! badge. The GTK layer turns these into libadwaita spring animations; the
//! decisions about what moves, from where, and how springy live here.

use std::collections::HashSet;

/// A damped spring, in the units libadwaita's `SpringParams` takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub damping_ratio: f64,
    pub mass: f64,
    pub stiffness: f64,
}

impl Spring {
    /// From a raw damping coefficient, as motion libraries usually state it.
    pub fn from_damping(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            damping_ratio: damping / (2.0 * (stiffness * mass).sqrt()),
            mass,
            stiffness,
        }
    }

    /// From a perceptual bounce (0 = none) and settle duration in seconds.
    pub fn from_bounce(bounce: f64, duration: f64) -> Self {
        let damping_ratio = 1.0 - bounce.clamp(0.0, 1.0);
        let omega = 2.0 * std::f64::consts::PI / duration;
        Self { damping_ratio, mass: 1.0, stiffness: omega * omega }
    }
}

/// Sidebar rows: stiffness 320, damping 28.
pub fn row_spring() -> Spring {
    Spring::from_damping(320.0, 28.0, 1.0)
}

/// Transcript bubbles: bounce 0.3 over 0.6s.
pub fn bubble_spring() -> Spring {
    Spring::from_bounce(0.3, 0.6)
}

/// Welcome badge: no bounce, 0.8s.
pub fn welcome_spring() -> Spring {
    Spring::from_bounce(0.0, 0.8)
}

/// Vertical start offset in pixels; positive starts below the resting place.
pub const ROW_OFFSET: i32 = 12;
pub const BUBBLE_OFFSET: i32 = 20;

/// Outgoing bubbles rise into place, incoming ones drop in.
pub fn bubble_offset(outgoing: bool) -> i32 {
    if outgoing { BUBBLE_OFFSET } else { -BUBBLE_OFFSET }
}

/// Where a widget sits at animation progress `t` (0 = start, 1 = rest).
/// Springs overshoot, so opacity is clamped; the offset is not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub opacity: f64,
    pub offset: i32,
}

pub fn frame(t: f64, offset: i32) -> Frame {
    Frame {
        opacity: t.clamp(0.0, 1.0),
        offset: ((1.0 - t) * f64::from(offset)).round() as i32,
    }
}

/// Tracks which items were on screen at the previous render so only the
/// ones that just appeared animate. Nothing animates on the first render.
#[derive(Debug, Default)]
pub struct Entrances {
    shown: HashSet<String>,
    primed: bool,
}

impl Entrances {
    /// Records `ids` as the current render and returns those that were not
    /// in the previous one.
    pub fn update<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
        let current: HashSet<String> = ids.into_iter().map(str::to_owned).collect();
        let entering = if self.primed {
            current.difference(&self.shown).cloned().collect()
        } else {
            HashSet::new()
        };
        self.shown = current;
        self.primed = true;
        entering
    }
}

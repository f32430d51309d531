//! Page interaction geometry and tween descriptors
//!
//! Pure functions and tables; `web::page` applies them to the DOM.

/// Scroll depth (px) past which the nav gets its `scrolled` class
pub const NAV_SCROLL_THRESHOLD: f64 = 50.0;
/// Space left above an anchor target after smooth scrolling (fixed nav height)
pub const ANCHOR_OFFSET: f64 = 80.0;
/// Maximum photo tilt in degrees
pub const MAX_TILT_DEG: f64 = 10.0;

/// CSS easing approximating a power3 ease-out
pub const EASE_OUT_CUBIC: &str = "cubic-bezier(0.215, 0.61, 0.355, 1)";

pub fn nav_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAV_SCROLL_THRESHOLD
}

/// Document scroll position that brings an element to just below the nav
pub fn anchor_scroll_top(rect_top: f64, page_y_offset: f64) -> f64 {
    rect_top + page_y_offset - ANCHOR_OFFSET
}

/// Tilt for a pointer at (x, y) inside a w × h box, in degrees.
/// Returns (rotate_x, rotate_y).
pub fn tilt_angles(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    if !(width > 0.0 && height > 0.0) {
        return (0.0, 0.0);
    }
    let x_percent = (x / width - 0.5) * 2.0;
    let y_percent = (y / height - 0.5) * 2.0;
    (-y_percent * MAX_TILT_DEG, x_percent * MAX_TILT_DEG)
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!("rotateX({:.2}deg) rotateY({:.2}deg)", rotate_x, rotate_y)
}

pub fn transition(property: &str, seconds: f64, delay: f64, easing: &str) -> String {
    format!("{} {}s {} {}s", property, seconds, easing, delay)
}

// ============================================================================
// Hover tweens
// ============================================================================

/// Transform applied on pointer enter and reverted on leave
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTween {
    /// Element(s) carrying the listeners
    pub trigger: &'static str,
    /// Child to animate, or `None` to animate the trigger itself
    pub target: Option<&'static str>,
    pub enter: &'static str,
    pub leave: &'static str,
    pub seconds: f64,
}

pub const HOVER_TWEENS: &[HoverTween] = &[
    HoverTween {
        trigger: ".project-card",
        target: Some(".project-visual"),
        enter: "scale(1.05)",
        leave: "scale(1)",
        seconds: 0.3,
    },
    HoverTween {
        trigger: ".skill-item",
        target: None,
        enter: "scale(1.05)",
        leave: "scale(1)",
        seconds: 0.2,
    },
    HoverTween {
        trigger: ".contact-link",
        target: None,
        enter: "translateX(10px)",
        leave: "translateX(0px)",
        seconds: 0.2,
    },
];

// ============================================================================
// Reveals
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealTrigger {
    /// Play right after mount
    OnLoad,
    /// Play once the element's top crosses this fraction of the viewport height
    OnScroll { start: f64 },
}

/// Fade/slide an element from an offset into place
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub selector: &'static str,
    pub trigger: RevealTrigger,
    /// Starting offset in px
    pub from_x: f64,
    pub from_y: f64,
    pub seconds: f64,
    /// Extra delay per element index
    pub stagger: f64,
}

impl Reveal {
    pub fn delay(&self, index: usize) -> f64 {
        index as f64 * self.stagger
    }

    pub fn hidden_transform(&self) -> String {
        format!("translate({}px, {}px)", self.from_x, self.from_y)
    }

    pub fn transition(&self, index: usize) -> String {
        let delay = self.delay(index);
        format!(
            "{}, {}",
            transition("opacity", self.seconds, delay, EASE_OUT_CUBIC),
            transition("transform", self.seconds, delay, EASE_OUT_CUBIC)
        )
    }

    /// Whether the trigger point has already been crossed for an element whose
    /// top sits at `rect_top` (viewport px). Covers elements scrolled past
    /// before mount, which an observer never reports as intersecting.
    pub fn start_passed(&self, rect_top: f64, viewport_height: f64) -> bool {
        match self.trigger {
            RevealTrigger::OnLoad => true,
            RevealTrigger::OnScroll { start } => rect_top < start * viewport_height,
        }
    }

    /// IntersectionObserver root margin for a scroll trigger: shrink the
    /// bottom of the root so entry fires when the top passes `start`.
    pub fn root_margin(&self) -> Option<String> {
        match self.trigger {
            RevealTrigger::OnLoad => None,
            RevealTrigger::OnScroll { start } => {
                let bottom = ((1.0 - start) * 100.0).round();
                Some(format!("0px 0px -{}% 0px", bottom))
            }
        }
    }
}

pub const REVEALS: &[Reveal] = &[
    Reveal {
        selector: ".cell",
        trigger: RevealTrigger::OnLoad,
        from_x: 0.0,
        from_y: 30.0,
        seconds: 0.6,
        stagger: 0.08,
    },
    Reveal {
        selector: ".exp-item, .project-card, .skill-cell",
        trigger: RevealTrigger::OnScroll { start: 0.85 },
        from_x: 0.0,
        from_y: 30.0,
        seconds: 0.6,
        stagger: 0.05,
    },
    Reveal {
        selector: "section h2",
        trigger: RevealTrigger::OnScroll { start: 0.8 },
        from_x: -30.0,
        from_y: 0.0,
        seconds: 0.8,
        stagger: 0.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_threshold() {
        assert!(!nav_is_scrolled(0.0));
        assert!(!nav_is_scrolled(50.0));
        assert!(nav_is_scrolled(50.5));
    }

    #[test]
    fn test_anchor_scroll_top() {
        assert_eq!(anchor_scroll_top(300.0, 1000.0), 1220.0);
        assert_eq!(anchor_scroll_top(-200.0, 1000.0), 720.0);
    }

    #[test]
    fn test_tilt_angles() {
        assert_eq!(tilt_angles(100.0, 50.0, 200.0, 100.0), (0.0, 0.0));
        assert_eq!(tilt_angles(200.0, 0.0, 200.0, 100.0), (10.0, 10.0));
        assert_eq!(tilt_angles(0.0, 100.0, 200.0, 100.0), (-10.0, -10.0));
        assert_eq!(tilt_angles(5.0, 5.0, 0.0, 100.0), (0.0, 0.0));
    }

    #[test]
    fn test_tilt_transform_format() {
        assert_eq!(tilt_transform(-2.5, 10.0), "rotateX(-2.50deg) rotateY(10.00deg)");
    }

    #[test]
    fn test_reveal_staggering() {
        let cells = &REVEALS[0];
        assert_eq!(cells.delay(0), 0.0);
        assert!((cells.delay(3) - 0.24).abs() < 1e-12);
        assert_eq!(cells.hidden_transform(), "translate(0px, 30px)");
        assert!(cells.transition(0).starts_with("opacity 0.6s"));
    }

    #[test]
    fn test_reveal_start_passed() {
        let items = &REVEALS[1];
        // Above the viewport after a restored scroll or deep link
        assert!(items.start_passed(-2200.0, 1000.0));
        assert!(items.start_passed(849.0, 1000.0));
        assert!(!items.start_passed(850.0, 1000.0));
        assert!(!items.start_passed(1400.0, 1000.0));
        assert!(REVEALS[0].start_passed(5000.0, 1000.0));
    }

    #[test]
    fn test_reveal_root_margin() {
        assert_eq!(REVEALS[0].root_margin(), None);
        assert_eq!(REVEALS[1].root_margin().as_deref(), Some("0px 0px -15% 0px"));
        assert_eq!(REVEALS[2].root_margin().as_deref(), Some("0px 0px -20% 0px"));
    }
}

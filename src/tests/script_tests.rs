//! Replaying recorded pointer scripts.
//!
//! Scripts are JSON arrays of pointer events as a host would forward them.

use super::{assert_paired, Harness, FRAME_MS};
use crate::{PointerEvent, Timestamp, ViewportTransform};

/// Send every event, delivering requested frames in the gaps between them.
fn replay(h: &mut Harness, script: &str) {
    let events: Vec<PointerEvent> = serde_json::from_str(script).expect("valid pointer script");
    for event in events {
        while h.frames.outstanding() > 0 && h.now + FRAME_MS <= event.timestamp.as_millis() {
            h.frames.fire();
            h.now += FRAME_MS;
            h.view.on_frame(Timestamp::from_millis(h.now));
        }
        h.send(event);
    }
    h.settle();
}

/// Two-finger spread around the container center, then a one-finger pan to the right edge.
const PINCH_THEN_PAN: &str = r#"[
    {"pointer": 11, "kind": "touch", "phase": "down", "position": {"x": 125.0, "y": 150.0}, "timestamp": 0.0},
    {"pointer": 12, "kind": "touch", "phase": "down", "position": {"x": 175.0, "y": 150.0}, "timestamp": 8.0},
    {"pointer": 11, "kind": "touch", "phase": "move", "position": {"x": 100.0, "y": 150.0}, "timestamp": 24.0},
    {"pointer": 12, "kind": "touch", "phase": "move", "position": {"x": 200.0, "y": 150.0}, "timestamp": 24.0},
    {"pointer": 11, "kind": "touch", "phase": "move", "position": {"x": 75.0, "y": 150.0}, "timestamp": 40.0},
    {"pointer": 12, "kind": "touch", "phase": "move", "position": {"x": 225.0, "y": 150.0}, "timestamp": 40.0},
    {"pointer": 12, "kind": "touch", "phase": "up", "position": {"x": 225.0, "y": 150.0}, "timestamp": 400.0},
    {"pointer": 11, "kind": "touch", "phase": "up", "position": {"x": 75.0, "y": 150.0}, "timestamp": 410.0},
    {"pointer": 13, "kind": "touch", "phase": "down", "position": {"x": 50.0, "y": 150.0}, "timestamp": 1000.0},
    {"pointer": 13, "kind": "touch", "phase": "move", "position": {"x": 150.0, "y": 150.0}, "timestamp": 1016.0},
    {"pointer": 13, "kind": "touch", "phase": "move", "position": {"x": 350.0, "y": 150.0}, "timestamp": 1032.0},
    {"pointer": 13, "kind": "touch", "phase": "up", "position": {"x": 350.0, "y": 150.0}, "timestamp": 1300.0}
]"#;

#[test]
fn test_pinch_then_pan_script() {
    let mut h = Harness::new();
    replay(&mut h, PINCH_THEN_PAN);

    // 50 px apart to 150 px apart: 3x, then panned past the 3x bound of 300 px
    assert_eq!(h.view.transform(), ViewportTransform::new(3.0, 300.0, 0.0));
    assert!(h.view.is_settled());
    assert_paired(&h.drain_signals());
}

/// Double click to zoom, then a drag that loses its release and a second drag that gets cancelled.
const INTERRUPTED_MOUSE: &str = r#"[
    {"pointer": 1, "phase": "down", "position": {"x": 150.0, "y": 150.0}, "timestamp": 0.0},
    {"pointer": 1, "phase": "up", "position": {"x": 150.0, "y": 150.0}, "timestamp": 40.0},
    {"pointer": 1, "phase": "down", "position": {"x": 150.0, "y": 150.0}, "timestamp": 150.0},
    {"pointer": 1, "phase": "up", "position": {"x": 150.0, "y": 150.0}, "timestamp": 190.0},
    {"pointer": 1, "phase": "down", "position": {"x": 150.0, "y": 150.0}, "timestamp": 2000.0},
    {"pointer": 1, "phase": "move", "position": {"x": 100.0, "y": 150.0}, "timestamp": 2016.0},
    {"pointer": 1, "phase": "down", "position": {"x": 100.0, "y": 150.0}, "timestamp": 3000.0},
    {"pointer": 1, "phase": "move", "position": {"x": 400.0, "y": 150.0}, "timestamp": 3016.0},
    {"pointer": 1, "phase": "cancel", "position": {"x": 400.0, "y": 150.0}, "timestamp": 3020.0}
]"#;

#[test]
fn test_interrupted_mouse_script() {
    let mut h = Harness::new();
    replay(&mut h, INTERRUPTED_MOUSE);

    let transform = h.view.transform();
    assert_eq!(transform.scale, 2.0);
    assert!(h.bounds().contains(transform.translate()));
    assert_eq!(transform.translate_x, 150.0);
    assert!(h.view.is_settled());
    assert_paired(&h.drain_signals());
}

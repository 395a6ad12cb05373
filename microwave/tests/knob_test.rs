use microwave_lib::knob::{
    normalize_degrees, Bounds, KnobController, KnobDispatcher, KnobId, Point,
};
use std::sync::{Arc, Mutex};

const CENTER: Point = Point { x: 50.0, y: 50.0 };

fn bounds() -> Bounds {
    Bounds::centered(CENTER, 100.0)
}

fn at(degrees: f64) -> Point {
    Point::on_circle(CENTER, 40.0, degrees)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// ==================== KnobController 测试 ====================

#[test]
fn test_drag_across_wrap_point_is_continuous() {
    let mut knob = KnobController::new();
    knob.drag_start(at(175.0), bounds());

    // atan2 跳变 (+180 -> -180) 不应产生跳跃
    knob.drag_move(at(179.0));
    knob.drag_move(at(-179.0));
    knob.drag_move(at(-170.0));

    assert_close(knob.rotation(), 15.0);
}

#[test]
fn test_full_turns_are_not_lost() {
    let mut knob = KnobController::new();
    knob.drag_start(at(0.0), bounds());

    for step in 1..=72 {
        knob.drag_move(at(step as f64 * 10.0));
    }

    assert_close(knob.rotation(), 720.0);
    assert_close(knob.normalized(), 0.0);
}

#[test]
fn test_counter_clockwise_goes_negative() {
    let mut knob = KnobController::new();
    knob.drag_start(at(0.0), bounds());
    knob.drag_move(at(-30.0));

    assert_close(knob.rotation(), -30.0);
    assert_close(knob.normalized(), 330.0);
}

#[test]
fn test_rotation_survives_drag_sessions() {
    let mut knob = KnobController::new();

    knob.drag_start(at(0.0), bounds());
    knob.drag_move(at(40.0));
    assert!(knob.drag_end());

    // 新拖拽从任意位置开始，只累加增量
    knob.drag_start(at(200.0), bounds());
    knob.drag_move(at(210.0));
    knob.drag_end();

    assert_close(knob.rotation(), 50.0);
    assert!(!knob.is_dragging());
}

#[test]
fn test_rotate_callback_sees_each_sample() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut knob = KnobController::new();
    knob.on_rotate(move |angle| sink.lock().unwrap().push(angle));

    knob.drag_start(at(0.0), bounds());
    knob.drag_move(at(10.0));
    knob.drag_move(at(25.0));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_close(seen[0], 10.0);
    assert_close(seen[1], 25.0);
}

// ==================== KnobDispatcher 测试 ====================

#[test]
fn test_dispatcher_tracks_knobs_independently() {
    let mut knobs = KnobDispatcher::new();

    knobs.drag_start(KnobId::Selection, at(0.0), bounds());
    let changed = knobs.drag_move(at(90.0)).unwrap();
    assert_eq!(changed.knob, KnobId::Selection);
    assert_eq!(knobs.drag_end(), Some(KnobId::Selection));

    knobs.drag_start(KnobId::Adjustment, at(0.0), bounds());
    knobs.drag_move(at(-45.0));
    knobs.drag_end();

    assert_close(knobs.knob(KnobId::Selection).rotation(), 90.0);
    assert_close(knobs.knob(KnobId::Adjustment).rotation(), -45.0);
    assert_eq!(knobs.active(), None);
}

#[test]
fn test_dispatcher_ignores_stray_events() {
    let mut knobs = KnobDispatcher::new();
    assert!(knobs.drag_move(at(10.0)).is_none());
    assert_eq!(knobs.drag_end(), None);
}

// ==================== 角度工具测试 ====================

#[test]
fn test_normalize_covers_negative_and_large_angles() {
    for (input, expected) in [
        (-1.0, 359.0),
        (-360.0, 0.0),
        (360.0, 0.0),
        (725.0, 5.0),
        (-725.0, 355.0),
    ] {
        assert_close(normalize_degrees(input), expected);
    }
}

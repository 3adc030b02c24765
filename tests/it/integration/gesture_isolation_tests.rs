//! Gesture Isolation Integration Tests
//!
//! Two items, two pointers: each gesture must only ever see its own pointer.

use crate::helpers::{TestCanvasBuilder, flush_frames, key, mouse, pen, touch};
use collection_canvas::{PointerTarget, Rectangle, ResizeDirection};

#[test]
fn test_two_items_two_pointers() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:a", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .with_item("note:b", Rectangle::new(500.0, 0.0, 300.0, 200.0))
        .build();

    canvas.pointer_down(&mouse(1, 10.0, 10.0), &PointerTarget::ItemBody(key("note:a")), &mut host);
    canvas.pointer_down(
        &pen(2, 800.0, 200.0),
        &PointerTarget::ResizeHandle(key("note:b"), ResizeDirection::SE),
        &mut host,
    );

    canvas.pointer_move(&mouse(1, 60.0, 10.0), &mut host);
    canvas.pointer_move(&pen(2, 850.0, 260.0), &mut host);
    flush_frames(&mut canvas, &mut host);

    assert_eq!(
        canvas.current_layout(&key("note:a")),
        Some(Rectangle::new(50.0, 0.0, 300.0, 200.0))
    );
    assert_eq!(
        canvas.current_layout(&key("note:b")),
        Some(Rectangle::new(500.0, 0.0, 350.0, 260.0))
    );

    // Releasing pointer 1 commits only item A
    canvas.pointer_up(&mouse(1, 60.0, 10.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:a")], Rectangle::new(50.0, 0.0, 300.0, 200.0));
    assert_eq!(canvas.layouts()[&key("note:b")], Rectangle::new(500.0, 0.0, 300.0, 200.0));
    assert!(canvas.item(&key("note:b")).is_some_and(|item| item.is_resizing()));

    canvas.pointer_up(&pen(2, 850.0, 260.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:b")], Rectangle::new(500.0, 0.0, 350.0, 260.0));
    assert!(host.is_quiescent());
}

#[test]
fn test_foreign_pointer_cannot_end_gesture() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:a", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();

    canvas.pointer_down(&mouse(1, 0.0, 0.0), &PointerTarget::ItemBody(key("note:a")), &mut host);
    canvas.pointer_move(&mouse(1, 40.0, 0.0), &mut host);
    canvas.pointer_up(&mouse(7, 40.0, 0.0), &mut host);
    canvas.pointer_cancel(&mouse(8, 40.0, 0.0), &mut host);

    assert!(canvas.item(&key("note:a")).is_some_and(|item| item.is_dragging()));
    assert_eq!(canvas.layouts()[&key("note:a")], Rectangle::new(0.0, 0.0, 300.0, 200.0));
}

#[test]
fn test_second_press_on_busy_item_is_ignored() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:a", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();

    let body = PointerTarget::ItemBody(key("note:a"));
    assert!(canvas.pointer_down(&mouse(1, 0.0, 0.0), &body, &mut host).is_handled());
    assert!(!canvas.pointer_down(&touch(2, 0.0, 0.0), &body, &mut host).is_handled());
    assert!(!host.is_captured(collection_canvas::input::PointerId(2)));
}

#[test]
fn test_pinch_during_item_drag_leaves_drag_running() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:a", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();

    // First finger drags the item
    assert!(
        canvas
            .pointer_down(&touch(1, 10.0, 10.0), &PointerTarget::ItemBody(key("note:a")), &mut host)
            .is_handled()
    );
    // Second finger lands on the background and turns it into a pinch
    assert!(
        canvas
            .pointer_down(&touch(2, 510.0, 10.0), &PointerTarget::Background, &mut host)
            .is_handled()
    );
    assert!(canvas.viewport_controller().is_pinching());
    assert!(canvas.item(&key("note:a")).is_some_and(|item| item.is_dragging()));

    canvas.pointer_up(&touch(2, 510.0, 10.0), &mut host);
    canvas.pointer_up(&touch(1, 10.0, 10.0), &mut host);
    assert!(!canvas.viewport_controller().is_pinching());
    assert!(canvas.item(&key("note:a")).is_some_and(|item| item.is_idle()));
    assert!(host.is_quiescent());
}

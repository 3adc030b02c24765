//! Canvas Workflow Integration Tests

use crate::helpers::{SURFACE, TestCanvasBuilder, ctrl_wheel, delta_for_factor, flush_frames, key, middle, mouse};
use collection_canvas::input::{EventDisposition, KeyEvent};
use collection_canvas::{CanvasSettings, CollectionCanvas, GestureHost, Point, PointerTarget, Rectangle, ResizeDirection};
use std::cell::RefCell;
use std::rc::Rc;

fn record_commits(canvas: &mut CollectionCanvas) -> Rc<RefCell<Vec<(String, Rectangle)>>> {
    let commits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&commits);
    canvas.set_on_layout_change(move |key, rect| sink.borrow_mut().push((key.to_string(), rect)));
    commits
}

#[test]
fn test_drag_item_commits_and_notifies() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:1", Rectangle::new(100.0, 100.0, 300.0, 200.0))
        .build();
    let commits = record_commits(&mut canvas);

    let target = PointerTarget::ItemBody(key("note:1"));
    assert!(canvas.pointer_down(&mouse(1, 150.0, 150.0), &target, &mut host).is_handled());

    canvas.pointer_move(&mouse(1, 200.0, 170.0), &mut host);
    canvas.pointer_move(&mouse(1, 250.0, 190.0), &mut host);
    assert!(flush_frames(&mut canvas, &mut host));
    assert_eq!(
        canvas.current_layout(&key("note:1")),
        Some(Rectangle::new(200.0, 140.0, 300.0, 200.0))
    );
    // Not committed until release
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(100.0, 100.0, 300.0, 200.0));
    assert!(commits.borrow().is_empty());

    canvas.pointer_up(&mouse(1, 250.0, 190.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(200.0, 140.0, 300.0, 200.0));
    assert_eq!(
        *commits.borrow(),
        vec![("note:1".to_string(), Rectangle::new(200.0, 140.0, 300.0, 200.0))]
    );
    assert!(host.is_quiescent());
}

#[test]
fn test_drag_at_zoom_moves_in_world_units() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_scale(2.0)
        .with_item("note:1", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();

    let target = PointerTarget::ItemBody(key("note:1"));
    canvas.pointer_down(&mouse(1, 10.0, 10.0), &target, &mut host);
    canvas.pointer_move(&mouse(1, 110.0, 50.0), &mut host);
    canvas.pointer_up(&mouse(1, 110.0, 50.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(50.0, 20.0, 300.0, 200.0));
}

#[test]
fn test_resize_handle_commits_through_canvas() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:1", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();

    let target = PointerTarget::ResizeHandle(key("note:1"), ResizeDirection::E);
    canvas.pointer_down(&mouse(1, 300.0, 100.0), &target, &mut host);
    canvas.pointer_move(&mouse(1, 420.0, 180.0), &mut host);
    canvas.pointer_up(&mouse(1, 420.0, 180.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(0.0, 0.0, 420.0, 200.0));
}

#[test]
fn test_space_press_on_item_pans_instead_of_dragging() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:1", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();

    canvas.key_down(&KeyEvent::new(" ", "Space"), &mut host);
    let target = PointerTarget::ItemBody(key("note:1"));
    assert!(canvas.pointer_down(&mouse(1, 50.0, 50.0), &target, &mut host).is_handled());
    canvas.pointer_move(&mouse(1, 80.0, 90.0), &mut host);
    canvas.pointer_up(&mouse(1, 80.0, 90.0), &mut host);

    assert_eq!(canvas.viewport_offset(), Point::new(30.0, 40.0));
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(0.0, 0.0, 300.0, 200.0));
    assert!(canvas.item(&key("note:1")).is_some_and(|item| item.is_idle()));
}

#[test]
fn test_middle_button_on_item_pans() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:1", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();

    let target = PointerTarget::ItemBody(key("note:1"));
    canvas.pointer_down(&middle(1, 0.0, 0.0), &target, &mut host);
    canvas.pointer_move(&middle(1, -25.0, 0.0), &mut host);
    canvas.pointer_up(&middle(1, -25.0, 0.0), &mut host);
    assert_eq!(canvas.viewport_offset(), Point::new(-25.0, 0.0));
}

#[test]
fn test_editable_target_never_starts_anything() {
    let (mut canvas, mut host) = TestCanvasBuilder::new().with_n_items(2).build();
    assert_eq!(
        canvas.pointer_down(&mouse(1, 0.0, 0.0), &PointerTarget::Editable, &mut host),
        EventDisposition::Ignored
    );
    assert!(host.is_quiescent());
}

#[test]
fn test_wheel_zoom_then_hit_test() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:a", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .with_item("note:b", Rectangle::new(400.0, 0.0, 300.0, 200.0))
        .build();

    assert_eq!(canvas.hit_test(Point::new(450.0, 50.0), host.surface_rect()), Some(key("note:b")));

    canvas.wheel(&ctrl_wheel(0.0, 0.0, delta_for_factor(2.0)), &host);
    // (450, 50) on screen is now world (225, 25)
    assert_eq!(canvas.hit_test(Point::new(450.0, 50.0), host.surface_rect()), Some(key("note:a")));
    assert_eq!(canvas.hit_test(Point::new(650.0, 50.0), host.surface_rect()), None);

    host.set_surface(None);
    assert_eq!(canvas.hit_test(Point::new(10.0, 10.0), host.surface_rect()), None);
}

#[test]
fn test_hit_test_prefers_topmost_and_follows_commits() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:under", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .with_item("note:over", Rectangle::new(100.0, 100.0, 300.0, 200.0))
        .build();
    assert_eq!(canvas.hit_test(Point::new(150.0, 150.0), Some(SURFACE)), Some(key("note:over")));

    let target = PointerTarget::ItemBody(key("note:over"));
    canvas.pointer_down(&mouse(1, 150.0, 150.0), &target, &mut host);
    canvas.pointer_move(&mouse(1, 650.0, 150.0), &mut host);
    canvas.pointer_up(&mouse(1, 650.0, 150.0), &mut host);

    assert_eq!(canvas.hit_test(Point::new(150.0, 150.0), Some(SURFACE)), Some(key("note:under")));
    assert_eq!(canvas.hit_test(Point::new(650.0, 150.0), Some(SURFACE)), Some(key("note:over")));
}

#[test]
fn test_recenter_viewport_on_items() {
    let (mut canvas, host) = TestCanvasBuilder::new()
        .with_offset(999.0, 999.0)
        .with_item("note:a", Rectangle::new(0.0, 0.0, 400.0, 300.0))
        .build();
    canvas.recenter_viewport(&host);
    // Box center (200, 150) onto surface center (500, 400)
    assert_eq!(canvas.viewport_offset(), Point::new(300.0, 250.0));
}

#[test]
fn test_recenter_empty_canvas() {
    let (mut canvas, host) = TestCanvasBuilder::new().with_offset(-40.0, 70.0).build();
    canvas.recenter_viewport(&host);
    assert_eq!(canvas.viewport_offset(), Point::ORIGIN);
}

#[test]
fn test_reconcile_items_places_and_drops() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:old", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .with_item("note:keep", Rectangle::new(500.0, 500.0, 300.0, 200.0))
        .build();

    let placed = canvas.reconcile_items(&[key("note:keep"), key("todo:fresh")], &mut host);
    assert_eq!(placed, vec![key("todo:fresh")]);
    assert_eq!(canvas.len(), 2);
    assert!(canvas.current_layout(&key("note:old")).is_none());
    assert_eq!(
        canvas.current_layout(&key("note:keep")),
        Some(Rectangle::new(500.0, 500.0, 300.0, 200.0))
    );
    // Second slot of a 1000px-wide grid
    assert_eq!(
        canvas.current_layout(&key("todo:fresh")),
        Some(Rectangle::new(352.0, 16.0, 320.0, 240.0))
    );
}

#[test]
fn test_insert_rejects_empty_key_and_replaces_existing() {
    let mut canvas = CollectionCanvas::default();
    assert!(!canvas.insert_item(key(""), Rectangle::default()));
    assert!(canvas.insert_item(key("note:1"), Rectangle::default()));
    assert!(canvas.insert_item(key("note:1"), Rectangle::new(5.0, 5.0, 300.0, 200.0)));
    assert_eq!(canvas.len(), 1);
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(5.0, 5.0, 300.0, 200.0));
}

#[test]
fn test_constrained_canvas_clamps_commit() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .constrained()
        .with_item("note:1", Rectangle::new(0.0, 0.0, 300.0, 300.0))
        .build();

    let target = PointerTarget::ItemBody(key("note:1"));
    canvas.pointer_down(&mouse(1, 0.0, 0.0), &target, &mut host);
    canvas.pointer_move(&mouse(1, -50.0, 900.0), &mut host);
    canvas.pointer_up(&mouse(1, -50.0, 900.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(0.0, 500.0, 300.0, 300.0));
}

#[test]
fn test_unconstrained_drag_goes_offscreen() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_item("note:1", Rectangle::new(0.0, 0.0, 300.0, 300.0))
        .build();

    let target = PointerTarget::ItemBody(key("note:1"));
    canvas.pointer_down(&mouse(1, 0.0, 0.0), &target, &mut host);
    canvas.pointer_move(&mouse(1, -500.0, 2000.0), &mut host);
    canvas.pointer_up(&mouse(1, -500.0, 2000.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:1")], Rectangle::new(-500.0, 2000.0, 300.0, 300.0));
}

#[test]
fn test_headless_host_without_surface_still_drags() {
    let (mut canvas, mut host) = TestCanvasBuilder::new()
        .with_surface(None)
        .with_item("note:1", Rectangle::new(0.0, 0.0, 300.0, 200.0))
        .build();
    let target = PointerTarget::ItemBody(key("note:1"));
    assert!(canvas.pointer_down(&mouse(1, 0.0, 0.0), &target, &mut host).is_handled());
    canvas.pointer_move(&mouse(1, 10.0, 0.0), &mut host);
    canvas.pointer_up(&mouse(1, 10.0, 0.0), &mut host);
    assert_eq!(canvas.layouts()[&key("note:1")].x, 10.0);

    // Background press cannot pan without a surface
    assert_eq!(
        canvas.pointer_down(&mouse(2, 0.0, 0.0), &PointerTarget::Background, &mut host),
        EventDisposition::Ignored
    );
}

#[test]
fn test_invalid_settings_fall_back_to_defaults() {
    let reversed = CanvasSettings {
        min_scale: 2.0,
        max_scale: 1.0,
        ..Default::default()
    };
    let mut canvas = CollectionCanvas::new(reversed);
    assert_eq!(canvas.settings(), &CanvasSettings::default());
    canvas.set_viewport_scale(1.5);
    assert_eq!(canvas.viewport_scale(), 1.5);

    canvas.set_settings(CanvasSettings {
        max_scale: f64::NAN,
        ..Default::default()
    });
    assert_eq!(canvas.settings(), &CanvasSettings::default());
    canvas.set_viewport_scale(10.0);
    assert_eq!(canvas.viewport_scale(), CanvasSettings::default().max_scale);
}

//! Unit tests for resize directions and per-item gestures.

use crate::helpers::{mouse, touch};
use collection_canvas::input::MouseButton;
use collection_canvas::{
    CanvasError, CursorStyle, HeadlessHost, Rectangle, RectangleConfig, RectangleController, ResizeDirection, ScreenRect,
};

fn free(layout: Rectangle) -> RectangleController {
    RectangleController::new(
        layout,
        RectangleConfig {
            constrain_to_container: false,
            ..Default::default()
        },
    )
}

#[test]
fn test_anchor_edges_for_every_direction() {
    let start = Rectangle::new(100.0, 100.0, 500.0, 400.0);
    for dir in ResizeDirection::ALL {
        let edges = dir.edges();
        let r = dir.apply(start, 37.0, -23.0);
        if edges.west {
            assert_eq!(r.right(), start.right(), "{dir}");
        }
        if edges.north {
            assert_eq!(r.bottom(), start.bottom(), "{dir}");
        }
        if edges.east {
            assert_eq!(r.x, start.x, "{dir}");
        }
        if edges.south {
            assert_eq!(r.y, start.y, "{dir}");
        }
        if !edges.east && !edges.west {
            assert_eq!((r.x, r.width), (start.x, start.width), "{dir}");
        }
        if !edges.north && !edges.south {
            assert_eq!((r.y, r.height), (start.y, start.height), "{dir}");
        }
    }
}

#[test]
fn test_parse_rejects_unknown_names() {
    let err = "diagonal".parse::<ResizeDirection>().unwrap_err();
    assert!(matches!(err, CanvasError::UnknownResizeDirection(_)));
    assert_eq!(err.to_string(), "Unknown resize direction: \"diagonal\"");
}

#[test]
fn test_se_resize_at_scale() {
    let mut host = HeadlessHost::new(None);
    let mut c = free(Rectangle::new(0.0, 0.0, 300.0, 200.0));
    assert!(c.begin_resize(&mouse(1, 0.0, 0.0), ResizeDirection::SE, 2.0, &mut host));
    c.pointer_move(&mouse(1, 100.0, 60.0), &mut host);
    let committed = c.pointer_up(&mouse(1, 100.0, 60.0), 2.0, &mut host);
    assert_eq!(committed, Some(Rectangle::new(0.0, 0.0, 350.0, 230.0)));
}

#[test]
fn test_nw_resize_moves_origin_keeps_far_corner() {
    let mut host = HeadlessHost::new(None);
    let mut c = free(Rectangle::new(100.0, 100.0, 400.0, 300.0));
    c.begin_resize(&mouse(1, 0.0, 0.0), ResizeDirection::NW, 1.0, &mut host);
    c.pointer_move(&mouse(1, 50.0, 50.0), &mut host);
    let committed = c.pointer_up(&mouse(1, 50.0, 50.0), 1.0, &mut host).unwrap();
    assert_eq!(committed, Rectangle::new(150.0, 150.0, 350.0, 250.0));
    assert_eq!(committed.right(), 500.0);
    assert_eq!(committed.bottom(), 400.0);
}

#[test]
fn test_touch_drag_has_no_cursor_override() {
    let mut host = HeadlessHost::new(None);
    let mut c = free(Rectangle::default());
    assert!(c.begin_drag(&touch(4, 0.0, 0.0), 1.0, &mut host));
    assert_eq!(host.cursor(), CursorStyle::Default);
    assert!(!host.text_selection_enabled());
}

#[test]
fn test_mouse_drag_sets_move_cursor() {
    let mut host = HeadlessHost::new(None);
    let mut c = free(Rectangle::default());
    c.begin_drag(&mouse(1, 0.0, 0.0), 1.0, &mut host);
    assert_eq!(host.cursor(), CursorStyle::Move);
    c.pointer_cancel(&mouse(1, 0.0, 0.0), 1.0, &mut host);
    assert_eq!(host.cursor(), CursorStyle::Default);
}

#[test]
fn test_middle_button_does_not_drag() {
    let mut host = HeadlessHost::new(None);
    let mut c = free(Rectangle::default());
    assert!(!c.begin_drag(&mouse(1, 0.0, 0.0).with_button(MouseButton::Middle), 1.0, &mut host));
}

#[test]
fn test_cancel_commits_partial_progress() {
    let mut host = HeadlessHost::new(None);
    let mut c = free(Rectangle::new(0.0, 0.0, 300.0, 200.0));
    c.begin_drag(&mouse(1, 0.0, 0.0), 1.0, &mut host);
    c.pointer_move(&mouse(1, 60.0, 40.0), &mut host);
    let committed = c.pointer_cancel(&mouse(1, 60.0, 40.0), 1.0, &mut host);
    assert_eq!(committed, Some(Rectangle::new(60.0, 40.0, 300.0, 200.0)));
    assert!(host.is_quiescent());
}

#[test]
fn test_constrained_drag_stays_in_surface() {
    let mut host = HeadlessHost::new(Some(ScreenRect::new(0.0, 0.0, 1000.0, 800.0)));
    let mut c = RectangleController::new(Rectangle::new(0.0, 0.0, 300.0, 300.0), RectangleConfig::default());
    c.begin_drag(&mouse(1, 0.0, 0.0), 1.0, &mut host);
    c.pointer_move(&mouse(1, -50.0, 900.0), &mut host);
    let committed = c.pointer_up(&mouse(1, -50.0, 900.0), 1.0, &mut host);
    assert_eq!(committed, Some(Rectangle::new(0.0, 500.0, 300.0, 300.0)));
}

//! Unit tests for geometry clamping.

use collection_canvas::{Rectangle, Size, SizeLimits, clamp, clamp_with};

#[test]
fn test_clamped_result_inside_container_at_every_scale() {
    let container = Size::new(1200.0, 900.0);
    for scale in [0.25, 0.5, 1.0, 1.75, 3.0] {
        let r = clamp(Rectangle::new(5000.0, 5000.0, 350.0, 250.0), Some(container), scale);
        let world_w = container.width / scale;
        let world_h = container.height / scale;
        assert!(r.x >= 0.0 && r.y >= 0.0, "scale {scale}: {r:?}");
        if world_w >= r.width {
            assert!(r.right() <= world_w + 1e-9, "scale {scale}: {r:?}");
        }
        if world_h >= r.height {
            assert!(r.bottom() <= world_h + 1e-9, "scale {scale}: {r:?}");
        }
    }
}

#[test]
fn test_custom_limits() {
    let limits = SizeLimits {
        min_width: 100.0,
        min_height: 50.0,
    };
    let r = clamp_with(Rectangle::new(0.0, 0.0, 20.0, 20.0), None, 1.0, &limits);
    assert_eq!(r.width, 100.0);
    assert_eq!(r.height, 50.0);
}

#[test]
fn test_uncontained_keeps_negative_positions() {
    let r = clamp(Rectangle::new(-900.0, -120.0, 300.0, 220.0), None, 2.0);
    assert_eq!(r, Rectangle::new(-900.0, -120.0, 300.0, 220.0));
}

#[test]
fn test_non_finite_position_becomes_zero() {
    let r = clamp(Rectangle::new(f64::NAN, f64::NEG_INFINITY, 300.0, 220.0), None, 1.0);
    assert_eq!(r, Rectangle::new(0.0, 0.0, 300.0, 220.0));
}

#[test]
fn test_zero_container_skips_containment() {
    let r = clamp(Rectangle::new(-5.0, -5.0, 300.0, 220.0), Some(Size::new(0.0, 0.0)), 1.0);
    assert_eq!(r, Rectangle::new(-5.0, -5.0, 300.0, 220.0));
}

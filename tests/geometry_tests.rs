//! Tests for geometry values and packed colors.

use nano_ui::geometry::{scale_size, NativePoint, NativeRect, NativeSize};
use nano_ui::{Color, Point, Rect, Size};

// === Native Conversion Tests ===

#[test]
fn rect_to_native_and_back_is_exact() {
    let r = Rect::new(10.5f32, -3.25, 200.0, 120.75);
    assert_eq!(Rect::<f32>::from_native(r.to_native()), r);
}

#[test]
fn int_rect_to_native_and_back_is_exact() {
    let r = Rect::new(-7, 12, 640, 480);
    assert_eq!(Rect::<i32>::from_native(r.to_native()), r);
}

#[test]
fn native_rect_fields_follow_origin_and_size() {
    let native = Rect::new(1.0f64, 2.0, 3.0, 4.0).to_native();
    assert_eq!(native.origin.x, 1.0);
    assert_eq!(native.origin.y, 2.0);
    assert_eq!(native.size.width, 3.0);
    assert_eq!(native.size.height, 4.0);
}

#[test]
fn native_to_int_truncates_toward_zero() {
    let native = NativeRect::new(NativePoint::new(1.9, -1.9), NativeSize::new(10.99, 0.5));
    assert_eq!(Rect::<i32>::from_native(native), Rect::new(1, -1, 10, 0));
}

#[test]
fn cast_between_scalars() {
    let p = Point::new(3.75f64, -2.5);
    assert_eq!(p.cast::<i32>(), Point::new(3, -2));
    assert_eq!(Size::new(4, 5).cast::<f32>(), Size::new(4.0, 5.0));
}

// === Containment Tests ===

#[test]
fn rect_contains_origin_but_not_far_edge() {
    let r = Rect::new(10, 10, 5, 5);
    assert!(r.contains(Point::new(10, 10)));
    assert!(r.contains(Point::new(14, 14)));
    assert!(!r.contains(Point::new(15, 12)));
    assert!(!r.contains(Point::new(12, 15)));
    assert!(!r.contains(Point::new(9, 12)));
}

#[test]
fn empty_rect_contains_nothing() {
    let r = Rect::new(0.0f32, 0.0, 0.0, 10.0);
    assert!(!r.contains(Point::new(0.0, 0.0)));
    assert!(r.size.is_empty());
}

// === Scaling Tests ===

#[test]
fn scale_size_divides_by_factor() {
    assert_eq!(scale_size(Size::new(64, 32), 2.0), Size::new(32, 16));
    assert_eq!(scale_size(Size::new(64, 32), 1.0), Size::new(64, 32));
}

#[test]
fn scale_size_truncates_odd_pixels() {
    assert_eq!(scale_size(Size::new(33, 17), 2.0), Size::new(16, 8));
}

#[test]
fn scale_size_rejects_negative_factor() {
    assert_eq!(scale_size(Size::new(33, 17), -2.0), Size::new(33, 17));
}

// === Color Tests ===

#[test]
fn color_constants() {
    assert_eq!(Color::BLACK.rgba(), 0x0000_00FF);
    assert_eq!(Color::WHITE.alpha(), 0xFF);
    assert_eq!(Color::TRANSPARENT.alpha(), 0);
    assert_eq!(Color::default(), Color::TRANSPARENT);
}

#[test]
fn color_from_u32_is_rgba() {
    let c: Color = 0xFF80_00C0.into();
    assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0xFF, 0x80, 0x00, 0xC0));
}

#[test]
fn color_argb_packing() {
    let c = Color::from_rgba(0x11, 0x22, 0x33, 0x44);
    assert_eq!(c.to_argb(), 0x4411_2233);
    assert_eq!(Color::from_argb(0x4411_2233), c);
}

#[test]
fn color_components_half_alpha() {
    let [r, g, b, a] = Color::from_rgba(255, 0, 0, 0).with_alpha(51).components();
    assert_eq!((r, g, b), (1.0, 0.0, 0.0));
    assert!((a - 0.2).abs() < 1e-9);
}

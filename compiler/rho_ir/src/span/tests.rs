use super::*;

#[test]
fn test_span_merge() {
    let a = Span::new(4, 9);
    let b = Span::new(1, 6);
    assert_eq!(a.merge(b), Span::new(1, 9));
}

#[test]
fn test_to_range_roundtrip() {
    let span = Span::from_range(10..20);
    assert_eq!(span.to_range(), 10..20);
    assert_eq!(format!("{span}"), "10..20");
}

#[test]
fn test_from_range_saturates() {
    let too_big = (u32::MAX as usize) + 1;
    assert_eq!(Span::from_range(2..too_big), Span::new(2, u32::MAX));
    assert_eq!(Span::point(7), Span::new(7, 7));
}

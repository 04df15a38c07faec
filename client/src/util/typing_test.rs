use super::*;

#[test]
fn reveals_step_chars_per_tick() {
    let reveal = TypedReveal::new(3);
    assert_eq!(reveal.visible("abcdefgh", 0), "");
    assert_eq!(reveal.visible("abcdefgh", 1), "abc");
    assert_eq!(reveal.visible("abcdefgh", 2), "abcdef");
    assert_eq!(reveal.visible("abcdefgh", 3), "abcdefgh");
    assert_eq!(reveal.visible("abcdefgh", 99), "abcdefgh");
}

#[test]
fn cuts_on_char_boundaries() {
    let reveal = TypedReveal::new(2);
    assert_eq!(reveal.visible("पौधे 🌱 grow", 1), "पौ");
    assert_eq!(reveal.visible("🌱🌱🌱", 1), "🌱🌱");
}

#[test]
fn completion_matches_tick_count() {
    let reveal = TypedReveal::new(4);
    assert_eq!(reveal.ticks_needed("abcdefghi"), 3);
    assert!(!reveal.is_complete("abcdefghi", 2));
    assert!(reveal.is_complete("abcdefghi", 3));
    assert!(reveal.is_complete("", 0));
}

#[test]
fn zero_step_is_clamped() {
    assert_eq!(TypedReveal::new(0).visible("abc", 1), "a");
}

#[test]
fn huge_tick_count_does_not_overflow() {
    assert_eq!(TypedReveal::default().visible("abc", usize::MAX), "abc");
}

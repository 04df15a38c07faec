use super::*;

#[test]
fn is_active_matches_exact_route() {
    assert!(is_active("/learning", "/learning"));
    assert!(!is_active("/learning", "/progress"));
}

#[test]
fn is_active_ignores_trailing_slash() {
    assert!(is_active("/learning/", "/learning"));
    assert!(is_active("", "/"));
}

#[test]
fn home_is_not_active_on_nested_routes() {
    assert!(!is_active("/progress", "/"));
}

#[test]
fn link_class_marks_active_link() {
    assert_eq!(link_class("/", "/"), "nav__link nav__link--active");
    assert_eq!(link_class("/", "/learning"), "nav__link");
}

#[test]
fn nav_links_cover_protected_routes() {
    let paths: Vec<&str> = NAV_LINKS.iter().map(|&(_, p)| p).collect();
    assert_eq!(paths, vec!["/", "/learning", "/progress"]);
}

use super::*;

#[test]
fn parse_port_defaults_when_missing_or_blank() {
    assert_eq!(parse_port(None), DEFAULT_PORT);
    assert_eq!(parse_port(Some("   ")), DEFAULT_PORT);
}

#[test]
fn parse_port_reads_trimmed_value() {
    assert_eq!(parse_port(Some(" 8080 ")), 8080);
}

#[test]
fn parse_port_falls_back_on_garbage() {
    assert_eq!(parse_port(Some("eighty")), DEFAULT_PORT);
    assert_eq!(parse_port(Some("70000")), DEFAULT_PORT);
}

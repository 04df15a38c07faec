use super::*;

#[test]
fn marking_same_topic_twice_keeps_one_entry() {
    let mut p = Progress::default();
    assert!(p.mark_learned("Biology", "Cells"));
    assert!(!p.mark_learned("Biology", "Cells"));
    assert!(!p.mark_learned(" Biology ", " Cells "));
    assert_eq!(p.topics("Biology"), ["Cells".to_owned()]);
    assert_eq!(p.total(), 1);
}

#[test]
fn blank_subject_or_topic_is_ignored() {
    let mut p = Progress::default();
    assert!(!p.mark_learned("", "Cells"));
    assert!(!p.mark_learned("Biology", "  "));
    assert!(p.is_empty());
}

#[test]
fn subjects_are_listed_alphabetically_with_topics_in_order() {
    let mut p = Progress::default();
    p.mark_learned("Physics", "Inertia");
    p.mark_learned("Biology", "Osmosis");
    p.mark_learned("Biology", "Cells");

    let listed: Vec<(&str, Vec<&str>)> =
        p.subjects().map(|(s, t)| (s, t.iter().map(String::as_str).collect())).collect();
    assert_eq!(listed, vec![("Biology", vec!["Osmosis", "Cells"]), ("Physics", vec!["Inertia"])]);
    assert!(p.is_learned("Biology", "Cells"));
    assert!(!p.is_learned("Physics", "Cells"));
}

#[test]
fn serializes_as_plain_map() {
    let mut p = Progress::default();
    p.mark_learned("Math", "Limits");
    assert_eq!(serde_json::to_value(&p).unwrap(), serde_json::json!({ "Math": ["Limits"] }));
}

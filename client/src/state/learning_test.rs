use super::*;

fn reply(success: bool, explanation: Option<&str>, message: Option<&str>) -> ExplainReply {
    ExplainReply {
        success,
        explanation: explanation.map(str::to_owned),
        reply: explanation.map(str::to_owned),
        message: message.map(str::to_owned),
    }
}

// =============================================================
// form fields
// =============================================================

#[test]
fn defaults_are_general_and_english() {
    let s = LearningState::default();
    assert_eq!(s.subject, DEFAULT_SUBJECT);
    assert_eq!(s.language, DEFAULT_LANGUAGE);
    assert!(!s.loading);
    assert!(!s.has_explanation());
}

#[test]
fn custom_topic_wins_and_clears_selection() {
    let mut s = LearningState::default();
    s.select_topic("Cells");
    assert_eq!(s.resolved_topic(), Some("Cells"));
    s.set_custom_topic("Mitosis");
    assert_eq!(s.selected_topic, "");
    assert_eq!(s.resolved_topic(), Some("Mitosis"));
}

#[test]
fn picking_topic_keeps_custom_text() {
    let mut s = LearningState::default();
    s.set_custom_topic("  ");
    s.select_topic("Cells");
    assert_eq!(s.custom_topic, "  ");
    assert_eq!(s.resolved_topic(), Some("Cells"));
}

#[test]
fn changing_subject_clears_picked_topic() {
    let mut s = LearningState::default();
    s.select_topic("Gravity");
    s.set_subject("Biology");
    assert_eq!(s.selected_topic, "");
    s.select_topic("Cells");
    s.set_subject("Biology");
    assert_eq!(s.selected_topic, "Cells");
}

// =============================================================
// request lifecycle
// =============================================================

#[test]
fn prepare_without_topic_fails_and_stays_idle() {
    let mut s = LearningState { explanation: "previous".into(), ..LearningState::default() };
    assert_eq!(s.prepare_request(), Err(TOPIC_REQUIRED_MESSAGE.to_owned()));
    assert!(!s.loading);
    assert_eq!(s.explanation, "previous");
    assert_eq!(s.error.as_deref(), Some(TOPIC_REQUIRED_MESSAGE));
}

#[test]
fn prepare_builds_request_and_enters_loading() {
    let mut s = LearningState { explanation: "previous".into(), ..LearningState::default() };
    s.set_subject("Biology");
    s.select_topic("Photosynthesis");

    let req = s.prepare_request().unwrap();

    assert_eq!(req.selected_subject, "Biology");
    assert_eq!(req.selected_topic, "Photosynthesis");
    assert_eq!(req.custom_topic, "");
    assert_eq!(req.language, "English");
    assert!(s.loading);
    assert!(s.explanation.is_empty());
}

#[test]
fn second_prepare_while_loading_is_refused() {
    let mut s = LearningState::default();
    s.select_topic("Cells");
    s.prepare_request().unwrap();
    assert_eq!(s.prepare_request(), Err(BUSY_MESSAGE.to_owned()));
    assert!(s.loading);
}

#[test]
fn finish_success_stores_text_verbatim() {
    let mut s = LearningState::default();
    s.select_topic("Cells");
    s.prepare_request().unwrap();
    s.finish(Ok(reply(true, Some("**Cells** are units of life.\n"), None)));
    assert_eq!(s.explanation, "**Cells** are units of life.\n");
    assert!(!s.loading);
    assert!(s.error.is_none());
}

#[test]
fn finish_empty_completion_shows_placeholder() {
    let mut s = LearningState::default();
    s.select_topic("Cells");
    s.prepare_request().unwrap();
    s.finish(Ok(reply(false, None, Some(NO_EXPLANATION_MESSAGE))));
    assert_eq!(s.explanation, NO_EXPLANATION_MESSAGE);
    assert!(!s.loading);
}

#[test]
fn finish_failure_shows_generic_message() {
    let mut s = LearningState::default();
    s.select_topic("Cells");
    s.prepare_request().unwrap();
    s.finish(Err("OPENROUTER_API_KEY not found in environment".into()));
    assert_eq!(s.explanation, FAILURE_MESSAGE);
    assert_eq!(s.error.as_deref(), Some("OPENROUTER_API_KEY not found in environment"));
    assert!(!s.loading);
}

// =============================================================
// export
// =============================================================

#[test]
fn export_requires_explanation() {
    assert!(LearningState::default().export().is_none());
}

#[test]
fn export_names_file_and_lists_fields() {
    let mut s = LearningState::default();
    s.set_subject("Biology");
    s.set_custom_topic("Cells/Tissues");
    s.explanation = "Cells group into tissues.".into();

    let file = s.export().unwrap();

    assert_eq!(file.filename, "Biology_Cells-Tissues.txt");
    assert_eq!(
        file.content,
        "Subject: Biology\nTopic: Cells/Tissues\nLanguage: English\n\nExplanation:\nCells group into tissues.\n"
    );
}

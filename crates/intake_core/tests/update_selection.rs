use std::sync::Once;

use intake_core::{update, AppState, DocumentType, Effect, Msg, Phase, SelectedFile};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(intake_logging::initialize_for_tests);
}

fn sample_file(name: &str) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        media_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.4 sample".to_vec(),
    }
}

fn choose_file(state: AppState, name: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::FileChosen(sample_file(name)))
}

fn parse_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendParseRequest { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("parse effect")
}

/// Selection plus a completed parse, used to reach the later phases.
fn parse_ok(state: AppState, fields: Vec<(&str, serde_json::Value)>) -> AppState {
    let (state, effects) = update(state, Msg::ParseRequested);
    let generation = parse_generation(&effects);
    let (state, _effects) = update(
        state,
        Msg::ParseCompleted {
            generation,
            result: Ok(intake_core::ParseOutcome {
                fields: fields
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect(),
                document_type: None,
            }),
        },
    );
    state
}

#[test]
fn choosing_a_file_selects_it_and_allocates_a_preview() {
    init_logging();
    let state = AppState::new();

    let (mut next, effects) = choose_file(state, "report.pdf");
    let view = next.view();

    assert!(effects.is_empty());
    assert_eq!(view.phase, Phase::FileSelected);
    assert_eq!(view.file_name.as_deref(), Some("report.pdf"));
    assert_eq!(view.preview, Some(1));
    assert!(next.consume_dirty());
}

#[test]
fn reselecting_releases_the_previous_preview() {
    init_logging();
    let (state, _effects) = choose_file(AppState::new(), "first.pdf");

    let (next, effects) = choose_file(state, "second.pdf");

    assert_eq!(effects, vec![Effect::ReleasePreview { preview: 1 }]);
    assert_eq!(next.view().preview, Some(2));
    assert_eq!(next.view().file_name.as_deref(), Some("second.pdf"));
}

#[test]
fn reselecting_clears_all_parse_derived_state() {
    init_logging();
    let (state, _effects) = choose_file(AppState::new(), "first.pdf");
    let state = parse_ok(state, vec![("total", serde_json::json!(42))]);
    let (state, _effects) = update(
        state,
        Msg::FieldEdited {
            key: "total".to_string(),
            value: "43".to_string(),
        },
    );
    assert_eq!(state.form_values().get("total").map(String::as_str), Some("43"));

    let (next, _effects) = choose_file(state, "second.pdf");

    assert_eq!(next.phase(), Phase::FileSelected);
    assert!(next.parsed_fields().is_none());
    assert!(next.form_values().is_empty());
    assert!(next.parsed_document_type().is_none());
}

#[test]
fn reselecting_resets_even_from_finalized() {
    init_logging();
    let (state, _effects) = choose_file(AppState::new(), "first.pdf");
    let state = parse_ok(state, vec![("name", serde_json::json!("acme"))]);
    let (state, effects) = update(state, Msg::FinalizeRequested);
    let generation = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendFinalizeRequest { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("finalize effect");
    let (state, _effects) = update(
        state,
        Msg::FinalizeCompleted {
            generation,
            result: Ok(()),
        },
    );
    assert_eq!(state.phase(), Phase::Finalized);

    let (next, _effects) = choose_file(state, "second.pdf");

    assert_eq!(next.phase(), Phase::FileSelected);
    assert!(next.parsed_fields().is_none());
    assert!(next.form_values().is_empty());
}

#[test]
fn document_type_choice_is_recorded() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.document_type(), DocumentType::Form941);

    let (state, effects) = update(state, Msg::DocumentTypeChosen(DocumentType::JobDetails));

    assert!(effects.is_empty());
    assert_eq!(state.document_type(), DocumentType::JobDetails);
}

#[test]
fn editing_a_field_reads_back_and_touches_no_other_key() {
    init_logging();
    let (state, _effects) = choose_file(AppState::new(), "report.pdf");
    let state = parse_ok(
        state,
        vec![
            ("alpha", serde_json::json!("a")),
            ("beta", serde_json::json!("b")),
        ],
    );

    let (state, effects) = update(
        state,
        Msg::FieldEdited {
            key: "alpha".to_string(),
            value: "edited".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.form_values().get("alpha").map(String::as_str), Some("edited"));
    assert_eq!(state.form_values().get("beta").map(String::as_str), Some("b"));
}

#[test]
fn editing_an_unknown_key_inserts_it() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::FieldEdited {
            key: "extra".to_string(),
            value: "v".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.form_values().get("extra").map(String::as_str), Some("v"));
}

#[test]
fn dismissing_hides_the_notification() {
    init_logging();
    // A refused parse opens a validation-error notification.
    let (state, _effects) = update(AppState::new(), Msg::ParseRequested);
    assert!(state.notification().is_some());

    let (state, effects) = update(state, Msg::NotificationDismissed);

    assert!(effects.is_empty());
    assert!(state.notification().is_none());
}

#[test]
fn noop_changes_nothing() {
    init_logging();
    let (mut state, _effects) = choose_file(AppState::new(), "report.pdf");
    assert!(state.consume_dirty());
    let before = state.view();

    let (mut next, effects) = update(state, Msg::NoOp);

    assert!(effects.is_empty());
    assert_eq!(next.view(), before);
    assert!(!next.consume_dirty());
}

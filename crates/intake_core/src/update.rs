use crate::notification::Notification;
use crate::{AppState, Effect, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(file) => {
            // Idempotent reset: any prior parse-derived state is cleared,
            // whatever phase we were in.
            match state.select_file(file) {
                Some(preview) => vec![Effect::ReleasePreview { preview }],
                None => Vec::new(),
            }
        }
        Msg::DocumentTypeChosen(document_type) => {
            state.set_document_type(document_type);
            Vec::new()
        }
        Msg::FieldEdited { key, value } => {
            // Unknown keys are accepted; callers may insert beyond the
            // parsed key set.
            state.set_form_value(key, value);
            Vec::new()
        }
        Msg::ParseRequested => {
            if state.phase().is_busy() {
                // In-flight guard: the guard lives here, not in whatever
                // rendering layer happens to disable a button.
                return (state, Vec::new());
            }
            let Some(file) = state.selected_file().cloned() else {
                state.show_notification(Notification::error(
                    "Cannot parse",
                    "No document selected.",
                ));
                return (state, Vec::new());
            };
            let document_type = state.document_type();
            let generation = state.begin_parse();
            vec![Effect::SendParseRequest {
                file,
                document_type,
                generation,
            }]
        }
        Msg::ParseCompleted { generation, result } => {
            if state.phase() != Phase::Parsing || generation != state.generation() {
                // Stale completion: the selection changed or a newer request
                // superseded this one while it was in flight. The phase check
                // alone cannot tell two outstanding requests apart, hence the
                // generation tag.
                return (state, Vec::new());
            }
            match result {
                Ok(outcome) => {
                    state.apply_parse_success(outcome.fields, outcome.document_type);
                    state.show_notification(Notification::success(
                        "Document parsed",
                        "Review the extracted fields, then finalize.",
                    ));
                }
                Err(failure) => {
                    state.apply_parse_failure();
                    state.show_notification(Notification::error(
                        "Parse failed",
                        failure.summary(),
                    ));
                }
            }
            Vec::new()
        }
        Msg::FinalizeRequested => {
            if state.phase().is_busy() {
                return (state, Vec::new());
            }
            if !state.has_parsed_fields() {
                state.show_notification(Notification::error(
                    "Cannot finalize",
                    "Nothing to finalize; parse a document first.",
                ));
                return (state, Vec::new());
            }
            let payload = state.finalize_payload();
            let generation = state.begin_finalize();
            vec![Effect::SendFinalizeRequest {
                payload,
                generation,
            }]
        }
        Msg::FinalizeCompleted { generation, result } => {
            if state.phase() != Phase::Finalizing || generation != state.generation() {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => {
                    // Fire-and-forget: the finalize response body is never
                    // merged back into the field values.
                    state.apply_finalize_success();
                    state.show_notification(Notification::success(
                        "Fields finalized",
                        "The reviewed values were committed.",
                    ));
                }
                Err(failure) => {
                    // Edited values survive so the user can retry.
                    state.apply_finalize_failure();
                    state.show_notification(Notification::error(
                        "Finalize failed",
                        failure.summary(),
                    ));
                }
            }
            Vec::new()
        }
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

//! Keyboard handling for the dashboard screen
//!
//! Keys mutate local UI state directly; anything that needs the backend comes
//! back as a `UserAction` for the app loop to dispatch.

use super::state::{CallStatus, DashboardState, Overlay};
use crate::forms::{CustomerForm, Mutation};
use crate::models::CallRequest;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Quit,
    Refresh,
    Call {
        customer_id: String,
        request: CallRequest,
    },
    /// Send a save or delete; `submission` comes back with its result.
    Mutate { submission: u64, mutation: Mutation },
}

pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> Option<UserAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UserAction::Quit);
    }

    match &mut state.overlay {
        Overlay::None => handle_table_key(state, key),
        Overlay::Form(form) => {
            if key.code == KeyCode::Esc {
                state.close_overlay();
                return None;
            }
            let mutation = handle_form_key(form, key)?;
            let submission = state.begin_submission()?;
            Some(UserAction::Mutate {
                submission,
                mutation,
            })
        }
        Overlay::ConfirmDelete(pending) => match key.code {
            // Already sent; wait for the result.
            KeyCode::Char('y') | KeyCode::Char('Y') if pending.submission.is_some() => None,
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let pending = pending.clone();
                // The selection may have moved if the customer vanished in a poll.
                let selected = state.selected_id.clone().unwrap_or_default();
                match pending.confirm(&selected) {
                    Ok(mutation) => {
                        let submission = state.begin_submission()?;
                        Some(UserAction::Mutate {
                            submission,
                            mutation,
                        })
                    }
                    Err(_) => {
                        state.close_overlay();
                        state.notice = Some(format!(
                            "{} is no longer selected; delete cancelled",
                            pending.customer_name
                        ));
                        None
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.close_overlay();
                None
            }
            _ => None,
        },
        Overlay::Call(panel) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q'))
                || panel.status != CallStatus::InProgress
            {
                state.close_overlay();
            }
            None
        }
    }
}

fn handle_table_key(state: &mut DashboardState, key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(UserAction::Quit),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(),
        KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
        KeyCode::Right | KeyCode::Char(']') => state.cycle_selected_agent(true),
        KeyCode::Left | KeyCode::Char('[') => state.cycle_selected_agent(false),
        KeyCode::Char('r') => return Some(UserAction::Refresh),
        KeyCode::Char('n') => state.open_add_form(),
        KeyCode::Char('e') => state.open_edit_form(),
        KeyCode::Char('d') => state.open_delete_confirm(),
        KeyCode::Char('c') | KeyCode::Enter => {
            let customer_id = state.selected_id.clone()?;
            let request = state.start_call(&customer_id)?;
            return Some(UserAction::Call {
                customer_id,
                request,
            });
        }
        _ => {}
    }
    state.notice = None;
    None
}

/// Edit the form; returns the mutation when Enter submits a valid form.
fn handle_form_key(form: &mut CustomerForm, key: KeyEvent) -> Option<Mutation> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left if form.focus.is_choice() => form.cycle_choice(false),
        KeyCode::Right | KeyCode::Char(' ') if form.focus.is_choice() => form.cycle_choice(true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter => {
            if form.is_submitting() {
                return None;
            }
            return match form.submit() {
                Ok(mutation) => {
                    form.error = None;
                    Some(mutation)
                }
                Err(e) => {
                    form.error = Some(e.to_string());
                    None
                }
            };
        }
        KeyCode::Char(c) => form.input_char(c),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MutationKind, StateUpdate};
    use crate::forms::FormField;
    use crate::ui::dashboard::state::tests::{loaded, state};

    fn press(state: &mut DashboardState, code: KeyCode) -> Option<UserAction> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut DashboardState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state();
        assert_eq!(press(&mut state, KeyCode::Char('q')), Some(UserAction::Quit));
        assert_eq!(
            handle_key(
                &mut state,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(UserAction::Quit)
        );
    }

    #[test]
    fn test_call_uses_selected_row() {
        let mut state = loaded(&["1", "2"]);
        press(&mut state, KeyCode::Down);
        let action = press(&mut state, KeyCode::Char('c'));
        let Some(UserAction::Call {
            customer_id,
            request,
        }) = action
        else {
            panic!("expected call action");
        };
        assert_eq!(customer_id, "2");
        assert_eq!(request.phone, "5551234567");
        assert!(matches!(state.overlay, Overlay::Call(_)));
    }

    #[test]
    fn test_call_without_rows_does_nothing() {
        let mut state = state();
        assert_eq!(press(&mut state, KeyCode::Enter), None);
        assert_eq!(state.overlay, Overlay::None);
    }

    #[test]
    fn test_invalid_form_shows_error_and_sends_nothing() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        type_text(&mut state, "Maria");
        assert_eq!(press(&mut state, KeyCode::Enter), None);
        let Overlay::Form(form) = &state.overlay else {
            panic!("form should be open");
        };
        assert_eq!(form.error.as_deref(), Some("Phone is required"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_valid_form_submits_once() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        type_text(&mut state, "Maria");
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "5551234567");
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "250");

        let action = press(&mut state, KeyCode::Enter);
        assert!(matches!(
            action,
            Some(UserAction::Mutate {
                submission: 1,
                mutation: Mutation::Create(_)
            })
        ));
        assert_eq!(press(&mut state, KeyCode::Enter), None);
    }

    #[test]
    fn test_form_choice_field_cycles_with_arrows() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        if let Overlay::Form(form) = &mut state.overlay {
            form.focus = FormField::Status;
        }
        press(&mut state, KeyCode::Right);
        let Overlay::Form(form) = &state.overlay else {
            panic!("form should be open");
        };
        assert_eq!(form.status.as_str(), "promised_to_pay");
    }

    #[test]
    fn test_escape_closes_form() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.overlay, Overlay::None);
    }

    #[test]
    fn test_delete_confirmation_for_selected_row() {
        let mut state = loaded(&["1", "2"]);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(
            press(&mut state, KeyCode::Char('y')),
            Some(UserAction::Mutate {
                submission: 1,
                mutation: Mutation::Delete { id: "1".into() }
            })
        );
    }

    #[test]
    fn test_delete_is_sent_once_while_waiting() {
        let mut state = loaded(&["1", "2"]);
        press(&mut state, KeyCode::Char('d'));
        assert!(press(&mut state, KeyCode::Char('y')).is_some());
        assert_eq!(press(&mut state, KeyCode::Char('y')), None);
        assert_eq!(press(&mut state, KeyCode::Char('Y')), None);
        assert!(matches!(state.overlay, Overlay::ConfirmDelete(_)));

        state.apply_update(StateUpdate::MutationApplied {
            kind: MutationKind::Deleted,
            submission: 1,
        });
        assert_eq!(state.overlay, Overlay::None);
    }

    /// Edit and save, dismiss the form before the result, then start typing a new customer.
    fn new_form_after_dismissed_save() -> (DashboardState, u64) {
        let mut state = loaded(&["1"]);
        press(&mut state, KeyCode::Char('e'));
        let Some(UserAction::Mutate { submission, .. }) = press(&mut state, KeyCode::Enter) else {
            panic!("edit should submit");
        };
        press(&mut state, KeyCode::Esc);
        press(&mut state, KeyCode::Char('n'));
        type_text(&mut state, "Half typed");
        (state, submission)
    }

    fn open_form(state: &DashboardState) -> &CustomerForm {
        let Overlay::Form(form) = &state.overlay else {
            panic!("new form should stay open");
        };
        form
    }

    #[test]
    fn test_late_save_success_leaves_new_form_alone() {
        let (mut state, submission) = new_form_after_dismissed_save();
        state.apply_update(StateUpdate::MutationApplied {
            kind: MutationKind::Updated,
            submission,
        });
        let form = open_form(&state);
        assert_eq!(form.name, "Half typed");
        assert_eq!(form.customer_id, None);
        assert_eq!(state.notice.as_deref(), Some("Customer updated"));
    }

    #[test]
    fn test_late_save_failure_leaves_new_form_alone() {
        let (mut state, submission) = new_form_after_dismissed_save();
        state.apply_update(StateUpdate::MutationFailed {
            message: "Phone already exists".into(),
            submission,
        });
        let form = open_form(&state);
        assert_eq!(form.name, "Half typed");
        assert_eq!(form.error, None);
        assert!(!form.is_submitting());
        assert_eq!(state.notice.as_deref(), Some("Phone already exists"));
    }

    #[test]
    fn test_delete_confirmation_rejected_after_selection_moves() {
        let mut state = loaded(&["1", "2"]);
        press(&mut state, KeyCode::Char('d'));
        state.selected_id = Some("2".to_string());
        assert_eq!(press(&mut state, KeyCode::Char('y')), None);
        assert_eq!(state.overlay, Overlay::None);
        assert!(state.notice.is_some());
    }

    #[test]
    fn test_agent_cycling_from_table() {
        let mut state = loaded(&["1"]);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.rows[0].agent_id.as_deref(), Some("b"));
        press(&mut state, KeyCode::Left);
        assert_eq!(state.rows[0].agent_id.as_deref(), Some("a"));
    }
}

use maud::{html, Markup};

use crate::widgets::form::{FieldKind, FieldSpec, Form, Submission};

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Password => "password",
        FieldKind::Tel => "tel",
        _ => "text",
    }
}

fn error_text(spec: &FieldSpec) -> String {
    match spec.kind {
        FieldKind::Checkbox => "This box must be checked".to_string(),
        FieldKind::Select(_) => format!("Please choose a {}", spec.label.to_lowercase()),
        _ => format!("Please enter a valid {}", spec.label.to_lowercase()),
    }
}

/// One labelled form control with its validation state.
pub(super) fn field(form: &Form, spec: &FieldSpec) -> Markup {
    let invalid = form.is_flagged(spec.id);
    let value = form.value(spec.id);
    html! {
        div.form-group.error[invalid] {
            @match spec.kind {
                FieldKind::Checkbox => {
                    label.checkbox-label {
                        input type="checkbox" id=(spec.id) name=(spec.id)
                            checked[form.is_checked(spec.id)] required[spec.required];
                        " " (spec.label)
                    }
                }
                FieldKind::TextArea { max_len } => {
                    (label(spec))
                    textarea id=(spec.id) name=(spec.id) rows="5" maxlength=(max_len)
                        required[spec.required] aria-invalid=(invalid) { (value) }
                }
                FieldKind::Select(options) => {
                    (label(spec))
                    select id=(spec.id) name=(spec.id) required[spec.required] aria-invalid=(invalid) {
                        option value="" { "Select..." }
                        @for (code, text) in options {
                            option value=(code) selected[*code == value] { (text) }
                        }
                    }
                }
                kind => {
                    (label(spec))
                    input type=(input_type(kind)) id=(spec.id) name=(spec.id) value=(value)
                        required[spec.required] aria-invalid=(invalid);
                }
            }
            @if invalid {
                span.error-message role="alert" { (error_text(spec)) }
            }
        }
    }
}

fn label(spec: &FieldSpec) -> Markup {
    html! {
        label for=(spec.id) {
            (spec.label)
            @if spec.required { span.required { " *" } }
        }
    }
}

/// Render the named fields in order; unknown ids are skipped.
pub(super) fn fields(form: &Form, ids: &[&str]) -> Markup {
    html! {
        @for id in ids {
            @if let Some(spec) = form.spec(id) {
                (field(form, spec))
            }
        }
    }
}

/// Status line under a form that goes through an async port.
pub(super) fn submission_status(submission: &Submission, pending: &str) -> Markup {
    html! {
        @match submission {
            Submission::Idle => {}
            Submission::Submitting => {
                div.form-status.pending role="status" { span.spinner {} " " (pending) }
            }
            Submission::Completed(message) => {
                div.form-status.success role="status" { (message) }
            }
            Submission::Failed(message) => {
                div.form-status.error role="alert" { (message) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Reducer;
    use crate::widgets::form::FormAction;

    const SPECS: &[FieldSpec] = &[
        FieldSpec::new("email", "Email Address", FieldKind::Email).required(),
        FieldSpec::new("topic", "Topic", FieldKind::Select(&[("a", "Alpha"), ("b", "Beta")])),
        FieldSpec::new("agree", "I agree", FieldKind::Checkbox).required(),
    ];

    #[test]
    fn test_flagged_field_shows_error() {
        let mut form = Form::new(SPECS);
        assert!(form.validate(&["email"]).is_err());
        let html = fields(&form, &["email"]).into_string();
        assert!(html.contains("form-group error"));
        assert!(html.contains("aria-invalid=\"true\""));
        assert!(html.contains("Please enter a valid email address"));
    }

    #[test]
    fn test_select_marks_current_value() {
        let form = Form::new(SPECS).reduce(FormAction::set("topic", "b"));
        let html = fields(&form, &["topic"]).into_string();
        assert!(html.contains("<option value=\"b\" selected>Beta</option>"));
        assert!(!html.contains("<option value=\"a\" selected>"));
    }

    #[test]
    fn test_checkbox_state() {
        let form = Form::new(SPECS).reduce(FormAction::Check("agree".into()));
        let html = fields(&form, &["agree", "missing"]).into_string();
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_submission_status() {
        assert!(submission_status(&Submission::Idle, "Sending...").into_string().is_empty());
        let html = submission_status(&Submission::Failed("Nope".into()), "Sending...").into_string();
        assert!(html.contains("role=\"alert\"") && html.contains("Nope"));
    }
}

//! Field definitions and required-field validation shared by every form.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::StateError;
use crate::state::Reducer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Tel,
    TextArea { max_len: usize },
    Select(&'static [(&'static str, &'static str)]),
    Checkbox,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Element id and the key values are stored under
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Extra format check applied to non-empty values
    pub check: Option<fn(&str) -> bool>,
}

impl FieldSpec {
    pub const fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            required: false,
            check: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn check(mut self, check: fn(&str) -> bool) -> Self {
        self.check = Some(check);
        self
    }

    fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return !self.required;
        }
        if self.kind == FieldKind::Email && !looks_like_email(value) {
            return false;
        }
        if let FieldKind::TextArea { max_len } = self.kind {
            if value.chars().count() > max_len {
                return false;
            }
        }
        self.check.map_or(true, |check| check(value))
    }
}

pub fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Lifecycle of a form sent through an async port.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    /// Confirmation text or reference from the port
    Completed(String),
    Failed(String),
}

impl Submission {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub(crate) fn finish(outcome: Result<String, String>, what: &str) -> Self {
        match outcome {
            Ok(done) => {
                tracing::info!("{} completed: {}", what, done);
                Self::Completed(done)
            }
            Err(message) => {
                tracing::warn!("{} failed: {}", what, message);
                Self::Failed(message)
            }
        }
    }
}

/// Values typed into a set of fields plus the fields currently flagged invalid.
#[derive(Debug, Clone)]
pub struct Form {
    specs: &'static [FieldSpec],
    values: BTreeMap<&'static str, String>,
    flagged: BTreeSet<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Set { field: String, value: String },
    /// Flip a checkbox
    Check(String),
    Reset,
}

impl FormAction {
    pub fn set(field: &str, value: impl Into<String>) -> Self {
        Self::Set {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

impl Form {
    pub fn new(specs: &'static [FieldSpec]) -> Self {
        Self {
            specs,
            values: BTreeMap::new(),
            flagged: BTreeSet::new(),
        }
    }

    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }

    pub fn spec(&self, id: &str) -> Option<&'static FieldSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn is_checked(&self, id: &str) -> bool {
        !self.value(id).is_empty()
    }

    pub fn is_flagged(&self, id: &str) -> bool {
        self.flagged.contains(id)
    }

    pub fn flagged(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flagged.iter().copied()
    }

    /// Validate the named fields: invalid ones get flagged, valid ones are
    /// unflagged. Fields outside `ids` keep whatever flag they had.
    pub fn validate(&mut self, ids: &[&str]) -> Result<(), StateError> {
        let specs = self.specs;
        let mut failed = Vec::new();
        for spec in specs.iter().filter(|s| ids.contains(&s.id)) {
            let value = self.values.get(spec.id).map(String::as_str).unwrap_or("");
            if spec.accepts(value) {
                self.flagged.remove(spec.id);
            } else {
                self.flagged.insert(spec.id);
                failed.push(spec.id);
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(StateError::Validation(failed))
        }
    }

    pub fn validate_all(&mut self) -> Result<(), StateError> {
        let ids: Vec<&str> = self.specs.iter().map(|s| s.id).collect();
        self.validate(&ids)
    }

    /// Store a value without going through the reducer (input formatting).
    pub(crate) fn put(&mut self, id: &'static str, value: String) {
        self.values.insert(id, value);
    }
}

impl Reducer for Form {
    type Action = FormAction;

    fn apply(&mut self, action: FormAction) -> Result<(), StateError> {
        match action {
            FormAction::Set { field, value } => {
                let spec = self
                    .spec(&field)
                    .ok_or_else(|| StateError::missing("field", &field))?;
                let value = match spec.kind {
                    FieldKind::TextArea { max_len } => value.chars().take(max_len).collect(),
                    FieldKind::Select(options) => {
                        if !value.is_empty() && !options.iter().any(|(v, _)| *v == value) {
                            return Err(StateError::missing("option", value));
                        }
                        value
                    }
                    _ => value,
                };
                self.values.insert(spec.id, value);
            }
            FormAction::Check(field) => {
                let spec = self
                    .spec(&field)
                    .ok_or_else(|| StateError::missing("field", &field))?;
                let next = if self.is_checked(spec.id) { "" } else { "on" };
                self.values.insert(spec.id, next.to_string());
            }
            FormAction::Reset => {
                self.values.clear();
                self.flagged.clear();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("phone", "Phone", FieldKind::Tel),
        FieldSpec::new("note", "Note", FieldKind::TextArea { max_len: 5 }),
        FieldSpec::new("color", "Color", FieldKind::Select(&[("red", "Red"), ("blue", "Blue")])),
        FieldSpec::new("agree", "Agree", FieldKind::Checkbox).required(),
    ];

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@@b.co"));
        assert!(!looks_like_email("plain"));
    }

    #[test]
    fn test_flags_exactly_the_invalid_fields() {
        let mut form = Form::new(SPECS);
        form.apply(FormAction::set("name", "Ada")).unwrap();
        form.apply(FormAction::set("email", "not-an-email")).unwrap();

        let err = form.validate_all().unwrap_err();
        assert_eq!(err, StateError::Validation(vec!["email", "agree"]));
        assert!(!form.is_flagged("name"));
        assert!(!form.is_flagged("phone"));
        assert!(form.is_flagged("email"));

        form.apply(FormAction::set("email", "ada@example.com")).unwrap();
        form.apply(FormAction::Check("agree".into())).unwrap();
        form.validate_all().unwrap();
        assert_eq!(form.flagged().count(), 0);
    }

    #[test]
    fn test_whitespace_is_empty() {
        let mut form = Form::new(SPECS);
        form.apply(FormAction::set("name", "   ")).unwrap();
        assert!(form.validate(&["name"]).is_err());
    }

    #[test]
    fn test_textarea_is_truncated() {
        let mut form = Form::new(SPECS);
        form.apply(FormAction::set("note", "abcdefgh")).unwrap();
        assert_eq!(form.value("note"), "abcde");
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let mut form = Form::new(SPECS);
        assert!(form.apply(FormAction::set("color", "green")).is_err());
        form.apply(FormAction::set("color", "blue")).unwrap();
        assert_eq!(form.value("color"), "blue");
    }

    #[test]
    fn test_unknown_field_is_missing() {
        let mut form = Form::new(SPECS);
        assert!(form.apply(FormAction::set("nope", "x")).is_err());
        assert!(form.apply(FormAction::Check("nope".into())).is_err());
    }

    #[test]
    fn test_reset_clears_flags() {
        let mut form = Form::new(SPECS);
        let _ = form.validate_all();
        form.apply(FormAction::Reset).unwrap();
        assert_eq!(form.flagged().count(), 0);
        assert_eq!(form.value("name"), "");
    }
}

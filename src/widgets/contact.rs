//! Contact, newsletter and login forms.
//!
//! Each one validates its required fields, then hands a [`Message`] to the
//! [`MessageGateway`] and records the outcome as a [`Submission`].

use crate::error::StateError;
use crate::gateway::{Message, MessageGateway};
use crate::state::{Reducer, Toggle};
use crate::widgets::form::{FieldKind, FieldSpec, Form, FormAction, Submission};

pub const MESSAGE_MAX: usize = 500;
/// The character counter turns red above this
pub const MESSAGE_WARN: usize = 450;

pub const SUBJECTS: &[(&str, &str)] = &[
    ("general", "General Inquiry"),
    ("support", "Technical Support"),
    ("sales", "Sales Question"),
    ("partnership", "Partnership"),
    ("other", "Other"),
];

pub const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("contact-name", "Name", FieldKind::Text).required(),
    FieldSpec::new("contact-email", "Email", FieldKind::Email).required(),
    FieldSpec::new("contact-subject", "Subject", FieldKind::Select(SUBJECTS)).required(),
    FieldSpec::new(
        "contact-message",
        "Message",
        FieldKind::TextArea {
            max_len: MESSAGE_MAX,
        },
    )
    .required(),
    FieldSpec::new(
        "contact-consent",
        "I agree to the privacy policy and terms of service",
        FieldKind::Checkbox,
    )
    .required(),
];

pub const NEWSLETTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("newsletter-email", "Email Address", FieldKind::Email).required(),
    FieldSpec::new("newsletter-name", "Name (Optional)", FieldKind::Text),
    FieldSpec::new(
        "newsletter-consent",
        "I agree to receive marketing emails",
        FieldKind::Checkbox,
    )
    .required(),
];

pub const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("login-email", "Email Address", FieldKind::Email).required(),
    FieldSpec::new("login-password", "Password", FieldKind::Password).required(),
    FieldSpec::new("remember-me", "Remember me", FieldKind::Checkbox),
    FieldSpec::new("reset-email", "Email Address", FieldKind::Email).required(),
];

/// Shared by every form here: refuse double submits, validate, go pending.
fn begin(form: &mut Form, submission: &mut Submission, fields: &[&str]) -> Result<(), StateError> {
    if submission.is_pending() {
        return Err(StateError::Busy);
    }
    form.validate(fields)?;
    *submission = Submission::Submitting;
    Ok(())
}

async fn deliver(gateway: &dyn MessageGateway, message: Message) -> Result<String, String> {
    gateway.send(message).await.map(|()| String::new()).map_err(|e| e.to_string())
}

// Contact

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmitAction {
    Input(FormAction),
    /// The port answered
    Finished(Result<String, String>),
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    form: Form,
    submission: Submission,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            form: Form::new(CONTACT_FIELDS),
            submission: Submission::Idle,
        }
    }
}

impl ContactForm {
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn char_count(&self) -> usize {
        self.form.value("contact-message").chars().count()
    }

    pub fn near_limit(&self) -> bool {
        self.char_count() > MESSAGE_WARN
    }

    pub fn begin_submit(&mut self) -> Result<Message, StateError> {
        let ids: Vec<&str> = CONTACT_FIELDS.iter().map(|f| f.id).collect();
        begin(&mut self.form, &mut self.submission, &ids)?;
        let f = &self.form;
        Ok(Message::Contact {
            name: f.value("contact-name").trim().to_string(),
            email: f.value("contact-email").trim().to_string(),
            subject: f.value("contact-subject").to_string(),
            body: f.value("contact-message").to_string(),
        })
    }

    pub async fn submit(&mut self, gateway: &dyn MessageGateway) -> Result<(), StateError> {
        let message = self.begin_submit()?;
        let outcome = deliver(gateway, message).await;
        self.apply(FormSubmitAction::Finished(outcome))
    }
}

impl Reducer for ContactForm {
    type Action = FormSubmitAction;

    fn apply(&mut self, action: FormSubmitAction) -> Result<(), StateError> {
        match action {
            FormSubmitAction::Input(a) => self.form.apply(a),
            FormSubmitAction::Finished(outcome) => {
                let ok = outcome.is_ok();
                self.submission = Submission::finish(
                    outcome.map(|_| "Message sent successfully! We'll get back to you soon.".into()),
                    "Contact message",
                );
                if ok {
                    self.form.apply(FormAction::Reset)?;
                }
                Ok(())
            }
        }
    }
}

// Newsletter

#[derive(Debug, Clone)]
pub struct NewsletterSignup {
    form: Form,
    submission: Submission,
}

impl Default for NewsletterSignup {
    fn default() -> Self {
        Self {
            form: Form::new(NEWSLETTER_FIELDS),
            submission: Submission::Idle,
        }
    }
}

impl NewsletterSignup {
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn begin_submit(&mut self) -> Result<Message, StateError> {
        begin(
            &mut self.form,
            &mut self.submission,
            &["newsletter-email", "newsletter-name", "newsletter-consent"],
        )?;
        let name = self.form.value("newsletter-name").trim();
        Ok(Message::Newsletter {
            email: self.form.value("newsletter-email").trim().to_string(),
            name: (!name.is_empty()).then(|| name.to_string()),
        })
    }

    pub async fn submit(&mut self, gateway: &dyn MessageGateway) -> Result<(), StateError> {
        let message = self.begin_submit()?;
        let outcome = deliver(gateway, message).await;
        self.apply(FormSubmitAction::Finished(outcome))
    }
}

impl Reducer for NewsletterSignup {
    type Action = FormSubmitAction;

    fn apply(&mut self, action: FormSubmitAction) -> Result<(), StateError> {
        match action {
            FormSubmitAction::Input(a) => self.form.apply(a),
            FormSubmitAction::Finished(outcome) => {
                let ok = outcome.is_ok();
                self.submission = Submission::finish(
                    outcome.map(|_| "Thank you for subscribing! Check your email for confirmation.".into()),
                    "Newsletter signup",
                );
                if ok {
                    self.form.apply(FormAction::Reset)?;
                }
                Ok(())
            }
        }
    }
}

// Login

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginView {
    #[default]
    SignIn,
    ForgotPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    Input(FormAction),
    TogglePassword,
    ShowForgot,
    ShowSignIn,
    SignIn,
    /// The reset-link request answered
    ResetFinished(Result<String, String>),
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    form: Form,
    view: LoginView,
    password_visible: Toggle,
    submission: Submission,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            form: Form::new(LOGIN_FIELDS),
            view: LoginView::SignIn,
            password_visible: Toggle::default(),
            submission: Submission::Idle,
        }
    }
}

impl LoginForm {
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn view(&self) -> LoginView {
        self.view
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible.is_on()
    }

    /// `type` attribute of the password input.
    pub fn password_input_type(&self) -> &'static str {
        if self.password_visible() {
            "text"
        } else {
            "password"
        }
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn begin_reset(&mut self) -> Result<Message, StateError> {
        if self.view != LoginView::ForgotPassword {
            return Err(StateError::missing("view", "forgot-password"));
        }
        begin(&mut self.form, &mut self.submission, &["reset-email"])?;
        Ok(Message::PasswordReset {
            email: self.form.value("reset-email").trim().to_string(),
        })
    }

    pub async fn request_reset(&mut self, gateway: &dyn MessageGateway) -> Result<(), StateError> {
        let message = self.begin_reset()?;
        let outcome = deliver(gateway, message).await;
        self.apply(LoginAction::ResetFinished(outcome))
    }
}

impl Reducer for LoginForm {
    type Action = LoginAction;

    fn apply(&mut self, action: LoginAction) -> Result<(), StateError> {
        match action {
            LoginAction::Input(a) => self.form.apply(a)?,
            LoginAction::TogglePassword => {
                self.password_visible.flip();
            }
            LoginAction::ShowForgot => self.view = LoginView::ForgotPassword,
            LoginAction::ShowSignIn => self.view = LoginView::SignIn,
            LoginAction::SignIn => {
                self.form.validate(&["login-email", "login-password"])?;
                tracing::info!("Signed in as {}", self.form.value("login-email"));
                self.submission = Submission::Completed("Login successful! Welcome back.".into());
            }
            LoginAction::ResetFinished(outcome) => {
                let ok = outcome.is_ok();
                self.submission = Submission::finish(
                    outcome.map(|_| "Password reset link sent! Check your email.".into()),
                    "Password reset",
                );
                if ok {
                    self.view = LoginView::SignIn;
                }
            }
        }
        Ok(())
    }
}

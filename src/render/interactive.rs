use maud::{html, Markup};

use super::fields::{field, fields, submission_status};
use super::Site;
use crate::widgets::chat::{AGENT_NAME, MAX_INPUT, QUICK_MESSAGES};
use crate::widgets::contact::{LoginView, MESSAGE_MAX};
use crate::widgets::preferences::{
    AccessibilityFlag, CookieCategory, Language, Scheme, ThemePreference, TEXT_SIZE_MAX,
    TEXT_SIZE_MIN,
};
use crate::widgets::toast::ToastKind;

pub(super) fn chat(site: &Site) -> Markup {
    let chat = &site.chat;
    let open = chat.window().is_open();
    html! {
        div.live-chat #live-chat {
            button.chat-toggle type="button" aria-label="Open chat"
                aria-controls="chat-window" aria-expanded=(chat.window().aria_expanded())
            {
                @if open { "✕" } @else { "💬" }
            }
            div.chat-window.open[open] #chat-window role="dialog" aria-label="Live chat" hidden[!open] {
                div.chat-header {
                    span.agent-name { (AGENT_NAME) }
                    span.agent-status { "● Online" }
                }
                div.chat-messages #chat-messages aria-live="polite" {
                    @for message in chat.log() {
                        div class=(format!("message {}", message.sender.class())) {
                            span.message-avatar aria-hidden="true" { (message.sender.avatar()) }
                            div.message-bubble { (message.text) }
                        }
                    }
                    @if chat.is_typing() {
                        div.typing-indicator aria-label=(format!("{} is typing", AGENT_NAME)) {
                            span {} span {} span {}
                        }
                    }
                }
                div.quick-messages {
                    @for (i, (label, _)) in QUICK_MESSAGES.iter().enumerate() {
                        button.quick-message type="button" data-index=(i) { (label) }
                    }
                }
                div.chat-input-row {
                    input #chat-input type="text" maxlength=(MAX_INPUT)
                        placeholder="Type your message..." aria-label="Message" value=(chat.input());
                    button #chat-send type="button" disabled[chat.input().trim().is_empty()] { "Send" }
                }
            }
        }
    }
}

pub(super) fn toasts(site: &Site) -> Markup {
    let queue = &site.toasts;
    html! {
        div.toast-demo {
            @for kind in ToastKind::ALL {
                button.btn.toast-trigger type="button" data-kind=(kind.as_str()) {
                    (kind.icon()) " " (kind.as_str())
                }
            }
        }
        div #toast-container
            class=(format!("toast-container {}", queue.position().as_str()))
            data-auto-dismiss=(queue.auto_dismiss())
            data-dismiss-ms=(queue.dismiss_after().as_millis())
        {
            @for toast in queue.stacked() {
                div id=(format!("toast-{}", toast.id))
                    class=(format!("toast toast-{}", toast.kind.as_str()))
                    role=(if toast.kind == ToastKind::Error { "alert" } else { "status" })
                {
                    span.toast-icon aria-hidden="true" { (toast.kind.icon()) }
                    div.toast-body {
                        strong.toast-title { (toast.title) }
                        p.toast-message { (toast.message) }
                    }
                    button.toast-close type="button" data-dismiss=(toast.id) aria-label="Dismiss" { "×" }
                    @if let Some(left) = toast.remaining {
                        div.toast-progress data-remaining-ms=(left.as_millis()) {}
                    }
                }
            }
        }
    }
}

pub(super) fn contact(site: &Site) -> Markup {
    let contact = &site.contact;
    let form = contact.form();
    let pending = contact.submission().is_pending();
    html! {
        form.contact-form #contact-form novalidate {
            h2 { "Get in Touch" }
            (fields(form, &["contact-name", "contact-email", "contact-subject", "contact-message"]))
            div.char-counter.warning[contact.near_limit()] aria-live="polite" {
                (contact.char_count()) "/" (MESSAGE_MAX)
            }
            (fields(form, &["contact-consent"]))
            button.btn.btn-primary type="submit" disabled[pending] {
                @if pending { "Sending..." } @else { "Send Message" }
            }
            (submission_status(contact.submission(), "Sending your message..."))
        }
    }
}

pub(super) fn newsletter(site: &Site) -> Markup {
    let signup = &site.newsletter;
    let pending = signup.submission().is_pending();
    html! {
        form.newsletter-form #newsletter-form novalidate {
            h3 { "Stay in the Loop" }
            p { "Get product news and tutorials in your inbox." }
            (fields(signup.form(), &["newsletter-email", "newsletter-name", "newsletter-consent"]))
            button.btn.btn-primary type="submit" disabled[pending] {
                @if pending { "Subscribing..." } @else { "Subscribe" }
            }
            (submission_status(signup.submission(), "Subscribing..."))
        }
    }
}

pub(super) fn login(site: &Site) -> Markup {
    let login = &site.login;
    let form = login.form();
    html! {
        div.login-container #login {
            @match login.view() {
                LoginView::SignIn => {
                    form.login-form #login-form novalidate {
                        h2 { "Sign In" }
                        (fields(form, &["login-email"]))
                        div.form-group.error[form.is_flagged("login-password")] {
                            label for="login-password" { "Password" span.required { " *" } }
                            div.password-wrapper {
                                input #login-password type=(login.password_input_type()) name="login-password"
                                    value=(form.value("login-password")) required
                                    aria-invalid=(form.is_flagged("login-password"));
                                button.password-toggle type="button"
                                    aria-label=(if login.password_visible() { "Hide password" } else { "Show password" })
                                    aria-pressed=(login.password_visible())
                                {
                                    @if login.password_visible() { "🙈" } @else { "👁️" }
                                }
                            }
                            @if form.is_flagged("login-password") {
                                span.error-message role="alert" { "Please enter your password" }
                            }
                        }
                        (fields(form, &["remember-me"]))
                        button.btn.btn-primary type="submit" { "Sign In" }
                        button.link-button #show-forgot type="button" { "Forgot password?" }
                    }
                }
                LoginView::ForgotPassword => {
                    form.forgot-form #forgot-form novalidate {
                        h2 { "Reset Password" }
                        p { "Enter your email and we'll send you a reset link." }
                        @if let Some(spec) = form.spec("reset-email") {
                            (field(form, spec))
                        }
                        button.btn.btn-primary type="submit" disabled[login.submission().is_pending()] {
                            "Send Reset Link"
                        }
                        button.link-button #show-signin type="button" { "Back to sign in" }
                    }
                }
            }
            (submission_status(login.submission(), "Sending reset link..."))
        }
    }
}

pub(super) fn accessibility(site: &Site) -> Markup {
    let widget = &site.accessibility;
    let settings = widget.settings();
    html! {
        div.accessibility-widget #accessibility-widget {
            button.a11y-toggle type="button" aria-label="Accessibility options"
                aria-controls="a11y-panel" aria-expanded=(widget.panel().aria_expanded())
            {
                "♿"
            }
            div.a11y-panel #a11y-panel role="dialog" aria-label="Accessibility options" hidden[!widget.panel().is_open()] {
                div.text-size-controls {
                    button type="button" data-action="decrease-text" aria-label="Decrease text size"
                        disabled[settings.text_size <= TEXT_SIZE_MIN] { "A−" }
                    span #text-size-value { (settings.text_size) "%" }
                    button type="button" data-action="increase-text" aria-label="Increase text size"
                        disabled[settings.text_size >= TEXT_SIZE_MAX] { "A+" }
                }
                @for flag in AccessibilityFlag::ALL {
                    label.a11y-option {
                        input type="checkbox" data-flag=(flag.body_class()) checked[settings.get(flag)];
                        " " (flag.label())
                    }
                }
                div.a11y-actions {
                    button.btn #a11y-reset type="button" { "Reset" }
                    button.btn.btn-primary #a11y-save type="button" { "Save Settings" }
                }
            }
            div.sr-only #a11y-announcer aria-live="polite" aria-atomic="true" {
                @if let Some(text) = widget.announcement() { (text) }
            }
        }
    }
}

pub(super) fn cookie_consent(site: &Site) -> Markup {
    let consent = &site.cookies;
    let prefs = consent.prefs();
    html! {
        div.cookie-consent #cookie-consent data-consent-given=(consent.consent_given()) {
            @if consent.show_banner() {
                div.cookie-banner #cookie-banner role="dialog" aria-label="Cookie consent" {
                    p { "We use cookies to improve your experience. Choose which categories you allow." }
                    div.cookie-actions {
                        button.btn.btn-primary #accept-all type="button" { "Accept All" }
                        button.btn #reject-all type="button" { "Reject All" }
                        button.btn #cookie-settings-btn type="button"
                            aria-controls="cookie-settings" aria-expanded=(consent.settings().aria_expanded())
                        {
                            "Customize"
                        }
                    }
                }
            }
            div.cookie-settings #cookie-settings role="dialog" aria-label="Cookie settings"
                hidden[!consent.settings().is_open()]
            {
                label.cookie-category {
                    input type="checkbox" id="cookie-essential" checked disabled;
                    " Essential (always on)"
                }
                @for category in CookieCategory::ALL {
                    label.cookie-category {
                        input type="checkbox" id=(format!("cookie-{}", category.id())) checked[prefs.get(category)];
                        " " (category.label())
                    }
                }
                button.btn.btn-primary #save-cookies type="button" { "Save Preferences" }
            }
            @if let Some(notice) = consent.notice() {
                div.cookie-notice role="status" { (notice) }
            }
        }
    }
}

pub(super) fn dark_mode(site: &Site) -> Markup {
    let toggle = &site.dark_mode;
    let current = toggle.preference();
    html! {
        div.theme-switcher #dark-mode-toggle data-scheme=(toggle.scheme().body_class()) {
            div.theme-options role="radiogroup" aria-label="Colour scheme" {
                @for pref in ThemePreference::ALL {
                    button.theme-option.active[pref == current] type="button"
                        data-theme=(pref.value()) role="radio" aria-checked=(pref == current)
                    {
                        (pref.label())
                    }
                }
            }
            button.quick-toggle #quick-toggle type="button" aria-label="Toggle dark mode" {
                @if toggle.scheme() == Scheme::Dark { "☀️" } @else { "🌙" }
            }
            p.theme-status #theme-status aria-live="polite" { (toggle.status()) }
        }
    }
}

pub(super) fn language(site: &Site) -> Markup {
    let selector = &site.language;
    let selected = selector.selected();
    html! {
        div.language-selector #language-selector {
            button.language-current type="button" aria-haspopup="listbox"
                aria-controls="language-list" aria-expanded=(selector.dropdown().aria_expanded())
            {
                span.flag { (selected.flag()) }
                " "
                span.language-name { (selected.native_name()) }
            }
            ul.language-dropdown #language-list role="listbox" hidden[!selector.dropdown().is_open()] {
                @for lang in Language::ALL {
                    li.language-option.selected[lang == selected] role="option"
                        aria-selected=(lang == selected) data-lang=(lang.code())
                    {
                        span.flag { (lang.flag()) }
                        " " (lang.native_name())
                        span.language-english { " (" (lang.name()) ")" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use crate::state::toggle::DisclosureAction;
    use crate::state::Reducer;
    use crate::store::MemoryStore;
    use crate::widgets::chat::ChatAction;
    use crate::widgets::contact::{FormSubmitAction, LoginAction};
    use crate::widgets::form::FormAction;
    use crate::widgets::preferences::{AccessibilityAction, CookieAction, ThemeAction};
    use crate::widgets::toast::ToastAction;

    fn site() -> Site {
        Site::new(RenderOptions::default(), &MemoryStore::new(), false)
    }

    #[test]
    fn test_chat_log_and_typing() {
        let mut site = site();
        let html = chat(&site).into_string();
        assert!(html.contains("message bot"));
        assert!(html.contains("id=\"chat-send\" type=\"button\" disabled"));

        site.chat.apply(ChatAction::Input("  hello  ".into())).unwrap();
        assert_eq!(site.chat.take_outgoing().as_deref(), Some("hello"));
        let html = chat(&site).into_string();
        assert!(html.contains("message user"));
        assert!(html.contains("typing-indicator"));
    }

    #[test]
    fn test_chat_closed_window_is_hidden() {
        let mut site = site();
        site.chat
            .apply(ChatAction::Window(DisclosureAction::Close))
            .unwrap();
        let html = chat(&site).into_string();
        assert!(html.contains("aria-expanded=\"false\""));
        assert!(html.contains(" hidden"));
    }

    #[test]
    fn test_toasts_render_in_queue() {
        let mut site = site();
        site.toasts
            .apply(ToastAction::show(ToastKind::Error, "Oops", "Broken"))
            .unwrap();
        site.toasts
            .apply(ToastAction::show(ToastKind::Loading, "Wait", "Working"))
            .unwrap();
        let html = toasts(&site).into_string();
        assert!(html.contains("toast toast-error"));
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("toast-container top-right"));
        // Loading toasts never expire, so only one progress bar
        assert_eq!(html.matches("toast-progress").count(), 1);
    }

    #[test]
    fn test_contact_counter_warns() {
        let mut site = site();
        site.contact
            .apply(FormSubmitAction::Input(FormAction::set(
                "contact-message",
                "x".repeat(460),
            )))
            .unwrap();
        let html = contact(&site).into_string();
        assert!(html.contains("char-counter warning"));
        assert!(html.contains("460/500"));
    }

    #[test]
    fn test_newsletter_fields() {
        let html = newsletter(&site()).into_string();
        assert!(html.contains("id=\"newsletter-email\""));
        assert!(html.contains("id=\"newsletter-consent\""));
    }

    #[test]
    fn test_login_password_toggle_and_views() {
        let mut site = site();
        assert!(login(&site).into_string().contains("type=\"password\""));

        site.login.apply(LoginAction::TogglePassword).unwrap();
        let html = login(&site).into_string();
        assert!(html.contains("id=\"login-password\" type=\"text\""));

        site.login.apply(LoginAction::ShowForgot).unwrap();
        let html = login(&site).into_string();
        assert!(html.contains("id=\"reset-email\""));
        assert!(!html.contains("id=\"login-password\""));
    }

    #[test]
    fn test_accessibility_controls() {
        let mut site = site();
        site.accessibility
            .apply(AccessibilityAction::Toggle(AccessibilityFlag::HighContrast))
            .unwrap();
        let html = accessibility(&site).into_string();
        assert!(html.contains("data-flag=\"high-contrast\" checked"));
        assert!(html.contains("High contrast mode enabled"));
        assert!(html.contains(" hidden"));
    }

    #[test]
    fn test_cookie_banner_until_choice() {
        let mut site = site();
        assert!(cookie_consent(&site).into_string().contains("id=\"cookie-banner\""));

        site.cookies.apply(CookieAction::AcceptAll).unwrap();
        let html = cookie_consent(&site).into_string();
        assert!(!html.contains("id=\"cookie-banner\""));
        assert!(html.contains("All cookies accepted"));
        assert!(html.contains("id=\"cookie-analytics\" checked"));
    }

    #[test]
    fn test_dark_mode_status() {
        let mut site = site();
        let html = dark_mode(&site).into_string();
        assert!(html.contains("Current theme: Auto (Light)"));

        site.dark_mode
            .apply(ThemeAction::Choose(ThemePreference::Dark))
            .unwrap();
        let html = dark_mode(&site).into_string();
        assert!(html.contains("data-scheme=\"dark-mode\""));
        assert_eq!(html.matches("aria-checked=\"true\"").count(), 1);
    }

    #[test]
    fn test_language_list() {
        let html = language(&site()).into_string();
        assert_eq!(html.matches("role=\"option\"").count(), Language::ALL.len());
        assert_eq!(html.matches("aria-selected=\"true\"").count(), 1);
    }
}

//! Visitor preferences that survive between visits: accessibility options,
//! cookie consent, colour scheme and language.
//!
//! Reducers only change the in-memory value. Writing to the
//! [`PreferenceStore`] happens on an explicit save, never as a side effect of
//! `apply`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StateError, StoreError};
use crate::state::toggle::DisclosureAction;
use crate::state::{Disclosure, Reducer};
use crate::store::{PreferenceStore, PreferenceStoreExt};

/// A flag set stored under a fixed key.
pub trait Preference: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;

    fn load_from(store: &dyn PreferenceStore) -> Self {
        store.load_or_default(Self::KEY)
    }

    fn save_to(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        store.save(Self::KEY, self)
    }
}

impl Preference for super::catalog::Wishlist {
    const KEY: &'static str = "wishlist";
}

// Accessibility

pub const TEXT_SIZE_DEFAULT: u32 = 100;
pub const TEXT_SIZE_MIN: u32 = 80;
pub const TEXT_SIZE_MAX: u32 = 150;
pub const TEXT_SIZE_STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    /// Percent of the base font size
    pub text_size: u32,
    pub high_contrast: bool,
    pub dyslexia_font: bool,
    pub keyboard_nav: bool,
    pub focus_indicators: bool,
    pub screen_reader: bool,
    pub reduce_motion: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            text_size: TEXT_SIZE_DEFAULT,
            high_contrast: false,
            dyslexia_font: false,
            keyboard_nav: true,
            focus_indicators: false,
            screen_reader: true,
            reduce_motion: false,
        }
    }
}

impl Preference for AccessibilitySettings {
    const KEY: &'static str = "accessibility";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityFlag {
    HighContrast,
    DyslexiaFont,
    KeyboardNav,
    FocusIndicators,
    ScreenReader,
    ReduceMotion,
}

impl AccessibilityFlag {
    pub const ALL: [AccessibilityFlag; 6] = [
        Self::HighContrast,
        Self::DyslexiaFont,
        Self::KeyboardNav,
        Self::FocusIndicators,
        Self::ScreenReader,
        Self::ReduceMotion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::HighContrast => "High Contrast",
            Self::DyslexiaFont => "Dyslexia-Friendly Font",
            Self::KeyboardNav => "Keyboard Navigation",
            Self::FocusIndicators => "Focus Indicators",
            Self::ScreenReader => "Screen Reader Mode",
            Self::ReduceMotion => "Reduce Motion",
        }
    }

    /// Class added to the page body while the flag is on.
    pub fn body_class(self) -> &'static str {
        match self {
            Self::HighContrast => "high-contrast",
            Self::DyslexiaFont => "dyslexia-font",
            Self::KeyboardNav => "enhanced-keyboard-nav",
            Self::FocusIndicators => "enhanced-focus",
            Self::ScreenReader => "screen-reader-optimized",
            Self::ReduceMotion => "reduce-motion",
        }
    }

    fn announcement(self, on: bool) -> &'static str {
        match (self, on) {
            (Self::HighContrast, true) => "High contrast mode enabled",
            (Self::HighContrast, false) => "High contrast mode disabled",
            (Self::DyslexiaFont, true) => "Dyslexia-friendly font enabled",
            (Self::DyslexiaFont, false) => "Dyslexia-friendly font disabled",
            (Self::KeyboardNav, true) => "Enhanced keyboard navigation enabled",
            (Self::KeyboardNav, false) => "Enhanced keyboard navigation disabled",
            (Self::FocusIndicators, true) => "Enhanced focus indicators enabled",
            (Self::FocusIndicators, false) => "Enhanced focus indicators disabled",
            (Self::ScreenReader, true) => "Screen reader optimization enabled",
            (Self::ScreenReader, false) => "Screen reader optimization disabled",
            (Self::ReduceMotion, true) => "Motion effects reduced",
            (Self::ReduceMotion, false) => "Motion effects restored",
        }
    }
}

impl AccessibilitySettings {
    pub fn get(&self, flag: AccessibilityFlag) -> bool {
        match flag {
            AccessibilityFlag::HighContrast => self.high_contrast,
            AccessibilityFlag::DyslexiaFont => self.dyslexia_font,
            AccessibilityFlag::KeyboardNav => self.keyboard_nav,
            AccessibilityFlag::FocusIndicators => self.focus_indicators,
            AccessibilityFlag::ScreenReader => self.screen_reader,
            AccessibilityFlag::ReduceMotion => self.reduce_motion,
        }
    }

    fn slot(&mut self, flag: AccessibilityFlag) -> &mut bool {
        match flag {
            AccessibilityFlag::HighContrast => &mut self.high_contrast,
            AccessibilityFlag::DyslexiaFont => &mut self.dyslexia_font,
            AccessibilityFlag::KeyboardNav => &mut self.keyboard_nav,
            AccessibilityFlag::FocusIndicators => &mut self.focus_indicators,
            AccessibilityFlag::ScreenReader => &mut self.screen_reader,
            AccessibilityFlag::ReduceMotion => &mut self.reduce_motion,
        }
    }

    pub fn body_classes(&self) -> Vec<&'static str> {
        AccessibilityFlag::ALL
            .into_iter()
            .filter(|f| self.get(*f))
            .map(AccessibilityFlag::body_class)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityAction {
    Panel(DisclosureAction),
    IncreaseText,
    DecreaseText,
    Toggle(AccessibilityFlag),
    Reset,
}

/// The floating accessibility panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessibilityWidget {
    settings: AccessibilitySettings,
    panel: Disclosure,
    /// Last message for the polite live region
    announcement: Option<String>,
}

impl AccessibilityWidget {
    pub fn new(settings: AccessibilitySettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self::new(AccessibilitySettings::load_from(store))
    }

    pub fn settings(&self) -> &AccessibilitySettings {
        &self.settings
    }

    pub fn panel(&self) -> &Disclosure {
        &self.panel
    }

    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_deref()
    }

    pub fn save(&mut self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        self.settings.save_to(store)?;
        self.announcement = Some("Accessibility settings saved".into());
        Ok(())
    }
}

impl Reducer for AccessibilityWidget {
    type Action = AccessibilityAction;

    fn apply(&mut self, action: AccessibilityAction) -> Result<(), StateError> {
        let message = match action {
            AccessibilityAction::Panel(a) => return self.panel.apply(a),
            AccessibilityAction::IncreaseText => {
                if self.settings.text_size < TEXT_SIZE_MAX {
                    self.settings.text_size += TEXT_SIZE_STEP;
                }
                format!("Text size adjusted to {}%", self.settings.text_size)
            }
            AccessibilityAction::DecreaseText => {
                if self.settings.text_size > TEXT_SIZE_MIN {
                    self.settings.text_size -= TEXT_SIZE_STEP;
                }
                format!("Text size adjusted to {}%", self.settings.text_size)
            }
            AccessibilityAction::Toggle(flag) => {
                let slot = self.settings.slot(flag);
                *slot = !*slot;
                flag.announcement(*slot).to_string()
            }
            AccessibilityAction::Reset => {
                self.settings = AccessibilitySettings::default();
                "All accessibility settings have been reset to defaults".to_string()
            }
        };
        tracing::debug!("Accessibility: {}", message);
        self.announcement = Some(message);
        Ok(())
    }
}

// Cookie consent

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookiePreferences {
    pub essential: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub functional: bool,
}

impl Default for CookiePreferences {
    fn default() -> Self {
        Self {
            essential: true,
            analytics: false,
            marketing: false,
            functional: false,
        }
    }
}

impl Preference for CookiePreferences {
    const KEY: &'static str = "cookie-preferences";
}

pub const CONSENT_GIVEN_KEY: &str = "cookie-consent-given";

/// Optional categories; essential cookies cannot be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieCategory {
    Analytics,
    Marketing,
    Functional,
}

impl CookieCategory {
    pub const ALL: [CookieCategory; 3] = [Self::Analytics, Self::Marketing, Self::Functional];

    pub fn id(self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::Marketing => "marketing",
            Self::Functional => "functional",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Analytics => "Analytics Cookies",
            Self::Marketing => "Marketing Cookies",
            Self::Functional => "Functional Cookies",
        }
    }
}

impl CookiePreferences {
    pub fn get(&self, category: CookieCategory) -> bool {
        match category {
            CookieCategory::Analytics => self.analytics,
            CookieCategory::Marketing => self.marketing,
            CookieCategory::Functional => self.functional,
        }
    }

    fn set_all(&mut self, on: bool) {
        self.essential = true;
        self.analytics = on;
        self.marketing = on;
        self.functional = on;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieAction {
    AcceptAll,
    RejectAll,
    Toggle(CookieCategory),
    OpenSettings,
    CloseSettings,
    Save,
    Reset,
}

/// What the host must do with the store after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Nothing,
    Write,
    Erase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConsent {
    prefs: CookiePreferences,
    consent_given: bool,
    settings: Disclosure,
    notice: Option<&'static str>,
    pending: Pending,
}

impl Default for CookieConsent {
    fn default() -> Self {
        Self {
            prefs: CookiePreferences::default(),
            consent_given: false,
            settings: Disclosure::default(),
            notice: None,
            pending: Pending::Nothing,
        }
    }
}

impl CookieConsent {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mut prefs = CookiePreferences::load_from(store);
        prefs.essential = true;
        Self {
            prefs,
            consent_given: store.load_or_default(CONSENT_GIVEN_KEY),
            ..Default::default()
        }
    }

    pub fn prefs(&self) -> &CookiePreferences {
        &self.prefs
    }

    pub fn consent_given(&self) -> bool {
        self.consent_given
    }

    /// The banner stays up until a choice has been stored.
    pub fn show_banner(&self) -> bool {
        !self.consent_given
    }

    pub fn settings(&self) -> &Disclosure {
        &self.settings
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn has_pending_write(&self) -> bool {
        self.pending != Pending::Nothing
    }

    /// Write (or erase) the stored choice after accept/reject/save/reset.
    pub fn commit(&mut self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        match self.pending {
            Pending::Nothing => return Ok(()),
            Pending::Write => {
                self.prefs.save_to(store)?;
                store.save(CONSENT_GIVEN_KEY, &true)?;
            }
            Pending::Erase => {
                store.remove(CookiePreferences::KEY)?;
                store.remove(CONSENT_GIVEN_KEY)?;
            }
        }
        self.pending = Pending::Nothing;
        Ok(())
    }

    fn record_choice(&mut self, notice: &'static str) {
        self.consent_given = true;
        self.settings = Disclosure::default();
        self.notice = Some(notice);
        self.pending = Pending::Write;
        tracing::info!("Cookie consent: {}", notice);
    }
}

impl Reducer for CookieConsent {
    type Action = CookieAction;

    fn apply(&mut self, action: CookieAction) -> Result<(), StateError> {
        match action {
            CookieAction::AcceptAll => {
                self.prefs.set_all(true);
                self.record_choice("All cookies accepted");
            }
            CookieAction::RejectAll => {
                self.prefs.set_all(false);
                self.record_choice("Only essential cookies accepted");
            }
            CookieAction::Toggle(category) => match category {
                CookieCategory::Analytics => self.prefs.analytics = !self.prefs.analytics,
                CookieCategory::Marketing => self.prefs.marketing = !self.prefs.marketing,
                CookieCategory::Functional => self.prefs.functional = !self.prefs.functional,
            },
            CookieAction::OpenSettings => self.settings.apply(DisclosureAction::Open)?,
            CookieAction::CloseSettings => self.settings.apply(DisclosureAction::Close)?,
            CookieAction::Save => self.record_choice("Cookie preferences saved"),
            CookieAction::Reset => {
                self.prefs = CookiePreferences::default();
                self.consent_given = false;
                self.notice = None;
                self.pending = Pending::Erase;
            }
        }
        Ok(())
    }
}

// Colour scheme

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Preference for ThemePreference {
    const KEY: &'static str = "theme-preference";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Light,
    Dark,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    pub fn body_class(self) -> &'static str {
        match self {
            Self::Light => "light-mode",
            Self::Dark => "dark-mode",
        }
    }
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [Self::Light, Self::Auto, Self::Dark];

    pub fn value(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "🌓 Auto",
            Self::Light => "☀️ Light",
            Self::Dark => "🌙 Dark",
        }
    }

    pub fn resolve(self, prefers_dark: bool) -> Scheme {
        match self {
            Self::Light => Scheme::Light,
            Self::Dark => Scheme::Dark,
            Self::Auto if prefers_dark => Scheme::Dark,
            Self::Auto => Scheme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Choose(ThemePreference),
    /// Flip between the resolved light and dark schemes
    QuickToggle,
    SystemChanged { prefers_dark: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DarkModeToggle {
    preference: ThemePreference,
    prefers_dark: bool,
}

impl DarkModeToggle {
    pub fn new(preference: ThemePreference, prefers_dark: bool) -> Self {
        Self {
            preference,
            prefers_dark,
        }
    }

    pub fn load(store: &dyn PreferenceStore, prefers_dark: bool) -> Self {
        Self::new(ThemePreference::load_from(store), prefers_dark)
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn scheme(&self) -> Scheme {
        self.preference.resolve(self.prefers_dark)
    }

    pub fn status(&self) -> String {
        match self.preference {
            ThemePreference::Auto => format!("Current theme: Auto ({})", self.scheme().as_str()),
            _ => format!("Current theme: {}", self.scheme().as_str()),
        }
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        self.preference.save_to(store)
    }
}

impl Reducer for DarkModeToggle {
    type Action = ThemeAction;

    fn apply(&mut self, action: ThemeAction) -> Result<(), StateError> {
        match action {
            ThemeAction::Choose(p) => self.preference = p,
            ThemeAction::QuickToggle => {
                self.preference = match self.scheme() {
                    Scheme::Dark => ThemePreference::Light,
                    Scheme::Light => ThemePreference::Dark,
                };
            }
            ThemeAction::SystemChanged { prefers_dark } => self.prefers_dark = prefers_dark,
        }
        Ok(())
    }
}

// Language

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Ja,
    Zh,
}

impl Preference for Language {
    const KEY: &'static str = "selected-language";
}

impl Language {
    pub const ALL: [Language; 7] = [
        Self::En,
        Self::Es,
        Self::Fr,
        Self::De,
        Self::It,
        Self::Ja,
        Self::Zh,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Zh => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::De => "German",
            Self::It => "Italian",
            Self::Ja => "Japanese",
            Self::Zh => "Chinese",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::De => "Deutsch",
            Self::It => "Italiano",
            Self::Ja => "日本語",
            Self::Zh => "中文",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::En => "🇺🇸",
            Self::Es => "🇪🇸",
            Self::Fr => "🇫🇷",
            Self::De => "🇩🇪",
            Self::It => "🇮🇹",
            Self::Ja => "🇯🇵",
            Self::Zh => "🇨🇳",
        }
    }

    /// Demo heading and paragraph in this language.
    pub fn greeting(self) -> (&'static str, &'static str) {
        match self {
            Self::En => (
                "Welcome to TuskPHP",
                "This text will change based on your language selection.",
            ),
            Self::Es => (
                "Bienvenido a TuskPHP",
                "Este texto cambiará según tu selección de idioma.",
            ),
            Self::Fr => (
                "Bienvenue sur TuskPHP",
                "Ce texte changera en fonction de votre sélection de langue.",
            ),
            Self::De => (
                "Willkommen bei TuskPHP",
                "Dieser Text ändert sich je nach Ihrer Sprachauswahl.",
            ),
            Self::It => (
                "Benvenuto in TuskPHP",
                "Questo testo cambierà in base alla selezione della lingua.",
            ),
            Self::Ja => ("TuskPHPへようこそ", "このテキストは言語選択に基づいて変更されます。"),
            Self::Zh => ("欢迎使用TuskPHP", "此文本将根据您的语言选择而更改。"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageAction {
    Dropdown(DisclosureAction),
    Select(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageSelector {
    selected: Language,
    dropdown: Disclosure,
}

impl LanguageSelector {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            selected: Language::load_from(store),
            dropdown: Disclosure::default(),
        }
    }

    pub fn selected(&self) -> Language {
        self.selected
    }

    pub fn dropdown(&self) -> &Disclosure {
        &self.dropdown
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        self.selected.save_to(store)
    }
}

impl Reducer for LanguageSelector {
    type Action = LanguageAction;

    fn apply(&mut self, action: LanguageAction) -> Result<(), StateError> {
        match action {
            LanguageAction::Dropdown(a) => self.dropdown.apply(a),
            LanguageAction::Select(code) => {
                let lang =
                    Language::from_code(&code).ok_or_else(|| StateError::missing("language", &code))?;
                self.selected = lang;
                self.dropdown.apply(DisclosureAction::Close)?;
                tracing::info!("Language changed to: {}", lang.name());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::widgets::catalog::Wishlist;
    use proptest::prelude::*;

    #[test]
    fn test_text_size_is_clamped() {
        let mut w = AccessibilityWidget::default();
        for _ in 0..10 {
            w.apply(AccessibilityAction::IncreaseText).unwrap();
        }
        assert_eq!(w.settings().text_size, TEXT_SIZE_MAX);
        for _ in 0..10 {
            w.apply(AccessibilityAction::DecreaseText).unwrap();
        }
        assert_eq!(w.settings().text_size, TEXT_SIZE_MIN);
        assert_eq!(w.announcement(), Some("Text size adjusted to 80%"));
    }

    #[test]
    fn test_every_toggle_announces() {
        let mut w = AccessibilityWidget::default();
        w.apply(AccessibilityAction::Toggle(AccessibilityFlag::ReduceMotion)).unwrap();
        assert_eq!(w.announcement(), Some("Motion effects reduced"));
        w.apply(AccessibilityAction::Toggle(AccessibilityFlag::KeyboardNav)).unwrap();
        assert_eq!(w.announcement(), Some("Enhanced keyboard navigation disabled"));
        assert_eq!(w.settings().body_classes(), vec!["screen-reader-optimized", "reduce-motion"]);

        w.apply(AccessibilityAction::Reset).unwrap();
        assert_eq!(*w.settings(), AccessibilitySettings::default());
    }

    #[test]
    fn test_accessibility_save_and_reload() {
        let store = MemoryStore::new();
        let mut w = AccessibilityWidget::default()
            .reduce(AccessibilityAction::IncreaseText)
            .reduce(AccessibilityAction::Toggle(AccessibilityFlag::HighContrast));
        w.save(&store).unwrap();
        assert_eq!(w.announcement(), Some("Accessibility settings saved"));

        let reloaded = AccessibilityWidget::load(&store);
        assert_eq!(reloaded.settings(), w.settings());
        assert_eq!(reloaded.settings().text_size, 110);
    }

    #[test]
    fn test_cookie_banner_until_choice_is_stored() {
        let store = MemoryStore::new();
        let mut consent = CookieConsent::load(&store);
        assert!(consent.show_banner());

        consent.apply(CookieAction::AcceptAll).unwrap();
        assert!(consent.has_pending_write());
        consent.commit(&store).unwrap();

        let reloaded = CookieConsent::load(&store);
        assert!(!reloaded.show_banner());
        assert!(reloaded.prefs().marketing);
        assert!(reloaded.prefs().essential);
    }

    #[test]
    fn test_cookie_save_keeps_custom_choice() {
        let store = MemoryStore::new();
        let mut consent = CookieConsent::default()
            .reduce(CookieAction::OpenSettings)
            .reduce(CookieAction::Toggle(CookieCategory::Analytics))
            .reduce(CookieAction::Save);
        assert!(!consent.settings().is_open());
        assert_eq!(consent.notice(), Some("Cookie preferences saved"));
        consent.commit(&store).unwrap();

        let prefs = CookieConsent::load(&store).prefs().to_owned();
        assert!(prefs.analytics && !prefs.marketing && !prefs.functional);
    }

    #[test]
    fn test_cookie_reset_erases_store() {
        let store = MemoryStore::new();
        let mut consent = CookieConsent::default().reduce(CookieAction::RejectAll);
        consent.commit(&store).unwrap();
        consent.apply(CookieAction::Reset).unwrap();
        consent.commit(&store).unwrap();

        assert_eq!(store.get_raw(CONSENT_GIVEN_KEY).unwrap(), None);
        assert!(CookieConsent::load(&store).show_banner());
    }

    #[test]
    fn test_theme_resolution() {
        let mut t = DarkModeToggle::new(ThemePreference::Auto, true);
        assert_eq!(t.scheme(), Scheme::Dark);
        assert_eq!(t.status(), "Current theme: Auto (Dark)");

        t.apply(ThemeAction::SystemChanged { prefers_dark: false }).unwrap();
        assert_eq!(t.scheme(), Scheme::Light);

        t.apply(ThemeAction::QuickToggle).unwrap();
        assert_eq!(t.preference(), ThemePreference::Dark);
        assert_eq!(t.status(), "Current theme: Dark");
    }

    #[test]
    fn test_language_select() {
        let store = MemoryStore::new();
        let mut sel = LanguageSelector::load(&store);
        assert_eq!(sel.selected(), Language::En);

        sel.apply(LanguageAction::Dropdown(DisclosureAction::Open)).unwrap();
        sel.apply(LanguageAction::Select("it".into())).unwrap();
        assert!(!sel.dropdown().is_open());
        assert_eq!(sel.selected().greeting().0, "Benvenuto in TuskPHP");
        sel.save(&store).unwrap();
        assert_eq!(LanguageSelector::load(&store).selected(), Language::It);

        assert!(sel.apply(LanguageAction::Select("xx".into())).is_err());
        assert_eq!(sel.selected(), Language::It);
    }

    #[test]
    fn test_wishlist_persists() {
        let store = MemoryStore::new();
        let mut w = Wishlist::default();
        w.toggle("smart-watch");
        w.save_to(&store).unwrap();
        assert!(Wishlist::load_from(&store).contains("smart-watch"));
    }

    proptest! {
        #[test]
        fn accessibility_roundtrips_through_store(
            text_size in (TEXT_SIZE_MIN / 10..=TEXT_SIZE_MAX / 10).prop_map(|s| s * 10),
            flags in prop::array::uniform6(any::<bool>()),
        ) {
            let settings = AccessibilitySettings {
                text_size,
                high_contrast: flags[0],
                dyslexia_font: flags[1],
                keyboard_nav: flags[2],
                focus_indicators: flags[3],
                screen_reader: flags[4],
                reduce_motion: flags[5],
            };
            let store = MemoryStore::new();
            settings.save_to(&store).unwrap();
            let raw = store.get_raw(AccessibilitySettings::KEY).unwrap();
            prop_assert_eq!(AccessibilitySettings::load_from(&store), settings);
            // Saving again writes the same bytes
            settings.save_to(&store).unwrap();
            prop_assert_eq!(store.get_raw(AccessibilitySettings::KEY).unwrap(), raw);
        }

        #[test]
        fn cookie_prefs_roundtrip(a in any::<bool>(), m in any::<bool>(), f in any::<bool>()) {
            let prefs = CookiePreferences { essential: true, analytics: a, marketing: m, functional: f };
            let store = MemoryStore::new();
            prefs.save_to(&store).unwrap();
            prop_assert_eq!(CookiePreferences::load_from(&store), prefs);
        }
    }
}

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::error::StateError;
use crate::gateway::{ChatResponder, Message, MessageGateway, Order, OrderGateway, SimulatedGateway};
use crate::render::{self, Component, Site};
use crate::state::listing::ListAction;
use crate::state::paging::{PageAction, SlideAction};
use crate::state::toggle::{DisclosureAction, PanelAction};
use crate::state::Reducer;
use crate::store::PreferenceStore;
use crate::theme::{self, Theme};
use crate::widgets::cart::CartAction;
use crate::widgets::catalog::{PortfolioSort, PostSort, ProductSort};
use crate::widgets::chat::{ChatAction, QUICK_MESSAGES};
use crate::widgets::checkout::{Checkout, CheckoutAction, PaymentMethod, ShippingMethod};
use crate::widgets::contact::{FormSubmitAction, LoginAction, LoginView};
use crate::widgets::form::{FieldKind, Form, FormAction, Submission};
use crate::widgets::preferences::{
    AccessibilityAction, AccessibilityFlag, CookieAction, CookieCategory, Language,
    LanguageAction, Preference, ThemeAction, ThemePreference,
};
use crate::widgets::pricing::PricingAction;
use crate::widgets::search::{SearchAction, FILTERS};
use crate::widgets::showcase::{ModalAction, StatsAction};
use crate::widgets::toast::{ToastAction, ToastKind};

/// Status line messages clear after this long
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

pub const CONTACT_INPUTS: &[&str] = &[
    "contact-name",
    "contact-email",
    "contact-subject",
    "contact-message",
    "contact-consent",
];
pub const NEWSLETTER_INPUTS: &[&str] = &["newsletter-email", "newsletter-name", "newsletter-consent"];
pub const SIGN_IN_INPUTS: &[&str] = &["login-email", "login-password", "remember-me"];
pub const RESET_INPUTS: &[&str] = &["reset-email"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Gallery,   // Component list on the left
    Component, // Keys go to the selected component
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    Input,
    Preview,
}

/// Where the text typed into the input popup goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Field(&'static str),
    ProductSearch,
    BlogSearch,
    Promo,
    Chat,
    SiteSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Order,
    Contact,
    Newsletter,
    PasswordReset,
    Chat,
}

/// A gateway call running on the runtime, polled from `tick`.
struct InFlight {
    reply: Reply,
    handle: JoinHandle<Result<String, String>>,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    /// Index into `Component::ALL`
    pub selected: usize,
    /// Row inside the focused component (field, item, plan...)
    pub cursor: usize,

    pub site: Site,
    pub theme: Theme,
    pub config: AppConfig,

    // Input popup
    pub input_buffer: String,
    pub input_label: String,
    input_target: Option<InputTarget>,

    // Markup preview popup
    pub preview: String,
    pub preview_scroll: usize,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    store: Box<dyn PreferenceStore>,
    gateway: Arc<SimulatedGateway>,
    in_flight: Vec<InFlight>,

    last_tick: Instant,
    since_frame: Duration,
}

impl App {
    pub fn new(config: AppConfig, store: Box<dyn PreferenceStore>, gateway: Arc<SimulatedGateway>) -> Self {
        let mut site = Site::new(config.render.clone(), store.as_ref(), config.prefers_dark);
        site.palette = theme::load_palette(config.render.theme);
        let theme = Theme::from_palette(&site.palette);

        Self {
            section: Section::Gallery,
            popup: Popup::None,
            selected: 0,
            cursor: 0,
            site,
            theme,
            config,
            input_buffer: String::new(),
            input_label: String::new(),
            input_target: None,
            preview: String::new(),
            preview_scroll: 0,
            status_message: None,
            status_message_time: None,
            store,
            gateway,
            in_flight: Vec::new(),
            last_tick: Instant::now(),
            since_frame: Duration::ZERO,
        }
    }

    pub fn component(&self) -> Component {
        Component::ALL[self.selected.min(Component::ALL.len() - 1)]
    }

    /// Gateway calls still waiting for an answer.
    pub fn pending_requests(&self) -> usize {
        self.in_flight.len()
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        match key.code {
            KeyCode::Char('?') => self.popup = Popup::Help,
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Gallery => Section::Component,
                    Section::Component => Section::Gallery,
                };
                self.cursor = 0;
            }
            KeyCode::Char('T') => self.cycle_site_theme(),
            KeyCode::Char('v') => self.open_preview(),
            KeyCode::Char('E') => self.export_page()?,
            _ => match self.section {
                Section::Gallery => self.handle_gallery_key(key),
                Section::Component => self.handle_component_key(key)?,
            },
        }
        Ok(())
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Input => return self.handle_input_key(key),
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
            }
            Popup::Preview => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') => self.popup = Popup::None,
                KeyCode::Down | KeyCode::Char('j') => self.scroll_preview(1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_preview(-1),
                KeyCode::PageDown => self.scroll_preview(10),
                KeyCode::PageUp => self.scroll_preview(-10),
                _ => {}
            },
            Popup::None => {}
        }
        Ok(())
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) {
        let last = Component::ALL.len() - 1;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.section = Section::Component,
            _ => return,
        }
        self.cursor = 0;
    }

    fn handle_component_key(&mut self, key: KeyEvent) -> Result<()> {
        let component = self.component();

        // Escape closes open dialogs before it leaves the component
        if key.code == KeyCode::Esc {
            if component == Component::Modal && self.site.modals.scroll_locked() {
                self.site.modals.apply(ModalAction::Escape)?;
            } else {
                self.section = Section::Gallery;
            }
            return Ok(());
        }

        if self.handle_form_key(component, key)? {
            return Ok(());
        }

        match component {
            Component::Navbar => {
                if activates(key) {
                    self.site.navbar.apply(DisclosureAction::Toggle)?;
                }
            }
            Component::Hero | Component::Features | Component::Team | Component::Footer => {
                self.set_status("Static section: press v to preview its markup");
            }
            Component::PricingTable => self.pricing_key(key)?,
            Component::ProductGrid => self.products_key(key)?,
            Component::BlogListing => self.blog_key(key)?,
            Component::Portfolio => self.portfolio_key(key)?,
            Component::SiteSearch => self.search_key(key)?,
            Component::CartSummary => self.cart_key(key)?,
            Component::CheckoutForm => self.checkout_key(key)?,
            Component::Accordion => {
                let action = match key.code {
                    KeyCode::Down => PanelAction::FocusNext,
                    KeyCode::Up => PanelAction::FocusPrev,
                    KeyCode::Home => PanelAction::FocusFirst,
                    KeyCode::End => PanelAction::FocusLast,
                    KeyCode::Enter | KeyCode::Char(' ') => PanelAction::ToggleFocused,
                    KeyCode::Char('e') => PanelAction::ExpandAll,
                    KeyCode::Char('c') => PanelAction::CollapseAll,
                    KeyCode::Char('m') => PanelAction::SwitchMode,
                    _ => return Ok(()),
                };
                self.site.faq.apply(action)?;
            }
            Component::Tabs => {
                if let Some(action) = slide_action(key) {
                    self.site.tabs.apply(action)?;
                }
            }
            Component::Testimonials => {
                let action = match key.code {
                    KeyCode::Char(' ') => Some(SlideAction::TogglePlay),
                    _ => slide_action(key),
                };
                if let Some(action) = action {
                    self.site.testimonials.apply(action)?;
                }
            }
            Component::Stats => {
                let action = match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') => StatsAction::Start,
                    KeyCode::Char('f') => StatsAction::Finish,
                    KeyCode::Char('r') => StatsAction::Reset,
                    _ => return Ok(()),
                };
                self.site.stats.apply(action)?;
            }
            Component::Modal => {
                if let Some(spec) = digit(key).and_then(|i| self.site.modals.specs().get(i)) {
                    self.site.modals.apply(ModalAction::Open(spec.id.to_string()))?;
                }
            }
            Component::LiveChat => self.chat_key(key)?,
            Component::Toasts => self.toasts_key(key)?,
            Component::ContactForm => {
                if key.code == KeyCode::Char('s') {
                    let message = self.site.contact.begin_submit()?;
                    self.spawn_message(Reply::Contact, message);
                }
            }
            Component::Newsletter => {
                if key.code == KeyCode::Char('s') {
                    let message = self.site.newsletter.begin_submit()?;
                    self.spawn_message(Reply::Newsletter, message);
                }
            }
            Component::LoginForm => self.login_key(key)?,
            Component::Accessibility => self.accessibility_key(key)?,
            Component::CookieConsent => self.cookie_key(key)?,
            Component::DarkMode => self.dark_mode_key(key)?,
            Component::LanguageSelector => self.language_key(key)?,
        }
        Ok(())
    }

    // Form fields

    /// The form shown by a component and the inputs currently on screen.
    pub fn form_inputs(&self, component: Component) -> Option<(&Form, &'static [&'static str])> {
        match component {
            Component::CheckoutForm => Some((self.site.checkout.form(), self.site.checkout.inputs())),
            Component::ContactForm => Some((self.site.contact.form(), CONTACT_INPUTS)),
            Component::Newsletter => Some((self.site.newsletter.form(), NEWSLETTER_INPUTS)),
            Component::LoginForm => {
                let inputs = match self.site.login.view() {
                    LoginView::SignIn => SIGN_IN_INPUTS,
                    LoginView::ForgotPassword => RESET_INPUTS,
                };
                Some((self.site.login.form(), inputs))
            }
            _ => None,
        }
    }

    /// Up/Down between fields; Enter edits text, flips checkboxes, cycles selects.
    fn handle_form_key(&mut self, component: Component, key: KeyEvent) -> Result<bool> {
        let (len, field) = match self.form_inputs(component) {
            Some((form, ids)) if !ids.is_empty() => {
                let id = ids[self.cursor.min(ids.len() - 1)];
                let field = form
                    .spec(id)
                    .map(|spec| (id, spec.label, spec.kind, form.value(id).to_string()));
                (ids.len(), field)
            }
            _ => return Ok(false),
        };

        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(len - 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some((id, label, kind, value)) = field else {
                    return Ok(false);
                };
                match kind {
                    FieldKind::Checkbox => self.apply_input(component, FormAction::Check(id.to_string()))?,
                    FieldKind::Select(options) => {
                        let next = next_option(options, &value);
                        self.apply_input(component, FormAction::set(id, next))?;
                    }
                    _ => self.open_input(InputTarget::Field(id), label, value),
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn apply_input(&mut self, component: Component, action: FormAction) -> Result<()> {
        match component {
            Component::CheckoutForm => self.site.checkout.apply(CheckoutAction::Input(action))?,
            Component::ContactForm => self.site.contact.apply(FormSubmitAction::Input(action))?,
            Component::Newsletter => self.site.newsletter.apply(FormSubmitAction::Input(action))?,
            Component::LoginForm => self.site.login.apply(LoginAction::Input(action))?,
            other => tracing::debug!("{} has no form", other),
        }
        Ok(())
    }

    fn open_input(&mut self, target: InputTarget, label: &str, value: String) {
        self.input_target = Some(target);
        self.input_label = label.to_string();
        self.input_buffer = value;
        self.popup = Popup::Input;
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.popup = Popup::None;
                self.input_target = None;
            }
            KeyCode::Enter => {
                self.popup = Popup::None;
                let value = std::mem::take(&mut self.input_buffer);
                if let Some(target) = self.input_target.take() {
                    self.confirm_input(target, value)?;
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
        Ok(())
    }

    fn confirm_input(&mut self, target: InputTarget, value: String) -> Result<()> {
        match target {
            InputTarget::Field(id) => {
                let component = self.component();
                self.apply_input(component, FormAction::set(id, value))?;
            }
            InputTarget::ProductSearch => self.site.products.apply(ListAction::Search(value))?,
            InputTarget::BlogSearch => self.site.blog.apply(ListAction::Search(value))?,
            InputTarget::SiteSearch => self.site.search.apply(SearchAction::Type(value))?,
            InputTarget::Promo => {
                self.site.cart.apply(CartAction::ApplyPromo(value))?;
                if let Some(promo) = self.site.cart.promo() {
                    self.set_status(format!("Promo {} applied: {}", promo.code, promo.description));
                }
            }
            InputTarget::Chat => {
                self.site.chat.apply(ChatAction::Input(value))?;
                if let Some(text) = self.site.chat.take_outgoing() {
                    self.spawn_chat(text);
                }
            }
        }
        Ok(())
    }

    // Commerce

    fn pricing_key(&mut self, key: KeyEvent) -> Result<()> {
        let plans = self.site.pricing.plans().len();
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('b') => {
                self.site.pricing.apply(PricingAction::TogglePeriod)?;
            }
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(plans.saturating_sub(1)),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let plan = self.site.pricing.plans().get(self.cursor).map(|p| (p.id, p.name));
                if let Some((id, name)) = plan {
                    self.site.pricing.apply(PricingAction::Select(id.to_string()))?;
                    let period = self.site.pricing.period().as_str();
                    self.set_status(format!("Selected {} ({})", name, period));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn products_key(&mut self, key: KeyEvent) -> Result<()> {
        let visible = self.site.products.pager().range().len();
        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(visible.saturating_sub(1)),
            KeyCode::Left | KeyCode::Right => {
                let next = {
                    let categories = self.site.products.categories();
                    next_category(&categories, self.site.products.category())
                };
                self.site.products.apply(ListAction::Filter(next))?;
                self.cursor = 0;
            }
            KeyCode::Char('s') => {
                let next = cycle_option(&ProductSort::ALL, self.site.products.sort());
                self.site.products.apply(ListAction::Sort(next))?;
            }
            KeyCode::Char('/') => {
                let current = self.site.products.search().to_string();
                self.open_input(InputTarget::ProductSearch, "Search products", current);
            }
            KeyCode::Char('c') => {
                self.site.products.apply(ListAction::Clear)?;
                self.cursor = 0;
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('w') => {
                let product = self.site.products.visible().nth(self.cursor).map(|p| (p.id, p.name));
                if let Some((id, name)) = product {
                    let added = self.site.wishlist.toggle(id);
                    self.site.wishlist.save_to(self.store.as_ref())?;
                    let verb = if added { "added to" } else { "removed from" };
                    self.set_status(format!("{} {} wishlist", name, verb));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn blog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left => self.site.blog.apply(ListAction::Page(PageAction::Prev))?,
            KeyCode::Right => self.site.blog.apply(ListAction::Page(PageAction::Next))?,
            KeyCode::Home => self.site.blog.apply(ListAction::Page(PageAction::First))?,
            KeyCode::End => self.site.blog.apply(ListAction::Page(PageAction::Last))?,
            KeyCode::Char('f') => {
                let next = {
                    let categories = self.site.blog.categories();
                    next_category(&categories, self.site.blog.category())
                };
                self.site.blog.apply(ListAction::Filter(next))?;
            }
            KeyCode::Char('s') => {
                let next = cycle_option(&PostSort::ALL, self.site.blog.sort());
                self.site.blog.apply(ListAction::Sort(next))?;
            }
            KeyCode::Char('/') => {
                let current = self.site.blog.search().to_string();
                self.open_input(InputTarget::BlogSearch, "Search posts", current);
            }
            KeyCode::Char('c') => self.site.blog.apply(ListAction::Clear)?,
            _ => {}
        }
        Ok(())
    }

    fn portfolio_key(&mut self, key: KeyEvent) -> Result<()> {
        let shown = self.site.portfolio.matching_len();
        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(shown.saturating_sub(1)),
            KeyCode::Left | KeyCode::Right => {
                let next = {
                    let categories = self.site.portfolio.categories();
                    next_category(&categories, self.site.portfolio.category())
                };
                self.site.portfolio.apply(ListAction::Filter(next))?;
                self.cursor = 0;
            }
            KeyCode::Char('s') => {
                let next = cycle_option(&PortfolioSort::ALL, self.site.portfolio.sort());
                self.site.portfolio.apply(ListAction::Sort(next))?;
            }
            KeyCode::Char('c') => {
                self.site.portfolio.apply(ListAction::Clear)?;
                self.cursor = 0;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let id = self.site.portfolio.matching().nth(self.cursor).map(|p| p.id);
                if let Some(id) = id {
                    self.site.toasts.apply(ToastAction::show(
                        ToastKind::Info,
                        "Project Details",
                        format!("Viewing details for {}", id),
                    ))?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn search_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(i) = digit(key) {
            self.site.search.apply(SearchAction::Suggestion(i))?;
            return Ok(());
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('/') => {
                let current = self.site.search.query().to_string();
                self.open_input(InputTarget::SiteSearch, "Search", current);
            }
            KeyCode::Left | KeyCode::Right => {
                let values: Vec<&'static str> = FILTERS.iter().map(|(value, _)| *value).collect();
                let next = next_in(&values, self.site.search.filter());
                self.site.search.apply(SearchAction::Filter(next.to_string()))?;
            }
            KeyCode::Char('f') => self.site.search.apply(SearchAction::Focus)?,
            KeyCode::Char('c') => self.site.search.apply(SearchAction::Clear)?,
            KeyCode::Char('x') => self.site.search.apply(SearchAction::Escape)?,
            _ => {}
        }
        Ok(())
    }

    fn cart_key(&mut self, key: KeyEvent) -> Result<()> {
        let items = self.site.cart.items().len();
        let current = self.site.cart.items().get(self.cursor).map(|i| i.id);
        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(items.saturating_sub(1)),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(id) = current {
                    self.site.cart.apply(CartAction::Adjust { id, delta: 1 })?;
                }
            }
            KeyCode::Char('-') => {
                if let Some(id) = current {
                    self.site.cart.apply(CartAction::Adjust { id, delta: -1 })?;
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = current {
                    self.site.cart.apply(CartAction::Remove(id))?;
                    self.cursor = self.cursor.min(self.site.cart.items().len().saturating_sub(1));
                }
            }
            KeyCode::Char('r') => {
                let next = self.site.cart.region().next();
                self.site.cart.apply(CartAction::Region(next))?;
            }
            KeyCode::Char('p') => self.open_input(InputTarget::Promo, "Promo code", String::new()),
            KeyCode::Char('P') => self.site.cart.apply(CartAction::ClearPromo)?,
            KeyCode::Char('c') => {
                self.site.cart.apply(CartAction::Clear)?;
                self.cursor = 0;
            }
            KeyCode::Enter => {
                // An order still in flight belongs to the current checkout
                if self.site.checkout.submission().is_pending() {
                    return Err(StateError::Busy.into());
                }
                let summary = self.site.cart.checkout_summary()?;
                self.site.checkout = Checkout::from_cart(&self.site.cart.totals());
                self.select(Component::CheckoutForm);
                self.set_status(summary);
            }
            _ => {}
        }
        Ok(())
    }

    fn checkout_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Right | KeyCode::Char('n') => {
                self.site.checkout.apply(CheckoutAction::Next)?;
                self.cursor = 0;
            }
            KeyCode::Left => {
                self.site.checkout.apply(CheckoutAction::Prev)?;
                self.cursor = 0;
            }
            KeyCode::Char('m') => {
                let next = next_in(&ShippingMethod::ALL, self.site.checkout.shipping());
                self.site.checkout.apply(CheckoutAction::Shipping(next))?;
            }
            KeyCode::Char('y') => {
                let next = next_in(&PaymentMethod::ALL, self.site.checkout.payment());
                self.site.checkout.apply(CheckoutAction::Payment(next))?;
                self.cursor = 0;
            }
            KeyCode::Char('s') => {
                let order = self.site.checkout.begin_submit()?;
                self.set_status(format!("Placing order for {}...", order.total));
                self.spawn_order(order);
            }
            _ => {}
        }
        Ok(())
    }

    // Interaction widgets

    fn chat_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char(' ') => self.site.chat.apply(ChatAction::Window(DisclosureAction::Toggle))?,
            KeyCode::Enter | KeyCode::Char('i') => {
                let draft = self.site.chat.input().to_string();
                self.open_input(InputTarget::Chat, "Message", draft);
            }
            _ => {
                if let Some((i, (_, text))) = digit(key).and_then(|i| QUICK_MESSAGES.get(i).map(|m| (i, m))) {
                    self.site.chat.apply(ChatAction::Quick(i))?;
                    self.spawn_chat(text.to_string());
                }
            }
        }
        Ok(())
    }

    fn toasts_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('d') => {
                if let Some(id) = self.site.toasts.toasts().first().map(|t| t.id) {
                    self.site.toasts.apply(ToastAction::Dismiss(id))?;
                }
            }
            KeyCode::Char('D') => self.site.toasts.apply(ToastAction::DismissAll)?,
            KeyCode::Char('a') => {
                let on = !self.site.toasts.auto_dismiss();
                self.site.toasts.apply(ToastAction::SetAutoDismiss(on))?;
                self.set_status(if on { "Auto-dismiss on" } else { "Auto-dismiss off" });
            }
            _ => {
                if let Some(kind) = digit(key).and_then(|i| ToastKind::ALL.get(i).copied()) {
                    let (title, message) = sample_toast(kind);
                    self.site.toasts.apply(ToastAction::show(kind, title, message))?;
                }
            }
        }
        Ok(())
    }

    fn login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('p') => self.site.login.apply(LoginAction::TogglePassword)?,
            KeyCode::Char('f') => {
                let action = match self.site.login.view() {
                    LoginView::SignIn => LoginAction::ShowForgot,
                    LoginView::ForgotPassword => LoginAction::ShowSignIn,
                };
                self.site.login.apply(action)?;
                self.cursor = 0;
            }
            KeyCode::Char('s') => match self.site.login.view() {
                LoginView::SignIn => {
                    self.site.login.apply(LoginAction::SignIn)?;
                    if let Submission::Completed(text) = self.site.login.submission().clone() {
                        self.set_status(text);
                    }
                }
                LoginView::ForgotPassword => {
                    let message = self.site.login.begin_reset()?;
                    self.spawn_message(Reply::PasswordReset, message);
                }
            },
            _ => {}
        }
        Ok(())
    }

    // Preferences

    fn accessibility_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => AccessibilityAction::Panel(DisclosureAction::Toggle),
            KeyCode::Char('+') | KeyCode::Char('=') => AccessibilityAction::IncreaseText,
            KeyCode::Char('-') => AccessibilityAction::DecreaseText,
            KeyCode::Char('r') => AccessibilityAction::Reset,
            KeyCode::Char('s') => {
                self.site.accessibility.save(self.store.as_ref())?;
                self.set_status("Accessibility settings saved");
                return Ok(());
            }
            _ => match digit(key).and_then(|i| AccessibilityFlag::ALL.get(i).copied()) {
                Some(flag) => AccessibilityAction::Toggle(flag),
                None => return Ok(()),
            },
        };
        self.site.accessibility.apply(action)?;
        Ok(())
    }

    fn cookie_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = match key.code {
            KeyCode::Char('a') => CookieAction::AcceptAll,
            KeyCode::Char('r') => CookieAction::RejectAll,
            KeyCode::Char('s') => CookieAction::Save,
            KeyCode::Char('x') => CookieAction::Reset,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => {
                if self.site.cookies.settings().is_open() {
                    CookieAction::CloseSettings
                } else {
                    CookieAction::OpenSettings
                }
            }
            _ => match digit(key).and_then(|i| CookieCategory::ALL.get(i).copied()) {
                Some(category) => CookieAction::Toggle(category),
                None => return Ok(()),
            },
        };
        self.site.cookies.apply(action)?;
        self.site.cookies.commit(self.store.as_ref())?;
        Ok(())
    }

    fn dark_mode_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => ThemeAction::QuickToggle,
            KeyCode::Char('p') => {
                self.config.prefers_dark = !self.config.prefers_dark;
                ThemeAction::SystemChanged {
                    prefers_dark: self.config.prefers_dark,
                }
            }
            KeyCode::Char('s') => {
                self.site.dark_mode.save(self.store.as_ref())?;
                self.set_status("Theme preference saved");
                return Ok(());
            }
            _ => match digit(key).and_then(|i| ThemePreference::ALL.get(i).copied()) {
                Some(pref) => ThemeAction::Choose(pref),
                None => return Ok(()),
            },
        };
        self.site.dark_mode.apply(action)?;
        Ok(())
    }

    fn language_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char(' ') => {
                self.site
                    .language
                    .apply(LanguageAction::Dropdown(DisclosureAction::Toggle))?;
            }
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(Language::ALL.len() - 1),
            KeyCode::Enter => {
                if let Some(lang) = Language::ALL.get(self.cursor) {
                    self.site
                        .language
                        .apply(LanguageAction::Select(lang.code().to_string()))?;
                    self.site.language.save(self.store.as_ref())?;
                    self.set_status(format!("Language: {}", lang.native_name()));
                }
            }
            _ => {}
        }
        Ok(())
    }

    // Global actions

    fn select(&mut self, component: Component) {
        if let Some(i) = Component::ALL.iter().position(|c| *c == component) {
            self.selected = i;
            self.section = Section::Component;
            self.cursor = 0;
        }
    }

    fn cycle_site_theme(&mut self) {
        let next = self.site.options.theme.next();
        self.site.options.theme = next;
        self.site.palette = theme::load_palette(next);
        self.theme = Theme::from_palette(&self.site.palette);
        self.config.render.theme = next;
        if let Err(e) = self.config.save() {
            tracing::warn!("Could not save config: {}", e);
        }
        self.set_status(format!("Site theme: {}", next));
    }

    fn open_preview(&mut self) {
        let html = render::render_component(self.component(), &self.site).into_string();
        self.preview = html.replace("><", ">\n<");
        self.preview_scroll = 0;
        self.popup = Popup::Preview;
    }

    fn scroll_preview(&mut self, delta: isize) {
        let max = self.preview.lines().count().saturating_sub(1);
        self.preview_scroll = self.preview_scroll.saturating_add_signed(delta).min(max);
    }

    fn export_page(&mut self) -> Result<()> {
        let path = AppConfig::data_home()?.join("page.html");
        let html = render::page(&Component::PAGE, &self.site).into_string();
        std::fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Exported page to {}", path.display());
        self.set_status(format!("Page written to {}", path.display()));
        Ok(())
    }

    // Gateway calls

    fn spawn_order(&mut self, order: Order) {
        let gateway = Arc::clone(&self.gateway);
        let handle = tokio::spawn(async move {
            gateway
                .place_order(order)
                .await
                .map(|c| c.reference)
                .map_err(|e| e.to_string())
        });
        self.in_flight.push(InFlight {
            reply: Reply::Order,
            handle,
        });
    }

    fn spawn_message(&mut self, reply: Reply, message: Message) {
        let gateway = Arc::clone(&self.gateway);
        let handle = tokio::spawn(async move {
            gateway
                .send(message)
                .await
                .map(|()| String::new())
                .map_err(|e| e.to_string())
        });
        self.in_flight.push(InFlight { reply, handle });
    }

    fn spawn_chat(&mut self, text: String) {
        let gateway = Arc::clone(&self.gateway);
        let handle = tokio::spawn(async move { gateway.reply(&text).await.map_err(|e| e.to_string()) });
        self.in_flight.push(InFlight {
            reply: Reply::Chat,
            handle,
        });
    }

    fn deliver(&mut self, reply: Reply, outcome: Result<String, String>) -> Result<()> {
        match reply {
            Reply::Order => {
                self.site.checkout.apply(CheckoutAction::Finished(outcome))?;
                let submission = self.site.checkout.submission().clone();
                self.report("Order placed", submission)?;
            }
            Reply::Contact => {
                self.site.contact.apply(FormSubmitAction::Finished(outcome))?;
                let submission = self.site.contact.submission().clone();
                self.report("Message sent", submission)?;
            }
            Reply::Newsletter => {
                self.site.newsletter.apply(FormSubmitAction::Finished(outcome))?;
                let submission = self.site.newsletter.submission().clone();
                self.report("Subscribed", submission)?;
            }
            Reply::PasswordReset => {
                self.site.login.apply(LoginAction::ResetFinished(outcome))?;
                let submission = self.site.login.submission().clone();
                self.report("Reset link sent", submission)?;
            }
            Reply::Chat => self.site.chat.apply(ChatAction::Replied(outcome))?,
        }
        Ok(())
    }

    /// Toast (and optionally a desktop notification) for a finished submission.
    fn report(&mut self, title: &str, submission: Submission) -> Result<()> {
        match submission {
            Submission::Completed(text) => {
                self.notify(&format!("{}: {}", title, text));
                self.site.toasts.apply(ToastAction::show(ToastKind::Success, title, text))?;
            }
            Submission::Failed(text) => {
                self.site.toasts.apply(ToastAction::show(ToastKind::Error, "Request failed", text))?;
            }
            Submission::Idle | Submission::Submitting => {}
        }
        Ok(())
    }

    fn notify(&self, body: &str) {
        if !self.config.notifications {
            return;
        }
        if let Err(e) = notify_rust::Notification::new()
            .summary("tuskblocks")
            .body(body)
            .show()
        {
            tracing::warn!("Notification failed: {}", e);
        }
    }

    pub async fn tick(&mut self) -> Result<()> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        // Timers
        self.site.testimonials.advance_if_due(elapsed);
        self.site.toasts.apply(ToastAction::Tick(elapsed))?;
        if self.site.stats.is_running() {
            self.since_frame += elapsed;
            let frame = self.site.stats.frame();
            if frame.is_zero() {
                self.site.stats.apply(StatsAction::Finish)?;
            }
            while self.site.stats.is_running() && self.since_frame >= frame {
                self.since_frame -= frame;
                self.site.stats.apply(StatsAction::Frame)?;
            }
        } else {
            self.since_frame = Duration::ZERO;
        }

        // Collect finished gateway calls
        let (done, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.in_flight)
            .into_iter()
            .partition(|task| task.handle.is_finished());
        self.in_flight = waiting;
        for task in done {
            let outcome = task
                .handle
                .await
                .unwrap_or_else(|e| Err(format!("request task failed: {}", e)));
            if let Err(e) = self.deliver(task.reply, outcome) {
                tracing::warn!("Could not deliver {:?} reply: {}", task.reply, e);
            }
        }

        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        Ok(())
    }
}

fn activates(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// `1`..`9` as a 0-based index.
fn digit(key: KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

fn slide_action(key: KeyEvent) -> Option<SlideAction> {
    match key.code {
        KeyCode::Left => Some(SlideAction::Prev),
        KeyCode::Right => Some(SlideAction::Next),
        KeyCode::Home => Some(SlideAction::First),
        KeyCode::End => Some(SlideAction::Last),
        _ => digit(key).map(SlideAction::GoTo),
    }
}

fn next_in<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let i = all.iter().position(|x| *x == current).map_or(0, |i| (i + 1) % all.len());
    all[i]
}

/// `None` → first → ... → last → `None`.
fn cycle_option<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(cur) => all
            .iter()
            .position(|x| *x == cur)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}

fn next_category(categories: &[&str], current: Option<&str>) -> Option<String> {
    cycle_option(categories, current).map(str::to_string)
}

fn next_option(options: &'static [(&'static str, &'static str)], current: &str) -> &'static str {
    if options.is_empty() {
        return "";
    }
    let i = options
        .iter()
        .position(|(code, _)| *code == current)
        .map_or(0, |i| (i + 1) % options.len());
    options[i].0
}

fn sample_toast(kind: ToastKind) -> (&'static str, &'static str) {
    match kind {
        ToastKind::Success => ("Success!", "Your changes have been saved."),
        ToastKind::Error => ("Error", "Something went wrong. Please try again."),
        ToastKind::Warning => ("Warning", "Your session will expire in 5 minutes."),
        ToastKind::Info => ("Info", "A new version is available."),
        ToastKind::Loading => ("Loading...", "Please wait while we process your request."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::widgets::catalog::Wishlist;

    fn app() -> App {
        App::new(
            AppConfig::default(),
            Box::new(MemoryStore::new()),
            Arc::new(SimulatedGateway::instant()),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn settle(app: &mut App) {
        for _ in 0..100 {
            tokio::task::yield_now().await;
            app.tick().await.unwrap();
            if app.pending_requests() == 0 {
                return;
            }
        }
        panic!("gateway calls never finished");
    }

    #[test]
    fn test_gallery_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.component(), Component::ALL[2]);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.section, Section::Component);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.section, Section::Gallery);
    }

    #[test]
    fn test_portfolio_view_project() {
        let mut app = app();
        app.select(Component::Portfolio);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.site.portfolio.category(), Some("web-development"));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let toasts = app.site.toasts.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Info);
        assert_eq!(toasts[0].message, "Viewing details for healthcare-dashboard");
    }

    #[test]
    fn test_search_keys() {
        let mut app = app();
        app.select(Component::SiteSearch);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.popup, Popup::Input);
        type_text(&mut app, "services");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.site.search.results().len(), 2);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.site.search.filter(), "services");
        assert_eq!(app.site.search.results().len(), 2);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.site.search.query(), "Web Development");
        assert_eq!(app.site.search.results().len(), 1);
    }

    #[test]
    fn test_cart_keys() {
        let mut app = app();
        app.select(Component::CartSummary);
        let before = app.site.cart.item_count();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.site.cart.item_count(), before + 1);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.popup, Popup::Input);
        type_text(&mut app, "save10");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.site.cart.promo().map(|p| p.code), Some("SAVE10"));
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_unknown_promo_is_an_error() {
        let mut app = app();
        app.select(Component::CartSummary);
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "BOGUS");
        assert!(app.handle_key(KeyEvent::from(KeyCode::Enter)).is_err());
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_checkout_field_editing() {
        let mut app = app();
        app.select(Component::CheckoutForm);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup, Popup::Input);
        assert_eq!(app.input_label, "First Name");
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.site.checkout.form().value("first-name"), "Ada");

        // Blocked step surfaces as an error for the status line
        assert!(app.handle_key(KeyEvent::from(KeyCode::Right)).is_err());
        assert_eq!(app.site.checkout.step(), 1);
    }

    #[test]
    fn test_select_field_cycles() {
        let mut app = app();
        app.select(Component::ContactForm);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.site.contact.form().value("contact-subject"), "general");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.site.contact.form().value("contact-subject"), "support");
    }

    #[test]
    fn test_wishlist_is_persisted() {
        let mut app = app();
        app.select(Component::ProductGrid);
        press(&mut app, KeyCode::Char('w'));
        let stored = Wishlist::load_from(app.store.as_ref());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored, app.site.wishlist);
    }

    #[test]
    fn test_escape_closes_modals_first() {
        let mut app = app();
        app.select(Component::Modal);
        press(&mut app, KeyCode::Char('2'));
        assert!(app.site.modals.is_open("image-modal"));
        press(&mut app, KeyCode::Esc);
        assert!(!app.site.modals.scroll_locked());
        assert_eq!(app.section, Section::Component);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.section, Section::Gallery);
    }

    #[test]
    fn test_cookie_choice_is_committed() {
        let mut app = app();
        app.select(Component::CookieConsent);
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.site.cookies.has_pending_write());
        let reloaded = crate::widgets::preferences::CookieConsent::load(app.store.as_ref());
        assert!(reloaded.consent_given());
        assert!(reloaded.prefs().analytics);
    }

    #[test]
    fn test_preview_popup() {
        let mut app = app();
        app.select(Component::CartSummary);
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.popup, Popup::Preview);
        assert!(app.preview.contains("cart-items"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup, Popup::None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_reply_arrives_on_tick() {
        let mut app = app();
        app.select(Component::LiveChat);
        press(&mut app, KeyCode::Char('1'));
        assert!(app.site.chat.is_typing());
        assert_eq!(app.pending_requests(), 1);

        settle(&mut app).await;
        assert!(!app.site.chat.is_typing());
        assert_eq!(app.site.chat.log().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newsletter_submission_toasts() {
        let mut app = app();
        app.select(Component::Newsletter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.site.newsletter.submission().is_pending());

        settle(&mut app).await;
        assert!(matches!(app.site.newsletter.submission(), Submission::Completed(_)));
        assert_eq!(app.site.toasts.toasts().len(), 1);
        assert_eq!(app.site.toasts.toasts()[0].kind, ToastKind::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_tick_delivers_every_finished_reply() {
        let mut app = app();
        app.select(Component::LiveChat);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.pending_requests(), 2);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        app.tick().await.unwrap();
        assert_eq!(app.pending_requests(), 0);
        assert_eq!(app.site.chat.log().len(), 5);
    }

    #[test]
    fn test_checkout_charges_what_the_cart_quoted() {
        let mut app = app();
        app.select(Component::CartSummary);
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "SAVE10");
        press(&mut app, KeyCode::Enter);
        let quoted = app.site.cart.totals().total;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.component(), Component::CheckoutForm);
        assert_eq!(app.site.checkout.total(), quoted);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|s| s.contains(&quoted.to_string())));
    }

    #[test]
    fn test_cart_keeps_checkout_with_order_in_flight() {
        let mut app = app();
        let checkout = &mut app.site.checkout;
        let steps: [&[(&str, &str)]; 3] = [
            &[("first-name", "Ada"), ("last-name", "Lovelace"), ("email", "ada@example.com")],
            &[("address", "12 Analytical Way"), ("city", "Austin"), ("state", "TX"), ("zip", "73301")],
            &[
                ("card-number", "4111111111111111"),
                ("expiry", "1227"),
                ("cvv", "123"),
                ("card-name", "Ada Lovelace"),
            ],
        ];
        for fields in steps {
            for (field, value) in fields {
                checkout.apply(CheckoutAction::Input(FormAction::set(*field, *value))).unwrap();
            }
            checkout.apply(CheckoutAction::Next).unwrap();
        }
        checkout.apply(CheckoutAction::Input(FormAction::Check("terms".into()))).unwrap();
        checkout.begin_submit().unwrap();

        app.select(Component::CartSummary);
        let err = app.handle_key(KeyEvent::from(KeyCode::Enter)).unwrap_err();
        assert_eq!(err.downcast_ref::<StateError>(), Some(&StateError::Busy));
        assert!(app.site.checkout.submission().is_pending());
        assert_eq!(app.site.checkout.form().value("first-name"), "Ada");
    }

    #[test]
    fn test_helpers() {
        assert_eq!(next_in(&[1, 2, 3], 3), 1);
        assert_eq!(cycle_option(&[1, 2], None), Some(1));
        assert_eq!(cycle_option(&[1, 2], Some(2)), None);
        assert_eq!(next_category(&["a", "b"], Some("a")).as_deref(), Some("b"));
        assert_eq!(next_option(&[("x", "X"), ("y", "Y")], ""), "x");
        assert_eq!(digit(KeyEvent::from(KeyCode::Char('3'))), Some(2));
        assert_eq!(digit(KeyEvent::from(KeyCode::Char('0'))), None);
    }
}

//! Server-side markup. Every component is a pure function from its state to
//! a [`Markup`] fragment; a page is the components concatenated inside one
//! document.

mod commerce;
mod content;
mod fields;
mod interactive;
mod layout;

use std::fmt;
use std::str::FromStr;

use maud::{html, Markup};
use serde::{Deserialize, Serialize};

use crate::fixtures;
use crate::state::{Carousel, Disclosure, PanelMode, Panels};
use crate::store::PreferenceStore;
use crate::theme::{Palette, SiteTheme};
use crate::widgets::cart::Cart;
use crate::widgets::catalog::{self, BlogListing, Portfolio, ProductGrid, Wishlist};
use crate::widgets::search::SiteSearch;
use crate::widgets::chat::LiveChat;
use crate::widgets::checkout::Checkout;
use crate::widgets::contact::{ContactForm, LoginForm, NewsletterSignup};
use crate::widgets::preferences::{
    AccessibilityWidget, CookieConsent, DarkModeToggle, LanguageSelector, Preference,
};
use crate::widgets::pricing::{BillingPeriod, PricingTable};
use crate::widgets::showcase::{self, Modals, StatsPanel};
use crate::widgets::toast::{ToastPosition, ToastQueue};

pub use layout::document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(format!("unknown layout '{}' (expected grid or list)", other)),
        }
    }
}

/// Render-time inputs. Anything missing from the config takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub theme: SiteTheme,
    pub layout: Layout,
    pub billing: BillingPeriod,
    pub show_annual_discount: bool,
    pub posts_per_page: usize,
    pub toast_position: ToastPosition,
    /// Auto-dismiss delay for toasts, in milliseconds
    pub dismiss_ms: u64,
    pub autoplay: bool,
    pub accordion_mode: PanelMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: SiteTheme::default(),
            layout: Layout::default(),
            billing: BillingPeriod::default(),
            show_annual_discount: true,
            posts_per_page: catalog::POSTS_PER_PAGE,
            toast_position: ToastPosition::default(),
            dismiss_ms: 5000,
            autoplay: true,
            accordion_mode: PanelMode::default(),
        }
    }
}

/// Every component that can be rendered by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    Navbar,
    Hero,
    Features,
    Team,
    Footer,
    PricingTable,
    ProductGrid,
    BlogListing,
    Portfolio,
    SiteSearch,
    CartSummary,
    CheckoutForm,
    Accordion,
    Tabs,
    Testimonials,
    Stats,
    Modal,
    LiveChat,
    Toasts,
    ContactForm,
    Newsletter,
    LoginForm,
    Accessibility,
    CookieConsent,
    DarkMode,
    LanguageSelector,
}

impl Component {
    pub const ALL: [Component; 26] = [
        Self::Navbar,
        Self::Hero,
        Self::Features,
        Self::Team,
        Self::Footer,
        Self::PricingTable,
        Self::ProductGrid,
        Self::BlogListing,
        Self::Portfolio,
        Self::SiteSearch,
        Self::CartSummary,
        Self::CheckoutForm,
        Self::Accordion,
        Self::Tabs,
        Self::Testimonials,
        Self::Stats,
        Self::Modal,
        Self::LiveChat,
        Self::Toasts,
        Self::ContactForm,
        Self::Newsletter,
        Self::LoginForm,
        Self::Accessibility,
        Self::CookieConsent,
        Self::DarkMode,
        Self::LanguageSelector,
    ];

    /// Order of the full demo page.
    pub const PAGE: [Component; 26] = Self::ALL;

    pub fn name(self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Hero => "hero",
            Self::Features => "features",
            Self::Team => "team",
            Self::Footer => "footer",
            Self::PricingTable => "pricing-table",
            Self::ProductGrid => "product-grid",
            Self::BlogListing => "blog-listing",
            Self::Portfolio => "portfolio",
            Self::SiteSearch => "search-bar",
            Self::CartSummary => "cart-summary",
            Self::CheckoutForm => "checkout-form",
            Self::Accordion => "accordion",
            Self::Tabs => "tabs",
            Self::Testimonials => "testimonials",
            Self::Stats => "stats",
            Self::Modal => "modal",
            Self::LiveChat => "live-chat",
            Self::Toasts => "toasts",
            Self::ContactForm => "contact-form",
            Self::Newsletter => "newsletter",
            Self::LoginForm => "login-form",
            Self::Accessibility => "accessibility",
            Self::CookieConsent => "cookie-consent",
            Self::DarkMode => "dark-mode",
            Self::LanguageSelector => "language-selector",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Navbar => "Site navigation with a collapsible mobile menu",
            Self::Hero => "Greeting banner in the selected language",
            Self::Features => "Feature cards",
            Self::Team => "Team member cards",
            Self::Footer => "Site footer",
            Self::PricingTable => "Plans with a monthly/annual billing toggle",
            Self::ProductGrid => "Filterable, sortable products with a wishlist",
            Self::BlogListing => "Searchable, paginated blog posts",
            Self::Portfolio => "Project showcase filtered by category",
            Self::SiteSearch => "Site search with type filters and popular suggestions",
            Self::CartSummary => "Cart with quantities, shipping region and promo codes",
            Self::CheckoutForm => "Four-step checkout with per-step validation",
            Self::Accordion => "FAQ accordion",
            Self::Tabs => "Tabbed content",
            Self::Testimonials => "Testimonial slider with autoplay",
            Self::Stats => "Animated statistic counters",
            Self::Modal => "Modal dialogs",
            Self::LiveChat => "Support chat window",
            Self::Toasts => "Toast notifications",
            Self::ContactForm => "Contact form with a character counter",
            Self::Newsletter => "Newsletter signup",
            Self::LoginForm => "Sign-in and password reset",
            Self::Accessibility => "Text size and accessibility toggles",
            Self::CookieConsent => "Cookie banner and category settings",
            Self::DarkMode => "Light/auto/dark theme switcher",
            Self::LanguageSelector => "Language dropdown",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| format!("unknown component '{}' (see --list)", s))
    }
}

/// The state of every component on one page.
#[derive(Debug, Clone)]
pub struct Site {
    pub options: RenderOptions,
    pub palette: Palette,
    pub navbar: Disclosure,
    pub pricing: PricingTable,
    pub products: ProductGrid,
    pub wishlist: Wishlist,
    pub blog: BlogListing,
    pub portfolio: Portfolio,
    pub search: SiteSearch,
    pub cart: Cart,
    pub checkout: Checkout,
    pub faq: Panels,
    pub tabs: Carousel,
    pub testimonials: Carousel,
    pub stats: StatsPanel,
    pub modals: Modals,
    pub chat: LiveChat,
    pub toasts: ToastQueue,
    pub contact: ContactForm,
    pub newsletter: NewsletterSignup,
    pub login: LoginForm,
    pub accessibility: AccessibilityWidget,
    pub cookies: CookieConsent,
    pub dark_mode: DarkModeToggle,
    pub language: LanguageSelector,
}

impl Site {
    /// Fresh view-state with persisted preferences read from `store`.
    pub fn new(options: RenderOptions, store: &dyn PreferenceStore, prefers_dark: bool) -> Self {
        let cart = Cart::sample(&[1, 2, 1]);
        let totals = cart.totals();
        Self {
            palette: options.theme.palette(),
            navbar: showcase::mobile_menu(),
            pricing: PricingTable::new(fixtures::plans(), options.billing),
            products: catalog::product_grid(),
            wishlist: Wishlist::load_from(store),
            blog: catalog::blog_listing(options.posts_per_page),
            portfolio: catalog::portfolio(),
            search: SiteSearch::default(),
            cart,
            checkout: Checkout::from_cart(&totals),
            faq: showcase::faq_accordion(options.accordion_mode),
            tabs: showcase::tab_strip(),
            testimonials: showcase::testimonial_slider(options.autoplay),
            stats: StatsPanel::default(),
            modals: Modals::default(),
            chat: LiveChat::default(),
            toasts: ToastQueue::new(
                options.toast_position,
                std::time::Duration::from_millis(options.dismiss_ms),
            ),
            contact: ContactForm::default(),
            newsletter: NewsletterSignup::default(),
            login: LoginForm::default(),
            accessibility: AccessibilityWidget::load(store),
            cookies: CookieConsent::load(store),
            dark_mode: DarkModeToggle::load(store, prefers_dark),
            language: LanguageSelector::load(store),
            options,
        }
    }

    /// Classes on `<body>`: colour scheme, site theme and accessibility flags.
    pub fn body_classes(&self) -> String {
        let mut classes = vec![
            self.dark_mode.scheme().body_class().to_string(),
            format!("theme-{}", self.options.theme.as_str()),
        ];
        classes.extend(
            self.accessibility
                .settings()
                .body_classes()
                .into_iter()
                .map(str::to_string),
        );
        classes.join(" ")
    }
}

pub fn render_component(component: Component, site: &Site) -> Markup {
    match component {
        Component::Navbar => layout::navbar(site),
        Component::Hero => layout::hero(site),
        Component::Features => layout::features(),
        Component::Team => layout::team(),
        Component::Footer => layout::footer(),
        Component::PricingTable => commerce::pricing(site),
        Component::ProductGrid => commerce::products(site),
        Component::BlogListing => content::blog(site),
        Component::Portfolio => content::portfolio(site),
        Component::SiteSearch => content::search(site),
        Component::CartSummary => commerce::cart(site),
        Component::CheckoutForm => commerce::checkout(site),
        Component::Accordion => content::accordion(site),
        Component::Tabs => content::tabs(site),
        Component::Testimonials => content::testimonials(site),
        Component::Stats => content::stats(site),
        Component::Modal => content::modals(site),
        Component::LiveChat => interactive::chat(site),
        Component::Toasts => interactive::toasts(site),
        Component::ContactForm => interactive::contact(site),
        Component::Newsletter => interactive::newsletter(site),
        Component::LoginForm => interactive::login(site),
        Component::Accessibility => interactive::accessibility(site),
        Component::CookieConsent => interactive::cookie_consent(site),
        Component::DarkMode => interactive::dark_mode(site),
        Component::LanguageSelector => interactive::language(site),
    }
}

/// Fragments concatenated in order, without a surrounding document.
pub fn fragments(components: &[Component], site: &Site) -> Markup {
    html! {
        @for c in components {
            (render_component(*c, site))
        }
    }
}

/// A full HTML document holding the given components.
pub fn page(components: &[Component], site: &Site) -> Markup {
    let title = match components {
        [single] => format!("TuskPHP · {}", single.name()),
        _ => "TuskPHP Components".to_string(),
    };
    document(&title, site, fragments(components, site))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::widgets::preferences::{AccessibilityFlag, AccessibilitySettings};

    fn site() -> Site {
        Site::new(RenderOptions::default(), &MemoryStore::new(), false)
    }

    #[test]
    fn test_component_names_round_trip() {
        for c in Component::ALL {
            assert_eq!(c.name().parse::<Component>().unwrap(), c);
        }
        assert_eq!("Pricing_Table".parse::<Component>().unwrap(), Component::PricingTable);
        assert!("carousel".parse::<Component>().is_err());
    }

    #[test]
    fn test_component_names_unique() {
        let mut names: Vec<&str> = Component::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Component::ALL.len());
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("LIST".parse::<Layout>().unwrap(), Layout::List);
        assert!("masonry".parse::<Layout>().is_err());
    }

    #[test]
    fn test_every_component_renders() {
        let site = site();
        for c in Component::ALL {
            let html = render_component(c, &site).into_string();
            assert!(!html.is_empty(), "{} rendered nothing", c);
        }
    }

    #[test]
    fn test_page_is_a_document() {
        let html = page(&[Component::Hero, Component::Footer], &site()).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("--tusk-primary"));
        assert!(html.find("id=\"hero\"").unwrap() < html.find("site-footer").unwrap());
    }

    #[test]
    fn test_body_classes_follow_preferences() {
        let store = MemoryStore::new();
        let settings = AccessibilitySettings {
            high_contrast: true,
            ..Default::default()
        };
        settings.save_to(&store).unwrap();

        let site = Site::new(RenderOptions::default(), &store, true);
        let classes = site.body_classes();
        assert!(classes.contains("dark-mode"));
        assert!(classes.contains("theme-default"));
        assert!(classes.contains(AccessibilityFlag::HighContrast.body_class()));
    }

    #[test]
    fn test_options_feed_the_site() {
        let options = RenderOptions {
            billing: BillingPeriod::Annual,
            posts_per_page: 2,
            autoplay: false,
            ..Default::default()
        };
        let site = Site::new(options, &MemoryStore::new(), false);
        assert_eq!(site.pricing.period(), BillingPeriod::Annual);
        assert_eq!(site.blog.visible().count(), 2);
        assert!(!site.testimonials.is_playing());
    }
}

//! Terminal view of each component's state.
//!
//! The browser markup lives in `render`; these lines are what the
//! playground shows next to the component list while keys drive it.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::app::App;
use crate::fixtures::{self, NAV_LINKS};
use crate::money::Money;
use crate::render::Component;
use crate::state::PanelMode;
use crate::theme::Theme;
use crate::widgets::catalog::category_label;
use crate::widgets::chat::{Sender, QUICK_MESSAGES};
use crate::widgets::checkout::{STEP_TITLES, TOTAL_STEPS};
use crate::widgets::contact::{LoginView, MESSAGE_MAX};
use crate::widgets::form::{FieldKind, Submission};
use crate::widgets::preferences::{AccessibilityFlag, CookieCategory, Language, ThemePreference};
use crate::widgets::pricing::annual_savings_percent;
use crate::widgets::search::{highlight, Dropdown};

fn heading(t: &Theme, text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(t.header).add_modifier(Modifier::BOLD),
    ))
}

fn kv(t: &Theme, key: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(t.text_dim)),
        Span::styled(value.into(), Style::default().fg(t.text)),
    ])
}

/// A list row, highlighted when the cursor is on it.
fn row(t: &Theme, selected: bool, text: impl Into<String>) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let style = if selected {
        Style::default().bg(t.bg_selected).fg(t.text)
    } else {
        Style::default().fg(t.text)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(t.accent)),
        Span::styled(text.into(), style),
    ])
}

fn check(t: &Theme, key: Option<usize>, on: bool, label: &str) -> Line<'static> {
    let key = key.map_or_else(|| "   ".to_string(), |k| format!("{}) ", k + 1));
    let (mark, color) = if on { ("[x]", t.success) } else { ("[ ]", t.text_dim) };
    Line::from(vec![
        Span::styled(format!("  {}", key), Style::default().fg(t.accent)),
        Span::styled(mark, Style::default().fg(color)),
        Span::styled(format!(" {}", label), Style::default().fg(t.text)),
    ])
}

fn submission(t: &Theme, s: &Submission) -> Option<Line<'static>> {
    let (text, color) = match s {
        Submission::Idle => return None,
        Submission::Submitting => ("⏳ Sending...".to_string(), t.warning),
        Submission::Completed(text) if text.is_empty() => ("✓ Done".to_string(), t.success),
        Submission::Completed(text) => (format!("✓ {}", text), t.success),
        Submission::Failed(text) => (format!("✗ {}", text), t.danger),
    };
    Some(Line::from(Span::styled(text, Style::default().fg(color))))
}

fn form_lines(app: &App, component: Component, lines: &mut Vec<Line<'static>>) {
    let t = &app.theme;
    let Some((form, ids)) = app.form_inputs(component) else {
        return;
    };
    for (i, id) in ids.iter().enumerate() {
        let Some(spec) = form.spec(id) else { continue };
        let selected = i == app.cursor.min(ids.len().saturating_sub(1));
        let value = form.value(id);
        let shown = match spec.kind {
            FieldKind::Checkbox => {
                let mark = if form.is_checked(id) { "[x]" } else { "[ ]" };
                format!("{} {}", mark, spec.label)
            }
            FieldKind::Password if !app.site.login.password_visible() => {
                format!("{}: {}", spec.label, "•".repeat(value.chars().count()))
            }
            FieldKind::Select(options) => {
                let label = options
                    .iter()
                    .find(|(code, _)| *code == value)
                    .map_or("Select...", |(_, label)| *label);
                format!("{}: ‹{}›", spec.label, label)
            }
            _ => format!("{}: {}", spec.label, value),
        };
        let required = if spec.required { " *" } else { "" };
        let mut line = row(t, selected, format!("{}{}", shown, required));
        if form.is_flagged(id) {
            line.spans
                .push(Span::styled("  ✗ invalid", Style::default().fg(t.danger)));
        }
        lines.push(line);
    }
}

/// Body lines for the selected component.
pub fn body(app: &App) -> Vec<Line<'static>> {
    let t = &app.theme;
    let site = &app.site;
    let component = app.component();
    let mut lines = Vec::new();

    match component {
        Component::Navbar => {
            let state = if site.navbar.is_open() { "open" } else { "closed" };
            lines.push(kv(t, "Mobile menu", state));
            lines.push(Line::from(""));
            for (label, href) in NAV_LINKS {
                lines.push(kv(t, label, *href));
            }
        }
        Component::Hero => {
            let (title, text) = site.language.selected().greeting();
            lines.push(heading(t, title));
            lines.push(Line::from(text));
        }
        Component::Features => {
            for feature in fixtures::features() {
                lines.push(heading(t, format!("{} {}", feature.icon, feature.title)));
                lines.push(Line::from(format!("  {}", feature.description)));
            }
        }
        Component::Team => {
            for member in fixtures::team() {
                lines.push(kv(t, member.name, member.role));
            }
        }
        Component::Footer => {
            let links: Vec<&str> = NAV_LINKS.iter().map(|(label, _)| *label).collect();
            lines.push(Line::from(links.join(" · ")));
            lines.push(Line::from("© 2024 TuskPHP. All rights reserved."));
        }
        Component::PricingTable => {
            let pricing = &site.pricing;
            lines.push(kv(t, "Billing", pricing.period().as_str()));
            lines.push(Line::from(""));
            for (i, plan) in pricing.plans().iter().enumerate() {
                let mut text = format!("{:<12} {}{}", plan.name, pricing.price(plan), pricing.period().unit());
                if let Some(monthly) = pricing.monthly_equivalent(plan) {
                    text.push_str(&format!("  ({}/mo, save {}%)", monthly, annual_savings_percent(plan)));
                }
                if plan.popular {
                    text.push_str("  ★ popular");
                }
                if pricing.selected().is_some_and(|(id, _)| id == plan.id) {
                    text.push_str("  ✓ selected");
                }
                lines.push(row(t, i == app.cursor, text));
            }
        }
        Component::ProductGrid => {
            let grid = &site.products;
            lines.push(kv(t, "Category", grid.category().unwrap_or("all")));
            lines.push(kv(t, "Sort", grid.sort().map_or("Featured", |s| s.label())));
            lines.push(kv(t, "Search", grid.search()));
            lines.push(Line::from(""));
            if grid.matching_len() == 0 {
                lines.push(Line::from(Span::styled(
                    "  No products found",
                    Style::default().fg(t.text_dim),
                )));
            }
            for (i, product) in grid.visible().enumerate() {
                let heart = if site.wishlist.contains(product.id) { "♥" } else { "♡" };
                let price = match product.sale_price {
                    Some(sale) => format!("{} (was {})", sale, product.price),
                    None => product.price.to_string(),
                };
                let stock = if product.in_stock { "" } else { "  out of stock" };
                lines.push(row(
                    t,
                    i == app.cursor,
                    format!("{} {:<26} {}  ★{}{}", heart, product.name, price, product.rating_label(), stock),
                ));
            }
            lines.push(Line::from(""));
            lines.push(kv(t, "Wishlist", site.wishlist.len().to_string()));
        }
        Component::BlogListing => {
            let blog = &site.blog;
            let pager = blog.pager();
            lines.push(kv(t, "Category", blog.category().unwrap_or("all")));
            lines.push(kv(t, "Sort", blog.sort().map_or("Newest", |s| s.label())));
            lines.push(kv(t, "Search", blog.search()));
            lines.push(Line::from(""));
            for post in blog.visible() {
                let trending = if post.trending { " 🔥" } else { "" };
                lines.push(heading(t, format!("{} {}{}", post.icon, post.title, trending)));
                lines.push(Line::from(format!(
                    "  {} · {} · {} min read",
                    post.category, post.date, post.read_minutes
                )));
            }
            if blog.matching_len() == 0 {
                lines.push(Line::from("  No posts found matching your criteria."));
            }
            lines.push(Line::from(""));
            lines.push(kv(t, "Page", format!("{} of {}", pager.page(), pager.total_pages())));
        }
        Component::Portfolio => {
            let work = &site.portfolio;
            let category = work.category().map_or_else(|| "All Projects".to_string(), category_label);
            lines.push(kv(t, "Category", category));
            lines.push(kv(t, "Sort", work.sort().map_or("Default", |s| s.label())));
            lines.push(Line::from(""));
            for (i, item) in work.matching().enumerate() {
                let star = if item.featured { "★" } else { " " };
                lines.push(row(
                    t,
                    i == app.cursor,
                    format!("{} {:<26} {:<18} {}", star, item.title, item.client, item.year),
                ));
                if i == app.cursor {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", item.technologies.join(", ")),
                        Style::default().fg(t.text_dim),
                    )));
                }
            }
        }
        Component::SiteSearch => {
            let search = &site.search;
            lines.push(kv(t, "Query", search.query()));
            lines.push(kv(t, "Filter", search.filter()));
            lines.push(Line::from(""));
            match search.dropdown() {
                Dropdown::Hidden => lines.push(Line::from(Span::styled(
                    "  Type at least two characters to search",
                    Style::default().fg(t.text_dim),
                ))),
                Dropdown::Suggestions => {
                    lines.push(heading(t, "Popular Searches"));
                    for (i, suggestion) in search.suggestions().iter().enumerate() {
                        lines.push(Line::from(format!("  {}) {}", i + 1, suggestion)));
                    }
                }
                Dropdown::Results => {
                    lines.push(heading(t, search.count_label()));
                    for entry in search.results() {
                        let mut spans = vec![Span::raw("  ")];
                        for (run, hit) in highlight(entry.title, search.query()) {
                            let style = if hit {
                                Style::default().fg(t.warning).add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(t.text)
                            };
                            spans.push(Span::styled(run.to_string(), style));
                        }
                        lines.push(Line::from(spans));
                        lines.push(Line::from(Span::styled(
                            format!("    {}", entry.url),
                            Style::default().fg(t.text_dim),
                        )));
                    }
                }
            }
        }
        Component::CartSummary => {
            let cart = &site.cart;
            if cart.is_empty() {
                lines.push(Line::from("  Your cart is empty"));
            }
            for (i, item) in cart.items().iter().enumerate() {
                lines.push(row(
                    t,
                    i == app.cursor,
                    format!("{} {:<24} ×{:<3} {}", item.icon, item.name, item.quantity, item.line_total()),
                ));
            }
            let totals = cart.totals();
            lines.push(Line::from(""));
            lines.push(kv(t, "Region", cart.region().label()));
            if let Some(promo) = cart.promo() {
                lines.push(kv(t, "Promo", format!("{} ({})", promo.code, promo.description)));
            }
            lines.push(kv(t, "Subtotal", totals.subtotal.to_string()));
            if totals.discount.as_cents() > 0 {
                lines.push(kv(t, "Discount", format!("-{}", totals.discount)));
            }
            lines.push(kv(t, "Shipping", totals.shipping.to_string()));
            lines.push(kv(t, "Tax", totals.tax.to_string()));
            lines.push(kv(t, "Total", totals.total.to_string()));
        }
        Component::CheckoutForm => {
            let checkout = &site.checkout;
            let steps: Vec<String> = STEP_TITLES
                .iter()
                .enumerate()
                .map(|(i, title)| {
                    if i + 1 == checkout.step() {
                        format!("[{}]", title)
                    } else {
                        title.to_string()
                    }
                })
                .collect();
            lines.push(heading(t, format!("Step {} of {}", checkout.step(), TOTAL_STEPS)));
            lines.push(Line::from(steps.join(" → ")));
            lines.push(Line::from(""));
            match checkout.step() {
                2 => lines.push(kv(t, "Shipping", checkout.shipping().label())),
                3 => lines.push(kv(t, "Payment", checkout.payment().label())),
                4 => {
                    let review = checkout.review();
                    for text in review.contact.iter().chain(review.shipping.iter()) {
                        lines.push(Line::from(format!("  {}", text)));
                    }
                    lines.push(Line::from(format!("  {}", review.payment)));
                }
                _ => {}
            }
            form_lines(app, component, &mut lines);
            lines.push(Line::from(""));
            lines.push(kv(t, "Subtotal", checkout.subtotal().to_string()));
            if checkout.discount() > Money::ZERO {
                lines.push(kv(t, "Discount", format!("-{}", checkout.discount())));
            }
            lines.push(kv(t, "Shipping", checkout.shipping_cost().to_string()));
            lines.push(kv(t, "Tax", checkout.tax().to_string()));
            lines.push(kv(t, "Total", checkout.total().to_string()));
            lines.extend(submission(t, checkout.submission()));
        }
        Component::Accordion => {
            let panels = &site.faq;
            let mode = match panels.mode() {
                PanelMode::Multiple => "multiple",
                PanelMode::Single => "single",
            };
            lines.push(kv(t, "Mode", mode));
            lines.push(Line::from(""));
            for (i, entry) in fixtures::faq().iter().enumerate() {
                let icon = if panels.is_open(i) { "−" } else { "+" };
                lines.push(row(t, i == panels.focus(), format!("{} {}", icon, entry.title)));
                if panels.is_open(i) {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", entry.body),
                        Style::default().fg(t.text_dim),
                    )));
                }
            }
        }
        Component::Tabs => {
            let current = site.tabs.index();
            let tabs = fixtures::tabs();
            let titles: Vec<Span<'static>> = tabs
                .iter()
                .enumerate()
                .map(|(i, tab)| {
                    let style = if i == current {
                        Style::default().fg(t.accent).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(t.text_dim)
                    };
                    Span::styled(format!(" {} ", tab.title), style)
                })
                .collect();
            lines.push(Line::from(titles));
            lines.push(Line::from(""));
            if let Some(tab) = tabs.get(current) {
                lines.push(heading(t, tab.heading));
                lines.push(Line::from(tab.body));
            }
        }
        Component::Testimonials => {
            let slider = &site.testimonials;
            let state = if slider.is_playing() { "▶ playing" } else { "⏸ paused" };
            lines.push(kv(t, "Slide", slider.counter()));
            lines.push(kv(t, "Autoplay", state));
            lines.push(Line::from(""));
            if let Some(item) = fixtures::testimonials().get(slider.index()) {
                lines.push(Line::from(format!("“{}”", item.text)));
                lines.push(Line::from(Span::styled(
                    format!("  {} {}, {} at {}", "★".repeat(item.rating.into()), item.name, item.role, item.company),
                    Style::default().fg(t.text_dim),
                )));
            }
        }
        Component::Stats => {
            let stats = &site.stats;
            let state = if stats.is_done() {
                "done"
            } else if stats.is_running() {
                "counting"
            } else {
                "waiting"
            };
            lines.push(kv(t, "Animation", state));
            lines.push(Line::from(""));
            for counter in stats.counters() {
                lines.push(kv(t, counter.spec.label, counter.display()));
            }
        }
        Component::Modal => {
            let modals = &site.modals;
            for (i, spec) in modals.specs().iter().enumerate() {
                lines.push(check(t, Some(i), modals.is_open(spec.id), spec.title));
            }
            lines.push(Line::from(""));
            let locked = if modals.scroll_locked() { "locked" } else { "free" };
            lines.push(kv(t, "Page scroll", locked));
        }
        Component::LiveChat => {
            let chat = &site.chat;
            let state = if chat.window().is_open() { "open" } else { "minimized" };
            lines.push(kv(t, "Window", state));
            lines.push(Line::from(""));
            for message in chat.log() {
                let color = match message.sender {
                    Sender::Visitor => t.accent,
                    Sender::Agent => t.text,
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("{} ", message.sender.avatar())),
                    Span::styled(message.text.clone(), Style::default().fg(color)),
                ]));
            }
            if chat.is_typing() {
                lines.push(Line::from(Span::styled(
                    "  typing...",
                    Style::default().fg(t.text_dim),
                )));
            }
            lines.push(Line::from(""));
            for (i, (label, _)) in QUICK_MESSAGES.iter().enumerate() {
                lines.push(kv(t, &format!("{})", i + 1), *label));
            }
        }
        Component::Toasts => {
            let toasts = &site.toasts;
            let auto = if toasts.auto_dismiss() { "on" } else { "off" };
            lines.push(kv(t, "Position", toasts.position().as_str()));
            lines.push(kv(t, "Auto-dismiss", auto));
            lines.push(Line::from(""));
            for toast in toasts.stacked() {
                let color = match toast.kind.as_str() {
                    "success" => t.success,
                    "error" => t.danger,
                    "warning" => t.warning,
                    _ => t.accent,
                };
                let remaining = toast
                    .remaining
                    .map_or_else(String::new, |d| format!("  {:.1}s", d.as_secs_f32()));
                lines.push(Line::from(vec![
                    Span::styled(format!("{} {}", toast.kind.icon(), toast.title), Style::default().fg(color)),
                    Span::styled(format!(": {}{}", toast.message, remaining), Style::default().fg(t.text_dim)),
                ]));
            }
        }
        Component::ContactForm => {
            form_lines(app, component, &mut lines);
            let count_color = if site.contact.near_limit() { t.warning } else { t.text_dim };
            lines.push(Line::from(Span::styled(
                format!("  {}/{}", site.contact.char_count(), MESSAGE_MAX),
                Style::default().fg(count_color),
            )));
            lines.extend(submission(t, site.contact.submission()));
        }
        Component::Newsletter => {
            form_lines(app, component, &mut lines);
            lines.extend(submission(t, site.newsletter.submission()));
        }
        Component::LoginForm => {
            let view = match site.login.view() {
                LoginView::SignIn => "Sign in",
                LoginView::ForgotPassword => "Reset password",
            };
            lines.push(heading(t, view));
            form_lines(app, component, &mut lines);
            lines.extend(submission(t, site.login.submission()));
        }
        Component::Accessibility => {
            let widget = &site.accessibility;
            let state = if widget.panel().is_open() { "open" } else { "closed" };
            lines.push(kv(t, "Panel", state));
            lines.push(kv(t, "Text size", format!("{}%", widget.settings().text_size)));
            lines.push(Line::from(""));
            for (i, flag) in AccessibilityFlag::ALL.iter().enumerate() {
                lines.push(check(t, Some(i), widget.settings().get(*flag), flag.label()));
            }
            if let Some(text) = widget.announcement() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  📢 {}", text),
                    Style::default().fg(t.warning),
                )));
            }
        }
        Component::CookieConsent => {
            let cookies = &site.cookies;
            let banner = if cookies.show_banner() { "shown" } else { "hidden" };
            lines.push(kv(t, "Banner", banner));
            lines.push(check(t, None, true, "Essential (always on)"));
            for (i, category) in CookieCategory::ALL.iter().enumerate() {
                lines.push(check(t, Some(i), cookies.prefs().get(*category), category.label()));
            }
            if cookies.settings().is_open() {
                lines.push(kv(t, "Settings", "open"));
            }
            if let Some(notice) = cookies.notice() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", notice),
                    Style::default().fg(t.success),
                )));
            }
        }
        Component::DarkMode => {
            let toggle = &site.dark_mode;
            for (i, pref) in ThemePreference::ALL.iter().enumerate() {
                lines.push(check(t, Some(i), toggle.preference() == *pref, pref.label()));
            }
            lines.push(Line::from(""));
            lines.push(kv(t, "Status", toggle.status()));
            let system = if app.config.prefers_dark { "dark" } else { "light" };
            lines.push(kv(t, "System", system));
        }
        Component::LanguageSelector => {
            let selector = &site.language;
            let state = if selector.dropdown().is_open() { "open" } else { "closed" };
            lines.push(kv(t, "Dropdown", state));
            lines.push(Line::from(""));
            for (i, lang) in Language::ALL.iter().enumerate() {
                let current = if *lang == selector.selected() { "  ✓" } else { "" };
                lines.push(row(
                    t,
                    i == app.cursor,
                    format!("{} {} ({}){}", lang.flag(), lang.native_name(), lang.name(), current),
                ));
            }
        }
    }
    lines
}

/// Footer key hints for the focused component.
pub fn hints(component: Component) -> &'static [(&'static str, &'static str)] {
    match component {
        Component::Navbar => &[("Space", "menu")],
        Component::Hero | Component::Features | Component::Team | Component::Footer => &[("v", "markup")],
        Component::PricingTable => &[("←/→", "period"), ("↑/↓", "plan"), ("Enter", "select")],
        Component::ProductGrid => &[("←/→", "category"), ("s", "sort"), ("/", "search"), ("w", "wishlist")],
        Component::BlogListing => &[("←/→", "page"), ("f", "category"), ("s", "sort"), ("/", "search")],
        Component::Portfolio => &[("←/→", "category"), ("s", "sort"), ("Enter", "view"), ("c", "clear")],
        Component::SiteSearch => &[("/", "query"), ("←/→", "filter"), ("1-6", "suggestion"), ("c", "clear")],
        Component::CartSummary => &[("+/-", "qty"), ("x", "remove"), ("r", "region"), ("p", "promo"), ("Enter", "checkout")],
        Component::CheckoutForm => &[("↑/↓", "field"), ("Enter", "edit"), ("n/←", "step"), ("m", "shipping"), ("y", "payment"), ("s", "order")],
        Component::Accordion => &[("↑/↓", "focus"), ("Enter", "toggle"), ("e/c", "all"), ("m", "mode")],
        Component::Tabs => &[("←/→", "tab"), ("1-4", "jump")],
        Component::Testimonials => &[("←/→", "slide"), ("Space", "play")],
        Component::Stats => &[("Space", "start"), ("f", "finish"), ("r", "reset")],
        Component::Modal => &[("1-3", "open"), ("Esc", "close")],
        Component::LiveChat => &[("Enter", "message"), ("1-4", "quick"), ("Space", "window")],
        Component::Toasts => &[("1-5", "show"), ("d/D", "dismiss"), ("a", "auto")],
        Component::ContactForm | Component::Newsletter => &[("↑/↓", "field"), ("Enter", "edit"), ("s", "send")],
        Component::LoginForm => &[("↑/↓", "field"), ("Enter", "edit"), ("p", "password"), ("f", "forgot"), ("s", "submit")],
        Component::Accessibility => &[("+/-", "text"), ("1-6", "toggle"), ("r", "reset"), ("s", "save")],
        Component::CookieConsent => &[("a", "accept"), ("r", "reject"), ("1-3", "toggle"), ("s", "save"), ("x", "reset")],
        Component::DarkMode => &[("1-3", "choose"), ("Space", "flip"), ("p", "system"), ("s", "save")],
        Component::LanguageSelector => &[("↑/↓", "move"), ("Enter", "select"), ("Space", "dropdown")],
    }
}

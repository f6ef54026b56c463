use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::Site;
use crate::fixtures::{self, NAV_LINKS};

pub fn document(title: &str, site: &Site, body: Markup) -> Markup {
    let text_size = site.accessibility.settings().text_size;
    html! {
        (DOCTYPE)
        html lang=(site.language.selected().code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(format!(":root {{ {} }}", site.palette.css_vars()))) }
            }
            body class=(site.body_classes())
                data-theme=(site.options.theme.as_str())
                data-layout=(site.options.layout.as_str())
                style=(format!("font-size: {}%", text_size))
                data-scroll-locked=[site.modals.scroll_locked().then_some("true")]
            {
                (body)
            }
        }
    }
}

pub(super) fn navbar(site: &Site) -> Markup {
    let menu = site.navbar;
    html! {
        nav.navbar #navbar aria-label="Main navigation" {
            a.nav-brand href="#home" { "🐘 TuskPHP" }
            button.nav-toggle type="button" aria-label="Toggle navigation"
                aria-controls="nav-menu" aria-expanded=(menu.aria_expanded())
            {
                span.hamburger {}
            }
            ul.nav-menu.active[menu.is_open()] #nav-menu {
                @for (label, href) in NAV_LINKS {
                    li { a.nav-link href=(href) { (label) } }
                }
            }
        }
    }
}

pub(super) fn hero(site: &Site) -> Markup {
    let (title, text) = site.language.selected().greeting();
    html! {
        section.hero #hero {
            div.hero-content {
                h1.hero-title { (title) }
                p.hero-subtitle { (text) }
                div.hero-actions {
                    a.btn.btn-primary href="#pricing" { "Get Started" }
                    a.btn.btn-secondary href="#features" { "Learn More" }
                }
            }
        }
    }
}

pub(super) fn features() -> Markup {
    html! {
        section.features #features {
            h2.section-title { "Why TuskPHP?" }
            div.features-grid {
                @for feature in fixtures::features() {
                    div.feature-card {
                        div.feature-icon { (feature.icon) }
                        h3 { (feature.title) }
                        p { (feature.description) }
                    }
                }
            }
        }
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace().filter_map(|w| w.chars().next()).collect()
}

pub(super) fn team() -> Markup {
    html! {
        section.team #about {
            h2.section-title { "Meet the Team" }
            div.team-grid {
                @for member in fixtures::team() {
                    div.team-member {
                        div.member-avatar aria-hidden="true" { (initials(member.name)) }
                        h3.member-name { (member.name) }
                        p.member-role { (member.role) }
                        p.member-bio { (member.bio) }
                    }
                }
            }
        }
    }
}

pub(super) fn footer() -> Markup {
    html! {
        footer.site-footer {
            div.footer-links {
                @for (label, href) in NAV_LINKS {
                    a href=(href) { (label) }
                }
            }
            p.copyright { "© 2024 TuskPHP. All rights reserved." }
        }
    }
}

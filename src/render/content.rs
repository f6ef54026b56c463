use maud::{html, Markup};

use super::commerce::stars;
use super::Site;
use crate::fixtures;
use crate::state::PanelMode;
use crate::widgets::catalog::{category_label, format_date, PostSort};
use crate::widgets::search::{highlight, Dropdown, FILTERS};

fn views(n: u32) -> String {
    if n >= 1000 {
        format!("{:.1}K", f64::from(n) / 1000.0)
    } else {
        n.to_string()
    }
}

pub(super) fn blog(site: &Site) -> Markup {
    let blog = &site.blog;
    let pager = blog.pager();
    let category = blog.category();
    html! {
        section.blog-listing #blog {
            div.blog-controls {
                input.blog-search #blog-search type="search" placeholder="Search posts..."
                    aria-label="Search posts" value=(blog.search());
                select #blog-sort aria-label="Sort posts" {
                    @for sort in PostSort::ALL {
                        option value=(sort.value()) selected[blog.sort() == Some(sort)] { (sort.label()) }
                    }
                }
                div.category-filters {
                    button.category-btn.active[category.is_none()] type="button" data-category="all" { "All" }
                    @for cat in blog.categories() {
                        button.category-btn.active[category == Some(cat)] type="button" data-category=(cat) {
                            (cat)
                        }
                    }
                }
            }
            @if blog.matching_len() == 0 {
                div.no-results { p { "No posts found matching your criteria." } }
            }
            div class=(format!("blog-posts layout-{}", site.options.layout.as_str())) {
                @for post in blog.visible() {
                    article.blog-post.trending[post.trending] data-id=(post.id) data-category=(post.category) {
                        div.post-icon { (post.icon) }
                        div.post-content {
                            span.post-category { (post.category) }
                            @if post.trending { span.trending-badge { "🔥 Trending" } }
                            h3.post-title { (post.title) }
                            p.post-excerpt { (post.excerpt) }
                            div.post-meta {
                                span.post-author { "By " (post.author) }
                                time.post-date datetime=(post.date) { (format_date(post.date)) }
                                span.read-time { (post.read_minutes) " min read" }
                                span.post-views { (views(post.views)) " views" }
                            }
                        }
                    }
                }
            }
            @if pager.total_pages() > 1 {
                nav.pagination aria-label="Blog pagination" {
                    button.page-btn type="button" data-page="prev" disabled[!pager.has_prev()] { "← Previous" }
                    @for n in 1..=pager.total_pages() {
                        button.page-btn.active[n == pager.page()] type="button" data-page=(n)
                            aria-current=[(n == pager.page()).then_some("page")] { (n) }
                    }
                    button.page-btn type="button" data-page="next" disabled[!pager.has_next()] { "Next →" }
                }
            }
        }
    }
}

pub(super) fn portfolio(site: &Site) -> Markup {
    let work = &site.portfolio;
    let category = work.category();
    html! {
        section.portfolio #portfolio {
            div.section-header {
                h2.section-title { "Our Work" }
                p.section-subtitle { "Showcasing our latest projects and successful collaborations" }
            }
            div.portfolio-filters role="group" aria-label="Filter projects" {
                button.filter-btn.active[category.is_none()] type="button" data-filter="all"
                    aria-pressed=(category.is_none()) { "All Projects" }
                @for cat in work.categories() {
                    button.filter-btn.active[category == Some(cat)] type="button" data-filter=(cat)
                        aria-pressed=(category == Some(cat)) { (category_label(cat)) }
                }
            }
            div.portfolio-grid {
                @for item in work.matching() {
                    article.portfolio-item.featured[item.featured] data-category=(item.category) data-id=(item.id) {
                        @if item.featured { span.featured-badge { "Featured" } }
                        div.portfolio-content {
                            span.portfolio-category { (category_label(item.category)) }
                            h3.portfolio-title { (item.title) }
                            p.portfolio-client { (item.client) " · " (item.year) }
                            p.portfolio-description { (item.description) }
                            div.portfolio-tech {
                                @for tech in item.technologies { span.tech-tag { (tech) } }
                            }
                            button.btn.btn-outline.view-btn type="button" data-item=(item.id) { "View Project" }
                        }
                    }
                }
            }
            div.portfolio-cta {
                h3 { "Like What You See?" }
                p { "Let's discuss your next project and bring your vision to life" }
                a.btn.btn-primary href="#contact" { "Start Your Project" }
            }
        }
    }
}

fn marked(text: &str, query: &str) -> Markup {
    html! {
        @for (run, hit) in highlight(text, query) {
            @if hit { mark { (run) } } @else { (run) }
        }
    }
}

pub(super) fn search(site: &Site) -> Markup {
    let search = &site.search;
    let query = search.query();
    let dropdown = search.dropdown();
    html! {
        section.search-bar #search role="search" aria-label="Site Search" {
            div.search-header {
                h2.search-title { "Find What You're Looking For" }
                p.search-subtitle { "Search through our content, services, and resources" }
            }
            form.search-form role="search" {
                div.search-input-group {
                    input.search-input type="search" placeholder="What can we help you find?"
                        aria-label="Search" autocomplete="off" value=(query);
                    @if !query.is_empty() {
                        button.search-clear type="button" aria-label="Clear search" { "×" }
                    }
                    button.search-submit type="submit" aria-label="Search" { "Search" }
                }
                div.search-filters {
                    @for (value, label) in FILTERS {
                        @let active = search.filter() == *value;
                        button.filter-btn.active[active] type="button" data-filter=(value)
                            aria-pressed=(active) { (label) }
                    }
                }
            }
            @if dropdown == Dropdown::Suggestions {
                div.search-suggestions {
                    div.suggestions-header { h4 { "Popular Searches" } }
                    div.suggestions-list {
                        @for suggestion in search.suggestions() {
                            button.suggestion-item type="button" data-suggestion=(suggestion) { (suggestion) }
                        }
                    }
                }
            }
            @if dropdown == Dropdown::Results {
                @let results = search.results();
                div.search-results aria-live="polite" {
                    div.results-header {
                        h4 { "Search Results" }
                        span.results-count { (search.count_label()) }
                    }
                    @if results.is_empty() {
                        div.no-results {
                            h4 { "No results found" }
                            p { "Try adjusting your search terms or browse our categories" }
                        }
                    } @else {
                        div.results-list {
                            @for entry in &results {
                                a.result-item href=(entry.url) data-category=(entry.category) {
                                    div.result-title { (marked(entry.title, query)) }
                                    div.result-description { (marked(entry.description, query)) }
                                    div.result-url { (entry.url) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn accordion(site: &Site) -> Markup {
    let panels = &site.faq;
    let mode = match panels.mode() {
        PanelMode::Multiple => "multiple",
        PanelMode::Single => "single",
    };
    html! {
        section.accordion #faq data-mode=(mode) {
            h2.section-title { "Frequently Asked Questions" }
            @for (i, entry) in fixtures::faq().iter().enumerate() {
                @let open = panels.is_open(i);
                div.accordion-item.active[open] {
                    button.accordion-header.focused[i == panels.focus()] type="button"
                        id=(format!("faq-header-{}", i))
                        aria-expanded=(open)
                        aria-controls=(format!("faq-panel-{}", i))
                    {
                        span.accordion-title { (entry.title) }
                        span.accordion-icon aria-hidden="true" { @if open { "−" } @else { "+" } }
                    }
                    div.accordion-content id=(format!("faq-panel-{}", i)) role="region"
                        aria-labelledby=(format!("faq-header-{}", i)) hidden[!open]
                    {
                        p { (entry.body) }
                    }
                }
            }
        }
    }
}

pub(super) fn tabs(site: &Site) -> Markup {
    let current = site.tabs.index();
    html! {
        div.tabs #feature-tabs {
            div.tab-list role="tablist" {
                @for (i, tab) in fixtures::tabs().iter().enumerate() {
                    button.tab-btn.active[i == current] type="button" role="tab"
                        id=(format!("tab-{}", tab.id))
                        aria-selected=(i == current)
                        aria-controls=(format!("panel-{}", tab.id))
                        tabindex=(if i == current { "0" } else { "-1" })
                    {
                        (tab.title)
                    }
                }
            }
            @for (i, tab) in fixtures::tabs().iter().enumerate() {
                div.tab-panel.active[i == current] role="tabpanel" id=(format!("panel-{}", tab.id))
                    aria-labelledby=(format!("tab-{}", tab.id)) hidden[i != current]
                {
                    h3 { (tab.heading) }
                    p { (tab.body) }
                }
            }
        }
    }
}

pub(super) fn testimonials(site: &Site) -> Markup {
    let slider = &site.testimonials;
    let current = slider.index();
    html! {
        section.testimonial-slider #testimonials data-autoplay=(slider.is_playing()) {
            div.slides aria-live=(if slider.is_playing() { "off" } else { "polite" }) {
                @for (i, t) in fixtures::testimonials().iter().enumerate() {
                    div.testimonial.active[i == current] aria-hidden=(i != current) {
                        div.stars aria-label=(format!("{} out of 5 stars", t.rating)) { (stars(t.rating)) }
                        blockquote { (t.text) }
                        div.testimonial-author {
                            strong { (t.name) }
                            span { (t.role) ", " (t.company) }
                        }
                    }
                }
            }
            div.slider-controls {
                button.slider-prev type="button" aria-label="Previous testimonial"
                    disabled[!slider.can_go_prev()] { "‹" }
                span.slide-counter { (slider.counter()) }
                button.slider-next type="button" aria-label="Next testimonial"
                    disabled[!slider.can_go_next()] { "›" }
                button.play-pause type="button" aria-pressed=(slider.is_playing()) {
                    @if slider.is_playing() { "⏸ Pause" } @else { "▶ Play" }
                }
            }
            div.slider-dots {
                @for i in 0..slider.len() {
                    button.dot.active[i == current] type="button" data-slide=(i)
                        aria-label=(format!("Go to testimonial {}", i + 1)) {}
                }
            }
        }
    }
}

pub(super) fn stats(site: &Site) -> Markup {
    let panel = &site.stats;
    html! {
        section.stats-panel #stats data-animated=(panel.is_done()) {
            @for counter in panel.counters() {
                div.stat-item {
                    span.stat-number data-final=(counter.final_display()) { (counter.display()) }
                    span.stat-label { (counter.spec.label) }
                }
            }
        }
    }
}

fn modal_body(id: &str) -> Markup {
    html! {
        @match id {
            "image-modal" => {
                div.gallery-grid {
                    @for icon in ["🏔️", "🌊", "🌅", "🌲"] {
                        div.gallery-item { (icon) }
                    }
                }
            }
            "form-modal" => {
                form.quick-form {
                    input type="text" name="name" placeholder="Your name" aria-label="Your name";
                    input type="email" name="email" placeholder="Your email" aria-label="Your email";
                    textarea name="message" rows="3" placeholder="Message" aria-label="Message" {}
                    button.btn.btn-primary type="submit" { "Send" }
                }
            }
            _ => {
                p { "Build beautiful, accessible pages from ready-made components." }
                p { "Press Escape or the close button to dismiss this dialog." }
            }
        }
    }
}

pub(super) fn modals(site: &Site) -> Markup {
    let modals = &site.modals;
    html! {
        section.modal-demo #modals {
            div.modal-triggers {
                @for spec in modals.specs() {
                    button.btn type="button" data-modal=(spec.id) aria-haspopup="dialog" { (spec.button) }
                }
            }
            @for spec in modals.specs() {
                @let open = modals.is_open(spec.id);
                div.modal-overlay.active[open] id=(spec.id) role="dialog" aria-modal="true"
                    aria-labelledby=(format!("{}-title", spec.id)) hidden[!open]
                {
                    div.modal-content {
                        button.modal-close type="button" data-close=(spec.id) aria-label="Close" { "×" }
                        h2 id=(format!("{}-title", spec.id)) { (spec.title) }
                        (modal_body(spec.id))
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
    use crate::state::listing::ListAction;
    use crate::state::paging::{PageAction, SlideAction};
    use crate::state::toggle::PanelAction;
    use crate::state::Reducer;
    use crate::store::MemoryStore;
    use crate::widgets::showcase::{ModalAction, StatsAction};

    fn site() -> Site {
        Site::new(RenderOptions::default(), &MemoryStore::new(), false)
    }

    #[test]
    fn test_blog_pagination() {
        let mut site = site();
        let html = blog(&site).into_string();
        assert_eq!(html.matches("<article").count(), 4);
        assert!(html.contains("data-page=\"prev\" disabled"));

        site.blog.apply(ListAction::Page(PageAction::Next)).unwrap();
        let html = blog(&site).into_string();
        assert_eq!(html.matches("<article").count(), 2);
        assert!(html.contains("aria-current=\"page\">2</button>"));
    }

    #[test]
    fn test_blog_empty_search() {
        let mut site = site();
        site.blog
            .apply(ListAction::Search("zzzz-no-match".into()))
            .unwrap();
        let html = blog(&site).into_string();
        assert!(html.contains("No posts found"));
        assert!(!html.contains("pagination"));
    }

    #[test]
    fn test_portfolio_filter_buttons() {
        let mut site = site();
        let html = portfolio(&site).into_string();
        assert_eq!(html.matches("<article").count(), 6);
        assert_eq!(html.matches("featured-badge").count(), 3);
        assert!(html.contains(">Mobile Development</button>"));

        site.portfolio
            .apply(ListAction::Filter(Some("design".into())))
            .unwrap();
        let html = portfolio(&site).into_string();
        assert_eq!(html.matches("<article").count(), 1);
        assert!(html.contains("data-item=\"brand-identity\""));
        assert_eq!(html.matches("aria-pressed=\"true\"").count(), 1);
    }

    #[test]
    fn test_search_highlights_matches() {
        use crate::widgets::search::SearchAction;

        let mut site = site();
        let html = search(&site).into_string();
        assert!(!html.contains("search-results"));
        assert!(!html.contains("search-suggestions"));

        site.search.apply(SearchAction::Focus).unwrap();
        let html = search(&site).into_string();
        assert_eq!(html.matches("suggestion-item").count(), 6);

        site.search
            .apply(SearchAction::Type("mobile".into()))
            .unwrap();
        let html = search(&site).into_string();
        assert!(html.contains("1 result found"));
        assert!(html.contains("<mark>Mobile</mark> App Development"));
        assert!(html.contains("href=\"/services/mobile-apps\""));

        site.search
            .apply(SearchAction::Filter("team".into()))
            .unwrap();
        let html = search(&site).into_string();
        assert!(html.contains("No results found"));
    }

    #[test]
    fn test_views_format() {
        assert_eq!(views(950), "950");
        assert_eq!(views(1250), "1.2K");
    }

    #[test]
    fn test_accordion_aria() {
        let mut site = site();
        let html = accordion(&site).into_string();
        assert_eq!(html.matches("aria-expanded=\"true\"").count(), 1);

        site.faq.apply(PanelAction::ExpandAll).unwrap();
        let html = accordion(&site).into_string();
        assert_eq!(html.matches("aria-expanded=\"false\"").count(), 0);
    }

    #[test]
    fn test_tabs_select_one_panel() {
        let mut site = site();
        site.tabs.apply(SlideAction::GoTo(2)).unwrap();
        let html = tabs(&site).into_string();
        assert_eq!(html.matches("aria-selected=\"true\"").count(), 1);
        assert!(html.contains("id=\"tab-pricing\" aria-selected=\"true\""));
    }

    #[test]
    fn test_testimonial_counter() {
        let mut site = site();
        site.testimonials.apply(SlideAction::Next).unwrap();
        let html = testimonials(&site).into_string();
        assert!(html.contains("2 / 4"));
        assert!(html.contains("data-autoplay=\"true\""));
    }

    #[test]
    fn test_stats_show_final_values_when_done() {
        let mut site = site();
        site.stats.apply(StatsAction::Finish).unwrap();
        let html = stats(&site).into_string();
        assert!(html.contains("data-animated=\"true\""));
        assert!(html.contains(">15,000+<"));
    }

    #[test]
    fn test_modal_open_state() {
        let mut site = site();
        site.modals
            .apply(ModalAction::Open("form-modal".into()))
            .unwrap();
        let html = modals(&site).into_string();
        assert_eq!(html.matches("modal-overlay active").count(), 1);
        assert!(html.contains("quick-form"));
    }
}

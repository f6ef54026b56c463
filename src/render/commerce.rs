use maud::{html, Markup};

use super::fields::{fields, submission_status};
use super::Site;
use crate::money::Money;
use crate::widgets::cart::ShippingRegion;
use crate::widgets::catalog::ProductSort;
use crate::widgets::checkout::{
    step_inputs, Checkout, PaymentMethod, ShippingMethod, STEP_TITLES, TOTAL_STEPS,
};
use crate::widgets::pricing::{annual_savings_percent, BillingPeriod};

pub(super) fn pricing(site: &Site) -> Markup {
    let table = &site.pricing;
    let period = table.period();
    let annual = period == BillingPeriod::Annual;
    let selected = table.selected().map(|(id, _)| id);
    html! {
        section.pricing-table #pricing data-period=(period.as_str()) {
            h2.section-title { "Choose Your Plan" }
            div.billing-toggle {
                span.billing-label.active[!annual] { "Monthly" }
                button.toggle-switch #billing-toggle type="button" role="switch"
                    aria-checked=(annual) aria-label="Bill annually" {}
                span.billing-label.active[annual] { "Annual" }
                @if site.options.show_annual_discount {
                    span.discount-badge { "Save up to 17%" }
                }
            }
            div.pricing-grid {
                @for plan in table.plans() {
                    div.pricing-card.popular[plan.popular].selected[selected == Some(plan.id)]
                        data-plan=(plan.id)
                    {
                        @if plan.popular {
                            div.popular-badge { "Most Popular" }
                        }
                        h3.plan-name { (plan.name) }
                        p.plan-description { (plan.description) }
                        div.plan-price {
                            span.price-amount { (table.price(plan).short()) }
                            span.price-period { (period.unit()) }
                        }
                        @if let Some(monthly) = table.monthly_equivalent(plan) {
                            p.monthly-equivalent { (monthly) "/month billed annually" }
                            @if site.options.show_annual_discount {
                                p.savings { "Save " (annual_savings_percent(plan)) "%" }
                            }
                        }
                        ul.plan-features {
                            @for feature in plan.features {
                                li { "✓ " (feature) }
                            }
                        }
                        button.btn.plan-cta.btn-primary[plan.popular] type="button" data-plan=(plan.id) {
                            (plan.cta)
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn products(site: &Site) -> Markup {
    let grid = &site.products;
    let category = grid.category();
    html! {
        section.product-grid #products data-layout=(site.options.layout.as_str()) {
            div.product-controls {
                div.filter-buttons role="group" aria-label="Filter by category" {
                    button.filter-btn.active[category.is_none()] type="button" data-category="all" { "All" }
                    @for cat in grid.categories() {
                        button.filter-btn.active[category == Some(cat)] type="button" data-category=(cat) {
                            (cat)
                        }
                    }
                }
                select #product-sort aria-label="Sort products" {
                    @for sort in ProductSort::ALL {
                        option value=(sort.value()) selected[grid.sort() == Some(sort)] { (sort.label()) }
                    }
                }
            }
            @if grid.matching_len() == 0 {
                p.no-results { "No products found." }
            }
            div class=(format!("products layout-{}", site.options.layout.as_str())) {
                @for product in grid.visible() {
                    @let wished = site.wishlist.contains(product.id);
                    article.product-card data-id=(product.id) data-category=(product.category) {
                        @if let Some(badge) = product.badge {
                            span.product-badge { (badge) }
                        }
                        button.wishlist-btn.active[wished] type="button" data-product=(product.id)
                            aria-pressed=(wished) aria-label="Add to wishlist"
                        {
                            @if wished { "♥" } @else { "♡" }
                        }
                        h3.product-name { (product.name) }
                        p.product-category { (product.category) }
                        div.product-rating {
                            span.stars { (stars(product.rating / 10)) }
                            " " (product.rating_label()) " (" (product.reviews) ")"
                        }
                        div.product-price {
                            @if let Some(sale) = product.sale_price {
                                span.sale-price { (sale) }
                                " "
                                del.original-price { (product.price) }
                            } @else {
                                span.price { (product.price) }
                            }
                        }
                        button.btn.add-to-cart type="button" data-product=(product.id) disabled[!product.in_stock] {
                            @if product.in_stock { "Add to Cart" } @else { "Out of Stock" }
                        }
                    }
                }
            }
            p.wishlist-count { "Wishlist: " (site.wishlist.len()) }
        }
    }
}

/// Five-star rating string.
pub(super) fn stars(filled: u8) -> String {
    let filled = usize::from(filled.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn summary_row(label: &str, amount: Money, class: &str) -> Markup {
    html! {
        div class=(format!("summary-row {}", class)) {
            span { (label) }
            span { (amount) }
        }
    }
}

pub(super) fn cart(site: &Site) -> Markup {
    let cart = &site.cart;
    let totals = cart.totals();
    html! {
        section.cart-summary #cart {
            h2 { "Shopping Cart (" (cart.item_count()) " items)" }
            @if cart.is_empty() {
                div.empty-cart { p { "Your cart is empty" } }
            } @else {
                ul.cart-items #cart-items {
                    @for item in cart.items() {
                        li.cart-item data-id=(item.id) {
                            span.item-icon { (item.icon) }
                            div.item-details {
                                h4 { (item.name) }
                                p.item-category { (item.category) }
                                p.item-price { (item.price) }
                            }
                            div.quantity-controls {
                                button.qty-btn type="button" data-action="decrease" data-id=(item.id)
                                    disabled[item.quantity <= 1] aria-label="Decrease quantity" { "−" }
                                input.qty-input type="number" min="1" value=(item.quantity) readonly;
                                button.qty-btn type="button" data-action="increase" data-id=(item.id)
                                    aria-label="Increase quantity" { "+" }
                            }
                            span.line-total { (item.line_total()) }
                            button.remove-item type="button" data-id=(item.id) aria-label="Remove item" { "×" }
                        }
                    }
                }
            }
            div.shipping-region {
                label for="shipping-region" { "Ship to" }
                select #shipping-region {
                    @for region in ShippingRegion::ALL {
                        option value=(region.code()) selected[region == cart.region()] {
                            (region.label()) " (" (region.rate().short()) ")"
                        }
                    }
                }
            }
            div.promo-code {
                input #promo-code type="text" placeholder="Promo code"
                    value=(cart.promo().map_or("", |p| p.code));
                button #apply-promo type="button" { "Apply" }
                @if let Some(promo) = cart.promo() {
                    p.promo-applied { (promo.code) ": " (promo.description) }
                }
            }
            div.cart-totals {
                (summary_row("Subtotal", totals.subtotal, "subtotal"))
                @if totals.discount > Money::ZERO {
                    (summary_row("Discount", Money::ZERO - totals.discount, "discount"))
                }
                (summary_row("Shipping", totals.shipping, "shipping"))
                (summary_row("Tax (8%)", totals.tax, "tax"))
                (summary_row("Total", totals.total, "total"))
            }
            button.btn.btn-primary #checkout-btn type="button" disabled[cart.is_empty()] {
                "Proceed to Checkout"
            }
        }
    }
}

fn step_body(checkout: &Checkout, step: usize) -> Markup {
    let form = checkout.form();
    html! {
        @match step {
            1 => {
                (fields(form, step_inputs(1, checkout.payment())))
            }
            2 => {
                (fields(form, step_inputs(2, checkout.payment())))
                div.shipping-methods role="radiogroup" aria-label="Shipping method" {
                    @for method in ShippingMethod::ALL {
                        label.shipping-option.selected[method == checkout.shipping()] {
                            input type="radio" name="shipping" value=(method.value())
                                checked[method == checkout.shipping()];
                            span.option-label { (method.label()) }
                            span.option-eta { (method.eta()) }
                            span.option-cost {
                                @if method.cost() == Money::ZERO { "Free" } @else { (method.cost()) }
                            }
                        }
                    }
                }
            }
            3 => {
                div.payment-methods role="radiogroup" aria-label="Payment method" {
                    @for method in PaymentMethod::ALL {
                        label.payment-option.selected[method == checkout.payment()] {
                            input type="radio" name="payment" value=(method.value())
                                checked[method == checkout.payment()];
                            " " (method.label())
                        }
                    }
                }
                @if checkout.payment() == PaymentMethod::Card {
                    div.card-fields {
                        (fields(form, step_inputs(3, checkout.payment())))
                    }
                }
            }
            _ => {
                @let review = checkout.review();
                div.order-review {
                    div.review-section {
                        h4 { "Contact" }
                        @for line in &review.contact { p { (line) } }
                    }
                    div.review-section {
                        h4 { "Shipping Address" }
                        @for line in &review.shipping { p { (line) } }
                        p { (checkout.shipping().label()) }
                    }
                    div.review-section {
                        h4 { "Payment" }
                        p { (review.payment) }
                    }
                }
                (fields(form, step_inputs(4, checkout.payment())))
            }
        }
    }
}

pub(super) fn checkout(site: &Site) -> Markup {
    let checkout = &site.checkout;
    let step = checkout.step();
    let pending = checkout.submission().is_pending();
    html! {
        form.checkout-form #checkout-form data-step=(step) novalidate {
            ol.progress-steps {
                @for (i, title) in STEP_TITLES.iter().enumerate() {
                    @let n = i + 1;
                    li.progress-step.active[n == step].completed[n < step]
                        aria-current=[(n == step).then_some("step")]
                    {
                        span.step-number { (n) }
                        span.step-title { (title) }
                    }
                }
            }
            @for n in 1..=TOTAL_STEPS {
                fieldset.form-step.active[n == step] id=(format!("step-{}", n)) hidden[n != step] {
                    legend { (STEP_TITLES[n - 1]) }
                    (step_body(checkout, n))
                }
            }
            div.form-navigation {
                @if step > 1 {
                    button.btn.btn-secondary #prev-btn type="button" disabled[pending] { "Previous" }
                }
                @if checkout.is_last_step() {
                    button.btn.btn-primary #submit-btn type="submit" disabled[pending] {
                        @if pending { "Processing..." } @else { "Place Order" }
                    }
                } @else {
                    button.btn.btn-primary #next-btn type="button" { "Next" }
                }
            }
            (submission_status(checkout.submission(), "Processing your order..."))
            aside.order-summary {
                h3 { "Order Summary" }
                (summary_row("Subtotal", checkout.subtotal(), "subtotal"))
                @if checkout.discount() > Money::ZERO {
                    (summary_row("Discount", checkout.discount(), "discount"))
                }
                (summary_row("Shipping", checkout.shipping_cost(), "shipping"))
                (summary_row("Tax", checkout.tax(), "tax"))
                (summary_row("Total", checkout.total(), "total"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use crate::state::listing::ListAction;
    use crate::state::Reducer;
    use crate::store::MemoryStore;
    use crate::widgets::cart::CartAction;
    use crate::widgets::checkout::CheckoutAction;
    use crate::widgets::form::FormAction;
    use crate::widgets::pricing::PricingAction;

    fn site() -> Site {
        Site::new(RenderOptions::default(), &MemoryStore::new(), false)
    }

    #[test]
    fn test_pricing_follows_period() {
        let mut site = site();
        let html = pricing(&site).into_string();
        assert!(html.contains("data-period=\"monthly\""));
        assert!(html.contains("/month"));
        assert!(!html.contains("monthly-equivalent"));

        site.pricing.apply(PricingAction::TogglePeriod).unwrap();
        let html = pricing(&site).into_string();
        assert!(html.contains("data-period=\"annual\""));
        assert!(html.contains("/year"));
        assert!(html.contains("monthly-equivalent"));
    }

    #[test]
    fn test_selected_plan_is_marked() {
        let mut site = site();
        let id = site.pricing.plans()[1].id;
        site.pricing.apply(PricingAction::Select(id.to_string())).unwrap();
        assert!(pricing(&site).into_string().contains("selected"));
    }

    #[test]
    fn test_product_filter_marks_button() {
        let mut site = site();
        let cat = site.products.categories()[0].to_string();
        site.products
            .apply(ListAction::Filter(Some(cat.clone())))
            .unwrap();
        let html = products(&site).into_string();
        assert_eq!(html.matches("filter-btn active").count(), 1);
        assert!(html.contains(&format!("data-category=\"{}\"", cat)));
        assert_eq!(
            html.matches("class=\"product-card\"").count(),
            site.products.matching_len()
        );
    }

    #[test]
    fn test_wishlist_hearts() {
        let mut site = site();
        site.wishlist.toggle("smart-watch");
        let html = products(&site).into_string();
        assert_eq!(html.matches("♥").count(), 1);
        assert!(html.contains("Wishlist: 1"));
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_cart_markup() {
        let mut site = site();
        let html = cart(&site).into_string();
        assert!(html.contains("id=\"cart-items\""));
        assert!(!html.contains("summary-row discount"));

        site.cart.apply(CartAction::ApplyPromo("save10".into())).unwrap();
        let html = cart(&site).into_string();
        assert!(html.contains("summary-row discount"));
        assert!(html.contains("SAVE10: 10% off"));

        site.cart.apply(CartAction::Clear).unwrap();
        let html = cart(&site).into_string();
        assert!(html.contains("Your cart is empty"));
        assert!(!html.contains("id=\"cart-items\""));
    }

    #[test]
    fn test_checkout_shows_only_current_step() {
        let site = site();
        let html = checkout(&site).into_string();
        for n in 1..=TOTAL_STEPS {
            assert!(html.contains(&format!("id=\"step-{}\"", n)));
        }
        assert!(html.contains("id=\"next-btn\""));
        assert!(!html.contains("id=\"prev-btn\""));
        assert_eq!(html.matches(" hidden").count(), TOTAL_STEPS - 1);
    }

    #[test]
    fn test_checkout_flags_blocked_step() {
        let mut site = site();
        site.checkout
            .apply(CheckoutAction::Input(FormAction::set("first-name", "Ada")))
            .unwrap();
        assert!(site.checkout.apply(CheckoutAction::Next).is_err());
        let html = checkout(&site).into_string();
        assert_eq!(html.matches("form-group error").count(), 2);
        assert!(html.contains("data-step=\"1\""));
    }
}

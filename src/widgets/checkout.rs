use crate::error::StateError;
use crate::gateway::{Order, OrderGateway};
use crate::money::Money;
use crate::state::Reducer;
use crate::widgets::cart::{Totals, TAX_BASIS_POINTS};
use crate::widgets::form::{FieldKind, FieldSpec, Form, FormAction, Submission};

pub const TOTAL_STEPS: usize = 4;

pub const STEP_TITLES: [&str; TOTAL_STEPS] = ["Information", "Shipping", "Payment", "Review"];

const US_STATES: &[(&str, &str)] = &[
    ("CA", "California"),
    ("NY", "New York"),
    ("TX", "Texas"),
    ("FL", "Florida"),
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("first-name", "First Name", FieldKind::Text).required(),
    FieldSpec::new("last-name", "Last Name", FieldKind::Text).required(),
    FieldSpec::new("email", "Email Address", FieldKind::Email).required(),
    FieldSpec::new("phone", "Phone Number", FieldKind::Tel),
    FieldSpec::new("subscribe", "Subscribe to our newsletter", FieldKind::Checkbox),
    FieldSpec::new("address", "Street Address", FieldKind::Text).required(),
    FieldSpec::new("address2", "Apartment, suite, etc.", FieldKind::Text),
    FieldSpec::new("city", "City", FieldKind::Text).required(),
    FieldSpec::new("state", "State", FieldKind::Select(US_STATES)).required(),
    FieldSpec::new("zip", "ZIP Code", FieldKind::Text).required(),
    FieldSpec::new("card-number", "Card Number", FieldKind::Text)
        .required()
        .check(valid_card_number),
    FieldSpec::new("expiry", "Expiry Date", FieldKind::Text)
        .required()
        .check(valid_expiry),
    FieldSpec::new("cvv", "CVV", FieldKind::Text).required().check(valid_cvv),
    FieldSpec::new("card-name", "Name on Card", FieldKind::Text).required(),
    FieldSpec::new("terms", "I agree to the Terms of Service", FieldKind::Checkbox).required(),
];

const CARD_FIELDS: [&str; 4] = ["card-number", "expiry", "cvv", "card-name"];

/// Fields checked before leaving a step.
fn step_fields(step: usize, payment: PaymentMethod) -> &'static [&'static str] {
    match step {
        1 => &["first-name", "last-name", "email"],
        2 => &["address", "city", "state", "zip"],
        3 if payment == PaymentMethod::Card => &CARD_FIELDS,
        4 => &["terms"],
        _ => &[],
    }
}

/// Inputs shown on a step, in display order.
pub fn step_inputs(step: usize, payment: PaymentMethod) -> &'static [&'static str] {
    match step {
        1 => &["first-name", "last-name", "email", "phone", "subscribe"],
        2 => &["address", "address2", "city", "state", "zip"],
        3 if payment == PaymentMethod::Card => &CARD_FIELDS,
        4 => &["terms"],
        _ => &[],
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn valid_card_number(value: &str) -> bool {
    let d = digits(value);
    (13..=19).contains(&d.len()) && value.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

fn valid_expiry(value: &str) -> bool {
    match value.split_once('/') {
        Some((mm, yy)) if mm.len() == 2 && yy.len() == 2 => {
            matches!(mm.parse::<u8>(), Ok(1..=12)) && yy.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

fn valid_cvv(value: &str) -> bool {
    (3..=4).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}

/// `4111111111111111` → `4111 1111 1111 1111`, at most 16 digits.
pub fn format_card_number(input: &str) -> String {
    let d: Vec<char> = digits(input).chars().take(16).collect();
    d.chunks(4)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `1227` → `12/27`.
pub fn format_expiry(input: &str) -> String {
    let d: String = digits(input).chars().take(4).collect();
    if d.len() >= 2 {
        format!("{}/{}", &d[..2], &d[2..])
    } else {
        d
    }
}

pub fn mask_card(number: &str) -> String {
    let d = digits(number);
    let last4 = &d[d.len().saturating_sub(4)..];
    format!("**** **** **** {}", last4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 3] = [Self::Standard, Self::Express, Self::Overnight];

    pub fn cost(self) -> Money {
        match self {
            Self::Standard => Money::ZERO,
            Self::Express => Money::dollars(15),
            Self::Overnight => Money::dollars(35),
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Overnight => "overnight",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "📦 Standard Shipping",
            Self::Express => "🚀 Express Shipping",
            Self::Overnight => "⚡ Overnight Shipping",
        }
    }

    pub fn eta(self) -> &'static str {
        match self {
            Self::Standard => "5-7 business days",
            Self::Express => "2-3 business days",
            Self::Overnight => "Next business day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
    Apple,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Card, Self::Paypal, Self::Apple];

    pub fn value(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Apple => "apple",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Paypal => "PayPal",
            Self::Apple => "Apple Pay",
        }
    }
}

/// What the review step shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub contact: [String; 2],
    pub shipping: [String; 2],
    pub payment: String,
}

#[derive(Debug, Clone)]
pub struct Checkout {
    step: usize,
    form: Form,
    shipping: ShippingMethod,
    payment: PaymentMethod,
    subtotal: Money,
    /// Promo discount carried over from the cart
    discount: Money,
    /// Regional delivery rate from the cart; the method's surcharge comes on top
    delivery: Money,
    submission: Submission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutAction {
    Next,
    Prev,
    Input(FormAction),
    Shipping(ShippingMethod),
    Payment(PaymentMethod),
    /// The order port answered: a confirmation reference or an error message
    Finished(Result<String, String>),
}

impl Checkout {
    pub fn new(subtotal: Money) -> Self {
        Self {
            step: 1,
            form: Form::new(FIELDS),
            shipping: ShippingMethod::default(),
            payment: PaymentMethod::default(),
            subtotal,
            discount: Money::ZERO,
            delivery: Money::ZERO,
            submission: Submission::Idle,
        }
    }

    /// Start from the cart's totals so standard shipping charges what the cart quoted.
    pub fn from_cart(totals: &Totals) -> Self {
        Self {
            discount: totals.discount,
            delivery: totals.shipping,
            ..Self::new(totals.subtotal)
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn shipping(&self) -> ShippingMethod {
        self.shipping
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn inputs(&self) -> &'static [&'static str] {
        step_inputs(self.step, self.payment)
    }

    pub fn is_last_step(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn shipping_cost(&self) -> Money {
        self.delivery + self.shipping.cost()
    }

    pub fn tax(&self) -> Money {
        self.subtotal.percent(TAX_BASIS_POINTS)
    }

    pub fn total(&self) -> Money {
        let discounted = (self.subtotal - self.discount).max(Money::ZERO);
        (discounted + self.shipping_cost() + self.tax()).max(Money::ZERO)
    }

    pub fn review(&self) -> Review {
        let f = &self.form;
        let payment = match self.payment {
            PaymentMethod::Card if !f.value("card-number").is_empty() => {
                format!("Credit Card {}", mask_card(f.value("card-number")))
            }
            PaymentMethod::Card => "Credit Card".to_string(),
            other => other.label().to_string(),
        };
        Review {
            contact: [
                format!("{} {}", f.value("first-name"), f.value("last-name")),
                f.value("email").to_string(),
            ],
            shipping: [
                f.value("address").to_string(),
                format!("{}, {} {}", f.value("city"), f.value("state"), f.value("zip")),
            ],
            payment,
        }
    }

    fn validate_step(&mut self) -> Result<(), StateError> {
        let fields = step_fields(self.step, self.payment);
        let result = self.form.validate(fields);
        if let Err(e) = &result {
            tracing::debug!("Checkout step {} blocked: {}", self.step, e);
        }
        result
    }

    /// Validate the review step and move into `Submitting`.
    pub fn begin_submit(&mut self) -> Result<Order, StateError> {
        if self.submission.is_pending() {
            return Err(StateError::Busy);
        }
        if !self.is_last_step() {
            return Err(StateError::OutOfRange {
                kind: "checkout step",
                index: self.step,
                len: TOTAL_STEPS,
            });
        }
        self.validate_step()?;
        self.submission = Submission::Submitting;
        let review = self.review();
        Ok(Order {
            customer: review.contact[0].clone(),
            email: review.contact[1].clone(),
            address: review.shipping.join("\n"),
            shipping: self.shipping.value().to_string(),
            payment: review.payment,
            total: self.total(),
        })
    }

    /// Submit through the order port and record the outcome.
    pub async fn submit(&mut self, gateway: &dyn OrderGateway) -> Result<(), StateError> {
        let order = self.begin_submit()?;
        let outcome = gateway
            .place_order(order)
            .await
            .map(|c| c.reference)
            .map_err(|e| e.to_string());
        self.apply(CheckoutAction::Finished(outcome))
    }

    fn input(&mut self, action: FormAction) -> Result<(), StateError> {
        // Card number and expiry are reformatted as they are typed
        if let FormAction::Set { field, value } = &action {
            match field.as_str() {
                "card-number" => {
                    self.form.put("card-number", format_card_number(value));
                    return Ok(());
                }
                "expiry" => {
                    self.form.put("expiry", format_expiry(value));
                    return Ok(());
                }
                _ => {}
            }
        }
        self.form.apply(action)
    }
}

impl Default for Checkout {
    fn default() -> Self {
        // Two licenses worth of demo order
        Self::new(Money::cents(14998))
    }
}

impl Reducer for Checkout {
    type Action = CheckoutAction;

    fn apply(&mut self, action: CheckoutAction) -> Result<(), StateError> {
        match action {
            CheckoutAction::Next => {
                self.validate_step()?;
                if self.step < TOTAL_STEPS {
                    self.step += 1;
                }
            }
            CheckoutAction::Prev => {
                if self.step > 1 {
                    self.step -= 1;
                }
            }
            CheckoutAction::Input(action) => self.input(action)?,
            CheckoutAction::Shipping(method) => self.shipping = method,
            CheckoutAction::Payment(method) => self.payment = method,
            CheckoutAction::Finished(outcome) => {
                // A late answer for an abandoned checkout
                if !self.submission.is_pending() {
                    tracing::debug!("Ignoring order outcome for an idle checkout");
                    return Ok(());
                }
                self.submission = Submission::finish(outcome, "Order");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SimulatedGateway;

    fn set(c: &mut Checkout, field: &str, value: &str) {
        c.apply(CheckoutAction::Input(FormAction::set(field, value)))
            .unwrap();
    }

    fn fill_to_review(c: &mut Checkout) {
        set(c, "first-name", "Ada");
        set(c, "last-name", "Lovelace");
        set(c, "email", "ada@example.com");
        c.apply(CheckoutAction::Next).unwrap();
        set(c, "address", "12 Analytical Way");
        set(c, "city", "Austin");
        set(c, "state", "TX");
        set(c, "zip", "73301");
        c.apply(CheckoutAction::Next).unwrap();
        set(c, "card-number", "4111111111111111");
        set(c, "expiry", "1227");
        set(c, "cvv", "123");
        set(c, "card-name", "Ada Lovelace");
        c.apply(CheckoutAction::Next).unwrap();
    }

    #[test]
    fn test_empty_step_one_blocks_and_flags_only_empty_fields() {
        let mut c = Checkout::default();
        set(&mut c, "last-name", "Lovelace");

        let err = c.apply(CheckoutAction::Next).unwrap_err();
        assert_eq!(err, StateError::Validation(vec!["first-name", "email"]));
        assert_eq!(c.step(), 1);
        assert!(c.form().is_flagged("first-name"));
        assert!(c.form().is_flagged("email"));
        assert!(!c.form().is_flagged("last-name"));
        // Fields of later steps are untouched
        assert!(!c.form().is_flagged("address"));
    }

    #[test]
    fn test_fixing_fields_unflags_and_advances() {
        let mut c = Checkout::default();
        let _ = c.apply(CheckoutAction::Next);
        set(&mut c, "first-name", "Ada");
        set(&mut c, "last-name", "Lovelace");
        set(&mut c, "email", "ada@example.com");
        c.apply(CheckoutAction::Next).unwrap();
        assert_eq!(c.step(), 2);
        assert_eq!(c.form().flagged().count(), 0);
    }

    #[test]
    fn test_prev_never_validates() {
        let mut c = Checkout::default();
        fill_to_review(&mut c);
        set(&mut c, "email", "");
        c.apply(CheckoutAction::Prev).unwrap();
        assert_eq!(c.step(), 3);
        c.apply(CheckoutAction::Prev).unwrap();
        c.apply(CheckoutAction::Prev).unwrap();
        c.apply(CheckoutAction::Prev).unwrap();
        assert_eq!(c.step(), 1);
    }

    #[test]
    fn test_short_card_number_is_rejected() {
        let mut c = Checkout::default();
        fill_to_review(&mut c);
        c.apply(CheckoutAction::Prev).unwrap();
        set(&mut c, "card-number", "4111 1111");
        let err = c.apply(CheckoutAction::Next).unwrap_err();
        assert_eq!(err, StateError::Validation(vec!["card-number"]));
        assert_eq!(c.step(), 3);
    }

    #[test]
    fn test_paypal_skips_card_fields() {
        let mut c = Checkout::default();
        fill_to_review(&mut c);
        c.apply(CheckoutAction::Prev).unwrap();
        set(&mut c, "card-number", "");
        c.apply(CheckoutAction::Payment(PaymentMethod::Paypal)).unwrap();
        c.apply(CheckoutAction::Next).unwrap();
        assert_eq!(c.step(), 4);
        assert_eq!(c.review().payment, "PayPal");
    }

    #[test]
    fn test_input_formatting() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-1111 11"), "4111 1111 11");
        assert_eq!(format_expiry("1227"), "12/27");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(mask_card("4111 1111 1111 1234"), "**** **** **** 1234");
        assert!(valid_expiry("12/27"));
        assert!(!valid_expiry("13/27"));
        assert!(!valid_cvv("12"));
    }

    #[test]
    fn test_review_and_totals() {
        let mut c = Checkout::default();
        fill_to_review(&mut c);
        assert_eq!(c.step(), 4);
        let review = c.review();
        assert_eq!(review.contact[0], "Ada Lovelace");
        assert_eq!(review.shipping[1], "Austin, TX 73301");
        assert_eq!(review.payment, "Credit Card **** **** **** 1111");

        assert_eq!(c.tax(), Money::cents(1200));
        assert_eq!(c.total(), Money::cents(14998 + 1200));
        c.apply(CheckoutAction::Shipping(ShippingMethod::Express)).unwrap();
        assert_eq!(c.total(), Money::cents(14998 + 1500 + 1200));
    }

    #[test]
    fn test_cart_promo_and_region_carry_over() {
        use crate::widgets::cart::{Cart, CartAction, ShippingRegion};

        let cart = Cart::sample(&[1, 2, 1])
            .reduce(CartAction::ApplyPromo("SAVE10".into()))
            .reduce(CartAction::Region(ShippingRegion::Ca));
        let totals = cart.totals();
        let mut c = Checkout::from_cart(&totals);
        assert_eq!(c.discount(), totals.discount);
        assert_eq!(c.shipping_cost(), Money::dollars(15));
        assert_eq!(c.total(), totals.total);

        // Faster methods add their surcharge to the regional rate
        c.apply(CheckoutAction::Shipping(ShippingMethod::Express)).unwrap();
        assert_eq!(c.total(), totals.total + Money::dollars(15));
    }

    #[test]
    fn test_outcome_for_idle_checkout_is_ignored() {
        let mut c = Checkout::default();
        c.apply(CheckoutAction::Finished(Ok("TUSK-000001".into()))).unwrap();
        assert_eq!(c.submission(), &Submission::Idle);
    }

    #[test]
    fn test_submit_requires_terms() {
        let mut c = Checkout::default();
        fill_to_review(&mut c);
        let err = c.begin_submit().unwrap_err();
        assert_eq!(err, StateError::Validation(vec!["terms"]));
        assert_eq!(c.submission(), &Submission::Idle);
    }

    #[test]
    fn test_submit_before_review_is_refused() {
        let mut c = Checkout::default();
        assert!(matches!(c.begin_submit(), Err(StateError::OutOfRange { .. })));
    }

    #[tokio::test]
    async fn test_submit_through_gateway() {
        let mut c = Checkout::default();
        fill_to_review(&mut c);
        c.apply(CheckoutAction::Input(FormAction::Check("terms".into())))
            .unwrap();

        let gateway = SimulatedGateway::instant();
        c.submit(&gateway).await.unwrap();
        match c.submission() {
            Submission::Completed(reference) => assert!(reference.starts_with("TUSK-")),
            other => panic!("unexpected submission state: {:?}", other),
        }
    }

    #[test]
    fn test_double_submit_is_busy() {
        let mut c = Checkout::default();
        fill_to_review(&mut c);
        c.apply(CheckoutAction::Input(FormAction::Check("terms".into())))
            .unwrap();
        c.begin_submit().unwrap();
        assert_eq!(c.begin_submit().unwrap_err(), StateError::Busy);
    }
}

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::fixtures::CartProduct;
use crate::money::Money;
use crate::state::Reducer;

/// Sales tax, in basis points of the subtotal.
pub const TAX_BASIS_POINTS: i64 = 800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub icon: String,
    pub price: Money,
    pub quantity: u32,
}

impl CartItem {
    pub fn from_product(product: &CartProduct, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.to_string(),
            category: product.category.to_string(),
            icon: product.icon.to_string(),
            price: product.price,
            quantity: quantity.max(1),
        }
    }

    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShippingRegion {
    #[default]
    Us,
    Ca,
    Uk,
    Eu,
    Intl,
}

impl ShippingRegion {
    pub const ALL: [ShippingRegion; 5] = [Self::Us, Self::Ca, Self::Uk, Self::Eu, Self::Intl];

    pub fn rate(self) -> Money {
        match self {
            Self::Us => Money::ZERO,
            Self::Ca => Money::dollars(15),
            Self::Uk => Money::dollars(25),
            Self::Eu => Money::dollars(30),
            Self::Intl => Money::dollars(45),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Ca => "CA",
            Self::Uk => "UK",
            Self::Eu => "EU",
            Self::Intl => "INTL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Us => "United States",
            Self::Ca => "Canada",
            Self::Uk => "United Kingdom",
            Self::Eu => "European Union",
            Self::Intl => "International",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoEffect {
    /// Basis points off the subtotal
    Percent(i64),
    /// Fixed amount off, never more than the subtotal
    Fixed(Money),
    FreeShipping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promo {
    pub code: &'static str,
    pub effect: PromoEffect,
    pub description: &'static str,
}

pub const PROMO_CODES: &[Promo] = &[
    Promo {
        code: "SAVE10",
        effect: PromoEffect::Percent(1_000),
        description: "10% off",
    },
    Promo {
        code: "WELCOME",
        effect: PromoEffect::Fixed(Money::dollars(15)),
        description: "$15 off",
    },
    Promo {
        code: "FREESHIP",
        effect: PromoEffect::FreeShipping,
        description: "Free shipping",
    },
];

/// Case-insensitive, whitespace-tolerant promo lookup.
pub fn find_promo(code: &str) -> Option<&'static Promo> {
    let code = code.trim().to_uppercase();
    PROMO_CODES.iter().find(|p| p.code == code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Money,
    pub discount: Money,
    /// Subtotal after the promo, before shipping and tax
    pub discounted: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    region: ShippingRegion,
    promo: Option<&'static Promo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add(CartItem),
    /// Change quantity by a signed amount; never drops below one
    Adjust { id: u32, delta: i32 },
    Remove(u32),
    Region(ShippingRegion),
    ApplyPromo(String),
    ClearPromo,
    Clear,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// The demo cart: every sample product with the given quantities.
    pub fn sample(quantities: &[u32]) -> Self {
        let items = crate::fixtures::cart_products()
            .iter()
            .zip(quantities)
            .map(|(p, q)| CartItem::from_product(p, *q))
            .collect();
        Self::new(items)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn region(&self) -> ShippingRegion {
        self.region
    }

    pub fn promo(&self) -> Option<&'static Promo> {
        self.promo
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn totals(&self) -> Totals {
        let subtotal: Money = self.items.iter().map(CartItem::line_total).sum();
        let discount = match self.promo.map(|p| p.effect) {
            Some(PromoEffect::Percent(bp)) => subtotal.percent(bp),
            Some(PromoEffect::Fixed(amount)) => amount.min(subtotal),
            Some(PromoEffect::FreeShipping) | None => Money::ZERO,
        };
        let shipping = match self.promo.map(|p| p.effect) {
            Some(PromoEffect::FreeShipping) => Money::ZERO,
            _ => self.region.rate(),
        };
        let discounted = (subtotal - discount).max(Money::ZERO);
        let tax = subtotal.percent(TAX_BASIS_POINTS);
        let total = (discounted + shipping + tax).max(Money::ZERO);
        Totals {
            subtotal,
            discount,
            discounted,
            shipping,
            tax,
            total,
        }
    }

    /// Summary line for the checkout confirmation.
    pub fn checkout_summary(&self) -> Result<String, StateError> {
        if self.is_empty() {
            return Err(StateError::EmptyCart);
        }
        Ok(format!(
            "Proceed to checkout with {} items for {}?",
            self.item_count(),
            self.totals().total
        ))
    }

    fn item_mut(&mut self, id: u32) -> Result<&mut CartItem, StateError> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StateError::missing("cart item", id))
    }
}

impl Reducer for Cart {
    type Action = CartAction;

    fn apply(&mut self, action: CartAction) -> Result<(), StateError> {
        match action {
            CartAction::Add(item) => match self.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => existing.quantity += item.quantity,
                None => self.items.push(item),
            },
            CartAction::Adjust { id, delta } => {
                let item = self.item_mut(id)?;
                let next = i64::from(item.quantity) + i64::from(delta);
                item.quantity = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
            }
            CartAction::Remove(id) => {
                let before = self.items.len();
                self.items.retain(|i| i.id != id);
                if self.items.len() == before {
                    return Err(StateError::missing("cart item", id));
                }
            }
            CartAction::Region(region) => self.region = region,
            CartAction::ApplyPromo(code) => {
                let promo = find_promo(&code)
                    .ok_or_else(|| StateError::InvalidPromo(code.trim().to_string()))?;
                tracing::debug!("Promo code applied: {}", promo.description);
                self.promo = Some(promo);
            }
            CartAction::ClearPromo => self.promo = None,
            CartAction::Clear => {
                self.items.clear();
                self.promo = None;
            }
        }
        Ok(())
    }
}

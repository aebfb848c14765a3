//! Grid rendering
//!
//! Pure projection from the mirror to a render tree. No display-surface side
//! effects live here, so the projection is testable without a terminal and
//! safe to call redundantly — the subscription push and the optimistic patch
//! both trigger it for the same state.

use shared::Product;

/// Placeholder shown in place of a missing description
const NO_DESCRIPTION: &str = "No description";
/// Placeholder entry for a card without images
const NO_IMAGE: &str = "No image";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderTree {
    /// Placeholder block shown when the collection is empty
    Empty(EmptyState),
    /// One card per product, in mirror order (name ascending)
    Grid(Vec<ProductCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price_label: String,
    pub description: String,
    pub stock_label: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub specifications: Vec<(String, String)>,
    pub actions: Vec<CardAction>,
}

/// Format a price the way the catalog displays it: "Rp" with id-ID digit
/// grouping (dots for thousands, comma before any fraction)
pub fn format_price(price: f64) -> String {
    let negative = price < 0.0;
    let price = price.abs();
    let whole = price.trunc() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let fraction = price.fract();
    let label = if fraction > f64::EPSILON {
        let mut frac = format!("{:.2}", fraction);
        // "0.50" → "5", "0.25" → "25"
        frac.drain(..2);
        while frac.ends_with('0') {
            frac.pop();
        }
        // Fractions that round away (e.g. .999) fall back to the whole label
        if frac.is_empty() {
            format!("Rp {grouped}")
        } else {
            format!("Rp {grouped},{frac}")
        }
    } else {
        format!("Rp {grouped}")
    };

    if negative { format!("-{label}") } else { label }
}

fn card(product: &Product) -> ProductCard {
    let images = if product.images.is_empty() {
        vec![NO_IMAGE.to_string()]
    } else {
        product.images.clone()
    };

    let description = if product.description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        product.description.clone()
    };

    ProductCard {
        id: product.id.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        price_label: format_price(product.price),
        description,
        stock_label: format!("Stock: {} items", product.stock),
        images,
        features: product.features.clone(),
        specifications: product
            .specifications
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        actions: vec![CardAction::Edit, CardAction::Delete],
    }
}

/// Project the mirrored collection into its render tree
pub fn render(products: &[Product]) -> RenderTree {
    if products.is_empty() {
        return RenderTree::Empty(EmptyState {
            title: "No products yet".to_string(),
            hint: "Add your first product with the form".to_string(),
        });
    }

    RenderTree::Grid(products.iter().map(card).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id.to_string(), name.to_string())
    }

    #[test]
    fn empty_collection_renders_empty_state() {
        match render(&[]) {
            RenderTree::Empty(state) => assert_eq!(state.title, "No products yet"),
            RenderTree::Grid(_) => panic!("expected empty state"),
        }
    }

    #[test]
    fn grid_preserves_mirror_order_and_ids() {
        let products = vec![product("1", "Chair"), product("2", "Lamp")];
        match render(&products) {
            RenderTree::Grid(cards) => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].id, "1");
                assert_eq!(cards[1].name, "Lamp");
                assert_eq!(cards[0].actions, [CardAction::Edit, CardAction::Delete]);
            }
            RenderTree::Empty(_) => panic!("expected grid"),
        }
    }

    #[test]
    fn card_falls_back_to_placeholders() {
        let p = product("1", "Chair");
        match render(std::slice::from_ref(&p)) {
            RenderTree::Grid(cards) => {
                assert_eq!(cards[0].description, "No description");
                assert_eq!(cards[0].images, ["No image"]);
            }
            RenderTree::Empty(_) => panic!("expected grid"),
        }
    }

    #[test]
    fn render_is_idempotent() {
        let products = vec![product("1", "Chair")];
        assert_eq!(render(&products), render(&products));
    }

    #[test]
    fn price_label_uses_id_id_grouping() {
        assert_eq!(format_price(150000.0), "Rp 150.000");
        assert_eq!(format_price(0.0), "Rp 0");
        assert_eq!(format_price(1234567.0), "Rp 1.234.567");
        assert_eq!(format_price(1500.5), "Rp 1.500,5");
    }
}

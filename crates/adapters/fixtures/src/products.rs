//! Products stocked in the simulated fridge.

use fridgesim_domain::product::Product;

pub const SMALL_100_PLUS: &str = "PRODUCT_001";
pub const SMALL_COCA_LIGHT: &str = "PRODUCT_006";
pub const CHICKEN_SANDWICH: &str = "PRODUCT_009";

/// Every stocked product.
#[must_use]
pub fn all() -> Vec<Product> {
    vec![
        Product::new(SMALL_100_PLUS, "1.60", "100 Plus (Small)"),
        Product::new(SMALL_COCA_LIGHT, "2.10", "Coca light (Small)"),
        Product::new(CHICKEN_SANDWICH, "7.50", "Sandwich Poulet"),
    ]
}

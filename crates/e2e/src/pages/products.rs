//! Inventory page

use crate::journey::Journey;
use crate::pages::attr_selector;

/// Product list with per-product add/remove buttons
#[derive(Debug, Clone)]
pub struct ProductsPage {
    cart_link: &'static str,
}

impl Default for ProductsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductsPage {
    pub fn new() -> Self {
        Self {
            cart_link: "#shopping_cart_container",
        }
    }

    /// Button located by its `name` attribute, e.g. `add-to-cart-sauce-labs-backpack`
    fn product_button(&self, name: &str) -> String {
        attr_selector("button", "name", name)
    }

    /// Click a product's "Add to cart" button
    pub fn select_product(&self, journey: &mut Journey, button_name: &str) {
        journey.click(&self.product_button(button_name));
    }

    pub fn open_cart(&self, journey: &mut Journey) {
        journey.click(self.cart_link);
    }

    /// Once added, the product's button turns into `remove-*`
    pub fn expect_product_added(&self, journey: &mut Journey, remove_button_name: &str) {
        journey.expect_visible(&self.product_button(remove_button_name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::TestStep;

    #[test]
    fn test_product_locators_use_name_attribute() {
        let page = ProductsPage::new();
        let mut journey = Journey::new("cart", "Compras");
        page.select_product(&mut journey, "add-to-cart-sauce-labs-backpack");
        page.open_cart(&mut journey);
        page.expect_product_added(&mut journey, "remove-sauce-labs-backpack");

        assert_eq!(
            journey.steps,
            vec![
                TestStep::Click {
                    selector: "button[name='add-to-cart-sauce-labs-backpack']".to_string(),
                    timeout_ms: None,
                },
                TestStep::Click {
                    selector: "#shopping_cart_container".to_string(),
                    timeout_ms: None,
                },
                TestStep::ExpectVisible {
                    selector: "button[name='remove-sauce-labs-backpack']".to_string(),
                },
            ]
        );
    }
}

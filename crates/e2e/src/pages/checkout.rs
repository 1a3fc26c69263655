//! Checkout pages: information form, overview and completion
//!
//! Cancelling from any checkout step returns to the inventory without
//! touching the cart contents.

use crate::journey::Journey;
use crate::pages::attr_selector;

/// Customer details typed into the checkout form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub postal_code: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: "Teste".to_string(),
            last_name: "Automatizado".to_string(),
            postal_code: "12345-678".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutPage {
    first_name: &'static str,
    last_name: &'static str,
    postal_code: &'static str,
    btn_continue: &'static str,
    btn_finish: &'static str,
    btn_cancel: &'static str,
    complete_header: &'static str,
}

impl Default for CheckoutPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutPage {
    pub fn new() -> Self {
        Self {
            first_name: "#first-name",
            last_name: "#last-name",
            postal_code: "#postal-code",
            btn_continue: "input[name='continue']",
            btn_finish: "#finish",
            btn_cancel: "button[name='cancel']",
            complete_header: "[data-test=\"complete-header\"]",
        }
    }

    pub fn fill_form(&self, journey: &mut Journey, info: &ShippingInfo) {
        journey
            .fill(self.first_name, info.first_name.as_str())
            .fill(self.last_name, info.last_name.as_str())
            .fill(self.postal_code, info.postal_code.as_str());
    }

    /// Step one → overview
    pub fn continue_to_overview(&self, journey: &mut Journey) {
        journey.click(self.btn_continue);
    }

    /// The overview lists `product` under `[data-test="<data_test>"]`
    pub fn expect_overview_item(&self, journey: &mut Journey, data_test: &str, product: &str) {
        let selector = attr_selector("", "data-test", data_test);
        journey.expect_text(&selector, product);
    }

    pub fn finish(&self, journey: &mut Journey) {
        journey.click(self.btn_finish);
    }

    pub fn cancel(&self, journey: &mut Journey) {
        journey.click(self.btn_cancel);
    }

    pub fn expect_complete(&self, journey: &mut Journey) {
        journey.expect_text(self.complete_header, "Thank you for your order!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::TestStep;

    #[test]
    fn test_form_uses_default_shipping_info() {
        let page = CheckoutPage::new();
        let mut journey = Journey::new("checkout", "Compras");
        page.fill_form(&mut journey, &ShippingInfo::default());
        page.continue_to_overview(&mut journey);

        let labels: Vec<String> = journey.steps.iter().map(TestStep::label).collect();
        assert_eq!(
            labels,
            vec![
                "fill:#first-name=Teste",
                "fill:#last-name=Automatizado",
                "fill:#postal-code=12345-678",
                "click:input[name='continue']",
            ]
        );
    }

    #[test]
    fn test_overview_item_selector() {
        let page = CheckoutPage::new();
        let mut journey = Journey::new("checkout", "Compras");
        page.expect_overview_item(&mut journey, "inventory-item-name", "Sauce Labs Backpack");

        assert_eq!(
            journey.steps[0],
            TestStep::ExpectText {
                selector: "[data-test='inventory-item-name']".to_string(),
                text: "Sauce Labs Backpack".to_string(),
            }
        );
    }
}

//! Cart page

use crate::journey::Journey;

#[derive(Debug, Clone)]
pub struct CartPage {
    btn_checkout: &'static str,
}

impl Default for CartPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CartPage {
    pub fn new() -> Self {
        Self {
            btn_checkout: "#checkout",
        }
    }

    pub fn checkout(&self, journey: &mut Journey) {
        journey.click(self.btn_checkout);
    }
}

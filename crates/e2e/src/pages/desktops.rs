//! nopCommerce desktops category

use regex::Regex;
use std::sync::OnceLock;

use crate::journey::Journey;
use crate::pages::attr_selector;

#[derive(Debug, Clone, Default)]
pub struct DesktopsPage;

impl DesktopsPage {
    pub fn new() -> Self {
        Self
    }

    /// Open a product by its title, e.g. "Build your own computer"
    pub fn select_desktop(&self, journey: &mut Journey, title: &str) {
        let href = format!("/{}", slug(title));
        journey.click(&attr_selector("a", "href", &href));
    }
}

/// nopCommerce product URL slug: lowercase, whitespace runs become `-`
fn slug(title: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    whitespace
        .replace_all(title.trim(), "-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Build your own computer"), "build-your-own-computer");
        assert_eq!(slug("  Digital   Storm VANQUISH "), "digital-storm-vanquish");
    }

    #[test]
    fn test_select_desktop_clicks_product_link() {
        let mut journey = Journey::new("desktop", "Compras");
        DesktopsPage::new().select_desktop(&mut journey, "Build your own computer");
        assert_eq!(journey.steps[0].label(), "click:a[href='/build-your-own-computer']");
    }
}

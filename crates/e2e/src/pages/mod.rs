//! Page objects
//!
//! Each page owns the CSS locators of one screen and records named user
//! actions into a [`Journey`](crate::journey::Journey). Journeys only hold
//! data; nothing touches a browser until the runner executes them.

pub mod cart;
pub mod checkout;
pub mod desktops;
pub mod home;
pub mod products;

pub use cart::CartPage;
pub use checkout::{CheckoutPage, ShippingInfo};
pub use desktops::DesktopsPage;
pub use home::{HomePage, Storefront};
pub use products::ProductsPage;

/// `tag[attr='value']` with the value quoted for CSS
pub(crate) fn attr_selector(tag: &str, attr: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("{}[{}='{}']", tag, attr, escaped)
}

/// Join a base URL and a path without doubling or dropping the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

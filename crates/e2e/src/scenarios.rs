//! Scenario catalog
//!
//! Scenarios compose page-object actions into journeys. Builders that need
//! credentials fail fast with `MissingCredentials` before any browser starts.

use rand::distributions::Alphanumeric;
use rand::Rng;
use storefront_common::SuiteConfig;

use crate::error::E2eResult;
use crate::journey::Journey;
use crate::pages::home::LOGIN_MISMATCH_ERROR;
use crate::pages::{CartPage, CheckoutPage, DesktopsPage, HomePage, ProductsPage, ShippingInfo, Storefront};

pub const SUITE_LOGIN: &str = "Login";
pub const SUITE_PURCHASE: &str = "Compras";
pub const SUITE_ELECTRONICS: &str = "Comprando Eletronicos";

const BACKPACK_ADD: &str = "add-to-cart-sauce-labs-backpack";
const BACKPACK_REMOVE: &str = "remove-sauce-labs-backpack";
const BACKPACK_NAME: &str = "Sauce Labs Backpack";

/// A named journey builder
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub suite: &'static str,
    build: fn(&SuiteConfig) -> E2eResult<Journey>,
}

impl Scenario {
    pub fn build(&self, config: &SuiteConfig) -> E2eResult<Journey> {
        (self.build)(config)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .finish()
    }
}

/// Every scenario, in execution order
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario { name: "login-success", suite: SUITE_LOGIN, build: login_success },
        Scenario { name: "login-unknown-user", suite: SUITE_LOGIN, build: login_unknown_user },
        Scenario { name: "login-blank-user", suite: SUITE_LOGIN, build: login_blank_user },
        Scenario { name: "login-blank-password", suite: SUITE_LOGIN, build: login_blank_password },
        Scenario { name: "login-blank-both", suite: SUITE_LOGIN, build: login_blank_both },
        Scenario { name: "purchase-backpack", suite: SUITE_PURCHASE, build: purchase_backpack },
        Scenario { name: "checkout-cancel", suite: SUITE_PURCHASE, build: checkout_cancel },
        Scenario { name: "nopcommerce-desktop", suite: SUITE_ELECTRONICS, build: nop_commerce_desktop },
    ]
}

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn swag_labs(config: &SuiteConfig) -> HomePage {
    HomePage::new(Storefront::SwagLabs, config.swag_labs_url.as_str())
}

fn login_journey(name: &str, description: &str) -> Journey {
    Journey::new(name, SUITE_LOGIN)
        .with_parent_suite("Validações de Login")
        .with_description(description)
}

pub fn login_success(config: &SuiteConfig) -> E2eResult<Journey> {
    let (user, password) = config.credentials.require()?;
    let home = swag_labs(config);
    let mut journey = login_journey("login-success", "Valid credentials land on the inventory")
        .with_tags(["smoke"]);
    home.open(&mut journey);
    home.login(&mut journey, user, password);
    home.expect_inventory(&mut journey);
    Ok(journey)
}

fn rejected_login(config: &SuiteConfig, name: &str, description: &str, user: &str, password: &str) -> Journey {
    let home = swag_labs(config);
    let mut journey = login_journey(name, description).with_tags(["negative"]);
    home.open(&mut journey);
    home.login(&mut journey, user, password);
    home.expect_login_error(&mut journey, LOGIN_MISMATCH_ERROR);
    journey
}

pub fn login_unknown_user(config: &SuiteConfig) -> E2eResult<Journey> {
    Ok(rejected_login(
        config,
        "login-unknown-user",
        "Unregistered user is rejected",
        &random_token(10),
        &random_token(12),
    ))
}

pub fn login_blank_user(config: &SuiteConfig) -> E2eResult<Journey> {
    Ok(rejected_login(
        config,
        "login-blank-user",
        "Blank username is rejected",
        " ",
        &random_token(12),
    ))
}

pub fn login_blank_password(config: &SuiteConfig) -> E2eResult<Journey> {
    Ok(rejected_login(
        config,
        "login-blank-password",
        "Blank password is rejected",
        &random_token(10),
        " ",
    ))
}

pub fn login_blank_both(config: &SuiteConfig) -> E2eResult<Journey> {
    Ok(rejected_login(
        config,
        "login-blank-both",
        "Blank username and password are rejected",
        " ",
        " ",
    ))
}

/// Login, add the backpack, and walk checkout up to the overview
fn to_overview(config: &SuiteConfig, journey: &mut Journey) -> E2eResult<()> {
    let (user, password) = config.credentials.require()?;
    let home = swag_labs(config);
    let products = ProductsPage::new();
    let checkout = CheckoutPage::new();

    home.open(journey);
    home.login(journey, user, password);
    products.select_product(journey, BACKPACK_ADD);
    products.open_cart(journey);
    products.expect_product_added(journey, BACKPACK_REMOVE);
    CartPage::new().checkout(journey);
    checkout.fill_form(journey, &ShippingInfo::default());
    checkout.continue_to_overview(journey);
    checkout.expect_overview_item(journey, "inventory-item-name", BACKPACK_NAME);
    Ok(())
}

pub fn purchase_backpack(config: &SuiteConfig) -> E2eResult<Journey> {
    let mut journey = Journey::new("purchase-backpack", SUITE_PURCHASE)
        .with_parent_suite("Fluxo de compras")
        .with_description("Backpack purchase through to order confirmation")
        .with_tags(["smoke"]);
    to_overview(config, &mut journey)?;

    let checkout = CheckoutPage::new();
    checkout.finish(&mut journey);
    checkout.expect_complete(&mut journey);
    Ok(journey)
}

pub fn checkout_cancel(config: &SuiteConfig) -> E2eResult<Journey> {
    let mut journey = Journey::new("checkout-cancel", SUITE_PURCHASE)
        .with_parent_suite("Fluxo de compras")
        .with_description("Cancelling on the overview returns to the inventory, cart kept");
    to_overview(config, &mut journey)?;

    CheckoutPage::new().cancel(&mut journey);
    swag_labs(config).expect_inventory(&mut journey);
    ProductsPage::new().expect_product_added(&mut journey, BACKPACK_REMOVE);
    Ok(journey)
}

pub fn nop_commerce_desktop(config: &SuiteConfig) -> E2eResult<Journey> {
    let (user, password) = config.credentials.require()?;
    let home = HomePage::new(Storefront::NopCommerce, config.nop_commerce_url.as_str());
    let mut journey = Journey::new("nopcommerce-desktop", SUITE_ELECTRONICS)
        .with_description("Login and open a desktop from the Computers menu");

    home.open(&mut journey);
    home.login(&mut journey, user, password);
    home.shop_desktops(&mut journey);
    DesktopsPage::new().select_desktop(&mut journey, "Build your own computer");
    Ok(journey)
}

//! Landing/login page of either storefront

use crate::journey::Journey;
use crate::pages::join_url;

/// Message Swag Labs shows for any rejected login
pub const LOGIN_MISMATCH_ERROR: &str =
    "Epic sadface: Username and password do not match any user in this service";

/// Which sample application a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storefront {
    SwagLabs,
    NopCommerce,
}

impl Storefront {
    fn login_path(&self) -> &'static str {
        match self {
            Storefront::SwagLabs => "/",
            Storefront::NopCommerce => "/login?returnUrl=%2F",
        }
    }
}

/// Login form plus the catalog menu
#[derive(Debug, Clone)]
pub struct HomePage {
    storefront: Storefront,
    base_url: String,
    input_username: &'static str,
    input_password: &'static str,
    btn_login: &'static str,
    error_banner: &'static str,
    menu_computers: &'static str,
    menu_desktops: &'static str,
}

impl HomePage {
    pub fn new(storefront: Storefront, base_url: impl Into<String>) -> Self {
        let (input_username, input_password, btn_login) = match storefront {
            Storefront::SwagLabs => ("#user-name", "#password", "#login-button"),
            Storefront::NopCommerce => ("#Email", "#Password", ".buttons button[type='submit']"),
        };
        Self {
            storefront,
            base_url: base_url.into(),
            input_username,
            input_password,
            btn_login,
            error_banner: "[data-test=\"error\"]",
            menu_computers: ".notmobile a[href=\"/computers\"]",
            menu_desktops: ".notmobile a[href=\"/desktops\"]",
        }
    }

    pub fn storefront(&self) -> Storefront {
        self.storefront
    }

    /// Open the login page
    pub fn open(&self, journey: &mut Journey) {
        journey.navigate(join_url(&self.base_url, self.storefront.login_path()));
    }

    pub fn login(&self, journey: &mut Journey, username: &str, password: &str) {
        journey
            .fill(self.input_username, username)
            .fill_secret(self.input_password, password)
            .click(self.btn_login);
    }

    /// nopCommerce catalog: Computers, then Desktops
    pub fn shop_desktops(&self, journey: &mut Journey) {
        journey.click(self.menu_computers).click(self.menu_desktops);
    }

    pub fn expect_inventory(&self, journey: &mut Journey) {
        journey.expect_url(join_url(&self.base_url, "/inventory.html"));
    }

    pub fn expect_login_error(&self, journey: &mut Journey, message: &str) {
        journey.expect_text(self.error_banner, message);
    }
}

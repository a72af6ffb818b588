//! Static HTML pages
//!
//! Each page is a body fragment wrapped in the shared layout. The dashboard
//! and login pages sit behind the route guard; the rest are public.

use axum::response::Html;

const LAYOUT: &str = include_str!("../pages/layout.html");

/// A static page of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Services,
    Contact,
    Login,
    Dashboard,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Services => "Services",
            Page::Contact => "Contact",
            Page::Login => "Login",
            Page::Dashboard => "Dashboard",
        }
    }

    fn body(self) -> &'static str {
        match self {
            Page::Home => include_str!("../pages/home.html"),
            Page::About => include_str!("../pages/about.html"),
            Page::Services => include_str!("../pages/services.html"),
            Page::Contact => include_str!("../pages/contact.html"),
            Page::Login => include_str!("../pages/login.html"),
            Page::Dashboard => include_str!("../pages/dashboard.html"),
        }
    }

    /// Render the page inside the shared layout
    pub fn render(self) -> Html<String> {
        Html(
            LAYOUT
                .replace("{title}", self.title())
                .replace("{body}", self.body()),
        )
    }
}

pub async fn home() -> Html<String> {
    Page::Home.render()
}

pub async fn about() -> Html<String> {
    Page::About.render()
}

pub async fn services() -> Html<String> {
    Page::Services.render()
}

pub async fn contact() -> Html<String> {
    Page::Contact.render()
}

pub async fn login() -> Html<String> {
    Page::Login.render()
}

pub async fn dashboard() -> Html<String> {
    Page::Dashboard.render()
}

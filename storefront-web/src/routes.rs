//! URL fragment routes. The view router owns the page; these only carry it
//! in and out of the address bar.

use shared::router::Page;
use yew_router::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/:page")]
    Page { page: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// The page this route names; anything unrecognised shows products.
    pub fn page(&self) -> Page {
        match self {
            Self::Page { page } => Page::parse_or_default(page),
            Self::Home | Self::NotFound => Page::default(),
        }
    }
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        if page == Page::default() {
            Self::Home
        } else {
            Self::Page {
                page: page.as_str().to_string(),
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every screen the storefront can show.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    Auth,
    #[default]
    Products,
    Cart,
    Checkout,
    History,
    Details,
    OwnerDashboard,
}

impl Page {
    /// Identifier used in the URL fragment.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parse a page identifier, falling back to [`Page::Products`] for
    /// anything unknown. Accepts `#/cart`, `/cart` and `cart`.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.trim()
            .trim_start_matches('#')
            .trim_start_matches('/')
            .parse()
            .unwrap_or_default()
    }

    /// Pages reachable without a signed-in user.
    pub const fn allows_anonymous(self) -> bool {
        matches!(self, Self::Auth | Self::OwnerDashboard)
    }

    /// Heading and navigation label.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Auth => "Sign in",
            Self::Products => "Restaurants",
            Self::Cart => "Cart",
            Self::Checkout => "Checkout",
            Self::History => "Orders",
            Self::Details => "Order tracking",
            Self::OwnerDashboard => "Owner dashboard",
        }
    }

    /// Pages linked from the header.
    pub const fn in_navigation(self) -> bool {
        matches!(self, Self::Products | Self::Cart | Self::History)
    }
}

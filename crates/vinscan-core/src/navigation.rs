//! Fixed application routes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product name shown in every header
pub const PRODUCT_NAME: &str = "VINScan Pro";

/// One of the seven pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Marketing landing page
    Home,
    /// Sales contact form
    Contact,
    /// Dashboard shell
    Dashboard,
    /// Inventory table
    Inventory,
    /// Analytics reports
    Reports,
    /// VIN scanner
    Scanner,
    /// Subscription plans
    Pricing,
}

impl Route {
    /// Every route
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Contact,
        Self::Dashboard,
        Self::Inventory,
        Self::Reports,
        Self::Scanner,
        Self::Pricing,
    ];

    /// Routes listed in the application header, in order
    pub const HEADER: [Self; 5] = [
        Self::Dashboard,
        Self::Scanner,
        Self::Inventory,
        Self::Reports,
        Self::Pricing,
    ];

    /// URL path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Contact => "/contact",
            Self::Dashboard => "/dashboard",
            Self::Inventory => "/inventory",
            Self::Reports => "/reports",
            Self::Scanner => "/scanner",
            Self::Pricing => "/pricing",
        }
    }

    /// Link text
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Contact => "Contact Sales",
            Self::Dashboard => "Dashboard",
            Self::Inventory => "Inventory",
            Self::Reports => "Reports",
            Self::Scanner => "Scanner",
            Self::Pricing => "Pricing",
        }
    }

    /// Route serving `path`, if any
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A header link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Target route
    pub route: Route,
    /// URL path
    pub path: String,
    /// Link text
    pub title: String,
    /// Whether this is the current page
    pub active: bool,
}

/// Header block carried by every page payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// Product name
    pub product: String,
    /// Current page
    pub active: Route,
    /// Header links
    pub links: Vec<NavLink>,
}

impl Navigation {
    /// Header for `active`
    #[must_use]
    pub fn for_route(active: Route) -> Self {
        Self {
            product: PRODUCT_NAME.to_string(),
            active,
            links: Route::HEADER
                .into_iter()
                .map(|route| NavLink {
                    route,
                    path: route.path().to_string(),
                    title: route.title().to_string(),
                    active: route == active,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = Route::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(paths.len(), 7);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path("/reports"), Some(Route::Reports));
        assert_eq!(Route::from_path("/reports/"), Some(Route::Reports));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn test_navigation_marks_active() {
        let nav = Navigation::for_route(Route::Reports);

        assert_eq!(nav.product, "VINScan Pro");
        assert_eq!(nav.links.len(), 5);
        let active: Vec<_> = nav.links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].path, "/reports");
    }

    #[test]
    fn test_navigation_off_header_route() {
        let nav = Navigation::for_route(Route::Contact);
        assert!(nav.links.iter().all(|l| !l.active));
        assert_eq!(nav.active, Route::Contact);
    }
}

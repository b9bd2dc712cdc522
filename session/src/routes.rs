//! Route table for the authenticated shell.
//!
//! Unknown paths never error: [`Route::resolve`] falls back to the dashboard,
//! and [`redirect_target`] tells the router which URL to replace it with.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// A screen reachable inside the authenticated shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Orders,
    NewOrder,
    EditOrder(String),
    Employees,
    NewEmployee,
    EditEmployee(String),
    Inventory,
    Customers,
    Tasks,
    Reports,
}

impl Route {
    /// Match a browser path (query and fragment ignored, trailing slash
    /// tolerated). `/` maps to the dashboard.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let segments = segments(path);
        let route = match segments.as_slice() {
            [] | ["dashboard"] => Self::Dashboard,
            ["orders"] => Self::Orders,
            ["orders", "new"] => Self::NewOrder,
            ["orders", "edit", id] => Self::EditOrder((*id).to_owned()),
            ["employees"] => Self::Employees,
            ["employees", "new"] => Self::NewEmployee,
            ["employees", "edit", id] => Self::EditEmployee((*id).to_owned()),
            ["inventory"] => Self::Inventory,
            ["customers"] => Self::Customers,
            ["tasks"] => Self::Tasks,
            ["reports"] => Self::Reports,
            _ => return None,
        };
        Some(route)
    }

    /// Like [`Route::parse`], with unknown paths falling back to the dashboard.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        Self::parse(path).unwrap_or(Self::Dashboard)
    }

    /// Canonical URL for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Orders => "/orders".to_owned(),
            Self::NewOrder => "/orders/new".to_owned(),
            Self::EditOrder(id) => format!("/orders/edit/{id}"),
            Self::Employees => "/employees".to_owned(),
            Self::NewEmployee => "/employees/new".to_owned(),
            Self::EditEmployee(id) => format!("/employees/edit/{id}"),
            Self::Inventory => "/inventory".to_owned(),
            Self::Customers => "/customers".to_owned(),
            Self::Tasks => "/tasks".to_owned(),
            Self::Reports => "/reports".to_owned(),
        }
    }

    /// Sidebar entry this route belongs to.
    #[must_use]
    pub fn section(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Orders | Self::NewOrder | Self::EditOrder(_) => "/orders",
            Self::Employees | Self::NewEmployee | Self::EditEmployee(_) => "/employees",
            Self::Inventory => "/inventory",
            Self::Customers => "/customers",
            Self::Tasks => "/tasks",
            Self::Reports => "/reports",
        }
    }

    /// Page heading.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Orders => "Orders",
            Self::NewOrder => "New Order",
            Self::EditOrder(_) => "Edit Order",
            Self::Employees => "Employees",
            Self::NewEmployee => "New Employee",
            Self::EditEmployee(_) => "Edit Employee",
            Self::Inventory => "Inventory",
            Self::Customers => "Customers",
            Self::Tasks => "Tasks",
            Self::Reports => "Reports",
        }
    }
}

/// URL the router should replace `path` with, or `None` if it is canonical.
#[must_use]
pub fn redirect_target(path: &str) -> Option<String> {
    let normalized = format!("/{}", segments(path).join("/"));
    let route = Route::resolve(path);
    let canonical = route.path();
    (canonical != normalized).then_some(canonical)
}

/// One sidebar menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    /// Bootstrap icon class.
    pub icon: &'static str,
}

impl NavItem {
    /// Whether the item should be highlighted for `current_path`.
    #[must_use]
    pub fn is_active(&self, current_path: &str) -> bool {
        Route::resolve(current_path).section() == self.path
    }
}

pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem { path: "/dashboard", label: "Dashboard", icon: "bi-speedometer2" },
    NavItem { path: "/orders", label: "Orders", icon: "bi-clipboard-check" },
    NavItem { path: "/employees", label: "Employees", icon: "bi-people" },
    NavItem { path: "/inventory", label: "Inventory", icon: "bi-box-seam" },
    NavItem { path: "/customers", label: "Customers", icon: "bi-person-hearts" },
    NavItem { path: "/tasks", label: "Tasks", icon: "bi-check2-square" },
    NavItem { path: "/reports", label: "Reports", icon: "bi-graph-up" },
];

fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

//! Client-side routes.

/// Screens the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`: landing page with the login action.
    Landing,
    /// `/login`: hand-off to the service's GitHub sign-in.
    Login,
    /// `/dashboard`: tabbed workspace.
    Dashboard,
    /// Anything else.
    NotFound,
}

impl Route {
    /// Resolve a path; unknown paths land on [`Route::NotFound`].
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let trimmed = trimmed.split(['?', '#']).next().unwrap_or_default();
        match trimmed.trim_end_matches('/') {
            "" => Self::Landing,
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }
}

//! Application state and navigation.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use modbrand_core::{Logger, PendingImage, Role, User, classify_session, show_pending};
use tracing::{debug, info, warn};

use super::effects::{Completion, Effect, MountId, ProbeKind, Request, Response, failure_text};
use super::notice::{Notice, NoticeBoard};
use super::overview::ImageList;
use super::review::ReviewWorkflow;
use super::route::Route;
use super::submission::SubmissionWorkflow;
use super::tabs::{Tab, TabRouter};

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing the path of a file to stage (Submission tab).
    EditingPath,
}

/// Everything owned by one mounted dashboard.
///
/// The resolved [`User`] lives here and is only read by the child workflows.
/// Dropping the dashboard (navigation, logout) destroys it.
#[derive(Debug)]
pub struct Dashboard {
    user: Option<User>,
    pub tabs: TabRouter,
    pub images: ImageList,
    pub submission: SubmissionWorkflow,
    pub review: ReviewWorkflow,
    logging_out: bool,
}

impl Dashboard {
    fn new(log: &Logger) -> Self {
        Self {
            user: None,
            tabs: TabRouter::new(log.child("tabs")),
            images: ImageList::new(log.child("overview")),
            submission: SubmissionWorkflow::new(log.child("submission")),
            review: ReviewWorkflow::new(log.child("review")),
            logging_out: false,
        }
    }

    /// `None` until the session probe succeeds.
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Role {
        classify_session(self.user.as_ref())
    }

    pub fn show_pending(&self) -> bool {
        show_pending(self.user.as_ref())
    }

    pub const fn is_logging_out(&self) -> bool {
        self.logging_out
    }

    /// Fetch triggered by entering `tab`.
    fn on_enter(&mut self, tab: Tab) -> Option<Request> {
        match tab {
            Tab::Overview => Some(self.images.refresh()),
            Tab::Pending if self.show_pending() => Some(self.review.refresh()),
            Tab::Pending | Tab::Submission | Tab::Settings => None,
        }
    }
}

/// TUI application state.
pub struct App {
    route: Route,
    mount: MountId,
    dashboard: Option<Dashboard>,
    pub notices: NoticeBoard,
    pub mode: AppMode,
    pub path_input: String,
    /// Where to sign in with GitHub (the service's `/login`).
    pub login_url: String,
    pub should_quit: bool,
    log: Logger,
}

impl App {
    pub fn new(log: Logger, login_url: impl Into<String>, notice_ttl: Duration) -> Self {
        Self {
            route: Route::Landing,
            mount: MountId::default(),
            dashboard: None,
            notices: NoticeBoard::new(notice_ttl),
            mode: AppMode::Normal,
            path_input: String::new(),
            login_url: login_url.into(),
            should_quit: false,
            log,
        }
    }

    pub const fn route(&self) -> Route {
        self.route
    }

    pub const fn mount(&self) -> MountId {
        self.mount
    }

    pub const fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub const fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        self.dashboard.as_mut()
    }

    /// The signed-in user, once the dashboard has resolved one.
    pub fn user(&self) -> Option<&User> {
        self.dashboard.as_ref().and_then(Dashboard::user)
    }

    const fn effect(&self, request: Request) -> Effect {
        Effect {
            mount: self.mount,
            request,
        }
    }

    fn effects(&self, requests: impl IntoIterator<Item = Request>) -> Vec<Effect> {
        requests.into_iter().map(|r| self.effect(r)).collect()
    }

    /// Mount `route`. Whatever was mounted before is dropped and its
    /// outstanding completions become stale.
    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        self.mount = self.mount.next();
        info!(parent: self.log.span(), path = route.path(), mount = ?self.mount, "Navigate");
        self.route = route;
        self.mode = AppMode::Normal;
        self.path_input.clear();
        self.dashboard = None;
        match route {
            Route::Landing => self.effects([Request::ProbeSession(ProbeKind::LandingAuto)]),
            Route::Dashboard => {
                self.dashboard = Some(Dashboard::new(&self.log));
                self.effects([Request::ProbeSession(ProbeKind::Dashboard)])
            }
            Route::Login | Route::NotFound => Vec::new(),
        }
    }

    /// Landing page "Login" action.
    pub fn login(&mut self) -> Vec<Effect> {
        if self.route != Route::Landing {
            return Vec::new();
        }
        self.effects([Request::ProbeSession(ProbeKind::LandingLogin)])
    }

    /// Not-found page "go back" action.
    pub fn go_back(&mut self) -> Vec<Effect> {
        self.navigate(Route::Landing)
    }

    /// Apply a finished request.
    pub fn handle_completion(&mut self, completion: Completion) -> Vec<Effect> {
        if completion.mount != self.mount {
            debug!(
                parent: self.log.span(),
                completion = ?completion.mount,
                current = ?self.mount,
                "Dropping completion for unmounted view"
            );
            return Vec::new();
        }
        match completion.response {
            Response::Session(kind, result) => self.on_session(kind, result),
            Response::LoggedOut(result) => self.on_logged_out(result),
            other => self.on_dashboard_response(other),
        }
    }

    fn on_session(
        &mut self,
        kind: ProbeKind,
        result: Result<Option<User>, modbrand_client::ApiError>,
    ) -> Vec<Effect> {
        match (kind, result) {
            (ProbeKind::Dashboard, Ok(Some(user))) => {
                info!(parent: self.log.span(), login = %user.login, role = %classify_session(Some(&user)), "Session resolved");
                let Some(dash) = self.dashboard.as_mut() else {
                    return Vec::new();
                };
                dash.user = Some(user);
                let tab = dash.tabs.selected();
                let request = dash.on_enter(tab);
                self.effects(request)
            }
            (ProbeKind::Dashboard, Ok(None)) => {
                warn!(parent: self.log.span(), "No valid session, redirecting to login");
                self.navigate(Route::Login)
            }
            (ProbeKind::Dashboard, Err(err)) => {
                warn!(parent: self.log.span(), error = %err, "Session check failed, redirecting to landing");
                self.navigate(Route::Landing)
            }
            (ProbeKind::LandingAuto | ProbeKind::LandingLogin, Ok(Some(user))) => {
                debug!(parent: self.log.span(), login = %user.login, "Already signed in");
                self.navigate(Route::Dashboard)
            }
            (ProbeKind::LandingAuto, Ok(None)) => {
                debug!(parent: self.log.span(), "Not signed in");
                Vec::new()
            }
            (ProbeKind::LandingAuto, Err(err)) => {
                debug!(parent: self.log.span(), error = %err, "Landing session probe failed");
                Vec::new()
            }
            (ProbeKind::LandingLogin, _) => self.navigate(Route::Login),
        }
    }

    fn on_logged_out(&mut self, result: Result<(), modbrand_client::ApiError>) -> Vec<Effect> {
        if let Some(dash) = self.dashboard.as_mut() {
            dash.logging_out = false;
        }
        match result {
            Ok(()) => {
                info!(parent: self.log.span(), "Logged out");
                self.notices.show(Notice::info("Logged out"));
                self.navigate(Route::Landing)
            }
            Err(err) => {
                warn!(parent: self.log.span(), error = %err, "Logout failed");
                self.notices.show(Notice::error(format!(
                    "Failed to log out: {}",
                    failure_text(&err)
                )));
                Vec::new()
            }
        }
    }

    fn on_dashboard_response(&mut self, response: Response) -> Vec<Effect> {
        let Some(dash) = self.dashboard.as_mut() else {
            debug!(parent: self.log.span(), ?response, "Response without a dashboard");
            return Vec::new();
        };
        let (notice, follow_up) = match response {
            Response::Images(result) => (dash.images.on_list(result), None),
            Response::Pending(result) => (dash.review.on_list(result), None),
            Response::FileLoaded(Ok(upload)) => (
                dash.submission
                    .stage(upload)
                    .err()
                    .map(|e| Notice::error(e.to_string())),
                None,
            ),
            Response::FileLoaded(Err(text)) => (
                Some(Notice::error(format!("Could not read file: {text}"))),
                None,
            ),
            Response::Submitted(result) => (dash.submission.finish(result), None),
            Response::Accepted(id, result) => {
                let (notice, follow_up) = dash.review.on_accepted(&id, result);
                (Some(notice), follow_up)
            }
            Response::Rejected(id, result) => {
                let (notice, follow_up) = dash.review.on_rejected(&id, result);
                (Some(notice), follow_up)
            }
            Response::Deleted(id, result) => {
                let (notice, follow_up) = dash.images.on_deleted(&id, result);
                (Some(notice), follow_up)
            }
            Response::Verified(user_id, result) => {
                (Some(dash.review.on_verified(&user_id, result)), None)
            }
            Response::Session(..) | Response::LoggedOut(_) => (None, None),
        };
        if let Some(notice) = notice {
            self.notices.show(notice);
        }
        self.effects(follow_up)
    }

    /// Dashboard with a resolved user, the only state in which the tabbed
    /// workspace accepts input.
    fn ready_dashboard(&mut self) -> Option<&mut Dashboard> {
        self.dashboard.as_mut().filter(|d| d.user.is_some())
    }

    /// Select the tab at `position` among the visible tabs.
    pub fn select_tab_at(&mut self, position: usize) -> Vec<Effect> {
        let Some(dash) = self.ready_dashboard() else {
            return Vec::new();
        };
        let show = dash.show_pending();
        let request = dash
            .tabs
            .select_visible(position, show)
            .and_then(|tab| dash.on_enter(tab));
        self.effects(request)
    }

    pub fn cycle_tab(&mut self, delta: isize) -> Vec<Effect> {
        let Some(dash) = self.ready_dashboard() else {
            return Vec::new();
        };
        let show = dash.show_pending();
        let request = dash
            .tabs
            .cycle(delta, show)
            .and_then(|tab| dash.on_enter(tab));
        self.effects(request)
    }

    /// Re-fetch the list on the current tab.
    pub fn refresh(&mut self) -> Vec<Effect> {
        let Some(dash) = self.ready_dashboard() else {
            return Vec::new();
        };
        let tab = dash.tabs.selected();
        let request = dash.on_enter(tab);
        self.effects(request)
    }

    pub fn select_next(&mut self) {
        if let Some(dash) = self.ready_dashboard() {
            match dash.tabs.selected() {
                Tab::Overview => dash.images.select_next(),
                Tab::Pending => dash.review.select_next(),
                Tab::Submission | Tab::Settings => {}
            }
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(dash) = self.ready_dashboard() {
            match dash.tabs.selected() {
                Tab::Overview => dash.images.select_prev(),
                Tab::Pending => dash.review.select_prev(),
                Tab::Submission | Tab::Settings => {}
            }
        }
    }

    /// Delete the highlighted image on the Overview tab.
    pub fn delete_selected(&mut self) -> Vec<Effect> {
        let Some(dash) = self.ready_dashboard() else {
            return Vec::new();
        };
        if dash.tabs.selected() != Tab::Overview {
            return Vec::new();
        }
        let Some(id) = dash.images.selected_item().map(|i| i.id.clone()) else {
            return Vec::new();
        };
        let request = dash.images.delete(&id);
        self.effects(request)
    }

    /// The dashboard and its highlighted submission, when the Pending tab is
    /// both offered and selected.
    fn review_selection(&mut self) -> Option<(&mut Dashboard, PendingImage)> {
        let dash = self
            .ready_dashboard()
            .filter(|d| d.tabs.selected() == Tab::Pending && d.show_pending())?;
        let item = dash.review.selected_item()?.clone();
        Some((dash, item))
    }

    /// Accept the highlighted submission on the Pending tab.
    pub fn accept_selected(&mut self) -> Vec<Effect> {
        let request = self
            .review_selection()
            .and_then(|(dash, item)| dash.review.accept(&item.image.id));
        self.effects(request)
    }

    /// Reject (delete) the highlighted submission on the Pending tab.
    pub fn reject_selected(&mut self) -> Vec<Effect> {
        let request = self
            .review_selection()
            .and_then(|(dash, item)| dash.review.reject(&item.image.id));
        self.effects(request)
    }

    /// Mark the highlighted submission's author verified. Admin only.
    pub fn verify_selected(&mut self) -> Vec<Effect> {
        let request = self
            .review_selection()
            .filter(|(dash, _)| dash.role().can_verify())
            .and_then(|(dash, item)| dash.review.verify(&item.image.user_id));
        self.effects(request)
    }

    pub fn begin_path_edit(&mut self) {
        let editable = self
            .ready_dashboard()
            .is_some_and(|d| d.tabs.selected() == Tab::Submission && !d.submission.is_busy());
        if editable {
            self.mode = AppMode::EditingPath;
        }
    }

    pub const fn cancel_path_edit(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Finish typing a path and load that file for staging.
    pub fn commit_path(&mut self) -> Vec<Effect> {
        self.mode = AppMode::Normal;
        let path = self.path_input.trim().to_string();
        if path.is_empty() || self.ready_dashboard().is_none() {
            return Vec::new();
        }
        debug!(parent: self.log.span(), %path, "Loading file");
        self.effects([Request::LoadFile(PathBuf::from(path))])
    }

    /// Upload the staged file. No-op without one.
    pub fn submit(&mut self) -> Vec<Effect> {
        let Some(dash) = self.ready_dashboard() else {
            return Vec::new();
        };
        if dash.tabs.selected() != Tab::Submission {
            return Vec::new();
        }
        let request = dash.submission.submit();
        self.effects(request)
    }

    pub fn logout(&mut self) -> Vec<Effect> {
        let Some(dash) = self.ready_dashboard() else {
            return Vec::new();
        };
        if dash.logging_out {
            return Vec::new();
        }
        dash.logging_out = true;
        self.effects([Request::Logout])
    }

    /// Periodic housekeeping: expire notices.
    pub fn tick(&mut self, now: Instant) {
        self.notices.expire(now);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

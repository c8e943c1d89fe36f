//! In-memory [`BrandApi`] for tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use modbrand_client::{ApiError, BrandApi, Upload};
use modbrand_core::{BrandImage, PendingImage, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBehavior {
    Valid,
    Invalid,
    Broken,
}

#[derive(Debug, Default)]
struct State {
    images: Vec<BrandImage>,
    pending: Vec<PendingImage>,
    verified: Vec<String>,
    /// Canned rejections, keyed by call name.
    failures: HashMap<&'static str, (u16, String)>,
    calls: Vec<&'static str>,
    next_id: u64,
}

impl State {
    /// Record the call and return its canned rejection, if any.
    fn enter(&mut self, name: &'static str) -> Result<(), ApiError> {
        self.calls.push(name);
        match self.failures.get(name) {
            Some((status, message)) => Err(ApiError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub struct FakeApi {
    user: User,
    session: SessionBehavior,
    state: Mutex<State>,
}

pub fn image(id: &str, user_id: &str, pending: bool) -> BrandImage {
    BrandImage {
        id: id.into(),
        user_id: user_id.into(),
        image_url: format!("https://cdn.example/{id}.png"),
        created_at: Some("2024-05-01T00:00:00Z".into()),
        pending: Some(pending),
    }
}

fn not_found() -> ApiError {
    ApiError::Rejected {
        status: 404,
        message: "image not found".into(),
    }
}

impl FakeApi {
    pub fn new(user: User) -> Self {
        Self {
            user,
            session: SessionBehavior::Valid,
            state: Mutex::new(State {
                next_id: 100,
                ..State::default()
            }),
        }
    }

    #[must_use]
    pub const fn with_session(mut self, behavior: SessionBehavior) -> Self {
        self.session = behavior;
        self
    }

    /// Queue pending submissions by user 2 ("modder").
    #[must_use]
    pub fn with_pending(self, ids: &[&str]) -> Self {
        let pending = ids
            .iter()
            .map(|id| PendingImage {
                image: image(id, "2", true),
                login: Some("modder".into()),
            })
            .collect();
        self.state.lock().unwrap().pending = pending;
        self
    }

    #[must_use]
    pub fn with_images(self, images: Vec<BrandImage>) -> Self {
        self.state.lock().unwrap().images = images;
        self
    }

    /// Make every call to `name` fail with `status` and `message`.
    #[must_use]
    pub fn failing(self, name: &'static str, status: u16, message: &str) -> Self {
        let failure = (status, message.to_string());
        self.state.lock().unwrap().failures.insert(name, failure);
        self
    }

    /// How many times `name` was called.
    pub fn count(&self, name: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == name)
            .count()
    }

    pub fn images(&self) -> Vec<BrandImage> {
        self.state.lock().unwrap().images.clone()
    }

    pub fn verified(&self) -> Vec<String> {
        self.state.lock().unwrap().verified.clone()
    }
}

#[async_trait]
impl BrandApi for FakeApi {
    async fn session(&self) -> Result<Option<User>, ApiError> {
        self.state.lock().unwrap().calls.push("session");
        match self.session {
            SessionBehavior::Valid => Ok(Some(self.user.clone())),
            SessionBehavior::Invalid => Ok(None),
            SessionBehavior::Broken => Err(ApiError::Decode("unexpected end of input".into())),
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.state.lock().unwrap().enter("logout")
    }

    async fn list_images(&self) -> Result<Vec<BrandImage>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.enter("list_images")?;
        Ok(state.images.clone())
    }

    async fn submit(&self, _upload: &Upload) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.enter("submit")?;
        state.next_id += 1;
        let id = state.next_id.to_string();
        let owner = self.user.id.to_string();
        state.images.push(image(&id, &owner, true));
        drop(state);
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<PendingImage>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.enter("list_pending")?;
        Ok(state.pending.clone())
    }

    async fn accept(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.enter("accept")?;
        state.pending.retain(|p| p.image.id != id);
        drop(state);
        Ok(())
    }

    /// Owners delete their images; reviewers may also delete pending ones.
    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.enter("delete")?;
        let before = state.images.len() + state.pending.len();
        state.images.retain(|i| i.id != id);
        state.pending.retain(|p| p.image.id != id);
        let removed = state.images.len() + state.pending.len() < before;
        drop(state);
        if removed { Ok(()) } else { Err(not_found()) }
    }

    async fn verify_user(&self, user_id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.enter("verify_user")?;
        state.verified.push(user_id.to_string());
        drop(state);
        Ok(())
    }

    async fn ping(&self) -> Result<String, ApiError> {
        self.state.lock().unwrap().enter("ping")?;
        Ok("pong!".into())
    }
}

//! Backend abstraction
//!
//! Everything the dashboard needs from the REST service. The application
//! crate only talks to this trait, so tests can drive the full update loop
//! against an in-memory implementation.

use estate_core::prelude::*;
use estate_core::{Entity, EntityKind, MultipartPayload};

/// Operations of the admin REST service
#[trait_variant::make(AdminBackend: Send)]
pub trait LocalAdminBackend {
    /// `GET /{collection}`
    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>>;

    /// `GET /{collection}/{id}`
    async fn fetch(&self, kind: EntityKind, id: &str) -> Result<Entity>;

    /// `POST /{collection}` with a multipart body
    ///
    /// Returns the stored record when the response body contains one.
    async fn create(&self, kind: EntityKind, payload: MultipartPayload) -> Result<Option<Entity>>;

    /// `PUT` or `PATCH /{collection}/{id}` with a multipart body
    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        payload: MultipartPayload,
    ) -> Result<Option<Entity>>;

    /// `DELETE /{collection}/{id}`
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()>;

    /// `POST /auth/login`, returns the bearer token
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    /// `POST /chat`, returns the assistant reply
    async fn chat(&self, message: &str) -> Result<String>;
}

//! Driving port for validated state-changing relays.
//!
//! Callers validate the form and hold a CSRF token before reaching this
//! port; the implementation forwards one POST to the gateway and returns
//! the created snapshot.

use async_trait::async_trait;

use super::fixture_timestamp;
use crate::domain::forms::{
    AlbumForm, ImageForm, PermissionForm, ScopeForm, ServiceClientForm,
};
use crate::domain::records::{Album, Image, Permission, Scope, ServiceClient};
use crate::domain::{CsrfToken, Error, SessionId};

/// Domain use-case port for admin creations.
#[async_trait]
pub trait AdminRelay: Send + Sync {
    async fn create_scope(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &ScopeForm,
    ) -> Result<Scope, Error>;

    async fn create_permission(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &PermissionForm,
    ) -> Result<Permission, Error>;

    async fn create_service_client(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &ServiceClientForm,
    ) -> Result<ServiceClient, Error>;

    async fn create_album(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &AlbumForm,
    ) -> Result<Album, Error>;

    async fn create_image(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &ImageForm,
    ) -> Result<Image, Error>;
}

const FIXTURE_CREATED_AT: &str = "2024-06-21T14:00:00Z";

/// Echoing relay used by handler tests: every create succeeds and the
/// record mirrors the submitted form.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminRelay;

/// Derive a deterministic slug from a display string.
fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            'a'..='z' | '0'..='9' => slug.push(ch),
            'A'..='Z' => slug.push(ch.to_ascii_lowercase()),
            _ if slug.ends_with('-') || slug.is_empty() => {}
            _ => slug.push('-'),
        }
    }
    slug.trim_end_matches('-').to_owned()
}

#[async_trait]
impl AdminRelay for FixtureAdminRelay {
    async fn create_scope(
        &self,
        _session: &SessionId,
        _csrf: &CsrfToken,
        form: &ScopeForm,
    ) -> Result<Scope, Error> {
        Ok(Scope {
            slug: slugify(&form.name),
            name: form.name.clone(),
            description: form.description.clone(),
            created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        })
    }

    async fn create_permission(
        &self,
        _session: &SessionId,
        _csrf: &CsrfToken,
        form: &PermissionForm,
    ) -> Result<Permission, Error> {
        Ok(Permission {
            slug: slugify(&format!("{}-{}", form.subject, form.scope)),
            scope: form.scope.clone(),
            subject: form.subject.clone(),
            enabled: true,
            granted_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        })
    }

    async fn create_service_client(
        &self,
        _session: &SessionId,
        _csrf: &CsrfToken,
        form: &ServiceClientForm,
    ) -> Result<ServiceClient, Error> {
        let client_id = uuid::Uuid::parse_str(&form.client_id)
            .map_err(|_| Error::invalid_request("client id must be a valid UUID"))?;
        Ok(ServiceClient {
            slug: slugify(&form.display_name),
            display_name: form.display_name.clone(),
            client_id,
            redirect_uris: form.redirect_uris.clone(),
            enabled: true,
            created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        })
    }

    async fn create_album(
        &self,
        _session: &SessionId,
        _csrf: &CsrfToken,
        form: &AlbumForm,
    ) -> Result<Album, Error> {
        Ok(Album {
            slug: form.slug.clone(),
            title: form.title.clone(),
            description: form.description.clone(),
            cover_image: None,
            created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        })
    }

    async fn create_image(
        &self,
        _session: &SessionId,
        _csrf: &CsrfToken,
        form: &ImageForm,
    ) -> Result<Image, Error> {
        Ok(Image {
            slug: slugify(&form.file_name),
            title: form.title.clone(),
            file_name: form.file_name.clone(),
            caption: form.caption.clone(),
            album_slug: form.album_slug.clone(),
            uploaded_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        })
    }
}

//! Driving port for authenticated gateway reads.

use async_trait::async_trait;

use super::fixture_timestamp;
use crate::domain::records::{Album, Image, Permission, Scope, ServiceClient, TaskTemplate, User};
use crate::domain::{Error, SessionId, Slug};

/// Domain use-case port for the resource pages.
///
/// Each method is one authenticated GET against the gateway; the session
/// id travels as the correlation token. Results are snapshots — nothing
/// is cached between calls.
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    async fn permissions(&self, session: &SessionId) -> Result<Vec<Permission>, Error>;
    async fn scopes(&self, session: &SessionId) -> Result<Vec<Scope>, Error>;
    async fn users(&self, session: &SessionId) -> Result<Vec<User>, Error>;
    async fn task_templates(&self, session: &SessionId) -> Result<Vec<TaskTemplate>, Error>;
    async fn albums(&self, session: &SessionId) -> Result<Vec<Album>, Error>;
    async fn service_clients(&self, session: &SessionId) -> Result<Vec<ServiceClient>, Error>;
    async fn album_images(&self, session: &SessionId, album: &Slug) -> Result<Vec<Image>, Error>;
}

/// Canned directory used by handler tests and dev bring-up.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryQuery;

const FIXTURE_CREATED_AT: &str = "2024-06-21T14:00:00Z";

#[async_trait]
impl DirectoryQuery for FixtureDirectoryQuery {
    async fn permissions(&self, _session: &SessionId) -> Result<Vec<Permission>, Error> {
        Ok(vec![Permission {
            slug: "marta-albums-read".to_owned(),
            scope: "albums:read".to_owned(),
            subject: "marta".to_owned(),
            enabled: true,
            granted_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        }])
    }

    async fn scopes(&self, _session: &SessionId) -> Result<Vec<Scope>, Error> {
        Ok(vec![
            Scope {
                slug: "albums-read".to_owned(),
                name: "albums:read".to_owned(),
                description: "browse the gallery".to_owned(),
                created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
            },
            Scope {
                slug: "scopes-admin".to_owned(),
                name: "scopes:admin".to_owned(),
                description: "manage scopes".to_owned(),
                created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
            },
        ])
    }

    async fn users(&self, _session: &SessionId) -> Result<Vec<User>, Error> {
        Ok(vec![User {
            slug: "marta".to_owned(),
            display_name: "Marta".to_owned(),
            email: "marta@hearthside.example".to_owned(),
            enabled: true,
            created_at: fixture_timestamp("2023-02-11T09:30:00Z")?,
        }])
    }

    async fn task_templates(&self, _session: &SessionId) -> Result<Vec<TaskTemplate>, Error> {
        Ok(vec![TaskTemplate {
            slug: "water-the-garden".to_owned(),
            title: "Water the garden".to_owned(),
            notes: "Skip after heavy rain.".to_owned(),
            cadence: "weekly".to_owned(),
            enabled: true,
            created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        }])
    }

    async fn albums(&self, _session: &SessionId) -> Result<Vec<Album>, Error> {
        Ok(vec![Album {
            slug: "summer-fete-2024".to_owned(),
            title: "Summer fete".to_owned(),
            description: "Games on the lawn.".to_owned(),
            cover_image: Some("IMG_2041.jpg".to_owned()),
            created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        }])
    }

    async fn service_clients(&self, _session: &SessionId) -> Result<Vec<ServiceClient>, Error> {
        Ok(vec![ServiceClient {
            slug: "photo-frame".to_owned(),
            display_name: "Photo frame".to_owned(),
            client_id: uuid::Uuid::nil(),
            redirect_uris: vec!["https://frame.hearthside.example/callback".to_owned()],
            enabled: true,
            created_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        }])
    }

    async fn album_images(
        &self,
        _session: &SessionId,
        album: &Slug,
    ) -> Result<Vec<Image>, Error> {
        if album.as_ref() != "summer-fete-2024" {
            return Err(Error::not_found("album not found"));
        }
        Ok(vec![Image {
            slug: "sack-race".to_owned(),
            title: "Sack race".to_owned(),
            file_name: "IMG_2041.jpg".to_owned(),
            caption: "Finish line chaos.".to_owned(),
            album_slug: "summer-fete-2024".to_owned(),
            uploaded_at: fixture_timestamp(FIXTURE_CREATED_AT)?,
        }])
    }
}

//! Resource page handlers backed by the gateway fetcher.
//!
//! Every handler requires a session cookie, performs one authenticated
//! GET through the directory port, and shapes the snapshot for its page.
//! The admin tables (permissions, scopes, users, task templates, service
//! clients) run the shared listing engine — filter, stable sort,
//! fixed-size pages — driven by query parameters; the gallery endpoints
//! return plain snapshots. Failed fetches gain the presentational banner
//! for their error code.

use actix_web::{get, web};
use serde::Deserialize;

use listing::{ListQuery, Page, PageRequest, Sort, SortDirection};

use crate::domain::records::{Album, Image, Permission, Scope, ServiceClient, TaskTemplate, User};
use crate::domain::{ApiResult, Banner, Error, Slug};
use crate::inbound::http::cookies::CookieGate;
use crate::inbound::http::state::HttpState;

/// Rows per table page when the frontend does not ask for a size.
const DEFAULT_PAGE_SIZE: usize = 25;

/// Optional table controls accepted by the admin listings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableParams {
    /// Substring needle matched across the table's filter columns.
    pub filter: Option<String>,
    /// Column to sort by; omitted keeps gateway order.
    pub sort_column: Option<String>,
    /// `ascending` (default) or `descending`.
    pub sort_direction: Option<SortDirection>,
    /// 1-based page number.
    pub page: Option<usize>,
    /// Rows per page.
    pub page_size: Option<usize>,
}

impl TableParams {
    fn into_list_query(self, filter_keys: &[&str]) -> Result<ListQuery, Error> {
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        let sort = self.sort_column.map(|column| Sort {
            column,
            direction: self.sort_direction.unwrap_or(SortDirection::Ascending),
        });
        Ok(ListQuery {
            filter: self.filter,
            filter_keys: filter_keys.iter().map(|key| (*key).to_owned()).collect(),
            sort,
            page,
        })
    }
}

fn shape<R>(rows: Vec<R>, params: TableParams, filter_keys: &[&str]) -> Result<Page<R>, Error>
where
    R: listing::Row + Clone,
{
    let query = params.into_list_query(filter_keys)?;
    Ok(listing::list(&rows, &query))
}

/// List scope grants as a table page.
#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    responses(
        (status = 200, description = "One page of permissions"),
        (status = 400, description = "Invalid table parameters", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listPermissions"
)]
#[get("/permissions")]
pub async fn list_permissions(
    state: web::Data<HttpState>,
    gate: CookieGate,
    params: web::Query<TableParams>,
) -> ApiResult<web::Json<Page<Permission>>> {
    let session = gate.require_session()?;
    let records = state
        .directory
        .permissions(&session)
        .await
        .map_err(Banner::attach)?;
    Ok(web::Json(shape(
        records,
        params.into_inner(),
        Permission::FILTER_KEYS,
    )?))
}

/// List authorization scopes as a table page.
#[utoipa::path(
    get,
    path = "/api/v1/scopes",
    responses(
        (status = 200, description = "One page of scopes"),
        (status = 400, description = "Invalid table parameters", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listScopes"
)]
#[get("/scopes")]
pub async fn list_scopes(
    state: web::Data<HttpState>,
    gate: CookieGate,
    params: web::Query<TableParams>,
) -> ApiResult<web::Json<Page<Scope>>> {
    let session = gate.require_session()?;
    let records = state
        .directory
        .scopes(&session)
        .await
        .map_err(Banner::attach)?;
    Ok(web::Json(shape(
        records,
        params.into_inner(),
        Scope::FILTER_KEYS,
    )?))
}

/// List family member accounts as a table page.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "One page of users"),
        (status = 400, description = "Invalid table parameters", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    gate: CookieGate,
    params: web::Query<TableParams>,
) -> ApiResult<web::Json<Page<User>>> {
    let session = gate.require_session()?;
    let records = state
        .directory
        .users(&session)
        .await
        .map_err(Banner::attach)?;
    Ok(web::Json(shape(
        records,
        params.into_inner(),
        User::FILTER_KEYS,
    )?))
}

/// List recurring task templates as a table page.
#[utoipa::path(
    get,
    path = "/api/v1/task-templates",
    responses(
        (status = 200, description = "One page of task templates"),
        (status = 400, description = "Invalid table parameters", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listTaskTemplates"
)]
#[get("/task-templates")]
pub async fn list_task_templates(
    state: web::Data<HttpState>,
    gate: CookieGate,
    params: web::Query<TableParams>,
) -> ApiResult<web::Json<Page<TaskTemplate>>> {
    let session = gate.require_session()?;
    let records = state
        .directory
        .task_templates(&session)
        .await
        .map_err(Banner::attach)?;
    Ok(web::Json(shape(
        records,
        params.into_inner(),
        TaskTemplate::FILTER_KEYS,
    )?))
}

/// List registered service clients as a table page.
#[utoipa::path(
    get,
    path = "/api/v1/service-clients",
    responses(
        (status = 200, description = "One page of service clients"),
        (status = 400, description = "Invalid table parameters", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listServiceClients"
)]
#[get("/service-clients")]
pub async fn list_service_clients(
    state: web::Data<HttpState>,
    gate: CookieGate,
    params: web::Query<TableParams>,
) -> ApiResult<web::Json<Page<ServiceClient>>> {
    let session = gate.require_session()?;
    let records = state
        .directory
        .service_clients(&session)
        .await
        .map_err(Banner::attach)?;
    Ok(web::Json(shape(
        records,
        params.into_inner(),
        ServiceClient::FILTER_KEYS,
    )?))
}

/// List gallery albums.
#[utoipa::path(
    get,
    path = "/api/v1/albums",
    responses(
        (status = 200, description = "Albums", body = [Album]),
        (status = 401, description = "Session not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listAlbums"
)]
#[get("/albums")]
pub async fn list_albums(
    state: web::Data<HttpState>,
    gate: CookieGate,
) -> ApiResult<web::Json<Vec<Album>>> {
    let session = gate.require_session()?;
    let records = state
        .directory
        .albums(&session)
        .await
        .map_err(Banner::attach)?;
    Ok(web::Json(records))
}

/// List the images of one album.
#[utoipa::path(
    get,
    path = "/api/v1/albums/{slug}/images",
    params(("slug" = String, Path, description = "Album slug")),
    responses(
        (status = 200, description = "Images", body = [Image]),
        (status = 400, description = "Invalid slug", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 404, description = "Album not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listAlbumImages"
)]
#[get("/albums/{slug}/images")]
pub async fn list_album_images(
    state: web::Data<HttpState>,
    gate: CookieGate,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Image>>> {
    let session = gate.require_session()?;
    let album =
        Slug::new(path.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    let records = state
        .directory
        .album_images(&session, &album)
        .await
        .map_err(Banner::attach)?;
    Ok(web::Json(records))
}

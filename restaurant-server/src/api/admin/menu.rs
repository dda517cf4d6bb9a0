//! Admin menu management
//!
//! `POST /admin/menu` carries either a delete action (`delete_id`) or a new
//! item. The create form is `multipart/form-data` so it can include an
//! image; a urlencoded body is accepted too (delete, or create without
//! image). `delete_id` wins when both are present.

use askama::Template;
use axum::Form;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use shared::{MenuItem, ValidationError};
use shared::models::MenuItemCreate;
use shared::util::record_id;

use crate::api::render;
use crate::api::views::MenuItemView;
use crate::auth::AdminSession;
use crate::core::ServerState;
use crate::security_log;
use crate::i18n::{Lang, Translator, with_lang};
use crate::services::UploadedFile;
use crate::utils::{AppError, AppResult};

const PATH: &str = "/admin/menu";

/// Multipart field holding the image file
const IMAGE_FIELD: &str = "image";

#[derive(Template)]
#[template(path = "admin_menu.html")]
struct MenuAdminTemplate {
    i18n: Translator,
    path: &'static str,
    items: Vec<MenuItemView>,
    error_key: Option<&'static str>,
    /// 创建失败时回填的表单
    draft: MenuItemCreate,
}

/// Body of `POST /admin/menu`
#[derive(Debug, Default)]
pub struct MenuSubmission {
    pub delete_id: String,
    pub item: MenuItemCreate,
    pub image: Option<UploadedFile>,
    /// Set when the body hit the request size limit while reading the form
    pub upload_error: Option<ValidationError>,
}

/// Urlencoded variant of the form (no file)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MenuFields {
    delete_id: String,
    name: String,
    category: String,
    description: String,
    price: String,
}

impl From<MenuFields> for MenuSubmission {
    fn from(fields: MenuFields) -> Self {
        Self {
            delete_id: fields.delete_id,
            item: MenuItemCreate {
                name: fields.name,
                category: fields.category,
                description: fields.description,
                price: fields.price,
            },
            image: None,
            upload_error: None,
        }
    }
}

impl MenuSubmission {
    async fn from_multipart(mut multipart: Multipart, max_bytes: usize) -> AppResult<Self> {
        let mut submission = MenuSubmission::default();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    submission.upload_error = Some(size_limit_error(e, max_bytes)?);
                    break;
                }
            };

            let name = field.name().unwrap_or_default().to_string();
            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        submission.image = Some(UploadedFile {
                            file_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                    Err(e) => {
                        submission.upload_error = Some(size_limit_error(e, max_bytes)?);
                        break;
                    }
                }
                continue;
            }

            let value = match field.text().await {
                Ok(value) => value,
                Err(e) => {
                    submission.upload_error = Some(size_limit_error(e, max_bytes)?);
                    break;
                }
            };
            match name.as_str() {
                "delete_id" => submission.delete_id = value,
                "name" => submission.item.name = value,
                "category" => submission.item.category = value,
                "description" => submission.item.description = value,
                "price" => submission.item.price = value,
                _ => tracing::debug!(field = %name, "Ignoring unknown menu form field"),
            }
        }

        Ok(submission)
    }

    fn delete_target(&self) -> Option<&str> {
        let id = self.delete_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

/// A body cut off at the request size limit becomes `ImageTooLarge`;
/// any other multipart failure is a bad request.
fn size_limit_error(e: MultipartError, max_bytes: usize) -> AppResult<ValidationError> {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::info!(error = %e, "Menu form exceeded the request size limit");
        Ok(ValidationError::ImageTooLarge { max: max_bytes })
    } else {
        Err(e.into())
    }
}

impl FromRequest<ServerState> for MenuSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &ServerState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await?;
            Self::from_multipart(multipart, state.images.max_bytes()).await
        } else {
            let Form(fields) = Form::<MenuFields>::from_request(req, state).await?;
            Ok(fields.into())
        }
    }
}

fn render_page(
    state: &ServerState,
    lang: Lang,
    error_key: Option<&'static str>,
    draft: MenuItemCreate,
) -> AppResult<Response> {
    let items = state
        .menu
        .find_newest_first()?
        .iter()
        .map(|item| MenuItemView::from_item(item, lang))
        .collect();

    let page = render(MenuAdminTemplate {
        i18n: Translator::new(lang),
        path: PATH,
        items,
        error_key,
        draft,
    })?;

    let status = if error_key.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, page).into_response())
}

pub async fn list(
    State(state): State<ServerState>,
    _session: AdminSession,
    lang: Lang,
) -> AppResult<Response> {
    render_page(&state, lang, None, MenuItemCreate::default())
}

/// 删除或新增菜品
///
/// 新增失败 (价格/图片校验、写入失败) 时留在当前页面并显示错误，
/// 不保存任何数据。
pub async fn submit(
    State(state): State<ServerState>,
    session: AdminSession,
    lang: Lang,
    submission: MenuSubmission,
) -> AppResult<Response> {
    if let Some(id) = submission.delete_target() {
        if state.menu.delete(id)? {
            security_log!(
                "INFO",
                "admin_record_deleted",
                collection = "menu",
                id = id.to_string(),
                session_id = session.session_id.clone()
            );
        }
        return Ok(Redirect::to(&with_lang(PATH, lang)).into_response());
    }

    let draft = submission.item.clone();
    match create_menu_item(&state, submission) {
        Ok(item) => {
            security_log!(
                "INFO",
                "admin_menu_item_created",
                id = item.id,
                session_id = session.session_id
            );
            Ok(Redirect::to(&with_lang(PATH, lang)).into_response())
        }
        Err(AppError::Validation(e)) => {
            tracing::info!(error = %e, "Menu item rejected");
            render_page(&state, lang, Some(e.translation_key()), draft)
        }
        Err(AppError::Storage(e)) => {
            tracing::error!(target: "storage", error = %e, "Failed to save menu item");
            render_page(&state, lang, Some("error_storage"), draft)
        }
        Err(e) => Err(e),
    }
}

/// Validate the fields, then store the image, then append the item.
///
/// The price is checked before the image is written so a rejected form
/// leaves nothing on disk.
fn create_menu_item(state: &ServerState, submission: MenuSubmission) -> AppResult<MenuItem> {
    if let Some(e) = submission.upload_error {
        return Err(e.into());
    }
    let draft = submission.item.validate()?;
    let image = state.images.store(submission.image.as_ref())?;
    let item = draft.into_item(record_id(), image);
    Ok(state.menu.append(item)?)
}

use std::collections::HashSet;
use std::io::Write;

use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use futures_util::{StreamExt, TryStreamExt};
use log::{error, info, warn};
use shared::ScreeningReport;

use crate::auth::{CredentialGate, LoginForm};
use crate::inference::{OnnxScorer, SlotRegistry};
use crate::pages;
use crate::storage::{StorageError, UploadStore};

pub fn configure_routes(cfg: &mut web::ServiceConfig, upload_dir: String) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(login_form))
            .route(web::post().to(login_submit)),
    )
    .service(web::resource("/home").route(web::get().to(home)))
    .service(
        web::resource("/index")
            .route(web::get().to(upload_form))
            .route(web::post().to(handle_upload)),
    )
    .service(Files::new("/uploads", upload_dir));
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn login_form() -> HttpResponse {
    html(pages::login_page())
}

async fn login_submit(
    gate: web::Data<CredentialGate>,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    if gate.authenticate(&form.username, &form.password) {
        info!("login accepted for {}", form.username);
        see_other("/home")
    } else {
        // No error detail surfaced; the form simply comes back.
        warn!("login rejected for {}", form.username);
        html(pages::login_page())
    }
}

async fn home() -> HttpResponse {
    html(pages::home_page())
}

async fn upload_form(registry: web::Data<SlotRegistry>) -> HttpResponse {
    html(pages::upload_page(&registry, None))
}

async fn handle_upload(
    req: HttpRequest,
    mut payload: Multipart,
    store: web::Data<UploadStore>,
    registry: web::Data<SlotRegistry>,
    scorer: web::Data<OnnxScorer>,
) -> Result<HttpResponse, Error> {
    let mut file_name: Option<String> = None;
    let mut file_data: Vec<u8> = Vec::new();
    let mut selected: HashSet<String> = HashSet::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let Some(disposition) = field.content_disposition() else {
            continue;
        };
        let field_name = disposition.get_name().unwrap_or_default().to_string();
        let field_filename = disposition.get_filename().map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk?;
            data.write_all(&bytes)?;
        }

        if field_name == "file" {
            file_name = field_filename;
            file_data = data;
        } else if !field_name.is_empty() {
            // Checkbox flags carry the slot key as the field name; presence
            // is what selects the slot.
            selected.insert(field_name);
        }
    }

    let Some(file_name) = file_name.filter(|name| !name.is_empty()) else {
        warn!("upload rejected: no file part");
        return Ok(see_other("/index"));
    };

    let image_path = match store.save(&file_name, &file_data) {
        Ok(path) => path,
        Err(StorageError::Io(err)) => {
            error!("failed to persist upload {:?}: {}", file_name, err);
            return Ok(HttpResponse::InternalServerError().body("Upload failed"));
        }
        Err(err) => {
            warn!("upload rejected for {:?}: {}", file_name, err);
            return Ok(see_other("/index"));
        }
    };

    if !image_path.exists() {
        return Ok(HttpResponse::NotFound().body("Image not found"));
    }

    let stored_name = image_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();

    info!(
        "stored upload {} ({} bytes), {} slot(s) selected",
        stored_name,
        file_data.len(),
        selected.len()
    );

    let outcomes = registry.run_selected(scorer.get_ref(), &image_path, &selected);
    let report = ScreeningReport {
        filename: stored_name,
        outcomes,
    };

    if wants_json(&req) {
        return Ok(HttpResponse::Ok().json(report));
    }
    Ok(html(pages::upload_page(&registry, Some(&report))))
}

fn wants_json(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|accept| accept.starts_with("application/json"))
        .unwrap_or(false)
}

use std::env;
use std::path::Path;

use actix_web::{web, App, HttpServer};
use backend::auth::CredentialGate;
use backend::inference::{OnnxScorer, SlotRegistry};
use backend::routes::configure_routes;
use backend::storage::UploadStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
    let model_dir = env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string());
    let config_path =
        env::var("MODEL_CONFIG").unwrap_or_else(|_| "config/models.yaml".to_string());

    std::fs::create_dir_all(&upload_dir)?;

    let registry = match SlotRegistry::load(&model_dir, Path::new(&config_path)) {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("Failed to load slot registry: {:?}", e);
            return Err(std::io::Error::other(format!(
                "Slot registry loading failed: {:?}",
                e
            )));
        }
    };

    for slot in registry.enabled() {
        let artifact = registry.artifact_path(slot);
        if artifact.exists() {
            log::info!("{} artifact found at {}", slot.display_name, artifact.display());
        } else {
            log::warn!(
                "{} artifact missing at {}; the slot will report it as not available",
                slot.display_name,
                artifact.display()
            );
        }
    }

    let gate = CredentialGate::default();
    let store = UploadStore::new(&upload_dir);
    let scorer = OnnxScorer;

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(gate.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(scorer))
            .configure(|cfg| configure_routes(cfg, upload_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}

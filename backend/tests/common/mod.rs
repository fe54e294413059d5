mod fixtures;
pub use fixtures::*;

use std::path::Path;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};

use backend::auth::CredentialGate;
use backend::inference::{builtin_slots, OnnxScorer, SlotRegistry};
use backend::routes::configure_routes;
use backend::storage::UploadStore;

/// The composed application, wired the way `main` wires it but against
/// caller-owned temp directories.
pub fn build_app(
    upload_dir: &Path,
    model_dir: &Path,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = Error,
        InitError = (),
    > + use<>,
> {
    let upload_dir = upload_dir.to_string_lossy().into_owned();
    App::new()
        .app_data(web::Data::new(CredentialGate::default()))
        .app_data(web::Data::new(UploadStore::new(&upload_dir)))
        .app_data(web::Data::new(SlotRegistry::new(model_dir, builtin_slots())))
        .app_data(web::Data::new(OnnxScorer))
        .configure(|cfg| configure_routes(cfg, upload_dir.clone()))
}

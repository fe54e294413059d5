mod upload_store;

pub use upload_store::{StorageError, UploadStore, ALLOWED_EXTENSIONS};

mod gate;
mod models;

pub use gate::CredentialGate;
pub use models::LoginForm;

mod jwks;
mod validator;

pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;

pub use jwks::JwksClient;
pub use validator::JwtValidator;

//! Network-facing adapters: the reqwest transport and avatar encoding.

pub mod avatar;
pub mod reqwest_transport;

pub use avatar::encode_avatar;
pub use reqwest_transport::ReqwestTransport;

pub mod dispatch;
pub mod form;
pub mod render;
pub mod routes;

pub use dispatch::Dispatcher;
pub use form::{FormInput, PageState};
pub use routes::{routes, serve};

pub mod service;
pub mod spec;

pub use service::EventApiService;
pub use spec::{ApiResponse, EventApiSpec, HttpMethod, QueryItem, ResponseKind};

// Domain layer: wire DTOs, UI models and ports (interfaces).

pub mod dto;
pub mod model;
pub mod ports;

// Domain layer: wire models, request properties, render errors and ports
// for the external collaborators.

pub mod error;
pub mod model;
pub mod ports;
pub mod properties;

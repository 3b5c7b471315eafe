// Domain layer: identifiers, external object models, forms and the manager ports.

pub mod forms;
pub mod id;
pub mod locale;
pub mod model;
pub mod ports;
pub mod summary;

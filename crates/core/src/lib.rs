pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use domain::product::{CatalogSummary, NewProduct, Product, ProductId, ProductPatch};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use validation::{FieldError, Payload};

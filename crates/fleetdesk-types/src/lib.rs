pub mod entities;
pub mod envelope;
pub mod error;
pub mod forms;
pub mod normalize;
pub mod session;
pub mod validation;

pub use entities::*;
pub use error::NormalizeError;
pub use forms::{EntityForm, FormMode};
pub use session::*;
pub use validation::FieldErrors;

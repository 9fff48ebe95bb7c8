//! ResourceStore: generic CRUD using the safe SQL builder, plus record validation.

mod crud;
mod validation;
pub use crud::ResourceStore;
pub use validation::RecordValidator;

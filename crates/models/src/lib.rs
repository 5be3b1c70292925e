//! Record kinds served by the API and their cleaning/validation rules.
//! - `Thing` and `Venture` share the `Record` contract used by the generic store.
//! - Bulk update field names are closed enums parsed with `FromStr`.

pub mod errors;
pub mod record;
pub mod thing;
pub mod venture;

pub use errors::ModelError;
pub use record::{parse_fields, Record};
pub use thing::{Thing, ThingField};
pub use venture::{Venture, VentureField, VentureModification};

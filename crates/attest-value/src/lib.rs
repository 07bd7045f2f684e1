//! Foundation value model for the attest toolkit.
//!
//! Everything the structural differ compares is first expressed as a
//! [`Value`]: a closed tagged-variant model covering scalars, sequences,
//! maps, records, and reference-bearing kinds. Shared and cyclic object
//! graphs are built with [`ValueCell`] (`Rc<RefCell<Value>>`) nodes whose
//! addresses feed the differ's cycle detection.
//!
//! Caller-defined types do not need hand-written conversions: [`to_value`]
//! lowers any `serde::Serialize` type into the model, and
//! `serde_json::Value` converts via `From`.

pub mod error;
pub mod key;
pub mod ser;
pub mod value;

mod json;

pub use error::{ValueError, ValueResult};
pub use key::MapKey;
pub use ser::to_value;
pub use value::{Kind, Value, ValueCell};

//! kinetic-api-core: raw values, property paths and property access
//! (engine-agnostic).

pub mod access;
pub mod color;
pub mod json;
pub mod shape;
pub mod store;
pub mod typed_path;
pub mod value;

pub use access::{AccessError, PropertyAccess};
pub use color::{ColorError, Rgba};
pub use shape::{classify, Category, Shape};
pub use store::PropertyStore;
pub use typed_path::PropertyPath;
pub use value::{RecordMap, Value, ValueKind};

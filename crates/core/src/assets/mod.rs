//! Assets module - declared wealth snapshot and input categories.

mod assets_model;


pub use assets_model::{AssetCategory, AssetInputs, AssetSnapshot};

#![deny(unsafe_code)]

mod config_blob;
mod data_center;
mod dc_options;
mod generated;
mod session;
pub mod storages;

pub use config_blob::{ConfigBlob, Error as ConfigBlobError};
pub use data_center::DataCenterExtractor;
pub use dc_options::{DEFAULT_DC, KNOWN_DC_OPTIONS};
pub use generated::LAYER as VERSION;
pub use generated::enums::DataCenter;
pub use session::{DcOption, Session};

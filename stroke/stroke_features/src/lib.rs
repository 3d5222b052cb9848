//! Feature encoding for the stroke risk model.
//!
//! Maps a patient record, as collected by the input form, to the fixed-order
//! numeric vector the scaler and classifier were fit on. The mapping lives in
//! [`table`] and is versioned by [`ENCODING_VERSION`].

pub mod attributes;
pub mod encoder;
pub mod error;
pub mod table;

pub use attributes::PatientAttributes;
pub use encoder::{encode, FeatureVector};
pub use error::EncodingError;
pub use table::{
    Column, EncodingTable, Gender, ResidenceType, SmokingStatus, WorkType, ENCODING_VERSION,
    FEATURE_COUNT, FEATURE_NAMES,
};

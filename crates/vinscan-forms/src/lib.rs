//! Form and VIN scanner controllers for `VINScan Pro`
//!
//! Each controller owns an explicit state object, changes it only through a
//! reducer-style transition, and runs its simulated network delays as
//! cancellable tasks so that unmounting a view stops any pending update.
//! External collaborators (submission sink, VIN decoder, camera) sit behind
//! async traits with logging and mock implementations.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::significant_drop_tightening,
    clippy::unnecessary_literal_bound,
    clippy::return_self_not_must_use,
    clippy::unused_async,
    clippy::future_not_send
)]

pub mod camera;
pub mod contact;
pub mod decoder;
pub mod error;
pub mod mock;
pub mod scanner;
pub mod sink;
pub mod task;

pub use camera::{CameraDevice, CameraPermission, CameraStream, FacingMode, SimulatedCamera};
pub use contact::{
    ContactAction, ContactField, ContactFormController, ContactFormState, FormPhase,
    SubmissionReceipt, reduce,
};
pub use decoder::{DecodedVehicle, MockVinDecoder, VinDecoder};
pub use error::{FormError, FormResult};
pub use scanner::{ScanMode, ScannerController, ScannerState};
pub use sink::{AnalyticsEvent, LoggingSink, SubmissionRecord, SubmissionSink};

// Re-export commonly used items
pub use mock::RecordingSink;

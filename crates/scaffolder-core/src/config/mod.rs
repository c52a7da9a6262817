//! Generation settings collected from the user

pub mod generator;

pub use generator::{
    completion_message, detect_package_manager, Answers, PackageManager, PACKAGE_MANAGERS,
};

//! Environment-driven tuning shared by CI jobs and local test runs.

pub mod property_test_profile;

pub use property_test_profile::ProptestRunProfile;

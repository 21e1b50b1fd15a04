//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod arn;
pub mod config;
pub mod device;
pub mod error;
pub mod pool;
pub mod reconcile;
pub mod remote;

pub use arn::{Arn, parse_descriptor, parse_descriptors};
pub use config::{BuildManifest, RepoConfig, RunnableManifest, TestSpec, UploadSettings};
pub use device::{DeviceQuery, descriptor_for, search_devices};
pub use error::{ArnError, BuildError, ConfigError, PoolError, UploadError};
pub use pool::{FlatPoolDefinitions, PoolDefinitions, flatten, flatten_pool};
pub use reconcile::{MembershipCheck, PoolPlan, plan_pool, remote_pool_name};
pub use remote::{
    Device, DevicePlatform, PoolRule, RemotePool, RunRequest, TestType, UploadKind, UploadSlot,
    UploadStatus,
};

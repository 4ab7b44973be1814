//! Back up a VK user's profile photos to Yandex Disk.
//!
//! The flow is a single linear pass: resolve the user identifier, fetch one
//! page of profile photo metadata, pick the max-resolution variant of each
//! photo, upload the photos to Yandex Disk and write a JSON summary of the
//! selected URLs.

pub mod commands;
pub mod config;
pub mod datetime_utils;
pub mod disk;
pub mod error_utils;
pub mod filename_utils;
pub mod media;
pub mod pacing;
pub mod selection;
pub mod storage;
pub mod vk;

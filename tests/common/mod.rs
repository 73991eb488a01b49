#![allow(dead_code)]

mod stub_api;

pub use stub_api::{StubApi, raw_commit};

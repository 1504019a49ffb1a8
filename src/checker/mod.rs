// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - status:   what a classified link looks like (LinkStatus and friends)
// - http:     the Probe seam and the reqwest-backed HttpProber
// - classify: skip policy, bounded probe pool, cancellation
//
// This is the only part of the analysis that touches the network.
// =============================================================================

mod classify;
mod http;
mod status;

pub use classify::{
    skip_reason, validate_images, validate_images_until, validate_links, validate_links_until,
    Validation,
};
pub use http::{HttpProber, Probe};
pub use status::{Failure, LinkStatus, ProbeError, SkipReason};

//! Sequential patch generation and application
//!
//! This module contains the patch half of the crate:
//!
//! - `apply`: replaying patch steps against a sequence
//! - `extended`: move-aware patch steps
//! - `reorder`: index correction for caller-ordered application
//! - `step`: plain insertion/deletion steps and their generation

pub mod apply;
pub mod extended;
pub(crate) mod reorder;
pub mod step;

//! Gesture classification: raw touch samples in, semantic gesture events out.
//!
//! The touch surface (an external collaborator) produces [`sample::TouchSample`]s.
//! The [`classifier::GestureClassifier`] consumes them one at a time and emits
//! zero or more [`event::GestureEvent`]s per sample; most sub-threshold Move
//! samples emit none.  Thresholds and timing constants live in
//! [`config::GestureConfig`] so deployments can tune them without code changes.

pub mod classifier;
pub mod config;
pub mod event;
pub mod filter;
pub mod sample;

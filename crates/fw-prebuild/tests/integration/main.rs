// Copyright 2026 Oxide Computer Company

//! Integration tests for fw-prebuild.

mod pipeline;
mod stage;

#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod animation;
pub mod bezier;
pub mod coordinate;
pub mod geometry;
pub mod interpolator;
pub mod map_adapter;
pub mod track;

//! img2dcpu library crate.
//!
//! Converts images into DCPU-16 assembly programs that draw them on the LEM1802
//! display. The pipeline is [`source::load`] → [`convert::convert`] →
//! [`program::Program::render`] → [`output::write_program`].

pub mod cli;
pub mod config;
pub mod convert;
pub mod encode;
pub mod error;
pub mod font;
pub mod mode;
pub mod output;
pub mod palette;
pub mod program;
pub mod source;

//! <h1 align="center">GAUGEDECK - Analog gauge dashboard controller</h1>
//! <div style="text-align:center;font-style:italic;">Drives six analog gauge needles from serial commands and reports physical inputs back to the host.</div>
//!
//! # Features
//!
//! **Gaugedeck** sits between a host computer and a bank of six analog gauges:
//!
//! - Receives `U,<v0>,...,<v5>` percentage commands over a serial link
//!   (see [`protocol`]) and sweeps each needle smoothly to its new position
//!   through a PCA9685 PWM driver (see [`gauges`] and [`hardware`]).
//! - Reports a momentary button (`B,WATER`) and a two-position sit/stand
//!   switch (`S,<0|1>`) back over the same link (see [`inputs`]).
//!
//! Everything runs in one single-threaded control loop (see
//! [`controller::Controller`]); all hardware access goes through the trait
//! seams in [`hardware`] and [`io`] so the whole crate is testable without a
//! board attached.
//!
//! # Feature flags
//!
//! - **mocks** -- Provides mocked transports and hardware of all kinds (useful for tests mostly).

pub mod config;
pub mod controller;
pub mod errors;
pub mod gauges;
pub mod hardware;
pub mod inputs;
pub mod io;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod protocol;
pub mod utils;

//! Touch orbit controls for the AR model viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to the
//! AR/3D framework that owns rendering, the camera and the scene graph. It
//! turns raw DOM touch events into transform mutations on a single bound
//! model: one finger orbits the model about its vertical axis, two fingers
//! pinch-zoom it. The host page is responsible only for handing over the
//! canvas, the model's `object3D` and a configuration blob.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] gesture state machine |
//! | [`input`] | Touch samples, boundary events and [`input::GestureState`] |
//! | [`target`] | The [`target::ModelTarget`] seam and an in-memory implementation |
//! | [`config`] | [`config::OrbitConfig`] with defaults and validation |
//! | [`indicator`] | Transient "gesture active" indicator and its hide policy |
//! | [`web`] | DOM listeners, `object3D` adapter and the exported `OrbitControls` |
//! | [`consts`] | Shared numeric constants (scale limits, rotate factor, etc.) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod indicator;
pub mod input;
pub mod target;
pub mod web;

//! Model registry and loader for the AR viewer.
//!
//! Maps model identifiers to load parameters (format, asset paths, initial
//! transform) and turns a selected entry into the attribute changes an
//! A-Frame entity needs to load it. The gesture controls never touch this
//! crate; they receive the already-loaded object.
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | [`registry::ModelRegistry`] and model formats |
//! | [`loader`] | Current model, visibility, and [`loader::LoadDirective`] |
//! | [`vec3`] | `"x y z"` attribute vectors |
//! | [`web`] | Applying directives to a DOM element, load lifecycle events |

pub mod loader;
pub mod registry;
pub mod vec3;
pub mod web;

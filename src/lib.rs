// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
#![allow(clippy::cargo_common_metadata)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Virtual 3D cursor for scene viewers.
//!
//! Replaces the flat system pointer with a marker placed in the 3D scene:
//! on the nearest surface under the pointer when one is hit, otherwise on
//! the camera focal plane. The marker keeps a constant on-screen size
//! regardless of zoom.
//!
//! # Key entry points
//!
//! - [`cursor::VirtualCursor`] - the stateful controller driven by pointer
//!   events
//! - [`cursor::CursorProjector`] - the stateless pointer-to-placement
//!   projection
//! - [`view::ViewContext`] - what a render view must answer (camera and
//!   picking)
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Each pointer event goes through the controller, which asks the view
//! under the pointer for its camera transform, casts a ray through the
//! pointer, and picks against the view's [`picking::Scene`]. The resulting
//! [`cursor::CursorProjection`] is folded into the single
//! [`cursor::CursorState`] and pushed to a host-owned [`cursor::Marker`].

pub mod camera;
pub mod cursor;
pub mod error;
pub mod input;
pub mod options;
pub mod picking;
pub mod view;

pub use error::CursorError;

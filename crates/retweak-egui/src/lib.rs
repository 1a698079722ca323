//! egui backend for retweak bars.
//!
//! [`EguiToolkit`] implements [`retweak_bar::Toolkit`]; every bar created
//! through it becomes an `egui::Window` drawn by [`EguiToolkit::show`].
//!
//! # Example
//!
//! ```rust,no_run
//! use retweak_bar::{TweakBar, var};
//! use retweak_core::{BuiltinType, TypeRegistry};
//! use retweak_egui::EguiToolkit;
//!
//! let mut toolkit = EguiToolkit::new();
//! let types = TypeRegistry::new();
//! let mut bar = TweakBar::new(&mut toolkit, "Scene").unwrap();
//! bar.add_var_rw("exposure", BuiltinType::Float, var(1.0f32), "min=0 max=4 step=0.05", true)
//!     .unwrap();
//!
//! // in the frame callback
//! # let ctx = egui::Context::default();
//! toolkit.show(&ctx);
//!
//! // on exit
//! bar.save_default(&types).unwrap();
//! ```

mod toolkit;
pub mod widgets;

pub use toolkit::{EguiBar, EguiToolkit};

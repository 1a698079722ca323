//! Tweak bars whose variables can be saved to and loaded from text files.
//!
//! A [`TweakBar`] forwards every registration to a widget toolkit through the
//! [`Toolkit`] / [`BarBackend`] traits and records the persistent ones. Saving
//! writes one `name: TYPE value` line per recorded variable; loading applies
//! each line back through the variable's [`Binding`], skipping lines it
//! cannot use and reporting them in a [`LoadReport`].
//!
//! # Features
//!
//! - **Bars**: direct (`Rc<RefCell<Value>>`) and callback-bound variables,
//!   read-only variables, buttons, toolkit parameters
//! - **Persistence**: [`TweakBar::save`] / [`TweakBar::load`], plus per-user
//!   default locations in [`paths`]
//! - **Enums**: [`define_enum`] and TOML [`EnumCatalog`] files
//! - **Headless backend**: [`HeadlessToolkit`] for tests and tools
//!
//! # Example
//!
//! ```rust
//! use retweak_bar::{HeadlessToolkit, TweakBar, var};
//! use retweak_core::{BuiltinType, TypeRegistry, Value};
//!
//! let mut toolkit = HeadlessToolkit::new();
//! let types = TypeRegistry::new();
//! let mut bar = TweakBar::new(&mut toolkit, "Scene").unwrap();
//!
//! let color = var([1.0f32, 0.0, 0.0]);
//! bar.add_var_rw("color", BuiltinType::Color3f, color, "", true).unwrap();
//! assert_eq!(bar.to_text(&types), "color: TW_TYPE_COLOR3F 1 0 0\n\n");
//! ```

mod bar;
mod binding;
mod catalog;
mod definition;
mod error;
pub mod headless;
pub mod paths;
mod registry;
mod report;
pub mod toolkit;

pub use bar::{TweakBar, define_enum};
pub use binding::{Binding, Getter, Setter, VarCell, var};
pub use catalog::EnumCatalog;
pub use definition::parse_definition;
pub use error::{BarError, ToolkitError};
pub use headless::{HeadlessBar, HeadlessToolkit};
pub use registry::{Entry, Registry};
pub use report::{IssueKind, LineIssue, LoadReport};
pub use toolkit::{Access, BarBackend, ButtonCallback, ParamValue, Toolkit, VarSpec};

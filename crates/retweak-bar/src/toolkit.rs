//! Seam between a [`TweakBar`](crate::TweakBar) and the widget toolkit that
//! actually draws it.
//!
//! The toolkit owns bar creation, layout, rendering and input. retweak only
//! forwards registrations through [`Toolkit`] and [`BarBackend`] and records
//! what it forwarded. Two backends ship with the workspace:
//! [`HeadlessToolkit`](crate::headless::HeadlessToolkit) here and the egui
//! backend in `retweak-egui`.

use core::fmt;
use std::rc::Rc;

use retweak_core::{EnumDef, EnumId, TypeTag};

use crate::binding::Binding;
use crate::error::ToolkitError;

/// Whether the toolkit may write a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// Editable through the bar.
    #[default]
    ReadWrite,
    /// Display only.
    ReadOnly,
}

/// Value of a bar or variable parameter.
///
/// Mirrors the toolkit's parameter value kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// One or more 32-bit integers.
    Int32(Vec<i32>),
    /// One or more single-precision floats.
    Float(Vec<f32>),
    /// One or more double-precision floats.
    Double(Vec<f64>),
    /// Text.
    Text(String),
}

impl ParamValue {
    /// Text form, as used in definition strings.
    pub fn to_text(&self) -> String {
        fn join<T: ToString>(items: &[T]) -> String {
            items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        }
        match self {
            ParamValue::Int32(v) => join(v),
            ParamValue::Float(v) => join(v),
            ParamValue::Double(v) => join(v),
            ParamValue::Text(s) => s.clone(),
        }
    }

    /// First component as `f64`, parsing text if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int32(v) => v.first().map(|&x| f64::from(x)),
            ParamValue::Float(v) => v.first().map(|&x| f64::from(x)),
            ParamValue::Double(v) => v.first().copied(),
            ParamValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Interpret as a flag (`true`/`false`, `1`/`0`).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Text(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            other => other.as_f64().map(|x| x != 0.0),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(vec![v])
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int32(vec![v])
    }
}

/// Button callback.
pub type ButtonCallback = Rc<dyn Fn()>;

/// Everything a backend needs to show one variable.
#[derive(Debug, Clone)]
pub struct VarSpec<'a> {
    /// Unique name within the bar.
    pub name: &'a str,
    /// Declared type.
    pub tag: TypeTag,
    /// Storage shared with the bar's registry.
    pub binding: Binding,
    /// Editable or display only.
    pub access: Access,
    /// Toolkit definition string, e.g. `"min=0 max=10 label='Speed'"`.
    pub def: &'a str,
}

/// Toolkit-wide operations.
pub trait Toolkit {
    /// Backend handle for one bar.
    type Bar: BarBackend;

    /// Create a new, empty bar.
    fn new_bar(&mut self, name: &str) -> Result<Self::Bar, ToolkitError>;

    /// Make an enum type available to widgets.
    ///
    /// `id` is the handle variables of this type will carry in
    /// [`VarSpec::tag`].
    fn define_enum(&mut self, id: EnumId, def: &EnumDef) -> Result<(), ToolkitError>;
}

/// Per-bar operations.
///
/// All registrations arrive here before being recorded by the bar; a
/// failure leaves the bar's registry unchanged.
pub trait BarBackend {
    /// Bar name.
    fn name(&self) -> &str;

    /// Add a variable.
    fn add_var(&mut self, spec: VarSpec<'_>) -> Result<(), ToolkitError>;

    /// Add a button.
    fn add_button(
        &mut self,
        name: &str,
        callback: ButtonCallback,
        def: &str,
    ) -> Result<(), ToolkitError>;

    /// Set a parameter on a variable, or on the bar itself when `var` is `None`.
    fn set_param(
        &mut self,
        var: Option<&str>,
        param: &str,
        value: ParamValue,
    ) -> Result<(), ToolkitError>;

    /// Read a parameter from a variable, or from the bar itself when `var` is `None`.
    fn get_param(&self, var: Option<&str>, param: &str) -> Result<ParamValue, ToolkitError>;

    /// Re-read every bound value on the next draw.
    fn refresh(&mut self) -> Result<(), ToolkitError> {
        Ok(())
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::ReadWrite => f.write_str("rw"),
            Access::ReadOnly => f.write_str("ro"),
        }
    }
}

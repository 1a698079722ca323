//! How a registered variable reaches its storage.
//!
//! A [`Binding`] is shared between the bar's registry and the toolkit
//! backend, so both read and write the same value:
//!
//! ```text
//! toolkit widget ──► Binding::write(value)
//!                         │
//!                 ┌───────┴────────┐
//!                 │ Direct(cell)   │  Rc<RefCell<Value>>
//!                 │ Callback(get,  │  closures capturing client state
//!                 │          set)  │
//!                 └───────┬────────┘
//!                         │
//! save / widgets ◄── Binding::read()
//! ```
//!
//! Everything is single-threaded; cells and callbacks are `Rc`-shared.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use retweak_core::Value;

/// Shared storage for a directly bound variable.
pub type VarCell = Rc<RefCell<Value>>;

/// Reads the current value of a callback-bound variable.
pub type Getter = Rc<dyn Fn() -> Value>;

/// Receives a new value for a callback-bound variable.
pub type Setter = Rc<dyn Fn(Value)>;

/// Create a [`VarCell`] holding `value`.
///
/// # Example
///
/// ```rust
/// use retweak_bar::var;
/// use retweak_core::Value;
///
/// let speed = var(2.5f32);
/// assert_eq!(*speed.borrow(), Value::F32(2.5));
/// ```
pub fn var(value: impl Into<Value>) -> VarCell {
    Rc::new(RefCell::new(value.into()))
}

/// Storage behind a bar variable.
#[derive(Clone)]
pub enum Binding {
    /// Value lives in a shared cell.
    Direct(VarCell),
    /// Value is produced and consumed by client callbacks.
    Callback {
        /// Getter invoked on save and on display.
        get: Getter,
        /// Setter invoked on load and on edit.
        set: Setter,
    },
}

impl Binding {
    /// Bind a shared cell.
    pub fn direct(cell: VarCell) -> Self {
        Binding::Direct(cell)
    }

    /// Bind a getter/setter pair.
    pub fn callback(
        get: impl Fn() -> Value + 'static,
        set: impl Fn(Value) + 'static,
    ) -> Self {
        Binding::Callback {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Current value.
    pub fn read(&self) -> Value {
        match self {
            Binding::Direct(cell) => cell.borrow().clone(),
            Binding::Callback { get, .. } => get(),
        }
    }

    /// Store a new value.
    pub fn write(&self, value: Value) {
        match self {
            Binding::Direct(cell) => *cell.borrow_mut() = value,
            Binding::Callback { set, .. } => set(value),
        }
    }

    /// Whether this is a [`Binding::Direct`] binding.
    pub fn is_direct(&self) -> bool {
        matches!(self, Binding::Direct(_))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Direct(cell) => f.debug_tuple("Direct").field(&*cell.borrow()).finish(),
            Binding::Callback { .. } => f.write_str("Callback { .. }"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn direct_reads_and_writes_the_cell() {
        let cell = var(1i32);
        let binding = Binding::direct(Rc::clone(&cell));
        binding.write(Value::I32(5));
        assert_eq!(*cell.borrow(), Value::I32(5));
        assert_eq!(binding.read(), Value::I32(5));
        assert!(binding.is_direct());
    }

    #[test]
    fn callback_routes_through_closures() {
        let state = Rc::new(Cell::new(0.5f32));
        let (get_state, set_state) = (Rc::clone(&state), Rc::clone(&state));
        let binding = Binding::callback(
            move || Value::F32(get_state.get()),
            move |v| {
                if let Some(f) = v.as_f32() {
                    set_state.set(f);
                }
            },
        );
        assert_eq!(binding.read(), Value::F32(0.5));
        binding.write(Value::F32(2.0));
        assert_eq!(state.get(), 2.0);
        assert!(!binding.is_direct());
    }

    #[test]
    fn clones_share_storage() {
        let binding = Binding::direct(var(false));
        let other = binding.clone();
        other.write(Value::Bool(true));
        assert_eq!(binding.read(), Value::Bool(true));
    }

    #[test]
    fn debug_shows_direct_value() {
        let binding = Binding::direct(var(3i32));
        assert_eq!(format!("{binding:?}"), "Direct(I32(3))");
    }
}

//! Editors for a single bar value.
//!
//! [`value_editor`] picks a widget from the value's shape and declared type:
//!
//! | Value | Widget |
//! |-------|--------|
//! | bool | checkbox |
//! | integer / float | `DragValue` honoring `min`, `max`, `step` |
//! | `Color3f` / `Color4f` | color picker button |
//! | other 3/4-vectors | row of `DragValue`s |
//! | enum | combo box of labels |
//! | text | single-line text edit |

use std::collections::BTreeMap;

use egui::{DragValue, Response, Ui};
use retweak_bar::ParamValue;
use retweak_core::{BuiltinType, EnumDef, TypeTag, Value};

/// Numeric limits read from a variable's parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    /// Lower bound (`min`).
    pub min: Option<f64>,
    /// Upper bound (`max`).
    pub max: Option<f64>,
    /// Drag increment (`step`).
    pub step: Option<f64>,
}

impl NumericRange {
    /// Read `min`, `max` and `step` from parameters. Unparseable values are ignored.
    pub fn from_params(params: &BTreeMap<String, ParamValue>) -> Self {
        let get = |key: &str| params.get(key).and_then(ParamValue::as_f64);
        Self {
            min: get("min"),
            max: get("max"),
            step: get("step"),
        }
    }

    fn apply<'a>(&self, drag: DragValue<'a>, default_speed: f64) -> DragValue<'a> {
        let drag = drag.speed(self.step.unwrap_or(default_speed));
        match (self.min, self.max) {
            (Some(min), Some(max)) if min <= max => drag.range(min..=max),
            (Some(min), None) => drag.range(min..=f64::INFINITY),
            (None, Some(max)) => drag.range(f64::NEG_INFINITY..=max),
            _ => drag,
        }
    }
}

/// Draw an editor for `value`. Returns the response of the last widget
/// drawn, marked changed if any component changed.
pub fn value_editor(
    ui: &mut Ui,
    id_salt: impl std::hash::Hash,
    value: &mut Value,
    tag: TypeTag,
    enum_def: Option<&EnumDef>,
    range: NumericRange,
) -> Response {
    match value {
        Value::Bool(b) => ui.checkbox(b, ""),
        Value::I8(x) => ui.add(range.apply(DragValue::new(x), 1.0)),
        Value::U8(x) => ui.add(range.apply(DragValue::new(x), 1.0)),
        Value::I16(x) => ui.add(range.apply(DragValue::new(x), 1.0)),
        Value::U16(x) => ui.add(range.apply(DragValue::new(x), 1.0)),
        Value::I32(x) => ui.add(range.apply(DragValue::new(x), 1.0)),
        Value::U32(x) => ui.add(range.apply(DragValue::new(x), 1.0)),
        Value::F32(x) => ui.add(range.apply(DragValue::new(x), 0.01)),
        Value::F64(x) => ui.add(range.apply(DragValue::new(x), 0.01)),
        Value::Vec3f(rgb) if tag == TypeTag::Builtin(BuiltinType::Color3f) => {
            ui.color_edit_button_rgb(rgb)
        }
        Value::Vec4f(rgba) if tag == TypeTag::Builtin(BuiltinType::Color4f) => {
            ui.color_edit_button_rgba_unmultiplied(rgba)
        }
        Value::Vec3f(v) => drag_row(ui, v, range),
        Value::Vec4f(v) => drag_row(ui, v, range),
        Value::Vec3d(v) => drag_row(ui, v, range),
        Value::Vec4d(v) => drag_row(ui, v, range),
        Value::Text(s) => ui.text_edit_singleline(s),
        Value::Enum(code) => enum_combo(ui, id_salt, code, enum_def),
    }
}

fn drag_row<T: egui::emath::Numeric>(
    ui: &mut Ui,
    components: &mut [T],
    range: NumericRange,
) -> Response {
    ui.horizontal(|ui| {
        let mut changed = false;
        let mut last = None;
        for c in components.iter_mut() {
            let response = ui.add(range.apply(DragValue::new(c), 0.01));
            changed |= response.changed();
            last = Some(response);
        }
        let mut response = last.unwrap_or_else(|| ui.label(""));
        if changed {
            response.mark_changed();
        }
        response
    })
    .inner
}

fn enum_combo(
    ui: &mut Ui,
    id_salt: impl std::hash::Hash,
    code: &mut i32,
    def: Option<&EnumDef>,
) -> Response {
    let Some(def) = def else {
        return ui.label(code.to_string());
    };
    let before = *code;
    let selected = def.label_of(*code).unwrap_or("?").to_string();
    let mut response = egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for v in &def.values {
                ui.selectable_value(code, v.code, v.label.as_str());
            }
        })
        .response;
    if *code != before {
        response.mark_changed();
    }
    response
}

//! egui implementation of the toolkit traits.
//!
//! Bars are drawn each frame by [`EguiToolkit::show`], one `egui::Window`
//! per bar with a two-column grid of labels and editors. Registrations made
//! through an [`EguiBar`] land in state shared with the toolkit:
//!
//! ```text
//! TweakBar ──► EguiBar::add_var ──► Rc<RefCell<UiState>> ◄── EguiToolkit::show(ctx)
//! ```
//!
//! Edits and button presses are collected while drawing and applied after
//! the shared state is released, so setters and button callbacks may touch
//! the toolkit again.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use retweak_bar::{
    Access, BarBackend, Binding, ButtonCallback, ParamValue, Toolkit, ToolkitError, VarSpec,
    parse_definition,
};
use retweak_core::{EnumDef, EnumId, TypeTag, Value};

use crate::widgets::{NumericRange, value_editor};

type Params = BTreeMap<String, ParamValue>;

enum ItemKind {
    Var {
        tag: TypeTag,
        binding: Binding,
        access: Access,
    },
    Button(ButtonCallback),
}

struct Item {
    name: String,
    kind: ItemKind,
    params: Params,
}

impl Item {
    fn label(&self) -> String {
        self.params
            .get("label")
            .map_or_else(|| self.name.clone(), ParamValue::to_text)
    }

    fn visible(&self) -> bool {
        self.params
            .get("visible")
            .and_then(ParamValue::as_bool)
            .unwrap_or(true)
    }

    fn read_only(&self, access: Access) -> bool {
        access == Access::ReadOnly
            || self
                .params
                .get("readonly")
                .and_then(ParamValue::as_bool)
                .unwrap_or(false)
    }
}

struct BarState {
    name: String,
    items: Vec<Item>,
    params: Params,
}

impl BarState {
    fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    fn params(&self, var: Option<&str>) -> Result<&Params, ToolkitError> {
        match var {
            None => Ok(&self.params),
            Some(name) => self
                .item(name)
                .map(|i| &i.params)
                .ok_or_else(|| self.unknown(name)),
        }
    }

    fn params_mut(&mut self, var: Option<&str>) -> Result<&mut Params, ToolkitError> {
        let Some(name) = var else {
            return Ok(&mut self.params);
        };
        match self.items.iter().position(|i| i.name == name) {
            Some(idx) => Ok(&mut self.items[idx].params),
            None => Err(self.unknown(name)),
        }
    }

    fn unknown(&self, name: &str) -> ToolkitError {
        ToolkitError::UnknownItem {
            bar: self.name.clone(),
            name: name.to_string(),
        }
    }

    fn push(&mut self, name: &str, kind: ItemKind, def: &str) -> Result<(), ToolkitError> {
        if self.item(name).is_some() {
            return Err(ToolkitError::DuplicateName {
                bar: self.name.clone(),
                name: name.to_string(),
            });
        }
        let params = parse_definition(def)?.into_iter().collect();
        self.items.push(Item {
            name: name.to_string(),
            kind,
            params,
        });
        Ok(())
    }
}

#[derive(Default)]
struct UiState {
    bars: Vec<BarState>,
    enums: HashMap<EnumId, EnumDef>,
}

/// Deferred effect of one frame's interaction.
enum Action {
    Write(Binding, Value),
    Press(ButtonCallback),
}

/// Toolkit that draws bars with egui.
///
/// Cloning yields another handle to the same bars.
#[derive(Clone, Default)]
pub struct EguiToolkit {
    state: Rc<RefCell<UiState>>,
}

impl EguiToolkit {
    /// Create a toolkit with no bars.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bars created.
    pub fn bar_count(&self) -> usize {
        self.state.borrow().bars.len()
    }

    /// Draw every visible bar as a window.
    ///
    /// Call once per frame from the application's update loop.
    pub fn show(&self, ctx: &egui::Context) {
        let actions = {
            let state = self.state.borrow();
            let mut actions = Vec::new();
            for bar in &state.bars {
                show_bar(ctx, bar, &state.enums, &mut actions);
            }
            actions
        };

        for action in actions {
            match action {
                Action::Write(binding, value) => binding.write(value),
                Action::Press(callback) => callback(),
            }
        }
    }
}

impl std::fmt::Debug for EguiToolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EguiToolkit")
            .field("bars", &state.bars.len())
            .field("enums", &state.enums.len())
            .finish()
    }
}

impl Toolkit for EguiToolkit {
    type Bar = EguiBar;

    fn new_bar(&mut self, name: &str) -> Result<EguiBar, ToolkitError> {
        let mut state = self.state.borrow_mut();
        if state.bars.iter().any(|b| b.name == name) {
            return Err(ToolkitError::DuplicateBar(name.to_string()));
        }
        state.bars.push(BarState {
            name: name.to_string(),
            items: Vec::new(),
            params: Params::new(),
        });
        Ok(EguiBar {
            name: name.to_string(),
            index: state.bars.len() - 1,
            state: Rc::clone(&self.state),
        })
    }

    fn define_enum(&mut self, id: EnumId, def: &EnumDef) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        if state.enums.values().any(|d| d.name == def.name) {
            return Err(ToolkitError::DuplicateEnum(def.name.clone()));
        }
        state.enums.insert(id, def.clone());
        Ok(())
    }
}

/// One bar of an [`EguiToolkit`].
pub struct EguiBar {
    name: String,
    index: usize,
    state: Rc<RefCell<UiState>>,
}

impl std::fmt::Debug for EguiBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiBar")
            .field("name", &self.name)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl EguiBar {
    fn with_bar<R>(&self, f: impl FnOnce(&BarState) -> R) -> R {
        f(&self.state.borrow().bars[self.index])
    }

    fn with_bar_mut<R>(&self, f: impl FnOnce(&mut BarState) -> R) -> R {
        f(&mut self.state.borrow_mut().bars[self.index])
    }

    /// Item names in registration order.
    pub fn item_names(&self) -> Vec<String> {
        self.with_bar(|bar| bar.items.iter().map(|i| i.name.clone()).collect())
    }
}

impl BarBackend for EguiBar {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_var(&mut self, spec: VarSpec<'_>) -> Result<(), ToolkitError> {
        let kind = ItemKind::Var {
            tag: spec.tag,
            binding: spec.binding,
            access: spec.access,
        };
        self.with_bar_mut(|bar| bar.push(spec.name, kind, spec.def))
    }

    fn add_button(
        &mut self,
        name: &str,
        callback: ButtonCallback,
        def: &str,
    ) -> Result<(), ToolkitError> {
        self.with_bar_mut(|bar| bar.push(name, ItemKind::Button(callback), def))
    }

    fn set_param(
        &mut self,
        var: Option<&str>,
        param: &str,
        value: ParamValue,
    ) -> Result<(), ToolkitError> {
        self.with_bar_mut(|bar| {
            bar.params_mut(var)?.insert(param.to_string(), value);
            Ok(())
        })
    }

    fn get_param(&self, var: Option<&str>, param: &str) -> Result<ParamValue, ToolkitError> {
        self.with_bar(|bar| {
            bar.params(var)?
                .get(param)
                .cloned()
                .ok_or_else(|| ToolkitError::UnknownParam(param.to_string()))
        })
    }
}

fn show_bar(
    ctx: &egui::Context,
    bar: &BarState,
    enums: &HashMap<EnumId, EnumDef>,
    actions: &mut Vec<Action>,
) {
    let visible = bar
        .params
        .get("visible")
        .and_then(ParamValue::as_bool)
        .unwrap_or(true);
    if !visible {
        return;
    }
    let title = bar
        .params
        .get("label")
        .map_or_else(|| bar.name.clone(), ParamValue::to_text);

    egui::Window::new(title)
        .id(egui::Id::new(("retweak-bar", &bar.name)))
        .resizable(true)
        .show(ctx, |ui| {
            egui::Grid::new(("retweak-grid", &bar.name))
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for item in bar.items.iter().filter(|i| i.visible()) {
                        show_item(ui, bar, item, enums, actions);
                        ui.end_row();
                    }
                });
        });
}

fn show_item(
    ui: &mut egui::Ui,
    bar: &BarState,
    item: &Item,
    enums: &HashMap<EnumId, EnumDef>,
    actions: &mut Vec<Action>,
) {
    let help = item.params.get("help").map(ParamValue::to_text);
    let response = match &item.kind {
        ItemKind::Button(callback) => {
            ui.label("");
            let response = ui.button(item.label());
            if response.clicked() {
                actions.push(Action::Press(Rc::clone(callback)));
            }
            response
        }
        ItemKind::Var {
            tag,
            binding,
            access,
        } => {
            ui.label(item.label());
            let mut value = binding.read();
            let enum_def = match tag {
                TypeTag::Enum(id) => enums.get(id),
                TypeTag::Builtin(_) => None,
            };
            let range = NumericRange::from_params(&item.params);
            let read_only = item.read_only(*access);
            let inner = ui.add_enabled_ui(!read_only, |ui| {
                value_editor(ui, (&bar.name, &item.name), &mut value, *tag, enum_def, range)
            });
            if inner.inner.changed() && !read_only {
                actions.push(Action::Write(binding.clone(), value));
            }
            inner.inner
        }
    };
    if let Some(help) = help {
        response.on_hover_text(help);
    }
}

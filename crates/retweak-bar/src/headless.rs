//! In-memory toolkit with no rendering.
//!
//! Keeps every registration, parameter and enum so tests and tools can drive
//! a bar the way a user would: [`HeadlessBar::edit`] writes through a
//! variable's binding and [`HeadlessBar::press`] fires a button.

use std::collections::BTreeMap;

use retweak_core::{EnumDef, EnumId, TypeTag, Value};

use crate::binding::Binding;
use crate::definition::parse_definition;
use crate::error::ToolkitError;
use crate::toolkit::{Access, BarBackend, ButtonCallback, ParamValue, Toolkit, VarSpec};

/// Toolkit that records bars and enums in memory.
#[derive(Debug, Default)]
pub struct HeadlessToolkit {
    bars: Vec<String>,
    enums: Vec<(EnumId, EnumDef)>,
}

impl HeadlessToolkit {
    /// Create an empty toolkit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of created bars, in creation order.
    pub fn bars(&self) -> &[String] {
        &self.bars
    }

    /// Enums defined so far, in definition order.
    pub fn enums(&self) -> &[(EnumId, EnumDef)] {
        &self.enums
    }
}

impl Toolkit for HeadlessToolkit {
    type Bar = HeadlessBar;

    fn new_bar(&mut self, name: &str) -> Result<HeadlessBar, ToolkitError> {
        if self.bars.iter().any(|b| b == name) {
            return Err(ToolkitError::DuplicateBar(name.to_string()));
        }
        self.bars.push(name.to_string());
        Ok(HeadlessBar::new(name))
    }

    fn define_enum(&mut self, id: EnumId, def: &EnumDef) -> Result<(), ToolkitError> {
        if self.enums.iter().any(|(_, d)| d.name == def.name) {
            return Err(ToolkitError::DuplicateEnum(def.name.clone()));
        }
        self.enums.push((id, def.clone()));
        Ok(())
    }
}

/// A variable as the headless toolkit sees it.
#[derive(Debug, Clone)]
pub struct HeadlessVar {
    /// Declared type.
    pub tag: TypeTag,
    /// Shared storage.
    pub binding: Binding,
    /// Editable or display only.
    pub access: Access,
    /// Parameters from the definition string and later `set_param` calls.
    pub params: BTreeMap<String, ParamValue>,
}

/// A bar held in memory.
#[derive(Debug)]
pub struct HeadlessBar {
    name: String,
    vars: Vec<(String, HeadlessVar)>,
    buttons: Vec<(String, ButtonEntry)>,
    params: BTreeMap<String, ParamValue>,
    refreshes: usize,
}

struct ButtonEntry {
    callback: ButtonCallback,
    params: BTreeMap<String, ParamValue>,
}

impl core::fmt::Debug for ButtonEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ButtonEntry")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl HeadlessBar {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vars: Vec::new(),
            buttons: Vec::new(),
            params: BTreeMap::new(),
            refreshes: 0,
        }
    }

    /// Variable by name.
    pub fn var(&self, name: &str) -> Option<&HeadlessVar> {
        self.vars.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Variable names in registration order.
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(n, _)| n.as_str())
    }

    /// Button names in registration order.
    pub fn button_names(&self) -> impl Iterator<Item = &str> {
        self.buttons.iter().map(|(n, _)| n.as_str())
    }

    /// Current value of a variable.
    pub fn value_of(&self, name: &str) -> Option<Value> {
        self.var(name).map(|v| v.binding.read())
    }

    /// Write a value as if the user had edited the widget.
    pub fn edit(&self, name: &str, value: Value) -> Result<(), ToolkitError> {
        let var = self.var(name).ok_or_else(|| self.unknown(name))?;
        if var.access == Access::ReadOnly {
            return Err(ToolkitError::ReadOnly(name.to_string()));
        }
        var.binding.write(value);
        Ok(())
    }

    /// Fire a button's callback.
    pub fn press(&self, name: &str) -> Result<(), ToolkitError> {
        let (_, button) = self
            .buttons
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| self.unknown(name))?;
        (button.callback)();
        Ok(())
    }

    /// Number of `refresh` calls received.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    fn unknown(&self, name: &str) -> ToolkitError {
        ToolkitError::UnknownItem {
            bar: self.name.clone(),
            name: name.to_string(),
        }
    }

    fn taken(&self, name: &str) -> bool {
        self.vars.iter().any(|(n, _)| n == name) || self.buttons.iter().any(|(n, _)| n == name)
    }

    fn params_mut(
        &mut self,
        var: Option<&str>,
    ) -> Result<&mut BTreeMap<String, ParamValue>, ToolkitError> {
        let Some(name) = var else {
            return Ok(&mut self.params);
        };
        if let Some((_, v)) = self.vars.iter_mut().find(|(n, _)| n == name) {
            return Ok(&mut v.params);
        }
        if let Some((_, b)) = self.buttons.iter_mut().find(|(n, _)| n == name) {
            return Ok(&mut b.params);
        }
        Err(ToolkitError::UnknownItem {
            bar: self.name.clone(),
            name: name.to_string(),
        })
    }

    fn params(&self, var: Option<&str>) -> Result<&BTreeMap<String, ParamValue>, ToolkitError> {
        let Some(name) = var else {
            return Ok(&self.params);
        };
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| &v.params)
            .or_else(|| {
                self.buttons
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, b)| &b.params)
            })
            .ok_or_else(|| self.unknown(name))
    }
}

impl BarBackend for HeadlessBar {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_var(&mut self, spec: VarSpec<'_>) -> Result<(), ToolkitError> {
        if self.taken(spec.name) {
            return Err(ToolkitError::DuplicateName {
                bar: self.name.clone(),
                name: spec.name.to_string(),
            });
        }
        let params = parse_definition(spec.def)?.into_iter().collect();
        self.vars.push((
            spec.name.to_string(),
            HeadlessVar {
                tag: spec.tag,
                binding: spec.binding,
                access: spec.access,
                params,
            },
        ));
        Ok(())
    }

    fn add_button(
        &mut self,
        name: &str,
        callback: ButtonCallback,
        def: &str,
    ) -> Result<(), ToolkitError> {
        if self.taken(name) {
            return Err(ToolkitError::DuplicateName {
                bar: self.name.clone(),
                name: name.to_string(),
            });
        }
        let params = parse_definition(def)?.into_iter().collect();
        self.buttons
            .push((name.to_string(), ButtonEntry { callback, params }));
        Ok(())
    }

    fn set_param(
        &mut self,
        var: Option<&str>,
        param: &str,
        value: ParamValue,
    ) -> Result<(), ToolkitError> {
        self.params_mut(var)?.insert(param.to_string(), value);
        Ok(())
    }

    fn get_param(&self, var: Option<&str>, param: &str) -> Result<ParamValue, ToolkitError> {
        self.params(var)?
            .get(param)
            .cloned()
            .ok_or_else(|| ToolkitError::UnknownParam(param.to_string()))
    }

    fn refresh(&mut self) -> Result<(), ToolkitError> {
        self.refreshes += 1;
        Ok(())
    }
}

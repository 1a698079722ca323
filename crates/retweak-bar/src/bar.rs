//! A toolkit bar that remembers its variables and can save and load them.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use retweak_core::{
    EnumDef, EnumId, TypeRegistry, TypeTag, Value, decode_line, format_line, is_valid_name, parse,
    serialize, split_line,
};

use crate::binding::{Binding, VarCell};
use crate::error::BarError;
use crate::paths;
use crate::registry::{Entry, Registry};
use crate::report::{IssueKind, LoadReport};
use crate::toolkit::{Access, BarBackend, ParamValue, Toolkit, VarSpec};

/// Define an enum type with the toolkit and record it in `types`.
///
/// The definition is validated and its name checked against `types` before
/// the toolkit sees it, so a rejected enum leaves both sides unchanged.
pub fn define_enum<T: Toolkit>(
    toolkit: &mut T,
    types: &mut TypeRegistry,
    def: EnumDef,
) -> Result<EnumId, BarError> {
    def.validate()?;
    if types.resolve(&def.name).is_some() {
        return Err(retweak_core::CodecError::TypeNameTaken(def.name).into());
    }
    toolkit.define_enum(types.next_enum_id(), &def)?;
    Ok(types.define_enum(def)?)
}

/// A bar whose registrations are forwarded to a toolkit backend and
/// recorded for persistence.
///
/// # Example
///
/// ```rust
/// use retweak_bar::{HeadlessToolkit, TweakBar, var};
/// use retweak_core::{BuiltinType, TypeRegistry, Value};
///
/// let mut toolkit = HeadlessToolkit::new();
/// let types = TypeRegistry::new();
/// let mut bar = TweakBar::new(&mut toolkit, "Main").unwrap();
///
/// let speed = var(2.5f32);
/// bar.add_var_rw("speed", BuiltinType::Float, speed.clone(), "min=0", true).unwrap();
/// assert_eq!(bar.to_text(&types), "speed: TW_TYPE_FLOAT 2.5\n\n");
///
/// *speed.borrow_mut() = Value::F32(0.0);
/// let report = bar.load_str(&types, "speed: TW_TYPE_FLOAT 2.5\n");
/// assert!(report.is_clean());
/// assert_eq!(*speed.borrow(), Value::F32(2.5));
/// ```
#[derive(Debug)]
pub struct TweakBar<B> {
    backend: B,
    registry: Registry,
    names: HashSet<String>,
}

impl<B: BarBackend> TweakBar<B> {
    /// Create a bar through the toolkit.
    pub fn new<T>(toolkit: &mut T, name: &str) -> Result<Self, BarError>
    where
        T: Toolkit<Bar = B>,
    {
        let backend = toolkit.new_bar(name)?;
        tracing::debug!(bar = name, "new_bar");
        Ok(Self::from_backend(backend))
    }

    /// Wrap an existing backend bar. Nothing registered on it beforehand is
    /// recorded.
    pub fn from_backend(backend: B) -> Self {
        Self {
            backend,
            registry: Registry::new(),
            names: HashSet::new(),
        }
    }

    /// Bar name.
    pub fn name(&self) -> &str {
        self.backend.name()
    }

    /// Toolkit backend, for calls retweak does not wrap.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable toolkit backend, for calls retweak does not wrap.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Persisted variables.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Add an editable variable stored in `cell`.
    ///
    /// With `persist` the variable is included in [`save`](Self::save) and
    /// [`load`](Self::load).
    pub fn add_var_rw(
        &mut self,
        name: &str,
        tag: impl Into<TypeTag>,
        cell: VarCell,
        def: &str,
        persist: bool,
    ) -> Result<(), BarError> {
        let tag = tag.into();
        check_shape(name, tag, &cell.borrow())?;
        self.register(name, tag, Binding::Direct(cell), Access::ReadWrite, def, persist)
    }

    /// Add an editable variable backed by a getter/setter pair.
    ///
    /// The getter runs on every save, the setter on every load. Client state
    /// goes in the closures' captures.
    pub fn add_var_cb(
        &mut self,
        name: &str,
        tag: impl Into<TypeTag>,
        get: impl Fn() -> Value + 'static,
        set: impl Fn(Value) + 'static,
        def: &str,
        persist: bool,
    ) -> Result<(), BarError> {
        let binding = Binding::callback(get, set);
        self.register(name, tag.into(), binding, Access::ReadWrite, def, persist)
    }

    /// Add a display-only variable. Never persisted.
    pub fn add_var_ro(
        &mut self,
        name: &str,
        tag: impl Into<TypeTag>,
        cell: VarCell,
        def: &str,
    ) -> Result<(), BarError> {
        let tag = tag.into();
        check_shape(name, tag, &cell.borrow())?;
        self.register(name, tag, Binding::Direct(cell), Access::ReadOnly, def, false)
    }

    /// Add a button. Never persisted.
    pub fn add_button(
        &mut self,
        name: &str,
        callback: impl Fn() + 'static,
        def: &str,
    ) -> Result<(), BarError> {
        self.claim_name(name)?;
        if let Err(e) = self.backend.add_button(name, std::rc::Rc::new(callback), def) {
            self.names.remove(name);
            return Err(e.into());
        }
        tracing::debug!(bar = self.name(), name, "add_button");
        Ok(())
    }

    /// Set a toolkit parameter (pass-through).
    pub fn set_param(
        &mut self,
        var: Option<&str>,
        param: &str,
        value: impl Into<ParamValue>,
    ) -> Result<(), BarError> {
        Ok(self.backend.set_param(var, param, value.into())?)
    }

    /// Read a toolkit parameter (pass-through).
    pub fn get_param(&self, var: Option<&str>, param: &str) -> Result<ParamValue, BarError> {
        Ok(self.backend.get_param(var, param)?)
    }

    /// Ask the toolkit to redraw bound values (pass-through).
    pub fn refresh(&mut self) -> Result<(), BarError> {
        Ok(self.backend.refresh()?)
    }

    fn claim_name(&mut self, name: &str) -> Result<(), BarError> {
        if !is_valid_name(name) {
            return Err(BarError::InvalidName(name.to_string()));
        }
        if !self.names.insert(name.to_string()) {
            return Err(BarError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn register(
        &mut self,
        name: &str,
        tag: TypeTag,
        binding: Binding,
        access: Access,
        def: &str,
        persist: bool,
    ) -> Result<(), BarError> {
        self.claim_name(name)?;

        let spec = VarSpec {
            name,
            tag,
            binding: binding.clone(),
            access,
            def,
        };
        if let Err(e) = self.backend.add_var(spec) {
            self.names.remove(name);
            return Err(e.into());
        }

        if persist {
            // names are claimed above, so the registry cannot hold this one yet
            let _ = self.registry.insert(Entry::new(name, tag, binding));
        }
        tracing::debug!(bar = self.name(), name, %access, persist, "add_var");
        Ok(())
    }

    /// Serialize every persisted variable to `out`.
    ///
    /// One `name: TYPE value` line per entry, direct entries first, followed
    /// by a blank line.
    pub fn write_to<W: Write>(&self, types: &TypeRegistry, mut out: W) -> io::Result<()> {
        for entry in self.registry.iter() {
            let value = entry.binding().read();
            let text = serialize(&value, entry.tag(), types);
            writeln!(out, "{}", format_line(entry.name(), &text))?;
        }
        writeln!(out)?;
        out.flush()
    }

    /// Serialize every persisted variable to a string.
    pub fn to_text(&self, types: &TypeRegistry) -> String {
        let mut buf = Vec::new();
        // writing to a Vec cannot fail
        let _ = self.write_to(types, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Save to a file, or to standard output when `path` is `None`.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, types: &TypeRegistry, path: Option<&Path>) -> Result<(), BarError> {
        let Some(path) = path else {
            let stdout = io::stdout();
            self.write_to(types, stdout.lock())
                .map_err(|e| BarError::write_file("<stdout>", e))?;
            tracing::info!(
                bar = self.name(),
                entries = self.registry.len(),
                path = "<stdout>",
                "saved"
            );
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| BarError::create_dir(parent, e))?;
            }
        }

        let file = File::create(path).map_err(|e| BarError::write_file(path, e))?;
        self.write_to(types, BufWriter::new(file))
            .map_err(|e| BarError::write_file(path, e))?;
        tracing::info!(bar = self.name(), entries = self.registry.len(), path = %path.display(), "saved");
        Ok(())
    }

    /// Apply every line of `input`.
    ///
    /// Bad lines, including ones that are not valid UTF-8, are skipped and
    /// recorded in the report; only I/O errors abort.
    pub fn read_from<R: BufRead>(
        &self,
        types: &TypeRegistry,
        mut input: R,
    ) -> io::Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut raw = Vec::new();
        let mut number = 0;
        loop {
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            number += 1;
            match decode_line(&raw) {
                Ok(line) => self.apply_line(types, number, line, &mut report),
                Err(_) => report.skip(number, None, IssueKind::InvalidEncoding),
            }
        }
        Ok(report)
    }

    /// Apply every line of `text`.
    pub fn load_str(&self, types: &TypeRegistry, text: &str) -> LoadReport {
        let mut report = LoadReport::default();
        for (i, line) in text.lines().enumerate() {
            self.apply_line(types, i + 1, line, &mut report);
        }
        report
    }

    /// Load values from a file.
    ///
    /// Fails only if the file cannot be opened or read; individual bad lines
    /// end up in the returned report.
    pub fn load(&self, types: &TypeRegistry, path: &Path) -> Result<LoadReport, BarError> {
        let file = File::open(path).map_err(|e| BarError::read_file(path, e))?;
        let report = self
            .read_from(types, BufReader::new(file))
            .map_err(|e| BarError::read_file(path, e))?;
        tracing::info!(
            bar = self.name(),
            applied = report.applied,
            skipped = report.skipped(),
            path = %path.display(),
            "loaded"
        );
        Ok(report)
    }

    /// Save to the per-user default location for this bar.
    pub fn save_default(&self, types: &TypeRegistry) -> Result<(), BarError> {
        paths::ensure_user_bars_dir()?;
        self.save(types, Some(&paths::default_bar_path(self.name())))
    }

    /// Load from the per-user default location for this bar.
    pub fn load_default(&self, types: &TypeRegistry) -> Result<LoadReport, BarError> {
        self.load(types, &paths::default_bar_path(self.name()))
    }

    /// Parse `value_text` as `tag` and write it to the variable `name`.
    pub fn apply(
        &self,
        types: &TypeRegistry,
        name: &str,
        tag: TypeTag,
        value_text: &str,
    ) -> Result<(), IssueKind> {
        let value = parse(tag, value_text, types).map_err(IssueKind::MalformedValue)?;
        let entry = self.registry.get(name).ok_or(IssueKind::NotFound)?;
        if entry.tag() != tag {
            return Err(IssueKind::TypeMismatch {
                expected: types
                    .type_name(entry.tag())
                    .map_or_else(|| type_label(entry.tag()), str::to_string),
                found: types
                    .type_name(tag)
                    .map_or_else(|| type_label(tag), str::to_string),
            });
        }
        entry.binding().write(value);
        Ok(())
    }

    fn apply_line(&self, types: &TypeRegistry, number: usize, line: &str, report: &mut LoadReport) {
        let raw = match split_line(line) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                report.skip(number, None, IssueKind::MalformedLine(e));
                return;
            }
        };

        let Some(tag) = types.resolve(raw.type_name) else {
            report.skip(
                number,
                Some(raw.name),
                IssueKind::UnknownType(raw.type_name.to_string()),
            );
            return;
        };

        match self.apply(types, raw.name, tag, raw.value) {
            Ok(()) => report.applied += 1,
            Err(kind) => report.skip(number, Some(raw.name), kind),
        }
    }
}

fn check_shape(name: &str, tag: TypeTag, value: &Value) -> Result<(), BarError> {
    // tags without a codec are accepted and saved as a sentinel
    if tag.layout().is_some() && !value.fits(tag) {
        return Err(BarError::ShapeMismatch {
            name: name.to_string(),
            type_name: type_label(tag),
        });
    }
    Ok(())
}

fn type_label(tag: TypeTag) -> String {
    match tag {
        TypeTag::Builtin(ty) => ty.name().to_string(),
        TypeTag::Enum(id) => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::var;
    use crate::headless::HeadlessToolkit;
    use retweak_core::{BuiltinType, ENUM_VALUE_NOT_DEFINED, TYPE_NOT_SUPPORTED};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bar() -> TweakBar<crate::headless::HeadlessBar> {
        TweakBar::new(&mut HeadlessToolkit::new(), "Test").unwrap()
    }

    #[test]
    fn save_float_line() {
        let types = TypeRegistry::new();
        let mut bar = bar();
        bar.add_var_rw("speed", BuiltinType::Float, var(2.5f32), "", true).unwrap();
        assert_eq!(bar.to_text(&types), "speed: TW_TYPE_FLOAT 2.5\n\n");
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let logs = buffer.0.lock().unwrap();
        String::from_utf8_lossy(&logs).into_owned()
    }

    #[test]
    fn stdout_save_is_logged() {
        let types = TypeRegistry::new();
        let mut bar = bar();
        bar.add_var_rw("speed", BuiltinType::Float, var(2.5f32), "", true).unwrap();

        let logs = captured_logs(|| bar.save(&types, None).unwrap());
        assert!(logs.contains("saved"), "got: {logs}");
        assert!(logs.contains("<stdout>"), "got: {logs}");
        assert!(logs.contains("entries=1"), "got: {logs}");
    }

    #[test]
    fn empty_bar_saves_blank_line() {
        let types = TypeRegistry::new();
        assert_eq!(bar().to_text(&types), "\n");
    }

    #[test]
    fn non_persistent_vars_are_not_saved() {
        let types = TypeRegistry::new();
        let mut bar = bar();
        bar.add_var_rw("a", BuiltinType::Int32, var(1i32), "", false).unwrap();
        bar.add_var_ro("b", BuiltinType::Int32, var(2i32), "").unwrap();
        bar.add_button("c", || {}, "").unwrap();
        assert!(bar.registry().is_empty());
        assert_eq!(bar.to_text(&types), "\n");
    }

    #[test]
    fn direct_entries_saved_before_callbacks() {
        let types = TypeRegistry::new();
        let mut bar = bar();
        bar.add_var_cb("cb", BuiltinType::Int32, || Value::I32(7), |_| {}, "", true)
            .unwrap();
        bar.add_var_rw("rw", BuiltinType::Int32, var(3i32), "", true).unwrap();
        assert_eq!(
            bar.to_text(&types),
            "rw: TW_TYPE_INT32 3\ncb: TW_TYPE_INT32 7\n\n"
        );
    }

    #[test]
    fn duplicate_names_rejected_before_toolkit() {
        let mut bar = bar();
        bar.add_var_rw("x", BuiltinType::Int32, var(1i32), "", true).unwrap();
        let err = bar
            .add_var_cb("x", BuiltinType::Int32, || Value::I32(0), |_| {}, "", true)
            .unwrap_err();
        assert!(matches!(err, BarError::DuplicateName(ref n) if n == "x"));
        let err = bar.add_button("x", || {}, "").unwrap_err();
        assert!(matches!(err, BarError::DuplicateName(_)));
        assert_eq!(bar.registry().len(), 1);
    }

    #[test]
    fn invalid_names_rejected() {
        let mut bar = bar();
        let err = bar
            .add_var_rw("a:b", BuiltinType::Int32, var(1i32), "", true)
            .unwrap_err();
        assert!(matches!(err, BarError::InvalidName(_)));
    }

    #[test]
    fn shape_mismatch_rejected() {
        let mut bar = bar();
        let err = bar
            .add_var_rw("x", BuiltinType::Float, var(1.0f64), "", true)
            .unwrap_err();
        assert!(matches!(err, BarError::ShapeMismatch { .. }));
        // the name is still free after a rejected registration
        bar.add_var_rw("x", BuiltinType::Double, var(1.0f64), "", true).unwrap();
    }

    #[test]
    fn toolkit_failure_is_not_recorded() {
        let mut bar = bar();
        let err = bar
            .add_var_rw("x", BuiltinType::Int32, var(1i32), "label='oops", true)
            .unwrap_err();
        assert!(matches!(err, BarError::Toolkit(_)));
        assert!(bar.registry().is_empty());
        bar.add_var_rw("x", BuiltinType::Int32, var(1i32), "", true).unwrap();
    }

    #[test]
    fn unsupported_type_saves_sentinel() {
        let types = TypeRegistry::new();
        let mut bar = bar();
        bar.add_var_rw("packed", BuiltinType::Color32, var(0xff00_00ffu32), "", true)
            .unwrap();
        assert_eq!(
            bar.to_text(&types),
            format!("packed: {TYPE_NOT_SUPPORTED}\n\n")
        );
    }

    #[test]
    fn undefined_enum_code_saves_sentinel() {
        let mut toolkit = HeadlessToolkit::new();
        let mut types = TypeRegistry::new();
        let mode = define_enum(
            &mut toolkit,
            &mut types,
            EnumDef::new("Mode").with_value(0, "Off").with_value(1, "On"),
        )
        .unwrap();
        let mut bar = TweakBar::new(&mut toolkit, "Test").unwrap();
        bar.add_var_rw("mode", mode, var(Value::Enum(5)), "", true).unwrap();
        assert_eq!(
            bar.to_text(&types),
            format!("mode: Mode {ENUM_VALUE_NOT_DEFINED}\n\n")
        );
    }

    #[test]
    fn load_enum_by_label() {
        let mut toolkit = HeadlessToolkit::new();
        let mut types = TypeRegistry::new();
        let mode = define_enum(
            &mut toolkit,
            &mut types,
            EnumDef::new("Mode").with_value(0, "Off").with_value(1, "Always on"),
        )
        .unwrap();
        let mut bar = TweakBar::new(&mut toolkit, "Test").unwrap();
        let cell = var(Value::Enum(0));
        bar.add_var_rw("mode", mode, cell.clone(), "", true).unwrap();

        let report = bar.load_str(&types, "mode: Mode Always on\n");
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(*cell.borrow(), Value::Enum(1));

        let report = bar.load_str(&types, "mode: Mode Sometimes\n");
        assert!(matches!(report.issues[0].kind, IssueKind::MalformedValue(_)));
        assert_eq!(*cell.borrow(), Value::Enum(1));
    }

    #[test]
    fn define_enum_rejects_taken_name_without_toolkit_call() {
        let mut toolkit = HeadlessToolkit::new();
        let mut types = TypeRegistry::new();
        let err = define_enum(
            &mut toolkit,
            &mut types,
            EnumDef::new("TW_TYPE_INT32").with_value(0, "A"),
        )
        .unwrap_err();
        assert!(matches!(err, BarError::Type(_)));
        assert!(toolkit.enums().is_empty());
    }

    #[test]
    fn callback_setter_receives_loaded_value() {
        let types = TypeRegistry::new();
        let mut bar = bar();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        bar.add_var_cb(
            "color",
            BuiltinType::Color3f,
            || Value::Vec3f([0.0, 0.0, 0.0]),
            move |v| sink.borrow_mut().push(v),
            "",
            true,
        )
        .unwrap();

        let report = bar.load_str(&types, "color: TW_TYPE_COLOR3F 1 0 0\n");
        assert_eq!(report.applied, 1);
        assert_eq!(*received.borrow(), vec![Value::Vec3f([1.0, 0.0, 0.0])]);
    }

    #[test]
    fn load_skips_bad_lines_and_continues() {
        let types = TypeRegistry::new();
        let mut bar = bar();
        let a = var(0i32);
        let b = var(0.0f32);
        bar.add_var_rw("a", BuiltinType::Int32, a.clone(), "", true).unwrap();
        bar.add_var_rw("b", BuiltinType::Float, b.clone(), "", true).unwrap();

        let text = "\
# header
a: TW_TYPE_NOPE 3
no colon here
a: TW_TYPE_INT32 x

ghost: TW_TYPE_INT32 9
a: TW_TYPE_FLOAT 1.5
b: TW_TYPE_FLOAT 1.5
a: TW_TYPE_INT32 42
";
        let report = bar.load_str(&types, text);
        assert_eq!(report.applied, 2);
        let lines: Vec<_> = report.issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, [2, 3, 4, 6, 7]);
        assert!(matches!(report.issues[0].kind, IssueKind::UnknownType(_)));
        assert!(matches!(report.issues[1].kind, IssueKind::MalformedLine(_)));
        assert!(matches!(report.issues[2].kind, IssueKind::MalformedValue(_)));
        assert_eq!(report.issues[3].kind, IssueKind::NotFound);
        assert!(matches!(report.issues[4].kind, IssueKind::TypeMismatch { .. }));
        assert_eq!(*a.borrow(), Value::I32(42));
        assert_eq!(*b.borrow(), Value::F32(1.5));
    }
}

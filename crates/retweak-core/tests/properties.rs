//! Property-based tests for the retweak codec.
//!
//! Every persistable built-in layout must survive serialize → split → parse
//! unchanged, including zero, negative, and extreme-magnitude floats.

use proptest::prelude::*;
use retweak_core::{
    BuiltinType, EnumDef, TypeRegistry, TypeTag, Value, format_line, parse, serialize, split_line,
};

/// Serialize as a full line, split it again, and parse the value back.
fn round_trip(value: &Value, tag: TypeTag, types: &TypeRegistry) -> Value {
    let line = format_line("var", &serialize(value, tag, types));
    let raw = split_line(&line)
        .expect("well-formed line")
        .expect("not a comment");
    assert_eq!(raw.name, "var");
    let resolved = types.resolve(raw.type_name).expect("type resolves");
    assert_eq!(resolved, tag);
    parse(resolved, raw.value, types).expect("value parses")
}

/// Compare floats bitwise so `-0.0` and NaN payloads count.
fn same_bits_f32(a: &[f32], b: &[f32]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan()))
}

fn same_bits_f64(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan()))
}

fn any_f32() -> impl Strategy<Value = f32> {
    let edges = prop::sample::select(vec![
        0.0f32,
        -0.0,
        f32::MAX,
        f32::MIN,
        f32::MIN_POSITIVE,
        -f32::MIN_POSITIVE,
        f32::EPSILON,
        f32::INFINITY,
        f32::NEG_INFINITY,
    ]);
    prop_oneof![
        edges,
        prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO,
    ]
}

fn any_f64() -> impl Strategy<Value = f64> {
    let edges = prop::sample::select(vec![
        0.0f64,
        -0.0,
        f64::MAX,
        f64::MIN,
        f64::MIN_POSITIVE,
        f64::INFINITY,
    ]);
    prop_oneof![
        edges,
        prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Single-precision scalars restore bit-identically.
    #[test]
    fn float_round_trip(v in any_f32()) {
        let types = TypeRegistry::new();
        let back = round_trip(&Value::F32(v), BuiltinType::Float.into(), &types);
        let back = back.as_f32().expect("f32 value");
        prop_assert!(same_bits_f32(&[v], &[back]), "{} -> {}", v, back);
    }

    /// Double-precision scalars restore bit-identically.
    #[test]
    fn double_round_trip(v in any_f64()) {
        let types = TypeRegistry::new();
        let back = round_trip(&Value::F64(v), BuiltinType::Double.into(), &types);
        let back = back.as_f64().expect("f64 value");
        prop_assert!(same_bits_f64(&[v], &[back]), "{} -> {}", v, back);
    }

    /// 3- and 4-component f32 vectors restore for every type sharing the layout.
    #[test]
    fn vec_f32_round_trip(
        a in any_f32(), b in any_f32(), c in any_f32(), d in any_f32(),
    ) {
        let types = TypeRegistry::new();
        for ty in [BuiltinType::Color3f, BuiltinType::Dir3f] {
            let back = round_trip(&Value::Vec3f([a, b, c]), ty.into(), &types);
            let back = back.as_vec3f().expect("vec3f");
            prop_assert!(same_bits_f32(&[a, b, c], &back), "{}: {:?}", ty, back);
        }
        for ty in [BuiltinType::Color4f, BuiltinType::Quat4f] {
            let back = round_trip(&Value::Vec4f([a, b, c, d]), ty.into(), &types);
            let back = back.as_vec4f().expect("vec4f");
            prop_assert!(same_bits_f32(&[a, b, c, d], &back), "{}: {:?}", ty, back);
        }
    }

    /// f64 direction and quaternion types restore.
    #[test]
    fn vec_f64_round_trip(
        a in any_f64(), b in any_f64(), c in any_f64(), d in any_f64(),
    ) {
        let types = TypeRegistry::new();
        let back = round_trip(&Value::Vec3d([a, b, c]), BuiltinType::Dir3d.into(), &types);
        match back {
            Value::Vec3d(v) => prop_assert!(same_bits_f64(&[a, b, c], &v)),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
        let back = round_trip(&Value::Vec4d([a, b, c, d]), BuiltinType::Quat4d.into(), &types);
        match back {
            Value::Vec4d(v) => prop_assert!(same_bits_f64(&[a, b, c, d], &v)),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    /// Integers of every width restore exactly, including their extremes.
    #[test]
    fn integer_round_trip(
        i8v in any::<i8>(), u8v in any::<u8>(),
        i16v in any::<i16>(), u16v in any::<u16>(),
        i32v in any::<i32>(), u32v in any::<u32>(),
    ) {
        let types = TypeRegistry::new();
        let cases = [
            (Value::I8(i8v), BuiltinType::Int8),
            (Value::U8(u8v), BuiltinType::Uint8),
            (Value::I16(i16v), BuiltinType::Int16),
            (Value::U16(u16v), BuiltinType::Uint16),
            (Value::I32(i32v), BuiltinType::Int32),
            (Value::U32(u32v), BuiltinType::Uint32),
        ];
        for (value, ty) in cases {
            prop_assert_eq!(round_trip(&value, ty.into(), &types), value);
        }
    }

    /// Booleans restore for every boolean width.
    #[test]
    fn bool_round_trip(b in any::<bool>()) {
        let types = TypeRegistry::new();
        for ty in [BuiltinType::BoolCpp, BuiltinType::Bool8, BuiltinType::Bool16, BuiltinType::Bool32] {
            prop_assert_eq!(round_trip(&Value::Bool(b), ty.into(), &types), Value::Bool(b));
        }
    }

    /// Arbitrary text, including line breaks and non-ASCII whitespace at
    /// the edges, restores through escaping.
    #[test]
    fn text_round_trip(s in "[ -~\\n\\r\\t\\\\\u{a0}\u{b}\u{c}\u{85}\u{2028}\u{3000}é]{0,40}") {
        let types = TypeRegistry::new();
        let value = Value::Text(s.clone());
        prop_assert_eq!(round_trip(&value, BuiltinType::StdString.into(), &types), value);
    }

    /// Any registered enum code restores through its label.
    #[test]
    fn enum_round_trip(pick in 0usize..4) {
        let mut types = TypeRegistry::new();
        let id = types
            .define_enum(
                EnumDef::new("Filter")
                    .with_value(-3, "Nearest")
                    .with_value(0, "Linear")
                    .with_value(12, "Mip mapped")
                    .with_value(i32::MAX, "Anisotropic"),
            )
            .expect("valid enum");
        let codes = [-3, 0, 12, i32::MAX];
        let value = Value::Enum(codes[pick]);
        prop_assert_eq!(round_trip(&value, TypeTag::Enum(id), &types), value);
    }

    /// Serialization never panics, whatever the tag/value pairing.
    #[test]
    fn serialize_is_total(v in any_f32(), ty_index in 0usize..23) {
        let types = TypeRegistry::new();
        let ty = retweak_core::BUILTIN_TYPES[ty_index];
        let text = serialize(&Value::F32(v), ty.into(), &types);
        prop_assert!(!text.is_empty());
        prop_assert!(!text.contains('\n'));
    }
}

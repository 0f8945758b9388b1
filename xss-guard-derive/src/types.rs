//! Type inspection for the derive macro.

const SCALARS: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "f32", "f64", "bool", "char",
];

/// Returns the primitive name when `ty` is written as a bare scalar (`i32`, `bool`, ...).
///
/// Only single-segment paths without generics count. `std::primitive::i32`, type
/// aliases and wrappers like `Option<u8>` return `None` and are left to the
/// `FieldValue` bound, which reports them at the use site.
pub(crate) fn scalar_name(ty: &syn::Type) -> Option<String> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some()
        || type_path.path.leading_colon.is_some()
        || type_path.path.segments.len() != 1
    {
        return None;
    }
    let segment = type_path.path.segments.first()?;
    if !segment.arguments.is_empty() {
        return None;
    }
    let name = segment.ident.to_string();
    SCALARS.contains(&name.as_str()).then_some(name)
}

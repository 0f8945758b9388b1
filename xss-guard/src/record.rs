//! Field-visitor capability for fixed-shape records.
//!
//! A record is a struct with a statically known set of named text fields. The
//! scanner never inspects its memory layout: it asks the record for its
//! [`FieldDescriptor`]s, reads and writes fields by name, and builds the
//! sanitized copy through [`Record::instantiate`].
//!
//! Implementations are normally generated with `#[derive(Record)]`. Hand-written
//! impls are fine as long as `get`/`set` agree with `fields`.

use std::{any::Any, borrow::Cow, fmt};

/// Name and accessor availability of a single record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    readable: bool,
    writable: bool,
}

impl FieldDescriptor {
    /// Describes a field.
    #[must_use]
    pub const fn new(name: &'static str, readable: bool, writable: bool) -> Self {
        Self {
            name,
            readable,
            writable,
        }
    }

    /// The field name as used by [`Record::get`] and [`Record::set`].
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether [`Record::get`] exposes the field.
    pub const fn is_readable(&self) -> bool {
        self.readable
    }

    /// Whether [`Record::set`] accepts the field.
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    /// Only fields with both accessors are copied into a sanitized record.
    pub const fn is_scannable(&self) -> bool {
        self.readable && self.writable
    }
}

/// Error returned when a record's zero-argument constructor fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("failed to construct `{type_name}`: {reason}")]
pub struct ConstructionError {
    type_name: &'static str,
    reason: String,
}

impl ConstructionError {
    /// Creates a construction error for `type_name`.
    pub fn new(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            type_name,
            reason: reason.into(),
        }
    }

    /// The record type that could not be constructed.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Why construction failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A structured value with a fixed, introspectable set of named text fields.
///
/// The trait is object safe so records can live inside [`crate::Value`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Record`",
    label = "this type cannot be scanned field by field",
    note = "add `#[derive(Record)]` to the struct definition"
)]
pub trait Record: Any + fmt::Debug + Send {
    /// Name of the concrete type, used in errors and logs.
    fn type_name(&self) -> &'static str;

    /// Every field of the record, in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Reads a field. `None` means the field is null, unreadable or unknown.
    fn get(&self, name: &str) -> Option<&str>;

    /// Writes a field. Returns `false` if the field is unknown or not writable.
    fn set(&mut self, name: &str, value: String) -> bool;

    /// Builds a fresh instance of the same concrete type with zero-valued fields.
    fn instantiate(&self) -> Result<Box<dyn Record>, ConstructionError>;

    /// Borrows the record as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Converts the boxed record into [`Any`] for downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Record {
    /// Returns `true` if the concrete type is `T`.
    pub fn is<T: Record>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the concrete record if it is a `T`.
    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Recovers the concrete record, handing the box back if it is not a `T`.
    pub fn downcast<T: Record>(self: Box<Self>) -> Result<T, Box<dyn Record>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(record) => Ok(*record),
                Err(_) => unreachable!("type id checked above"),
            }
        } else {
            Err(self)
        }
    }

    /// Compares two records by type name and readable field values.
    pub(crate) fn same_fields(&self, other: &dyn Record) -> bool {
        self.type_name() == other.type_name()
            && self
                .fields()
                .iter()
                .filter(|field| field.is_readable())
                .all(|field| self.get(field.name()) == other.get(field.name()))
    }
}

/// Field types the scanner may read and rewrite.
///
/// `read` returning `None` marks a null field: the scanner leaves it at its
/// zero value in the sanitized copy.
///
/// Foreign string-like types can't implement this directly (orphan rules);
/// wrap them in a local newtype instead.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be a scanned record field",
    label = "this field type has no text accessors",
    note = "scanned fields must be `String`, `Option<String>` or implement `FieldValue`",
    note = "mark the field with `#[record(skip)]` to leave it out of sanitization"
)]
pub trait FieldValue {
    /// Returns the field as text, or `None` when it is null.
    fn read(&self) -> Option<&str>;

    /// Stores sanitized text into the field.
    fn write(&mut self, value: String);
}

impl FieldValue for String {
    fn read(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn write(&mut self, value: String) {
        *self = value;
    }
}

impl FieldValue for Option<String> {
    fn read(&self) -> Option<&str> {
        self.as_deref()
    }

    fn write(&mut self, value: String) {
        *self = Some(value);
    }
}

impl FieldValue for Cow<'static, str> {
    fn read(&self) -> Option<&str> {
        Some(self.as_ref())
    }

    fn write(&mut self, value: String) {
        *self = Cow::Owned(value);
    }
}

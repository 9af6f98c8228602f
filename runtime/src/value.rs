//! Borrowed views of log method arguments.
//!
//! Generated code never formats or copies an argument up front: each field is
//! exposed as a [`FieldValue`] borrowing from the call site, and sinks decide
//! what to do with it.

use std::borrow::Cow;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// The value of one structured field.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    Str(&'a str),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F64(f64),
    Bool(bool),
    Char(char),
    /// Any other value rendered with its `Display` implementation.
    Display(&'a dyn fmt::Display),
    /// Any other value rendered with its `Debug` implementation.
    Debug(&'a dyn fmt::Debug),
    /// A path that is not valid UTF-8, rendered lossily.
    Path(&'a Path),
    /// An absent value, rendered as `(null)`.
    None,
}

impl<'a> FieldValue<'a> {
    /// Returns the string slice, if this is a string value.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I64(v) => Some(v),
            Self::U64(v) => i64::try_from(v).ok(),
            Self::I128(v) => i64::try_from(v).ok(),
            Self::U128(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns the value as an `f64`, if it is a float.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a `bool`, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::I128(v) => fmt::Display::fmt(v, f),
            Self::U128(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Display::fmt(v, f),
            Self::Display(v) => fmt::Display::fmt(v, f),
            Self::Debug(v) => fmt::Debug::fmt(v, f),
            Self::Path(v) => fmt::Display::fmt(&v.display(), f),
            Self::None => f.write_str("(null)"),
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(v) => fmt::Debug::fmt(v, f),
            Self::Char(v) => fmt::Debug::fmt(v, f),
            Self::Debug(v) => fmt::Debug::fmt(v, f),
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// Conversion of a log method argument into a [`FieldValue`].
///
/// Every parameter type of a log method must implement this trait.
/// Implement it for your own types, or wrap values in [`display`] or
/// [`debug`] at the call site.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue<'_>;
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue<'_> {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &mut T {
    fn to_field_value(&self) -> FieldValue<'_> {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Box<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Arc<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Rc<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::None,
        }
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl ToFieldValue for Cow<'_, str> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

macro_rules! impl_to_field_value {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue<'_> {
                    FieldValue::$variant(<$target>::from(*self))
                }
            }
        )*
    };
}

impl_to_field_value!(I64 as i64: i8, i16, i32, i64);
impl_to_field_value!(U64 as u64: u8, u16, u32, u64);
impl_to_field_value!(I128 as i128: i128);
impl_to_field_value!(U128 as u128: u128);
impl_to_field_value!(F64 as f64: f32, f64);
impl_to_field_value!(Bool as bool: bool);
impl_to_field_value!(Char as char: char);

impl ToFieldValue for isize {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::I64(*self as i64)
    }
}

impl ToFieldValue for usize {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::U64(*self as u64)
    }
}

macro_rules! impl_display_field_value {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Display(self)
                }
            }
        )*
    };
}

impl_display_field_value!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, fmt::Arguments<'_>);

impl ToFieldValue for Duration {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Debug(self)
    }
}

impl ToFieldValue for Path {
    fn to_field_value(&self) -> FieldValue<'_> {
        match self.to_str() {
            Some(s) => FieldValue::Str(s),
            None => FieldValue::Path(self),
        }
    }
}

impl ToFieldValue for PathBuf {
    fn to_field_value(&self) -> FieldValue<'_> {
        self.as_path().to_field_value()
    }
}

/// Logs a value through its `Display` implementation.
#[derive(Clone, Copy)]
pub struct DisplayValue<T>(pub T);

/// Logs a value through its `Debug` implementation.
#[derive(Clone, Copy)]
pub struct DebugValue<T>(pub T);

impl<T: fmt::Display> ToFieldValue for DisplayValue<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Display(&self.0)
    }
}

impl<T: fmt::Debug> ToFieldValue for DebugValue<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Debug(&self.0)
    }
}

impl<T: fmt::Display> fmt::Display for DisplayValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for DebugValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Wraps a value so it is logged with `Display`.
pub fn display<T: fmt::Display>(value: T) -> DisplayValue<T> {
    DisplayValue(value)
}

/// Wraps a value so it is logged with `Debug`.
pub fn debug<T: fmt::Debug>(value: T) -> DebugValue<T> {
    DebugValue(value)
}

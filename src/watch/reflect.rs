//! Named member lookup for watch targets.
//!
//! Host types opt in by implementing [`Reflect`]. Each lookup hands back a
//! plain function that reads the member as a [`MemberValue`].
//!
//! ```ignore
//! struct Player { pub health: i32, shield: i32 }
//!
//! impl Reflect for Player {
//!     fn field(name: &str) -> Option<MemberReader<Self>> {
//!         match name {
//!             "health" => Some(|p: &Player| p.health.into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn property(name: &str) -> Option<MemberReader<Self>> {
//!         match name {
//!             "total" => Some(|p: &Player| (p.health + p.shield).into()),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

// =============================================================================
// Member Value
// =============================================================================

/// Dynamically typed value read from a reflected member.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Text(String),
}

macro_rules! member_value_from {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for MemberValue {
                fn from(value: $source) -> Self {
                    MemberValue::$variant(value as $target)
                }
            }
        )+
    };
}

member_value_from!(Int, i64, i8, i16, i32, i64, isize);
member_value_from!(UInt, u64, u8, u16, u32, u64, usize);
member_value_from!(Float, f64, f32, f64);

impl From<bool> for MemberValue {
    fn from(value: bool) -> Self {
        MemberValue::Bool(value)
    }
}

impl From<char> for MemberValue {
    fn from(value: char) -> Self {
        MemberValue::Char(value)
    }
}

impl From<String> for MemberValue {
    fn from(value: String) -> Self {
        MemberValue::Text(value)
    }
}

impl From<&str> for MemberValue {
    fn from(value: &str) -> Self {
        MemberValue::Text(value.to_string())
    }
}

// =============================================================================
// Reflect
// =============================================================================

/// Reads a member of `U`.
pub type MemberReader<U> = fn(&U) -> MemberValue;

/// Which lookup table resolved a member name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

/// Public members of a host type, by name.
pub trait Reflect: Sized + 'static {
    /// Reader for the public field called `name`.
    fn field(name: &str) -> Option<MemberReader<Self>>;

    /// Reader for the computed property called `name`.
    fn property(_name: &str) -> Option<MemberReader<Self>> {
        None
    }
}

/// Resolve `name` against `U`'s fields, then its properties.
pub fn resolve_member<U: Reflect>(name: &str) -> Option<(MemberKind, MemberReader<U>)> {
    U::field(name)
        .map(|reader| (MemberKind::Field, reader))
        .or_else(|| U::property(name).map(|reader| (MemberKind::Property, reader)))
}

//! Enum types for the forma domain model.
//!
//! Each enum serializes as its wire string (the names the original schema
//! format uses) and rejects unknown strings on deserialization: the field
//! and rule palettes are closed sets.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Macro: defines a closed string enum with serde + FromStr support.
// ---------------------------------------------------------------------------
macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// All variants, in palette order.
            pub const ALL: &'static [$name] = &[ $( Self::$variant, )+ ];

            /// Returns the wire string representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $str, )+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $str => Ok(Self::$variant), )+
                    other => Err(format!(
                        concat!("unknown ", stringify!($name), ": {}"),
                        other
                    )),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ===========================================================================
// FieldType
// ===========================================================================

define_str_enum! {
    /// The input widget a field renders as.
    FieldType, default = Text,
    variants: [
        (Text, "text"),
        (Number, "number"),
        (Textarea, "textarea"),
        (Select, "select"),
        (Radio, "radio"),
        (Checkbox, "checkbox"),
        (Date, "date"),
    ]
}

impl FieldType {
    /// Returns `true` for types that carry an options list.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Returns `true` for types whose value is a list of selections.
    pub fn is_multi_value(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

// ===========================================================================
// RuleKind
// ===========================================================================

define_str_enum! {
    /// The kind of a validation rule.
    RuleKind, default = Required,
    variants: [
        (Required, "required"),
        (MinLength, "minLength"),
        (MaxLength, "maxLength"),
        (Email, "email"),
        (Password, "password"),
    ]
}

impl RuleKind {
    /// Returns `true` if the rule carries a numeric length parameter.
    pub fn takes_value(&self) -> bool {
        matches!(self, Self::MinLength | Self::MaxLength)
    }
}

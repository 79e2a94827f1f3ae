//! Wire type tags for the Compact Binary format.

use std::fmt;

/// Recursion bound for nested structs and containers. A capture where
/// every byte opens another nesting level would otherwise recurse once
/// per byte; anything deeper than this is garbage, not structure.
pub(crate) const MAX_NESTING_DEPTH: usize = 256;

/// Wire type tag preceding every field and value in a Compact Binary stream.
///
/// The format is self-describing: tags are read inline from the stream, so
/// a payload can be walked without a compiled schema. Raw values outside
/// the defined set are carried as [`BondDataType::Unknown`] rather than
/// rejected at read time; whether they are fatal is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondDataType {
    Stop,
    StopBase,
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    Str,
    Struct,
    List,
    Set,
    Map,
    Int8,
    Int16,
    Int32,
    Int64,
    WStr,
    Unavailable,
    /// A tag value the format does not define.
    Unknown(u8),
}

impl BondDataType {
    /// Maps a raw wire byte to its tag.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => BondDataType::Stop,
            1 => BondDataType::StopBase,
            2 => BondDataType::Bool,
            3 => BondDataType::Uint8,
            4 => BondDataType::Uint16,
            5 => BondDataType::Uint32,
            6 => BondDataType::Uint64,
            7 => BondDataType::Float,
            8 => BondDataType::Double,
            9 => BondDataType::Str,
            10 => BondDataType::Struct,
            11 => BondDataType::List,
            12 => BondDataType::Set,
            13 => BondDataType::Map,
            14 => BondDataType::Int8,
            15 => BondDataType::Int16,
            16 => BondDataType::Int32,
            17 => BondDataType::Int64,
            18 => BondDataType::WStr,
            127 => BondDataType::Unavailable,
            other => BondDataType::Unknown(other),
        }
    }
}

/// Tags render under their `BT_*` wire names; unknown tags render as their
/// raw numeric value, which is what the trace reports for them.
impl fmt::Display for BondDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondDataType::Stop => write!(f, "BT_STOP"),
            BondDataType::StopBase => write!(f, "BT_STOP_BASE"),
            BondDataType::Bool => write!(f, "BT_BOOL"),
            BondDataType::Uint8 => write!(f, "BT_UINT8"),
            BondDataType::Uint16 => write!(f, "BT_UINT16"),
            BondDataType::Uint32 => write!(f, "BT_UINT32"),
            BondDataType::Uint64 => write!(f, "BT_UINT64"),
            BondDataType::Float => write!(f, "BT_FLOAT"),
            BondDataType::Double => write!(f, "BT_DOUBLE"),
            BondDataType::Str => write!(f, "BT_STRING"),
            BondDataType::Struct => write!(f, "BT_STRUCT"),
            BondDataType::List => write!(f, "BT_LIST"),
            BondDataType::Set => write!(f, "BT_SET"),
            BondDataType::Map => write!(f, "BT_MAP"),
            BondDataType::Int8 => write!(f, "BT_INT8"),
            BondDataType::Int16 => write!(f, "BT_INT16"),
            BondDataType::Int32 => write!(f, "BT_INT32"),
            BondDataType::Int64 => write!(f, "BT_INT64"),
            BondDataType::WStr => write!(f, "BT_WSTRING"),
            BondDataType::Unavailable => write!(f, "BT_UNAVAILABLE"),
            BondDataType::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_covers_defined_tags() {
        assert_eq!(BondDataType::from_raw(0), BondDataType::Stop);
        assert_eq!(BondDataType::from_raw(9), BondDataType::Str);
        assert_eq!(BondDataType::from_raw(13), BondDataType::Map);
        assert_eq!(BondDataType::from_raw(18), BondDataType::WStr);
        assert_eq!(BondDataType::from_raw(127), BondDataType::Unavailable);
    }

    #[test]
    fn from_raw_preserves_undefined_values() {
        assert_eq!(BondDataType::from_raw(19), BondDataType::Unknown(19));
        assert_eq!(BondDataType::from_raw(31), BondDataType::Unknown(31));
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(BondDataType::Str.to_string(), "BT_STRING");
        assert_eq!(BondDataType::StopBase.to_string(), "BT_STOP_BASE");
        assert_eq!(BondDataType::Unknown(21).to_string(), "21");
    }
}

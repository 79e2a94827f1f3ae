//! Schema-less reader for the Compact Binary wire format.
//!
//! The reader exposes exactly the primitives and framing tokens the wire
//! format defines, advancing a checked cursor. It knows nothing about the
//! structure being decoded; the walker drives it from the inline tags.
//!
//! Compact Binary is little-endian. Variable-width integers are LEB128,
//! and signed 16/32/64-bit values are zigzag-coded on top of that. Under
//! protocol version 2 a struct is preceded by a varint length prefix and
//! small list counts are packed into the header byte.

use bondlens_buffers::Reader;

use crate::constants::{BondDataType, MAX_NESTING_DEPTH};
use crate::error::BondError;

/// Field framing token: type tag plus numeric field ordinal.
///
/// Field ids are opaque without a schema and are reported verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub tag: BondDataType,
    pub id: u16,
}

/// Container framing token. `value_type` is present for maps only.
///
/// `count` comes straight off the wire and must be treated as untrusted;
/// the walker applies its own plausibility check before iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub element_type: BondDataType,
    pub count: i32,
    pub value_type: Option<BondDataType>,
}

/// Cursor over one Compact Binary payload.
pub struct CompactBinaryReader<'a> {
    reader: Reader<'a>,
    version: u16,
}

impl<'a> CompactBinaryReader<'a> {
    pub fn new(data: &'a [u8], version: u16) -> Self {
        Self {
            reader: Reader::new(data),
            version,
        }
    }

    /// Consumes the struct length prefix present under protocol version 2.
    pub fn read_struct_begin(&mut self) -> Result<(), BondError> {
        if self.version == 2 {
            self.read_var_u32()?;
        }
        Ok(())
    }

    pub fn read_struct_end(&mut self) -> Result<(), BondError> {
        Ok(())
    }

    /// Reads one field header byte, plus the trailing id byte(s) when the
    /// id does not fit the header's high three bits.
    pub fn read_field_begin(&mut self) -> Result<FieldHeader, BondError> {
        let raw = self.reader.u8()?;
        let tag = BondDataType::from_raw(raw & 0x1f);
        let id = match raw >> 5 {
            6 => u16::from(self.reader.u8()?),
            7 => self.reader.u16_le()?,
            bits => u16::from(bits),
        };
        Ok(FieldHeader { tag, id })
    }

    pub fn read_field_end(&mut self) -> Result<(), BondError> {
        Ok(())
    }

    /// Reads a list/set container header. Version 2 packs counts below 7
    /// into the header byte's high bits as `count + 1`.
    pub fn read_container_begin(&mut self) -> Result<ContainerHeader, BondError> {
        let raw = self.reader.u8()?;
        let element_type = BondDataType::from_raw(raw & 0x1f);
        let count = if self.version == 2 && raw & 0xe0 != 0 {
            i32::from((raw >> 5) - 1)
        } else {
            self.read_var_u32()? as i32
        };
        Ok(ContainerHeader {
            element_type,
            count,
            value_type: None,
        })
    }

    /// Reads a map container header: key type, value type, then the count.
    pub fn read_map_container_begin(&mut self) -> Result<ContainerHeader, BondError> {
        let element_type = BondDataType::from_raw(self.reader.u8()?);
        let value_type = BondDataType::from_raw(self.reader.u8()?);
        let count = self.read_var_u32()? as i32;
        Ok(ContainerHeader {
            element_type,
            count,
            value_type: Some(value_type),
        })
    }

    pub fn read_container_end(&mut self) -> Result<(), BondError> {
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool, BondError> {
        Ok(self.reader.u8()? != 0)
    }

    pub fn read_uint8(&mut self) -> Result<u8, BondError> {
        Ok(self.reader.u8()?)
    }

    pub fn read_uint16(&mut self) -> Result<u16, BondError> {
        self.read_var_u16()
    }

    pub fn read_uint32(&mut self) -> Result<u32, BondError> {
        self.read_var_u32()
    }

    pub fn read_uint64(&mut self) -> Result<u64, BondError> {
        self.read_var_u64()
    }

    pub fn read_int8(&mut self) -> Result<i8, BondError> {
        Ok(self.reader.i8()?)
    }

    pub fn read_int16(&mut self) -> Result<i16, BondError> {
        let v = self.read_var_u16()?;
        Ok(((v >> 1) as i16) ^ -((v & 1) as i16))
    }

    pub fn read_int32(&mut self) -> Result<i32, BondError> {
        let v = self.read_var_u32()?;
        Ok(((v >> 1) as i32) ^ -((v & 1) as i32))
    }

    pub fn read_int64(&mut self) -> Result<i64, BondError> {
        let v = self.read_var_u64()?;
        Ok(((v >> 1) as i64) ^ -((v & 1) as i64))
    }

    pub fn read_float(&mut self) -> Result<f32, BondError> {
        Ok(self.reader.f32_le()?)
    }

    pub fn read_double(&mut self) -> Result<f64, BondError> {
        Ok(self.reader.f64_le()?)
    }

    /// Reads a length-prefixed UTF-8 string. Invalid sequences are decoded
    /// lossily; a captured payload is not rejected over bad text bytes.
    pub fn read_string(&mut self) -> Result<String, BondError> {
        let len = self.read_var_u32()? as usize;
        let bytes = self.reader.buf(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Reads a UTF-16LE string prefixed by its character count.
    pub fn read_wstring(&mut self) -> Result<String, BondError> {
        let chars = self.read_var_u32()? as usize;
        let bytes = self.reader.buf(chars * 2)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(String::from_utf16_lossy(&units))
    }

    /// Advances the cursor past one value of the given tag without
    /// materializing it. Structural tags (STOP, STOP_BASE) and undefined
    /// tags have no value representation and cannot be skipped. Nested
    /// containers and structs are bounded by the same depth cap as the
    /// walker.
    pub fn skip(&mut self, tag: BondDataType) -> Result<(), BondError> {
        self.skip_nested(tag, 0)
    }

    fn skip_nested(&mut self, tag: BondDataType, level: usize) -> Result<(), BondError> {
        if level >= MAX_NESTING_DEPTH {
            return Err(BondError::NestingTooDeep);
        }
        match tag {
            BondDataType::Bool | BondDataType::Int8 | BondDataType::Uint8 => {
                self.reader.skip(1)?;
            }
            BondDataType::Uint16
            | BondDataType::Uint32
            | BondDataType::Uint64
            | BondDataType::Int16
            | BondDataType::Int32
            | BondDataType::Int64 => {
                self.read_var_u64()?;
            }
            BondDataType::Float => {
                self.reader.skip(4)?;
            }
            BondDataType::Double => {
                self.reader.skip(8)?;
            }
            BondDataType::Str => {
                let len = self.read_var_u32()? as usize;
                self.reader.skip(len)?;
            }
            BondDataType::WStr => {
                let chars = self.read_var_u32()? as usize;
                self.reader.skip(chars * 2)?;
            }
            BondDataType::List | BondDataType::Set => {
                let header = self.read_container_begin()?;
                for _ in 0..header.count {
                    self.skip_nested(header.element_type, level + 1)?;
                }
                self.read_container_end()?;
            }
            BondDataType::Map => {
                let header = self.read_map_container_begin()?;
                for _ in 0..header.count {
                    self.skip_nested(header.element_type, level + 1)?;
                    if let Some(value_type) = header.value_type {
                        self.skip_nested(value_type, level + 1)?;
                    }
                }
                self.read_container_end()?;
            }
            BondDataType::Struct => self.skip_struct(level)?,
            BondDataType::Stop
            | BondDataType::StopBase
            | BondDataType::Unavailable
            | BondDataType::Unknown(_) => return Err(BondError::Unskippable(tag)),
        }
        Ok(())
    }

    fn skip_struct(&mut self, level: usize) -> Result<(), BondError> {
        if self.version == 2 {
            // v2 structs carry their byte length up front.
            let len = self.read_var_u32()? as usize;
            self.reader.skip(len)?;
            return Ok(());
        }
        loop {
            let field = self.read_field_begin()?;
            match field.tag {
                BondDataType::Stop => break,
                BondDataType::StopBase => continue,
                tag => self.skip_nested(tag, level + 1)?,
            }
            self.read_field_end()?;
        }
        self.read_struct_end()
    }

    fn read_var_u16(&mut self) -> Result<u16, BondError> {
        let mut value = 0u16;
        let mut shift = 0u32;
        loop {
            let byte = self.reader.u8()?;
            value |= u16::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 || shift >= 14 {
                break;
            }
            shift += 7;
        }
        Ok(value)
    }

    fn read_var_u32(&mut self) -> Result<u32, BondError> {
        let mut value = 0u32;
        let mut shift = 0u32;
        loop {
            let byte = self.reader.u8()?;
            value |= u32::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 || shift >= 28 {
                break;
            }
            shift += 7;
        }
        Ok(value)
    }

    fn read_var_u64(&mut self) -> Result<u64, BondError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.reader.u8()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 || shift >= 63 {
                break;
            }
            shift += 7;
        }
        Ok(value)
    }
}

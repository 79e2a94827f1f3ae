//! Recursive structural walk over a schema-less Compact Binary stream.
//!
//! The walker consumes framing tokens from the reader and mirrors every
//! decode event into the tracer. It trusts nothing in the stream: an
//! implausible container count stops iteration, unknown tags are skipped
//! rather than interpreted, and any cursor overrun surfaces as an error
//! from the reader, terminating the walk. There is no iteration cap on
//! the field loop; a stream that never yields STOP exhausts the buffer
//! and ends the walk through the overrun path. Nesting, however, is
//! capped: recursion past [`MAX_NESTING_DEPTH`] levels fails the attempt
//! with a decode error instead of growing the call stack per input byte.

use crate::constants::{BondDataType, MAX_NESTING_DEPTH};
use crate::error::BondError;
use crate::reader::CompactBinaryReader;
use crate::trace::Tracer;

/// Container counts at or above this are treated as a misaligned cursor
/// rather than a genuine container, and no element is decoded.
const CONTAINER_SANITY_LIMIT: i32 = 1000;

/// Reads one top-level struct: open banner, field loop until STOP,
/// close banner.
///
/// Depth is restored only on the success path. A failed walk leaves the
/// tracer's depth where the failure happened, which is the behavior the
/// discovery scanner's per-attempt bookkeeping builds on.
pub fn read_struct(reader: &mut CompactBinaryReader, tracer: &mut Tracer) -> Result<(), BondError> {
    read_struct_nested(reader, tracer, 0)
}

fn read_struct_nested(
    reader: &mut CompactBinaryReader,
    tracer: &mut Tracer,
    level: usize,
) -> Result<(), BondError> {
    if level >= MAX_NESTING_DEPTH {
        return Err(BondError::NestingTooDeep);
    }
    tracer.depth += 1;
    tracer.struct_open();
    reader.read_struct_begin()?;
    loop {
        let field = reader.read_field_begin()?;
        tracer.indented(&format!(
            "Data type: {:>15}\tField ID: {:>15}",
            field.tag.to_string(),
            field.id
        ));
        dispatch(reader, tracer, field.tag, level)?;
        reader.read_field_end()?;
        if field.tag == BondDataType::Stop {
            break;
        }
    }
    reader.read_struct_end()?;
    tracer.struct_close();
    tracer.depth -= 1;
    Ok(())
}

/// Reads one container: header line, element loop, close banner.
///
/// Maps dispatch the value type immediately after each key. The claimed
/// count is untrusted; see [`CONTAINER_SANITY_LIMIT`].
fn read_container(
    reader: &mut CompactBinaryReader,
    tracer: &mut Tracer,
    is_map: bool,
    level: usize,
) -> Result<(), BondError> {
    if level >= MAX_NESTING_DEPTH {
        return Err(BondError::NestingTooDeep);
    }
    let header = if is_map {
        reader.read_map_container_begin()?
    } else {
        reader.read_container_begin()?
    };
    let marker = match header.value_type {
        Some(value_type) => format!("Mapped value type: {value_type}"),
        None => String::new(),
    };
    tracer.indented(&format!(
        "Container item type: {:>15}\tItems: {:>10}\t{:>10}",
        header.element_type.to_string(),
        header.count,
        marker
    ));
    tracer.container_open();
    if header.count < CONTAINER_SANITY_LIMIT {
        for i in 0..header.count {
            tracer.indented(&format!("List item: {i}"));
            dispatch(reader, tracer, header.element_type, level)?;
            if let Some(value_type) = header.value_type {
                dispatch(reader, tracer, value_type, level)?;
            }
        }
    } else {
        tracer.indented("Container way too big. Unlikely we're looking at the right structure.");
    }
    tracer.indented("Done reading container.");
    tracer.container_close();
    reader.read_container_end()?;
    Ok(())
}

/// Routes one tag to its decode action.
///
/// STOP and STOP_BASE are structural no-ops. Tags outside the dispatch
/// table are reported and generically skipped; for tags the wire format
/// does not define at all, the skip itself fails and ends the attempt.
fn dispatch(
    reader: &mut CompactBinaryReader,
    tracer: &mut Tracer,
    tag: BondDataType,
    level: usize,
) -> Result<(), BondError> {
    match tag {
        BondDataType::Struct => read_struct_nested(reader, tracer, level + 1)?,
        BondDataType::List | BondDataType::Set => {
            read_container(reader, tracer, false, level + 1)?
        }
        BondDataType::Map => read_container(reader, tracer, true, level + 1)?,
        BondDataType::Str => {
            let value = reader.read_string()?;
            tracer.indented(&value);
        }
        BondDataType::WStr => {
            let value = reader.read_wstring()?;
            tracer.indented(&value);
        }
        BondDataType::Bool => {
            let value = reader.read_bool()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Double => {
            let value = reader.read_double()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Float => {
            let value = f64::from(reader.read_float()?);
            tracer.indented(&value.to_string());
        }
        BondDataType::Int8 => {
            let value = reader.read_int8()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Int16 => {
            let value = reader.read_int16()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Int32 => {
            let value = reader.read_int32()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Int64 => {
            let value = reader.read_int64()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Uint8 => {
            let value = reader.read_uint8()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Uint16 => {
            let value = reader.read_uint16()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Uint32 => {
            let value = reader.read_uint32()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Uint64 => {
            let value = reader.read_uint64()?;
            tracer.indented(&value.to_string());
        }
        BondDataType::Stop | BondDataType::StopBase => {}
        BondDataType::Unavailable | BondDataType::Unknown(_) => {
            tracer.indented(&format!("Skipping datatype: {:>10}", tag.to_string()));
            reader.skip(tag)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(data: &[u8], version: u16) -> (Result<(), BondError>, String, i32) {
        let mut reader = CompactBinaryReader::new(data, version);
        let mut tracer = Tracer::new();
        let result = read_struct(&mut reader, &mut tracer);
        let depth = tracer.depth;
        (result, tracer.into_string(), depth)
    }

    #[test]
    fn empty_struct_walk() {
        let (result, out, depth) = walk(&[0x00], 1);
        result.unwrap();
        assert_eq!(depth, -1);
        assert!(out.contains("BT_STOP"));
        assert_eq!(out.matches(" STR ").count(), 2);
    }

    #[test]
    fn depth_restored_after_nested_struct() {
        // struct { 1: struct { 0: STOP } } STOP
        let data = [0x2a, 0x00, 0x00];
        let (result, out, depth) = walk(&data, 1);
        result.unwrap();
        assert_eq!(depth, -1);
        // nested banner is indented one tab, outer is not
        assert!(out.contains("\t╔"));
        assert!(out.starts_with('╔'));
        assert_eq!(out.matches(" STR ").count(), 4);
    }

    #[test]
    fn failed_walk_leaves_depth_elevated() {
        // struct header only, then nothing: overrun inside the field loop
        let (result, _, depth) = walk(&[], 1);
        assert_eq!(result, Err(BondError::EndOfBuffer));
        assert_eq!(depth, 0);
    }

    #[test]
    fn unknown_tag_is_reported_then_fails_the_walk() {
        // field tag 21 is undefined; the skip notice lands before the error
        let data = [0x15, 0x00];
        let (result, out, _) = walk(&data, 1);
        assert_eq!(result, Err(BondError::Unskippable(BondDataType::Unknown(21))));
        assert!(out.contains("Skipping datatype:"));
        assert!(out.contains("        21"));
    }

    #[test]
    fn nesting_beyond_limit_fails_instead_of_recursing() {
        // every byte is a struct-tagged field header: one level per byte
        let data = vec![0x0a; 600];
        let (result, out, _) = walk(&data, 1);
        assert_eq!(result, Err(BondError::NestingTooDeep));
        assert!(out.contains(" STR "));
    }

    #[test]
    fn map_walk_reads_key_and_value_per_slot() {
        // struct { 1: map<string, int32> { "a": 1 } } STOP
        let data = [
            0x2d, // field: map, id 1
            0x09, 0x10, 0x01, // key type string, value type int32, count 1
            0x01, b'a', // key "a"
            0x02, // value 1 (zigzag)
            0x00, // STOP
        ];
        let (result, out, _) = walk(&data, 1);
        result.unwrap();
        assert!(out.contains("Mapped value type: BT_INT32"));
        assert!(out.contains("List item: 0\na\n1\n"));
    }
}

//! Protocol codec
//!
//! Encoding and decoding functions for device replies.
//!
//! All multi-byte fields are big-endian. Decoders validate every length
//! against the bytes actually present and never read past the reply.
//!
//! ### Handshake Reply (`NSCMD_DEVICEQUERY`)
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬──────────────────────┐
//! │Format (4)│ Size (4) │ Type (2) │ Sub (2)  │ Cmd (2) ... 0x0000   │
//! └──────────┴──────────┴──────────┴──────────┴──────────────────────┘
//! ```
//! A reply consisting of the 12-byte header alone carries no command array.
//!
//! ### Static Info Reply (`S2_DEVICEQUERY`)
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │ Addr (2) │ MTU (4)  │ BPS (4)  │ HwType(4)│
//! └──────────┴──────────┴──────────┴──────────┘
//! ```

use bytes::{Buf, BufMut};

use super::tags::{AttributeList, Tag, TagItem, TagValue, TAG_DONE, TAG_IGNORE, TAG_MORE, TAG_SKIP};
use super::reply::{HardwareType, NsdQueryResult, Sana2DeviceQuery, SignalQuality};
use crate::error::{Result, ScanError};

/// Handshake header: format (4) + size (4) + type (2) + sub type (2)
pub const NSD_QUERY_HEADER_SIZE: usize = 12;

/// Static info reply: addr size (2) + MTU (4) + BPS (4) + hardware type (4)
pub const DEVICE_QUERY_SIZE: usize = 14;

/// Signal quality reply: signal (4) + noise (4)
pub const SIGNAL_QUALITY_SIZE: usize = 8;

/// Offset value standing for a null list pointer
pub const NULL_OFFSET: u32 = u32::MAX;

/// Longest TAG_MORE chain followed before the list is rejected
const MAX_CHAIN: usize = 64;

// =============================================================================
// Read Helpers
// =============================================================================

fn need(buf: &[u8], len: usize, what: &str) -> Result<()> {
    if buf.remaining() < len {
        return Err(ScanError::Protocol(format!(
            "{}: expected {} bytes, got {}",
            what,
            len,
            buf.remaining()
        )));
    }
    Ok(())
}

fn read_u32(buf: &mut &[u8], what: &str) -> Result<u32> {
    need(buf, 4, what)?;
    Ok(buf.get_u32())
}

fn read_slice<'a>(buf: &mut &'a [u8], what: &str) -> Result<&'a [u8]> {
    let len = read_u32(buf, what)? as usize;
    need(buf, len, what)?;
    let whole: &'a [u8] = *buf;
    *buf = &whole[len..];
    Ok(&whole[..len])
}

// =============================================================================
// Tag List Encoding/Decoding
// =============================================================================

/// Encode a tag list, appending the TAG_DONE terminator
pub fn encode_tag_list(items: &[TagItem<'_>]) -> Vec<u8> {
    let mut out = Vec::new();

    for item in items {
        out.put_u32(item.tag);
        out.put_u8(item.value.kind());

        match &item.value {
            TagValue::Integer(n) => out.put_i32(*n),
            TagValue::Boolean(b) => out.put_u8(u8::from(*b)),
            TagValue::String(s) => {
                out.put_u32(s.len() as u32);
                out.put_slice(s.as_bytes());
            }
            TagValue::Bytes(b) => {
                out.put_u32(b.len() as u32);
                out.put_slice(b);
            }
            TagValue::Null => {}
        }
    }

    out.put_u32(TAG_DONE);
    out
}

/// Decode one item after its tag
fn decode_value<'a>(buf: &mut &'a [u8], tag: Tag) -> Result<TagValue<'a>> {
    need(buf, 1, "tag kind")?;
    let kind = buf.get_u8();

    let value = match kind {
        0x00 => {
            need(buf, 4, "integer value")?;
            TagValue::Integer(buf.get_i32())
        }
        0x01 => {
            need(buf, 1, "boolean value")?;
            TagValue::Boolean(buf.get_u8() != 0)
        }
        0x02 => TagValue::String(String::from_utf8_lossy(read_slice(buf, "string value")?)),
        0x03 => TagValue::Bytes(read_slice(buf, "byte value")?),
        0x04 => TagValue::Null,
        _ => {
            return Err(ScanError::Protocol(format!(
                "Unknown value kind 0x{:02x} for tag 0x{:08x}",
                kind, tag
            )))
        }
    };

    Ok(value)
}

/// Decode the tag list starting at `offset` inside `arena`
///
/// `NULL_OFFSET` decodes to an empty list. Control tags are resolved here:
/// the returned list holds user items only, in list order.
pub fn decode_tag_list(arena: &[u8], offset: u32) -> Result<AttributeList<'_>> {
    if offset == NULL_OFFSET {
        return Ok(AttributeList::empty());
    }

    let mut items = Vec::new();
    let mut visited = vec![offset];
    let mut buf = tail(arena, offset)?;
    let mut skip = 0usize;

    loop {
        let tag = read_u32(&mut buf, "tag")?;
        if tag == TAG_DONE {
            break;
        }

        let value = decode_value(&mut buf, tag)?;

        if skip > 0 {
            skip -= 1;
            continue;
        }

        match tag {
            TAG_IGNORE => {}
            TAG_SKIP => skip = control_operand(&value, tag)? as usize,
            TAG_MORE => {
                let next = control_operand(&value, tag)?;
                if visited.contains(&next) || visited.len() >= MAX_CHAIN {
                    return Err(ScanError::Protocol(format!(
                        "Tag list chain loops or is too long at offset {}",
                        next
                    )));
                }
                visited.push(next);
                buf = tail(arena, next)?;
            }
            _ => items.push(TagItem::new(tag, value)),
        }
    }

    Ok(AttributeList::from_items(items))
}

fn tail(arena: &[u8], offset: u32) -> Result<&[u8]> {
    arena.get(offset as usize..).ok_or_else(|| {
        ScanError::Protocol(format!(
            "Offset {} outside reply of {} bytes",
            offset,
            arena.len()
        ))
    })
}

fn control_operand(value: &TagValue<'_>, tag: Tag) -> Result<u32> {
    match value {
        TagValue::Integer(n) => Ok(*n as u32),
        other => Err(ScanError::Protocol(format!(
            "Control tag {} needs an integer operand, got {:?}",
            tag, other
        ))),
    }
}

// =============================================================================
// Scan Table Encoding/Decoding
// =============================================================================

/// Encode the per-network offset table of a scan reply
pub fn encode_offset_table(offsets: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(offsets.len() * 4);
    for offset in offsets {
        out.put_u32(*offset);
    }
    out
}

/// Decode exactly `count` tag lists referenced from the table at `offset`
pub fn decode_scan_table(arena: &[u8], offset: u32, count: u32) -> Result<Vec<AttributeList<'_>>> {
    let table_len = (count as usize).checked_mul(4).ok_or_else(|| {
        ScanError::Protocol(format!("Network count {} too large", count))
    })?;

    let mut table = tail(arena, offset)?;
    need(table, table_len, "network table")?;

    let mut lists = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let entry = table.get_u32();
        lists.push(decode_tag_list(arena, entry)?);
    }

    Ok(lists)
}

// =============================================================================
// Fixed Reply Encoding/Decoding
// =============================================================================

/// Encode a handshake reply
pub fn encode_nsd_query(result: &NsdQueryResult) -> Vec<u8> {
    let mut out = Vec::with_capacity(NSD_QUERY_HEADER_SIZE);
    out.put_u32(result.format);
    out.put_u32(result.size_available);
    out.put_u16(result.device_type);
    out.put_u16(result.device_sub_type);

    if let Some(commands) = &result.supported_commands {
        for command in commands.iter().filter(|c| **c != 0) {
            out.put_u16(*command);
        }
        out.put_u16(0);
    }

    out
}

/// Decode a handshake reply of `bytes.len()` valid bytes
pub fn decode_nsd_query(bytes: &[u8]) -> Result<NsdQueryResult> {
    let mut buf = bytes;
    need(buf, NSD_QUERY_HEADER_SIZE, "device query header")?;

    let format = buf.get_u32();
    let size_available = buf.get_u32();
    let device_type = buf.get_u16();
    let device_sub_type = buf.get_u16();

    let supported_commands = if buf.has_remaining() {
        let mut commands = Vec::new();
        while buf.remaining() >= 2 {
            let command = buf.get_u16();
            if command == 0 {
                break;
            }
            commands.push(command);
        }
        Some(commands)
    } else {
        None
    };

    Ok(NsdQueryResult {
        format,
        size_available,
        device_type,
        device_sub_type,
        supported_commands,
    })
}

pub fn encode_device_query(query: &Sana2DeviceQuery) -> Vec<u8> {
    let mut out = Vec::with_capacity(DEVICE_QUERY_SIZE);
    out.put_u16(query.addr_field_size);
    out.put_u32(query.mtu);
    out.put_u32(query.bps);
    out.put_u32(query.hardware_type.0);
    out
}

pub fn decode_device_query(bytes: &[u8]) -> Result<Sana2DeviceQuery> {
    let mut buf = bytes;
    need(buf, DEVICE_QUERY_SIZE, "SANA2 device query")?;

    Ok(Sana2DeviceQuery {
        addr_field_size: buf.get_u16(),
        mtu: buf.get_u32(),
        bps: buf.get_u32(),
        hardware_type: HardwareType(buf.get_u32()),
    })
}

pub fn encode_signal_quality(quality: &SignalQuality) -> Vec<u8> {
    let mut out = Vec::with_capacity(SIGNAL_QUALITY_SIZE);
    out.put_i32(quality.signal);
    out.put_i32(quality.noise);
    out
}

pub fn decode_signal_quality(bytes: &[u8]) -> Result<SignalQuality> {
    let mut buf = bytes;
    need(buf, SIGNAL_QUALITY_SIZE, "signal quality")?;

    Ok(SignalQuality {
        signal: buf.get_i32(),
        noise: buf.get_i32(),
    })
}

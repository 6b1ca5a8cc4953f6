//! Protocol Module
//!
//! Command identifiers, reply layouts and the tag-list codec used to talk to
//! SANA-II network devices.
//!
//! ## Tag List Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Tag (4)  │ Kind (1) │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//!   ... repeated, terminated by a bare TAG_DONE (4 bytes of zero)
//! ```
//!
//! ### Value Kinds
//! - 0x00: INTEGER - Payload: i32
//! - 0x01: BOOLEAN - Payload: u8
//! - 0x02: STRING  - Payload: len (4) + bytes
//! - 0x03: BYTES   - Payload: len (4) + bytes
//! - 0x04: NULL    - Payload: empty
//!
//! ### Control Tags
//! - TAG_DONE:   end of list
//! - TAG_IGNORE: item is skipped
//! - TAG_MORE:   list continues at the arena offset in the payload
//! - TAG_SKIP:   skip the next N items
//!
//! ## Scan Reply
//! ```text
//! ┌──────────┬──────────┬─────┬──────────┐
//! │ Off0 (4) │ Off1 (4) │ ... │ OffN (4) │  → one tag list per offset
//! └──────────┴──────────┴─────┴──────────┘
//! ```

mod command;
mod tags;
mod reply;
mod network;
mod codec;

pub use command::{CommandId, DeviceKind};
pub use tags::{
    AttributeList, Tag, TagItem, TagValue, TAG_DONE, TAG_IGNORE, TAG_MORE, TAG_SKIP, TAG_USER,
};
pub use tags::s2info;
pub use reply::{HardwareAddress, HardwareType, NsdQueryResult, Sana2DeviceQuery, SignalQuality};
pub use network::{Band, Encryption, MacAddress, NetworkRecord, HIDDEN_SSID, DEFAULT_LEVEL_DBM};
pub use codec::{
    decode_nsd_query, decode_scan_table, decode_signal_quality, decode_tag_list,
    decode_device_query, encode_device_query, encode_nsd_query, encode_offset_table,
    encode_signal_quality, encode_tag_list, NSD_QUERY_HEADER_SIZE, NULL_OFFSET,
    DEVICE_QUERY_SIZE, SIGNAL_QUALITY_SIZE,
};

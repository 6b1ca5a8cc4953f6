//! Tag list definitions
//!
//! A tag list is an ordered sequence of `(tag, value)` pairs decoded from
//! arena memory. Lookups never fail: a missing tag yields the caller's
//! default (or `None` from the typed accessors).

use std::borrow::Cow;

/// Tag identifier
pub type Tag = u32;

/// End of list
pub const TAG_DONE: Tag = 0;

/// Item is skipped
pub const TAG_IGNORE: Tag = 1;

/// List continues at the offset in this item's payload
pub const TAG_MORE: Tag = 2;

/// Skip this item and the next N items
pub const TAG_SKIP: Tag = 3;

/// First tag available for user data
pub const TAG_USER: Tag = 0x8000_0000;

/// Wireless network info tags
pub mod s2info {
    use super::{Tag, TAG_USER};

    pub const SSID: Tag = TAG_USER;
    pub const BSSID: Tag = TAG_USER + 1;
    pub const AUTH_TYPES: Tag = TAG_USER + 2;
    pub const ASSOC_ID: Tag = TAG_USER + 3;
    pub const ENCRYPTION: Tag = TAG_USER + 4;
    pub const PORT_TYPE: Tag = TAG_USER + 5;
    pub const BEACON_INTERVAL: Tag = TAG_USER + 6;
    pub const CHANNEL: Tag = TAG_USER + 7;
    pub const SIGNAL: Tag = TAG_USER + 8;
    pub const NOISE: Tag = TAG_USER + 9;
    pub const CAPABILITIES: Tag = TAG_USER + 10;
    pub const INFO_ELEMENTS: Tag = TAG_USER + 11;
    pub const WPA_INFO: Tag = TAG_USER + 12;
    pub const BAND: Tag = TAG_USER + 13;
    pub const DEFAULT_KEY_NO: Tag = TAG_USER + 14;
}

/// A typed tag value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue<'a> {
    Integer(i32),
    Boolean(bool),
    String(Cow<'a, str>),
    Bytes(&'a [u8]),
    /// A pointer-typed value the device left empty
    Null,
}

impl TagValue<'_> {
    /// Wire kind byte
    pub fn kind(&self) -> u8 {
        match self {
            TagValue::Integer(_) => 0x00,
            TagValue::Boolean(_) => 0x01,
            TagValue::String(_) => 0x02,
            TagValue::Bytes(_) => 0x03,
            TagValue::Null => 0x04,
        }
    }
}

/// One decoded `(tag, value)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem<'a> {
    pub tag: Tag,
    pub value: TagValue<'a>,
}

impl<'a> TagItem<'a> {
    pub fn new(tag: Tag, value: TagValue<'a>) -> Self {
        Self { tag, value }
    }
}

/// Read-only view over a decoded tag list
///
/// Borrows the arena it was decoded from, so it cannot outlive the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList<'a> {
    items: Vec<TagItem<'a>>,
}

impl<'a> AttributeList<'a> {
    /// A list with no items (what a null list pointer decodes to)
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_items(items: Vec<TagItem<'a>>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagItem<'a>> {
        self.items.iter()
    }

    /// First value carrying `tag`, in list order
    pub fn find(&self, tag: Tag) -> Option<&TagValue<'a>> {
        self.items.iter().find(|item| item.tag == tag).map(|item| &item.value)
    }

    /// First value carrying `tag`, or `default` unchanged when absent
    pub fn get_data(&self, tag: Tag, default: TagValue<'a>) -> TagValue<'a> {
        self.find(tag).cloned().unwrap_or(default)
    }

    /// String value; null or differently-typed values read as absent
    pub fn get_str(&self, tag: Tag) -> Option<&str> {
        match self.find(tag)? {
            TagValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Byte-array value; null or differently-typed values read as absent
    pub fn get_bytes(&self, tag: Tag) -> Option<&'a [u8]> {
        match self.find(tag)? {
            TagValue::Bytes(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_int(&self, tag: Tag) -> Option<i32> {
        match self.find(tag)? {
            TagValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean value; integers are accepted, nonzero meaning true
    pub fn get_bool(&self, tag: Tag) -> Option<bool> {
        match self.find(tag)? {
            TagValue::Boolean(b) => Some(*b),
            TagValue::Integer(n) => Some(*n != 0),
            _ => None,
        }
    }
}

impl<'a> FromIterator<TagItem<'a>> for AttributeList<'a> {
    fn from_iter<I: IntoIterator<Item = TagItem<'a>>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of hex characters in an identifier string.
const HEX_LEN: usize = 24;

/// Returns `true` when `value` is exactly 24 hexadecimal characters (any case).
///
/// # Examples
///
/// ```
/// use gateway_core::is_valid_object_id;
///
/// assert!(is_valid_object_id("507f1f77bcf86cd799439011"));
/// assert!(is_valid_object_id("507F1F77BCF86CD799439011"));
/// assert!(!is_valid_object_id("507f1f77bcf86cd79943901"));
/// assert!(!is_valid_object_id("507f1f77bcf86cd79943901z"));
/// ```
pub fn is_valid_object_id(value: &str) -> bool {
    value.len() == HEX_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A 12-byte document-store identifier.
///
/// Parsed from its 24-character hex spelling and displayed as lowercase hex.
/// Two spellings that differ only in case parse to the same `ObjectId`.
///
/// # Examples
///
/// ```
/// use gateway_core::ObjectId;
///
/// let id: ObjectId = "507F1F77BCF86CD799439011".parse().unwrap();
/// assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
/// assert_eq!(id.bytes()[0], 0x50);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Wraps raw identifier bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parses a 24-character hex string.
    ///
    /// # Errors
    ///
    /// Returns `ObjectIdError` if `value` is not an identifier string.
    pub fn parse_str(value: &str) -> Result<Self, ObjectIdError> {
        if value.len() != HEX_LEN {
            return Err(ObjectIdError::InvalidLength(value.len()));
        }

        let mut bytes = [0u8; 12];
        for (i, pair) in value.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_nibble(pair[0]).ok_or(ObjectIdError::InvalidHex(pair[0] as char))?;
            let lo = hex_nibble(pair[1]).ok_or(ObjectIdError::InvalidHex(pair[1] as char))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Returns the lowercase hex spelling.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = ObjectId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 24-character hex object id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ObjectId, E> {
                ObjectId::parse_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// Error returned when a string is not a valid identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectIdError {
    /// The string does not have exactly 24 characters
    InvalidLength(usize),
    /// The string contains a non-hex character
    InvalidHex(char),
}

impl fmt::Display for ObjectIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectIdError::InvalidLength(len) => {
                write!(f, "object id must be 24 hex characters, got {}", len)
            }
            ObjectIdError::InvalidHex(c) => write!(f, "invalid hex character {:?} in object id", c),
        }
    }
}

impl std::error::Error for ObjectIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip_lowercases() {
        let id = ObjectId::parse_str("507F1F77bcf86cd799439011").unwrap();
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn case_insensitive_equality() {
        let lower: ObjectId = "abcdefabcdefabcdefabcdef".parse().unwrap();
        let upper: ObjectId = "ABCDEFABCDEFABCDEFABCDEF".parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            ObjectId::parse_str("507f1f77bcf86cd79943901"),
            Err(ObjectIdError::InvalidLength(23))
        );
        assert!(!is_valid_object_id(""));
        assert!(!is_valid_object_id("507f1f77bcf86cd7994390111"));
    }

    #[test]
    fn rejects_non_hex() {
        assert_eq!(
            ObjectId::parse_str("507f1f77bcf86cd79943901g"),
            Err(ObjectIdError::InvalidHex('g'))
        );
        assert!(!is_valid_object_id("507f1f77bcf86cd79943901g"));
    }

    #[test]
    fn rejects_multibyte_of_matching_byte_length() {
        // 24 bytes, fewer chars
        let s = "ééééééééééé00";
        assert_eq!(s.len(), 24);
        assert!(!is_valid_object_id(s));
        assert!(ObjectId::parse_str(s).is_err());
    }

    #[test]
    fn debug_shows_hex() {
        let id = ObjectId::from_bytes([0xff; 12]);
        assert_eq!(format!("{:?}", id), "ObjectId(ffffffffffffffffffffffff)");
    }

    #[test]
    fn serde_uses_hex_string() {
        let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"507f1f77bcf86cd799439011\"");

        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<ObjectId>("\"nope\"").is_err());
    }

    mod proptests {
        use super::*;
        use crate::test_utils::arb_object_id_hex;
        use proptest::prelude::*;

        proptest! {
            /// Property: every 24-hex string is valid and parses to the same lowercase spelling
            #[test]
            fn proptest_hex_strings_parse(hex in arb_object_id_hex()) {
                prop_assert!(is_valid_object_id(&hex));
                let id = ObjectId::parse_str(&hex).expect("valid hex");
                prop_assert_eq!(id.to_hex(), hex.to_ascii_lowercase());
            }

            /// Property: validity check and parser agree on arbitrary input
            #[test]
            fn proptest_validity_matches_parser(s in ".{0,30}") {
                prop_assert_eq!(is_valid_object_id(&s), ObjectId::parse_str(&s).is_ok());
            }
        }
    }
}

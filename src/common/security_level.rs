use crate::Error;

/// Security Access level allows for multiple different security challenges within an ECU.
///
/// The level determines both the sub-function and the ECU-specific access being requested.
///
/// *Note*:
///
/// Conversions from `u8` to `SecurityLevel` are fallible and will return an [`Error`] if the
/// Suppress Positive Response bit is set.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SecurityLevel {
    /// This value is reserved for future definition
    ISOSAEReserved(u8),
    /// `RequestSeed` with the level of security defined by the vehicle manufacturer
    RequestSeed(u8),
    /// `SendKey` with the level of security defined by the vehicle manufacturer
    SendKey(u8),
    /// `RequestSeed` with different levels of security defined for end of life
    /// activation of on-board pyrotechnic devices
    ISO26021_2Values,
    /// `SendKey` with different levels of security defined for end of life activation
    ISO26021_2SendKeyValues,
    /// This range of values is reserved for system supplier specific use
    SystemSupplierSpecific(u8),
}

impl From<SecurityLevel> for u8 {
    #[allow(clippy::match_same_arms)]
    fn from(value: SecurityLevel) -> Self {
        match value {
            SecurityLevel::ISOSAEReserved(val) => val,
            SecurityLevel::RequestSeed(val) => val,
            SecurityLevel::SendKey(val) => val,
            SecurityLevel::ISO26021_2Values => 0x5F,
            SecurityLevel::ISO26021_2SendKeyValues => 0x60,
            SecurityLevel::SystemSupplierSpecific(val) => val,
        }
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            0x00 | 0x43..=0x5E | 0x7F => Ok(Self::ISOSAEReserved(value)),
            // Security requests alternate, with odd numbers being seed requests,
            // and even numbers being send key requests
            0x01..=0x42 => {
                if value % 2 == 1 {
                    Ok(Self::RequestSeed(value))
                } else {
                    Ok(Self::SendKey(value))
                }
            }
            0x5F => Ok(Self::ISO26021_2Values),
            0x60 => Ok(Self::ISO26021_2SendKeyValues),
            0x61..=0x7E => Ok(Self::SystemSupplierSpecific(value)),
            _ => Err(Error::InvalidSecurityLevel(value)),
        }
    }
}

/// True iff `level` is an odd value in `[0x01, 0x41]`: a valid "request seed" sub-function.
#[must_use]
pub fn is_valid_request_seed_level(level: u8) -> bool {
    (0x01..=0x41).contains(&level) && level % 2 == 1
}

/// True iff `level` is an even value in `[0x02, 0x42]`: a valid "send key" sub-function.
#[must_use]
pub fn is_valid_send_key_level(level: u8) -> bool {
    (0x02..=0x42).contains(&level) && level % 2 == 0
}

/// The send-key level that pairs with a given request-seed level (`seed + 1`).
///
/// # Panics
/// Panics if `seed` is not a valid request-seed level; callers are expected to validate with
/// [`is_valid_request_seed_level`] first.
#[must_use]
pub fn get_send_key_for_request_seed(seed: u8) -> u8 {
    assert!(
        is_valid_request_seed_level(seed),
        "{seed:#04x} is not a valid request-seed level"
    );
    seed + 1
}

#[cfg(test)]
mod test {
    use super::*;

    const REQUEST_SEED_VALUES: [u8; 33] = [
        0x01, 0x03, 0x05, 0x07, 0x09, 0x0B, 0x0D, 0x0F, 0x11, 0x13, 0x15, 0x17, 0x19, 0x1B, 0x1D,
        0x1F, 0x21, 0x23, 0x25, 0x27, 0x29, 0x2B, 0x2D, 0x2F, 0x31, 0x33, 0x35, 0x37, 0x39, 0x3B,
        0x3D, 0x3F, 0x41,
    ];
    const SEND_KEY_VALUES: [u8; 33] = [
        0x02, 0x04, 0x06, 0x08, 0x0A, 0x0C, 0x0E, 0x10, 0x12, 0x14, 0x16, 0x18, 0x1A, 0x1C, 0x1E,
        0x20, 0x22, 0x24, 0x26, 0x28, 0x2A, 0x2C, 0x2E, 0x30, 0x32, 0x34, 0x36, 0x38, 0x3A, 0x3C,
        0x3E, 0x40, 0x42,
    ];

    /// Check that we properly decode and encode hex bytes
    #[test]
    fn security_level_from_all_u8_values() {
        assert_eq!(
            SecurityLevel::try_from(0).unwrap(),
            SecurityLevel::ISOSAEReserved(0)
        );
        for value in &REQUEST_SEED_VALUES {
            assert_eq!(
                SecurityLevel::try_from(*value).unwrap(),
                SecurityLevel::RequestSeed(*value)
            );
        }
        for value in &SEND_KEY_VALUES {
            assert_eq!(
                SecurityLevel::try_from(*value).unwrap(),
                SecurityLevel::SendKey(*value)
            );
        }
        for i in 0x43..=0x5E {
            assert_eq!(
                SecurityLevel::try_from(i).unwrap(),
                SecurityLevel::ISOSAEReserved(i)
            );
        }
        assert_eq!(
            SecurityLevel::try_from(0x5F).unwrap(),
            SecurityLevel::ISO26021_2Values
        );
        assert_eq!(
            SecurityLevel::try_from(0x60).unwrap(),
            SecurityLevel::ISO26021_2SendKeyValues
        );
        for i in 0x61..=0x7E {
            assert_eq!(
                SecurityLevel::try_from(i).unwrap(),
                SecurityLevel::SystemSupplierSpecific(i)
            );
        }
        for i in 0x80..=0xFF {
            match SecurityLevel::try_from(i).unwrap_err() {
                Error::InvalidSecurityLevel(value) => assert_eq!(value, i),
                _ => panic!("invalid error type"),
            }
        }
    }

    #[test]
    fn request_seed_and_send_key_are_paired() {
        for level in &REQUEST_SEED_VALUES {
            assert!(is_valid_request_seed_level(*level));
            let key_level = get_send_key_for_request_seed(*level);
            assert!(is_valid_send_key_level(key_level));
            assert_eq!(key_level, level + 1);
        }
    }

    #[test]
    fn rejects_even_request_seed_and_odd_send_key() {
        assert!(!is_valid_request_seed_level(0x02));
        assert!(!is_valid_send_key_level(0x01));
        assert!(!is_valid_request_seed_level(0x43));
        assert!(!is_valid_send_key_level(0x44));
    }
}

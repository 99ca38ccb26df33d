use crate::Error;

/// Diagnostic session type, as selected by a client via `DiagnosticSessionControl`.
///
/// Only the four session types a CLI caller is expected to request directly are modeled here.
/// Vehicle-manufacturer and system-supplier ranges exist on the wire but are not meaningful
/// targets to *request* without out-of-band knowledge of what they do; [`is_valid_session`]
/// still recognizes them when classifying a scanned byte.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum SessionType {
    Default,
    Programming,
    Extended,
    Safety,
}

impl SessionType {
    pub const DEFAULT: u8 = 0x01;
    pub const PROGRAMMING: u8 = 0x02;
    pub const EXTENDED: u8 = 0x03;
    pub const SAFETY: u8 = 0x04;
    pub const VEHICLE_MANUFACTURER_START: u8 = 0x40;
    pub const VEHICLE_MANUFACTURER_END: u8 = 0x5F;
    pub const SYSTEM_SUPPLIER_START: u8 = 0x60;
    pub const SYSTEM_SUPPLIER_END: u8 = 0x7E;
    /// Suppress Positive Response Message Indication Bit.
    pub const SUPPRESS_BIT: u8 = 0x80;
}

impl From<SessionType> for u8 {
    fn from(value: SessionType) -> Self {
        match value {
            SessionType::Default => SessionType::DEFAULT,
            SessionType::Programming => SessionType::PROGRAMMING,
            SessionType::Extended => SessionType::EXTENDED,
            SessionType::Safety => SessionType::SAFETY,
        }
    }
}

impl TryFrom<u8> for SessionType {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            Self::DEFAULT => Ok(Self::Default),
            Self::PROGRAMMING => Ok(Self::Programming),
            Self::EXTENDED => Ok(Self::Extended),
            Self::SAFETY => Ok(Self::Safety),
            _ => Err(Error::InvalidSessionType(value)),
        }
    }
}

/// True iff `raw`, with the suppress-positive-response bit masked off, names one of the four
/// well-known session types or falls in the vehicle-manufacturer or system-supplier range.
#[must_use]
pub fn is_valid_session(raw: u8) -> bool {
    let masked = raw & !SessionType::SUPPRESS_BIT;
    matches!(masked, SessionType::DEFAULT..=SessionType::SAFETY)
        || (SessionType::VEHICLE_MANUFACTURER_START..=SessionType::VEHICLE_MANUFACTURER_END)
            .contains(&masked)
        || (SessionType::SYSTEM_SUPPLIER_START..=SessionType::SYSTEM_SUPPLIER_END)
            .contains(&masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_session_ranges() {
        assert!(is_valid_session(0x01));
        assert!(is_valid_session(0x04));
        assert!(is_valid_session(0x40));
        assert!(is_valid_session(0x5F));
        assert!(is_valid_session(0x60));
        assert!(is_valid_session(0x7E));
        assert!(!is_valid_session(0x00));
        assert!(!is_valid_session(0x05));
        assert!(!is_valid_session(0x7F));
    }

    #[test]
    fn suppress_bit_is_transparent() {
        for raw in 0u8..=0x7F {
            assert_eq!(is_valid_session(raw), is_valid_session(raw | 0x80));
        }
    }

    #[test]
    fn round_trip_known_session_types() {
        for (byte, session) in [
            (SessionType::DEFAULT, SessionType::Default),
            (SessionType::PROGRAMMING, SessionType::Programming),
            (SessionType::EXTENDED, SessionType::Extended),
            (SessionType::SAFETY, SessionType::Safety),
        ] {
            assert_eq!(SessionType::try_from(byte).unwrap(), session);
            assert_eq!(u8::from(session), byte);
        }
    }

    #[test]
    fn rejects_unknown_session_type() {
        assert!(matches!(
            SessionType::try_from(0x05),
            Err(Error::InvalidSessionType(0x05))
        ));
    }
}

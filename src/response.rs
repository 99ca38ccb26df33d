//! Pure classification of response bytes: positivity, service-response ids, and the decoded
//! outcome a scanner reasons about.

use crate::common::NegativeResponseCode;

/// Offset a request service id by to obtain its positive-response id.
pub const SERVICE_RESPONSE_OFFSET: u8 = 0x40;

/// `sid + 0x40`, wrapping per the diagnostic protocol's one-byte service-response id.
#[must_use]
pub fn service_response_id(request_sid: u8) -> u8 {
    request_sid.wrapping_add(SERVICE_RESPONSE_OFFSET)
}

/// True iff `response` is non-empty and not a negative-response sentinel.
#[must_use]
pub fn is_positive(response: &[u8]) -> bool {
    !response.is_empty() && response[0] != 0x7F
}

/// The decoded shape of a response relative to the request that elicited it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// No message arrived within the wait window.
    Absent,
    /// A message arrived but carried zero bytes.
    Empty,
    /// A negative-response envelope arrived but was shorter than the 3 bytes it requires.
    Truncated,
    /// A positive response, with the service id (and sub-function, if one was expected) stripped.
    Positive { additional_bytes: Vec<u8> },
    /// The response's service id does not correspond to the request that was sent.
    Mismatch,
    /// A well-formed negative response, `0x78` (pending) already absorbed upstream.
    Negative { nrc: NegativeResponseCode },
}

/// Classify `response` against the service id (and, if the service carries one, sub-function)
/// that was requested.
///
/// `response = None` models a client-side timeout. An empty slice models a reassembled message
/// of zero length, which is distinct from a timeout and from a truncated negative response.
#[must_use]
pub fn decode(
    response: Option<&[u8]>,
    expected_sid: u8,
    expected_subfunction: Option<u8>,
) -> Outcome {
    let Some(bytes) = response else {
        return Outcome::Absent;
    };
    if bytes.is_empty() {
        return Outcome::Empty;
    }
    if bytes[0] == 0x7F {
        if bytes.len() < 3 {
            return Outcome::Truncated;
        }
        if bytes[1] != expected_sid {
            return Outcome::Mismatch;
        }
        return Outcome::Negative {
            nrc: NegativeResponseCode::from(bytes[2]),
        };
    }
    if bytes[0] != service_response_id(expected_sid) {
        return Outcome::Mismatch;
    }
    match expected_subfunction {
        Some(subfunction) => {
            if bytes.len() < 2 {
                return Outcome::Truncated;
            }
            if bytes[1] != subfunction {
                return Outcome::Mismatch;
            }
            Outcome::Positive {
                additional_bytes: bytes[2..].to_vec(),
            }
        }
        None => Outcome::Positive {
            additional_bytes: bytes[1..].to_vec(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_response_id_wraps_at_byte_boundary() {
        for sid in 0u8..=0xFF {
            assert_eq!(service_response_id(sid), sid.wrapping_add(0x40));
        }
    }

    #[test]
    fn positivity_matches_first_byte() {
        assert!(is_positive(&[0x50, 0x01]));
        assert!(!is_positive(&[0x7F, 0x10, 0x12]));
        assert!(!is_positive(&[]));
    }

    #[test]
    fn decodes_absent_on_timeout() {
        assert_eq!(decode(None, 0x10, None), Outcome::Absent);
    }

    #[test]
    fn decodes_negative_response() {
        let outcome = decode(Some(&[0x7F, 0x31, 0x33]), 0x31, None);
        assert_eq!(
            outcome,
            Outcome::Negative {
                nrc: NegativeResponseCode::SecurityAccessDenied
            }
        );
    }

    #[test]
    fn decodes_truncated_negative_response() {
        assert_eq!(decode(Some(&[0x7F, 0x31]), 0x31, None), Outcome::Truncated);
    }

    #[test]
    fn decodes_mismatched_echoed_service() {
        assert_eq!(
            decode(Some(&[0x7F, 0x10, 0x12]), 0x31, None),
            Outcome::Mismatch
        );
    }

    #[test]
    fn decodes_positive_response_with_subfunction() {
        let outcome = decode(Some(&[0x50, 0x01, 0, 0, 0, 0]), 0x10, Some(0x01));
        assert_eq!(
            outcome,
            Outcome::Positive {
                additional_bytes: vec![0, 0, 0, 0]
            }
        );
    }

    #[test]
    fn decodes_positive_response_without_subfunction() {
        let outcome = decode(Some(&[0x62, 0xF1, 0x90, 0x01]), 0x22, None);
        assert_eq!(
            outcome,
            Outcome::Positive {
                additional_bytes: vec![0xF1, 0x90, 0x01]
            }
        );
    }

    #[test]
    fn decodes_mismatched_subfunction() {
        let outcome = decode(Some(&[0x50, 0x02, 0, 0]), 0x10, Some(0x01));
        assert_eq!(outcome, Outcome::Mismatch);
    }
}

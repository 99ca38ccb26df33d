//! Request encoders for every diagnostic service the engine and scanners issue.
//!
//! Each request type owns exactly the fields needed to lay out its wire bytes; none of them
//! round-trip through a reader, because this engine only ever originates requests.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::Result;
use crate::common::{ResetType, SessionType};
use crate::service::UdsServiceType;

/// "Address and length format identifier" used by the memory-by-address services.
///
/// High nibble is the number of address bytes, low nibble the number of size bytes. Both are
/// written MSB-first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Alfid(pub u8);

impl Alfid {
    #[must_use]
    pub fn new(address_bytes: u8, size_bytes: u8) -> Self {
        Self((address_bytes << 4) | (size_bytes & 0x0F))
    }

    #[must_use]
    pub fn address_byte_count(self) -> u8 {
        self.0 >> 4
    }

    #[must_use]
    pub fn size_byte_count(self) -> u8 {
        self.0 & 0x0F
    }
}

fn write_msb_first<W: Write>(writer: &mut W, value: u64, byte_count: u8) -> Result<()> {
    let all_bytes = value.to_be_bytes();
    let start = all_bytes.len() - usize::from(byte_count);
    writer.write_all(&all_bytes[start..])?;
    Ok(())
}

/// Sub-function for `RoutineControl`: start, stop, or request the results of a routine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoutineControlSubFunction {
    StartRoutine,
    StopRoutine,
    RequestRoutineResults,
    /// Intentionally invalid; used by the routine-identifier scanner to elicit negative
    /// responses without running any routine.
    Reserved(u8),
}

impl From<RoutineControlSubFunction> for u8 {
    fn from(value: RoutineControlSubFunction) -> Self {
        match value {
            RoutineControlSubFunction::StartRoutine => 0x01,
            RoutineControlSubFunction::StopRoutine => 0x02,
            RoutineControlSubFunction::RequestRoutineResults => 0x03,
            RoutineControlSubFunction::Reserved(value) => value,
        }
    }
}

/// Every request the engine knows how to encode, one variant per entry in the service table.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Request {
    DiagnosticSessionControl {
        session_type: SessionType,
    },
    EcuReset {
        reset_type: ResetType,
    },
    ReadDataByIdentifier {
        ids: Vec<u16>,
    },
    ReadMemoryByAddress {
        alfid: Alfid,
        address: u64,
        size: u64,
    },
    SecurityAccessRequestSeed {
        level: u8,
        data_record: Vec<u8>,
    },
    SecurityAccessSendKey {
        level: u8,
        key: Vec<u8>,
    },
    ReadDataByPeriodicIdentifier {
        mode: u8,
        ids: Vec<u8>,
    },
    DynamicallyDefineDataIdentifier {
        sub_function: u8,
        did: u16,
        sources: Vec<(u16, u8, u8)>,
    },
    WriteDataByIdentifier {
        did: u16,
        data: Vec<u8>,
    },
    InputOutputControlByIdentifier {
        did: u16,
        control_option: Vec<u8>,
        control_enable_mask: Vec<u8>,
    },
    RoutineControl {
        sub_function: RoutineControlSubFunction,
        routine_id: u16,
        data: Vec<u8>,
    },
    WriteMemoryByAddress {
        alfid: Alfid,
        address: u64,
        size: u64,
        data: Vec<u8>,
    },
    TesterPresent {
        suppress_positive_response: bool,
    },
}

impl Request {
    #[must_use]
    pub fn service(&self) -> UdsServiceType {
        match self {
            Self::DiagnosticSessionControl { .. } => UdsServiceType::DiagnosticSessionControl,
            Self::EcuReset { .. } => UdsServiceType::EcuReset,
            Self::ReadDataByIdentifier { .. } => UdsServiceType::ReadDataByIdentifier,
            Self::ReadMemoryByAddress { .. } => UdsServiceType::ReadMemoryByAddress,
            Self::SecurityAccessRequestSeed { .. } | Self::SecurityAccessSendKey { .. } => {
                UdsServiceType::SecurityAccess
            }
            Self::ReadDataByPeriodicIdentifier { .. } => {
                UdsServiceType::ReadDataByIdentifierPeriodic
            }
            Self::DynamicallyDefineDataIdentifier { .. } => {
                UdsServiceType::DynamicallyDefinedDataIdentifier
            }
            Self::WriteDataByIdentifier { .. } => UdsServiceType::WriteDataByIdentifier,
            Self::InputOutputControlByIdentifier { .. } => {
                UdsServiceType::InputOutputControlByIdentifier
            }
            Self::RoutineControl { .. } => UdsServiceType::RoutineControl,
            Self::WriteMemoryByAddress { .. } => UdsServiceType::WriteMemoryByAddress,
            Self::TesterPresent { .. } => UdsServiceType::TesterPresent,
        }
    }

    /// Encode this request's wire bytes, service id first.
    ///
    /// # Errors
    /// Propagates I/O errors from the underlying writer (an in-memory `Vec`, so effectively
    /// infallible, but the writer abstraction is shared with reader-side decoding).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        buffer.write_u8(self.service().request_service_to_byte())?;
        match self {
            Self::DiagnosticSessionControl { session_type } => {
                buffer.write_u8((*session_type).into())?;
            }
            Self::EcuReset { reset_type } => {
                buffer.write_u8((*reset_type).into())?;
            }
            Self::ReadDataByIdentifier { ids } => {
                for id in ids {
                    buffer.write_u16::<BigEndian>(*id)?;
                }
            }
            Self::ReadMemoryByAddress {
                alfid,
                address,
                size,
            } => {
                buffer.write_u8(alfid.0)?;
                write_msb_first(&mut buffer, *address, alfid.address_byte_count())?;
                write_msb_first(&mut buffer, *size, alfid.size_byte_count())?;
            }
            Self::SecurityAccessRequestSeed { level, data_record } => {
                buffer.write_u8(*level)?;
                buffer.write_all(data_record)?;
            }
            Self::SecurityAccessSendKey { level, key } => {
                buffer.write_u8(*level)?;
                buffer.write_all(key)?;
            }
            Self::ReadDataByPeriodicIdentifier { mode, ids } => {
                buffer.write_u8(*mode)?;
                buffer.write_all(ids)?;
            }
            Self::DynamicallyDefineDataIdentifier {
                sub_function,
                did,
                sources,
            } => {
                buffer.write_u8(*sub_function)?;
                buffer.write_u16::<BigEndian>(*did)?;
                for (source_did, position, length) in sources {
                    buffer.write_u16::<BigEndian>(*source_did)?;
                    buffer.write_u8(*position)?;
                    buffer.write_u8(*length)?;
                }
            }
            Self::WriteDataByIdentifier { did, data } => {
                buffer.write_u16::<BigEndian>(*did)?;
                buffer.write_all(data)?;
            }
            Self::InputOutputControlByIdentifier {
                did,
                control_option,
                control_enable_mask,
            } => {
                buffer.write_u16::<BigEndian>(*did)?;
                buffer.write_all(control_option)?;
                buffer.write_all(control_enable_mask)?;
            }
            Self::RoutineControl {
                sub_function,
                routine_id,
                data,
            } => {
                buffer.write_u8((*sub_function).into())?;
                buffer.write_u16::<BigEndian>(*routine_id)?;
                buffer.write_all(data)?;
            }
            Self::WriteMemoryByAddress {
                alfid,
                address,
                size,
                data,
            } => {
                buffer.write_u8(alfid.0)?;
                write_msb_first(&mut buffer, *address, alfid.address_byte_count())?;
                write_msb_first(&mut buffer, *size, alfid.size_byte_count())?;
                buffer.write_all(data)?;
            }
            Self::TesterPresent {
                suppress_positive_response,
            } => {
                buffer.write_u8(if *suppress_positive_response { 0x80 } else { 0x00 })?;
            }
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_diagnostic_session_control() {
        let request = Request::DiagnosticSessionControl {
            session_type: SessionType::Default,
        };
        assert_eq!(request.to_bytes().unwrap(), vec![0x10, 0x01]);
    }

    #[test]
    fn encodes_read_memory_by_address() {
        let request = Request::ReadMemoryByAddress {
            alfid: Alfid::new(4, 2),
            address: 0x1122_3344,
            size: 0x5566,
        };
        assert_eq!(
            request.to_bytes().unwrap(),
            vec![0x23, 0x42, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66]
        );
    }

    #[test]
    fn encodes_read_data_by_identifier_with_multiple_ids() {
        let request = Request::ReadDataByIdentifier {
            ids: vec![0xF190, 0xF18C],
        };
        assert_eq!(
            request.to_bytes().unwrap(),
            vec![0x22, 0xF1, 0x90, 0xF1, 0x8C]
        );
    }

    #[test]
    fn encodes_routine_control_scan_probe() {
        let request = Request::RoutineControl {
            sub_function: RoutineControlSubFunction::Reserved(0x00),
            routine_id: 0x0203,
            data: vec![1; 10],
        };
        assert_eq!(
            request.to_bytes().unwrap(),
            vec![0x31, 0x00, 0x02, 0x03, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
        );
    }

    #[test]
    fn encodes_tester_present_with_suppress_bit() {
        let suppressed = Request::TesterPresent {
            suppress_positive_response: true,
        };
        assert_eq!(suppressed.to_bytes().unwrap(), vec![0x3E, 0x80]);
        let not_suppressed = Request::TesterPresent {
            suppress_positive_response: false,
        };
        assert_eq!(not_suppressed.to_bytes().unwrap(), vec![0x3E, 0x00]);
    }

    #[test]
    fn alfid_nibble_accessors() {
        let alfid = Alfid::new(4, 2);
        assert_eq!(alfid.0, 0x42);
        assert_eq!(alfid.address_byte_count(), 4);
        assert_eq!(alfid.size_byte_count(), 2);
    }
}

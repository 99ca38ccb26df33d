mod negative_response_code;
pub use negative_response_code::NegativeResponseCode;

mod reset_type;
pub use reset_type::ResetType;

mod session_type;
pub use session_type::{SessionType, is_valid_session};

mod security_level;
pub use security_level::{
    SecurityLevel, get_send_key_for_request_seed, is_valid_request_seed_level,
    is_valid_send_key_level,
};

mod scan_range;
pub use scan_range::{
    DataIdentifierRangeSelection, RoutineIdentifierRangeSelection, data_identifier_range,
    routine_identifier_range,
};

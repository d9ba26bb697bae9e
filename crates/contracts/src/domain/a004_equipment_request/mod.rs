pub mod aggregate;

pub use aggregate::{
    CreateEquipmentRequestDto, EquipmentRequest, RequestKind, RequestLine, RequestStatus,
    UpdateRequestStatusDto, Urgency,
};

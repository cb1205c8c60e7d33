//! Community code registry: address tuples, code derivation and the
//! get-or-create orchestration on top of the repository port.

mod address;
mod code;
mod record;
mod registry;

pub use address::{AddressField, AddressTuple, AddressValidationError};
pub use code::CommunityCode;
pub use record::{CodeAssignment, CommunityCodeId, CommunityCodeRecord};
pub use registry::CommunityCodeRegistry;

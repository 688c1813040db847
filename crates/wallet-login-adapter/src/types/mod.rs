/*
[INPUT]:  Wire payloads and flow bookkeeping needs
[OUTPUT]: Shared types used by auth and http layers
[POS]:    Data layer - type exports
[UPDATE]: When adding or removing type modules
*/

pub mod enums;
pub mod models;

pub use enums::*;
pub use models::*;

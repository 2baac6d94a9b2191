mod account;
mod availability;
mod booking;
mod invoice;
mod proposal;
mod status;

pub mod dtos {
    pub use crate::account::dtos::*;
    pub use crate::availability::dtos::*;
    pub use crate::booking::dtos::*;
    pub use crate::invoice::dtos::*;
    pub use crate::proposal::dtos::*;
}

pub use crate::account::api::*;
pub use crate::availability::api::*;
pub use crate::booking::api::*;
pub use crate::invoice::api::*;
pub use crate::proposal::api::*;
pub use crate::status::api::*;

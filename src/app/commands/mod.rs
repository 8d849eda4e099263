pub mod inspect;
pub mod transfer;

//! Core types for Boutique.
//!
//! Newtypes that keep ids and emails from being mixed up.

pub mod email;
pub mod id;
pub mod money;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{CartTotals, TAX_RATE, round2};

//! # PDU Types
//!
//! Concrete PDUs built on the framing in [`crate::core::pdu`].
//!
//! ## Components
//! - **aggregate_state**: grouped entities with mid-body id padding
//! - **directed_energy**: directed energy fire and its polymorphic aimpoint records
//! - **iff**: IFF/ATC/NAVAIDS with independently optional layers

pub mod aggregate_state;
pub mod directed_energy;
pub mod iff;

pub use aggregate_state::AggregateStatePdu;
pub use directed_energy::DirectedEnergyFirePdu;
pub use iff::IffPdu;

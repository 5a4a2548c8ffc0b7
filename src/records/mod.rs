//! # Leaf Records
//!
//! Small fixed- and variable-length records shared by the PDUs in this crate.
//!
//! ## Components
//! - **ids**: entity, aggregate and event identifiers, simulation address
//! - **types**: entity and aggregate type classifications
//! - **geometry**: single/double precision vectors, Euler angles, clock time
//! - **marking**: 32-octet aggregate marking
//! - **system_id**: IFF system identification
//! - **variable_datum**: free-form datum padded to 64 bits
//! - **silent**: silent aggregate / silent entity system summaries

pub mod geometry;
pub mod ids;
pub mod marking;
pub mod silent;
pub mod system_id;
pub mod types;
pub mod variable_datum;

pub use geometry::{ClockTime, EulerAngles, Vector32, Vector64};
pub use ids::{AggregateId, EntityId, EventId, SimulationAddress};
pub use marking::AggregateMarking;
pub use silent::{SilentAggregateSystem, SilentEntitySystem};
pub use system_id::SystemId;
pub use types::{AggregateType, EntityType};
pub use variable_datum::VariableDatum;

//! Data models for Aules

pub mod availability;
pub mod classroom;
pub mod equipment;
pub mod occupancy;
pub mod reservation;
pub mod schedule;
pub mod validation;
pub mod week_set;

// Re-export commonly used types
pub use availability::{Availability, AvailabilityRequest, CandidateClassroom};
pub use classroom::{Classroom, ClassroomFilter, ClassroomType};
pub use equipment::{EquipmentType, Software, StudentGroup};
pub use reservation::{ConflictDetail, Reservation, ReservationQuery};
pub use schedule::{Semester, TimeSlot};
pub use week_set::WeekSet;

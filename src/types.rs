//! Shared identifiers and the specialty model used across the system.

use std::ops::RangeInclusive;

/// Unique identifier for a patient, assigned sequentially from 1.
pub type PatientId = u32;
/// Unique identifier for an on-duty doctor thread.
pub type DoctorId = u32;

/// The three definitive-treatment specialties a patient can be routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Specialty {
    Dentist,
    Surgeon,
    Therapist,
}

impl Specialty {
    pub const ALL: [Specialty; 3] = [Specialty::Dentist, Specialty::Surgeon, Specialty::Therapist];

    /// Title used in event lines ("Dentist see patient with ID [..]").
    pub fn title(self) -> &'static str {
        match self {
            Specialty::Dentist => "Dentist",
            Specialty::Surgeon => "Surgeon",
            Specialty::Therapist => "Therapist",
        }
    }

    /// How long one visit takes, in abstract time units.
    pub fn service_units(self) -> RangeInclusive<u64> {
        match self {
            Specialty::Dentist => 1..=2,
            Specialty::Surgeon => 3..=5,
            Specialty::Therapist => 2..=4,
        }
    }

    /// Map a diagnosis outcome in 1..=3 onto a specialty.
    pub fn from_diagnosis(outcome: u64) -> Option<Specialty> {
        match outcome {
            1 => Some(Specialty::Dentist),
            2 => Some(Specialty::Surgeon),
            3 => Some(Specialty::Therapist),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnosis_outcomes_cover_all_specialties() {
        assert_eq!(Specialty::from_diagnosis(1), Some(Specialty::Dentist));
        assert_eq!(Specialty::from_diagnosis(2), Some(Specialty::Surgeon));
        assert_eq!(Specialty::from_diagnosis(3), Some(Specialty::Therapist));
        assert_eq!(Specialty::from_diagnosis(0), None);
        assert_eq!(Specialty::from_diagnosis(4), None);
    }

    #[test]
    fn service_ranges_match_the_roster() {
        assert_eq!(Specialty::Dentist.service_units(), 1..=2);
        assert_eq!(Specialty::Surgeon.service_units(), 3..=5);
        assert_eq!(Specialty::Therapist.service_units(), 2..=4);
    }
}

//! Reader/writer-locked FIFO queues of patient ids and the four-ward set.

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::types::{PatientId, Specialty};

/// A synchronized FIFO queue of patient ids.
///
/// Inspection takes the read lock and may run concurrently with other
/// inspections; every mutation (push and pop alike) takes the write lock.
pub struct PatientQueue {
    items: RwLock<VecDeque<PatientId>>,
}

impl PatientQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(VecDeque::new()),
        }
    }

    /// Append a patient at the tail.
    pub fn push(&self, patient: PatientId) {
        let mut items = self.items.write().expect("patient queue lock poisoned");
        items.push_back(patient);
    }

    /// Pop the head patient, or `None` if the queue is empty. Absence of
    /// work is a normal condition, not an error.
    #[allow(dead_code)]
    pub fn try_pop_front(&self) -> Option<PatientId> {
        self.pop_front_then(|_| {})
    }

    /// Pop the head patient and run `visit` on it before the write lock is
    /// released. An observer that later finds this queue empty can rely on
    /// `visit`'s side effects having completed.
    pub fn pop_front_then<F>(&self, visit: F) -> Option<PatientId>
    where
        F: FnOnce(PatientId),
    {
        let mut items = self.items.write().expect("patient queue lock poisoned");
        let patient = items.pop_front()?;
        visit(patient);
        Some(patient)
    }

    /// Pop the head patient and move it into the queue `choose` picks for it,
    /// holding this queue's write lock across the whole transfer. Scanners
    /// never observe the patient in transit between the two queues.
    ///
    /// `choose` runs before the push and may log; it must not touch this
    /// queue or any lock that orders before the destination queue.
    pub fn route_front<'a, F>(&self, choose: F) -> Option<PatientId>
    where
        F: FnOnce(PatientId) -> &'a PatientQueue,
    {
        let mut items = self.items.write().expect("patient queue lock poisoned");
        let patient = items.pop_front()?;
        let destination = choose(patient);
        destination.push(patient);
        Some(patient)
    }

    /// Whether the patient is currently in this queue.
    #[allow(dead_code)]
    pub fn contains(&self, patient: PatientId) -> bool {
        let items = self.items.read().expect("patient queue lock poisoned");
        items.contains(&patient)
    }

    /// Current queue depth.
    pub fn len(&self) -> usize {
        let items = self.items.read().expect("patient queue lock poisoned");
        items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a patient was found by a whole-hospital scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ward {
    Reception,
    Dentist,
    Surgeon,
    Therapist,
}

impl Ward {
    /// Name used in "waits in <name> queue" event lines.
    pub fn queue_name(self) -> &'static str {
        match self {
            Ward::Reception => "reception",
            Ward::Dentist => "dentist",
            Ward::Surgeon => "surgeon",
            Ward::Therapist => "therapist",
        }
    }
}

/// The hospital's four queues. Whole-hospital scans acquire the read locks
/// in one fixed order so concurrent scanners cannot deadlock.
pub struct WardQueues {
    pub reception: PatientQueue,
    dentist: PatientQueue,
    surgeon: PatientQueue,
    therapist: PatientQueue,
}

impl WardQueues {
    pub fn new() -> Self {
        Self {
            reception: PatientQueue::new(),
            dentist: PatientQueue::new(),
            surgeon: PatientQueue::new(),
            therapist: PatientQueue::new(),
        }
    }

    /// The queue a diagnosis routes to.
    pub fn specialty(&self, specialty: Specialty) -> &PatientQueue {
        match specialty {
            Specialty::Dentist => &self.dentist,
            Specialty::Surgeon => &self.surgeon,
            Specialty::Therapist => &self.therapist,
        }
    }

    /// Find the patient across all four queues, or `None` if it is in none
    /// of them (departed). The four read guards are held simultaneously and
    /// acquired in the global lock order: reception, dentist, surgeon,
    /// therapist.
    pub fn locate(&self, patient: PatientId) -> Option<Ward> {
        let reception = self.reception.items.read().expect("patient queue lock poisoned");
        let dentist = self.dentist.items.read().expect("patient queue lock poisoned");
        let surgeon = self.surgeon.items.read().expect("patient queue lock poisoned");
        let therapist = self.therapist.items.read().expect("patient queue lock poisoned");

        if reception.contains(&patient) {
            Some(Ward::Reception)
        } else if dentist.contains(&patient) {
            Some(Ward::Dentist)
        } else if surgeon.contains(&patient) {
            Some(Ward::Surgeon)
        } else if therapist.contains(&patient) {
            Some(Ward::Therapist)
        } else {
            None
        }
    }
}

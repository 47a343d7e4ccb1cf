//! Worker loops and the supervisor for the patient-flow simulation.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::census::PatientCensus;
use crate::event_log::EventLog;
use crate::log_dev;
use crate::patient_queue::WardQueues;
use crate::types::{DoctorId, PatientId, Specialty};

/// Doctors draining the reception queue.
const DOCTORS_ON_DUTY: u32 = 2;
/// An intake consultation takes 1 to 5 time units.
const TRIAGE_VISIT_UNITS: RangeInclusive<u64> = 1..=5;
/// Patients check their place in the queues every 4 time units.
const STATUS_POLL_UNITS: u64 = 4;
/// One abstract time unit in wall-clock milliseconds for the real binary.
const DEFAULT_TIME_UNIT_MS: u64 = 100;

/// Uniform draw from a closed range of time units.
fn draw_units(range: RangeInclusive<u64>) -> u64 {
    rand::rng().random_range(range)
}

/// Uniform-random diagnosis mapped onto a specialty.
fn random_specialty() -> Specialty {
    let outcome = draw_units(1..=3);
    match Specialty::from_diagnosis(outcome) {
        Some(specialty) => specialty,
        None => {
            if !cfg!(debug_assertions) {
                eprintln!("[TRIAGE] diagnosis outside 1..=3: {outcome}");
            }
            debug_assert!(false, "diagnosis outside 1..=3: {outcome}");
            Specialty::Therapist
        }
    }
}

/// Best-effort CPU user/system time snapshot (seconds) on Unix platforms.
#[cfg(unix)]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    use libc::{RUSAGE_SELF, getrusage, rusage};
    // rusage is plain old data; zeroed is a valid initial value.
    let mut usage: rusage = unsafe { std::mem::zeroed() };
    if unsafe { getrusage(RUSAGE_SELF, &mut usage) } != 0 {
        return None;
    }
    let user = usage.ru_utime.tv_sec as f64 + (usage.ru_utime.tv_usec as f64 / 1_000_000.0);
    let sys = usage.ru_stime.tv_sec as f64 + (usage.ru_stime.tv_usec as f64 / 1_000_000.0);
    Some((user, sys))
}

/// Stub on non-Unix platforms.
#[cfg(not(unix))]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    None
}

/// Startup parameters for one simulation run.
pub struct SimConfig {
    pub patients: u32,
    pub doctors_on_duty: u32,
    pub time_unit: Duration,
}

impl SimConfig {
    /// Configuration with the real-time unit and the standard duty roster.
    pub fn new(patients: u32) -> Self {
        Self {
            patients,
            doctors_on_duty: DOCTORS_ON_DUTY,
            time_unit: Duration::from_millis(DEFAULT_TIME_UNIT_MS),
        }
    }
}

/// What a finished run looked like, for the end-of-run summary.
pub struct SimReport {
    pub patients: u32,
    pub departed: usize,
    pub elapsed_ms: f64,
    pub cpu_user_s: Option<f64>,
    pub cpu_sys_s: Option<f64>,
}

/// On-duty doctor: drain reception, route each patient to a random
/// specialist queue. The destination is picked and the intake line logged
/// while the reception lock is held, so a scanning patient never sees
/// itself between queues.
fn triage_loop(doctor: DoctorId, wards: &WardQueues, log: &EventLog, unit: Duration) {
    loop {
        wards.reception.route_front(|patient| {
            log.log(&format!(
                "Doctor on duty with ID [{doctor}] see patient with ID [{patient}]"
            ));
            wards.specialty(random_specialty())
        });
        // The population is fixed at startup, so an empty reception stays empty.
        if wards.reception.is_empty() {
            log_dev!("[TRIAGE] doctor {doctor} goes off duty");
            break;
        }
        thread::sleep(unit * draw_units(TRIAGE_VISIT_UNITS) as u32);
    }
}

/// Specialist: treat the head of its own queue until the hospital is empty.
/// Its own queue running dry is not a termination signal; triage may still
/// route more patients here.
fn specialist_loop(
    specialty: Specialty,
    wards: &WardQueues,
    census: &PatientCensus,
    log: &EventLog,
    unit: Duration,
) {
    let queue = wards.specialty(specialty);
    while !census.is_empty() {
        queue.pop_front_then(|patient| {
            log.log(&format!(
                "{} see patient with ID [{patient}]",
                specialty.title()
            ));
        });
        // One service interval per poll, patient or not.
        thread::sleep(unit * draw_units(specialty.service_units()) as u32);
    }
    log_dev!("[{}] closes the practice", specialty.title());
}

/// Per-patient status monitor: report the patient's queue every poll, and on
/// finding it in no queue report the departure and decrement the census,
/// exactly once.
fn monitor_loop(
    patient: PatientId,
    wards: &WardQueues,
    census: &PatientCensus,
    log: &EventLog,
    unit: Duration,
) {
    loop {
        match wards.locate(patient) {
            Some(ward) => {
                log.log(&format!(
                    "Patient with ID [{patient}] waits in {} queue",
                    ward.queue_name()
                ));
            }
            None => {
                log.log(&format!("Patient with ID [{patient}] is already at home"));
                census.depart();
                break;
            }
        }
        thread::sleep(unit * STATUS_POLL_UNITS as u32);
    }
}

/// Supervisor: seed reception, spawn every monitor and worker, wait for the
/// hospital to empty, then join everything before the sink is dropped.
pub fn run_hospital(config: &SimConfig, log: &Arc<EventLog>) -> SimReport {
    let wards = Arc::new(WardQueues::new());
    let census = Arc::new(PatientCensus::new(config.patients as usize));
    let unit = config.time_unit;

    let cpu_start = cpu_times_seconds();
    let start = Instant::now();

    let mut handles = Vec::new();

    // Admit every patient before its monitor starts polling, so "in no
    // queue" can only ever mean "departed".
    for patient in 1..=config.patients {
        wards.reception.push(patient);
        let wards = Arc::clone(&wards);
        let census = Arc::clone(&census);
        let log = Arc::clone(log);
        let handle = thread::Builder::new()
            .name(format!("patient-{patient}"))
            .spawn(move || monitor_loop(patient, &wards, &census, &log, unit))
            .expect("failed to spawn patient monitor");
        handles.push(handle);
    }

    for doctor in 1..=config.doctors_on_duty {
        let wards = Arc::clone(&wards);
        let log = Arc::clone(log);
        let handle = thread::Builder::new()
            .name(format!("duty-doctor-{doctor}"))
            .spawn(move || triage_loop(doctor, &wards, &log, unit))
            .expect("failed to spawn duty doctor");
        handles.push(handle);
    }

    for specialty in Specialty::ALL {
        let wards = Arc::clone(&wards);
        let census = Arc::clone(&census);
        let log = Arc::clone(log);
        let handle = thread::Builder::new()
            .name(specialty.title().to_lowercase())
            .spawn(move || specialist_loop(specialty, &wards, &census, &log, unit))
            .expect("failed to spawn specialist");
        handles.push(handle);
    }

    census.wait_until_empty();
    log_dev!("[SUPERVISOR] hospital is empty, joining workers");

    for handle in handles {
        handle.join().expect("hospital thread panicked");
    }

    let elapsed_ms = start.elapsed().as_millis() as f64;
    let (cpu_user_s, cpu_sys_s) = match (cpu_start, cpu_times_seconds()) {
        (Some((user_start, sys_start)), Some((user_end, sys_end))) => {
            (Some(user_end - user_start), Some(sys_end - sys_start))
        }
        _ => (None, None),
    };

    SimReport {
        patients: config.patients,
        departed: config.patients as usize - census.remaining(),
        elapsed_ms,
        cpu_user_s,
        cpu_sys_s,
    }
}

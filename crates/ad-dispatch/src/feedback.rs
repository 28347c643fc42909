//! Simulated patient feedback shown after a dispatch.

use ad_core::RandomSource;

/// Messages a served patient may leave, in draw order.
pub const PATIENT_FEEDBACK: [&str; 5] = [
    "Great service! Ambulance arrived quickly.",
    "Average response time, could be better.",
    "Ambulance was late due to traffic congestion.",
    "Very professional and helpful ambulance staff.",
    "Fast and efficient service, thanks!",
];

/// Pick one message uniformly with a single draw from `rng`.
pub fn pick_feedback<S: RandomSource + ?Sized>(rng: &mut S) -> &'static str {
    let last = (PATIENT_FEEDBACK.len() - 1) as u32;
    PATIENT_FEEDBACK[rng.pick_inclusive(&(0..=last)) as usize]
}

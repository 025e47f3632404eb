//! Hooks called between iterations, the only point at which a run can be inspected or
//! stopped.

use super::simplex::Simplex;
use std::time::Instant;

/// The transformation applied to the simplex during one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Reflect,
    Expand,
    Contract,
    Shrink,
}

/// Summary of a run after a completed iteration. The ordered simplex itself is passed
/// alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationState {
    pub iteration: usize,
    pub step: Step,
    pub best_value: f64,
    pub worst_value: f64,
    pub f_evals: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

pub trait Observer {
    fn on_iteration(&mut self, state: &IterationState, simplex: &Simplex) -> Control;
}

impl Observer for () {
    fn on_iteration(&mut self, _: &IterationState, _: &Simplex) -> Control {
        Control::Continue
    }
}

impl<F> Observer for F
where
    F: FnMut(&IterationState, &Simplex) -> Control,
{
    fn on_iteration(&mut self, state: &IterationState, simplex: &Simplex) -> Control {
        self(state, simplex)
    }
}

/// Stops the run at the first iteration boundary past a wall-clock instant.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(pub Instant);

impl Observer for Deadline {
    fn on_iteration(&mut self, _: &IterationState, _: &Simplex) -> Control {
        if Instant::now() >= self.0 {
            Control::Stop
        } else {
            Control::Continue
        }
    }
}

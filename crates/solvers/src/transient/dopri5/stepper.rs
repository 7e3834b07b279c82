use std::{
    cell::{Cell, RefCell},
    time::{Duration, Instant},
};

use crema_core::{Model, OdeProblem};
use ode_solvers::{SVector, System};

use super::Error;

/// A wall-clock deadline shared by every interval of one solve.
#[derive(Debug, Clone, Copy)]
pub(super) struct Budget {
    deadline: Instant,
    budget: Duration,
}

impl Budget {
    pub(super) fn start(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
            budget,
        }
    }

    fn is_exceeded(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// What the stepper saw while integrating a single grid interval.
///
/// The integrator owns the stepper, so anything the solver needs afterwards
/// is written here through shared references.
pub(super) struct IntervalLog<const N: usize> {
    failure: RefCell<Option<Error>>,
    accepted: Cell<Option<(f64, [f64; N])>>,
}

impl<const N: usize> IntervalLog<N> {
    pub(super) fn new() -> Self {
        Self {
            failure: RefCell::new(None),
            accepted: Cell::new(None),
        }
    }

    /// Takes the first failure recorded during the interval, if any.
    pub(super) fn take_failure(&self) -> Option<Error> {
        self.failure.take()
    }

    /// Returns the last accepted `(time, state)` pair.
    pub(super) fn last_accepted(&self) -> Option<(f64, [f64; N])> {
        self.accepted.get()
    }

    fn fail(&self, err: Error) {
        let mut slot = self.failure.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    fn has_failed(&self) -> bool {
        self.failure.borrow().is_some()
    }
}

/// Adapts a model and ODE problem to the `ode_solvers` system interface.
///
/// Failures cannot be returned through [`System::system`], so the first one is
/// recorded in the [`IntervalLog`], the derivative is poisoned with NaN, and
/// the integration is halted at the next accepted step.
pub(super) struct Stepper<'a, M, P, const N: usize>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    model: &'a M,
    problem: &'a P,
    base: &'a M::Input,
    budget: Option<Budget>,
    log: &'a IntervalLog<N>,
}

impl<'a, M, P, const N: usize> Stepper<'a, M, P, N>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    pub(super) fn new(
        model: &'a M,
        problem: &'a P,
        base: &'a M::Input,
        budget: Option<Budget>,
        log: &'a IntervalLog<N>,
    ) -> Self {
        Self {
            model,
            problem,
            base,
            budget,
            log,
        }
    }

    fn evaluate(&self, time: f64, y: &SVector<f64, N>) -> Result<[f64; N], Error> {
        let state: [f64; N] = (*y).into();
        let input = self
            .problem
            .build_input(self.base, time, &state)
            .map_err(Error::problem)?;
        let output = self.model.call(&input).map_err(Error::model)?;
        let derivative = self
            .problem
            .derivative(&input, &output)
            .map_err(Error::problem)?;

        if derivative.iter().all(|d| d.is_finite()) {
            Ok(derivative)
        } else {
            Err(Error::NonFinite { time })
        }
    }
}

impl<M, P, const N: usize> System<f64, SVector<f64, N>> for Stepper<'_, M, P, N>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    fn system(&self, x: f64, y: &SVector<f64, N>, dy: &mut SVector<f64, N>) {
        match self.evaluate(x, y) {
            Ok(derivative) => *dy = SVector::from(derivative),
            Err(err) => {
                self.log.fail(err);
                *dy = SVector::from_element(f64::NAN);
            }
        }
    }

    fn solout(&mut self, x: f64, y: &SVector<f64, N>, _dy: &SVector<f64, N>) -> bool {
        if self.log.has_failed() {
            return true;
        }

        if !y.iter().all(|v| v.is_finite()) {
            self.log.fail(Error::NonFinite { time: x });
            return true;
        }

        self.log.accepted.set(Some((x, (*y).into())));

        match self.budget {
            Some(budget) if budget.is_exceeded() => {
                self.log.fail(Error::TimeBudgetExceeded {
                    time: x,
                    budget: budget.budget,
                });
                true
            }
            _ => false,
        }
    }
}

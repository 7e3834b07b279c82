/// A pure function from a typed input to a typed output.
///
/// Integrators evaluate a model at every stage of every step, often at
/// states that are later rejected. Implementations must therefore be
/// deterministic and free of side effects that would make a rejected
/// evaluation observable.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model at `input`.
    ///
    /// # Errors
    ///
    /// Returns the model's own error type when the input is outside the
    /// region where the model is defined or the result is not usable.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// An input together with the output the model produced for it.
///
/// Solvers record one snapshot per output point so callers can read both
/// the integrated state and any derived quantities at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    #[must_use]
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("negative temperatures are not allowed")]
    struct NegativeTemperature;

    struct Doubling;

    impl Model for Doubling {
        type Input = f64;
        type Output = f64;
        type Error = NegativeTemperature;

        fn call(&self, input: &f64) -> Result<f64, Self::Error> {
            if *input < 0.0 {
                Err(NegativeTemperature)
            } else {
                Ok(2.0 * input)
            }
        }
    }

    #[test]
    fn snapshot_pairs_input_with_output() {
        let input = 21.5;
        let output = Doubling.call(&input).expect("non-negative input");
        let snapshot = Snapshot::new(input, output);

        assert_eq!(snapshot, Snapshot { input: 21.5, output: 43.0 });
    }

    #[test]
    fn model_errors_are_typed() {
        assert!(Doubling.call(&-1.0).is_err());
    }
}

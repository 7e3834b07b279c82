/// Defines an ODE (ordinary differential equation) problem over `N` state
/// variables.
///
/// An ODE problem extracts a state vector from model input, reads the state
/// derivative from model input and output, and reconstructs model input from a
/// time and an updated state. This lets generic integrators drive any
/// [`Model`](crate::Model) whose state can be written as `[f64; N]`.
///
/// The order of values returned by [`state`](Self::state) and
/// [`derivative`](Self::derivative) must agree.
pub trait OdeProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the state vector from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted from the input.
    fn state(&self, input: &Self::Input) -> Result<[f64; N], Self::Error>;

    /// Computes the time derivative of the state from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::Error>;

    /// Builds model input at `time` from a state vector.
    ///
    /// Everything that is not part of the state (fixed parameters, boundary
    /// conditions) is carried over from `base`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from the state.
    fn build_input(
        &self,
        base: &Self::Input,
        time: f64,
        state: &[f64; N],
    ) -> Result<Self::Input, Self::Error>;
}

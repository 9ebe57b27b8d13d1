use thiserror::Error;

/// Everything that can go wrong while computing a risk statistic.
///
/// Variants fall in two kinds: out-of-domain inputs (see
/// [`RiskError::is_invalid_input`]) and a VaR scan that ran through the
/// whole support without crossing its threshold. Both are terminal for the
/// call, retrying with the same inputs gives the same answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("confidence level {0} is outside the accepted range")]
    InvalidConfidenceLevel(f64),
    #[error("success probability {0} is not a probability")]
    InvalidProbability(f64),
    #[error("cannot compute a statistic over an empty sequence")]
    EmptyInput,
    #[error("value at index {index} is not finite")]
    NonFiniteValue { index: usize },
    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error(
        "VaR not found: cumulative mass of Binomial({trials}, {success_probability}) never exceeded 1 - {confidence_level}"
    )]
    SearchExhausted {
        confidence_level: f64,
        trials: u64,
        success_probability: f64,
    },
}

impl RiskError {
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, RiskError::SearchExhausted { .. })
    }
}

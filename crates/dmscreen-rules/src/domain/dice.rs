//! Dice roll contract: what a valid request and a valid outcome look like.

use dmscreen_core::dice::{DiceKind, DiceRollSpec, RemoteRoll};
use dmscreen_core::error::SessionError;
use serde::Serialize;

/// A checked roll outcome. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceRollResult {
    /// The request this result answers.
    pub spec: DiceRollSpec,
    /// Individual die outcomes; one per requested die.
    pub rolls: Vec<u32>,
    /// The modifier, echoed back.
    pub modifier: i32,
    /// `sum(rolls) + modifier`.
    pub final_total: i64,
}

impl DiceRollResult {
    /// Builds a result from the remote outcome, enforcing the contract.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MalformedResult` if the number of rolls differs
    /// from the requested count, a roll lies outside `1..=sides`, the echoed
    /// modifier differs from the requested one, or the reported total
    /// disagrees with the locally computed total. Nothing is truncated or
    /// padded.
    pub fn from_remote(spec: DiceRollSpec, remote: RemoteRoll) -> Result<Self, SessionError> {
        let expected = usize::try_from(spec.count).unwrap_or(usize::MAX);
        if remote.rolls.len() != expected {
            return Err(SessionError::MalformedResult(format!(
                "requested {} rolls for {spec}, received {}",
                spec.count,
                remote.rolls.len()
            )));
        }

        if let Some(out_of_range) = remote
            .rolls
            .iter()
            .find(|roll| !(1..=spec.kind.sides()).contains(*roll))
        {
            return Err(SessionError::MalformedResult(format!(
                "roll {out_of_range} is impossible on a {}",
                spec.kind
            )));
        }

        if remote.modifier != spec.modifier {
            return Err(SessionError::MalformedResult(format!(
                "requested modifier {}, received {}",
                spec.modifier, remote.modifier
            )));
        }

        let final_total = total(&remote.rolls, spec.modifier);
        if remote.final_total != final_total {
            return Err(SessionError::MalformedResult(format!(
                "reported total {} does not match rolls totalling {final_total}",
                remote.final_total
            )));
        }

        Ok(Self {
            spec,
            rolls: remote.rolls,
            modifier: spec.modifier,
            final_total,
        })
    }

    /// The die kind that was rolled.
    #[must_use]
    pub fn kind(&self) -> DiceKind {
        self.spec.kind
    }

    /// Detail line, e.g. `"Rolls: [4, 6, 1] +2"`. Zero modifiers are omitted.
    #[must_use]
    pub fn details(&self) -> String {
        let rolls: Vec<String> = self.rolls.iter().map(ToString::to_string).collect();
        let mut line = format!("Rolls: [{}]", rolls.join(", "));
        match self.modifier {
            0 => {}
            m if m > 0 => line.push_str(&format!(" +{m}")),
            m => line.push_str(&format!(" {m}")),
        }
        line
    }
}

/// Checks a request before any network call is made.
///
/// # Errors
///
/// Returns `SessionError::InvalidSpec` if `count` is below 1.
pub fn validate_spec(spec: &DiceRollSpec) -> Result<(), SessionError> {
    if spec.count < 1 {
        return Err(SessionError::InvalidSpec(format!(
            "dice count must be at least 1, got {}",
            spec.count
        )));
    }
    Ok(())
}

/// `sum(rolls) + modifier`, without overflow for any realistic pool.
#[must_use]
pub fn total(rolls: &[u32], modifier: i32) -> i64 {
    rolls.iter().map(|roll| i64::from(*roll)).sum::<i64>() + i64::from(modifier)
}

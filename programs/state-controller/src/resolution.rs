//! Resolution strategies: reverse-polish programs deciding when a proposal
//! resolves and which choices win.
//!
//! Each node pushes one intermediate result onto an evaluation stack: `None`
//! ("not resolvable yet") or `Some(choice indices)`.  Combinators pop and
//! recombine.  A strategy is satisfied when the single value left on the
//! stack is `Some`.
//!
//! Time nodes are *gates*: once their instant has passed they yield every
//! choice index, so `And`-ing them with a selector like `Top` reads as
//! "after the deadline, the top choice".  Selector nodes yield exactly the
//! qualifying indices.  Evaluation is a pure function of the proposal's
//! tallies and the supplied wall-clock time.

use {
    crate::error::StateControllerError,
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_proposal_program::{ProposalState, ProposalV0},
    serde::{Deserialize, Serialize},
    std::collections::HashSet,
};

/// Denominator for `ChoicePercentage`: 1_000_000_000 = 100%.
pub const PERCENTAGE_DIVISOR: i32 = 1_000_000_000;

/// One step of a resolution program.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum ResolutionNode {
    /// Already decided: yields exactly these choices.
    Resolved { choices: Vec<u16> },
    /// Gate: yields every choice once the wall clock passes `end_ts`.
    EndTimestamp { end_ts: i64 },
    /// Gate: yields every choice once `offset` seconds have elapsed since
    /// voting started.
    OffsetFromStartTs { offset: i64 },
    /// Selector: yields choices whose weight reached `weight_threshold`.
    ChoiceVoteWeight { weight_threshold: u128 },
    /// Selector: yields choices holding at least `percentage /
    /// PERCENTAGE_DIVISOR` of the total weight.
    ChoicePercentage { percentage: i32 },
    /// Selector: yields the `n` highest-weighted choices.
    Top { n: u16 },
    /// Pops one result; passes it through only if it carries at least `n`
    /// choices.
    NumResolved { n: u16 },
    /// Pops two results; yields their intersection if both are resolvable.
    And,
    /// Pops two results; yields their union, or whichever side is
    /// resolvable.
    Or,
}

impl Default for ResolutionNode {
    fn default() -> Self {
        ResolutionNode::Top { n: 1 }
    }
}

/// A reverse-polish resolution program.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize, Serialize,
    Deserialize,
)]
pub struct ResolutionStrategy {
    pub nodes: Vec<ResolutionNode>,
}

/// All choice indices of `proposal`, used by gate nodes.
fn all_choices(proposal: &ProposalV0) -> Result<Vec<u16>, StateControllerError> {
    let mut choices = Vec::with_capacity(proposal.choices.len());
    for index in 0..proposal.choices.len() {
        choices.push(u16::try_from(index).map_err(|_| StateControllerError::ArithmeticError)?);
    }
    Ok(choices)
}

fn sorted_dedup(mut choices: Vec<u16>) -> Vec<u16> {
    choices.sort_unstable();
    choices.dedup();
    choices
}

fn intersect(a: Vec<u16>, b: Vec<u16>) -> Vec<u16> {
    let b: HashSet<u16> = b.into_iter().collect();
    sorted_dedup(a.into_iter().filter(|choice| b.contains(choice)).collect())
}

fn union(mut a: Vec<u16>, b: Vec<u16>) -> Vec<u16> {
    a.extend(b);
    sorted_dedup(a)
}

impl ResolutionStrategy {
    /// Check the program is well formed: non-empty, stack-balanced, and with
    /// sane percentages.  Run once at settings creation so evaluation can
    /// assume a valid program.
    pub fn validate(&self) -> Result<(), StateControllerError> {
        if self.nodes.is_empty() {
            return Err(StateControllerError::MalformedStrategy);
        }
        let mut depth: usize = 0;
        for node in &self.nodes {
            match node {
                ResolutionNode::And | ResolutionNode::Or => {
                    if depth < 2 {
                        return Err(StateControllerError::MalformedStrategy);
                    }
                    depth = depth.saturating_sub(1);
                }
                ResolutionNode::NumResolved { .. } => {
                    if depth < 1 {
                        return Err(StateControllerError::MalformedStrategy);
                    }
                }
                ResolutionNode::ChoicePercentage { percentage } => {
                    if *percentage <= 0 || *percentage > PERCENTAGE_DIVISOR {
                        return Err(StateControllerError::InvalidPercentage);
                    }
                    depth = depth.saturating_add(1);
                }
                _ => depth = depth.saturating_add(1),
            }
        }
        if depth != 1 {
            return Err(StateControllerError::MalformedStrategy);
        }
        Ok(())
    }

    /// Evaluate against `proposal` at wall-clock time `now`.
    ///
    /// Returns `Ok(Some(winning choices))` when the strategy is satisfied,
    /// `Ok(None)` when it is not yet, and an error for malformed programs —
    /// never a panic, even on hostile input.
    pub fn resolution(
        &self,
        proposal: &ProposalV0,
        now: i64,
    ) -> Result<Option<Vec<u16>>, StateControllerError> {
        let mut stack: Vec<Option<Vec<u16>>> = vec![];
        for node in &self.nodes {
            match node {
                ResolutionNode::Resolved { choices } => {
                    stack.push(Some(sorted_dedup(choices.clone())));
                }
                ResolutionNode::EndTimestamp { end_ts } => {
                    if now > *end_ts {
                        stack.push(Some(all_choices(proposal)?));
                    } else {
                        stack.push(None);
                    }
                }
                ResolutionNode::OffsetFromStartTs { offset } => match proposal.state {
                    ProposalState::Voting { start_ts } => {
                        let deadline = start_ts
                            .checked_add(*offset)
                            .ok_or(StateControllerError::ArithmeticError)?;
                        if now > deadline {
                            stack.push(Some(all_choices(proposal)?));
                        } else {
                            stack.push(None);
                        }
                    }
                    _ => stack.push(None),
                },
                ResolutionNode::ChoiceVoteWeight { weight_threshold } => {
                    let mut choices = vec![];
                    for (index, choice) in proposal.choices.iter().enumerate() {
                        if choice.weight >= *weight_threshold {
                            choices.push(
                                u16::try_from(index)
                                    .map_err(|_| StateControllerError::ArithmeticError)?,
                            );
                        }
                    }
                    stack.push(Some(choices));
                }
                ResolutionNode::ChoicePercentage { percentage } => {
                    if *percentage <= 0 || *percentage > PERCENTAGE_DIVISOR {
                        return Err(StateControllerError::InvalidPercentage);
                    }
                    let total: u128 = proposal
                        .choices
                        .iter()
                        .try_fold(0u128, |acc, choice| acc.checked_add(choice.weight))
                        .ok_or(StateControllerError::ArithmeticError)?;
                    let scaled = total
                        .checked_mul(*percentage as u128)
                        .ok_or(StateControllerError::ArithmeticError)?;
                    let divisor = PERCENTAGE_DIVISOR as u128;
                    // Round up so "50%" cannot be met by strictly less than
                    // half the weight.
                    let threshold = scaled
                        .checked_add(divisor.saturating_sub(1))
                        .ok_or(StateControllerError::ArithmeticError)?
                        .checked_div(divisor)
                        .ok_or(StateControllerError::ArithmeticError)?;
                    let mut choices = vec![];
                    if threshold > 0 {
                        for (index, choice) in proposal.choices.iter().enumerate() {
                            if choice.weight >= threshold {
                                choices.push(
                                    u16::try_from(index)
                                        .map_err(|_| StateControllerError::ArithmeticError)?,
                                );
                            }
                        }
                    }
                    stack.push(Some(choices));
                }
                ResolutionNode::Top { n } => {
                    let mut ranked: Vec<(usize, u128)> = proposal
                        .choices
                        .iter()
                        .enumerate()
                        .map(|(index, choice)| (index, choice.weight))
                        .collect();
                    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
                    let mut choices = vec![];
                    for (index, _) in ranked.into_iter().take(usize::from(*n)) {
                        choices.push(
                            u16::try_from(index)
                                .map_err(|_| StateControllerError::ArithmeticError)?,
                        );
                    }
                    stack.push(Some(sorted_dedup(choices)));
                }
                ResolutionNode::NumResolved { n } => {
                    let top = stack
                        .pop()
                        .ok_or(StateControllerError::MalformedStrategy)?;
                    match top {
                        Some(choices) if choices.len() >= usize::from(*n) => {
                            stack.push(Some(choices));
                        }
                        _ => stack.push(None),
                    }
                }
                ResolutionNode::And => {
                    let right = stack
                        .pop()
                        .ok_or(StateControllerError::MalformedStrategy)?;
                    let left = stack
                        .pop()
                        .ok_or(StateControllerError::MalformedStrategy)?;
                    match (left, right) {
                        (Some(left), Some(right)) => stack.push(Some(intersect(left, right))),
                        _ => stack.push(None),
                    }
                }
                ResolutionNode::Or => {
                    let right = stack
                        .pop()
                        .ok_or(StateControllerError::MalformedStrategy)?;
                    let left = stack
                        .pop()
                        .ok_or(StateControllerError::MalformedStrategy)?;
                    match (left, right) {
                        (Some(left), Some(right)) => stack.push(Some(union(left, right))),
                        (Some(left), None) => stack.push(Some(left)),
                        (None, Some(right)) => stack.push(Some(right)),
                        (None, None) => stack.push(None),
                    }
                }
            }
        }

        let result = stack.pop().ok_or(StateControllerError::MalformedStrategy)?;
        if !stack.is_empty() {
            return Err(StateControllerError::MalformedStrategy);
        }
        Ok(result)
    }
}

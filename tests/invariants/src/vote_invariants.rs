//! Property-based tests for vote-accounting invariants.
//!
//! Properties tested:
//! 1. Conservation: after any sequence of cast/relinquish calls, each
//!    choice's tally equals the number of live vote records committed to it.
//! 2. Rejected operations (double votes, empty relinquishes) never move a
//!    tally.
//! 3. A full round trip (everyone relinquishes) restores all tallies to
//!    zero and clears every record.

#[cfg(test)]
mod tests {
    use {
        mgv1_ledger::{AccountMeta, Ledger, LedgerError},
        mgv1_multisig_program as multisig,
        mgv1_proposal_program as proposal,
        mgv1_proposal_program::{ChoiceArg, ProposalState},
        proptest::prelude::*,
        solana_pubkey::Pubkey,
        std::collections::HashMap,
    };

    const MEMBERS: usize = 4;
    const CHOICES: u16 = 3;

    /// A multisig-governed proposal in `Voting`, driven op by op.
    struct Harness {
        ledger: Ledger,
        payer: Pubkey,
        members: Vec<Pubkey>,
        multisig_config: Pubkey,
        proposal_key: Pubkey,
        config_key: Pubkey,
    }

    impl Harness {
        fn new() -> Self {
            let mut ledger = Ledger::new();
            ledger.warp_to_timestamp(1_700_000_000);
            let payer = Pubkey::new_unique();
            let members: Vec<Pubkey> = (0..MEMBERS).map(|_| Pubkey::new_unique()).collect();

            let multisig_config = multisig::state::multisig_config_address("invariants");
            let data = bincode::serialize(
                &multisig::MultisigInstruction::InitializeMultisigConfigV0 {
                    name: "invariants".to_string(),
                    use_reputation: false,
                    members: members.clone(),
                },
            )
            .unwrap();
            ledger
                .execute(
                    vec![
                        AccountMeta::new_readonly(payer, true),
                        AccountMeta::new(multisig_config, false),
                    ],
                    |ctx| multisig::process_instruction(ctx, &data, None),
                )
                .unwrap();

            let state_controller = Pubkey::new_unique();
            let config_key = proposal::state::proposal_config_address("invariants");
            let data = bincode::serialize(
                &proposal::ProposalInstruction::InitializeProposalConfigV0 {
                    name: "invariants".to_string(),
                    vote_controller: multisig_config,
                    state_controller,
                    on_vote_hook: Pubkey::default(),
                },
            )
            .unwrap();
            ledger
                .execute(
                    vec![
                        AccountMeta::new_readonly(payer, true),
                        AccountMeta::new(config_key, false),
                    ],
                    |ctx| proposal::process_instruction(ctx, &data, None),
                )
                .unwrap();

            let namespace = Pubkey::new_unique();
            let proposal_key = proposal::state::proposal_address(&namespace, &[0]);
            let data = bincode::serialize(&proposal::ProposalInstruction::InitializeProposalV0 {
                seed: vec![0],
                name: "invariants".to_string(),
                uri: "https://example.com".to_string(),
                max_choices_per_voter: 1,
                choices: (0..CHOICES)
                    .map(|index| ChoiceArg {
                        name: format!("choice {index}"),
                        uri: None,
                    })
                    .collect(),
                tags: vec![],
            })
            .unwrap();
            ledger
                .execute(
                    vec![
                        AccountMeta::new_readonly(payer, true),
                        AccountMeta::new_readonly(namespace, true),
                        AccountMeta::new_readonly(namespace, false),
                        AccountMeta::new(proposal_key, false),
                        AccountMeta::new_readonly(config_key, false),
                    ],
                    |ctx| proposal::process_instruction(ctx, &data, None),
                )
                .unwrap();

            let data = bincode::serialize(&proposal::ProposalInstruction::UpdateStateV0 {
                new_state: ProposalState::Voting {
                    start_ts: 1_700_000_000,
                },
            })
            .unwrap();
            ledger
                .execute(
                    vec![
                        AccountMeta::new_readonly(state_controller, true),
                        AccountMeta::new(proposal_key, false),
                        AccountMeta::new_readonly(config_key, false),
                    ],
                    |ctx| proposal::process_instruction(ctx, &data, None),
                )
                .unwrap();

            Self {
                ledger,
                payer,
                members,
                multisig_config,
                proposal_key,
                config_key,
            }
        }

        fn cast(&mut self, member: usize, choice: u16) -> Result<(), LedgerError> {
            let voter = self.members[member];
            let record = multisig::state::vote_record_address(&self.proposal_key, &voter);
            let data =
                bincode::serialize(&multisig::MultisigInstruction::VoteV0 { choice }).unwrap();
            let accounts = vec![
                AccountMeta::new(self.payer, true),
                AccountMeta::new_readonly(voter, true),
                AccountMeta::new_readonly(self.multisig_config, false),
                AccountMeta::new(record, false),
                AccountMeta::new(self.proposal_key, false),
                AccountMeta::new_readonly(self.config_key, false),
            ];
            self.ledger.execute(accounts, |ctx| {
                multisig::process_instruction(ctx, &data, None)
            })
        }

        fn relinquish(&mut self, member: usize) -> Result<(), LedgerError> {
            let voter = self.members[member];
            let record = multisig::state::vote_record_address(&self.proposal_key, &voter);
            let data = bincode::serialize(&multisig::MultisigInstruction::RelinquishVoteV0).unwrap();
            let accounts = vec![
                AccountMeta::new_readonly(voter, true),
                AccountMeta::new_readonly(self.multisig_config, false),
                AccountMeta::new(record, false),
                AccountMeta::new(self.proposal_key, false),
                AccountMeta::new_readonly(self.config_key, false),
            ];
            self.ledger.execute(accounts, |ctx| {
                multisig::process_instruction(ctx, &data, None)
            })
        }

        fn weights(&self) -> Vec<u128> {
            let proposal_record = proposal::ProposalV0::deserialize(
                &self.ledger.account(&self.proposal_key).unwrap().data,
            )
            .unwrap();
            proposal_record
                .choices
                .iter()
                .map(|choice| choice.weight)
                .collect()
        }

        /// Recompute per-choice tallies from the live vote records.
        fn tallies_from_records(&self) -> Vec<u128> {
            let mut tallies = vec![0u128; usize::from(CHOICES)];
            for voter in &self.members {
                let record_key =
                    multisig::state::vote_record_address(&self.proposal_key, voter);
                if let Some(account) = self.ledger.account(&record_key) {
                    let record =
                        multisig::VoteRecordV0::deserialize(&account.data).unwrap();
                    if let Some(choice) = record.choice {
                        tallies[usize::from(choice)] += record.weight;
                    }
                }
            }
            tallies
        }
    }

    /// One step of a random voting session.
    #[derive(Debug, Clone, Copy)]
    enum Op {
        Cast { member: usize, choice: u16 },
        Relinquish { member: usize },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..MEMBERS, 0..CHOICES).prop_map(|(member, choice)| Op::Cast { member, choice }),
            (0..MEMBERS).prop_map(|member| Op::Relinquish { member }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Conservation holds under any interleaving, and rejected
        /// operations never move a tally.
        #[test]
        fn conservation_under_random_sessions(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let mut harness = Harness::new();
            // member -> committed choice
            let mut model: HashMap<usize, u16> = HashMap::new();

            for op in ops {
                let before = harness.weights();
                match op {
                    Op::Cast { member, choice } => {
                        let result = harness.cast(member, choice);
                        if model.contains_key(&member) {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(&harness.weights(), &before);
                        } else {
                            prop_assert!(result.is_ok());
                            model.insert(member, choice);
                        }
                    }
                    Op::Relinquish { member } => {
                        let result = harness.relinquish(member);
                        if model.contains_key(&member) {
                            prop_assert!(result.is_ok());
                            model.remove(&member);
                        } else {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(&harness.weights(), &before);
                        }
                    }
                }

                // Invariant after every step: tallies match the model and
                // the live records exactly.
                let mut expected = vec![0u128; usize::from(CHOICES)];
                for choice in model.values() {
                    expected[usize::from(*choice)] += 1;
                }
                prop_assert_eq!(&harness.weights(), &expected);
                prop_assert_eq!(&harness.tallies_from_records(), &expected);
            }
        }

        /// A full round trip restores every tally to zero.
        #[test]
        fn full_round_trip_restores_zero(choices in prop::collection::vec(0..CHOICES, MEMBERS)) {
            let mut harness = Harness::new();
            for (member, choice) in choices.iter().enumerate() {
                harness.cast(member, *choice).unwrap();
            }
            for member in 0..MEMBERS {
                harness.relinquish(member).unwrap();
            }
            prop_assert_eq!(harness.weights(), vec![0u128; usize::from(CHOICES)]);
            prop_assert_eq!(harness.tallies_from_records(), vec![0u128; usize::from(CHOICES)]);
        }
    }
}

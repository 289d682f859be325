//! # Validator Set
//!
//! InitChain seeds the validators group from the consensus host's validator
//! list. Resolved updates to that group flow back to the host from EndBlock.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use gm_02_governance::test_utils::*;
    use gm_02_governance::{AppContext, Application, Genesis, GovConfig, GovernanceApi, GroupUpdateAuth};
    use shared_types::{
        Entity, GroupUpdateProposalInfo, Member, Proposal, ProposalInfo, ProposalTx, ResultCode,
        Validator, Vote, VoteTx, VOTE_YES,
    };

    fn validator_id(secret: &str) -> String {
        Entity::from_pub_key(keypair(secret).public_key()).id
    }

    fn validator(secret: &str, power: u64) -> Validator {
        Validator {
            pub_key: keypair(secret).public_key(),
            power,
        }
    }

    fn signed_vote(secret: &str, proposal_id: &str) -> VoteTx {
        let vote = Vote {
            proposal_id: proposal_id.into(),
            entity_id: validator_id(secret),
            height: 1,
            value: VOTE_YES.into(),
        };
        VoteTx::new_signed(vote, &keypair(secret))
    }

    /// Validators v1..v3 at power 10, plus a plain entity `d`, at height 1.
    fn validator_chain(config: GovConfig) -> (Application, AppContext) {
        let app = Application::new(config);
        let mut ctx = app.open().unwrap();
        ctx.set_option("entity", &entity_json("d")).unwrap();
        ctx.init_chain(&[validator("v1", 10), validator("v2", 10), validator("v3", 10)])
            .unwrap();
        ctx.begin_block(1).unwrap();
        (app, ctx)
    }

    fn reshuffle_proposal() -> ProposalTx {
        let proposal = Proposal {
            id: "reshuffle".into(),
            vote_group_id: "validators".into(),
            start_height: 0,
            end_height: 10,
            info: ProposalInfo::GroupUpdate(GroupUpdateProposalInfo {
                update_group_id: "validators".into(),
                group_version: 0,
                changed_members: vec![
                    Member::new(validator_id("v3"), 0),
                    Member::new(validator_id("v1"), 10),
                    Member::new(entity_id("d"), 5),
                ],
            }),
        };
        ProposalTx::new_signed(validator_id("v1"), proposal, &keypair("v1"))
    }

    #[test]
    fn test_init_chain_seeds_validators_group() {
        let (_app, ctx) = validator_chain(GovConfig::default());
        let group = ctx.store().get_group("validators").unwrap().unwrap();
        assert_eq!(group.version, 0);
        assert_eq!(
            group.members,
            vec![
                Member::new(validator_id("v1"), 10),
                Member::new(validator_id("v2"), 10),
                Member::new(validator_id("v3"), 10),
            ]
        );
        // entity IDs are 160-bit hex addresses
        assert_eq!(validator_id("v1").len(), 40);
    }

    #[test]
    fn test_resolved_update_returned_from_end_block() {
        let (_app, mut ctx) = validator_chain(GovConfig {
            group_update_auth: GroupUpdateAuth::TargetMembership,
            ..GovConfig::default()
        });

        assert_code(&deliver(&mut ctx, reshuffle_proposal()), ResultCode::Ok);
        assert_code(&deliver(&mut ctx, signed_vote("v1", "reshuffle")), ResultCode::Ok);
        assert_code(&deliver(&mut ctx, signed_vote("v2", "reshuffle")), ResultCode::Ok);

        let updates = ctx.end_block(1).unwrap();
        // v1's power did not change, so it is not reported
        assert_eq!(updates, vec![validator("v3", 0), validator("d", 5)]);

        // drained
        ctx.begin_block(2).unwrap();
        assert!(ctx.end_block(2).unwrap().is_empty());
    }

    #[test]
    fn test_rollback_drops_queued_updates() {
        let (_app, mut ctx) = validator_chain(GovConfig {
            group_update_auth: GroupUpdateAuth::TargetMembership,
            ..GovConfig::default()
        });
        deliver(&mut ctx, reshuffle_proposal());
        deliver(&mut ctx, signed_vote("v1", "reshuffle"));
        deliver(&mut ctx, signed_vote("v2", "reshuffle"));

        ctx.rollback().unwrap();
        assert!(ctx.end_block(1).unwrap().is_empty());
    }

    #[test]
    fn test_root_group_is_fixed_under_parent_link() {
        let (_app, mut ctx) = validator_chain(GovConfig::default());
        assert_code(&deliver(&mut ctx, reshuffle_proposal()), ResultCode::Unauthorized);
    }

    #[test]
    fn test_genesis_entities_form_equal_group() {
        let (_app, ctx) = chain(GovConfig::default());
        let group = ctx.store().get_group("validators").unwrap().unwrap();
        assert_eq!(group.members, members(&["a", "b", "c"], 1));
        assert_eq!(ctx.info().entities, 6);
        assert_eq!(ctx.info().groups, 2);
    }

    #[test]
    fn test_genesis_from_json() {
        let json = format!("[{}, {}]", entity_json("x"), entity_json("y"));
        let genesis = Genesis::from_json(&json).unwrap();

        let app = Application::new(GovConfig::default());
        let mut ctx = app.open().unwrap();
        ctx.apply_genesis(&genesis).unwrap();
        let group = ctx.store().get_group("validators").unwrap().unwrap();
        assert_eq!(group.members, members(&["x", "y"], 1));
    }
}

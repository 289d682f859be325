//! # Deployment Policies
//!
//! Behaviour selected by `GovConfig`: proposal ID assignment, group update
//! authorization and optimistic concurrency on group versions.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use gm_02_governance::test_utils::*;
    use gm_02_governance::{GovConfig, GroupUpdateAuth, ProposalIdPolicy};
    use shared_types::{
        GroupUpdateProposalInfo, Member, Proposal, ProposalInfo, ResultCode, VOTE_YES,
    };

    fn update(target: &str, version: u64, changed: Vec<Member>) -> ProposalInfo {
        ProposalInfo::GroupUpdate(GroupUpdateProposalInfo {
            update_group_id: target.into(),
            group_version: version,
            changed_members: changed,
        })
    }

    fn pass(ctx: &mut gm_02_governance::AppContext, id: &str) {
        for voter in ["a", "b"] {
            deliver(ctx, vote_tx(voter, HEIGHT, id, VOTE_YES));
        }
    }

    // =========================================================================
    // PROPOSAL IDS
    // =========================================================================

    #[test]
    fn test_content_hash_ids() {
        let (_app, mut ctx) = chain(GovConfig {
            proposal_ids: ProposalIdPolicy::ContentHash,
            ..GovConfig::default()
        });

        let draft = Proposal {
            id: String::new(),
            vote_group_id: "validators".into(),
            start_height: 0,
            end_height: 50,
            info: text_info("raise the budget"),
        };
        let id = draft.content_id();

        let wrong = proposal_tx("a", "my-id", "validators", 0, 50, text_info("raise the budget"));
        assert_code(&deliver(&mut ctx, wrong), ResultCode::EncodingError);

        let right = proposal_tx("a", &id, "validators", 0, 50, text_info("raise the budget"));
        assert_code(&deliver(&mut ctx, right), ResultCode::Ok);

        // resubmitting identical content collides even from another proposer
        let resubmit = proposal_tx("c", &id, "validators", 0, 50, text_info("raise the budget"));
        assert_code(&deliver(&mut ctx, resubmit), ResultCode::DuplicateProposal);
    }

    #[test]
    fn test_caller_supplied_ids_allow_identical_content() {
        let (_app, mut ctx) = chain(GovConfig::default());
        for id in ["first", "second"] {
            let tx = proposal_tx("a", id, "validators", 0, 50, text_info("same"));
            assert_code(&deliver(&mut ctx, tx), ResultCode::Ok);
        }
        let empty = proposal_tx("a", "", "validators", 0, 50, text_info("same"));
        assert_code(&deliver(&mut ctx, empty), ResultCode::EncodingError);
    }

    // =========================================================================
    // GROUP UPDATE AUTHORIZATION
    // =========================================================================

    #[test]
    fn test_parent_link_authorization() {
        let (_app, mut ctx) = chain(GovConfig::default());
        create_group(&mut ctx, "mk", "council", members(&["d", "e"], 1));

        // council's own members cannot restructure it under the parent rule
        let tx = proposal_tx("d", "u1", "council", 0, 100, update("council", 0, members(&["a"], 1)));
        assert_code(&deliver(&mut ctx, tx), ResultCode::Unauthorized);

        let tx = proposal_tx("a", "u2", "validators", 0, 100, update("council", 0, members(&["a"], 1)));
        assert_code(&deliver(&mut ctx, tx), ResultCode::Ok);
    }

    #[test]
    fn test_target_membership_authorization() {
        let (_app, mut ctx) = chain(GovConfig {
            group_update_auth: GroupUpdateAuth::TargetMembership,
            ..GovConfig::default()
        });
        create_group(&mut ctx, "mk", "council", members(&["d", "e"], 1));

        let tx = proposal_tx("d", "u1", "council", 0, 100, update("council", 0, members(&["a"], 1)));
        assert_code(&deliver(&mut ctx, tx), ResultCode::Ok);

        // a is in validators but not in council
        let tx = proposal_tx("a", "u2", "validators", 0, 100, update("council", 0, members(&["a"], 1)));
        assert_code(&deliver(&mut ctx, tx), ResultCode::Unauthorized);
    }

    // =========================================================================
    // GROUP VERSIONS
    // =========================================================================

    #[test]
    fn test_stale_version_rejected_when_enforced() {
        let (_app, mut ctx) = chain(GovConfig::default());
        create_group(&mut ctx, "mk", "council", members(&["d"], 1));

        deliver(&mut ctx, proposal_tx("a", "u1", "validators", 0, 100, update("council", 0, members(&["e"], 1))));
        pass(&mut ctx, "u1");
        assert_eq!(ctx.store().get_group("council").unwrap().unwrap().version, 1);

        let stale = proposal_tx("a", "u2", "validators", 0, 100, update("council", 0, members(&["a"], 1)));
        assert_code(&deliver(&mut ctx, stale), ResultCode::UnknownGroup);
    }

    #[test]
    fn test_concurrent_updates_apply_once_when_enforced() {
        let (_app, mut ctx) = chain(GovConfig::default());
        create_group(&mut ctx, "mk", "council", members(&["d"], 1));

        deliver(&mut ctx, proposal_tx("a", "u1", "validators", 0, 100, update("council", 0, members(&["e"], 1))));
        deliver(&mut ctx, proposal_tx("a", "u2", "validators", 0, 100, update("council", 0, members(&["a"], 1))));
        pass(&mut ctx, "u1");
        pass(&mut ctx, "u2");

        let council = ctx.store().get_group("council").unwrap().unwrap();
        assert_eq!(council.version, 1);
        assert_eq!(council.members, members(&["d", "e"], 1));
        // the skipped proposal is still resolved
        assert!(ctx.store().get_resolution("u2").unwrap().unwrap().passed());
    }

    #[test]
    fn test_versions_ignored_when_not_enforced() {
        let (_app, mut ctx) = chain(GovConfig {
            enforce_group_version: false,
            ..GovConfig::default()
        });
        create_group(&mut ctx, "mk", "council", members(&["d"], 1));

        deliver(&mut ctx, proposal_tx("a", "u1", "validators", 0, 100, update("council", 0, members(&["e"], 1))));
        deliver(&mut ctx, proposal_tx("a", "u2", "validators", 0, 100, update("council", 7, members(&["a"], 1))));
        pass(&mut ctx, "u1");
        pass(&mut ctx, "u2");

        let council = ctx.store().get_group("council").unwrap().unwrap();
        assert_eq!(council.version, 2);
        assert_eq!(council.members, members(&["d", "e", "a"], 1));
    }
}

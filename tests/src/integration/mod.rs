//! # Integration Tests
//!
//! Every test drives the public host API (`GovernanceApi`) with wire-encoded
//! transactions, the way a consensus host would.

pub mod policies;
pub mod sessions;
pub mod validators;

#[cfg(test)]
pub(crate) mod fixtures {
    use gm_02_governance::test_utils::*;
    use gm_02_governance::{AppContext, Application, Genesis, GovConfig, GovernanceApi};
    use shared_types::{
        GroupCreateProposalInfo, Member, ProposalInfo, ResultCode, TxResult, VOTE_YES,
    };

    /// Chain height every fixture session sits at.
    pub const HEIGHT: u64 = 10;

    /// Session with entities a..e registered, validators group {a, b, c}
    /// at power 1 and `root` as sole admin. Committed at height 0, then
    /// positioned at [`HEIGHT`].
    pub fn chain(config: GovConfig) -> (Application, AppContext) {
        let app = Application::new(config);
        let mut ctx = app.open().unwrap();
        ctx.set_option("admin", &entity_json("root")).unwrap();
        for s in ["d", "e"] {
            ctx.set_option("entity", &entity_json(s)).unwrap();
        }
        ctx.apply_genesis(&Genesis::new(vec![entity("a"), entity("b"), entity("c")]))
            .unwrap();
        ctx.begin_block(0).unwrap();
        ctx.end_block(0).unwrap();
        ctx.commit().unwrap();
        ctx.begin_block(HEIGHT).unwrap();
        (app, ctx)
    }

    pub fn deliver(ctx: &mut AppContext, tx: impl Into<shared_types::Tx>) -> TxResult {
        ctx.deliver_tx(&encode(tx)).unwrap()
    }

    pub fn assert_code(result: &TxResult, code: ResultCode) {
        assert_eq!(result.code, code, "log: {}", result.log);
    }

    /// Have the validators group create `group_id` with the given members,
    /// parented by the validators group.
    pub fn create_group(ctx: &mut AppContext, proposal_id: &str, group_id: &str, members: Vec<Member>) {
        let info = ProposalInfo::GroupCreate(GroupCreateProposalInfo {
            new_group_id: group_id.into(),
            members,
        });
        assert_code(
            &deliver(ctx, proposal_tx("a", proposal_id, "validators", 0, 100, info)),
            ResultCode::Ok,
        );
        for voter in ["a", "b"] {
            assert_code(
                &deliver(ctx, vote_tx(voter, HEIGHT, proposal_id, VOTE_YES)),
                ResultCode::Ok,
            );
        }
        assert!(ctx.store().get_group(group_id).unwrap().is_some());
    }
}

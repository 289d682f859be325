//! # Session Isolation
//!
//! Sessions work on private copies of the committed tree. Commit publishes a
//! session, rollback discards it, and `rollback_to` rewinds the application
//! to an earlier committed height.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use gm_02_governance::test_utils::*;
    use gm_02_governance::{Application, GovConfig, GovernanceApi};
    use gm_01_state_store::StoreConfig;
    use shared_types::{ResultCode, VOTE_YES};
    use std::thread;

    #[test]
    fn test_uncommitted_work_is_private() {
        let (app, mut ctx) = chain(GovConfig::default());
        let committed = app.committed_hash();

        deliver(&mut ctx, proposal_tx("a", "p1", "validators", 0, 100, text_info("t")));
        assert_ne!(ctx.get_hash(), committed);

        let other = app.open().unwrap();
        assert_eq!(other.get_hash(), committed);
        assert!(other.store().get_active_proposal("p1").unwrap().is_none());
    }

    #[test]
    fn test_rollback_restores_committed_state() {
        let (app, mut ctx) = chain(GovConfig::default());
        let committed = app.committed_hash();

        deliver(&mut ctx, proposal_tx("a", "p1", "validators", 0, 100, text_info("t")));
        ctx.rollback().unwrap();
        assert_eq!(ctx.get_hash(), committed);

        // the proposal ID is free again
        ctx.begin_block(HEIGHT).unwrap();
        let result = deliver(&mut ctx, proposal_tx("a", "p1", "validators", 0, 100, text_info("t")));
        assert_code(&result, ResultCode::Ok);
    }

    #[test]
    fn test_check_tx_is_side_effect_free() {
        let (_app, mut ctx) = chain(GovConfig::default());
        let tx = encode(proposal_tx("a", "p1", "validators", 0, 100, text_info("t")));
        let before = ctx.get_hash();

        for _ in 0..3 {
            assert_code(&ctx.check_tx(&tx).unwrap(), ResultCode::Ok);
        }
        assert_eq!(ctx.get_hash(), before);

        assert_code(&ctx.deliver_tx(&tx).unwrap(), ResultCode::Ok);
        assert_code(&ctx.check_tx(&tx).unwrap(), ResultCode::DuplicateProposal);
    }

    #[test]
    fn test_last_commit_wins() {
        let (app, ctx) = chain(GovConfig::default());
        drop(ctx);
        let mut x = app.open().unwrap();
        let mut y = app.open().unwrap();
        x.begin_block(HEIGHT).unwrap();
        y.begin_block(HEIGHT).unwrap();

        deliver(&mut x, proposal_tx("a", "px", "validators", 0, 100, text_info("x")));
        deliver(&mut y, proposal_tx("a", "py", "validators", 0, 100, text_info("y")));
        x.commit().unwrap();
        let hash = y.commit().unwrap();

        assert_eq!(app.committed_hash(), hash);
        let fresh = app.open().unwrap();
        assert!(fresh.store().get_active_proposal("px").unwrap().is_none());
        assert!(fresh.store().get_active_proposal("py").unwrap().is_some());
    }

    #[test]
    fn test_sessions_on_many_threads() {
        let (app, mut ctx) = chain(GovConfig::default());
        deliver(&mut ctx, proposal_tx("a", "p1", "validators", 0, 100, text_info("t")));
        ctx.commit().unwrap();
        let committed = app.committed_hash();

        let handles: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|voter| {
                let app = app.clone();
                thread::spawn(move || {
                    let mut session = app.open().unwrap();
                    session.begin_block(HEIGHT).unwrap();
                    let result = session
                        .check_tx(&encode(vote_tx(voter, 1, "p1", VOTE_YES)))
                        .unwrap();
                    (result.code, session.get_hash())
                })
            })
            .collect();

        for handle in handles {
            let (code, hash) = handle.join().unwrap();
            assert_eq!(code, ResultCode::Ok);
            assert_eq!(hash, committed);
        }
    }

    #[test]
    fn test_rollback_to_height() {
        let (app, mut ctx) = chain(GovConfig::default());
        ctx.end_block(HEIGHT).unwrap();
        let at_ten = ctx.commit().unwrap();

        for height in [11, 12] {
            ctx.begin_block(height).unwrap();
            let id = format!("p{height}");
            deliver(&mut ctx, proposal_tx("a", &id, "validators", 0, 100, text_info("t")));
            ctx.end_block(height).unwrap();
            ctx.commit().unwrap();
        }
        assert_eq!(app.committed_versions(), vec![0, HEIGHT, 11, 12]);

        assert_eq!(app.rollback_to(HEIGHT).unwrap(), at_ten);
        assert_eq!(app.committed_versions(), vec![0, HEIGHT]);

        let rewound = app.open().unwrap();
        assert_eq!(rewound.get_hash(), at_ten);
        assert_eq!(rewound.info().height, HEIGHT);
        assert_eq!(rewound.info().active_proposals, 0);
    }

    #[test]
    fn test_old_versions_are_pruned() {
        let config = GovConfig {
            store: StoreConfig {
                keep_recent_versions: 2,
            },
            ..GovConfig::default()
        };
        let app = Application::new(config);
        let mut ctx = app.open().unwrap();
        for height in 1..=4 {
            ctx.begin_block(height).unwrap();
            ctx.end_block(height).unwrap();
            ctx.commit().unwrap();
        }
        assert_eq!(app.committed_versions(), vec![3, 4]);
        assert!(app.rollback_to(1).is_err());
    }
}

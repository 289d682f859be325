//! # Validation & State-Transition Engine
//!
//! Applies signed transactions to a [`GovStore`].
//!
//! ## ProposalTx
//!
//! ```text
//! received → proposer-resolved → signature-checked → group-resolved
//!          → membership-checked → id-checked → type-specific-validated → stored
//! ```
//!
//! ## VoteTx
//!
//! ```text
//! received → voter-resolved → signature-checked → proposal-resolved → height-checked
//!          → group-resolved → membership-checked → duplicate-checked → tallied
//!          → (resolved → executed)
//! ```
//!
//! Each transaction is all-or-nothing: the store is snapshotted before the
//! transaction and restored on any failure, so a rejected transaction never
//! changes the root hash.
//!
//! The engine is a pure function of (store, meta, transaction). It reads no
//! clock and no randomness.

use crate::adapters::Ed25519Verifier;
use crate::config::{GovConfig, GroupUpdateAuth, ProposalIdPolicy};
use crate::domain::validation;
use crate::domain::{GovError, Tally, TxError};
use crate::ports::outbound::SignatureVerifier;
use crate::state::GovStore;
use gm_01_state_store::{KvStore, StoreError};
use shared_types::{
    decode_tx, ActiveProposal, Entity, GovMeta, Group, Member, Proposal, ProposalInfo,
    ProposalTx, Resolution, ResultCode, Tx, TxResult, ValidatorUpdate, VoteTx,
};
use tracing::{debug, error, info, warn};

/// The governance state machine.
///
/// Holds everything that is not in the store: configuration, the signature
/// capability, the current block height and validator-set changes queued for
/// the next EndBlock.
#[derive(Debug, Clone)]
pub struct Governmint<V = Ed25519Verifier> {
    pub(crate) config: GovConfig,
    pub(crate) verifier: V,
    pub(crate) meta: GovMeta,
    pub(crate) validator_updates: Vec<ValidatorUpdate>,
}

impl<V: SignatureVerifier> Governmint<V> {
    pub fn new(config: GovConfig, verifier: V) -> Self {
        Self {
            config,
            verifier,
            meta: GovMeta::default(),
            validator_updates: Vec::new(),
        }
    }

    pub fn config(&self) -> &GovConfig {
        &self.config
    }

    /// Current chain height as seen by vote checks.
    pub fn height(&self) -> u64 {
        self.meta.height
    }

    pub fn meta(&self) -> &GovMeta {
        &self.meta
    }

    /// Validator-set changes queued since the last EndBlock.
    pub fn pending_validator_updates(&self) -> &[ValidatorUpdate] {
        &self.validator_updates
    }

    // =========================================================================
    // ENTRY POINTS
    // =========================================================================

    /// Decode and apply raw transaction bytes.
    ///
    /// `Ok` carries the status for the host, including rejections.
    /// `Err` is a fatal store fault.
    pub fn run_tx_bytes<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        tx_bytes: &[u8],
    ) -> Result<TxResult, StoreError> {
        match decode_tx(tx_bytes) {
            Ok(tx) => self.run_tx(store, &tx),
            Err(e) => {
                let err = TxError::Encoding(e.to_string());
                warn!(code = %err.code(), "{}", err);
                Ok(TxResult::error(err.code(), err.to_string()))
            }
        }
    }

    /// Apply a decoded transaction atomically.
    pub fn run_tx<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        tx: &Tx,
    ) -> Result<TxResult, StoreError> {
        let snapshot = store.clone();
        let queued = self.validator_updates.len();

        let outcome = match tx {
            Tx::Proposal(tx) => self.run_proposal_tx(store, tx),
            Tx::Vote(tx) => self.run_vote_tx(store, tx),
        };

        match outcome {
            Ok(result) => {
                debug!(
                    tx = %hex::encode(tx.id()),
                    kind = tx.kind(),
                    signer = tx.signer(),
                    "{}",
                    result.log
                );
                Ok(result)
            }
            Err(GovError::Rejected(err)) => {
                *store = snapshot;
                self.validator_updates.truncate(queued);
                warn!(
                    tx = %hex::encode(tx.id()),
                    kind = tx.kind(),
                    code = %err.code(),
                    "tx rejected: {}",
                    err
                );
                Ok(TxResult::error(err.code(), err.to_string()))
            }
            Err(GovError::Store(err)) => {
                *store = snapshot;
                self.validator_updates.truncate(queued);
                error!(tx = %hex::encode(tx.id()), error = %err, "store fault while applying tx");
                Err(err)
            }
        }
    }

    // =========================================================================
    // PROPOSALS
    // =========================================================================

    fn run_proposal_tx<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        tx: &ProposalTx,
    ) -> Result<TxResult, GovError> {
        let proposer = self.load_signer(store, &tx.entity_id)?;
        if !self
            .verifier
            .verify(&proposer.pub_key, &tx.sign_bytes(), &tx.signature)
        {
            return Err(TxError::InvalidSignature.into());
        }

        let proposal = &tx.proposal;
        let vote_group = store.get_group(&proposal.vote_group_id)?.ok_or_else(|| {
            TxError::UnknownVoteGroup {
                id: proposal.vote_group_id.clone(),
            }
        })?;
        if !vote_group.is_member(&proposer.id) {
            return Err(TxError::ProposerNotMember {
                entity: proposer.id,
                group: vote_group.id,
            }
            .into());
        }

        self.check_proposal_id(store, proposal)?;
        validation::check_window(proposal)?;
        self.validate_info(store, proposal, &proposer, &vote_group)?;

        store.set_active_proposal(&ActiveProposal::new(proposal.clone()))?;
        info!(
            proposal = %proposal.id,
            kind = proposal.info.kind(),
            group = %proposal.vote_group_id,
            "proposal created"
        );
        Ok(TxResult {
            code: ResultCode::Ok,
            data: proposal.id.as_bytes().to_vec(),
            log: "Proposal created".to_string(),
        })
    }

    fn check_proposal_id<S: KvStore>(
        &self,
        store: &GovStore<S>,
        proposal: &Proposal,
    ) -> Result<(), GovError> {
        if proposal.id.is_empty() {
            return Err(TxError::MalformedProposal("empty proposal id".into()).into());
        }
        if self.config.proposal_ids == ProposalIdPolicy::ContentHash {
            let expected = proposal.content_id();
            if proposal.id != expected {
                return Err(TxError::MalformedProposal(format!(
                    "proposal id {} does not match content hash {}",
                    proposal.id, expected
                ))
                .into());
            }
        }
        if store.proposal_id_used(&proposal.id)? {
            return Err(TxError::DuplicateProposal {
                id: proposal.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn validate_info<S: KvStore>(
        &self,
        store: &GovStore<S>,
        proposal: &Proposal,
        proposer: &Entity,
        vote_group: &Group,
    ) -> Result<(), GovError> {
        match &proposal.info {
            ProposalInfo::GroupCreate(info) => {
                if info.new_group_id.is_empty() {
                    return Err(TxError::MalformedProposal("empty group id".into()).into());
                }
                if store.get_group(&info.new_group_id)?.is_some() {
                    return Err(TxError::DuplicateGroup {
                        id: info.new_group_id.clone(),
                    }
                    .into());
                }
                validation::check_unique_members(&info.members)?;
                validation::check_new_member_powers(&info.members)?;
                check_members_registered(store, &info.members)?;
            }
            ProposalInfo::GroupUpdate(info) => {
                let target = store.get_group(&info.update_group_id)?.ok_or_else(|| {
                    TxError::UnknownGroup {
                        id: info.update_group_id.clone(),
                    }
                })?;
                let authorized = match self.config.group_update_auth {
                    GroupUpdateAuth::ParentLink => {
                        target.parent_id.as_deref() == Some(vote_group.id.as_str())
                    }
                    GroupUpdateAuth::TargetMembership => target.is_member(&proposer.id),
                };
                if !authorized {
                    return Err(TxError::UpdateNotAuthorized {
                        vote_group: vote_group.id.clone(),
                        target: target.id,
                    }
                    .into());
                }
                if self.config.enforce_group_version && target.version != info.group_version {
                    return Err(TxError::StaleGroupVersion {
                        id: target.id,
                        current: target.version,
                        proposed: info.group_version,
                    }
                    .into());
                }
                validation::check_unique_members(&info.changed_members)?;
                validation::check_changed_member_powers(&info.changed_members)?;
                check_members_registered(store, &info.changed_members)?;
            }
            ProposalInfo::Text(_) => {}
            ProposalInfo::Upgrade(info) => {
                if vote_group.id != self.config.admin_group_id {
                    return Err(TxError::UpgradeNotAdmin.into());
                }
                if info.modules.is_empty() {
                    return Err(TxError::EmptyUpgrade.into());
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // VOTES
    // =========================================================================

    fn run_vote_tx<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        tx: &VoteTx,
    ) -> Result<TxResult, GovError> {
        let vote = &tx.vote;
        let voter = self.load_signer(store, &vote.entity_id)?;
        if !self
            .verifier
            .verify(&voter.pub_key, &tx.sign_bytes(), &tx.signature)
        {
            return Err(TxError::InvalidSignature.into());
        }

        let mut active = store
            .get_active_proposal(&vote.proposal_id)?
            .ok_or_else(|| TxError::UnknownProposal {
                id: vote.proposal_id.clone(),
            })?;
        validation::check_vote_height(vote, &active.proposal, self.meta.height)?;

        let group = store
            .get_group(&active.proposal.vote_group_id)?
            .ok_or_else(|| TxError::UnknownVoteGroup {
                id: active.proposal.vote_group_id.clone(),
            })?;
        if !group.is_member(&voter.id) {
            return Err(TxError::VoterNotMember {
                entity: voter.id,
                group: group.id,
            }
            .into());
        }
        if active.has_voted(&voter.id) {
            return Err(TxError::DuplicateVote { entity: voter.id }.into());
        }

        active.signed_votes.push(tx.clone().into_signed_vote());

        let tally = Tally::compute(&group, &active.signed_votes);
        let Some(outcome) = tally.winner().map(str::to_string) else {
            store.set_active_proposal(&active)?;
            return Ok(TxResult {
                code: ResultCode::Ok,
                data: Vec::new(),
                log: "Vote added to ActiveProposal".to_string(),
            });
        };

        let resolution = Resolution {
            proposal: active.proposal,
            signed_votes: active.signed_votes,
            outcome,
            resolved_at: self.meta.height,
        };
        store.remove_active_proposal(&resolution.proposal.id)?;
        store.set_resolution(&resolution)?;
        info!(
            proposal = %resolution.proposal.id,
            outcome = %resolution.outcome,
            votes = resolution.signed_votes.len(),
            height = resolution.resolved_at,
            "proposal resolved"
        );

        self.execute_resolution(store, &resolution)?;

        Ok(TxResult {
            code: ResultCode::Ok,
            data: resolution.outcome.as_bytes().to_vec(),
            log: format!("Vote added, proposal resolved: {}", resolution.outcome),
        })
    }

    // =========================================================================
    // RESOLUTION EXECUTION
    // =========================================================================

    /// Carry out a resolution whose outcome is "yes". Other outcomes only
    /// close the proposal.
    fn execute_resolution<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        resolution: &Resolution,
    ) -> Result<(), StoreError> {
        if !resolution.passed() {
            return Ok(());
        }
        let proposal = &resolution.proposal;

        match &proposal.info {
            ProposalInfo::GroupCreate(info) => {
                if store.get_group(&info.new_group_id)?.is_some() {
                    // another resolution took the ID after this proposal was accepted
                    warn!(
                        proposal = %proposal.id,
                        group = %info.new_group_id,
                        "group already exists, creation skipped"
                    );
                    return Ok(());
                }
                let group = Group {
                    id: info.new_group_id.clone(),
                    parent_id: Some(proposal.vote_group_id.clone()),
                    version: 0,
                    members: info.members.clone(),
                };
                store.set_group(&group)?;
                info!(group = %group.id, members = group.members.len(), "group created");
            }
            ProposalInfo::GroupUpdate(info) => {
                let key = crate::domain::keys::group_key(&info.update_group_id);
                let mut group = store
                    .get_group(&info.update_group_id)?
                    .ok_or_else(|| StoreError::corrupted(&key, "group vanished"))?;
                if self.config.enforce_group_version && group.version != info.group_version {
                    warn!(
                        proposal = %proposal.id,
                        group = %group.id,
                        current = group.version,
                        proposed = info.group_version,
                        "group changed since proposal, update skipped"
                    );
                    return Ok(());
                }
                let changes = group.apply_member_changes(&info.changed_members);
                store.set_group(&group)?;
                info!(
                    group = %group.id,
                    version = group.version,
                    changes = changes.len(),
                    "group updated"
                );
                if group.id == self.config.validators_group_id {
                    self.queue_validator_updates(store, &changes)?;
                }
            }
            ProposalInfo::Text(info) => {
                info!(proposal = %proposal.id, text = %info.text, "text proposal passed");
            }
            ProposalInfo::Upgrade(info) => {
                for module in &info.modules {
                    info!(
                        proposal = %proposal.id,
                        module = %module.name,
                        script = %module.script,
                        "upgrade approved"
                    );
                }
            }
        }
        Ok(())
    }

    fn queue_validator_updates<S: KvStore>(
        &mut self,
        store: &GovStore<S>,
        changes: &[Member],
    ) -> Result<(), StoreError> {
        for change in changes {
            let entity = store.get_entity(&change.entity_id)?.ok_or_else(|| {
                StoreError::corrupted(
                    &crate::domain::keys::entity_key(&change.entity_id),
                    "member entity vanished",
                )
            })?;
            self.validator_updates.push(ValidatorUpdate {
                pub_key: entity.pub_key,
                power: change.voting_power,
            });
        }
        Ok(())
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn load_signer<S: KvStore>(&self, store: &GovStore<S>, id: &str) -> Result<Entity, GovError> {
        store
            .get_entity(id)?
            .ok_or_else(|| TxError::UnknownEntity { id: id.to_string() }.into())
    }
}

/// Every member must reference a registered entity. Reports the first unknown one.
fn check_members_registered<S: KvStore>(
    store: &GovStore<S>,
    members: &[Member],
) -> Result<(), GovError> {
    for member in members {
        if store.get_entity(&member.entity_id)?.is_none() {
            return Err(TxError::UnknownMemberEntity {
                id: member.entity_id.clone(),
            }
            .into());
        }
    }
    Ok(())
}

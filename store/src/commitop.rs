//! The commit manager: freezes staged trees into history, and compares
//! commits.
use async_stream::try_stream;
use chrono::Utc;
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use verso_castore::diff::{diff_tree, Change};
use verso_castore::objectservice::ObjectService;
use verso_castore::treeop::TreeOp;
use verso_castore::{B3Digest, Blob, Commit, Error};

use crate::refservice::RefService;
use crate::wipservice::{WipService, WorkingState};

pub struct CommitOp<OS, RS, WS> {
    object_service: OS,
    ref_service: RS,
    wip_service: WS,
}

impl CommitOp<Arc<dyn ObjectService>, Arc<dyn RefService>, Arc<dyn WipService>> {
    /// Wires up the handles returned by [crate::utils::construct_services].
    pub fn from_services(
        (object_service, ref_service, wip_service): (
            Arc<dyn ObjectService>,
            Arc<dyn RefService>,
            Arc<dyn WipService>,
        ),
    ) -> Self {
        Self::new(object_service, ref_service, wip_service)
    }
}

impl<OS, RS, WS> CommitOp<OS, RS, WS>
where
    OS: ObjectService,
    RS: RefService,
    WS: WipService,
{
    pub fn new(object_service: OS, ref_service: RS, wip_service: WS) -> Self {
        Self {
            object_service,
            ref_service,
            wip_service,
        }
    }

    /// Commits the tree staged in the given working state onto the given
    /// ref, authored by `user_id`, and moves the ref to the new commit.
    ///
    /// The commit object is persisted before the ref is moved. If the ref
    /// moved since it was read, [Error::Conflict] is returned and the ref
    /// keeps pointing to the other commit. Retrying is up to the caller.
    #[instrument(skip(self, ref_id, user_id, wip_id, message), fields(%ref_id, %wip_id, %user_id))]
    pub async fn add_commit(
        &self,
        ref_id: &Uuid,
        user_id: Uuid,
        wip_id: &Uuid,
        message: &str,
    ) -> Result<Commit, Error> {
        let working_state = self
            .wip_service
            .get(wip_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("working state {}", wip_id)))?;

        let r = self
            .ref_service
            .get(ref_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("ref {}", ref_id)))?;

        if working_state.ref_id != r.id || working_state.repository_id != r.repository_id {
            warn!(
                wip.ref_id = %working_state.ref_id,
                wip.repository_id = %working_state.repository_id,
                ref_repository_id = %r.repository_id,
                "working state doesn't belong to ref"
            );
            return Err(Error::IdentityMismatch(format!(
                "working state {} doesn't belong to ref {:?} in repository {}",
                working_state.id, r.name, r.repository_id
            )));
        }

        // refuse to commit a tree that can't be resolved.
        self.object_service
            .get_tree(&working_state.current_tree)
            .await?;

        let commit = Commit::new(
            working_state.current_tree.clone(),
            r.commit.clone(),
            user_id,
            message,
            Utc::now(),
        );
        let commit_digest = self.object_service.put(commit.clone().into()).await?;

        self.ref_service
            .compare_and_set(ref_id, r.commit.as_ref(), commit_digest.clone())
            .await?;

        debug!(%commit_digest, ref_name = %r.name, "created commit");

        Ok(commit)
    }

    /// Looks up a commit by its digest.
    pub async fn get_commit(&self, digest: &B3Digest) -> Result<Commit, Error> {
        self.object_service.get_commit(digest).await
    }

    /// Computes the changes between the root trees of two commits, ordered
    /// by path. Fails with [Error::NotFound] if either commit is missing.
    #[instrument(skip(self, base, merge), fields(%base, %merge))]
    pub async fn diff_commit(
        &self,
        base: &B3Digest,
        merge: &B3Digest,
    ) -> Result<Vec<Change>, Error> {
        let base_commit = self.object_service.get_commit(base).await?;
        let merge_commit = self.object_service.get_commit(merge).await?;

        diff_tree(&self.object_service, base_commit.tree(), merge_commit.tree()).await
    }

    /// Walks the first-parent history, starting at (and including) the given
    /// commit, until the root commit.
    pub fn log(&self, digest: &B3Digest) -> BoxStream<'_, Result<Commit, Error>> {
        let mut next = Some(digest.clone());

        Box::pin(try_stream! {
            while let Some(digest) = next.take() {
                let commit = self.object_service.get_commit(&digest).await?;
                next = commit.parent().cloned();
                yield commit;
            }
        })
    }
}

impl<OS, RS, WS> CommitOp<OS, RS, WS>
where
    OS: ObjectService + Clone,
    RS: RefService,
    WS: WipService,
{
    /// Stages the blob at the given path in a working state, and returns the
    /// updated working state.
    /// Fails with [Error::Conflict] if another tree got staged in the same
    /// working state in the meantime, the blob is not staged then.
    #[instrument(skip(self, wip_id, blob), fields(%wip_id, blob.digest = %blob.digest()))]
    pub async fn stage(
        &self,
        wip_id: &Uuid,
        path: &str,
        blob: &Blob,
    ) -> Result<WorkingState, Error> {
        let working_state = self
            .wip_service
            .get(wip_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("working state {}", wip_id)))?;

        let root = self
            .object_service
            .get_tree(&working_state.current_tree)
            .await?;
        let root = TreeOp::new(self.object_service.clone())
            .add_leaf(&root, path, blob)
            .await?;

        self.wip_service
            .compare_and_set_current_tree(wip_id, &working_state.current_tree, root.digest())
            .await
    }
}

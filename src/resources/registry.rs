//! Resource table and transactional staging.
//!
//! Ids come from a counter owned by the [`Registry`]; once issued they are retired for the
//! lifetime of the registry, whether or not the reserving [`Transaction`] commits. Staged
//! resources stay inside the transaction until [`Transaction::commit`], so a failed build never
//! leaves half of its definitions visible.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::foundation::error::{FcpxError, FcpxResult};
use crate::foundation::ids::ResourceId;
use crate::resources::model::{Asset, Effect, Format, Media, Resource};

/// Committed resources of one document plus the id counter.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Registry {
    last_issued: u32,
    resources: Vec<Resource>,
    #[serde(skip)]
    by_id: HashMap<ResourceId, usize>,
    #[serde(skip)]
    asset_by_path: HashMap<String, ResourceId>,
}

impl Registry {
    /// Empty registry; the first reserved id is `r1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue `n` fresh ids. Nothing is issued when fewer than `n` remain.
    pub fn reserve_ids(&mut self, n: usize) -> FcpxResult<Vec<ResourceId>> {
        let first = self.last_issued;
        let last = u32::try_from(n)
            .ok()
            .and_then(|n| first.checked_add(n))
            .ok_or(FcpxError::IdSpaceExhausted {
                issued: first,
                requested: n,
            })?;
        self.last_issued = last;
        Ok((first + 1..=last).map(ResourceId).collect())
    }

    /// Number of ids issued so far, committed or not.
    pub fn issued(&self) -> u32 {
        self.last_issued
    }

    /// Committed resource by id.
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.by_id.get(&id).map(|&i| &self.resources[i])
    }

    /// Whether `id` names a committed resource.
    pub fn contains(&self, id: ResourceId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Committed resources in commit order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Number of committed resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Return `true` when nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Committed assets.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.resources.iter().filter_map(Resource::as_asset)
    }

    /// Committed formats.
    pub fn formats(&self) -> impl Iterator<Item = &Format> {
        self.resources.iter().filter_map(Resource::as_format)
    }

    /// Committed effects.
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.resources.iter().filter_map(Resource::as_effect)
    }

    /// Committed compound media.
    pub fn media(&self) -> impl Iterator<Item = &Media> {
        self.resources.iter().filter_map(Resource::as_media)
    }

    /// Committed asset for an absolute path.
    pub fn asset_by_path(&self, path: &str) -> Option<&Asset> {
        self.asset_by_path
            .get(path)
            .and_then(|&id| self.get(id))
            .and_then(Resource::as_asset)
    }

    /// Committed effect with the given catalog identity.
    pub fn effect_by_uid(&self, uid: &str) -> Option<&Effect> {
        self.effects().find(|e| e.uid == uid)
    }

    /// First committed moving-picture format of the given size.
    pub fn format_for_size(&self, width: u32, height: u32) -> Option<&Format> {
        self.formats()
            .find(|f| f.width == width && f.height == height && f.frame_duration.is_some())
    }

    fn insert_committed(&mut self, resource: Resource) {
        let id = resource.id();
        if let Resource::Asset(a) = &resource {
            self.asset_by_path.entry(a.path.clone()).or_insert(id);
        }
        self.by_id.insert(id, self.resources.len());
        self.resources.push(resource);
    }

    /// Append without any bookkeeping checks; lets tests build tables the API refuses to.
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, resource: Resource) {
        self.by_id
            .entry(resource.id())
            .or_insert(self.resources.len());
        self.resources.push(resource);
    }
}

/// Lifecycle of a [`Transaction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionState {
    /// Accepting reservations and definitions.
    Open,
    /// Pending resources were published.
    Committed,
    /// Pending resources were discarded.
    RolledBack,
}

impl TransactionState {
    fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Committed => "committed",
            Self::RolledBack => "rolled back",
        }
    }
}

/// Staging area for a batch of resource definitions.
///
/// The transaction holds the registry mutably, so no other transaction can interleave with it.
#[derive(Debug)]
pub struct Transaction<'r> {
    registry: &'r mut Registry,
    reserved: HashSet<ResourceId>,
    pending: Vec<Resource>,
    state: TransactionState,
}

impl<'r> Transaction<'r> {
    /// Open a transaction on `registry`.
    pub fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            reserved: HashSet::new(),
            pending: Vec::new(),
            state: TransactionState::Open,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Read access to the committed table.
    pub fn registry(&self) -> &Registry {
        &*self.registry
    }

    /// Resources staged so far.
    pub fn pending(&self) -> &[Resource] {
        &self.pending
    }

    fn ensure_open(&self) -> FcpxResult<()> {
        match self.state {
            TransactionState::Open => Ok(()),
            other => Err(FcpxError::TransactionClosed {
                state: other.label(),
            }),
        }
    }

    /// Reserve `n` ids for definitions staged in this transaction.
    pub fn reserve_ids(&mut self, n: usize) -> FcpxResult<Vec<ResourceId>> {
        self.ensure_open()?;
        let ids = self.registry.reserve_ids(n)?;
        self.reserved.extend(ids.iter().copied());
        Ok(ids)
    }

    /// Reserve a single id.
    pub fn reserve_id(&mut self) -> FcpxResult<ResourceId> {
        let ids = self.reserve_ids(1)?;
        Ok(ids[0])
    }

    /// Stage an asset.
    pub fn create_asset(&mut self, asset: Asset) -> FcpxResult<ResourceId> {
        self.stage(Resource::Asset(asset))
    }

    /// Stage a format.
    pub fn create_format(&mut self, format: Format) -> FcpxResult<ResourceId> {
        self.stage(Resource::Format(format))
    }

    /// Stage an effect.
    pub fn create_effect(&mut self, effect: Effect) -> FcpxResult<ResourceId> {
        self.stage(Resource::Effect(effect))
    }

    /// Stage compound media.
    pub fn create_media(&mut self, media: Media) -> FcpxResult<ResourceId> {
        self.stage(Resource::Media(media))
    }

    fn stage(&mut self, resource: Resource) -> FcpxResult<ResourceId> {
        self.ensure_open()?;
        let id = resource.id();
        if !self.reserved.contains(&id) {
            return Err(FcpxError::UnreservedId(id));
        }
        if self.pending.iter().any(|r| r.id() == id) || self.registry.contains(id) {
            return Err(FcpxError::DuplicateResource(id));
        }
        resource.check_definition().map_err(FcpxError::validation)?;
        self.pending.push(resource);
        Ok(id)
    }

    /// Return the asset already defined for `path`, or stage a new one built by `make`.
    ///
    /// `make` receives a freshly reserved id. Assets staged earlier in this transaction are
    /// reused as well as committed ones; the flag reports whether the asset already existed.
    pub fn get_or_create_asset<F>(&mut self, path: &str, make: F) -> FcpxResult<(Resource, bool)>
    where
        F: FnOnce(ResourceId) -> Asset,
    {
        self.ensure_open()?;
        if let Some(existing) = self.registry.asset_by_path(path) {
            return Ok((Resource::Asset(existing.clone()), true));
        }
        if let Some(staged) = self
            .pending
            .iter()
            .find(|r| r.as_asset().is_some_and(|a| a.path == path))
        {
            return Ok((staged.clone(), true));
        }

        let id = self.reserve_id()?;
        let asset = make(id);
        if asset.id != id {
            return Err(FcpxError::validation(format!(
                "asset built for '{path}' carries id {} instead of {id}",
                asset.id
            )));
        }
        if asset.path != path {
            return Err(FcpxError::validation(format!(
                "asset built for '{path}' points at '{}'",
                asset.path
            )));
        }
        self.create_asset(asset.clone())?;
        Ok((Resource::Asset(asset), false))
    }

    /// Publish every pending resource.
    pub fn commit(&mut self) -> FcpxResult<()> {
        match self.state {
            TransactionState::RolledBack => {
                return Err(FcpxError::TransactionClosed {
                    state: TransactionState::RolledBack.label(),
                });
            }
            TransactionState::Committed => return Ok(()),
            TransactionState::Open => {}
        }
        let count = self.pending.len();
        for resource in self.pending.drain(..) {
            self.registry.insert_committed(resource);
        }
        self.state = TransactionState::Committed;
        tracing::debug!(count, "transaction committed");
        Ok(())
    }

    /// Discard every pending resource. Reserved ids stay retired.
    pub fn rollback(&mut self) -> FcpxResult<()> {
        match self.state {
            TransactionState::Committed => Err(FcpxError::TransactionClosed {
                state: TransactionState::Committed.label(),
            }),
            TransactionState::RolledBack => Ok(()),
            TransactionState::Open => {
                let discarded = self.pending.len();
                self.pending.clear();
                self.state = TransactionState::RolledBack;
                tracing::debug!(discarded, "transaction rolled back");
                Ok(())
            }
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.state == TransactionState::Open && !self.pending.is_empty() {
            tracing::warn!(
                pending = self.pending.len(),
                "transaction dropped without commit; discarding staged resources"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resources/registry.rs"]
mod tests;

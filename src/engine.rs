//! The coexistence engine.
//!
//! Intervals are reported one at a time in non-decreasing order of start.
//! Each report is held against every open group, in the order the groups were
//! opened:
//! * a group whose basic interval does not cover the new start can never
//!   accept this or any later interval, so it is closed;
//! * the first group whose basic interval does cover it claims the report,
//!   either by absorbing the interval (when it starts while all members are
//!   active) or by being replaced by a refined successor;
//! * an unclaimed report opens a new singleton group.
//!
//! Closed groups with more than one member are handed to the registered
//! listeners. Listeners run without any engine lock held, so they may report
//! to the same engine from within the callback.

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;
use std::sync::{Arc, Mutex};

// open groups are kept as an ordered set of ids, cheap to snapshot
use roaring::RoaringTreemap;
use seahash::SeaHasher;
use tracing::{debug, info, trace, warn};

use crate::config::{EngineConfig, OrderPolicy};
use crate::error::{CoexistError, Result};
use crate::event::{CloseCause, GroupId, OverlapEvent, OverlapListener};
use crate::group::IntervalGroup;
use crate::interval::{Bounded, Instant, ReferencedInterval};

pub type IdHasher = BuildHasherDefault<SeaHasher>;

/// The groups kept by the engine, labeled with references of type `R`.
pub type Group<R> = IntervalGroup<ReferencedInterval<R>>;

#[derive(Debug)]
struct EngineState<R> {
    groups: HashMap<GroupId, Group<R>, IdHasher>,
    open: RoaringTreemap,
    next_id: GroupId,
    last_start: Option<Instant>,
    closed: bool,
}

impl<R> EngineState<R> {
    fn new() -> Self {
        Self {
            groups: HashMap::default(),
            open: RoaringTreemap::new(),
            next_id: 0,
            last_start: None,
            closed: false,
        }
    }
    // ids only ever grow, so iterating the open set follows creation order
    fn open_group(&mut self, group: Group<R>) -> GroupId {
        let id = self.next_id;
        self.next_id += 1;
        self.open.insert(id);
        self.groups.insert(id, group);
        id
    }
    fn close_group(&mut self, id: GroupId) -> Option<Group<R>> {
        self.open.remove(id);
        self.groups.remove(&id)
    }
}

struct ListenerRegistry<R> {
    listeners: Vec<Arc<dyn OverlapListener<R>>>,
    registered: HashSet<usize, IdHasher>,
}

pub struct CoexistenceEngine<R = ()> {
    config: EngineConfig,
    state: Mutex<EngineState<R>>,
    registry: Mutex<ListenerRegistry<R>>,
}

impl CoexistenceEngine<()> {
    pub fn report_interval(&self, start: Instant, end: Instant) -> Result<()> {
        self.report(ReferencedInterval::new(start, end, ())?)
    }
}

impl<R> CoexistenceEngine<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            state: Mutex::new(EngineState::new()),
            registry: Mutex::new(ListenerRegistry {
                listeners: Vec::new(),
                registered: HashSet::default(),
            }),
        }
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Adds a listener. Registering the same allocation twice has no effect,
    /// in which case `false` is returned.
    pub fn register_listener(&self, listener: Arc<dyn OverlapListener<R>>) -> Result<bool> {
        let identity = Arc::as_ptr(&listener) as *const () as usize;
        let mut registry = self.registry.lock()?;
        if !registry.registered.insert(identity) {
            return Ok(false);
        }
        registry.listeners.push(listener);
        debug!(listeners = registry.listeners.len(), "listener registered");
        Ok(true)
    }

    pub fn report_referenced(&self, start: Instant, end: Instant, reference: R) -> Result<()> {
        self.report(ReferencedInterval::new(start, end, reference)?)
    }

    pub fn report(&self, member: ReferencedInterval<R>) -> Result<()> {
        let interval = member.interval();
        let snapshot = {
            let mut state = self.state.lock()?;
            if state.closed {
                return Err(CoexistError::ReportingClosed);
            }
            if let Some(last_start) = state.last_start {
                if interval.start() < last_start && self.config.order_policy == OrderPolicy::Enforce {
                    return Err(CoexistError::OutOfOrder {
                        start: interval.start(),
                        last_start,
                    });
                }
            }
            state.last_start = Some(state.last_start.map_or(interval.start(), |s| s.max(interval.start())));
            state.open.clone()
        };
        trace!(%interval, open = snapshot.len(), "report");

        // taken by the first compatible group
        let mut unclaimed = Some(member);
        for id in snapshot.iter() {
            let mut state = self.state.lock()?;
            if state.closed {
                // a listener closed reporting, the remaining groups are already flushed
                trace!(%interval, "reporting closed by a listener");
                break;
            }
            let Some(group) = state.groups.get_mut(&id) else {
                // closed by a listener reporting from within a callback
                trace!(group = id, "group no longer open");
                continue;
            };
            if group.is_compatible(&interval) {
                let Some(member) = unclaimed.take() else {
                    trace!(group = id, %interval, "compatible but already claimed");
                    continue;
                };
                if group.belongs_directly(&interval) {
                    group.add_member(member);
                    debug!(group = id, members = group.len(), %interval, "absorbed");
                } else {
                    let successor = group.refine_by(member);
                    let refined = state.close_group(id);
                    drop(state);
                    if let Some(refined) = refined {
                        self.notify(id, CloseCause::Refined, refined)?;
                    }
                    let members = successor.len();
                    let successor_id = self.open_or_flush(successor)?;
                    debug!(group = id, successor = successor_id, members, %interval, "refined");
                }
            } else {
                let stale = state.close_group(id);
                drop(state);
                if let Some(stale) = stale {
                    self.notify(id, CloseCause::Incompatible, stale)?;
                }
            }
        }

        if let Some(member) = unclaimed {
            let id = self.open_or_flush(IntervalGroup::seeded(member))?;
            debug!(group = id, %interval, "opened");
        }
        Ok(())
    }

    /// Signals the end of the stream. Every open group with more than one
    /// member is reported. Calling this again does nothing.
    pub fn close_reporting(&self) -> Result<()> {
        let remaining: Vec<(GroupId, Group<R>)> = {
            let mut state = self.state.lock()?;
            if state.closed {
                debug!("reporting already closed");
                return Ok(());
            }
            state.closed = true;
            state
                .open
                .iter()
                .filter_map(|id| state.groups.get(&id).map(|g| (id, g.clone())))
                .collect()
        };
        info!(open = remaining.len(), "closing reporting");
        for (id, group) in remaining {
            self.notify(id, CloseCause::EndOfStream, group)?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> Result<bool> {
        Ok(self.state.lock()?.closed)
    }
    pub fn open_group_count(&self) -> Result<usize> {
        Ok(self.state.lock()?.open.len() as usize)
    }
    /// A copy of the open groups, in the order they were opened.
    pub fn open_groups(&self) -> Result<Vec<(GroupId, Group<R>)>> {
        let state = self.state.lock()?;
        Ok(state
            .open
            .iter()
            .filter_map(|id| state.groups.get(&id).map(|g| (id, g.clone())))
            .collect())
    }

    // Groups created after a listener closed reporting are flushed right away.
    fn open_or_flush(&self, group: Group<R>) -> Result<GroupId> {
        let mut state = self.state.lock()?;
        if !state.closed {
            return Ok(state.open_group(group));
        }
        let id = state.next_id;
        state.next_id += 1;
        drop(state);
        debug!(group = id, "flushed, reporting was closed meanwhile");
        self.notify(id, CloseCause::EndOfStream, group)?;
        Ok(id)
    }

    fn notify(&self, id: GroupId, cause: CloseCause, group: Group<R>) -> Result<()> {
        if group.len() < 2 && !self.config.report_singletons {
            trace!(group = id, ?cause, "singleton dropped");
            return Ok(());
        }
        let event = OverlapEvent::new(id, cause, group.into_members());
        debug!(group = id, ?cause, members = event.len(), "closed");
        let listeners = self.registry.lock()?.listeners.clone();
        for (position, listener) in listeners.iter().enumerate() {
            if let Err(e) = listener.overlap_detected(&event) {
                warn!(group = id, listener = position, error = %e, "listener failed");
            }
        }
        Ok(())
    }
}

impl<R> Default for CoexistenceEngine<R>
where
    R: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

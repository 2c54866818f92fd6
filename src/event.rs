//! Notifications about closed coexistence groups.

use std::sync::Mutex;

use serde::Serialize;

use crate::error::Result;
use crate::interval::{Bounded, Interval, ReferencedInterval};

/// Stable identifier of a group within one engine.
pub type GroupId = u64;

/// Why a group was closed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseCause {
    /// The group's basic interval ended before the reported start.
    Incompatible,
    /// The group was replaced by a refined successor.
    Refined,
    /// Reporting was closed while the group was still open.
    EndOfStream,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct OverlapEvent<R> {
    group: GroupId,
    cause: CloseCause,
    members: Vec<ReferencedInterval<R>>,
    // the reference of the basic (founding) member
    reference: Option<R>,
}

impl<R: Clone> OverlapEvent<R> {
    pub fn new(group: GroupId, cause: CloseCause, members: Vec<ReferencedInterval<R>>) -> Self {
        let reference = members.first().map(|m| m.reference().clone());
        Self {
            group,
            cause,
            members,
            reference,
        }
    }
}

impl<R> OverlapEvent<R> {
    pub fn group(&self) -> GroupId {
        self.group
    }
    pub fn cause(&self) -> CloseCause {
        self.cause
    }
    pub fn members(&self) -> &[ReferencedInterval<R>] {
        &self.members
    }
    pub fn reference(&self) -> Option<&R> {
        self.reference.as_ref()
    }
    pub fn intervals(&self) -> Vec<Interval> {
        self.members.iter().map(Bounded::interval).collect()
    }
    /// The union envelope of all members.
    pub fn envelope(&self) -> Option<Interval> {
        self.members
            .iter()
            .map(Bounded::interval)
            .reduce(|a, b| a.envelope(&b))
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Receives closed groups. Listeners are called synchronously while a report
/// is being processed, but without any engine lock held, so they may report
/// further intervals to the same engine.
pub trait OverlapListener<R>: Send + Sync {
    fn overlap_detected(&self, event: &OverlapEvent<R>) -> ListenerResult;
}

impl<R, F> OverlapListener<R> for F
where
    F: Fn(&OverlapEvent<R>) -> ListenerResult + Send + Sync,
{
    fn overlap_detected(&self, event: &OverlapEvent<R>) -> ListenerResult {
        self(event)
    }
}

/// A listener that keeps a copy of every event it receives.
#[derive(Debug)]
pub struct EventCollector<R> {
    events: Mutex<Vec<OverlapEvent<R>>>,
}

impl<R: Clone> EventCollector<R> {
    pub fn new() -> Self {
        Self { events: Mutex::new(Vec::new()) }
    }
    pub fn events(&self) -> Result<Vec<OverlapEvent<R>>> {
        Ok(self.events.lock()?.clone())
    }
    /// Removes and returns the events received so far.
    pub fn take(&self) -> Result<Vec<OverlapEvent<R>>> {
        Ok(std::mem::take(&mut *self.events.lock()?))
    }
    pub fn len(&self) -> Result<usize> {
        Ok(self.events.lock()?.len())
    }
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<R: Clone> Default for EventCollector<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone + Send + Sync> OverlapListener<R> for EventCollector<R> {
    fn overlap_detected(&self, event: &OverlapEvent<R>) -> ListenerResult {
        self.events
            .lock()
            .map_err(|e| e.to_string())?
            .push(event.clone());
        Ok(())
    }
}

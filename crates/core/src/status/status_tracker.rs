//! Per-section loading status tracking.

use log::debug;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::status_model::{Section, Status, StatusSnapshot};
use crate::events::{DefiEvent, EventBus};

/// Tracks the loading status of every section.
///
/// Readers get copies; writers replace one section at a time. Each change is
/// published on the event bus as `DefiEvent::StatusChanged`.
pub struct StatusTracker {
    state: RwLock<TrackerState>,
    events: EventBus,
}

#[derive(Default)]
struct TrackerState {
    statuses: HashMap<Section, Status>,
    /// Token of the guard currently in flight for a section.
    owners: HashMap<Section, u64>,
    next_token: u64,
}

impl StatusTracker {
    pub fn new(events: EventBus) -> Self {
        Self {
            state: RwLock::new(TrackerState::default()),
            events,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TrackerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrackerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current status of a section. Unknown sections are `NotLoaded`.
    pub fn get(&self, section: Section) -> Status {
        self.read()
            .statuses
            .get(&section)
            .copied()
            .unwrap_or_default()
    }

    pub fn set(&self, section: Section, status: Status) {
        let previous = self.write().statuses.insert(section, status);
        self.publish_change(section, previous, status);
    }

    /// Returns the section to `NotLoaded`.
    ///
    /// A guard still in flight for the section no longer owns it: its later
    /// updates are ignored.
    pub fn reset(&self, section: Section) {
        let previous = {
            let mut state = self.write();
            state.owners.remove(&section);
            state.statuses.insert(section, Status::NotLoaded)
        };
        self.publish_change(section, previous, Status::NotLoaded);
    }

    pub fn is_loading(&self, section: Section) -> bool {
        self.get(section).is_loading()
    }

    /// Copies all statuses for use by pure computations.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::new(self.read().statuses.clone())
    }

    /// Starts a fetch for `section` unless one is redundant.
    ///
    /// Returns `None` when the section is already loading, or when it is loaded
    /// and `refresh` is false. Otherwise the section moves to `Loading`
    /// (`Refreshing` when `refresh` is set) and the returned guard moves it to
    /// `Loaded` when dropped. The check and the transition happen under one lock.
    pub fn try_begin(&self, section: Section, refresh: bool) -> Option<SectionGuard<'_>> {
        let status = if refresh {
            Status::Refreshing
        } else {
            Status::Loading
        };
        let (previous, token) = {
            let mut state = self.write();
            let current = state.statuses.get(&section).copied().unwrap_or_default();
            if current.is_loading() || (current == Status::Loaded && !refresh) {
                debug!(
                    "Skipping fetch for {}: status is {:?} (refresh: {})",
                    section, current, refresh
                );
                return None;
            }
            let token = state.next_token;
            state.next_token += 1;
            state.owners.insert(section, token);
            (state.statuses.insert(section, status), token)
        };
        self.publish_change(section, previous, status);
        Some(SectionGuard {
            tracker: self,
            section,
            token,
        })
    }

    /// Applies a guard's update if the guard still owns the section.
    fn set_owned(&self, section: Section, token: u64, status: Status, release: bool) {
        let previous = {
            let mut state = self.write();
            if state.owners.get(&section) != Some(&token) {
                debug!(
                    "Ignoring {:?} for {}: the section was reset while in flight",
                    status, section
                );
                return;
            }
            if release {
                state.owners.remove(&section);
            }
            state.statuses.insert(section, status)
        };
        self.publish_change(section, previous, status);
    }

    fn publish_change(&self, section: Section, previous: Option<Status>, status: Status) {
        if previous.unwrap_or_default() != status {
            debug!("Section {} -> {:?}", section, status);
            self.events.publish(DefiEvent::status_changed(section, status));
        }
    }
}

/// Marks a section as in flight for as long as it is alive.
///
/// Dropping the guard moves the section to `Loaded`, whatever the outcome of
/// the work it covered, unless the section was reset in the meantime.
pub struct SectionGuard<'a> {
    tracker: &'a StatusTracker,
    section: Section,
    token: u64,
}

impl SectionGuard<'_> {
    pub fn section(&self) -> Section {
        self.section
    }

    /// Moves the section to an intermediate status, e.g. `PartiallyLoaded`.
    pub fn advance(&self, status: Status) {
        self.tracker
            .set_owned(self.section, self.token, status, false);
    }
}

impl Drop for SectionGuard<'_> {
    fn drop(&mut self) {
        self.tracker
            .set_owned(self.section, self.token, Status::Loaded, true);
    }
}

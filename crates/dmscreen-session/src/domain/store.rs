//! Session store: the single owner of the session aggregate.
//!
//! Every mutation goes through a named method here. Mutations issued on
//! behalf of an in-flight operation name the `SessionInstance` they target
//! and are refused with `SessionError::SessionReplaced` once that instance
//! is gone.

use std::sync::{Mutex, MutexGuard, PoisonError};

use dmscreen_core::campaign::{Campaign, CampaignId};
use dmscreen_core::character::Character;
use dmscreen_core::error::{Operation, SessionError};
use dmscreen_core::message::{Message, MessageId, MessageRecord, Role};
use dmscreen_rules::domain::dice::DiceRollResult;
use tracing::debug;

use super::state::{SessionInstance, SessionState};

#[derive(Debug)]
struct StoreInner {
    state: SessionState,
    /// Next message identity. Never rewound, not even by `reset`.
    next_message_id: u64,
}

impl StoreInner {
    fn issue(&mut self, record: MessageRecord) -> Message {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        record.into_message(id)
    }

    fn current_for(
        &mut self,
        instance: SessionInstance,
    ) -> Result<&mut SessionState, SessionError> {
        if self.state.instance == instance {
            Ok(&mut self.state)
        } else {
            Err(SessionError::SessionReplaced)
        }
    }

    fn append(
        &mut self,
        instance: SessionInstance,
        records: Vec<MessageRecord>,
    ) -> Result<Vec<Message>, SessionError> {
        let party = &self.current_for(instance)?.party;
        for record in records.iter().filter(|r| r.role == Role::Player) {
            match record.character_id {
                Some(id) if party.contains_key(&id) => {}
                Some(id) => {
                    return Err(SessionError::MalformedResult(format!(
                        "response from character {id}, who is not in the party"
                    )));
                }
                None => {
                    return Err(SessionError::MalformedResult(
                        "player response without a character".to_owned(),
                    ));
                }
            }
        }

        let appended: Vec<Message> = records.into_iter().map(|r| self.issue(r)).collect();
        self.state.messages.extend(appended.iter().cloned());
        self.state.last_error = None;
        Ok(appended)
    }

    fn fail(&mut self, instance: SessionInstance, error: SessionError) -> SessionError {
        match self.current_for(instance) {
            Err(replaced) => replaced,
            Ok(_) if error.is_local_rejection() || error == SessionError::SessionReplaced => error,
            Ok(state) => {
                state.last_error = Some(error.clone());
                error
            }
        }
    }

    fn release(&mut self, instance: SessionInstance, operation: Operation) {
        if let Ok(state) = self.current_for(instance) {
            *flag_mut(state, operation) = false;
        }
    }
}

/// Holds the session aggregate and hands out snapshots of it.
#[derive(Debug)]
pub struct SessionStore {
    inner: Mutex<StoreInner>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Creates a store holding an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                state: SessionState::empty(SessionInstance::new()),
                next_message_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// Identity of the current session.
    #[must_use]
    pub fn instance(&self) -> SessionInstance {
        self.lock().state.instance
    }

    /// Discards the whole aggregate and starts a fresh, empty session.
    ///
    /// Message identities keep counting from where they were, so no
    /// identity issued before the reset is ever issued again.
    pub fn reset(&self) -> SessionInstance {
        let instance = SessionInstance::new();
        self.lock().state = SessionState::empty(instance);
        debug!(%instance, "session reset");
        instance
    }

    /// Replaces the session `replacing` with a newly loaded one.
    ///
    /// History records keep the order they arrive in and receive fresh
    /// identities.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionReplaced` if `replacing` is no longer
    /// current. The store is left untouched then.
    pub(crate) fn install(
        &self,
        replacing: SessionInstance,
        campaign: Campaign,
        party: Vec<Character>,
        history: Vec<MessageRecord>,
    ) -> Result<SessionState, SessionError> {
        let mut inner = self.lock();
        inner.current_for(replacing)?;
        let mut state = SessionState::empty(SessionInstance::new());
        state.campaign = Some(campaign);
        state.party = party.into_iter().map(|c| (c.id, c)).collect();
        state.messages = history.into_iter().map(|r| inner.issue(r)).collect();
        inner.state = state.clone();
        Ok(state)
    }

    /// Replaces the displayed dice result and clears the last error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionReplaced` if `instance` is no longer
    /// current.
    pub(crate) fn replace_dice_result(
        &self,
        instance: SessionInstance,
        result: DiceRollResult,
    ) -> Result<(), SessionError> {
        let mut inner = self.lock();
        let state = inner.current_for(instance)?;
        state.dice_result = Some(result);
        state.last_error = None;
        Ok(())
    }

    /// Records a failed operation as the session's last error.
    ///
    /// Returns the error the caller should surface: `error` itself, or
    /// `SessionError::SessionReplaced` if `instance` is gone (nothing is
    /// recorded then). Local rejections are returned without being recorded.
    pub(crate) fn fail(&self, instance: SessionInstance, error: SessionError) -> SessionError {
        self.lock().fail(instance, error)
    }

    /// Resolves the campaign an operation would target, without claiming
    /// any slot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSpec` if no campaign is loaded.
    pub(crate) fn target(&self) -> Result<(SessionInstance, CampaignId), SessionError> {
        let inner = self.lock();
        let campaign = inner
            .state
            .campaign
            .as_ref()
            .ok_or_else(|| SessionError::InvalidSpec("no campaign is loaded".to_owned()))?;
        Ok((inner.state.instance, campaign.id))
    }

    /// Claims the in-flight slot for `operation` on the current session.
    ///
    /// The slot is released when the outcome is settled through the guard,
    /// or when the guard drops, on every exit path.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSpec` if no campaign is loaded and
    /// `SessionError::Busy` if the slot is already taken.
    pub(crate) fn begin(&self, operation: Operation) -> Result<InFlight<'_>, SessionError> {
        let mut inner = self.lock();
        let campaign_id = inner
            .state
            .campaign
            .as_ref()
            .map(|campaign| campaign.id)
            .ok_or_else(|| SessionError::InvalidSpec("no campaign is loaded".to_owned()))?;

        let flag = flag_mut(&mut inner.state, operation);
        if *flag {
            return Err(SessionError::Busy(operation));
        }
        *flag = true;

        Ok(InFlight {
            store: self,
            operation,
            instance: inner.state.instance,
            campaign_id,
            released: false,
        })
    }
}

fn flag_mut(state: &mut SessionState, operation: Operation) -> &mut bool {
    match operation {
        Operation::Submission => &mut state.submission_in_flight,
        Operation::Suggestions => &mut state.suggestions_in_flight,
    }
}

/// A claimed in-flight slot.
///
/// Settling the outcome through `commit`, `succeed` or `fail` clears the
/// flag in the same critical section that applies the outcome, so no
/// snapshot shows a settled outcome with the flag still set. Dropping an
/// unsettled guard clears the flag too. Either way only the session it was
/// claimed on is touched.
#[derive(Debug)]
pub(crate) struct InFlight<'a> {
    store: &'a SessionStore,
    operation: Operation,
    instance: SessionInstance,
    campaign_id: CampaignId,
    released: bool,
}

impl InFlight<'_> {
    pub(crate) fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    /// Appends a batch of records to the log, all or nothing, and releases
    /// the slot.
    ///
    /// A successful append clears the last error; a rejected one is
    /// recorded as it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionReplaced` if the session is gone, and
    /// `SessionError::MalformedResult` if any player record lacks a
    /// character or names one outside the party. The log is unchanged then.
    pub(crate) fn commit(
        mut self,
        records: Vec<MessageRecord>,
    ) -> Result<Vec<Message>, SessionError> {
        let store = self.store;
        let mut inner = store.lock();
        let outcome = inner
            .append(self.instance, records)
            .map_err(|error| inner.fail(self.instance, error));
        inner.release(self.instance, self.operation);
        self.released = true;
        outcome
    }

    /// Settles a success that leaves the log untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionReplaced` if the session is gone.
    pub(crate) fn succeed(mut self) -> Result<(), SessionError> {
        let store = self.store;
        let mut inner = store.lock();
        let outcome = inner.current_for(self.instance).map(|state| {
            state.last_error = None;
        });
        inner.release(self.instance, self.operation);
        self.released = true;
        outcome
    }

    /// Settles a failure; see `SessionStore::fail`.
    pub(crate) fn fail(mut self, error: SessionError) -> SessionError {
        let store = self.store;
        let mut inner = store.lock();
        let surfaced = inner.fail(self.instance, error);
        inner.release(self.instance, self.operation);
        self.released = true;
        surfaced
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.store.lock().release(self.instance, self.operation);
        }
    }
}

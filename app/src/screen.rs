//! The detail screen: selection state, the display slot, and the trigger
//! that runs a lookup off the UI task.
//!
//! # Design
//! `Screen` is plain state owned by the UI task. `Controller` pairs it with
//! a transport and runs each lookup on tokio's blocking pool, then applies
//! the result back on the caller's task. Each lookup carries a `Ticket`; a
//! result older than one already applied is dropped so a slow earlier
//! lookup never overwrites a newer display. A failed lookup is logged and
//! the previous display stays up.

use std::sync::Arc;

use pokedex_core::{
    catalog, fetch_details, ApiError, LocaleConfig, PokeClient, PokemonDetails, Starter, Transport,
};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Orders lookups started from one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What happened to the display when a lookup result came back.
#[derive(Debug)]
pub enum Applied {
    /// The result replaced the display.
    Shown,
    /// The lookup failed; the display is unchanged.
    Failed(ApiError),
    /// A newer lookup already reached the display; the result was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct Screen {
    selected: usize,
    display: Option<PokemonDetails>,
    issued: u64,
    applied: Option<Ticket>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &'static [Starter] {
        catalog::STARTERS
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Starter {
        catalog::STARTERS[self.selected]
    }

    /// Move the selection to entry `index` of the list.
    pub fn select(&mut self, index: usize) -> Result<Starter, ApiError> {
        let starter =
            catalog::get(index).ok_or_else(|| ApiError::InvalidSelection(format!("#{index}")))?;
        self.selected = index;
        Ok(starter)
    }

    /// Move the selection to the entry displayed as `name`.
    pub fn select_name(&mut self, name: &str) -> Result<Starter, ApiError> {
        let index = catalog::STARTERS
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| ApiError::InvalidSelection(name.to_string()))?;
        self.select(index)
    }

    pub fn display(&self) -> Option<&PokemonDetails> {
        self.display.as_ref()
    }

    /// Issue the ticket for a lookup about to start.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Apply a finished lookup to the display.
    pub fn apply(&mut self, ticket: Ticket, result: Result<PokemonDetails, ApiError>) -> Applied {
        if self.applied.is_some_and(|applied| ticket < applied) {
            info!(?ticket, "dropping stale lookup result");
            return Applied::Stale;
        }
        match result {
            Ok(details) => {
                self.applied = Some(ticket);
                self.display = Some(details);
                Applied::Shown
            }
            Err(e) => {
                error!(?ticket, error = %e, "lookup failed, keeping previous display");
                Applied::Failed(e)
            }
        }
    }
}

/// A lookup running on the blocking pool.
pub struct PendingLookup {
    ticket: Ticket,
    handle: JoinHandle<Result<PokemonDetails, ApiError>>,
}

impl PendingLookup {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

/// Wires the screen's trigger to the detail pipeline.
pub struct Controller<T> {
    client: PokeClient,
    locale: LocaleConfig,
    transport: Arc<T>,
    screen: Screen,
}

impl<T> Controller<T>
where
    T: Transport + Send + Sync + 'static,
{
    pub fn new(client: PokeClient, locale: LocaleConfig, transport: T) -> Self {
        Self {
            client,
            locale,
            transport: Arc::new(transport),
            screen: Screen::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Start a lookup for the selected entry.
    pub fn start(&mut self) -> PendingLookup {
        let id = self.screen.selected().id;
        self.start_id(id)
    }

    /// Start a lookup for an arbitrary Pokédex id.
    pub fn start_id(&mut self, id: u32) -> PendingLookup {
        let ticket = self.screen.begin();
        let client = self.client.clone();
        let locale = self.locale.clone();
        let transport = Arc::clone(&self.transport);
        info!(?ticket, id, "lookup started");
        let handle = tokio::task::spawn_blocking(move || {
            fetch_details(&client, &locale, transport.as_ref(), id)
        });
        PendingLookup { ticket, handle }
    }

    /// Wait for `pending` and apply its result to the screen.
    pub async fn finish(&mut self, pending: PendingLookup) -> Applied {
        match pending.handle.await {
            Ok(result) => self.screen.apply(pending.ticket, result),
            Err(e) => {
                error!(ticket = ?pending.ticket, error = %e, "lookup task did not complete");
                Applied::Failed(ApiError::Transport(e.to_string()))
            }
        }
    }

    /// The trigger: look up the selected entry and update the display.
    pub async fn trigger(&mut self) -> Applied {
        let pending = self.start();
        self.finish(pending).await
    }
}

//! Which fixture loads are still missing, queued, or done.

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Missing,
    InFlight,
    Done,
}

#[derive(Debug, Default)]
pub struct PendingLoads {
    contacts: LoadState,
    deals: LoadState,
}

impl PendingLoads {
    fn slot(&mut self, cmd: BackendCommand) -> &mut LoadState {
        match cmd {
            BackendCommand::LoadContacts => &mut self.contacts,
            BackendCommand::LoadDeals => &mut self.deals,
        }
    }

    pub fn state(&self, cmd: BackendCommand) -> LoadState {
        match cmd {
            BackendCommand::LoadContacts => self.contacts,
            BackendCommand::LoadDeals => self.deals,
        }
    }

    pub fn is_done(&self, cmd: BackendCommand) -> bool {
        self.state(cmd) == LoadState::Done
    }

    /// Marks every missing load as in flight and returns the commands to
    /// send. Loads already queued or finished are not requested again.
    pub fn take_missing(&mut self) -> Vec<BackendCommand> {
        [BackendCommand::LoadContacts, BackendCommand::LoadDeals]
            .into_iter()
            .filter(|&cmd| {
                let slot = self.slot(cmd);
                if *slot == LoadState::Missing {
                    *slot = LoadState::InFlight;
                    true
                } else {
                    false
                }
            })
            .collect()
    }

    pub fn completed(&mut self, cmd: BackendCommand) {
        *self.slot(cmd) = LoadState::Done;
    }

    /// A failed or unsent load becomes missing again so a retry picks it up.
    pub fn failed(&mut self, cmd: BackendCommand) {
        let slot = self.slot(cmd);
        if *slot == LoadState::InFlight {
            *slot = LoadState::Missing;
        }
    }
}

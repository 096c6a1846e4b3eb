//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    LoadContacts,
    LoadDeals,
}

impl BackendCommand {
    pub fn name(self) -> &'static str {
        match self {
            BackendCommand::LoadContacts => "load_contacts",
            BackendCommand::LoadDeals => "load_deals",
        }
    }
}

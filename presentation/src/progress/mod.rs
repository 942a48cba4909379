//! Progress reporters implementing `AgentProgressNotifier`

pub mod reporter;

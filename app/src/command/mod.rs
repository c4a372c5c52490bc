//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own strategy type with its own input, dispatched
//! statically from `main`.

mod init;
mod run;
mod version;

pub use init::InitStrategy;
pub use run::{RunInput, RunStrategy};
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

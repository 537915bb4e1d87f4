use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List apps with their current status
    List,

    /// Register a new app (stopped)
    Add {
        /// Unique app name
        name: String,

        /// Port reserved for the app, exported to it as PORT
        port: u16,

        /// Command line; quote it to keep it one argument
        command: String,
    },

    /// Stop (if running) and remove an app
    Delete { name: String },

    /// Start one app, or every stopped app when no name is given
    Start { name: Option<String> },

    /// Stop one app, or every running app when no name is given
    Stop { name: Option<String> },

    /// Print an app's captured output
    Logs { name: String },
}

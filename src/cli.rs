use std::io::{self, Write};

use clap::{Parser, Subcommand};

/// Message board backend and its operator commands.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database connection string.
    #[clap(long, env = "DATABASE_URL", default_value = "sqlite:data.sqlite")]
    pub database_url: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server.
    Serve {
        /// Address to listen on.
        #[clap(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[clap(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Initialize the database schema.
    Initdb {
        /// Create after drop.
        #[clap(long)]
        drop: bool,

        /// Skip the confirmation prompt when dropping.
        #[clap(long)]
        yes: bool,
    },
    /// Drop all data and insert fake messages. Development only.
    Forge {
        /// Quantity of messages.
        #[clap(long, default_value_t = 20)]
        count: u32,
    },
}

/// Ask the operator a yes/no question on stdin. Anything but an explicit
/// yes counts as no.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn forge_count_defaults_to_twenty() {
        let cli = Cli::try_parse_from(["guestbook", "forge"]).unwrap();
        match cli.command {
            Command::Forge { count } => assert_eq!(count, 20),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn initdb_drop_flag_is_parsed() {
        let cli = Cli::try_parse_from(["guestbook", "initdb", "--drop", "--yes"]).unwrap();
        match cli.command {
            Command::Initdb { drop, yes } => {
                assert!(drop);
                assert!(yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

}

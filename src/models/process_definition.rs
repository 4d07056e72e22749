//! Process Definition Model
//!
//! A named MadGraph process: the generation commands plus the run-card
//! options that get applied when the process is launched.

use std::fmt::Write as _;

use super::run_card::{RunCard, NEVENTS};

/// A named physics process ready to be written out as a MadGraph script
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessDefinition {
    /// Identifier, also used as the MadGraph output directory
    name: String,

    /// Process-generation commands, passed to MadGraph verbatim
    command: String,

    /// Run-card options applied at launch
    run_card: RunCard,
}

impl ProcessDefinition {
    /// Create a process with an empty run card
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self::with_run_card(name, command, RunCard::new())
    }

    /// Create a process with the given run card
    pub fn with_run_card(
        name: impl Into<String>,
        command: impl Into<String>,
        run_card: RunCard,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            run_card,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn run_card(&self) -> &RunCard {
        &self.run_card
    }

    pub fn run_card_mut(&mut self) -> &mut RunCard {
        &mut self.run_card
    }

    /// Set the number of events to generate
    pub fn set_nevents(&mut self, nevents: u64) {
        self.run_card.set(NEVENTS, nevents);
    }

    /// Render the MadGraph script for this process.
    ///
    /// The script generates the process into a directory named after the
    /// process, launches it, and applies every run-card option with a
    /// `set` line before starting the run.
    pub fn mg5_script(&self) -> String {
        let mut script = String::with_capacity(self.command.len() + 256);

        script.push_str(self.command.trim_end());
        script.push('\n');
        // Writing into a String cannot fail.
        let _ = writeln!(script, "output {}", self.name);
        let _ = writeln!(script, "launch {}", self.name);
        script.push_str("done\n");
        for (key, value) in self.run_card.iter() {
            let _ = writeln!(script, "set {} {}", key, value);
        }
        script.push_str("done\n");

        script
    }
}

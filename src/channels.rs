//! Physics Channel Table
//!
//! Maps channel names to fully assembled process definitions. Each entry's
//! command is the shared Standard Model header followed by the channel's
//! own generation commands, concatenated without modification.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::ProcessDefinition;

/// CLI token selecting every channel in the table
pub const ALL_CHANNELS: &str = "all";

/// Header shared by every channel: model import and multiparticle labels
pub const SM_HEADER: &str = "\
set automatic_html_opening False
import model sm
define l+ = e+ mu+
define l- = e- mu-
define vl = ve vm vt
define vl~ = ve~ vm~ vt~
";

/// Channel-specific generation commands
pub const STANDARD_CHANNELS: &[(&str, &str)] = &[
    (
        "ttbar",
        "\
generate p p > t t~, t > l+ vl b, t~ > l- vl~ b~
add process p p > t t~, t > l+ vl b, t~ > j j b~
add process p p > t t~, t > j j b, t~ > l- vl~ b~
add process p p > t t~, t > j j b, t~ > j j b~
",
    ),
    (
        "Wbb",
        "\
generate p p > w+ b b~, w+ > l+ vl $ h
add process p p > w- b b~, w- > l- vl~ $ h
",
    ),
    (
        "Zbb",
        "\
generate p p > z b b~, z > l+ l- $ h
add process p p > z b b~, z > vl vl~ $ h
",
    ),
    (
        "WH",
        "\
generate p p > w+ h, w+ > l+ vl, h > b b~
add process p p > w- h, w- > l- vl~, h > b b~
",
    ),
    (
        "ZH",
        "\
generate p p > z h, z > l+ l-, h > b b~
add process p p > z h, z > vl vl~, h > b b~
",
    ),
];

/// Immutable channel-name to process-definition mapping
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTable {
    processes: BTreeMap<String, ProcessDefinition>,
}

impl ProcessTable {
    /// Build the table of standard channels
    pub fn standard() -> Self {
        Self::with_channels(SM_HEADER, STANDARD_CHANNELS.iter().copied())
    }

    /// Build a table from a header and `(name, command)` pairs
    pub fn with_channels<'a, I>(header: &str, channels: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let processes = channels
            .into_iter()
            .map(|(name, cmd)| {
                let mut command = String::with_capacity(header.len() + cmd.len());
                command.push_str(header);
                command.push_str(cmd);
                (name.to_string(), ProcessDefinition::new(name, command))
            })
            .collect::<BTreeMap<_, _>>();

        debug!("Built process table with {} channels", processes.len());
        Self { processes }
    }

    /// Look up a channel, returning an owned copy of its definition
    pub fn get(&self, channel: &str) -> Result<ProcessDefinition> {
        self.processes
            .get(channel)
            .cloned()
            .ok_or_else(|| Error::UnknownChannel {
                channel: channel.to_string(),
            })
    }

    /// Channel names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.processes.keys().map(String::as_str)
    }

    /// Resolve CLI channel arguments.
    ///
    /// Any `all` argument selects the whole table; otherwise each name is
    /// looked up in argument order and the first unknown name is an error.
    pub fn select<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<ProcessDefinition>> {
        if args.iter().any(|a| a.as_ref() == ALL_CHANNELS) {
            return Ok(self.processes.values().cloned().collect());
        }

        args.iter().map(|a| self.get(a.as_ref())).collect()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::standard()
    }
}

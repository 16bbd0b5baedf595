pub mod compile;
pub mod delete;
pub mod list;
pub mod upload;

/// A flag declared by a command, as shown in help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMeta {
    pub flag: &'static str,
    pub description: &'static str,
}

/// Registration metadata for a subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub group: &'static str,
    pub options: &'static [OptionMeta],
}

impl CommandMeta {
    /// Help text of the declared option `flag`, or an empty string.
    pub fn option_help(&self, flag: &str) -> &'static str {
        self.options
            .iter()
            .find(|option| option.flag == flag)
            .map(|option| option.description)
            .unwrap_or_default()
    }
}

pub const ALL: &[CommandMeta] = &[delete::META, upload::META, compile::META, list::META];

/// Raised by commands that require at least one source.
pub const NO_SOURCES: &str = "No sources specified";

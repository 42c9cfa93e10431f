use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::input::ParsedCommand;

#[derive(Debug, Clone, Default)]
pub struct AliasManager {
    aliases: HashMap<Box<str>, Vec<String>>,
}

impl AliasManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `name` as shorthand for `body`, which is tokenized once here.
    /// An empty body is ignored.
    pub fn add(&mut self, name: &str, body: &str) {
        if let Some(parsed) = crate::input::tokenize(body) {
            let mut words = vec![parsed.name];
            words.extend(parsed.args);
            self.aliases.insert(name.into(), words);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.aliases.get(name).map(Vec::as_slice)
    }

    /// Replaces the command word with its alias body, one level deep.
    pub fn expand(&self, command: ParsedCommand) -> ParsedCommand {
        let Some((head, rest)) = self.get(&command.name).and_then(|w| w.split_first()) else {
            return command;
        };

        let mut args = rest.to_vec();
        args.extend(command.args);
        ParsedCommand::new(head.clone(), args)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(|k| &**k)
    }

    pub fn get_all(&self) -> BTreeMap<Cow<'_, str>, String> {
        self.aliases
            .iter()
            .map(|(k, v)| (Cow::Borrowed(&**k), v.join(" ")))
            .collect()
    }
}

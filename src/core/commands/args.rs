use std::collections::{BTreeSet, HashMap};

use super::CommandError;

/// Flag grammar for one command.
///
/// `switches` are boolean single-letter flags and may be bundled (`-la`).
/// `valued` flags take a value either attached (`-n5`) or as the next
/// word (`-n 5`). With `numeric` set, `-5` is read as that flag's value.
/// A lone `-` is an operand and `--` ends flag parsing.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    command: &'static str,
    switches: &'static str,
    valued: &'static str,
    numeric: Option<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    switches: BTreeSet<char>,
    values: HashMap<char, String>,
    pub operands: Vec<String>,
}

impl ArgSpec {
    pub const fn new(command: &'static str) -> Self {
        Self {
            command,
            switches: "",
            valued: "",
            numeric: None,
        }
    }

    pub const fn switches(mut self, switches: &'static str) -> Self {
        self.switches = switches;
        self
    }

    pub const fn valued(mut self, valued: &'static str) -> Self {
        self.valued = valued;
        self
    }

    pub const fn numeric(mut self, flag: char) -> Self {
        self.numeric = Some(flag);
        self
    }

    pub fn parse(&self, args: &[String]) -> Result<ParsedArgs, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if arg == "--" {
                parsed.operands.extend(iter.by_ref().cloned());
                break;
            }

            let Some(body) = arg.strip_prefix('-').filter(|b| !b.is_empty()) else {
                parsed.operands.push(arg.clone());
                continue;
            };

            if let Some(flag) = self.numeric {
                if body.bytes().all(|b| b.is_ascii_digit()) {
                    parsed.values.insert(flag, body.to_string());
                    continue;
                }
            }

            for (offset, flag) in body.char_indices() {
                if self.switches.contains(flag) {
                    parsed.switches.insert(flag);
                } else if self.valued.contains(flag) {
                    let attached = &body[offset + flag.len_utf8()..];
                    let value = if attached.is_empty() {
                        iter.next()
                            .cloned()
                            .ok_or(CommandError::missing(self.command, "option value"))?
                    } else {
                        attached.to_string()
                    };
                    parsed.values.insert(flag, value);
                    break;
                } else {
                    return Err(CommandError::invalid(
                        self.command,
                        arg.as_str(),
                        format!("unknown option -{}", flag),
                    ));
                }
            }
        }

        Ok(parsed)
    }
}

impl ParsedArgs {
    pub fn has(&self, flag: char) -> bool {
        self.switches.contains(&flag)
    }

    pub fn value(&self, flag: char) -> Option<&str> {
        self.values.get(&flag).map(String::as_str)
    }

    /// The value of a numeric flag, or `default` when it was not given.
    pub fn count(
        &self,
        command: &'static str,
        flag: char,
        default: usize,
    ) -> Result<usize, CommandError> {
        match self.value(flag) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| CommandError::invalid(command, raw, "expected a non-negative number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    const HEAD: ArgSpec = ArgSpec::new("head").valued("n").numeric('n');
    const LS: ArgSpec = ArgSpec::new("ls").switches("alh");

    #[test]
    fn test_bundled_switches() {
        let parsed = LS.parse(&strings(&["-la", "/tmp", "-h"])).unwrap();
        assert!(parsed.has('l') && parsed.has('a') && parsed.has('h'));
        assert_eq!(parsed.operands, ["/tmp"]);
    }

    #[test]
    fn test_value_forms() {
        for args in [&["-n", "5", "f"][..], &["-n5", "f"], &["-5", "f"]] {
            let parsed = HEAD.parse(&strings(args)).unwrap();
            assert_eq!(parsed.count("head", 'n', 10).unwrap(), 5, "{args:?}");
            assert_eq!(parsed.operands, ["f"]);
        }
    }

    #[test]
    fn test_default_count() {
        let parsed = HEAD.parse(&strings(&["f"])).unwrap();
        assert_eq!(parsed.count("head", 'n', 10).unwrap(), 10);
    }

    #[test]
    fn test_bad_count() {
        let parsed = HEAD.parse(&strings(&["-n", "ten", "f"])).unwrap();
        assert!(matches!(
            parsed.count("head", 'n', 10),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_missing_value() {
        assert!(matches!(
            HEAD.parse(&strings(&["-n"])),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_unknown_flag() {
        assert!(matches!(
            LS.parse(&strings(&["-z"])),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_dash_and_double_dash() {
        let parsed = LS.parse(&strings(&["-", "--", "-a"])).unwrap();
        assert!(!parsed.has('a'));
        assert_eq!(parsed.operands, ["-", "-a"]);
    }
}

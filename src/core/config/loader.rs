use std::{fs, io, path::Path};

use super::{Config, ConfigError, ConfigPaths};

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        self.source_if_exists(&self.paths.rc_path, config)
    }

    fn source_if_exists(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        tracing::debug!(path = %path.display(), "loading rc file");
        for (number, line) in content.lines().enumerate() {
            if let Err(reason) = self.process_line(line, config) {
                tracing::warn!(path = %path.display(), line = number + 1, "{}", reason);
            }
        }
        Ok(())
    }

    fn process_line(&self, line: &str, config: &mut Config) -> Result<(), String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("alias ") {
            self.process_alias(rest, config)
        } else if let Some(rest) = line.strip_prefix("set ") {
            self.process_setting(rest, config)
        } else {
            Err(format!("unknown directive: {}", line))
        }
    }

    fn process_alias(&self, line: &str, config: &mut Config) -> Result<(), String> {
        let (name, command) = line
            .split_once('=')
            .ok_or_else(|| format!("expected alias NAME='COMMAND', got: {}", line))?;
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(format!("invalid alias name: {:?}", name));
        }

        let command = strip_quotes(command.trim());
        if command.trim().is_empty() {
            return Err(format!("empty alias: {}", name));
        }

        config.aliases.add(name, command);
        Ok(())
    }

    fn process_setting(&self, line: &str, config: &mut Config) -> Result<(), String> {
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| format!("expected set KEY=VALUE, got: {}", line))?;
        let value = strip_quotes(value.trim());

        match key.trim() {
            "prompt" => config.prompt = value.to_string(),
            "color" => {
                config.color = match value {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    other => return Err(format!("color must be on or off, got: {}", other)),
                }
            }
            "page_size" => {
                config.page_size = value
                    .parse()
                    .ok()
                    .filter(|&n: &usize| n > 0)
                    .ok_or_else(|| format!("page_size must be a positive number, got: {}", value))?
            }
            other => return Err(format!("unknown setting: {}", other)),
        }
        Ok(())
    }
}

fn strip_quotes(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('"') && value.ends_with('"')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

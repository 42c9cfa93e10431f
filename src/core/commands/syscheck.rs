use std::sync::Arc;

use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::health::{format_uptime, HealthReport, HealthReporter};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct SysCheckCommand {
    health: Arc<dyn HealthReporter>,
}

impl SysCheckCommand {
    pub fn new(health: Arc<dyn HealthReporter>) -> Self {
        Self { health }
    }
}

fn render(report: &HealthReport, state: &ShellState) -> Vec<String> {
    let unknown = || "unavailable".to_string();
    vec![
        format!("cwd:      {}", state.current_dir().display()),
        format!("history:  {} entries", state.history().len()),
        format!(
            "load:     {}",
            report.load.map_or_else(unknown, |[one, five, fifteen]| {
                format!("{:.2} {:.2} {:.2}", one, five, fifteen)
            })
        ),
        format!(
            "uptime:   {}",
            report.uptime.map_or_else(unknown, format_uptime)
        ),
        format!(
            "cpus:     {}",
            report.cpus.map_or_else(unknown, |n| n.to_string())
        ),
    ]
}

impl Command for SysCheckCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let leave = match args {
            [] => false,
            [word] if word.eq_ignore_ascii_case("esc") => true,
            [other, ..] => {
                return Err(CommandError::invalid(
                    "sysCheck",
                    other.as_str(),
                    "expected 'esc' or nothing",
                ))
            }
        };

        let report = self.health.report();
        tracing::debug!(?report, "health report collected");
        let output = CommandOutput::lines(render(&report, state));
        Ok(if leave { output.and_exit() } else { output })
    }

    fn summary(&self) -> &'static str {
        "report host status; 'esc' also leaves the shell"
    }

    fn usage(&self) -> &'static str {
        "sysCheck [esc]"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::commands::testing::{run, sandbox};

    struct Fixed(HealthReport);

    impl HealthReporter for Fixed {
        fn report(&self) -> HealthReport {
            self.0.clone()
        }
    }

    fn syscheck(report: HealthReport) -> SysCheckCommand {
        SysCheckCommand::new(Arc::new(Fixed(report)))
    }

    #[test]
    fn test_report_lines() {
        let (_dir, mut state) = sandbox();
        state.history_mut().push("ls");
        let cmd = syscheck(HealthReport {
            load: Some([0.5, 1.0, 1.25]),
            uptime: Some(Duration::from_secs(3_661)),
            cpus: Some(4),
        });

        let out = run(&cmd, &mut state, &[]).unwrap();
        assert!(!out.exit);
        assert_eq!(out.lines[1], "history:  1 entries");
        assert_eq!(out.lines[2], "load:     0.50 1.00 1.25");
        assert_eq!(out.lines[3], "uptime:   01:01:01");
        assert_eq!(out.lines[4], "cpus:     4");
    }

    #[test]
    fn test_missing_samples() {
        let (_dir, mut state) = sandbox();
        let out = run(&syscheck(HealthReport::default()), &mut state, &[]).unwrap();
        assert!(out.lines[2].ends_with("unavailable"));
        assert!(out.lines[3].ends_with("unavailable"));
    }

    #[test]
    fn test_esc_leaves() {
        let (_dir, mut state) = sandbox();
        let cmd = syscheck(HealthReport::default());
        assert!(run(&cmd, &mut state, &["esc"]).unwrap().exit);
        assert!(matches!(
            run(&cmd, &mut state, &["now"]),
            Err(CommandError::InvalidArgument { .. })
        ));
    }
}

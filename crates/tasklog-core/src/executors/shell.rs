use std::env;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Mutex;

use serde_json::{Value, json};

use crate::executors::Executor;
use crate::models::{CoreError, TaskId};
use crate::persistence::PersistenceResult;

pub struct ShellExecutor {
    taskid: TaskId,
    command: Vec<String>,
    pwd: PathBuf,
    outcome: Mutex<Option<CommandOutcome>>,
}

#[derive(Clone, Debug)]
struct CommandOutcome {
    output: String,
    error: String,
    returncode: i32,
}

impl ShellExecutor {
    pub const NAME: &'static str = "shell";

    pub fn new(command: Vec<String>) -> Self {
        Self {
            taskid: TaskId::mint(Self::NAME),
            command,
            pwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            outcome: Mutex::new(None),
        }
    }

    // Reattach to a previously recorded task. The command is unknown at this
    // point, so `export` reflects a not-yet-run command.
    pub fn from_taskid(taskid: TaskId) -> Self {
        Self {
            taskid,
            command: Vec::new(),
            pwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            outcome: Mutex::new(None),
        }
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn run(&self) -> PersistenceResult<()> {
        let (program, args) = self.command.split_first().ok_or_else(|| {
            CoreError::invalid_input("shell executor has no command to run")
                .with_taskid(self.taskid.as_str())
        })?;
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.pwd)
            .output()
            .map_err(|error| {
                CoreError::process("spawn command", error).with_taskid(self.taskid.as_str())
            })?;
        let outcome = CommandOutcome {
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
            error: String::from_utf8_lossy(&output.stderr).into_owned(),
            returncode: output.status.code().unwrap_or(-1),
        };
        *self.outcome.lock().expect("shell outcome lock poisoned") = Some(outcome);
        Ok(())
    }

    pub fn returncode(&self) -> Option<i32> {
        self.outcome
            .lock()
            .expect("shell outcome lock poisoned")
            .as_ref()
            .map(|outcome| outcome.returncode)
    }
}

impl Executor for ShellExecutor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn taskid(&self) -> &TaskId {
        &self.taskid
    }

    fn export(&self) -> Value {
        let outcome = self.outcome.lock().expect("shell outcome lock poisoned");
        json!({
            "pwd": self.pwd.display().to_string(),
            "command": self.command,
            "output": outcome.as_ref().map(|outcome| outcome.output.clone()),
            "error": outcome.as_ref().map(|outcome| outcome.error.clone()),
            "returncode": outcome.as_ref().map(|outcome| outcome.returncode),
        })
    }

    fn summary(&self) -> String {
        format!("[{}] {}", Self::NAME, self.command.join(" "))
    }
}

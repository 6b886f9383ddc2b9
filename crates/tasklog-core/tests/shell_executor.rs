use serde_json::Value;
use tasklog_core::executors::{Executor, ShellExecutor};
use tasklog_core::models::{CoreErrorKind, TaskId};

#[test]
fn new_executors_mint_shell_prefixed_task_ids() {
    let executor = ShellExecutor::new(vec!["true".to_string()]);
    assert_eq!(executor.taskid().executor_name(), "shell");
}

#[test]
fn export_before_running_has_no_outcome() {
    let executor = ShellExecutor::new(vec!["echo".to_string(), "hello".to_string()]);

    let export = executor.export();
    assert_eq!(export["command"], serde_json::json!(["echo", "hello"]));
    assert_eq!(export["output"], Value::Null);
    assert_eq!(export["error"], Value::Null);
    assert_eq!(export["returncode"], Value::Null);
    assert!(executor.returncode().is_none());
}

#[test]
fn run_captures_output_and_exit_status() {
    let executor = ShellExecutor::new(vec!["echo".to_string(), "hello".to_string()]);
    executor.run().unwrap();

    let export = executor.export();
    assert_eq!(export["output"], serde_json::json!("hello\n"));
    assert_eq!(export["error"], serde_json::json!(""));
    assert_eq!(export["returncode"], serde_json::json!(0));
    assert_eq!(executor.returncode(), Some(0));
}

#[test]
fn run_records_a_nonzero_exit_status() {
    let executor = ShellExecutor::new(vec!["false".to_string()]);
    executor.run().unwrap();

    assert_eq!(executor.returncode(), Some(1));
}

#[test]
fn run_without_a_command_is_invalid_input() {
    let executor = ShellExecutor::new(Vec::new());

    let error = executor.run().unwrap_err();
    assert_eq!(error.kind, CoreErrorKind::InvalidInput);
}

#[test]
fn reattached_executors_keep_the_stored_task_id() {
    let taskid = TaskId::from("shell-1234-5678-uuid");
    let executor = ShellExecutor::from_taskid(taskid.clone());

    assert_eq!(executor.taskid(), &taskid);
    assert!(executor.command().is_empty());
}

#[test]
fn summary_names_the_executor_and_command() {
    let executor = ShellExecutor::new(vec!["echo".to_string(), "hello".to_string()]);
    assert_eq!(executor.summary(), "[shell] echo hello");
}

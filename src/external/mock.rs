//! Test-double runner that records invocations and replays preset outputs

use super::runner::{CapturedOutput, CommandRunner, Invocation};
use anyhow::Result;
use std::cell::RefCell;

pub struct MockRunner {
    responses: RefCell<Vec<CapturedOutput>>,
    invocations: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    pub fn with_responses(responses: Vec<CapturedOutput>) -> Self {
        let mut reversed = responses;
        reversed.reverse();
        MockRunner {
            responses: RefCell::new(reversed),
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Real argument vectors of every recorded call, program first
    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.invocations
            .borrow()
            .iter()
            .map(|inv| {
                std::iter::once(inv.program().to_string())
                    .chain(inv.argv().into_iter().map(str::to_string))
                    .collect()
            })
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        self.invocations.borrow_mut().push(invocation.clone());
        Ok(self.responses.borrow_mut().pop().unwrap_or(CapturedOutput {
            code: Some(0),
            ..CapturedOutput::default()
        }))
    }
}

pub fn ok(stdout: &str) -> CapturedOutput {
    CapturedOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn with_stderr(code: i32, stdout: &str, stderr: &str) -> CapturedOutput {
    CapturedOutput {
        code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_runner_replays_in_order() {
        let runner = MockRunner::with_responses(vec![ok("first"), with_stderr(1, "", "boom")]);
        let a = runner.run(&Invocation::new("one")).unwrap();
        let b = runner.run(&Invocation::new("two")).unwrap();
        let c = runner.run(&Invocation::new("three")).unwrap();
        assert_eq!(a.stdout, "first");
        assert_eq!(b.stderr, "boom");
        assert!(c.success());
        assert_eq!(runner.argvs().len(), 3);
        assert_eq!(runner.argvs()[1], vec!["two".to_string()]);
    }
}

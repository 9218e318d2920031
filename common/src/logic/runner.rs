use deploy_defs::DeployError;
use log::{error, info};

use crate::interface::{DeployContext, DeployStep};

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Unvisited,
    Visiting,
    Done,
}

/// Holds deploy steps and runs a tag-filtered selection of them in
/// dependency order.
pub struct DeployRunner {
    steps: Vec<Box<dyn DeployStep>>,
}

impl DeployRunner {
    pub fn new() -> Self {
        DeployRunner { steps: vec![] }
    }

    pub fn with_steps(steps: Vec<Box<dyn DeployStep>>) -> Result<Self, DeployError> {
        let mut runner = DeployRunner::new();
        for step in steps {
            runner.register(step)?;
        }
        Ok(runner)
    }

    pub fn register(&mut self, step: Box<dyn DeployStep>) -> Result<(), DeployError> {
        if self.steps.iter().any(|s| s.name() == step.name()) {
            return Err(DeployError::Configuration(format!(
                "A deploy step named \"{}\" is already registered",
                step.name()
            )));
        }
        self.steps.push(step);
        Ok(())
    }

    pub fn steps(&self) -> &[Box<dyn DeployStep>] {
        &self.steps
    }

    fn tagged(&self, tag: &str) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.tags().iter().any(|t| *t == tag))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Steps carrying any of `tags` (all steps when empty), with their
    /// dependencies ahead of them. Otherwise registration order is kept.
    pub fn select(&self, tags: &[String]) -> Result<Vec<&dyn DeployStep>, DeployError> {
        let roots: Vec<usize> = if tags.is_empty() {
            (0..self.steps.len()).collect()
        } else {
            let mut roots = vec![];
            for tag in tags {
                let matching = self.tagged(tag);
                if matching.is_empty() {
                    return Err(DeployError::Configuration(format!(
                        "No deploy step is tagged \"{}\"",
                        tag
                    )));
                }
                roots.extend(matching);
            }
            roots.sort_unstable();
            roots.dedup();
            roots
        };

        let mut states = vec![VisitState::Unvisited; self.steps.len()];
        let mut order = vec![];
        for idx in roots {
            self.visit(idx, &mut states, &mut order)?;
        }
        Ok(order.into_iter().map(|idx| self.steps[idx].as_ref()).collect())
    }

    fn visit(
        &self,
        idx: usize,
        states: &mut Vec<VisitState>,
        order: &mut Vec<usize>,
    ) -> Result<(), DeployError> {
        match states[idx] {
            VisitState::Done => return Ok(()),
            VisitState::Visiting => {
                return Err(DeployError::Configuration(format!(
                    "Deploy step \"{}\" depends on itself through its dependencies",
                    self.steps[idx].name()
                )))
            }
            VisitState::Unvisited => {}
        }

        states[idx] = VisitState::Visiting;
        for dependency in self.steps[idx].dependencies() {
            let matching = self.tagged(dependency);
            if matching.is_empty() {
                return Err(DeployError::Configuration(format!(
                    "Deploy step \"{}\" depends on \"{}\", but no step carries that tag",
                    self.steps[idx].name(),
                    dependency
                )));
            }
            for dep_idx in matching {
                self.visit(dep_idx, states, order)?;
            }
        }
        states[idx] = VisitState::Done;
        order.push(idx);
        Ok(())
    }

    /// Runs the selected steps one after another, stopping at the first failure.
    /// Returns the names of the steps that ran.
    pub async fn run(
        &self,
        context: &dyn DeployContext,
        tags: &[String],
    ) -> Result<Vec<String>, DeployError> {
        let selected = self.select(tags)?;
        let mut executed = vec![];
        for step in selected {
            info!("Running deploy step \"{}\"", step.name());
            if let Err(e) = step.run(context).await {
                error!("Deploy step \"{}\" failed: {}", step.name(), e);
                return Err(e);
            }
            info!("Deploy step \"{}\" finished", step.name());
            executed.push(step.name().to_string());
        }
        Ok(executed)
    }
}

impl Default for DeployRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::MockDeployContext;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    struct RecordingStep {
        name: &'static str,
        tags: &'static [&'static str],
        dependencies: &'static [&'static str],
        fail: bool,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl DeployStep for RecordingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn tags(&self) -> &[&'static str] {
            self.tags
        }

        fn dependencies(&self) -> &[&'static str] {
            self.dependencies
        }

        async fn run(&self, _context: &dyn DeployContext) -> Result<(), DeployError> {
            self.log.lock().unwrap().push(self.name.to_string());
            if self.fail {
                return Err(DeployError::Submission(
                    self.name.to_string(),
                    "reverted".to_string(),
                ));
            }
            Ok(())
        }
    }

    fn step(
        name: &'static str,
        tags: &'static [&'static str],
        dependencies: &'static [&'static str],
        log: &Arc<Mutex<Vec<String>>>,
    ) -> Box<dyn DeployStep> {
        Box::new(RecordingStep {
            name,
            tags,
            dependencies,
            fail: false,
            log: log.clone(),
        })
    }

    fn names(steps: Vec<&dyn DeployStep>) -> Vec<String> {
        steps.iter().map(|s| s.name().to_string()).collect()
    }

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_select_all_in_registration_order() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner = DeployRunner::with_steps(vec![
            step("Token", &["Token"], &[], &log),
            step("Merchant", &["Merchant"], &[], &log),
        ])
        .unwrap();
        assert_eq!(names(runner.select(&[]).unwrap()), vec!["Token", "Merchant"]);
    }

    #[test]
    fn test_select_by_tag() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner = DeployRunner::with_steps(vec![
            step("Token", &["Token"], &[], &log),
            step("Merchant", &["Merchant", "core"], &[], &log),
        ])
        .unwrap();
        assert_eq!(
            names(runner.select(&tags(&["Merchant"])).unwrap()),
            vec!["Merchant"]
        );
        assert_eq!(
            names(runner.select(&tags(&["core", "Merchant"])).unwrap()),
            vec!["Merchant"]
        );
    }

    #[test]
    fn test_dependencies_run_first() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner = DeployRunner::with_steps(vec![
            step("Merchant", &["Merchant"], &["Token"], &log),
            step("Token", &["Token"], &[], &log),
        ])
        .unwrap();
        assert_eq!(
            names(runner.select(&tags(&["Merchant"])).unwrap()),
            vec!["Token", "Merchant"]
        );
        assert_eq!(names(runner.select(&[]).unwrap()), vec!["Token", "Merchant"]);
    }

    #[test]
    fn test_unknown_tag() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner =
            DeployRunner::with_steps(vec![step("Merchant", &["Merchant"], &[], &log)]).unwrap();
        assert!(matches!(
            runner.select(&tags(&["Escrow"])),
            Err(DeployError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_dependency() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner =
            DeployRunner::with_steps(vec![step("Merchant", &["Merchant"], &["Token"], &log)])
                .unwrap();
        assert!(matches!(
            runner.select(&[]),
            Err(DeployError::Configuration(_))
        ));
    }

    #[test]
    fn test_dependency_cycle() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner = DeployRunner::with_steps(vec![
            step("A", &["A"], &["B"], &log),
            step("B", &["B"], &["A"], &log),
        ])
        .unwrap();
        match runner.select(&[]) {
            Err(DeployError::Configuration(msg)) => assert!(msg.contains("depends on itself")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("cycle was not detected"),
        }
    }

    #[test]
    fn test_duplicate_step_name() {
        let log = Arc::new(Mutex::new(vec![]));
        let mut runner = DeployRunner::new();
        runner.register(step("Merchant", &["Merchant"], &[], &log)).unwrap();
        assert!(runner
            .register(step("Merchant", &["Other"], &[], &log))
            .is_err());
        assert_eq!(runner.steps().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_at_first_failure() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner = DeployRunner::with_steps(vec![
            step("Token", &["Token"], &[], &log),
            Box::new(RecordingStep {
                name: "Merchant",
                tags: &["Merchant"],
                dependencies: &[],
                fail: true,
                log: log.clone(),
            }) as Box<dyn DeployStep>,
            step("Escrow", &["Escrow"], &[], &log),
        ])
        .unwrap();

        let context = MockDeployContext::new();
        let result = runner.run(&context, &[]).await;
        assert!(matches!(result, Err(DeployError::Submission(_, _))));
        assert_eq!(*log.lock().unwrap(), vec!["Token", "Merchant"]);
    }

    #[tokio::test]
    async fn test_run_returns_executed_steps() {
        let log = Arc::new(Mutex::new(vec![]));
        let runner = DeployRunner::with_steps(vec![
            step("Token", &["Token"], &[], &log),
            step("Merchant", &["Merchant"], &[], &log),
        ])
        .unwrap();

        let context = MockDeployContext::new();
        let executed = runner.run(&context, &tags(&["Merchant"])).await.unwrap();
        assert_eq!(executed, vec!["Merchant"]);
        assert_eq!(*log.lock().unwrap(), vec!["Merchant"]);
    }
}

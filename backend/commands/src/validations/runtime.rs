//! Built-in per-invocation checks.

use async_trait::async_trait;
use crier_core::Invocation;

use crate::command::Command;
use crate::validations::{RuntimeValidator, Verdict};

/// Enforces the declared argument-count bounds. On violation the invoker gets
/// the command's `correctSyntax` template (or a stock one) with the
/// `[PREFIX]` and `[ARGS]` tokens substituted.
pub struct ArgumentCount;

#[async_trait]
impl RuntimeValidator for ArgumentCount {
    fn name(&self) -> &'static str {
        "argument-count"
    }

    async fn check(&self, command: &Command, invocation: &Invocation, prefix: &str) -> Verdict {
        let declaration = command.declaration();
        let supplied = invocation.args().len();
        let too_few = supplied < declaration.min_args;
        let too_many = declaration
            .max_args
            .is_some_and(|max| supplied > max);
        if !too_few && !too_many {
            return Verdict::Pass;
        }

        let template = declaration.correct_syntax.clone().unwrap_or_else(|| {
            format!(
                "Invalid syntax. Correct syntax: `[PREFIX]{} [ARGS]`",
                command.name()
            )
        });
        let expected = declaration.expected_args.as_deref().unwrap_or("");
        Verdict::Reject(template.replace("[PREFIX]", prefix).replace("[ARGS]", expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crier_core::CommandDeclaration;

    fn ping() -> Command {
        let declaration = CommandDeclaration {
            min_args: 1,
            max_args: Some(2),
            expected_args: Some("<target> [count]".into()),
            ..Default::default()
        };
        testing::command_owned("ping", declaration)
    }

    async fn verdict(command: &Command, args: &[&str]) -> Verdict {
        let invocation = testing::message_invocation(args);
        ArgumentCount.check(command, &invocation, "!").await
    }

    #[tokio::test]
    async fn within_bounds_passes() {
        let command = ping();
        assert_eq!(verdict(&command, &["a"]).await, Verdict::Pass);
        assert_eq!(verdict(&command, &["a", "b"]).await, Verdict::Pass);
    }

    #[tokio::test]
    async fn too_few_and_too_many_reject() {
        let command = ping();
        assert!(matches!(verdict(&command, &[]).await, Verdict::Reject(_)));
        assert!(matches!(verdict(&command, &["a", "b", "c"]).await, Verdict::Reject(_)));
    }

    #[tokio::test]
    async fn stock_notice_substitutes_prefix_and_args() {
        let command = ping();
        let Verdict::Reject(notice) = verdict(&command, &[]).await else {
            panic!("expected rejection");
        };
        assert_eq!(
            notice,
            "Invalid syntax. Correct syntax: `!ping <target> [count]`"
        );
    }

    #[tokio::test]
    async fn custom_template_substitutes_both_tokens() {
        let declaration = CommandDeclaration {
            min_args: 1,
            correct_syntax: Some("Usage: [PREFIX]ping [ARGS]".into()),
            expected_args: Some("<target>".into()),
            ..Default::default()
        };
        let command = testing::command_owned("ping", declaration);
        let Verdict::Reject(notice) = verdict(&command, &[]).await else {
            panic!("expected rejection");
        };
        assert_eq!(notice, "Usage: !ping <target>");
    }

    #[tokio::test]
    async fn unbounded_max_accepts_many() {
        let declaration = CommandDeclaration {
            min_args: 0,
            max_args: None,
            ..Default::default()
        };
        let command = testing::command_owned("say", declaration);
        assert_eq!(verdict(&command, &["a", "b", "c", "d"]).await, Verdict::Pass);
    }
}
